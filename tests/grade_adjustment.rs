mod common;

use std::sync::Arc;

use common::*;
use perfeval::config::DatabaseConfig;
use perfeval::errors::EvaluationError;
use perfeval::models::evaluations::requests::GradeAdjustment;
use perfeval::models::users::entities::UserRole;
use perfeval::services::GradeAdjustmentService;
use perfeval::storage::Storage;
use perfeval::storage::sea_orm_storage::SeaOrmStorage;

fn adj(user_id: i64, grade: &str) -> GradeAdjustment {
    GradeAdjustment {
        user_id,
        grade: grade.to_string(),
    }
}

struct Department {
    id: i64,
    head: i64,
    members: Vec<i64>,
}

/// 部门负责人 + (size - 1) 名员工，每人都有一条未评级的最终评价
async fn department(fx: &Fixture, name: &str, size: usize) -> Department {
    let id = organization(&fx.db, name, None).await;
    let head = user(&fx.db, &format!("{name}-head"), "dept_head", Some(id)).await;
    let mut members = vec![head];
    for i in 1..size {
        members.push(user(&fx.db, &format!("{name}-{i}"), "employee", Some(id)).await);
    }
    for &member in &members {
        final_evaluation(&fx.db, member, fx.period_id, 80.0, None).await;
    }
    Department { id, head, members }
}

#[tokio::test]
async fn unbalanced_b_plus_is_rejected_for_dept_heads() {
    let fx = fixture().await;
    let dept = department(&fx, "rnd", 5).await;
    department_tier(&fx.db, dept.id, fx.period_id, "A").await;
    grade_ratio(&fx.db, "A", 10.0, 20.0).await;
    let service = GradeAdjustmentService::new(fx.storage.clone());

    let err = service
        .adjust_grades(dept.id, PERIOD, &[adj(dept.members[1], "B+")], UserRole::DeptHead)
        .await
        .unwrap_err();
    assert!(matches!(err, EvaluationError::BalanceViolation(_)));
    assert_eq!(grade_of(&fx, dept.members[1]).await, None);

    let updated = service
        .adjust_grades(
            dept.id,
            PERIOD,
            &[adj(dept.members[1], "B+"), adj(dept.members[2], "B-")],
            UserRole::DeptHead,
        )
        .await
        .unwrap();
    assert_eq!(updated.len(), 2);
    assert_eq!(grade_of(&fx, dept.members[1]).await.as_deref(), Some("B+"));
    assert_eq!(grade_of(&fx, dept.members[2]).await.as_deref(), Some("B-"));
}

#[tokio::test]
async fn s_quota_is_floor_of_department_size() {
    let fx = fixture().await;
    let dept = department(&fx, "rnd", 10).await;
    department_tier(&fx.db, dept.id, fx.period_id, "A").await;
    grade_ratio(&fx.db, "A", 10.0, 20.0).await;
    let service = GradeAdjustmentService::new(fx.storage.clone());

    let two_s = [adj(dept.members[1], "S"), adj(dept.members[2], "S")];
    let err = service
        .adjust_grades(dept.id, PERIOD, &two_s, UserRole::DeptHead)
        .await
        .unwrap_err();
    assert!(matches!(err, EvaluationError::QuotaExceeded(_)));
    assert_eq!(grade_of(&fx, dept.members[1]).await, None);
    assert_eq!(grade_of(&fx, dept.members[2]).await, None);

    service
        .adjust_grades(dept.id, PERIOD, &two_s[..1], UserRole::DeptHead)
        .await
        .unwrap();
    assert_eq!(grade_of(&fx, dept.members[1]).await.as_deref(), Some("S"));
}

#[tokio::test]
async fn existing_grades_count_toward_the_quota() {
    let fx = fixture().await;
    let dept = department(&fx, "rnd", 10).await;
    department_tier(&fx.db, dept.id, fx.period_id, "A").await;
    grade_ratio(&fx.db, "A", 10.0, 20.0).await;
    let service = GradeAdjustmentService::new(fx.storage.clone());

    service
        .adjust_grades(dept.id, PERIOD, &[adj(dept.members[1], "S")], UserRole::DeptHead)
        .await
        .unwrap();
    let err = service
        .adjust_grades(dept.id, PERIOD, &[adj(dept.members[2], "S")], UserRole::DeptHead)
        .await
        .unwrap_err();
    assert!(matches!(err, EvaluationError::QuotaExceeded(_)));

    // 把原来的 S 换掉后名额空出
    service
        .adjust_grades(
            dept.id,
            PERIOD,
            &[adj(dept.members[1], "A"), adj(dept.members[2], "S")],
            UserRole::DeptHead,
        )
        .await
        .unwrap();
    assert_eq!(grade_of(&fx, dept.members[2]).await.as_deref(), Some("S"));
}

#[tokio::test]
async fn admins_bypass_quota_and_balance() {
    let fx = fixture().await;
    let dept = department(&fx, "rnd", 10).await;
    let service = GradeAdjustmentService::new(fx.storage.clone());

    let updated = service
        .adjust_grades(
            dept.id,
            PERIOD,
            &[
                adj(dept.members[1], "S"),
                adj(dept.members[2], "S"),
                adj(dept.members[3], "B+"),
            ],
            UserRole::Admin,
        )
        .await
        .unwrap();
    assert_eq!(updated.len(), 3);
}

#[tokio::test]
async fn missing_tier_or_ratio_is_quota_unavailable() {
    let fx = fixture().await;
    let dept = department(&fx, "rnd", 4).await;
    let service = GradeAdjustmentService::new(fx.storage.clone());
    let balanced = [adj(dept.members[1], "B+"), adj(dept.members[2], "B-")];

    let err = service
        .adjust_grades(dept.id, PERIOD, &balanced, UserRole::DeptHead)
        .await
        .unwrap_err();
    assert!(matches!(err, EvaluationError::QuotaUnavailable(_)));

    department_tier(&fx.db, dept.id, fx.period_id, "B").await;
    let err = service
        .adjust_grades(dept.id, PERIOD, &balanced, UserRole::DeptHead)
        .await
        .unwrap_err();
    assert!(matches!(err, EvaluationError::QuotaUnavailable(_)));
    assert_eq!(grade_of(&fx, dept.members[1]).await, None);
}

#[tokio::test]
async fn adjustments_outside_the_department_are_ignored() {
    let fx = fixture().await;
    let dept = department(&fx, "rnd", 4).await;
    let other = department(&fx, "ops", 2).await;
    let unrated = user(&fx.db, "unrated", "employee", Some(dept.id)).await;
    department_tier(&fx.db, dept.id, fx.period_id, "A").await;
    grade_ratio(&fx.db, "A", 10.0, 20.0).await;
    let service = GradeAdjustmentService::new(fx.storage.clone());

    let updated = service
        .adjust_grades(
            dept.id,
            PERIOD,
            &[
                adj(dept.members[1], "B+"),
                adj(dept.members[2], "B-"),
                adj(other.members[1], "S"),
                adj(unrated, "C"),
            ],
            UserRole::DeptHead,
        )
        .await
        .unwrap();

    let mut ids: Vec<i64> = updated.iter().map(|e| e.evaluatee_id).collect();
    ids.sort();
    assert_eq!(ids, vec![dept.members[1], dept.members[2]]);
    assert_eq!(grade_of(&fx, other.members[1]).await, None);
    assert_eq!(grade_of(&fx, unrated).await, None);
}

#[tokio::test]
async fn sub_organizations_belong_to_the_department() {
    let fx = fixture().await;
    let dept = department(&fx, "rnd", 5).await;
    let team = organization(&fx.db, "rnd-team", Some(dept.id)).await;
    let mut team_members = Vec::new();
    for i in 0..5 {
        let id = user(&fx.db, &format!("team-{i}"), "employee", Some(team)).await;
        final_evaluation(&fx.db, id, fx.period_id, 70.0, None).await;
        team_members.push(id);
    }
    department_tier(&fx.db, dept.id, fx.period_id, "A").await;
    grade_ratio(&fx.db, "A", 10.0, 20.0).await;
    let service = GradeAdjustmentService::new(fx.storage.clone());

    // 共 10 人，S 名额为 1；5 人时为 0
    service
        .adjust_grades(dept.id, PERIOD, &[adj(team_members[0], "S")], UserRole::DeptHead)
        .await
        .unwrap();
    assert_eq!(grade_of(&fx, team_members[0]).await.as_deref(), Some("S"));
}

#[tokio::test]
async fn duplicate_entries_resolve_to_the_last_one() {
    let fx = fixture().await;
    let dept = department(&fx, "rnd", 4).await;
    let service = GradeAdjustmentService::new(fx.storage.clone());

    service
        .adjust_grades(
            dept.id,
            PERIOD,
            &[adj(dept.members[1], "S"), adj(dept.members[1], "B")],
            UserRole::Admin,
        )
        .await
        .unwrap();
    assert_eq!(grade_of(&fx, dept.members[1]).await.as_deref(), Some("B"));
}

#[tokio::test]
async fn invalid_requests_are_rejected() {
    let fx = fixture().await;
    let dept = department(&fx, "rnd", 3).await;
    let service = GradeAdjustmentService::new(fx.storage.clone());

    let err = service
        .adjust_grades(dept.id, PERIOD, &[adj(dept.members[1], "A+")], UserRole::Admin)
        .await
        .unwrap_err();
    assert!(matches!(err, EvaluationError::Validation(_)));

    let err = service
        .adjust_grades(9999, PERIOD, &[adj(dept.members[1], "A")], UserRole::Admin)
        .await
        .unwrap_err();
    assert!(matches!(err, EvaluationError::DepartmentNotFound(_)));

    let err = service
        .adjust_grades(dept.id, "1999-H1", &[adj(dept.members[1], "A")], UserRole::Admin)
        .await
        .unwrap_err();
    assert!(matches!(err, EvaluationError::PeriodNotFound(_)));
}

#[tokio::test]
async fn target_department_follows_the_requester() {
    let fx = fixture().await;
    let dept = department(&fx, "rnd", 3).await;
    let other = department(&fx, "ops", 2).await;
    let admin = user(&fx.db, "hr", "admin", None).await;
    let service = GradeAdjustmentService::new(fx.storage.clone());

    let head = fx.storage.get_user_by_id(dept.head).await.unwrap().unwrap();
    let target = service
        .target_department(&head, &[adj(other.members[1], "A")])
        .await
        .unwrap();
    assert_eq!(target, dept.id);

    let admin = fx.storage.get_user_by_id(admin).await.unwrap().unwrap();
    let target = service
        .target_department(&admin, &[adj(other.members[1], "A")])
        .await
        .unwrap();
    assert_eq!(target, other.id);

    let err = service.target_department(&admin, &[]).await.unwrap_err();
    assert!(matches!(err, EvaluationError::Validation(_)));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn concurrent_adjustments_share_the_department_quota() {
    let dir = tempfile::tempdir().unwrap();
    let config = DatabaseConfig {
        url: dir.path().join("perfeval.db").to_string_lossy().into_owned(),
        pool_size: 2,
        timeout: 10,
    };
    // 两个独立的连接池指向同一个库，相当于两个进程
    let first = SeaOrmStorage::open(&config).await.unwrap();
    let second = SeaOrmStorage::open(&config).await.unwrap();

    let db = first.connection().clone();
    let period_id = period(&db, PERIOD, (2025, 1, 1), (2025, 6, 30)).await;
    let dept = organization(&db, "rnd", None).await;
    let mut members = Vec::new();
    for i in 0..10 {
        let id = user(&db, &format!("rnd-{i}"), "employee", Some(dept)).await;
        final_evaluation(&db, id, period_id, 80.0, None).await;
        members.push(id);
    }
    department_tier(&db, dept, period_id, "A").await;
    grade_ratio(&db, "A", 10.0, 20.0).await;

    let first: Arc<dyn Storage> = Arc::new(first);
    let second: Arc<dyn Storage> = Arc::new(second);
    let first_service = GradeAdjustmentService::new(first.clone());
    let second_service = GradeAdjustmentService::new(second);

    // 10 人部门只有 1 个 S 名额，两边各自都不超额
    let first_adjustments = [adj(members[1], "S")];
    let second_adjustments = [adj(members[2], "S")];
    let (a, b) = tokio::join!(
        first_service.adjust_grades(dept, PERIOD, &first_adjustments, UserRole::DeptHead),
        second_service.adjust_grades(dept, PERIOD, &second_adjustments, UserRole::DeptHead),
    );
    let results = [a, b];
    assert_eq!(results.iter().filter(|r| r.is_ok()).count(), 1);
    assert!(
        results
            .iter()
            .any(|r| matches!(r, Err(EvaluationError::QuotaExceeded(_))))
    );

    let period = first.get_period_by_name(PERIOD).await.unwrap().unwrap();
    let rows = first.list_final_evaluations(&period, None).await.unwrap();
    let s_count = rows
        .iter()
        .filter(|e| e.grade.as_deref() == Some("S"))
        .count();
    assert_eq!(s_count, 1);
}
