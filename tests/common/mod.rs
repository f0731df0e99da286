#![allow(dead_code)]

use std::sync::Arc;

use chrono::NaiveDate;
use perfeval::entity::{
    department_evaluations, department_grade_ratios, evaluation_periods, evaluation_weights,
    final_evaluations, organizations, peer_evaluations, pm_evaluations, project_members, projects,
    qualitative_evaluations, users,
};
use perfeval::storage::Storage;
use perfeval::storage::sea_orm_storage::SeaOrmStorage;
use sea_orm::{ActiveModelTrait, DatabaseConnection, Set};

pub const PERIOD: &str = "2025-H1";

pub struct Fixture {
    pub storage: Arc<dyn Storage>,
    pub db: DatabaseConnection,
    pub period_id: i64,
}

/// 内存数据库 + 一个覆盖 2025 上半年的周期
pub async fn fixture() -> Fixture {
    let storage = SeaOrmStorage::in_memory().await.expect("in-memory storage");
    let db = storage.connection().clone();
    let period_id = period(&db, PERIOD, (2025, 1, 1), (2025, 6, 30)).await;

    Fixture {
        storage: Arc::new(storage),
        db,
        period_id,
    }
}

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

pub async fn period(
    db: &DatabaseConnection,
    name: &str,
    start: (i32, u32, u32),
    end: (i32, u32, u32),
) -> i64 {
    evaluation_periods::ActiveModel {
        name: Set(name.to_string()),
        start_date: Set(date(start.0, start.1, start.2)),
        end_date: Set(date(end.0, end.1, end.2)),
        ..Default::default()
    }
    .insert(db)
    .await
    .unwrap()
    .id
}

pub async fn organization(db: &DatabaseConnection, name: &str, parent_id: Option<i64>) -> i64 {
    organizations::ActiveModel {
        name: Set(name.to_string()),
        level: Set(if parent_id.is_some() { 2 } else { 1 }),
        parent_id: Set(parent_id),
        ..Default::default()
    }
    .insert(db)
    .await
    .unwrap()
    .id
}

pub async fn user(db: &DatabaseConnection, username: &str, role: &str, org: Option<i64>) -> i64 {
    users::ActiveModel {
        username: Set(username.to_string()),
        full_name: Set(None),
        role: Set(role.to_string()),
        organization_id: Set(org),
        created_at: Set(0),
        ..Default::default()
    }
    .insert(db)
    .await
    .unwrap()
    .id
}

pub async fn project(db: &DatabaseConnection, name: &str) -> i64 {
    projects::ActiveModel {
        name: Set(name.to_string()),
        pm_id: Set(None),
        created_at: Set(0),
        ..Default::default()
    }
    .insert(db)
    .await
    .unwrap()
    .id
}

pub async fn member(db: &DatabaseConnection, user_id: i64, project_id: i64, weight: i32, is_pm: bool) {
    project_members::ActiveModel {
        user_id: Set(user_id),
        project_id: Set(project_id),
        is_pm: Set(is_pm),
        participation_weight: Set(weight),
        ..Default::default()
    }
    .insert(db)
    .await
    .unwrap();
}

/// 7 项之和等于 total 的同事评价（total <= 100）
pub async fn peer(
    db: &DatabaseConnection,
    evaluator: i64,
    evaluatee: i64,
    project_id: i64,
    period_id: i64,
    total: i32,
) {
    let mut remaining = total;
    let mut scores = [0; 7];
    for (slot, cap) in scores.iter_mut().zip([20, 20, 10, 10, 10, 10, 20]) {
        *slot = remaining.min(cap);
        remaining -= *slot;
    }
    assert_eq!(remaining, 0, "total {total} exceeds the peer caps");

    peer_evaluations::ActiveModel {
        evaluator_id: Set(evaluator),
        evaluatee_id: Set(evaluatee),
        project_id: Set(project_id),
        period_id: Set(period_id),
        score_1: Set(scores[0]),
        score_2: Set(scores[1]),
        score_3: Set(scores[2]),
        score_4: Set(scores[3]),
        score_5: Set(scores[4]),
        score_6: Set(scores[5]),
        score_7: Set(scores[6]),
        comment: Set(None),
        updated_at: Set(0),
        ..Default::default()
    }
    .insert(db)
    .await
    .unwrap();
}

pub async fn pm(
    db: &DatabaseConnection,
    evaluator: i64,
    evaluatee: i64,
    project_id: i64,
    period_id: i64,
    score: i32,
) {
    pm_evaluations::ActiveModel {
        evaluator_id: Set(evaluator),
        evaluatee_id: Set(evaluatee),
        project_id: Set(project_id),
        period_id: Set(period_id),
        score: Set(score),
        comment: Set(None),
        updated_at: Set(0),
        ..Default::default()
    }
    .insert(db)
    .await
    .unwrap();
}

pub async fn qualitative(
    db: &DatabaseConnection,
    evaluator: i64,
    evaluatee: i64,
    period_id: i64,
    qualitative_score: i32,
    contribution: i32,
) {
    qualitative_evaluations::ActiveModel {
        evaluator_id: Set(evaluator),
        evaluatee_id: Set(evaluatee),
        period_id: Set(period_id),
        qualitative_score: Set(qualitative_score),
        department_contribution_score: Set(contribution),
        feedback: Set(None),
        updated_at: Set(0),
        ..Default::default()
    }
    .insert(db)
    .await
    .unwrap();
}

pub async fn final_evaluation(
    db: &DatabaseConnection,
    evaluatee: i64,
    period_id: i64,
    final_score: f64,
    grade: Option<&str>,
) {
    final_evaluations::ActiveModel {
        evaluatee_id: Set(evaluatee),
        period_id: Set(period_id),
        peer_score: Set(0.0),
        pm_score: Set(0.0),
        qualitative_score: Set(0.0),
        final_score: Set(final_score),
        grade: Set(grade.map(str::to_string)),
        updated_at: Set(0),
        ..Default::default()
    }
    .insert(db)
    .await
    .unwrap();
}

pub async fn department_tier(db: &DatabaseConnection, department_id: i64, period_id: i64, tier: &str) {
    department_evaluations::ActiveModel {
        department_id: Set(department_id),
        period_id: Set(period_id),
        grade: Set(Some(tier.to_string())),
        ..Default::default()
    }
    .insert(db)
    .await
    .unwrap();
}

pub async fn grade_ratio(db: &DatabaseConnection, tier: &str, s_ratio: f64, a_ratio: f64) {
    department_grade_ratios::ActiveModel {
        department_grade: Set(tier.to_string()),
        s_ratio: Set(s_ratio),
        a_ratio: Set(a_ratio),
        ..Default::default()
    }
    .insert(db)
    .await
    .unwrap();
}

pub async fn role_weight(db: &DatabaseConnection, role: &str, item: &str, weight: f64) {
    evaluation_weights::ActiveModel {
        role: Set(role.to_string()),
        item: Set(item.to_string()),
        weight: Set(weight),
        ..Default::default()
    }
    .insert(db)
    .await
    .unwrap();
}

/// 当前周期内某用户的等级
pub async fn grade_of(fx: &Fixture, evaluatee: i64) -> Option<String> {
    let period = fx.storage.get_period_by_name(PERIOD).await.unwrap().unwrap();
    fx.storage
        .list_final_evaluations(&period, Some(&[evaluatee]))
        .await
        .unwrap()
        .into_iter()
        .next()
        .and_then(|e| e.grade)
}
