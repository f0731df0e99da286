mod common;

use common::*;
use perfeval::errors::EvaluationError;
use perfeval::models::evaluations::requests::{
    ManagerScoreSubmission, PeerScoreSubmission, QualitativeScoreSubmission,
};
use perfeval::config::EvaluationConfig;
use perfeval::services::{AggregationService, ScoreService};

fn peer_sub(evaluatee_id: i64, project_id: i64, scores: [i32; 7]) -> PeerScoreSubmission {
    PeerScoreSubmission {
        evaluatee_id,
        project_id,
        scores,
        comment: None,
    }
}

fn pm_sub(evaluatee_id: i64, project_id: i64, score: i32) -> ManagerScoreSubmission {
    ManagerScoreSubmission {
        evaluatee_id,
        project_id,
        score,
        comment: Some("ok".to_string()),
    }
}

fn qualitative_sub(evaluatee_id: i64, qualitative: i32, contribution: i32) -> QualitativeScoreSubmission {
    QualitativeScoreSubmission {
        evaluatee_id,
        qualitative_score: qualitative,
        department_contribution_score: contribution,
        feedback: None,
    }
}

/// 2025-H1 期间的提交服务
fn service(fx: &Fixture) -> ScoreService {
    ScoreService::new(fx.storage.clone(), date(2025, 3, 1))
}

#[tokio::test]
async fn peer_scores_are_upserted_per_evaluator() {
    let fx = fixture().await;
    let rater = user(&fx.db, "rater", "employee", None).await;
    let alice = user(&fx.db, "alice", "employee", None).await;
    let bob = user(&fx.db, "bob", "employee", None).await;
    let p1 = project(&fx.db, "p1").await;
    let service = service(&fx);

    let saved = service
        .submit_peer_scores(
            rater,
            PERIOD,
            vec![
                peer_sub(alice, p1, [16, 16, 8, 8, 8, 8, 16]),
                peer_sub(bob, p1, [10, 10, 5, 5, 5, 5, 10]),
            ],
        )
        .await
        .unwrap();
    assert_eq!(saved.len(), 2);
    assert_eq!(saved[0].total(), 80);

    service
        .submit_peer_scores(rater, PERIOD, vec![peer_sub(alice, p1, [12, 12, 6, 6, 6, 6, 12])])
        .await
        .unwrap();
    let rows = fx
        .storage
        .list_peer_scores(alice, p1, fx.period_id)
        .await
        .unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].total(), 60);
}

#[tokio::test]
async fn peer_batch_rules_are_enforced() {
    let fx = fixture().await;
    let rater = user(&fx.db, "rater", "employee", None).await;
    let alice = user(&fx.db, "alice", "employee", None).await;
    let p1 = project(&fx.db, "p1").await;
    let service = service(&fx);

    let cases = [
        // 平均超过 70
        vec![peer_sub(alice, p1, [20, 20, 10, 10, 10, 10, 20])],
        // 超出单项满分
        vec![peer_sub(alice, p1, [21, 0, 0, 0, 0, 0, 0])],
        // 评价自己
        vec![peer_sub(rater, p1, [10, 10, 5, 5, 5, 5, 10])],
    ];
    for submissions in cases {
        let err = service
            .submit_peer_scores(rater, PERIOD, submissions)
            .await
            .unwrap_err();
        assert!(matches!(err, EvaluationError::Validation(_)));
    }

    let err = service
        .submit_peer_scores(rater, "2030-H1", vec![peer_sub(alice, p1, [0; 7])])
        .await
        .unwrap_err();
    assert!(matches!(err, EvaluationError::PeriodNotFound(_)));

    let err = service
        .submit_peer_scores(rater, PERIOD, vec![peer_sub(5555, p1, [0; 7])])
        .await
        .unwrap_err();
    assert!(matches!(err, EvaluationError::UserNotFound(_)));
}

#[tokio::test]
async fn manager_scores_require_the_project_pm() {
    let fx = fixture().await;
    let manager = user(&fx.db, "manager", "team_lead", None).await;
    let outsider = user(&fx.db, "outsider", "employee", None).await;
    let alice = user(&fx.db, "alice", "employee", None).await;
    let p1 = project(&fx.db, "p1").await;
    member(&fx.db, manager, p1, 100, true).await;
    member(&fx.db, outsider, p1, 100, false).await;
    member(&fx.db, alice, p1, 100, false).await;
    let service = service(&fx);

    let err = service
        .submit_manager_scores(outsider, PERIOD, vec![pm_sub(alice, p1, 80)])
        .await
        .unwrap_err();
    assert!(matches!(err, EvaluationError::Validation(_)));

    let err = service
        .submit_manager_scores(manager, PERIOD, vec![pm_sub(alice, p1, 101)])
        .await
        .unwrap_err();
    assert!(matches!(err, EvaluationError::Validation(_)));

    service
        .submit_manager_scores(manager, PERIOD, vec![pm_sub(alice, p1, 80)])
        .await
        .unwrap();
    service
        .submit_manager_scores(manager, PERIOD, vec![pm_sub(alice, p1, 88)])
        .await
        .unwrap();
    let rows = fx
        .storage
        .list_manager_scores(alice, p1, fx.period_id)
        .await
        .unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].score, 88);
}

#[tokio::test]
async fn qualitative_scores_are_limited_to_subordinates() {
    let fx = fixture().await;
    let dept = organization(&fx.db, "rnd", None).await;
    let team = organization(&fx.db, "rnd-team", Some(dept)).await;
    let other = organization(&fx.db, "ops", None).await;
    let head = user(&fx.db, "head", "dept_head", Some(dept)).await;
    let alice = user(&fx.db, "alice", "employee", Some(team)).await;
    let bob = user(&fx.db, "bob", "employee", Some(other)).await;
    let service = service(&fx);

    let saved = service
        .submit_qualitative_score(head, PERIOD, qualitative_sub(alice, 18, 9))
        .await
        .unwrap();
    assert_eq!(saved.combined(), 27.0);

    let err = service
        .submit_qualitative_score(head, PERIOD, qualitative_sub(bob, 10, 5))
        .await
        .unwrap_err();
    assert!(matches!(err, EvaluationError::Validation(_)));

    for (q, c) in [(21, 5), (10, 11), (-1, 0)] {
        let err = service
            .submit_qualitative_score(head, PERIOD, qualitative_sub(alice, q, c))
            .await
            .unwrap_err();
        assert!(matches!(err, EvaluationError::Validation(_)));
    }

    let stored = fx
        .storage
        .get_qualitative_score(alice, fx.period_id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(stored.qualitative_score, 18);
}

#[tokio::test]
async fn submissions_outside_the_active_period_are_rejected() {
    let fx = fixture().await;
    period(&fx.db, "2025-H2", (2025, 7, 1), (2025, 12, 31)).await;
    let manager = user(&fx.db, "manager", "team_lead", None).await;
    let rater = user(&fx.db, "rater", "employee", None).await;
    let alice = user(&fx.db, "alice", "employee", None).await;
    let p1 = project(&fx.db, "p1").await;
    member(&fx.db, manager, p1, 100, true).await;

    // 2025-H1 已结束，2025-H2 为激活周期
    let late = ScoreService::new(fx.storage.clone(), date(2025, 8, 1));
    let err = late
        .submit_peer_scores(rater, PERIOD, vec![peer_sub(alice, p1, [10, 10, 5, 5, 5, 5, 10])])
        .await
        .unwrap_err();
    assert!(matches!(err, EvaluationError::PeriodClosed(_)));
    assert!(err.is_policy_violation());

    let err = late
        .submit_manager_scores(manager, PERIOD, vec![pm_sub(alice, p1, 80)])
        .await
        .unwrap_err();
    assert!(matches!(err, EvaluationError::PeriodClosed(_)));

    // 两个周期都不包含的日期
    let idle = ScoreService::new(fx.storage.clone(), date(2026, 3, 1));
    let err = idle
        .submit_peer_scores(rater, "2025-H2", vec![peer_sub(alice, p1, [0; 7])])
        .await
        .unwrap_err();
    assert!(matches!(err, EvaluationError::PeriodClosed(_)));

    assert!(
        fx.storage
            .list_peer_scores(alice, p1, fx.period_id)
            .await
            .unwrap()
            .is_empty()
    );
    assert!(
        fx.storage
            .list_manager_scores(alice, p1, fx.period_id)
            .await
            .unwrap()
            .is_empty()
    );

    late.submit_peer_scores(rater, "2025-H2", vec![peer_sub(alice, p1, [10, 10, 5, 5, 5, 5, 10])])
        .await
        .unwrap();
}

#[tokio::test]
async fn admins_record_pm_scores_without_being_pm() {
    let fx = fixture().await;
    let admin = user(&fx.db, "hr", "admin", None).await;
    let lead = user(&fx.db, "lead", "team_lead", None).await;
    let employee = user(&fx.db, "employee", "employee", None).await;
    let p1 = project(&fx.db, "p1").await;
    let p2 = project(&fx.db, "p2").await;
    member(&fx.db, lead, p1, 50, true).await;
    member(&fx.db, lead, p2, 50, true).await;
    let service = service(&fx);

    // 管理员不是任何项目的 PM，普通 PM 评价入口拒绝
    let err = service
        .submit_manager_scores(admin, PERIOD, vec![pm_sub(lead, p1, 90)])
        .await
        .unwrap_err();
    assert!(matches!(err, EvaluationError::Validation(_)));

    let err = service
        .submit_pm_self_score(employee, PERIOD, pm_sub(lead, p1, 90))
        .await
        .unwrap_err();
    assert!(matches!(err, EvaluationError::Validation(_)));

    let err = service
        .submit_pm_self_score(admin, PERIOD, pm_sub(lead, p1, 101))
        .await
        .unwrap_err();
    assert!(matches!(err, EvaluationError::Validation(_)));

    let saved = service
        .submit_pm_self_score(admin, PERIOD, pm_sub(lead, p1, 90))
        .await
        .unwrap();
    assert_eq!(saved.evaluator_id, admin);
    assert_eq!(saved.score, 90);

    // 组长的 PM 分取周期内第一条针对本人的 PM 评分
    let aggregation =
        AggregationService::with_config(fx.storage.clone(), &EvaluationConfig::default()).unwrap();
    let evaluation = aggregation.aggregate(lead, PERIOD).await.unwrap();
    assert_eq!(evaluation.pm_score, 90.0);

    let late = ScoreService::new(fx.storage.clone(), date(2025, 7, 1));
    let err = late
        .submit_pm_self_score(admin, PERIOD, pm_sub(lead, p1, 80))
        .await
        .unwrap_err();
    assert!(matches!(err, EvaluationError::PeriodClosed(_)));
}
