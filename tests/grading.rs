mod common;

use common::*;
use perfeval::config::GradingConfig;
use perfeval::errors::EvaluationError;
use perfeval::services::GradingService;

#[tokio::test]
async fn grades_follow_the_configured_bands() {
    let fx = fixture().await;
    let scores = [96.0, 90.0, 89.99, 85.0, 75.0, 65.0, 64.99];
    let mut ids = Vec::new();
    for (i, score) in scores.iter().enumerate() {
        let id = user(&fx.db, &format!("u{i}"), "employee", None).await;
        final_evaluation(&fx.db, id, fx.period_id, *score, None).await;
        ids.push(id);
    }
    let service = GradingService::with_config(fx.storage.clone(), &GradingConfig::default()).unwrap();

    let report = service.assign_grades(PERIOD, false).await.unwrap();
    assert_eq!(report.assigned.len(), scores.len());
    assert_eq!(report.unchanged, 0);

    let mut grades = Vec::new();
    for id in &ids {
        grades.push(grade_of(&fx, *id).await.unwrap());
    }
    assert_eq!(grades, vec!["S", "A", "B+", "B+", "B", "B-", "C"]);
}

#[tokio::test]
async fn existing_grades_are_kept_unless_overwriting() {
    let fx = fixture().await;
    let graded = user(&fx.db, "graded", "employee", None).await;
    let fresh = user(&fx.db, "fresh", "employee", None).await;
    final_evaluation(&fx.db, graded, fx.period_id, 99.0, Some("B")).await;
    final_evaluation(&fx.db, fresh, fx.period_id, 80.0, None).await;
    let service = GradingService::with_config(fx.storage.clone(), &GradingConfig::default()).unwrap();

    let report = service.assign_grades(PERIOD, false).await.unwrap();
    assert_eq!(report.assigned.len(), 1);
    assert_eq!(report.unchanged, 1);
    assert_eq!(grade_of(&fx, graded).await.as_deref(), Some("B"));
    assert_eq!(grade_of(&fx, fresh).await.as_deref(), Some("B"));

    let report = service.assign_grades(PERIOD, true).await.unwrap();
    assert_eq!(report.assigned.len(), 2);
    assert_eq!(grade_of(&fx, graded).await.as_deref(), Some("S"));
}

#[tokio::test]
async fn unknown_period_is_rejected() {
    let fx = fixture().await;
    let service = GradingService::with_config(fx.storage.clone(), &GradingConfig::default()).unwrap();
    assert!(matches!(
        service.assign_grades("1999-H2", false).await,
        Err(EvaluationError::PeriodNotFound(_))
    ));
}
