use tracing::info;

use super::ScoreService;
use crate::errors::{EvaluationError, Result};
use crate::models::evaluations::{
    entities::{MANAGER_SCORE_MAX, ManagerScore},
    requests::ManagerScoreSubmission,
};

/// 提交 PM 评价，评价人必须是每个涉及项目的 PM
pub async fn submit_manager_scores(
    service: &ScoreService,
    evaluator_id: i64,
    period_name: &str,
    submissions: Vec<ManagerScoreSubmission>,
) -> Result<Vec<ManagerScore>> {
    let period = service.require_open_period(period_name).await?;
    service.require_user(evaluator_id).await?;

    let storage = service.get_storage();
    let memberships = storage.list_participations(evaluator_id).await?;

    for sub in &submissions {
        let is_pm = memberships
            .iter()
            .any(|m| m.project_id == sub.project_id && m.is_pm);
        if !is_pm {
            return Err(EvaluationError::validation(format!(
                "用户 {evaluator_id} 不是项目 {} 的 PM",
                sub.project_id
            )));
        }
        if !(0..=MANAGER_SCORE_MAX).contains(&sub.score) {
            return Err(EvaluationError::validation(format!(
                "PM 评分 {} 超出范围 0-{MANAGER_SCORE_MAX}",
                sub.score
            )));
        }
        service.require_user(sub.evaluatee_id).await?;
    }

    let mut saved = Vec::with_capacity(submissions.len());
    for sub in submissions {
        saved.push(
            storage
                .upsert_manager_score(evaluator_id, period.id, sub)
                .await?,
        );
    }

    info!(
        "User {} submitted {} PM score(s) for {}",
        evaluator_id,
        saved.len(),
        period.name
    );

    Ok(saved)
}
