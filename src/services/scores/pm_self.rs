use tracing::info;

use super::ScoreService;
use crate::errors::{EvaluationError, Result};
use crate::models::evaluations::{
    entities::{MANAGER_SCORE_MAX, ManagerScore},
    requests::ManagerScoreSubmission,
};
use crate::models::users::entities::UserRole;

/// 管理员录入的 PM 评分
///
/// 与普通 PM 评价写入同一张表，汇总时一视同仁；录入人不需要是项目 PM。
pub async fn submit_pm_self_score(
    service: &ScoreService,
    evaluator_id: i64,
    period_name: &str,
    submission: ManagerScoreSubmission,
) -> Result<ManagerScore> {
    let period = service.require_open_period(period_name).await?;

    let evaluator = service.require_user(evaluator_id).await?;
    if evaluator.role != UserRole::Admin {
        return Err(EvaluationError::validation(format!(
            "只有管理员可以录入 PM 自评分，用户 {evaluator_id} 的角色为 {}",
            evaluator.role
        )));
    }

    if !(0..=MANAGER_SCORE_MAX).contains(&submission.score) {
        return Err(EvaluationError::validation(format!(
            "PM 评分 {} 超出范围 0-{MANAGER_SCORE_MAX}",
            submission.score
        )));
    }
    service.require_user(submission.evaluatee_id).await?;

    let saved = service
        .get_storage()
        .upsert_manager_score(evaluator_id, period.id, submission)
        .await?;

    info!(
        "Admin {} recorded PM score for user {} on project {} in {}",
        evaluator_id, saved.evaluatee_id, saved.project_id, period.name
    );

    Ok(saved)
}
