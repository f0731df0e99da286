use tracing::info;

use super::ScoreService;
use crate::errors::{EvaluationError, Result};
use crate::models::evaluations::{
    entities::{DEPARTMENT_CONTRIBUTION_MAX, QUALITATIVE_SCORE_MAX, QualitativeScore},
    requests::QualitativeScoreSubmission,
};

/// 提交定性评价，被评价人必须在评价人所在组织或其下级组织中
pub async fn submit_qualitative_score(
    service: &ScoreService,
    evaluator_id: i64,
    period_name: &str,
    submission: QualitativeScoreSubmission,
) -> Result<QualitativeScore> {
    let period = service.require_open_period(period_name).await?;

    if !(0..=QUALITATIVE_SCORE_MAX).contains(&submission.qualitative_score) {
        return Err(EvaluationError::validation(format!(
            "定性评分 {} 超出范围 0-{QUALITATIVE_SCORE_MAX}",
            submission.qualitative_score
        )));
    }
    if !(0..=DEPARTMENT_CONTRIBUTION_MAX).contains(&submission.department_contribution_score) {
        return Err(EvaluationError::validation(format!(
            "部门贡献评分 {} 超出范围 0-{DEPARTMENT_CONTRIBUTION_MAX}",
            submission.department_contribution_score
        )));
    }

    let evaluator = service.require_user(evaluator_id).await?;
    let organization_id = evaluator.organization_id.ok_or_else(|| {
        EvaluationError::validation(format!("用户 {evaluator_id} 不属于任何组织"))
    })?;

    let subordinates = service
        .organizations()
        .department_members(organization_id)
        .await?;
    if !subordinates.iter().any(|u| u.id == submission.evaluatee_id) {
        return Err(EvaluationError::validation(format!(
            "用户 {} 不是评价人 {evaluator_id} 的下属",
            submission.evaluatee_id
        )));
    }

    let saved = service
        .get_storage()
        .upsert_qualitative_score(evaluator_id, period.id, submission)
        .await?;

    info!(
        "User {} submitted qualitative score for user {} in {}",
        evaluator_id, saved.evaluatee_id, period.name
    );

    Ok(saved)
}
