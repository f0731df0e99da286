use tracing::info;

use super::ScoreService;
use crate::errors::{EvaluationError, Result};
use crate::models::evaluations::{
    entities::{PEER_SCORE_CAPS, PeerScore},
    requests::PeerScoreSubmission,
};

/// 一批同事评价的平均总分上限
pub const PEER_BATCH_AVERAGE_MAX: f64 = 70.0;

/// 校验一批同事评价：每项不超过其满分、不能评价自己、平均总分不超过上限
pub fn validate_peer_scores(evaluator_id: i64, submissions: &[PeerScoreSubmission]) -> Result<()> {
    if submissions.is_empty() {
        return Ok(());
    }

    let mut total = 0_i64;
    for sub in submissions {
        if sub.evaluatee_id == evaluator_id {
            return Err(EvaluationError::validation("不能评价自己"));
        }
        for (i, (score, cap)) in sub.scores.iter().zip(PEER_SCORE_CAPS).enumerate() {
            if !(0..=cap).contains(score) {
                return Err(EvaluationError::validation(format!(
                    "用户 {} 的第 {} 项得分 {} 超出范围 0-{cap}",
                    sub.evaluatee_id,
                    i + 1,
                    score
                )));
            }
        }
        total += sub.scores.iter().map(|&s| i64::from(s)).sum::<i64>();
    }

    let average = total as f64 / submissions.len() as f64;
    if average > PEER_BATCH_AVERAGE_MAX {
        return Err(EvaluationError::validation(format!(
            "平均分 {average:.2} 超过上限 {PEER_BATCH_AVERAGE_MAX}"
        )));
    }

    Ok(())
}

pub async fn submit_peer_scores(
    service: &ScoreService,
    evaluator_id: i64,
    period_name: &str,
    submissions: Vec<PeerScoreSubmission>,
) -> Result<Vec<PeerScore>> {
    let period = service.require_open_period(period_name).await?;
    service.require_user(evaluator_id).await?;
    validate_peer_scores(evaluator_id, &submissions)?;

    for sub in &submissions {
        service.require_user(sub.evaluatee_id).await?;
    }

    let storage = service.get_storage();
    let mut saved = Vec::with_capacity(submissions.len());
    for sub in submissions {
        saved.push(storage.upsert_peer_score(evaluator_id, period.id, sub).await?);
    }

    info!(
        "User {} submitted {} peer score(s) for {}",
        evaluator_id,
        saved.len(),
        period.name
    );

    Ok(saved)
}
