use std::collections::HashSet;

use tracing::{info, warn};

use super::ParticipationService;
use crate::errors::{EvaluationError, Result};
use crate::models::participations::{
    entities::{Participation, ProjectWeight, TOTAL_PARTICIPATION_WEIGHT},
    requests::OverwriteWeightsRequest,
};

/// 覆盖写入前的权重校验
///
/// 先检查总和，再检查单项范围和重复项目。
pub fn validate_weights(weights: &[ProjectWeight]) -> Result<()> {
    let sum: i32 = weights.iter().map(|w| w.weight).sum();
    if sum != TOTAL_PARTICIPATION_WEIGHT {
        return Err(EvaluationError::invalid_weight_sum(format!(
            "参与权重之和必须为 {TOTAL_PARTICIPATION_WEIGHT}，当前为 {sum}"
        )));
    }

    let mut seen = HashSet::with_capacity(weights.len());
    for w in weights {
        if !(0..=TOTAL_PARTICIPATION_WEIGHT).contains(&w.weight) {
            return Err(EvaluationError::validation(format!(
                "项目 {} 的权重 {} 超出范围 0-{TOTAL_PARTICIPATION_WEIGHT}",
                w.project_id, w.weight
            )));
        }
        if !seen.insert(w.project_id) {
            return Err(EvaluationError::validation(format!(
                "项目 {} 重复出现",
                w.project_id
            )));
        }
    }

    Ok(())
}

pub async fn overwrite_weights(
    service: &ParticipationService,
    req: OverwriteWeightsRequest,
) -> Result<Vec<Participation>> {
    service.require_user(req.user_id).await?;

    if let Err(e) = validate_weights(&req.weights) {
        warn!("Rejected weight overwrite for user {}: {}", req.user_id, e);
        return Err(e);
    }

    let participations = service
        .get_storage()
        .replace_participations(req.user_id, &req.weights)
        .await?;

    info!(
        "Replaced {} participation(s) for user {}",
        participations.len(),
        req.user_id
    );

    Ok(participations)
}
