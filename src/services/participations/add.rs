use tracing::info;

use super::ParticipationService;
use crate::errors::{EvaluationError, Result};
use crate::models::participations::{
    entities::{Participation, TOTAL_PARTICIPATION_WEIGHT},
    requests::AddParticipationRequest,
};

/// 新参与的权重：剩余未分配的部分，最小为 0
pub fn auto_weight(existing: &[Participation]) -> i32 {
    let used: i32 = existing.iter().map(|p| p.weight).sum();
    (TOTAL_PARTICIPATION_WEIGHT - used).max(0)
}

pub async fn add_participation(
    service: &ParticipationService,
    req: AddParticipationRequest,
) -> Result<Participation> {
    service.require_user(req.user_id).await?;

    let storage = service.get_storage();
    let existing = storage.list_participations(req.user_id).await?;

    if existing.iter().any(|p| p.project_id == req.project_id) {
        return Err(EvaluationError::conflict(format!(
            "用户 {} 已是项目 {} 的成员",
            req.user_id, req.project_id
        )));
    }

    let weight = auto_weight(&existing);
    let participation = storage
        .add_participation(req.user_id, req.project_id, req.is_pm, weight)
        .await?;

    info!(
        "User {} joined project {} with weight {}",
        req.user_id, req.project_id, weight
    );

    Ok(participation)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn member(project_id: i64, weight: i32) -> Participation {
        Participation {
            id: project_id,
            user_id: 1,
            project_id,
            is_pm: false,
            weight,
        }
    }

    #[test]
    fn first_project_takes_everything() {
        assert_eq!(auto_weight(&[]), 100);
    }

    #[test]
    fn takes_the_remainder() {
        assert_eq!(auto_weight(&[member(1, 60)]), 40);
        assert_eq!(auto_weight(&[member(1, 60), member(2, 40)]), 0);
    }

    #[test]
    fn never_goes_negative() {
        assert_eq!(auto_weight(&[member(1, 80), member(2, 70)]), 0);
    }
}
