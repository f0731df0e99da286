pub mod add;
pub mod overwrite;

use std::sync::Arc;

use crate::errors::{EvaluationError, Result};
use crate::models::participations::{
    entities::{Participation, ProjectWeight},
    requests::{AddParticipationRequest, OverwriteWeightsRequest},
};
use crate::models::users::entities::User;
use crate::storage::Storage;

pub use add::auto_weight;
pub use overwrite::validate_weights;

pub struct ParticipationService {
    storage: Arc<dyn Storage>,
}

impl ParticipationService {
    pub fn new(storage: Arc<dyn Storage>) -> Self {
        Self { storage }
    }

    pub(crate) fn get_storage(&self) -> Arc<dyn Storage> {
        self.storage.clone()
    }

    pub(crate) async fn require_user(&self, user_id: i64) -> Result<User> {
        self.storage
            .get_user_by_id(user_id)
            .await?
            .ok_or_else(|| EvaluationError::user_not_found(format!("用户不存在: {user_id}")))
    }

    /// 用户当前的 (项目, 权重) 列表，非空时权重之和为 100
    pub async fn resolve_weights(&self, user_id: i64) -> Result<Vec<ProjectWeight>> {
        let participations = self.storage.list_participations(user_id).await?;
        Ok(participations.iter().map(ProjectWeight::from).collect())
    }

    // 新增项目成员，权重自动分配
    pub async fn add_participation(&self, req: AddParticipationRequest) -> Result<Participation> {
        add::add_participation(self, req).await
    }

    // 整体覆盖项目权重
    pub async fn overwrite_weights(
        &self,
        req: OverwriteWeightsRequest,
    ) -> Result<Vec<Participation>> {
        overwrite::overwrite_weights(self, req).await
    }
}
