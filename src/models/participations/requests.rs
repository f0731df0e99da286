use serde::Deserialize;

use super::entities::ProjectWeight;

/// 新增项目成员请求（权重自动分配）
#[derive(Debug, Clone, Deserialize)]
pub struct AddParticipationRequest {
    pub user_id: i64,
    pub project_id: i64,
    #[serde(default)]
    pub is_pm: bool,
}

/// 整体覆盖某用户的项目权重
#[derive(Debug, Clone, Deserialize)]
pub struct OverwriteWeightsRequest {
    pub user_id: i64,
    pub weights: Vec<ProjectWeight>,
}
