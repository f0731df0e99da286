pub mod manager;
pub mod peer;
pub mod pm_self;
pub mod qualitative;

use chrono::NaiveDate;
use std::sync::Arc;

use crate::errors::{EvaluationError, Result};
use crate::models::evaluations::{
    entities::{ManagerScore, PeerScore, QualitativeScore},
    requests::{ManagerScoreSubmission, PeerScoreSubmission, QualitativeScoreSubmission},
};
use crate::models::periods::entities::EvaluationPeriod;
use crate::models::users::entities::User;
use crate::services::organizations::OrganizationService;
use crate::services::periods::resolve_active;
use crate::storage::Storage;

pub use peer::{PEER_BATCH_AVERAGE_MAX, validate_peer_scores};

/// 评分提交服务
///
/// 只接受写入 `today` 所在的激活周期，已结束或未开始的周期一律拒绝。
pub struct ScoreService {
    storage: Arc<dyn Storage>,
    organizations: OrganizationService,
    today: NaiveDate,
}

impl ScoreService {
    pub fn new(storage: Arc<dyn Storage>, today: NaiveDate) -> Self {
        Self {
            organizations: OrganizationService::new(storage.clone()),
            storage,
            today,
        }
    }

    pub(crate) fn get_storage(&self) -> Arc<dyn Storage> {
        self.storage.clone()
    }

    pub(crate) fn organizations(&self) -> &OrganizationService {
        &self.organizations
    }

    /// 按名称获取周期，且该周期必须是 `today` 的激活周期
    pub(crate) async fn require_open_period(&self, name: &str) -> Result<EvaluationPeriod> {
        let periods = self.storage.list_periods().await?;
        let Some(period) = periods.iter().find(|p| p.name == name) else {
            return Err(EvaluationError::period_not_found(format!(
                "评估周期不存在: {name}"
            )));
        };

        match resolve_active(&periods, self.today) {
            Some(active) if active.id == period.id => Ok(period.clone()),
            Some(active) => Err(EvaluationError::period_closed(format!(
                "评估周期 {name} 不是 {} 的激活周期 (当前为 {})",
                self.today, active.name
            ))),
            None => Err(EvaluationError::period_closed(format!(
                "{} 没有激活的评估周期，无法写入 {name}",
                self.today
            ))),
        }
    }

    pub(crate) async fn require_user(&self, user_id: i64) -> Result<User> {
        self.storage
            .get_user_by_id(user_id)
            .await?
            .ok_or_else(|| EvaluationError::user_not_found(format!("用户不存在: {user_id}")))
    }

    // 提交一批同事评价
    pub async fn submit_peer_scores(
        &self,
        evaluator_id: i64,
        period_name: &str,
        submissions: Vec<PeerScoreSubmission>,
    ) -> Result<Vec<PeerScore>> {
        peer::submit_peer_scores(self, evaluator_id, period_name, submissions).await
    }

    // 提交一批 PM 评价
    pub async fn submit_manager_scores(
        &self,
        evaluator_id: i64,
        period_name: &str,
        submissions: Vec<ManagerScoreSubmission>,
    ) -> Result<Vec<ManagerScore>> {
        manager::submit_manager_scores(self, evaluator_id, period_name, submissions).await
    }

    // 管理员代为录入 PM 评分，不要求项目 PM 身份
    pub async fn submit_pm_self_score(
        &self,
        evaluator_id: i64,
        period_name: &str,
        submission: ManagerScoreSubmission,
    ) -> Result<ManagerScore> {
        pm_self::submit_pm_self_score(self, evaluator_id, period_name, submission).await
    }

    // 提交定性评价
    pub async fn submit_qualitative_score(
        &self,
        evaluator_id: i64,
        period_name: &str,
        submission: QualitativeScoreSubmission,
    ) -> Result<QualitativeScore> {
        qualitative::submit_qualitative_score(self, evaluator_id, period_name, submission).await
    }
}
