pub mod batch;
pub mod compute;
pub mod manager_source;
pub mod strategy;

use std::sync::Arc;

use crate::config::{AppConfig, EvaluationConfig};
use crate::errors::{EvaluationError, Result};
use crate::models::evaluations::{entities::FinalEvaluation, responses::AggregationReport};
use crate::models::users::entities::UserRole;
use crate::storage::Storage;

pub use compute::{normalize_qualitative, peer_average};
pub use manager_source::{ManagerScoreSource, ProjectManagerSource, SelfReportedSource, SourceKind};
pub use strategy::{FixedSplit, RoleWeighted, ScoreCombiner, StrategyKind};

pub struct AggregationService {
    storage: Arc<dyn Storage>,
    strategy: StrategyKind,
    fixed_split: FixedSplit,
    pm_roles: Vec<UserRole>,
    pm_source: Box<dyn ManagerScoreSource>,
    member_source: Box<dyn ManagerScoreSource>,
    concurrency: usize,
}

impl AggregationService {
    /// 使用全局配置创建
    pub fn new(storage: Arc<dyn Storage>) -> Result<Self> {
        Self::with_config(storage, &AppConfig::get().evaluation)
    }

    pub fn with_config(storage: Arc<dyn Storage>, config: &EvaluationConfig) -> Result<Self> {
        let strategy = config.strategy.parse::<StrategyKind>()?;
        let fixed_split = FixedSplit::from_config(config)?;
        let pm_source = config.pm_role_source.parse::<SourceKind>()?.build();

        let pm_roles = config
            .pm_roles
            .iter()
            .map(|r| {
                r.parse::<UserRole>()
                    .map_err(|_| EvaluationError::validation(format!("未知的 PM 角色: '{r}'")))
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            storage,
            strategy,
            fixed_split,
            pm_roles,
            pm_source,
            member_source: SourceKind::ProjectManager.build(),
            concurrency: config.concurrency.max(1),
        })
    }

    pub(crate) fn get_storage(&self) -> Arc<dyn Storage> {
        self.storage.clone()
    }

    /// 按被评价人角色选择 PM 评分来源
    pub(crate) fn manager_source_for(&self, role: UserRole) -> &dyn ManagerScoreSource {
        if self.pm_roles.contains(&role) {
            self.pm_source.as_ref()
        } else {
            self.member_source.as_ref()
        }
    }

    /// 按配置的策略构建合成器，role_weighted 需要读取角色权重
    pub(crate) async fn combiner_for(&self, role: UserRole) -> Result<Box<dyn ScoreCombiner>> {
        match self.strategy {
            StrategyKind::FixedSplit => Ok(Box::new(self.fixed_split.clone())),
            StrategyKind::RoleWeighted => {
                let weights = self.storage.list_evaluation_weights(role).await?;
                Ok(Box::new(RoleWeighted::from_weights(role, &weights)?))
            }
        }
    }

    // 汇总单个用户
    pub async fn aggregate(&self, evaluatee_id: i64, period_name: &str) -> Result<FinalEvaluation> {
        compute::aggregate(self, evaluatee_id, period_name).await
    }

    // 批量汇总
    pub async fn aggregate_period(
        &self,
        period_name: &str,
        user_ids: Option<Vec<i64>>,
    ) -> Result<AggregationReport> {
        batch::aggregate_period(self, period_name, user_ids).await
    }
}
