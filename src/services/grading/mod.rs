pub mod assign;
pub mod threshold;

use std::sync::Arc;

use crate::config::{AppConfig, GradingConfig};
use crate::errors::Result;
use crate::models::evaluations::{entities::Grade, responses::GradeAssignmentReport};
use crate::storage::Storage;

pub use threshold::ThresholdGrader;

/// 把最终分数映射为等级
pub trait GradeAssigner: Send + Sync {
    fn assign(&self, final_score: f64) -> Grade;
}

pub struct GradingService {
    storage: Arc<dyn Storage>,
    assigner: Box<dyn GradeAssigner>,
}

impl GradingService {
    /// 使用全局配置中的分数区间
    pub fn new(storage: Arc<dyn Storage>) -> Result<Self> {
        Self::with_config(storage, &AppConfig::get().grading)
    }

    pub fn with_config(storage: Arc<dyn Storage>, config: &GradingConfig) -> Result<Self> {
        let grader = ThresholdGrader::from_config(config)?;
        Ok(Self::with_assigner(storage, Box::new(grader)))
    }

    pub fn with_assigner(storage: Arc<dyn Storage>, assigner: Box<dyn GradeAssigner>) -> Self {
        Self { storage, assigner }
    }

    pub(crate) fn get_storage(&self) -> Arc<dyn Storage> {
        self.storage.clone()
    }

    pub(crate) fn assigner(&self) -> &dyn GradeAssigner {
        self.assigner.as_ref()
    }

    // 为周期内的最终评价划分等级
    pub async fn assign_grades(
        &self,
        period_name: &str,
        overwrite: bool,
    ) -> Result<GradeAssignmentReport> {
        assign::assign_grades(self, period_name, overwrite).await
    }
}
