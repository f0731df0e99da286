pub mod active;
pub mod create;

use chrono::NaiveDate;
use std::sync::Arc;

use crate::errors::Result;
use crate::models::periods::{
    entities::{EvaluationPeriod, EvaluationPeriodView},
    requests::CreatePeriodRequest,
};
use crate::storage::Storage;

pub use active::resolve_active;

pub struct PeriodService {
    storage: Arc<dyn Storage>,
}

impl PeriodService {
    pub fn new(storage: Arc<dyn Storage>) -> Self {
        Self { storage }
    }

    pub(crate) fn get_storage(&self) -> Arc<dyn Storage> {
        self.storage.clone()
    }

    // 获取包含给定日期的激活周期
    pub async fn active_period(&self, today: NaiveDate) -> Result<Option<EvaluationPeriod>> {
        active::active_period(self, today).await
    }

    // 列出全部周期并标注激活状态
    pub async fn list_periods(&self, today: NaiveDate) -> Result<Vec<EvaluationPeriodView>> {
        active::list_periods(self, today).await
    }

    // 按名称查找周期
    pub async fn period_by_name(&self, name: &str) -> Result<Option<EvaluationPeriod>> {
        self.storage.get_period_by_name(name).await
    }

    // 创建周期
    pub async fn create_period(&self, req: CreatePeriodRequest) -> Result<EvaluationPeriod> {
        create::create_period(self, req).await
    }
}
