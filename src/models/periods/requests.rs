use chrono::NaiveDate;
use serde::Deserialize;

/// 创建评估周期请求
#[derive(Debug, Clone, Deserialize)]
pub struct CreatePeriodRequest {
    pub name: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}
