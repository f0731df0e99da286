use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// 评估周期
///
/// 是否"激活"由日期区间推导，不落库。
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EvaluationPeriod {
    pub id: i64,
    pub name: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

impl EvaluationPeriod {
    /// 闭区间 [start_date, end_date] 是否包含给定日期
    pub fn contains(&self, day: NaiveDate) -> bool {
        self.start_date <= day && day <= self.end_date
    }
}

// 带激活状态的周期视图
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct EvaluationPeriodView {
    #[serde(flatten)]
    pub period: EvaluationPeriod,
    pub is_active: bool,
}
