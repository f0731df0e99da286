use serde::Serialize;

use super::entities::FinalEvaluation;

/// 批量汇总结果
#[derive(Debug, Clone, Serialize)]
pub struct AggregationReport {
    pub evaluation_period: String,
    pub items: Vec<FinalEvaluation>,
    /// 不存在而被跳过的用户 ID
    pub skipped_user_ids: Vec<i64>,
}

/// 等级划分结果
#[derive(Debug, Clone, Serialize)]
pub struct GradeAssignmentReport {
    pub evaluation_period: String,
    pub assigned: Vec<FinalEvaluation>,
    pub unchanged: usize,
}
