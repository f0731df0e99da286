use serde::Deserialize;

/// 单个等级调整
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct GradeAdjustment {
    pub user_id: i64,
    pub grade: String,
}

/// 部门等级调整请求
#[derive(Debug, Clone, Deserialize)]
pub struct GradeAdjustmentRequest {
    pub evaluation_period: String,
    pub adjustments: Vec<GradeAdjustment>,
}

/// 同事评价提交
#[derive(Debug, Clone, Deserialize)]
pub struct PeerScoreSubmission {
    pub evaluatee_id: i64,
    pub project_id: i64,
    pub scores: [i32; 7],
    pub comment: Option<String>,
}

/// PM 评价提交
#[derive(Debug, Clone, Deserialize)]
pub struct ManagerScoreSubmission {
    pub evaluatee_id: i64,
    pub project_id: i64,
    pub score: i32,
    pub comment: Option<String>,
}

/// 定性评价提交
#[derive(Debug, Clone, Deserialize)]
pub struct QualitativeScoreSubmission {
    pub evaluatee_id: i64,
    pub qualitative_score: i32,
    pub department_contribution_score: i32,
    pub feedback: Option<String>,
}

// 存储层 upsert 最终评价时写入的字段（不含 grade）
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FinalEvaluationFields {
    pub peer_score: f64,
    pub pm_score: f64,
    pub qualitative_score: f64,
    pub final_score: f64,
}
