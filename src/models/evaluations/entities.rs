use serde::{Deserialize, Serialize};

/// 同事评价 7 个细分项的满分，合计 100
pub const PEER_SCORE_CAPS: [i32; 7] = [20, 20, 10, 10, 10, 10, 20];

/// 定性评价满分
pub const QUALITATIVE_SCORE_MAX: i32 = 20;
/// 部门贡献满分
pub const DEPARTMENT_CONTRIBUTION_MAX: i32 = 10;
/// 定性合计满分（用于归一化到百分制）
pub const QUALITATIVE_COMBINED_MAX: f64 = 30.0;
/// PM 评分满分
pub const MANAGER_SCORE_MAX: i32 = 100;

// 同事评价
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PeerScore {
    pub id: i64,
    pub evaluator_id: i64,
    pub evaluatee_id: i64,
    pub project_id: i64,
    pub period_id: i64,
    pub scores: [i32; 7],
    pub comment: Option<String>,
}

impl PeerScore {
    /// 7 项得分之和
    pub fn total(&self) -> i32 {
        self.scores.iter().sum()
    }
}

// PM 评价
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ManagerScore {
    pub id: i64,
    pub evaluator_id: i64,
    pub evaluatee_id: i64,
    pub project_id: i64,
    pub period_id: i64,
    pub score: i32,
    pub comment: Option<String>,
}

// 定性评价
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct QualitativeScore {
    pub id: i64,
    pub evaluator_id: i64,
    pub evaluatee_id: i64,
    pub period_id: i64,
    pub qualitative_score: i32,
    pub department_contribution_score: i32,
    pub feedback: Option<String>,
}

impl QualitativeScore {
    /// 定性分 + 部门贡献分（0–30）
    pub fn combined(&self) -> f64 {
        f64::from(self.qualitative_score + self.department_contribution_score)
    }
}

// 最终评价
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FinalEvaluation {
    pub id: i64,
    pub evaluatee_id: i64,
    pub period_id: i64,
    pub evaluation_period: String,
    pub peer_score: f64,
    pub pm_score: f64,
    pub qualitative_score: f64,
    pub final_score: f64,
    pub grade: Option<String>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

impl FinalEvaluation {
    /// 展示用：保留两位小数
    pub fn rounded_final_score(&self) -> f64 {
        round2(self.final_score)
    }
}

pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

// 等级
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Grade {
    #[serde(rename = "S")]
    S,
    #[serde(rename = "A")]
    A,
    #[serde(rename = "B+")]
    BPlus,
    #[serde(rename = "B")]
    B,
    #[serde(rename = "B-")]
    BMinus,
    #[serde(rename = "C")]
    C,
}

impl Grade {
    pub const S_TOKEN: &'static str = "S";
    pub const A_TOKEN: &'static str = "A";
    pub const B_PLUS_TOKEN: &'static str = "B+";
    pub const B_TOKEN: &'static str = "B";
    pub const B_MINUS_TOKEN: &'static str = "B-";
    pub const C_TOKEN: &'static str = "C";

    pub fn as_str(&self) -> &'static str {
        match self {
            Grade::S => Self::S_TOKEN,
            Grade::A => Self::A_TOKEN,
            Grade::BPlus => Self::B_PLUS_TOKEN,
            Grade::B => Self::B_TOKEN,
            Grade::BMinus => Self::B_MINUS_TOKEN,
            Grade::C => Self::C_TOKEN,
        }
    }
}

impl std::fmt::Display for Grade {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for Grade {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            Grade::S_TOKEN => Ok(Grade::S),
            Grade::A_TOKEN => Ok(Grade::A),
            Grade::B_PLUS_TOKEN => Ok(Grade::BPlus),
            Grade::B_TOKEN => Ok(Grade::B),
            Grade::B_MINUS_TOKEN => Ok(Grade::BMinus),
            Grade::C_TOKEN => Ok(Grade::C),
            _ => Err(format!("Invalid grade: {s}")),
        }
    }
}

// 评价项目（角色权重表的维度）
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum EvaluationItem {
    PeerReview,
    PmReview,
    QualitativeReview,
}

impl EvaluationItem {
    pub fn as_str(&self) -> &'static str {
        match self {
            EvaluationItem::PeerReview => "peer_review",
            EvaluationItem::PmReview => "pm_review",
            EvaluationItem::QualitativeReview => "qualitative_review",
        }
    }
}

impl std::str::FromStr for EvaluationItem {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "peer_review" => Ok(EvaluationItem::PeerReview),
            "pm_review" => Ok(EvaluationItem::PmReview),
            "qualitative_review" => Ok(EvaluationItem::QualitativeReview),
            _ => Err(format!("Invalid evaluation item: {s}")),
        }
    }
}

// 角色评价权重
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EvaluationWeight {
    pub id: i64,
    pub role: crate::models::users::entities::UserRole,
    pub item: EvaluationItem,
    pub weight: f64,
}
