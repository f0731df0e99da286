use serde::{Deserialize, Serialize};

/// 一个用户所有参与权重之和必须为该值（或没有任何参与）
pub const TOTAL_PARTICIPATION_WEIGHT: i32 = 100;

// 项目参与关系
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Participation {
    pub id: i64,
    pub user_id: i64,
    pub project_id: i64,
    pub is_pm: bool,
    pub weight: i32,
}

// (项目, 权重) 对
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct ProjectWeight {
    pub project_id: i64,
    pub weight: i32,
}

impl From<&Participation> for ProjectWeight {
    fn from(p: &Participation) -> Self {
        Self {
            project_id: p.project_id,
            weight: p.weight,
        }
    }
}
