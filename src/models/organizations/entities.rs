use serde::{Deserialize, Serialize};

// 组织（部门/室/组），parent_id 为空表示顶层组织
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Organization {
    pub id: i64,
    pub name: String,
    pub level: i32, // 1: 研究所/中心, 2: 室, 3: 组
    pub parent_id: Option<i64>,
}

// 部门评级对应的 S/A 配额比例（百分比）
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DepartmentGradeRatio {
    pub id: i64,
    pub department_grade: String,
    pub s_ratio: f64,
    pub a_ratio: f64,
}

// 部门在某个评估周期的评级
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DepartmentEvaluation {
    pub id: i64,
    pub department_id: i64,
    pub period_id: i64,
    pub grade: Option<String>,
}
