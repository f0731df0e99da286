use serde::{Deserialize, Serialize};

/// 应用配置结构体
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub app: AppSettings,
    pub database: DatabaseConfig,
    #[serde(default)]
    pub evaluation: EvaluationConfig,
    #[serde(default)]
    pub grading: GradingConfig,
}

/// 应用设置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppSettings {
    pub environment: String,
    pub log_level: String,
}

/// 数据库配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    pub url: String,    // 数据库连接 URL（从 scheme 自动推断类型）
    pub pool_size: u32, // 连接池大小
    pub timeout: u64,   // 连接超时 (秒)
}

/// 评分汇总配置
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EvaluationConfig {
    /// 汇总策略: "fixed_split" 或 "role_weighted"
    pub strategy: String,
    /// 项目分内同事评价 / PM 评价的混合权重（会被归一化）
    pub peer_mix: f64,
    pub pm_mix: f64,
    /// fixed_split 下项目分与定性分的比例
    pub project_ratio: f64,
    pub qualitative_ratio: f64,
    /// 视为 PM 的角色
    pub pm_roles: Vec<String>,
    /// PM 角色的 PM 评分来源: "self_reported" 或 "project_manager"
    pub pm_role_source: String,
    /// 批量汇总并发数，0 表示使用 CPU 核数
    pub concurrency: usize,
}

impl Default for EvaluationConfig {
    fn default() -> Self {
        Self {
            strategy: "fixed_split".to_string(),
            peer_mix: 50.0,
            pm_mix: 50.0,
            project_ratio: 0.7,
            qualitative_ratio: 0.3,
            pm_roles: vec!["team_lead".to_string(), "dept_head".to_string()],
            pm_role_source: "self_reported".to_string(),
            concurrency: 0,
        }
    }
}

/// 等级划分配置
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GradingConfig {
    /// 按最低分从高到低排列的等级区间
    pub bands: Vec<GradeBand>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GradeBand {
    pub grade: String,
    pub min_score: f64,
}

impl Default for GradingConfig {
    fn default() -> Self {
        let band = |grade: &str, min_score: f64| GradeBand {
            grade: grade.to_string(),
            min_score,
        };
        Self {
            bands: vec![
                band("S", 95.0),
                band("A", 90.0),
                band("B+", 85.0),
                band("B", 75.0),
                band("B-", 65.0),
                band("C", 0.0),
            ],
        }
    }
}
