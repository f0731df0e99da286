use crate::config::GradingConfig;
use crate::errors::{EvaluationError, Result};
use crate::models::evaluations::entities::Grade;

use super::GradeAssigner;

/// 按最低分区间划分等级
///
/// 区间按最低分降序排列，分数落入第一个满足 `score >= min_score` 的区间；
/// 低于所有区间时取最后一个区间的等级。
#[derive(Debug, Clone, PartialEq)]
pub struct ThresholdGrader {
    bands: Vec<(f64, Grade)>,
}

impl ThresholdGrader {
    pub fn new(mut bands: Vec<(f64, Grade)>) -> Result<Self> {
        if bands.is_empty() {
            return Err(EvaluationError::validation("等级区间不能为空"));
        }
        if bands.iter().any(|(min, _)| !min.is_finite()) {
            return Err(EvaluationError::validation("等级区间的最低分必须是有限数"));
        }
        bands.sort_by(|a, b| b.0.total_cmp(&a.0));
        Ok(Self { bands })
    }

    pub fn from_config(config: &GradingConfig) -> Result<Self> {
        let bands = config
            .bands
            .iter()
            .map(|band| {
                let grade = band.grade.parse::<Grade>().map_err(|_| {
                    EvaluationError::validation(format!("配置中存在未知等级: '{}'", band.grade))
                })?;
                Ok((band.min_score, grade))
            })
            .collect::<Result<Vec<_>>>()?;
        Self::new(bands)
    }
}

impl Default for ThresholdGrader {
    fn default() -> Self {
        Self {
            bands: vec![
                (95.0, Grade::S),
                (90.0, Grade::A),
                (85.0, Grade::BPlus),
                (75.0, Grade::B),
                (65.0, Grade::BMinus),
                (0.0, Grade::C),
            ],
        }
    }
}

impl GradeAssigner for ThresholdGrader {
    fn assign(&self, final_score: f64) -> Grade {
        self.bands
            .iter()
            .find(|(min, _)| final_score >= *min)
            .or_else(|| self.bands.last())
            .map(|(_, grade)| *grade)
            .unwrap_or(Grade::C)
    }
}
