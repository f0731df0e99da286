//! 最终分数的合成策略
//!
//! 输入均为百分制：同事评价加权总分、PM 评价加权总分、归一化后的定性分。

use std::str::FromStr;

use crate::config::EvaluationConfig;
use crate::errors::{EvaluationError, Result};
use crate::models::evaluations::entities::{EvaluationItem, EvaluationWeight};
use crate::models::users::entities::UserRole;

pub trait ScoreCombiner: Send + Sync {
    fn name(&self) -> &'static str;

    fn combine(&self, peer: f64, pm: f64, qualitative_normalized: f64) -> f64;
}

/// 配置中的策略名
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StrategyKind {
    FixedSplit,
    RoleWeighted,
}

impl StrategyKind {
    pub const FIXED_SPLIT: &'static str = "fixed_split";
    pub const ROLE_WEIGHTED: &'static str = "role_weighted";
}

impl FromStr for StrategyKind {
    type Err = EvaluationError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            Self::FIXED_SPLIT => Ok(StrategyKind::FixedSplit),
            Self::ROLE_WEIGHTED => Ok(StrategyKind::RoleWeighted),
            _ => Err(EvaluationError::validation(format!(
                "未知的汇总策略: '{s}'. 支持: fixed_split, role_weighted"
            ))),
        }
    }
}

/// 项目分 = 同事分与 PM 分按归一化比例混合；最终分 = 项目分与定性分按固定比例混合
#[derive(Debug, Clone, PartialEq)]
pub struct FixedSplit {
    peer_share: f64,
    pm_share: f64,
    project_ratio: f64,
    qualitative_ratio: f64,
}

impl FixedSplit {
    pub fn new(peer_mix: f64, pm_mix: f64, project_ratio: f64, qualitative_ratio: f64) -> Result<Self> {
        if peer_mix < 0.0 || pm_mix < 0.0 || peer_mix + pm_mix <= 0.0 {
            return Err(EvaluationError::validation(format!(
                "同事/PM 混合权重无效: {peer_mix}/{pm_mix}"
            )));
        }
        if project_ratio < 0.0 || qualitative_ratio < 0.0 {
            return Err(EvaluationError::validation(format!(
                "项目/定性比例无效: {project_ratio}/{qualitative_ratio}"
            )));
        }

        let mix = peer_mix + pm_mix;
        Ok(Self {
            peer_share: peer_mix / mix,
            pm_share: pm_mix / mix,
            project_ratio,
            qualitative_ratio,
        })
    }

    pub fn from_config(config: &EvaluationConfig) -> Result<Self> {
        Self::new(
            config.peer_mix,
            config.pm_mix,
            config.project_ratio,
            config.qualitative_ratio,
        )
    }

    /// 同事分与 PM 分混合后的项目分
    pub fn project_component(&self, peer: f64, pm: f64) -> f64 {
        peer * self.peer_share + pm * self.pm_share
    }
}

impl Default for FixedSplit {
    fn default() -> Self {
        Self {
            peer_share: 0.5,
            pm_share: 0.5,
            project_ratio: 0.7,
            qualitative_ratio: 0.3,
        }
    }
}

impl ScoreCombiner for FixedSplit {
    fn name(&self) -> &'static str {
        StrategyKind::FIXED_SPLIT
    }

    fn combine(&self, peer: f64, pm: f64, qualitative_normalized: f64) -> f64 {
        self.project_component(peer, pm) * self.project_ratio
            + qualitative_normalized * self.qualitative_ratio
    }
}

/// 按角色权重表三项混合
#[derive(Debug, Clone, PartialEq)]
pub struct RoleWeighted {
    peer: f64,
    pm: f64,
    qualitative: f64,
}

impl RoleWeighted {
    /// 由角色的权重行构建，按权重之和归一化
    ///
    /// 没有任何行、出现负权重或总和为 0 时返回 `WeightsUnavailable`。
    pub fn from_weights(role: UserRole, weights: &[EvaluationWeight]) -> Result<Self> {
        let unavailable = || {
            EvaluationError::weights_unavailable(format!("角色 {role} 没有可用的评价权重"))
        };

        if weights.is_empty() || weights.iter().any(|w| w.weight < 0.0) {
            return Err(unavailable());
        }

        let item_total = |item: EvaluationItem| -> f64 {
            weights
                .iter()
                .filter(|w| w.role == role && w.item == item)
                .map(|w| w.weight)
                .sum()
        };
        let peer = item_total(EvaluationItem::PeerReview);
        let pm = item_total(EvaluationItem::PmReview);
        let qualitative = item_total(EvaluationItem::QualitativeReview);

        let total = peer + pm + qualitative;
        if total <= 0.0 {
            return Err(unavailable());
        }

        Ok(Self {
            peer: peer / total,
            pm: pm / total,
            qualitative: qualitative / total,
        })
    }
}

impl ScoreCombiner for RoleWeighted {
    fn name(&self) -> &'static str {
        StrategyKind::ROLE_WEIGHTED
    }

    fn combine(&self, peer: f64, pm: f64, qualitative_normalized: f64) -> f64 {
        peer * self.peer + pm * self.pm + qualitative_normalized * self.qualitative
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn weight(role: UserRole, item: EvaluationItem, weight: f64) -> EvaluationWeight {
        EvaluationWeight {
            id: 0,
            role,
            item,
            weight,
        }
    }

    #[test]
    fn fixed_split_blends_project_and_qualitative() {
        let combiner = FixedSplit::default();
        // 项目分 83.5，定性 90
        let score = combiner.combine(83.5, 83.5, 90.0);
        assert!((score - 85.45).abs() < 1e-9);
    }

    #[test]
    fn fixed_split_normalizes_the_mix() {
        let combiner = FixedSplit::new(3.0, 1.0, 0.7, 0.3).unwrap();
        assert!((combiner.project_component(80.0, 40.0) - 70.0).abs() < 1e-9);
        assert_eq!(
            FixedSplit::new(50.0, 50.0, 0.7, 0.3).unwrap(),
            FixedSplit::default()
        );
    }

    #[test]
    fn fixed_split_rejects_empty_mix() {
        assert_eq!(FixedSplit::new(0.0, 0.0, 0.7, 0.3).unwrap_err().code(), "E007");
        assert!(FixedSplit::new(50.0, 50.0, -0.1, 0.3).is_err());
    }

    #[test]
    fn role_weighted_normalizes_by_sum() {
        let weights = vec![
            weight(UserRole::Employee, EvaluationItem::PeerReview, 2.0),
            weight(UserRole::Employee, EvaluationItem::PmReview, 1.0),
            weight(UserRole::Employee, EvaluationItem::QualitativeReview, 1.0),
        ];
        let combiner = RoleWeighted::from_weights(UserRole::Employee, &weights).unwrap();
        // 80*0.5 + 60*0.25 + 100*0.25
        assert!((combiner.combine(80.0, 60.0, 100.0) - 80.0).abs() < 1e-9);
    }

    #[test]
    fn role_weighted_requires_weights() {
        assert!(matches!(
            RoleWeighted::from_weights(UserRole::Employee, &[]),
            Err(EvaluationError::WeightsUnavailable(_))
        ));

        let zeros = vec![weight(UserRole::Employee, EvaluationItem::PeerReview, 0.0)];
        assert!(matches!(
            RoleWeighted::from_weights(UserRole::Employee, &zeros),
            Err(EvaluationError::WeightsUnavailable(_))
        ));
    }

    #[test]
    fn strategy_names_parse() {
        assert_eq!("fixed_split".parse::<StrategyKind>().unwrap(), StrategyKind::FixedSplit);
        assert_eq!(
            "role_weighted".parse::<StrategyKind>().unwrap(),
            StrategyKind::RoleWeighted
        );
        assert!("average".parse::<StrategyKind>().is_err());
    }
}
