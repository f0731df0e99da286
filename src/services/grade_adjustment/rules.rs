//! 等级调整规则
//!
//! 纯函数：叠加调整、计算配额、检查配额与 B+/B- 平衡。

use std::collections::{BTreeMap, HashMap, HashSet};

use crate::errors::{EvaluationError, Result};
use crate::models::evaluations::{
    entities::{FinalEvaluation, Grade},
    requests::GradeAdjustment,
};
use crate::models::organizations::entities::DepartmentGradeRatio;

/// 部门 S/A 等级名额
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuotaLimits {
    pub s: usize,
    pub a: usize,
}

impl QuotaLimits {
    /// `floor(n * ratio / 100)`，n 为部门总人数
    pub fn for_department(member_count: usize, ratio: &DepartmentGradeRatio) -> Self {
        let limit = |pct: f64| (member_count as f64 * (pct / 100.0)).floor().max(0.0) as usize;
        Self {
            s: limit(ratio.s_ratio),
            a: limit(ratio.a_ratio),
        }
    }
}

/// 校验等级记号，同一用户出现多次时以最后一次为准
pub fn parse_adjustments(adjustments: &[GradeAdjustment]) -> Result<BTreeMap<i64, Grade>> {
    let mut parsed = BTreeMap::new();
    for adj in adjustments {
        let grade = adj.grade.parse::<Grade>().map_err(|_| {
            EvaluationError::validation(format!(
                "用户 {} 的等级 '{}' 无效. 支持: S, A, B+, B, B-, C",
                adj.user_id, adj.grade
            ))
        })?;
        parsed.insert(adj.user_id, grade);
    }
    Ok(parsed)
}

/// 只保留部门内且已有最终评价的用户的调整
pub fn applicable_adjustments(
    adjustments: &BTreeMap<i64, Grade>,
    department_user_ids: &HashSet<i64>,
    evaluations: &[FinalEvaluation],
) -> Vec<(i64, Grade)> {
    let with_rows: HashSet<i64> = evaluations.iter().map(|e| e.evaluatee_id).collect();
    adjustments
        .iter()
        .filter(|(user_id, _)| department_user_ids.contains(user_id) && with_rows.contains(user_id))
        .map(|(&user_id, &grade)| (user_id, grade))
        .collect()
}

/// 现有等级叠加调整后的临时等级表
pub fn overlay_grades(
    evaluations: &[FinalEvaluation],
    applicable: &[(i64, Grade)],
) -> HashMap<i64, Option<String>> {
    let mut temp: HashMap<i64, Option<String>> = evaluations
        .iter()
        .map(|e| (e.evaluatee_id, e.grade.clone()))
        .collect();
    for (user_id, grade) in applicable {
        if let Some(slot) = temp.get_mut(user_id) {
            *slot = Some(grade.to_string());
        }
    }
    temp
}

fn count_grade(temp: &HashMap<i64, Option<String>>, grade: Grade) -> usize {
    temp.values()
        .filter(|g| g.as_deref() == Some(grade.as_str()))
        .count()
}

pub fn check_quota(temp: &HashMap<i64, Option<String>>, limits: QuotaLimits) -> Result<()> {
    let s_count = count_grade(temp, Grade::S);
    if s_count > limits.s {
        return Err(EvaluationError::quota_exceeded(format!(
            "S 等级人数 {s_count} 超过名额 {}",
            limits.s
        )));
    }

    let a_count = count_grade(temp, Grade::A);
    if a_count > limits.a {
        return Err(EvaluationError::quota_exceeded(format!(
            "A 等级人数 {a_count} 超过名额 {}",
            limits.a
        )));
    }

    Ok(())
}

pub fn check_balance(temp: &HashMap<i64, Option<String>>) -> Result<()> {
    let b_plus = count_grade(temp, Grade::BPlus);
    let b_minus = count_grade(temp, Grade::BMinus);
    if b_plus != b_minus {
        return Err(EvaluationError::balance_violation(format!(
            "B+ 人数 ({b_plus}) 与 B- 人数 ({b_minus}) 必须相等"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ratio(s_ratio: f64, a_ratio: f64) -> DepartmentGradeRatio {
        DepartmentGradeRatio {
            id: 1,
            department_grade: "A".to_string(),
            s_ratio,
            a_ratio,
        }
    }

    fn evaluation(evaluatee_id: i64, grade: Option<&str>) -> FinalEvaluation {
        FinalEvaluation {
            id: evaluatee_id,
            evaluatee_id,
            period_id: 1,
            evaluation_period: "2025-H1".to_string(),
            peer_score: 0.0,
            pm_score: 0.0,
            qualitative_score: 0.0,
            final_score: 0.0,
            grade: grade.map(str::to_string),
            updated_at: chrono::Utc::now(),
        }
    }

    fn adj(user_id: i64, grade: &str) -> GradeAdjustment {
        GradeAdjustment {
            user_id,
            grade: grade.to_string(),
        }
    }

    #[test]
    fn quota_is_floored() {
        assert_eq!(
            QuotaLimits::for_department(10, &ratio(10.0, 25.0)),
            QuotaLimits { s: 1, a: 2 }
        );
        assert_eq!(QuotaLimits::for_department(9, &ratio(10.0, 0.0)).s, 0);
        assert_eq!(QuotaLimits::for_department(0, &ratio(50.0, 50.0)).a, 0);
    }

    #[test]
    fn two_s_grades_exceed_a_quota_of_one() {
        let evals: Vec<_> = (1..=10).map(|id| evaluation(id, Some("B"))).collect();
        let applied = vec![(1, Grade::S), (2, Grade::S)];
        let temp = overlay_grades(&evals, &applied);
        let limits = QuotaLimits::for_department(10, &ratio(10.0, 20.0));

        assert!(matches!(
            check_quota(&temp, limits),
            Err(EvaluationError::QuotaExceeded(_))
        ));
        assert!(check_quota(&overlay_grades(&evals, &applied[..1]), limits).is_ok());
    }

    #[test]
    fn lone_b_plus_breaks_balance() {
        let evals = vec![evaluation(1, None), evaluation(2, None)];
        let temp = overlay_grades(&evals, &[(1, Grade::BPlus)]);
        assert!(matches!(
            check_balance(&temp),
            Err(EvaluationError::BalanceViolation(_))
        ));

        let temp = overlay_grades(&evals, &[(1, Grade::BPlus), (2, Grade::BMinus)]);
        assert!(check_balance(&temp).is_ok());
    }

    #[test]
    fn existing_grades_count_toward_limits() {
        let evals = vec![evaluation(1, Some("B-")), evaluation(2, None)];
        let temp = overlay_grades(&evals, &[(2, Grade::BPlus)]);
        assert!(check_balance(&temp).is_ok());
    }

    #[test]
    fn out_of_department_and_rowless_users_are_dropped() {
        let parsed = parse_adjustments(&[adj(1, "A"), adj(2, "S"), adj(3, "B")]).unwrap();
        let dept: HashSet<i64> = [1, 3].into_iter().collect();
        let evals = vec![evaluation(1, None), evaluation(2, None)];

        assert_eq!(
            applicable_adjustments(&parsed, &dept, &evals),
            vec![(1, Grade::A)]
        );
    }

    #[test]
    fn unknown_token_is_a_validation_error() {
        assert_eq!(parse_adjustments(&[adj(1, "A+")]).unwrap_err().code(), "E007");
    }

    #[test]
    fn last_adjustment_for_a_user_wins() {
        let parsed = parse_adjustments(&[adj(1, "A"), adj(1, "B")]).unwrap();
        assert_eq!(parsed.get(&1), Some(&Grade::B));
    }
}
