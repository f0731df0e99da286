use std::collections::HashSet;

use tracing::{info, warn};

use super::GradeAdjustmentService;
use super::rules::{self, QuotaLimits};
use crate::errors::{EvaluationError, Result};
use crate::models::{
    evaluations::{entities::FinalEvaluation, requests::GradeAdjustment},
    periods::entities::EvaluationPeriod,
    users::entities::UserRole,
};

/// 调整部门内的最终等级
///
/// 室长提交时检查 S/A 名额和 B+/B- 平衡，其他角色跳过检查。
/// 任一检查失败则不写入任何记录；部门外用户的调整被忽略。
/// 读取现有等级、检查和写入在存储层的同一个加锁事务内完成。
pub async fn adjust_grades(
    service: &GradeAdjustmentService,
    department_id: i64,
    period_name: &str,
    adjustments: &[GradeAdjustment],
    requester_role: UserRole,
) -> Result<Vec<FinalEvaluation>> {
    let parsed = rules::parse_adjustments(adjustments)?;

    let members = service
        .organizations()
        .department_members(department_id)
        .await?;
    let department_user_ids: HashSet<i64> = members.iter().map(|u| u.id).collect();

    let storage = service.get_storage();
    let period = storage
        .get_period_by_name(period_name)
        .await?
        .ok_or_else(|| {
            EvaluationError::period_not_found(format!("评估周期不存在: {period_name}"))
        })?;

    let limits = if requester_role == UserRole::DeptHead {
        Some(quota_limits(service, department_id, &period, department_user_ids.len()).await?)
    } else {
        None
    };

    let plan = |evaluations: &[FinalEvaluation]| -> Result<Vec<(i64, String)>> {
        let applicable =
            rules::applicable_adjustments(&parsed, &department_user_ids, evaluations);
        let ignored = parsed.len() - applicable.len();
        if ignored > 0 {
            warn!(
                "Ignoring {} adjustment(s) outside department {} or without a final evaluation",
                ignored, department_id
            );
        }

        if let Some(limits) = limits {
            let temp = rules::overlay_grades(evaluations, &applicable);
            let checked =
                rules::check_quota(&temp, limits).and_then(|_| rules::check_balance(&temp));
            if let Err(e) = checked {
                warn!(
                    "Rejected grade adjustment for department {} in {}: {}",
                    department_id, period.name, e
                );
                return Err(e);
            }
        }

        Ok(applicable
            .into_iter()
            .map(|(user_id, grade)| (user_id, grade.to_string()))
            .collect())
    };

    let ids: Vec<i64> = members.iter().map(|u| u.id).collect();
    let updated = storage
        .adjust_final_grades(department_id, &period, &ids, &plan)
        .await?;

    info!(
        "Adjusted {} grade(s) for department {} in {} as {}",
        updated.len(),
        department_id,
        period.name,
        requester_role
    );

    Ok(updated)
}

/// 部门在周期内的评级对应的名额
async fn quota_limits(
    service: &GradeAdjustmentService,
    department_id: i64,
    period: &EvaluationPeriod,
    member_count: usize,
) -> Result<QuotaLimits> {
    let storage = service.get_storage();

    let tier = storage
        .get_department_grade(department_id, period.id)
        .await?
        .ok_or_else(|| {
            EvaluationError::quota_unavailable(format!(
                "部门 {department_id} 在周期 {} 没有评级",
                period.name
            ))
        })?;

    let ratio = storage.get_grade_ratio(&tier).await?.ok_or_else(|| {
        EvaluationError::quota_unavailable(format!("部门评级 '{tier}' 没有配额比例"))
    })?;

    Ok(QuotaLimits::for_department(member_count, &ratio))
}
