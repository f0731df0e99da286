use tracing::info;

use super::GradingService;
use crate::errors::{EvaluationError, Result};
use crate::models::evaluations::responses::GradeAssignmentReport;

/// 为周期内的最终评价划分等级
///
/// 默认只处理尚无等级的记录；`overwrite` 为 true 时重新划分全部记录。
/// 所有更新在一个事务内写入。
pub async fn assign_grades(
    service: &GradingService,
    period_name: &str,
    overwrite: bool,
) -> Result<GradeAssignmentReport> {
    let storage = service.get_storage();

    let period = storage
        .get_period_by_name(period_name)
        .await?
        .ok_or_else(|| {
            EvaluationError::period_not_found(format!("评估周期不存在: {period_name}"))
        })?;

    let evaluations = storage.list_final_evaluations(&period, None).await?;
    let total = evaluations.len();

    let grades: Vec<(i64, String)> = evaluations
        .iter()
        .filter(|e| overwrite || e.grade.is_none())
        .map(|e| {
            let grade = service.assigner().assign(e.final_score);
            (e.evaluatee_id, grade.to_string())
        })
        .collect();

    let assigned = storage.update_final_grades(&period, &grades).await?;

    info!(
        "Assigned {} grade(s) for {} ({} unchanged)",
        assigned.len(),
        period.name,
        total - assigned.len()
    );

    Ok(GradeAssignmentReport {
        evaluation_period: period.name,
        unchanged: total - assigned.len(),
        assigned,
    })
}
