//! 最终评价存储操作

use super::SeaOrmStorage;
use crate::entity::final_evaluations::{ActiveModel, Column, Entity as FinalEvaluations};
use crate::entity::grade_adjustment_locks::{
    ActiveModel as LockActiveModel, Column as LockColumn, Entity as GradeAdjustmentLocks,
};
use crate::errors::{EvaluationError, Result};
use crate::models::{
    evaluations::{entities::FinalEvaluation, requests::FinalEvaluationFields},
    periods::entities::EvaluationPeriod,
};
use sea_orm::sea_query::OnConflict;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, IntoActiveModel, QueryFilter,
    QueryOrder, Set, TransactionTrait,
};
use tracing::debug;

impl SeaOrmStorage {
    /// 写入汇总结果
    ///
    /// 已存在的行只覆盖分数字段，grade 保持原值；新行的 grade 为空。
    pub async fn upsert_final_evaluation_impl(
        &self,
        evaluatee_id: i64,
        period: &EvaluationPeriod,
        fields: FinalEvaluationFields,
    ) -> Result<FinalEvaluation> {
        let now = chrono::Utc::now().timestamp();

        let existing = FinalEvaluations::find()
            .filter(Column::EvaluateeId.eq(evaluatee_id))
            .filter(Column::PeriodId.eq(period.id))
            .one(&self.db)
            .await
            .map_err(|e| EvaluationError::database_operation(format!("查询最终评价失败: {e}")))?;

        let result = match existing {
            Some(m) => {
                let mut model = m.into_active_model();
                model.peer_score = Set(fields.peer_score);
                model.pm_score = Set(fields.pm_score);
                model.qualitative_score = Set(fields.qualitative_score);
                model.final_score = Set(fields.final_score);
                model.updated_at = Set(now);
                model.update(&self.db).await
            }
            None => {
                ActiveModel {
                    evaluatee_id: Set(evaluatee_id),
                    period_id: Set(period.id),
                    peer_score: Set(fields.peer_score),
                    pm_score: Set(fields.pm_score),
                    qualitative_score: Set(fields.qualitative_score),
                    final_score: Set(fields.final_score),
                    grade: Set(None),
                    updated_at: Set(now),
                    ..Default::default()
                }
                .insert(&self.db)
                .await
            }
        }
        .map_err(|e| EvaluationError::database_operation(format!("保存最终评价失败: {e}")))?;

        Ok(result.into_final_evaluation(period.name.clone()))
    }

    /// 列出周期内的最终评价，可按用户过滤
    pub async fn list_final_evaluations_impl(
        &self,
        period: &EvaluationPeriod,
        user_ids: Option<&[i64]>,
    ) -> Result<Vec<FinalEvaluation>> {
        find_final_evaluations(&self.db, period, user_ids).await
    }

    /// 批量更新等级，任一失败则整体回滚
    pub async fn update_final_grades_impl(
        &self,
        period: &EvaluationPeriod,
        grades: &[(i64, String)],
    ) -> Result<Vec<FinalEvaluation>> {
        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| EvaluationError::database_operation(format!("开启事务失败: {e}")))?;

        let updated = write_grades(&txn, period, grades).await?;

        txn.commit()
            .await
            .map_err(|e| EvaluationError::database_operation(format!("提交事务失败: {e}")))?;

        Ok(updated)
    }

    /// 在 (部门, 周期) 锁内读取成员的最终评价、由 plan 决定新等级并写入
    ///
    /// 事务的第一条语句写锁行：SQLite 上即取得库级写锁，PostgreSQL/MySQL
    /// 上锁住该行，同一部门同一周期的调整因此跨进程串行。plan 返回错误时
    /// 事务回滚，不写入任何等级。
    pub async fn adjust_final_grades_impl(
        &self,
        department_id: i64,
        period: &EvaluationPeriod,
        member_ids: &[i64],
        plan: &(dyn for<'p> Fn(&'p [FinalEvaluation]) -> Result<Vec<(i64, String)>> + Send + Sync),
    ) -> Result<Vec<FinalEvaluation>> {
        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| EvaluationError::database_operation(format!("开启事务失败: {e}")))?;

        lock_department(&txn, department_id, period.id).await?;
        debug!(
            "Holding grade adjustment lock for department {} in {}",
            department_id, period.name
        );

        let current = find_final_evaluations(&txn, period, Some(member_ids)).await?;
        let grades = plan(current.as_slice())?;
        let updated = write_grades(&txn, period, &grades).await?;

        txn.commit()
            .await
            .map_err(|e| EvaluationError::database_operation(format!("提交事务失败: {e}")))?;

        Ok(updated)
    }
}

/// 写入或刷新锁行
async fn lock_department<C: ConnectionTrait>(
    conn: &C,
    department_id: i64,
    period_id: i64,
) -> Result<()> {
    let lock = LockActiveModel {
        department_id: Set(department_id),
        period_id: Set(period_id),
        locked_at: Set(chrono::Utc::now().timestamp()),
        ..Default::default()
    };

    GradeAdjustmentLocks::insert(lock)
        .on_conflict(
            OnConflict::columns([LockColumn::DepartmentId, LockColumn::PeriodId])
                .update_column(LockColumn::LockedAt)
                .to_owned(),
        )
        .exec_without_returning(conn)
        .await
        .map_err(|e| EvaluationError::database_operation(format!("获取等级调整锁失败: {e}")))?;

    Ok(())
}

async fn find_final_evaluations<C: ConnectionTrait>(
    conn: &C,
    period: &EvaluationPeriod,
    user_ids: Option<&[i64]>,
) -> Result<Vec<FinalEvaluation>> {
    let mut select = FinalEvaluations::find().filter(Column::PeriodId.eq(period.id));

    if let Some(ids) = user_ids {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        select = select.filter(Column::EvaluateeId.is_in(ids.iter().copied()));
    }

    let rows = select
        .order_by_asc(Column::EvaluateeId)
        .all(conn)
        .await
        .map_err(|e| EvaluationError::database_operation(format!("查询最终评价失败: {e}")))?;

    Ok(rows
        .into_iter()
        .map(|m| m.into_final_evaluation(period.name.clone()))
        .collect())
}

/// 逐行更新等级，缺少最终评价的用户报 `UserNotFound`
async fn write_grades<C: ConnectionTrait>(
    conn: &C,
    period: &EvaluationPeriod,
    grades: &[(i64, String)],
) -> Result<Vec<FinalEvaluation>> {
    let now = chrono::Utc::now().timestamp();

    let mut updated = Vec::with_capacity(grades.len());
    for (evaluatee_id, grade) in grades {
        let existing = FinalEvaluations::find()
            .filter(Column::EvaluateeId.eq(*evaluatee_id))
            .filter(Column::PeriodId.eq(period.id))
            .one(conn)
            .await
            .map_err(|e| EvaluationError::database_operation(format!("查询最终评价失败: {e}")))?;

        let Some(existing) = existing else {
            return Err(EvaluationError::user_not_found(format!(
                "用户 {evaluatee_id} 在周期 {} 没有最终评价",
                period.name
            )));
        };

        let mut model = existing.into_active_model();
        model.grade = Set(Some(grade.clone()));
        model.updated_at = Set(now);
        let result = model
            .update(conn)
            .await
            .map_err(|e| EvaluationError::database_operation(format!("更新等级失败: {e}")))?;
        updated.push(result.into_final_evaluation(period.name.clone()));
    }

    Ok(updated)
}
