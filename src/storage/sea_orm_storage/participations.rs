//! 项目参与存储操作

use std::collections::HashMap;

use super::SeaOrmStorage;
use crate::entity::project_members::{ActiveModel, Column, Entity as ProjectMembers};
use crate::errors::{EvaluationError, Result};
use crate::models::participations::entities::{Participation, ProjectWeight};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set, TransactionTrait,
};

impl SeaOrmStorage {
    /// 列出用户的全部参与
    pub async fn list_participations_impl(&self, user_id: i64) -> Result<Vec<Participation>> {
        let members = ProjectMembers::find()
            .filter(Column::UserId.eq(user_id))
            .order_by_asc(Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| EvaluationError::database_operation(format!("查询项目参与失败: {e}")))?;

        Ok(members
            .into_iter()
            .map(|m| m.into_participation())
            .collect())
    }

    /// 新增参与
    pub async fn add_participation_impl(
        &self,
        user_id: i64,
        project_id: i64,
        is_pm: bool,
        weight: i32,
    ) -> Result<Participation> {
        let model = ActiveModel {
            user_id: Set(user_id),
            project_id: Set(project_id),
            is_pm: Set(is_pm),
            participation_weight: Set(weight),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| EvaluationError::database_operation(format!("新增项目参与失败: {e}")))?;

        Ok(result.into_participation())
    }

    /// 整体替换用户的参与
    ///
    /// 旧记录删除、新记录插入在同一事务内完成，原有的 PM 标记按项目保留。
    pub async fn replace_participations_impl(
        &self,
        user_id: i64,
        weights: &[ProjectWeight],
    ) -> Result<Vec<Participation>> {
        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| EvaluationError::database_operation(format!("开启事务失败: {e}")))?;

        let existing = ProjectMembers::find()
            .filter(Column::UserId.eq(user_id))
            .all(&txn)
            .await
            .map_err(|e| EvaluationError::database_operation(format!("查询项目参与失败: {e}")))?;
        let pm_flags: HashMap<i64, bool> =
            existing.iter().map(|m| (m.project_id, m.is_pm)).collect();

        ProjectMembers::delete_many()
            .filter(Column::UserId.eq(user_id))
            .exec(&txn)
            .await
            .map_err(|e| EvaluationError::database_operation(format!("删除项目参与失败: {e}")))?;

        let mut inserted = Vec::with_capacity(weights.len());
        for pw in weights {
            let model = ActiveModel {
                user_id: Set(user_id),
                project_id: Set(pw.project_id),
                is_pm: Set(pm_flags.get(&pw.project_id).copied().unwrap_or(false)),
                participation_weight: Set(pw.weight),
                ..Default::default()
            };
            let result = model.insert(&txn).await.map_err(|e| {
                EvaluationError::database_operation(format!("写入项目参与失败: {e}"))
            })?;
            inserted.push(result.into_participation());
        }

        txn.commit()
            .await
            .map_err(|e| EvaluationError::database_operation(format!("提交事务失败: {e}")))?;

        Ok(inserted)
    }
}
