//! 用户存储操作（只读）

use super::SeaOrmStorage;
use crate::entity::users::{Column, Entity as Users};
use crate::errors::{EvaluationError, Result};
use crate::models::users::entities::User;
use sea_orm::{ColumnTrait, EntityTrait, QueryFilter, QueryOrder};

impl SeaOrmStorage {
    /// 通过 ID 获取用户
    pub async fn get_user_by_id_impl(&self, id: i64) -> Result<Option<User>> {
        let result = Users::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| EvaluationError::database_operation(format!("查询用户失败: {e}")))?;

        Ok(result.map(|m| m.into_user()))
    }

    /// 列出全部用户
    pub async fn list_users_impl(&self) -> Result<Vec<User>> {
        let users = Users::find()
            .order_by_asc(Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| EvaluationError::database_operation(format!("查询用户列表失败: {e}")))?;

        Ok(users.into_iter().map(|m| m.into_user()).collect())
    }

    /// 列出属于给定组织集合的用户
    pub async fn list_users_by_organizations_impl(
        &self,
        organization_ids: &[i64],
    ) -> Result<Vec<User>> {
        if organization_ids.is_empty() {
            return Ok(Vec::new());
        }

        let users = Users::find()
            .filter(Column::OrganizationId.is_in(organization_ids.iter().copied()))
            .order_by_asc(Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| EvaluationError::database_operation(format!("查询部门成员失败: {e}")))?;

        Ok(users.into_iter().map(|m| m.into_user()).collect())
    }
}
