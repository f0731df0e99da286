//! 评估周期存储操作

use super::SeaOrmStorage;
use crate::entity::evaluation_periods::{ActiveModel, Column, Entity as EvaluationPeriods};
use crate::errors::{EvaluationError, Result};
use crate::models::periods::{entities::EvaluationPeriod, requests::CreatePeriodRequest};
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set};

impl SeaOrmStorage {
    /// 按开始日期、ID 排序列出全部周期
    pub async fn list_periods_impl(&self) -> Result<Vec<EvaluationPeriod>> {
        let periods = EvaluationPeriods::find()
            .order_by_asc(Column::StartDate)
            .order_by_asc(Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| EvaluationError::database_operation(format!("查询评估周期失败: {e}")))?;

        Ok(periods.into_iter().map(|m| m.into_period()).collect())
    }

    /// 通过名称获取周期
    pub async fn get_period_by_name_impl(&self, name: &str) -> Result<Option<EvaluationPeriod>> {
        let result = EvaluationPeriods::find()
            .filter(Column::Name.eq(name))
            .one(&self.db)
            .await
            .map_err(|e| EvaluationError::database_operation(format!("查询评估周期失败: {e}")))?;

        Ok(result.map(|m| m.into_period()))
    }

    /// 创建周期
    pub async fn create_period_impl(&self, req: CreatePeriodRequest) -> Result<EvaluationPeriod> {
        let model = ActiveModel {
            name: Set(req.name),
            start_date: Set(req.start_date),
            end_date: Set(req.end_date),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| EvaluationError::database_operation(format!("创建评估周期失败: {e}")))?;

        Ok(result.into_period())
    }
}
