//! 组织与部门配额存储操作

use super::SeaOrmStorage;
use crate::entity::department_evaluations::{
    Column as DepartmentEvaluationColumn, Entity as DepartmentEvaluations,
};
use crate::entity::department_grade_ratios::{
    Column as GradeRatioColumn, Entity as DepartmentGradeRatios,
};
use crate::entity::organizations::{Column, Entity as Organizations};
use crate::errors::{EvaluationError, Result};
use crate::models::organizations::entities::{DepartmentGradeRatio, Organization};
use sea_orm::{ColumnTrait, EntityTrait, QueryFilter, QueryOrder};

impl SeaOrmStorage {
    /// 列出全部组织
    pub async fn list_organizations_impl(&self) -> Result<Vec<Organization>> {
        let organizations = Organizations::find()
            .order_by_asc(Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| EvaluationError::database_operation(format!("查询组织列表失败: {e}")))?;

        Ok(organizations
            .into_iter()
            .map(|m| m.into_organization())
            .collect())
    }

    /// 部门在周期内的评级，没有记录或评级为空时返回 None
    pub async fn get_department_grade_impl(
        &self,
        department_id: i64,
        period_id: i64,
    ) -> Result<Option<String>> {
        let result = DepartmentEvaluations::find()
            .filter(DepartmentEvaluationColumn::DepartmentId.eq(department_id))
            .filter(DepartmentEvaluationColumn::PeriodId.eq(period_id))
            .one(&self.db)
            .await
            .map_err(|e| EvaluationError::database_operation(format!("查询部门评级失败: {e}")))?;

        Ok(result.and_then(|m| m.into_department_evaluation().grade))
    }

    /// 评级对应的配额比例
    pub async fn get_grade_ratio_impl(
        &self,
        department_grade: &str,
    ) -> Result<Option<DepartmentGradeRatio>> {
        let result = DepartmentGradeRatios::find()
            .filter(GradeRatioColumn::DepartmentGrade.eq(department_grade))
            .one(&self.db)
            .await
            .map_err(|e| EvaluationError::database_operation(format!("查询配额比例失败: {e}")))?;

        Ok(result.map(|m| m.into_ratio()))
    }
}
