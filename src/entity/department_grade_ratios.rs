//! 部门等级配额比例实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "department_grade_ratios")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    #[sea_orm(unique)]
    pub department_grade: String,
    pub s_ratio: f64,
    pub a_ratio: f64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_ratio(self) -> crate::models::organizations::entities::DepartmentGradeRatio {
        crate::models::organizations::entities::DepartmentGradeRatio {
            id: self.id,
            department_grade: self.department_grade,
            s_ratio: self.s_ratio,
            a_ratio: self.a_ratio,
        }
    }
}
