//! 部门周期评级实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "department_evaluations")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub department_id: i64,
    pub period_id: i64,
    pub grade: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::organizations::Entity",
        from = "Column::DepartmentId",
        to = "super::organizations::Column::Id"
    )]
    Department,
}

impl Related<super::organizations::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Department.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_department_evaluation(
        self,
    ) -> crate::models::organizations::entities::DepartmentEvaluation {
        crate::models::organizations::entities::DepartmentEvaluation {
            id: self.id,
            department_id: self.department_id,
            period_id: self.period_id,
            grade: self.grade,
        }
    }
}
