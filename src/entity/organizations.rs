//! 组织实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "organizations")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub name: String,
    pub level: i32,
    pub parent_id: Option<i64>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "Entity",
        from = "Column::ParentId",
        to = "Column::Id"
    )]
    Parent,
    #[sea_orm(has_many = "super::users::Entity")]
    Members,
    #[sea_orm(has_many = "super::department_evaluations::Entity")]
    DepartmentEvaluations,
}

impl Related<super::users::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Members.def()
    }
}

impl Related<super::department_evaluations::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::DepartmentEvaluations.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_organization(self) -> crate::models::organizations::entities::Organization {
        crate::models::organizations::entities::Organization {
            id: self.id,
            name: self.name,
            level: self.level,
            parent_id: self.parent_id,
        }
    }
}
