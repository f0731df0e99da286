//! 角色评价权重实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "evaluation_weights")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub role: String,
    pub item: String,
    pub weight: f64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    /// 角色或项目无法识别的行返回 None
    pub fn into_weight(self) -> Option<crate::models::evaluations::entities::EvaluationWeight> {
        Some(crate::models::evaluations::entities::EvaluationWeight {
            id: self.id,
            role: self.role.parse().ok()?,
            item: self.item.parse().ok()?,
            weight: self.weight,
        })
    }
}
