//! 定性评价实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "qualitative_evaluations")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub evaluator_id: i64,
    pub evaluatee_id: i64,
    pub period_id: i64,
    pub qualitative_score: i32,
    pub department_contribution_score: i32,
    #[sea_orm(column_type = "Text", nullable)]
    pub feedback: Option<String>,
    pub updated_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::EvaluateeId",
        to = "super::users::Column::Id"
    )]
    Evaluatee,
}

impl Related<super::users::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Evaluatee.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_qualitative_score(self) -> crate::models::evaluations::entities::QualitativeScore {
        crate::models::evaluations::entities::QualitativeScore {
            id: self.id,
            evaluator_id: self.evaluator_id,
            evaluatee_id: self.evaluatee_id,
            period_id: self.period_id,
            qualitative_score: self.qualitative_score,
            department_contribution_score: self.department_contribution_score,
            feedback: self.feedback,
        }
    }
}
