//! 最终评价实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "final_evaluations")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub evaluatee_id: i64,
    pub period_id: i64,
    pub peer_score: f64,
    pub pm_score: f64,
    pub qualitative_score: f64,
    pub final_score: f64,
    pub grade: Option<String>,
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
    #[sea_orm(
        belongs_to = "super::evaluation_periods::Entity",
        from = "Column::PeriodId",
        to = "super::evaluation_periods::Column::Id"
    )]
    Period,
}

impl Related<super::users::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Evaluatee.def()
    }
}

impl Related<super::evaluation_periods::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Period.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_final_evaluation(
        self,
        evaluation_period: String,
    ) -> crate::models::evaluations::entities::FinalEvaluation {
        use chrono::{DateTime, Utc};

        crate::models::evaluations::entities::FinalEvaluation {
            id: self.id,
            evaluatee_id: self.evaluatee_id,
            period_id: self.period_id,
            evaluation_period,
            peer_score: self.peer_score,
            pm_score: self.pm_score,
            qualitative_score: self.qualitative_score,
            final_score: self.final_score,
            grade: self.grade,
            updated_at: DateTime::<Utc>::from_timestamp(self.updated_at, 0).unwrap_or_default(),
        }
    }
}
