//! 同事评价实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "peer_evaluations")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub evaluator_id: i64,
    pub evaluatee_id: i64,
    pub project_id: i64,
    pub period_id: i64,
    pub score_1: i32,
    pub score_2: i32,
    pub score_3: i32,
    pub score_4: i32,
    pub score_5: i32,
    pub score_6: i32,
    pub score_7: i32,
    #[sea_orm(column_type = "Text", nullable)]
    pub comment: Option<String>,
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

impl Related<super::evaluation_periods::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Period.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_peer_score(self) -> crate::models::evaluations::entities::PeerScore {
        crate::models::evaluations::entities::PeerScore {
            id: self.id,
            evaluator_id: self.evaluator_id,
            evaluatee_id: self.evaluatee_id,
            project_id: self.project_id,
            period_id: self.period_id,
            scores: [
                self.score_1,
                self.score_2,
                self.score_3,
                self.score_4,
                self.score_5,
                self.score_6,
                self.score_7,
            ],
            comment: self.comment,
        }
    }
}
