//! 原始评分与角色权重存储操作
//!
//! 评分按业务键 upsert：已存在则更新，否则插入。

use super::SeaOrmStorage;
use crate::entity::evaluation_weights::{
    Column as WeightColumn, Entity as EvaluationWeights,
};
use crate::entity::peer_evaluations::{
    ActiveModel as PeerActiveModel, Column as PeerColumn, Entity as PeerEvaluations,
};
use crate::entity::pm_evaluations::{
    ActiveModel as PmActiveModel, Column as PmColumn, Entity as PmEvaluations,
};
use crate::entity::qualitative_evaluations::{
    ActiveModel as QualitativeActiveModel, Column as QualitativeColumn,
    Entity as QualitativeEvaluations,
};
use crate::errors::{EvaluationError, Result};
use crate::models::{
    evaluations::{
        entities::{EvaluationWeight, ManagerScore, PeerScore, QualitativeScore},
        requests::{ManagerScoreSubmission, PeerScoreSubmission, QualitativeScoreSubmission},
    },
    users::entities::UserRole,
};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, IntoActiveModel, QueryFilter, QueryOrder, Set,
    TryIntoModel,
};
use tracing::warn;

impl SeaOrmStorage {
    /// 某项目下被评价人收到的同事评价
    pub async fn list_peer_scores_impl(
        &self,
        evaluatee_id: i64,
        project_id: i64,
        period_id: i64,
    ) -> Result<Vec<PeerScore>> {
        let rows = PeerEvaluations::find()
            .filter(PeerColumn::EvaluateeId.eq(evaluatee_id))
            .filter(PeerColumn::ProjectId.eq(project_id))
            .filter(PeerColumn::PeriodId.eq(period_id))
            .order_by_asc(PeerColumn::Id)
            .all(&self.db)
            .await
            .map_err(|e| EvaluationError::database_operation(format!("查询同事评价失败: {e}")))?;

        Ok(rows.into_iter().map(|m| m.into_peer_score()).collect())
    }

    /// 某项目下被评价人收到的 PM 评价
    pub async fn list_manager_scores_impl(
        &self,
        evaluatee_id: i64,
        project_id: i64,
        period_id: i64,
    ) -> Result<Vec<ManagerScore>> {
        let rows = PmEvaluations::find()
            .filter(PmColumn::EvaluateeId.eq(evaluatee_id))
            .filter(PmColumn::ProjectId.eq(project_id))
            .filter(PmColumn::PeriodId.eq(period_id))
            .order_by_asc(PmColumn::Id)
            .all(&self.db)
            .await
            .map_err(|e| EvaluationError::database_operation(format!("查询 PM 评价失败: {e}")))?;

        Ok(rows.into_iter().map(|m| m.into_manager_score()).collect())
    }

    /// 被评价人在周期内收到的全部 PM 评价
    pub async fn list_manager_scores_for_evaluatee_impl(
        &self,
        evaluatee_id: i64,
        period_id: i64,
    ) -> Result<Vec<ManagerScore>> {
        let rows = PmEvaluations::find()
            .filter(PmColumn::EvaluateeId.eq(evaluatee_id))
            .filter(PmColumn::PeriodId.eq(period_id))
            .order_by_asc(PmColumn::Id)
            .all(&self.db)
            .await
            .map_err(|e| EvaluationError::database_operation(format!("查询 PM 评价失败: {e}")))?;

        Ok(rows.into_iter().map(|m| m.into_manager_score()).collect())
    }

    /// 被评价人在周期内的第一条定性评价
    pub async fn get_qualitative_score_impl(
        &self,
        evaluatee_id: i64,
        period_id: i64,
    ) -> Result<Option<QualitativeScore>> {
        let result = QualitativeEvaluations::find()
            .filter(QualitativeColumn::EvaluateeId.eq(evaluatee_id))
            .filter(QualitativeColumn::PeriodId.eq(period_id))
            .order_by_asc(QualitativeColumn::Id)
            .one(&self.db)
            .await
            .map_err(|e| EvaluationError::database_operation(format!("查询定性评价失败: {e}")))?;

        Ok(result.map(|m| m.into_qualitative_score()))
    }

    /// 写入同事评价
    pub async fn upsert_peer_score_impl(
        &self,
        evaluator_id: i64,
        period_id: i64,
        req: PeerScoreSubmission,
    ) -> Result<PeerScore> {
        let now = chrono::Utc::now().timestamp();
        let [s1, s2, s3, s4, s5, s6, s7] = req.scores;

        let existing = PeerEvaluations::find()
            .filter(PeerColumn::EvaluatorId.eq(evaluator_id))
            .filter(PeerColumn::EvaluateeId.eq(req.evaluatee_id))
            .filter(PeerColumn::ProjectId.eq(req.project_id))
            .filter(PeerColumn::PeriodId.eq(period_id))
            .one(&self.db)
            .await
            .map_err(|e| EvaluationError::database_operation(format!("查询同事评价失败: {e}")))?;

        let mut model = match existing {
            Some(m) => m.into_active_model(),
            None => PeerActiveModel {
                evaluator_id: Set(evaluator_id),
                evaluatee_id: Set(req.evaluatee_id),
                project_id: Set(req.project_id),
                period_id: Set(period_id),
                ..Default::default()
            },
        };
        model.score_1 = Set(s1);
        model.score_2 = Set(s2);
        model.score_3 = Set(s3);
        model.score_4 = Set(s4);
        model.score_5 = Set(s5);
        model.score_6 = Set(s6);
        model.score_7 = Set(s7);
        model.comment = Set(req.comment);
        model.updated_at = Set(now);

        let result = model
            .save(&self.db)
            .await
            .map_err(|e| EvaluationError::database_operation(format!("保存同事评价失败: {e}")))?;
        let result = result
            .try_into_model()
            .map_err(|e| EvaluationError::database_operation(format!("保存同事评价失败: {e}")))?;

        Ok(result.into_peer_score())
    }

    /// 写入 PM 评价
    pub async fn upsert_manager_score_impl(
        &self,
        evaluator_id: i64,
        period_id: i64,
        req: ManagerScoreSubmission,
    ) -> Result<ManagerScore> {
        let now = chrono::Utc::now().timestamp();

        let existing = PmEvaluations::find()
            .filter(PmColumn::EvaluatorId.eq(evaluator_id))
            .filter(PmColumn::EvaluateeId.eq(req.evaluatee_id))
            .filter(PmColumn::ProjectId.eq(req.project_id))
            .filter(PmColumn::PeriodId.eq(period_id))
            .one(&self.db)
            .await
            .map_err(|e| EvaluationError::database_operation(format!("查询 PM 评价失败: {e}")))?;

        let mut model = match existing {
            Some(m) => m.into_active_model(),
            None => PmActiveModel {
                evaluator_id: Set(evaluator_id),
                evaluatee_id: Set(req.evaluatee_id),
                project_id: Set(req.project_id),
                period_id: Set(period_id),
                ..Default::default()
            },
        };
        model.score = Set(req.score);
        model.comment = Set(req.comment);
        model.updated_at = Set(now);

        let result = model
            .save(&self.db)
            .await
            .map_err(|e| EvaluationError::database_operation(format!("保存 PM 评价失败: {e}")))?;
        let result = result
            .try_into_model()
            .map_err(|e| EvaluationError::database_operation(format!("保存 PM 评价失败: {e}")))?;

        Ok(result.into_manager_score())
    }

    /// 写入定性评价
    pub async fn upsert_qualitative_score_impl(
        &self,
        evaluator_id: i64,
        period_id: i64,
        req: QualitativeScoreSubmission,
    ) -> Result<QualitativeScore> {
        let now = chrono::Utc::now().timestamp();

        let existing = QualitativeEvaluations::find()
            .filter(QualitativeColumn::EvaluatorId.eq(evaluator_id))
            .filter(QualitativeColumn::EvaluateeId.eq(req.evaluatee_id))
            .filter(QualitativeColumn::PeriodId.eq(period_id))
            .one(&self.db)
            .await
            .map_err(|e| EvaluationError::database_operation(format!("查询定性评价失败: {e}")))?;

        let mut model = match existing {
            Some(m) => m.into_active_model(),
            None => QualitativeActiveModel {
                evaluator_id: Set(evaluator_id),
                evaluatee_id: Set(req.evaluatee_id),
                period_id: Set(period_id),
                ..Default::default()
            },
        };
        model.qualitative_score = Set(req.qualitative_score);
        model.department_contribution_score = Set(req.department_contribution_score);
        model.feedback = Set(req.feedback);
        model.updated_at = Set(now);

        let result = model
            .save(&self.db)
            .await
            .map_err(|e| EvaluationError::database_operation(format!("保存定性评价失败: {e}")))?;
        let result = result
            .try_into_model()
            .map_err(|e| EvaluationError::database_operation(format!("保存定性评价失败: {e}")))?;

        Ok(result.into_qualitative_score())
    }

    /// 角色的评价权重，无法识别的行会被忽略
    pub async fn list_evaluation_weights_impl(
        &self,
        role: UserRole,
    ) -> Result<Vec<EvaluationWeight>> {
        let rows = EvaluationWeights::find()
            .filter(WeightColumn::Role.eq(role.as_str()))
            .order_by_asc(WeightColumn::Id)
            .all(&self.db)
            .await
            .map_err(|e| EvaluationError::database_operation(format!("查询评价权重失败: {e}")))?;

        Ok(rows
            .into_iter()
            .filter_map(|m| {
                let id = m.id;
                let weight = m.into_weight();
                if weight.is_none() {
                    warn!("Ignoring unrecognized evaluation weight row {}", id);
                }
                weight
            })
            .collect())
    }
}
