use tracing::{debug, info};

use super::AggregationService;
use crate::errors::{EvaluationError, Result};
use crate::models::{
    evaluations::{
        entities::{FinalEvaluation, PeerScore, QUALITATIVE_COMBINED_MAX},
        requests::FinalEvaluationFields,
    },
    periods::entities::EvaluationPeriod,
    users::entities::User,
};

/// 每条同事评价 7 项之和的平均值，没有评价时为 None
pub fn peer_average(scores: &[PeerScore]) -> Option<f64> {
    if scores.is_empty() {
        return None;
    }
    let total: i64 = scores.iter().map(|s| i64::from(s.total())).sum();
    Some(total as f64 / scores.len() as f64)
}

/// 定性合计（0–30）折算为百分制
pub fn normalize_qualitative(combined: f64) -> f64 {
    combined / QUALITATIVE_COMBINED_MAX * 100.0
}

pub async fn aggregate(
    service: &AggregationService,
    evaluatee_id: i64,
    period_name: &str,
) -> Result<FinalEvaluation> {
    let storage = service.get_storage();

    let period = storage
        .get_period_by_name(period_name)
        .await?
        .ok_or_else(|| {
            EvaluationError::period_not_found(format!("评估周期不存在: {period_name}"))
        })?;
    let user = storage
        .get_user_by_id(evaluatee_id)
        .await?
        .ok_or_else(|| EvaluationError::user_not_found(format!("用户不存在: {evaluatee_id}")))?;

    aggregate_user(service, &user, &period).await
}

/// 计算并写入一个用户在周期内的最终评价
pub(crate) async fn aggregate_user(
    service: &AggregationService,
    user: &User,
    period: &EvaluationPeriod,
) -> Result<FinalEvaluation> {
    let storage = service.get_storage();
    let source = service.manager_source_for(user.role);
    let combiner = service.combiner_for(user.role).await?;

    let participations = storage.list_participations(user.id).await?;

    let mut peer_total = 0.0;
    let mut pm_total = 0.0;
    for participation in &participations {
        let weight = f64::from(participation.weight);

        let peer_scores = storage
            .list_peer_scores(user.id, participation.project_id, period.id)
            .await?;
        let peer_avg = peer_average(&peer_scores);
        let pm_score = source
            .manager_score(storage.as_ref(), user.id, participation.project_id, period.id)
            .await?;

        debug!(
            "User {} project {} (weight {}): peer {:?}, pm {:?} via {}",
            user.id,
            participation.project_id,
            participation.weight,
            peer_avg,
            pm_score,
            source.name()
        );

        // 缺失的项按 0 计，只跳过该项
        if let Some(avg) = peer_avg {
            peer_total += avg * weight / 100.0;
        }
        if let Some(score) = pm_score {
            pm_total += score * weight / 100.0;
        }
    }

    let qualitative_combined = storage
        .get_qualitative_score(user.id, period.id)
        .await?
        .map(|q| q.combined())
        .unwrap_or(0.0);
    let qualitative_normalized = normalize_qualitative(qualitative_combined);

    let final_score = combiner.combine(peer_total, pm_total, qualitative_normalized);

    let evaluation = storage
        .upsert_final_evaluation(
            user.id,
            period,
            FinalEvaluationFields {
                peer_score: peer_total,
                pm_score: pm_total,
                qualitative_score: qualitative_combined,
                final_score,
            },
        )
        .await?;

    info!(
        "Aggregated user {} for {}: final {:.2} ({})",
        user.id,
        period.name,
        final_score,
        combiner.name()
    );

    Ok(evaluation)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn peer(scores: [i32; 7]) -> PeerScore {
        PeerScore {
            id: 0,
            evaluator_id: 2,
            evaluatee_id: 1,
            project_id: 1,
            period_id: 1,
            scores,
            comment: None,
        }
    }

    #[test]
    fn peer_average_is_mean_of_row_totals() {
        let rows = vec![
            peer([20, 20, 10, 10, 10, 10, 20]),
            peer([10, 10, 5, 5, 5, 5, 10]),
        ];
        assert_eq!(peer_average(&rows), Some(75.0));
        assert_eq!(peer_average(&[]), None);
    }

    #[test]
    fn qualitative_twenty_seven_is_ninety() {
        assert!((normalize_qualitative(27.0) - 90.0).abs() < 1e-9);
        assert_eq!(normalize_qualitative(0.0), 0.0);
        assert_eq!(normalize_qualitative(30.0), 100.0);
    }

    #[test]
    fn weighted_peer_component() {
        // 60/40 权重，平均 80 / 70
        let total = 80.0 * 60.0 / 100.0 + 70.0 * 40.0 / 100.0;
        assert_eq!(total, 76.0);
    }
}
