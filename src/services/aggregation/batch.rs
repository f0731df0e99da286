use std::collections::BTreeSet;

use futures_util::{StreamExt, TryStreamExt, stream};
use tracing::{info, warn};

use super::{AggregationService, compute};
use crate::errors::{EvaluationError, Result};
use crate::models::evaluations::responses::AggregationReport;

/// 批量汇总周期内的用户
///
/// 未指定用户时处理全部用户；不存在的用户 ID 被跳过并记录在报告中。
/// 不同用户之间并发处理，并发数由配置限制，同一用户在一批内只处理一次。
pub async fn aggregate_period(
    service: &AggregationService,
    period_name: &str,
    user_ids: Option<Vec<i64>>,
) -> Result<AggregationReport> {
    let storage = service.get_storage();

    let period = storage
        .get_period_by_name(period_name)
        .await?
        .ok_or_else(|| {
            EvaluationError::period_not_found(format!("评估周期不存在: {period_name}"))
        })?;

    let mut skipped_user_ids = Vec::new();
    let users = match user_ids {
        None => storage.list_users().await?,
        Some(ids) => {
            let unique: BTreeSet<i64> = ids.into_iter().collect();
            let mut users = Vec::with_capacity(unique.len());
            for id in unique {
                match storage.get_user_by_id(id).await? {
                    Some(user) => users.push(user),
                    None => {
                        warn!("Skipping unknown user {} in aggregation", id);
                        skipped_user_ids.push(id);
                    }
                }
            }
            users
        }
    };

    let period_ref = &period;
    let mut items: Vec<_> = stream::iter(users)
        .map(|user| async move { compute::aggregate_user(service, &user, period_ref).await })
        .buffer_unordered(service.concurrency)
        .try_collect()
        .await?;
    items.sort_by_key(|e| e.evaluatee_id);

    info!(
        "Aggregated {} user(s) for {} ({} skipped)",
        items.len(),
        period.name,
        skipped_user_ids.len()
    );

    Ok(AggregationReport {
        evaluation_period: period.name,
        items,
        skipped_user_ids,
    })
}
