use tracing::info;

use super::PeriodService;
use crate::errors::{EvaluationError, Result};
use crate::models::periods::{entities::EvaluationPeriod, requests::CreatePeriodRequest};

pub async fn create_period(
    service: &PeriodService,
    req: CreatePeriodRequest,
) -> Result<EvaluationPeriod> {
    let name = req.name.trim();
    if name.is_empty() {
        return Err(EvaluationError::validation("周期名称不能为空"));
    }
    if req.start_date > req.end_date {
        return Err(EvaluationError::validation(format!(
            "开始日期 {} 晚于结束日期 {}",
            req.start_date, req.end_date
        )));
    }

    let storage = service.get_storage();
    if storage.get_period_by_name(name).await?.is_some() {
        return Err(EvaluationError::conflict(format!("评估周期已存在: {name}")));
    }

    let period = storage
        .create_period(CreatePeriodRequest {
            name: name.to_string(),
            ..req
        })
        .await?;
    info!("Evaluation period {} created", period.name);

    Ok(period)
}
