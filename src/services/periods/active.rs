use chrono::NaiveDate;

use super::PeriodService;
use crate::errors::Result;
use crate::models::periods::entities::{EvaluationPeriod, EvaluationPeriodView};

/// 区间包含 `today` 的周期中，按 (start_date, id) 最靠前的那个
pub fn resolve_active(periods: &[EvaluationPeriod], today: NaiveDate) -> Option<&EvaluationPeriod> {
    periods
        .iter()
        .filter(|p| p.contains(today))
        .min_by_key(|p| (p.start_date, p.id))
}

pub async fn active_period(
    service: &PeriodService,
    today: NaiveDate,
) -> Result<Option<EvaluationPeriod>> {
    let periods = service.get_storage().list_periods().await?;
    Ok(resolve_active(&periods, today).cloned())
}

pub async fn list_periods(
    service: &PeriodService,
    today: NaiveDate,
) -> Result<Vec<EvaluationPeriodView>> {
    let periods = service.get_storage().list_periods().await?;
    let active_id = resolve_active(&periods, today).map(|p| p.id);

    Ok(periods
        .into_iter()
        .map(|period| EvaluationPeriodView {
            is_active: Some(period.id) == active_id,
            period,
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn period(id: i64, name: &str, start: (i32, u32, u32), end: (i32, u32, u32)) -> EvaluationPeriod {
        EvaluationPeriod {
            id,
            name: name.to_string(),
            start_date: NaiveDate::from_ymd_opt(start.0, start.1, start.2).unwrap(),
            end_date: NaiveDate::from_ymd_opt(end.0, end.1, end.2).unwrap(),
        }
    }

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn range_is_inclusive_on_both_ends() {
        let periods = vec![period(1, "2025-H1", (2025, 1, 1), (2025, 6, 30))];
        assert!(resolve_active(&periods, day(2025, 1, 1)).is_some());
        assert!(resolve_active(&periods, day(2025, 6, 30)).is_some());
        assert!(resolve_active(&periods, day(2025, 7, 1)).is_none());
        assert!(resolve_active(&periods, day(2024, 12, 31)).is_none());
    }

    #[test]
    fn overlapping_periods_resolve_to_earliest_start() {
        let periods = vec![
            period(3, "late", (2025, 3, 1), (2025, 9, 30)),
            period(2, "early", (2025, 1, 1), (2025, 6, 30)),
        ];
        assert_eq!(resolve_active(&periods, day(2025, 4, 1)).unwrap().name, "early");
    }

    #[test]
    fn equal_start_dates_tie_break_on_id() {
        let periods = vec![
            period(7, "b", (2025, 1, 1), (2025, 6, 30)),
            period(4, "a", (2025, 1, 1), (2025, 12, 31)),
        ];
        assert_eq!(resolve_active(&periods, day(2025, 2, 1)).unwrap().id, 4);
    }
}
