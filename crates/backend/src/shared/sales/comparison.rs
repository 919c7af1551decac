use contracts::dashboards::d400_executive_summary::{MomComparison, YoyComparison};
use contracts::domain::a001_sales_record::SalesRecord;

use super::aggregate::sum_valid;
use super::period::matches_period;

/// Total sales of valid records in a period.
fn period_total(records: &[SalesRecord], year: Option<i32>, month: Option<u32>) -> f64 {
    sum_valid(records.iter().filter(|r| matches_period(r, year, month))).total_sales
}

pub fn calculate_annual_total(records: &[SalesRecord], year: Option<i32>) -> f64 {
    period_total(records, year, None)
}

pub fn calculate_monthly_total(records: &[SalesRecord], year: i32, month: u32) -> f64 {
    period_total(records, Some(year), Some(month))
}

/// Percentage change; 0 unless the previous value is positive.
pub fn change_rate(current: f64, previous: f64) -> f64 {
    if previous > 0.0 {
        ((current - previous) / previous) * 100.0
    } else {
        0.0
    }
}

/// Month before `(year, month)`; January rolls back to December of the previous year.
///
/// `None` when the previous month falls outside the `i32` year range.
pub fn previous_month(year: i32, month: u32) -> Option<(i32, u32)> {
    let total = i64::from(year) * 12 + i64::from(month) - 2;
    let previous_year = i32::try_from(total.div_euclid(12)).ok()?;
    Some((previous_year, total.rem_euclid(12) as u32 + 1))
}

/// Same period one year earlier. `month = None` compares whole years.
///
/// A year without a predecessor compares against zero sales.
pub fn calculate_yoy(records: &[SalesRecord], year: i32, month: Option<u32>) -> YoyComparison {
    let current_total = period_total(records, Some(year), month);
    let previous_total = year
        .checked_sub(1)
        .map(|previous| period_total(records, Some(previous), month))
        .unwrap_or(0.0);
    let yoy_rate = change_rate(current_total, previous_total);

    YoyComparison {
        current_year: year,
        current_total,
        previous_year: year.saturating_sub(1),
        previous_total,
        yoy_rate,
        is_positive: yoy_rate >= 0.0,
    }
}

/// Month against the previous month; `None` without a month.
pub fn calculate_mom(
    records: &[SalesRecord],
    year: i32,
    month: Option<u32>,
) -> Option<MomComparison> {
    let month = month?;
    let previous = previous_month(year, month);
    let (previous_year, previous_month) = previous.unwrap_or((year, month));

    let current_total = calculate_monthly_total(records, year, month);
    let previous_total = previous
        .map(|(y, m)| calculate_monthly_total(records, y, m))
        .unwrap_or(0.0);
    let mom_rate = change_rate(current_total, previous_total);

    Some(MomComparison {
        current_year: year,
        current_month: month,
        current_total,
        previous_year,
        previous_month,
        previous_total,
        mom_rate,
        is_positive: mom_rate >= 0.0,
    })
}

/// Actual as a percentage of target; 0 when there is no positive target.
pub fn calculate_target_achievement(actual: f64, target: Option<f64>) -> f64 {
    match target {
        Some(t) if t > 0.0 => (actual / t) * 100.0,
        _ => 0.0,
    }
}

#[cfg(test)]
mod tests {
    use super::super::fixtures::{record, sample};
    use super::*;

    #[test]
    fn test_previous_month_rolls_over() {
        assert_eq!(previous_month(2024, 1), Some((2023, 12)));
        assert_eq!(previous_month(2024, 2), Some((2024, 1)));
        assert_eq!(previous_month(2024, 12), Some((2024, 11)));
    }

    #[test]
    fn test_year_range_limits_compare_against_zero() {
        let data = vec![record("奈良", "A", 2024, 1, 1000.0, 1.0)];

        let yoy = calculate_yoy(&data, i32::MIN, None);
        assert_eq!(yoy.previous_year, i32::MIN);
        assert_eq!(yoy.previous_total, 0.0);
        assert_eq!(yoy.yoy_rate, 0.0);
        assert_eq!(calculate_yoy(&data, i32::MAX, Some(3)).previous_year, i32::MAX - 1);

        assert_eq!(previous_month(i32::MIN, 1), None);
        assert_eq!(previous_month(i32::MAX, 3), Some((i32::MAX, 2)));

        let mom = calculate_mom(&data, i32::MAX, Some(3)).unwrap();
        assert_eq!((mom.previous_year, mom.previous_month), (i32::MAX, 2));
        assert_eq!(mom.mom_rate, 0.0);

        let first = calculate_mom(&data, i32::MIN, Some(1)).unwrap();
        assert_eq!(first.previous_total, 0.0);
        assert!(first.is_positive);
    }

    #[test]
    fn test_yoy_for_year_and_month() {
        let data = sample();
        let yearly = calculate_yoy(&data, 2024, None);
        assert_eq!(yearly.current_total, 4300.0);
        assert_eq!(yearly.previous_total, 400.0);
        assert_eq!(yearly.yoy_rate, 975.0);
        assert!(yearly.is_positive);

        let january = calculate_yoy(&data, 2024, Some(1));
        assert_eq!(january.current_total, 3000.0);
        assert_eq!(january.previous_total, 400.0);
    }

    #[test]
    fn test_yoy_without_previous_sales_is_zero_and_positive() {
        let data = vec![record("奈良", "A", 2024, 1, 1000.0, 1.0)];
        let yoy = calculate_yoy(&data, 2024, None);
        assert_eq!(yoy.previous_total, 0.0);
        assert_eq!(yoy.yoy_rate, 0.0);
        assert!(yoy.is_positive);
    }

    #[test]
    fn test_yoy_negative() {
        let data = vec![
            record("奈良", "A", 2023, 1, 1000.0, 1.0),
            record("奈良", "A", 2024, 1, 750.0, 1.0),
        ];
        let yoy = calculate_yoy(&data, 2024, Some(1));
        assert_eq!(yoy.yoy_rate, -25.0);
        assert!(!yoy.is_positive);
    }

    #[test]
    fn test_mom_january_compares_previous_december() {
        let data = vec![
            record("奈良", "A", 2023, 12, 800.0, 1.0),
            record("奈良", "A", 2024, 1, 1000.0, 1.0),
            record("奈良", "A", 2024, 12, 5000.0, 1.0),
        ];
        let mom = calculate_mom(&data, 2024, Some(1)).unwrap();
        assert_eq!((mom.previous_year, mom.previous_month), (2023, 12));
        assert_eq!(mom.previous_total, 800.0);
        assert_eq!(mom.mom_rate, 25.0);
        assert!(mom.is_positive);
    }

    #[test]
    fn test_mom_requires_month() {
        assert!(calculate_mom(&sample(), 2024, None).is_none());
    }

    #[test]
    fn test_target_achievement() {
        assert_eq!(calculate_target_achievement(3_000_000.0, Some(6_000_000.0)), 50.0);
        assert_eq!(calculate_target_achievement(3_000_000.0, Some(0.0)), 0.0);
        assert_eq!(calculate_target_achievement(3_000_000.0, None), 0.0);
    }

    #[test]
    fn test_annual_and_monthly_totals_skip_invalid() {
        let data = sample();
        assert_eq!(calculate_annual_total(&data, Some(2024)), 4300.0);
        assert_eq!(calculate_monthly_total(&data, 2024, 1), 3000.0);
        assert_eq!(calculate_monthly_total(&data, 2025, 1), 0.0);
    }
}
