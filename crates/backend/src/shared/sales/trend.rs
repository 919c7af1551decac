use contracts::dashboards::d401_store_monthly::StoreTrendPoint;
use contracts::dashboards::d402_personal::IndividualTrendPoint;
use contracts::domain::a001_sales_record::SalesRecord;
use std::collections::BTreeMap;

use super::numeric::{ratio, to_month, to_number};
use super::period::matches_period;
use super::validity::{is_valid, staff_identity, valid_store};

/// Dense 12-month trend of one staff member.
///
/// `staff` is matched against the staff code and the resolved name. Months
/// without data stay at zero, so the result always has 12 entries.
pub fn get_individual_trend(
    records: &[SalesRecord],
    staff: &str,
    year: Option<i32>,
) -> Vec<IndividualTrendPoint> {
    let mut months: Vec<IndividualTrendPoint> = (1..=12)
        .map(|month| IndividualTrendPoint {
            month,
            ..IndividualTrendPoint::default()
        })
        .collect();

    let staff = staff.trim();
    if staff.is_empty() {
        return months;
    }

    let matching = records.iter().filter(|r| {
        is_valid(r)
            && matches_period(r, year, None)
            && staff_identity(r).is_some_and(|id| id.key == staff || id.name == staff)
    });

    for record in matching {
        let Some(month) = to_month(&record.month) else {
            continue;
        };
        let point = &mut months[(month - 1) as usize];
        point.total_sales += to_number(&record.total_sales);
        point.nominated_sales += to_number(&record.nominated_sales);
        point.nominated_count += to_number(&record.nominated_count);
    }

    for point in months.iter_mut() {
        point.nomination_rate = ratio(point.nominated_sales, point.total_sales) * 100.0;
    }
    months
}

/// Sparse per-store monthly sales breakdown, months ascending.
pub fn get_monthly_trends(
    records: &[SalesRecord],
    year: Option<i32>,
) -> BTreeMap<String, Vec<StoreTrendPoint>> {
    let mut stores: BTreeMap<String, BTreeMap<u32, StoreTrendPoint>> = BTreeMap::new();

    for record in records.iter().filter(|r| matches_period(r, year, None)) {
        let Some(store) = valid_store(record) else {
            continue;
        };
        let Some(month) = to_month(&record.month) else {
            continue;
        };

        let point = stores
            .entry(store.to_string())
            .or_default()
            .entry(month)
            .or_insert_with(|| StoreTrendPoint {
                month,
                ..StoreTrendPoint::default()
            });
        point.total_sales += to_number(&record.total_sales);
        point.nominated_sales += to_number(&record.nominated_sales);
        point.free_sales += to_number(&record.free_sales);
        point.product_sales += to_number(&record.product_sales);
    }

    stores
        .into_iter()
        .map(|(store, months)| (store, months.into_values().collect()))
        .collect()
}
