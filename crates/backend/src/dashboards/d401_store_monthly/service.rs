use contracts::dashboards::d401_store_monthly::{
    StoreMonthlyRequest, StoreMonthlyResponse, StoreSummary,
};

use crate::dashboards::periods::resolve_year;
use crate::shared::dataset::Dataset;
use crate::shared::sales::{
    calculate_totals, filter_by_period, get_monthly_totals, get_monthly_totals_by_store,
    get_monthly_trends, group_by_store, sort_stores_by_order,
};

/// Per-store cards for a period, in display order.
///
/// Trends always cover the whole year so the cards can show the month in context.
pub fn get_store_monthly(dataset: &Dataset, request: &StoreMonthlyRequest) -> StoreMonthlyResponse {
    let records = &dataset.records;
    let year = resolve_year(dataset, request.year);
    let month = request.month;

    let period = filter_by_period(records, year, month);
    let mut groups = group_by_store(&period);
    let mut trends = get_monthly_trends(records, year);

    let store_ids: Vec<&String> = groups.keys().collect();
    let ordered = sort_stores_by_order(&store_ids, &dataset.store_order);

    let stores = ordered
        .into_iter()
        .map(|store_id| {
            let group = groups.remove(&store_id).unwrap_or_default();
            StoreSummary {
                record_count: group.len(),
                totals: calculate_totals(&group),
                trend: trends.remove(&store_id).unwrap_or_default(),
                store_id,
            }
        })
        .collect();

    StoreMonthlyResponse {
        year,
        month,
        stores,
        monthly_series: get_monthly_totals_by_store(records, year, &dataset.store_order),
        monthly_totals: get_monthly_totals(records, year),
    }
}
