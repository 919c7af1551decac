use contracts::dashboards::d400_executive_summary::{
    ExecutiveSummaryRequest, ExecutiveSummaryResponse, RankingBoard,
};
use contracts::dashboards::d402_personal::RankingMetric;
use contracts::shared::settings::TargetSettings;

use crate::dashboards::periods::resolve_year;
use crate::shared::dataset::Dataset;
use crate::shared::sales::{
    calculate_annual_total, calculate_mom, calculate_monthly_total,
    calculate_supplementary_metrics, calculate_target_achievement, calculate_totals,
    calculate_yoy, check_data_quality, filter_by_period, get_monthly_totals_by_store,
    get_store_rankings, get_top_n, DEPARTMENT_TOP,
};

/// Leaderboards shown on the executive summary, in display order
const BOARDS: [RankingMetric; 4] = [
    RankingMetric::TotalSales,
    RankingMetric::AverageTicket,
    RankingMetric::NominatedSales,
    RankingMetric::ProductSales,
];

/// Get executive summary data
pub fn get_executive_summary(
    dataset: &Dataset,
    request: &ExecutiveSummaryRequest,
    targets: &TargetSettings,
) -> ExecutiveSummaryResponse {
    let records = &dataset.records;
    let year = resolve_year(dataset, request.year);
    let month = request.month;

    let period = filter_by_period(records, year, month);

    let annual_total = calculate_annual_total(records, year);
    let monthly_total = match (year, month) {
        (Some(y), Some(m)) => calculate_monthly_total(records, y, m),
        _ => 0.0,
    };

    // Achievement compares the monthly total with the monthly target when a month is selected
    let target = targets.target_for(month);
    let actual = if month.is_some() {
        monthly_total
    } else {
        annual_total
    };

    let top3 = BOARDS
        .iter()
        .map(|metric| RankingBoard {
            metric: *metric,
            title: format!("{} TOP{}", metric.label(), DEPARTMENT_TOP),
            entries: get_top_n(&period, *metric, DEPARTMENT_TOP),
        })
        .collect();

    ExecutiveSummaryResponse {
        year,
        month,
        totals: calculate_totals(&period),
        supplementary: calculate_supplementary_metrics(records, year, month),
        annual_total,
        monthly_total,
        yoy: year.map(|y| calculate_yoy(records, y, month)),
        mom: year.and_then(|y| calculate_mom(records, y, month)),
        target,
        target_achievement: calculate_target_achievement(actual, Some(target)),
        top3,
        store_rankings: get_store_rankings(records, year, month, &dataset.store_order),
        monthly_series: get_monthly_totals_by_store(records, year, &dataset.store_order),
        data_quality: check_data_quality(&period),
    }
}
