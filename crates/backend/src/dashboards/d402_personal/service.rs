use contracts::dashboards::d402_personal::{PersonalRequest, PersonalResponse};
use contracts::domain::a001_sales_record::SalesRecord;

use crate::dashboards::periods::resolve_year;
use crate::shared::dataset::Dataset;
use crate::shared::sales::validity::valid_store;
use crate::shared::sales::{
    aggregate_by_staff, filter_by_period, get_individual_trend, get_top_n_in_stores, PERSONAL_TOP,
};

/// Get personal dashboard data
pub fn get_personal(dataset: &Dataset, request: &PersonalRequest) -> PersonalResponse {
    let records = &dataset.records;
    let year = resolve_year(dataset, request.year);
    let month = request.month;

    let store = request
        .store
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty());
    let stores: Vec<String> = store.map(str::to_string).into_iter().collect();

    let period = filter_by_period(records, year, month);
    let scoped: Vec<SalesRecord> = match store {
        Some(store) => period
            .iter()
            .filter(|r| valid_store(r) == Some(store))
            .cloned()
            .collect(),
        None => period.clone(),
    };

    let trend = request
        .staff
        .as_deref()
        .filter(|s| !s.trim().is_empty())
        .map(|staff| get_individual_trend(records, staff, year))
        .unwrap_or_default();

    PersonalResponse {
        year,
        month,
        metric: request.metric,
        rankings: get_top_n_in_stores(&period, request.metric, PERSONAL_TOP, &stores),
        staff: aggregate_by_staff(&scoped, None),
        trend,
        store_list: dataset.store_list(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::sales::fixtures::sample;
    use contracts::dashboards::d402_personal::RankingMetric;

    fn dataset() -> Dataset {
        Dataset {
            records: sample(),
            ..Dataset::default()
        }
    }

    #[test]
    fn test_rankings_and_staff_for_year() {
        let response = get_personal(&dataset(), &PersonalRequest::default());
        assert_eq!(response.year, Some(2024));
        assert_eq!(response.metric, RankingMetric::TotalSales);
        assert_eq!(response.rankings.len(), 3);
        assert_eq!(response.rankings[0].staff_name, "B");
        assert_eq!(response.staff.len(), 3);
        assert!(response.trend.is_empty());
        assert_eq!(response.store_list, vec!["奈良", "生駒"]);
    }

    #[test]
    fn test_store_filter_and_trend() {
        let request = PersonalRequest {
            year: Some(2024),
            metric: RankingMetric::NominatedCount,
            store: Some(" 奈良 ".into()),
            staff: Some("A".into()),
            ..PersonalRequest::default()
        };
        let response = get_personal(&dataset(), &request);

        assert_eq!(response.rankings.len(), 1);
        assert_eq!(response.rankings[0].value, 3.0);
        assert_eq!(response.staff.len(), 1);
        assert_eq!(response.staff[0].total_sales, 1500.0);
        assert_eq!(response.trend.len(), 12);
        assert_eq!(response.trend[1].total_sales, 500.0);
    }
}
