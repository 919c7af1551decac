use contracts::dashboards::{AvailablePeriods, PeriodQuery};
use contracts::shared::data_quality::DataQualityReport;

use crate::shared::dataset::Dataset;
use crate::shared::sales::{available_months, available_years, check_data_quality, filter_by_period};

/// Requested year, or the newest year present in the data.
pub fn resolve_year(dataset: &Dataset, requested: Option<i32>) -> Option<i32> {
    requested.or_else(|| available_years(&dataset.records).first().copied())
}

/// Years in the data and the months of the requested (or newest) year.
pub fn get_available_periods(dataset: &Dataset, year: Option<i32>) -> AvailablePeriods {
    let years = available_years(&dataset.records);
    let year = year.or_else(|| years.first().copied());
    AvailablePeriods {
        months: available_months(&dataset.records, year),
        years,
    }
}

/// Data-quality report for the records of a period; no period means every record.
pub fn get_data_quality(dataset: &Dataset, query: PeriodQuery) -> DataQualityReport {
    let scoped = filter_by_period(&dataset.records, query.year, query.month);
    check_data_quality(&scoped)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::sales::fixtures::sample;

    fn dataset() -> Dataset {
        Dataset {
            records: sample(),
            ..Dataset::default()
        }
    }

    #[test]
    fn test_resolve_year_defaults_to_latest() {
        assert_eq!(resolve_year(&dataset(), None), Some(2024));
        assert_eq!(resolve_year(&dataset(), Some(2023)), Some(2023));
        assert_eq!(resolve_year(&Dataset::default(), None), None);
    }

    #[test]
    fn test_available_periods() {
        let periods = get_available_periods(&dataset(), None);
        assert_eq!(periods.years, vec![2024, 2023]);
        assert_eq!(periods.months, vec![1, 2]);
        assert_eq!(get_available_periods(&dataset(), Some(2023)).months, vec![1]);
    }

    #[test]
    fn test_data_quality_for_period() {
        let all = get_data_quality(&dataset(), PeriodQuery::default());
        assert_eq!(all.total_records, 6);
        assert_eq!(all.excluded_count, 1);

        let february = get_data_quality(
            &dataset(),
            PeriodQuery {
                year: Some(2024),
                month: Some(2),
            },
        );
        assert_eq!(february.total_records, 2);
        assert!(february.is_clean());
    }
}
