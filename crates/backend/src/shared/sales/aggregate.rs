use contracts::dashboards::d400_executive_summary::{SupplementaryMetrics, Totals};
use contracts::dashboards::d401_store_monthly::{
    MonthlyStorePoint, MonthlyStoreSeries, MonthlyTotal, StoreRanking,
};
use contracts::dashboards::d402_personal::StaffAnnual;
use contracts::domain::a001_sales_record::{NumericField, SalesRecord};
use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::iter::Sum;
use std::ops::{Add, AddAssign};

use super::grouping::{group_by_store, StoreOrder};
use super::numeric::{ratio, to_month, to_number};
use super::period::{filter_by_period, matches_period};
use super::validity::{is_valid, staff_identity, valid_store, StaffIdentity};

// ---------------------------------------------------------------------------
// Accumulator
// ---------------------------------------------------------------------------

/// Sums of every numeric column; `Default` is the zero value.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SalesFigures {
    pub total_sales: f64,
    pub nominated_sales: f64,
    pub free_sales: f64,
    pub product_sales: f64,
    pub total_reward: f64,
    pub nominated_reward: f64,
    pub free_reward: f64,
    pub product_reward: f64,
    pub nominated_count: f64,
    pub attendance_days: f64,
}

impl SalesFigures {
    pub fn from_record(record: &SalesRecord) -> Self {
        Self {
            total_sales: to_number(&record.total_sales),
            nominated_sales: to_number(&record.nominated_sales),
            free_sales: to_number(&record.free_sales),
            product_sales: to_number(&record.product_sales),
            total_reward: to_number(&record.total_reward),
            nominated_reward: to_number(&record.nominated_reward),
            free_reward: to_number(&record.free_reward),
            product_reward: to_number(&record.product_reward),
            nominated_count: to_number(&record.nominated_count),
            attendance_days: to_number(&record.attendance_days),
        }
    }

    pub fn get(&self, field: NumericField) -> f64 {
        match field {
            NumericField::TotalSales => self.total_sales,
            NumericField::NominatedSales => self.nominated_sales,
            NumericField::FreeSales => self.free_sales,
            NumericField::ProductSales => self.product_sales,
            NumericField::TotalReward => self.total_reward,
            NumericField::NominatedReward => self.nominated_reward,
            NumericField::FreeReward => self.free_reward,
            NumericField::ProductReward => self.product_reward,
            NumericField::NominatedCount => self.nominated_count,
            NumericField::AttendanceDays => self.attendance_days,
        }
    }

    /// Sales per nominated customer, 0 without customers.
    pub fn average_ticket(&self) -> f64 {
        ratio(self.total_sales, self.nominated_count)
    }

    /// Nominated share of total sales in percent, 0 without sales.
    pub fn nomination_rate(&self) -> f64 {
        ratio(self.nominated_sales, self.total_sales) * 100.0
    }

    pub fn totals(&self) -> Totals {
        Totals {
            total_sales: self.total_sales,
            total_customers: self.nominated_count,
            average_ticket: self.average_ticket(),
        }
    }
}

impl Add for SalesFigures {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self {
            total_sales: self.total_sales + rhs.total_sales,
            nominated_sales: self.nominated_sales + rhs.nominated_sales,
            free_sales: self.free_sales + rhs.free_sales,
            product_sales: self.product_sales + rhs.product_sales,
            total_reward: self.total_reward + rhs.total_reward,
            nominated_reward: self.nominated_reward + rhs.nominated_reward,
            free_reward: self.free_reward + rhs.free_reward,
            product_reward: self.product_reward + rhs.product_reward,
            nominated_count: self.nominated_count + rhs.nominated_count,
            attendance_days: self.attendance_days + rhs.attendance_days,
        }
    }
}

impl AddAssign for SalesFigures {
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl Sum for SalesFigures {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::default(), Add::add)
    }
}

/// Sum of the valid records only.
pub fn sum_valid<'a, I>(records: I) -> SalesFigures
where
    I: IntoIterator<Item = &'a SalesRecord>,
{
    records
        .into_iter()
        .filter(|r| is_valid(r))
        .map(SalesFigures::from_record)
        .sum()
}

// ---------------------------------------------------------------------------
// Staff
// ---------------------------------------------------------------------------

/// Per-staff sums with derived ratios, in first-appearance order.
///
/// Only valid records with a resolvable staff identity contribute; `year`
/// narrows the set first.
pub fn aggregate_by_staff(records: &[SalesRecord], year: Option<i32>) -> Vec<StaffAnnual> {
    let items = records
        .iter()
        .filter(|r| is_valid(r) && matches_period(r, year, None))
        .filter_map(|r| staff_identity(r).map(|id| (id, SalesFigures::from_record(r))));

    fold_by_staff(items)
        .into_iter()
        .map(|(identity, figures)| staff_annual(identity, &figures))
        .collect()
}

/// Groups figures by staff key; identity fields come from the first record.
fn fold_by_staff<I>(items: I) -> Vec<(StaffIdentity, SalesFigures)>
where
    I: IntoIterator<Item = (StaffIdentity, SalesFigures)>,
{
    let mut index: HashMap<String, usize> = HashMap::new();
    items
        .into_iter()
        .fold(Vec::<(StaffIdentity, SalesFigures)>::new(), |mut groups, (identity, figures)| {
            match index.get(&identity.key) {
                Some(&i) => groups[i].1 += figures,
                None => {
                    index.insert(identity.key.clone(), groups.len());
                    groups.push((identity, figures));
                }
            }
            groups
        })
}

fn staff_annual(identity: StaffIdentity, figures: &SalesFigures) -> StaffAnnual {
    StaffAnnual {
        staff_id: identity.id,
        staff_name: Some(identity.name),
        total_sales: figures.total_sales,
        nominated_sales: figures.nominated_sales,
        free_sales: figures.free_sales,
        product_sales: figures.product_sales,
        total_reward: figures.total_reward,
        nominated_reward: figures.nominated_reward,
        free_reward: figures.free_reward,
        product_reward: figures.product_reward,
        nominated_count: figures.nominated_count,
        attendance_days: figures.attendance_days,
        average_ticket: figures.average_ticket(),
        nomination_rate: figures.nomination_rate(),
    }
}

// ---------------------------------------------------------------------------
// Totals
// ---------------------------------------------------------------------------

/// Total sales and customers (nomination count) over valid records.
pub fn calculate_totals(records: &[SalesRecord]) -> Totals {
    sum_valid(records).totals()
}

/// Customers, average ticket and average nomination rate for a period.
pub fn calculate_supplementary_metrics(
    records: &[SalesRecord],
    year: Option<i32>,
    month: Option<u32>,
) -> SupplementaryMetrics {
    let figures = sum_valid(records.iter().filter(|r| matches_period(r, year, month)));
    SupplementaryMetrics {
        total_customers: figures.nominated_count,
        average_ticket: figures.average_ticket(),
        average_nomination_rate: figures.nomination_rate(),
    }
}

// ---------------------------------------------------------------------------
// Monthly series
// ---------------------------------------------------------------------------

/// Per-month by-store sales and customers for the stacked chart.
///
/// Sparse: months without data produce no entry. Rows without a month 1..=12
/// are skipped.
pub fn get_monthly_totals_by_store(
    records: &[SalesRecord],
    year: Option<i32>,
    order: &StoreOrder,
) -> MonthlyStoreSeries {
    let mut months: BTreeMap<u32, MonthlyStorePoint> = BTreeMap::new();
    let mut stores: BTreeSet<String> = BTreeSet::new();

    for record in records.iter().filter(|r| matches_period(r, year, None)) {
        let Some(store) = valid_store(record) else {
            continue;
        };
        let Some(month) = to_month(&record.month) else {
            continue;
        };

        let sales = to_number(&record.total_sales);
        let customers = to_number(&record.nominated_count);

        let point = months.entry(month).or_insert_with(|| MonthlyStorePoint {
            month,
            stores: BTreeMap::new(),
            total_sales: 0.0,
            total_customers: 0.0,
        });
        let cell = point.stores.entry(store.to_string()).or_default();
        cell.sales += sales;
        cell.customers += customers;
        point.total_sales += sales;
        point.total_customers += customers;

        stores.insert(store.to_string());
    }

    let store_list: Vec<String> = stores.into_iter().collect();
    MonthlyStoreSeries {
        series: months.into_values().collect(),
        store_list: order.sort(&store_list),
    }
}

/// Per-month grand totals with the average ticket, sparse and ascending.
pub fn get_monthly_totals(records: &[SalesRecord], year: Option<i32>) -> Vec<MonthlyTotal> {
    let months = records
        .iter()
        .filter(|r| is_valid(r) && matches_period(r, year, None))
        .filter_map(|r| to_month(&r.month).map(|m| (m, SalesFigures::from_record(r))))
        .fold(BTreeMap::<u32, SalesFigures>::new(), |mut acc, (month, figures)| {
            *acc.entry(month).or_default() += figures;
            acc
        });

    months
        .into_iter()
        .map(|(month, figures)| MonthlyTotal {
            month,
            total_sales: figures.total_sales,
            customers: figures.nominated_count,
            average_ticket: figures.average_ticket(),
        })
        .collect()
}

/// Stores ranked by sales for a period; equal sales keep display order.
pub fn get_store_rankings(
    records: &[SalesRecord],
    year: Option<i32>,
    month: Option<u32>,
    order: &StoreOrder,
) -> Vec<StoreRanking> {
    let groups = group_by_store(&filter_by_period(records, year, month));
    let store_ids: Vec<&String> = groups.keys().collect();

    let mut rankings: Vec<StoreRanking> = order
        .sort(&store_ids)
        .into_iter()
        .map(|store_id| {
            let figures: SalesFigures = groups[&store_id]
                .iter()
                .map(SalesFigures::from_record)
                .sum();
            StoreRanking {
                store_id,
                total_sales: figures.total_sales,
                customers: figures.nominated_count,
                average_ticket: figures.average_ticket(),
            }
        })
        .collect();

    rankings.sort_by(|a, b| b.total_sales.total_cmp(&a.total_sales));
    rankings
}

#[cfg(test)]
mod tests {
    use super::super::fixtures::{record, sample};
    use super::*;
    use contracts::domain::a001_sales_record::FieldValue;

    #[test]
    fn test_aggregate_by_staff_scenario() {
        let records = vec![
            record("奈良", "A", 2024, 1, 1000.0, 2.0),
            record("奈良", "A", 2024, 2, 500.0, 1.0),
        ];
        let staff = aggregate_by_staff(&records, Some(2024));
        assert_eq!(staff.len(), 1);
        assert_eq!(staff[0].staff_name.as_deref(), Some("A"));
        assert_eq!(staff[0].total_sales, 1500.0);
        assert_eq!(staff[0].nominated_count, 3.0);
        assert_eq!(staff[0].average_ticket, 500.0);
    }

    #[test]
    fn test_aggregate_by_staff_derives_rates_and_skips_invalid() {
        let staff = aggregate_by_staff(&sample(), Some(2024));
        let names: Vec<_> = staff.iter().map(|s| s.staff_name.clone().unwrap()).collect();
        assert_eq!(names, vec!["A", "B", "C"]);

        let b = &staff[1];
        assert_eq!(b.nominated_sales, 1000.0);
        assert_eq!(b.nomination_rate, 50.0);
        assert_eq!(b.average_ticket, 500.0);
    }

    #[test]
    fn test_aggregate_by_staff_zero_guards() {
        let records = vec![record("奈良", "A", 2024, 1, 0.0, 0.0)];
        let staff = aggregate_by_staff(&records, None);
        assert_eq!(staff[0].average_ticket, 0.0);
        assert_eq!(staff[0].nomination_rate, 0.0);
        assert!(aggregate_by_staff(&[], Some(2024)).is_empty());
    }

    #[test]
    fn test_calculate_totals_matches_valid_sum() {
        let data = sample();
        let totals = calculate_totals(&filter_by_period(&data, Some(2024), Some(1)));
        assert_eq!(totals.total_sales, 3000.0);
        assert_eq!(totals.total_customers, 6.0);
        assert_eq!(totals.average_ticket, 500.0);

        let empty = calculate_totals(&filter_by_period(&data, Some(2019), None));
        assert_eq!(empty, Totals::default());
    }

    #[test]
    fn test_calculate_totals_excludes_na_store() {
        let records = vec![
            record("奈良", "A", 2024, 1, 1000.0, 1.0),
            record("#N/A", "B", 2024, 1, 700.0, 1.0),
        ];
        assert_eq!(calculate_totals(&records).total_sales, 1000.0);
    }

    #[test]
    fn test_calculate_totals_is_idempotent() {
        let data = sample();
        let first = calculate_totals(&data);
        let second = calculate_totals(&data);
        assert_eq!(first.total_sales.to_bits(), second.total_sales.to_bits());
        assert_eq!(first.average_ticket.to_bits(), second.average_ticket.to_bits());
        assert_eq!(aggregate_by_staff(&data, None), aggregate_by_staff(&data, None));
    }

    #[test]
    fn test_monthly_totals_by_store_is_sparse_and_ordered() {
        let mut data = sample();
        data.push(record("villa-B", "E", 2024, 5, 300.0, 1.0));
        data.push(SalesRecord {
            month: FieldValue::Empty,
            ..record("奈良", "A", 2024, 0, 10_000.0, 1.0)
        });

        let result = get_monthly_totals_by_store(&data, Some(2024), &StoreOrder::default());
        let months: Vec<u32> = result.series.iter().map(|p| p.month).collect();
        assert_eq!(months, vec![1, 2, 5]);
        assert_eq!(result.store_list, vec!["奈良", "生駒", "villa-B"]);

        let january = &result.series[0];
        assert_eq!(january.total_sales, 3000.0);
        assert_eq!(january.total_customers, 6.0);
        assert_eq!(january.stores["生駒"].sales, 2000.0);
        assert_eq!(january.stores["生駒"].customers, 4.0);
        assert!(!january.stores.contains_key("#N/A"));
    }

    #[test]
    fn test_monthly_totals() {
        let totals = get_monthly_totals(&sample(), Some(2024));
        assert_eq!(totals.len(), 2);
        assert_eq!(totals[1].month, 2);
        assert_eq!(totals[1].total_sales, 1300.0);
        assert_eq!(totals[1].average_ticket, 650.0);
    }

    #[test]
    fn test_store_rankings_sorted_by_sales() {
        let rankings = get_store_rankings(&sample(), Some(2024), None, &StoreOrder::default());
        assert_eq!(rankings.len(), 2);
        assert_eq!(rankings[0].store_id, "生駒");
        assert_eq!(rankings[0].total_sales, 2800.0);
        assert_eq!(rankings[1].store_id, "奈良");
    }

    #[test]
    fn test_supplementary_metrics() {
        let metrics = calculate_supplementary_metrics(&sample(), Some(2024), Some(1));
        assert_eq!(metrics.total_customers, 6.0);
        assert_eq!(metrics.average_ticket, 500.0);
        assert!((metrics.average_nomination_rate - 1600.0 / 3000.0 * 100.0).abs() < 1e-9);
    }
}
