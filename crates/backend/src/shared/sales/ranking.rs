use contracts::dashboards::d402_personal::{RankedStaff, RankingMetric};
use contracts::domain::a001_sales_record::SalesRecord;
use std::collections::HashMap;

use super::numeric::{ratio, to_number};
use super::validity::{staff_identity, valid_store};

/// Leaderboard size on the executive dashboard
pub const DEPARTMENT_TOP: usize = 3;
/// Leaderboard size on the personal dashboard
pub const PERSONAL_TOP: usize = 10;

/// Running value of one staff member while ranking.
#[derive(Debug, Default)]
struct RankAccumulator {
    key: String,
    staff_id: Option<String>,
    staff_name: String,
    store_id: Option<String>,
    amount: f64,
    /// Denominator for derived metrics (nominated count for the average ticket)
    divisor: f64,
}

impl RankAccumulator {
    fn value(&self, metric: RankingMetric) -> f64 {
        match metric.as_field() {
            Some(_) => self.amount,
            None => ratio(self.amount, self.divisor),
        }
    }
}

/// Top `n` staff members by `metric` over valid records.
///
/// Only the requested metric is accumulated. Name and store come from the
/// last record seen for the staff member. Equal values keep first-appearance
/// order.
pub fn get_top_n(records: &[SalesRecord], metric: RankingMetric, n: usize) -> Vec<RankedStaff> {
    rank_staff(records.iter(), metric, n)
}

/// [`get_top_n`] restricted to a subset of stores; an empty subset means all stores.
pub fn get_top_n_in_stores(
    records: &[SalesRecord],
    metric: RankingMetric,
    n: usize,
    stores: &[String],
) -> Vec<RankedStaff> {
    if stores.is_empty() {
        return get_top_n(records, metric, n);
    }
    let in_subset = |r: &&SalesRecord| {
        valid_store(r).is_some_and(|store| stores.iter().any(|s| s.trim() == store))
    };
    rank_staff(records.iter().filter(in_subset), metric, n)
}

fn rank_staff<'a, I>(records: I, metric: RankingMetric, n: usize) -> Vec<RankedStaff>
where
    I: Iterator<Item = &'a SalesRecord>,
{
    let mut index: HashMap<String, usize> = HashMap::new();
    let mut entries: Vec<RankAccumulator> = Vec::new();

    for record in records {
        let Some(store) = valid_store(record) else {
            continue;
        };
        let Some(identity) = staff_identity(record) else {
            continue;
        };

        let slot = *index.entry(identity.key.clone()).or_insert_with(|| {
            entries.push(RankAccumulator {
                key: identity.key.clone(),
                ..RankAccumulator::default()
            });
            entries.len() - 1
        });
        let entry = &mut entries[slot];

        match metric.as_field() {
            Some(field) => entry.amount += to_number(record.field(field)),
            None => {
                entry.amount += to_number(&record.total_sales);
                entry.divisor += to_number(&record.nominated_count);
            }
        }
        entry.staff_id = identity.id;
        entry.staff_name = identity.name;
        entry.store_id = Some(store.to_string());
    }

    let mut ranked: Vec<(f64, RankAccumulator)> =
        entries.into_iter().map(|e| (e.value(metric), e)).collect();
    ranked.sort_by(|a, b| b.0.total_cmp(&a.0));

    ranked
        .into_iter()
        .take(n)
        .enumerate()
        .map(|(i, (value, entry))| RankedStaff {
            rank: i + 1,
            staff_key: entry.key,
            staff_id: entry.staff_id,
            staff_name: entry.staff_name,
            store_id: entry.store_id,
            value,
        })
        .collect()
}
