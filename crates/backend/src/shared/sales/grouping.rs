use contracts::domain::a001_sales_record::SalesRecord;
use std::cmp::Ordering;
use std::collections::BTreeMap;

use super::validity::valid_store;

/// Default display order of the stores.
pub const DEFAULT_STORE_ORDER: [&str; 4] = ["奈良", "天理", "生駒", "villa"];

/// Fixed store display priority.
///
/// A store takes the position of the first entry its id contains
/// (`"奈良-A"` sorts as `"奈良"`). Unlisted stores follow, lexically.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreOrder {
    entries: Vec<String>,
}

impl Default for StoreOrder {
    fn default() -> Self {
        Self::new(DEFAULT_STORE_ORDER.iter().map(|s| s.to_string()).collect())
    }
}

impl StoreOrder {
    pub fn new(entries: Vec<String>) -> Self {
        let entries = entries
            .into_iter()
            .map(|e| e.trim().to_string())
            .filter(|e| !e.is_empty())
            .collect();
        Self { entries }
    }

    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Position of the first entry contained in `store`.
    pub fn priority(&self, store: &str) -> Option<usize> {
        self.entries.iter().position(|e| store.contains(e.as_str()))
    }

    pub fn compare(&self, a: &str, b: &str) -> Ordering {
        match (self.priority(a), self.priority(b)) {
            (Some(pa), Some(pb)) => pa.cmp(&pb).then_with(|| a.cmp(b)),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => a.cmp(b),
        }
    }

    pub fn sort<S: AsRef<str>>(&self, stores: &[S]) -> Vec<String> {
        let mut sorted: Vec<String> = stores.iter().map(|s| s.as_ref().to_string()).collect();
        sorted.sort_by(|a, b| self.compare(a, b));
        sorted
    }
}

/// Orders store ids for display.
pub fn sort_stores_by_order<S: AsRef<str>>(stores: &[S], order: &StoreOrder) -> Vec<String> {
    order.sort(stores)
}

/// Groups valid records by store; invalid records never appear.
pub fn group_by_store(records: &[SalesRecord]) -> BTreeMap<String, Vec<SalesRecord>> {
    records.iter().fold(BTreeMap::new(), |mut groups, record| {
        if let Some(store) = valid_store(record) {
            groups
                .entry(store.to_string())
                .or_insert_with(Vec::new)
                .push(record.clone());
        }
        groups
    })
}
