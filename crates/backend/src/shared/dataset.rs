use chrono::{DateTime, Utc};
use contracts::domain::a001_sales_record::SalesRecord;
use contracts::usecases::u501_import_workbook::LoadedFile;
use once_cell::sync::OnceCell;
use std::collections::BTreeSet;
use std::sync::{Arc, RwLock};

use super::sales::grouping::StoreOrder;
use super::sales::validity::valid_store;

/// One immutable, merged load of every imported workbook.
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    pub records: Vec<SalesRecord>,
    pub files: Vec<LoadedFile>,
    pub store_order: StoreOrder,
    pub staff_mapping_count: usize,
    pub loaded_at: Option<DateTime<Utc>>,
}

impl Dataset {
    pub fn empty(store_order: StoreOrder) -> Self {
        Self {
            store_order,
            ..Self::default()
        }
    }

    /// Distinct valid stores in display order.
    pub fn store_list(&self) -> Vec<String> {
        let stores: BTreeSet<&str> = self.records.iter().filter_map(valid_store).collect();
        let stores: Vec<&str> = stores.into_iter().collect();
        self.store_order.sort(&stores)
    }
}

static DATASET: OnceCell<RwLock<Arc<Dataset>>> = OnceCell::new();

fn slot() -> &'static RwLock<Arc<Dataset>> {
    DATASET.get_or_init(|| RwLock::new(Arc::new(Dataset::default())))
}

/// Current snapshot. Callers compute on the returned `Arc` without holding the lock.
pub fn get_dataset() -> Arc<Dataset> {
    let guard = slot().read().unwrap_or_else(|poisoned| poisoned.into_inner());
    Arc::clone(&guard)
}

/// Swaps in a new snapshot; readers holding the previous one keep it.
pub fn replace_dataset(dataset: Dataset) {
    tracing::info!(
        "Dataset replaced: {} records from {} files",
        dataset.records.len(),
        dataset.files.len()
    );
    let mut guard = slot().write().unwrap_or_else(|poisoned| poisoned.into_inner());
    *guard = Arc::new(dataset);
}

/// Derives a new snapshot from the current one while holding the write lock,
/// so a concurrent replacement cannot be lost. Returns the new snapshot.
pub fn update_dataset<F>(update: F) -> Arc<Dataset>
where
    F: FnOnce(&Dataset) -> Dataset,
{
    update_in(slot(), update)
}

fn update_in<F>(slot: &RwLock<Arc<Dataset>>, update: F) -> Arc<Dataset>
where
    F: FnOnce(&Dataset) -> Dataset,
{
    let mut guard = slot.write().unwrap_or_else(|poisoned| poisoned.into_inner());
    let updated = Arc::new(update(&guard));
    *guard = Arc::clone(&updated);
    tracing::info!(
        "Dataset updated: {} records from {} files",
        updated.records.len(),
        updated.files.len()
    );
    updated
}
