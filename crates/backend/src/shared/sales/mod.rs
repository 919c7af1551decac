//! Aggregation core: pure functions over loaded sales records.
//!
//! Every function takes a record slice and returns fresh values; nothing here
//! touches the global dataset.

pub mod aggregate;
pub mod comparison;
pub mod grouping;
pub mod numeric;
pub mod period;
pub mod quality;
pub mod ranking;
pub mod trend;
pub mod validity;

#[cfg(test)]
pub(crate) mod fixtures;

pub use aggregate::{
    aggregate_by_staff, calculate_supplementary_metrics, calculate_totals, get_monthly_totals,
    get_monthly_totals_by_store, get_store_rankings, SalesFigures,
};
pub use comparison::{
    calculate_annual_total, calculate_mom, calculate_monthly_total, calculate_target_achievement,
    calculate_yoy,
};
pub use grouping::{group_by_store, sort_stores_by_order, StoreOrder};
pub use period::{available_months, available_years, filter_by_period};
pub use quality::check_data_quality;
pub use ranking::{get_top_n, get_top_n_in_stores, DEPARTMENT_TOP, PERSONAL_TOP};
pub use trend::{get_individual_trend, get_monthly_trends};
pub use validity::{is_valid, staff_identity};
