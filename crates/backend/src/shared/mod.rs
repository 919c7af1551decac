pub mod config;
pub mod dataset;
pub mod sales;
pub mod settings_store;
