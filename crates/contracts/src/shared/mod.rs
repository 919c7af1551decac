pub mod data_quality;
pub mod settings;
