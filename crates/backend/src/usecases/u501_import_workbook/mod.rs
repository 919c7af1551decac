pub mod error;
pub mod executor;
pub mod normalizer;
pub mod reader;

pub use error::ImportError;
pub use executor::{describe, import_files, reassign_years, ImportOptions, ImportOutcome};
