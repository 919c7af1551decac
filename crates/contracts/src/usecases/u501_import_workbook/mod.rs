pub mod request;
pub mod response;

pub use request::{FileYear, ImportFile, ImportRequest, YearReassignmentRequest};
pub use response::{FailedFile, ImportResponse, LoadedFile};
