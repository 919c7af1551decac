use thiserror::Error;

/// Why a workbook (or a whole import) could not be loaded.
#[derive(Debug, Error)]
pub enum ImportError {
    #[error("no files were requested")]
    NoFiles,

    #[error("unsupported file type: {path}")]
    UnsupportedExtension { path: String },

    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to open workbook {path}: {source}")]
    Workbook {
        path: String,
        #[source]
        source: calamine::Error,
    },

    #[error("failed to parse CSV {path}: {source}")]
    Csv {
        path: String,
        #[source]
        source: csv::Error,
    },

    #[error("sheet \"{sheet}\" not found in {path}; available sheets: {available}")]
    MissingDataSheet {
        path: String,
        sheet: String,
        available: String,
    },

    #[error("sheet \"{sheet}\" in {path} is empty")]
    EmptyDataSheet { path: String, sheet: String },

    #[error("{path}: another file named \"{file_name}\" is already part of this import")]
    DuplicateFileName { path: String, file_name: String },

    #[error("import worker failed: {0}")]
    Worker(String),

    #[error("no file could be imported: {details}")]
    NothingImported { details: String },
}
