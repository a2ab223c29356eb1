use thiserror::Error;

/// Errors from reading statements, loading configuration and writing results.
///
/// Filtering itself never fails; every byte sequence produces an outcome.
#[derive(Error, Debug)]
pub enum FilterError {
    /// Could not read the statement or configuration file
    #[error("Failed to read file content: {0}")]
    ReadContentFailed(#[from] std::io::Error),

    /// The builder was given neither content nor a file path
    #[error("Content or filepath is required")]
    MissingContentAndFilepath,

    #[error("Invalid filter configuration: {0}")]
    ConfigInvalid(#[from] serde_json::Error),

    #[error("Failed to write {path}: {source}")]
    WriteOutputFailed {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write report: {0}")]
    ReportFailed(#[from] csv::Error),
}

pub type FilterResult<T> = Result<T, FilterError>;
