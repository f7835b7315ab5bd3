use std::path::PathBuf;

/// Failures while constructing or installing a logger.
///
/// Logging calls themselves never fail; every variant here comes from
/// initialisation.
#[derive(Debug, thiserror::Error)]
pub enum LogError {
    #[error("cannot open log output {path}: {source}")]
    OpenOutput {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("global logger already initialised")]
    AlreadyInitialized,
    #[error("tracing subscriber: {0}")]
    Subscriber(String),
}

pub type Result<T> = std::result::Result<T, LogError>;
