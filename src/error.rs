use thiserror::Error;

/// Failure of a data-access collaborator. The engines themselves never fail.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Request to {table} failed: {source}")]
    Request {
        table: &'static str,
        #[source]
        source: ureq::Error,
    },

    #[error("Failed to decode {table} rows: {source}")]
    Decode {
        table: &'static str,
        #[source]
        source: ureq::Error,
    },
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Environment variable {0} must be set")]
    Missing(&'static str),

    #[error("Invalid {key} value: {message}")]
    Invalid { key: &'static str, message: String },

    #[error("Failed to load tag table from {path}: {message}")]
    TagTable { path: String, message: String },
}
