//! Error taxonomy for profile assembly.
//!
//! Only [ProfileError] ever leaves [crate::profile::DetailAssembler::assemble]. Upstream
//! and type-mapping failures are recovered at the branch that hit them.

use thiserror::Error;

/// Failures that abort a whole assembly.
#[derive(Debug, Error)]
pub enum ProfileError {
    #[error("creature {0} not found")]
    NotFound(u32),

    #[error("record store unavailable: {0}")]
    Store(#[source] StoreError),
}

impl From<StoreError> for ProfileError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound(id) => ProfileError::NotFound(id),
            other => ProfileError::Store(other),
        }
    }
}

/// Local record store failures.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("no record with id {0}")]
    NotFound(u32),

    #[error("store request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("store returned HTTP {status} for {url}")]
    Status { url: String, status: u16 },

    #[error("malformed record from store: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("failed to read record file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse record file: {0}")]
    Csv(#[from] csv::Error),

    #[error("record file has no '{0}' column")]
    MissingColumn(&'static str),
}

/// Reference data service failures. Always recovered locally.
#[derive(Debug, Error)]
pub enum UpstreamError {
    #[error("reference request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("reference service returned HTTP {status} for {url}")]
    Status { url: String, status: u16 },

    #[error("malformed payload from {url}: {source}")]
    Decode {
        url: String,
        #[source]
        source: serde_json::Error,
    },
}

impl UpstreamError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, UpstreamError::Status { status: 404, .. })
    }
}

/// A creature's own type name with no entry in the type-name table.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unmappable type name: {0}")]
pub struct UnmappableType(pub String);

/// Configuration loading failures.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("invalid value for {key}: {value}")]
    Invalid { key: &'static str, value: String },
}

/// Failures while wiring the service together from configuration.
#[derive(Debug, Error)]
pub enum StartupError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("record store setup failed: {0}")]
    Store(#[from] StoreError),

    #[error("reference client setup failed: {0}")]
    Reference(#[from] UpstreamError),

    #[error("server failed: {0}")]
    Io(#[from] std::io::Error),
}
