use std::path::PathBuf;

use thiserror::Error;

/// Errors reading the province map. All of them are fatal to a session.
#[derive(Debug, Error)]
pub enum GeoError {
    #[error("failed to read map file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse map file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("map file has no named province features: {path}")]
    NoFeatures { path: PathBuf },
}

pub type Result<T> = std::result::Result<T, GeoError>;
