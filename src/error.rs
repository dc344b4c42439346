use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// The source list could not be loaded. Nothing can run without it.
#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("cannot read source registry {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("cannot parse source registry {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// A page's raw markup could not be retrieved.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("request for '{page}' failed: {source}")]
    Transport {
        page: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("'{page}' returned HTTP {status}")]
    Status { page: String, status: u16 },
}

/// A table artifact could not be persisted.
#[derive(Debug, Error)]
pub enum WriteError {
    #[error("'{0}' cannot be used as an output file name")]
    InvalidKey(String),
    #[error("cannot serialize table for '{country_code}': {source}")]
    Serialize {
        country_code: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("cannot write {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Why a single source entry was skipped during a run.
#[derive(Debug, Error)]
pub enum SourceError {
    #[error(transparent)]
    Fetch(#[from] FetchError),
    #[error(transparent)]
    Write(#[from] WriteError),
}
