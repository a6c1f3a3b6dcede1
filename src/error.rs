use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Failure talking to the signature request service.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("request failed: {0}")]
    Transport(#[source] reqwest::Error),

    #[error("service returned {status}: {name} {message}")]
    Status {
        status: u16,
        name: String,
        message: String,
    },

    #[error("failed to read response body: {0}")]
    Body(#[source] reqwest::Error),

    #[error("failed to parse response JSON: {0}")]
    Decode(#[from] serde_json::Error),
}

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("listing signature requests failed on page {page}: {source}")]
    Listing {
        page: u32,
        #[source]
        source: ApiError,
    },

    #[error("downloading file for request {id} failed: {source}")]
    Fetch {
        id: String,
        #[source]
        source: ApiError,
    },

    #[error("writing file {path:?} failed: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to create output directory {path:?}: {source}")]
    OutputDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}
