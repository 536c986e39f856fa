use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TransferError {
    #[error("Request to {url} failed: {source}")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("{url} returned status {status}")]
    Status {
        url: String,
        status: reqwest::StatusCode,
    },

    #[error("Failed to write TLE cache {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

#[derive(Debug, Error)]
pub enum DataLoadError {
    #[error("Failed to read TLE file {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse TLE file {}: {message}", .path.display())]
    Parse { path: PathBuf, message: String },

    #[error("Satellite {name} in {} has unusable elements: {message}", .path.display())]
    Elements {
        path: PathBuf,
        name: String,
        message: String,
    },
}

#[derive(Debug, Error)]
pub enum ComputationError {
    #[error("{name}: cannot express time relative to element epoch: {message}")]
    Epoch { name: String, message: String },

    #[error("{name}: propagation failed: {message}")]
    Propagation { name: String, message: String },
}
