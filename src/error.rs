// src/error.rs
use std::path::PathBuf;

/// Everything that can abort a crawl. None of these are recovered from:
/// the first one to surface ends the run and no output file is written.
#[derive(Debug, thiserror::Error)]
pub enum CrawlError {
    /// Connection, TLS, or body read failure.
    #[error("request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// Server answered with a non-2xx status.
    #[error("HTTP error: {status} for {url}")]
    Status { url: String, status: u16 },

    /// Body was not valid JSON.
    #[error("malformed JSON from {url}: {source}")]
    Decode {
        url: String,
        #[source]
        source: serde_json::Error,
    },

    /// JSON was valid but not the shape a SensorThings payload has.
    #[error("unexpected payload shape: {0}")]
    Shape(String),

    /// A root Thing lacks one of the keys the tree node copies directly.
    #[error("Thing {thing} is missing required field `{field}`")]
    MissingField { field: &'static str, thing: String },

    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("could not serialize output: {0}")]
    Serialize(#[source] serde_json::Error),

    #[error("logging setup failed: {0}")]
    Logging(String),
}

pub type Result<T> = std::result::Result<T, CrawlError>;
