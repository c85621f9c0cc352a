//! Error types for the Warsaw Open Data client.
//!
//! # Design
//! The three API-semantic variants (`InvalidQuery`, `InvalidApiKey`,
//! `Unauthorized`) correspond one-to-one to the upstream's Polish error
//! envelopes and get dedicated variants because callers route on them.
//! Everything else is either a configuration error caught before any I/O,
//! a transport/storage failure carried over from the collaborator crate,
//! or a data error naming the dataset and field that failed to map.

use std::fmt;
use std::path::PathBuf;

pub type Result<T> = std::result::Result<T, Error>;

/// Errors returned by `WarsawClient` and the record mapping layer.
#[derive(Debug)]
pub enum Error {
    /// The upstream rejected the method or query parameters, or a WFS
    /// query matched no features.
    InvalidQuery,

    /// The upstream rejected the `apikey` parameter (wrong or missing).
    InvalidApiKey,

    /// The upstream refused access to the dataset.
    Unauthorized,

    /// The directory configured for the cache file does not exist.
    InvalidDirectory(PathBuf),

    /// The session was closed; no further requests can be issued.
    SessionClosed,

    /// The server returned a non-2xx status.
    Http { status: u16, body: String },

    /// Network-level failure reported by the HTTP agent.
    Transport(String),

    /// SQLite failure reported by the cache store.
    Cache(String),

    /// The response body could not be decoded as JSON.
    Json(String),

    /// A record could not be serialized by one of the `Record` helpers.
    Serialization(String),

    /// An expected key was absent from a dataset record.
    MissingField { dataset: &'static str, field: String },

    /// A field literal did not parse under the expected format.
    Parse { expected: &'static str, value: String },
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::InvalidQuery => write!(f, "wrong query method or parameters"),
            Error::InvalidApiKey => write!(f, "wrong or missing API key"),
            Error::Unauthorized => write!(f, "unauthorized access to the dataset"),
            Error::InvalidDirectory(path) => {
                write!(f, "cache directory does not exist: {}", path.display())
            }
            Error::SessionClosed => write!(f, "session is closed"),
            Error::Http { status, body } => write!(f, "HTTP {status}: {body}"),
            Error::Transport(msg) => write!(f, "transport error: {msg}"),
            Error::Cache(msg) => write!(f, "cache error: {msg}"),
            Error::Json(msg) => write!(f, "invalid JSON body: {msg}"),
            Error::Serialization(msg) => write!(f, "serialization failed: {msg}"),
            Error::MissingField { dataset, field } => {
                write!(f, "dataset {dataset}: missing field {field:?}")
            }
            Error::Parse { expected, value } => {
                write!(f, "expected {expected}, got {value:?}")
            }
        }
    }
}

impl std::error::Error for Error {}

impl From<ureq::Error> for Error {
    fn from(err: ureq::Error) -> Self {
        Error::Transport(err.to_string())
    }
}

impl From<rusqlite::Error> for Error {
    fn from(err: rusqlite::Error) -> Self {
        Error::Cache(err.to_string())
    }
}
