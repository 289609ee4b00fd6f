// src/error.rs
use std::path::PathBuf;

use thiserror::Error;

use crate::runner::Stage;

/// One request to the upstream source failed. No distinction is made between
/// transient and permanent failures; nothing is retried.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("request to {url} failed: {source}")]
    Http {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("{url} answered HTTP {status}")]
    Status { url: String, status: u16 },

    #[error("could not decode response from {url}: {detail}")]
    Decode { url: String, detail: String },
}

/// A single match whose map statistics could not be fetched. Logged and
/// skipped; sibling matches carry on.
#[derive(Debug, Error)]
#[error("match {match_id} skipped: {source}")]
pub struct PerMatchFetchError {
    pub match_id: String,
    #[source]
    pub source: FetchError,
}

#[derive(Debug, Error)]
pub enum SinkError {
    #[error("nothing to write: both record sets are empty")]
    NoDataToWrite,

    #[error("could not write {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("database {} failed: {source}", path.display())]
    Sqlite {
        path: PathBuf,
        #[source]
        source: rusqlite::Error,
    },
}

impl SinkError {
    pub(crate) fn io(path: impl Into<PathBuf>) -> impl FnOnce(std::io::Error) -> Self {
        let path = path.into();
        move |source| SinkError::Io { path, source }
    }

    pub(crate) fn sqlite(path: impl Into<PathBuf>) -> impl FnOnce(rusqlite::Error) -> Self {
        let path = path.into();
        move |source| SinkError::Sqlite { path, source }
    }
}

/// Errors that end a run. Everything else is logged and swallowed.
#[derive(Debug, Error)]
pub enum RunError {
    #[error("no data from upstream while {stage}: {reason}")]
    UpstreamEmpty { stage: Stage, reason: String },

    #[error(transparent)]
    Sink(#[from] SinkError),
}

impl RunError {
    /// What the user can try before re-running.
    pub fn hint(&self) -> Option<&'static str> {
        match self {
            RunError::UpstreamEmpty { .. } => Some(
                "retry without --events (or with a larger cap), check connectivity, \
                 or wait out upstream rate limiting",
            ),
            RunError::Sink(SinkError::NoDataToWrite) => {
                Some("no rows were extracted; re-run once the source has data")
            }
            RunError::Sink(_) => Some("check that the output paths are writable"),
        }
    }
}
