// src/lib.rs
//! Fetch VCT match statistics from a paginated JSON API, flatten them into
//! agent-round and match rows, write CSV, and optionally load SQLite.

pub mod api;
pub mod config;
pub mod core;
pub mod csv;
pub mod data;
pub mod error;
pub mod file;
pub mod progress;
pub mod queries;
pub mod runner;
pub mod scrape;
pub mod store;

#[cfg(feature = "cli")]
pub mod cli;
#[cfg(feature = "cli")]
pub mod log;

pub use api::Client;
pub use data::{AgentRound, DataSet, MatchRow};
pub use error::{FetchError, RunError, SinkError};
pub use runner::{run, RunSummary, Stage};
