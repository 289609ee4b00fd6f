// src/config/options.rs
use std::path::{Path, PathBuf};

use super::consts::*;

/// Where and how to reach the upstream statistics API.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SourceConfig {
    pub base_url: String,
    pub timeout_secs: u64,
    pub user_agent: String,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_BASE.to_string(),
            timeout_secs: TIMEOUT_SECS,
            user_agent: USER_AGENT.to_string(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ScrapeOptions {
    pub year: i32,
    pub max_events: Option<usize>, // applied to the upstream listing, before the year filter
}

/// Output targets. `db: None` skips the relational load entirely.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExportOptions {
    pub agents_out: PathBuf,
    pub matches_out: PathBuf,
    pub db: Option<PathBuf>,
}

impl Default for ExportOptions {
    fn default() -> Self {
        let dir = Path::new(DEFAULT_OUT_DIR);
        Self {
            agents_out: dir.join(DEFAULT_AGENTS_FILE),
            matches_out: dir.join(DEFAULT_MATCHES_FILE),
            db: None,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RunOptions {
    pub scrape: ScrapeOptions,
    pub export: ExportOptions,
}

impl RunOptions {
    pub fn new(year: i32) -> Self {
        Self {
            scrape: ScrapeOptions { year, max_events: None },
            export: ExportOptions::default(),
        }
    }
}
