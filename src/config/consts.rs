// src/config/consts.rs

// Net config
pub const DEFAULT_API_BASE: &str = "https://vlrggapi.vercel.app/v2";
pub const USER_AGENT: &str = concat!("vct_scrape/", env!("CARGO_PKG_VERSION"));
pub const TIMEOUT_SECS: u64 = 20;

// Event listing query
pub const EVENT_TIER: &str = "vct";
pub const EVENT_STATUS: &str = "all";

// Guard against sources that keep handing out a next page
pub const MAX_PAGES: u32 = 500;

// Export
pub const DEFAULT_OUT_DIR: &str = "data";
pub const DEFAULT_AGENTS_FILE: &str = "agent_rounds.csv";
pub const DEFAULT_MATCHES_FILE: &str = "matches.csv";
pub const CSV_SEP: char = ',';

// Relational sink
pub const AGENT_TABLE: &str = "agent_rounds";
pub const MATCH_TABLE: &str = "matches";
