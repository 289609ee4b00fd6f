// src/cli.rs
use std::path::PathBuf;

use clap::Parser;
use color_eyre::Section;
use tracing::{info, warn};

use crate::api::Client;
use crate::config::consts::{DEFAULT_API_BASE, TIMEOUT_SECS, USER_AGENT};
use crate::config::options::{ExportOptions, RunOptions, ScrapeOptions, SourceConfig};
use crate::progress::Progress;
use crate::runner::{self, RunSummary};

/// Fetch VCT match statistics, write them to CSV and optionally to SQLite.
#[derive(Debug, Parser)]
#[command(name = "vct_scrape", version, about)]
pub struct Args {
    /// Season year to fetch
    #[arg(long)]
    pub year: i32,

    /// Cap on the number of events taken from the source listing
    #[arg(long)]
    pub events: Option<usize>,

    /// Agent-round rows CSV path
    #[arg(long)]
    pub out: PathBuf,

    /// Match rows CSV path
    #[arg(long = "matches-out")]
    pub matches_out: PathBuf,

    /// SQLite file to (re)create; omit to skip the database
    #[arg(long)]
    pub db: Option<PathBuf>,

    /// Base URL of the statistics API
    #[arg(long, env = "VCT_API_BASE", default_value = DEFAULT_API_BASE)]
    pub api_base: String,

    /// Per-request timeout in seconds
    #[arg(long, default_value_t = TIMEOUT_SECS)]
    pub timeout_secs: u64,

    /// More log output (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Also append logs to this file
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

impl Args {
    pub fn source_config(&self) -> SourceConfig {
        SourceConfig {
            base_url: self.api_base.clone(),
            timeout_secs: self.timeout_secs,
            user_agent: USER_AGENT.to_string(),
        }
    }

    pub fn run_options(&self) -> RunOptions {
        RunOptions {
            scrape: ScrapeOptions { year: self.year, max_events: self.events },
            export: ExportOptions {
                agents_out: self.out.clone(),
                matches_out: self.matches_out.clone(),
                db: self.db.clone(),
            },
        }
    }
}

/// Progress sink that forwards to the log.
struct LogProgress {
    total: usize,
    done: usize,
}

impl Progress for LogProgress {
    fn begin(&mut self, total: usize) {
        self.total = total;
    }
    fn log(&mut self, msg: &str) {
        info!("{msg}");
    }
    fn item_done(&mut self, event_id: &str, name: &str, rows: usize) {
        self.done += 1;
        info!("[{}/{}] {name} ({event_id}): {rows} rows", self.done, self.total);
    }
    fn item_failed(&mut self, id: &str, reason: &str) {
        warn!("skipped {id}: {reason}");
    }
}

pub fn run() -> color_eyre::Result<()> {
    let args = Args::parse();
    crate::log::init(args.verbose, args.log_file.as_deref())?;

    let client = Client::http(&args.source_config())?;
    let opts = args.run_options();
    let mut progress = LogProgress { total: 0, done: 0 };

    let summary = runner::run(&client, &opts, Some(&mut progress)).map_err(|e| {
        let hint = e.hint();
        let report = color_eyre::Report::new(e);
        match hint {
            Some(h) => report.suggestion(h),
            None => report,
        }
    })?;

    print_summary(&summary);
    Ok(())
}

fn print_summary(s: &RunSummary) {
    println!("Events fetched: {}", s.events);
    if !s.year_matched {
        println!("Warning: no event matched the year filter; all listed events were used");
    }
    println!("Agent rows: {}, Match rows: {}", s.agent_rows, s.match_rows);
    if s.matches_skipped > 0 || s.events_failed > 0 {
        println!("Skipped: {} matches, {} events", s.matches_skipped, s.events_failed);
    }
    if s.field_misses > 0 {
        println!("Missing fields filled with defaults: {}", s.field_misses);
    }
    let files: Vec<String> = s.written.files.iter().map(|p| p.display().to_string()).collect();
    println!("CSV written: {}", files.join(", "));
    if let Some(db) = &s.written.db {
        println!("SQLite written: {}", db.display());
    }
}
