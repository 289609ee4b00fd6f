// src/runner.rs
//! The pipeline: Listing → Extracting → Writing → Done.
//!
//! Strictly sequential and single-pass. The only way out other than `Done` is
//! a [`RunError`]: no data from upstream, or a sink that cannot be written.

use std::fmt;
use std::path::PathBuf;

use tracing::{info, warn};

use crate::api::Client;
use crate::config::options::{ExportOptions, RunOptions, ScrapeOptions};
use crate::core::MappingLog;
use crate::data::DataSet;
use crate::error::{RunError, SinkError};
use crate::file;
use crate::progress::Progress;
use crate::scrape::{self, EventListing};
use crate::store;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Stage {
    Listing,
    Extracting,
    Writing,
    Done,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Stage::Listing => "listing events",
            Stage::Extracting => "extracting matches",
            Stage::Writing => "writing output",
            Stage::Done => "done",
        })
    }
}

/// Everything extracted, before anything is written.
#[derive(Debug)]
pub struct Collected {
    pub listing: EventListing,
    pub data: DataSet,
    pub matches_listed: usize,
    pub matches_skipped: usize,
    pub events_failed: usize,
    pub field_misses: usize,
}

/// Paths produced by the write stage.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Written {
    pub files: Vec<PathBuf>,
    pub db: Option<PathBuf>,
}

/// Summary of what was produced.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RunSummary {
    pub events: usize,
    pub year_matched: bool,
    pub agent_rows: usize,
    pub match_rows: usize,
    pub matches_skipped: usize,
    pub events_failed: usize,
    pub field_misses: usize,
    pub written: Written,
}

/// Top-level runner. `progress` can be None (no UI updates) or
/// Some(&mut impl Progress). `finish` is called once, after the last stage.
pub fn run<'p>(
    client: &Client,
    opts: &RunOptions,
    mut progress: Option<&mut (dyn Progress + 'p)>,
) -> Result<RunSummary, RunError> {
    let outcome = stages(client, opts, progress.as_deref_mut());
    if let Some(p) = progress.as_deref_mut() {
        p.finish();
    }
    outcome
}

fn stages<'p>(
    client: &Client,
    opts: &RunOptions,
    progress: Option<&mut (dyn Progress + 'p)>,
) -> Result<RunSummary, RunError> {
    let collected = collect(client, &opts.scrape, progress)?;

    info!(stage = %Stage::Writing);
    let written = write(&opts.export, &collected.data)?;

    info!(stage = %Stage::Done);
    Ok(RunSummary {
        events: collected.listing.events.len(),
        year_matched: collected.listing.year_matched,
        agent_rows: collected.data.agents.len(),
        match_rows: collected.data.matches.len(),
        matches_skipped: collected.matches_skipped,
        events_failed: collected.events_failed,
        field_misses: collected.field_misses,
        written,
    })
}

/// Listing and extraction. Fails only when nothing at all came back.
pub fn collect<'p>(
    client: &Client,
    scrape: &ScrapeOptions,
    mut progress: Option<&mut (dyn Progress + 'p)>,
) -> Result<Collected, RunError> {
    let mut log = MappingLog::default();

    info!(stage = %Stage::Listing, year = scrape.year, cap = ?scrape.max_events);
    let listing = scrape::list_events(client, scrape.year, scrape.max_events, &mut log)
        .map_err(|e| RunError::UpstreamEmpty { stage: Stage::Listing, reason: e.to_string() })?;

    info!(stage = %Stage::Extracting, events = listing.events.len());
    if let Some(p) = progress.as_deref_mut() {
        p.begin(listing.events.len());
    }

    let mut data = DataSet::default();
    let mut matches_listed = 0;
    let mut matches_skipped = 0;
    let mut events_failed = 0;

    for event in &listing.events {
        if let Some(p) = progress.as_deref_mut() {
            p.log(&format!("Event {} ({})", event.name, event.id));
        }
        match scrape::extract_event(client, event, &mut log, progress.as_deref_mut()) {
            Ok(rows) => {
                let n = rows.data.agents.len() + rows.data.matches.len();
                matches_listed += rows.matches_listed;
                matches_skipped += rows.skipped.len();
                data.append(rows.data);
                if let Some(p) = progress.as_deref_mut() {
                    p.item_done(&event.id, &event.name, n);
                }
            }
            Err(e) => {
                warn!(event = %event.id, "could not list matches: {e}; event skipped");
                events_failed += 1;
                if let Some(p) = progress.as_deref_mut() {
                    p.item_failed(&event.id, &e.to_string());
                }
            }
        }
    }

    for (field, n) in log.iter() {
        info!("{field}: sentinel used {n} times");
    }

    if data.is_empty() {
        return Err(RunError::UpstreamEmpty {
            stage: Stage::Extracting,
            reason: format!(
                "{} events, {matches_listed} matches listed, {matches_skipped} skipped, \
                 {events_failed} events failed; no rows extracted",
                listing.events.len()
            ),
        });
    }

    Ok(Collected {
        listing,
        data,
        matches_listed,
        matches_skipped,
        events_failed,
        field_misses: log.total(),
    })
}

/// Sink Writer: both CSV files, then the optional SQLite load.
pub fn write(export: &ExportOptions, data: &DataSet) -> Result<Written, SinkError> {
    if data.is_empty() {
        return Err(SinkError::NoDataToWrite);
    }

    let mut written = Written::default();
    written.files.push(file::write_agent_rounds(&export.agents_out, &data.agents)?);
    written.files.push(file::write_matches(&export.matches_out, &data.matches)?);

    if let Some(db) = &export.db {
        store::load(db, &data.agents, &data.matches)?;
        written.db = Some(db.clone());
    }
    Ok(written)
}
