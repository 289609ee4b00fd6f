// src/scrape/events.rs
//! Event Lister: which events of the season to extract.

use chrono::{Datelike, NaiveDate};
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::api::Client;
use crate::core::{Field, Fields, MappingLog};
use crate::error::FetchError;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Event {
    pub id: String,
    pub name: String,
    pub region: String,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

impl Event {
    pub fn from_value(v: &Value, log: &mut MappingLog) -> Event {
        let mut f = Fields::new(v, "event listing", log);
        Event {
            id: f.text(Field::EventId),
            name: f.text(Field::EventName),
            region: f.text(Field::Region),
            start_date: f.opt_text(Field::StartDate).as_deref().and_then(parse_date),
            end_date: f.opt_text(Field::EndDate).as_deref().and_then(parse_date),
        }
    }

    /// Kept for `year` when either date falls in it, or when both are unknown.
    pub fn in_year(&self, year: i32) -> bool {
        match (self.start_date, self.end_date) {
            (None, None) => true,
            (start, end) => {
                start.is_some_and(|d| d.year() == year) || end.is_some_and(|d| d.year() == year)
            }
        }
    }
}

/// Accepts `2024-08-01` and anything starting with it (`2024-08-01T10:00:00Z`).
fn parse_date(s: &str) -> Option<NaiveDate> {
    let head = s.get(..10)?;
    NaiveDate::parse_from_str(head, "%Y-%m-%d").ok()
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EventListing {
    pub events: Vec<Event>,
    /// Events the source returned before the year filter.
    pub listed: usize,
    /// False when the year filter matched nothing and the unfiltered list was
    /// kept instead.
    pub year_matched: bool,
}

#[derive(Debug, Error)]
pub enum ListError {
    /// The source produced no events at all (also for a cap of 0).
    #[error("the source returned no events")]
    NoData,

    #[error("listing events failed: {0}")]
    Fetch(#[from] FetchError),
}

/// List the events of `year`, taking at most `cap` events from the source.
///
/// A listing failure after the first page keeps what was already listed.
pub fn list_events(client: &Client, year: i32, cap: Option<usize>, log: &mut MappingLog)
    -> Result<EventListing, ListError>
{
    let cap = cap.unwrap_or(usize::MAX);
    if cap == 0 {
        return Err(ListError::NoData);
    }

    let mut raw: Vec<Event> = Vec::new();
    let mut listing = client.events();
    for item in listing.by_ref() {
        match item {
            Ok(v) => {
                let event = Event::from_value(&v, log);
                if event.id.is_empty() {
                    warn!(name = %event.name, "listed event without an id; skipped");
                    continue;
                }
                raw.push(event);
            }
            Err(e) if raw.is_empty() => return Err(ListError::Fetch(e)),
            Err(e) => {
                warn!("event listing cut short after {} events: {e}", raw.len());
                break;
            }
        }
        if raw.len() >= cap {
            break;
        }
    }

    debug!(pages = listing.pages(), events = raw.len(), "events listed");

    if raw.is_empty() {
        return Err(ListError::NoData);
    }
    Ok(filter_year(raw, year))
}

/// Keep events of `year`; if none match, keep everything.
pub fn filter_year(raw: Vec<Event>, year: i32) -> EventListing {
    let listed = raw.len();
    let kept: Vec<Event> = raw.iter().filter(|e| e.in_year(year)).cloned().collect();

    if kept.is_empty() {
        warn!("no listed event falls in {year}; keeping all {listed} listed events");
        return EventListing { events: raw, listed, year_matched: false };
    }
    info!("{} of {listed} listed events fall in {year}", kept.len());
    EventListing { events: kept, listed, year_matched: true }
}
