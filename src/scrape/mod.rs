// src/scrape/mod.rs
pub mod events;
pub mod matches;

pub use events::{list_events, Event, EventListing, ListError};
pub use matches::{extract_event, flatten_map, EventRows, MapContext};
