// src/api.rs
//! Upstream statistics API: endpoints and pagination.
//!
//! Knows *where* the data lives and how pages chain together. It hands back
//! raw JSON objects; reading fields out of them is `core::fields`' job.
//!
//! Endpoints (relative to the configured base URL):
//! - `/events?tier=..&status=..&page=N` → event listing, paginated
//! - `/events/{event_id}/matches?page=N` → an event's matches, paginated
//! - `/series/{match_id}/maps` → per-map team and player statistics
//!
//! Every body is `{"data": [...], "next_page": N | null}`; a bare JSON array
//! is accepted as a single last page.

use serde::{Deserialize, Deserializer};
use serde_json::Value;
use tracing::{debug, warn};

use crate::config::consts::{EVENT_STATUS, EVENT_TIER, MAX_PAGES};
use crate::config::options::SourceConfig;
use crate::core::net::{HttpTransport, Transport};
use crate::error::FetchError;

#[derive(Debug, Deserialize)]
struct Page {
    #[serde(default, deserialize_with = "null_as_empty")]
    data: Vec<Value>,
    #[serde(default)]
    next_page: Option<u32>,
}

impl Page {
    fn from_body(path: &str, body: Value) -> Result<Page, FetchError> {
        match body {
            Value::Array(data) => Ok(Page { data, next_page: None }),
            obj @ Value::Object(_) => serde_json::from_value(obj).map_err(|e| FetchError::Decode {
                url: path.to_string(),
                detail: e.to_string(),
            }),
            other => Err(FetchError::Decode {
                url: path.to_string(),
                detail: format!("expected an object or array, got {}", kind(&other)),
            }),
        }
    }
}

/// `"data": null` is an empty page, not a malformed one.
fn null_as_empty<'de, D: Deserializer<'de>>(d: D) -> Result<Vec<Value>, D::Error> {
    Ok(Option::<Vec<Value>>::deserialize(d)?.unwrap_or_default())
}

fn kind(v: &Value) -> &'static str {
    match v {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// Handle on the upstream source. Owns the transport; pass it explicitly.
pub struct Client {
    transport: Box<dyn Transport>,
}

impl Client {
    pub fn new(transport: impl Transport + 'static) -> Self {
        Self { transport: Box::new(transport) }
    }

    /// Client over real HTTP.
    pub fn http(config: &SourceConfig) -> Result<Self, FetchError> {
        Ok(Self::new(HttpTransport::new(config)?))
    }

    /// Every event of the configured tier, page by page, fetched on demand.
    pub fn events(&self) -> Paged<'_> {
        Paged::new(
            self,
            "/events".to_string(),
            vec![("tier", EVENT_TIER.to_string()), ("status", EVENT_STATUS.to_string())],
        )
    }

    /// Every match (series) listed for one event.
    pub fn event_matches(&self, event_id: &str) -> Paged<'_> {
        Paged::new(self, format!("/events/{}/matches", urlencoding::encode(event_id)), Vec::new())
    }

    /// Per-map statistics of one match, in one request.
    pub fn series_maps(&self, match_id: &str) -> Result<Vec<Value>, FetchError> {
        let path = format!("/series/{}/maps", urlencoding::encode(match_id));
        let body = self.transport.get_json(&path, &[])?;
        Ok(Page::from_body(&path, body)?.data)
    }
}

/// Lazy, finite, non-restartable walk over a paginated listing.
///
/// Yields one item per listed object. A failed page is yielded once as an
/// error and ends the walk.
pub struct Paged<'c> {
    client: &'c Client,
    path: String,
    query: Vec<(&'static str, String)>,
    next: Option<u32>,
    buf: std::vec::IntoIter<Value>,
    pages: u32,
}

impl<'c> Paged<'c> {
    fn new(client: &'c Client, path: String, query: Vec<(&'static str, String)>) -> Self {
        Self {
            client,
            path,
            query,
            next: Some(1),
            buf: Vec::new().into_iter(),
            pages: 0,
        }
    }

    /// Pages requested so far.
    pub fn pages(&self) -> u32 {
        self.pages
    }

    fn fetch(&mut self, page: u32) -> Result<(), FetchError> {
        let mut query = self.query.clone();
        query.push(("page", page.to_string()));

        let body = self.client.transport.get_json(&self.path, &query)?;
        let Page { data, next_page } = Page::from_body(&self.path, body)?;
        debug!(path = %self.path, page, items = data.len(), ?next_page, "page fetched");

        // A source that points backwards (or at the same page) would loop forever.
        self.next = next_page.filter(|n| *n > page);
        self.buf = data.into_iter();
        Ok(())
    }
}

impl Iterator for Paged<'_> {
    type Item = Result<Value, FetchError>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(item) = self.buf.next() {
                return Some(Ok(item));
            }
            let page = self.next.take()?;
            if self.pages >= MAX_PAGES {
                warn!(path = %self.path, "stopping after {MAX_PAGES} pages");
                return None;
            }
            self.pages += 1;
            if let Err(e) = self.fetch(page) {
                return Some(Err(e));
            }
        }
    }
}
