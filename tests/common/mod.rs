// tests/common/mod.rs
//
// Canned upstream source for driving the pipeline offline.
//
#![allow(dead_code)]

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use serde_json::{json, Value};
use vct_scrape::core::Transport;
use vct_scrape::FetchError;

pub const AGENTS: [&str; 5] = ["jett", "sova", "omen", "killjoy", "skye"];

#[derive(Default)]
pub struct FakeSource {
    routes: HashMap<String, Result<Value, u16>>,
    hits: Rc<RefCell<Vec<String>>>,
}

impl FakeSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Serve `body` for page `page` of a paginated listing.
    pub fn page(mut self, path: &str, page: u32, body: Value) -> Self {
        self.routes.insert(format!("{path}?page={page}"), Ok(body));
        self
    }

    /// Serve `body` for a non-paginated path.
    pub fn route(mut self, path: &str, body: Value) -> Self {
        self.routes.insert(path.to_string(), Ok(body));
        self
    }

    /// Answer `path` with an HTTP error status.
    pub fn fail(mut self, path: &str, status: u16) -> Self {
        self.routes.insert(path.to_string(), Err(status));
        self
    }

    /// Request log shared with the transport after it is moved into a client.
    pub fn hits(&self) -> Rc<RefCell<Vec<String>>> {
        Rc::clone(&self.hits)
    }
}

impl Transport for FakeSource {
    fn get_json(&self, path: &str, query: &[(&str, String)]) -> Result<Value, FetchError> {
        let key = match query.iter().find(|(k, _)| *k == "page") {
            Some((_, page)) => format!("{path}?page={page}"),
            None => path.to_string(),
        };
        self.hits.borrow_mut().push(key.clone());
        match self.routes.get(&key) {
            Some(Ok(body)) => Ok(body.clone()),
            Some(Err(status)) => Err(FetchError::Status { url: key, status: *status }),
            None => Err(FetchError::Status { url: key, status: 404 }),
        }
    }
}

pub fn paged(data: Vec<Value>, next_page: Option<u32>) -> Value {
    json!({ "data": data, "next_page": next_page })
}

pub fn event(id: &str, name: &str, region: &str, start: &str) -> Value {
    json!({ "id": id, "name": name, "region": region, "start_date": start, "end_date": null })
}

pub fn listed_match(match_id: &str) -> Value {
    json!({ "match_id": match_id, "start_time": "2024-03-02T17:00:00Z" })
}

/// Per-map payload: `maps` holds (map name, score A, score B); team A is
/// flagged winner when it scored more. `per_side` players per team.
pub fn series(maps: &[(&str, i64, i64)], per_side: usize) -> Value {
    let data: Vec<Value> = maps
        .iter()
        .map(|(name, a, b)| {
            let mut players = Vec::new();
            for (tag, side) in [("AAA", 0), ("BBB", 1)] {
                for i in 0..per_side {
                    players.push(json!({
                        "name": format!("{tag}-{i}"),
                        "team_short": tag,
                        "agents": [AGENTS[(i + side) % AGENTS.len()]],
                        "k": 10 + i, "d": 12, "a": 3,
                        "acs": 180.5 + i as f64,
                        "fk": 1, "fd": 2,
                    }));
                }
            }
            json!({
                "map_name": name,
                "teams": [
                    { "name": "Team A", "short": "AAA", "score": a, "is_winner": a > b },
                    { "name": "Team B", "short": "BBB", "score": b, "is_winner": b > a },
                ],
                "players": players,
            })
        })
        .collect();
    json!({ "data": data })
}
