// src/core/fields.rs
//! Declared defaults for every upstream field the extractor reads.
//!
//! The source renames and drops fields between versions. Each field is listed
//! once in [`Field::rule`] with the keys it may appear under and the sentinel
//! substituted when none of them yields a usable value. Every substitution is a
//! [`FieldMappingWarning`]; a [`MappingLog`] collects them for the whole run.

use std::collections::BTreeMap;
use std::fmt;

use serde_json::Value;
use tracing::{debug, warn};

use super::sanitize::normalize_ws;

/// Value substituted for a missing or unusable field.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Sentinel {
    Text(&'static str),
    /// Nullable column: empty CSV cell, SQL NULL.
    Null,
    Int(i64),
    Flag(bool),
    /// Nested list, substituted with an empty one.
    Empty,
}

impl fmt::Display for Sentinel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Sentinel::Text(s) => write!(f, "{s:?}"),
            Sentinel::Null => f.write_str("null"),
            Sentinel::Int(n) => write!(f, "{n}"),
            Sentinel::Flag(b) => write!(f, "{b}"),
            Sentinel::Empty => f.write_str("[]"),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Field {
    // event listing
    EventId,
    EventName,
    Region,
    StartDate,
    EndDate,
    // match listing
    MatchId,
    StartTime,
    // per-map statistics
    MapName,
    Teams,
    Players,
    // map teams
    TeamName,
    TeamShort,
    Score,
    IsWinner,
    // map players
    PlayerName,
    PlayerTeam,
    Agents,
    Kills,
    Deaths,
    Assists,
    Acs,
    FirstKills,
    FirstDeaths,
}

#[derive(Clone, Copy, Debug)]
pub struct FieldRule {
    pub record: &'static str,
    /// Canonical key first, then accepted renames.
    pub keys: &'static [&'static str],
    pub sentinel: Sentinel,
}

impl Field {
    pub const ALL: [Field; 23] = [
        Field::EventId, Field::EventName, Field::Region, Field::StartDate, Field::EndDate,
        Field::MatchId, Field::StartTime,
        Field::MapName, Field::Teams, Field::Players,
        Field::TeamName, Field::TeamShort, Field::Score, Field::IsWinner,
        Field::PlayerName, Field::PlayerTeam, Field::Agents, Field::Kills, Field::Deaths,
        Field::Assists, Field::Acs, Field::FirstKills, Field::FirstDeaths,
    ];

    pub fn rule(self) -> FieldRule {
        use Sentinel::*;

        match self {
            Field::EventId     => rule("event", &["id", "event_id"],               Text("")),
            Field::EventName   => rule("event", &["name", "event_name", "title"],  Text("")),
            Field::Region      => rule("event", &["region", "country"],            Text("")),
            Field::StartDate   => rule("event", &["start_date", "start"],          Null),
            Field::EndDate     => rule("event", &["end_date", "end"],              Null),

            Field::MatchId     => rule("match", &["match_id", "id", "series_id"],  Text("")),
            Field::StartTime   => rule("match", &["start_time", "date", "time"],   Text("")),

            Field::MapName     => rule("map", &["map_name", "map", "name"],      Text("")),
            Field::Teams       => rule("map", &["teams"],                        Empty),
            Field::Players     => rule("map", &["players"],                      Empty),

            Field::TeamName    => rule("team", &["name", "team"],                 Text("")),
            Field::TeamShort   => rule("team", &["short", "tag", "team_short"],   Text("")),
            Field::Score       => rule("team", &["score", "rounds"],              Int(0)),
            Field::IsWinner    => rule("team", &["is_winner", "winner", "won"],   Flag(false)),

            Field::PlayerName  => rule("player", &["name", "player"],               Text("")),
            Field::PlayerTeam  => rule("player", &["team_short", "team", "team_tag"], Text("")),
            Field::Agents      => rule("player", &["agents", "agent"],              Empty),
            Field::Kills       => rule("player", &["k", "kills"],                   Null),
            Field::Deaths      => rule("player", &["d", "deaths"],                  Null),
            Field::Assists     => rule("player", &["a", "assists"],                 Null),
            Field::Acs         => rule("player", &["acs"],                          Null),
            Field::FirstKills  => rule("player", &["fk", "first_kills"],            Null),
            Field::FirstDeaths => rule("player", &["fd", "first_deaths"],           Null),
        }
    }
}

const fn rule(record: &'static str, keys: &'static [&'static str], sentinel: Sentinel) -> FieldRule {
    FieldRule { record, keys, sentinel }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rule = self.rule();
        write!(f, "{}.{}", rule.record, rule.keys[0])
    }
}

/// An expected field was absent, renamed beyond the known aliases, or held a
/// value of the wrong shape. Recovered locally; never returned as an error.
#[derive(Clone, Debug, PartialEq)]
pub struct FieldMappingWarning {
    pub field: Field,
    pub context: String,
}

impl fmt::Display for FieldMappingWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} missing in {}; using {}",
            self.field,
            self.context,
            self.field.rule().sentinel
        )
    }
}

/// Counts sentinel substitutions per field. The first miss of each field is
/// logged at warn level, repeats at debug.
#[derive(Debug, Default)]
pub struct MappingLog {
    misses: BTreeMap<Field, usize>,
}

impl MappingLog {
    pub fn record(&mut self, warning: FieldMappingWarning) {
        let n = self.misses.entry(warning.field).or_insert(0);
        *n += 1;
        if *n == 1 {
            warn!("{warning}");
        } else {
            debug!("{warning}");
        }
    }

    pub fn count(&self, field: Field) -> usize {
        self.misses.get(&field).copied().unwrap_or(0)
    }

    pub fn total(&self) -> usize {
        self.misses.values().sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Field, usize)> + '_ {
        self.misses.iter().map(|(f, n)| (*f, *n))
    }
}

/// Typed, sentinel-filling view over one upstream JSON object.
pub struct Fields<'a, 'l> {
    obj: &'a Value,
    context: &'a str,
    log: &'l mut MappingLog,
}

impl<'a, 'l> Fields<'a, 'l> {
    /// `context` names the record in warnings, e.g. `"match 378829 / Ascent"`.
    pub fn new(obj: &'a Value, context: &'a str, log: &'l mut MappingLog) -> Self {
        Self { obj, context, log }
    }

    fn lookup(&self, field: Field) -> Option<&'a Value> {
        field
            .rule()
            .keys
            .iter()
            .filter_map(|k| self.obj.get(*k))
            .find(|v| !v.is_null())
    }

    fn miss(&mut self, field: Field) -> Sentinel {
        self.log.record(FieldMappingWarning { field, context: self.context.to_string() });
        field.rule().sentinel
    }

    pub fn text(&mut self, field: Field) -> String {
        match self.lookup(field).and_then(value_text) {
            Some(s) => s,
            None => match self.miss(field) {
                Sentinel::Text(s) => s.to_string(),
                _ => String::new(),
            },
        }
    }

    /// Like [`Fields::text`] but `None` instead of a text sentinel.
    pub fn opt_text(&mut self, field: Field) -> Option<String> {
        match self.lookup(field).and_then(value_text) {
            Some(s) => Some(s),
            None => match self.miss(field) {
                Sentinel::Text(s) => Some(s.to_string()),
                _ => None,
            },
        }
    }

    pub fn int(&mut self, field: Field) -> Option<i64> {
        match self.lookup(field).and_then(value_int) {
            Some(n) => Some(n),
            None => match self.miss(field) {
                Sentinel::Int(n) => Some(n),
                _ => None,
            },
        }
    }

    pub fn real(&mut self, field: Field) -> Option<f64> {
        match self.lookup(field).and_then(value_real) {
            Some(x) => Some(x),
            None => match self.miss(field) {
                Sentinel::Int(n) => Some(n as f64),
                _ => None,
            },
        }
    }

    pub fn flag(&mut self, field: Field) -> bool {
        match self.lookup(field).and_then(value_flag) {
            Some(b) => b,
            None => matches!(self.miss(field), Sentinel::Flag(true)),
        }
    }

    /// A scalar where a list is expected is treated as a one-element list.
    pub fn list(&mut self, field: Field) -> Vec<&'a Value> {
        match self.lookup(field) {
            Some(Value::Array(items)) => items.iter().collect(),
            Some(v) if value_text(v).is_some() => vec![v],
            _ => {
                self.miss(field);
                Vec::new()
            }
        }
    }
}

/* ---------------- value coercions ---------------- */

pub fn value_text(v: &Value) -> Option<String> {
    match v {
        Value::String(s) => {
            let s = normalize_ws(s);
            if s.is_empty() { None } else { Some(s) }
        }
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

fn value_int(v: &Value) -> Option<i64> {
    match v {
        Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().filter(|x| x.fract() == 0.0).map(|x| x as i64)),
        Value::String(s) => {
            let s = s.trim();
            s.parse::<i64>()
                .ok()
                .or_else(|| s.parse::<f64>().ok().filter(|x| x.fract() == 0.0).map(|x| x as i64))
        }
        _ => None,
    }
}

fn value_real(v: &Value) -> Option<f64> {
    match v {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok().filter(|x| x.is_finite()),
        _ => None,
    }
}

fn value_flag(v: &Value) -> Option<bool> {
    match v {
        Value::Bool(b) => Some(*b),
        Value::Number(n) => match n.as_i64() {
            Some(0) => Some(false),
            Some(1) => Some(true),
            _ => None,
        },
        Value::String(s) => match s.trim().to_ascii_lowercase().as_str() {
            "true" | "1" | "yes" => Some(true),
            "false" | "0" | "no" => Some(false),
            _ => None,
        },
        _ => None,
    }
}
