// src/scrape/matches.rs
//! Match/Round Extractor: one event in, agent-round and match rows out.

use serde_json::Value;
use tracing::{debug, info, warn};

use crate::api::Client;
use crate::core::fields::value_text;
use crate::core::sanitize::team_key;
use crate::core::{Field, Fields, MappingLog};
use crate::data::{AgentRound, DataSet, MatchRow};
use crate::error::{FetchError, PerMatchFetchError};
use crate::progress::Progress;

use super::events::Event;

/// Rows of one event plus what had to be skipped to get them.
#[derive(Debug, Default)]
pub struct EventRows {
    pub data: DataSet,
    pub matches_listed: usize,
    pub skipped: Vec<PerMatchFetchError>,
}

/// Identifies the match a map belongs to.
#[derive(Clone, Copy, Debug)]
pub struct MapContext<'a> {
    pub event: &'a Event,
    pub match_id: &'a str,
    pub start_time: &'a str,
}

/// One side of a map as reported upstream.
#[derive(Clone, Debug, PartialEq)]
struct Side {
    name: String,
    short: String,
    score: i64,
    won: bool,
}

impl Side {
    fn from_value(v: &Value, context: &str, log: &mut MappingLog) -> Side {
        let mut f = Fields::new(v, context, log);
        Side {
            name: f.text(Field::TeamName),
            short: f.text(Field::TeamShort),
            score: f.int(Field::Score).unwrap_or(0).max(0),
            won: f.flag(Field::IsWinner),
        }
    }

    /// Players report their team by tag, sometimes by full name.
    fn owns(&self, player_team: &str) -> bool {
        let key = team_key(player_team);
        !key.is_empty() && (key == team_key(&self.short) || key == team_key(&self.name))
    }
}

/// Index of the winning side. The upstream flag wins; without a usable flag
/// the higher score does. A level, unflagged map has no winner.
fn winner(sides: &[Side; 2]) -> Option<usize> {
    match (sides[0].won, sides[1].won) {
        (true, false) => Some(0),
        (false, true) => Some(1),
        _ => match sides[0].score.cmp(&sides[1].score) {
            std::cmp::Ordering::Greater => Some(0),
            std::cmp::Ordering::Less => Some(1),
            std::cmp::Ordering::Equal => None,
        },
    }
}

/// Extract every match of `event`. Only a failure to list the event's
/// matches at all is returned; per-match failures are logged and skipped.
pub fn extract_event<'p>(
    client: &Client,
    event: &Event,
    log: &mut MappingLog,
    mut progress: Option<&mut (dyn Progress + 'p)>,
) -> Result<EventRows, FetchError> {
    let mut out = EventRows::default();

    let mut listed: Vec<Value> = Vec::new();
    for item in client.event_matches(&event.id) {
        match item {
            Ok(v) => listed.push(v),
            Err(e) if listed.is_empty() => return Err(e),
            Err(e) => {
                warn!(event = %event.id, "match listing cut short after {} matches: {e}", listed.len());
                break;
            }
        }
    }
    out.matches_listed = listed.len();
    debug!(event = %event.id, matches = listed.len(), "matches listed");

    for m in &listed {
        let context = format!("event {}", event.id);
        let mut f = Fields::new(m, &context, log);
        let match_id = f.text(Field::MatchId);
        let start_time = f.text(Field::StartTime);
        if match_id.is_empty() {
            warn!(event = %event.id, "listed match without an id; skipped");
            continue;
        }

        let maps = match client.series_maps(&match_id) {
            Ok(maps) => maps,
            Err(source) => {
                let err = PerMatchFetchError { match_id, source };
                warn!("{err}");
                if let Some(p) = progress.as_deref_mut() {
                    p.item_failed(&err.match_id, &err.source.to_string());
                }
                out.skipped.push(err);
                continue;
            }
        };

        let ctx = MapContext { event, match_id: &match_id, start_time: &start_time };
        for map in &maps {
            if let Some(rows) = flatten_map(ctx, map, log) {
                out.data.append(rows);
            }
        }
    }

    info!(
        event = %event.id,
        agent_rows = out.data.agents.len(),
        match_rows = out.data.matches.len(),
        skipped = out.skipped.len(),
        "event extracted"
    );
    Ok(out)
}

/// Flatten one map into two mirrored match rows and one agent row per player.
/// Maps without exactly two teams yield nothing.
pub fn flatten_map(ctx: MapContext<'_>, map: &Value, log: &mut MappingLog) -> Option<DataSet> {
    let context = format!("match {}", ctx.match_id);
    let mut f = Fields::new(map, &context, log);
    let map_name = f.text(Field::MapName);
    let teams = f.list(Field::Teams);
    let players = f.list(Field::Players);

    if teams.len() != 2 {
        warn!(
            match_id = ctx.match_id,
            map = %map_name,
            teams = teams.len(),
            "map does not have exactly two teams; skipped"
        );
        return None;
    }

    let context = format!("match {} / {}", ctx.match_id, map_name);
    let sides = [
        Side::from_value(teams[0], &context, log),
        Side::from_value(teams[1], &context, log),
    ];
    let rounds_played = sides[0].score.saturating_add(sides[1].score);
    let winner = winner(&sides);
    if winner.is_none() {
        debug!(match_id = ctx.match_id, map = %map_name, "no winner reported");
    }

    let matches = [(0usize, 1usize), (1, 0)]
        .into_iter()
        .map(|(me, them)| MatchRow {
            event_id: ctx.event.id.clone(),
            event_name: ctx.event.name.clone(),
            region: ctx.event.region.clone(),
            match_id: ctx.match_id.to_string(),
            map: map_name.clone(),
            team: sides[me].name.clone(),
            opponent: sides[them].name.clone(),
            rounds_played,
            result: u8::from(winner == Some(me)),
            start_time: ctx.start_time.to_string(),
        })
        .collect();

    let agents = players
        .into_iter()
        .map(|p| {
            let mut f = Fields::new(p, &context, log);
            let team = f.text(Field::PlayerTeam);
            let agent = f.list(Field::Agents).first().and_then(|a| value_text(a)).unwrap_or_default();
            let won = winner.is_some_and(|w| sides[w].owns(&team));
            AgentRound {
                event_id: ctx.event.id.clone(),
                event_name: ctx.event.name.clone(),
                region: ctx.event.region.clone(),
                match_id: ctx.match_id.to_string(),
                map: map_name.clone(),
                player: f.text(Field::PlayerName),
                agent,
                kills: f.int(Field::Kills),
                deaths: f.int(Field::Deaths),
                assists: f.int(Field::Assists),
                acs: f.real(Field::Acs),
                fk: f.int(Field::FirstKills),
                fd: f.int(Field::FirstDeaths),
                rounds_played,
                result: u8::from(won),
                team,
            }
        })
        .collect();

    Some(DataSet { agents, matches })
}
