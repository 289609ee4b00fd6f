// src/store.rs
//! SQLite sink. Every load drops and recreates both tables, so a store only
//! ever holds the rows of the most recent run.

use std::path::Path;

use rusqlite::{params, Connection, Transaction};
use tracing::info;

use crate::config::consts::{AGENT_TABLE, MATCH_TABLE};
use crate::data::{AgentRound, MatchRow};
use crate::error::SinkError;
use crate::file::ensure_parent;

/// DDL executed on every load: drops, creates, indexes.
pub const SCHEMA: &str = include_str!("../sql/schema.sql");

const INSERT_AGENT_ROUND: &str = "INSERT INTO agent_rounds (
    event_id, event_name, region, match_id, map, team, player, agent,
    kills, deaths, assists, acs, fk, fd, rounds_played, result
) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15, ?16)";

const INSERT_MATCH: &str = "INSERT INTO matches (
    event_id, event_name, region, match_id, map, team, opponent,
    rounds_played, result, start_time
) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LoadReport {
    pub agent_rows: usize,
    pub match_rows: usize,
}

/// Open (creating if needed) the database at `path` and replace both tables.
/// The connection is held for the whole write and closed on return.
pub fn load(path: &Path, agents: &[AgentRound], matches: &[MatchRow]) -> Result<LoadReport, SinkError> {
    ensure_parent(path)?;
    let mut conn = Connection::open(path).map_err(SinkError::sqlite(path))?;
    let report = load_into(&mut conn, agents, matches).map_err(SinkError::sqlite(path))?;
    conn.close().map_err(|(_, e)| SinkError::Sqlite { path: path.to_path_buf(), source: e })?;

    info!(
        db = %path.display(),
        agent_rows = report.agent_rows,
        match_rows = report.match_rows,
        "SQLite tables replaced"
    );
    Ok(report)
}

/// Same as [`load`] on an already open connection. One transaction: either
/// both tables are replaced or neither is.
pub fn load_into(
    conn: &mut Connection,
    agents: &[AgentRound],
    matches: &[MatchRow],
) -> rusqlite::Result<LoadReport> {
    let tx = conn.transaction()?;
    recreate_schema(&tx)?;
    insert_agent_rounds(&tx, agents)?;
    insert_matches(&tx, matches)?;
    let report = LoadReport {
        agent_rows: count_rows(&tx, AGENT_TABLE)?,
        match_rows: count_rows(&tx, MATCH_TABLE)?,
    };
    tx.commit()?;
    Ok(report)
}

pub fn recreate_schema(tx: &Transaction<'_>) -> rusqlite::Result<()> {
    tx.execute_batch(SCHEMA)
}

fn insert_agent_rounds(tx: &Transaction<'_>, rows: &[AgentRound]) -> rusqlite::Result<()> {
    let mut stmt = tx.prepare(INSERT_AGENT_ROUND)?;
    for r in rows {
        stmt.execute(params![
            r.event_id,
            r.event_name,
            r.region,
            r.match_id,
            r.map,
            r.team,
            r.player,
            r.agent,
            r.kills,
            r.deaths,
            r.assists,
            r.acs,
            r.fk,
            r.fd,
            r.rounds_played,
            i64::from(r.result),
        ])?;
    }
    Ok(())
}

fn insert_matches(tx: &Transaction<'_>, rows: &[MatchRow]) -> rusqlite::Result<()> {
    let mut stmt = tx.prepare(INSERT_MATCH)?;
    for r in rows {
        stmt.execute(params![
            r.event_id,
            r.event_name,
            r.region,
            r.match_id,
            r.map,
            r.team,
            r.opponent,
            r.rounds_played,
            i64::from(r.result),
            r.start_time,
        ])?;
    }
    Ok(())
}

/// Row count of one of the two tables, as stored.
fn count_rows(conn: &Connection, table: &str) -> rusqlite::Result<usize> {
    let sql = match table {
        AGENT_TABLE => "SELECT COUNT(*) FROM agent_rounds",
        MATCH_TABLE => "SELECT COUNT(*) FROM matches",
        other => return Err(rusqlite::Error::InvalidParameterName(other.to_string())),
    };
    conn.query_row(sql, [], |row| row.get(0))
}
