// src/data.rs
//! Flat output records. Created once during extraction, never mutated.
//!
//! Column order is declared here and shared by the CSV and SQLite writers.

/// One player on one map of one match.
#[derive(Clone, Debug, PartialEq)]
pub struct AgentRound {
    pub event_id: String,
    pub event_name: String,
    pub region: String,
    pub match_id: String,
    pub map: String,
    pub team: String,
    pub player: String,
    pub agent: String,
    pub kills: Option<i64>,
    pub deaths: Option<i64>,
    pub assists: Option<i64>,
    pub acs: Option<f64>,
    pub fk: Option<i64>,
    pub fd: Option<i64>,
    pub rounds_played: i64,
    /// 1 = the player's team won the map.
    pub result: u8,
}

/// One side of one map of one match; always emitted in mirrored pairs.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MatchRow {
    pub event_id: String,
    pub event_name: String,
    pub region: String,
    pub match_id: String,
    pub map: String,
    pub team: String,
    pub opponent: String,
    pub rounds_played: i64,
    pub result: u8,
    pub start_time: String,
}

impl AgentRound {
    pub const HEADERS: [&'static str; 16] = [
        "event_id", "event_name", "region", "match_id", "map", "team", "player", "agent",
        "kills", "deaths", "assists", "acs", "fk", "fd", "rounds_played", "result",
    ];

    /// Cells in `HEADERS` order; nulls become empty cells.
    pub fn cells(&self) -> Vec<String> {
        vec![
            self.event_id.clone(),
            self.event_name.clone(),
            self.region.clone(),
            self.match_id.clone(),
            self.map.clone(),
            self.team.clone(),
            self.player.clone(),
            self.agent.clone(),
            opt_cell(self.kills),
            opt_cell(self.deaths),
            opt_cell(self.assists),
            opt_cell(self.acs),
            opt_cell(self.fk),
            opt_cell(self.fd),
            self.rounds_played.to_string(),
            self.result.to_string(),
        ]
    }
}

impl MatchRow {
    pub const HEADERS: [&'static str; 10] = [
        "event_id", "event_name", "region", "match_id", "map", "team", "opponent",
        "rounds_played", "result", "start_time",
    ];

    pub fn cells(&self) -> Vec<String> {
        vec![
            self.event_id.clone(),
            self.event_name.clone(),
            self.region.clone(),
            self.match_id.clone(),
            self.map.clone(),
            self.team.clone(),
            self.opponent.clone(),
            self.rounds_played.to_string(),
            self.result.to_string(),
            self.start_time.clone(),
        ]
    }
}

fn opt_cell<T: ToString>(v: Option<T>) -> String {
    v.map(|x| x.to_string()).unwrap_or_default()
}

/// Both record sets of a run (or of one event).
#[derive(Clone, Debug, Default, PartialEq)]
pub struct DataSet {
    pub agents: Vec<AgentRound>,
    pub matches: Vec<MatchRow>,
}

impl DataSet {
    pub fn is_empty(&self) -> bool {
        self.agents.is_empty() && self.matches.is_empty()
    }

    pub fn append(&mut self, mut other: DataSet) {
        self.agents.append(&mut other.agents);
        self.matches.append(&mut other.matches);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cells_follow_header_order_and_blank_nulls() {
        let r = AgentRound {
            event_id: "2097".into(),
            event_name: "Champions".into(),
            region: "International".into(),
            match_id: "378829".into(),
            map: "Ascent".into(),
            team: "SEN".into(),
            player: "TenZ".into(),
            agent: "jett".into(),
            kills: Some(20),
            deaths: None,
            assists: Some(4),
            acs: Some(250.5),
            fk: Some(3),
            fd: None,
            rounds_played: 22,
            result: 1,
        };
        let cells = r.cells();
        assert_eq!(cells.len(), AgentRound::HEADERS.len());
        assert_eq!(cells[8], "20");
        assert_eq!(cells[9], "");
        assert_eq!(cells[11], "250.5");
        assert_eq!(cells[13], "");
        assert_eq!(cells[15], "1");
    }
}
