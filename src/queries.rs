// src/queries.rs
//! Static aggregate queries over the two tables. Shipped for external use;
//! the pipeline never runs them.

pub struct Query {
    pub name: &'static str,
    pub description: &'static str,
    pub sql: &'static str,
}

pub const REGION_WIN_RATE: Query = Query {
    name: "region_win_rate",
    description: "Map win rate per region",
    sql: include_str!("../sql/queries/region_win_rate.sql"),
};

pub const AGENT_PICK_RATE_BY_REGION: Query = Query {
    name: "agent_pick_rate_by_region",
    description: "Share of player-maps on each agent, per region",
    sql: include_str!("../sql/queries/agent_pick_rate_by_region.sql"),
};

pub const AGENT_WIN_RATE_BY_REGION: Query = Query {
    name: "agent_win_rate_by_region",
    description: "Agent win rate per region (min 50 maps)",
    sql: include_str!("../sql/queries/agent_win_rate_by_region.sql"),
};

pub const TEAM_WIN_RATE: Query = Query {
    name: "team_win_rate",
    description: "Team map win rate (min 20 maps)",
    sql: include_str!("../sql/queries/team_win_rate.sql"),
};

pub const AGENT_PICK_VS_WIN: Query = Query {
    name: "agent_pick_vs_win",
    description: "Global agent pick rate vs win rate (min 200 appearances)",
    sql: include_str!("../sql/queries/agent_pick_vs_win.sql"),
};

pub const ALL: [&Query; 5] = [
    &REGION_WIN_RATE,
    &AGENT_PICK_RATE_BY_REGION,
    &AGENT_WIN_RATE_BY_REGION,
    &TEAM_WIN_RATE,
    &AGENT_PICK_VS_WIN,
];

pub fn by_name(name: &str) -> Option<&'static Query> {
    ALL.iter().copied().find(|q| q.name == name)
}
