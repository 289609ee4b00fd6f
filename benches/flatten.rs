// benches/flatten.rs
use criterion::{criterion_group, criterion_main, Criterion, black_box};
use serde_json::{json, Value};

use vct_scrape::core::MappingLog;
use vct_scrape::scrape::{flatten_map, Event, MapContext};

fn sample_map(renamed: bool) -> Value {
    let players: Vec<Value> = (0..10)
        .map(|i| {
            let tag = if i < 5 { "SEN" } else { "G2" };
            if renamed {
                json!({ "player": format!("p{i}"), "team": tag, "agent": "jett", "kills": "17", "deaths": 12, "assists": 4 })
            } else {
                json!({ "name": format!("p{i}"), "team_short": tag, "agents": ["jett"], "k": 17, "d": 12, "a": 4, "acs": 231.5, "fk": 2, "fd": 1 })
            }
        })
        .collect();
    json!({
        "map_name": "Ascent",
        "teams": [
            { "name": "Sentinels", "short": "SEN", "score": 13, "is_winner": true },
            { "name": "G2 Esports", "short": "G2", "score": 11, "is_winner": false }
        ],
        "players": players,
    })
}

fn bench_flatten(c: &mut Criterion) {
    let event = Event {
        id: "2097".into(),
        name: "Champions Seoul".into(),
        region: "International".into(),
        start_date: None,
        end_date: None,
    };
    let ctx = MapContext { event: &event, match_id: "378829", start_time: "" };

    let full = sample_map(false);
    c.bench_function("flatten_map_full", |b| {
        b.iter(|| {
            let mut log = MappingLog::default();
            let rows = flatten_map(ctx, black_box(&full), &mut log);
            black_box(rows.map(|r| r.agents.len()))
        })
    });

    // every player goes through aliases and sentinels
    let renamed = sample_map(true);
    c.bench_function("flatten_map_renamed", |b| {
        b.iter(|| {
            let mut log = MappingLog::default();
            let rows = flatten_map(ctx, black_box(&renamed), &mut log);
            black_box(rows.map(|r| r.agents.len()))
        })
    });
}

criterion_group!(benches, bench_flatten);
criterion_main!(benches);
