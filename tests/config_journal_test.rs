use std::fs;
use std::path::PathBuf;

use blockfall::config::{GameConfig, EVENT_LOG_VAR, FALL_MS_VAR, SEED_VAR};
use blockfall::core::{ScriptedShapes, Session, SessionConfig, ShapeSource};
use blockfall::journal::{Journal, JournalRecord};
use blockfall::types::PieceKind;
use serde_json::Value;

fn temp_path(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!("blockfall-{}-{name}.jsonl", std::process::id()))
}

#[test]
fn config_from_lookup_builds_session_and_source() {
    let config = GameConfig::from_lookup(|key| match key {
        SEED_VAR => Some("99".to_string()),
        FALL_MS_VAR => Some("120".to_string()),
        _ => None,
    });

    assert_eq!(config.seed, 99);
    assert_eq!(config.event_log, None);
    assert_eq!(config.session_config(), SessionConfig::with_fall_interval_ms(120));

    // Same seed, same shapes.
    let mut a = config.shape_source();
    let mut b = config.shape_source();
    for _ in 0..20 {
        assert_eq!(a.next_kind(), b.next_kind());
    }
}

#[test]
fn config_ignores_garbage() {
    let config = GameConfig::from_lookup(|key| match key {
        SEED_VAR => Some("-3".to_string()),
        FALL_MS_VAR => Some("".to_string()),
        EVENT_LOG_VAR => Some("".to_string()),
        _ => None,
    });
    assert_eq!(config.fall_interval_ms, 500);
    assert_eq!(config.event_log, None);
}

#[test]
fn journal_file_records_session_events() {
    let path = temp_path("events");
    let _ = fs::remove_file(&path);

    let mut session = Session::new(
        SessionConfig::default(),
        ScriptedShapes::repeat(PieceKind::O),
    );
    {
        let mut journal = Journal::open(&path).expect("open journal");
        journal.record(&JournalRecord::Start {
            seed: 1,
            fall_interval_ms: session.fall_interval_ms(),
        });

        session.hard_drop();
        for event in session.drain_events() {
            journal.record(&JournalRecord::lock(&event));
        }

        while !session.game_over() {
            session.hard_drop();
        }
        journal.record(&JournalRecord::game_over(&session));
        journal.record(&JournalRecord::restart(&session));
        assert!(journal.is_enabled());
    }

    let contents = fs::read_to_string(&path).expect("read journal");
    let records: Vec<Value> = contents
        .lines()
        .map(|line| serde_json::from_str(line).expect("valid json line"))
        .collect();
    let _ = fs::remove_file(&path);

    let events: Vec<&str> = records.iter().map(|r| r["event"].as_str().unwrap()).collect();
    assert_eq!(events, ["start", "lock", "game_over", "restart"]);

    assert_eq!(records[0]["fall_interval_ms"], 500);
    assert_eq!(records[1]["piece"], "o");
    assert_eq!(records[1]["lines_cleared"], 0);
    assert_eq!(records[1]["score"], 0);
    assert_eq!(records[2]["lines"], 0);
}

#[test]
fn journal_open_fails_for_missing_directory() {
    let path = temp_path("missing-dir").join("events.jsonl");
    let err = Journal::open(&path).err().expect("open should fail");
    assert!(format!("{err:#}").contains("event journal"));
}
