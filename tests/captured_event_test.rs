mod common;

use common::*;
use serde_json::json;
use std::path::PathBuf;
use user_stream_relay::stream::{ChangeKind, StreamEvent};
use user_stream_relay::{Config, Outcome, Relay};

fn load_fixture(name: &str) -> StreamEvent {
    let path = PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests/fixtures")
        .join(name);
    let raw = std::fs::read_to_string(path).unwrap();
    serde_json::from_str(&raw).unwrap()
}

#[test]
fn test_captured_event_decodes() {
    let event = load_fixture("insert_event.json");

    let kinds: Vec<ChangeKind> = event.records.iter().map(|r| r.kind()).collect();
    assert_eq!(
        kinds,
        vec![ChangeKind::Insert, ChangeKind::Modify, ChangeKind::Remove]
    );
    assert!(event.records[2].change.new_image.is_empty());
}

#[tokio::test]
async fn test_captured_event_inserts_only() {
    let publisher = RecordingPublisher::new();
    let relay = Relay::new(Config::inserts_only(INSERTS_TOPIC), &publisher);

    let outcome = relay.handle(&load_fixture("insert_event.json")).await.unwrap();
    assert_eq!(
        outcome,
        Outcome::Published {
            message_id: Some("msg-1".to_string()),
            count: 1
        }
    );

    let message: serde_json::Value = serde_json::from_str(&publisher.calls()[0].1).unwrap();
    assert_eq!(
        message,
        json!([{"id": "1", "status": "active", "firstName": "Ana", "lastName": "Ruiz"}])
    );
}

#[tokio::test]
async fn test_captured_event_all_records() {
    let publisher = RecordingPublisher::new();
    let relay = Relay::new(Config::all_records(ALL_TOPIC), &publisher);

    relay.handle(&load_fixture("insert_event.json")).await.unwrap();

    let message: serde_json::Value = serde_json::from_str(&publisher.calls()[0].1).unwrap();
    assert_eq!(
        message,
        json!([
            {"id": "1", "status": "active", "firstName": "Ana", "lastName": "Ruiz"},
            {"id": "2", "status": "inactive", "firstName": "Luis", "lastName": "Mora"},
            {"id": "", "status": "", "firstName": "", "lastName": ""}
        ])
    );
}

#[test]
fn test_outcome_serializes_for_the_runtime() {
    let published = Outcome::Published {
        message_id: Some("abc".to_string()),
        count: 2,
    };
    assert_eq!(
        serde_json::to_value(&published).unwrap(),
        json!({"status": "published", "message_id": "abc", "count": 2})
    );
    assert_eq!(
        serde_json::to_value(&Outcome::Skipped).unwrap(),
        json!({"status": "skipped"})
    );
}
