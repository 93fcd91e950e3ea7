//! Scenario: reservation-service source against a local mock server.
//!
//! # Invariants under test
//!
//! 1. Reservations are grouped per character with resolved item names.
//! 2. The item-name lookup is fetched once per raid id and reused.
//! 3. A failed item-name lookup degrades to "Unknown Item (id)".
//! 4. `fetch_periods` replaces a failed period with an empty one and keeps going.
//! 5. Negative counters from the service are rejected, not clamped.
//! 6. Period ids are trimmed the same way on the success and failure paths.

use std::time::Duration;

use httpmock::prelude::*;
use serde_json::json;
use srp_roster::{fetch_periods, RaidresApiSource, RosterError, RosterSource, SourceEndpoints};
use srp_schemas::ItemClaim;

fn source_for(server: &MockServer) -> RaidresApiSource {
    RaidresApiSource::new(SourceEndpoints {
        event_api: server.url("/api/events"),
        raid_data_url: server.url("/raids"),
        page_url: server.url("/res"),
        timeout: Duration::from_secs(5),
    })
    .unwrap()
}

fn event_body(raid_id: i64, rows: &[(&str, i64, i64)]) -> serde_json::Value {
    let reservations: Vec<_> = rows
        .iter()
        .map(|(name, item, value)| {
            json!({
                "raidItemId": item,
                "character": { "name": name },
                "srPlus": { "value": value }
            })
        })
        .collect();
    json!({ "reference": "X", "raidId": raid_id, "reservations": reservations })
}

fn items_body() -> serde_json::Value {
    json!({ "raidItems": [ { "id": 1, "name": "Crown" }, { "id": 2, "name": "Boots" } ] })
}

#[tokio::test]
async fn fetch_groups_and_names_reservations() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/api/events/SNDQJT");
            then.status(200)
                .json_body(event_body(7, &[("Gzeus", 1, 4), ("Psst", 2, 0), ("Gzeus", 2, 0)]));
        })
        .await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/raids/raid_7.json");
            then.status(200).json_body(items_body());
        })
        .await;

    let src = source_for(&server);
    let p = src.fetch_period("SNDQJT").await.unwrap();

    assert_eq!(p.period_id, "SNDQJT");
    assert_eq!(p.source_url.as_deref(), Some(server.url("/res/SNDQJT").as_str()));
    assert_eq!(p.participants.len(), 2);
    assert_eq!(
        p.participants[0].claims,
        vec![ItemClaim::new("Crown", 4), ItemClaim::new("Boots", 0)]
    );
    assert_eq!(p.participants[1].participant_name, "Psst");
}

#[tokio::test]
async fn item_names_are_cached_per_raid_id() {
    let server = MockServer::start_async().await;
    for id in ["A1", "B2"] {
        server
            .mock_async(move |when, then| {
                when.method(GET).path(format!("/api/events/{id}"));
                then.status(200).json_body(event_body(7, &[("Gzeus", 1, 1)]));
            })
            .await;
    }
    let items = server
        .mock_async(|when, then| {
            when.method(GET).path("/raids/raid_7.json");
            then.status(200).json_body(items_body());
        })
        .await;

    let src = source_for(&server);
    src.fetch_period("A1").await.unwrap();
    src.fetch_period("B2").await.unwrap();

    items.assert_hits_async(1).await;
    assert_eq!(src.cached_raid_count(), 1);
}

#[tokio::test]
async fn failed_item_lookup_degrades_to_unknown_names() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/api/events/E1");
            then.status(200).json_body(event_body(9, &[("Amy", 42, 2)]));
        })
        .await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/raids/raid_9.json");
            then.status(500);
        })
        .await;

    let src = source_for(&server);
    let p = src.fetch_period("E1").await.unwrap();
    assert_eq!(p.participants[0].claims[0], ItemClaim::new("Unknown Item (42)", 2));
    assert_eq!(src.cached_raid_count(), 0, "failed lookups are not cached");
}

#[tokio::test]
async fn failed_period_becomes_empty_and_batch_continues() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/api/events/GOOD");
            then.status(200).json_body(event_body(7, &[("Gzeus", 1, 1)]));
        })
        .await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/api/events/BAD");
            then.status(404);
        })
        .await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/raids/raid_7.json");
            then.status(200).json_body(items_body());
        })
        .await;

    let src = source_for(&server);
    let err = src.fetch_period("BAD").await.unwrap_err();
    assert!(matches!(err, RosterError::Http { status: 404, .. }));

    let ids = vec!["BAD".to_string(), "GOOD".to_string()];
    let periods = fetch_periods(&src, &ids).await;
    assert_eq!(periods.len(), 2);
    assert_eq!(periods[0].period_id, "BAD");
    assert!(periods[0].is_empty());
    assert_eq!(periods[1].participants.len(), 1);
}

#[tokio::test]
async fn negative_counter_from_service_is_rejected() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/api/events/NEG");
            then.status(200).json_body(event_body(7, &[("Amy", 1, -3)]));
        })
        .await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/raids/raid_7.json");
            then.status(200).json_body(items_body());
        })
        .await;

    let src = source_for(&server);
    let err = src.fetch_period("NEG").await.unwrap_err();
    assert!(matches!(err, RosterError::Decode(_)));
}

#[tokio::test]
async fn padded_ids_yield_trimmed_period_ids_on_both_paths() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/api/events/GOOD");
            then.status(200).json_body(event_body(7, &[("Gzeus", 1, 1)]));
        })
        .await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/api/events/BAD");
            then.status(500);
        })
        .await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/raids/raid_7.json");
            then.status(200).json_body(items_body());
        })
        .await;

    let src = source_for(&server);
    let ids = vec![" GOOD ".to_string(), " BAD\n".to_string()];
    let periods = fetch_periods(&src, &ids).await;

    assert_eq!(periods[0].period_id, "GOOD");
    assert_eq!(periods[0].participants.len(), 1);
    assert_eq!(periods[1].period_id, "BAD");
    assert!(periods[1].is_empty());
}
