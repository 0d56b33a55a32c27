//! Client Tests
//!
//! These tests run the client against an in-process scripted server and
//! verify:
//! - Request lines carry token, action and params
//! - Every wrapper decodes its declared result shape
//! - Server failures map to the right error kind
//! - Transport failures surface as connection errors within the timeout

mod common;

use std::thread;
use std::time::{Duration, Instant};

use common::{closed_port, MockServer, Reply, TEST_TOKEN};
use craftlink::{
    BlockDescriptor, BlockGrid, BlockSpec, Client, ClientConfig, CraftError, GameMode, Location,
    Params, Position, Region, Rotation, Selector, TimeAction, Weather,
};
use serde_json::json;

// =============================================================================
// Request Framing Tests
// =============================================================================

#[test]
fn test_request_carries_token_action_and_params() {
    let server = MockServer::ok(json!(1));
    let client = server.client();

    client.set_block(100, 64, 200, "minecraft:stone").unwrap();

    let request = server.next_request();
    assert_eq!(request["token"], TEST_TOKEN);
    assert_eq!(request["action"], "setblock");
    assert_eq!(
        request["params"],
        json!({ "x": 100, "y": 64, "z": 200, "block": "minecraft:stone" })
    );
    server.join();
}

#[test]
fn test_request_is_single_line() {
    let server = MockServer::ok(json!(1));
    let client = server.client();

    let desc = BlockDescriptor::new("minecraft:oak_sign")
        .with_nbt(json!({ "Text1": "line one\nline two" }));
    client.place(Position::new(0, 64, 0), desc).unwrap();

    let raw = server.next_raw();
    assert!(raw.ends_with('\n'));
    assert_eq!(raw.matches('\n').count(), 1);
    let request: serde_json::Value = serde_json::from_str(&raw).unwrap();
    assert_eq!(request["params"]["nbt"]["Text1"], "line one\nline two");
    server.join();
}

#[test]
fn test_send_command_raw_action() {
    let server = MockServer::ok(json!({ "anything": [1, 2, 3] }));
    let client = server.client();

    let data = client
        .send_command("custom", Params::new().with("flag", true))
        .unwrap();

    assert_eq!(data, json!({ "anything": [1, 2, 3] }));
    let request = server.next_request();
    assert_eq!(request["action"], "custom");
    assert_eq!(request["params"], json!({ "flag": true }));
    server.join();
}

#[test]
fn test_success_without_data_is_null() {
    let server = MockServer::start(vec![Reply::Json(json!({ "success": true }))]);
    let client = server.client();

    let data = client.send_command("time", Params::new()).unwrap();

    assert!(data.is_null());
    server.join();
}

// =============================================================================
// Wrapper Result Tests
// =============================================================================

#[test]
fn test_get_pos_preserves_integers() {
    let server = MockServer::ok(json!([100, 64, 200]));
    let client = server.client();

    let pos = client.get_pos("Steve").unwrap();

    assert_eq!(pos, Position::new(100, 64, 200));
    assert_eq!(<[i64; 3]>::from(pos), [100, 64, 200]);
    assert_eq!(server.next_params(), json!({ "username": "Steve" }));
    server.join();
}

#[test]
fn test_fill_returns_count() {
    let server = MockServer::ok(json!(100));
    let client = server.client();

    let count = client
        .fill(Region::new((0, 64, 0), (9, 64, 9)), "stone")
        .unwrap();

    assert_eq!(count, 100);
    assert_eq!(
        server.next_params(),
        json!({ "x1": 0, "y1": 64, "z1": 0, "x2": 9, "y2": 64, "z2": 9, "block": "stone" })
    );
    server.join();
}

#[test]
fn test_get_block_returns_id() {
    let server = MockServer::ok(json!("minecraft:stone"));
    let client = server.client();

    assert_eq!(client.get_block(1, 2, 3).unwrap(), "minecraft:stone");
    assert_eq!(server.next_params(), json!({ "x": 1, "y": 2, "z": 3 }));
    server.join();
}

#[test]
fn test_place_with_state_and_nbt() {
    let server = MockServer::ok(json!(1));
    let client = server.client();

    let chest = BlockDescriptor::new("minecraft:chest")
        .with_state("facing", "north")
        .with_nbt(json!({ "CustomName": "{\"text\":\"Treasure Chest\"}" }));
    assert_eq!(client.place(Position::new(100, 64, 205), chest).unwrap(), 1);

    let params = server.next_params();
    assert_eq!(params["block"], "minecraft:chest");
    assert_eq!(params["block_state"], json!({ "facing": "north" }));
    assert_eq!(params["nbt"]["CustomName"], "{\"text\":\"Treasure Chest\"}");
    server.join();
}

#[test]
fn test_teleport_with_and_without_rotation() {
    let server = MockServer::start(vec![
        Reply::Json(json!({ "success": true, "data": true })),
        Reply::Json(json!({ "success": true, "data": true })),
    ]);
    let client = server.client();

    assert!(client
        .teleport("Steve", Location::new(1.5, 70.0, -3.0), None)
        .unwrap());
    let params = server.next_params();
    assert_eq!(params["x"], 1.5);
    assert_eq!(params["z"], -3.0);
    assert!(params.get("yaw").is_none());
    assert!(params.get("pitch").is_none());

    assert!(client
        .teleport("Steve", Location::new(0.0, 64.0, 0.0), Some(Rotation::new(90.0, 0.0)))
        .unwrap());
    let params = server.next_params();
    assert_eq!(params["yaw"], 90.0);
    assert_eq!(params["pitch"], 0.0);
    server.join();
}

#[test]
fn test_gamemode_and_give() {
    let server = MockServer::start(vec![
        Reply::Json(json!({ "success": true, "data": true })),
        Reply::Json(json!({ "success": true, "data": true })),
    ]);
    let client = server.client();

    assert!(client.gamemode("Alex", GameMode::Creative).unwrap());
    assert_eq!(
        server.next_params(),
        json!({ "username": "Alex", "mode": "creative" })
    );

    assert!(client.give("Alex", "minecraft:diamond", 64).unwrap());
    assert_eq!(
        server.next_params(),
        json!({ "username": "Alex", "item": "minecraft:diamond", "amount": 64 })
    );
    server.join();
}

#[test]
fn test_time_actions() {
    let server = MockServer::start(vec![
        Reply::Json(json!({ "success": true, "data": 6000 })),
        Reply::Json(json!({ "success": true, "data": 6000 })),
    ]);
    let client = server.client();

    assert_eq!(client.time(TimeAction::Set(6000)).unwrap(), 6000);
    assert_eq!(server.next_params(), json!({ "action": "set", "value": 6000 }));

    assert_eq!(client.time(TimeAction::Query).unwrap(), 6000);
    assert_eq!(server.next_params(), json!({ "action": "query" }));
    server.join();
}

#[test]
fn test_weather_zero_duration_is_sent() {
    let server = MockServer::start(vec![
        Reply::Json(json!({ "success": true, "data": true })),
        Reply::Json(json!({ "success": true, "data": true })),
    ]);
    let client = server.client();

    assert!(client.weather(Weather::Rain, Some(0)).unwrap());
    assert_eq!(
        server.next_params(),
        json!({ "condition": "rain", "duration": 0 })
    );

    assert!(client.weather(Weather::Clear, None).unwrap());
    assert_eq!(server.next_params(), json!({ "condition": "clear" }));
    server.join();
}

#[test]
fn test_out_of_range_values_are_left_to_the_server() {
    let server = MockServer::start(vec![
        Reply::Json(json!({ "success": false, "error": "Amount must be positive" })),
        Reply::Json(json!({ "success": false, "error": "Invalid duration: -5" })),
    ]);
    let client = server.client();

    let err = client.give("Alex", "minecraft:diamond", -1).unwrap_err();
    assert!(err.is_command());
    assert_eq!(server.next_params()["amount"], -1);

    let err = client.weather(Weather::Rain, Some(-5)).unwrap_err();
    assert_eq!(err.server_message(), Some("Invalid duration: -5"));
    assert_eq!(server.next_params()["duration"], -5);
    server.join();
}

#[test]
fn test_summon_returns_uuid() {
    let uuid = "3f1c2a9e-5b7d-4e21-9c1a-0d8e6f4b2a10";
    let server = MockServer::ok(json!(uuid));
    let client = server.client();

    let id = client
        .summon("minecraft:zombie", Location::new(10.0, 64.0, 10.0))
        .unwrap();

    assert_eq!(id, uuid);
    let params = server.next_params();
    assert_eq!(params["entity_type"], "minecraft:zombie");
    assert_eq!(params["y"], 64.0);
    server.join();
}

#[test]
fn test_kill_selectors() {
    let server = MockServer::start(vec![
        Reply::Json(json!({ "success": true, "data": 12 })),
        Reply::Json(json!({ "success": true, "data": 1 })),
    ]);
    let client = server.client();

    assert_eq!(client.kill(&Selector::All).unwrap(), 12);
    assert_eq!(server.next_params(), json!({ "selector": "all" }));

    assert_eq!(
        client.kill(&Selector::Player("Steve".to_string())).unwrap(),
        1
    );
    assert_eq!(server.next_params(), json!({ "selector": "player:Steve" }));
    server.join();
}

#[test]
fn test_clone_region() {
    let server = MockServer::ok(json!(27));
    let client = server.client();

    let count = client
        .clone_region(Region::new((0, 64, 0), (2, 66, 2)), Position::new(10, 64, 10))
        .unwrap();

    assert_eq!(count, 27);
    assert_eq!(
        server.next_params(),
        json!({
            "x1": 0, "y1": 64, "z1": 0,
            "x2": 2, "y2": 66, "z2": 2,
            "dest_x": 10, "dest_y": 64, "dest_z": 10
        })
    );
    server.join();
}

#[test]
fn test_edit_sends_origin_and_grid() {
    let server = MockServer::ok(json!(3));
    let client = server.client();

    let mut grid = BlockGrid::new(2, 1, 2);
    grid.set(0, 0, 0, "stone").unwrap();
    grid.set(1, 0, 1, "glass").unwrap();
    grid.set(
        0,
        0,
        1,
        BlockDescriptor::new("minecraft:chest").with_state("facing", "north"),
    )
    .unwrap();

    assert_eq!(client.edit(Position::new(5, 64, 5), &grid).unwrap(), 3);

    let params = server.next_params();
    assert_eq!(params["x"], 5);
    assert_eq!(params["y"], 64);
    assert_eq!(params["z"], 5);
    assert_eq!(
        params["blocks"],
        json!([
            [["stone", { "block": "minecraft:chest", "block_state": { "facing": "north" } }]],
            [[null, "glass"]]
        ])
    );
    let echoed = BlockGrid::from_payload(&params["blocks"]).unwrap();
    assert_eq!(echoed, grid);
    assert_eq!(echoed.get(1, 0, 0), Some(&BlockSpec::Skip));
    server.join();
}

#[test]
fn test_unexpected_result_shape_is_protocol_error() {
    let server = MockServer::ok(json!([100.5, 64, 200]));
    let client = server.client();

    let err = client.get_pos("Steve").unwrap_err();

    assert!(matches!(err, CraftError::Protocol(_)), "got {:?}", err);
    server.join();
}

#[test]
fn test_repeated_calls_are_independent() {
    let server = MockServer::start(vec![
        Reply::Json(json!({ "success": true, "data": 1 })),
        Reply::Json(json!({ "success": true, "data": 1 })),
    ]);
    let client = server.client();

    assert_eq!(client.set_block(0, 64, 0, "stone").unwrap(), 1);
    assert_eq!(client.set_block(0, 64, 0, "stone").unwrap(), 1);

    assert_eq!(server.next_request(), server.next_request());
    server.join();
}

// =============================================================================
// Server Failure Tests
// =============================================================================

#[test]
fn test_invalid_token_is_authentication_error() {
    let server = MockServer::failing("Invalid token");
    let client = server.client();

    let err = client.set_block(0, 0, 0, "stone").unwrap_err();

    assert!(err.is_authentication());
    assert_eq!(err.server_message(), Some("Invalid token"));
    server.join();
}

#[test]
fn test_token_match_is_case_insensitive() {
    let server = MockServer::failing("TOKEN expired");
    let client = server.client();

    let err = client.get_block(0, 0, 0).unwrap_err();

    assert!(matches!(err, CraftError::Authentication(ref m) if m == "TOKEN expired"));
    server.join();
}

#[test]
fn test_other_failures_are_command_errors() {
    let server = MockServer::failing("Region too large (max 32768 blocks): 40000");
    let client = server.client();

    let err = client
        .clone_region(Region::new((0, 0, 0), (99, 3, 99)), Position::new(0, 100, 0))
        .unwrap_err();

    assert!(err.is_command());
    assert_eq!(
        err.server_message(),
        Some("Region too large (max 32768 blocks): 40000")
    );
    server.join();
}

#[test]
fn test_failure_without_message() {
    let server = MockServer::start(vec![Reply::Json(json!({ "success": false }))]);
    let client = server.client();

    let err = client.get_block(0, 0, 0).unwrap_err();

    assert!(matches!(err, CraftError::Command(ref m) if m == "Unknown error"));
    server.join();
}

#[test]
fn test_malformed_response_is_protocol_error() {
    let server = MockServer::start(vec![Reply::Raw(b"not json at all\n".to_vec())]);
    let client = server.client();

    let err = client.get_block(0, 0, 0).unwrap_err();

    assert!(matches!(err, CraftError::Protocol(_)), "got {:?}", err);
    server.join();
}

#[test]
fn test_bytes_after_first_line_are_ignored() {
    let server = MockServer::start(vec![Reply::Raw(
        b"{\"success\": true, \"data\": 7}\n{\"success\": false, \"error\": \"late\"}\ngarbage".to_vec(),
    )]);
    let client = server.client();

    assert_eq!(client.kill(&Selector::All).unwrap(), 7);
    server.join();
}

// =============================================================================
// Transport Failure Tests
// =============================================================================

#[test]
fn test_close_before_response_is_connection_error() {
    let server = MockServer::start(vec![Reply::Close]);
    let client = server.client();

    let err = client.get_block(0, 0, 0).unwrap_err();

    assert!(err.is_connection());
    assert!(err.to_string().contains("connection closed by server"));
    server.join();
}

#[test]
fn test_partial_line_then_close_is_connection_error() {
    let server = MockServer::start(vec![Reply::Raw(b"{\"success\": tr".to_vec())]);
    let client = server.client();

    let err = client.get_block(0, 0, 0).unwrap_err();

    assert!(matches!(err, CraftError::Connection(ref m) if m.contains("closed by server")));
    server.join();
}

#[test]
fn test_silent_server_times_out() {
    let server = MockServer::start(vec![Reply::Silent(Duration::from_millis(1500))]);
    let config = ClientConfig::builder()
        .host("127.0.0.1")
        .port(server.port())
        .token(TEST_TOKEN)
        .timeout_ms(200)
        .build();
    let client = Client::new(config);

    let start = Instant::now();
    let err = client.get_block(0, 0, 0).unwrap_err();
    let elapsed = start.elapsed();

    assert!(err.is_connection(), "got {:?}", err);
    assert!(elapsed < Duration::from_millis(1200), "took {:?}", elapsed);
    server.join();
}

#[test]
fn test_unreachable_port_is_connection_error() {
    let port = closed_port();
    let client = Client::new(
        ClientConfig::builder()
            .host("127.0.0.1")
            .port(port)
            .token(TEST_TOKEN)
            .timeout_ms(500)
            .build(),
    );

    let start = Instant::now();
    let err = client.get_pos("Steve").unwrap_err();

    assert!(err.is_connection());
    assert!(err.to_string().contains(&format!("127.0.0.1:{}", port)));
    assert!(start.elapsed() < Duration::from_secs(2));
}

// =============================================================================
// Concurrency Tests
// =============================================================================

#[test]
fn test_concurrent_calls_use_separate_connections() {
    let replies = (0..4)
        .map(|_| Reply::Json(json!({ "success": true, "data": "minecraft:air" })))
        .collect();
    let server = MockServer::start(replies);
    let client = server.client();

    thread::scope(|s| {
        let handles: Vec<_> = (0..4)
            .map(|i| {
                let client = client.clone();
                s.spawn(move || client.get_block(i, 64, 0))
            })
            .collect();
        for handle in handles {
            assert_eq!(handle.join().unwrap().unwrap(), "minecraft:air");
        }
    });

    for _ in 0..4 {
        assert_eq!(server.next_request()["action"], "getblock");
    }
    server.join();
}
