//! Integration tests for the live sensor stream.
//!
//! These run a real server on a loopback port and talk to it over a
//! WebSocket client.

mod common;

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use common::{create_test_app_with_store, test_config, TestStore};
use futures_util::{SinkExt, StreamExt};
use persistence::VitalsStore;
use serde_json::Value;
use tokio::net::TcpStream;
use tokio::time::{sleep, timeout, Instant};
use tokio_tungstenite::{connect_async, tungstenite::Message, MaybeTlsStream, WebSocketStream};
use vital_monitor_api::config::Config;

type Client = WebSocketStream<MaybeTlsStream<TcpStream>>;

/// Sensor periods a tenth of the defaults.
fn fast_config() -> Config {
    let mut config = test_config();
    config.stream.heart_rate_interval_ms = 100;
    config.stream.gps_interval_ms = 200;
    config.stream.accelerometer_interval_ms = 10;
    config.stream.ecg_interval_ms = 5;
    config
}

async fn start_server(config: Config) -> (SocketAddr, Arc<TestStore>) {
    let (app, store) = create_test_app_with_store(config);
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    (addr, store)
}

async fn connect(addr: SocketAddr) -> Client {
    let (client, _) = connect_async(format!("ws://{}/ws", addr)).await.unwrap();
    client
}

async fn next_json(client: &mut Client) -> Value {
    loop {
        let frame = timeout(Duration::from_secs(5), client.next())
            .await
            .expect("no frame within 5s")
            .expect("stream ended")
            .unwrap();
        if let Message::Text(text) = frame {
            return serde_json::from_str(&text).unwrap();
        }
    }
}

/// Reads frames until one of the given types arrives.
async fn next_of(client: &mut Client, kinds: &[&str]) -> Value {
    loop {
        let frame = next_json(client).await;
        if kinds.iter().any(|k| frame["type"] == *k) {
            return frame;
        }
    }
}

async fn demo_heart_rate_count(store: &TestStore, patient_id: uuid::Uuid) -> usize {
    store
        .get_heart_rate_readings(patient_id, 10_000)
        .await
        .unwrap()
        .len()
}

#[tokio::test]
async fn test_session_announces_then_streams_all_sensors() {
    let (addr, store) = start_server(fast_config()).await;
    let mut client = connect(addr).await;

    let first = next_json(&mut client).await;
    assert_eq!(first["type"], "connected");
    assert_eq!(first["message"], "All sensors connected");

    let mut counts: HashMap<String, usize> = HashMap::new();
    let deadline = Instant::now() + Duration::from_millis(650);
    while Instant::now() < deadline {
        let frame = next_json(&mut client).await;
        let kind = frame["type"].as_str().unwrap().to_string();
        *counts.entry(kind).or_default() += 1;
    }

    let count = |kind: &str| counts.get(kind).copied().unwrap_or(0);
    assert!(count("heartRate") >= 3, "counts: {counts:?}");
    assert!(count("gps") >= 1, "counts: {counts:?}");
    assert!(count("accelerometer") > count("heartRate"), "counts: {counts:?}");
    assert!(count("ecg") > count("heartRate"), "counts: {counts:?}");
    assert_eq!(count("connected"), 0);

    let created = store.created_patients();
    assert_eq!(created.len(), 1);
    let patient = store.get_patient(created[0]).await.unwrap().unwrap();
    assert_eq!(patient.name, "Demo Patient");
    assert_eq!(patient.age, 35);

    client.close(None).await.unwrap();
}

#[tokio::test]
async fn test_commands_are_answered_over_the_socket() {
    let (addr, _store) = start_server(fast_config()).await;
    let mut client = connect(addr).await;
    assert_eq!(next_json(&mut client).await["type"], "connected");

    client
        .send(Message::Text(r#"{"command":"startMonitoring"}"#.into()))
        .await
        .unwrap();
    let reply = next_of(&mut client, &["status", "error"]).await;
    assert_eq!(reply["type"], "status");
    assert_eq!(reply["message"], "Monitoring started");

    client
        .send(Message::Text(r#"{"command":"reboot"}"#.into()))
        .await
        .unwrap();
    let reply = next_of(&mut client, &["status", "error"]).await;
    assert_eq!(reply["type"], "error");
    assert_eq!(reply["message"], "Unknown command");

    // Neither of these gets a reply, so the next one seen is for stop.
    client.send(Message::Text("hello".into())).await.unwrap();
    client.send(Message::Text("null".into())).await.unwrap();
    client
        .send(Message::Text(r#"{"command":"stopMonitoring"}"#.into()))
        .await
        .unwrap();
    let reply = next_of(&mut client, &["status", "error"]).await;
    assert_eq!(reply["type"], "status");
    assert_eq!(reply["message"], "Monitoring stopped");

    // Producers keep running after stop.
    assert_eq!(next_of(&mut client, &["heartRate"]).await["type"], "heartRate");

    client.close(None).await.unwrap();
}

#[tokio::test]
async fn test_streamed_heart_rate_is_persisted_until_close() {
    let (addr, store) = start_server(fast_config()).await;
    let mut client = connect(addr).await;
    assert_eq!(next_json(&mut client).await["type"], "connected");

    let sent = next_of(&mut client, &["heartRate"]).await;
    next_of(&mut client, &["heartRate"]).await;

    let patient_id = store.created_patients()[0];
    let stored = store
        .get_heart_rate_readings(patient_id, 10_000)
        .await
        .unwrap();
    assert!(!stored.is_empty());
    assert_eq!(
        stored.last().unwrap().heart_rate,
        sent["heartRate"].as_i64().unwrap() as i32
    );

    client.close(None).await.unwrap();
    sleep(Duration::from_millis(300)).await;
    let after_close = demo_heart_rate_count(&store, patient_id).await;

    sleep(Duration::from_millis(600)).await;
    assert_eq!(demo_heart_rate_count(&store, patient_id).await, after_close);
}
