//! HTTP surface tests against a live in-process server.
//!
//! The pool is constructed lazily, so endpoints that never touch the
//! database (health, station lookup, request validation) run without one.

use public_safety_service::{
    config::Config, routes, services::encryption::EncryptionService, state::AppState,
    websocket::ConnectionRegistry,
};
use sqlx::postgres::PgPoolOptions;
use std::net::SocketAddr;
use std::sync::Arc;

async fn start_test_server() -> SocketAddr {
    let db = PgPoolOptions::new()
        .connect_lazy("postgres://postgres@127.0.0.1/unreachable")
        .expect("parse lazy pool url");

    let config = Arc::new(Config {
        database_url: "postgres://postgres@127.0.0.1/unreachable".into(),
        port: 0,
        encryption_master_key: [0u8; 32],
    });

    let state = AppState {
        db,
        registry: ConnectionRegistry::new(),
        config,
        encryption: Arc::new(EncryptionService::new([0u8; 32])),
    };

    let app = routes::build_router().with_state(state);
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind to random port");
    let addr = listener.local_addr().expect("get local addr");
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("serve");
    });
    addr
}

#[tokio::test]
async fn health_endpoint_responds_ok() {
    let addr = start_test_server().await;
    let response = reqwest::get(format!("http://{addr}/health")).await.unwrap();
    assert_eq!(response.status(), 200);
    assert_eq!(response.text().await.unwrap(), "OK");
}

#[tokio::test]
async fn nearest_station_lookup_returns_the_closest_station() {
    let addr = start_test_server().await;
    let response = reqwest::get(format!(
        "http://{addr}/api/police-stations/nearest?latitude=43.25&longitude=76.95"
    ))
    .await
    .unwrap();
    assert_eq!(response.status(), 200);

    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["station"]["id"], 2);
    assert!(body["distance_km"].as_f64().unwrap() < 5.0);
}

#[tokio::test]
async fn nearest_station_rejects_out_of_range_coordinates() {
    let addr = start_test_server().await;
    let response = reqwest::get(format!(
        "http://{addr}/api/police-stations/nearest?latitude=123.0&longitude=76.95"
    ))
    .await
    .unwrap();
    assert_eq!(response.status(), 400);

    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["code"], "INVALID_REQUEST");
}

#[tokio::test]
async fn nearest_station_requires_both_coordinates() {
    let addr = start_test_server().await;
    let response = reqwest::get(format!("http://{addr}/api/police-stations/nearest"))
        .await
        .unwrap();
    assert_eq!(response.status(), 400);
}

#[tokio::test]
async fn incident_creation_validates_required_fields() {
    let addr = start_test_server().await;
    let client = reqwest::Client::new();
    let response = client
        .post(format!("http://{addr}/api/incidents"))
        .json(&serde_json::json!({
            "sender": "",
            "subject": "noise complaint",
            "excerpt": "loud music all night"
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 400);

    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["code"], "INVALID_REQUEST");
}
