use actix_web::{App, HttpServer, dev::ServerHandle};
use reqwest::Client;
use serde_json::json;
use std::net::TcpListener;
use tokio::time::{sleep, Duration};
use vecsearch::{server, VectorStore};

/// Find a free port by binding to port 0
fn free_port() -> u16 {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    listener.local_addr().unwrap().port()
}

/// Start a server over an empty store, return its base url and handle
async fn start_server() -> (String, ServerHandle) {
    let port = free_port();
    let state = server::app_state(VectorStore::new());

    let server = HttpServer::new(move || App::new().app_data(state.clone()).configure(server::config))
        .bind(format!("127.0.0.1:{}", port))
        .unwrap()
        .run();
    let handle = server.handle();
    tokio::spawn(server);
    sleep(Duration::from_millis(200)).await;

    (format!("http://127.0.0.1:{}", port), handle)
}

#[actix_web::test]
async fn test_insert_and_search() {
    let (base, handle) = start_server().await;
    let client = Client::new();

    // --- Insert 3 vectors ---
    let resp = client
        .post(format!("{}/insert", base))
        .json(&json!({
            "vectors": [
                {"id": "1", "values": [1.0, 0.1, 0.0], "metadata": "King"},
                {"id": "2", "values": [0.9, 0.2, 0.0], "metadata": "Queen"},
                {"id": "3", "values": [0.0, 0.8, 0.9], "metadata": "Apple"}
            ]
        }))
        .send()
        .await
        .unwrap();

    assert_eq!(resp.status(), 200);
    let body: serde_json::Value = resp.json().await.unwrap();
    assert_eq!(body["inserted"], 3);
    assert_eq!(body["count"], 3);

    // --- Search: "royalty" should rank King then Queen ---
    let resp = client
        .post(format!("{}/search", base))
        .json(&json!({
            "queries": [
                {"value": [0.95, 0.15, 0.0], "top_k": 2},
                {"value": [0.0, 0.8, 0.9], "top_k": 1}
            ]
        }))
        .send()
        .await
        .unwrap();

    assert_eq!(resp.status(), 200);
    let body: serde_json::Value = resp.json().await.unwrap();
    let matches = body["results"][0]["matches"].as_array().unwrap();
    assert_eq!(matches.len(), 2);
    assert_eq!(matches[0]["id"], "1");
    assert_eq!(matches[0]["metadata"], "King");
    assert_eq!(matches[1]["id"], "2");
    assert!(matches[0]["score"].as_f64().unwrap() > matches[1]["score"].as_f64().unwrap());

    // Values are returned as stored, not normalized
    let values = matches[0]["values"].as_array().unwrap();
    assert!((values[1].as_f64().unwrap() - 0.1).abs() < 1e-6);

    let matches = body["results"][1]["matches"].as_array().unwrap();
    assert_eq!(matches.len(), 1);
    assert_eq!(matches[0]["metadata"], "Apple");

    handle.stop(true).await;
}

#[actix_web::test]
async fn test_get_existing_and_missing() {
    let (base, handle) = start_server().await;
    let client = Client::new();

    // Insert one vector
    client
        .post(format!("{}/insert", base))
        .json(&json!({
            "vectors": [{"id": "v1", "values": [1.0, 0.0, 0.0], "metadata": "first"}]
        }))
        .send()
        .await
        .unwrap();

    // --- Get existing + missing ---
    let resp = client
        .post(format!("{}/get", base))
        .json(&json!({ "ids": ["v1", "v_missing"] }))
        .send()
        .await
        .unwrap();

    assert_eq!(resp.status(), 200);
    let body: serde_json::Value = resp.json().await.unwrap();
    let results = body["results"].as_array().unwrap();

    // v1 should have values
    assert_eq!(results[0]["id"], "v1");
    assert_eq!(results[0]["metadata"], "first");
    assert!(!results[0]["values"].is_null());

    // v_missing should have null values
    assert_eq!(results[1]["id"], "v_missing");
    assert!(results[1]["values"].is_null());
    assert!(results[1]["metadata"].is_null());

    handle.stop(true).await;
}

#[actix_web::test]
async fn test_insert_duplicate_id_appends() {
    let (base, handle) = start_server().await;
    let client = Client::new();

    for values in [[1.0, 0.0], [0.0, 1.0]] {
        let resp = client
            .post(format!("{}/insert", base))
            .json(&json!({
                "vectors": [{"id": "dup", "values": values, "metadata": ""}]
            }))
            .send()
            .await
            .unwrap();
        assert_eq!(resp.status(), 200);
    }

    // Both entries are kept, no upsert
    let resp = client.get(format!("{}/count", base)).send().await.unwrap();
    let body: serde_json::Value = resp.json().await.unwrap();
    assert_eq!(body["count"], 2);
    assert_eq!(body["dimension"], 2);

    // Search returns both, each exactly once
    let resp = client
        .post(format!("{}/search", base))
        .json(&json!({ "queries": [{"value": [0.0, 1.0], "top_k": 10}] }))
        .send()
        .await
        .unwrap();
    let body: serde_json::Value = resp.json().await.unwrap();
    let matches = body["results"][0]["matches"].as_array().unwrap();
    assert_eq!(matches.len(), 2);
    assert_eq!(matches[0]["values"][1], 1.0);

    handle.stop(true).await;
}

#[actix_web::test]
async fn test_search_empty_store() {
    let (base, handle) = start_server().await;
    let client = Client::new();

    let resp = client
        .post(format!("{}/search", base))
        .json(&json!({ "queries": [{"value": [1.0, 0.0], "top_k": 5}] }))
        .send()
        .await
        .unwrap();

    assert_eq!(resp.status(), 200);
    let body: serde_json::Value = resp.json().await.unwrap();
    let group = &body["results"][0];
    assert!(group["matches"].as_array().unwrap().is_empty());

    let resp = client.get(format!("{}/count", base)).send().await.unwrap();
    let body: serde_json::Value = resp.json().await.unwrap();
    assert_eq!(body["count"], 0);
    assert!(body["dimension"].is_null());

    handle.stop(true).await;
}

#[actix_web::test]
async fn test_negative_top_k_rejected() {
    let (base, handle) = start_server().await;
    let client = Client::new();

    let resp = client
        .post(format!("{}/search", base))
        .json(&json!({ "queries": [{"value": [1.0, 0.0], "top_k": -1}] }))
        .send()
        .await
        .unwrap();

    assert_eq!(resp.status(), 400);
    let body: serde_json::Value = resp.json().await.unwrap();
    assert!(body["error"].is_string());

    handle.stop(true).await;
}

#[actix_web::test]
async fn test_malformed_insert_rejected() {
    let (base, handle) = start_server().await;
    let client = Client::new();

    // metadata is required
    let resp = client
        .post(format!("{}/insert", base))
        .json(&json!({ "vectors": [{"id": "x", "values": [1.0]}] }))
        .send()
        .await
        .unwrap();

    assert_eq!(resp.status(), 400);

    let resp = client.get(format!("{}/count", base)).send().await.unwrap();
    let body: serde_json::Value = resp.json().await.unwrap();
    assert_eq!(body["count"], 0);

    handle.stop(true).await;
}
