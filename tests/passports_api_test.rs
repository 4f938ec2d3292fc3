//! Passport Adapter Tests - HTTP Status Mapping and Envelope Parsing
//!
//! Runs the TalentPassports adapter against a local axum server with
//! canned responses: 404 → None, 500 → upstream error, envelope
//! decoding, and keyword percent-encoding on the wire.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use serde_json::json;

use talent_gate::adapters::api::{TalentClient, TalentClientConfig, TalentPassports};
use talent_gate::domain::error::SearchError;
use talent_gate::ports::passport_api::PassportApi;

#[derive(Clone, Default)]
struct Recorded {
    keywords: Arc<Mutex<Vec<Option<String>>>>,
}

async fn passports(
    State(recorded): State<Recorded>,
    Query(params): Query<HashMap<String, String>>,
) -> impl IntoResponse {
    recorded
        .keywords
        .lock()
        .unwrap()
        .push(params.get("keyword").cloned());

    if params.get("page").map(String::as_str) == Some("9") {
        return (StatusCode::INTERNAL_SERVER_ERROR, "boom".to_string()).into_response();
    }

    Json(json!({
        "passports": [{
            "passport_id": 7,
            "passport_profile": { "name": "builder7" },
            "score": 55.0
        }]
    }))
    .into_response()
}

async fn passport(Path(id): Path<String>) -> impl IntoResponse {
    match id.as_str() {
        "42" => Json(json!({ "passport": { "passport_id": 42, "score": 88.0 } })).into_response(),
        "boom" => (StatusCode::INTERNAL_SERVER_ERROR, "boom".to_string()).into_response(),
        _ => StatusCode::NOT_FOUND.into_response(),
    }
}

/// Bind a throwaway local server and return an adapter pointed at it.
async fn serve() -> (Recorded, TalentPassports) {
    let recorded = Recorded::default();
    let app = Router::new()
        .route("/passports", get(passports))
        .route("/passports/:id", get(passport))
        .with_state(recorded.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    let client = TalentClient::new(TalentClientConfig {
        base_url: format!("http://{addr}"),
        api_key: "test-key".to_string(),
        timeout: Duration::from_secs(5),
    })
    .unwrap();

    (recorded, TalentPassports::new(Arc::new(client)))
}

#[tokio::test]
async fn fetch_page_decodes_the_envelope() {
    let (_recorded, api) = serve().await;

    let records = api.fetch_page(None, 1).await.unwrap();

    assert_eq!(records.len(), 1);
    assert_eq!(records[0].passport_id, Some(7));
    assert_eq!(records[0].score, Some(55.0));
}

#[tokio::test]
async fn fetch_page_maps_non_2xx_to_upstream_error() {
    let (_recorded, api) = serve().await;

    let err = api.fetch_page(None, 9).await.unwrap_err();

    assert!(
        matches!(err, SearchError::Upstream { status: 500, ref body } if body == "boom"),
        "{err}"
    );
}

#[tokio::test]
async fn fetch_passport_maps_404_to_none_and_500_to_error() {
    let (_recorded, api) = serve().await;

    let found = api.fetch_passport("42").await.unwrap().unwrap();
    assert_eq!(found.passport_id, Some(42));

    assert!(api.fetch_passport("7").await.unwrap().is_none());

    let err = api.fetch_passport("boom").await.unwrap_err();
    assert!(matches!(err, SearchError::Upstream { status: 500, .. }));
}

#[tokio::test]
async fn keyword_is_percent_encoded_on_the_wire() {
    let (recorded, api) = serve().await;

    // Unencoded, the '&' would split the keyword into a stray query
    // parameter and the server would only see "a".
    api.fetch_page(Some("a&b=c"), 1).await.unwrap();
    api.fetch_page(Some("new york"), 2).await.unwrap();

    let keywords = recorded.keywords.lock().unwrap().clone();
    assert_eq!(
        keywords,
        vec![Some("a&b=c".to_string()), Some("new york".to_string())]
    );
}
