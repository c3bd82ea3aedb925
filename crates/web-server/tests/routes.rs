use axum::body::{self, Body};
use axum::http::{Request, StatusCode};
use axum::Router;
use database::{MemoryStore, RecordRow};
use query::QueryService;
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceExt; // for `oneshot`
use web_server::{router, AppState, Methodology};

fn seeded_store() -> MemoryStore {
    MemoryStore::new()
        .with_country("SWE", "Sweden", Some("Europe"))
        .with_country("USA", "United States", Some("North America"))
        .with_record(RecordRow {
            gti: Some("70.5".to_string()),
            governance: Some("80".to_string()),
            confidence_tier: Some("A".to_string()),
            sources_used: Some(r#"{"governance": ["CPI", "WGI"]}"#.to_string()),
            ..RecordRow::new("SWE", 2022)
        })
        .with_record(RecordRow {
            gti: Some("69.0".to_string()),
            confidence_tier: Some("B".to_string()),
            sources_used: Some(r#"{"governance": ["CPI"]}"#.to_string()),
            ..RecordRow::new("SWE", 2021)
        })
}

fn app(store: MemoryStore) -> Router {
    let methodology = Methodology::from_document(json!({ "version": "0.3.0", "pillars": [] }), "0.1.0");
    let state = AppState::new(QueryService::new(Arc::new(store)), "0.1.0", methodology).unwrap();
    router(Arc::new(state), &["http://localhost:3000".to_string()])
}

async fn get(app: Router, uri: &str) -> (StatusCode, axum::http::HeaderMap, Value) {
    let response = app
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let headers = response.headers().clone();
    let bytes = body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, headers, value)
}

#[tokio::test]
async fn countries_returns_catalog_with_cache_headers() {
    let (status, headers, body) = get(app(seeded_store()), "/api/countries").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        headers["cache-control"],
        "s-maxage=86400, stale-while-revalidate=604800"
    );
    assert_eq!(headers["x-gti-version"], "0.1.0");

    assert_eq!(body.as_array().unwrap().len(), 2);
    assert_eq!(body[0]["iso3"], "SWE");
    assert_eq!(body[0]["latest_year"], 2022);
    assert_eq!(body[0]["latest_gti"], 70.5);
    assert_eq!(body[0]["confidence_tier"], "A");
    assert_eq!(body[1]["iso3"], "USA");
    assert!(body[1]["latest_year"].is_null());
    assert!(body[1]["latest_gti"].is_null());
}

#[tokio::test]
async fn score_reports_the_selected_pillar_as_gti() {
    let (status, _, body) = get(app(seeded_store()), "/api/score?year=2022&trust_type=proxy").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!([{ "iso3": "SWE", "year": 2022, "gti": 80.0, "confidence_tier": "A" }])
    );
}

#[tokio::test]
async fn score_defaults_to_core_and_latest_year() {
    let (status, _, body) = get(app(seeded_store()), "/api/score").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body[0]["year"], 2022);
    assert_eq!(body[0]["gti"], 70.5);
}

#[tokio::test]
async fn score_rejects_unknown_trust_type_and_bad_year() {
    let (status, _, body) = get(app(seeded_store()), "/api/score?trust_type=social").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("trust_type"));

    let (status, _, _) = get(app(seeded_store()), "/api/score?year=22").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn repeated_query_key_gets_a_json_error_body() {
    let (status, headers, body) =
        get(app(seeded_store()), "/api/score?trust_type=core&trust_type=proxy").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(headers["content-type"], "application/json");
    assert!(body["error"].as_str().unwrap().contains("trust_type"));

    let (status, _, body) = get(app(seeded_store()), "/api/country/SWE?from=2020&from=2021").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn catalog_and_snapshot_are_ordered_by_name() {
    let mut store = MemoryStore::new()
        .with_country("NLD", "Netherlands", None)
        .with_country("CHE", "Switzerland", None)
        .with_country("DEU", "Germany", None);
    for iso3 in ["NLD", "CHE", "DEU"] {
        store = store.with_record(RecordRow {
            gti: Some("60".to_string()),
            ..RecordRow::new(iso3, 2022)
        });
    }
    let app = app(store);

    let codes = |body: &Value| -> Vec<String> {
        body.as_array()
            .unwrap()
            .iter()
            .map(|e| e["iso3"].as_str().unwrap().to_string())
            .collect()
    };
    let (_, _, catalog) = get(app.clone(), "/api/countries").await;
    assert_eq!(codes(&catalog), vec!["DEU", "NLD", "CHE"]);
    let (_, _, snapshot) = get(app, "/api/score?year=2022").await;
    assert_eq!(codes(&snapshot), vec!["DEU", "NLD", "CHE"]);
}

#[tokio::test]
async fn bad_parameters_are_rejected_before_storage_is_touched() {
    // An unavailable store would answer 500 if it were queried.
    let (status, _, _) = get(app(MemoryStore::unavailable()), "/api/score?year=twenty").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _, _) = get(app(MemoryStore::unavailable()), "/api/country/SWE?from=20x1").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn country_detail_shape() {
    let (status, _, body) = get(app(seeded_store()), "/api/country/swe?from=2021&to=2022").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["iso3"], "SWE");
    assert_eq!(body["name"], "Sweden");
    assert_eq!(body["region"], "Europe");

    let series = body["series"].as_array().unwrap();
    assert_eq!(series.len(), 2);
    assert_eq!(series[0]["year"], 2022);
    assert_eq!(series[1]["year"], 2021);
    assert!(series[1]["governance"].is_null());
    assert!(series[0]["interpersonal"].is_null());
    assert!(series[0]["confidence_score"].is_null());

    assert_eq!(body["sources_used"], json!({ "governance": ["CPI", "WGI"] }));
}

#[tokio::test]
async fn unknown_country_is_404() {
    let (status, _, body) = get(app(seeded_store()), "/api/country/XYZ").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Country not found");
}

#[tokio::test]
async fn storage_failure_is_500_without_details() {
    let (status, _, body) = get(app(MemoryStore::unavailable()), "/api/countries").await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], "Internal server error");
}

#[tokio::test]
async fn malformed_stored_value_is_500() {
    let store = MemoryStore::new()
        .with_country("SWE", "Sweden", None)
        .with_record(RecordRow {
            gti: Some("not-a-number".to_string()),
            ..RecordRow::new("SWE", 2022)
        });
    let (status, _, _) = get(app(store), "/api/country/SWE").await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
}

#[tokio::test]
async fn methodology_carries_its_own_version() {
    let (status, headers, body) = get(app(seeded_store()), "/api/methodology").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(headers["x-gti-version"], "0.3.0");
    assert_eq!(body["version"], "0.3.0");
}

#[tokio::test]
async fn health_reports_ok() {
    let (status, _, body) = get(app(MemoryStore::unavailable()), "/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "status": "ok", "version": "0.1.0" }));
}
