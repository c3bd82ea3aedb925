use crate::{error::AppError, AppState};
use axum::{
    extract::{rejection::QueryRejection, Path, Query, State},
    http::{header, HeaderName, HeaderValue},
    response::{IntoResponse, Response},
    Json,
};
use core_types::{DetailQuery, SnapshotQuery};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::sync::Arc;

/// Shared caches may keep a response for a day.
const CACHE_POLICY: &str = "s-maxage=86400, stale-while-revalidate=604800";
const X_GTI_VERSION: &str = "x-gti-version";

// Parameters stay strings here; `core_types::params` decides what is valid.
// A query string that does not even deserialize (a repeated key, say) is
// taken as a `Result` so it still gets the JSON error body.

#[derive(Debug, Deserialize)]
pub struct ScoreParams {
    pub year: Option<String>,
    pub trust_type: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct RangeParams {
    pub from: Option<String>,
    pub to: Option<String>,
}

fn cached_json<T: Serialize>(version: &HeaderValue, body: T) -> Response {
    (
        [
            (header::CACHE_CONTROL, HeaderValue::from_static(CACHE_POLICY)),
            (HeaderName::from_static(X_GTI_VERSION), version.clone()),
        ],
        Json(body),
    )
        .into_response()
}

/// # GET /health
pub async fn health(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let version = state.api_version.to_str().unwrap_or_default().to_string();
    Json(json!({ "status": "ok", "version": version }))
}

/// # GET /api/countries
pub async fn get_countries(State(state): State<Arc<AppState>>) -> Result<Response, AppError> {
    let countries = state.service.catalog().await?;
    Ok(cached_json(&state.api_version, countries))
}

/// # GET /api/score?year=YYYY&trust_type=core
pub async fn get_scores(
    State(state): State<Arc<AppState>>,
    params: Result<Query<ScoreParams>, QueryRejection>,
) -> Result<Response, AppError> {
    let Query(params) = params?;
    let query = SnapshotQuery::parse(params.year.as_deref(), params.trust_type.as_deref())?;
    let scores = state.service.snapshot(query).await?;
    Ok(cached_json(&state.api_version, scores))
}

/// # GET /api/country/:iso3?from=YYYY&to=YYYY
pub async fn get_country(
    Path(iso3): Path<String>,
    State(state): State<Arc<AppState>>,
    params: Result<Query<RangeParams>, QueryRejection>,
) -> Result<Response, AppError> {
    let Query(params) = params?;
    let query = DetailQuery::parse(&iso3, params.from.as_deref(), params.to.as_deref())?;
    let detail = state.service.detail(&query).await?;
    Ok(cached_json(&state.api_version, detail))
}

/// # GET /api/methodology
pub async fn get_methodology(State(state): State<Arc<AppState>>) -> Response {
    cached_json(&state.methodology.version, &state.methodology.document)
}
