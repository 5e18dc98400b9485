use crate::db;
use crate::errors::Error;
use crate::metrics::{
    DB_FAILURES_TOTAL, INGEST_LATENCY_SECONDS, INVALID_PAYLOADS_TOTAL, READINGS_STORED_TOTAL,
    SUBMISSIONS_TOTAL,
};
use crate::model::{Ack, ErrorBody, Reading};
use crate::validate::parse_submission;
use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use chrono::Utc;
use serde::Deserialize;
use serde_json::Value;
use sqlx::SqlitePool;
use std::time::Instant;
use tracing::{debug, error};

const DEFAULT_HISTORY_LIMIT: i64 = 100;
const MAX_HISTORY_LIMIT: i64 = 1000;

#[derive(Debug, Clone)]
struct AppState {
    pool: SqlitePool,
}

#[derive(Debug, Deserialize)]
pub struct HistoryQuery {
    limit: Option<String>,
}

pub fn create_router(pool: SqlitePool) -> Router {
    let state = AppState { pool };

    Router::new()
        .route("/api/reading", post(submit_reading))
        .route("/api/latest", get(latest_reading))
        .route("/api/history", get(history))
        .with_state(state)
}

async fn submit_reading(
    State(state): State<AppState>,
    Json(body): Json<Value>,
) -> Result<Json<Ack>, ApiError> {
    SUBMISSIONS_TOTAL.inc();

    let submission = parse_submission(&body)?;

    // The device clock is untrusted; receipt time is the record's timestamp.
    let timestamp = Utc::now();

    let start = Instant::now();
    let id = db::insert_reading(
        &state.pool,
        timestamp,
        submission.temperature,
        submission.humidity,
    )
    .await?;
    INGEST_LATENCY_SECONDS.observe(start.elapsed().as_secs_f64());
    READINGS_STORED_TOTAL.inc();

    debug!(
        "Stored reading {} ({} C, {} %)",
        id, submission.temperature, submission.humidity
    );

    Ok(Json(Ack { status: "ok" }))
}

async fn latest_reading(State(state): State<AppState>) -> Result<Json<Reading>, ApiError> {
    let reading = db::latest_reading(&state.pool).await?.ok_or(Error::NoData)?;

    Ok(Json(reading))
}

async fn history(
    State(state): State<AppState>,
    Query(params): Query<HistoryQuery>,
) -> Result<Json<Vec<Reading>>, ApiError> {
    let limit = effective_limit(params.limit.as_deref());
    let readings = db::recent_readings(&state.pool, limit).await?;

    Ok(Json(readings))
}

/// `limit` arrives as an untrusted string. Anything that does not parse as a
/// positive integer falls back to the default rather than failing the
/// request, and the result is capped to bound one response.
fn effective_limit(raw: Option<&str>) -> i64 {
    raw.and_then(|s| s.parse::<i64>().ok())
        .filter(|n| *n > 0)
        .unwrap_or(DEFAULT_HISTORY_LIMIT)
        .min(MAX_HISTORY_LIMIT)
}

#[derive(Debug)]
struct ApiError(Error);

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self.0 {
            Error::InvalidPayload(reason) => {
                INVALID_PAYLOADS_TOTAL.inc();
                (StatusCode::BAD_REQUEST, reason)
            }
            Error::NoData => (StatusCode::NOT_FOUND, "No data".to_string()),
            Error::Database(e) => {
                DB_FAILURES_TOTAL.inc();
                error!("Database error: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Database error".to_string(),
                )
            }
        };

        (status, Json(ErrorBody { error: message })).into_response()
    }
}

impl<E> From<E> for ApiError
where
    E: Into<Error>,
{
    fn from(err: E) -> Self {
        Self(err.into())
    }
}
