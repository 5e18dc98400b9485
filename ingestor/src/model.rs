use chrono::{DateTime, Utc};
use serde::Serialize;

/// One persisted temperature/humidity observation, as served by the query
/// endpoints. The sequence id stays internal to the store.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct Reading {
    pub timestamp: DateTime<Utc>,
    pub temperature: f64,
    pub humidity: f64,
}

/// Acknowledgment returned for a stored submission.
#[derive(Debug, Serialize)]
pub struct Ack {
    pub status: &'static str,
}

/// Error body returned for failed requests.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
}
