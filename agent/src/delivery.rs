use crate::sensor::Sample;
use serde::Serialize;
use std::time::Duration;
use thiserror::Error;
use tracing::debug;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Submission body for the ingestion service.
#[derive(Debug, Serialize)]
struct SubmitBody {
    temp: f64,
    humidity: f64,
}

#[derive(Debug, Error)]
pub enum DeliveryError {
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("server rejected reading: {0}")]
    Rejected(reqwest::StatusCode),
}

/// Best-effort reading submission. The caller logs a failed send and drops
/// the reading; there is no retry and no local queue.
pub struct Delivery {
    client: reqwest::Client,
    url: String,
}

impl Delivery {
    pub fn new(url: &str) -> Result<Self, DeliveryError> {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()?;

        Ok(Self {
            client,
            url: url.to_string(),
        })
    }

    /// Submits one reading. The server assigns the timestamp, so the body
    /// carries only the measured pair.
    pub async fn send(&self, sample: &Sample) -> Result<(), DeliveryError> {
        let body = SubmitBody {
            temp: sample.temperature,
            humidity: sample.humidity,
        };

        let response = self.client.post(&self.url).json(&body).send().await?;
        if !response.status().is_success() {
            return Err(DeliveryError::Rejected(response.status()));
        }

        debug!("POST response: {}", response.status());
        Ok(())
    }
}
