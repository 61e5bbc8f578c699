use async_trait::async_trait;
use std::fmt::Debug;
use thiserror::Error;

use crate::model::WeatherObservation;

pub mod openweather;

/// Why a fetch failed. The survey loop never distinguishes variants;
/// every failure takes the same skip-and-log path. The variants exist
/// so diagnostics carry a useful message, nothing more.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("request failed with status {status}: {body}")]
    Status {
        status: reqwest::StatusCode,
        body: String,
    },

    #[error("response missing expected fields: {0}")]
    Response(#[from] serde_json::Error),
}

/// Seam between the survey loop and the weather API, so tests can run
/// the pipeline against a stub.
#[async_trait]
pub trait WeatherProvider: Send + Sync + Debug {
    async fn current_by_city(&self, city: &str) -> Result<WeatherObservation, FetchError>;
}
