use crate::{Config, Coordinate, RawForecastResponse, provider::openmeteo::OpenMeteoProvider};
use async_trait::async_trait;
use std::fmt::Debug;
use thiserror::Error;

pub mod openmeteo;

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("forecast request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("forecast request failed with status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("failed to parse forecast JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("malformed forecast response: {0}")]
    Malformed(String),
}

/// Source of raw forecast payloads for a coordinate.
#[async_trait]
pub trait ForecastProvider: Send + Sync + Debug {
    async fn fetch(&self, coordinate: Coordinate) -> Result<RawForecastResponse, FetchError>;
}

/// Construct the forecast provider described by `config`.
pub fn provider_from_config(config: &Config) -> anyhow::Result<Box<dyn ForecastProvider>> {
    config.validate()?;
    let provider = OpenMeteoProvider::new(config.base_url.clone(), config.timeout())?;
    Ok(Box::new(provider))
}

pub(crate) fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    if body.len() <= MAX {
        return body.to_string();
    }

    let mut end = MAX;
    while !body.is_char_boundary(end) {
        end -= 1;
    }
    format!("{}...", &body[..end])
}
