//! Latest forecast for one place, published through a single-slot channel.
//!
//! `refresh` is the only writer. Readers either poll [`ForecastStore::latest`]
//! or await changes on a [`watch::Receiver`]. A failed refresh leaves the
//! published value untouched.

use std::sync::{
    Arc,
    atomic::{AtomicBool, Ordering},
};

use thiserror::Error;
use tokio::sync::watch;
use tracing::{info, warn};

use crate::{
    Coordinate, Forecast,
    decode::DecodeError,
    provider::{FetchError, ForecastProvider},
    summary::summarize_forecast,
};

#[derive(Debug, Error)]
pub enum RefreshError {
    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error("failed to decode forecast: {0}")]
    Decode(#[from] DecodeError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshOutcome {
    /// A new forecast was published.
    Updated,
    /// Another refresh was already running; nothing was fetched.
    AlreadyInFlight,
}

#[derive(Debug)]
pub struct ForecastStore {
    provider: Box<dyn ForecastProvider>,
    coordinate: Coordinate,
    location: String,
    latest: watch::Sender<Arc<Forecast>>,
    in_flight: AtomicBool,
}

impl ForecastStore {
    pub fn new(
        provider: Box<dyn ForecastProvider>,
        coordinate: Coordinate,
        location: impl Into<String>,
    ) -> Self {
        let (latest, _) = watch::channel(Arc::new(Forecast::default()));
        Self {
            provider,
            coordinate,
            location: location.into(),
            latest,
            in_flight: AtomicBool::new(false),
        }
    }

    pub fn latest(&self) -> Arc<Forecast> {
        Arc::clone(&self.latest.borrow())
    }

    pub fn subscribe(&self) -> watch::Receiver<Arc<Forecast>> {
        self.latest.subscribe()
    }

    /// Fetch, decode and summarize, then replace the published forecast.
    ///
    /// A call made while another refresh is running returns
    /// [`RefreshOutcome::AlreadyInFlight`] without touching the provider.
    pub async fn refresh(&self) -> Result<RefreshOutcome, RefreshError> {
        let Some(_guard) = InFlightGuard::acquire(&self.in_flight) else {
            warn!(location = %self.location, "refresh already in flight, skipping");
            return Ok(RefreshOutcome::AlreadyInFlight);
        };

        match self.load().await {
            Ok(forecast) => {
                info!(
                    location = %self.location,
                    days = forecast.week.len(),
                    temperature = forecast.current.temperature,
                    "published forecast"
                );
                self.latest.send_replace(Arc::new(forecast));
                Ok(RefreshOutcome::Updated)
            }
            Err(err) => {
                warn!(location = %self.location, error = %err, "refresh failed, keeping previous forecast");
                Err(err)
            }
        }
    }

    async fn load(&self) -> Result<Forecast, RefreshError> {
        let raw = self.provider.fetch(self.coordinate).await?;
        let snapshot = raw.decode()?;
        Ok(summarize_forecast(&snapshot, self.location.as_str()))
    }
}

struct InFlightGuard<'a>(&'a AtomicBool);

impl<'a> InFlightGuard<'a> {
    fn acquire(flag: &'a AtomicBool) -> Option<Self> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| Self(flag))
    }
}

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}
