use async_trait::async_trait;
use reqwest::{Client, Request};
use serde::Deserialize;
use serde_json::Value;
use std::{collections::HashMap, time::Duration};
use tracing::debug;

use crate::{
    Coordinate,
    raw::{self, Group, RawForecastResponse, RawVariable, RawVariablesWithTime, VariableLayout},
};

use super::{FetchError, ForecastProvider, truncate_body};

pub const DEFAULT_BASE_URL: &str = "https://api.open-meteo.com";

/// Largest drift tolerated between a daily timestamp and its grid slot.
/// Local midnights move by one hour across a DST change.
const DAILY_GRID_DRIFT_SECS: u64 = 3_600;

/// Open-Meteo forecast endpoint.
///
/// The JSON rendering is requested and reshaped into the positional
/// [`RawForecastResponse`] form, with variables ordered by the same layouts
/// that built the query.
#[derive(Debug, Clone)]
pub struct OpenMeteoProvider {
    base_url: String,
    http: Client,
}

impl OpenMeteoProvider {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, FetchError> {
        let http = Client::builder().timeout(timeout).build()?;
        Ok(Self { base_url: base_url.into(), http })
    }

    pub fn forecast_url(&self) -> String {
        format!("{}/v1/forecast", self.base_url.trim_end_matches('/'))
    }

    pub fn request(&self, coordinate: Coordinate) -> Result<Request, FetchError> {
        let request = self.http.get(self.forecast_url()).query(&query_params(coordinate)).build()?;
        Ok(request)
    }
}

/// Query parameters of a forecast request, in wire order.
pub fn query_params(coordinate: Coordinate) -> Vec<(&'static str, String)> {
    vec![
        ("latitude", coordinate.latitude.to_string()),
        ("longitude", coordinate.longitude.to_string()),
        (raw::CURRENT.group.as_str(), raw::CURRENT.query_value()),
        (raw::HOURLY.group.as_str(), raw::HOURLY.query_value()),
        (raw::DAILY.group.as_str(), raw::DAILY.query_value()),
        ("timezone", "auto".to_string()),
        ("timeformat", "unixtime".to_string()),
        ("format", "json".to_string()),
    ]
}

#[derive(Debug, Deserialize)]
struct OmResponse {
    #[serde(default)]
    utc_offset_seconds: i32,
    current: Option<OmCurrent>,
    hourly: Option<OmSeries>,
    daily: Option<OmSeries>,
}

#[derive(Debug, Deserialize)]
struct OmCurrent {
    time: i64,
    interval: Option<i32>,
    #[serde(flatten)]
    variables: HashMap<String, Value>,
}

#[derive(Debug, Deserialize)]
struct OmSeries {
    time: Vec<i64>,
    #[serde(flatten)]
    variables: HashMap<String, Value>,
}

impl OmResponse {
    fn into_raw(self) -> Result<RawForecastResponse, FetchError> {
        Ok(RawForecastResponse {
            utc_offset_seconds: self.utc_offset_seconds,
            current: self.current.map(|c| c.into_raw(&raw::CURRENT)).transpose()?,
            hourly: self.hourly.map(|s| s.into_raw(&raw::HOURLY)).transpose()?,
            daily: self.daily.map(|s| s.into_raw(&raw::DAILY)).transpose()?,
        })
    }
}

impl OmCurrent {
    // Variables absent from the payload are skipped; the decoder reports them.
    fn into_raw<const N: usize>(
        mut self,
        layout: &VariableLayout<N>,
    ) -> Result<RawVariablesWithTime, FetchError> {
        let interval = self.interval.unwrap_or_else(|| layout.group.nominal_interval());

        let mut variables = Vec::with_capacity(N);
        for name in layout.names {
            if let Some(value) = self.variables.remove(name) {
                variables.push(RawVariable::scalar(name, number(layout.group, name, &value)?));
            }
        }

        let time_end = self.time.checked_add(i64::from(interval)).ok_or_else(|| {
            FetchError::Malformed(format!("{} time {} is out of range", layout.group, self.time))
        })?;

        Ok(RawVariablesWithTime {
            time: self.time,
            time_end,
            interval,
            variables,
        })
    }
}

impl OmSeries {
    fn into_raw<const N: usize>(
        mut self,
        layout: &VariableLayout<N>,
    ) -> Result<RawVariablesWithTime, FetchError> {
        let group = layout.group;
        let interval = group.nominal_interval();
        let start = self.time.first().copied().unwrap_or_default();
        check_grid(group, &self.time, start, interval)?;

        let mut variables = Vec::with_capacity(N);
        for name in layout.names {
            if let Some(value) = self.variables.remove(name) {
                variables.push(RawVariable::series(name, numbers(group, name, value)?));
            }
        }

        let time_end = grid_slot(start, self.time.len(), interval).ok_or_else(|| {
            FetchError::Malformed(format!("{group} time range starting at {start} overflows"))
        })?;

        Ok(RawVariablesWithTime {
            time: start,
            time_end,
            interval,
            variables,
        })
    }
}

/// `start + slot * interval`, or `None` on overflow.
fn grid_slot(start: i64, slot: usize, interval: i32) -> Option<i64> {
    i64::try_from(slot)
        .ok()
        .and_then(|slot| slot.checked_mul(i64::from(interval)))
        .and_then(|offset| start.checked_add(offset))
}

/// Hourly epochs are UTC and must sit exactly on the grid.
fn grid_tolerance(group: Group) -> u64 {
    match group {
        Group::Daily => DAILY_GRID_DRIFT_SECS,
        Group::Current | Group::Hourly => 0,
    }
}

fn check_grid(group: Group, times: &[i64], start: i64, interval: i32) -> Result<(), FetchError> {
    let tolerance = grid_tolerance(group);
    for (slot, &ts) in times.iter().enumerate() {
        let on_grid = grid_slot(start, slot, interval)
            .is_some_and(|expected| ts.abs_diff(expected) <= tolerance);
        if !on_grid {
            return Err(FetchError::Malformed(format!(
                "{group} timestamp {ts} at index {slot} is off the {interval}s grid"
            )));
        }
    }
    Ok(())
}

// Open-Meteo reports missing samples as null.
fn number(group: Group, name: &str, value: &Value) -> Result<f32, FetchError> {
    match value {
        Value::Null => Ok(f32::NAN),
        Value::Number(n) => n.as_f64().map(|v| v as f32).ok_or_else(|| {
            FetchError::Malformed(format!("{group} variable `{name}` is not a finite number"))
        }),
        other => Err(FetchError::Malformed(format!(
            "{group} variable `{name}` has non-numeric value {other}"
        ))),
    }
}

fn numbers(group: Group, name: &str, value: Value) -> Result<Vec<f32>, FetchError> {
    match value {
        Value::Array(items) => items.iter().map(|item| number(group, name, item)).collect(),
        other => Err(FetchError::Malformed(format!(
            "{group} variable `{name}` is not an array: {other}"
        ))),
    }
}

#[async_trait]
impl ForecastProvider for OpenMeteoProvider {
    async fn fetch(&self, coordinate: Coordinate) -> Result<RawForecastResponse, FetchError> {
        let request = self.request(coordinate)?;
        debug!(url = %request.url(), "requesting Open-Meteo forecast");

        let res = self.http.execute(request).await?;

        let status = res.status();
        let body = res.text().await?;

        if !status.is_success() {
            return Err(FetchError::Status { status: status.as_u16(), body: truncate_body(&body) });
        }

        let parsed: OmResponse = serde_json::from_str(&body)?;
        let raw = parsed.into_raw()?;

        debug!(utc_offset_seconds = raw.utc_offset_seconds, "received Open-Meteo forecast");
        Ok(raw)
    }
}
