//! Raw provider payload to [`ForecastSnapshot`].
//!
//! Variables are read at the index the request layout gave them, and the
//! variable found there must carry the expected name. A payload whose order
//! drifted from the request fails instead of being misread.

use chrono::{DateTime, NaiveDateTime};
use thiserror::Error;
use tracing::debug;

use crate::model::{CurrentConditions, DailySeries, ForecastSnapshot, HourlySeries};
use crate::raw::{self, Group, RawForecastResponse, RawVariable, RawVariablesWithTime, VariableLayout};

#[derive(Debug, Clone, PartialEq, Error)]
pub enum DecodeError {
    #[error("forecast response has no `{0}` group")]
    MissingGroup(Group),

    #[error("`{group}` group has no variable `{name}` at index {index}")]
    MissingVariable { group: Group, name: &'static str, index: usize },

    #[error("`{group}` group variable at index {index} is `{found}`, expected `{expected}`")]
    VariableMismatch { group: Group, index: usize, expected: &'static str, found: String },

    #[error("`{group}` group has an invalid time range: {reason}")]
    InvalidTimeRange { group: Group, reason: String },

    #[error("`{group}` group variable `{name}` has {found} values, expected {expected}")]
    LengthMismatch { group: Group, name: &'static str, expected: usize, found: usize },
}

impl RawForecastResponse {
    /// Decode using the response's own UTC offset.
    pub fn decode(&self) -> Result<ForecastSnapshot, DecodeError> {
        decode(self, self.utc_offset_seconds)
    }
}

/// Decode a raw response, shifting every timestamp by `utc_offset_seconds`.
pub fn decode(
    raw: &RawForecastResponse,
    utc_offset_seconds: i32,
) -> Result<ForecastSnapshot, DecodeError> {
    let current = decode_current(raw, utc_offset_seconds)?;
    let hourly = decode_hourly(raw, utc_offset_seconds)?;
    let daily = decode_daily(raw, utc_offset_seconds)?;

    debug!(
        utc_offset_seconds,
        hours = hourly.time.len(),
        days = daily.time.len(),
        "decoded forecast response"
    );

    Ok(ForecastSnapshot { current, hourly, daily })
}

fn decode_current(
    raw: &RawForecastResponse,
    offset: i32,
) -> Result<CurrentConditions, DecodeError> {
    let group = require_group(raw, Group::Current)?;
    let [temperature, weather_code] = resolve(group, &raw::CURRENT)?;

    Ok(CurrentConditions {
        time: local_time(Group::Current, group.time, offset)?,
        temperature: temperature.value,
        weather_code: weather_code.value,
    })
}

fn decode_hourly(raw: &RawForecastResponse, offset: i32) -> Result<HourlySeries, DecodeError> {
    let group = require_group(raw, Group::Hourly)?;
    let variables = resolve(group, &raw::HOURLY)?;
    let slots = series_len(Group::Hourly, group)?;
    check_lengths(&raw::HOURLY, &variables, slots)?;
    let time = series_times(Group::Hourly, group, offset)?;

    let [temperature, precipitation] = variables;
    Ok(HourlySeries {
        time,
        temperature: temperature.values.clone(),
        precipitation: precipitation.values.clone(),
    })
}

fn decode_daily(raw: &RawForecastResponse, offset: i32) -> Result<DailySeries, DecodeError> {
    let group = require_group(raw, Group::Daily)?;
    let variables = resolve(group, &raw::DAILY)?;
    let slots = series_len(Group::Daily, group)?;
    check_lengths(&raw::DAILY, &variables, slots)?;
    let time = series_times(Group::Daily, group, offset)?;

    let [temperature_max, temperature_min, weather_code] = variables;
    Ok(DailySeries {
        time,
        temperature_max: temperature_max.values.clone(),
        temperature_min: temperature_min.values.clone(),
        weather_code: weather_code.values.clone(),
    })
}

fn require_group(
    raw: &RawForecastResponse,
    group: Group,
) -> Result<&RawVariablesWithTime, DecodeError> {
    raw.group(group).ok_or(DecodeError::MissingGroup(group))
}

/// Variables of `group` in layout order, each checked by name.
fn resolve<'a, const N: usize>(
    group: &'a RawVariablesWithTime,
    layout: &VariableLayout<N>,
) -> Result<[&'a RawVariable; N], DecodeError> {
    for (index, &expected) in layout.names.iter().enumerate() {
        let variable = group.variables.get(index).ok_or(DecodeError::MissingVariable {
            group: layout.group,
            name: expected,
            index,
        })?;

        if variable.name != expected {
            return Err(DecodeError::VariableMismatch {
                group: layout.group,
                index,
                expected,
                found: variable.name.clone(),
            });
        }
    }

    Ok(std::array::from_fn(|index| &group.variables[index]))
}

fn check_lengths<const N: usize>(
    layout: &VariableLayout<N>,
    variables: &[&RawVariable; N],
    expected: usize,
) -> Result<(), DecodeError> {
    for (&name, variable) in layout.names.iter().zip(variables) {
        if variable.values.len() != expected {
            return Err(DecodeError::LengthMismatch {
                group: layout.group,
                name,
                expected,
                found: variable.values.len(),
            });
        }
    }
    Ok(())
}

/// Number of timestamps in `time..time_end`, validated without expanding them.
fn series_len(group: Group, raw: &RawVariablesWithTime) -> Result<usize, DecodeError> {
    if raw.interval <= 0 {
        return Err(DecodeError::InvalidTimeRange {
            group,
            reason: format!("interval must be positive, got {}", raw.interval),
        });
    }
    if raw.time_end < raw.time {
        return Err(DecodeError::InvalidTimeRange {
            group,
            reason: format!("end {} precedes start {}", raw.time_end, raw.time),
        });
    }

    let span = raw.time_end.checked_sub(raw.time).ok_or_else(|| DecodeError::InvalidTimeRange {
        group,
        reason: format!("span from {} to {} overflows", raw.time, raw.time_end),
    })?;

    let interval = i64::from(raw.interval);
    let slots = span / interval + i64::from(span % interval != 0);
    usize::try_from(slots).map_err(|_| DecodeError::InvalidTimeRange {
        group,
        reason: format!("{slots} timestamps do not fit in memory"),
    })
}

/// Expand `time..time_end`. Call after [`series_len`] has validated the range.
fn series_times(
    group: Group,
    raw: &RawVariablesWithTime,
    offset: i32,
) -> Result<Vec<NaiveDateTime>, DecodeError> {
    let step = usize::try_from(raw.interval).map_err(|_| DecodeError::InvalidTimeRange {
        group,
        reason: format!("interval {} does not fit a step", raw.interval),
    })?;

    (raw.time..raw.time_end)
        .step_by(step)
        .map(|ts| local_time(group, ts, offset))
        .collect()
}

fn local_time(group: Group, utc_epoch: i64, offset: i32) -> Result<NaiveDateTime, DecodeError> {
    utc_epoch
        .checked_add(i64::from(offset))
        .and_then(|local| DateTime::from_timestamp(local, 0))
        .map(|dt| dt.naive_utc())
        .ok_or_else(|| DecodeError::InvalidTimeRange {
            group,
            reason: format!("timestamp {utc_epoch} with offset {offset} is out of range"),
        })
}
