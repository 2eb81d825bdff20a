//! Provider-shaped forecast payload.
//!
//! The forecast provider answers with one block per variable group. Each
//! block carries a time range and an ordered list of variables; the order is
//! the order in which the variables were requested, which is why the request
//! and the decoder share the [`VariableLayout`] constants below.

use std::fmt;

/// Variable group of a forecast request / response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Group {
    Current,
    Hourly,
    Daily,
}

impl Group {
    /// Query parameter name (and JSON key) of the group.
    pub fn as_str(&self) -> &'static str {
        match self {
            Group::Current => "current",
            Group::Hourly => "hourly",
            Group::Daily => "daily",
        }
    }

    /// Spacing between two samples of the group when the payload does not say.
    pub fn nominal_interval(&self) -> i32 {
        match self {
            Group::Current => 900,
            Group::Hourly => 3_600,
            Group::Daily => 86_400,
        }
    }
}

impl fmt::Display for Group {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Ordered variable names requested for one group.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VariableLayout<const N: usize> {
    pub group: Group,
    pub names: [&'static str; N],
}

impl<const N: usize> VariableLayout<N> {
    /// Comma-separated list used as the group's query parameter value.
    pub fn query_value(&self) -> String {
        self.names.join(",")
    }
}

pub const CURRENT: VariableLayout<2> = VariableLayout {
    group: Group::Current,
    names: ["temperature_2m", "weather_code"],
};

pub const HOURLY: VariableLayout<2> = VariableLayout {
    group: Group::Hourly,
    names: ["temperature_2m", "precipitation"],
};

pub const DAILY: VariableLayout<3> = VariableLayout {
    group: Group::Daily,
    names: ["temperature_2m_max", "temperature_2m_min", "weather_code"],
};

/// One variable of a group. `value` is set for the current group, `values`
/// for hourly and daily series.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RawVariable {
    pub name: String,
    pub value: f32,
    pub values: Vec<f32>,
}

impl RawVariable {
    pub fn scalar(name: impl Into<String>, value: f32) -> Self {
        Self { name: name.into(), value, values: Vec::new() }
    }

    pub fn series(name: impl Into<String>, values: Vec<f32>) -> Self {
        Self { name: name.into(), value: f32::NAN, values }
    }
}

/// Time range plus ordered variables, all times in UTC epoch seconds.
///
/// Series timestamps are `time, time + interval, ..` up to but excluding
/// `time_end`.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RawVariablesWithTime {
    pub time: i64,
    pub time_end: i64,
    pub interval: i32,
    pub variables: Vec<RawVariable>,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct RawForecastResponse {
    pub utc_offset_seconds: i32,
    pub current: Option<RawVariablesWithTime>,
    pub hourly: Option<RawVariablesWithTime>,
    pub daily: Option<RawVariablesWithTime>,
}

impl RawForecastResponse {
    pub fn group(&self, group: Group) -> Option<&RawVariablesWithTime> {
        match group {
            Group::Current => self.current.as_ref(),
            Group::Hourly => self.hourly.as_ref(),
            Group::Daily => self.daily.as_ref(),
        }
    }
}

/// Builders for well-formed responses used across the crate's tests.
#[cfg(test)]
pub(crate) mod fixtures {
    use super::*;

    /// 2024-12-11 00:00:00 UTC, a Wednesday.
    pub const WEDNESDAY_MIDNIGHT_UTC: i64 = 1_733_875_200;

    pub struct Day {
        pub min: f32,
        pub max: f32,
        pub code: f32,
    }

    pub fn daily_group(start: i64, days: &[Day]) -> RawVariablesWithTime {
        let interval = Group::Daily.nominal_interval();
        RawVariablesWithTime {
            time: start,
            time_end: start + days.len() as i64 * i64::from(interval),
            interval,
            variables: vec![
                RawVariable::series("temperature_2m_max", days.iter().map(|d| d.max).collect()),
                RawVariable::series("temperature_2m_min", days.iter().map(|d| d.min).collect()),
                RawVariable::series("weather_code", days.iter().map(|d| d.code).collect()),
            ],
        }
    }

    pub fn response(utc_offset_seconds: i32, days: &[Day]) -> RawForecastResponse {
        let start = WEDNESDAY_MIDNIGHT_UTC;
        RawForecastResponse {
            utc_offset_seconds,
            current: Some(RawVariablesWithTime {
                time: start + 12 * 3_600,
                time_end: start + 12 * 3_600 + 900,
                interval: 900,
                variables: vec![
                    RawVariable::scalar("temperature_2m", 4.7),
                    RawVariable::scalar("weather_code", 61.0),
                ],
            }),
            hourly: Some(RawVariablesWithTime {
                time: start,
                time_end: start + 3 * 3_600,
                interval: 3_600,
                variables: vec![
                    RawVariable::series("temperature_2m", vec![1.0, 1.5, 2.0]),
                    RawVariable::series("precipitation", vec![0.0, 0.2, 0.4]),
                ],
            }),
            daily: Some(daily_group(start, days)),
        }
    }
}
