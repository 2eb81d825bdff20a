use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::icon::{IconKind, classify};

/// Short weekday names indexed by [`DaySummary::weekday_index`], Sunday first.
pub const WEEKDAY_SHORT_NAMES: [&str; 7] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,
}

impl Default for Coordinate {
    /// Stockholm.
    fn default() -> Self {
        Self { latitude: 59.334591, longitude: 18.063240 }
    }
}

/// Decoded forecast. All timestamps are local wall-clock time.
#[derive(Debug, Clone, PartialEq)]
pub struct ForecastSnapshot {
    pub current: CurrentConditions,
    pub hourly: HourlySeries,
    pub daily: DailySeries,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CurrentConditions {
    pub time: NaiveDateTime,
    pub temperature: f32,
    pub weather_code: f32,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct HourlySeries {
    pub time: Vec<NaiveDateTime>,
    pub temperature: Vec<f32>,
    pub precipitation: Vec<f32>,
}

/// Index `i` of every field describes the same day.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct DailySeries {
    pub time: Vec<NaiveDateTime>,
    pub temperature_max: Vec<f32>,
    pub temperature_min: Vec<f32>,
    pub weather_code: Vec<f32>,
}

/// Headline conditions for the configured place.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurrentSummary {
    pub temperature: i32,
    pub location: String,
    pub weather_code: i32,
}

impl Default for CurrentSummary {
    fn default() -> Self {
        Self { temperature: 3, location: "Earth".to_string(), weather_code: 0 }
    }
}

impl CurrentSummary {
    pub fn icon(&self) -> IconKind {
        classify(self.weather_code)
    }
}

/// One day of the weekly summary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DaySummary {
    /// 0 = Sunday .. 6 = Saturday.
    pub weekday_index: u8,
    pub temperature: i32,
    pub weather_code: i32,
    pub id: Uuid,
}

impl DaySummary {
    pub fn new(weekday_index: u8, temperature: i32, weather_code: i32) -> Self {
        Self { weekday_index, temperature, weather_code, id: Uuid::new_v4() }
    }

    pub fn day_of_week(&self) -> &'static str {
        WEEKDAY_SHORT_NAMES[usize::from(self.weekday_index) % WEEKDAY_SHORT_NAMES.len()]
    }

    pub fn icon(&self) -> IconKind {
        classify(self.weather_code)
    }
}

/// Everything a consumer renders after one refresh.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Forecast {
    pub current: CurrentSummary,
    pub week: Vec<DaySummary>,
    /// Local time of the current conditions; `None` until the first refresh.
    pub observed_at: Option<NaiveDateTime>,
}
