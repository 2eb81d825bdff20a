use chrono::{Datelike, NaiveDateTime};

use crate::model::{CurrentSummary, DaySummary, Forecast, ForecastSnapshot};

/// Reduce the daily series to one [`DaySummary`] per day, in input order.
///
/// Daily fields are zipped, so a snapshot that breaks the equal-length
/// invariant yields as many days as its shortest field.
pub fn summarize(snapshot: &ForecastSnapshot) -> Vec<DaySummary> {
    let daily = &snapshot.daily;

    daily
        .time
        .iter()
        .zip(&daily.temperature_min)
        .zip(&daily.temperature_max)
        .zip(&daily.weather_code)
        .map(|(((time, &min), &max), &code)| {
            DaySummary::new(weekday_index(time), average_temperature(min, max), code as i32)
        })
        .collect()
}

/// Headline summary from the current group. The provider does not name the
/// place, so the caller passes it in.
pub fn current_summary(snapshot: &ForecastSnapshot, location: impl Into<String>) -> CurrentSummary {
    CurrentSummary {
        temperature: snapshot.current.temperature as i32,
        location: location.into(),
        weather_code: snapshot.current.weather_code as i32,
    }
}

pub fn summarize_forecast(snapshot: &ForecastSnapshot, location: impl Into<String>) -> Forecast {
    Forecast {
        current: current_summary(snapshot, location),
        week: summarize(snapshot),
        observed_at: Some(snapshot.current.time),
    }
}

/// Gregorian weekday, 0 = Sunday.
pub fn weekday_index(time: &NaiveDateTime) -> u8 {
    // num_days_from_sunday is always in 0..7
    time.weekday().num_days_from_sunday() as u8
}

/// Mean of the truncated bounds, truncated: 10 and 11 give 10, -2 and 3 give 0.
pub fn average_temperature(min: f32, max: f32) -> i32 {
    let sum = i64::from(min as i32) + i64::from(max as i32);
    (sum / 2) as i32
}
