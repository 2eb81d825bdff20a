//! Core library for the `weekcast` CLI.
//!
//! This crate defines:
//! - The forecast provider abstraction and its Open-Meteo implementation
//! - Decoding of the provider payload into a typed snapshot
//! - Reduction of the daily series into a weekly summary
//! - Weather-code classification and the matching background theme
//! - A single-slot store publishing the latest summary
//! - Configuration handling
//!
//! It is used by `weekcast-cli`, but can also back other front ends.

pub mod config;
pub mod decode;
pub mod icon;
pub mod model;
pub mod provider;
pub mod raw;
pub mod store;
pub mod summary;
pub mod theme;

pub use config::Config;
pub use decode::{DecodeError, decode};
pub use icon::{IconKind, classify};
pub use model::{
    Coordinate, CurrentConditions, CurrentSummary, DailySeries, DaySummary, Forecast,
    ForecastSnapshot, HourlySeries,
};
pub use provider::{FetchError, ForecastProvider, openmeteo::OpenMeteoProvider};
pub use raw::{RawForecastResponse, RawVariable, RawVariablesWithTime};
pub use store::{ForecastStore, RefreshError, RefreshOutcome};
pub use summary::{current_summary, summarize, summarize_forecast};
pub use theme::{Color, ColorPair, gradient_for, theme};
