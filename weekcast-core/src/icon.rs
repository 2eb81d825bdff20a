use serde::{Deserialize, Serialize};

/// Visual category of a WMO weather code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IconKind {
    Clear,
    PartlyCloudy,
    Fog,
    Drizzle,
    Rain,
    Snow,
    HeavyRain,
    Thunderstorm,
}

impl IconKind {
    pub const fn all() -> &'static [IconKind] {
        &[
            IconKind::Clear,
            IconKind::PartlyCloudy,
            IconKind::Fog,
            IconKind::Drizzle,
            IconKind::Rain,
            IconKind::Snow,
            IconKind::HeavyRain,
            IconKind::Thunderstorm,
        ]
    }

    /// SF Symbols name of the icon.
    pub fn symbol_name(&self) -> &'static str {
        match self {
            IconKind::Clear => "sun.max.fill",
            IconKind::PartlyCloudy => "cloud.sun.fill",
            IconKind::Fog => "cloud.fog.fill",
            IconKind::Drizzle => "cloud.drizzle.fill",
            IconKind::Rain => "cloud.rain.fill",
            IconKind::Snow => "snow",
            IconKind::HeavyRain => "cloud.heavyrain.fill",
            IconKind::Thunderstorm => "cloud.bolt.rain.fill",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            IconKind::Clear => "Clear",
            IconKind::PartlyCloudy => "Partly cloudy",
            IconKind::Fog => "Fog",
            IconKind::Drizzle => "Drizzle",
            IconKind::Rain => "Rain",
            IconKind::Snow => "Snow",
            IconKind::HeavyRain => "Heavy rain",
            IconKind::Thunderstorm => "Thunderstorm",
        }
    }
}

/// Classify a WMO weather code. Every code outside the known groups,
/// negative ones included, is a thunderstorm.
pub fn classify(code: i32) -> IconKind {
    match code {
        0 => IconKind::Clear,
        1..=3 => IconKind::PartlyCloudy,
        45 | 48 => IconKind::Fog,
        51 | 53 | 55 | 56 | 57 => IconKind::Drizzle,
        61 | 63 | 65 | 66 | 67 => IconKind::Rain,
        71 | 73 | 75 | 77 => IconKind::Snow,
        80..=82 => IconKind::HeavyRain,
        _ => IconKind::Thunderstorm,
    }
}
