use serde::{Deserialize, Serialize};
use std::fmt;

use crate::icon::{IconKind, classify};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Color {
    Fog,
    Cyan,
    Purple,
    Gray,
    Blue,
    Black,
}

impl Color {
    pub fn as_str(&self) -> &'static str {
        match self {
            Color::Fog => "fog",
            Color::Cyan => "cyan",
            Color::Purple => "purple",
            Color::Gray => "gray",
            Color::Blue => "blue",
            Color::Black => "black",
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Background gradient endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ColorPair {
    pub first: Color,
    pub second: Color,
}

impl ColorPair {
    pub const NIGHT: ColorPair = ColorPair { first: Color::Black, second: Color::Gray };

    const fn solid(color: Color) -> Self {
        Self { first: color, second: color }
    }
}

/// Daytime gradient for a weather code.
pub fn gradient_for(code: i32) -> ColorPair {
    match classify(code) {
        IconKind::Fog => ColorPair::solid(Color::Fog),
        IconKind::Snow => ColorPair::solid(Color::Cyan),
        IconKind::Rain | IconKind::HeavyRain | IconKind::Thunderstorm => {
            ColorPair::solid(Color::Purple)
        }
        IconKind::Drizzle => ColorPair::solid(Color::Gray),
        IconKind::Clear | IconKind::PartlyCloudy => ColorPair::solid(Color::Blue),
    }
}

/// Gradient for the current display mode. Night mode ignores the weather.
pub fn theme(code: i32, night_mode: bool) -> ColorPair {
    if night_mode { ColorPair::NIGHT } else { gradient_for(code) }
}
