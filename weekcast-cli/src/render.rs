use chrono::NaiveDateTime;
use std::fmt;
use weekcast_core::{Forecast, theme};

/// Human-readable rendering of a forecast.
pub fn forecast(forecast: &Forecast, night: bool) -> ForecastView<'_> {
    ForecastView { forecast, night }
}

/// Text view of a [`Forecast`]: headline, theme colors, then one row per day.
pub struct ForecastView<'a> {
    forecast: &'a Forecast,
    night: bool,
}

impl fmt::Display for ForecastView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let current = &self.forecast.current;
        let icon = current.icon();
        let colors = theme(current.weather_code, self.night);

        writeln!(f, "{}", current.location)?;
        writeln!(f, "{}  {}", icon.symbol_name(), icon.description())?;
        writeln!(f, "{}°", current.temperature)?;
        writeln!(f, "theme: {} / {}", colors.first, colors.second)?;
        writeln!(f, "as of: {}", Observed(self.forecast.observed_at))?;

        if !self.forecast.week.is_empty() {
            writeln!(f)?;
        }
        for day in &self.forecast.week {
            let icon = day.icon();
            writeln!(
                f,
                "{:<4} {:<22} {:<14} {:>4}°",
                day.day_of_week(),
                icon.symbol_name(),
                icon.description(),
                day.temperature
            )?;
        }

        Ok(())
    }
}

struct Observed(Option<NaiveDateTime>);

impl fmt::Display for Observed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Some(at) => write!(f, "{}", at.format("%Y-%m-%d %H:%M")),
            None => f.write_str("never"),
        }
    }
}
