use std::fmt;

use crate::{IconCategory, WeatherSnapshot};

/// Exactly one of these is drawn at any time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum View<'a> {
    Loading,
    Error(&'a str),
    Snapshot { snapshot: &'a WeatherSnapshot, icon: IconCategory },
    Empty,
}

/// Pick the view for the current state.
///
/// Loading wins over everything, and an error hides any stale snapshot.
pub fn select<'a>(
    loading: bool,
    error: Option<&'a str>,
    weather: Option<&'a WeatherSnapshot>,
) -> View<'a> {
    match (loading, error, weather) {
        (true, _, _) => View::Loading,
        (false, Some(message), _) => View::Error(message),
        (false, None, Some(snapshot)) => View::Snapshot { snapshot, icon: snapshot.icon() },
        (false, None, None) => View::Empty,
    }
}

impl fmt::Display for View<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            View::Loading => writeln!(f, "Loading weather data..."),
            View::Error(message) => {
                writeln!(f, "✗ {message}")?;
                writeln!(f, "  (enter :dismiss to close)")
            }
            View::Snapshot { snapshot, icon } => {
                writeln!(f, "{}  {}", icon.glyph(), snapshot.temperature_display())?;
                writeln!(f, "{}", snapshot.location_display())?;
                writeln!(f, "{}", snapshot.condition)?;
                writeln!(f, "{}% Humidity", snapshot.humidity_pct)?;
                writeln!(f, "{} km/h Wind", snapshot.wind_kph)
            }
            View::Empty => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mumbai() -> WeatherSnapshot {
        WeatherSnapshot {
            city: "Mumbai".into(),
            country: "India".into(),
            temperature_c: 30.0,
            condition: "Light rain shower".into(),
            humidity_pct: 40,
            wind_kph: 10.0,
            icon_ref: "x".into(),
        }
    }

    #[test]
    fn loading_wins_over_everything() {
        let w = mumbai();
        assert_eq!(select(true, Some("err"), Some(&w)), View::Loading);
        assert_eq!(select(true, None, None), View::Loading);
    }

    #[test]
    fn error_hides_stale_snapshot() {
        let w = mumbai();
        assert_eq!(select(false, Some("err"), Some(&w)), View::Error("err"));
        assert_eq!(select(false, Some("err"), None), View::Error("err"));
    }

    #[test]
    fn snapshot_carries_categorized_icon() {
        let w = mumbai();
        match select(false, None, Some(&w)) {
            View::Snapshot { snapshot, icon } => {
                assert_eq!(snapshot.city, "Mumbai");
                assert_eq!(icon, IconCategory::Rain);
            }
            other => panic!("expected snapshot view, got {other:?}"),
        }
    }

    #[test]
    fn nothing_to_show_is_empty() {
        assert_eq!(select(false, None, None), View::Empty);
        assert_eq!(View::Empty.to_string(), "");
    }

    #[test]
    fn snapshot_renders_all_details() {
        let w = mumbai();
        let text = select(false, None, Some(&w)).to_string();

        assert!(text.contains("30°C"));
        assert!(text.contains("Mumbai, India"));
        assert!(text.contains("Light rain shower"));
        assert!(text.contains("40% Humidity"));
        assert!(text.contains("10 km/h Wind"));
    }

    #[test]
    fn error_renders_message_and_dismiss_hint() {
        let text = View::Error("No matching location found.").to_string();
        assert!(text.contains("No matching location found."));
        assert!(text.contains(":dismiss"));
    }
}
