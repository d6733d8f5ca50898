use serde::{Deserialize, Serialize};

/// Validated result of one weather query, ready for display.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherSnapshot {
    pub city: String,
    pub country: String,
    pub temperature_c: f64,
    pub condition: String,
    pub humidity_pct: u8,
    pub wind_kph: f64,
    /// Icon reference returned by the provider, unrelated to [`IconCategory`].
    pub icon_ref: String,
}

impl WeatherSnapshot {
    /// Temperature with its unit, e.g. `30°C` or `30.5°C`.
    pub fn temperature_display(&self) -> String {
        format!("{}°C", self.temperature_c)
    }

    pub fn location_display(&self) -> String {
        format!("{}, {}", self.city, self.country)
    }

    pub fn icon(&self) -> IconCategory {
        categorize(Some(&self.condition))
    }
}

/// Local icon bucket chosen from the free-text condition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IconCategory {
    #[default]
    Clear,
    Cloudy,
    Drizzle,
    Rain,
    Snow,
}

// Checked in order; the first rule with a matching keyword wins.
const RULES: &[(&[&str], IconCategory)] = &[
    (&["clear", "sunny"], IconCategory::Clear),
    (&["cloud"], IconCategory::Cloudy),
    (&["drizzle", "mist"], IconCategory::Drizzle),
    (&["rain", "shower"], IconCategory::Rain),
    (&["snow", "ice"], IconCategory::Snow),
];

/// Map a provider condition string to an icon category.
///
/// Case-insensitive substring match. Absent or unmatched conditions map to
/// [`IconCategory::Clear`].
pub fn categorize(condition: Option<&str>) -> IconCategory {
    let Some(condition) = condition else {
        return IconCategory::Clear;
    };
    let lower = condition.to_lowercase();

    RULES
        .iter()
        .find(|(keywords, _)| keywords.iter().any(|k| lower.contains(k)))
        .map(|(_, category)| *category)
        .unwrap_or_default()
}

impl IconCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            IconCategory::Clear => "clear",
            IconCategory::Cloudy => "cloudy",
            IconCategory::Drizzle => "drizzle",
            IconCategory::Rain => "rain",
            IconCategory::Snow => "snow",
        }
    }

    /// Static image asset bundled for this category.
    pub fn asset_name(&self) -> &'static str {
        match self {
            IconCategory::Clear => "1.png",
            IconCategory::Cloudy => "2.png",
            IconCategory::Drizzle => "3.png",
            IconCategory::Rain => "4.png",
            IconCategory::Snow => "5.png",
        }
    }

    /// Glyph used by terminal hosts.
    pub fn glyph(&self) -> &'static str {
        match self {
            IconCategory::Clear => "☀",
            IconCategory::Cloudy => "☁",
            IconCategory::Drizzle => "🌦",
            IconCategory::Rain => "🌧",
            IconCategory::Snow => "❄",
        }
    }
}

impl std::fmt::Display for IconCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
