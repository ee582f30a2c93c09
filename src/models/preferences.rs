use serde::{de::DeserializeOwned, Deserialize, Deserializer, Serialize};
use serde_json::Value;

use super::catalog::dedup_colors;
use super::Style;

/// Coarse price bucket the user shops in
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum PriceRange {
    Budget,
    #[default]
    Mid,
    Premium,
    /// Any range name we do not recognise
    #[serde(other)]
    Unknown,
}

impl PriceRange {
    /// Inclusive `(min, max)` price bounds for this bucket
    pub fn bounds(&self) -> (f64, f64) {
        match self {
            PriceRange::Budget => (5.0, 15.0),
            PriceRange::Mid => (15.0, 25.0),
            PriceRange::Premium => (25.0, 50.0),
            PriceRange::Unknown => (5.0, 50.0),
        }
    }

    /// Whether `price` falls inside the bucket, both ends inclusive
    pub fn contains(&self, price: f64) -> bool {
        let (min, max) = self.bounds();
        price >= min && price <= max
    }
}

/// User preferences driving personalized scoring
///
/// Deserialization never fails on a bad field: anything missing or malformed
/// takes its default, so stale or hand-edited profiles still load.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UserPreferences {
    #[serde(default, alias = "sailingStyle", deserialize_with = "lenient")]
    pub sailing_style: Style,

    #[serde(
        default = "default_preferred_colors",
        alias = "preferredColors",
        deserialize_with = "lenient_colors"
    )]
    pub preferred_colors: Vec<String>,

    #[serde(default, alias = "priceRange", deserialize_with = "lenient")]
    pub price_range: PriceRange,

    /// Display only, never scored
    #[serde(
        default = "default_activity_level",
        alias = "activityLevel",
        deserialize_with = "lenient_activity_level"
    )]
    pub activity_level: String,
}

fn default_preferred_colors() -> Vec<String> {
    vec!["navy".to_string(), "white".to_string()]
}

fn default_activity_level() -> String {
    "moderate".to_string()
}

fn fallback<T: DeserializeOwned>(value: Value, default: impl FnOnce() -> T) -> T {
    serde_json::from_value(value).unwrap_or_else(|_| default())
}

fn lenient<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned + Default,
{
    let value = Value::deserialize(deserializer)?;
    Ok(fallback(value, T::default))
}

fn lenient_colors<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<String>, D::Error> {
    let value = Value::deserialize(deserializer)?;
    Ok(dedup_colors(fallback(value, default_preferred_colors)))
}

fn lenient_activity_level<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    let value = Value::deserialize(deserializer)?;
    Ok(fallback(value, default_activity_level))
}

impl Default for UserPreferences {
    fn default() -> Self {
        Self::new()
    }
}

impl UserPreferences {
    /// Creates preferences with every field at its default
    pub fn new() -> Self {
        Self {
            sailing_style: Style::default(),
            preferred_colors: default_preferred_colors(),
            price_range: PriceRange::default(),
            activity_level: default_activity_level(),
        }
    }
}
