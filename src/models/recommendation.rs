use serde::{Deserialize, Serialize};

use super::{CatalogItem, HistoryEvent, UserPreferences};

/// A catalog item paired with its match score for one recommendation request
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ScoredItem {
    #[serde(flatten)]
    pub item: CatalogItem,
    /// Integer percentage in `0..=100`
    #[serde(alias = "matchScore")]
    pub match_score: u8,
}

impl ScoredItem {
    /// Rounds `score` to the nearest integer after clamping it to `[0, 100]`
    pub fn new(item: CatalogItem, score: f64) -> Self {
        Self {
            item,
            match_score: score.clamp(0.0, 100.0).round() as u8,
        }
    }
}

/// The three ranked lists produced for one profile
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Recommendations {
    pub for_you: Vec<ScoredItem>,
    pub trending: Vec<ScoredItem>,
    pub complete_look: Vec<ScoredItem>,
}

/// Stateless recommendation request; both parts are optional
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RecommendationRequest {
    #[serde(default)]
    pub preferences: UserPreferences,
    /// Malformed events are dropped rather than failing the request
    #[serde(default, deserialize_with = "super::history::lenient_history")]
    pub history: Vec<HistoryEvent>,
}
