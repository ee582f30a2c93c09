use rand::{seq::SliceRandom, Rng};
use uuid::Uuid;

use super::{Catalog, Scorer, ScoringWeights};
use crate::{
    error::AppResult,
    models::{CatalogItem, HistoryEvent, Recommendations, ScoredItem, UserPreferences},
    store::{HistoryStore, PreferenceStore},
};

/// Default length of each recommendation list
pub const DEFAULT_LIMIT: usize = 4;

/// How many recent product views the complete-look list steers away from
const RECENT_VIEW_WINDOW: usize = 3;

/// Produces the "for you", "trending" and "complete the look" lists
///
/// Holds the catalog and scoring settings; every call is a pure read of its
/// arguments plus draws from the caller's RNG.
#[derive(Debug, Clone)]
pub struct RecommendationEngine {
    catalog: Catalog,
    weights: ScoringWeights,
    limit: usize,
}

impl RecommendationEngine {
    /// Creates an engine with default weights and list length
    pub fn new(catalog: Catalog) -> Self {
        Self {
            catalog,
            weights: ScoringWeights::default(),
            limit: DEFAULT_LIMIT,
        }
    }

    pub fn with_weights(mut self, weights: ScoringWeights) -> Self {
        self.weights = weights;
        self
    }

    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = limit;
        self
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Builds all three lists for one profile
    pub fn generate_recommendations<R: Rng>(
        &self,
        preferences: &UserPreferences,
        history: &[HistoryEvent],
        rng: &mut R,
    ) -> Recommendations {
        let recommendations = Recommendations {
            for_you: self.for_you(preferences, history, rng),
            trending: self.trending(rng),
            complete_look: self.complete_look(history, rng),
        };

        tracing::debug!(
            catalog_size = self.catalog.len(),
            history_len = history.len(),
            for_you = recommendations.for_you.len(),
            trending = recommendations.trending.len(),
            complete_look = recommendations.complete_look.len(),
            "Recommendations generated"
        );

        recommendations
    }

    /// Catalog ranked by match score, best first
    ///
    /// The sort is stable, so equal scores keep catalog order.
    pub fn for_you<R: Rng>(
        &self,
        preferences: &UserPreferences,
        history: &[HistoryEvent],
        rng: &mut R,
    ) -> Vec<ScoredItem> {
        let scorer = Scorer::new(&self.weights, preferences, history);

        let mut scored: Vec<(&CatalogItem, f64)> = self
            .catalog
            .items()
            .iter()
            .map(|item| (item, scorer.score(item, rng)))
            .collect();

        scored.sort_by(|a, b| b.1.total_cmp(&a.1));

        scored
            .into_iter()
            .take(self.limit)
            .map(|(item, score)| ScoredItem::new(item.clone(), score))
            .collect()
    }

    /// Random sample of the catalog with cosmetic scores in `80..100`
    ///
    /// Ignores the profile entirely.
    pub fn trending<R: Rng>(&self, rng: &mut R) -> Vec<ScoredItem> {
        self.random_pick(self.catalog.items().iter().collect(), 80..100, rng)
    }

    /// Random sample of items the user has not just looked at, scored in `70..85`
    ///
    /// Items named in the last three product views are left out.
    pub fn complete_look<R: Rng>(&self, history: &[HistoryEvent], rng: &mut R) -> Vec<ScoredItem> {
        let recent = recently_viewed(history, RECENT_VIEW_WINDOW);

        let candidates = self
            .catalog
            .items()
            .iter()
            .filter(|item| !recent.contains(&item.name.as_str()))
            .collect();

        self.random_pick(candidates, 70..85, rng)
    }

    fn random_pick<R: Rng>(
        &self,
        mut candidates: Vec<&CatalogItem>,
        scores: std::ops::Range<u8>,
        rng: &mut R,
    ) -> Vec<ScoredItem> {
        candidates.shuffle(rng);
        candidates.truncate(self.limit);

        candidates
            .into_iter()
            .map(|item| ScoredItem {
                item: item.clone(),
                match_score: rng.gen_range(scores.clone()),
            })
            .collect()
    }
}

/// Product names of the last `n` product views, oldest first
///
/// Repeated views of the same product are not collapsed.
pub fn recently_viewed(history: &[HistoryEvent], n: usize) -> Vec<&str> {
    let views: Vec<&str> = history
        .iter()
        .filter_map(HistoryEvent::viewed_product)
        .collect();

    views[views.len().saturating_sub(n)..].to_vec()
}

/// Loads a stored profile and builds its recommendations
///
/// A profile that never saved preferences is scored with the defaults.
pub async fn recommend_for_profile(
    engine: &RecommendationEngine,
    preferences: &dyn PreferenceStore,
    history: &dyn HistoryStore,
    profile_id: Uuid,
) -> AppResult<Recommendations> {
    let prefs = preferences
        .get_preferences(profile_id)
        .await?
        .unwrap_or_default();
    let events = history.get_history(profile_id).await?;

    tracing::debug!(profile_id = %profile_id, events = events.len(), "Scoring stored profile");

    Ok(engine.generate_recommendations(&prefs, &events, &mut rand::thread_rng()))
}
