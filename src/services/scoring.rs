use rand::Rng;

use crate::error::{AppError, AppResult};
use crate::models::{CatalogItem, Category, HistoryEvent, UserPreferences};

/// Highest score an item can be shown with
pub const MAX_SCORE: f64 = 100.0;

/// Per-term weights of the match score
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoringWeights {
    /// Added when the item style equals the preferred sailing style
    pub style: f64,
    /// Added once per item color found in the preferred colors
    pub color: f64,
    /// Added when the item category is the most viewed one
    pub category: f64,
    /// Added when the price falls inside the preferred bucket
    pub price: f64,
    /// Exclusive upper bound of the uniform display jitter; 0 disables it
    pub jitter: f64,
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            style: 30.0,
            color: 15.0,
            category: 20.0,
            price: 15.0,
            jitter: 10.0,
        }
    }
}

impl ScoringWeights {
    /// Rejects weights that are negative, NaN or infinite
    pub fn validate(&self) -> AppResult<()> {
        let terms = [
            ("style", self.style),
            ("color", self.color),
            ("category", self.category),
            ("price", self.price),
            ("jitter", self.jitter),
        ];
        for (name, weight) in terms {
            if !weight.is_finite() || weight < 0.0 {
                return Err(AppError::InvalidInput(format!(
                    "{} weight must be a finite non-negative number, got {}",
                    name, weight
                )));
            }
        }
        Ok(())
    }
}

/// Maps a viewed product name to a category by keyword
///
/// Rules are checked in order against the lowercased name and the first hit
/// wins. Names matching nothing count as nautical.
pub fn category_for_product(product_name: &str) -> Category {
    const RULES: [(&[&str], Category); 5] = [
        (&["anchor", "rope"], Category::Nautical),
        (&["compass", "wheel"], Category::Navigation),
        (&["sail", "boat"], Category::Sailing),
        (&["lighthouse", "wave"], Category::Coastal),
        (&["marine", "fish"], Category::Marine),
    ];

    let name = product_name.to_lowercase();
    RULES
        .iter()
        .find(|(keywords, _)| keywords.iter().any(|k| name.contains(k)))
        .map(|(_, category)| *category)
        .unwrap_or(Category::Nautical)
}

/// Category the user viewed most, judged by product views only
///
/// Ties go to the category whose first view came earliest in the history.
/// With no product views at all the result is nautical.
pub fn most_viewed_category(history: &[HistoryEvent]) -> Category {
    // Kept in first-seen order so the tie-break is a plain left-to-right scan
    let mut counts: Vec<(Category, usize)> = Vec::new();

    for product in history.iter().filter_map(HistoryEvent::viewed_product) {
        let category = category_for_product(product);
        match counts.iter_mut().find(|(c, _)| *c == category) {
            Some((_, count)) => *count += 1,
            None => counts.push((category, 1)),
        }
    }

    let mut best: Option<(Category, usize)> = None;
    for (category, count) in counts {
        if best.map_or(true, |(_, best_count)| count > best_count) {
            best = Some((category, count));
        }
    }

    best.map(|(category, _)| category).unwrap_or_default()
}

/// Scores catalog items against one user profile
///
/// The category affinity is derived from the history once, at construction,
/// and reused for every item.
pub struct Scorer<'a> {
    weights: &'a ScoringWeights,
    preferences: &'a UserPreferences,
    affinity: Category,
}

impl<'a> Scorer<'a> {
    pub fn new(
        weights: &'a ScoringWeights,
        preferences: &'a UserPreferences,
        history: &[HistoryEvent],
    ) -> Self {
        Self {
            weights,
            preferences,
            affinity: most_viewed_category(history),
        }
    }

    /// The most viewed category this scorer rewards
    pub fn affinity(&self) -> Category {
        self.affinity
    }

    /// Deterministic weighted sum of style, color, category and price terms
    ///
    /// Not clamped; [`Scorer::score`] applies the ceiling after jitter.
    pub fn base_score(&self, item: &CatalogItem) -> f64 {
        let w = self.weights;
        let mut score = 0.0;

        if item.style == self.preferences.sailing_style {
            score += w.style;
        }

        score += w.color * item.color_overlap(&self.preferences.preferred_colors) as f64;

        if item.category == self.affinity {
            score += w.category;
        }

        if self.preferences.price_range.contains(item.price) {
            score += w.price;
        }

        score
    }

    /// Base score plus display jitter, clamped to `[0, 100]`
    pub fn score<R: Rng>(&self, item: &CatalogItem, rng: &mut R) -> f64 {
        let jitter = if self.weights.jitter.is_finite() && self.weights.jitter > 0.0 {
            rng.gen_range(0.0..self.weights.jitter)
        } else {
            0.0
        };

        (self.base_score(item) + jitter).clamp(0.0, MAX_SCORE)
    }
}

/// Scores a single item with the default weights
pub fn score_item<R: Rng>(
    item: &CatalogItem,
    preferences: &UserPreferences,
    history: &[HistoryEvent],
    rng: &mut R,
) -> f64 {
    let weights = ScoringWeights::default();
    Scorer::new(&weights, preferences, history).score(item, rng)
}
