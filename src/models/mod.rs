mod catalog;
mod history;
mod preferences;
mod recommendation;

pub use catalog::{CatalogItem, Category, Style};
pub use history::{parse_history, EventKind, HistoryEvent, NewHistoryEvent};
pub use preferences::{PriceRange, UserPreferences};
pub use recommendation::{RecommendationRequest, Recommendations, ScoredItem};
