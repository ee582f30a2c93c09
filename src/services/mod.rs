pub mod catalog;
pub mod recommendations;
pub mod scoring;

pub use catalog::Catalog;
pub use recommendations::{recommend_for_profile, RecommendationEngine};
pub use scoring::{score_item, Scorer, ScoringWeights};
