//! Preference-driven product recommendations for a sailing sticker storefront.
//!
//! [`services::RecommendationEngine`] scores a fixed catalog against a user's
//! preferences and browsing history and returns three ranked lists. The
//! [`api`] module wraps it in a small JSON service backed by the profile
//! [`store`]s.

pub mod api;
pub mod config;
pub mod error;
pub mod middleware;
pub mod models;
pub mod services;
pub mod store;
