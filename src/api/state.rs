use std::sync::Arc;

use crate::{
    config::Config,
    error::AppResult,
    services::{Catalog, RecommendationEngine},
    store::{FileStore, HistoryStore, MemoryStore, PreferenceStore},
};

/// Shared application state
///
/// The engine is built once and only read afterwards; profile data lives in
/// the stores.
#[derive(Clone)]
pub struct AppState {
    pub engine: Arc<RecommendationEngine>,
    pub preferences: Arc<dyn PreferenceStore>,
    pub history: Arc<dyn HistoryStore>,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

impl AppState {
    /// Built-in catalog, default scoring, in-memory profiles
    pub fn new() -> Self {
        Self::with_engine(RecommendationEngine::new(Catalog::sailing_stickers()))
    }

    /// Given engine with in-memory profiles
    pub fn with_engine(engine: RecommendationEngine) -> Self {
        let store = Arc::new(MemoryStore::new());
        Self {
            engine: Arc::new(engine),
            preferences: store.clone(),
            history: store,
        }
    }

    /// Builds the state described by the configuration
    pub async fn from_config(config: &Config) -> AppResult<Self> {
        let catalog = match &config.catalog_path {
            Some(path) => Catalog::from_json_file(path)?,
            None => Catalog::sailing_stickers(),
        };

        let engine = RecommendationEngine::new(catalog)
            .with_weights(config.weights())
            .with_limit(config.max_recommendations);

        let state = match &config.data_dir {
            Some(dir) => {
                let store = Arc::new(FileStore::open(dir).await?);
                Self {
                    engine: Arc::new(engine),
                    preferences: store.clone(),
                    history: store,
                }
            }
            None => Self::with_engine(engine),
        };

        Ok(state)
    }
}
