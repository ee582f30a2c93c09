use serde::Deserialize;
use std::path::PathBuf;

use crate::error::AppResult;
use crate::services::ScoringWeights;

/// Application configuration loaded from environment variables
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Server host address
    #[serde(default = "default_host")]
    pub host: String,

    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,

    /// Length of each recommendation list
    #[serde(default = "default_max_recommendations")]
    pub max_recommendations: usize,

    /// Directory for JSON profile files; profiles stay in memory when unset
    #[serde(default)]
    pub data_dir: Option<PathBuf>,

    /// JSON catalog file; the built-in sticker catalog is used when unset
    #[serde(default)]
    pub catalog_path: Option<PathBuf>,

    #[serde(default = "default_style_weight")]
    pub style_weight: f64,

    #[serde(default = "default_color_weight")]
    pub color_weight: f64,

    #[serde(default = "default_category_weight")]
    pub category_weight: f64,

    #[serde(default = "default_price_weight")]
    pub price_weight: f64,

    /// Upper bound (exclusive) of the random display jitter
    #[serde(default = "default_jitter_weight")]
    pub jitter_weight: f64,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    3000
}

fn default_max_recommendations() -> usize {
    4
}

fn default_style_weight() -> f64 {
    ScoringWeights::default().style
}

fn default_color_weight() -> f64 {
    ScoringWeights::default().color
}

fn default_category_weight() -> f64 {
    ScoringWeights::default().category
}

fn default_price_weight() -> f64 {
    ScoringWeights::default().price
}

fn default_jitter_weight() -> f64 {
    ScoringWeights::default().jitter
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        let config = envy::from_env::<Config>()
            .map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))?;
        config.validate()?;
        Ok(config)
    }

    /// Checks settings that parse but cannot be used
    pub fn validate(&self) -> AppResult<()> {
        self.weights().validate()
    }

    /// Scoring weights assembled from the individual settings
    pub fn weights(&self) -> ScoringWeights {
        ScoringWeights {
            style: self.style_weight,
            color: self.color_weight,
            category: self.category_weight,
            price: self.price_weight,
            jitter: self.jitter_weight,
        }
    }

    /// Address string to bind the listener to
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
