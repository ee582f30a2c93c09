use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt::Display;

/// Product category tag
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    #[default]
    Nautical,
    Navigation,
    Sailing,
    Coastal,
    Marine,
}

impl Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let tag = match self {
            Category::Nautical => "nautical",
            Category::Navigation => "navigation",
            Category::Sailing => "sailing",
            Category::Coastal => "coastal",
            Category::Marine => "marine",
        };
        write!(f, "{}", tag)
    }
}

/// Design style tag, shared by catalog items and the user's sailing style
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Style {
    #[default]
    Classic,
    Vintage,
    Modern,
    Minimalist,
}

/// A recommendable product
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CatalogItem {
    pub id: u32,
    pub name: String,
    pub category: Category,
    pub style: Style,
    pub colors: Vec<String>,
    /// Price in whole currency units
    pub price: f64,
    /// Image path or URL, passed through untouched
    pub image: String,
}

impl CatalogItem {
    /// Number of this item's colors that appear in `preferred`
    ///
    /// Counts each listed color, so the list is expected to be free of
    /// repeats (see [`CatalogItem::dedup_colors`]).
    pub fn color_overlap(&self, preferred: &[String]) -> usize {
        self.colors
            .iter()
            .filter(|color| preferred.contains(color))
            .count()
    }

    /// Drops repeated colors, keeping first occurrences; returns how many were removed
    pub fn dedup_colors(&mut self) -> usize {
        let before = self.colors.len();
        self.colors = dedup_colors(std::mem::take(&mut self.colors));
        before - self.colors.len()
    }
}

/// Removes repeated colors while keeping the original order
pub(crate) fn dedup_colors(colors: Vec<String>) -> Vec<String> {
    let mut seen = HashSet::new();
    colors
        .into_iter()
        .filter(|color| seen.insert(color.clone()))
        .collect()
}
