use std::path::Path;

use crate::{
    error::{AppError, AppResult},
    models::{CatalogItem, Category, Style},
};

/// Read-only set of recommendable items
///
/// Built once at startup and shared by reference; scoring never mutates it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Catalog {
    items: Vec<CatalogItem>,
}

impl Catalog {
    /// Builds a catalog, collapsing repeated colors within each item
    pub fn new(mut items: Vec<CatalogItem>) -> Self {
        for item in &mut items {
            let removed = item.dedup_colors();
            if removed > 0 {
                tracing::warn!(item_id = item.id, removed, "Ignoring repeated catalog colors");
            }
        }
        Self { items }
    }

    /// The built-in sailing sticker catalog
    pub fn sailing_stickers() -> Self {
        let row = |id, name: &str, category, style, colors: [&str; 2], price, image: &str| {
            CatalogItem {
                id,
                name: name.to_string(),
                category,
                style,
                colors: colors.iter().map(|c| c.to_string()).collect(),
                price,
                image: image.to_string(),
            }
        };

        Self::new(vec![
            row(1, "Classic Anchor", Category::Nautical, Style::Classic, ["navy", "white"], 12.0, "/assets/icon-anchor.svg"),
            row(2, "Compass Rose", Category::Navigation, Style::Vintage, ["navy", "gold"], 15.0, "/assets/icon-compass.svg"),
            row(3, "Sailboat Silhouette", Category::Sailing, Style::Modern, ["blue", "white"], 18.0, "/assets/icon-sailboat.svg"),
            row(4, "Lighthouse Beacon", Category::Coastal, Style::Classic, ["red", "white"], 14.0, "/assets/icon-lighthouse.svg"),
            row(5, "Nautical Rope", Category::Nautical, Style::Minimalist, ["brown", "white"], 10.0, "/assets/icon-anchor.svg"),
            row(6, "Wave Pattern", Category::Coastal, Style::Modern, ["blue", "teal"], 16.0, "/assets/icon-sailboat.svg"),
            row(7, "Ship Wheel", Category::Sailing, Style::Vintage, ["navy", "gold"], 20.0, "/assets/icon-compass.svg"),
            row(8, "Marine Life", Category::Marine, Style::Modern, ["green", "blue"], 13.0, "/assets/icon-lighthouse.svg"),
        ])
    }

    /// Loads a catalog from a JSON array of items
    ///
    /// Rejects duplicate ids and non-positive prices.
    pub fn from_json_file(path: &Path) -> AppResult<Self> {
        let raw = std::fs::read_to_string(path)?;
        let items: Vec<CatalogItem> = serde_json::from_str(&raw)?;
        let catalog = Self::new(items);
        catalog.validate()?;

        tracing::info!(path = %path.display(), items = catalog.len(), "Catalog loaded");
        Ok(catalog)
    }

    fn validate(&self) -> AppResult<()> {
        for (i, item) in self.items.iter().enumerate() {
            if item.price.is_nan() || item.price <= 0.0 {
                return Err(AppError::InvalidInput(format!(
                    "Catalog item {} has non-positive price {}",
                    item.id, item.price
                )));
            }
            if self.items[..i].iter().any(|other| other.id == item.id) {
                return Err(AppError::InvalidInput(format!(
                    "Duplicate catalog item id {}",
                    item.id
                )));
            }
        }
        Ok(())
    }

    pub fn items(&self) -> &[CatalogItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, id: u32) -> Option<&CatalogItem> {
        self.items.iter().find(|item| item.id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_builtin_catalog() {
        let catalog = Catalog::sailing_stickers();
        assert_eq!(catalog.len(), 8);
        assert_eq!(catalog.get(7).unwrap().name, "Ship Wheel");
        assert!(catalog.get(9).is_none());
    }

    #[test]
    fn test_from_json_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"[{{"id": 1, "name": "Buoy", "category": "marine", "style": "modern", "colors": ["red"], "price": 9.5, "image": "buoy.svg"}}]"#
        )
        .unwrap();

        let catalog = Catalog::from_json_file(file.path()).unwrap();
        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog.items()[0].category, Category::Marine);
    }

    #[test]
    fn test_repeated_colors_count_once() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"[{{"id": 1, "name": "Buoy", "category": "marine", "style": "modern", "colors": ["navy", "navy"], "price": 9.5, "image": "buoy.svg"}}]"#
        )
        .unwrap();

        let catalog = Catalog::from_json_file(file.path()).unwrap();
        let buoy = catalog.get(1).unwrap();
        assert_eq!(buoy.colors, vec!["navy"]);
        assert_eq!(buoy.color_overlap(&["navy".to_string()]), 1);
    }

    #[test]
    fn test_from_json_file_rejects_duplicate_ids() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"[
                {{"id": 1, "name": "Buoy", "category": "marine", "style": "modern", "colors": [], "price": 9, "image": ""}},
                {{"id": 1, "name": "Knot", "category": "nautical", "style": "classic", "colors": [], "price": 9, "image": ""}}
            ]"#
        )
        .unwrap();

        let result = Catalog::from_json_file(file.path());
        assert!(matches!(result, Err(AppError::InvalidInput(_))));
    }

    #[test]
    fn test_from_json_file_missing() {
        let result = Catalog::from_json_file(Path::new("/nonexistent/catalog.json"));
        assert!(matches!(result, Err(AppError::Io(_))));
    }
}
