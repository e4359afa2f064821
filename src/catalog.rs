//! # Catalog Reader
//!
//! Series and style metadata belong to the catalog service. The engine only
//! reads it: which styles a series has when a box is sealed, and the display
//! data of a style when a purchase is recorded.
//!
//! [`InMemoryCatalog`] is a fixed catalog for tests and the demo binary.

use crate::model::{SeriesId, StyleId};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum CatalogError {
    #[error("Catalog unavailable: {0}")]
    Unavailable(String),
}

/// A style as listed under its series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StyleSummary {
    pub id: StyleId,
    pub name: String,
    pub is_hidden: bool,
    pub cover: Option<String>,
}

/// Everything a purchase record copies about the drawn style.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StyleDetail {
    pub name: String,
    pub cover: Option<String>,
    pub series_id: SeriesId,
    pub series_name: String,
    pub series_cover: Option<String>,
    pub is_hidden: bool,
}

#[async_trait]
pub trait CatalogReader: Send + Sync {
    /// Styles of a series in catalog order. Unknown series yield an empty list.
    async fn styles_for_series(&self, series_id: SeriesId)
        -> Result<Vec<StyleSummary>, CatalogError>;

    async fn style(&self, style_id: StyleId) -> Result<Option<StyleDetail>, CatalogError>;
}

#[derive(Debug, Clone)]
struct SeriesEntry {
    name: String,
    cover: Option<String>,
    styles: Vec<StyleSummary>,
}

/// Immutable in-memory catalog, assembled with a builder.
///
/// ```rust
/// use blindbox_engine::catalog::InMemoryCatalog;
/// use blindbox_engine::model::{SeriesId, StyleId};
///
/// let catalog = InMemoryCatalog::new()
///     .add_series(SeriesId(1), "Forest Friends", None)
///     .add_style(SeriesId(1), StyleId(1), "Fox", false, None)
///     .add_style(SeriesId(1), StyleId(9), "Golden Stag", true, None);
/// ```
#[derive(Debug, Clone, Default)]
pub struct InMemoryCatalog {
    series: BTreeMap<SeriesId, SeriesEntry>,
}

impl InMemoryCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_series(
        mut self,
        id: SeriesId,
        name: impl Into<String>,
        cover: Option<String>,
    ) -> Self {
        self.series.insert(
            id,
            SeriesEntry {
                name: name.into(),
                cover,
                styles: Vec::new(),
            },
        );
        self
    }

    /// Adds a style to an existing series. Styles of unknown series are ignored.
    pub fn add_style(
        mut self,
        series_id: SeriesId,
        id: StyleId,
        name: impl Into<String>,
        is_hidden: bool,
        cover: Option<String>,
    ) -> Self {
        if let Some(entry) = self.series.get_mut(&series_id) {
            entry.styles.push(StyleSummary {
                id,
                name: name.into(),
                is_hidden,
                cover,
            });
        }
        self
    }
}

#[async_trait]
impl CatalogReader for InMemoryCatalog {
    async fn styles_for_series(
        &self,
        series_id: SeriesId,
    ) -> Result<Vec<StyleSummary>, CatalogError> {
        Ok(self
            .series
            .get(&series_id)
            .map(|entry| entry.styles.clone())
            .unwrap_or_default())
    }

    async fn style(&self, style_id: StyleId) -> Result<Option<StyleDetail>, CatalogError> {
        let found = self.series.iter().find_map(|(series_id, entry)| {
            entry
                .styles
                .iter()
                .find(|style| style.id == style_id)
                .map(|style| StyleDetail {
                    name: style.name.clone(),
                    cover: style.cover.clone(),
                    series_id: *series_id,
                    series_name: entry.name.clone(),
                    series_cover: entry.cover.clone(),
                    is_hidden: style.is_hidden,
                })
        });
        Ok(found)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog() -> InMemoryCatalog {
        InMemoryCatalog::new()
            .add_series(SeriesId(1), "Forest", Some("forest.png".into()))
            .add_style(SeriesId(1), StyleId(3), "Owl", false, None)
            .add_style(SeriesId(1), StyleId(1), "Fox", false, Some("fox.png".into()))
            .add_style(SeriesId(1), StyleId(9), "Stag", true, None)
            .add_style(SeriesId(2), StyleId(5), "Orphan", false, None)
    }

    #[tokio::test]
    async fn test_styles_keep_insertion_order() {
        let styles = catalog().styles_for_series(SeriesId(1)).await.unwrap();
        let ids: Vec<StyleId> = styles.iter().map(|s| s.id).collect();
        assert_eq!(ids, vec![StyleId(3), StyleId(1), StyleId(9)]);

        assert!(catalog().styles_for_series(SeriesId(2)).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_style_detail_carries_series_metadata() {
        let detail = catalog().style(StyleId(1)).await.unwrap().unwrap();
        assert_eq!(detail.name, "Fox");
        assert_eq!(detail.cover.as_deref(), Some("fox.png"));
        assert_eq!(detail.series_name, "Forest");
        assert_eq!(detail.series_cover.as_deref(), Some("forest.png"));
        assert!(!detail.is_hidden);

        assert!(catalog().style(StyleId(42)).await.unwrap().is_none());
    }
}
