//! Mock Overpass source for development and testing without network access.
//!
//! Serves a fixed set of elements, loaded from memory or from a saved
//! Overpass JSON response, as if they were live API results.

use std::path::Path;

use futures::FutureExt;
use futures::future::BoxFuture;

use crate::domain::SearchArea;

use super::StationSource;
use super::error::OverpassError;
use super::types::{OverpassResponse, RawElement};

/// Mock Overpass source that serves pre-loaded elements.
///
/// Elements with a known position outside the requested area are dropped,
/// so radius semantics match the real API. Elements without any position
/// are always returned.
#[derive(Debug, Default)]
pub struct MockOverpass {
    elements: Vec<RawElement>,
}

impl MockOverpass {
    /// Create a mock serving the given elements.
    pub fn new(elements: Vec<RawElement>) -> Self {
        Self { elements }
    }

    /// Load elements from a file holding an Overpass JSON response.
    ///
    /// Accepts either the full response object (`{"elements": [...]}`) or a
    /// bare array of elements.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, OverpassError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|e| OverpassError::Mock {
            message: format!("failed to read {}: {}", path.display(), e),
        })?;

        let elements = match serde_json::from_str::<OverpassResponse>(&json) {
            Ok(response) => response.elements,
            Err(_) => serde_json::from_str::<Vec<RawElement>>(&json).map_err(|e| {
                OverpassError::Mock {
                    message: format!("failed to parse {}: {}", path.display(), e),
                }
            })?,
        };

        Ok(Self::new(elements))
    }

    /// Number of elements held.
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    fn select(&self, area: &SearchArea) -> Vec<RawElement> {
        self.elements
            .iter()
            .filter(|el| el.position().is_none_or(|pos| area.contains(&pos)))
            .cloned()
            .collect()
    }
}

impl StationSource for MockOverpass {
    fn fetch_elements<'a>(
        &'a self,
        area: &'a SearchArea,
    ) -> BoxFuture<'a, Result<Vec<RawElement>, OverpassError>> {
        let elements = self.select(area);
        async move { Ok(elements) }.boxed()
    }
}
