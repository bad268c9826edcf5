use async_trait::async_trait;
use nr_core::{Result, SearchPage, SearchRequest};
use std::path::Path;

use crate::NewsSource;

/// Replays a saved provider response. Used for offline runs and tests.
#[derive(Debug, Clone)]
pub struct FixtureSource {
    page: SearchPage,
}

impl FixtureSource {
    pub fn new(page: SearchPage) -> Self {
        Self { page }
    }

    /// Loads a file holding a provider response body (`total` + `items`).
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        Ok(Self::new(serde_json::from_str(&json)?))
    }
}

#[async_trait]
impl NewsSource for FixtureSource {
    fn name(&self) -> &str {
        "Fixture"
    }

    async fn search(&self, request: &SearchRequest) -> Result<SearchPage> {
        let mut page = self.page.clone();
        page.items.truncate(request.display as usize);
        Ok(page)
    }
}
