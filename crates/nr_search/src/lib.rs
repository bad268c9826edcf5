use async_trait::async_trait;
use nr_core::{Result, SearchPage, SearchRequest};

pub mod fixture;
pub mod naver;

pub use fixture::FixtureSource;
pub use naver::{NaverConfig, NaverSource};

/// A news search provider queried once per request.
#[async_trait]
pub trait NewsSource: Send + Sync {
    /// Returns the name of the provider
    fn name(&self) -> &str;

    /// Runs one search. Failures are returned as is; nothing is retried.
    async fn search(&self, request: &SearchRequest) -> Result<SearchPage>;
}

pub mod prelude {
    pub use super::NewsSource;
    pub use nr_core::{Error, Result, SearchPage, SearchRequest, SortMode};
}
