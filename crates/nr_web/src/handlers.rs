use axum::{
    extract::{rejection::QueryRejection, Query, State},
    Json,
};
use nr_core::{Digest, RankedArticle, RuleSet, SearchRequest, SortMode};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::error::ApiError;
use crate::logging::Logger;
use crate::AppState;

/// Query string accepted by the search endpoint. Numbers arrive as text so
/// malformed values get the same error envelope as out-of-range ones.
#[derive(Debug, Default, Deserialize)]
pub struct SearchParams {
    pub query: Option<String>,
    pub display: Option<String>,
    pub sort: Option<String>,
}

impl SearchParams {
    pub fn into_request(self, rules: &RuleSet) -> nr_core::Result<SearchRequest> {
        let display = match self.display.as_deref().map(str::trim).filter(|d| !d.is_empty()) {
            Some(raw) => Some(raw.parse::<u32>().map_err(|_| {
                nr_core::Error::InvalidParameter(format!("display must be a number, got '{}'", raw))
            })?),
            None => None,
        };
        let sort = match self.sort.as_deref().filter(|s| !s.trim().is_empty()) {
            Some(raw) => Some(SortMode::parse(raw)?),
            None => None,
        };
        SearchRequest::resolve(self.query.as_deref(), display, sort, &rules.search_query)
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct NewsEnvelope {
    pub total_scanned: u64,
    pub filtered_count: usize,
    pub items: Vec<RankedArticle>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl NewsEnvelope {
    pub fn no_results(query: &str) -> Self {
        Self {
            total_scanned: 0,
            filtered_count: 0,
            items: vec![],
            message: Some(format!("네이버 검색 결과가 0건입니다. 검색어: {}", query)),
        }
    }
}

impl From<Digest> for NewsEnvelope {
    fn from(digest: Digest) -> Self {
        Self {
            total_scanned: digest.total_scanned,
            filtered_count: digest.filtered_count,
            items: digest.items,
            message: None,
        }
    }
}

/// Runs one provider search and answers with the ranked envelope.
pub async fn run_search(state: &AppState, request: &SearchRequest) -> nr_core::Result<NewsEnvelope> {
    let log = Logger::new()
        .with_prefix("🔎".to_string())
        .with_prefix(format!("[{}]", request.query));
    log.info(&format!(
        "Searching {} (display={}, sort={})",
        state.source.name(),
        request.display,
        request.sort
    ));

    let page = match state.source.search(request).await {
        Ok(page) => page,
        Err(e) => {
            log.error(&format!("Search failed: {}", e));
            return Err(e);
        }
    };

    if page.total == 0 {
        log.warn("No matches upstream");
        return Ok(NewsEnvelope::no_results(&request.query));
    }

    let digest = state.clock.digest(&state.engine, page);
    log.info(&format!(
        "✨ {} scanned, {} passed, returning {}",
        digest.total_scanned,
        digest.filtered_count,
        digest.items.len()
    ));
    Ok(digest.into())
}

pub async fn search_news(
    State(state): State<Arc<AppState>>,
    params: Result<Query<SearchParams>, QueryRejection>,
) -> Result<Json<NewsEnvelope>, ApiError> {
    let Query(params) = params
        .map_err(|rejection| nr_core::Error::InvalidParameter(rejection.body_text()))?;
    let request = params.into_request(state.engine.rules())?;
    let envelope = run_search(&state, &request).await?;
    Ok(Json(envelope))
}
