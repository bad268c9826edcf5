use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A raw news record as returned by the search provider. Title and
/// description may still carry markup.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CandidateArticle {
    pub title: String,
    #[serde(default, rename = "originallink", skip_serializing_if = "Option::is_none")]
    pub original_link: Option<String>,
    #[serde(default)]
    pub link: String,
    #[serde(default)]
    pub description: String,
    /// Left empty when the provider omits it; the recency filter drops such records.
    #[serde(default, rename = "pubDate")]
    pub pub_date: String,
}

/// A candidate that survived gating and the recency filter.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RankedArticle {
    pub title: String,
    pub link: String,
    #[serde(rename = "originallink", skip_serializing_if = "Option::is_none")]
    pub original_link: Option<String>,
    pub description: String,
    #[serde(rename = "pubDate")]
    pub pub_date: String,
    pub score: u32,
    #[serde(skip)]
    pub published_at: Option<DateTime<FixedOffset>>,
}

/// Result ordering requested from the provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SortMode {
    #[default]
    #[serde(rename = "date")]
    Date,
    #[serde(rename = "sim")]
    Relevance,
}

impl SortMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortMode::Date => "date",
            SortMode::Relevance => "sim",
        }
    }

    pub fn parse(value: &str) -> crate::Result<Self> {
        match value.trim() {
            "date" => Ok(SortMode::Date),
            "sim" | "relevance" => Ok(SortMode::Relevance),
            other => Err(crate::Error::InvalidParameter(format!(
                "sort must be 'date' or 'sim', got '{}'",
                other
            ))),
        }
    }
}

impl fmt::Display for SortMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One call to the search provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchRequest {
    pub query: String,
    pub display: u32,
    pub sort: SortMode,
}

impl SearchRequest {
    pub const MAX_DISPLAY: u32 = 100;

    /// Validates the inbound parameters and resolves a blank query to the
    /// rule set's default. Never touches the network.
    pub fn resolve(
        query: Option<&str>,
        display: Option<u32>,
        sort: Option<SortMode>,
        default_query: &str,
    ) -> crate::Result<Self> {
        let query = match query.map(str::trim).filter(|q| !q.is_empty()) {
            Some(q) => q.to_string(),
            None if !default_query.trim().is_empty() => default_query.to_string(),
            None => return Err(crate::Error::MissingParameter("query".to_string())),
        };

        let display = display.unwrap_or(Self::MAX_DISPLAY);
        if display == 0 || display > Self::MAX_DISPLAY {
            return Err(crate::Error::InvalidParameter(format!(
                "display must be between 1 and {}, got {}",
                Self::MAX_DISPLAY,
                display
            )));
        }

        Ok(Self {
            query,
            display,
            sort: sort.unwrap_or_default(),
        })
    }
}

/// What the provider returned for one request.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SearchPage {
    pub total: u64,
    #[serde(default)]
    pub items: Vec<CandidateArticle>,
}
