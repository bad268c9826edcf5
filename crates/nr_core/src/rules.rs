//! Keyword rubric used to gate and score articles.
//!
//! A rule set is loaded once at startup from a JSON document and shared
//! read-only by every request. The built-in document targets Korea Customs
//! Service coverage.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::{Error, Result};

const BUILTIN_RULES: &str = include_str!("../rules/customs.json");

/// Points awarded per keyword hit, by category and field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreWeights {
    pub primary_title: u32,
    pub primary_body: u32,
    pub secondary_title: u32,
    pub secondary_body: u32,
}

/// How the exclude/must-have gate reads the article.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GateMode {
    /// Title and description joined by a single space.
    #[default]
    Combined,
    /// Title and description checked independently.
    PerField,
}

/// Ordering applied between articles with equal scores.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TieBreak {
    /// Keep the provider's order.
    None,
    /// Most recently published first.
    #[default]
    Recency,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleSet {
    pub search_query: String,
    pub weights: ScoreWeights,
    pub primary_keywords: Vec<String>,
    pub secondary_keywords: Vec<String>,
    #[serde(default)]
    pub exclude_keywords: Vec<String>,
    pub must_have_keywords: Vec<String>,
    #[serde(default = "default_window_days")]
    pub recency_window_days: u32,
    #[serde(default = "default_top_n")]
    pub top_n: usize,
    #[serde(default)]
    pub tie_break: TieBreak,
    #[serde(default)]
    pub gate: GateMode,
}

fn default_window_days() -> u32 {
    7
}

fn default_top_n() -> usize {
    15
}

impl RuleSet {
    /// The rule document compiled into the binary.
    pub fn builtin() -> Result<Self> {
        Self::from_json_str(BUILTIN_RULES)
    }

    pub fn from_json_str(json: &str) -> Result<Self> {
        let rules: RuleSet = serde_json::from_str(json)?;
        rules.validate()?;
        Ok(rules)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        tracing::debug!("Loaded rule document from {}", path.display());
        Self::from_json_str(&json)
    }

    /// Loads `path` when given, the built-in document otherwise.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::from_path(path),
            None => Self::builtin(),
        }
    }

    pub fn with_window_days(mut self, days: u32) -> Self {
        self.recency_window_days = days;
        self
    }

    pub fn validate(&self) -> Result<()> {
        let w = &self.weights;
        if [w.primary_title, w.primary_body, w.secondary_title, w.secondary_body].contains(&0) {
            return Err(Error::InvalidRules("all weights must be positive".to_string()));
        }
        if self.must_have_keywords.is_empty() {
            return Err(Error::InvalidRules(
                "must_have_keywords must not be empty".to_string(),
            ));
        }
        if self.top_n == 0 {
            return Err(Error::InvalidRules("top_n must be positive".to_string()));
        }

        let lists = [
            ("primary_keywords", &self.primary_keywords),
            ("secondary_keywords", &self.secondary_keywords),
            ("exclude_keywords", &self.exclude_keywords),
            ("must_have_keywords", &self.must_have_keywords),
        ];
        for (name, list) in lists {
            // An empty keyword is a substring of everything.
            if list.iter().any(|kw| kw.trim().is_empty()) {
                return Err(Error::InvalidRules(format!("{} contains an empty keyword", name)));
            }
        }
        Ok(())
    }
}
