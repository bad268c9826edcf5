use serde::Serialize;

use crate::rules::{GateMode, RuleSet};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "reason", rename_all = "snake_case")]
pub enum RejectReason {
    /// An exclude keyword appeared somewhere in the article.
    Excluded { keyword: String },
    /// None of the must-have keywords appeared.
    MissingRequired,
}

/// Outcome of scoring one article.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "verdict", rename_all = "snake_case")]
pub enum Verdict {
    Accepted { score: u32 },
    Rejected(RejectReason),
}

impl Verdict {
    pub fn score(&self) -> Option<u32> {
        match self {
            Verdict::Accepted { score } => Some(*score),
            Verdict::Rejected(_) => None,
        }
    }

    pub fn is_accepted(&self) -> bool {
        matches!(self, Verdict::Accepted { .. })
    }

    /// The score, or -1 for a rejection.
    pub fn legacy_value(&self) -> i64 {
        self.score().map_or(-1, i64::from)
    }
}

/// Scores cleaned text against the rubric. Matching is plain substring
/// search so keywords inside compound words still count.
pub fn score(rules: &RuleSet, title: &str, description: &str) -> Verdict {
    let combined = format!("{} {}", title, description);
    let contains = |kw: &str| match rules.gate {
        GateMode::Combined => combined.contains(kw),
        GateMode::PerField => title.contains(kw) || description.contains(kw),
    };

    if let Some(keyword) = rules.exclude_keywords.iter().find(|kw| contains(kw.as_str())) {
        return Verdict::Rejected(RejectReason::Excluded {
            keyword: keyword.clone(),
        });
    }
    if !rules.must_have_keywords.iter().any(|kw| contains(kw.as_str())) {
        return Verdict::Rejected(RejectReason::MissingRequired);
    }

    let w = &rules.weights;
    let mut total = 0u32;
    for kw in &rules.primary_keywords {
        if title.contains(kw.as_str()) {
            total = total.saturating_add(w.primary_title);
        }
        if description.contains(kw.as_str()) {
            total = total.saturating_add(w.primary_body);
        }
    }
    for kw in &rules.secondary_keywords {
        if title.contains(kw.as_str()) {
            total = total.saturating_add(w.secondary_title);
        }
        if description.contains(kw.as_str()) {
            total = total.saturating_add(w.secondary_body);
        }
    }

    Verdict::Accepted { score: total }
}
