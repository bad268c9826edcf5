use chrono::{DateTime, TimeZone};
use serde::Serialize;
use std::sync::Arc;

use crate::normalize::clean_text;
use crate::ranking::rank;
use crate::recency::{parse_pub_date, RecencyWindow};
use crate::rules::RuleSet;
use crate::scoring::{score, Verdict};
use crate::types::{RankedArticle, SearchPage};

/// The ranked answer to one search.
#[derive(Debug, Clone, Serialize)]
pub struct Digest {
    pub total_scanned: u64,
    pub filtered_count: usize,
    pub items: Vec<RankedArticle>,
}

/// Cleans, gates, scores, filters and ranks provider results. Holds nothing
/// but the shared rule set, so it is cheap to clone.
#[derive(Debug, Clone)]
pub struct Engine {
    rules: Arc<RuleSet>,
}

impl Engine {
    pub fn new(rules: Arc<RuleSet>) -> Self {
        Self { rules }
    }

    pub fn rules(&self) -> &RuleSet {
        &self.rules
    }

    pub fn window(&self) -> RecencyWindow {
        RecencyWindow::days(self.rules.recency_window_days)
    }

    /// Scores a single record after cleaning it.
    pub fn judge(&self, title: &str, description: &str) -> Verdict {
        score(&self.rules, &clean_text(title), &clean_text(description))
    }

    pub fn process<Tz: TimeZone>(&self, page: SearchPage, now: &DateTime<Tz>) -> Digest {
        let window = self.window();
        let cutoff = window.cutoff(now);
        let scanned = page.items.len();
        let mut rejected = 0usize;
        let mut stale = 0usize;

        let mut passed = Vec::with_capacity(scanned);
        for candidate in page.items {
            let title = clean_text(&candidate.title);
            let description = clean_text(&candidate.description);

            let Some(points) = score(&self.rules, &title, &description).score() else {
                rejected += 1;
                continue;
            };

            let published_at = parse_pub_date(&candidate.pub_date);
            if !published_at.is_some_and(|p| window.admits(&p, &cutoff)) {
                stale += 1;
                continue;
            }

            passed.push(RankedArticle {
                title,
                link: candidate.link,
                original_link: candidate.original_link,
                description,
                pub_date: candidate.pub_date,
                score: points,
                published_at,
            });
        }

        tracing::debug!(
            "Scanned {} candidates: {} rejected by keywords, {} older than {}",
            scanned,
            rejected,
            stale,
            cutoff
        );

        let ranking = rank(passed, self.rules.tie_break, self.rules.top_n);
        Digest {
            total_scanned: page.total,
            filtered_count: ranking.filtered_count,
            items: ranking.items,
        }
    }
}
