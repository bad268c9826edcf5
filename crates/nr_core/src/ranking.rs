use std::cmp::Ordering;

use crate::rules::TieBreak;
use crate::types::RankedArticle;

/// Sorted, truncated output plus the pre-truncation count.
#[derive(Debug, Clone)]
pub struct Ranking {
    pub filtered_count: usize,
    pub items: Vec<RankedArticle>,
}

/// Orders by score (highest first), then by the tie-break policy, and keeps
/// the first `top_n`. The sort is stable, so equal keys keep input order.
pub fn rank(mut items: Vec<RankedArticle>, tie_break: TieBreak, top_n: usize) -> Ranking {
    items.sort_by(|a, b| {
        let by_score = b.score.cmp(&a.score);
        match tie_break {
            TieBreak::None => by_score,
            TieBreak::Recency => by_score.then_with(|| newest_first(a, b)),
        }
    });

    let filtered_count = items.len();
    items.truncate(top_n);
    Ranking {
        filtered_count,
        items,
    }
}

fn newest_first(a: &RankedArticle, b: &RankedArticle) -> Ordering {
    // Undated entries sink below dated ones.
    b.published_at.cmp(&a.published_at)
}
