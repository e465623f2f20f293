use tracing::debug;

use crate::domain::models::Rankable;
use crate::domain::score::score;

/// A candidate paired with the score it earned against one query.
#[derive(Debug, Clone, PartialEq)]
pub struct Ranked<T> {
    pub item: T,
    pub score: f64,
}

/// Scores every candidate against `query`, drops non-matches and returns the
/// rest best-first. Candidates with equal scores keep their input order.
pub fn rank<T: Rankable + Clone>(candidates: &[T], query: &str) -> Vec<T> {
    rank_scored(candidates, query)
        .into_iter()
        .map(|ranked| ranked.item)
        .collect()
}

pub fn rank_scored<T: Rankable + Clone>(candidates: &[T], query: &str) -> Vec<Ranked<T>> {
    let mut scored: Vec<Ranked<T>> = candidates
        .iter()
        .filter_map(|candidate| {
            let score = score(candidate.name(), query, candidate.aliases());
            (score > 0.0).then(|| Ranked {
                item: candidate.clone(),
                score,
            })
        })
        .collect();

    // sort_by is stable; ties stay in input order.
    scored.sort_by(|a, b| b.score.total_cmp(&a.score));

    debug!(
        query,
        candidates = candidates.len(),
        retained = scored.len(),
        "ranked candidates"
    );
    scored
}
