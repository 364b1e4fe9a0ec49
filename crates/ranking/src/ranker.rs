//! Top-K selection and the student-friendly composite list.

use crate::candidate::Candidate;
use crate::scorer::is_student_friendly;
use catalog::RestaurantId;
use std::collections::HashSet;
use tracing::debug;

/// Length of the student-friendly list
pub const STUDENT_LIST_SIZE: usize = 8;

/// Length of the budget list the student list is drawn from
pub const STUDENT_SOURCE_SIZE: usize = 10;

/// Length of the quick-lunch list
pub const QUICK_LUNCH_LIST_SIZE: usize = 8;

/// A candidate with its score under one objective.
#[derive(Debug, Clone, Copy)]
pub struct ScoredCandidate<'a> {
    pub candidate: Candidate<'a>,
    pub score: f64,
}

impl<'a> ScoredCandidate<'a> {
    pub fn new(candidate: Candidate<'a>, score: f64) -> Self {
        Self { candidate, score }
    }

    pub fn id(&self) -> RestaurantId {
        self.candidate.restaurant.id
    }
}

/// Sort descending by score and keep the first `k`.
///
/// The sort is stable: equal scores keep their input order, which is
/// catalog order for freshly built candidates.
pub fn rank(mut scored: Vec<ScoredCandidate<'_>>, k: usize) -> Vec<ScoredCandidate<'_>> {
    scored.sort_by(|a, b| b.score.total_cmp(&a.score));
    scored.truncate(k);
    scored
}

/// Score every candidate with `scorer`, then [`rank`].
pub fn score_and_rank<'a, F>(candidates: Vec<Candidate<'a>>, k: usize, scorer: F) -> Vec<ScoredCandidate<'a>>
where
    F: Fn(&Candidate<'a>) -> f64,
{
    let scored = candidates
        .into_iter()
        .map(|candidate| {
            let score = scorer(&candidate);
            ScoredCandidate::new(candidate, score)
        })
        .collect();
    rank(scored, k)
}

/// Reorder a budget list so student-friendly restaurants come first.
///
/// Qualifying entries keep their relative order, the rest backfill in
/// order, no id appears twice, and the result has at most
/// [`STUDENT_LIST_SIZE`] entries.
pub fn student_friendly(source: Vec<ScoredCandidate<'_>>) -> Vec<ScoredCandidate<'_>> {
    let (qualifying, rest): (Vec<_>, Vec<_>) = source
        .into_iter()
        .partition(|s| is_student_friendly(s.candidate.restaurant));
    debug!(
        "Student list: {} qualifying, {} backfill",
        qualifying.len(),
        rest.len()
    );

    let mut seen: HashSet<RestaurantId> = HashSet::new();
    qualifying
        .into_iter()
        .chain(rest)
        .filter(|s| seen.insert(s.id()))
        .take(STUDENT_LIST_SIZE)
        .collect()
}
