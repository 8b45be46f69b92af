//! Candidate ranking: threshold, order, truncate.

use crate::models::ScoreRecord;

pub struct CandidateRanker;

impl CandidateRanker {
    /// Order records descending by score, drop anything under
    /// `min_score`, and cap the universe at `max_universe` entries.
    ///
    /// The input is expected in first-seen order; the stable sort keeps
    /// that order for equal scores, so two runs over identical inputs
    /// rank identically. Nothing clearing the threshold yields an empty
    /// list, not an error.
    pub fn rank(
        mut records: Vec<ScoreRecord>,
        min_score: u32,
        max_universe: usize,
    ) -> Vec<ScoreRecord> {
        records.retain(|record| record.score >= min_score);
        records.sort_by(|a, b| b.score.cmp(&a.score));
        records.truncate(max_universe);
        records
    }
}
