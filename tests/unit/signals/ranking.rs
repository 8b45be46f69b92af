//! Unit tests for candidate ranking

use tapescan::models::ScoreRecord;
use tapescan::signals::CandidateRanker;

fn record(symbol: &str, score: u32) -> ScoreRecord {
    ScoreRecord {
        symbol: symbol.to_string(),
        score,
        categories: Vec::new(),
    }
}

#[test]
fn test_rank_orders_descending() {
    let records = vec![record("A", 2), record("B", 7), record("C", 5)];
    let ranked = CandidateRanker::rank(records, 0, 10);
    let symbols: Vec<&str> = ranked.iter().map(|r| r.symbol.as_str()).collect();
    assert_eq!(symbols, vec!["B", "C", "A"]);
}

#[test]
fn test_rank_filters_below_min_score() {
    let records = vec![record("A", 2), record("B", 7), record("C", 5)];
    let ranked = CandidateRanker::rank(records, 5, 10);
    let symbols: Vec<&str> = ranked.iter().map(|r| r.symbol.as_str()).collect();
    assert_eq!(symbols, vec!["B", "C"]);
}

#[test]
fn test_rank_breaks_ties_by_first_seen() {
    let records = vec![
        record("LATE", 3),
        record("EARLY", 5),
        record("MIDDLE", 5),
        record("ALSO", 3),
    ];
    let ranked = CandidateRanker::rank(records, 0, 10);
    let symbols: Vec<&str> = ranked.iter().map(|r| r.symbol.as_str()).collect();
    assert_eq!(symbols, vec!["EARLY", "MIDDLE", "LATE", "ALSO"]);
}

#[test]
fn test_rank_truncates_to_universe_size() {
    let records: Vec<ScoreRecord> = (0..10).map(|i| record(&format!("S{}", i), i)).collect();
    let ranked = CandidateRanker::rank(records, 0, 3);
    assert_eq!(ranked.len(), 3);
    assert_eq!(ranked[0].score, 9);
}

#[test]
fn test_rank_empty_when_nothing_clears_threshold() {
    let records = vec![record("A", 1), record("B", 2)];
    assert!(CandidateRanker::rank(records, 10, 5).is_empty());
}

#[test]
fn test_rank_monotone_scores() {
    let records = vec![
        record("A", 4),
        record("B", 9),
        record("C", 4),
        record("D", 6),
    ];
    let ranked = CandidateRanker::rank(records, 0, 10);
    for pair in ranked.windows(2) {
        assert!(pair[0].score >= pair[1].score);
    }
}
