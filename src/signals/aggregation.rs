//! Weighted aggregation of category membership into per-symbol scores.

use std::collections::{HashMap, HashSet};

use crate::config::CategoryConfig;
use crate::models::ScoreRecord;

pub struct ScoreAggregator;

impl ScoreAggregator {
    /// Merge per-category symbol sets into one weighted score per symbol.
    ///
    /// A symbol's score is the sum of the weights of every category that
    /// contains it. Records come back in first-seen order, which the
    /// ranker's stable sort preserves as the tie-break; membership sets
    /// are unordered, so within one category symbols enter in lexical
    /// order to keep that tie-break reproducible. Pure function of its
    /// inputs.
    pub fn aggregate(results: &[(CategoryConfig, HashSet<String>)]) -> Vec<ScoreRecord> {
        let mut records: Vec<ScoreRecord> = Vec::new();
        let mut index: HashMap<String, usize> = HashMap::new();

        for (category, symbols) in results {
            let mut symbols: Vec<&String> = symbols.iter().collect();
            symbols.sort();
            for symbol in symbols {
                let at = *index.entry(symbol.clone()).or_insert_with(|| {
                    records.push(ScoreRecord::new(symbol.clone()));
                    records.len() - 1
                });
                records[at].score += category.weight;
                records[at].categories.push(category.name.clone());
            }
        }

        records
    }
}
