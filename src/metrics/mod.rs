//! Run counters and timings, prometheus text format.
//!
//! There is no scrape endpoint: the pipeline logs the export at the end
//! of each run.

use prometheus::{Histogram, HistogramOpts, IntCounter, Registry, TextEncoder};

pub struct Metrics {
    registry: Registry,
    pub runs_total: IntCounter,
    pub category_empty_total: IntCounter,
    pub candidates_evaluated_total: IntCounter,
    pub candidates_skipped_total: IntCounter,
    pub alerts_sent_total: IntCounter,
    pub notification_failures_total: IntCounter,
    pub candidate_evaluation_seconds: Histogram,
}

impl Metrics {
    pub fn new() -> Result<Self, prometheus::Error> {
        let registry = Registry::new();

        let runs_total = IntCounter::new("scanner_runs_total", "Completed pipeline runs")?;
        let category_empty_total = IntCounter::new(
            "scanner_category_empty_total",
            "Category feeds that returned no symbols",
        )?;
        let candidates_evaluated_total = IntCounter::new(
            "scanner_candidates_evaluated_total",
            "Candidates run through the confirmation engine",
        )?;
        let candidates_skipped_total = IntCounter::new(
            "scanner_candidates_skipped_total",
            "Candidates skipped for insufficient data or fetch timeout",
        )?;
        let alerts_sent_total =
            IntCounter::new("scanner_alerts_sent_total", "Alerts handed to the notifier")?;
        let notification_failures_total = IntCounter::new(
            "scanner_notification_failures_total",
            "Notifier sends that failed and were swallowed",
        )?;
        let candidate_evaluation_seconds = Histogram::with_opts(HistogramOpts::new(
            "scanner_candidate_evaluation_seconds",
            "Wall time to fetch and evaluate one candidate",
        ))?;

        registry.register(Box::new(runs_total.clone()))?;
        registry.register(Box::new(category_empty_total.clone()))?;
        registry.register(Box::new(candidates_evaluated_total.clone()))?;
        registry.register(Box::new(candidates_skipped_total.clone()))?;
        registry.register(Box::new(alerts_sent_total.clone()))?;
        registry.register(Box::new(notification_failures_total.clone()))?;
        registry.register(Box::new(candidate_evaluation_seconds.clone()))?;

        Ok(Self {
            registry,
            runs_total,
            category_empty_total,
            candidates_evaluated_total,
            candidates_skipped_total,
            alerts_sent_total,
            notification_failures_total,
            candidate_evaluation_seconds,
        })
    }

    pub fn export(&self) -> Result<String, prometheus::Error> {
        TextEncoder::new().encode_to_string(&self.registry.gather())
    }
}
