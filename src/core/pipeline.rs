//! Run orchestration: category sweep, ranking, confirmation, delivery.

use std::sync::Arc;
use std::time::{Duration, Instant};

use tokio::sync::Semaphore;
use tokio::time::timeout;
use tracing::{debug, info, warn};

use crate::config::ScannerConfig;
use crate::indicators::{IndicatorError, IndicatorSnapshot};
use crate::metrics::Metrics;
use crate::models::{ConfirmationResult, ConfirmationTier, ScoreRecord, TradeAlert};
use crate::services::{BarProvider, CategorySource, Notifier, RequestSpacer};
use crate::signals::{
    AlertDeduplicator, CandidateRanker, ConfirmationEngine, EvaluationContext, ScoreAggregator,
};

/// What one run produced: the raw momentum snapshot plus the alerts that
/// cleared confirmation and deduplication.
#[derive(Debug, Default)]
pub struct ScanOutcome {
    pub snapshot: Vec<ScoreRecord>,
    pub alerts: Vec<TradeAlert>,
}

pub struct ScanPipeline {
    config: ScannerConfig,
    categories: Arc<dyn CategorySource>,
    bars: Arc<dyn BarProvider>,
    notifier: Arc<dyn Notifier>,
    dedup: Arc<AlertDeduplicator>,
    metrics: Option<Arc<Metrics>>,
    engine: ConfirmationEngine,
    spacer: Arc<RequestSpacer>,
}

impl ScanPipeline {
    pub fn new(
        config: ScannerConfig,
        categories: Arc<dyn CategorySource>,
        bars: Arc<dyn BarProvider>,
        notifier: Arc<dyn Notifier>,
        dedup: Arc<AlertDeduplicator>,
        metrics: Option<Arc<Metrics>>,
    ) -> Self {
        let engine = ConfirmationEngine::new(config.confirmation.clone());
        let spacer = Arc::new(RequestSpacer::new(Duration::from_millis(
            config.pipeline.request_spacing_ms,
        )));
        Self {
            config,
            categories,
            bars,
            notifier,
            dedup,
            metrics,
            engine,
            spacer,
        }
    }

    /// Execute one full scan. Infallible: every failure mode inside is
    /// recovered as an empty result or a skipped candidate.
    pub async fn run(&self) -> ScanOutcome {
        let mut category_results = Vec::with_capacity(self.config.categories.len());
        for category in &self.config.categories {
            self.spacer.wait().await;
            let members = self.categories.fetch_members(category).await;
            if members.is_empty() {
                if let Some(metrics) = &self.metrics {
                    metrics.category_empty_total.inc();
                }
            }
            category_results.push((category.clone(), members));
        }

        let records = ScoreAggregator::aggregate(&category_results);
        let ranked = CandidateRanker::rank(
            records,
            self.config.ranking.min_score,
            self.config.ranking.max_universe,
        );

        if ranked.is_empty() {
            info!("no symbols cleared the score threshold");
            self.deliver(&format_no_universe()).await;
            self.finish_run();
            return ScanOutcome::default();
        }

        self.deliver(&format_snapshot(&ranked, self.config.ranking.snapshot_size))
            .await;

        let ctx = EvaluationContext {
            index_session_change_pct: self.index_session_change().await,
        };

        let results = self.evaluate_candidates(&ranked, &ctx).await;

        let mut alerts = Vec::new();
        let mut trade_ready_sent = 0usize;
        for (record, result) in ranked.iter().zip(results.iter()) {
            let Some(result) = result else { continue };

            let eligible = match result.tier {
                ConfirmationTier::TradeReady => true,
                ConfirmationTier::EarlyMomentum => self.config.pipeline.alert_early_momentum,
                ConfirmationTier::Raw => false,
            };
            if !eligible {
                continue;
            }
            if result.tier == ConfirmationTier::TradeReady
                && trade_ready_sent >= self.config.pipeline.max_alerts_per_run
            {
                continue;
            }
            if !self.dedup.should_alert(&result.symbol, result.tier) {
                debug!(
                    symbol = %result.symbol,
                    tier = ?result.tier,
                    "alert suppressed by deduplicator"
                );
                continue;
            }
            if result.tier == ConfirmationTier::TradeReady {
                trade_ready_sent += 1;
            }

            let alert = TradeAlert {
                symbol: record.symbol.clone(),
                score: record.score,
                categories: record.categories.clone(),
                tier: result.tier,
                plan: result.plan.clone(),
                reasons: result.reasons.clone(),
            };
            info!(
                symbol = %alert.symbol,
                tier = ?alert.tier,
                score = alert.score,
                "alerting"
            );
            self.deliver(&format_alert(&alert)).await;
            if let Some(metrics) = &self.metrics {
                metrics.alerts_sent_total.inc();
            }
            alerts.push(alert);
        }

        if alerts.is_empty() {
            self.deliver(&format_no_setups()).await;
        }

        info!(
            universe = ranked.len(),
            alerts = alerts.len(),
            "scan complete"
        );
        self.finish_run();

        ScanOutcome {
            snapshot: ranked,
            alerts,
        }
    }

    /// Evaluate candidates through a bounded worker pool. The result
    /// vector is aligned with the input; a skipped candidate is None.
    async fn evaluate_candidates(
        &self,
        ranked: &[ScoreRecord],
        ctx: &EvaluationContext,
    ) -> Vec<Option<ConfirmationResult>> {
        let semaphore = Arc::new(Semaphore::new(
            self.config.pipeline.worker_concurrency.max(1),
        ));
        let fetch_timeout = Duration::from_secs(self.config.pipeline.fetch_timeout_secs);

        let mut handles = Vec::with_capacity(ranked.len());
        for record in ranked {
            let symbol = record.symbol.clone();
            let semaphore = semaphore.clone();
            let bars = self.bars.clone();
            let spacer = self.spacer.clone();
            let engine = self.engine.clone();
            let indicators = self.config.indicators.clone();
            let ctx = ctx.clone();
            let metrics = self.metrics.clone();

            handles.push(tokio::spawn(async move {
                let _permit = semaphore.acquire_owned().await.ok()?;
                spacer.wait().await;
                let started = Instant::now();

                let window = match timeout(fetch_timeout, bars.fetch_bars(&symbol)).await {
                    Ok(window) => window,
                    Err(_) => {
                        warn!(symbol = %symbol, "bar fetch timed out, skipping candidate");
                        if let Some(metrics) = &metrics {
                            metrics.candidates_skipped_total.inc();
                        }
                        return None;
                    }
                };

                let snapshot = match IndicatorSnapshot::compute(&window, &indicators) {
                    Ok(snapshot) => snapshot,
                    Err(IndicatorError::InsufficientData { got, need }) => {
                        debug!(symbol = %symbol, got, need, "insufficient data, skipping");
                        if let Some(metrics) = &metrics {
                            metrics.candidates_skipped_total.inc();
                        }
                        return None;
                    }
                };

                let result = engine.evaluate(&symbol, &snapshot, &ctx);
                if let Some(metrics) = &metrics {
                    metrics.candidates_evaluated_total.inc();
                    metrics
                        .candidate_evaluation_seconds
                        .observe(started.elapsed().as_secs_f64());
                }
                Some(result)
            }));
        }

        let mut results = Vec::with_capacity(handles.len());
        for handle in handles {
            match handle.await {
                Ok(result) => results.push(result),
                Err(e) => {
                    warn!(error = %e, "candidate evaluation task failed");
                    results.push(None);
                }
            }
        }
        results
    }

    /// Session change of the benchmark index, when one is configured.
    async fn index_session_change(&self) -> Option<f64> {
        let symbol = self.config.pipeline.index_symbol.as_deref()?;
        self.spacer.wait().await;

        let fetch_timeout = Duration::from_secs(self.config.pipeline.fetch_timeout_secs);
        let window = match timeout(fetch_timeout, self.bars.fetch_bars(symbol)).await {
            Ok(window) => window,
            Err(_) => {
                warn!(symbol = %symbol, "index fetch timed out");
                return None;
            }
        };

        let first = window.first()?;
        let last = window.last()?;
        if first.open == 0.0 {
            return None;
        }
        Some((last.close - first.open) / first.open * 100.0)
    }

    async fn deliver(&self, text: &str) {
        if let Err(e) = self.notifier.send(text).await {
            warn!(error = %e, "notification failed");
            if let Some(metrics) = &self.metrics {
                metrics.notification_failures_total.inc();
            }
        }
    }

    fn finish_run(&self) {
        if let Some(metrics) = &self.metrics {
            metrics.runs_total.inc();
            match metrics.export() {
                Ok(export) => debug!(metrics = %export, "run metrics"),
                Err(e) => warn!(error = %e, "metrics export failed"),
            }
        }
    }
}

fn format_snapshot(ranked: &[ScoreRecord], limit: usize) -> String {
    let mut lines = vec![
        "Intraday Scanner".to_string(),
        String::new(),
        "MARKET MOMENTUM (Raw)".to_string(),
    ];
    for record in ranked.iter().take(limit) {
        lines.push(format!(
            "- {} | Score {} | {}",
            record.symbol,
            record.score,
            record.categories.join(", ")
        ));
    }
    lines.join("\n")
}

fn format_alert(alert: &TradeAlert) -> String {
    let mut lines = vec![
        format!("{} SETUP", alert.tier.label()),
        String::new(),
        format!("Stock: {}", alert.symbol),
        format!("Score: {} ({})", alert.score, alert.categories.join(", ")),
    ];
    if let Some(plan) = &alert.plan {
        lines.push(format!("Entry: {:.2}", plan.entry));
        lines.push(format!("SL: {:.2}", plan.stop));
        lines.push(format!("Target: {:.2}", plan.target));
        lines.push(format!("RSI: {:.1}", plan.rsi));
    }
    if !alert.reasons.is_empty() {
        lines.push(String::new());
        lines.push("Reasons:".to_string());
        for reason in &alert.reasons {
            lines.push(format!("- {}", reason));
        }
    }
    lines.join("\n")
}

fn format_no_universe() -> String {
    "Intraday Scanner\n\nNo active symbols from the movers feeds.".to_string()
}

fn format_no_setups() -> String {
    "Intraday Scanner\n\nNo clean setups right now. Market likely choppy / waiting.".to_string()
}
