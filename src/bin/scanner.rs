//! Tapescan scanner binary.
//!
//! With SCAN_INTERVAL_SECONDS unset (or 0) the binary gates on market
//! hours, runs one scan and exits, matching an external-cron deployment.
//! With a positive interval it loops on the internal scheduler until
//! interrupted.

use std::env;
use std::sync::Arc;

use dotenvy::dotenv;
use tapescan::config::{self, ScannerConfig};
use tapescan::core::pipeline::ScanPipeline;
use tapescan::core::scheduler::{MarketHours, ScanScheduler};
use tapescan::logging;
use tapescan::metrics::Metrics;
use tapescan::services::{
    MoneycontrolClient, Notifier, NullNotifier, TelegramNotifier, YahooChartClient,
};
use tapescan::signals::AlertDeduplicator;
use tokio::signal;
use tracing::{info, warn};

const DEFAULT_CATEGORY_BASE_URL: &str = "https://api.moneycontrol.com/swiftapi/v1/markets/stats";
const DEFAULT_CHART_BASE_URL: &str = "https://query1.finance.yahoo.com";

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv().ok();
    logging::init_logging();

    let environment = config::get_environment();
    info!("Starting Tapescan scanner");
    info!(environment = %environment, "Environment");

    let scan_interval: u64 = env::var("SCAN_INTERVAL_SECONDS")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(0);

    let config = ScannerConfig::from_env();

    let category_base =
        env::var("CATEGORY_BASE_URL").unwrap_or_else(|_| DEFAULT_CATEGORY_BASE_URL.to_string());
    let chart_base =
        env::var("CHART_BASE_URL").unwrap_or_else(|_| DEFAULT_CHART_BASE_URL.to_string());

    let categories = Arc::new(MoneycontrolClient::new(category_base));
    let bars = Arc::new(YahooChartClient::new(chart_base));

    let notifier: Arc<dyn Notifier> = match (env::var("BOT_TOKEN"), env::var("CHAT_ID")) {
        (Ok(token), Ok(chat_id)) if !token.is_empty() && !chat_id.is_empty() => {
            info!("Telegram notifier configured");
            Arc::new(TelegramNotifier::new(token, chat_id))
        }
        _ => {
            warn!("BOT_TOKEN/CHAT_ID missing, alerts will only be logged");
            Arc::new(NullNotifier)
        }
    };

    let metrics = Arc::new(Metrics::new()?);
    let dedup = Arc::new(AlertDeduplicator::new());
    let market_hours = MarketHours::new(config.market_hours.clone());

    let pipeline = Arc::new(ScanPipeline::new(
        config,
        categories,
        bars,
        notifier,
        dedup,
        Some(metrics),
    ));

    if scan_interval == 0 {
        if !market_hours.is_open_now() {
            info!("market closed, nothing to do");
            return Ok(());
        }
        let outcome = pipeline.run().await;
        info!(
            universe = outcome.snapshot.len(),
            alerts = outcome.alerts.len(),
            "one-shot scan finished"
        );
        return Ok(());
    }

    let scheduler = ScanScheduler::new(pipeline, market_hours, scan_interval)?;
    let handle = tokio::spawn(async move { scheduler.run().await });

    info!("scanner started, waiting for shutdown signal...");
    tokio::select! {
        _ = signal::ctrl_c() => {
            info!("shutting down scanner...");
            handle.abort();
            info!("scanner stopped");
        }
    }

    Ok(())
}
