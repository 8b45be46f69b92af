//! Market-hours gate and the interval loop driving the pipeline.

use std::str::FromStr;
use std::sync::Arc;

use chrono::{DateTime, Datelike, Timelike, Utc, Weekday};
use cron::Schedule;
use tracing::info;

use crate::config::MarketHoursConfig;
use crate::core::pipeline::ScanPipeline;

/// Weekday and venue-local time-of-day gate.
#[derive(Debug, Clone)]
pub struct MarketHours {
    config: MarketHoursConfig,
}

impl MarketHours {
    pub fn new(config: MarketHoursConfig) -> Self {
        Self { config }
    }

    /// True on weekdays when the venue-local wall clock is inside the
    /// session. Open and close minutes are both inclusive.
    pub fn is_open_at(&self, now: DateTime<Utc>) -> bool {
        let local = now.with_timezone(&self.config.timezone);
        if matches!(local.weekday(), Weekday::Sat | Weekday::Sun) {
            return false;
        }

        let time = local.time();
        if time < self.config.open {
            return false;
        }
        (time.hour(), time.minute()) <= (self.config.close.hour(), self.config.close.minute())
    }

    pub fn is_open_now(&self) -> bool {
        self.is_open_at(Utc::now())
    }
}

/// Periodically runs the pipeline, skipping ticks outside market hours.
pub struct ScanScheduler {
    pipeline: Arc<ScanPipeline>,
    market_hours: MarketHours,
    schedule: Schedule,
}

impl ScanScheduler {
    /// Convert the scan interval to a cron expression.
    ///
    /// Cron format: second minute hour day month weekday.
    pub fn new(
        pipeline: Arc<ScanPipeline>,
        market_hours: MarketHours,
        interval_seconds: u64,
    ) -> Result<Self, cron::error::Error> {
        let cron_expr = if interval_seconds >= 60 {
            format!("0 */{} * * * *", (interval_seconds / 60).max(1))
        } else {
            format!("*/{} * * * * *", interval_seconds.max(1))
        };
        let schedule = Schedule::from_str(&cron_expr)?;

        info!(
            interval = interval_seconds,
            cron = %cron_expr,
            "scheduler configured"
        );

        Ok(Self {
            pipeline,
            market_hours,
            schedule,
        })
    }

    /// Run until aborted by the caller.
    pub async fn run(&self) {
        info!("scheduler started, waiting for first tick");
        loop {
            let Some(next_tick) = self.schedule.upcoming(Utc).next() else {
                tokio::time::sleep(std::time::Duration::from_secs(60)).await;
                continue;
            };

            let now = Utc::now();
            if next_tick > now {
                if let Ok(wait) = (next_tick - now).to_std() {
                    tokio::time::sleep(wait).await;
                }
            }

            if !self.market_hours.is_open_now() {
                info!("market closed, skipping tick");
                continue;
            }

            self.pipeline.run().await;
        }
    }
}
