//! Intraday price-history collaborator.

use async_trait::async_trait;
use backon::{ExponentialBuilder, Retryable};
use chrono::DateTime;
use serde::Deserialize;
use tracing::{debug, warn};

use crate::models::Bar;

#[async_trait]
pub trait BarProvider: Send + Sync {
    /// Chronological, timestamp-deduplicated bars for one symbol.
    /// Empty on any failure, including symbols with no data.
    async fn fetch_bars(&self, symbol: &str) -> Vec<Bar>;
}

#[derive(Debug, Deserialize)]
struct ChartResponse {
    chart: ChartEnvelope,
}

#[derive(Debug, Deserialize)]
struct ChartEnvelope {
    #[serde(default)]
    result: Option<Vec<ChartResult>>,
}

#[derive(Debug, Deserialize)]
struct ChartResult {
    #[serde(default)]
    timestamp: Vec<i64>,
    indicators: ChartIndicators,
}

#[derive(Debug, Deserialize)]
struct ChartIndicators {
    #[serde(default)]
    quote: Vec<ChartQuote>,
}

#[derive(Debug, Default, Deserialize)]
struct ChartQuote {
    #[serde(default)]
    open: Vec<Option<f64>>,
    #[serde(default)]
    high: Vec<Option<f64>>,
    #[serde(default)]
    low: Vec<Option<f64>>,
    #[serde(default)]
    close: Vec<Option<f64>>,
    #[serde(default)]
    volume: Vec<Option<f64>>,
}

/// Chart-endpoint client (the yfinance wire format).
pub struct YahooChartClient {
    base_url: String,
    venue_suffix: String,
    interval: String,
    range: String,
    client: reqwest::Client,
}

impl YahooChartClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(base_url, reqwest::Client::new())
    }

    pub fn with_client(base_url: impl Into<String>, client: reqwest::Client) -> Self {
        Self {
            base_url: base_url.into(),
            venue_suffix: ".NS".to_string(),
            interval: "5m".to_string(),
            range: "1d".to_string(),
            client,
        }
    }

    pub fn with_venue_suffix(mut self, suffix: impl Into<String>) -> Self {
        self.venue_suffix = suffix.into();
        self
    }

    pub fn with_interval(mut self, interval: impl Into<String>) -> Self {
        self.interval = interval.into();
        self
    }

    fn chart_url(&self, symbol: &str) -> String {
        // Index symbols carry their own prefix and take no venue suffix.
        let suffix = if symbol.starts_with('^') {
            ""
        } else {
            self.venue_suffix.as_str()
        };
        format!(
            "{}/v8/finance/chart/{}{}",
            self.base_url.trim_end_matches('/'),
            symbol,
            suffix
        )
    }

    async fn request(&self, symbol: &str) -> Result<ChartResponse, reqwest::Error> {
        let url = self.chart_url(symbol);
        let send = || async {
            let response = self
                .client
                .get(&url)
                .query(&[
                    ("interval", self.interval.as_str()),
                    ("range", self.range.as_str()),
                ])
                .header("User-Agent", "Mozilla/5.0")
                .send()
                .await?;
            response.error_for_status()
        };

        let response = send
            .retry(
                ExponentialBuilder::default()
                    .with_min_delay(std::time::Duration::from_millis(500))
                    .with_max_times(2),
            )
            .await?;
        response.json().await
    }
}

fn bars_from_chart(result: ChartResult) -> Vec<Bar> {
    let Some(quote) = result.indicators.quote.into_iter().next() else {
        return Vec::new();
    };

    let mut bars = Vec::with_capacity(result.timestamp.len());
    for (i, unix) in result.timestamp.iter().enumerate() {
        // Rows with any null field are dropped rather than zero-filled.
        let (Some(open), Some(high), Some(low), Some(close), Some(volume)) = (
            quote.open.get(i).copied().flatten(),
            quote.high.get(i).copied().flatten(),
            quote.low.get(i).copied().flatten(),
            quote.close.get(i).copied().flatten(),
            quote.volume.get(i).copied().flatten(),
        ) else {
            continue;
        };
        let Some(timestamp) = DateTime::from_timestamp(*unix, 0) else {
            continue;
        };
        bars.push(Bar::new(open, high, low, close, volume, timestamp));
    }

    bars.sort_by_key(|bar| bar.timestamp);
    bars.dedup_by_key(|bar| bar.timestamp);
    bars
}

#[async_trait]
impl BarProvider for YahooChartClient {
    async fn fetch_bars(&self, symbol: &str) -> Vec<Bar> {
        match self.request(symbol).await {
            Ok(body) => {
                let bars = body
                    .chart
                    .result
                    .and_then(|mut results| {
                        if results.is_empty() {
                            None
                        } else {
                            Some(results.remove(0))
                        }
                    })
                    .map(bars_from_chart)
                    .unwrap_or_default();
                debug!(symbol = %symbol, count = bars.len(), "fetched bars");
                bars
            }
            Err(e) => {
                warn!(symbol = %symbol, error = %e, "bar fetch failed, treating as empty");
                Vec::new()
            }
        }
    }
}
