//! Market-movers category feed collaborator.

use std::collections::HashSet;

use async_trait::async_trait;
use backon::{ExponentialBuilder, Retryable};
use serde::Deserialize;
use tracing::{debug, warn};

use crate::config::CategoryConfig;

/// Standard query parameters the movers endpoints expect.
const QUERY_PARAMS: [(&str, &str); 8] = [
    ("deviceType", "W"),
    ("appVersion", "180"),
    ("ex", "N"),
    ("section", "overview"),
    ("indexId", "7"),
    ("dur", "1d"),
    ("page", "1"),
    ("responseType", "json"),
];

#[async_trait]
pub trait CategorySource: Send + Sync {
    /// Symbols currently listed under a category. Never errors: any
    /// non-success status or malformed body degrades to an empty set.
    async fn fetch_members(&self, category: &CategoryConfig) -> HashSet<String>;
}

#[derive(Debug, Deserialize)]
struct CategoryResponse {
    #[serde(default)]
    data: Option<CategoryData>,
}

#[derive(Debug, Deserialize)]
struct CategoryData {
    #[serde(default)]
    list: Vec<CategoryEntry>,
}

#[derive(Debug, Default, Deserialize)]
struct CategoryEntry {
    #[serde(default)]
    symbol: Option<String>,
}

pub struct MoneycontrolClient {
    base_url: String,
    client: reqwest::Client,
}

impl MoneycontrolClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(base_url, reqwest::Client::new())
    }

    pub fn with_client(base_url: impl Into<String>, client: reqwest::Client) -> Self {
        Self {
            base_url: base_url.into(),
            client,
        }
    }

    async fn request(&self, slug: &str) -> Result<CategoryResponse, reqwest::Error> {
        let url = format!("{}/{}", self.base_url.trim_end_matches('/'), slug);
        let send = || async {
            let response = self
                .client
                .get(&url)
                .query(&QUERY_PARAMS)
                .header("User-Agent", "Mozilla/5.0")
                .header("Accept", "application/json")
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

#[async_trait]
impl CategorySource for MoneycontrolClient {
    async fn fetch_members(&self, category: &CategoryConfig) -> HashSet<String> {
        match self.request(&category.slug).await {
            Ok(body) => {
                let symbols: HashSet<String> = body
                    .data
                    .map(|data| {
                        data.list
                            .into_iter()
                            .filter_map(|entry| entry.symbol)
                            .filter(|symbol| !symbol.is_empty())
                            .collect()
                    })
                    .unwrap_or_default();
                debug!(
                    category = %category.name,
                    count = symbols.len(),
                    "fetched category members"
                );
                symbols
            }
            Err(e) => {
                warn!(
                    category = %category.name,
                    error = %e,
                    "category fetch failed, treating as empty"
                );
                HashSet::new()
            }
        }
    }
}
