//! External collaborators: category feeds, price history, notification.

pub mod categories;
pub mod market_data;
pub mod notify;

pub use categories::{CategorySource, MoneycontrolClient};
pub use market_data::{BarProvider, YahooChartClient};
pub use notify::{Notifier, NotifyError, NullNotifier, TelegramNotifier};

use std::time::{Duration, Instant};
use tokio::sync::Mutex;

/// Enforces a minimum spacing between outbound requests toward a
/// collaborator. Shared across workers; waiters are released one at a
/// time, each at least the configured interval after the previous one.
#[derive(Debug)]
pub struct RequestSpacer {
    spacing: Duration,
    last: Mutex<Option<Instant>>,
}

impl RequestSpacer {
    pub fn new(spacing: Duration) -> Self {
        Self {
            spacing,
            last: Mutex::new(None),
        }
    }

    pub async fn wait(&self) {
        if self.spacing.is_zero() {
            return;
        }
        let mut last = self.last.lock().await;
        if let Some(previous) = *last {
            let elapsed = previous.elapsed();
            if elapsed < self.spacing {
                tokio::time::sleep(self.spacing - elapsed).await;
            }
        }
        *last = Some(Instant::now());
    }
}
