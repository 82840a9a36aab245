use rust_decimal::Decimal;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;
use tracing::{debug, info, instrument, warn};

use crate::clients::RateSource;

/// Shared PHP-per-USD exchange rate.
///
/// Holds the last committed rate behind a lock so readers always see a fully
/// written value. The initial value comes from configuration; a live source,
/// when configured, refreshes it in the background and failures keep the
/// previous value rather than blocking pricing.
pub struct ExchangeRates {
    source: Option<Arc<dyn RateSource>>,
    rate: RwLock<Decimal>,
}

impl ExchangeRates {
    /// Rate cache with no live source; the configured value is permanent.
    pub fn fixed(default_rate: Decimal) -> Self {
        Self {
            source: None,
            rate: RwLock::new(default_rate),
        }
    }

    /// Rate cache seeded with the configured value and refreshed from a
    /// live source.
    pub fn with_source(default_rate: Decimal, source: Arc<dyn RateSource>) -> Self {
        Self {
            source: Some(source),
            rate: RwLock::new(default_rate),
        }
    }

    /// The last committed rate.
    pub async fn current(&self) -> Decimal {
        *self.rate.read().await
    }

    /// Fetch from the live source and commit the result. Only positive rates
    /// are committed; fetch failures and nonsense values keep the previous
    /// rate. Returns the rate in effect afterwards.
    #[instrument(skip(self))]
    pub async fn refresh(&self) -> Decimal {
        let source = match &self.source {
            Some(source) => source,
            None => {
                debug!("No live rate source configured, keeping fixed rate");
                return self.current().await;
            }
        };

        match source.fetch_rate().await {
            Ok(fetched) if fetched > Decimal::ZERO => {
                let mut rate = self.rate.write().await;
                *rate = fetched;
                info!(%fetched, "Exchange rate refreshed");
                fetched
            }
            Ok(fetched) => {
                warn!(%fetched, "Rate source returned a non-positive rate, keeping previous value");
                self.current().await
            }
            Err(e) => {
                warn!(error = %e, "Exchange rate fetch failed, keeping previous value");
                self.current().await
            }
        }
    }

    /// Refresh on an interval until the process exits.
    pub fn spawn_refresh_task(self: Arc<Self>, interval: Duration) -> tokio::task::JoinHandle<()> {
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            // The first tick fires immediately and would race startup; skip it.
            ticker.tick().await;
            loop {
                ticker.tick().await;
                self.refresh().await;
            }
        })
    }
}
