use async_trait::async_trait;
use reqwest::Client;
use rust_decimal::Decimal;
use serde::Deserialize;
use std::collections::HashMap;
use tracing::{info, instrument, Instrument};

use super::{api_span, decode_json, ensure_success, send};
use crate::models::{ApiError, ApiResult};

/// Trait defining the live exchange-rate source. The pricing engine treats
/// this as best-effort: failures fall back to the last committed rate.
#[async_trait]
pub trait RateSource: Send + Sync {
    /// Fetch the current PHP-per-USD rate.
    async fn fetch_rate(&self) -> ApiResult<Decimal>;
}

/// Wire shape of common exchange-rate feeds: either a flat `rate` value or a
/// `rates` table keyed by currency code.
#[derive(Debug, Deserialize)]
struct RateResponse {
    #[serde(default)]
    rate: Option<Decimal>,
    #[serde(default)]
    rates: Option<HashMap<String, Decimal>>,
}

/// reqwest-backed implementation against a configured rate endpoint
pub struct HttpRateSource {
    client: Client,
    endpoint: String,
}

impl HttpRateSource {
    pub fn new(client: Client, endpoint: String) -> Self {
        Self { client, endpoint }
    }
}

#[async_trait]
impl RateSource for HttpRateSource {
    #[instrument(skip(self))]
    async fn fetch_rate(&self) -> ApiResult<Decimal> {
        let span = api_span("FetchExchangeRate", "GET", &self.endpoint);

        let parsed: RateResponse = async {
            let response = send(&self.endpoint, self.client.get(&self.endpoint)).await?;
            let response = ensure_success(&self.endpoint, response).await?;
            decode_json(&self.endpoint, response).await
        }
        .instrument(span)
        .await?;

        let rate = parsed
            .rate
            .or_else(|| parsed.rates.as_ref().and_then(|rates| rates.get("PHP").copied()))
            .ok_or_else(|| ApiError::Decode {
                endpoint: self.endpoint.clone(),
                message: "Response carried neither `rate` nor `rates.PHP`".to_string(),
            })?;

        info!(%rate, "Fetched exchange rate");
        Ok(rate)
    }
}
