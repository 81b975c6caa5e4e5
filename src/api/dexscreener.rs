use async_trait::async_trait;
use chrono::Utc;
use log::{debug, warn};
use reqwest::Client;
use std::time::Duration;
use crate::api::types::PairsResponse;
use crate::api::{FetchOutcome, MetricsSource};
use crate::config::ApiConfig;
use crate::error::{Error, Result};

pub const API_BASE_URL: &str = "https://api.dexscreener.com";
/// MOODENG mint on Solana.
pub const MOODENG_TOKEN_ADDRESS: &str = "ED5nyyWEzpPPiWimP8vYm7sD7TD3LAt3Q3gRTWHzPJBY";
const USER_AGENT: &str = concat!("moodeng-ticker/", env!("CARGO_PKG_VERSION"));

/// Client for the DexScreener token-pairs endpoint.
#[derive(Debug, Clone)]
pub struct DexScreenerClient {
    client: Client,
    base_url: String,
    token_address: String,
}

impl DexScreenerClient {
    pub fn new(config: &ApiConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| Error::ConfigError(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            token_address: config.token_address.clone(),
        })
    }

    pub fn token_address(&self) -> &str {
        &self.token_address
    }

    pub fn endpoint(&self) -> String {
        format!("{}/latest/dex/tokens/{}", self.base_url, self.token_address)
    }
}

#[async_trait]
impl MetricsSource for DexScreenerClient {
    async fn fetch_metrics(&self) -> Result<FetchOutcome> {
        let url = self.endpoint();
        debug!("GET {}", url);

        let response = self.client.get(&url).send().await?;
        let status = response.status();
        if !status.is_success() {
            warn!("DexScreener responded with {} for {}", status, self.token_address);
            return Err(Error::TransportFailure(format!("HTTP status {}", status)));
        }

        let body = response.text().await?;
        let parsed: PairsResponse = serde_json::from_str(&body)?;
        if parsed.pairs.is_empty() {
            debug!("No trading pairs listed for {}", self.token_address);
        }

        Ok(parsed.into_outcome(Utc::now()))
    }
}
