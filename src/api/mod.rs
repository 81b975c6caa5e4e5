use async_trait::async_trait;
use chrono::{DateTime, Utc};
use crate::error::Result;
use crate::models::TokenMetrics;

pub mod dexscreener;
pub mod types;

pub use dexscreener::DexScreenerClient;

/// What one successful fetch found.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FetchOutcome {
    /// Metrics read from the first listed pair, after numeric coercion.
    Pair(TokenMetrics),
    /// The response listed no tradable pair; metrics are zeroed.
    NoPairs(TokenMetrics),
}

impl FetchOutcome {
    pub fn no_pairs(checked_at: DateTime<Utc>) -> Self {
        FetchOutcome::NoPairs(TokenMetrics::empty_at(checked_at))
    }

    pub fn metrics(&self) -> TokenMetrics {
        match self {
            FetchOutcome::Pair(metrics) | FetchOutcome::NoPairs(metrics) => *metrics,
        }
    }

    pub fn pair_found(&self) -> bool {
        matches!(self, FetchOutcome::Pair(_))
    }
}

/// Anything that can produce a fresh [`TokenMetrics`] snapshot.
///
/// One call is one fetch attempt: implementations must not retry internally.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MetricsSource: Send + Sync {
    async fn fetch_metrics(&self) -> Result<FetchOutcome>;
}
