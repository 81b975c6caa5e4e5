use serde::{Deserialize, Serialize};
use chrono::{DateTime, Utc};

/// Latest known market figures for the tracked token.
///
/// Starts zeroed with no timestamp. A refresh cycle replaces the whole record,
/// so no field ever survives from an older fetch.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct TokenMetrics {
    pub price: f64,
    /// Signed 24h change, in percent.
    pub price_change_24h: f64,
    pub market_cap: f64,
    pub volume_24h: f64,
    pub last_updated: Option<DateTime<Utc>>,
}

impl TokenMetrics {
    /// Result of a successful fetch that found no tradable pair.
    pub fn empty_at(checked_at: DateTime<Utc>) -> Self {
        Self {
            last_updated: Some(checked_at),
            ..Self::default()
        }
    }

    pub fn is_zero(&self) -> bool {
        self.price == 0.0
            && self.price_change_24h == 0.0
            && self.market_cap == 0.0
            && self.volume_24h == 0.0
    }

    pub fn has_been_fetched(&self) -> bool {
        self.last_updated.is_some()
    }
}
