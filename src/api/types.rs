use serde::{Deserialize, Deserializer};
use serde_json::Value;
use chrono::{DateTime, Utc};
use crate::api::FetchOutcome;
use crate::models::TokenMetrics;

/// Body of `GET /latest/dex/tokens/{address}`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PairsResponse {
    /// Kept raw so one malformed listing cannot reject the whole body.
    #[serde(default, deserialize_with = "nullable_vec")]
    pub pairs: Vec<Value>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pair {
    #[serde(default, deserialize_with = "lenient_f64")]
    pub price_usd: f64,
    #[serde(default, deserialize_with = "lenient_window")]
    pub price_change: Window,
    #[serde(default, deserialize_with = "lenient_opt_f64")]
    pub fdv: Option<f64>,
    #[serde(default, deserialize_with = "lenient_opt_f64")]
    pub market_cap: Option<f64>,
    #[serde(default, deserialize_with = "lenient_window")]
    pub volume: Window,
}

/// Rolling-window figures; only the 24h bucket is read.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Window {
    #[serde(default, deserialize_with = "lenient_f64")]
    pub h24: f64,
}

impl PairsResponse {
    /// Builds the outcome of one fetch. The first pair is authoritative; no
    /// pairs means "checked, nothing found". A first entry that is not an
    /// object still counts as a listed pair, with every figure coerced to 0.
    pub fn into_outcome(self, fetched_at: DateTime<Utc>) -> FetchOutcome {
        match self.pairs.into_iter().next() {
            Some(raw) => {
                let pair: Pair = serde_json::from_value(raw).unwrap_or_default();
                FetchOutcome::Pair(pair.into_metrics(fetched_at))
            }
            None => FetchOutcome::no_pairs(fetched_at),
        }
    }
}

impl Pair {
    pub fn into_metrics(self, fetched_at: DateTime<Utc>) -> TokenMetrics {
        let market_cap = self.fdv.or(self.market_cap).unwrap_or_default();
        TokenMetrics {
            price: non_negative(self.price_usd),
            price_change_24h: self.price_change.h24,
            market_cap: non_negative(market_cap),
            volume_24h: non_negative(self.volume.h24),
            last_updated: Some(fetched_at),
        }
    }
}

fn non_negative(value: f64) -> f64 {
    if value > 0.0 { value } else { 0.0 }
}

/// Numeric coercion used for every figure in the response.
///
/// Accepts JSON numbers and numeric strings. Anything else (missing, null,
/// garbage text, NaN, infinities) reads as `None`.
pub fn coerce_number(value: &Value) -> Option<f64> {
    let parsed = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    parsed.filter(|v| v.is_finite())
}

fn lenient_f64<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(lenient_opt_f64(deserializer)?.unwrap_or_default())
}

fn lenient_opt_f64<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(coerce_number(&value))
}

fn lenient_window<'de, D>(deserializer: D) -> Result<Window, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).unwrap_or_default())
}

fn nullable_vec<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}
