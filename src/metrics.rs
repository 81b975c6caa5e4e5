use prometheus::{Counter, Encoder, Gauge, Histogram, Registry, TextEncoder};
use lazy_static::lazy_static;
use std::sync::OnceLock;
use crate::error::{Error, Result};

lazy_static! {
    pub static ref REGISTRY: Registry = Registry::new();

    pub static ref FETCH_ATTEMPTS: Counter = Counter::new(
        "ticker_fetch_attempts_total",
        "Total number of price fetch attempts"
    ).expect("valid metric definition");

    pub static ref FETCH_ERRORS: Counter = Counter::new(
        "ticker_fetch_errors_total",
        "Total number of failed price fetches"
    ).expect("valid metric definition");

    pub static ref PRICE_USD: Gauge = Gauge::new(
        "ticker_price_usd",
        "Last fetched token price in USD"
    ).expect("valid metric definition");

    pub static ref FETCH_LATENCY: Histogram = Histogram::with_opts(
        prometheus::HistogramOpts::new(
            "ticker_fetch_latency_seconds",
            "Price fetch latency in seconds"
        ).buckets(vec![0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0])
    ).expect("valid metric definition");
}

static REGISTERED: OnceLock<std::result::Result<(), String>> = OnceLock::new();

/// Registers the ticker metrics with [`REGISTRY`]. Safe to call repeatedly;
/// a failed first registration is reported on every later call too.
pub fn init() -> Result<()> {
    init_once(&REGISTERED, || register_all(&REGISTRY))
}

fn init_once<F>(cell: &OnceLock<std::result::Result<(), String>>, register: F) -> Result<()>
where
    F: FnOnce() -> Result<()>,
{
    cell.get_or_init(|| register().map_err(|e| e.to_string()))
        .clone()
        .map_err(Error::InternalError)
}

fn register_all(registry: &Registry) -> Result<()> {
    registry.register(Box::new(FETCH_ATTEMPTS.clone()))?;
    registry.register(Box::new(FETCH_ERRORS.clone()))?;
    registry.register(Box::new(PRICE_USD.clone()))?;
    registry.register(Box::new(FETCH_LATENCY.clone()))?;
    Ok(())
}

/// Text exposition of everything in [`REGISTRY`].
pub fn gather_text() -> Result<String> {
    let mut buffer = Vec::new();
    TextEncoder::new().encode(&REGISTRY.gather(), &mut buffer)?;
    String::from_utf8(buffer).map_err(|e| Error::InternalError(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_is_idempotent_and_exports() {
        init().unwrap();
        init().unwrap();
        FETCH_ATTEMPTS.inc();

        let text = gather_text().unwrap();
        assert!(text.contains("ticker_fetch_attempts_total"));
        assert!(text.contains("ticker_price_usd"));
    }

    #[test]
    fn test_failed_registration_stays_failed() {
        let registry = Registry::new();
        register_all(&registry).unwrap();

        let cell = OnceLock::new();
        let first = init_once(&cell, || register_all(&registry));
        assert!(matches!(first, Err(Error::InternalError(_))));

        let second = init_once(&cell, || Ok(()));
        assert!(matches!(second, Err(Error::InternalError(_))));
    }
}
