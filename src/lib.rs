pub mod api;
pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod logging;
pub mod metrics;
pub mod models;
pub mod refresh;

pub use error::{Error, Result};
pub use models::TokenMetrics;
pub use refresh::{PriceRefreshLoop, RefreshHandle};
