pub mod market;

pub use market::TokenMetrics;
