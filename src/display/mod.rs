//! Turning [`TokenMetrics`] into display strings, and the surface that shows
//! them.

use serde::Serialize;
use crate::models::TokenMetrics;

pub mod format;
pub mod terminal;

pub use format::{format_change, format_currency, format_price, format_time_of_day};
pub use terminal::TerminalDisplay;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Direction {
    Up,
    Down,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChangeIndicator {
    pub direction: Direction,
    pub text: String,
}

/// Formatted values for every metrics slot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DisplayUpdate {
    pub price: String,
    pub change: ChangeIndicator,
    pub market_cap: String,
    pub volume: String,
    pub last_updated: String,
}

/// Formats a metrics snapshot. Has no side effects and accepts the zero value.
pub fn render(metrics: &TokenMetrics) -> DisplayUpdate {
    let direction = if metrics.price_change_24h >= 0.0 {
        Direction::Up
    } else {
        Direction::Down
    };

    DisplayUpdate {
        price: format_price(metrics.price),
        change: ChangeIndicator {
            direction,
            text: format_change(metrics.price_change_24h),
        },
        market_cap: format_currency(metrics.market_cap),
        volume: format_currency(metrics.volume_24h),
        last_updated: format_time_of_day(metrics.last_updated),
    }
}

/// The view layer the refresh loop writes into.
#[cfg_attr(test, mockall::automock)]
pub trait DisplaySurface: Send + Sync {
    /// Writes the price, change, market cap, volume and last-updated slots.
    fn show(&self, update: &DisplayUpdate);

    fn set_status(&self, status: &str);

    fn set_loading(&self, loading: bool);

    /// Transient user-facing notice for a failed refresh.
    fn notify_error(&self, message: &str);
}
