use colored::Colorize;
use std::sync::atomic::{AtomicBool, Ordering};
use crate::display::{DisplayUpdate, DisplaySurface, Direction};

/// Prints each refresh as one line on stdout.
#[derive(Debug)]
pub struct TerminalDisplay {
    symbol: String,
    loading: AtomicBool,
}

impl TerminalDisplay {
    pub fn new(symbol: impl Into<String>) -> Self {
        Self {
            symbol: symbol.into(),
            loading: AtomicBool::new(false),
        }
    }

    pub fn is_loading(&self) -> bool {
        self.loading.load(Ordering::Relaxed)
    }

    pub fn format_line(&self, update: &DisplayUpdate) -> String {
        let change = match update.change.direction {
            Direction::Up => format!("▲ {}", update.change.text).green(),
            Direction::Down => format!("▼ {}", update.change.text).red(),
        };
        format!(
            "[{}] {} {} {}  mcap {}  vol {}",
            update.last_updated,
            self.symbol.bold(),
            update.price.bold(),
            change,
            update.market_cap,
            update.volume,
        )
    }
}

impl Default for TerminalDisplay {
    fn default() -> Self {
        Self::new("MOODENG")
    }
}

impl DisplaySurface for TerminalDisplay {
    fn show(&self, update: &DisplayUpdate) {
        println!("{}", self.format_line(update));
    }

    fn set_status(&self, status: &str) {
        println!("{}", status.dimmed());
    }

    fn set_loading(&self, loading: bool) {
        self.loading.store(loading, Ordering::Relaxed);
    }

    fn notify_error(&self, message: &str) {
        eprintln!("{} {}", "!".red().bold(), message.red());
    }
}
