use chrono::{DateTime, Local, Utc};

const BILLION: f64 = 1e9;
const MILLION: f64 = 1e6;
const THOUSAND: f64 = 1e3;

/// `$` plus a K/M/B-scaled amount with two fraction digits.
pub fn format_currency(value: f64) -> String {
    if value >= BILLION {
        format!("${:.2}B", value / BILLION)
    } else if value >= MILLION {
        format!("${:.2}M", value / MILLION)
    } else if value >= THOUSAND {
        format!("${:.2}K", value / THOUSAND)
    } else {
        format!("${:.2}", value)
    }
}

pub fn format_price(price: f64) -> String {
    format!("${:.5}", price)
}

pub fn format_change(change: f64) -> String {
    if change >= 0.0 {
        format!("+{:.2}%", change)
    } else {
        format!("{:.2}%", change)
    }
}

pub fn format_time_of_day(timestamp: Option<DateTime<Utc>>) -> String {
    match timestamp {
        Some(ts) => ts.with_timezone(&Local).format("%H:%M:%S").to_string(),
        None => "--:--:--".to_string(),
    }
}
