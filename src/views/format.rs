//! Display formatting for table cells and detail pages.

use chrono::{NaiveDate, NaiveDateTime};

/// Formats an amount as `$ 1.234,50`.
pub fn format_currency(amount: f64) -> String {
    let cents = (amount.abs() * 100.0).round() as u64;
    let (units, cents) = (cents / 100, cents % 100);

    let sign = if amount < 0.0 && (units > 0 || cents > 0) { "-" } else { "" };
    format!("{sign}$ {},{cents:02}", group_thousands(units))
}

fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (index, digit) in digits.chars().enumerate() {
        if index > 0 && (digits.len() - index) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(digit);
    }
    grouped
}

pub fn format_datetime(value: Option<NaiveDateTime>) -> String {
    value
        .map(|value| value.format("%d/%m/%Y %H:%M").to_string())
        .unwrap_or_default()
}

pub fn format_date(value: Option<NaiveDate>) -> String {
    value
        .map(|value| value.format("%d/%m/%Y").to_string())
        .unwrap_or_default()
}

/// Groups thousands with dots, e.g. `120.500 km`.
pub fn format_km(value: Option<u32>) -> String {
    value
        .map(|km| format!("{} km", group_thousands(u64::from(km))))
        .unwrap_or_default()
}
