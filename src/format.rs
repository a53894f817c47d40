//! Display Formatting

use chrono::{DateTime, NaiveDateTime};

use crate::models::OrderStatus;

/// `$1,234`, `$12.5`, `$0.13`: thousands separators, at most two decimals,
/// trailing zeros dropped
pub fn format_price(amount: f64) -> String {
    if !amount.is_finite() {
        return "$0".to_string();
    }
    let cents = (amount.abs() * 100.0).round() as u64;
    let sign = if amount < 0.0 && cents > 0 { "-" } else { "" };
    let whole = group_thousands(cents / 100);
    let fraction = match cents % 100 {
        0 => String::new(),
        f if f % 10 == 0 => format!(".{}", f / 10),
        f => format!(".{:02}", f),
    };
    format!("{}${}{}", sign, whole, fraction)
}

/// Plain number with thousands separators, used for order sums
pub fn format_amount(amount: f64) -> String {
    format_price(amount).replacen('$', "", 1)
}

fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// Backend timestamps come with or without an offset
pub fn format_date(raw: &str) -> String {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return dt.format("%d.%m.%Y %H:%M").to_string();
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
        return dt.format("%d.%m.%Y %H:%M").to_string();
    }
    raw.to_string()
}

pub fn status_label(status: OrderStatus) -> &'static str {
    match status {
        OrderStatus::Pending => "Pending",
        OrderStatus::SentToIiko => "Sent to iiko",
        OrderStatus::Confirmed => "Confirmed",
        OrderStatus::InProgress => "In progress",
        OrderStatus::Completed => "Completed",
        OrderStatus::Cancelled => "Cancelled",
        OrderStatus::Failed => "Failed",
        OrderStatus::Declined => "Declined",
    }
}

/// CSS class of the status badge
pub fn status_class(status: OrderStatus) -> String {
    format!("badge status-{}", status.as_str().replace('_', "-"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_price() {
        assert_eq!(format_price(1234.0), "$1,234");
        assert_eq!(format_price(12.5), "$12.5");
        assert_eq!(format_price(0.125), "$0.13");
        assert_eq!(format_price(1234567.891), "$1,234,567.89");
        assert_eq!(format_price(0.0), "$0");
        assert_eq!(format_price(999.999), "$1,000");
        assert_eq!(format_price(-5.05), "-$5.05");
    }

    #[test]
    fn test_format_amount_has_no_currency() {
        assert_eq!(format_amount(150000.0), "150,000");
    }

    #[test]
    fn test_format_date_accepts_both_shapes() {
        assert_eq!(format_date("2024-03-05T14:07:00"), "05.03.2024 14:07");
        assert_eq!(format_date("2024-03-05T14:07:00.123456"), "05.03.2024 14:07");
        assert_eq!(format_date("2024-03-05T14:07:00+05:00"), "05.03.2024 14:07");
        assert_eq!(format_date("yesterday"), "yesterday");
    }

    #[test]
    fn test_status_class() {
        assert_eq!(status_class(OrderStatus::SentToIiko), "badge status-sent-to-iiko");
        assert_eq!(status_label(OrderStatus::Declined), "Declined");
    }
}
