//! Human-readable renderings of summary figures, shared by the CLI tables and
//! the advisor prompt.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// `-$12,345.60` style: two decimals, comma thousands separators.
pub fn format_money(value: Decimal) -> String {
    let rounded = value.round_dp(2);
    let sign = if rounded < Decimal::ZERO { "-" } else { "" };
    let text = format!("{:.2}", rounded.abs());
    let (whole, cents) = text.split_once('.').unwrap_or((text.as_str(), "00"));
    format!("{sign}${}.{cents}", group_thousands(whole))
}

/// Renders a fraction (0.6) as a percentage with one decimal (`60.0%`).
pub fn format_ratio(value: Decimal) -> String {
    format!("{:.1}%", value.saturating_mul(dec!(100)).round_dp(1))
}

/// Renders a percentage change with a direction arrow, or `-` when undefined.
pub fn format_change(change: Option<Decimal>) -> String {
    match change {
        Some(pct) if pct >= Decimal::ZERO => format!("↑ {:.1}%", pct.round_dp(1)),
        Some(pct) => format!("↓ {:.1}%", pct.abs().round_dp(1)),
        None => "-".to_string(),
    }
}

fn group_thousands(digits: &str) -> String {
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    grouped
}
