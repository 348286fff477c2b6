//! Presentation helpers for amounts and chart tooltips.

use crate::{
    core::services::CategoryShare,
    ledger::{ExpenseEntry, IncomeEntry},
};

const GROUP_SEPARATOR: char = '\u{a0}';
const DECIMAL_SEPARATOR: char = ',';

/// Russian locale formatting: non-breaking space digit groups, decimal comma, at most two
/// fraction digits, currency symbol after the number.
pub fn format_amount(amount: f64, currency: &str) -> String {
    let number = format_number(amount);
    if currency.is_empty() {
        number
    } else {
        format!("{number} {currency}")
    }
}

fn format_number(amount: f64) -> String {
    if !amount.is_finite() {
        return amount.to_string();
    }
    let cents = (amount.abs() * 100.0).round();
    let whole = (cents / 100.0).trunc() as u64;
    let fraction = (cents % 100.0) as u64;

    let digits = whole.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (idx, ch) in digits.chars().enumerate() {
        if idx > 0 && (digits.len() - idx) % 3 == 0 {
            grouped.push(GROUP_SEPARATOR);
        }
        grouped.push(ch);
    }

    let mut out = String::new();
    if amount < 0.0 && cents > 0.0 {
        out.push('-');
    }
    out.push_str(&grouped);
    if fraction > 0 {
        out.push(DECIMAL_SEPARATOR);
        let fraction = format!("{fraction:02}");
        out.push_str(fraction.trim_end_matches('0'));
    }
    out
}

/// `"Еда: 200 ₽ (66,7%)"`-style legend label for a category share.
pub fn share_label(share: &CategoryShare, currency: &str) -> String {
    let percentage = format!("{:.1}", share.percentage).replace('.', ",");
    format!(
        "{}: {} ({}%)",
        share.category,
        format_amount(share.sum, currency),
        percentage
    )
}

/// Tooltip line for an expense listed under its category.
pub fn expense_detail_line(entry: &ExpenseEntry, currency: &str) -> String {
    with_description(
        format!("- {}", format_amount(entry.amount, currency)),
        entry.description(),
    )
}

/// Tooltip line for an expense listed under its month, category included.
pub fn categorized_detail_line(entry: &ExpenseEntry, currency: &str) -> String {
    with_description(
        format!(
            "- {}: {}",
            entry.category,
            format_amount(entry.amount, currency)
        ),
        entry.description(),
    )
}

pub fn income_detail_line(entry: &IncomeEntry, currency: &str) -> String {
    with_description(
        format!("- {}", format_amount(entry.amount, currency)),
        entry.description(),
    )
}

fn with_description(line: String, description: Option<&str>) -> String {
    match description {
        Some(text) => format!("{line} ({text})"),
        None => line,
    }
}
