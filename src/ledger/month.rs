//! Month labels used by the monthly series and the expense log.

use chrono::{Datelike, NaiveDate};

pub const MONTHS_IN_YEAR: usize = 12;

pub const MONTH_LABELS: [&str; MONTHS_IN_YEAR] = [
    "Январь",
    "Февраль",
    "Март",
    "Апрель",
    "Май",
    "Июнь",
    "Июль",
    "Август",
    "Сентябрь",
    "Октябрь",
    "Ноябрь",
    "Декабрь",
];

/// Label used whenever a month index falls outside the calendar.
pub const FALLBACK_MONTH: &str = "Май";

/// Maps a zero-based month index to its label.
pub fn month_label(index: usize) -> &'static str {
    MONTH_LABELS.get(index).copied().unwrap_or(FALLBACK_MONTH)
}

pub fn month_label_for(date: NaiveDate) -> &'static str {
    month_label(date.month0() as usize)
}

/// Zero-based position of `label` among the calendar labels.
pub fn month_index(label: &str) -> Option<usize> {
    MONTH_LABELS.iter().position(|candidate| *candidate == label)
}
