//! Ledger domain models, persistence-friendly types, and helpers.

pub mod category;
pub mod entry;
#[allow(clippy::module_inception)]
pub mod ledger;
pub mod month;

pub use category::{Category, CategoryDefinition, CATEGORY_DEFINITIONS};
pub use entry::{ExpenseEntry, IncomeEntry};
pub use ledger::{LedgerState, MonthLog, MonthlySeries};
pub use month::{month_index, month_label, month_label_for, FALLBACK_MONTH, MONTHS_IN_YEAR, MONTH_LABELS};
