#![doc(test(attr(deny(warnings))))]

//! Finance Core is the ledger engine behind the personal finance dashboard:
//! running totals, the monthly income/expense series, categorized expense
//! logs, chart-ready aggregates, and durable key-value persistence.

pub mod config;
pub mod core;
pub mod errors;
pub mod ledger;
pub mod storage;
pub mod utils;

pub use crate::core::dashboard::{Dashboard, MutationOutcome};
pub use crate::core::services::{PeriodFilter, SummaryService, TransactionService};
pub use crate::core::time::{Clock, FixedClock, SystemClock};
pub use crate::errors::{ConfigError, LedgerError, StorageError};
pub use crate::ledger::{Category, LedgerState, CATEGORY_DEFINITIONS};

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and emits a startup info log.
pub fn init() {
    INIT_TRACING.call_once(|| {
        utils::init_tracing();
        tracing::info!("Finance Core tracing initialized.");
    });
}
