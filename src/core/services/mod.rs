pub mod summary_service;
pub mod transaction_service;

pub use summary_service::{
    CategoryShare, CategorySum, ChartKind, ChartSeries, PeriodBreakdown, PeriodFilter,
    SummaryService, INCOME_LABEL,
};
pub use transaction_service::TransactionService;

use crate::errors::LedgerError;

pub type ServiceResult<T> = Result<T, LedgerError>;
