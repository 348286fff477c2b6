use tracing::{info, warn};

use super::{
    charts::{self, ChartData},
    format,
    services::{
        CategoryShare, CategorySum, ChartSeries, PeriodFilter, ServiceResult, SummaryService,
        TransactionService,
    },
    time::{Clock, SystemClock},
};
use crate::{
    config::Config,
    errors::{LedgerError, StorageError},
    ledger::{Category, LedgerState},
    storage::{load_state, save_state, JsonFileStore, KeyValueStore},
};

/// Result of a mutation that was applied to the ledger.
///
/// The mutation stands even when persisting it failed; the failure is carried as a warning.
#[derive(Debug)]
pub struct MutationOutcome {
    amount: f64,
    persisted: Result<(), StorageError>,
}

impl MutationOutcome {
    /// Parsed amount that was applied.
    pub fn amount(&self) -> f64 {
        self.amount
    }

    pub fn is_persisted(&self) -> bool {
        self.persisted.is_ok()
    }

    pub fn warning(&self) -> Option<&StorageError> {
        self.persisted.as_ref().err()
    }
}

/// Facade that owns the ledger state and coordinates mutations, persistence and aggregates.
pub struct Dashboard {
    state: LedgerState,
    store: Box<dyn KeyValueStore>,
    clock: Box<dyn Clock>,
    currency_symbol: String,
    load_warnings: Vec<String>,
}

impl Dashboard {
    /// Loads the ledger from `store`, using defaults for anything missing or corrupt.
    pub fn new(store: Box<dyn KeyValueStore>, clock: Box<dyn Clock>) -> Self {
        let report = load_state(store.as_ref());
        Self {
            state: report.state,
            store,
            clock,
            currency_symbol: Config::default_currency_symbol(),
            load_warnings: report.warnings,
        }
    }

    /// Replaces the symbol appended to formatted amounts.
    pub fn with_currency_symbol(mut self, symbol: impl Into<String>) -> Self {
        self.currency_symbol = symbol.into();
        self
    }

    /// Opens the file-backed ledger in the configured data directory with the system clock.
    pub fn open(config: &Config) -> Result<Self, LedgerError> {
        let root = config.resolve_data_dir();
        let store = JsonFileStore::new(root.clone())?;
        info!(path = %root.display(), "opening ledger store");
        Ok(Self::new(Box::new(store), Box::new(SystemClock))
            .with_currency_symbol(config.currency_symbol.clone()))
    }

    pub fn state(&self) -> &LedgerState {
        &self.state
    }

    /// Owned copy of the current state.
    pub fn snapshot(&self) -> LedgerState {
        self.state.clone()
    }

    /// Problems recovered from while loading the stored ledger.
    pub fn load_warnings(&self) -> &[String] {
        &self.load_warnings
    }

    /// Label of the month new income and expenses are attributed to.
    pub fn current_month(&self) -> &'static str {
        self.clock.current_month()
    }

    /// Discards in-memory state and reloads it from the store.
    pub fn reload(&mut self) {
        let report = load_state(self.store.as_ref());
        self.state = report.state;
        self.load_warnings = report.warnings;
    }

    pub fn deposit(&mut self, raw_amount: &str) -> ServiceResult<MutationOutcome> {
        let amount = TransactionService::deposit(&mut self.state, raw_amount)?;
        Ok(self.persist(amount))
    }

    pub fn record_income(
        &mut self,
        raw_amount: &str,
        description: &str,
    ) -> ServiceResult<MutationOutcome> {
        let amount = TransactionService::record_income(
            &mut self.state,
            self.clock.as_ref(),
            raw_amount,
            description,
        )?;
        Ok(self.persist(amount))
    }

    pub fn record_expense(
        &mut self,
        raw_amount: &str,
        category: &str,
        description: &str,
    ) -> ServiceResult<MutationOutcome> {
        let amount = TransactionService::record_expense(
            &mut self.state,
            self.clock.as_ref(),
            raw_amount,
            category,
            description,
        )?;
        Ok(self.persist(amount))
    }

    pub fn category_breakdown(&self, filter: &PeriodFilter) -> Vec<CategorySum> {
        SummaryService::category_breakdown(&self.state, filter)
    }

    pub fn category_shares(&self, filter: &PeriodFilter) -> Vec<CategoryShare> {
        SummaryService::category_shares(&self.state, filter)
    }

    pub fn time_series_or_period_breakdown(&self, filter: &PeriodFilter) -> ChartSeries {
        SummaryService::time_series_or_period_breakdown(&self.state, filter)
    }

    pub fn trend_chart(&self, filter: &PeriodFilter) -> ChartData {
        charts::trend_chart(&self.state, filter)
    }

    pub fn distribution_chart(&self, filter: &PeriodFilter) -> ChartData {
        charts::distribution_chart(&self.state, filter)
    }

    pub fn currency_symbol(&self) -> &str {
        &self.currency_symbol
    }

    pub fn format_amount(&self, amount: f64) -> String {
        format::format_amount(amount, &self.currency_symbol)
    }

    /// Legend labels of the distribution chart, one per category.
    pub fn share_labels(&self, filter: &PeriodFilter) -> Vec<String> {
        self.category_shares(filter)
            .iter()
            .map(|share| format::share_label(share, &self.currency_symbol))
            .collect()
    }

    /// Tooltip lines for the expenses of `month`, narrowed to `category` when given.
    pub fn expense_detail_lines(&self, month: &str, category: Option<Category>) -> Vec<String> {
        match category {
            Some(category) => {
                SummaryService::expense_entries_in_category(&self.state, month, category)
                    .into_iter()
                    .map(|entry| format::expense_detail_line(entry, &self.currency_symbol))
                    .collect()
            }
            None => SummaryService::expense_entries(&self.state, month)
                .iter()
                .map(|entry| format::categorized_detail_line(entry, &self.currency_symbol))
                .collect(),
        }
    }

    pub fn income_detail_lines(&self, month: &str) -> Vec<String> {
        SummaryService::income_entries(&self.state, month)
            .iter()
            .map(|entry| format::income_detail_line(entry, &self.currency_symbol))
            .collect()
    }

    fn persist(&self, amount: f64) -> MutationOutcome {
        let persisted = save_state(self.store.as_ref(), &self.state);
        if let Err(err) = &persisted {
            warn!(error = %err, "ledger change kept in memory but not persisted");
        }
        MutationOutcome { amount, persisted }
    }
}
