//! Projection of [`LedgerState`] onto the persisted key layout.
//!
//! | key              | contents                                                     |
//! |------------------|--------------------------------------------------------------|
//! | `balance`        | decimal as text                                              |
//! | `income`         | decimal as text                                              |
//! | `expenses`       | decimal as text                                              |
//! | `chartData`      | `{labels, datasets: [{label, data}, {label, data}]}`         |
//! | `expenseDetails` | month label -> `[{amount, category, description}]`           |
//! | `incomeDetails`  | month label -> `[{amount, description}]`                     |
//!
//! Every key is decoded independently; anything missing or malformed falls back to its
//! default and is reported in [`LoadReport::warnings`].

use serde::{de::DeserializeOwned, Deserialize, Serialize};
use tracing::{info, warn};

use super::{KeyValueStore, Result};
use crate::{
    core::charts::{EXPENSE_DATASET_LABEL, INCOME_DATASET_LABEL},
    errors::StorageError,
    ledger::{ExpenseEntry, IncomeEntry, LedgerState, MonthLog, MonthlySeries, MONTHS_IN_YEAR},
};

pub const BALANCE_KEY: &str = "balance";
pub const INCOME_KEY: &str = "income";
pub const EXPENSES_KEY: &str = "expenses";
pub const CHART_DATA_KEY: &str = "chartData";
pub const EXPENSE_DETAILS_KEY: &str = "expenseDetails";
pub const INCOME_DETAILS_KEY: &str = "incomeDetails";

const SERIES_DATASETS: usize = 2;

/// Persisted shape of the monthly series.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ChartDataBlob {
    pub labels: Vec<String>,
    pub datasets: Vec<DatasetBlob>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DatasetBlob {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    pub data: Vec<f64>,
}

impl ChartDataBlob {
    pub fn from_series(series: &MonthlySeries) -> Self {
        Self {
            labels: series.months.clone(),
            datasets: vec![
                DatasetBlob {
                    label: Some(INCOME_DATASET_LABEL.to_string()),
                    data: series.income.clone(),
                },
                DatasetBlob {
                    label: Some(EXPENSE_DATASET_LABEL.to_string()),
                    data: series.expense.clone(),
                },
            ],
        }
    }

    /// Accepts only twelve labels with two index-aligned, finite datasets.
    pub fn into_series(self) -> Option<MonthlySeries> {
        if self.labels.len() != MONTHS_IN_YEAR || self.datasets.len() != SERIES_DATASETS {
            return None;
        }
        let aligned = self.datasets.iter().all(|dataset| {
            dataset.data.len() == self.labels.len()
                && dataset.data.iter().all(|value| value.is_finite())
        });
        if !aligned {
            return None;
        }
        let mut datasets = self.datasets.into_iter();
        let income = datasets.next()?.data;
        let expense = datasets.next()?.data;
        Some(MonthlySeries {
            months: self.labels,
            income,
            expense,
        })
    }
}

/// Text values written for each persisted key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedSnapshot {
    pub balance: String,
    pub income: String,
    pub expenses: String,
    pub chart_data: String,
    pub expense_details: String,
    pub income_details: String,
}

impl PersistedSnapshot {
    pub fn from_state(state: &LedgerState) -> Result<Self> {
        Ok(Self {
            balance: state.balance.to_string(),
            income: state.total_income.to_string(),
            expenses: state.total_expenses.to_string(),
            chart_data: serde_json::to_string(&ChartDataBlob::from_series(&state.monthly_series))?,
            expense_details: serde_json::to_string(&state.expense_log)?,
            income_details: serde_json::to_string(&state.income_log)?,
        })
    }

    pub fn entries(&self) -> [(&'static str, &str); 6] {
        [
            (BALANCE_KEY, self.balance.as_str()),
            (INCOME_KEY, self.income.as_str()),
            (EXPENSES_KEY, self.expenses.as_str()),
            (CHART_DATA_KEY, self.chart_data.as_str()),
            (EXPENSE_DETAILS_KEY, self.expense_details.as_str()),
            (INCOME_DETAILS_KEY, self.income_details.as_str()),
        ]
    }
}

/// Outcome of decoding a stored snapshot.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LoadReport {
    pub state: LedgerState,
    pub warnings: Vec<String>,
}

/// Rebuilds the ledger from `store`, substituting defaults for anything unusable.
pub fn load_state(store: &dyn KeyValueStore) -> LoadReport {
    let mut warnings = Vec::new();

    let balance = load_scalar(store, BALANCE_KEY, &mut warnings);
    let total_income = load_scalar(store, INCOME_KEY, &mut warnings);
    let total_expenses = load_scalar(store, EXPENSES_KEY, &mut warnings);

    let monthly_series = load_blob::<ChartDataBlob>(store, CHART_DATA_KEY, &mut warnings)
        .and_then(|blob| {
            let series = blob.into_series();
            if series.is_none() {
                warnings.push(format!(
                    "`{CHART_DATA_KEY}` does not hold {MONTHS_IN_YEAR} aligned months; using defaults"
                ));
            }
            series
        })
        .unwrap_or_default();

    let expense_log = load_blob::<MonthLog<ExpenseEntry>>(store, EXPENSE_DETAILS_KEY, &mut warnings)
        .and_then(|log| {
            valid_log(
                log,
                |entry| entry.amount.is_finite() && entry.amount > 0.0,
                EXPENSE_DETAILS_KEY,
                &mut warnings,
            )
        })
        .unwrap_or_default();
    let income_log = load_blob::<MonthLog<IncomeEntry>>(store, INCOME_DETAILS_KEY, &mut warnings)
        .and_then(|log| {
            valid_log(
                log,
                |entry| entry.amount.is_finite() && entry.amount >= 0.0,
                INCOME_DETAILS_KEY,
                &mut warnings,
            )
        })
        .unwrap_or_default();

    let mut state = LedgerState {
        balance,
        total_income,
        total_expenses,
        monthly_series,
        expense_log,
        income_log,
    };
    warnings.extend(state.reconcile());

    for warning in &warnings {
        warn!(%warning, "recovered from stored ledger data");
    }
    info!(
        balance = state.balance,
        months_with_expenses = state.expense_log.len(),
        "ledger state loaded"
    );
    LoadReport { state, warnings }
}

/// Writes every key of the snapshot, returning the first failure after attempting them all.
pub fn save_state(store: &dyn KeyValueStore, state: &LedgerState) -> Result<()> {
    let snapshot = PersistedSnapshot::from_state(state)?;
    let mut first_error: Option<StorageError> = None;
    for (key, value) in snapshot.entries() {
        if let Err(err) = store.save(key, value) {
            warn!(key, error = %err, "failed to persist ledger value");
            first_error.get_or_insert(err);
        }
    }
    match first_error {
        Some(err) => Err(err),
        None => Ok(()),
    }
}

fn load_scalar(store: &dyn KeyValueStore, key: &str, warnings: &mut Vec<String>) -> f64 {
    let Some(raw) = store.load(key) else {
        return 0.0;
    };
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return 0.0;
    }
    match trimmed.parse::<f64>() {
        Ok(value) if value.is_finite() => value,
        _ => {
            warnings.push(format!("`{key}` holds `{trimmed}`, which is not a number; using 0"));
            0.0
        }
    }
}

fn load_blob<T: DeserializeOwned>(
    store: &dyn KeyValueStore,
    key: &str,
    warnings: &mut Vec<String>,
) -> Option<T> {
    let raw = store.load(key)?;
    match serde_json::from_str(&raw) {
        Ok(value) => Some(value),
        Err(err) => {
            warnings.push(format!("`{key}` could not be parsed ({err}); using defaults"));
            None
        }
    }
}

/// Keeps `log` only when every entry passes `accepts`.
fn valid_log<T>(
    log: MonthLog<T>,
    accepts: impl Fn(&T) -> bool,
    key: &str,
    warnings: &mut Vec<String>,
) -> Option<MonthLog<T>> {
    let valid = log.values().flatten().all(&accepts);
    if valid {
        Some(log)
    } else {
        warnings.push(format!("`{key}` holds out-of-range amounts; using defaults"));
        None
    }
}
