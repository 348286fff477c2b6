use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::{
    entry::{ExpenseEntry, IncomeEntry},
    month::{MONTHS_IN_YEAR, MONTH_LABELS},
};
use crate::errors::LedgerError;

/// Entries grouped by month label, in recording order within each month.
pub type MonthLog<T> = BTreeMap<String, Vec<T>>;

const SUM_TOLERANCE: f64 = 1e-9;

/// Twelve month labels with index-aligned cumulative income and expense values.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MonthlySeries {
    pub months: Vec<String>,
    pub income: Vec<f64>,
    pub expense: Vec<f64>,
}

impl Default for MonthlySeries {
    fn default() -> Self {
        Self {
            months: MONTH_LABELS.iter().map(|label| label.to_string()).collect(),
            income: vec![0.0; MONTHS_IN_YEAR],
            expense: vec![0.0; MONTHS_IN_YEAR],
        }
    }
}

impl MonthlySeries {
    pub fn index_of(&self, month: &str) -> Option<usize> {
        self.months.iter().position(|label| label == month)
    }

    /// Returns `true` when the three sequences hold twelve aligned slots.
    pub fn is_well_formed(&self) -> bool {
        self.months.len() == MONTHS_IN_YEAR
            && self.income.len() == MONTHS_IN_YEAR
            && self.expense.len() == MONTHS_IN_YEAR
    }

    pub fn income_for(&self, month: &str) -> Option<f64> {
        self.index_of(month)
            .and_then(|idx| self.income.get(idx).copied())
    }

    pub fn expense_for(&self, month: &str) -> Option<f64> {
        self.index_of(month)
            .and_then(|idx| self.expense.get(idx).copied())
    }
}

/// Authoritative in-memory model of the dashboard.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct LedgerState {
    pub balance: f64,
    pub total_income: f64,
    pub total_expenses: f64,
    pub monthly_series: MonthlySeries,
    #[serde(default)]
    pub expense_log: MonthLog<ExpenseEntry>,
    #[serde(default)]
    pub income_log: MonthLog<IncomeEntry>,
}

impl LedgerState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `amount` to the balance. Nothing changes when the new balance would overflow.
    pub fn apply_deposit(&mut self, amount: f64) -> Result<(), LedgerError> {
        self.balance = finite_sum(self.balance, amount, amount)?;
        Ok(())
    }

    /// Credits `entry` to `month`.
    ///
    /// Nothing changes when the month is not in the series or a running sum would overflow.
    pub fn apply_income(&mut self, month: &str, entry: IncomeEntry) -> Result<(), LedgerError> {
        let idx = self.resolve_month(month)?;
        let amount = entry.amount;
        let series = finite_sum(self.monthly_series.income[idx], amount, amount)?;
        let total_income = finite_sum(self.total_income, amount, amount)?;
        let balance = finite_sum(self.balance, amount, amount)?;

        self.monthly_series.income[idx] = series;
        self.income_log
            .entry(month.to_string())
            .or_default()
            .push(entry);
        self.total_income = total_income;
        self.balance = balance;
        Ok(())
    }

    /// Debits `entry` from `month`.
    ///
    /// Nothing changes when the month is not in the series or a running sum would overflow.
    pub fn apply_expense(&mut self, month: &str, entry: ExpenseEntry) -> Result<(), LedgerError> {
        let idx = self.resolve_month(month)?;
        let amount = entry.amount;
        let series = finite_sum(self.monthly_series.expense[idx], amount, amount)?;
        let total_expenses = finite_sum(self.total_expenses, amount, amount)?;
        let balance = finite_sum(self.balance, -amount, amount)?;

        self.monthly_series.expense[idx] = series;
        self.expense_log
            .entry(month.to_string())
            .or_default()
            .push(entry);
        self.total_expenses = total_expenses;
        self.balance = balance;
        Ok(())
    }

    pub fn expenses_for(&self, month: &str) -> &[ExpenseEntry] {
        self.expense_log
            .get(month)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn incomes_for(&self, month: &str) -> &[IncomeEntry] {
        self.income_log
            .get(month)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Sum of all logged expense amounts for `month`.
    pub fn logged_expense_total(&self, month: &str) -> f64 {
        self.expenses_for(month).iter().map(|entry| entry.amount).sum()
    }

    /// Detects disagreements between the expense log and the monthly series.
    pub fn consistency_warnings(&self) -> Vec<String> {
        let mut warnings = Vec::new();
        if !self.monthly_series.is_well_formed() {
            warnings.push(format!(
                "monthly series holds {} labels, {} income and {} expense slots",
                self.monthly_series.months.len(),
                self.monthly_series.income.len(),
                self.monthly_series.expense.len()
            ));
            return warnings;
        }
        for month in self.expense_log.keys() {
            if self.monthly_series.index_of(month).is_none() {
                warnings.push(format!("expense log references unknown month `{month}`"));
            }
        }
        for (idx, month) in self.monthly_series.months.iter().enumerate() {
            let logged = self.logged_expense_total(month);
            let series = self.monthly_series.expense[idx];
            if !amounts_match(logged, series) {
                warnings.push(format!(
                    "month `{month}` logs {logged} in expenses but the series holds {series}"
                ));
            }
        }
        warnings
    }

    /// Restores the log/series cross-invariant, trusting the expense log.
    ///
    /// Log months missing from the series are dropped. Returns a description of each repair.
    pub fn reconcile(&mut self) -> Vec<String> {
        let mut repairs = Vec::new();
        if !self.monthly_series.is_well_formed() {
            self.monthly_series = MonthlySeries::default();
            repairs.push("replaced malformed monthly series with defaults".to_string());
        }
        let series = &self.monthly_series;
        let orphaned: Vec<String> = self
            .expense_log
            .keys()
            .chain(self.income_log.keys())
            .filter(|month| series.index_of(month).is_none())
            .cloned()
            .collect();
        for month in orphaned {
            let dropped = self.expense_log.remove(&month).map_or(0, |entries| entries.len())
                + self.income_log.remove(&month).map_or(0, |entries| entries.len());
            if dropped > 0 {
                repairs.push(format!(
                    "dropped {dropped} entries logged under unknown month `{month}`"
                ));
            }
        }
        for idx in 0..self.monthly_series.months.len() {
            let logged = self.logged_expense_total(&self.monthly_series.months[idx]);
            let series = self.monthly_series.expense[idx];
            if !amounts_match(logged, series) {
                repairs.push(format!(
                    "rebuilt expenses for `{}` from {series} to {logged}",
                    self.monthly_series.months[idx]
                ));
                self.monthly_series.expense[idx] = logged;
            }
        }
        repairs
    }

    fn resolve_month(&self, month: &str) -> Result<usize, LedgerError> {
        match self.monthly_series.index_of(month) {
            Some(idx)
                if idx < self.monthly_series.income.len()
                    && idx < self.monthly_series.expense.len() =>
            {
                Ok(idx)
            }
            _ => Err(LedgerError::MonthNotFound(month.to_string())),
        }
    }
}

fn finite_sum(current: f64, delta: f64, amount: f64) -> Result<f64, LedgerError> {
    let sum = current + delta;
    if sum.is_finite() {
        Ok(sum)
    } else {
        Err(LedgerError::InvalidAmount(amount.to_string()))
    }
}

fn amounts_match(left: f64, right: f64) -> bool {
    (left - right).abs() <= SUM_TOLERANCE * left.abs().max(right.abs()).max(1.0)
}
