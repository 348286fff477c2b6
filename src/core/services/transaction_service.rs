use tracing::debug;

use super::ServiceResult;
use crate::{
    core::time::Clock,
    errors::LedgerError,
    ledger::{Category, ExpenseEntry, IncomeEntry, LedgerState},
};

/// The three state transitions of the ledger.
///
/// Each operation validates its inputs and resolves the current month before touching
/// the state, so a rejected call leaves `state` exactly as it was.
pub struct TransactionService;

impl TransactionService {
    /// Parses a user-entered amount.
    ///
    /// Accepts surrounding whitespace, space digit grouping and a decimal comma. Rejects
    /// empty, non-numeric, non-finite and negative values.
    pub fn parse_amount(raw: &str) -> ServiceResult<f64> {
        let normalized: String = raw
            .trim()
            .chars()
            .filter(|ch| !matches!(ch, ' ' | '\u{a0}' | '\u{202f}'))
            .map(|ch| if ch == ',' { '.' } else { ch })
            .collect();
        let invalid = || LedgerError::InvalidAmount(raw.to_string());
        let amount: f64 = normalized.parse().map_err(|_| invalid())?;
        if !amount.is_finite() || amount < 0.0 {
            return Err(invalid());
        }
        Ok(amount)
    }

    pub fn deposit(state: &mut LedgerState, raw_amount: &str) -> ServiceResult<f64> {
        let amount = Self::parse_amount(raw_amount)?;
        state.apply_deposit(amount)?;
        debug!(amount, balance = state.balance, "deposit applied");
        Ok(amount)
    }

    pub fn record_income(
        state: &mut LedgerState,
        clock: &dyn Clock,
        raw_amount: &str,
        description: &str,
    ) -> ServiceResult<f64> {
        let amount = Self::parse_amount(raw_amount)?;
        let month = clock.current_month();
        state.apply_income(month, IncomeEntry::new(amount, description.trim()))?;
        debug!(amount, month, balance = state.balance, "income recorded");
        Ok(amount)
    }

    pub fn record_expense(
        state: &mut LedgerState,
        clock: &dyn Clock,
        raw_amount: &str,
        category: &str,
        description: &str,
    ) -> ServiceResult<f64> {
        let amount = Self::parse_amount(raw_amount)?;
        if amount == 0.0 {
            return Err(LedgerError::InvalidAmount(raw_amount.to_string()));
        }
        let category: Category = category.parse()?;
        let month = clock.current_month();
        state.apply_expense(
            month,
            ExpenseEntry::new(amount, category, description.trim()),
        )?;
        debug!(amount, month, %category, balance = state.balance, "expense recorded");
        Ok(amount)
    }
}
