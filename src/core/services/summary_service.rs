use std::{convert::Infallible, fmt, str::FromStr};

use serde::Serialize;

use crate::ledger::{
    Category, ExpenseEntry, IncomeEntry, LedgerState, MonthlySeries, CATEGORY_DEFINITIONS,
};

/// Label of the income bar in a single-period breakdown.
pub const INCOME_LABEL: &str = "Доход";

const ALL_PERIODS: &str = "all";

/// Selects the slice of history an aggregate covers.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum PeriodFilter {
    #[default]
    All,
    Month(String),
}

impl PeriodFilter {
    /// Interprets `"all"` (any case) as every month and anything else as a month label.
    pub fn parse(raw: &str) -> Self {
        let trimmed = raw.trim();
        if trimmed.eq_ignore_ascii_case(ALL_PERIODS) {
            PeriodFilter::All
        } else {
            PeriodFilter::Month(trimmed.to_string())
        }
    }

    pub fn month(label: impl Into<String>) -> Self {
        PeriodFilter::Month(label.into())
    }

    pub fn is_all(&self) -> bool {
        matches!(self, PeriodFilter::All)
    }

    fn includes(&self, month: &str) -> bool {
        match self {
            PeriodFilter::All => true,
            PeriodFilter::Month(label) => label == month,
        }
    }
}

impl FromStr for PeriodFilter {
    type Err = Infallible;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Ok(PeriodFilter::parse(value))
    }
}

impl fmt::Display for PeriodFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PeriodFilter::All => f.write_str(ALL_PERIODS),
            PeriodFilter::Month(label) => f.write_str(label),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, PartialEq)]
pub struct CategorySum {
    pub category: Category,
    pub sum: f64,
}

/// A category sum together with its share of the filtered total.
#[derive(Debug, Clone, Copy, Serialize, PartialEq)]
pub struct CategoryShare {
    pub category: Category,
    pub sum: f64,
    pub percentage: f64,
}

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ChartKind {
    /// Continuous trend across the twelve months.
    Line,
    /// One bar per label for a single period.
    Bar,
    /// Share of each category in the expense total.
    Doughnut,
}

/// Income and per-category expense values of a single month.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct PeriodBreakdown {
    pub period: String,
    pub labels: Vec<String>,
    pub values: Vec<f64>,
}

/// Output of [`SummaryService::time_series_or_period_breakdown`].
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum ChartSeries {
    TimeSeries(MonthlySeries),
    PeriodBreakdown(PeriodBreakdown),
}

impl ChartSeries {
    pub fn kind(&self) -> ChartKind {
        match self {
            ChartSeries::TimeSeries(_) => ChartKind::Line,
            ChartSeries::PeriodBreakdown(_) => ChartKind::Bar,
        }
    }
}

/// Pure derivations over a [`LedgerState`].
pub struct SummaryService;

impl SummaryService {
    /// Sums expenses per category, in definition order, zero-sum categories included.
    pub fn category_breakdown(state: &LedgerState, filter: &PeriodFilter) -> Vec<CategorySum> {
        let mut sums = [0.0_f64; CATEGORY_DEFINITIONS.len()];
        for (month, entries) in &state.expense_log {
            if !filter.includes(month) {
                continue;
            }
            for entry in entries {
                sums[entry.category.index()] += entry.amount;
            }
        }
        CATEGORY_DEFINITIONS
            .iter()
            .map(|definition| CategorySum {
                category: definition.category,
                sum: sums[definition.category.index()],
            })
            .collect()
    }

    pub fn category_shares(state: &LedgerState, filter: &PeriodFilter) -> Vec<CategoryShare> {
        let breakdown = Self::category_breakdown(state, filter);
        let total: f64 = breakdown.iter().map(|item| item.sum).sum();
        breakdown
            .into_iter()
            .map(|item| CategoryShare {
                category: item.category,
                sum: item.sum,
                percentage: percentage(item.sum, total),
            })
            .collect()
    }

    /// Whole-year series for [`PeriodFilter::All`], a single-month breakdown otherwise.
    ///
    /// A month that is not part of the series falls back to the whole-year series.
    pub fn time_series_or_period_breakdown(
        state: &LedgerState,
        filter: &PeriodFilter,
    ) -> ChartSeries {
        let month = match filter {
            PeriodFilter::All => return ChartSeries::TimeSeries(state.monthly_series.clone()),
            PeriodFilter::Month(month) => month,
        };
        let Some(income) = state.monthly_series.income_for(month) else {
            return ChartSeries::TimeSeries(state.monthly_series.clone());
        };

        let breakdown = Self::category_breakdown(state, filter);
        let mut labels = Vec::with_capacity(breakdown.len() + 1);
        let mut values = Vec::with_capacity(breakdown.len() + 1);
        labels.push(INCOME_LABEL.to_string());
        values.push(income);
        for item in breakdown {
            labels.push(item.category.name().to_string());
            values.push(item.sum);
        }
        ChartSeries::PeriodBreakdown(PeriodBreakdown {
            period: month.clone(),
            labels,
            values,
        })
    }

    pub fn expense_entries<'a>(state: &'a LedgerState, month: &str) -> &'a [ExpenseEntry] {
        state.expenses_for(month)
    }

    pub fn expense_entries_in_category<'a>(
        state: &'a LedgerState,
        month: &str,
        category: Category,
    ) -> Vec<&'a ExpenseEntry> {
        state
            .expenses_for(month)
            .iter()
            .filter(|entry| entry.category == category)
            .collect()
    }

    pub fn income_entries<'a>(state: &'a LedgerState, month: &str) -> &'a [IncomeEntry] {
        state.incomes_for(month)
    }
}

/// `sum / total` as a percentage rounded to one decimal, or zero for an empty total.
pub fn percentage(sum: f64, total: f64) -> f64 {
    if total > 0.0 {
        (sum / total * 1000.0).round() / 10.0
    } else {
        0.0
    }
}
