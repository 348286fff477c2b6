//! Chart-ready structures consumed by the rendering layer.
//!
//! Two charts exist: the trend chart on the overview (line across the year, or bars for a
//! single month) and the distribution chart on the analytics view (doughnut of expense
//! categories).

use serde::Serialize;

use super::services::{ChartKind, ChartSeries, PeriodFilter, SummaryService};
use crate::ledger::{LedgerState, CATEGORY_DEFINITIONS};

pub const INCOME_DATASET_LABEL: &str = "Доход";
pub const EXPENSE_DATASET_LABEL: &str = "Траты";
pub const INCOME_COLOR: &str = "#6359E9";
pub const EXPENSE_COLOR: &str = "#FF6384";

const YEAR_TITLE: &str = "Доходы и Траты за год";
const DISTRIBUTION_TITLE: &str = "Распределение расходов по категориям";

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Dataset {
    pub label: String,
    pub data: Vec<f64>,
    /// One color per dataset, or one per data point when the chart colors slices.
    pub colors: Vec<String>,
}

impl Dataset {
    fn single(label: impl Into<String>, data: Vec<f64>, color: &str) -> Self {
        Self {
            label: label.into(),
            data,
            colors: vec![color.to_string()],
        }
    }
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ChartData {
    pub title: String,
    pub kind: ChartKind,
    pub labels: Vec<String>,
    pub datasets: Vec<Dataset>,
}

/// Income/expense chart: a two-line trend for every month, or one bar per category for a month.
pub fn trend_chart(state: &LedgerState, filter: &PeriodFilter) -> ChartData {
    let series = SummaryService::time_series_or_period_breakdown(state, filter);
    let kind = series.kind();
    match series {
        ChartSeries::TimeSeries(series) => ChartData {
            title: YEAR_TITLE.to_string(),
            kind,
            labels: series.months,
            datasets: vec![
                Dataset::single(INCOME_DATASET_LABEL, series.income, INCOME_COLOR),
                Dataset::single(EXPENSE_DATASET_LABEL, series.expense, EXPENSE_COLOR),
            ],
        },
        ChartSeries::PeriodBreakdown(breakdown) => {
            let datasets = breakdown
                .labels
                .iter()
                .zip(&breakdown.values)
                .map(|(label, value)| {
                    let color = CATEGORY_DEFINITIONS
                        .iter()
                        .find(|definition| definition.name == label.as_str())
                        .map_or(INCOME_COLOR, |definition| definition.color);
                    Dataset::single(label.as_str(), vec![*value], color)
                })
                .collect();
            ChartData {
                title: format!("Доходы и Траты за {}", breakdown.period),
                kind,
                labels: breakdown.labels,
                datasets,
            }
        }
    }
}

/// Doughnut of expense totals per category for the filtered period.
pub fn distribution_chart(state: &LedgerState, filter: &PeriodFilter) -> ChartData {
    let breakdown = SummaryService::category_breakdown(state, filter);
    ChartData {
        title: DISTRIBUTION_TITLE.to_string(),
        kind: ChartKind::Doughnut,
        labels: breakdown
            .iter()
            .map(|item| item.category.name().to_string())
            .collect(),
        datasets: vec![Dataset {
            label: EXPENSE_DATASET_LABEL.to_string(),
            data: breakdown.iter().map(|item| item.sum).collect(),
            colors: breakdown
                .iter()
                .map(|item| item.category.color().to_string())
                .collect(),
        }],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::services::INCOME_LABEL;
    use crate::ledger::{Category, ExpenseEntry, IncomeEntry};

    fn sample_state() -> LedgerState {
        let mut state = LedgerState::new();
        state
            .apply_income("Май", IncomeEntry::new(1000.0, "salary"))
            .unwrap();
        state
            .apply_expense("Май", ExpenseEntry::new(200.0, Category::Food, "lunch"))
            .unwrap();
        state
    }

    #[test]
    fn yearly_trend_has_income_and_expense_lines() {
        let chart = trend_chart(&sample_state(), &PeriodFilter::All);
        assert_eq!(chart.kind, ChartKind::Line);
        assert_eq!(chart.title, YEAR_TITLE);
        assert_eq!(chart.labels.len(), 12);
        assert_eq!(chart.datasets.len(), 2);
        assert_eq!(chart.datasets[0].label, INCOME_DATASET_LABEL);
        assert_eq!(chart.datasets[0].data[4], 1000.0);
        assert_eq!(chart.datasets[1].data[4], 200.0);
    }

    #[test]
    fn monthly_trend_colors_bars_by_category() {
        let chart = trend_chart(&sample_state(), &PeriodFilter::month("Май"));
        assert_eq!(chart.kind, ChartKind::Bar);
        assert_eq!(chart.title, "Доходы и Траты за Май");
        assert_eq!(chart.labels[0], INCOME_LABEL);
        assert_eq!(chart.datasets.len(), 7);
        assert_eq!(chart.datasets[0].colors, vec![INCOME_COLOR.to_string()]);
        assert_eq!(chart.datasets[1].colors, vec!["#FF6384".to_string()]);
        assert_eq!(chart.datasets[1].data, vec![200.0]);
        assert_eq!(chart.datasets[6].colors, vec!["#FF9F40".to_string()]);
    }

    #[test]
    fn distribution_zips_categories_with_colors() {
        let chart = distribution_chart(&sample_state(), &PeriodFilter::All);
        assert_eq!(chart.kind, ChartKind::Doughnut);
        assert_eq!(chart.labels.len(), CATEGORY_DEFINITIONS.len());
        let dataset = &chart.datasets[0];
        assert_eq!(dataset.data[0], 200.0);
        assert_eq!(dataset.colors.len(), CATEGORY_DEFINITIONS.len());
        assert_eq!(dataset.colors[2], Category::Entertainment.color());
    }
}
