mod common;

use finance_core::{
    core::services::{ChartKind, ChartSeries},
    ledger::{Category, ExpenseEntry},
    LedgerError, PeriodFilter,
};

const MAY: u32 = 5;

#[test]
fn recording_income_in_may() {
    let (mut dashboard, _) = common::memory_dashboard(MAY);
    dashboard.record_income("1000", "salary").expect("income recorded");

    let state = dashboard.state();
    assert_eq!(state.total_income, 1000.0);
    assert_eq!(state.balance, 1000.0);
    assert_eq!(state.monthly_series.income[4], 1000.0);
}

#[test]
fn recording_an_expense_after_income() {
    let (mut dashboard, _) = common::memory_dashboard(MAY);
    dashboard.record_income("1000", "salary").unwrap();
    dashboard
        .record_expense("200", "Еда", "lunch")
        .expect("expense recorded");

    let state = dashboard.state();
    assert_eq!(state.total_expenses, 200.0);
    assert_eq!(state.balance, 800.0);
    assert_eq!(
        state.expense_log.get("Май").map(Vec::as_slice),
        Some(&[ExpenseEntry::new(200.0, Category::Food, "lunch")][..])
    );
    assert_eq!(state.monthly_series.expense[4], 200.0);
}

#[test]
fn may_breakdown_lists_every_category() {
    let (mut dashboard, _) = common::memory_dashboard(MAY);
    dashboard.record_income("1000", "salary").unwrap();
    dashboard.record_expense("200", "Еда", "lunch").unwrap();

    let breakdown: Vec<(&str, f64)> = dashboard
        .category_breakdown(&PeriodFilter::month("Май"))
        .iter()
        .map(|item| (item.category.name(), item.sum))
        .collect();
    assert_eq!(
        breakdown,
        vec![
            ("Еда", 200.0),
            ("Транспорт", 0.0),
            ("Развлечения", 0.0),
            ("Счета", 0.0),
            ("Покупки", 0.0),
            ("Другое", 0.0),
        ]
    );
}

#[test]
fn invalid_deposit_changes_nothing() {
    let (mut dashboard, store) = common::memory_dashboard(MAY);
    let before = dashboard.snapshot();

    let err = dashboard.deposit("abc").expect_err("deposit must be rejected");
    assert!(matches!(err, LedgerError::InvalidAmount(raw) if raw == "abc"));
    assert_eq!(dashboard.snapshot(), before);
    assert_eq!(store.save_count(), 0);
}

#[test]
fn all_filter_returns_the_untouched_series() {
    let (mut dashboard, _) = common::memory_dashboard(MAY);
    dashboard.record_income("1000", "salary").unwrap();
    dashboard.record_expense("200", "Еда", "lunch").unwrap();

    let series = dashboard.time_series_or_period_breakdown(&PeriodFilter::All);
    assert_eq!(series.kind(), ChartKind::Line);
    let ChartSeries::TimeSeries(series) = series else {
        panic!("expected the yearly series");
    };
    assert_eq!(&series, &dashboard.state().monthly_series);
    assert_eq!(series.months.len(), 12);
    for idx in 0..12 {
        if idx == 4 {
            assert_eq!(series.income[idx], 1000.0);
            assert_eq!(series.expense[idx], 200.0);
        } else {
            assert_eq!(series.income[idx], 0.0);
            assert_eq!(series.expense[idx], 0.0);
        }
    }
}

#[test]
fn single_month_filter_switches_chart_kind() {
    let (mut dashboard, _) = common::memory_dashboard(MAY);
    dashboard.record_income("1000", "salary").unwrap();
    dashboard.record_expense("200", "Еда", "lunch").unwrap();

    let series = dashboard.time_series_or_period_breakdown(&PeriodFilter::parse("Май"));
    assert_eq!(series.kind(), ChartKind::Bar);
    let ChartSeries::PeriodBreakdown(breakdown) = series else {
        panic!("expected a single-period breakdown");
    };
    assert_eq!(breakdown.period, "Май");
    assert_eq!(breakdown.values, vec![1000.0, 200.0, 0.0, 0.0, 0.0, 0.0, 0.0]);

    let chart = dashboard.trend_chart(&PeriodFilter::parse("all"));
    assert_eq!(chart.kind, ChartKind::Line);
    let shares = dashboard.category_shares(&PeriodFilter::All);
    assert_eq!(shares[0].percentage, 100.0);
    let doughnut = dashboard.distribution_chart(&PeriodFilter::All);
    assert_eq!(doughnut.kind, ChartKind::Doughnut);
}
