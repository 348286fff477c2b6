use chrono::{DateTime, Local, NaiveDate, TimeZone, Utc};

use crate::ledger::month_label_for;

/// Clock abstracts access to the current timestamp so services remain deterministic in tests.
pub trait Clock: Send + Sync {
    /// Returns the current UTC timestamp.
    fn now(&self) -> DateTime<Utc>;

    /// Returns the current date. Defaults to `now().date_naive()`.
    fn today(&self) -> NaiveDate {
        self.now().date_naive()
    }

    /// Label of the month that mutations are attributed to.
    fn current_month(&self) -> &'static str {
        month_label_for(self.today())
    }
}

/// Real-time clock; dates follow the local calendar of the user.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }

    fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }
}

/// Clock pinned to a single calendar date.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock {
    date: NaiveDate,
}

impl FixedClock {
    pub fn new(date: NaiveDate) -> Self {
        Self { date }
    }

    /// Pins the clock to the first day of `month` (1-based) in `year`.
    pub fn month_of(year: i32, month: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, 1).map(Self::new)
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.date
            .and_hms_opt(12, 0, 0)
            .map_or_else(Utc::now, |midday| Utc.from_utc_datetime(&midday))
    }

    fn today(&self) -> NaiveDate {
        self.date
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixed_clock_reports_its_month() {
        let clock = FixedClock::month_of(2025, 5).expect("valid date");
        assert_eq!(clock.current_month(), "Май");
        assert_eq!(clock.now().date_naive(), clock.today());
        assert!(FixedClock::month_of(2025, 13).is_none());
    }

    #[test]
    fn system_clock_resolves_a_calendar_month() {
        let label = SystemClock.current_month();
        assert!(crate::ledger::month_index(label).is_some());
    }
}
