use anyhow::Context;
use chrono::{Datelike, Days, Local, Months, NaiveDate};
use serde::{Serialize, Serializer};
use std::str::FromStr;

const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// A calendar month. Internally the first day of that month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub(crate) struct YearMonth {
    first: NaiveDate,
}

impl YearMonth {
    pub(crate) fn new(year: i32, month: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, 1).map(|first| Self { first })
    }

    /// The month a date falls in.
    pub(crate) fn of(date: NaiveDate) -> Self {
        Self {
            first: date - Days::new(u64::from(date.day0())),
        }
    }

    pub(crate) fn current() -> Self {
        Self::of(Local::now().date_naive())
    }

    pub(crate) fn year(self) -> i32 {
        self.first.year()
    }

    pub(crate) fn month(self) -> u32 {
        self.first.month()
    }

    /// Shift by whole months, wrapping across years. Saturates at the
    /// edges of the supported date range.
    pub(crate) fn offset(self, months: i32) -> Self {
        let shifted = if months >= 0 {
            self.first.checked_add_months(Months::new(months.unsigned_abs()))
        } else {
            self.first.checked_sub_months(Months::new(months.unsigned_abs()))
        };
        shifted.map_or(self, |first| Self { first })
    }

    pub(crate) fn first_day(self) -> NaiveDate {
        self.first
    }

    pub(crate) fn last_day(self) -> u32 {
        last_day_of_month(self.year(), self.month())
    }

    /// The given day of this month, clamped to the month's last day.
    /// Never rolls into the following month.
    pub(crate) fn day(self, day: u32) -> NaiveDate {
        let clamped = day.clamp(1, self.last_day());
        self.first.with_day(clamped).unwrap_or(self.first)
    }

    pub(crate) fn contains(self, date: NaiveDate) -> bool {
        date.year() == self.year() && date.month() == self.month()
    }

    pub(crate) fn name(self) -> &'static str {
        month_name(self.month())
    }
}

impl std::fmt::Display for YearMonth {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:04}-{:02}", self.year(), self.month())
    }
}

impl Serialize for YearMonth {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl FromStr for YearMonth {
    type Err = anyhow::Error;

    /// Parses `YYYY-MM` (a single-digit month is accepted).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let first = NaiveDate::parse_from_str(&format!("{}-01", s.trim()), "%Y-%m-%d")
            .with_context(|| format!("Invalid month '{s}', expected YYYY-MM"))?;
        Ok(Self { first })
    }
}

/// The month `offset_months` before (negative) or after the month of `date`.
pub(crate) fn month_window(date: NaiveDate, offset_months: i32) -> YearMonth {
    YearMonth::of(date).offset(offset_months)
}

/// Last calendar day (28-31) of a 1-based month, leap-year aware.
pub(crate) fn last_day_of_month(year: i32, month: u32) -> u32 {
    match month {
        2 if is_leap_year(year) => 29,
        2 => 28,
        4 | 6 | 9 | 11 => 30,
        _ => 31,
    }
}

fn is_leap_year(year: i32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
}

/// English name of a 1-based month; empty for out-of-range input.
pub(crate) fn month_name(month: u32) -> &'static str {
    month
        .checked_sub(1)
        .and_then(|i| MONTH_NAMES.get(i as usize))
        .copied()
        .unwrap_or("")
}

/// `count` consecutive months ending at `anchor`, oldest first.
pub(crate) fn trailing_months(anchor: YearMonth, count: usize) -> Vec<YearMonth> {
    (0..count)
        .rev()
        .map(|back| month_window(anchor.first_day(), -(back as i32)))
        .collect()
}

#[cfg(test)]
mod tests;
