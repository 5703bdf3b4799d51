use anyhow::bail;
use chrono::{Months, NaiveDate};
use std::str::FromStr;

use crate::models::Expense;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) enum SortBy {
    #[default]
    Date,
    Amount,
}

impl FromStr for SortBy {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "date" => Ok(Self::Date),
            "amount" => Ok(Self::Amount),
            other => bail!("Unknown sort field '{other}', expected date or amount"),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) enum SortOrder {
    Asc,
    #[default]
    Desc,
}

/// Criteria for the expense list. The default shows everything, newest first.
#[derive(Debug, Clone, Default, PartialEq)]
pub(crate) struct ExpenseFilter {
    /// Exact category name.
    pub(crate) category: Option<String>,
    pub(crate) start: Option<NaiveDate>,
    pub(crate) end: Option<NaiveDate>,
    /// Case-insensitive, matched against description and category.
    pub(crate) search: Option<String>,
    pub(crate) sort_by: SortBy,
    pub(crate) order: SortOrder,
}

impl ExpenseFilter {
    /// Everything from `months` months before `today` onward.
    pub(crate) fn recent(today: NaiveDate, months: u32) -> Self {
        Self {
            start: Some(today.checked_sub_months(Months::new(months)).unwrap_or(today)),
            ..Default::default()
        }
    }

    /// Inclusive date bounds, swapped when given backwards.
    fn bounds(&self) -> (Option<NaiveDate>, Option<NaiveDate>) {
        match (self.start, self.end) {
            (Some(start), Some(end)) if start > end => (Some(end), Some(start)),
            other => other,
        }
    }

    pub(crate) fn matches(&self, expense: &Expense) -> bool {
        let (start, end) = self.bounds();
        if start.is_some_and(|s| expense.date < s) || end.is_some_and(|e| expense.date > e) {
            return false;
        }
        if let Some(category) = &self.category {
            if &expense.category != category {
                return false;
            }
        }
        if let Some(search) = self.search.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
            let needle = search.to_lowercase();
            return expense.description.to_lowercase().contains(&needle)
                || expense.category.to_lowercase().contains(&needle);
        }
        true
    }

    pub(crate) fn apply(&self, expenses: &[Expense]) -> Vec<Expense> {
        let mut out: Vec<Expense> = expenses.iter().filter(|e| self.matches(e)).cloned().collect();
        out.sort_by(|a, b| {
            let ord = match self.sort_by {
                SortBy::Date => a.date.cmp(&b.date),
                SortBy::Amount => a.amount.cmp(&b.amount),
            }
            // ties by id
            .then_with(|| a.id.cmp(&b.id));
            match self.order {
                SortOrder::Asc => ord,
                SortOrder::Desc => ord.reverse(),
            }
        });
        out
    }
}
