use chrono::NaiveDate;
use rust_decimal::Decimal;
use std::collections::HashSet;

use crate::calendar::YearMonth;
use crate::models::{Expense, RecurringTemplate};

/// Identity used to decide whether a recurring charge already exists.
#[derive(Debug, PartialEq, Eq, Hash)]
struct Fingerprint<'a> {
    amount: Decimal,
    category: &'a str,
    description: &'a str,
    date: NaiveDate,
}

impl<'a> Fingerprint<'a> {
    fn of_expense(exp: &'a Expense) -> Self {
        Self {
            // normalize so 1200 and 1200.00 compare equal
            amount: exp.amount.normalize(),
            category: &exp.category,
            description: &exp.description,
            date: exp.date,
        }
    }

    fn of_template(template: &'a RecurringTemplate, date: NaiveDate) -> Self {
        Self {
            amount: template.amount.normalize(),
            category: &template.category,
            description: &template.description,
            date,
        }
    }
}

/// Expenses that active templates still owe for `month`.
///
/// Only the new expenses are returned; persisting them is up to the caller.
/// Running again with those expenses included in `existing` yields nothing.
pub(crate) fn reconcile_recurring(
    templates: &[RecurringTemplate],
    existing: &[Expense],
    month: YearMonth,
) -> Vec<Expense> {
    let mut seen: HashSet<Fingerprint<'_>> = existing
        .iter()
        .filter(|e| month.contains(e.date))
        .map(Fingerprint::of_expense)
        .collect();

    let mut generated = Vec::new();
    for template in templates.iter().filter(|t| t.active) {
        let date = month.day(template.day_of_month);
        if seen.insert(Fingerprint::of_template(template, date)) {
            generated.push(Expense::new(
                date,
                template.amount,
                template.category.clone(),
                template.payment_method.clone(),
                template.description.clone(),
            ));
        }
    }
    generated
}

#[cfg(test)]
mod tests;
