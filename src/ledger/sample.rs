use anyhow::Result;
use rust_decimal::Decimal;

use super::{add_category, add_recurring, update_category, NewRecurring};
use crate::calendar::{trailing_months, YearMonth};
use crate::models::{Category, CategoryPatch, Expense};
use crate::store::RecordStore;

const BUDGETS: [(&str, i64); 6] = [
    ("Food", 300),
    ("Transport", 150),
    ("Rent", 1200),
    ("Utilities", 100),
    ("Entertainment", 200),
    ("Other", 100),
];

// (day, cents, payment method, description)
const FOOD: [(u32, i64, &str, &str); 8] = [
    (2, 4215, "Card", "Groceries"),
    (5, 1240, "Cash", "Coffee"),
    (8, 2875, "Card", "Lunch"),
    (11, 5630, "Card", "Groceries"),
    (14, 3410, "Card", "Restaurant"),
    (18, 1590, "Cash", "Lunch"),
    (22, 4780, "Card", "Dinner"),
    (26, 2105, "Cash", "Coffee"),
];

const TRANSPORT: [(u32, i64); 10] = [
    (1, 650),
    (3, 1280),
    (6, 2340),
    (9, 875),
    (12, 3120),
    (15, 540),
    (17, 1995),
    (20, 710),
    (23, 2560),
    (27, 1430),
];

const ENTERTAINMENT: [(u32, i64, &str); 3] =
    [(7, 2450, "Movie"), (16, 6800, "Concert"), (24, 3599, "Game")];

const SAMPLE_MONTHS: usize = 3;

#[derive(Debug, Default, PartialEq)]
pub(crate) struct SampleReport {
    pub(crate) budgets: usize,
    pub(crate) expenses: usize,
    pub(crate) recurring: usize,
}

/// Fills the store with demo data: a budget on every default category,
/// three months of spending ending at `month`, and monthly rent and
/// utilities templates.
///
/// Amounts drift a little from month to month.
pub(crate) fn seed_sample(store: &mut impl RecordStore, month: YearMonth) -> Result<SampleReport> {
    let mut report = SampleReport::default();

    for (name, budget) in BUDGETS {
        let budget = Some(Decimal::new(budget, 0));
        let existing = Category::find_by_name(&store.get_categories()?, name).and_then(|c| c.id);
        match existing {
            Some(id) => {
                update_category(
                    store,
                    id,
                    CategoryPatch {
                        budget: Some(budget),
                        active: Some(true),
                        ..Default::default()
                    },
                )?;
            }
            None => {
                add_category(store, name, budget)?;
            }
        }
        report.budgets += 1;
    }

    let mut expenses = Vec::new();
    for (back, m) in trailing_months(month, SAMPLE_MONTHS).into_iter().rev().enumerate() {
        expenses.extend(month_expenses(m, back as i64));
    }
    report.expenses = store.insert_expenses(expenses)?.len();

    for (amount, category, description, day_of_month) in [
        (1200, "Rent", "Monthly rent", 1),
        (80, "Utilities", "Monthly utilities", 5),
    ] {
        add_recurring(
            store,
            NewRecurring {
                amount: Decimal::new(amount, 0),
                category: category.into(),
                payment_method: "Card".into(),
                description: description.into(),
                day_of_month,
            },
        )?;
        report.recurring += 1;
    }

    tracing::info!(
        %month,
        expenses = report.expenses,
        recurring = report.recurring,
        "sample data seeded"
    );
    Ok(report)
}

/// One month of sample spending. `back` counts months before the newest.
fn month_expenses(month: YearMonth, back: i64) -> Vec<Expense> {
    let drift = back * 97;
    let expense = |day: u32, cents: i64, category: &str, payment: &str, description: &str| {
        Expense::new(
            month.day(day),
            Decimal::new(cents, 2),
            category.into(),
            payment.into(),
            description.into(),
        )
    };

    let mut out = Vec::new();
    for (day, cents, payment, description) in FOOD {
        out.push(expense(day, cents + drift, "Food", payment, description));
    }
    for (day, cents) in TRANSPORT {
        out.push(expense(day, cents + drift / 2, "Transport", "Card", "Public transport"));
    }
    out.push(expense(1, 120_000, "Rent", "Card", "Monthly rent"));
    out.push(expense(5, 7425 + drift, "Utilities", "Card", "Electricity and water"));
    for (day, cents, description) in ENTERTAINMENT {
        out.push(expense(day, cents - drift, "Entertainment", "Card", description));
    }
    out
}

#[cfg(test)]
#[path = "sample_tests.rs"]
mod tests;
