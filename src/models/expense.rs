use chrono::NaiveDate;
use rust_decimal::Decimal;
use std::str::FromStr;

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Expense {
    pub(crate) id: Option<i64>,
    pub(crate) date: NaiveDate,
    pub(crate) amount: Decimal,
    /// Category name, not id.
    pub(crate) category: String,
    pub(crate) payment_method: String,
    pub(crate) description: String,
    pub(crate) created_at: String,
}

impl Expense {
    pub(crate) fn new(
        date: NaiveDate,
        amount: Decimal,
        category: String,
        payment_method: String,
        description: String,
    ) -> Self {
        Self {
            id: None,
            date,
            amount,
            category,
            payment_method,
            description,
            created_at: chrono::Utc::now().to_rfc3339(),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub(crate) struct ExpensePatch {
    pub(crate) date: Option<NaiveDate>,
    pub(crate) amount: Option<Decimal>,
    pub(crate) category: Option<String>,
    pub(crate) payment_method: Option<String>,
    pub(crate) description: Option<String>,
}

impl ExpensePatch {
    pub(crate) fn apply(&self, expense: &mut Expense) {
        if let Some(date) = self.date {
            expense.date = date;
        }
        if let Some(amount) = self.amount {
            expense.amount = amount;
        }
        if let Some(category) = &self.category {
            expense.category = category.clone();
        }
        if let Some(method) = &self.payment_method {
            expense.payment_method = method.clone();
        }
        if let Some(description) = &self.description {
            expense.description = description.clone();
        }
    }
}

/// Sum of amounts, zero for an empty slice.
pub(crate) fn total(expenses: &[Expense]) -> Decimal {
    expenses.iter().map(|e| e.amount).sum()
}

/// Parse a positive amount, ignoring `$` and thousands separators.
pub(crate) fn parse_amount(input: &str) -> Option<Decimal> {
    let cleaned = input.replace(['$', ','], "");
    Decimal::from_str(cleaned.trim())
        .ok()
        .filter(|a| *a > Decimal::ZERO)
}
