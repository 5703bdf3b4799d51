use rust_decimal::Decimal;
use serde::Serialize;
use std::collections::HashMap;

use crate::models::{Category, Expense};

/// Spend against one category's ceiling for a month.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub(crate) struct BudgetStatus {
    pub(crate) category: String,
    pub(crate) budget: Option<Decimal>,
    pub(crate) spent: Decimal,
    /// `None` when the category is unlimited.
    pub(crate) remaining: Option<Decimal>,
    pub(crate) is_over_budget: bool,
}

impl BudgetStatus {
    /// Share of the ceiling used, in percent. `None` for unlimited and zero
    /// ceilings, which have no meaningful ratio.
    pub(crate) fn percent_used(&self) -> Option<Decimal> {
        match self.budget {
            Some(limit) if limit > Decimal::ZERO => {
                Some(self.spent / limit * Decimal::ONE_HUNDRED)
            }
            _ => None,
        }
    }
}

/// Evaluate active categories against the expenses of one month.
///
/// Expenses are attributed by exact, case-sensitive category name. A zero
/// budget is a real ceiling: any spend puts the category over budget.
pub(crate) fn evaluate_budgets(categories: &[Category], expenses_for_month: &[Expense]) -> Vec<BudgetStatus> {
    let spending = spending_by_name(expenses_for_month);

    categories
        .iter()
        .filter(|c| c.active)
        .map(|cat| {
            let spent = spending
                .get(cat.name.as_str())
                .copied()
                .unwrap_or(Decimal::ZERO);
            let (remaining, is_over_budget) = match cat.budget {
                None => (None, false),
                Some(limit) => (Some(limit - spent), spent > limit),
            };
            BudgetStatus {
                category: cat.name.clone(),
                budget: cat.budget,
                spent,
                remaining,
                is_over_budget,
            }
        })
        .collect()
}

/// Total spend per category name.
pub(crate) fn spending_by_name(expenses: &[Expense]) -> HashMap<&str, Decimal> {
    let mut totals: HashMap<&str, Decimal> = HashMap::new();
    for exp in expenses {
        *totals.entry(exp.category.as_str()).or_insert(Decimal::ZERO) += exp.amount;
    }
    totals
}

#[cfg(test)]
mod tests;
