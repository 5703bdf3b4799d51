use rust_decimal::Decimal;
use serde::{Serialize, Serializer};

use crate::budget::{evaluate_budgets, spending_by_name, BudgetStatus};
use crate::calendar::{month_window, trailing_months, YearMonth};
use crate::models::{total, Category, Expense};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub(crate) struct TrendPoint {
    pub(crate) month: YearMonth,
    pub(crate) name: &'static str,
    pub(crate) year: i32,
    pub(crate) total: Decimal,
}

/// Month overview: totals, category breakdown, trailing trend and budgets.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub(crate) struct Dashboard {
    pub(crate) month: YearMonth,
    pub(crate) total: Decimal,
    pub(crate) previous_total: Decimal,
    /// `total - previous_total`
    pub(crate) change: Decimal,
    pub(crate) expense_count: usize,
    /// Largest first, ties by name.
    #[serde(serialize_with = "pairs_as_map")]
    pub(crate) by_category: Vec<(String, Decimal)>,
    /// Oldest first, ending at `month`.
    pub(crate) trend: Vec<TrendPoint>,
    pub(crate) trend_max: Decimal,
    pub(crate) budgets: Vec<BudgetStatus>,
}

impl Dashboard {
    /// `expenses` may span any range; each figure picks the months it needs.
    pub(crate) fn build(
        categories: &[Category],
        expenses: &[Expense],
        month: YearMonth,
        trend_months: usize,
    ) -> Self {
        let in_month = |m: YearMonth| -> Vec<Expense> {
            expenses
                .iter()
                .filter(|e| m.contains(e.date))
                .cloned()
                .collect()
        };

        let current = in_month(month);
        let total_now = total(&current);
        let previous_total = total(&in_month(month_window(month.first_day(), -1)));

        let mut by_category: Vec<(String, Decimal)> = spending_by_name(&current)
            .into_iter()
            .map(|(name, amount)| (name.to_string(), amount))
            .collect();
        by_category.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));

        let trend: Vec<TrendPoint> = trailing_months(month, trend_months)
            .into_iter()
            .map(|m| TrendPoint {
                month: m,
                name: m.name(),
                year: m.year(),
                total: total(&in_month(m)),
            })
            .collect();
        let trend_max = trend
            .iter()
            .map(|p| p.total)
            .max()
            .unwrap_or(Decimal::ZERO);

        Self {
            month,
            total: total_now,
            previous_total,
            change: total_now - previous_total,
            expense_count: current.len(),
            by_category,
            trend,
            trend_max,
            budgets: evaluate_budgets(categories, &current),
        }
    }

    /// Month-over-month change in percent. `None` when last month was empty.
    pub(crate) fn change_percent(&self) -> Option<Decimal> {
        if self.previous_total.is_zero() {
            return None;
        }
        Some((self.change / self.previous_total * Decimal::ONE_HUNDRED).round_dp(1))
    }

    pub(crate) fn over_budget_count(&self) -> usize {
        self.budgets.iter().filter(|b| b.is_over_budget).count()
    }
}

/// Keeps the sorted order while writing `{name: amount}`.
fn pairs_as_map<S: Serializer>(pairs: &[(String, Decimal)], s: S) -> Result<S::Ok, S::Error> {
    s.collect_map(pairs.iter().map(|(name, amount)| (name, amount)))
}
