#[cfg(test)]
mod memory;

use anyhow::Result;

use crate::calendar::YearMonth;
use crate::models::*;

#[cfg(test)]
pub(crate) use memory::MemoryStore;

pub(crate) trait CategoryStore {
    fn get_categories(&self) -> Result<Vec<Category>>;
    /// Stores a category and returns it with its assigned id.
    fn insert_category(&mut self, category: Category) -> Result<Category>;
    fn update_category(&mut self, id: i64, patch: &CategoryPatch) -> Result<Option<Category>>;
    fn delete_category(&mut self, id: i64) -> Result<bool>;
}

pub(crate) trait ExpenseStore {
    /// All expenses, newest first.
    fn get_expenses(&self) -> Result<Vec<Expense>>;
    fn insert_expense(&mut self, expense: Expense) -> Result<Expense>;
    fn update_expense(&mut self, id: i64, patch: &ExpensePatch) -> Result<Option<Expense>>;
    fn delete_expense(&mut self, id: i64) -> Result<bool>;

    fn get_expenses_for_month(&self, month: YearMonth) -> Result<Vec<Expense>> {
        Ok(self
            .get_expenses()?
            .into_iter()
            .filter(|e| month.contains(e.date))
            .collect())
    }

    fn insert_expenses(&mut self, expenses: Vec<Expense>) -> Result<Vec<Expense>> {
        expenses
            .into_iter()
            .map(|e| self.insert_expense(e))
            .collect()
    }

    /// Number of expenses filed under exactly this category name.
    fn count_expenses_in_category(&self, name: &str) -> Result<usize> {
        Ok(self
            .get_expenses()?
            .iter()
            .filter(|e| e.category == name)
            .count())
    }
}

pub(crate) trait RecurringStore {
    fn get_recurring(&self) -> Result<Vec<RecurringTemplate>>;
    fn insert_recurring(&mut self, template: RecurringTemplate) -> Result<RecurringTemplate>;
    fn update_recurring(
        &mut self,
        id: i64,
        patch: &RecurringPatch,
    ) -> Result<Option<RecurringTemplate>>;
    fn delete_recurring(&mut self, id: i64) -> Result<bool>;
}

/// Everything the ledger needs from a backend.
pub(crate) trait RecordStore: CategoryStore + ExpenseStore + RecurringStore {
    /// Drops every expense, template and category.
    fn clear_all(&mut self) -> Result<()>;
}

#[cfg(test)]
mod tests;
