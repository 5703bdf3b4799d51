use anyhow::Result;
use std::cmp::Reverse;

use super::{CategoryStore, ExpenseStore, RecordStore, RecurringStore};
use crate::models::*;

/// In-process backend. Ids come from one counter shared by all entity kinds.
#[derive(Debug, Default)]
pub(crate) struct MemoryStore {
    categories: Vec<Category>,
    expenses: Vec<Expense>,
    recurring: Vec<RecurringTemplate>,
    last_id: i64,
}

impl MemoryStore {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    fn next_id(&mut self) -> i64 {
        self.last_id += 1;
        self.last_id
    }
}

impl CategoryStore for MemoryStore {
    fn get_categories(&self) -> Result<Vec<Category>> {
        let mut cats = self.categories.clone();
        cats.sort_by_key(|c| c.name.to_lowercase());
        Ok(cats)
    }

    fn insert_category(&mut self, mut category: Category) -> Result<Category> {
        category.id = Some(self.next_id());
        self.categories.push(category.clone());
        Ok(category)
    }

    fn update_category(&mut self, id: i64, patch: &CategoryPatch) -> Result<Option<Category>> {
        Ok(self
            .categories
            .iter_mut()
            .find(|c| c.id == Some(id))
            .map(|c| {
                patch.apply(c);
                c.clone()
            }))
    }

    fn delete_category(&mut self, id: i64) -> Result<bool> {
        let before = self.categories.len();
        self.categories.retain(|c| c.id != Some(id));
        Ok(self.categories.len() != before)
    }
}

impl ExpenseStore for MemoryStore {
    fn get_expenses(&self) -> Result<Vec<Expense>> {
        let mut exps = self.expenses.clone();
        exps.sort_by_key(|e| Reverse((e.date, e.id)));
        Ok(exps)
    }

    fn insert_expense(&mut self, mut expense: Expense) -> Result<Expense> {
        expense.id = Some(self.next_id());
        self.expenses.push(expense.clone());
        Ok(expense)
    }

    fn update_expense(&mut self, id: i64, patch: &ExpensePatch) -> Result<Option<Expense>> {
        Ok(self
            .expenses
            .iter_mut()
            .find(|e| e.id == Some(id))
            .map(|e| {
                patch.apply(e);
                e.clone()
            }))
    }

    fn delete_expense(&mut self, id: i64) -> Result<bool> {
        let before = self.expenses.len();
        self.expenses.retain(|e| e.id != Some(id));
        Ok(self.expenses.len() != before)
    }
}

impl RecurringStore for MemoryStore {
    fn get_recurring(&self) -> Result<Vec<RecurringTemplate>> {
        let mut templates = self.recurring.clone();
        templates.sort_by_key(|t| (t.day_of_month, t.id));
        Ok(templates)
    }

    fn insert_recurring(&mut self, mut template: RecurringTemplate) -> Result<RecurringTemplate> {
        template.id = Some(self.next_id());
        self.recurring.push(template.clone());
        Ok(template)
    }

    fn update_recurring(
        &mut self,
        id: i64,
        patch: &RecurringPatch,
    ) -> Result<Option<RecurringTemplate>> {
        Ok(self
            .recurring
            .iter_mut()
            .find(|t| t.id == Some(id))
            .map(|t| {
                patch.apply(t);
                t.clone()
            }))
    }

    fn delete_recurring(&mut self, id: i64) -> Result<bool> {
        let before = self.recurring.len();
        self.recurring.retain(|t| t.id != Some(id));
        Ok(self.recurring.len() != before)
    }
}

impl RecordStore for MemoryStore {
    fn clear_all(&mut self) -> Result<()> {
        self.categories.clear();
        self.expenses.clear();
        self.recurring.clear();
        Ok(())
    }
}
