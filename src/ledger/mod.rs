use anyhow::Result;
use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::budget::{evaluate_budgets, BudgetStatus};
use crate::calendar::YearMonth;
use crate::error::LedgerError;
use crate::models::*;
use crate::recurring::reconcile_recurring;
use crate::store::RecordStore;

mod sample;

pub(crate) use sample::seed_sample;

#[derive(Debug, Clone)]
pub(crate) struct NewExpense {
    pub(crate) date: NaiveDate,
    pub(crate) amount: Decimal,
    pub(crate) category: String,
    pub(crate) payment_method: String,
    pub(crate) description: String,
}

#[derive(Debug, Clone)]
pub(crate) struct NewRecurring {
    pub(crate) amount: Decimal,
    pub(crate) category: String,
    pub(crate) payment_method: String,
    pub(crate) description: String,
    pub(crate) day_of_month: u32,
}

fn check_amount(amount: Decimal) -> Result<(), LedgerError> {
    if amount <= Decimal::ZERO {
        return Err(LedgerError::InvalidAmount);
    }
    Ok(())
}

fn check_required(value: &str, field: &'static str) -> Result<(), LedgerError> {
    if value.trim().is_empty() {
        return Err(LedgerError::MissingField(field));
    }
    Ok(())
}

fn check_day(day: u32) -> Result<(), LedgerError> {
    if !(1..=31).contains(&day) {
        return Err(LedgerError::InvalidDayOfMonth(day));
    }
    Ok(())
}

/// Expenses may only be filed under an active category, by exact name.
fn check_expense_category(store: &impl RecordStore, name: &str) -> Result<()> {
    let known = store
        .get_categories()?
        .iter()
        .any(|c| c.active && c.name == name);
    if !known {
        return Err(LedgerError::UnknownCategory(name.to_string()).into());
    }
    Ok(())
}

// ── Expenses ──────────────────────────────────────────────────

pub(crate) fn add_expense(store: &mut impl RecordStore, new: NewExpense) -> Result<Expense> {
    check_amount(new.amount)?;
    check_required(&new.payment_method, "Payment method")?;
    check_expense_category(store, &new.category)?;

    let expense = Expense::new(
        new.date,
        new.amount,
        new.category,
        new.payment_method.trim().to_string(),
        new.description.trim().to_string(),
    );
    let stored = store.insert_expense(expense)?;
    tracing::debug!(id = ?stored.id, amount = %stored.amount, "expense added");
    Ok(stored)
}

pub(crate) fn update_expense(store: &mut impl RecordStore, id: i64, patch: ExpensePatch) -> Result<Expense> {
    if let Some(amount) = patch.amount {
        check_amount(amount)?;
    }
    if let Some(method) = &patch.payment_method {
        check_required(method, "Payment method")?;
    }
    if let Some(category) = &patch.category {
        check_expense_category(store, category)?;
    }
    store
        .update_expense(id, &patch)?
        .ok_or_else(|| LedgerError::NotFound { kind: "Expense", id }.into())
}

pub(crate) fn remove_expense(store: &mut impl RecordStore, id: i64) -> Result<()> {
    if !store.delete_expense(id)? {
        return Err(LedgerError::NotFound { kind: "Expense", id }.into());
    }
    Ok(())
}

// ── Categories ────────────────────────────────────────────────

fn check_unique_name(categories: &[Category], name: &str, except: Option<i64>) -> Result<(), LedgerError> {
    let lower = name.to_lowercase();
    let clash = categories
        .iter()
        .any(|c| c.id != except && c.name.to_lowercase() == lower);
    if clash {
        return Err(LedgerError::DuplicateCategory(name.to_string()));
    }
    Ok(())
}

pub(crate) fn add_category(store: &mut impl RecordStore, name: &str, budget: Option<Decimal>) -> Result<Category> {
    let name = name.trim();
    check_required(name, "Category name")?;
    check_unique_name(&store.get_categories()?, name, None)?;
    if budget.is_some_and(|b| b < Decimal::ZERO) {
        return Err(LedgerError::InvalidAmount.into());
    }
    let stored = store.insert_category(Category::new(name.to_string(), budget))?;
    tracing::info!(name, "category added");
    Ok(stored)
}

/// Renames do not touch existing expenses; they keep the old name.
pub(crate) fn update_category(store: &mut impl RecordStore, id: i64, mut patch: CategoryPatch) -> Result<Category> {
    if let Some(name) = patch.name.take() {
        let name = name.trim().to_string();
        check_required(&name, "Category name")?;
        check_unique_name(&store.get_categories()?, &name, Some(id))?;
        patch.name = Some(name);
    }
    if let Some(Some(budget)) = patch.budget {
        if budget < Decimal::ZERO {
            return Err(LedgerError::InvalidAmount.into());
        }
    }
    store
        .update_category(id, &patch)?
        .ok_or_else(|| LedgerError::NotFound { kind: "Category", id }.into())
}

/// Hard delete, refused while any expense is filed under the category.
pub(crate) fn remove_category(store: &mut impl RecordStore, id: i64) -> Result<()> {
    let categories = store.get_categories()?;
    let category = Category::find_by_id(&categories, id)
        .ok_or(LedgerError::NotFound { kind: "Category", id })?;

    let count = store.count_expenses_in_category(&category.name)?;
    if count > 0 {
        tracing::warn!(name = %category.name, count, "refusing to delete category in use");
        return Err(LedgerError::CategoryInUse {
            name: category.name.clone(),
            count,
        }
        .into());
    }
    store.delete_category(id)?;
    tracing::info!(name = %category.name, "category deleted");
    Ok(())
}

// ── Recurring ─────────────────────────────────────────────────

pub(crate) fn add_recurring(store: &mut impl RecordStore, new: NewRecurring) -> Result<RecurringTemplate> {
    check_amount(new.amount)?;
    check_required(&new.category, "Category")?;
    check_required(&new.payment_method, "Payment method")?;
    check_day(new.day_of_month)?;

    let template = RecurringTemplate::new(
        new.amount,
        new.category.trim().to_string(),
        new.payment_method.trim().to_string(),
        new.description.trim().to_string(),
        new.day_of_month,
    );
    let stored = store.insert_recurring(template)?;
    tracing::info!(id = ?stored.id, day = stored.day_of_month, "recurring expense added");
    Ok(stored)
}

pub(crate) fn update_recurring(
    store: &mut impl RecordStore,
    id: i64,
    patch: RecurringPatch,
) -> Result<RecurringTemplate> {
    if let Some(amount) = patch.amount {
        check_amount(amount)?;
    }
    if let Some(category) = &patch.category {
        check_required(category, "Category")?;
    }
    if let Some(method) = &patch.payment_method {
        check_required(method, "Payment method")?;
    }
    if let Some(day) = patch.day_of_month {
        check_day(day)?;
    }
    store
        .update_recurring(id, &patch)?
        .ok_or_else(|| LedgerError::NotFound { kind: "Recurring expense", id }.into())
}

pub(crate) fn set_recurring_active(
    store: &mut impl RecordStore,
    id: i64,
    active: bool,
) -> Result<RecurringTemplate> {
    update_recurring(
        store,
        id,
        RecurringPatch {
            active: Some(active),
            ..Default::default()
        },
    )
}

pub(crate) fn remove_recurring(store: &mut impl RecordStore, id: i64) -> Result<()> {
    if !store.delete_recurring(id)? {
        return Err(LedgerError::NotFound { kind: "Recurring expense", id }.into());
    }
    Ok(())
}

/// Creates and stores whatever recurring expenses `month` is still missing.
pub(crate) fn generate_recurring(store: &mut impl RecordStore, month: YearMonth) -> Result<Vec<Expense>> {
    let templates = store.get_recurring()?;
    let existing = store.get_expenses_for_month(month)?;
    let pending = reconcile_recurring(&templates, &existing, month);
    if pending.is_empty() {
        tracing::debug!(%month, "no recurring expenses due");
        return Ok(pending);
    }
    let stored = store.insert_expenses(pending)?;
    tracing::info!(%month, count = stored.len(), "generated recurring expenses");
    Ok(stored)
}

pub(crate) fn budget_report(store: &impl RecordStore, month: YearMonth) -> Result<Vec<BudgetStatus>> {
    let categories = store.get_categories()?;
    let expenses = store.get_expenses_for_month(month)?;
    Ok(evaluate_budgets(&categories, &expenses))
}

pub(crate) fn reset(store: &mut impl RecordStore) -> Result<()> {
    store.clear_all()?;
    tracing::warn!("all data cleared");
    Ok(())
}
