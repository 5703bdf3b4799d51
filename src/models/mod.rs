mod category;
mod expense;
mod recurring;

pub(crate) use category::{parse_budget, Category, CategoryPatch};
pub(crate) use expense::{parse_amount, total, Expense, ExpensePatch};
pub(crate) use recurring::{RecurringPatch, RecurringTemplate};
