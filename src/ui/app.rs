use anyhow::Result;
use chrono::Local;

use crate::budget::BudgetStatus;
use crate::calendar::YearMonth;
use crate::config::Config;
use crate::dashboard::Dashboard;
use crate::db::Database;
use crate::filter::{ExpenseFilter, SortBy, SortOrder};
use crate::ledger;
use crate::models::*;
use crate::store::{CategoryStore, ExpenseStore, RecurringStore};
use crate::ui::util::{clamp_cursor, plural};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Screen {
    Dashboard,
    Expenses,
    Budgets,
    Categories,
    Recurring,
}

impl Screen {
    pub(crate) fn all() -> &'static [Screen] {
        &[
            Self::Dashboard,
            Self::Expenses,
            Self::Budgets,
            Self::Categories,
            Self::Recurring,
        ]
    }
}

impl std::fmt::Display for Screen {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Dashboard => write!(f, "Dashboard"),
            Self::Expenses => write!(f, "Expenses"),
            Self::Budgets => write!(f, "Budgets"),
            Self::Categories => write!(f, "Categories"),
            Self::Recurring => write!(f, "Recurring"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum InputMode {
    Normal,
    Command,
    Search,
    Editing,
    Confirm,
}

impl std::fmt::Display for InputMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Normal => write!(f, "NORMAL"),
            Self::Command => write!(f, "COMMAND"),
            Self::Search => write!(f, "SEARCH"),
            Self::Editing => write!(f, "EDIT"),
            Self::Confirm => write!(f, "CONFIRM"),
        }
    }
}

/// Pending action that requires user confirmation.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum PendingAction {
    DeleteExpense { id: i64, description: String },
    DeleteCategory { id: i64, name: String },
    DeleteRecurring { id: i64, description: String },
    Reset,
}

pub(crate) struct App {
    pub(crate) running: bool,
    pub(crate) screen: Screen,
    pub(crate) input_mode: InputMode,
    pub(crate) command_input: String,
    pub(crate) search_input: String,
    pub(crate) status_message: String,
    pub(crate) show_help: bool,
    pub(crate) month: YearMonth,

    // Settings
    pub(crate) auto_generate_recurring: bool,
    pub(crate) default_payment_method: String,
    pub(crate) trend_months: usize,
    pub(crate) expense_window_months: u32,

    // Dashboard
    pub(crate) dashboard: Dashboard,

    // Expenses
    pub(crate) expenses: Vec<Expense>,
    pub(crate) expense_index: usize,
    pub(crate) expense_scroll: usize,
    pub(crate) filter: ExpenseFilter,
    pub(crate) expense_count: usize,

    // Budgets
    pub(crate) budgets: Vec<BudgetStatus>,
    pub(crate) budget_index: usize,
    pub(crate) budget_scroll: usize,

    // Categories
    pub(crate) categories: Vec<Category>,
    pub(crate) category_index: usize,
    pub(crate) category_scroll: usize,

    // Recurring
    pub(crate) recurring: Vec<RecurringTemplate>,
    pub(crate) recurring_index: usize,
    pub(crate) recurring_scroll: usize,

    // Confirmation
    pub(crate) pending_action: Option<PendingAction>,
    pub(crate) confirm_message: String,

    // Layout (updated each render frame)
    pub(crate) visible_rows: usize,
}

impl App {
    pub(crate) fn new(config: &Config) -> Self {
        let month = YearMonth::current();
        Self {
            running: true,
            screen: Screen::Dashboard,
            input_mode: InputMode::Normal,
            command_input: String::new(),
            search_input: String::new(),
            status_message: String::new(),
            show_help: false,
            month,

            auto_generate_recurring: config.auto_generate_recurring,
            default_payment_method: config.default_payment_method.clone(),
            trend_months: config.trend_months,
            expense_window_months: config.expense_window_months,

            dashboard: Dashboard::build(&[], &[], month, config.trend_months),

            expenses: Vec::new(),
            expense_index: 0,
            expense_scroll: 0,
            filter: ExpenseFilter::recent(Local::now().date_naive(), config.expense_window_months),
            expense_count: 0,

            budgets: Vec::new(),
            budget_index: 0,
            budget_scroll: 0,

            categories: Vec::new(),
            category_index: 0,
            category_scroll: 0,

            recurring: Vec::new(),
            recurring_index: 0,
            recurring_scroll: 0,

            pending_action: None,
            confirm_message: String::new(),

            visible_rows: 20,
        }
    }

    /// Rows available to a list body (borders and header excluded).
    pub(crate) fn page(&self) -> usize {
        self.visible_rows.saturating_sub(3).max(1)
    }

    /// Generates the month's recurring expenses first when it is the current
    /// month and auto-generation is on.
    pub(crate) fn refresh_dashboard(&mut self, db: &mut Database) -> Result<()> {
        if self.auto_generate_recurring && self.month == YearMonth::current() {
            let generated = ledger::generate_recurring(db, self.month)?;
            if !generated.is_empty() {
                self.set_status(format!(
                    "Generated {}",
                    plural(generated.len(), "recurring expense")
                ));
            }
        }

        let categories = db.get_categories()?;
        let expenses = db.get_expenses()?;
        self.dashboard = Dashboard::build(&categories, &expenses, self.month, self.trend_months);
        self.expense_count = expenses.len();
        Ok(())
    }

    pub(crate) fn refresh_expenses(&mut self, db: &Database) -> Result<()> {
        self.filter.search = if self.search_input.trim().is_empty() {
            None
        } else {
            Some(self.search_input.clone())
        };
        let all = db.get_expenses()?;
        self.expense_count = all.len();
        self.expenses = self.filter.apply(&all);
        clamp_cursor(&mut self.expense_index, &mut self.expense_scroll, self.expenses.len());
        Ok(())
    }

    pub(crate) fn refresh_budgets(&mut self, db: &Database) -> Result<()> {
        self.budgets = ledger::budget_report(db, self.month)?;
        clamp_cursor(&mut self.budget_index, &mut self.budget_scroll, self.budgets.len());
        Ok(())
    }

    pub(crate) fn refresh_categories(&mut self, db: &Database) -> Result<()> {
        self.categories = db.get_categories()?;
        clamp_cursor(&mut self.category_index, &mut self.category_scroll, self.categories.len());
        Ok(())
    }

    pub(crate) fn refresh_recurring(&mut self, db: &Database) -> Result<()> {
        self.recurring = db.get_recurring()?;
        clamp_cursor(&mut self.recurring_index, &mut self.recurring_scroll, self.recurring.len());
        Ok(())
    }

    pub(crate) fn refresh_all(&mut self, db: &mut Database) -> Result<()> {
        self.refresh_dashboard(db)?;
        self.refresh_expenses(db)?;
        self.refresh_budgets(db)?;
        self.refresh_categories(db)?;
        self.refresh_recurring(db)?;
        Ok(())
    }

    pub(crate) fn selected_expense(&self) -> Option<&Expense> {
        self.expenses.get(self.expense_index)
    }

    pub(crate) fn selected_category(&self) -> Option<&Category> {
        self.categories.get(self.category_index)
    }

    pub(crate) fn selected_recurring(&self) -> Option<&RecurringTemplate> {
        self.recurring.get(self.recurring_index)
    }

    /// One-line description of the expense filter, e.g.
    /// `Food | 2024-01-01..2024-03-31 | amount desc`.
    pub(crate) fn filter_summary(&self) -> String {
        let mut parts = Vec::new();
        if let Some(category) = &self.filter.category {
            parts.push(category.clone());
        }
        parts.push(match (self.filter.start, self.filter.end) {
            (Some(start), Some(end)) => format!("{start}..{end}"),
            (Some(start), None) => format!("since {start}"),
            (None, Some(end)) => format!("until {end}"),
            (None, None) => "all dates".into(),
        });
        let field = match self.filter.sort_by {
            SortBy::Date => "date",
            SortBy::Amount => "amount",
        };
        let order = match self.filter.order {
            SortOrder::Asc => "asc",
            SortOrder::Desc => "desc",
        };
        parts.push(format!("{field} {order}"));
        parts.join(" | ")
    }

    /// Put a destructive action behind a y/N prompt.
    pub(crate) fn confirm(&mut self, message: String, action: PendingAction) {
        self.confirm_message = message;
        self.pending_action = Some(action);
        self.input_mode = InputMode::Confirm;
    }

    pub(crate) fn set_status(&mut self, msg: impl Into<String>) {
        self.status_message = msg.into();
    }
}
