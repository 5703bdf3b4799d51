use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::LazyLock;

use chrono::{Local, NaiveDate};
use rust_decimal::Decimal;

use super::app::{App, InputMode, PendingAction, Screen};
use super::util::{format_budget, format_money, plural};
use crate::calendar::YearMonth;
use crate::db::Database;
use crate::filter::{ExpenseFilter, SortBy, SortOrder};
use crate::ledger::{self, NewExpense, NewRecurring};
use crate::models::{parse_amount, parse_budget, Category, CategoryPatch, ExpensePatch, RecurringPatch};
use crate::store::ExpenseStore;

pub(crate) struct Command {
    pub(crate) description: &'static str,
    pub(crate) run: fn(&str, &mut App, &mut Database) -> anyhow::Result<()>,
}

macro_rules! register_command {
    ($name:expr, $desc:expr, $func:expr, $registry:expr) => {{
        $registry.insert(
            $name,
            Command {
                description: $desc,
                run: $func,
            },
        );
    }};
}

pub(crate) static COMMANDS: LazyLock<HashMap<&str, Command>> = LazyLock::new(|| {
    let mut r: HashMap<&str, Command> = HashMap::new();

    register_command!("q", "Quit Expense Buddy", cmd_quit, r);
    register_command!("quit", "Quit Expense Buddy", cmd_quit, r);
    register_command!("d", "Go to Dashboard", cmd_dashboard, r);
    register_command!("dashboard", "Go to Dashboard", cmd_dashboard, r);
    register_command!("e", "Go to Expenses", cmd_expenses, r);
    register_command!("expenses", "Go to Expenses", cmd_expenses, r);
    register_command!("b", "Go to Budgets", cmd_budgets, r);
    register_command!("budgets", "Go to Budgets", cmd_budgets, r);
    register_command!("c", "Go to Categories", cmd_categories, r);
    register_command!("categories", "Go to Categories", cmd_categories, r);
    register_command!("r", "Go to Recurring", cmd_recurring, r);
    register_command!("recurring", "Go to Recurring", cmd_recurring, r);
    register_command!("help", "Show available commands", cmd_help, r);
    register_command!("h", "Show available commands", cmd_help, r);
    register_command!("month", "Set month (e.g. :month 2024-04, :month 4)", cmd_month, r);
    register_command!("m", "Set month (e.g. :m 2024-04)", cmd_month, r);
    register_command!("next-month", "Go to next month", cmd_next_month, r);
    register_command!("prev-month", "Go to previous month", cmd_prev_month, r);
    register_command!(
        "add",
        "Add expense (e.g. :add 12.50 Food Lunch, :add 2024-04-02 40 Transport)",
        cmd_add,
        r
    );
    register_command!("a", "Add expense (e.g. :a 12.50 Food Lunch)", cmd_add, r);
    register_command!(
        "amount",
        "Change amount of selected expense (e.g. :amount 14.20)",
        cmd_amount,
        r
    );
    register_command!(
        "recat",
        "Move selected expense to a category (e.g. :recat Food)",
        cmd_recat,
        r
    );
    register_command!(
        "pay",
        "Set payment method of selected expense (e.g. :pay Cash)",
        cmd_pay,
        r
    );
    register_command!(
        "rename",
        "Rename selected category or edit selected description",
        cmd_rename,
        r
    );
    register_command!(
        "category",
        "Create category (e.g. :category Travel 300)",
        cmd_category,
        r
    );
    register_command!(
        "budget",
        "Set budget (e.g. :budget Food 400, :budget Food none)",
        cmd_budget,
        r
    );
    register_command!(
        "toggle",
        "Deactivate/activate category or pause/resume recurring",
        cmd_toggle,
        r
    );
    register_command!(
        "recur",
        "Add recurring expense (e.g. :recur 1 1200 Rent Monthly rent)",
        cmd_recur,
        r
    );
    register_command!("pause", "Pause selected recurring expense", cmd_pause, r);
    register_command!("resume", "Resume selected recurring expense", cmd_resume, r);
    register_command!("delete", "Delete selected row", cmd_delete, r);
    register_command!("search", "Search expenses (e.g. :search coffee)", cmd_search, r);
    register_command!("s", "Search expenses (e.g. :s coffee)", cmd_search, r);
    register_command!(
        "filter",
        "Filter expenses (category <name> | from/to <date> | month | all | clear)",
        cmd_filter,
        r
    );
    register_command!("sort", "Sort expenses (e.g. :sort amount asc)", cmd_sort, r);
    register_command!(
        "generate",
        "Create due recurring expenses for the shown month",
        cmd_generate,
        r
    );
    register_command!("g", "Create due recurring expenses", cmd_generate, r);
    register_command!(
        "import",
        "Import expenses from CSV (e.g. :import ~/expenses.csv)",
        cmd_import,
        r
    );
    register_command!(
        "export",
        "Export shown month to CSV (e.g. :export ~/april.csv)",
        cmd_export,
        r
    );
    register_command!("export-all", "Export every expense to CSV", cmd_export_all, r);
    register_command!("reset", "Delete all data", cmd_reset, r);

    r
});

/// Runs a `:` command. Failures land in the status bar instead of ending
/// the session.
pub(crate) fn handle_command(input: &str, app: &mut App, db: &mut Database) -> anyhow::Result<()> {
    let trimmed = input.trim();
    let mut parts = trimmed.splitn(2, ' ');
    let cmd_name = parts.next().unwrap_or("");
    let args = parts.next().unwrap_or("").trim();

    if let Some(cmd) = COMMANDS.get(cmd_name) {
        if let Err(e) = (cmd.run)(args, app, db) {
            tracing::warn!(command = cmd_name, error = %e, "command failed");
            app.set_status(format!("Error: {e}"));
        }
    } else {
        let suggestion = find_closest(cmd_name);
        app.set_status(format!(
            "Unknown command: :{cmd_name}. Did you mean :{suggestion}?"
        ));
    }

    Ok(())
}

pub(crate) fn find_closest(input: &str) -> String {
    COMMANDS
        .keys()
        .filter(|k| k.len() > 1) // skip single-letter aliases for suggestions
        .min_by_key(|k| (levenshtein(input, k), **k))
        .unwrap_or(&"help")
        .to_string()
}

pub(crate) fn levenshtein(a: &str, b: &str) -> usize {
    let (a, b) = (a.as_bytes(), b.as_bytes());
    let mut prev: Vec<usize> = (0..=b.len()).collect();
    let mut curr = vec![0; b.len() + 1];

    for i in 1..=a.len() {
        curr[0] = i;
        for j in 1..=b.len() {
            let cost = if a[i - 1] == b[j - 1] { 0 } else { 1 };
            curr[j] = (prev[j] + 1).min(curr[j - 1] + 1).min(prev[j - 1] + cost);
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    prev[b.len()]
}

/// Longest leading run of `words` naming a category exactly, and the words
/// left after it. Lets multi-word names like `Eating Out` work unquoted.
pub(crate) fn split_category(
    words: &[&str],
    categories: &[Category],
    active_only: bool,
) -> Option<(String, String)> {
    (1..=words.len()).rev().find_map(|n| {
        let name = words[..n].join(" ");
        let known = categories
            .iter()
            .any(|c| c.name == name && (c.active || !active_only));
        known.then(|| (name, words[n..].join(" ")))
    })
}

fn is_unlimited_word(word: &str) -> bool {
    word.eq_ignore_ascii_case("none") || word.eq_ignore_ascii_case("unlimited")
}

/// Whether the last word of `:category` is a budget rather than part of
/// the name.
fn looks_like_budget(word: &str) -> bool {
    word.starts_with(|c: char| c.is_ascii_digit() || c == '$' || c == '-')
        || is_unlimited_word(word)
}

/// Status suffix when budget input was rejected and the ceiling fell back
/// to unlimited.
fn budget_note(raw: &str, budget: Option<Decimal>) -> String {
    if budget.is_none() && !is_unlimited_word(raw.trim()) {
        format!(" ('{raw}' is not a valid budget)")
    } else {
        String::new()
    }
}

fn parse_date_arg(raw: &str) -> Option<NaiveDate> {
    if raw.eq_ignore_ascii_case("today") {
        return Some(Local::now().date_naive());
    }
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d").ok()
}

fn active_category_names(categories: &[Category]) -> String {
    categories
        .iter()
        .filter(|c| c.active)
        .map(|c| c.name.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Reload everything an expense change can affect.
fn refresh_after_expense_change(app: &mut App, db: &mut Database) -> anyhow::Result<()> {
    app.refresh_dashboard(db)?;
    app.refresh_expenses(db)?;
    app.refresh_budgets(db)?;
    Ok(())
}

/// Carries out an action the user just confirmed.
pub(crate) fn run_pending_action(
    action: PendingAction,
    app: &mut App,
    db: &mut Database,
) -> anyhow::Result<()> {
    match action {
        PendingAction::DeleteExpense { id, description } => {
            ledger::remove_expense(db, id)?;
            app.refresh_expenses(db)?;
            app.refresh_dashboard(db)?;
            app.refresh_budgets(db)?;
            app.set_status(format!("Deleted: {description}"));
        }
        PendingAction::DeleteCategory { id, name } => {
            ledger::remove_category(db, id)?;
            app.refresh_categories(db)?;
            app.refresh_budgets(db)?;
            app.set_status(format!("Deleted category: {name}"));
        }
        PendingAction::DeleteRecurring { id, description } => {
            ledger::remove_recurring(db, id)?;
            app.refresh_recurring(db)?;
            app.set_status(format!("Deleted recurring: {description}"));
        }
        PendingAction::Reset => {
            ledger::reset(db)?;
            db.seed_default_categories()?;
            app.refresh_all(db)?;
            app.set_status("All data cleared; default categories restored");
        }
    }
    Ok(())
}

// ── Command implementations ──────────────────────────────────

fn cmd_quit(_args: &str, app: &mut App, _db: &mut Database) -> anyhow::Result<()> {
    app.running = false;
    Ok(())
}

fn cmd_dashboard(_args: &str, app: &mut App, db: &mut Database) -> anyhow::Result<()> {
    app.screen = Screen::Dashboard;
    app.refresh_dashboard(db)?;
    Ok(())
}

fn cmd_expenses(_args: &str, app: &mut App, db: &mut Database) -> anyhow::Result<()> {
    app.screen = Screen::Expenses;
    app.refresh_expenses(db)?;
    Ok(())
}

fn cmd_budgets(_args: &str, app: &mut App, db: &mut Database) -> anyhow::Result<()> {
    app.screen = Screen::Budgets;
    app.refresh_budgets(db)?;
    Ok(())
}

fn cmd_categories(_args: &str, app: &mut App, db: &mut Database) -> anyhow::Result<()> {
    app.screen = Screen::Categories;
    app.refresh_categories(db)?;
    Ok(())
}

fn cmd_recurring(_args: &str, app: &mut App, db: &mut Database) -> anyhow::Result<()> {
    app.screen = Screen::Recurring;
    app.refresh_recurring(db)?;
    Ok(())
}

fn cmd_help(_args: &str, app: &mut App, _db: &mut Database) -> anyhow::Result<()> {
    app.show_help = true;
    Ok(())
}

fn cmd_month(args: &str, app: &mut App, db: &mut Database) -> anyhow::Result<()> {
    if args.is_empty() {
        return set_month(app, db, YearMonth::current());
    }

    // "4" and "04" stay in the shown year
    let parsed = if args.len() <= 2 {
        args.parse::<u32>()
            .ok()
            .and_then(|m| YearMonth::new(app.month.year(), m))
    } else {
        args.parse::<YearMonth>().ok()
    };

    match parsed {
        Some(month) => set_month(app, db, month),
        None => {
            app.set_status("Invalid month format. Use YYYY-MM (e.g. 2024-04)");
            Ok(())
        }
    }
}

fn cmd_next_month(_args: &str, app: &mut App, db: &mut Database) -> anyhow::Result<()> {
    set_month(app, db, app.month.offset(1))
}

fn cmd_prev_month(_args: &str, app: &mut App, db: &mut Database) -> anyhow::Result<()> {
    set_month(app, db, app.month.offset(-1))
}

fn set_month(app: &mut App, db: &mut Database, month: YearMonth) -> anyhow::Result<()> {
    app.month = month;
    app.set_status(format!("Month: {} {}", month.name(), month.year()));
    app.refresh_dashboard(db)?;
    app.refresh_budgets(db)?;
    Ok(())
}

fn cmd_add(args: &str, app: &mut App, db: &mut Database) -> anyhow::Result<()> {
    let mut words: Vec<&str> = args.split_whitespace().collect();
    let date = match words.first().and_then(|w| parse_date_arg(w)) {
        Some(date) => {
            words.remove(0);
            date
        }
        None => Local::now().date_naive(),
    };

    let Some((amount_raw, rest)) = words.split_first() else {
        app.set_status("Usage: :add [YYYY-MM-DD] <amount> <category> [description]");
        return Ok(());
    };
    let Some(amount) = parse_amount(amount_raw) else {
        app.set_status(format!("Invalid amount: {amount_raw}"));
        return Ok(());
    };

    app.refresh_categories(db)?;
    let Some((category, description)) = split_category(rest, &app.categories, true) else {
        app.set_status(format!(
            "Unknown category. Available: {}",
            active_category_names(&app.categories)
        ));
        return Ok(());
    };

    let expense = ledger::add_expense(
        db,
        NewExpense {
            date,
            amount,
            category,
            payment_method: app.default_payment_method.clone(),
            description,
        },
    )?;
    refresh_after_expense_change(app, db)?;
    app.set_status(format!(
        "Added {} to {} on {}",
        format_money(expense.amount),
        expense.category,
        expense.date
    ));
    Ok(())
}

/// Id of the expense under the cursor, or a hint in the status bar.
fn selected_expense_id(app: &mut App) -> Option<i64> {
    let id = if app.screen == Screen::Expenses {
        app.selected_expense().and_then(|e| e.id)
    } else {
        None
    };
    if id.is_none() {
        app.set_status("Navigate to Expenses and select one first");
    }
    id
}

fn update_selected_expense(
    app: &mut App,
    db: &mut Database,
    patch: ExpensePatch,
) -> anyhow::Result<()> {
    let Some(id) = selected_expense_id(app) else {
        return Ok(());
    };
    let updated = ledger::update_expense(db, id, patch)?;
    refresh_after_expense_change(app, db)?;
    app.set_status(format!(
        "Updated: {} {} {}",
        updated.date,
        format_money(updated.amount),
        updated.category
    ));
    Ok(())
}

fn cmd_amount(args: &str, app: &mut App, db: &mut Database) -> anyhow::Result<()> {
    let Some(amount) = parse_amount(args) else {
        app.set_status("Usage: :amount <positive amount>");
        return Ok(());
    };
    update_selected_expense(
        app,
        db,
        ExpensePatch {
            amount: Some(amount),
            ..Default::default()
        },
    )
}

fn cmd_recat(args: &str, app: &mut App, db: &mut Database) -> anyhow::Result<()> {
    if args.is_empty() {
        app.set_status("Usage: :recat <category>");
        return Ok(());
    }
    update_selected_expense(
        app,
        db,
        ExpensePatch {
            category: Some(args.to_string()),
            ..Default::default()
        },
    )
}

fn cmd_pay(args: &str, app: &mut App, db: &mut Database) -> anyhow::Result<()> {
    if args.is_empty() {
        app.set_status("Usage: :pay <payment method>");
        return Ok(());
    }
    update_selected_expense(
        app,
        db,
        ExpensePatch {
            payment_method: Some(args.to_string()),
            ..Default::default()
        },
    )
}

/// Without arguments, opens the selected text for inline editing.
fn cmd_rename(args: &str, app: &mut App, db: &mut Database) -> anyhow::Result<()> {
    let current = match app.screen {
        Screen::Expenses => app.selected_expense().map(|e| e.description.clone()),
        Screen::Categories => app.selected_category().map(|c| c.name.clone()),
        Screen::Recurring => app.selected_recurring().map(|t| t.description.clone()),
        _ => None,
    };
    let Some(current) = current else {
        app.set_status("Select an expense, category or recurring expense first");
        return Ok(());
    };

    if args.is_empty() {
        app.command_input = current;
        app.input_mode = InputMode::Editing;
        app.set_status("Type the new text, press Enter to confirm");
        return Ok(());
    }

    match app.screen {
        Screen::Expenses => update_selected_expense(
            app,
            db,
            ExpensePatch {
                description: Some(args.to_string()),
                ..Default::default()
            },
        )?,
        Screen::Categories => {
            if let Some(id) = app.selected_category().and_then(|c| c.id) {
                let renamed = ledger::update_category(
                    db,
                    id,
                    CategoryPatch {
                        name: Some(args.to_string()),
                        ..Default::default()
                    },
                )?;
                app.refresh_categories(db)?;
                app.refresh_budgets(db)?;
                app.set_status(format!("Renamed '{current}' to '{}'", renamed.name));
            }
        }
        Screen::Recurring => {
            if let Some(id) = app.selected_recurring().and_then(|t| t.id) {
                ledger::update_recurring(
                    db,
                    id,
                    RecurringPatch {
                        description: Some(args.to_string()),
                        ..Default::default()
                    },
                )?;
                app.refresh_recurring(db)?;
                app.set_status(format!("Renamed to: {args}"));
            }
        }
        _ => {}
    }
    Ok(())
}

fn cmd_category(args: &str, app: &mut App, db: &mut Database) -> anyhow::Result<()> {
    if args.is_empty() {
        app.set_status("Usage: :category <name> [budget]");
        return Ok(());
    }

    let (name, budget, note) = match args.rsplit_once(' ') {
        Some((name, last)) if looks_like_budget(last) => {
            let budget = parse_budget(last);
            (name.trim(), budget, budget_note(last, budget))
        }
        _ => (args, None, String::new()),
    };

    let category = ledger::add_category(db, name, budget)?;
    app.refresh_categories(db)?;
    app.refresh_budgets(db)?;
    app.set_status(format!(
        "Created category: {} ({}){note}",
        category.name,
        format_budget(category.budget)
    ));
    Ok(())
}

fn cmd_budget(args: &str, app: &mut App, db: &mut Database) -> anyhow::Result<()> {
    // Last token is the amount, everything before is the category name
    let Some((category_name, amount_str)) = args.rsplit_once(' ') else {
        app.set_status("Usage: :budget <category> <amount|none>. Example: :budget Food 400");
        return Ok(());
    };

    let budget = parse_budget(amount_str);

    app.refresh_categories(db)?;
    let Some(id) = Category::find_by_name(&app.categories, category_name).and_then(|c| c.id)
    else {
        app.set_status(format!("Category '{category_name}' not found"));
        return Ok(());
    };

    let category = ledger::update_category(
        db,
        id,
        CategoryPatch {
            budget: Some(budget),
            ..Default::default()
        },
    )?;
    app.refresh_categories(db)?;
    app.refresh_budgets(db)?;
    app.refresh_dashboard(db)?;
    app.screen = Screen::Budgets;
    app.set_status(format!(
        "Budget set: {} = {}{}",
        category.name,
        format_budget(category.budget),
        budget_note(amount_str, budget)
    ));
    Ok(())
}

fn cmd_toggle(_args: &str, app: &mut App, db: &mut Database) -> anyhow::Result<()> {
    match app.screen {
        Screen::Categories => {
            let Some((id, active)) = app
                .selected_category()
                .and_then(|c| c.id.map(|id| (id, c.active)))
            else {
                app.set_status("No category selected");
                return Ok(());
            };
            let category = ledger::update_category(
                db,
                id,
                CategoryPatch {
                    active: Some(!active),
                    ..Default::default()
                },
            )?;
            app.refresh_categories(db)?;
            app.refresh_budgets(db)?;
            app.set_status(format!(
                "{} {}",
                if category.active { "Activated" } else { "Deactivated" },
                category.name
            ));
            Ok(())
        }
        Screen::Recurring => {
            let active = app.selected_recurring().is_some_and(|t| t.active);
            set_selected_recurring_active(app, db, !active)
        }
        _ => {
            app.set_status("Nothing to toggle here. Go to Categories or Recurring");
            Ok(())
        }
    }
}

fn cmd_recur(args: &str, app: &mut App, db: &mut Database) -> anyhow::Result<()> {
    let words: Vec<&str> = args.split_whitespace().collect();
    if words.len() < 3 {
        app.set_status("Usage: :recur <day> <amount> <category> [description]");
        return Ok(());
    }

    let Ok(day_of_month) = words[0].parse::<u32>() else {
        app.set_status(format!("Invalid day: {}", words[0]));
        return Ok(());
    };
    let Some(amount) = parse_amount(words[1]) else {
        app.set_status(format!("Invalid amount: {}", words[1]));
        return Ok(());
    };

    // Templates may name a category that does not exist yet
    app.refresh_categories(db)?;
    let (category, description) = split_category(&words[2..], &app.categories, false)
        .unwrap_or_else(|| (words[2].to_string(), words[3..].join(" ")));

    let template = ledger::add_recurring(
        db,
        NewRecurring {
            amount,
            category,
            payment_method: app.default_payment_method.clone(),
            description,
            day_of_month,
        },
    )?;
    app.refresh_recurring(db)?;
    app.screen = Screen::Recurring;
    app.set_status(format!(
        "Added recurring {} for {} on day {}",
        format_money(template.amount),
        template.category,
        template.day_of_month
    ));
    Ok(())
}

fn cmd_pause(_args: &str, app: &mut App, db: &mut Database) -> anyhow::Result<()> {
    set_selected_recurring_active(app, db, false)
}

fn cmd_resume(_args: &str, app: &mut App, db: &mut Database) -> anyhow::Result<()> {
    set_selected_recurring_active(app, db, true)
}

fn set_selected_recurring_active(
    app: &mut App,
    db: &mut Database,
    active: bool,
) -> anyhow::Result<()> {
    let id = if app.screen == Screen::Recurring {
        app.selected_recurring().and_then(|t| t.id)
    } else {
        None
    };
    let Some(id) = id else {
        app.set_status("Navigate to Recurring and select one first");
        return Ok(());
    };

    let template = ledger::set_recurring_active(db, id, active)?;
    app.refresh_recurring(db)?;
    let label = if template.description.is_empty() {
        template.category.clone()
    } else {
        template.description.clone()
    };
    app.set_status(format!(
        "{} {label}",
        if active { "Resumed" } else { "Paused" }
    ));
    Ok(())
}

fn cmd_delete(_args: &str, app: &mut App, db: &mut Database) -> anyhow::Result<()> {
    match app.screen {
        Screen::Expenses => {
            let Some((id, description)) = app.selected_expense().and_then(|e| {
                let label = if e.description.is_empty() {
                    &e.category
                } else {
                    &e.description
                };
                e.id.map(|id| (id, format!("{label} {}", format_money(e.amount))))
            }) else {
                app.set_status("No expense selected");
                return Ok(());
            };
            app.confirm(
                format!("Delete '{description}'?"),
                PendingAction::DeleteExpense { id, description },
            );
        }
        Screen::Categories => {
            let Some((id, name)) = app
                .selected_category()
                .and_then(|c| c.id.map(|id| (id, c.name.clone())))
            else {
                app.set_status("No category selected");
                return Ok(());
            };
            let count = db.count_expenses_in_category(&name)?;
            if count > 0 {
                app.set_status(format!(
                    "'{name}' has {}. Use :toggle to deactivate it instead",
                    plural(count, "expense")
                ));
                return Ok(());
            }
            app.confirm(
                format!("Delete category '{name}'?"),
                PendingAction::DeleteCategory { id, name },
            );
        }
        Screen::Recurring => {
            let Some((id, description)) = app.selected_recurring().and_then(|t| {
                t.id.map(|id| (id, format!("{} {}", t.category, format_money(t.amount))))
            }) else {
                app.set_status("No recurring expense selected");
                return Ok(());
            };
            app.confirm(
                format!("Delete recurring '{description}'?"),
                PendingAction::DeleteRecurring { id, description },
            );
        }
        _ => app.set_status("Nothing to delete here"),
    }
    Ok(())
}

fn cmd_search(args: &str, app: &mut App, db: &mut Database) -> anyhow::Result<()> {
    app.search_input = args.to_string();
    app.screen = Screen::Expenses;
    app.expense_index = 0;
    app.expense_scroll = 0;
    app.refresh_expenses(db)?;

    if args.is_empty() {
        app.set_status("Search cleared");
    } else {
        app.set_status(format!("Searching: {args} ({} found)", app.expenses.len()));
    }

    Ok(())
}

fn cmd_filter(args: &str, app: &mut App, db: &mut Database) -> anyhow::Result<()> {
    let (key, value) = args.split_once(' ').unwrap_or((args, ""));
    let value = value.trim();

    match key {
        "" => {
            app.set_status(format!("Filter: {}", app.filter_summary()));
            return Ok(());
        }
        "category" | "cat" => {
            app.filter.category = (!value.is_empty()).then(|| value.to_string());
        }
        "from" | "to" => {
            let Some(date) = parse_date_arg(value) else {
                app.set_status(format!("Invalid date '{value}', expected YYYY-MM-DD"));
                return Ok(());
            };
            if key == "from" {
                app.filter.start = Some(date);
            } else {
                app.filter.end = Some(date);
            }
        }
        "month" => {
            app.filter.start = Some(app.month.first_day());
            app.filter.end = Some(app.month.day(app.month.last_day()));
        }
        "all" => {
            app.filter.start = None;
            app.filter.end = None;
        }
        "clear" => {
            app.filter =
                ExpenseFilter::recent(Local::now().date_naive(), app.expense_window_months);
            app.search_input.clear();
        }
        other => {
            app.set_status(format!(
                "Unknown filter '{other}'. Use category, from, to, month, all or clear"
            ));
            return Ok(());
        }
    }

    app.screen = Screen::Expenses;
    app.expense_index = 0;
    app.expense_scroll = 0;
    app.refresh_expenses(db)?;
    app.set_status(format!("Filter: {}", app.filter_summary()));
    Ok(())
}

fn cmd_sort(args: &str, app: &mut App, db: &mut Database) -> anyhow::Result<()> {
    let mut words = args.split_whitespace();
    let Some(field) = words.next() else {
        app.set_status("Usage: :sort date|amount [asc|desc]");
        return Ok(());
    };
    app.filter.sort_by = field.parse::<SortBy>()?;
    app.filter.order = match words.next() {
        Some(o) if o.eq_ignore_ascii_case("asc") => SortOrder::Asc,
        _ => SortOrder::Desc,
    };
    app.screen = Screen::Expenses;
    app.refresh_expenses(db)?;
    app.set_status(format!("Filter: {}", app.filter_summary()));
    Ok(())
}

fn cmd_generate(args: &str, app: &mut App, db: &mut Database) -> anyhow::Result<()> {
    let month = if args.is_empty() {
        app.month
    } else {
        args.parse::<YearMonth>()?
    };
    let generated = ledger::generate_recurring(db, month)?;
    refresh_after_expense_change(app, db)?;
    if generated.is_empty() {
        app.set_status(format!("Nothing to generate for {month}"));
    } else {
        app.set_status(format!(
            "Generated {} for {month}",
            plural(generated.len(), "recurring expense")
        ));
    }
    Ok(())
}

fn cmd_import(args: &str, app: &mut App, db: &mut Database) -> anyhow::Result<()> {
    if args.is_empty() {
        app.set_status("Usage: :import <file.csv>");
        return Ok(());
    }
    let path = PathBuf::from(crate::run::shellexpand(args));
    if !path.exists() {
        app.set_status(format!("File not found: {args}"));
        return Ok(());
    }

    let report = crate::import::import_csv(db, &path)?;
    refresh_after_expense_change(app, db)?;
    match report.errors.first() {
        Some(first) => app.set_status(format!("{}. {first}", report.summary())),
        None => app.set_status(report.summary()),
    }
    Ok(())
}

fn cmd_export(args: &str, app: &mut App, db: &mut Database) -> anyhow::Result<()> {
    export(args, Some(app.month), app, db)
}

fn cmd_export_all(args: &str, app: &mut App, db: &mut Database) -> anyhow::Result<()> {
    export(args, None, app, db)
}

fn export(
    args: &str,
    month: Option<YearMonth>,
    app: &mut App,
    db: &mut Database,
) -> anyhow::Result<()> {
    let path = if args.is_empty() {
        let home = std::env::var("HOME").unwrap_or_else(|_| ".".into());
        match month {
            Some(m) => format!("{home}/expenses-{m}.csv"),
            None => format!("{home}/expenses.csv"),
        }
    } else {
        crate::run::shellexpand(args)
    };

    let count = crate::import::export_csv(&*db, &PathBuf::from(&path), month)?;
    if count == 0 {
        app.set_status("No expenses to export");
    } else {
        app.set_status(format!("Exported {} to {path}", plural(count, "expense")));
    }
    Ok(())
}

fn cmd_reset(_args: &str, app: &mut App, _db: &mut Database) -> anyhow::Result<()> {
    app.confirm(
        "Delete ALL expenses, categories and recurring expenses?".into(),
        PendingAction::Reset,
    );
    Ok(())
}
