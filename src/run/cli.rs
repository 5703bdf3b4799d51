use anyhow::{Context, Result};
use chrono::{Local, NaiveDate};
use std::path::PathBuf;

use crate::calendar::YearMonth;
use crate::config::Config;
use crate::dashboard::Dashboard;
use crate::db::Database;
use crate::filter::{ExpenseFilter, SortBy, SortOrder};
use crate::ledger::{self, NewExpense};
use crate::models::parse_amount;
use crate::store::{CategoryStore, ExpenseStore, RecurringStore};
use crate::ui::util::{format_budget, format_money};

pub(crate) fn as_cli(args: &[String], db: &mut Database, config: &Config) -> Result<()> {
    let rest = &args[2..];
    match args[1].as_str() {
        "summary" | "s" => cli_summary(rest, db, config),
        "budgets" | "b" => cli_budgets(rest, db),
        "generate" | "g" => cli_generate(rest, db),
        "add" | "a" => cli_add(rest, db),
        "list" | "l" => cli_list(rest, db),
        "categories" => cli_categories(db),
        "recurring" => cli_recurring(db),
        "import" => cli_import(rest, db),
        "export" => cli_export(rest, db),
        "reset" => cli_reset(rest, db),
        "seed" => cli_seed(rest, db),
        "--help" | "-h" | "help" => {
            print_usage();
            Ok(())
        }
        "--version" | "-V" | "version" => {
            println!("expensebuddy {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
        other => {
            print_usage();
            anyhow::bail!("Unknown command: {other}");
        }
    }
}

fn print_usage() {
    println!("Expense Buddy - personal expense tracker");
    println!();
    println!("Usage: expensebuddy [command]");
    println!();
    println!("Commands:");
    println!("  (none)                                 Launch interactive TUI");
    println!("  summary [YYYY-MM] [--json]             Monthly totals, categories and trend");
    println!("  budgets [YYYY-MM] [--json]             Budget status per category");
    println!("  generate [YYYY-MM]                     Create due recurring expenses");
    println!("  add <date> <amount> <category> <payment> [description]");
    println!("                                         Record an expense");
    println!("  list                                   List expenses");
    println!("    --category <name>  --from <date>  --to <date>");
    println!("    --search <text>  --sort date|amount  --asc");
    println!("  categories                             List categories");
    println!("  recurring                              List recurring expenses");
    println!("  import <file.csv>                      Import expenses from CSV");
    println!("  export [path]                          Export expenses to CSV");
    println!("    --month <YYYY-MM>                    Only this month");
    println!("  reset --yes                            Delete all data");
    println!("  seed [YYYY-MM]                         Load three months of sample data");
    println!("  --help, -h                             Show this help");
    println!("  --version, -V                          Show version");
}

/// Value following `--name`.
fn flag<'a>(args: &'a [String], name: &str) -> Option<&'a str> {
    args.windows(2)
        .find(|w| w[0] == name)
        .map(|w| w[1].as_str())
}

fn json_flag(args: &[String]) -> bool {
    args.iter().any(|a| a == "--json")
}

fn month_arg(args: &[String]) -> Result<YearMonth> {
    match args.first().filter(|a| !a.starts_with('-')) {
        Some(raw) => raw.parse(),
        None => Ok(YearMonth::current()),
    }
}

fn parse_date(raw: &str) -> Result<NaiveDate> {
    if raw.eq_ignore_ascii_case("today") {
        return Ok(Local::now().date_naive());
    }
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .with_context(|| format!("Invalid date '{raw}', expected YYYY-MM-DD"))
}

fn cli_summary(args: &[String], db: &mut Database, config: &Config) -> Result<()> {
    let month = month_arg(args)?;
    let json = json_flag(args);
    if config.auto_generate_recurring && month == YearMonth::current() {
        let generated = ledger::generate_recurring(db, month)?;
        if !generated.is_empty() && !json {
            println!("Generated {} recurring expense(s)", generated.len());
        }
    }

    let dash = Dashboard::build(
        &db.get_categories()?,
        &db.get_expenses()?,
        month,
        config.trend_months,
    );
    if json {
        println!("{}", serde_json::to_string_pretty(&dash)?);
        return Ok(());
    }

    println!("Expense Buddy - {} {}", month.name(), month.year());
    println!("{}", "─".repeat(40));
    println!("  This month:  {}", format_money(dash.total));
    println!("  Last month:  {}", format_money(dash.previous_total));
    match dash.change_percent() {
        Some(pct) => println!("  Change:      {} ({pct:+}%)", format_money(dash.change)),
        None => println!("  Change:      {}", format_money(dash.change)),
    }
    println!("  Expenses:    {}", dash.expense_count);
    let over = dash.over_budget_count();
    if over > 0 {
        println!("  Over budget: {over} categor{}", if over == 1 { "y" } else { "ies" });
    }

    if !dash.by_category.is_empty() {
        println!();
        println!("Spending by Category:");
        for (name, amount) in &dash.by_category {
            println!("  {name:<24} {}", format_money(*amount));
        }
    }

    if !dash.trend.is_empty() {
        println!();
        println!("Trend:");
        for point in &dash.trend {
            println!(
                "  {:<10} {} {:>12}",
                point.name,
                point.year,
                format_money(point.total)
            );
        }
    }
    Ok(())
}

fn cli_budgets(args: &[String], db: &mut Database) -> Result<()> {
    let month = month_arg(args)?;
    let report = ledger::budget_report(&*db, month)?;
    if json_flag(args) {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }
    if report.is_empty() {
        println!("No active categories");
        return Ok(());
    }

    println!("Budgets for {month}");
    println!(
        "{:<20} {:>12} {:>12} {:>12}  Status",
        "Category", "Budget", "Spent", "Remaining"
    );
    println!("{}", "─".repeat(68));
    for status in &report {
        let remaining = status
            .remaining
            .map(format_money)
            .unwrap_or_else(|| "-".into());
        let state = if status.is_over_budget {
            "OVER"
        } else if status.budget.is_none() {
            "unlimited"
        } else {
            "ok"
        };
        println!(
            "{:<20} {:>12} {:>12} {:>12}  {state}",
            status.category,
            format_budget(status.budget),
            format_money(status.spent),
            remaining,
        );
    }
    Ok(())
}

fn cli_generate(args: &[String], db: &mut Database) -> Result<()> {
    let month = month_arg(args)?;
    let generated = ledger::generate_recurring(db, month)?;
    if generated.is_empty() {
        println!("Nothing to generate for {month}");
        return Ok(());
    }
    for exp in &generated {
        println!(
            "  {}  {:>10}  {:<16} {}",
            exp.date,
            format_money(exp.amount),
            exp.category,
            exp.description
        );
    }
    println!("Generated {} recurring expense(s) for {month}", generated.len());
    Ok(())
}

fn cli_add(args: &[String], db: &mut Database) -> Result<()> {
    if args.len() < 4 {
        anyhow::bail!("Usage: expensebuddy add <date> <amount> <category> <payment> [description]");
    }
    let amount = parse_amount(&args[1])
        .ok_or_else(|| anyhow::anyhow!("Invalid amount '{}'", args[1]))?;
    let expense = ledger::add_expense(
        db,
        NewExpense {
            date: parse_date(&args[0])?,
            amount,
            category: args[2].trim().to_string(),
            payment_method: args[3].clone(),
            description: args[4..].join(" "),
        },
    )?;
    println!(
        "Added {} on {} to {} (#{})",
        format_money(expense.amount),
        expense.date,
        expense.category,
        expense.id.unwrap_or_default()
    );
    Ok(())
}

fn cli_list(args: &[String], db: &mut Database) -> Result<()> {
    let filter = ExpenseFilter {
        category: flag(args, "--category").map(str::to_string),
        start: flag(args, "--from").map(parse_date).transpose()?,
        end: flag(args, "--to").map(parse_date).transpose()?,
        search: flag(args, "--search").map(str::to_string),
        sort_by: flag(args, "--sort").map(str::parse::<SortBy>).transpose()?.unwrap_or_default(),
        order: if args.iter().any(|a| a == "--asc") {
            SortOrder::Asc
        } else {
            SortOrder::Desc
        },
    };
    let expenses = filter.apply(&db.get_expenses()?);
    if expenses.is_empty() {
        println!("No expenses");
        return Ok(());
    }

    println!(
        "{:<5} {:<10} {:>12} {:<16} {:<12} Description",
        "ID", "Date", "Amount", "Category", "Payment"
    );
    println!("{}", "─".repeat(72));
    for exp in &expenses {
        println!(
            "{:<5} {:<10} {:>12} {:<16} {:<12} {}",
            exp.id.unwrap_or_default(),
            exp.date,
            format_money(exp.amount),
            exp.category,
            exp.payment_method,
            exp.description,
        );
    }
    println!("{}", "─".repeat(72));
    println!(
        "{} expense(s), total {}",
        expenses.len(),
        format_money(crate::models::total(&expenses))
    );
    Ok(())
}

fn cli_categories(db: &mut Database) -> Result<()> {
    let categories = db.get_categories()?;
    if categories.is_empty() {
        println!("No categories");
        return Ok(());
    }
    println!("{:<4} {:<20} {:>12}  Active", "ID", "Name", "Budget");
    println!("{}", "─".repeat(46));
    for cat in &categories {
        println!(
            "{:<4} {:<20} {:>12}  {}",
            cat.id.unwrap_or_default(),
            cat.name,
            format_budget(cat.budget),
            if cat.active { "yes" } else { "no" },
        );
    }
    Ok(())
}

fn cli_recurring(db: &mut Database) -> Result<()> {
    let templates = db.get_recurring()?;
    if templates.is_empty() {
        println!("No recurring expenses");
        return Ok(());
    }
    println!(
        "{:<4} {:>4} {:>12} {:<16} {:<12} {:<7} Description",
        "ID", "Day", "Amount", "Category", "Payment", "Active"
    );
    println!("{}", "─".repeat(72));
    for t in &templates {
        println!(
            "{:<4} {:>4} {:>12} {:<16} {:<12} {:<7} {}",
            t.id.unwrap_or_default(),
            t.day_of_month,
            format_money(t.amount),
            t.category,
            t.payment_method,
            if t.active { "yes" } else { "paused" },
            t.description,
        );
    }
    Ok(())
}

fn cli_import(args: &[String], db: &mut Database) -> Result<()> {
    let Some(file_path) = args.first() else {
        anyhow::bail!("Usage: expensebuddy import <file.csv>");
    };
    let path = PathBuf::from(shellexpand(file_path));
    if !path.exists() {
        anyhow::bail!("File not found: {file_path}");
    }

    let report = crate::import::import_csv(db, &path)?;
    for err in &report.errors {
        eprintln!("  {err}");
    }
    println!("{}", report.summary());
    Ok(())
}

fn cli_export(args: &[String], db: &mut Database) -> Result<()> {
    let month = flag(args, "--month").map(str::parse::<YearMonth>).transpose()?;

    let output_path = args
        .first()
        .filter(|a| !a.starts_with('-'))
        .map(|a| shellexpand(a))
        .unwrap_or_else(|| {
            let home = std::env::var("HOME").unwrap_or_else(|_| ".".into());
            match month {
                Some(m) => format!("{home}/expenses-{m}.csv"),
                None => format!("{home}/expenses.csv"),
            }
        });

    let count = crate::import::export_csv(&*db, &PathBuf::from(&output_path), month)?;
    if count == 0 {
        println!("No expenses to export");
    } else {
        println!("Exported {count} expense(s) to {output_path}");
    }
    Ok(())
}

fn cli_reset(args: &[String], db: &mut Database) -> Result<()> {
    if !args.iter().any(|a| a == "--yes") {
        anyhow::bail!("This deletes every expense, category and recurring expense. Re-run with --yes to confirm");
    }
    ledger::reset(db)?;
    db.seed_default_categories()?;
    println!("All data cleared; default categories restored");
    Ok(())
}

fn cli_seed(args: &[String], db: &mut Database) -> Result<()> {
    let month = month_arg(args)?;
    let report = ledger::seed_sample(db, month)?;
    println!(
        "Seeded {} budgets, {} expenses and {} recurring expenses ending {month}",
        report.budgets, report.expenses, report.recurring
    );
    Ok(())
}

pub(crate) fn shellexpand(path: &str) -> String {
    if let Some(rest) = path.strip_prefix("~/") {
        let home = std::env::var("HOME").unwrap_or_else(|_| ".".into());
        format!("{home}/{rest}")
    } else {
        path.to_string()
    }
}
