#![allow(clippy::unwrap_used)]

use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use super::*;

fn cat(name: &str, budget: Option<Decimal>) -> Category {
    Category::new(name.into(), budget)
}

fn exp(category: &str, amount: Decimal) -> Expense {
    Expense::new(
        NaiveDate::from_ymd_opt(2024, 1, 15).unwrap(),
        amount,
        category.into(),
        "Card".into(),
        String::new(),
    )
}

fn status_for<'a>(statuses: &'a [BudgetStatus], name: &str) -> &'a BudgetStatus {
    statuses.iter().find(|s| s.category == name).unwrap()
}

// ── Ceiling arithmetic ────────────────────────────────────────

#[test]
fn test_under_budget() {
    let statuses = evaluate_budgets(
        &[cat("Food", Some(dec!(100)))],
        &[exp("Food", dec!(50)), exp("Food", dec!(25))],
    );
    let s = &statuses[0];
    assert_eq!(s.spent, dec!(75));
    assert_eq!(s.remaining, Some(dec!(25)));
    assert!(!s.is_over_budget);
}

#[test]
fn test_over_budget() {
    let statuses = evaluate_budgets(&[cat("Food", Some(dec!(100)))], &[exp("Food", dec!(150))]);
    let s = &statuses[0];
    assert_eq!(s.remaining, Some(dec!(-50)));
    assert!(s.is_over_budget);
}

#[test]
fn test_exactly_at_budget_is_not_over() {
    let statuses = evaluate_budgets(&[cat("Food", Some(dec!(100)))], &[exp("Food", dec!(100))]);
    assert_eq!(statuses[0].remaining, Some(Decimal::ZERO));
    assert!(!statuses[0].is_over_budget);
}

// ── Tri-state budget ──────────────────────────────────────────

#[test]
fn test_unlimited_never_over_budget() {
    let statuses = evaluate_budgets(&[cat("Fun", None)], &[exp("Fun", dec!(9999.99))]);
    let s = &statuses[0];
    assert_eq!(s.budget, None);
    assert_eq!(s.remaining, None);
    assert!(!s.is_over_budget);
    assert_eq!(s.spent, dec!(9999.99));
}

#[test]
fn test_zero_budget_is_hard_ceiling() {
    let statuses = evaluate_budgets(&[cat("Treats", Some(Decimal::ZERO))], &[exp("Treats", dec!(0.01))]);
    let s = &statuses[0];
    assert_eq!(s.budget, Some(Decimal::ZERO));
    assert_eq!(s.remaining, Some(dec!(-0.01)));
    assert!(s.is_over_budget);
}

#[test]
fn test_zero_budget_without_spend_is_fine() {
    let statuses = evaluate_budgets(&[cat("Treats", Some(Decimal::ZERO))], &[]);
    let s = &statuses[0];
    assert_eq!(s.spent, Decimal::ZERO);
    assert_eq!(s.remaining, Some(Decimal::ZERO));
    assert!(!s.is_over_budget);
}

// ── Attribution ───────────────────────────────────────────────

#[test]
fn test_category_match_is_case_sensitive() {
    let statuses = evaluate_budgets(&[cat("Food", Some(dec!(100)))], &[exp("food", dec!(80))]);
    assert_eq!(statuses[0].spent, Decimal::ZERO);
    assert_eq!(statuses[0].remaining, Some(dec!(100)));
}

#[test]
fn test_no_expenses_yields_zero_spent() {
    let statuses = evaluate_budgets(&[cat("Food", Some(dec!(100))), cat("Rent", None)], &[]);
    assert_eq!(statuses.len(), 2);
    assert!(statuses.iter().all(|s| s.spent == Decimal::ZERO));
}

#[test]
fn test_expenses_for_unknown_categories_ignored() {
    let statuses = evaluate_budgets(&[cat("Food", Some(dec!(100)))], &[exp("Travel", dec!(500))]);
    assert_eq!(statuses.len(), 1);
    assert_eq!(statuses[0].spent, Decimal::ZERO);
}

#[test]
fn test_inactive_categories_skipped() {
    let mut archived = cat("Old", Some(dec!(10)));
    archived.active = false;
    let statuses = evaluate_budgets(
        &[cat("Food", None), archived],
        &[exp("Old", dec!(50))],
    );
    assert_eq!(statuses.len(), 1);
    assert_eq!(statuses[0].category, "Food");
}

#[test]
fn test_output_follows_category_order() {
    let statuses = evaluate_budgets(
        &[cat("Rent", None), cat("Food", None), cat("Bills", None)],
        &[],
    );
    let names: Vec<&str> = statuses.iter().map(|s| s.category.as_str()).collect();
    assert_eq!(names, ["Rent", "Food", "Bills"]);
}

#[test]
fn test_evaluation_is_deterministic() {
    let cats = [cat("Food", Some(dec!(100))), cat("Rent", None)];
    let exps = [exp("Food", dec!(10)), exp("Rent", dec!(1200)), exp("Food", dec!(5))];
    assert_eq!(evaluate_budgets(&cats, &exps), evaluate_budgets(&cats, &exps));
    assert_eq!(status_for(&evaluate_budgets(&cats, &exps), "Food").spent, dec!(15));
}

// ── percent_used ──────────────────────────────────────────────

#[test]
fn test_percent_used() {
    let statuses = evaluate_budgets(&[cat("Food", Some(dec!(200)))], &[exp("Food", dec!(50))]);
    assert_eq!(statuses[0].percent_used(), Some(dec!(25)));
}

#[test]
fn test_percent_used_none_without_positive_ceiling() {
    let statuses = evaluate_budgets(
        &[cat("Fun", None), cat("Treats", Some(Decimal::ZERO))],
        &[exp("Fun", dec!(5)), exp("Treats", dec!(5))],
    );
    assert!(statuses.iter().all(|s| s.percent_used().is_none()));
}

// ── JSON ──────────────────────────────────────────────────────

#[test]
fn test_json_status_fields() {
    let statuses = evaluate_budgets(
        &[cat("Food", Some(dec!(100))), cat("Fun", None)],
        &[exp("Food", dec!(75))],
    );
    let json = serde_json::to_value(&statuses).unwrap();
    assert_eq!(json[0]["category"], "Food");
    assert_eq!(json[0]["budget"], "100");
    assert_eq!(json[0]["spent"], "75");
    assert_eq!(json[0]["remaining"], "25");
    assert_eq!(json[0]["is_over_budget"], false);
    assert!(json[1]["budget"].is_null());
    assert!(json[1]["remaining"].is_null());
}
