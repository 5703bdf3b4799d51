#![allow(clippy::unwrap_used)]

use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use super::*;
use crate::budget::evaluate_budgets;
use crate::models::Category;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn ym(y: i32, m: u32) -> YearMonth {
    YearMonth::new(y, m).unwrap()
}

fn template(amount: Decimal, category: &str, description: &str, day: u32) -> RecurringTemplate {
    RecurringTemplate::new(amount, category.into(), "Card".into(), description.into(), day)
}

fn rent() -> RecurringTemplate {
    template(dec!(1200), "Rent", "Monthly rent", 1)
}

// ── Generation ────────────────────────────────────────────────

#[test]
fn test_generates_missing_expense() {
    let out = reconcile_recurring(&[rent()], &[], ym(2024, 4));
    assert_eq!(out.len(), 1);
    let exp = &out[0];
    assert!(exp.id.is_none());
    assert_eq!(exp.date, date(2024, 4, 1));
    assert_eq!(exp.amount, dec!(1200));
    assert_eq!(exp.category, "Rent");
    assert_eq!(exp.payment_method, "Card");
    assert_eq!(exp.description, "Monthly rent");
}

#[test]
fn test_second_pass_is_idempotent() {
    let month = ym(2024, 4);
    let first = reconcile_recurring(&[rent()], &[], month);
    let second = reconcile_recurring(&[rent()], &first, month);
    assert!(second.is_empty());
}

#[test]
fn test_inactive_templates_skipped() {
    let mut paused = rent();
    paused.active = false;
    assert!(reconcile_recurring(&[paused], &[], ym(2024, 4)).is_empty());
}

#[test]
fn test_no_templates_yields_nothing() {
    assert!(reconcile_recurring(&[], &[], ym(2024, 4)).is_empty());
}

// ── Day clamping ──────────────────────────────────────────────

#[test]
fn test_day_31_clamps_in_leap_february() {
    let out = reconcile_recurring(&[template(dec!(40), "Utilities", "Phone", 31)], &[], ym(2024, 2));
    assert_eq!(out[0].date, date(2024, 2, 29));
}

#[test]
fn test_day_31_clamps_in_common_february() {
    let out = reconcile_recurring(&[template(dec!(40), "Utilities", "Phone", 31)], &[], ym(2023, 2));
    assert_eq!(out[0].date, date(2023, 2, 28));
}

#[test]
fn test_day_31_clamps_in_thirty_day_month() {
    let out = reconcile_recurring(&[template(dec!(40), "Utilities", "Phone", 31)], &[], ym(2024, 6));
    assert_eq!(out[0].date, date(2024, 6, 30));
}

// ── Fingerprint ───────────────────────────────────────────────

#[test]
fn test_manual_entry_with_same_fingerprint_blocks_generation() {
    let manual = Expense::new(
        date(2024, 4, 1),
        dec!(1200.00),
        "Rent".into(),
        "Cash".into(),
        "Monthly rent".into(),
    );
    // payment method is not part of the identity
    assert!(reconcile_recurring(&[rent()], &[manual], ym(2024, 4)).is_empty());
}

#[test]
fn test_same_charge_on_other_day_does_not_block() {
    let earlier = Expense::new(
        date(2024, 4, 15),
        dec!(1200),
        "Rent".into(),
        "Card".into(),
        "Monthly rent".into(),
    );
    let out = reconcile_recurring(&[rent()], &[earlier], ym(2024, 4));
    assert_eq!(out.len(), 1);
    assert_eq!(out[0].date, date(2024, 4, 1));
}

#[test]
fn test_expense_from_other_month_does_not_block() {
    let march = reconcile_recurring(&[rent()], &[], ym(2024, 3));
    let april = reconcile_recurring(&[rent()], &march, ym(2024, 4));
    assert_eq!(april.len(), 1);
    assert_eq!(april[0].date, date(2024, 4, 1));
}

#[test]
fn test_different_description_is_different_charge() {
    let existing = Expense::new(
        date(2024, 4, 1),
        dec!(1200),
        "Rent".into(),
        "Card".into(),
        "Parking".into(),
    );
    assert_eq!(reconcile_recurring(&[rent()], &[existing], ym(2024, 4)).len(), 1);
}

#[test]
fn test_identical_templates_generate_once() {
    let out = reconcile_recurring(&[rent(), rent()], &[], ym(2024, 4));
    assert_eq!(out.len(), 1);
}

#[test]
fn test_distinct_templates_each_generate() {
    let out = reconcile_recurring(
        &[rent(), template(dec!(15.99), "Entertainment", "Streaming", 12)],
        &[],
        ym(2024, 4),
    );
    assert_eq!(out.len(), 2);
    assert_eq!(out[1].date, date(2024, 4, 12));
}

// ── With the evaluator ────────────────────────────────────────

#[test]
fn test_generated_rent_counts_against_budget() {
    let month = ym(2024, 4);
    let categories = [Category::new("Rent".into(), Some(dec!(1500)))];

    let generated = reconcile_recurring(&[rent()], &[], month);
    let statuses = evaluate_budgets(&categories, &generated);
    assert_eq!(statuses[0].spent, dec!(1200));
    assert_eq!(statuses[0].remaining, Some(dec!(300)));
    assert!(!statuses[0].is_over_budget);

    assert!(reconcile_recurring(&[rent()], &generated, month).is_empty());
}
