#![allow(clippy::unwrap_used)]

use chrono::NaiveDate;
use rust_decimal_macros::dec;

use super::*;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn expense(d: NaiveDate, category: &str) -> Expense {
    Expense::new(d, dec!(10), category.into(), "Card".into(), String::new())
}

// ── Categories ────────────────────────────────────────────────

#[test]
fn test_insert_assigns_unique_ids() {
    let mut store = MemoryStore::new();
    let a = store.insert_category(Category::new("Food".into(), None)).unwrap();
    let b = store.insert_category(Category::new("Rent".into(), None)).unwrap();
    assert!(a.id.is_some());
    assert_ne!(a.id, b.id);
}

#[test]
fn test_categories_sorted_by_name() {
    let mut store = MemoryStore::new();
    store.insert_category(Category::new("rent".into(), None)).unwrap();
    store.insert_category(Category::new("Food".into(), None)).unwrap();
    let names: Vec<String> = store.get_categories().unwrap().into_iter().map(|c| c.name).collect();
    assert_eq!(names, ["Food", "rent"]);
}

#[test]
fn test_update_category_missing_returns_none() {
    let mut store = MemoryStore::new();
    let patch = CategoryPatch {
        active: Some(false),
        ..Default::default()
    };
    assert!(store.update_category(99, &patch).unwrap().is_none());
}

#[test]
fn test_update_category_applies_patch() {
    let mut store = MemoryStore::new();
    let cat = store.insert_category(Category::new("Food".into(), None)).unwrap();
    let patch = CategoryPatch {
        budget: Some(Some(dec!(250))),
        ..Default::default()
    };
    let updated = store.update_category(cat.id.unwrap(), &patch).unwrap().unwrap();
    assert_eq!(updated.budget, Some(dec!(250)));
    assert_eq!(store.get_categories().unwrap()[0].budget, Some(dec!(250)));
}

#[test]
fn test_delete_category_reports_presence() {
    let mut store = MemoryStore::new();
    let cat = store.insert_category(Category::new("Food".into(), None)).unwrap();
    assert!(store.delete_category(cat.id.unwrap()).unwrap());
    assert!(!store.delete_category(cat.id.unwrap()).unwrap());
}

// ── Expenses ──────────────────────────────────────────────────

#[test]
fn test_expenses_newest_first() {
    let mut store = MemoryStore::new();
    store.insert_expense(expense(date(2024, 1, 5), "Food")).unwrap();
    store.insert_expense(expense(date(2024, 3, 1), "Food")).unwrap();
    store.insert_expense(expense(date(2024, 2, 9), "Food")).unwrap();
    let dates: Vec<NaiveDate> = store.get_expenses().unwrap().iter().map(|e| e.date).collect();
    assert_eq!(dates, [date(2024, 3, 1), date(2024, 2, 9), date(2024, 1, 5)]);
}

#[test]
fn test_expenses_for_month() {
    let mut store = MemoryStore::new();
    store.insert_expense(expense(date(2024, 1, 31), "Food")).unwrap();
    store.insert_expense(expense(date(2024, 2, 1), "Food")).unwrap();
    store.insert_expense(expense(date(2023, 2, 14), "Food")).unwrap();
    let feb = store
        .get_expenses_for_month(YearMonth::new(2024, 2).unwrap())
        .unwrap();
    assert_eq!(feb.len(), 1);
    assert_eq!(feb[0].date, date(2024, 2, 1));
}

#[test]
fn test_insert_expenses_batch() {
    let mut store = MemoryStore::new();
    let stored = store
        .insert_expenses(vec![
            expense(date(2024, 1, 1), "Rent"),
            expense(date(2024, 1, 2), "Food"),
        ])
        .unwrap();
    assert_eq!(stored.len(), 2);
    assert!(stored.iter().all(|e| e.id.is_some()));
    assert_eq!(store.get_expenses().unwrap().len(), 2);
}

#[test]
fn test_count_expenses_in_category_is_exact() {
    let mut store = MemoryStore::new();
    store.insert_expense(expense(date(2024, 1, 1), "Food")).unwrap();
    store.insert_expense(expense(date(2024, 1, 2), "food")).unwrap();
    store.insert_expense(expense(date(2024, 1, 3), "Food")).unwrap();
    assert_eq!(store.count_expenses_in_category("Food").unwrap(), 2);
    assert_eq!(store.count_expenses_in_category("Rent").unwrap(), 0);
}

#[test]
fn test_update_and_delete_expense() {
    let mut store = MemoryStore::new();
    let exp = store.insert_expense(expense(date(2024, 1, 1), "Food")).unwrap();
    let id = exp.id.unwrap();
    let patch = ExpensePatch {
        description: Some("Groceries".into()),
        ..Default::default()
    };
    assert_eq!(
        store.update_expense(id, &patch).unwrap().unwrap().description,
        "Groceries"
    );
    assert!(store.delete_expense(id).unwrap());
    assert!(store.update_expense(id, &patch).unwrap().is_none());
}

// ── Recurring ─────────────────────────────────────────────────

#[test]
fn test_recurring_roundtrip_and_toggle() {
    let mut store = MemoryStore::new();
    let rec = store
        .insert_recurring(RecurringTemplate::new(
            dec!(1200),
            "Rent".into(),
            "Card".into(),
            "Monthly rent".into(),
            1,
        ))
        .unwrap();
    let id = rec.id.unwrap();
    let patch = RecurringPatch {
        active: Some(false),
        ..Default::default()
    };
    assert!(!store.update_recurring(id, &patch).unwrap().unwrap().active);
    assert!(store.delete_recurring(id).unwrap());
    assert!(store.get_recurring().unwrap().is_empty());
}

#[test]
fn test_clear_all() {
    let mut store = MemoryStore::new();
    store.insert_category(Category::new("Food".into(), None)).unwrap();
    store.insert_expense(expense(date(2024, 1, 1), "Food")).unwrap();
    store.clear_all().unwrap();
    assert!(store.get_categories().unwrap().is_empty());
    assert!(store.get_expenses().unwrap().is_empty());
    assert!(store.get_recurring().unwrap().is_empty());
}
