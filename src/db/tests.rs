#![allow(clippy::unwrap_used)]

use super::*;
use rust_decimal_macros::dec;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn expense(d: NaiveDate, amount: Decimal, category: &str) -> Expense {
    Expense::new(d, amount, category.into(), "Card".into(), "test".into())
}

// ── Default data ──────────────────────────────────────────────

#[test]
fn test_default_categories_seeded() {
    let db = Database::open_in_memory().unwrap();
    let cats = db.get_categories().unwrap();
    assert_eq!(cats.len(), 6);
    assert!(cats.iter().any(|c| c.name == "Food"));
    assert!(cats.iter().any(|c| c.name == "Other"));
    assert!(cats.iter().all(|c| c.budget.is_none() && c.active));
}

#[test]
fn test_default_categories_not_reseeded() {
    let mut db = Database::open_in_memory().unwrap();
    let count_before = db.get_categories().unwrap().len();
    db.seed_default_categories().unwrap();
    assert_eq!(db.get_categories().unwrap().len(), count_before);
}

#[test]
fn test_reopen_keeps_data() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("expenses.db");
    {
        let mut db = Database::open(&path).unwrap();
        db.insert_expense(expense(date(2024, 4, 1), dec!(1200), "Rent"))
            .unwrap();
    }
    let db = Database::open(&path).unwrap();
    assert_eq!(db.get_expenses().unwrap().len(), 1);
    assert_eq!(db.get_categories().unwrap().len(), 6);
}

#[test]
fn test_reopen_does_not_restore_deleted_categories() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("expenses.db");
    {
        let mut db = Database::open(&path).unwrap();
        for cat in db.get_categories().unwrap() {
            db.delete_category(cat.id.unwrap()).unwrap();
        }
    }
    let mut db = Database::open(&path).unwrap();
    assert!(db.get_categories().unwrap().is_empty());

    // explicit reseed, as after a reset
    db.seed_default_categories().unwrap();
    assert_eq!(db.get_categories().unwrap().len(), 6);
}

// ── Categories ────────────────────────────────────────────────

#[test]
fn test_category_budget_tri_state_persists() {
    let mut db = Database::open_in_memory().unwrap();
    db.insert_category(Category::new("Zero".into(), Some(Decimal::ZERO)))
        .unwrap();
    db.insert_category(Category::new("Capped".into(), Some(dec!(250.50))))
        .unwrap();
    let cats = db.get_categories().unwrap();
    let find = |name: &str| cats.iter().find(|c| c.name == name).unwrap().budget;
    assert_eq!(find("Zero"), Some(Decimal::ZERO));
    assert_eq!(find("Capped"), Some(dec!(250.50)));
    assert_eq!(find("Food"), None);
}

#[test]
fn test_category_name_unique_ignoring_case() {
    let mut db = Database::open_in_memory().unwrap();
    assert!(db
        .insert_category(Category::new("FOOD".into(), None))
        .is_err());
}

#[test]
fn test_update_category_clears_budget() {
    let mut db = Database::open_in_memory().unwrap();
    let cat = db
        .insert_category(Category::new("Travel".into(), Some(dec!(500))))
        .unwrap();
    let patch = CategoryPatch {
        budget: Some(None),
        active: Some(false),
        ..Default::default()
    };
    let updated = db.update_category(cat.id.unwrap(), &patch).unwrap().unwrap();
    assert_eq!(updated.budget, None);
    assert!(!updated.active);

    let stored = db.get_category_by_id(cat.id.unwrap()).unwrap().unwrap();
    assert_eq!(stored, updated);
}

#[test]
fn test_update_missing_category() {
    let mut db = Database::open_in_memory().unwrap();
    assert!(db
        .update_category(9999, &CategoryPatch::default())
        .unwrap()
        .is_none());
}

#[test]
fn test_delete_category() {
    let mut db = Database::open_in_memory().unwrap();
    let cat = db
        .insert_category(Category::new("Travel".into(), None))
        .unwrap();
    assert!(db.delete_category(cat.id.unwrap()).unwrap());
    assert!(!db.delete_category(cat.id.unwrap()).unwrap());
}

// ── Expenses ──────────────────────────────────────────────────

#[test]
fn test_expense_roundtrip() {
    let mut db = Database::open_in_memory().unwrap();
    let stored = db
        .insert_expense(expense(date(2024, 1, 15), dec!(25.50), "Food"))
        .unwrap();
    assert!(stored.id.is_some());

    let fetched = db.get_expense_by_id(stored.id.unwrap()).unwrap().unwrap();
    assert_eq!(fetched, stored);
    assert_eq!(fetched.amount, dec!(25.50));
}

#[test]
fn test_expense_ids_unique_under_rapid_insert() {
    let mut db = Database::open_in_memory().unwrap();
    let mut ids = Vec::new();
    for _ in 0..50 {
        let e = db
            .insert_expense(expense(date(2024, 1, 1), dec!(1), "Food"))
            .unwrap();
        ids.push(e.id.unwrap());
    }
    ids.sort_unstable();
    ids.dedup();
    assert_eq!(ids.len(), 50);
}

#[test]
fn test_expenses_ordered_newest_first() {
    let mut db = Database::open_in_memory().unwrap();
    db.insert_expense(expense(date(2024, 1, 5), dec!(1), "Food"))
        .unwrap();
    db.insert_expense(expense(date(2024, 3, 5), dec!(2), "Food"))
        .unwrap();
    let all = db.get_expenses().unwrap();
    assert_eq!(all[0].date, date(2024, 3, 5));
    assert_eq!(all[1].date, date(2024, 1, 5));
}

#[test]
fn test_expenses_for_month() {
    let mut db = Database::open_in_memory().unwrap();
    db.insert_expense(expense(date(2024, 1, 31), dec!(10), "Food"))
        .unwrap();
    db.insert_expense(expense(date(2024, 2, 1), dec!(20), "Food"))
        .unwrap();
    db.insert_expense(expense(date(2024, 2, 29), dec!(30), "Rent"))
        .unwrap();
    db.insert_expense(expense(date(2024, 12, 1), dec!(40), "Rent"))
        .unwrap();

    let feb = db
        .get_expenses_for_month(YearMonth::new(2024, 2).unwrap())
        .unwrap();
    assert_eq!(feb.len(), 2);
    assert_eq!(total(&feb), dec!(50));

    // 2024-1 must not pick up 2024-12 via a prefix match
    let jan = db
        .get_expenses_for_month(YearMonth::new(2024, 1).unwrap())
        .unwrap();
    assert_eq!(jan.len(), 1);
}

#[test]
fn test_insert_expenses_batch() {
    let mut db = Database::open_in_memory().unwrap();
    let stored = db
        .insert_expenses(vec![
            expense(date(2024, 4, 1), dec!(1200), "Rent"),
            expense(date(2024, 4, 12), dec!(15.99), "Entertainment"),
        ])
        .unwrap();
    assert_eq!(stored.len(), 2);
    assert_ne!(stored[0].id, stored[1].id);
    assert_eq!(db.get_expenses().unwrap().len(), 2);
}

#[test]
fn test_update_expense() {
    let mut db = Database::open_in_memory().unwrap();
    let stored = db
        .insert_expense(expense(date(2024, 1, 15), dec!(25.50), "Food"))
        .unwrap();
    let patch = ExpensePatch {
        amount: Some(dec!(30)),
        category: Some("Other".into()),
        ..Default::default()
    };
    let updated = db.update_expense(stored.id.unwrap(), &patch).unwrap().unwrap();
    assert_eq!(updated.amount, dec!(30));
    assert_eq!(updated.category, "Other");
    assert_eq!(updated.date, date(2024, 1, 15));
    assert!(db.update_expense(9999, &patch).unwrap().is_none());
}

#[test]
fn test_delete_expense() {
    let mut db = Database::open_in_memory().unwrap();
    let stored = db
        .insert_expense(expense(date(2024, 1, 15), dec!(25.50), "Food"))
        .unwrap();
    assert!(db.delete_expense(stored.id.unwrap()).unwrap());
    assert!(db.get_expenses().unwrap().is_empty());
    assert!(!db.delete_expense(stored.id.unwrap()).unwrap());
}

#[test]
fn test_count_expenses_in_category_case_sensitive() {
    let mut db = Database::open_in_memory().unwrap();
    db.insert_expense(expense(date(2024, 1, 1), dec!(1), "Food"))
        .unwrap();
    db.insert_expense(expense(date(2024, 1, 2), dec!(1), "food"))
        .unwrap();
    assert_eq!(db.count_expenses_in_category("Food").unwrap(), 1);
    assert_eq!(db.count_expenses_in_category("Rent").unwrap(), 0);
}

#[test]
fn test_malformed_stored_amount_fails_loudly() {
    let db = Database::open_in_memory().unwrap();
    db.conn
        .execute(
            "INSERT INTO expenses (date, amount, category, payment_method, description, created_at)
             VALUES ('2024-01-01', 'abc', 'Food', 'Card', '', '')",
            [],
        )
        .unwrap();
    assert!(db.get_expenses().is_err());
}

#[test]
fn test_malformed_stored_date_fails_loudly() {
    let db = Database::open_in_memory().unwrap();
    db.conn
        .execute(
            "INSERT INTO expenses (date, amount, category, payment_method, description, created_at)
             VALUES ('01/02/2024', '5', 'Food', 'Card', '', '')",
            [],
        )
        .unwrap();
    assert!(db.get_expenses().is_err());
}

// ── Recurring ─────────────────────────────────────────────────

#[test]
fn test_recurring_roundtrip() {
    let mut db = Database::open_in_memory().unwrap();
    let stored = db
        .insert_recurring(RecurringTemplate::new(
            dec!(1200),
            "Rent".into(),
            "Transfer".into(),
            "Monthly rent".into(),
            31,
        ))
        .unwrap();
    let all = db.get_recurring().unwrap();
    assert_eq!(all.len(), 1);
    assert_eq!(all[0], stored);
    assert_eq!(all[0].day_of_month, 31);
}

#[test]
fn test_recurring_day_out_of_range_rejected_by_schema() {
    let mut db = Database::open_in_memory().unwrap();
    let result = db.insert_recurring(RecurringTemplate::new(
        dec!(10),
        "Rent".into(),
        "Card".into(),
        String::new(),
        32,
    ));
    assert!(result.is_err());
}

#[test]
fn test_update_and_delete_recurring() {
    let mut db = Database::open_in_memory().unwrap();
    let stored = db
        .insert_recurring(RecurringTemplate::new(
            dec!(15.99),
            "Entertainment".into(),
            "Card".into(),
            "Streaming".into(),
            12,
        ))
        .unwrap();
    let id = stored.id.unwrap();
    let patch = RecurringPatch {
        active: Some(false),
        amount: Some(dec!(17.99)),
        ..Default::default()
    };
    let updated = db.update_recurring(id, &patch).unwrap().unwrap();
    assert!(!updated.active);
    assert_eq!(db.get_recurring_by_id(id).unwrap().unwrap().amount, dec!(17.99));
    assert!(db.delete_recurring(id).unwrap());
    assert!(db.update_recurring(id, &patch).unwrap().is_none());
}

// ── Reset ─────────────────────────────────────────────────────

#[test]
fn test_clear_all_empties_every_table() {
    let mut db = Database::open_in_memory().unwrap();
    db.insert_expense(expense(date(2024, 1, 1), dec!(1), "Food"))
        .unwrap();
    db.insert_recurring(RecurringTemplate::new(
        dec!(1200),
        "Rent".into(),
        "Card".into(),
        String::new(),
        1,
    ))
    .unwrap();
    db.clear_all().unwrap();
    assert!(db.get_expenses().unwrap().is_empty());
    assert!(db.get_recurring().unwrap().is_empty());
    assert!(db.get_categories().unwrap().is_empty());
}
