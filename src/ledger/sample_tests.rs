#![allow(clippy::unwrap_used)]

use rust_decimal_macros::dec;

use super::*;
use crate::ledger::{budget_report, generate_recurring};
use crate::store::{CategoryStore, ExpenseStore, MemoryStore, RecurringStore};

fn ym(y: i32, m: u32) -> YearMonth {
    YearMonth::new(y, m).unwrap()
}

#[test]
fn test_seed_sample_counts() {
    let mut store = MemoryStore::new();
    let report = seed_sample(&mut store, ym(2024, 3)).unwrap();
    assert_eq!(
        report,
        SampleReport {
            budgets: 6,
            expenses: 69,
            recurring: 2,
        }
    );
    assert_eq!(store.get_expenses().unwrap().len(), 69);
    assert_eq!(store.get_recurring().unwrap().len(), 2);
}

#[test]
fn test_seed_sample_spans_three_months() {
    let mut store = MemoryStore::new();
    seed_sample(&mut store, ym(2024, 1)).unwrap();
    for m in [ym(2023, 11), ym(2023, 12), ym(2024, 1)] {
        assert_eq!(store.get_expenses_for_month(m).unwrap().len(), 23);
    }
    assert!(store.get_expenses_for_month(ym(2024, 2)).unwrap().is_empty());
}

#[test]
fn test_seed_sample_budgets_existing_categories() {
    let mut store = MemoryStore::new();
    add_category(&mut store, "Food", None).unwrap();
    let food_id = store.get_categories().unwrap()[0].id;

    seed_sample(&mut store, ym(2024, 3)).unwrap();
    let cats = store.get_categories().unwrap();
    assert_eq!(cats.len(), 6);
    let food = Category::find_by_name(&cats, "Food").unwrap();
    assert_eq!(food.id, food_id);
    assert_eq!(food.budget, Some(dec!(300)));
}

#[test]
fn test_seed_sample_rent_not_generated_twice() {
    let mut store = MemoryStore::new();
    seed_sample(&mut store, ym(2024, 3)).unwrap();

    let generated = generate_recurring(&mut store, ym(2024, 3)).unwrap();
    // rent already paid; the utilities template differs from the sample bill
    assert_eq!(generated.len(), 1);
    assert_eq!(generated[0].category, "Utilities");

    let rent = budget_report(&store, ym(2024, 3))
        .unwrap()
        .into_iter()
        .find(|s| s.category == "Rent")
        .unwrap();
    assert_eq!(rent.spent, dec!(1200));
    assert!(!rent.is_over_budget);
}
