use anyhow::{Context, Result};
use std::io::Write;
use std::path::Path;

use crate::calendar::YearMonth;
use crate::models::Expense;
use crate::store::RecordStore;

pub(crate) const HEADER: [&str; 5] = ["Date", "Amount", "Category", "Payment Method", "Description"];

/// Write expenses as CSV, header first. Returns the number of rows written.
pub(crate) fn write_expenses<W: Write>(writer: W, expenses: &[Expense]) -> Result<usize> {
    let mut wtr = csv::Writer::from_writer(writer);
    wtr.write_record(HEADER)?;
    for exp in expenses {
        wtr.write_record([
            exp.date.format("%Y-%m-%d").to_string(),
            format!("{:.2}", exp.amount),
            exp.category.clone(),
            exp.payment_method.clone(),
            exp.description.clone(),
        ])?;
    }
    wtr.flush().context("Failed to write CSV")?;
    Ok(expenses.len())
}

/// Export all expenses, or one month's, to `path`.
pub(crate) fn export_csv(store: &impl RecordStore, path: &Path, month: Option<YearMonth>) -> Result<usize> {
    let expenses = match month {
        Some(m) => store.get_expenses_for_month(m)?,
        None => store.get_expenses()?,
    };
    let file = std::fs::File::create(path)
        .with_context(|| format!("Failed to create {}", path.display()))?;
    let count = write_expenses(file, &expenses)?;
    tracing::info!(count, path = %path.display(), "exported expenses");
    Ok(count)
}

#[cfg(test)]
#[path = "csv_export_tests.rs"]
mod tests;
