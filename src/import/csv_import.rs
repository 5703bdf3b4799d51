use anyhow::{Context, Result};
use chrono::NaiveDate;
use std::path::Path;

use crate::ledger::{add_expense, NewExpense};
use crate::models::{parse_amount, Category};
use crate::store::RecordStore;

/// Outcome of a CSV import. Bad rows are skipped, not fatal.
#[derive(Debug, Default, Clone, PartialEq)]
pub(crate) struct ImportReport {
    pub(crate) imported: usize,
    pub(crate) errors: Vec<String>,
}

impl ImportReport {
    pub(crate) fn summary(&self) -> String {
        if self.errors.is_empty() {
            format!("Imported {} expense(s)", self.imported)
        } else {
            format!(
                "Imported {} expense(s), {} row(s) skipped",
                self.imported,
                self.errors.len()
            )
        }
    }
}

/// Read every record of the file as trimmed strings.
pub(crate) fn read_records(path: &Path) -> Result<Vec<Vec<String>>> {
    let mut rdr = csv::ReaderBuilder::new()
        .flexible(true)
        .has_headers(false)
        .trim(csv::Trim::All)
        .from_path(path)
        .with_context(|| format!("Failed to open CSV file: {}", path.display()))?;

    let mut records = Vec::new();
    for result in rdr.records() {
        let record = result.context("Failed to read CSV record")?;
        records.push(record.iter().map(|s| s.to_string()).collect());
    }
    Ok(records)
}

/// A header names both a date and an amount column.
fn is_header(record: &[String]) -> bool {
    let line = record.join(",").to_lowercase();
    line.contains("date") && line.contains("amount")
}

fn parse_date(s: &str) -> Option<NaiveDate> {
    ["%Y-%m-%d", "%m/%d/%y", "%m/%d/%Y", "%Y/%m/%d", "%m-%d-%Y", "%d.%m.%Y"]
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(s, fmt).ok())
}

/// Turn one record into an expense, or the reason it was rejected.
fn parse_record(record: &[String], categories: &[Category]) -> Result<NewExpense, String> {
    if record.len() < 4 {
        return Err(
            "Insufficient columns (expected at least 4: Date, Amount, Category, Payment Method)"
                .into(),
        );
    }

    let date = parse_date(&record[0]).ok_or_else(|| format!("Invalid date \"{}\"", record[0]))?;
    let amount =
        parse_amount(&record[1]).ok_or_else(|| format!("Invalid amount \"{}\"", record[1]))?;

    let category = &record[2];
    if category.is_empty() {
        return Err("Category is required".into());
    }
    let payment_method = &record[3];
    if payment_method.is_empty() {
        return Err("Payment method is required".into());
    }
    if !categories.iter().any(|c| c.active && &c.name == category) {
        let available: Vec<&str> = categories
            .iter()
            .filter(|c| c.active)
            .map(|c| c.name.as_str())
            .collect();
        return Err(format!(
            "Category \"{category}\" does not exist. Available categories: {}",
            available.join(", ")
        ));
    }

    Ok(NewExpense {
        date,
        amount,
        category: category.clone(),
        payment_method: payment_method.clone(),
        description: record.get(4).cloned().unwrap_or_default(),
    })
}

/// Add every valid record to the store. Rows are numbered from 1, header included.
pub(crate) fn import_records(store: &mut impl RecordStore, records: &[Vec<String>]) -> Result<ImportReport> {
    let categories = store.get_categories()?;
    let skip = usize::from(records.first().is_some_and(|r| is_header(r)));

    let mut report = ImportReport::default();
    for (i, record) in records.iter().enumerate().skip(skip) {
        if record.iter().all(|f| f.is_empty()) {
            continue;
        }
        let row = i + 1;
        let new = match parse_record(record, &categories) {
            Ok(new) => new,
            Err(reason) => {
                tracing::warn!(row, %reason, "skipping CSV row");
                report.errors.push(format!("Row {row}: {reason}"));
                continue;
            }
        };
        match add_expense(store, new) {
            Ok(_) => report.imported += 1,
            Err(e) => report.errors.push(format!("Row {row}: {e}")),
        }
    }
    tracing::info!(imported = report.imported, skipped = report.errors.len(), "CSV import finished");
    Ok(report)
}

pub(crate) fn import_csv(store: &mut impl RecordStore, path: &Path) -> Result<ImportReport> {
    let records = read_records(path)?;
    if records.is_empty() {
        anyhow::bail!("CSV file is empty");
    }
    import_records(store, &records)
}

#[cfg(test)]
#[path = "csv_import_tests.rs"]
mod tests;
