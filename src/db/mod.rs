mod schema;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use rusqlite::types::Type;
use rusqlite::{params, Connection, Row};
use rust_decimal::Decimal;
use std::path::Path;
use std::str::FromStr;

use crate::calendar::YearMonth;
use crate::models::*;
use crate::store::{CategoryStore, ExpenseStore, RecordStore, RecurringStore};

const DATE_FORMAT: &str = "%Y-%m-%d";

const CATEGORY_COLUMNS: &str = "id, name, budget, active";
const EXPENSE_COLUMNS: &str =
    "id, date, amount, category, payment_method, description, created_at";
const RECURRING_COLUMNS: &str =
    "id, amount, category, payment_method, description, day_of_month, active, created_at";

pub(crate) struct Database {
    conn: Connection,
}

impl Database {
    pub(crate) fn open(path: &Path) -> Result<Self> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
        let conn = Connection::open(path)
            .with_context(|| format!("Failed to open database: {}", path.display()))?;
        conn.execute_batch("PRAGMA journal_mode=WAL; PRAGMA foreign_keys=ON;")
            .context("Failed to set database pragmas")?;
        let mut db = Self { conn };
        db.migrate().context("Database migration failed")?;
        tracing::debug!(path = %path.display(), "database opened");
        Ok(db)
    }

    #[cfg(test)]
    pub(crate) fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        conn.execute_batch("PRAGMA foreign_keys=ON;")?;
        let mut db = Self { conn };
        db.migrate()?;
        Ok(db)
    }

    fn migrate(&mut self) -> Result<()> {
        let has_version_table: bool = self.conn.query_row(
            "SELECT EXISTS(SELECT 1 FROM sqlite_master WHERE type='table' AND name='schema_version')",
            [],
            |row| row.get(0),
        )?;

        if !has_version_table {
            self.conn.execute_batch(schema::SCHEMA_V1)?;
            self.conn.execute(
                "INSERT INTO schema_version (version) VALUES (?1)",
                params![schema::CURRENT_VERSION],
            )?;
            // only a brand-new database gets the defaults
            return self.seed_default_categories();
        }

        let current: i32 = self
            .conn
            .query_row("SELECT version FROM schema_version LIMIT 1", [], |row| {
                row.get(0)
            })
            .unwrap_or(0);

        for &(from_version, sql) in schema::MIGRATIONS {
            if current <= from_version {
                self.conn.execute_batch(sql)?;
            }
        }

        if current < schema::CURRENT_VERSION {
            self.conn.execute(
                "UPDATE schema_version SET version = ?1",
                params![schema::CURRENT_VERSION],
            )?;
        }

        Ok(())
    }

    /// Seeds the default categories into an empty table.
    pub(crate) fn seed_default_categories(&mut self) -> Result<()> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM categories", [], |row| row.get(0))?;
        if count > 0 {
            return Ok(());
        }

        let tx = self.conn.transaction()?;
        for name in schema::DEFAULT_CATEGORIES {
            tx.execute(
                "INSERT OR IGNORE INTO categories (name, budget, active) VALUES (?1, NULL, 1)",
                params![name],
            )?;
        }
        tx.commit()?;
        Ok(())
    }

    fn get_category_by_id(&self, id: i64) -> Result<Option<Category>> {
        let result = self.conn.query_row(
            &format!("SELECT {CATEGORY_COLUMNS} FROM categories WHERE id = ?1"),
            params![id],
            category_from_row,
        );
        match result {
            Ok(c) => Ok(Some(c)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn get_expense_by_id(&self, id: i64) -> Result<Option<Expense>> {
        let result = self.conn.query_row(
            &format!("SELECT {EXPENSE_COLUMNS} FROM expenses WHERE id = ?1"),
            params![id],
            expense_from_row,
        );
        match result {
            Ok(e) => Ok(Some(e)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn get_recurring_by_id(&self, id: i64) -> Result<Option<RecurringTemplate>> {
        let result = self.conn.query_row(
            &format!("SELECT {RECURRING_COLUMNS} FROM recurring WHERE id = ?1"),
            params![id],
            recurring_from_row,
        );
        match result {
            Ok(t) => Ok(Some(t)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }
}

// ── Row mapping ───────────────────────────────────────────────

fn conversion_error<E>(idx: usize, err: E) -> rusqlite::Error
where
    E: std::error::Error + Send + Sync + 'static,
{
    rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(err))
}

fn date_column(row: &Row<'_>, idx: usize) -> rusqlite::Result<NaiveDate> {
    let raw: String = row.get(idx)?;
    NaiveDate::parse_from_str(&raw, DATE_FORMAT).map_err(|e| conversion_error(idx, e))
}

fn decimal_column(row: &Row<'_>, idx: usize) -> rusqlite::Result<Decimal> {
    let raw: String = row.get(idx)?;
    Decimal::from_str(&raw).map_err(|e| conversion_error(idx, e))
}

fn category_from_row(row: &Row<'_>) -> rusqlite::Result<Category> {
    let budget = match row.get::<_, Option<String>>(2)? {
        Some(raw) => Some(Decimal::from_str(&raw).map_err(|e| conversion_error(2, e))?),
        None => None,
    };
    Ok(Category {
        id: Some(row.get(0)?),
        name: row.get(1)?,
        budget,
        active: row.get(3)?,
    })
}

fn expense_from_row(row: &Row<'_>) -> rusqlite::Result<Expense> {
    Ok(Expense {
        id: Some(row.get(0)?),
        date: date_column(row, 1)?,
        amount: decimal_column(row, 2)?,
        category: row.get(3)?,
        payment_method: row.get(4)?,
        description: row.get(5)?,
        created_at: row.get(6)?,
    })
}

fn recurring_from_row(row: &Row<'_>) -> rusqlite::Result<RecurringTemplate> {
    Ok(RecurringTemplate {
        id: Some(row.get(0)?),
        amount: decimal_column(row, 1)?,
        category: row.get(2)?,
        payment_method: row.get(3)?,
        description: row.get(4)?,
        day_of_month: row.get(5)?,
        active: row.get(6)?,
        created_at: row.get(7)?,
    })
}

fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

// ── Categories ────────────────────────────────────────────────

impl CategoryStore for Database {
    fn get_categories(&self) -> Result<Vec<Category>> {
        let mut stmt = self.conn.prepare(&format!(
            "SELECT {CATEGORY_COLUMNS} FROM categories ORDER BY name COLLATE NOCASE"
        ))?;
        let rows = stmt.query_map([], category_from_row)?;
        Ok(rows.collect::<std::result::Result<Vec<_>, _>>()?)
    }

    fn insert_category(&mut self, mut category: Category) -> Result<Category> {
        self.conn
            .execute(
                "INSERT INTO categories (name, budget, active) VALUES (?1, ?2, ?3)",
                params![
                    category.name,
                    category.budget.map(|b| b.to_string()),
                    category.active,
                ],
            )
            .with_context(|| format!("Failed to insert category '{}'", category.name))?;
        category.id = Some(self.conn.last_insert_rowid());
        Ok(category)
    }

    fn update_category(&mut self, id: i64, patch: &CategoryPatch) -> Result<Option<Category>> {
        let Some(mut category) = self.get_category_by_id(id)? else {
            return Ok(None);
        };
        patch.apply(&mut category);
        self.conn.execute(
            "UPDATE categories SET name = ?1, budget = ?2, active = ?3 WHERE id = ?4",
            params![
                category.name,
                category.budget.map(|b| b.to_string()),
                category.active,
                id,
            ],
        )?;
        Ok(Some(category))
    }

    fn delete_category(&mut self, id: i64) -> Result<bool> {
        let n = self
            .conn
            .execute("DELETE FROM categories WHERE id = ?1", params![id])?;
        Ok(n > 0)
    }
}

// ── Expenses ──────────────────────────────────────────────────

impl ExpenseStore for Database {
    fn get_expenses(&self) -> Result<Vec<Expense>> {
        let mut stmt = self.conn.prepare(&format!(
            "SELECT {EXPENSE_COLUMNS} FROM expenses ORDER BY date DESC, id DESC"
        ))?;
        let rows = stmt.query_map([], expense_from_row)?;
        Ok(rows.collect::<std::result::Result<Vec<_>, _>>()?)
    }

    fn get_expenses_for_month(&self, month: YearMonth) -> Result<Vec<Expense>> {
        let mut stmt = self.conn.prepare(&format!(
            "SELECT {EXPENSE_COLUMNS} FROM expenses WHERE date LIKE ?1 ORDER BY date DESC, id DESC"
        ))?;
        let rows = stmt.query_map(params![format!("{month}-%")], expense_from_row)?;
        Ok(rows.collect::<std::result::Result<Vec<_>, _>>()?)
    }

    fn insert_expense(&mut self, mut expense: Expense) -> Result<Expense> {
        self.conn.execute(
            "INSERT INTO expenses (date, amount, category, payment_method, description, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            params![
                format_date(expense.date),
                expense.amount.to_string(),
                expense.category,
                expense.payment_method,
                expense.description,
                expense.created_at,
            ],
        )?;
        expense.id = Some(self.conn.last_insert_rowid());
        Ok(expense)
    }

    fn insert_expenses(&mut self, expenses: Vec<Expense>) -> Result<Vec<Expense>> {
        let tx = self.conn.transaction()?;
        let mut stored = Vec::with_capacity(expenses.len());
        for mut expense in expenses {
            tx.execute(
                "INSERT INTO expenses (date, amount, category, payment_method, description, created_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
                params![
                    format_date(expense.date),
                    expense.amount.to_string(),
                    expense.category,
                    expense.payment_method,
                    expense.description,
                    expense.created_at,
                ],
            )?;
            expense.id = Some(tx.last_insert_rowid());
            stored.push(expense);
        }
        tx.commit()?;
        Ok(stored)
    }

    fn update_expense(&mut self, id: i64, patch: &ExpensePatch) -> Result<Option<Expense>> {
        let Some(mut expense) = self.get_expense_by_id(id)? else {
            return Ok(None);
        };
        patch.apply(&mut expense);
        self.conn.execute(
            "UPDATE expenses SET date = ?1, amount = ?2, category = ?3, payment_method = ?4, description = ?5
             WHERE id = ?6",
            params![
                format_date(expense.date),
                expense.amount.to_string(),
                expense.category,
                expense.payment_method,
                expense.description,
                id,
            ],
        )?;
        Ok(Some(expense))
    }

    fn delete_expense(&mut self, id: i64) -> Result<bool> {
        let n = self
            .conn
            .execute("DELETE FROM expenses WHERE id = ?1", params![id])?;
        Ok(n > 0)
    }

    fn count_expenses_in_category(&self, name: &str) -> Result<usize> {
        // = is case-sensitive here; the column has no NOCASE collation
        let count: i64 = self.conn.query_row(
            "SELECT COUNT(*) FROM expenses WHERE category = ?1",
            params![name],
            |row| row.get(0),
        )?;
        Ok(usize::try_from(count).unwrap_or_default())
    }
}

// ── Recurring ─────────────────────────────────────────────────

impl RecurringStore for Database {
    fn get_recurring(&self) -> Result<Vec<RecurringTemplate>> {
        let mut stmt = self.conn.prepare(&format!(
            "SELECT {RECURRING_COLUMNS} FROM recurring ORDER BY day_of_month, id"
        ))?;
        let rows = stmt.query_map([], recurring_from_row)?;
        Ok(rows.collect::<std::result::Result<Vec<_>, _>>()?)
    }

    fn insert_recurring(&mut self, mut template: RecurringTemplate) -> Result<RecurringTemplate> {
        self.conn.execute(
            "INSERT INTO recurring (amount, category, payment_method, description, day_of_month, active, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
            params![
                template.amount.to_string(),
                template.category,
                template.payment_method,
                template.description,
                template.day_of_month,
                template.active,
                template.created_at,
            ],
        )?;
        template.id = Some(self.conn.last_insert_rowid());
        Ok(template)
    }

    fn update_recurring(
        &mut self,
        id: i64,
        patch: &RecurringPatch,
    ) -> Result<Option<RecurringTemplate>> {
        let Some(mut template) = self.get_recurring_by_id(id)? else {
            return Ok(None);
        };
        patch.apply(&mut template);
        self.conn.execute(
            "UPDATE recurring SET amount = ?1, category = ?2, payment_method = ?3, description = ?4,
                    day_of_month = ?5, active = ?6
             WHERE id = ?7",
            params![
                template.amount.to_string(),
                template.category,
                template.payment_method,
                template.description,
                template.day_of_month,
                template.active,
                id,
            ],
        )?;
        Ok(Some(template))
    }

    fn delete_recurring(&mut self, id: i64) -> Result<bool> {
        let n = self
            .conn
            .execute("DELETE FROM recurring WHERE id = ?1", params![id])?;
        Ok(n > 0)
    }
}

impl RecordStore for Database {
    fn clear_all(&mut self) -> Result<()> {
        let tx = self.conn.transaction()?;
        tx.execute_batch(
            "DELETE FROM expenses; DELETE FROM recurring; DELETE FROM categories;",
        )?;
        tx.commit()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests;
