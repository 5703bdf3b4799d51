pub(crate) const SCHEMA_V1: &str = r#"
CREATE TABLE IF NOT EXISTS schema_version (
    version INTEGER NOT NULL
);

CREATE TABLE IF NOT EXISTS categories (
    id      INTEGER PRIMARY KEY AUTOINCREMENT,
    name    TEXT NOT NULL UNIQUE COLLATE NOCASE,
    budget  TEXT,
    active  BOOLEAN NOT NULL DEFAULT 1
);

CREATE TABLE IF NOT EXISTS expenses (
    id              INTEGER PRIMARY KEY AUTOINCREMENT,
    date            TEXT NOT NULL,
    amount          TEXT NOT NULL,
    category        TEXT NOT NULL,
    payment_method  TEXT NOT NULL,
    description     TEXT NOT NULL DEFAULT '',
    created_at      TEXT NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_expenses_date ON expenses(date);
CREATE INDEX IF NOT EXISTS idx_expenses_category ON expenses(category);

CREATE TABLE IF NOT EXISTS recurring (
    id              INTEGER PRIMARY KEY AUTOINCREMENT,
    amount          TEXT NOT NULL,
    category        TEXT NOT NULL,
    payment_method  TEXT NOT NULL,
    description     TEXT NOT NULL DEFAULT '',
    day_of_month    INTEGER NOT NULL CHECK (day_of_month BETWEEN 1 AND 31),
    active          BOOLEAN NOT NULL DEFAULT 1,
    created_at      TEXT NOT NULL
);
"#;

pub(crate) const CURRENT_VERSION: i32 = 1;

/// Migrations from version N to N+1, as (from_version, sql).
pub(crate) const MIGRATIONS: &[(i32, &str)] = &[];

/// Seeded on first open. All start unlimited.
pub(crate) const DEFAULT_CATEGORIES: [&str; 6] = [
    "Food",
    "Transport",
    "Rent",
    "Utilities",
    "Entertainment",
    "Other",
];
