use thiserror::Error;

/// Validation and integrity failures raised by the ledger.
///
/// Storage and I/O failures travel as plain `anyhow` errors; these are the
/// ones callers may want to match on.
#[derive(Debug, Error, PartialEq)]
pub(crate) enum LedgerError {
    #[error("Amount must be greater than zero")]
    InvalidAmount,
    #[error("{0} is required")]
    MissingField(&'static str),
    #[error("Day of month must be between 1 and 31, got {0}")]
    InvalidDayOfMonth(u32),
    #[error("Category '{0}' already exists")]
    DuplicateCategory(String),
    #[error("Unknown category '{0}'")]
    UnknownCategory(String),
    #[error("Category '{name}' is used by {count} expense(s)")]
    CategoryInUse { name: String, count: usize },
    #[error("{kind} #{id} not found")]
    NotFound { kind: &'static str, id: i64 },
}
