use rust_decimal::Decimal;
use std::str::FromStr;

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Category {
    pub(crate) id: Option<i64>,
    pub(crate) name: String,
    /// `None` means unlimited. `Some(0)` is a hard zero ceiling.
    pub(crate) budget: Option<Decimal>,
    pub(crate) active: bool,
}

impl Category {
    pub(crate) fn new(name: String, budget: Option<Decimal>) -> Self {
        Self {
            id: None,
            name,
            budget,
            active: true,
        }
    }

    /// Find a category by name (case-insensitive) in a slice.
    pub(crate) fn find_by_name<'a>(categories: &'a [Category], name: &str) -> Option<&'a Category> {
        let lower = name.trim().to_lowercase();
        categories.iter().find(|c| c.name.to_lowercase() == lower)
    }

    /// Find a category by ID in a slice.
    pub(crate) fn find_by_id(categories: &[Category], id: i64) -> Option<&Category> {
        categories.iter().find(|c| c.id == Some(id))
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// Partial update for a category. `budget: Some(None)` clears the ceiling.
#[derive(Debug, Clone, Default)]
pub(crate) struct CategoryPatch {
    pub(crate) name: Option<String>,
    pub(crate) budget: Option<Option<Decimal>>,
    pub(crate) active: Option<bool>,
}

impl CategoryPatch {
    pub(crate) fn apply(&self, category: &mut Category) {
        if let Some(name) = &self.name {
            category.name = name.clone();
        }
        if let Some(budget) = self.budget {
            category.budget = budget;
        }
        if let Some(active) = self.active {
            category.active = active;
        }
    }
}

/// Parse user budget input into the tri-state ceiling.
///
/// Blank input is unlimited and `0` is an explicit zero ceiling. Anything
/// that is not a non-negative number falls back to unlimited.
pub(crate) fn parse_budget(input: &str) -> Option<Decimal> {
    let cleaned = input.trim().replace(['$', ','], "");
    if cleaned.is_empty()
        || cleaned.eq_ignore_ascii_case("none")
        || cleaned.eq_ignore_ascii_case("unlimited")
    {
        return None;
    }
    match Decimal::from_str(&cleaned) {
        Ok(amount) if amount >= Decimal::ZERO => Some(amount),
        Ok(amount) => {
            tracing::warn!(%amount, "negative budget treated as unlimited");
            None
        }
        Err(_) => {
            tracing::warn!(input, "unparseable budget treated as unlimited");
            None
        }
    }
}
