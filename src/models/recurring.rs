use rust_decimal::Decimal;

/// Blueprint for an expense generated once a month.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct RecurringTemplate {
    pub(crate) id: Option<i64>,
    pub(crate) amount: Decimal,
    pub(crate) category: String,
    pub(crate) payment_method: String,
    pub(crate) description: String,
    /// 1-31. Days past the end of a month clamp to its last day.
    pub(crate) day_of_month: u32,
    pub(crate) active: bool,
    pub(crate) created_at: String,
}

impl RecurringTemplate {
    pub(crate) fn new(
        amount: Decimal,
        category: String,
        payment_method: String,
        description: String,
        day_of_month: u32,
    ) -> Self {
        Self {
            id: None,
            amount,
            category,
            payment_method,
            description,
            day_of_month,
            active: true,
            created_at: chrono::Utc::now().to_rfc3339(),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub(crate) struct RecurringPatch {
    pub(crate) amount: Option<Decimal>,
    pub(crate) category: Option<String>,
    pub(crate) payment_method: Option<String>,
    pub(crate) description: Option<String>,
    pub(crate) day_of_month: Option<u32>,
    pub(crate) active: Option<bool>,
}

impl RecurringPatch {
    pub(crate) fn apply(&self, template: &mut RecurringTemplate) {
        if let Some(amount) = self.amount {
            template.amount = amount;
        }
        if let Some(category) = &self.category {
            template.category = category.clone();
        }
        if let Some(method) = &self.payment_method {
            template.payment_method = method.clone();
        }
        if let Some(description) = &self.description {
            template.description = description.clone();
        }
        if let Some(day) = self.day_of_month {
            template.day_of_month = day;
        }
        if let Some(active) = self.active {
            template.active = active;
        }
    }
}
