//! Command structs for event mutations.
//!
//! These types group the parameters of write operations, keeping call sites
//! readable and avoiding long argument lists.

use chrono::{DateTime, Utc};

use crate::Money;

/// Create an expense.
#[derive(Clone, Debug)]
pub struct NewExpense {
    pub description: String,
    pub amount: Money,
    pub paid_by: String,
    pub notes: String,
    pub opt_out: bool,
    pub date: DateTime<Utc>,
}

impl NewExpense {
    #[must_use]
    pub fn new(description: impl Into<String>, amount: Money, paid_by: impl Into<String>) -> Self {
        Self {
            description: description.into(),
            amount,
            paid_by: paid_by.into(),
            notes: String::new(),
            opt_out: false,
            date: Utc::now(),
        }
    }

    #[must_use]
    pub fn notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = notes.into();
        self
    }

    /// Mark the expense as non-reimbursable.
    #[must_use]
    pub fn opt_out(mut self, opt_out: bool) -> Self {
        self.opt_out = opt_out;
        self
    }

    #[must_use]
    pub fn date(mut self, date: DateTime<Utc>) -> Self {
        self.date = date;
        self
    }
}
