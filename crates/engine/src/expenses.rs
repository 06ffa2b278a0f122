//! The module contains `Expense` and the `Contributor` entries attached to it.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::Money;

/// A direct donation from one member towards a specific expense.
///
/// The money goes from the contributor to the payer of the expense, it never
/// passes through the treasury.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contributor {
    pub id: Uuid,
    pub name: String,
    pub amount: Money,
}

impl Contributor {
    pub fn new(name: impl Into<String>, amount: Money) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            amount,
        }
    }
}

/// An expense paid by a member.
///
/// `opt_out` expenses are logged for record-keeping only and are excluded from
/// the reimbursable pool.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Expense {
    pub id: Uuid,
    pub description: String,
    pub amount: Money,
    pub paid_by: String,
    #[serde(default)]
    pub notes: String,
    #[serde(default)]
    pub opt_out: bool,
    #[serde(default)]
    pub contributors: Vec<Contributor>,
    pub date: DateTime<Utc>,
}

impl Expense {
    pub fn new(
        description: impl Into<String>,
        amount: Money,
        paid_by: impl Into<String>,
        date: DateTime<Utc>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            description: description.into(),
            amount,
            paid_by: paid_by.into(),
            notes: String::new(),
            opt_out: false,
            contributors: Vec::new(),
            date,
        }
    }

    /// Sum of the contributor amounts.
    #[must_use]
    pub fn total_contributions(&self) -> Money {
        Money::total(self.contributors.iter().map(|c| c.amount))
    }

    /// What is left of the amount once contributions are removed, never
    /// negative.
    #[must_use]
    pub fn remaining_amount(&self) -> Money {
        self.amount
            .checked_sub(self.total_contributions())
            .filter(|remaining| remaining.is_positive())
            .unwrap_or(Money::ZERO)
    }

    /// First contributor entry bearing `name`.
    pub fn contribution_of(&self, name: &str) -> Option<&Contributor> {
        self.contributors.iter().find(|c| c.name == name)
    }
}
