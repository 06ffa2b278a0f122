use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::Money;

/// Money added to the treasury, not tied to any expense.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Donation {
    pub id: Uuid,
    pub amount: Money,
    #[serde(default)]
    pub notes: String,
    pub date: DateTime<Utc>,
}

impl Donation {
    pub fn new(amount: Money, notes: impl Into<String>, date: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            amount,
            notes: notes.into(),
            date,
        }
    }
}
