//! Mutations of an [`Event`].
//!
//! Every method validates its input first, then mutates, then refreshes
//! `last_modified`. A rejected mutation leaves the event untouched.

use chrono::Utc;
use uuid::Uuid;

use crate::{Currency, EngineError, Event, ResultEngine};

mod donations;
mod expenses;
mod members;

impl Event {
    /// Create an empty event.
    pub fn new(name: &str) -> ResultEngine<Self> {
        let name = normalize_required_name(name, "event")?;
        let now = Utc::now();
        Ok(Self {
            id: Uuid::new_v4(),
            name,
            currency: Currency::default(),
            created_at: now,
            last_modified: now,
            members: Vec::new(),
            expenses: Vec::new(),
            donations: Vec::new(),
        })
    }

    /// Set the currency used to present amounts.
    #[must_use]
    pub fn with_currency(mut self, currency: Currency) -> Self {
        self.currency = currency;
        self
    }

    pub fn rename(&mut self, name: &str) -> ResultEngine<()> {
        self.name = normalize_required_name(name, "event")?;
        self.touch();
        Ok(())
    }
}

fn normalize_required_name(value: &str, label: &str) -> ResultEngine<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(EngineError::EmptyName(format!("{label} name")));
    }
    Ok(trimmed.to_string())
}
