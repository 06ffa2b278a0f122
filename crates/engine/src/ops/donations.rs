use chrono::Utc;
use uuid::Uuid;

use crate::{Donation, EngineError, Event, Money, ResultEngine, validate};

impl Event {
    /// Add money to the treasury.
    pub fn add_donation(&mut self, amount: Money, notes: &str) -> ResultEngine<Uuid> {
        let amount = validate::positive_amount(amount)?;
        let donation = Donation::new(amount, notes.trim(), Utc::now());
        let id = donation.id;
        tracing::debug!(%id, %amount, "donation added");
        self.donations.push(donation);
        self.touch();
        Ok(id)
    }

    pub fn remove_donation(&mut self, id: Uuid) -> ResultEngine<Donation> {
        let index = self
            .donations
            .iter()
            .position(|d| d.id == id)
            .ok_or_else(|| EngineError::KeyNotFound(id.to_string()))?;
        let donation = self.donations.remove(index);
        self.touch();
        Ok(donation)
    }
}
