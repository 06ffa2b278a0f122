//! The module contains the `Event` aggregate and its read-only `Snapshot`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{Currency, Donation, Expense, Member};

/// An event: the aggregate root owning members, expenses and donations.
///
/// Children never outlive the event and are never shared between events.
/// Mutations go through the `Event` methods, which validate the
/// input and refresh `last_modified`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    pub id: Uuid,
    pub name: String,
    #[serde(default)]
    pub currency: Currency,
    pub created_at: DateTime<Utc>,
    pub last_modified: DateTime<Utc>,
    #[serde(default)]
    pub members: Vec<Member>,
    #[serde(default)]
    pub expenses: Vec<Expense>,
    #[serde(default)]
    pub donations: Vec<Donation>,
}

impl Event {
    /// Borrow the three collections as a snapshot for the pure functions.
    #[must_use]
    pub fn snapshot(&self) -> Snapshot<'_> {
        Snapshot {
            members: &self.members,
            expenses: &self.expenses,
            donations: &self.donations,
        }
    }

    pub fn contributing_members(&self) -> impl Iterator<Item = &Member> {
        self.members.iter().filter(|m| m.is_contributing())
    }

    pub fn reimbursement_members(&self) -> impl Iterator<Item = &Member> {
        self.members.iter().filter(|m| !m.is_contributing())
    }

    pub(crate) fn touch(&mut self) {
        self.last_modified = Utc::now();
    }
}

/// Immutable view over the collections of an event.
///
/// Every aggregation and balance function takes a snapshot as sole input.
#[derive(Clone, Copy, Debug)]
pub struct Snapshot<'a> {
    pub members: &'a [Member],
    pub expenses: &'a [Expense],
    pub donations: &'a [Donation],
}

impl<'a> Snapshot<'a> {
    #[must_use]
    pub fn new(members: &'a [Member], expenses: &'a [Expense], donations: &'a [Donation]) -> Self {
        Self {
            members,
            expenses,
            donations,
        }
    }

    /// Looks a member up by its (join key) name.
    #[must_use]
    pub fn member(&self, name: &str) -> Option<&'a Member> {
        self.members.iter().find(|m| m.name == name)
    }

    pub fn contributing_members(self) -> impl Iterator<Item = &'a Member> {
        self.members.iter().filter(|m| m.is_contributing())
    }
}
