//! The module contains `Member` and its type tag.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// How a member takes part in the pooled expenses.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum MemberType {
    /// Shares the reimbursable expenses equally with the other contributing
    /// members.
    #[default]
    Contributing,
    /// Can pay or be paid, but never owes a share.
    ReimbursementOnly,
}

impl MemberType {
    /// Returns the canonical string used in snapshots.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Contributing => "contributing",
            Self::ReimbursementOnly => "reimbursementOnly",
        }
    }

    /// Label shown to users.
    pub fn display_name(self) -> &'static str {
        match self {
            Self::Contributing => "Contributing",
            Self::ReimbursementOnly => "Reimbursement Only",
        }
    }
}

/// A member of an event.
///
/// The name is the join key used by expenses (`paid_by`) and contributors,
/// not the id: it is unique within an event.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Member {
    pub id: Uuid,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: MemberType,
}

impl Member {
    pub fn new(name: impl Into<String>, kind: MemberType) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            kind,
        }
    }

    #[must_use]
    pub fn is_contributing(&self) -> bool {
        self.kind == MemberType::Contributing
    }
}
