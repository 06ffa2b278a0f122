//! The module contains the errors the engine can return.
//!
//! Every error is a validation failure raised at the point of mutation:
//!
//! - [`EmptyName`] a member name or an expense description is blank.
//! - [`ExistingKey`] a member with the same name is already present.
//! - [`KeyNotFound`] a member, expense, contributor or donation is missing.
//! - [`InvalidAmount`] an amount is not a positive, finite decimal.
//! - [`ContributionExceedsRemaining`] a contributor would push the
//!   contributions of an expense above its amount.
//!
//! Aggregation and balance functions never fail: degenerate inputs resolve to
//! a zero amount instead.
//!
//!  [`EmptyName`]: EngineError::EmptyName
//!  [`ExistingKey`]: EngineError::ExistingKey
//!  [`KeyNotFound`]: EngineError::KeyNotFound
//!  [`InvalidAmount`]: EngineError::InvalidAmount
//!  [`ContributionExceedsRemaining`]: EngineError::ContributionExceedsRemaining
use thiserror::Error;

use crate::Money;

/// Engine custom errors.
#[derive(Error, Debug)]
pub enum EngineError {
    #[error("{0} must not be empty")]
    EmptyName(String),
    #[error("\"{0}\" already present!")]
    ExistingKey(String),
    #[error("\"{0}\" key not found!")]
    KeyNotFound(String),
    #[error("Invalid amount: {0}")]
    InvalidAmount(String),
    #[error("Invalid expense: {0}")]
    InvalidExpense(String),
    #[error("Invalid contributor: {0}")]
    InvalidContributor(String),
    #[error("Contribution of {amount} exceeds remaining amount {remaining}")]
    ContributionExceedsRemaining { amount: Money, remaining: Money },
    #[error(transparent)]
    Csv(#[from] csv::Error),
}

impl PartialEq for EngineError {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::EmptyName(a), Self::EmptyName(b)) => a == b,
            (Self::ExistingKey(a), Self::ExistingKey(b)) => a == b,
            (Self::KeyNotFound(a), Self::KeyNotFound(b)) => a == b,
            (Self::InvalidAmount(a), Self::InvalidAmount(b)) => a == b,
            (Self::InvalidExpense(a), Self::InvalidExpense(b)) => a == b,
            (Self::InvalidContributor(a), Self::InvalidContributor(b)) => a == b,
            (
                Self::ContributionExceedsRemaining {
                    amount: a,
                    remaining: ra,
                },
                Self::ContributionExceedsRemaining {
                    amount: b,
                    remaining: rb,
                },
            ) => a == b && ra == rb,
            (Self::Csv(a), Self::Csv(b)) => a.to_string() == b.to_string(),
            _ => false,
        }
    }
}
