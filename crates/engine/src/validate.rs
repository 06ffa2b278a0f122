//! Validation rules for event mutations.
//!
//! The `Event` mutation methods run these checks before touching an
//! event; external mutation layers can call them directly. Aggregation and
//! balance functions never re-validate: they assume a consistent snapshot.

use std::collections::{HashMap, HashSet};

use rust_decimal::{Decimal, RoundingStrategy, prelude::FromPrimitive};

use crate::{
    EngineError, Expense, Member, MemberType, Money, NewExpense, ResultEngine, Snapshot,
};

/// Trim a member name and check it is non-empty and not already taken.
///
/// Uniqueness is a case-sensitive exact match.
pub fn member_name(members: &[Member], raw: &str) -> ResultEngine<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(EngineError::EmptyName("member name".to_string()));
    }
    if members.iter().any(|m| m.name == trimmed) {
        return Err(EngineError::ExistingKey(trimmed.to_string()));
    }
    Ok(trimmed.to_string())
}

/// Ensure an amount is strictly positive.
pub fn positive_amount(amount: Money) -> ResultEngine<Money> {
    if !amount.is_positive() {
        return Err(EngineError::InvalidAmount(format!(
            "amount must be > 0, got {amount}"
        )));
    }
    Ok(amount)
}

/// Parse user input into a strictly positive amount.
pub fn amount(raw: &str) -> ResultEngine<Money> {
    positive_amount(raw.parse()?)
}

/// Convert a float coming from an outer layer into a strictly positive amount.
///
/// Non-finite values are rejected; finite ones are rounded half-up to cents.
pub fn amount_from_f64(value: f64) -> ResultEngine<Money> {
    if !value.is_finite() {
        return Err(EngineError::InvalidAmount(format!(
            "amount must be finite, got {value}"
        )));
    }
    let decimal = Decimal::from_f64(value)
        .ok_or_else(|| EngineError::InvalidAmount(format!("amount out of range: {value}")))?;
    positive_amount(Money::new(
        decimal.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero),
    ))
}

/// Check an expense before it is added to an event.
pub fn expense(members: &[Member], cmd: &NewExpense) -> ResultEngine<()> {
    if cmd.description.trim().is_empty() {
        return Err(EngineError::EmptyName("expense description".to_string()));
    }
    positive_amount(cmd.amount)?;
    if cmd.paid_by.is_empty() {
        return Err(EngineError::InvalidExpense(
            "payer must be selected".to_string(),
        ));
    }
    if !members.iter().any(|m| m.name == cmd.paid_by) {
        return Err(EngineError::KeyNotFound(cmd.paid_by.clone()));
    }
    Ok(())
}

/// Check a contributor before it is attached to `expense`.
///
/// The contributor must be a contributing member other than the payer, must
/// not already contribute to the expense, and the amount must fit in what is
/// left of the expense.
pub fn contributor(
    members: &[Member],
    expense: &Expense,
    name: &str,
    amount: Money,
) -> ResultEngine<()> {
    if expense.opt_out {
        return Err(EngineError::InvalidContributor(format!(
            "expense '{}' is not reimbursable",
            expense.description
        )));
    }
    let member = members
        .iter()
        .find(|m| m.name == name)
        .ok_or_else(|| EngineError::KeyNotFound(name.to_string()))?;
    if !member.is_contributing() {
        return Err(EngineError::InvalidContributor(format!(
            "'{name}' is not a contributing member"
        )));
    }
    if expense.paid_by == name {
        return Err(EngineError::InvalidContributor(format!(
            "'{name}' paid the expense"
        )));
    }
    if expense.contribution_of(name).is_some() {
        return Err(EngineError::InvalidContributor(format!(
            "'{name}' already contributes to the expense"
        )));
    }
    positive_amount(amount)?;

    let remaining = expense.remaining_amount();
    if amount > remaining {
        return Err(EngineError::ContributionExceedsRemaining { amount, remaining });
    }
    Ok(())
}

/// Audit a loaded snapshot against every mutation rule.
///
/// Returns all the issues found; an empty list means the snapshot could have
/// been built through the validated mutation methods.
pub fn snapshot(snapshot: Snapshot<'_>) -> Vec<EngineError> {
    let mut issues = Vec::new();

    let mut kinds = HashMap::new();
    for member in snapshot.members {
        if member.name.trim().is_empty() {
            issues.push(EngineError::EmptyName("member name".to_string()));
        } else if kinds.contains_key(member.name.as_str()) {
            issues.push(EngineError::ExistingKey(member.name.clone()));
        } else {
            kinds.insert(member.name.as_str(), member.kind);
        }
    }

    for expense in snapshot.expenses {
        if expense.description.trim().is_empty() {
            issues.push(EngineError::EmptyName("expense description".to_string()));
        }
        if let Err(err) = positive_amount(expense.amount) {
            issues.push(err);
        }
        if !kinds.contains_key(expense.paid_by.as_str()) {
            issues.push(EngineError::KeyNotFound(expense.paid_by.clone()));
        }
        if expense.opt_out && !expense.contributors.is_empty() {
            issues.push(EngineError::InvalidContributor(format!(
                "expense '{}' is not reimbursable",
                expense.description
            )));
        }

        let mut contributors = HashSet::new();
        for entry in &expense.contributors {
            match kinds.get(entry.name.as_str()) {
                None => issues.push(EngineError::KeyNotFound(entry.name.clone())),
                Some(MemberType::ReimbursementOnly) => {
                    issues.push(EngineError::InvalidContributor(format!(
                        "'{}' is not a contributing member",
                        entry.name
                    )));
                }
                Some(MemberType::Contributing) => {}
            }
            if entry.name == expense.paid_by {
                issues.push(EngineError::InvalidContributor(format!(
                    "'{}' paid the expense",
                    entry.name
                )));
            }
            if !contributors.insert(entry.name.as_str()) {
                issues.push(EngineError::InvalidContributor(format!(
                    "'{}' contributes twice to '{}'",
                    entry.name, expense.description
                )));
            }
            if let Err(err) = positive_amount(entry.amount) {
                issues.push(err);
            }
        }
        let contributed = expense.total_contributions();
        if contributed > expense.amount {
            issues.push(EngineError::ContributionExceedsRemaining {
                amount: contributed,
                remaining: expense.amount,
            });
        }
    }

    for donation in snapshot.donations {
        if let Err(err) = positive_amount(donation.amount) {
            issues.push(err);
        }
    }

    issues
}
