//! Per-member balances and the settlement plan against the treasury.
//!
//! Balances are signed:
//! - positive: the treasury owes the member (reimbursement)
//! - negative: the member owes the treasury (contribution)
//!
//! ```text
//! balance = paid - received + contributed - share
//! ```
//!
//! - `paid`: reimbursable expenses the member paid
//! - `received`: contributions collected on expenses the member paid
//! - `contributed`: what the member gave towards other members' expenses (at
//!   most one entry per expense)
//! - `share`: the share per person, contributing members only
//!
//! Members are matched by name. A name that is not in the member list has a
//! zero balance.

use std::collections::{HashMap, HashSet};

use serde::Serialize;

use crate::{Expense, Member, MemberType, Money, Snapshot, totals::share_per_person};

/// Balance breakdown of a single member.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MemberBalance {
    pub member: String,
    #[serde(rename = "type")]
    pub kind: MemberType,
    pub paid: Money,
    pub received: Money,
    pub contributed: Money,
    pub share: Money,
    pub balance: Money,
}

/// One line of the settlement plan. `amount` is never negative.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct SettlementLine {
    pub member: String,
    pub amount: Money,
}

/// Members split between who pays into the treasury and who is paid out.
///
/// Settled members (zero balance) appear in neither list.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SettlementPlan {
    pub to_contribute: Vec<SettlementLine>,
    pub to_reimburse: Vec<SettlementLine>,
}

impl SettlementPlan {
    #[must_use]
    pub fn is_settled(&self) -> bool {
        self.to_contribute.is_empty() && self.to_reimburse.is_empty()
    }

    /// Money flowing into the treasury.
    #[must_use]
    pub fn total_to_contribute(&self) -> Money {
        Money::total(self.to_contribute.iter().map(|l| l.amount))
    }

    /// Money flowing out of the treasury.
    #[must_use]
    pub fn total_to_reimburse(&self) -> Money {
        Money::total(self.to_reimburse.iter().map(|l| l.amount))
    }
}

#[derive(Default)]
struct Ledger {
    paid: Money,
    received: Money,
    contributed: Money,
}

fn accumulate(slot: &mut Money, amount: Money) {
    *slot = slot.checked_add(amount).unwrap_or_else(|| {
        tracing::warn!("balance term overflowed, normalized to zero");
        Money::ZERO
    });
}

fn resolve(member: &Member, ledger: &Ledger, share_per_person: Money) -> MemberBalance {
    let share = match member.kind {
        MemberType::Contributing => share_per_person,
        MemberType::ReimbursementOnly => Money::ZERO,
    };
    let balance = ledger
        .paid
        .checked_sub(ledger.received)
        .and_then(|b| b.checked_add(ledger.contributed))
        .and_then(|b| b.checked_sub(share))
        .unwrap_or_else(|| {
            tracing::warn!(member = %member.name, "balance overflowed, normalized to zero");
            Money::ZERO
        });

    MemberBalance {
        member: member.name.clone(),
        kind: member.kind,
        paid: ledger.paid,
        received: ledger.received,
        contributed: ledger.contributed,
        share,
        balance,
    }
}

fn ledger_of(expenses: &[Expense], name: &str) -> Ledger {
    let mut ledger = Ledger::default();
    for expense in expenses {
        if expense.paid_by == name {
            if !expense.opt_out {
                accumulate(&mut ledger.paid, expense.amount);
            }
            accumulate(&mut ledger.received, expense.total_contributions());
        }
        if let Some(contribution) = expense.contribution_of(name) {
            accumulate(&mut ledger.contributed, contribution.amount);
        }
    }
    ledger
}

/// Balance breakdown of `name`, `None` when no member bears that name.
pub fn member_balance(snapshot: Snapshot<'_>, name: &str) -> Option<MemberBalance> {
    let member = snapshot.member(name)?;
    let ledger = ledger_of(snapshot.expenses, name);
    Some(resolve(member, &ledger, share_per_person(snapshot)))
}

/// Signed balance of `name`; zero for an unknown name.
pub fn balance_of(snapshot: Snapshot<'_>, name: &str) -> Money {
    member_balance(snapshot, name).map_or(Money::ZERO, |b| b.balance)
}

/// Balance breakdown of every member, in member order.
///
/// Computed in a single pass over the expenses.
pub fn balances(snapshot: Snapshot<'_>) -> Vec<MemberBalance> {
    let mut ledgers: HashMap<&str, Ledger> = snapshot
        .members
        .iter()
        .map(|m| (m.name.as_str(), Ledger::default()))
        .collect();

    let mut seen: HashSet<&str> = HashSet::new();
    for expense in snapshot.expenses {
        if let Some(ledger) = ledgers.get_mut(expense.paid_by.as_str()) {
            if !expense.opt_out {
                accumulate(&mut ledger.paid, expense.amount);
            }
            accumulate(&mut ledger.received, expense.total_contributions());
        }

        seen.clear();
        for contributor in &expense.contributors {
            // Only the first entry of a name counts for an expense.
            if !seen.insert(contributor.name.as_str()) {
                continue;
            }
            if let Some(ledger) = ledgers.get_mut(contributor.name.as_str()) {
                accumulate(&mut ledger.contributed, contributor.amount);
            }
        }
    }

    let share = share_per_person(snapshot);
    snapshot
        .members
        .iter()
        .map(|member| {
            let ledger = ledgers.get(member.name.as_str());
            match ledger {
                Some(ledger) => resolve(member, ledger, share),
                None => resolve(member, &Ledger::default(), share),
            }
        })
        .collect()
}

/// Partitions members into who must contribute and who must be reimbursed.
pub fn settlement_plan(snapshot: Snapshot<'_>) -> SettlementPlan {
    let mut plan = SettlementPlan::default();
    for entry in balances(snapshot) {
        if entry.balance.is_negative() {
            plan.to_contribute.push(SettlementLine {
                member: entry.member,
                amount: entry.balance.abs(),
            });
        } else if entry.balance.is_positive() {
            plan.to_reimburse.push(SettlementLine {
                member: entry.member,
                amount: entry.balance,
            });
        }
    }
    tracing::debug!(
        to_contribute = plan.to_contribute.len(),
        to_reimburse = plan.to_reimburse.len(),
        "settlement plan resolved"
    );
    plan
}
