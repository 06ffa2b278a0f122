//! Event-level aggregation.
//!
//! Pure functions of a [`Snapshot`]. Nothing here fails: a sum that overflows
//! the decimal range or a split with no contributing member resolves to zero.

use serde::Serialize;

use crate::{Money, Snapshot};

/// Sum of every expense amount, opted-out expenses included.
pub fn total_expenses(snapshot: Snapshot<'_>) -> Money {
    Money::total(snapshot.expenses.iter().map(|e| e.amount))
}

/// Sum of the expenses that take part in the reimbursable pool.
pub fn reimbursable_expenses(snapshot: Snapshot<'_>) -> Money {
    Money::total(
        snapshot
            .expenses
            .iter()
            .filter(|e| !e.opt_out)
            .map(|e| e.amount),
    )
}

/// Sum of the treasury donations.
pub fn total_donations(snapshot: Snapshot<'_>) -> Money {
    Money::total(snapshot.donations.iter().map(|d| d.amount))
}

/// Money given member-to-member through contributors.
pub fn direct_contributions(snapshot: Snapshot<'_>) -> Money {
    Money::total(snapshot.expenses.iter().map(|e| e.total_contributions()))
}

/// Reimbursable expenses minus donations. Negative when the treasury holds
/// more than was spent.
pub fn amount_to_share(snapshot: Snapshot<'_>) -> Money {
    offset(reimbursable_expenses(snapshot), total_donations(snapshot))
}

/// Equal share of [`amount_to_share`] owed by each contributing member, zero
/// when there is none.
pub fn share_per_person(snapshot: Snapshot<'_>) -> Money {
    split(amount_to_share(snapshot), snapshot.contributing_members().count())
}

fn offset(reimbursable: Money, donations: Money) -> Money {
    reimbursable.checked_sub(donations).unwrap_or_else(|| {
        tracing::warn!("amount to share overflowed, normalized to zero");
        Money::ZERO
    })
}

fn split(amount: Money, contributing: usize) -> Money {
    if contributing == 0 {
        return Money::ZERO;
    }
    amount.checked_split(contributing).unwrap_or_else(|| {
        tracing::warn!(contributing, "share split failed, normalized to zero");
        Money::ZERO
    })
}

/// All the event totals at once.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Totals {
    pub total_expenses: Money,
    pub reimbursable_expenses: Money,
    pub total_donations: Money,
    pub direct_contributions: Money,
    pub amount_to_share: Money,
    pub share_per_person: Money,
}

impl Totals {
    pub fn compute(snapshot: Snapshot<'_>) -> Self {
        let reimbursable_expenses = reimbursable_expenses(snapshot);
        let total_donations = total_donations(snapshot);
        let amount_to_share = offset(reimbursable_expenses, total_donations);

        Self {
            total_expenses: total_expenses(snapshot),
            reimbursable_expenses,
            total_donations,
            direct_contributions: direct_contributions(snapshot),
            amount_to_share,
            share_per_person: split(amount_to_share, snapshot.contributing_members().count()),
        }
    }

    /// Donations left over once every reimbursable expense is covered.
    ///
    /// `None` unless the amount to share is negative; contributing members are
    /// then owed money instead of owing it.
    #[must_use]
    pub fn treasury_surplus(&self) -> Option<Money> {
        self.amount_to_share
            .is_negative()
            .then(|| self.amount_to_share.abs())
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;
    use crate::{Donation, Expense, Member, MemberType};

    #[test]
    fn surplus_only_when_donations_exceed_spend() {
        let members = vec![Member::new("Alice", MemberType::Contributing)];
        let expenses = vec![Expense::new("Dinner", Money::from_cents(4000), "Alice", Utc::now())];
        let mut donations = vec![Donation::new(Money::from_cents(1000), "", Utc::now())];

        let totals = Totals::compute(Snapshot::new(&members, &expenses, &donations));
        assert_eq!(totals.treasury_surplus(), None);

        donations.push(Donation::new(Money::from_cents(5000), "", Utc::now()));
        let totals = Totals::compute(Snapshot::new(&members, &expenses, &donations));
        assert_eq!(totals.amount_to_share, Money::from_cents(-2000));
        assert_eq!(totals.treasury_surplus(), Some(Money::from_cents(2000)));
    }

    #[test]
    fn compute_matches_individual_functions() {
        let members = vec![
            Member::new("Alice", MemberType::Contributing),
            Member::new("Bob", MemberType::Contributing),
            Member::new("Carol", MemberType::Contributing),
        ];
        let mut lunch = Expense::new("Lunch", Money::from_cents(10_000), "Alice", Utc::now());
        lunch.contributors.push(crate::Contributor::new("Bob", Money::from_cents(1500)));
        let mut gift = Expense::new("Gift", Money::from_cents(2000), "Bob", Utc::now());
        gift.opt_out = true;
        let expenses = vec![lunch, gift];
        let donations = vec![Donation::new(Money::from_cents(700), "", Utc::now())];
        let snapshot = Snapshot::new(&members, &expenses, &donations);

        let totals = Totals::compute(snapshot);
        assert_eq!(totals.total_expenses, total_expenses(snapshot));
        assert_eq!(totals.reimbursable_expenses, reimbursable_expenses(snapshot));
        assert_eq!(totals.total_donations, total_donations(snapshot));
        assert_eq!(totals.direct_contributions, direct_contributions(snapshot));
        assert_eq!(totals.amount_to_share, amount_to_share(snapshot));
        assert_eq!(totals.share_per_person, share_per_person(snapshot));
        assert_eq!(totals.share_per_person, Money::from_cents(3100));
    }
}
