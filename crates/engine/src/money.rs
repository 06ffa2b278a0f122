use std::{
    fmt,
    iter::Sum,
    ops::{Add, AddAssign, Neg, Sub, SubAssign},
    str::FromStr,
};

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

use crate::{Currency, EngineError};

/// Fraction digits kept when an amount is presented.
const PRESENTATION_DP: u32 = 2;

/// Signed exact decimal money amount.
///
/// Use this type for **all** monetary values in the engine (expense amounts,
/// contributions, donations, balances, shares) to avoid floating-point drift.
/// Arithmetic is exact; rounding (half-up, 2 fraction digits) only happens
/// when an amount is presented, see [`Money::rounded`] and the `Display`
/// implementation.
///
/// # Examples
///
/// ```rust
/// use engine::Money;
///
/// let amount = Money::from_cents(12_34);
/// assert_eq!(amount.to_string(), "12.34");
/// assert_eq!(amount.format(engine::Currency::Usd), "$12.34");
/// ```
///
/// Parsing from user input (accepts `.` or `,` as decimal separator; rejects >
/// 2 decimals):
///
/// ```rust
/// use engine::Money;
///
/// assert_eq!("10".parse::<Money>().unwrap(), Money::from_cents(1000));
/// assert_eq!("10,5".parse::<Money>().unwrap(), Money::from_cents(1050));
/// assert!("12.345".parse::<Money>().is_err());
/// assert!("NaN".parse::<Money>().is_err());
/// ```
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Money(Decimal);

impl Money {
    pub const ZERO: Money = Money(Decimal::ZERO);

    /// Wraps an exact decimal value.
    #[must_use]
    pub const fn new(value: Decimal) -> Self {
        Self(value)
    }

    /// Creates an amount from integer cents.
    #[must_use]
    pub fn from_cents(cents: i64) -> Self {
        Self(Decimal::new(cents, PRESENTATION_DP))
    }

    /// Returns the exact decimal value.
    #[must_use]
    pub const fn decimal(self) -> Decimal {
        self.0
    }

    /// Returns `true` if the amount is 0.
    #[must_use]
    pub fn is_zero(self) -> bool {
        self.0.is_zero()
    }

    /// Returns `true` if the amount is strictly positive.
    #[must_use]
    pub fn is_positive(self) -> bool {
        self.0 > Decimal::ZERO
    }

    /// Returns `true` if the amount is strictly negative.
    #[must_use]
    pub fn is_negative(self) -> bool {
        self.0 < Decimal::ZERO
    }

    #[must_use]
    pub fn abs(self) -> Self {
        Self(self.0.abs())
    }

    /// Checked addition (returns `None` when the decimal range overflows).
    #[must_use]
    pub fn checked_add(self, rhs: Money) -> Option<Money> {
        self.0.checked_add(rhs.0).map(Money)
    }

    /// Checked subtraction (returns `None` when the decimal range overflows).
    #[must_use]
    pub fn checked_sub(self, rhs: Money) -> Option<Money> {
        self.0.checked_sub(rhs.0).map(Money)
    }

    /// Splits the amount in `parts` equal shares.
    ///
    /// Returns `None` for zero parts or when the division cannot be
    /// represented.
    #[must_use]
    pub fn checked_split(self, parts: usize) -> Option<Money> {
        if parts == 0 {
            return None;
        }
        let divisor = Decimal::from(u64::try_from(parts).ok()?);
        self.0.checked_div(divisor).map(Money)
    }

    /// Sums amounts exactly.
    ///
    /// An overflow of the decimal range means the stored amounts are corrupted:
    /// the whole sum degrades to zero instead of panicking.
    pub fn total<I>(amounts: I) -> Money
    where
        I: IntoIterator<Item = Money>,
    {
        amounts
            .into_iter()
            .try_fold(Money::ZERO, Money::checked_add)
            .unwrap_or_else(|| {
                tracing::warn!("amount sum overflowed, normalized to zero");
                Money::ZERO
            })
    }

    /// Returns the amount rounded half-up to 2 fraction digits.
    #[must_use]
    pub fn rounded(self) -> Money {
        let mut value = self
            .0
            .round_dp_with_strategy(PRESENTATION_DP, RoundingStrategy::MidpointAwayFromZero);
        if value.is_zero() {
            value = Decimal::ZERO;
        }
        value.rescale(PRESENTATION_DP);
        Money(value)
    }

    /// Formats the rounded amount with the currency symbol, e.g. `-$25.00`.
    #[must_use]
    pub fn format(self, currency: Currency) -> String {
        let rounded = self.rounded();
        let sign = if rounded.is_negative() { "-" } else { "" };
        format!("{sign}{}{}", currency.symbol(), rounded.abs())
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.rounded().0)
    }
}

impl From<Decimal> for Money {
    fn from(value: Decimal) -> Self {
        Self(value)
    }
}

impl From<Money> for Decimal {
    fn from(value: Money) -> Self {
        value.0
    }
}

/// `+` and `-` never panic: a result outside the decimal range is
/// normalized to zero, like [`Money::total`].
fn or_zero(result: Option<Money>, op: &'static str) -> Money {
    result.unwrap_or_else(|| {
        tracing::warn!(op, "amount overflowed, normalized to zero");
        Money::ZERO
    })
}

impl Add for Money {
    type Output = Money;

    fn add(self, rhs: Money) -> Self::Output {
        or_zero(self.checked_add(rhs), "add")
    }
}

impl AddAssign for Money {
    fn add_assign(&mut self, rhs: Money) {
        *self = *self + rhs;
    }
}

impl Sub for Money {
    type Output = Money;

    fn sub(self, rhs: Money) -> Self::Output {
        or_zero(self.checked_sub(rhs), "sub")
    }
}

impl SubAssign for Money {
    fn sub_assign(&mut self, rhs: Money) {
        *self = *self - rhs;
    }
}

impl Neg for Money {
    type Output = Money;

    fn neg(self) -> Self::Output {
        Money(-self.0)
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        Money::total(iter)
    }
}

impl<'a> Sum<&'a Money> for Money {
    fn sum<I: Iterator<Item = &'a Money>>(iter: I) -> Self {
        Money::total(iter.copied())
    }
}

impl FromStr for Money {
    type Err = EngineError;

    /// Parses a decimal string.
    ///
    /// Accepts `.` or `,` as decimal separator and an optional leading `+`/`-`.
    ///
    /// Validation rules:
    /// - max 2 fractional digits (rejects `12.345`)
    /// - digits only, so `NaN`, `inf` and exponents are rejected
    /// - rejects empty strings
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let empty = || EngineError::InvalidAmount("empty amount".to_string());
        let invalid = || EngineError::InvalidAmount("invalid amount".to_string());

        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(empty());
        }

        let (negative, rest) = if let Some(stripped) = trimmed.strip_prefix('-') {
            (true, stripped)
        } else if let Some(stripped) = trimmed.strip_prefix('+') {
            (false, stripped)
        } else {
            (false, trimmed)
        };

        let rest = rest.trim().replace(',', ".");
        if rest.is_empty() {
            return Err(empty());
        }

        let mut parts = rest.split('.');
        let units = parts.next().ok_or_else(invalid)?;
        let fraction = parts.next().unwrap_or("");
        if parts.next().is_some() {
            return Err(invalid());
        }
        if units.is_empty() || !units.chars().all(|c| c.is_ascii_digit()) {
            return Err(invalid());
        }
        if !fraction.chars().all(|c| c.is_ascii_digit()) {
            return Err(invalid());
        }
        if fraction.len() > PRESENTATION_DP as usize {
            return Err(EngineError::InvalidAmount("too many decimals".to_string()));
        }

        let normalized = if fraction.is_empty() {
            units.to_string()
        } else {
            format!("{units}.{fraction}")
        };
        let value = Decimal::from_str(&normalized)
            .map_err(|_| EngineError::InvalidAmount("amount too large".to_string()))?;

        Ok(Money(if negative { -value } else { value }))
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal_macros::dec;

    use super::*;

    #[test]
    fn display_rounds_half_up_to_cents() {
        assert_eq!(Money::ZERO.to_string(), "0.00");
        assert_eq!(Money::new(dec!(0.005)).to_string(), "0.01");
        assert_eq!(Money::new(dec!(0.004)).to_string(), "0.00");
        assert_eq!(Money::new(dec!(-0.005)).to_string(), "-0.01");
        assert_eq!(Money::new(dec!(-0.001)).to_string(), "0.00");
        assert_eq!(Money::new(dec!(10.5)).to_string(), "10.50");
        assert_eq!(Money::new(dec!(33.3333333)).to_string(), "33.33");
    }

    #[test]
    fn format_puts_sign_before_symbol() {
        assert_eq!(Money::from_cents(2500).format(Currency::Usd), "$25.00");
        assert_eq!(Money::from_cents(-2500).format(Currency::Usd), "-$25.00");
        assert_eq!(Money::from_cents(1050).format(Currency::Eur), "€10.50");
    }

    #[test]
    fn parse_accepts_dot_or_comma() {
        assert_eq!("10".parse::<Money>().unwrap(), Money::from_cents(1000));
        assert_eq!("10.5".parse::<Money>().unwrap(), Money::from_cents(1050));
        assert_eq!("10,50".parse::<Money>().unwrap(), Money::from_cents(1050));
        assert_eq!("-0.01".parse::<Money>().unwrap(), Money::from_cents(-1));
        assert_eq!("+1.00".parse::<Money>().unwrap(), Money::from_cents(100));
        assert_eq!("  2.30 ".parse::<Money>().unwrap(), Money::from_cents(230));
    }

    #[test]
    fn parse_rejects_garbage() {
        for raw in ["", "  ", "-", "abc", "NaN", "inf", "1e3", "1.2.3", ".5", "12.345"] {
            assert!(raw.parse::<Money>().is_err(), "{raw:?} should be rejected");
        }
    }

    #[test]
    fn split_by_zero_parts_is_none() {
        assert_eq!(Money::from_cents(10_000).checked_split(0), None);
        assert_eq!(
            Money::from_cents(10_000).checked_split(4),
            Some(Money::from_cents(2500))
        );
    }

    #[test]
    fn total_normalizes_overflow_to_zero() {
        let huge = Money::new(Decimal::MAX);
        assert_eq!(Money::total([huge, huge]), Money::ZERO);
        assert_eq!(
            Money::total([Money::from_cents(1), Money::from_cents(2)]),
            Money::from_cents(3)
        );
    }

    #[test]
    fn operators_normalize_overflow_to_zero() {
        let huge = Money::new(Decimal::MAX);
        assert_eq!(huge + huge, Money::ZERO);
        assert_eq!(-huge - huge, Money::ZERO);

        let mut acc = huge;
        acc += huge;
        assert_eq!(acc, Money::ZERO);
        let mut acc = -huge;
        acc -= huge;
        assert_eq!(acc, Money::ZERO);

        assert_eq!(
            Money::from_cents(150) - Money::from_cents(200),
            Money::from_cents(-50)
        );
    }
}
