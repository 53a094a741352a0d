//! Monetary amounts as exact decimals.

use core::ops::Neg;
use core::str::FromStr;

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

use crate::error::DomainError;
use crate::value_object::ValueObject;

/// Signed monetary amount.
///
/// Backed by `rust_decimal::Decimal`, so sums and differences are exact
/// (`2300 - 2501.5 == -201.5`). No currency is attached. Arithmetic is checked:
/// results that do not fit come back as `None`.
///
/// `Display` renders two decimal places unless a precision is given (`{:.1}`),
/// rounding half away from zero.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Money(Decimal);

impl ValueObject for Money {}

impl Money {
    pub const ZERO: Money = Money(Decimal::ZERO);

    pub const fn new(amount: Decimal) -> Self {
        Self(amount)
    }

    pub fn amount(&self) -> Decimal {
        self.0
    }

    pub fn is_positive(&self) -> bool {
        self.0 > Decimal::ZERO
    }

    pub fn is_negative(&self) -> bool {
        self.0 < Decimal::ZERO
    }

    pub fn checked_add(&self, other: Money) -> Option<Money> {
        self.0.checked_add(other.0).map(Money)
    }

    pub fn checked_sub(&self, other: Money) -> Option<Money> {
        self.0.checked_sub(other.0).map(Money)
    }

    /// `rate` percent of this amount (`self * rate / 100`).
    pub fn checked_percent(&self, rate: Decimal) -> Option<Money> {
        self.0
            .checked_mul(rate)?
            .checked_div(Decimal::ONE_HUNDRED)
            .map(Money)
    }
}

impl From<Decimal> for Money {
    fn from(value: Decimal) -> Self {
        Self(value)
    }
}

impl FromStr for Money {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Decimal::from_str(s.trim())
            .map(Self)
            .map_err(|e| DomainError::validation(format!("invalid amount '{s}': {e}")))
    }
}

impl Neg for Money {
    type Output = Money;

    fn neg(self) -> Money {
        Money(-self.0)
    }
}

impl core::fmt::Display for Money {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let dp = f.precision().unwrap_or(2);
        let rounded = self
            .0
            .round_dp_with_strategy(dp as u32, RoundingStrategy::MidpointAwayFromZero);
        write!(f, "{rounded:.dp$}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn display_defaults_to_two_places() {
        assert_eq!(Money::new(dec!(300)).to_string(), "300.00");
        assert_eq!(Money::new(dec!(-201.5)).to_string(), "-201.50");
        assert_eq!(Money::new(dec!(0.125)).to_string(), "0.13");
    }

    #[test]
    fn display_honours_precision() {
        assert_eq!(format!("{:.1}", Money::new(dec!(1000))), "1000.0");
    }

    #[test]
    fn arithmetic_is_exact() {
        let balance = Money::new(dec!(2300));
        let deduction = Money::new(dec!(2500)).checked_add(Money::new(dec!(1.5))).unwrap();
        let after = balance.checked_sub(deduction).unwrap();
        assert_eq!(after, Money::new(dec!(-201.5)));
        assert!(after.is_negative());
    }

    #[test]
    fn percent_of_amount() {
        assert_eq!(Money::new(dec!(1500)).checked_percent(dec!(2.5)), Some(Money::new(dec!(37.5))));
        assert_eq!(Money::ZERO.checked_percent(dec!(2.5)), Some(Money::ZERO));
    }

    #[test]
    fn overflow_is_none_instead_of_panicking() {
        let max = Money::new(Decimal::MAX);
        assert_eq!(max.checked_add(Money::new(dec!(1))), None);
        assert_eq!((-max).checked_sub(Money::new(dec!(1))), None);
        assert_eq!(max.checked_percent(dec!(2.5)), None);
        assert_eq!(max.checked_sub(Money::new(dec!(1))), Some(Money::new(Decimal::MAX - dec!(1))));
    }

    #[test]
    fn parse_rejects_garbage() {
        assert_eq!("12.5".parse::<Money>().unwrap(), Money::new(dec!(12.5)));
        assert!(matches!("abc".parse::<Money>(), Err(DomainError::Validation(_))));
    }
}
