use std::fmt;

use rust_decimal::{Decimal, prelude::ToPrimitive};

use crate::EngineError;

/// Signed money amount represented as **integer cents**.
///
/// Use this type for **all** monetary values in the engine (stored amounts,
/// report sums) to avoid floating-point drift. The wire format is a decimal
/// number, so conversion to and from [`Decimal`] happens at the crate
/// boundary and nowhere else.
///
/// # Examples
///
/// ```rust
/// use engine::Money;
/// use rust_decimal::Decimal;
///
/// let amount = Money::try_from(Decimal::new(1250, 2)).unwrap();
/// assert_eq!(amount.cents(), 1250);
/// assert_eq!(amount.to_string(), "12.50");
/// ```
///
/// Conversion rejects more than 2 fractional digits:
///
/// ```rust
/// use engine::Money;
/// use rust_decimal::Decimal;
///
/// assert!(Money::try_from(Decimal::new(12_345, 3)).is_err());
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(transparent)]
pub struct Money(i64);

impl Money {
    pub const ZERO: Money = Money(0);

    /// Creates a new amount from integer cents.
    #[must_use]
    pub const fn new(cents: i64) -> Self {
        Self(cents)
    }

    /// Returns the raw value in cents.
    #[must_use]
    pub const fn cents(self) -> i64 {
        self.0
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let abs = self.0.unsigned_abs();
        let units = abs / 100;
        let cents = abs % 100;
        write!(f, "{sign}{units}.{cents:02}")
    }
}

impl From<i64> for Money {
    fn from(value: i64) -> Self {
        Self(value)
    }
}

impl From<Money> for i64 {
    fn from(value: Money) -> Self {
        value.0
    }
}

impl TryFrom<Decimal> for Money {
    type Error = EngineError;

    /// Converts a decimal amount into cents.
    ///
    /// Validation rules:
    /// - max 2 fractional digits after normalization, so `12.500` passes and
    ///   `12.345` is rejected
    /// - the cent value must fit in an `i64`
    fn try_from(value: Decimal) -> Result<Self, Self::Error> {
        let normalized = value.normalize();
        if normalized.scale() > 2 {
            return Err(EngineError::Validation(
                "Amount must have at most 2 decimal places".to_string(),
            ));
        }
        let cents = normalized
            .checked_mul(Decimal::ONE_HUNDRED)
            .and_then(|cents| cents.to_i64())
            .ok_or_else(|| EngineError::Validation("Amount is out of range".to_string()))?;
        Ok(Money(cents))
    }
}

impl From<Money> for Decimal {
    fn from(value: Money) -> Self {
        Decimal::new(value.0, 2)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decimal_converts_to_cents() {
        assert_eq!(Money::try_from(Decimal::new(1250, 2)).unwrap().cents(), 1250);
        assert_eq!(Money::try_from(Decimal::new(105, 1)).unwrap().cents(), 1050);
        assert_eq!(Money::try_from(Decimal::from(10)).unwrap().cents(), 1000);
        assert_eq!(Money::try_from(Decimal::new(-1, 2)).unwrap().cents(), -1);
        assert_eq!(Money::try_from(Decimal::ZERO).unwrap(), Money::ZERO);
    }

    #[test]
    fn rejects_more_than_two_decimals() {
        assert!(Money::try_from(Decimal::new(12_345, 3)).is_err());
        assert!(Money::try_from(Decimal::new(1, 3)).is_err());
    }

    #[test]
    fn trailing_zeroes_are_not_decimals() {
        assert_eq!(
            Money::try_from(Decimal::new(12_500, 3)).unwrap().cents(),
            1250
        );
    }

    #[test]
    fn cents_convert_back_to_decimal() {
        assert_eq!(Decimal::from(Money::new(1250)), Decimal::new(1250, 2));
        assert_eq!(Decimal::from(Money::new(-5)), Decimal::new(-5, 2));
    }

    #[test]
    fn display_formats_plain_decimal() {
        assert_eq!(Money::new(0).to_string(), "0.00");
        assert_eq!(Money::new(1).to_string(), "0.01");
        assert_eq!(Money::new(1050).to_string(), "10.50");
        assert_eq!(Money::new(-1050).to_string(), "-10.50");
    }
}
