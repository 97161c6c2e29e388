//! Monetary quantities held as integer minor units (cents).

use std::{
    fmt,
    iter::Sum,
    ops::{Add, AddAssign},
    str::FromStr,
};

use serde::{
    de::{self, Visitor},
    Deserialize, Deserializer, Serialize, Serializer,
};

use crate::errors::TrackerError;

const MINOR_PER_MAJOR: i64 = 100;

/// Largest single amount accepted, 999,999,999,999.99 in major units.
///
/// Values this size stay exact as JSON `f64`s, and about 92,000 of them sum
/// before a total reaches `i64::MAX`.
pub const MAX_MINOR: i64 = 99_999_999_999_999;

/// Non-negative magnitude of a money flow, in minor units.
///
/// JSON carries the decimal major-unit value (`12.5`, `80`). Addition
/// saturates at `i64::MAX` minor units.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Amount(i64);

impl Amount {
    pub const ZERO: Amount = Amount(0);

    /// Builds an amount from whole currency units.
    pub const fn whole(units: u32) -> Self {
        Amount(units as i64 * MINOR_PER_MAJOR)
    }

    pub fn from_minor(minor: i64) -> Result<Self, TrackerError> {
        if minor < 0 {
            return Err(TrackerError::InvalidAmount(format!(
                "{minor} minor units is negative"
            )));
        }
        if minor > MAX_MINOR {
            return Err(TrackerError::InvalidAmount(format!(
                "{minor} minor units exceeds the {MAX_MINOR} limit"
            )));
        }
        Ok(Amount(minor))
    }

    pub fn minor(self) -> i64 {
        self.0
    }
}

impl Add for Amount {
    type Output = Amount;

    fn add(self, rhs: Amount) -> Amount {
        Amount(self.0.saturating_add(rhs.0))
    }
}

impl AddAssign for Amount {
    fn add_assign(&mut self, rhs: Amount) {
        *self = *self + rhs;
    }
}

impl Sum for Amount {
    fn sum<I: Iterator<Item = Amount>>(iter: I) -> Self {
        iter.fold(Amount::ZERO, Add::add)
    }
}

impl<'a> Sum<&'a Amount> for Amount {
    fn sum<I: Iterator<Item = &'a Amount>>(iter: I) -> Self {
        iter.copied().sum()
    }
}

/// Whole values serialize as integers, everything else as a two-place float.
fn serialize_minor<S: Serializer>(minor: i64, serializer: S) -> Result<S::Ok, S::Error> {
    if minor % MINOR_PER_MAJOR == 0 {
        serializer.serialize_i64(minor / MINOR_PER_MAJOR)
    } else {
        serializer.serialize_f64(minor as f64 / MINOR_PER_MAJOR as f64)
    }
}

impl Serialize for Amount {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serialize_minor(self.0, serializer)
    }
}

struct AmountVisitor;

impl<'de> Visitor<'de> for AmountVisitor {
    type Value = Amount;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a non-negative number with at most two decimal places")
    }

    fn visit_u64<E: de::Error>(self, units: u64) -> Result<Amount, E> {
        i64::try_from(units)
            .ok()
            .and_then(|units| units.checked_mul(MINOR_PER_MAJOR))
            .ok_or_else(|| E::custom(format!("amount {units} is too large")))
            .and_then(|minor| Amount::from_minor(minor).map_err(E::custom))
    }

    fn visit_i64<E: de::Error>(self, units: i64) -> Result<Amount, E> {
        match u64::try_from(units) {
            Ok(units) => self.visit_u64(units),
            Err(_) => Err(E::custom(format!("amount {units} must not be negative"))),
        }
    }

    fn visit_f64<E: de::Error>(self, value: f64) -> Result<Amount, E> {
        if !value.is_finite() {
            return Err(E::custom("amount must be a finite number"));
        }
        // Shortest round-trip text, so `12.05` stays two places.
        value.to_string().parse().map_err(E::custom)
    }
}

impl<'de> Deserialize<'de> for Amount {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(AmountVisitor)
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}.{:02}",
            self.0 / MINOR_PER_MAJOR,
            self.0 % MINOR_PER_MAJOR
        )
    }
}

impl FromStr for Amount {
    type Err = TrackerError;

    /// Accepts `12`, `12.5` and `12.50`. Signs, exponents and more than two
    /// fractional digits are rejected.
    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let raw = input.trim();
        let invalid = |reason: &str| TrackerError::InvalidAmount(format!("`{raw}` {reason}"));
        if raw.starts_with('-') {
            return Err(invalid("must not be negative"));
        }
        let (whole, fraction) = raw.split_once('.').unwrap_or((raw, ""));
        if whole.is_empty() && fraction.is_empty() {
            return Err(invalid("is not a number"));
        }
        let all_digits = |part: &str| part.chars().all(|ch| ch.is_ascii_digit());
        if !all_digits(whole) || !all_digits(fraction) {
            return Err(invalid("is not a number"));
        }
        if fraction.len() > 2 {
            return Err(invalid("has more than two decimal places"));
        }

        let whole_minor = if whole.is_empty() {
            0
        } else {
            whole
                .parse::<i64>()
                .ok()
                .and_then(|units| units.checked_mul(MINOR_PER_MAJOR))
                .ok_or_else(|| invalid("is too large"))?
        };
        let fraction_minor = match fraction.len() {
            0 => 0,
            1 => fraction.parse::<i64>().map_err(|_| invalid("is not a number"))? * 10,
            _ => fraction.parse::<i64>().map_err(|_| invalid("is not a number"))?,
        };
        let minor = whole_minor
            .checked_add(fraction_minor)
            .ok_or_else(|| invalid("is too large"))?;
        Amount::from_minor(minor)
    }
}

/// Signed difference between two amounts, in minor units.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Balance(i64);

impl Balance {
    pub const ZERO: Balance = Balance(0);

    pub fn between(credit: Amount, debit: Amount) -> Self {
        Balance(credit.0 - debit.0)
    }

    pub fn minor(self) -> i64 {
        self.0
    }

    pub fn is_negative(self) -> bool {
        self.0 < 0
    }

    pub fn magnitude(self) -> Amount {
        Amount(self.0.saturating_abs())
    }
}

impl Serialize for Balance {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serialize_minor(self.0, serializer)
    }
}

impl fmt::Display for Balance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_negative() {
            write!(f, "-{}", self.magnitude())
        } else {
            write!(f, "{}", self.magnitude())
        }
    }
}
