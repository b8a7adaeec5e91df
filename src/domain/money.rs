use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use std::iter::Sum;
use std::ops::{Add, AddAssign, Mul};

/// A commission rate expressed as a fraction (`0.20` is 20%).
///
/// Wraps `rust_decimal::Decimal` so rates never pass through binary floating
/// point on their way from the configuration document to the credited amount.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Rate(pub Decimal);

/// An amount of credits (sales volume, cashout volume, or earned credits).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Credits(pub Decimal);

impl Rate {
    pub const ZERO: Self = Self(Decimal::ZERO);
    /// 100%, the ceiling applied when no guild rank narrows it.
    pub const FULL: Self = Self(Decimal::ONE);

    pub fn new(value: Decimal) -> Self {
        Self(value)
    }

    pub fn value(&self) -> Decimal {
        self.0
    }

    pub fn is_negative(&self) -> bool {
        self.0.is_sign_negative() && !self.0.is_zero()
    }

    /// Returns the rate with negative values replaced by zero.
    pub fn non_negative(self) -> Self {
        if self.is_negative() { Self::ZERO } else { self }
    }

    /// The rate as a percentage rounded to one decimal place, e.g. `0.2345 -> 23.5`.
    pub fn as_percent(&self) -> Decimal {
        self.0
            .saturating_mul(Decimal::ONE_HUNDRED)
            .round_dp_with_strategy(1, RoundingStrategy::MidpointAwayFromZero)
    }
}

impl Credits {
    pub const ZERO: Self = Self(Decimal::ZERO);

    pub fn new(value: Decimal) -> Self {
        Self(value)
    }

    pub fn value(&self) -> Decimal {
        self.0
    }

    /// Credits rounded to two decimal places for display.
    pub fn rounded(&self) -> Decimal {
        self.0
            .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
    }
}

impl From<Decimal> for Rate {
    fn from(value: Decimal) -> Self {
        Self(value)
    }
}

impl From<Decimal> for Credits {
    fn from(value: Decimal) -> Self {
        Self(value)
    }
}

// Arithmetic saturates at the `Decimal` bounds instead of panicking.
impl Add for Rate {
    type Output = Self;
    fn add(self, rhs: Self) -> Self::Output {
        Self(self.0.saturating_add(rhs.0))
    }
}

impl AddAssign for Rate {
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl Sum for Rate {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, Add::add)
    }
}

impl Add for Credits {
    type Output = Self;
    fn add(self, rhs: Self) -> Self::Output {
        Self(self.0.saturating_add(rhs.0))
    }
}

impl AddAssign for Credits {
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

// Credits earned on a volume at a given rate.
impl Mul<Rate> for Credits {
    type Output = Credits;
    fn mul(self, rhs: Rate) -> Self::Output {
        Credits(self.0.saturating_mul(rhs.0))
    }
}
