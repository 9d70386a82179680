use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Mul, Sub};

/// A monetary amount in integer cents.
///
/// Every price, delta and total in the engine is a `Money` value so that
/// repeated recomputation yields bit-identical results. Use
/// [`Money::from_cents`] or [`Money::from_dollars`] to construct amounts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Money(i64);

impl Money {
    pub const ZERO: Money = Money(0);

    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    /// Whole dollars and remaining cents, e.g. `Money::from_dollars(4, 50)`.
    pub const fn from_dollars(dollars: i64, cents: i64) -> Self {
        Money(dollars * 100 + cents)
    }

    pub const fn cents(self) -> i64 {
        self.0
    }

    pub const fn is_zero(self) -> bool {
        self.0 == 0
    }

    pub const fn is_positive(self) -> bool {
        self.0 > 0
    }
}

impl Add for Money {
    type Output = Money;
    fn add(self, rhs: Money) -> Money {
        Money(self.0 + rhs.0)
    }
}

impl AddAssign for Money {
    fn add_assign(&mut self, rhs: Money) {
        self.0 += rhs.0;
    }
}

impl Sub for Money {
    type Output = Money;
    fn sub(self, rhs: Money) -> Money {
        Money(self.0 - rhs.0)
    }
}

impl Mul<u32> for Money {
    type Output = Money;
    fn mul(self, quantity: u32) -> Money {
        Money(self.0 * quantity as i64)
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Money {
        iter.fold(Money::ZERO, Add::add)
    }
}

impl<'a> Sum<&'a Money> for Money {
    fn sum<I: Iterator<Item = &'a Money>>(iter: I) -> Money {
        iter.copied().sum()
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let cents = self.0.abs();
        write!(f, "{}${}.{:02}", sign, cents / 100, cents % 100)
    }
}

/// A fractional rate in basis points (1/100th of a percent).
///
/// Applied with pure integer arithmetic, rounding half away from zero, so
/// e.g. the 8% tax on $4.50 is exactly 36 cents on every recomputation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rate(u32);

impl Rate {
    pub const fn basis_points(bp: u32) -> Self {
        Rate(bp)
    }

    /// `Rate::percent(8)` is an 8% rate.
    pub const fn percent(pct: u32) -> Self {
        Rate(pct * 100)
    }

    pub const fn as_basis_points(self) -> u32 {
        self.0
    }

    /// The rate applied to an amount, rounded half away from zero.
    pub fn of(self, amount: Money) -> Money {
        let raw = amount.cents() * self.0 as i64;
        let half = 5_000 * raw.signum();
        Money::from_cents((raw + half) / 10_000)
    }
}
