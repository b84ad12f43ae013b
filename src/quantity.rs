pub mod currency;
pub mod energy;
pub mod flow;
pub mod power;
pub mod rate;
pub mod time;
pub mod volume;

use std::ops::{Div, Mul};

use serde::{Deserialize, Serialize};

/// Dimensional newtype shared by all the units in this crate.
///
/// The exponents track power (MW), volume (m³), time (hours) and cost (USD).
/// Cross-unit products are implemented pairwise in the unit modules, where a
/// scale factor may apply (e.g. flow is per second while time is in hours).
#[derive(
    Clone,
    Copy,
    Debug,
    Deserialize,
    Eq,
    Ord,
    PartialEq,
    PartialOrd,
    Serialize,
    derive_more::Add,
    derive_more::AddAssign,
    derive_more::Display,
    derive_more::From,
    derive_more::FromStr,
    derive_more::Neg,
    derive_more::Sub,
    derive_more::SubAssign,
    derive_more::Sum,
)]
pub struct Quantity<T, const POWER: isize, const VOLUME: isize, const TIME: isize, const COST: isize>(
    pub T,
);

impl<T, const POWER: isize, const VOLUME: isize, const TIME: isize, const COST: isize>
    Quantity<T, POWER, VOLUME, TIME, COST>
where
    Self: PartialOrd,
{
    pub fn min(mut self, rhs: Self) -> Self {
        if rhs < self {
            self = rhs;
        }
        self
    }

    pub fn max(mut self, rhs: Self) -> Self {
        if rhs > self {
            self = rhs;
        }
        self
    }

    pub fn clamp(mut self, min: Self, max: Self) -> Self {
        if self < min {
            self = min;
        }
        if self > max {
            self = max;
        }
        self
    }
}

impl<const POWER: isize, const VOLUME: isize, const TIME: isize, const COST: isize>
    Quantity<f64, POWER, VOLUME, TIME, COST>
{
    pub const ONE: Self = Self(1.0);
    pub const ZERO: Self = Self(0.0);
}

impl<T, const POWER: isize, const VOLUME: isize, const TIME: isize, const COST: isize> Mul<T>
    for Quantity<T, POWER, VOLUME, TIME, COST>
where
    T: Mul<T>,
{
    type Output = Quantity<T::Output, POWER, VOLUME, TIME, COST>;

    fn mul(self, rhs: T) -> Self::Output {
        Quantity(self.0 * rhs)
    }
}

impl<T, const POWER: isize, const VOLUME: isize, const TIME: isize, const COST: isize> Div<T>
    for Quantity<T, POWER, VOLUME, TIME, COST>
where
    T: Div<T>,
{
    type Output = Quantity<T::Output, POWER, VOLUME, TIME, COST>;

    fn div(self, rhs: T) -> Self::Output {
        Quantity(self.0 / rhs)
    }
}
