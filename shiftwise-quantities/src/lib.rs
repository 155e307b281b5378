pub mod energy;
pub mod ratio;
pub mod time;

use std::ops::{Div, Mul};

use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};

pub use self::{energy::KilowattHours, ratio::Ratio, time::Hours};

/// Floating-point value tagged with its physical dimension.
///
/// The exponents track kilowatts and hours, so that `kW¹·h¹` is energy, `h¹` is duration, and
/// the dimensionless quantity is a [`Ratio`].
#[derive(
    Clone,
    Copy,
    Default,
    Deserialize,
    Eq,
    Hash,
    Ord,
    PartialEq,
    PartialOrd,
    Serialize,
    derive_more::Add,
    derive_more::AddAssign,
    derive_more::From,
    derive_more::FromStr,
    derive_more::Neg,
    derive_more::Sub,
    derive_more::SubAssign,
    derive_more::Sum,
)]
#[from(i32, f64, OrderedFloat<f64>)]
#[serde(transparent)]
#[must_use]
pub struct Quantity<const POWER: isize, const TIME: isize>(pub OrderedFloat<f64>);

impl<const POWER: isize, const TIME: isize> Quantity<POWER, TIME> {
    pub const ZERO: Self = Self(OrderedFloat(0.0));

    pub const fn new(value: f64) -> Self {
        Self(OrderedFloat(value))
    }

    #[must_use]
    pub const fn value(self) -> f64 {
        self.0.0
    }

    #[must_use]
    pub fn is_positive(self) -> bool {
        self > Self::ZERO
    }
}

impl<const POWER: isize, const TIME: isize> Mul<Ratio> for Quantity<POWER, TIME> {
    type Output = Self;

    fn mul(self, rhs: Ratio) -> Self::Output {
        Self(self.0 * rhs.0)
    }
}

impl<const POWER: isize, const TIME: isize> Div<Self> for Quantity<POWER, TIME> {
    type Output = Ratio;

    fn div(self, rhs: Self) -> Self::Output {
        Quantity(self.0 / rhs.0)
    }
}
