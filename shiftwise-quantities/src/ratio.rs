use std::fmt::{Debug, Display, Formatter};

use ordered_float::OrderedFloat;

use crate::Quantity;

/// Dimensionless proportion, where `1.0` stands for 100 %.
pub type Ratio = Quantity<0, 0>;

impl Ratio {
    pub const ONE: Self = Self(OrderedFloat(1.0));

    /// Convert into percents, `0.25` becomes `25.0`.
    #[must_use]
    pub fn to_percent(self) -> f64 {
        self.0.0 * 100.0
    }
}

impl Display for Ratio {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.1}%", self.to_percent())
    }
}

impl Debug for Ratio {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self.0)
    }
}
