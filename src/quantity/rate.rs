use std::ops::Mul;

use crate::quantity::{Quantity, currency::Usd, energy::MegawattHours};

/// Forecast price of energy, USD per megawatt-hour.
pub type UsdPerMegawattHour = Quantity<f64, -1, 0, -1, 1>;

impl Mul<MegawattHours> for UsdPerMegawattHour {
    type Output = Usd;

    fn mul(self, rhs: MegawattHours) -> Self::Output {
        Quantity(self.0 * rhs.0)
    }
}
