use std::ops::Mul;

use crate::quantity::{
    Quantity,
    power::Megawatts,
    time::{Hours, SECONDS_PER_HOUR},
    volume::CubicMetres,
};

pub type CubicMetresPerSecond = Quantity<f64, 0, 1, -1, 0>;

/// The water-to-power conversion factor: how much discharge one megawatt of
/// generation takes.
pub type CubicMetresPerSecondPerMegawatt = Quantity<f64, -1, 1, -1, 0>;

impl Mul<Hours> for CubicMetresPerSecond {
    type Output = CubicMetres;

    fn mul(self, rhs: Hours) -> Self::Output {
        Quantity(self.0 * rhs.0 * SECONDS_PER_HOUR)
    }
}

impl Mul<Megawatts> for CubicMetresPerSecondPerMegawatt {
    type Output = CubicMetresPerSecond;

    fn mul(self, rhs: Megawatts) -> Self::Output {
        Quantity(self.0 * rhs.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flow_over_an_hour() {
        let volume = CubicMetresPerSecond::from(1.1) * Hours::ONE;
        approx::assert_relative_eq!(volume.0, 3960.0);
    }

    #[test]
    fn test_conversion_factor() {
        let discharge = CubicMetresPerSecondPerMegawatt::from(0.667) * Megawatts::from(2.0);
        approx::assert_relative_eq!(discharge.0, 1.334);
    }
}
