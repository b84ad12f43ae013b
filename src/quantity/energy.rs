use crate::quantity::Quantity;

pub type MegawattHours = Quantity<f64, 1, 0, 1, 0>;
