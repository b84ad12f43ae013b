use crate::quantity::Quantity;

pub type CubicMetres = Quantity<f64, 0, 1, 0, 0>;
