use crate::quantity::Quantity;

pub type Usd = Quantity<f64, 0, 0, 0, 1>;
