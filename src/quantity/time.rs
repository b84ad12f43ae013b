use crate::quantity::Quantity;

pub type Hours = Quantity<f64, 0, 0, 1, 0>;

/// Storage evolves in m³ while flows are per second and steps are hourly.
pub const SECONDS_PER_HOUR: f64 = 3600.0;
