use serde::Serialize;

use crate::{
    cli::PlantArgs,
    core::{method::Method, trajectory},
    quantity::{
        currency::Usd,
        flow::CubicMetresPerSecond,
        power::Megawatts,
        rate::UsdPerMegawattHour,
        time::Hours,
        volume::CubicMetres,
    },
};

/// The solver's answer: the hourly power plan plus the derived discharge and
/// storage trajectories and the summary metrics, in the shape the request
/// layer serializes.
#[derive(Clone, Debug, Serialize)]
pub struct DispatchSchedule {
    /// Power generation per hour, megawatts.
    #[serde(rename = "P")]
    pub power: Vec<Megawatts>,

    /// Water discharge per hour, m³/s.
    #[serde(rename = "Q")]
    pub discharge: Vec<CubicMetresPerSecond>,

    /// Reservoir storage trajectory, m³. One entry more than there are hours.
    #[serde(rename = "S")]
    pub storage: Vec<CubicMetres>,

    pub revenue: Usd,
    pub avg_generation: Megawatts,
    pub peak_generation: Megawatts,

    /// Average generation as a percentage of the maximum.
    pub capacity_factor: f64,

    pub optimization_method: Method,
    pub solver_success: bool,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl DispatchSchedule {
    /// Derive the complete record from a power plan by forward simulation.
    pub fn from_power(
        method: Method,
        solver_success: bool,
        prices: &[UsdPerMegawattHour],
        plant: &PlantArgs,
        power: Vec<Megawatts>,
    ) -> Self {
        let discharge = power.iter().map(|power| plant.kappa * *power).collect();
        let storage = trajectory::simulate(plant, &power);
        let revenue = prices
            .iter()
            .zip(&power)
            .map(|(price, power)| *price * (*power * Hours::ONE))
            .sum();
        let (avg_generation, peak_generation) = Self::generation_stats(&power);
        Self {
            power,
            discharge,
            storage,
            revenue,
            avg_generation,
            peak_generation,
            capacity_factor: avg_generation.0 / plant.p_max.0 * 100.0,
            optimization_method: method,
            solver_success,
            message: None,
        }
    }

    /// The defined answer to an empty or fully clipped forecast: an all-`p_min`
    /// placeholder with a flat storage line and no revenue. This is not a
    /// simulated schedule and is never produced by a tier.
    pub fn degenerate(plant: &PlantArgs, message: impl Into<String>) -> Self {
        let power = vec![plant.p_min; plant.horizon];
        let (avg_generation, peak_generation) = Self::generation_stats(&power);
        Self {
            discharge: vec![plant.kappa * plant.p_min; plant.horizon],
            storage: vec![plant.s0; plant.horizon + 1],
            power,
            revenue: Usd::ZERO,
            avg_generation,
            peak_generation,
            capacity_factor: avg_generation.0 / plant.p_max.0 * 100.0,
            optimization_method: Method::GreedyHeuristic,
            solver_success: false,
            message: Some(message.into()),
        }
    }

    #[expect(clippy::cast_precision_loss)]
    fn generation_stats(power: &[Megawatts]) -> (Megawatts, Megawatts) {
        if power.is_empty() {
            return (Megawatts::ZERO, Megawatts::ZERO);
        }
        let average = power.iter().copied().sum::<Megawatts>() / power.len() as f64;
        let peak = power.iter().copied().fold(Megawatts::ZERO, Megawatts::max);
        (average, peak)
    }
}
