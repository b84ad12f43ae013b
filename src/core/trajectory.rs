//! Storage-trajectory helpers shared by all the solver tiers.

use crate::{
    cli::PlantArgs,
    quantity::{power::Megawatts, time::Hours, volume::CubicMetres},
};

/// Clip the requested horizon to the hours the forecast actually covers.
pub fn effective_horizon(plant: &PlantArgs, n_prices: usize) -> usize {
    plant.horizon.min(n_prices)
}

/// Advance the reservoir by one hourly step under the given generation.
pub fn step(plant: &PlantArgs, storage: CubicMetres, power: Megawatts) -> CubicMetres {
    storage + (plant.inflow - plant.kappa * power) * Hours::ONE
}

/// Forward-simulate the reservoir from `s0` under the given power schedule.
///
/// The returned trajectory has one more entry than the schedule and starts
/// with the initial storage.
pub fn simulate(plant: &PlantArgs, powers: &[Megawatts]) -> Vec<CubicMetres> {
    let mut trajectory = Vec::with_capacity(powers.len() + 1);
    let mut current = plant.s0;
    trajectory.push(current);
    for power in powers {
        current = step(plant, current, *power);
        trajectory.push(current);
    }
    trajectory
}

/// Whether every storage value stays within the plant's bounds.
pub fn within_bounds(plant: &PlantArgs, trajectory: &[CubicMetres]) -> bool {
    trajectory.iter().all(|storage| (plant.s_min..=plant.s_max).contains(storage))
}

/// Simulate the schedule and bail out at the first storage-bound violation.
pub fn is_feasible(plant: &PlantArgs, powers: &[Megawatts]) -> bool {
    let mut current = plant.s0;
    for power in powers {
        current = step(plant, current, *power);
        if !(plant.s_min..=plant.s_max).contains(&current) {
            return false;
        }
    }
    true
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;

    #[test]
    fn test_balanced_generation_holds_storage() {
        let plant = PlantArgs::test_default(24);
        // Discharge exactly matches the inflow:
        let balanced = Megawatts::from(plant.inflow.0 / plant.kappa.0);
        let trajectory = simulate(&plant, &vec![balanced; 24]);
        assert_eq!(trajectory.len(), 25);
        for storage in trajectory {
            assert_relative_eq!(storage.0, plant.s0.0, max_relative = 1e-9);
        }
    }

    #[test]
    fn test_full_power_drains_storage() {
        let plant = PlantArgs::test_default(24);
        let trajectory = simulate(&plant, &vec![plant.p_max; 3]);
        // (1.1 − 0.667 · 3) · 3600 ≈ −3243.6 m³ per hour:
        assert_relative_eq!(trajectory[1].0, 25000.0 - 3243.6, max_relative = 1e-9);
        assert_relative_eq!(trajectory[3].0, 25000.0 - 3.0 * 3243.6, max_relative = 1e-9);
    }

    #[test]
    fn test_is_feasible_catches_draining_below_minimum() {
        let plant = PlantArgs { s0: CubicMetres::from(2000.0), ..PlantArgs::test_default(24) };
        assert!(is_feasible(&plant, &vec![plant.p_min; 4]));
        assert!(!is_feasible(&plant, &vec![plant.p_max; 4]));
    }

    #[test]
    fn test_effective_horizon_is_clipped_by_the_forecast() {
        let plant = PlantArgs::test_default(24);
        assert_eq!(effective_horizon(&plant, 48), 24);
        assert_eq!(effective_horizon(&plant, 10), 10);
        assert_eq!(effective_horizon(&plant, 0), 0);
    }
}
