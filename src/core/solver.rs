mod greedy;
mod linear;
mod local_search;

pub use self::{
    greedy::Greedy,
    linear::LinearProgramming,
    local_search::{LocalSearch, Tuning},
};
use crate::{
    cli::PlantArgs,
    core::{method::Method, schedule::DispatchSchedule, trajectory},
    prelude::*,
    quantity::rate::UsdPerMegawattHour,
};

/// One solver strategy.
///
/// A tier either returns a complete schedule or signals that it could not
/// solve; it never lets an error escape to the dispatcher's caller.
pub trait Tier {
    fn method(&self) -> Method;

    fn solve(&self, prices: &[UsdPerMegawattHour], plant: &PlantArgs)
    -> Option<DispatchSchedule>;
}

/// Ordered list of solver tiers, attempted from the exact solver down to the
/// greedy fallback. The first tier that returns a schedule wins and the lower
/// tiers are not run.
pub struct Dispatcher {
    tiers: Vec<Box<dyn Tier>>,
}

impl Default for Dispatcher {
    fn default() -> Self {
        Self {
            tiers: vec![
                Box::new(LinearProgramming),
                Box::new(LocalSearch::default()),
                Box::new(Greedy),
            ],
        }
    }
}

impl Dispatcher {
    /// Solve the dispatch request. Always returns a schedule: degraded
    /// outcomes are communicated through `optimization_method` and
    /// `solver_success`, never through an error.
    #[instrument(skip_all, fields(n_prices = prices.len(), horizon = plant.horizon))]
    pub fn solve(&self, prices: &[UsdPerMegawattHour], plant: &PlantArgs) -> DispatchSchedule {
        if prices.is_empty() {
            warn!("empty price series, returning the degenerate schedule");
            return DispatchSchedule::degenerate(plant, "empty price series");
        }
        let horizon = trajectory::effective_horizon(plant, prices.len());
        if horizon == 0 {
            warn!("no valid time periods, returning the degenerate schedule");
            return DispatchSchedule::degenerate(plant, "no valid time periods");
        }

        let prices = &prices[..horizon];
        let plant = PlantArgs { horizon, ..*plant };
        for tier in &self.tiers {
            if let Some(schedule) = tier.solve(prices, &plant) {
                info!(
                    method = %schedule.optimization_method,
                    revenue = schedule.revenue.0,
                    "solved",
                );
                return schedule;
            }
            warn!(method = %tier.method(), "tier could not solve, falling through");
        }

        // Unreachable with the default tier list: the greedy tier always
        // returns a schedule.
        DispatchSchedule::degenerate(&plant, "no tier produced a schedule")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::quantity::{flow::CubicMetresPerSecond, power::Megawatts};

    fn flat_prices(value: f64, len: usize) -> Vec<UsdPerMegawattHour> {
        vec![UsdPerMegawattHour::from(value); len]
    }

    #[test]
    fn test_empty_prices_yield_the_degenerate_schedule() {
        let plant = PlantArgs::test_default(24);
        let schedule = Dispatcher::default().solve(&[], &plant);
        assert_eq!(schedule.power, vec![plant.p_min; 24]);
        assert_eq!(schedule.storage, vec![plant.s0; 25]);
        assert_eq!(schedule.revenue.0, 0.0);
        assert!(!schedule.solver_success);
    }

    #[test]
    fn test_zero_horizon_yields_no_valid_time_periods() {
        let plant = PlantArgs::test_default(0);
        let schedule = Dispatcher::default().solve(&flat_prices(50.0, 24), &plant);
        assert!(schedule.power.is_empty());
        assert_eq!(schedule.storage, vec![plant.s0]);
        assert!(!schedule.solver_success);
        assert_eq!(schedule.message.as_deref(), Some("no valid time periods"));
    }

    #[test]
    fn test_the_exact_tier_wins_when_it_succeeds() {
        let plant = PlantArgs::test_default(24);
        let schedule = Dispatcher::default().solve(&flat_prices(50.0, 24), &plant);
        assert_eq!(schedule.optimization_method, Method::LinearProgramming);
        assert!(schedule.solver_success);
    }

    #[test]
    fn test_horizon_is_clipped_to_the_forecast() {
        let plant = PlantArgs::test_default(24);
        let schedule = Dispatcher::default().solve(&flat_prices(50.0, 6), &plant);
        assert_eq!(schedule.power.len(), 6);
        assert_eq!(schedule.storage.len(), 7);
    }

    #[test]
    fn test_fixed_power_bounds_fall_through_to_local_search() {
        // With generation pinned to 2 MW the equal-storage balance cannot
        // hold (0.667 · 2 ≠ 1.1), so the exact tier is infeasible while the
        // heuristic still finds a bounded schedule.
        let plant = PlantArgs {
            p_min: Megawatts::from(2.0),
            p_max: Megawatts::from(2.0),
            ..PlantArgs::test_default(24)
        };
        let schedule = Dispatcher::default().solve(&flat_prices(50.0, 24), &plant);
        assert_eq!(schedule.optimization_method, Method::DynamicProgrammingSimple);
        assert!(schedule.solver_success);
    }

    #[test]
    fn test_overwhelming_inflow_falls_through_to_greedy() {
        // The inflow exceeds what full power can discharge, so no tier can
        // keep the reservoir within bounds. The greedy tier still answers,
        // explicitly marked as non-optimal.
        let plant = PlantArgs {
            inflow: CubicMetresPerSecond::from(10.0),
            ..PlantArgs::test_default(5)
        };
        let schedule = Dispatcher::default().solve(&flat_prices(50.0, 5), &plant);
        assert_eq!(schedule.optimization_method, Method::GreedyHeuristic);
        assert!(!schedule.solver_success);
    }

    #[test]
    fn test_exact_revenue_dominates_greedy_revenue() {
        // Start at the storage floor so that neither heuristic can profit
        // from draining the reservoir below its starting level.
        let plant = PlantArgs {
            s0: crate::quantity::volume::CubicMetres::from(1000.0),
            ..PlantArgs::test_default(8)
        };
        let prices: Vec<UsdPerMegawattHour> =
            [20.0, 90.0, 30.0, 80.0, 40.0, 70.0, 50.0, 60.0]
                .into_iter()
                .map(UsdPerMegawattHour::from)
                .collect();
        let exact = LinearProgramming.solve(&prices, &plant).unwrap();
        let greedy = Greedy.solve(&prices, &plant).unwrap();
        assert!(
            exact.revenue >= greedy.revenue,
            "exact {:?} vs greedy {:?}",
            exact.revenue,
            greedy.revenue,
        );
    }
}
