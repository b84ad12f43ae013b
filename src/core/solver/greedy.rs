use std::cmp::Reverse;

use ordered_float::OrderedFloat;

use crate::{
    cli::PlantArgs,
    core::{method::Method, schedule::DispatchSchedule, solver::Tier, trajectory},
    prelude::*,
    quantity::rate::UsdPerMegawattHour,
};

/// The last-resort tier: rank the hours by price and raise each one to full
/// power while the reservoir allows it. A single pass with no backtracking;
/// always returns a schedule, explicitly marked as non-optimal.
pub struct Greedy;

impl Tier for Greedy {
    fn method(&self) -> Method {
        Method::GreedyHeuristic
    }

    #[instrument(skip_all, name = "greedy")]
    fn solve(
        &self,
        prices: &[UsdPerMegawattHour],
        plant: &PlantArgs,
    ) -> Option<DispatchSchedule> {
        let horizon = prices.len();
        let mut power = vec![plant.p_min; horizon];

        // The sort is stable: among equal prices the earlier hour wins.
        let mut ranked: Vec<usize> = (0..horizon).collect();
        ranked.sort_by_key(|t| Reverse(OrderedFloat(prices[*t].0)));

        let mut n_changes = 0;
        for t in ranked {
            let previous = std::mem::replace(&mut power[t], plant.p_max);
            if trajectory::is_feasible(plant, &power) {
                n_changes += 1;
            } else {
                power[t] = previous;
            }
        }
        debug!(n_changes, "raised hours to full power");

        Some(DispatchSchedule::from_power(Method::GreedyHeuristic, false, prices, plant, power))
    }
}
