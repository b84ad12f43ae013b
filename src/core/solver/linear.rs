use good_lp::{
    Expression, Solution, SolverModel, Variable, constraint, solvers::clarabel::clarabel,
    variable, variables,
};

use crate::{
    cli::PlantArgs,
    core::{
        method::Method,
        schedule::DispatchSchedule,
        solver::Tier,
    },
    prelude::*,
    quantity::{power::Megawatts, rate::UsdPerMegawattHour, time::SECONDS_PER_HOUR},
};

/// Tolerance on the end-of-horizon storage deviation and on the recovered
/// storage bounds, relative to the storage range `s_max − s_min`.
const EQUAL_STORAGE_TOLERANCE: f64 = 1e-6;

/// Weight of the tie-break that pulls equal-revenue optima towards the
/// inflow-matching power level. Large enough for the solver to resolve the
/// term, small against any real spread in the price curve.
const TIE_BREAK_WEIGHT: f64 = 0.05;

/// The exact tier: the full linear program over the hourly power vector.
///
/// Per-hour power bounds, a chain of cumulative storage-bound inequalities
/// and a single horizon-wide balance equality that pins the final storage to
/// the initial one.
pub struct LinearProgramming;

impl Tier for LinearProgramming {
    fn method(&self) -> Method {
        Method::LinearProgramming
    }

    #[instrument(skip_all, name = "linear_programming")]
    #[expect(clippy::cast_precision_loss)]
    fn solve(
        &self,
        prices: &[UsdPerMegawattHour],
        plant: &PlantArgs,
    ) -> Option<DispatchSchedule> {
        let horizon = prices.len();

        // Discharge and inflow volumes per hourly step:
        let kappa_volume = plant.kappa.0 * SECONDS_PER_HOUR;
        let inflow_volume = plant.inflow.0 * SECONDS_PER_HOUR;

        let mut vars = variables!();
        let power: Vec<Variable> = (0..horizon)
            .map(|_| vars.add(variable().min(plant.p_min.0).max(plant.p_max.0)))
            .collect();
        // Equal-price stretches admit many equal-revenue schedules; the
        // absolute deviation from the inflow-matching level is penalized to
        // single out the constant one among them.
        let anchor = (plant.inflow.0 / plant.kappa.0).clamp(plant.p_min.0, plant.p_max.0);
        let deviation: Vec<Variable> =
            (0..horizon).map(|_| vars.add(variable().min(0.0))).collect();

        // Revenue over hourly steps, Σ price[t] · P[t], minus the tie-break:
        let objective = prices
            .iter()
            .zip(&power)
            .fold(Expression::from(0.0), |sum, (price, power)| sum + price.0 * *power);
        let objective = deviation
            .iter()
            .fold(objective, |sum, deviation| sum - TIE_BREAK_WEIGHT * *deviation);
        let mut problem = vars.maximise(objective).using(clarabel);
        for (power, deviation) in power.iter().zip(&deviation) {
            problem = problem.with(constraint!(*power - *deviation <= anchor));
            problem = problem.with(constraint!(*power + *deviation >= anchor));
        }

        // Total discharge volume equals total inflow volume, which forces the
        // reservoir to end the horizon where it started.
        let total_discharge = power
            .iter()
            .fold(Expression::from(0.0), |sum, power| sum + kappa_volume * *power);
        problem = problem.with(constraint!(total_discharge == horizon as f64 * inflow_volume));

        // Two storage-bound inequalities per hour over the cumulative
        // discharge through that hour.
        let mut cumulative_discharge = Expression::from(0.0);
        for (t, power) in power.iter().enumerate() {
            cumulative_discharge += kappa_volume * *power;
            let inflow_through = (t + 1) as f64 * inflow_volume;
            problem = problem.with(constraint!(
                cumulative_discharge.clone() <= plant.s0.0 - plant.s_min.0 + inflow_through
            ));
            problem = problem.with(constraint!(
                cumulative_discharge.clone() >= plant.s0.0 - plant.s_max.0 + inflow_through
            ));
        }
        debug!(n_rows = 4 * horizon + 1, "formulated the program");

        let solution = match problem.solve() {
            Ok(solution) => solution,
            Err(error) => {
                warn!("the solver reported no solution: {error}");
                return None;
            }
        };

        // Clamp out the solver's numerical noise before validating:
        let power: Vec<Megawatts> = power
            .iter()
            .map(|power| Megawatts::from(solution.value(*power)).clamp(plant.p_min, plant.p_max))
            .collect();
        let schedule =
            DispatchSchedule::from_power(Method::LinearProgramming, true, prices, plant, power);
        if !is_within_tolerance(&schedule, plant) {
            warn!("the recovered schedule failed validation");
            return None;
        }
        Some(schedule)
    }
}

/// Re-check the recovered trajectory: the storage bounds and the equal-storage
/// balance must hold up to [`EQUAL_STORAGE_TOLERANCE`]. This also covers the
/// degenerate `p_min == p_max` program, which is a pure feasibility check.
fn is_within_tolerance(schedule: &DispatchSchedule, plant: &PlantArgs) -> bool {
    let tolerance = EQUAL_STORAGE_TOLERANCE * (plant.s_max.0 - plant.s_min.0);
    let bounded = schedule
        .storage
        .iter()
        .all(|storage| {
            storage.0 >= plant.s_min.0 - tolerance && storage.0 <= plant.s_max.0 + tolerance
        });
    let balanced = schedule
        .storage
        .last()
        .is_some_and(|storage| (storage.0 - plant.s0.0).abs() <= tolerance);
    bounded && balanced
}
