use crate::{
    cli::PlantArgs,
    core::{
        method::Method,
        schedule::DispatchSchedule,
        solver::Tier,
        trajectory,
    },
    prelude::*,
    quantity::{power::Megawatts, rate::UsdPerMegawattHour, volume::CubicMetres},
};

/// Hand-tuned knobs of the discretized forward pass. The defaults are
/// inherited from operational use; none of them is load-bearing for
/// feasibility and there is no derivation behind the exact values.
#[derive(Copy, Clone, bon::Builder)]
pub struct Tuning {
    /// How many discrete power levels span `[p_min, p_max]`.
    #[builder(default = 5)]
    pub n_levels: usize,

    /// Weight of the keep-storage-near-the-midpoint bonus.
    #[builder(default = 10.0)]
    pub flexibility_weight: f64,

    /// Weight of the hold-back-for-pricier-hours bonus.
    #[builder(default = 0.5)]
    pub lookahead_weight: f64,

    /// How many upcoming hours the lookahead averages over.
    #[builder(default = 4)]
    pub lookahead_window: usize,

    /// Upper bound on improvement sweeps over the hour pairs.
    #[builder(default = 10)]
    pub max_sweeps: usize,
}

impl Default for Tuning {
    fn default() -> Self {
        Self::builder().build()
    }
}

/// The middle tier: pick among a few discrete power levels hour by hour using
/// an immediate-revenue plus storage-flexibility plus lookahead score, then
/// improve the plan with pairwise hour swaps.
#[derive(Default)]
pub struct LocalSearch {
    pub tuning: Tuning,
}

impl Tier for LocalSearch {
    fn method(&self) -> Method {
        Method::DynamicProgrammingSimple
    }

    #[instrument(skip_all, name = "local_search")]
    fn solve(
        &self,
        prices: &[UsdPerMegawattHour],
        plant: &PlantArgs,
    ) -> Option<DispatchSchedule> {
        let horizon = prices.len();
        let levels = self.levels(plant);

        let mut power = Vec::with_capacity(horizon);
        let mut storage = plant.s0;
        for t in 0..horizon {
            // Tied scores resolve to the lowest level, the levels being
            // generated in ascending order.
            let level = levels
                .iter()
                .copied()
                .filter(|level| {
                    let next = trajectory::step(plant, storage, *level);
                    (plant.s_min..=plant.s_max).contains(&next)
                })
                .fold(None, |best: Option<(Megawatts, f64)>, level| {
                    let score = self.score(prices, plant, t, level, storage);
                    match best {
                        Some((_, best_score)) if score <= best_score => best,
                        _ => Some((level, score)),
                    }
                })
                // With no headroom at any level, hold minimum generation:
                .map_or(plant.p_min, |(level, _)| level);
            storage = trajectory::step(plant, storage, level);
            power.push(level);
        }

        let n_swaps = self.improve(prices, plant, &mut power);
        debug!(n_swaps, "finished the improvement pass");

        let schedule = DispatchSchedule::from_power(
            Method::DynamicProgrammingSimple,
            true,
            prices,
            plant,
            power,
        );
        if !trajectory::within_bounds(plant, &schedule.storage) {
            warn!("the schedule violates the storage bounds, giving up");
            return None;
        }
        Some(schedule)
    }
}

impl LocalSearch {
    #[expect(clippy::cast_precision_loss)]
    fn levels(&self, plant: &PlantArgs) -> Vec<Megawatts> {
        let n_levels = self.tuning.n_levels.max(2);
        let span = plant.p_max - plant.p_min;
        (0..n_levels)
            .map(|level| plant.p_min + span * (level as f64 / (n_levels - 1) as f64))
            .collect()
    }

    /// Score a candidate level for the given hour.
    #[expect(clippy::cast_precision_loss)]
    fn score(
        &self,
        prices: &[UsdPerMegawattHour],
        plant: &PlantArgs,
        t: usize,
        level: Megawatts,
        storage: CubicMetres,
    ) -> f64 {
        let horizon = prices.len();
        let mut score = prices[t].0 * level.0;
        if t + 1 >= horizon {
            // The last hour carries no flexibility or lookahead concerns.
            return score;
        }

        // Keep the reservoir near the middle of its range while hours remain:
        let next = trajectory::step(plant, storage, level);
        let storage_ratio = (next.0 - plant.s_min.0) / (plant.s_max.0 - plant.s_min.0);
        score -= (storage_ratio - 0.5).abs() * self.tuning.flexibility_weight;

        // Hold generation back when the upcoming hours are pricier:
        let window = &prices[t + 1..horizon.min(t + 1 + self.tuning.lookahead_window)];
        let mean_upcoming =
            window.iter().map(|price| price.0).sum::<f64>() / window.len() as f64;
        if mean_upcoming > prices[t].0 {
            score -=
                (level.0 - plant.p_min.0) * (mean_upcoming - prices[t].0) * self.tuning.lookahead_weight;
        }
        score
    }

    /// Pairwise hour-swap improvement: each sweep applies the first swap that
    /// raises revenue while keeping the whole trajectory within bounds, and
    /// the pass stops early once a sweep finds none.
    fn improve(
        &self,
        prices: &[UsdPerMegawattHour],
        plant: &PlantArgs,
        power: &mut [Megawatts],
    ) -> usize {
        let mut n_swaps = 0;
        for _ in 0..self.tuning.max_sweeps {
            let Some((i, j)) = Self::find_improving_swap(prices, plant, power) else {
                break;
            };
            power.swap(i, j);
            n_swaps += 1;
            trace!(i, j, "swapped");
        }
        n_swaps
    }

    fn find_improving_swap(
        prices: &[UsdPerMegawattHour],
        plant: &PlantArgs,
        power: &[Megawatts],
    ) -> Option<(usize, usize)> {
        let horizon = power.len();
        for i in 0..horizon {
            for j in (i + 1)..horizon {
                if power[i] == power[j] || prices[i] == prices[j] {
                    continue;
                }
                let current = prices[i].0 * power[i].0 + prices[j].0 * power[j].0;
                let swapped = prices[i].0 * power[j].0 + prices[j].0 * power[i].0;
                if swapped <= current {
                    continue;
                }
                // The swap pays off; accept it only if the whole trajectory
                // stays within the storage bounds.
                let mut candidate = power.to_vec();
                candidate.swap(i, j);
                if trajectory::is_feasible(plant, &candidate) {
                    return Some((i, j));
                }
            }
        }
        None
    }
}
