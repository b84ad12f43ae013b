use serde::{Deserialize, Serialize};

/// Which solver tier produced a schedule. Callers use this together with
/// [`solver_success`](crate::core::DispatchSchedule::solver_success) to tell
/// optimal results from degraded ones.
#[derive(Copy, Clone, Debug, Deserialize, Eq, PartialEq, Serialize, derive_more::Display)]
#[serde(rename_all = "snake_case")]
pub enum Method {
    /// Exact solution of the full linear program.
    #[display("linear_programming")]
    LinearProgramming,

    /// Discretized local search. The tag is historical: the heuristic grew
    /// out of a dynamic-programming sketch and archived records still carry
    /// this name.
    #[display("dynamic_programming_simple")]
    DynamicProgrammingSimple,

    /// Price-ranked greedy fallback, explicitly non-optimal.
    #[display("greedy_heuristic")]
    GreedyHeuristic,
}
