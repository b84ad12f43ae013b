mod method;
mod schedule;
mod solver;
pub mod trajectory;

pub use self::{
    method::Method,
    schedule::DispatchSchedule,
    solver::{Dispatcher, Greedy, LinearProgramming, LocalSearch, Tier, Tuning},
};
