use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::{
    prelude::*,
    quantity::{
        flow::{CubicMetresPerSecond, CubicMetresPerSecondPerMegawatt},
        power::Megawatts,
        volume::CubicMetres,
    },
};

#[derive(Parser)]
#[command(author, version, about, propagate_version = true)]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Main command: read the price forecast, plan the dispatch, and render the schedule.
    #[clap(name = "plan")]
    Plan(Box<PlanArgs>),
}

#[derive(Parser)]
pub struct PlanArgs {
    /// Forecast document assembled by the price collaborator (JSON).
    #[clap(long, env = "FORECAST_PATH")]
    pub forecast: PathBuf,

    /// Market node identifier, opaque to the solver.
    #[clap(long, default_value = "PMontt220", env = "NODE")]
    pub node: String,

    /// Write the solved schedule as JSON to this path.
    #[clap(long)]
    pub output: Option<PathBuf>,

    /// Append the solved schedule to this archive file for later comparison.
    #[clap(long, env = "ARCHIVE_PATH")]
    pub archive: Option<PathBuf>,

    #[clap(flatten)]
    pub plant: PlantArgs,
}

/// Physical plant configuration, immutable for the duration of a request.
#[derive(Copy, Clone, Parser, serde::Serialize)]
pub struct PlantArgs {
    /// Number of hours to plan.
    #[clap(long, default_value = "24", env = "HORIZON")]
    pub horizon: usize,

    /// Minimum generation in megawatts.
    #[clap(long = "p-min", default_value = "0.5", env = "P_MIN")]
    pub p_min: Megawatts,

    /// Maximum generation in megawatts.
    #[clap(long = "p-max", default_value = "3.0", env = "P_MAX")]
    pub p_max: Megawatts,

    /// Initial reservoir storage in cubic metres.
    #[clap(long = "s0", default_value = "25000", env = "S0")]
    pub s0: CubicMetres,

    /// Minimum reservoir storage in cubic metres.
    #[clap(long = "s-min", default_value = "1000", env = "S_MIN")]
    pub s_min: CubicMetres,

    /// Maximum reservoir storage in cubic metres.
    #[clap(long = "s-max", default_value = "50000", env = "S_MAX")]
    pub s_max: CubicMetres,

    /// Water-to-power conversion factor in m³/s per megawatt.
    #[clap(long, default_value = "0.667", env = "KAPPA")]
    pub kappa: CubicMetresPerSecondPerMegawatt,

    /// Constant natural inflow in m³/s.
    #[clap(long, default_value = "1.1", env = "INFLOW")]
    pub inflow: CubicMetresPerSecond,
}

impl PlantArgs {
    /// Reject inconsistent plant configuration before the solver ever runs.
    pub fn validate(&self) -> Result {
        ensure!(self.p_min <= self.p_max, "p-min must not exceed p-max");
        ensure!(self.p_max > Megawatts::ZERO, "p-max must be positive");
        ensure!(self.s_min <= self.s_max, "s-min must not exceed s-max");
        ensure!(
            (self.s_min..=self.s_max).contains(&self.s0),
            "the initial storage must be within the storage bounds",
        );
        ensure!(
            self.kappa > CubicMetresPerSecondPerMegawatt::ZERO,
            "the conversion factor must be positive",
        );
        ensure!(self.inflow >= CubicMetresPerSecond::ZERO, "the inflow must not be negative");
        Ok(())
    }
}

#[cfg(test)]
impl PlantArgs {
    /// The reference plant used throughout the unit tests.
    pub fn test_default(horizon: usize) -> Self {
        Self {
            horizon,
            p_min: Megawatts::from(0.5),
            p_max: Megawatts::from(3.0),
            s0: CubicMetres::from(25000.0),
            s_min: CubicMetres::from(1000.0),
            s_max: CubicMetres::from(50000.0),
            kappa: CubicMetresPerSecondPerMegawatt::from(0.667),
            inflow: CubicMetresPerSecond::from(1.1),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_plant() {
        PlantArgs::test_default(24).validate().unwrap();
    }

    #[test]
    fn test_initial_storage_out_of_bounds() {
        let plant = PlantArgs { s0: CubicMetres::from(100.0), ..PlantArgs::test_default(24) };
        assert!(plant.validate().is_err());
    }

    #[test]
    fn test_inverted_power_bounds() {
        let plant = PlantArgs { p_min: Megawatts::from(4.0), ..PlantArgs::test_default(24) };
        assert!(plant.validate().is_err());
    }
}
