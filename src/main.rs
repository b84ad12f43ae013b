mod archive;
mod cli;
mod core;
mod forecast;
mod prelude;
mod quantity;
mod tables;

use std::fs;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use crate::{
    cli::{Args, Command, PlanArgs},
    core::Dispatcher,
    forecast::PriceForecast,
    prelude::*,
};

fn main() -> Result {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    match Args::parse().command {
        Command::Plan(args) => plan(*args),
    }
}

fn plan(args: PlanArgs) -> Result {
    args.plant.validate()?;

    let forecast = PriceForecast::from_path(&args.forecast)?;
    info!(n_prices = forecast.prices.len(), node = %args.node, "loaded the price forecast");
    // Insufficient data is rejected here, before the solver is ever invoked:
    ensure!(
        forecast.prices.len() >= args.plant.horizon,
        "only {} forecast hours available but {} requested",
        forecast.prices.len(),
        args.plant.horizon,
    );

    let schedule = Dispatcher::default().solve(&forecast.prices, &args.plant);
    println!("{}", tables::build_schedule_table(&forecast, &args.plant, &schedule));
    println!("{}", tables::build_summary_table(&args.plant, &schedule));

    if let Some(path) = &args.output {
        fs::write(path, serde_json::to_string_pretty(&schedule)?)
            .with_context(|| format!("failed to write the schedule to `{}`", path.display()))?;
    }
    if let Some(path) = &args.archive {
        // Archival failure must not fail the planning run:
        if let Err(error) = archive::store(path, &args.node, &args.plant, &schedule) {
            warn!("failed to archive the schedule: {error:#}");
        }
    }
    Ok(())
}
