use comfy_table::{Attribute, Cell, CellAlignment, Color, Table, modifiers, presets};
use itertools::Itertools;

use crate::{
    cli::PlantArgs,
    core::DispatchSchedule,
    forecast::PriceForecast,
    quantity::rate::UsdPerMegawattHour,
};

pub fn build_schedule_table(
    forecast: &PriceForecast,
    plant: &PlantArgs,
    schedule: &DispatchSchedule,
) -> Table {
    let median_price = median_price(&forecast.prices[..schedule.power.len()]);
    // Colour the storage cells that sit within 10% of either bound:
    let margin = (plant.s_max - plant.s_min) * 0.1;

    let mut table = Table::new();
    table.load_preset(presets::UTF8_FULL_CONDENSED).apply_modifier(modifiers::UTF8_ROUND_CORNERS);
    table.set_header(vec!["Hour", "Time", "Price", "Power", "Discharge", "Storage"]);
    for (t, power) in schedule.power.iter().enumerate() {
        let price = forecast.prices[t];
        let storage = schedule.storage[t + 1];
        table.add_row(vec![
            Cell::new(t).set_alignment(CellAlignment::Right),
            Cell::new(forecast.timestamps.get(t).map_or("—", String::as_str))
                .add_attribute(Attribute::Dim),
            Cell::new(format!("{:.2}", price.0)).set_alignment(CellAlignment::Right).fg(
                if price >= median_price { Color::Red } else { Color::Green },
            ),
            Cell::new(format!("{:.3}", power.0)).set_alignment(CellAlignment::Right).fg(
                if *power >= (plant.p_min + plant.p_max) * 0.5 {
                    Color::Green
                } else {
                    Color::Reset
                },
            ),
            Cell::new(format!("{:.3}", schedule.discharge[t].0))
                .set_alignment(CellAlignment::Right),
            Cell::new(format!("{:.0}", storage.0)).set_alignment(CellAlignment::Right).fg(
                if storage <= plant.s_min + margin || storage >= plant.s_max - margin {
                    Color::DarkYellow
                } else {
                    Color::Reset
                },
            ),
        ]);
    }
    table
}

#[must_use]
pub fn build_summary_table(plant: &PlantArgs, schedule: &DispatchSchedule) -> Table {
    let final_storage = schedule.storage.last().copied().unwrap_or(plant.s0);
    let mut table = Table::new();
    table.load_preset(presets::UTF8_FULL_CONDENSED).apply_modifier(modifiers::UTF8_ROUND_CORNERS);
    table.add_row(vec![
        Cell::new("Method"),
        Cell::new(schedule.optimization_method.to_string()),
    ]);
    table.add_row(vec![
        Cell::new("Solver success"),
        Cell::new(schedule.solver_success).fg(if schedule.solver_success {
            Color::Green
        } else {
            Color::Red
        }),
    ]);
    table.add_row(vec![
        Cell::new("Revenue"),
        Cell::new(format!("{:.2} USD", schedule.revenue.0)).set_alignment(CellAlignment::Right),
    ]);
    table.add_row(vec![
        Cell::new("Average generation"),
        Cell::new(format!("{:.3} MW", schedule.avg_generation.0))
            .set_alignment(CellAlignment::Right),
    ]);
    table.add_row(vec![
        Cell::new("Peak generation"),
        Cell::new(format!("{:.3} MW", schedule.peak_generation.0))
            .set_alignment(CellAlignment::Right),
    ]);
    table.add_row(vec![
        Cell::new("Capacity factor"),
        Cell::new(format!("{:.1}%", schedule.capacity_factor))
            .set_alignment(CellAlignment::Right),
    ]);
    table.add_row(vec![
        Cell::new("Final storage"),
        Cell::new(format!("{:.0} m³", final_storage.0)).set_alignment(CellAlignment::Right),
    ]);
    table
}

fn median_price(prices: &[UsdPerMegawattHour]) -> UsdPerMegawattHour {
    prices
        .iter()
        .copied()
        .sorted_by(|left, right| left.0.total_cmp(&right.0))
        .nth(prices.len() / 2)
        .unwrap_or(UsdPerMegawattHour::ZERO)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_median_price() {
        let prices: Vec<UsdPerMegawattHour> =
            [30.0, 10.0, 20.0].into_iter().map(UsdPerMegawattHour::from).collect();
        assert_eq!(median_price(&prices), UsdPerMegawattHour::from(20.0));
        assert_eq!(median_price(&[]), UsdPerMegawattHour::ZERO);
    }
}
