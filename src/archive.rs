use std::{collections::BTreeMap, fs, path::Path};

use chrono::Local;
use serde::Serialize;

use crate::{cli::PlantArgs, core::DispatchSchedule, prelude::*};

/// The archived storage trajectory keeps at most one day of hourly values.
const ARCHIVED_STORAGE_LEN: usize = 25;

/// One archived optimization run, for later performance comparison. The
/// archive keeps a single record per day: a later run on the same day
/// overwrites the earlier one.
#[derive(Serialize)]
struct Record<'a> {
    timestamp: String,
    node: &'a str,
    parameters: &'a PlantArgs,
    schedule: DispatchSchedule,
}

/// Store the completed schedule into the local archive file.
/// The caller is expected to log and ignore a failure here, never retry.
pub fn store(
    path: &Path,
    node: &str,
    plant: &PlantArgs,
    schedule: &DispatchSchedule,
) -> Result {
    let mut archive: BTreeMap<String, serde_json::Value> = if path.exists() {
        let raw = fs::read_to_string(path)
            .with_context(|| format!("failed to read the archive from `{}`", path.display()))?;
        serde_json::from_str(&raw).context("failed to parse the existing archive")?
    } else {
        BTreeMap::new()
    };

    let mut schedule = schedule.clone();
    schedule.storage.truncate(ARCHIVED_STORAGE_LEN);

    let now = Local::now();
    let record = Record { timestamp: now.to_rfc3339(), node, parameters: plant, schedule };
    archive.insert(now.format("%Y-%m-%d").to_string(), serde_json::to_value(&record)?);

    fs::write(path, serde_json::to_string_pretty(&archive)?)
        .with_context(|| format!("failed to write the archive to `{}`", path.display()))?;
    info!(date = %now.format("%Y-%m-%d"), "archived the schedule");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        core::Method,
        quantity::rate::UsdPerMegawattHour,
    };

    #[test]
    fn test_archived_storage_is_truncated_to_one_day() {
        let plant = PlantArgs::test_default(30);
        let prices = vec![UsdPerMegawattHour::from(50.0); 30];
        let schedule = DispatchSchedule::from_power(
            Method::GreedyHeuristic,
            false,
            &prices,
            &plant,
            vec![plant.p_min; 30],
        );

        let path = std::env::temp_dir().join("cascada-archive-truncation-test.json");
        let _ = fs::remove_file(&path);
        store(&path, "PMontt220", &plant, &schedule).unwrap();

        let raw = fs::read_to_string(&path).unwrap();
        let archive: BTreeMap<String, serde_json::Value> = serde_json::from_str(&raw).unwrap();
        let record = archive.values().next().unwrap();
        assert_eq!(record["schedule"]["S"].as_array().unwrap().len(), 25);
        assert_eq!(record["schedule"]["P"].as_array().unwrap().len(), 30);
        let _ = fs::remove_file(&path);
    }
}
