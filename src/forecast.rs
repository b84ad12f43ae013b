use std::{fs, path::Path};

use serde::Deserialize;

use crate::{prelude::*, quantity::rate::UsdPerMegawattHour};

/// An already-assembled price forecast, as handed over by the out-of-process
/// forecast collaborator. This module only reads and validates the document;
/// it never fetches anything itself.
#[derive(Deserialize)]
pub struct PriceForecast {
    /// Forecast prices, one per hour.
    pub prices: Vec<UsdPerMegawattHour>,

    /// Optional hour labels parallel to `prices`, carried through for display
    /// and archival only.
    #[serde(default)]
    pub timestamps: Vec<String>,
}

impl PriceForecast {
    pub fn from_path(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path)
            .with_context(|| format!("failed to read the forecast from `{}`", path.display()))?;
        let forecast: Self =
            serde_json::from_str(&raw).context("failed to parse the forecast document")?;
        ensure!(
            forecast.timestamps.is_empty()
                || forecast.timestamps.len() == forecast.prices.len(),
            "the timestamps do not line up with the prices",
        );
        ensure!(
            forecast.prices.iter().all(|price| price.0 >= 0.0),
            "the forecast contains negative prices",
        );
        Ok(forecast)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse() {
        let forecast: PriceForecast = serde_json::from_str(
            r#"{"prices": [52.3, 61.0], "timestamps": ["2025-03-01 00:00", "2025-03-01 01:00"]}"#,
        )
        .unwrap();
        assert_eq!(forecast.prices, vec![
            UsdPerMegawattHour::from(52.3),
            UsdPerMegawattHour::from(61.0)
        ]);
        assert_eq!(forecast.timestamps.len(), 2);
    }

    #[test]
    fn test_timestamps_are_optional() {
        let forecast: PriceForecast = serde_json::from_str(r#"{"prices": [52.3]}"#).unwrap();
        assert!(forecast.timestamps.is_empty());
    }
}
