//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading tariff
//! configurations from YAML files.

use std::fs;
use std::path::Path;

use crate::error::{EngineError, EngineResult};

use super::types::{AdjustmentConfig, HolidayCalendar, PricingConfig, TariffConfig};

/// Loads and provides access to pricing configuration.
///
/// # Directory Structure
///
/// The configuration directory should have the following structure:
/// ```text
/// config/lingua_moscow/
/// ├── tariff.yaml       # Currency, weekend multiplier, time bands, limits
/// ├── holidays.yaml     # Fixed month/day holidays
/// └── adjustments.yaml  # Auto thresholds and the eight chain steps
/// ```
///
/// # Example
///
/// ```no_run
/// use quote_engine::config::ConfigLoader;
///
/// let loader = ConfigLoader::load("./config/lingua_moscow").unwrap();
/// println!("Tariff: {}", loader.tariff().name);
/// ```
#[derive(Debug, Clone, Default)]
pub struct ConfigLoader {
    config: PricingConfig,
}

impl ConfigLoader {
    /// Loads configuration from the specified directory.
    ///
    /// # Returns
    ///
    /// Returns a `ConfigLoader` instance on success, or an error if:
    /// - Any required file is missing (`ConfigNotFound`)
    /// - Any file contains invalid YAML or out-of-range values (`ConfigParseError`)
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();

        let tariff_path = path.join("tariff.yaml");
        let tariff = Self::load_yaml::<TariffConfig>(&tariff_path)?;
        Self::check(&tariff_path, tariff.validate())?;

        let holidays_path = path.join("holidays.yaml");
        let holidays = Self::load_yaml::<HolidayCalendar>(&holidays_path)?;
        Self::check(&holidays_path, holidays.validate())?;

        let adjustments_path = path.join("adjustments.yaml");
        let adjustments = Self::load_yaml::<AdjustmentConfig>(&adjustments_path)?;
        Self::check(&adjustments_path, adjustments.validate())?;

        tracing::debug!(
            path = %path.display(),
            tariff = %tariff.code,
            holidays = holidays.holidays.len(),
            "Loaded pricing configuration"
        );

        Ok(Self {
            config: PricingConfig::new(tariff, holidays, adjustments),
        })
    }

    /// Wraps an already-built configuration.
    pub fn from_config(config: PricingConfig) -> Self {
        Self { config }
    }

    /// Loads and parses a YAML file.
    fn load_yaml<T: serde::de::DeserializeOwned>(path: &Path) -> EngineResult<T> {
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        serde_yaml::from_str(&content).map_err(|e| EngineError::ConfigParseError {
            path: path_str,
            message: e.to_string(),
        })
    }

    fn check(path: &Path, result: Result<(), String>) -> EngineResult<()> {
        result.map_err(|message| EngineError::ConfigParseError {
            path: path.display().to_string(),
            message,
        })
    }

    /// Returns the underlying pricing configuration.
    pub fn config(&self) -> &PricingConfig {
        &self.config
    }

    /// Returns the tariff settings.
    pub fn tariff(&self) -> &TariffConfig {
        self.config.tariff()
    }

    /// Returns the holiday table.
    pub fn holidays(&self) -> &HolidayCalendar {
        self.config.holidays()
    }

    /// Returns the adjustment settings.
    pub fn adjustments(&self) -> &AdjustmentConfig {
        self.config.adjustments()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;
    use std::path::PathBuf;
    use std::str::FromStr;

    fn config_path() -> &'static str {
        "./config/lingua_moscow"
    }

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn scratch_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!(
            "quote_engine_{}_{}",
            name,
            uuid::Uuid::new_v4().simple()
        ));
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    fn copy_shipped_config(dir: &Path) {
        for file in ["tariff.yaml", "holidays.yaml", "adjustments.yaml"] {
            fs::copy(Path::new(config_path()).join(file), dir.join(file)).unwrap();
        }
    }

    #[test]
    fn test_load_valid_configuration() {
        let result = ConfigLoader::load(config_path());
        assert!(result.is_ok(), "Failed to load config: {:?}", result.err());

        let loader = result.unwrap();
        assert_eq!(loader.tariff().code, "lingua_moscow");
        assert_eq!(loader.tariff().currency_symbol, "₽");
    }

    #[test]
    fn test_shipped_configuration_matches_defaults() {
        let loader = ConfigLoader::load(config_path()).unwrap();
        let defaults = PricingConfig::default();

        assert_eq!(loader.tariff(), defaults.tariff());
        assert_eq!(loader.adjustments(), defaults.adjustments());
        assert_eq!(loader.holidays().holidays.len(), defaults.holidays().holidays.len());
    }

    #[test]
    fn test_weekend_multiplier_loaded() {
        let loader = ConfigLoader::load(config_path()).unwrap();
        assert_eq!(loader.tariff().weekend_multiplier, dec("1.5"));
    }

    #[test]
    fn test_adjustment_factors_loaded() {
        let loader = ConfigLoader::load(config_path()).unwrap();
        let adjustments = loader.adjustments();
        assert_eq!(adjustments.early_registration.factor, dec("0.90"));
        assert_eq!(adjustments.interactive.factor, dec("1.50"));
        assert_eq!(adjustments.supplementary.amount, dec("2000"));
        assert_eq!(adjustments.auto.early_registration_lead_days, 30);
    }

    #[test]
    fn test_load_missing_directory_returns_error() {
        let result = ConfigLoader::load("/nonexistent/path");
        match result {
            Err(EngineError::ConfigNotFound { path }) => {
                assert!(path.contains("tariff.yaml"));
            }
            _ => panic!("Expected ConfigNotFound error"),
        }
    }

    #[test]
    fn test_malformed_yaml_returns_parse_error() {
        let dir = scratch_dir("malformed");
        copy_shipped_config(&dir);
        fs::write(dir.join("holidays.yaml"), "region: RU\nholidays: [oops").unwrap();

        match ConfigLoader::load(&dir) {
            Err(EngineError::ConfigParseError { path, .. }) => {
                assert!(path.contains("holidays.yaml"));
            }
            other => panic!("Expected ConfigParseError, got {:?}", other),
        }
        fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_invalid_values_return_parse_error() {
        let dir = scratch_dir("invalid");
        copy_shipped_config(&dir);
        let tariff = fs::read_to_string(dir.join("tariff.yaml")).unwrap();
        fs::write(
            dir.join("tariff.yaml"),
            tariff.replace("weekend_multiplier: \"1.5\"", "weekend_multiplier: \"0\""),
        )
        .unwrap();

        match ConfigLoader::load(&dir) {
            Err(EngineError::ConfigParseError { message, .. }) => {
                assert_eq!(message, "weekend_multiplier must be positive");
            }
            other => panic!("Expected ConfigParseError, got {:?}", other),
        }
        fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_default_loader_uses_stock_tariff() {
        let loader = ConfigLoader::default();
        assert_eq!(loader.tariff().evening.surcharge, dec("1000"));
        assert_eq!(loader.config(), &PricingConfig::default());
    }
}
