//! Configuration loading and management for the quote engine.
//!
//! This module loads tariff configurations from YAML files: the tariff
//! itself, the holiday table, and the adjustment chain settings.
//!
//! # Example
//!
//! ```no_run
//! use quote_engine::config::ConfigLoader;
//!
//! let config = ConfigLoader::load("./config/lingua_moscow").unwrap();
//! println!("Loaded tariff: {}", config.tariff().name);
//! ```

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::{
    AdjustmentConfig, AutoRules, BookingLimits, FixedHoliday, FixedRule, HolidayCalendar,
    MAX_DAYS_AHEAD, PercentageRule, PricingConfig, RuleRef, SlotGrid, TariffConfig, TimeBand,
};
