//! Simulation configuration.
//!
//! Every knob of a run lives in [`SimulationConfig`]. The defaults reproduce
//! the documentation charts; a JSON file may override any subset of fields.

use crate::core::currency::{CurrencyCode, CurrencyParams, PortfolioWeights};
use crate::core::strategy::HedgeStrategy;
use crate::simulation::portfolio::NoiseMode;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Trading days per year, used for the daily time step and for annualization.
pub const TRADING_DAYS_PER_YEAR: f64 = 252.0;

/// Errors arising from loading or validating a configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("simulation horizon must be at least one day")]
    EmptyHorizon,
    #[error("base currency {0} is not among the tracked currencies")]
    MissingBaseCurrency(CurrencyCode),
    #[error("currency {0} is listed more than once")]
    DuplicateCurrency(CurrencyCode),
    #[error("currencies {first} and {second} share seed offset {offset}")]
    DuplicateSeedOffset {
        first: CurrencyCode,
        second: CurrencyCode,
        offset: u64,
    },
    #[error("strategies '{first}' and '{second}' share seed offset {offset} under independent noise")]
    DuplicateStrategySeedOffset {
        first: String,
        second: String,
        offset: u64,
    },
    #[error("portfolio weight given for untracked currency {0}")]
    UnknownWeight(CurrencyCode),
    #[error("at least one hedge strategy is required")]
    NoStrategies,
    #[error("unknown noise mode '{0}' (expected shared, independent or common)")]
    UnknownNoiseMode(String),
}

/// Full parameter set for one simulation run.
///
/// # Examples
///
/// ```
/// use fx_hedge_sim::core::config::SimulationConfig;
///
/// let config = SimulationConfig::default();
/// assert_eq!(config.days, 180);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Number of simulated days, including day 0.
    pub days: usize,
    pub start_date: NaiveDate,
    pub initial_portfolio_value: f64,
    /// Return added to every day regardless of strategy.
    pub base_daily_return: f64,
    /// Standard deviation of the daily idiosyncratic portfolio shock.
    pub shock_volatility: f64,
    /// Per-currency generators are seeded with `base_seed + seed_offset` in
    /// the currency stream, disjoint from the shock stream.
    pub base_seed: u64,
    /// Seed for the portfolio shock generator(s).
    pub shock_seed: u64,
    pub noise_mode: NoiseMode,
    /// Reference currency; its rate is fixed at 1.0.
    pub base_currency: CurrencyCode,
    /// Tracked currencies, in the order they are simulated and charted.
    pub currencies: Vec<CurrencyParams>,
    pub weights: PortfolioWeights,
    pub strategies: Vec<HedgeStrategy>,
    /// Directory the charts are written to.
    pub output_dir: PathBuf,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        let weights = [
            ("USD", 0.50),
            ("EUR", 0.20),
            ("GBP", 0.10),
            ("JPY", 0.15),
            ("EM_BASKET", 0.05),
        ]
        .into_iter()
        .map(|(code, w)| (CurrencyCode::new(code), w))
        .collect();

        Self {
            days: 180,
            start_date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap_or_default(),
            initial_portfolio_value: 100_000_000.0,
            base_daily_return: 0.0003,
            shock_volatility: 0.008,
            base_seed: 42,
            shock_seed: 42,
            noise_mode: NoiseMode::Shared,
            base_currency: CurrencyCode::new("USD"),
            currencies: vec![
                CurrencyParams::identity("USD"),
                CurrencyParams::new("EUR", 1.10, 0.10, -0.001, 1),
                CurrencyParams::new("GBP", 1.25, 0.12, -0.001, 2),
                // roughly 140 JPY per USD
                CurrencyParams::new("JPY", 0.007, 0.10, -0.0005, 3),
                CurrencyParams::new("EM_BASKET", 0.85, 0.15, -0.002, 4),
            ],
            weights,
            strategies: HedgeStrategy::standard_set(),
            output_dir: PathBuf::from("images"),
        }
    }
}

impl SimulationConfig {
    /// Load a configuration from a JSON file and validate it.
    ///
    /// Fields missing from the file keep their default values.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_json(&content)?;
        log::info!("loaded configuration from {}", path.display());
        Ok(config)
    }

    /// Parse and validate a configuration from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: SimulationConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Check the structural consistency of the configuration.
    ///
    /// Numeric model parameters are deliberately left unchecked.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.days == 0 {
            return Err(ConfigError::EmptyHorizon);
        }
        if self.strategies.is_empty() {
            return Err(ConfigError::NoStrategies);
        }
        if !self
            .currencies
            .iter()
            .any(|c| c.symbol == self.base_currency)
        {
            return Err(ConfigError::MissingBaseCurrency(self.base_currency.clone()));
        }

        let mut seen_symbols = HashSet::new();
        let mut seen_offsets: HashMap<u64, &CurrencyCode> = HashMap::new();
        for params in &self.currencies {
            if !seen_symbols.insert(&params.symbol) {
                return Err(ConfigError::DuplicateCurrency(params.symbol.clone()));
            }
            if params.symbol == self.base_currency {
                continue;
            }
            if let Some(first) = seen_offsets.insert(params.seed_offset, &params.symbol) {
                return Err(ConfigError::DuplicateSeedOffset {
                    first: first.clone(),
                    second: params.symbol.clone(),
                    offset: params.seed_offset,
                });
            }
        }

        for currency in self.weights.currencies() {
            if !seen_symbols.contains(currency) {
                return Err(ConfigError::UnknownWeight(currency.clone()));
            }
        }

        // only independent noise seeds per strategy
        if self.noise_mode == NoiseMode::Independent {
            let mut seen: HashMap<u64, &str> = HashMap::new();
            for strategy in &self.strategies {
                if let Some(first) = seen.insert(strategy.seed_offset, &strategy.name) {
                    return Err(ConfigError::DuplicateStrategySeedOffset {
                        first: first.to_string(),
                        second: strategy.name.clone(),
                        offset: strategy.seed_offset,
                    });
                }
            }
        }
        Ok(())
    }

    /// Tracked currencies other than the base currency, in configuration order.
    pub fn foreign_currencies(&self) -> impl Iterator<Item = &CurrencyParams> {
        self.currencies
            .iter()
            .filter(move |c| c.symbol != self.base_currency)
    }

    /// Length of one simulation step in years.
    pub fn dt(&self) -> f64 {
        1.0 / TRADING_DAYS_PER_YEAR
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_default_is_valid() {
        let config = SimulationConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.currencies.len(), 5);
        assert_eq!(config.strategies.len(), 3);
        assert_eq!(
            config.start_date,
            NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()
        );
    }

    #[test]
    fn test_default_weights_sum_to_one() {
        let config = SimulationConfig::default();
        assert_relative_eq!(config.weights.total(), 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_foreign_currencies_skip_base() {
        let config = SimulationConfig::default();
        let symbols: Vec<&str> = config
            .foreign_currencies()
            .map(|c| c.symbol.as_str())
            .collect();
        assert_eq!(symbols, vec!["EUR", "GBP", "JPY", "EM_BASKET"]);
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config = SimulationConfig::from_json(r#"{"days": 30, "noise_mode": "independent"}"#)
            .unwrap();
        assert_eq!(config.days, 30);
        assert_eq!(config.noise_mode, NoiseMode::Independent);
        assert_eq!(config.initial_portfolio_value, 100_000_000.0);
        assert_eq!(config.currencies.len(), 5);
    }

    #[test]
    fn test_json_round_trip() {
        let config = SimulationConfig::default();
        let json = serde_json::to_string_pretty(&config).unwrap();
        let parsed = SimulationConfig::from_json(&json).unwrap();
        assert_eq!(parsed, config);
    }

    #[test]
    fn test_zero_days_rejected() {
        let config = SimulationConfig {
            days: 0,
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::EmptyHorizon)));
    }

    #[test]
    fn test_duplicate_seed_offset_rejected() {
        let mut config = SimulationConfig::default();
        config.currencies[2].seed_offset = 1;
        match config.validate() {
            Err(ConfigError::DuplicateSeedOffset {
                first,
                second,
                offset,
            }) => {
                assert_eq!(first.as_str(), "EUR");
                assert_eq!(second.as_str(), "GBP");
                assert_eq!(offset, 1);
            }
            other => panic!("expected duplicate seed offset, got {:?}", other),
        }
    }

    #[test]
    fn test_duplicate_strategy_offset_rejected_under_independent_noise() {
        let mut config = SimulationConfig {
            noise_mode: NoiseMode::Independent,
            ..Default::default()
        };
        config.strategies[2].seed_offset = 1;
        match config.validate() {
            Err(ConfigError::DuplicateStrategySeedOffset {
                first,
                second,
                offset,
            }) => {
                assert_eq!(first, "Partial Hedge (50%)");
                assert_eq!(second, "Full Hedge (100%)");
                assert_eq!(offset, 1);
            }
            other => panic!("expected duplicate strategy offset, got {:?}", other),
        }

        // offsets are unused by the other modes
        config.noise_mode = NoiseMode::Shared;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_strategy_offsets_may_equal_currency_offsets() {
        // EUR uses offset 1 and so does the partial hedge; the streams are disjoint
        let config = SimulationConfig {
            noise_mode: NoiseMode::Independent,
            ..Default::default()
        };
        assert_eq!(config.currencies[1].seed_offset, config.strategies[1].seed_offset);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_duplicate_currency_rejected() {
        let mut config = SimulationConfig::default();
        config
            .currencies
            .push(CurrencyParams::new("EUR", 1.0, 0.1, 0.0, 9));
        assert!(matches!(
            config.validate(),
            Err(ConfigError::DuplicateCurrency(_))
        ));
    }

    #[test]
    fn test_unknown_weight_rejected() {
        let mut config = SimulationConfig::default();
        config.weights.set(CurrencyCode::new("CHF"), 0.1);
        assert!(matches!(
            config.validate(),
            Err(ConfigError::UnknownWeight(code)) if code.as_str() == "CHF"
        ));
    }

    #[test]
    fn test_missing_base_rejected() {
        let config = SimulationConfig {
            base_currency: CurrencyCode::new("CHF"),
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::MissingBaseCurrency(_))
        ));
    }

    #[test]
    fn test_no_strategies_rejected() {
        let config = SimulationConfig {
            strategies: Vec::new(),
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::NoStrategies)));
    }

    #[test]
    fn test_negative_volatility_accepted() {
        let mut config = SimulationConfig::default();
        config.currencies[1].annual_volatility = -0.1;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_malformed_json() {
        assert!(matches!(
            SimulationConfig::from_json("{ not json"),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn test_missing_file() {
        let result = SimulationConfig::from_file("/nonexistent/fx-hedge-sim.json");
        assert!(matches!(result, Err(ConfigError::Io { .. })));
    }
}
