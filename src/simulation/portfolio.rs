//! Portfolio value paths under different hedge ratios.
//!
//! Every strategy compounds the same daily recurrence
//!
//! ```text
//! V(t) = V(t-1) * (1 + base_return + fx_impact(t) + shock(t))
//! fx_impact(t) = sum over foreign c of weight(c) * r_c(t-1) * (1 - hedge_ratio)
//! ```
//!
//! where `r_c(k)` is the simple return of currency `c` from day `k` to `k+1`
//! and `shock(t) ~ N(0, shock_volatility)`. Values are not clamped.

use crate::analytics::risk_return::simple_returns;
use crate::core::config::{ConfigError, SimulationConfig};
use crate::core::strategy::HedgeStrategy;
use crate::simulation::fx_paths::RatePaths;
use crate::simulation::rng::{RngStream, SimRng};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// How the daily portfolio shocks are drawn across strategies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NoiseMode {
    /// One generator seeded once and advanced through the strategies in order.
    #[default]
    Shared,
    /// One generator per strategy, seeded with `shock_seed + seed_offset` in
    /// the shock stream. Strategy offsets must be distinct.
    Independent,
    /// Every strategy replays the same generator, receiving identical shocks.
    Common,
}

impl fmt::Display for NoiseMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            NoiseMode::Shared => "shared",
            NoiseMode::Independent => "independent",
            NoiseMode::Common => "common",
        };
        write!(f, "{}", name)
    }
}

impl FromStr for NoiseMode {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "shared" => Ok(NoiseMode::Shared),
            "independent" => Ok(NoiseMode::Independent),
            "common" => Ok(NoiseMode::Common),
            _ => Err(ConfigError::UnknownNoiseMode(s.to_string())),
        }
    }
}

/// Simulated portfolio values, one series per strategy, on a shared day index.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PortfolioPaths {
    dates: Vec<NaiveDate>,
    series: Vec<(HedgeStrategy, Vec<f64>)>,
}

impl PortfolioPaths {
    pub fn dates(&self) -> &[NaiveDate] {
        &self.dates
    }

    pub fn len(&self) -> usize {
        self.dates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }

    /// Value series for the strategy with the given name.
    pub fn values(&self, strategy: &str) -> Option<&[f64]> {
        self.series
            .iter()
            .find(|(s, _)| s.name == strategy)
            .map(|(_, values)| values.as_slice())
    }

    pub fn strategies(&self) -> impl Iterator<Item = &HedgeStrategy> {
        self.series.iter().map(|(s, _)| s)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&HedgeStrategy, &[f64])> {
        self.series.iter().map(|(s, values)| (s, values.as_slice()))
    }
}

/// Day-over-day simple returns of each foreign currency, with the weight applied.
///
/// Precomputed once and shared by all strategies.
struct WeightedFxReturns {
    entries: Vec<(f64, Vec<f64>)>,
}

impl WeightedFxReturns {
    fn new(config: &SimulationConfig, rates: &RatePaths) -> Self {
        let entries = config
            .foreign_currencies()
            .filter_map(|params| {
                let series = rates.rates(&params.symbol)?;
                Some((config.weights.weight(&params.symbol), simple_returns(series)))
            })
            .collect();
        Self { entries }
    }

    /// Weighted FX contribution to day `t`'s return for the given hedge ratio.
    ///
    /// Uses the currency moves from day `t-1` to day `t`. Day 0 and NaN returns
    /// contribute nothing.
    fn impact(&self, t: usize, hedge_ratio: f64) -> f64 {
        if t == 0 {
            return 0.0;
        }
        let exposure = 1.0 - hedge_ratio;
        let mut impact = 0.0;
        for (weight, returns) in &self.entries {
            let change = match returns.get(t - 1) {
                Some(r) if !r.is_nan() => *r,
                _ => 0.0,
            };
            impact += weight * change * exposure;
        }
        impact
    }
}

/// FX impact on day `t` for one hedge ratio, computed directly from rate paths.
///
/// # Examples
///
/// ```
/// use fx_hedge_sim::core::config::SimulationConfig;
/// use fx_hedge_sim::simulation::fx_paths::RatePathGenerator;
/// use fx_hedge_sim::simulation::portfolio::fx_impact;
///
/// let config = SimulationConfig::default();
/// let rates = RatePathGenerator::new(&config).generate();
/// assert_eq!(fx_impact(&config, &rates, 10, 1.0), 0.0);
/// ```
pub fn fx_impact(config: &SimulationConfig, rates: &RatePaths, t: usize, hedge_ratio: f64) -> f64 {
    WeightedFxReturns::new(config, rates).impact(t, hedge_ratio)
}

/// Generates portfolio value paths for each configured hedge strategy.
pub struct PortfolioPathGenerator<'a> {
    config: &'a SimulationConfig,
}

impl<'a> PortfolioPathGenerator<'a> {
    pub fn new(config: &'a SimulationConfig) -> Self {
        Self { config }
    }

    /// Compound one strategy's value path, drawing its shocks from `rng`.
    fn compound(
        &self,
        strategy: &HedgeStrategy,
        fx: &WeightedFxReturns,
        days: usize,
        rng: &mut SimRng,
    ) -> Vec<f64> {
        let mut values = Vec::with_capacity(days);
        if days == 0 {
            return values;
        }
        values.push(self.config.initial_portfolio_value);
        for t in 1..days {
            let shock = rng.normal(0.0, self.config.shock_volatility);
            let daily_return =
                self.config.base_daily_return + fx.impact(t, strategy.hedge_ratio) + shock;
            let prev = values[t - 1];
            values.push(prev * (1.0 + daily_return));
        }
        values
    }

    /// Simulate every strategy against the given rate paths.
    pub fn generate(&self, rates: &RatePaths) -> PortfolioPaths {
        let days = rates.len();
        let fx = WeightedFxReturns::new(self.config, rates);
        let mut shared = SimRng::new(RngStream::Shock, self.config.shock_seed);

        let series = self
            .config
            .strategies
            .iter()
            .map(|strategy| {
                let values = match self.config.noise_mode {
                    NoiseMode::Shared => self.compound(strategy, &fx, days, &mut shared),
                    NoiseMode::Independent => {
                        let seed = self.config.shock_seed.wrapping_add(strategy.seed_offset);
                        let mut rng = SimRng::new(RngStream::Shock, seed);
                        self.compound(strategy, &fx, days, &mut rng)
                    }
                    NoiseMode::Common => {
                        let mut rng = SimRng::new(RngStream::Shock, self.config.shock_seed);
                        self.compound(strategy, &fx, days, &mut rng)
                    }
                };

                log::debug!(
                    "{}: final value {:.2}",
                    strategy.name,
                    values.last().copied().unwrap_or(f64::NAN)
                );
                if values.iter().any(|v| !v.is_finite() || *v <= 0.0) {
                    log::warn!(
                        "{}: portfolio path contains non-positive or non-finite values",
                        strategy.name
                    );
                }
                (strategy.clone(), values)
            })
            .collect();

        log::info!(
            "generated {} portfolio paths with {} noise",
            self.config.strategies.len(),
            self.config.noise_mode
        );
        PortfolioPaths {
            dates: rates.dates().to_vec(),
            series,
        }
    }
}
