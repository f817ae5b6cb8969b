//! Synthetic FX rate paths.
//!
//! Each foreign currency follows a discretized geometric random walk,
//!
//! ```text
//! S(t) = S(t-1) * exp((mu - sigma^2 / 2) * dt + sigma * dW(t)),   dW ~ N(0, dt)
//! ```
//!
//! with `dt = 1/252`. The base currency is pinned at 1.0.

use crate::core::config::SimulationConfig;
use crate::core::currency::{CurrencyCode, CurrencyParams};
use crate::simulation::rng::{RngStream, SimRng};
use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};

/// Simulated rate series for every tracked currency on a shared day index.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RatePaths {
    dates: Vec<NaiveDate>,
    series: Vec<(CurrencyCode, Vec<f64>)>,
}

impl RatePaths {
    pub fn dates(&self) -> &[NaiveDate] {
        &self.dates
    }

    /// Number of simulated days.
    pub fn len(&self) -> usize {
        self.dates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }

    /// Rate series for one currency, if tracked.
    pub fn rates(&self, currency: &CurrencyCode) -> Option<&[f64]> {
        self.series
            .iter()
            .find(|(code, _)| code == currency)
            .map(|(_, rates)| rates.as_slice())
    }

    /// All series in simulation order.
    pub fn iter(&self) -> impl Iterator<Item = (&CurrencyCode, &[f64])> {
        self.series
            .iter()
            .map(|(code, rates)| (code, rates.as_slice()))
    }

    /// Rates rescaled so that day 0 equals 1.0.
    pub fn normalized(&self, currency: &CurrencyCode) -> Option<Vec<f64>> {
        let rates = self.rates(currency)?;
        let first = *rates.first()?;
        Some(rates.iter().map(|r| r / first).collect())
    }
}

/// `days` consecutive calendar dates starting at `start`.
pub fn calendar_dates(start: NaiveDate, days: usize) -> Vec<NaiveDate> {
    (0..days)
        .map(|t| start + Duration::days(t as i64))
        .collect()
}

/// Evolve one currency's rate for `days` steps using pre-drawn increments.
///
/// `increments[0]` is ignored: day 0 is fixed at `initial_rate`.
pub fn evolve_rate(params: &CurrencyParams, increments: &[f64], dt: f64) -> Vec<f64> {
    let sigma = params.annual_volatility;
    let drift = (params.annual_drift - 0.5 * sigma * sigma) * dt;

    let mut rates = Vec::with_capacity(increments.len());
    if increments.is_empty() {
        return rates;
    }
    rates.push(params.initial_rate);
    for dw in &increments[1..] {
        let prev = rates[rates.len() - 1];
        rates.push(prev * (drift + sigma * dw).exp());
    }
    rates
}

/// Generates rate paths for a configured currency universe.
pub struct RatePathGenerator<'a> {
    config: &'a SimulationConfig,
}

impl<'a> RatePathGenerator<'a> {
    pub fn new(config: &'a SimulationConfig) -> Self {
        Self { config }
    }

    /// Simulate one path for a single currency with its own seeded generator.
    pub fn generate_currency(&self, params: &CurrencyParams) -> Vec<f64> {
        let days = self.config.days;
        if params.symbol == self.config.base_currency {
            return vec![1.0; days];
        }

        let dt = self.config.dt();
        let seed = self.config.base_seed.wrapping_add(params.seed_offset);
        let mut rng = SimRng::new(RngStream::Currency, seed);
        let increments = rng.normal_vec(0.0, dt.sqrt(), days);
        let rates = evolve_rate(params, &increments, dt);

        log::debug!(
            "{}: seed {} start {:.6} end {:.6}",
            params.symbol,
            seed,
            rates.first().copied().unwrap_or(f64::NAN),
            rates.last().copied().unwrap_or(f64::NAN)
        );
        if rates.iter().any(|r| !r.is_finite() || *r <= 0.0) {
            log::warn!(
                "{}: rate path contains non-positive or non-finite values",
                params.symbol
            );
        }
        rates
    }

    /// Simulate every tracked currency.
    pub fn generate(&self) -> RatePaths {
        let series = self
            .config
            .currencies
            .iter()
            .map(|params| (params.symbol.clone(), self.generate_currency(params)))
            .collect();

        log::info!(
            "generated {} rate paths over {} days",
            self.config.currencies.len(),
            self.config.days
        );
        RatePaths {
            dates: calendar_dates(self.config.start_date, self.config.days),
            series,
        }
    }
}
