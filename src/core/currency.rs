use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// ISO 4217-style currency code.
///
/// Accepts arbitrary identifiers so synthetic baskets such as `EM_BASKET`
/// can sit alongside real fiat currencies.
///
/// # Examples
///
/// ```
/// use fx_hedge_sim::core::currency::CurrencyCode;
///
/// let usd = CurrencyCode::new("USD");
/// let eur = CurrencyCode::new("EUR");
/// assert_ne!(usd, eur);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CurrencyCode(String);

impl CurrencyCode {
    pub fn new(code: impl Into<String>) -> Self {
        Self(code.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CurrencyCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for CurrencyCode {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

/// Simulation parameters for one tracked currency, quoted in the base currency.
///
/// Volatility and drift are annualized. Values are taken as given; a negative
/// volatility is not rejected and simply flips the sign of the diffusion term.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrencyParams {
    pub symbol: CurrencyCode,
    /// Rate on day 0.
    pub initial_rate: f64,
    pub annual_volatility: f64,
    pub annual_drift: f64,
    /// Added to the configured base seed to seed this currency's generator.
    pub seed_offset: u64,
}

impl CurrencyParams {
    pub fn new(
        symbol: impl Into<CurrencyCode>,
        initial_rate: f64,
        annual_volatility: f64,
        annual_drift: f64,
        seed_offset: u64,
    ) -> Self {
        Self {
            symbol: symbol.into(),
            initial_rate,
            annual_volatility,
            annual_drift,
            seed_offset,
        }
    }

    /// The identity record for the reference currency: rate 1.0, no vol, no drift.
    pub fn identity(symbol: impl Into<CurrencyCode>) -> Self {
        Self::new(symbol, 1.0, 0.0, 0.0, 0)
    }
}

/// Portfolio allocation by currency.
///
/// Weights need not sum to one. Currencies without an entry carry zero weight.
///
/// # Examples
///
/// ```
/// use fx_hedge_sim::core::currency::{CurrencyCode, PortfolioWeights};
///
/// let mut weights = PortfolioWeights::new();
/// weights.set(CurrencyCode::new("USD"), 0.6);
/// weights.set(CurrencyCode::new("EUR"), 0.4);
///
/// assert_eq!(weights.weight(&CurrencyCode::new("EUR")), 0.4);
/// assert_eq!(weights.weight(&CurrencyCode::new("JPY")), 0.0);
/// assert!((weights.total() - 1.0).abs() < 1e-12);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PortfolioWeights(BTreeMap<CurrencyCode, f64>);

impl PortfolioWeights {
    pub fn new() -> Self {
        Self(BTreeMap::new())
    }

    pub fn set(&mut self, currency: CurrencyCode, weight: f64) {
        self.0.insert(currency, weight);
    }

    pub fn weight(&self, currency: &CurrencyCode) -> f64 {
        self.0.get(currency).copied().unwrap_or(0.0)
    }

    /// Sum of all weights.
    pub fn total(&self) -> f64 {
        self.0.values().sum()
    }

    pub fn currencies(&self) -> impl Iterator<Item = &CurrencyCode> {
        self.0.keys()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<(CurrencyCode, f64)> for PortfolioWeights {
    fn from_iter<I: IntoIterator<Item = (CurrencyCode, f64)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}
