use crate::core::config::TRADING_DAYS_PER_YEAR;
use crate::simulation::portfolio::PortfolioPaths;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Day-over-day simple returns, `x[t] / x[t-1] - 1`, of length `len - 1`.
///
/// # Examples
///
/// ```
/// use fx_hedge_sim::analytics::risk_return::simple_returns;
///
/// let r = simple_returns(&[100.0, 110.0, 99.0]);
/// assert_eq!(r.len(), 2);
/// assert!((r[0] - 0.10).abs() < 1e-12);
/// assert!((r[1] + 0.10).abs() < 1e-12);
/// ```
pub fn simple_returns(values: &[f64]) -> Vec<f64> {
    values.windows(2).map(|w| w[1] / w[0] - 1.0).collect()
}

fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Sample standard deviation (n - 1 denominator). Zero for fewer than two points.
fn sample_std(values: &[f64]) -> f64 {
    if values.len() < 2 {
        return 0.0;
    }
    let m = mean(values);
    let ss: f64 = values.iter().map(|v| (v - m) * (v - m)).sum();
    (ss / (values.len() - 1) as f64).sqrt()
}

/// Mean daily return scaled to a year, in percent.
pub fn annualized_return(returns: &[f64]) -> f64 {
    mean(returns) * TRADING_DAYS_PER_YEAR * 100.0
}

/// Daily return standard deviation scaled to a year, in percent.
pub fn annualized_volatility(returns: &[f64]) -> f64 {
    sample_std(returns) * TRADING_DAYS_PER_YEAR.sqrt() * 100.0
}

/// Annualized risk and return of one strategy's value path.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskReturnPoint {
    pub strategy: String,
    pub annual_return_pct: f64,
    pub annual_volatility_pct: f64,
    pub final_value: f64,
    /// Total return over the whole horizon, in percent.
    pub total_return_pct: f64,
}

impl RiskReturnPoint {
    pub fn from_values(strategy: impl Into<String>, values: &[f64]) -> Self {
        let returns = simple_returns(values);
        let (first, last) = match (values.first(), values.last()) {
            (Some(first), Some(last)) => (*first, *last),
            _ => (f64::NAN, f64::NAN),
        };
        Self {
            strategy: strategy.into(),
            annual_return_pct: annualized_return(&returns),
            annual_volatility_pct: annualized_volatility(&returns),
            final_value: last,
            total_return_pct: (last / first - 1.0) * 100.0,
        }
    }
}

impl fmt::Display for RiskReturnPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:<22} return {:>7.2}%  vol {:>6.2}%  final {:>14.2}  total {:>6.2}%",
            self.strategy,
            self.annual_return_pct,
            self.annual_volatility_pct,
            self.final_value,
            self.total_return_pct
        )
    }
}

/// Risk-return figures for every strategy, in simulation order.
pub fn risk_return_profile(paths: &PortfolioPaths) -> Vec<RiskReturnPoint> {
    paths
        .iter()
        .map(|(strategy, values)| RiskReturnPoint::from_values(strategy.name.clone(), values))
        .collect()
}
