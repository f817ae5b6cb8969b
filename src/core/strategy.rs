use serde::{Deserialize, Serialize};
use std::fmt;

/// A hedging strategy applied to the portfolio's foreign currency exposure.
///
/// The hedge ratio is the fraction of FX exposure neutralized: 0.0 leaves the
/// portfolio fully exposed, 1.0 removes FX moves from its returns entirely.
///
/// # Examples
///
/// ```
/// use fx_hedge_sim::core::strategy::HedgeStrategy;
///
/// let partial = HedgeStrategy::new("Partial Hedge (50%)", 0.5, 1);
/// assert_eq!(partial.exposure(), 0.5);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HedgeStrategy {
    pub name: String,
    pub hedge_ratio: f64,
    /// Added to the shock seed when strategies draw independent noise.
    #[serde(default)]
    pub seed_offset: u64,
}

impl HedgeStrategy {
    pub fn new(name: impl Into<String>, hedge_ratio: f64, seed_offset: u64) -> Self {
        Self {
            name: name.into(),
            hedge_ratio,
            seed_offset,
        }
    }

    /// Fraction of FX moves that still reaches the portfolio.
    pub fn exposure(&self) -> f64 {
        1.0 - self.hedge_ratio
    }

    /// Unhedged, 50% hedged and fully hedged.
    pub fn standard_set() -> Vec<HedgeStrategy> {
        vec![
            HedgeStrategy::new("Unhedged (0%)", 0.0, 0),
            HedgeStrategy::new("Partial Hedge (50%)", 0.5, 1),
            HedgeStrategy::new("Full Hedge (100%)", 1.0, 2),
        ]
    }
}

impl fmt::Display for HedgeStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_set() {
        let set = HedgeStrategy::standard_set();
        let ratios: Vec<f64> = set.iter().map(|s| s.hedge_ratio).collect();
        assert_eq!(ratios, vec![0.0, 0.5, 1.0]);
        assert_eq!(set[0].name, "Unhedged (0%)");
        assert_eq!(set[2].name, "Full Hedge (100%)");
    }

    #[test]
    fn test_full_hedge_has_no_exposure() {
        let full = HedgeStrategy::new("Full", 1.0, 0);
        assert_eq!(full.exposure(), 0.0);
    }

    #[test]
    fn test_seed_offset_defaults_when_missing() {
        let s: HedgeStrategy =
            serde_json::from_str(r#"{"name":"Quarter","hedge_ratio":0.25}"#).unwrap();
        assert_eq!(s.seed_offset, 0);
        assert_eq!(s.to_string(), "Quarter");
    }
}
