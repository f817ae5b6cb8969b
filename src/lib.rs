//! # fx-hedge-sim
//!
//! Synthetic FX rate paths and hedged portfolio value paths, rendered as
//! static charts for documentation.
//!
//! Each foreign currency follows a seeded geometric random walk against the
//! base currency. Portfolio values compound a base return, the weighted FX
//! moves scaled by `1 - hedge_ratio`, and a normal shock, once per strategy.
//!
//! ## Architecture
//!
//! - **core**: Currencies, hedge strategies, run configuration
//! - **simulation**: Seeded RNG, rate path and portfolio path generators
//! - **analytics**: Simple returns and annualized risk/return
//! - **render**: PNG chart output
//! - **pipeline**: One-call run from configuration to chart files

pub mod analytics;
pub mod core;
pub mod pipeline;
pub mod render;
pub mod simulation;

/// Convenience re-exports for common usage.
pub mod prelude {
    pub use crate::analytics::risk_return::RiskReturnPoint;
    pub use crate::core::config::SimulationConfig;
    pub use crate::core::currency::{CurrencyCode, CurrencyParams, PortfolioWeights};
    pub use crate::core::strategy::HedgeStrategy;
    pub use crate::pipeline::{run, simulate, RunReport, Simulation};
    pub use crate::simulation::fx_paths::{RatePathGenerator, RatePaths};
    pub use crate::simulation::portfolio::{NoiseMode, PortfolioPathGenerator, PortfolioPaths};
}
