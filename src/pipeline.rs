//! End-to-end run: rates, portfolio paths, analytics, charts.

use crate::analytics::risk_return::{risk_return_profile, RiskReturnPoint};
use crate::core::config::{ConfigError, SimulationConfig};
use crate::render::charts::ChartKind;
use crate::render::{ChartData, ChartRenderer, RenderError};
use crate::simulation::fx_paths::{RatePathGenerator, RatePaths};
use crate::simulation::portfolio::{PortfolioPathGenerator, PortfolioPaths};
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Render(#[from] RenderError),
}

/// In-memory result of the generators and analytics.
#[derive(Debug, Clone, PartialEq)]
pub struct Simulation {
    pub rates: RatePaths,
    pub portfolio: PortfolioPaths,
    pub risk_return: Vec<RiskReturnPoint>,
}

/// What a full run produced.
#[derive(Debug, Clone)]
pub struct RunReport {
    pub simulation: Simulation,
    pub charts: Vec<PathBuf>,
}

/// Validate the configuration and run the generators. No I/O.
pub fn simulate(config: &SimulationConfig) -> Result<Simulation, ConfigError> {
    config.validate()?;
    let rates = RatePathGenerator::new(config).generate();
    let portfolio = PortfolioPathGenerator::new(config).generate(&rates);
    let risk_return = risk_return_profile(&portfolio);
    Ok(Simulation {
        rates,
        portfolio,
        risk_return,
    })
}

/// Simulate and write all three charts.
pub fn run(config: &SimulationConfig) -> Result<RunReport, PipelineError> {
    run_with_progress(config, |_| {})
}

/// Like [`run`], calling `progress` before each chart is rendered.
pub fn run_with_progress(
    config: &SimulationConfig,
    mut progress: impl FnMut(ChartKind),
) -> Result<RunReport, PipelineError> {
    let simulation = simulate(config)?;
    let renderer = ChartRenderer::new(&config.output_dir)?;
    let data = ChartData {
        rates: &simulation.rates,
        portfolio: &simulation.portfolio,
        risk_return: &simulation.risk_return,
        base_currency: &config.base_currency,
    };

    let mut charts = Vec::with_capacity(ChartKind::ALL.len());
    for kind in ChartKind::ALL {
        progress(kind);
        charts.push(renderer.render(kind, &data)?);
    }
    log::info!(
        "rendered {} charts into {}",
        charts.len(),
        renderer.output_dir().display()
    );

    Ok(RunReport { simulation, charts })
}
