//! Chart rendering to static PNG files.

pub mod canvas;
pub mod charts;

use crate::analytics::risk_return::RiskReturnPoint;
use crate::core::currency::CurrencyCode;
use crate::simulation::fx_paths::RatePaths;
use crate::simulation::portfolio::PortfolioPaths;
use charts::ChartKind;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors arising from writing chart files.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("failed to create output directory '{path}': {source}")]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to write chart '{path}': {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
}

/// Everything the charts are drawn from.
pub struct ChartData<'a> {
    pub rates: &'a RatePaths,
    pub portfolio: &'a PortfolioPaths,
    pub risk_return: &'a [RiskReturnPoint],
    pub base_currency: &'a CurrencyCode,
}

/// Writes charts into a single output directory.
pub struct ChartRenderer {
    output_dir: PathBuf,
}

impl ChartRenderer {
    /// Create a renderer, creating the output directory if it does not exist.
    pub fn new(output_dir: impl AsRef<Path>) -> Result<Self, RenderError> {
        let output_dir = output_dir.as_ref().to_path_buf();
        fs::create_dir_all(&output_dir).map_err(|source| RenderError::CreateDir {
            path: output_dir.clone(),
            source,
        })?;
        Ok(Self { output_dir })
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Render one chart to its fixed file name and return the written path.
    pub fn render(&self, kind: ChartKind, data: &ChartData<'_>) -> Result<PathBuf, RenderError> {
        let image = match kind {
            ChartKind::FxRates => charts::render_fx_rates(data.rates, data.base_currency),
            ChartKind::PortfolioPerformance => charts::render_portfolio(data.portfolio),
            ChartKind::RiskReturn => charts::render_risk_return(data.risk_return),
        };

        let path = self.output_dir.join(kind.file_name());
        image.save(&path).map_err(|source| RenderError::Write {
            path: path.clone(),
            source,
        })?;
        log::info!(
            "wrote {} ({}x{})",
            path.display(),
            image.width(),
            image.height()
        );
        Ok(path)
    }
}
