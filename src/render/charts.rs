//! The three documentation charts.

use crate::analytics::risk_return::RiskReturnPoint;
use crate::core::currency::CurrencyCode;
use crate::render::canvas::{series_color, tick_precision, Anchor, Canvas, Frame, Scale};
use crate::simulation::fx_paths::RatePaths;
use crate::simulation::portfolio::PortfolioPaths;
use chrono::{Datelike, NaiveDate};
use image::RgbImage;

/// Charts produced by a run, in the order they are rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChartKind {
    FxRates,
    PortfolioPerformance,
    RiskReturn,
}

impl ChartKind {
    pub const ALL: [ChartKind; 3] = [
        ChartKind::FxRates,
        ChartKind::PortfolioPerformance,
        ChartKind::RiskReturn,
    ];

    pub fn file_name(&self) -> &'static str {
        match self {
            ChartKind::FxRates => "fx_rates_evolution.png",
            ChartKind::PortfolioPerformance => "portfolio_performance.png",
            ChartKind::RiskReturn => "risk_return_profile.png",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            ChartKind::FxRates => "FX Rates Evolution (Normalized to Day 1)",
            ChartKind::PortfolioPerformance => "Portfolio Value Evolution by Hedge Strategy",
            ChartKind::RiskReturn => "Risk-Return Profile",
        }
    }

    /// Progress line printed before the chart is rendered.
    pub fn progress_label(&self) -> &'static str {
        match self {
            ChartKind::FxRates => "Creating Chart 1: FX Rates Evolution...",
            ChartKind::PortfolioPerformance => "Creating Chart 2: Portfolio Performance...",
            ChartKind::RiskReturn => "Creating Chart 3: Risk-Return Analysis...",
        }
    }
}

/// Month-start tick positions along a daily date axis, as plot-width fractions.
fn month_ticks(dates: &[NaiveDate]) -> Vec<(f64, String)> {
    let span = dates.len().saturating_sub(1).max(1) as f64;
    let mut ticks = Vec::new();
    let mut last: Option<(i32, u32)> = None;
    for (idx, date) in dates.iter().enumerate() {
        let key = (date.year(), date.month());
        if last == Some(key) {
            continue;
        }
        last = Some(key);
        ticks.push((idx as f64 / span, date.format("%Y-%m").to_string()));
    }
    ticks
}

/// Maximal runs of consecutive finite values, as (day index, value) pairs.
///
/// A non-finite value ends the current run, so lines are never drawn across it.
fn finite_runs(values: &[f64]) -> Vec<Vec<(usize, f64)>> {
    let mut runs = Vec::new();
    let mut current = Vec::new();
    for (t, v) in values.iter().enumerate() {
        if v.is_finite() {
            current.push((t, *v));
        } else if !current.is_empty() {
            runs.push(std::mem::take(&mut current));
        }
    }
    if !current.is_empty() {
        runs.push(current);
    }
    runs
}

/// Line chart of several day-indexed series against a date axis.
fn render_date_lines(
    kind: ChartKind,
    dates: &[NaiveDate],
    series: &[(String, Vec<f64>)],
    y_label: &str,
    stroke_width: u32,
) -> RgbImage {
    let mut canvas = Canvas::new(Frame::new(1200.0, 600.0));
    canvas.title(kind.title());
    canvas.axis_labels("Date", y_label);

    let scale = Scale::from_values(series.iter().flat_map(|(_, v)| v.iter()), 0.05);
    let frame = canvas.frame();
    let span = dates.len().saturating_sub(1).max(1) as f64;

    if let Some(scale) = scale {
        canvas.y_ticks(&scale, &scale.ticks(6));
        canvas.x_ticks(&month_ticks(dates));

        let mut legend = Vec::with_capacity(series.len());
        for (i, (label, values)) in series.iter().enumerate() {
            let color = series_color(i);
            for run in finite_runs(values) {
                let points: Vec<(f64, f64)> = run
                    .iter()
                    .map(|(t, v)| (frame.x(*t as f64 / span), frame.y(scale.frac(*v))))
                    .collect();
                canvas.polyline(&points, color, stroke_width);
            }
            legend.push((label.clone(), color));
        }
        canvas.legend(&legend);
    }

    canvas.plot_border();
    canvas.into_image()
}

/// FX rates of every non-base currency, each divided by its day-0 rate.
pub fn render_fx_rates(rates: &RatePaths, base_currency: &CurrencyCode) -> RgbImage {
    let series: Vec<(String, Vec<f64>)> = rates
        .iter()
        .filter(|(code, _)| *code != base_currency)
        .filter_map(|(code, _)| Some((code.to_string(), rates.normalized(code)?)))
        .collect();

    render_date_lines(
        ChartKind::FxRates,
        rates.dates(),
        &series,
        "Normalized FX Rate",
        2,
    )
}

/// Portfolio value of every strategy, in millions.
pub fn render_portfolio(paths: &PortfolioPaths) -> RgbImage {
    let series: Vec<(String, Vec<f64>)> = paths
        .iter()
        .map(|(strategy, values)| {
            (
                strategy.name.clone(),
                values.iter().map(|v| v / 1e6).collect(),
            )
        })
        .collect();

    render_date_lines(
        ChartKind::PortfolioPerformance,
        paths.dates(),
        &series,
        "Portfolio Value ($ Millions)",
        3,
    )
}

/// Scatter of annualized volatility against annualized return, one labelled point per strategy.
pub fn render_risk_return(points: &[RiskReturnPoint]) -> RgbImage {
    let mut canvas = Canvas::new(Frame::new(1000.0, 600.0));
    canvas.title(ChartKind::RiskReturn.title());
    canvas.axis_labels("Annual Volatility (%)", "Annual Return (%)");

    let x_scale = Scale::from_values(points.iter().map(|p| &p.annual_volatility_pct), 0.15);
    let y_scale = Scale::from_values(points.iter().map(|p| &p.annual_return_pct), 0.15);
    let frame = canvas.frame();

    if let (Some(xs), Some(ys)) = (x_scale, y_scale) {
        canvas.y_ticks(&ys, &ys.ticks(6));
        let x_ticks = xs.ticks(6);
        let precision = tick_precision(&x_ticks);
        let x_labels: Vec<(f64, String)> = x_ticks
            .iter()
            .map(|t| (xs.frac(*t), format!("{:.*}", precision, t)))
            .collect();
        canvas.x_ticks(&x_labels);

        for (i, point) in points.iter().enumerate() {
            let (vol, ret) = (point.annual_volatility_pct, point.annual_return_pct);
            if !vol.is_finite() || !ret.is_finite() {
                continue;
            }
            let x = frame.x(xs.frac(vol));
            let y = frame.y(ys.frac(ret));
            canvas.marker(x, y, 9.0, series_color(i));
            canvas.text(x + 12.0, y - 18.0, &point.strategy, 1, Anchor::Start);
        }
    }

    canvas.plot_border();
    canvas.into_image()
}
