use fx_hedge_sim::analytics::risk_return::{annualized_volatility, simple_returns};
use fx_hedge_sim::core::config::{ConfigError, SimulationConfig};
use fx_hedge_sim::core::currency::{CurrencyCode, CurrencyParams};
use fx_hedge_sim::core::strategy::HedgeStrategy;
use fx_hedge_sim::pipeline::{run, run_with_progress, simulate, PipelineError};
use fx_hedge_sim::render::charts::ChartKind;
use fx_hedge_sim::simulation::portfolio::{fx_impact, NoiseMode};
use std::fs;
use std::path::PathBuf;

fn scratch_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("fx-hedge-sim-{}-{}", name, std::process::id()));
    let _ = fs::remove_dir_all(&dir);
    dir
}

/// Full pipeline: config → rates → portfolio → analytics → three chart files.
#[test]
fn full_pipeline_writes_three_charts() {
    let dir = scratch_dir("pipeline");
    let config = SimulationConfig {
        output_dir: dir.join("images"),
        ..Default::default()
    };

    let mut announced = Vec::new();
    let report = run_with_progress(&config, |kind| announced.push(kind)).unwrap();

    assert_eq!(announced, ChartKind::ALL.to_vec());
    assert_eq!(report.charts.len(), 3);
    for (path, name) in report.charts.iter().zip([
        "fx_rates_evolution.png",
        "portfolio_performance.png",
        "risk_return_profile.png",
    ]) {
        assert_eq!(*path, config.output_dir.join(name));
        let bytes = fs::read(path).unwrap();
        assert!(bytes.starts_with(b"\x89PNG\r\n\x1a\n"), "{} is not a PNG", name);
    }

    // Nothing else lands in the output directory
    assert_eq!(fs::read_dir(&config.output_dir).unwrap().count(), 3);

    fs::remove_dir_all(&dir).unwrap();
}

/// Re-running into an existing directory overwrites the same files.
#[test]
fn rerun_overwrites_charts() {
    let dir = scratch_dir("rerun");
    let config = SimulationConfig {
        output_dir: dir.clone(),
        ..Default::default()
    };

    let first = run(&config).unwrap();
    let before = fs::read(&first.charts[1]).unwrap();
    let second = run(&config).unwrap();
    let after = fs::read(&second.charts[1]).unwrap();

    assert_eq!(first.charts, second.charts);
    assert_eq!(before, after, "same config must render the same chart");
    fs::remove_dir_all(&dir).unwrap();
}

/// Day-0 values and the base currency identity rate.
#[test]
fn day_zero_and_base_invariants() {
    let config = SimulationConfig::default();
    let sim = simulate(&config).unwrap();

    for params in &config.currencies {
        let rates = sim.rates.rates(&params.symbol).unwrap();
        assert_eq!(rates.len(), config.days);
        assert_eq!(rates[0], params.initial_rate);
    }
    let usd = sim.rates.rates(&CurrencyCode::new("USD")).unwrap();
    assert!(usd.iter().all(|&r| r == 1.0));

    for (strategy, values) in sim.portfolio.iter() {
        assert_eq!(values.len(), config.days, "{}", strategy);
        assert_eq!(values[0], config.initial_portfolio_value, "{}", strategy);
    }
}

/// A flat currency with zero vol and zero drift stays at 1.0 for all 180 days.
#[test]
fn flat_currency_scenario() {
    let mut config = SimulationConfig::default();
    config.currencies[3] = CurrencyParams::new("JPY", 1.0, 0.0, 0.0, 3);
    let sim = simulate(&config).unwrap();

    let jpy = sim.rates.rates(&CurrencyCode::new("JPY")).unwrap();
    assert_eq!(jpy.len(), 180);
    assert!(jpy.iter().all(|&r| r == 1.0));

    let returns = simple_returns(jpy);
    assert_eq!(annualized_volatility(&returns), 0.0);
}

/// Full hedge removes the FX term on every day, whatever the FX path.
#[test]
fn full_hedge_scenario() {
    let config = SimulationConfig::default();
    let sim = simulate(&config).unwrap();
    for t in 0..config.days {
        assert_eq!(fx_impact(&config, &sim.rates, t, 1.0), 0.0);
    }
    assert!((1..config.days).any(|t| fx_impact(&config, &sim.rates, t, 0.0) != 0.0));
}

/// Same config, same bits.
#[test]
fn runs_are_bit_identical() {
    for mode in [NoiseMode::Shared, NoiseMode::Independent, NoiseMode::Common] {
        let config = SimulationConfig {
            noise_mode: mode,
            ..Default::default()
        };
        let a = simulate(&config).unwrap();
        let b = simulate(&config).unwrap();
        assert_eq!(a, b, "{} noise not reproducible", mode);
    }
}

/// Risk-return summary serializes with one entry per strategy.
#[test]
fn risk_return_serializes() {
    let sim = simulate(&SimulationConfig::default()).unwrap();
    let json = serde_json::to_string_pretty(&sim.risk_return).unwrap();
    let parsed: serde_json::Value = serde_json::from_str(&json).unwrap();

    let entries = parsed.as_array().unwrap();
    assert_eq!(entries.len(), 3);
    assert_eq!(entries[0]["strategy"], "Unhedged (0%)");
    assert_eq!(entries[2]["strategy"], "Full Hedge (100%)");
    assert!(entries[0].get("annual_volatility_pct").is_some());
}

/// A config file overrides only what it names.
#[test]
fn config_file_overrides() {
    let dir = scratch_dir("config");
    fs::create_dir_all(&dir).unwrap();
    let path = dir.join("params.json");
    fs::write(
        &path,
        r#"{
  "days": 60,
  "noise_mode": "common",
  "strategies": [
    { "name": "Quarter", "hedge_ratio": 0.25 },
    { "name": "Three Quarters", "hedge_ratio": 0.75, "seed_offset": 1 }
  ]
}"#,
    )
    .unwrap();

    let config = SimulationConfig::from_file(&path).unwrap();
    assert_eq!(config.days, 60);
    assert_eq!(config.noise_mode, NoiseMode::Common);
    assert_eq!(config.currencies.len(), 5);

    let sim = simulate(&config).unwrap();
    assert_eq!(sim.portfolio.len(), 60);
    assert!(sim.portfolio.values("Quarter").is_some());
    assert!(sim.portfolio.values("Unhedged (0%)").is_none());

    fs::remove_dir_all(&dir).unwrap();
}

/// A currency that barely moves still renders; the axis cannot be resolved
/// in f64 and must be widened rather than subdivided.
#[test]
fn near_flat_rates_render() {
    let dir = scratch_dir("near-flat");
    let mut config = SimulationConfig {
        days: 2,
        output_dir: dir.clone(),
        ..Default::default()
    };
    config.currencies[1] = CurrencyParams::new("EUR", 1.0, 0.0, 3e-14, 1);
    config.currencies.truncate(2);
    config.weights = [(CurrencyCode::new("USD"), 0.5), (CurrencyCode::new("EUR"), 0.5)]
        .into_iter()
        .collect();

    let report = run(&config).unwrap();
    let eur = report.simulation.rates.rates(&CurrencyCode::new("EUR")).unwrap();
    assert_eq!(eur[0], 1.0);
    assert!(eur[1] - eur[0] < 1e-15);
    assert_eq!(report.charts.len(), 3);
    fs::remove_dir_all(&dir).unwrap();
}

/// Under independent noise no strategy's shocks replay a currency's
/// increments, even when strategy and currency offsets coincide.
#[test]
fn independent_shocks_are_separate_from_fx_increments() {
    let mut config = SimulationConfig {
        noise_mode: NoiseMode::Independent,
        base_daily_return: 0.0,
        days: 30,
        ..Default::default()
    };
    config.strategies = vec![
        HedgeStrategy::new("Offset 1", 1.0, 1),
        HedgeStrategy::new("Offset 2", 1.0, 2),
    ];
    let sim = simulate(&config).unwrap();
    let dt = config.dt();

    for params in config.foreign_currencies() {
        let rates = sim.rates.rates(&params.symbol).unwrap();
        let sigma = params.annual_volatility;
        let drift = (params.annual_drift - 0.5 * sigma * sigma) * dt;
        let increments: Vec<f64> = rates
            .windows(2)
            .map(|w| ((w[1] / w[0]).ln() - drift) / sigma / dt.sqrt())
            .collect();

        for (strategy, values) in sim.portfolio.iter() {
            let shocks: Vec<f64> = simple_returns(values)
                .iter()
                .map(|r| r / config.shock_volatility)
                .collect();
            for lag in 0..2 {
                let matching = shocks
                    .iter()
                    .skip(lag)
                    .zip(&increments)
                    .filter(|(z, dw)| (*z - *dw).abs() < 1e-9)
                    .count();
                assert_eq!(
                    matching, 0,
                    "{} shocks track {} increments at lag {}",
                    strategy, params.symbol, lag
                );
            }
        }
    }
}

/// Independent noise needs distinct strategy offsets.
#[test]
fn independent_noise_rejects_shared_strategy_offsets() {
    let mut config = SimulationConfig {
        noise_mode: NoiseMode::Independent,
        ..Default::default()
    };
    config.strategies[1].seed_offset = 0;
    assert!(matches!(
        simulate(&config),
        Err(ConfigError::DuplicateStrategySeedOffset { offset: 0, .. })
    ));
    assert!(matches!(
        run(&config),
        Err(PipelineError::Config(ConfigError::DuplicateStrategySeedOffset { .. }))
    ));
}
