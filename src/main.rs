//! fx-hedge-sim CLI
//!
//! Generate the FX and hedged-portfolio charts from the command line.
//!
//! # Usage
//!
//! ```bash
//! # Render the three charts into ./images with the built-in parameters
//! fx-hedge-sim
//!
//! # Override parameters from a JSON file and use independent noise
//! fx-hedge-sim render --config params.json --noise independent
//!
//! # Print annualized risk and return per strategy
//! fx-hedge-sim summary --format json
//!
//! # Dump the default configuration as a starting point
//! fx-hedge-sim config > params.json
//! ```

use fx_hedge_sim::core::config::SimulationConfig;
use fx_hedge_sim::pipeline::{self, PipelineError};
use fx_hedge_sim::simulation::portfolio::NoiseMode;
use std::path::PathBuf;
use std::process;

fn print_usage() {
    eprintln!(
        r#"fx-hedge-sim — synthetic FX and hedged portfolio charts

USAGE:
    fx-hedge-sim [COMMAND] [OPTIONS]

COMMANDS:
    render      Simulate and write the three charts (default)
    summary     Simulate and print annualized risk/return per strategy
    config      Print the default configuration as JSON
    help        Show this message

OPTIONS (render, summary):
    --config <FILE>       JSON file overriding any configuration fields
    --noise <MODE>        Shock noise across strategies: shared (default),
                          independent or common
    --seed <N>            Seed for the portfolio shocks

OPTIONS (render):
    --output-dir <DIR>    Directory for the charts (default: images)

OPTIONS (summary):
    --format <FORMAT>     Output format: text (default) or json

EXAMPLES:
    fx-hedge-sim
    fx-hedge-sim render --output-dir docs/images
    fx-hedge-sim summary --noise independent --format json
    fx-hedge-sim config > params.json"#
    );
}

/// Options shared by the simulating commands.
struct RunOptions {
    config: SimulationConfig,
    format: String,
}

fn parse_options(args: &[String], allow_output: bool, allow_format: bool) -> RunOptions {
    let mut config_path: Option<String> = None;
    let mut noise: Option<NoiseMode> = None;
    let mut seed: Option<u64> = None;
    let mut output_dir: Option<PathBuf> = None;
    let mut format = "text".to_string();

    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "--config" => {
                i += 1;
                config_path = Some(args.get(i).cloned().unwrap_or_else(|| {
                    eprintln!("--config requires a file path");
                    process::exit(1);
                }));
            }
            "--noise" => {
                i += 1;
                let value = args.get(i).cloned().unwrap_or_else(|| {
                    eprintln!("--noise requires 'shared', 'independent' or 'common'");
                    process::exit(1);
                });
                noise = Some(value.parse().unwrap_or_else(|e| {
                    eprintln!("Error: {}", e);
                    process::exit(1);
                }));
            }
            "--seed" => {
                i += 1;
                seed = Some(args.get(i).and_then(|s| s.parse().ok()).unwrap_or_else(|| {
                    eprintln!("--seed requires a non-negative integer");
                    process::exit(1);
                }));
            }
            "--output-dir" if allow_output => {
                i += 1;
                output_dir = Some(PathBuf::from(args.get(i).cloned().unwrap_or_else(|| {
                    eprintln!("--output-dir requires a directory path");
                    process::exit(1);
                })));
            }
            "--format" if allow_format => {
                i += 1;
                format = args.get(i).cloned().unwrap_or_else(|| {
                    eprintln!("--format requires 'text' or 'json'");
                    process::exit(1);
                });
            }
            _ => {
                eprintln!("Unknown option: {}", args[i]);
                process::exit(1);
            }
        }
        i += 1;
    }

    let mut config = match config_path {
        Some(path) => SimulationConfig::from_file(&path).unwrap_or_else(|e| {
            eprintln!("Error: {}", e);
            process::exit(1);
        }),
        None => SimulationConfig::default(),
    };
    if let Some(noise) = noise {
        config.noise_mode = noise;
    }
    if let Some(seed) = seed {
        config.shock_seed = seed;
    }
    if let Some(dir) = output_dir {
        config.output_dir = dir;
    }

    RunOptions { config, format }
}

fn exit_with(err: PipelineError) -> ! {
    eprintln!("Error: {}", err);
    process::exit(1);
}

fn cmd_render(args: &[String]) {
    let options = parse_options(args, true, false);
    let config = options.config;

    println!("Generating synthetic data and charts...");
    let report = pipeline::run_with_progress(&config, |kind| {
        println!("{}", kind.progress_label());
    })
    .unwrap_or_else(|e| exit_with(e));

    println!("All charts generated successfully!");
    println!("Charts saved in '{}/' directory:", config.output_dir.display());
    for path in &report.charts {
        if let Some(name) = path.file_name() {
            println!("- {}", name.to_string_lossy());
        }
    }
}

fn cmd_summary(args: &[String]) {
    let options = parse_options(args, false, true);
    let simulation =
        pipeline::simulate(&options.config).unwrap_or_else(|e| exit_with(PipelineError::from(e)));

    if options.format == "json" {
        match serde_json::to_string_pretty(&simulation.risk_return) {
            Ok(json) => println!("{}", json),
            Err(e) => {
                eprintln!("Error serializing summary: {}", e);
                process::exit(1);
            }
        }
    } else {
        println!(
            "Risk-return over {} days ({} noise):",
            simulation.portfolio.len(),
            options.config.noise_mode
        );
        for point in &simulation.risk_return {
            println!("  {}", point);
        }
    }
}

fn cmd_config(args: &[String]) {
    if let Some(extra) = args.first() {
        eprintln!("Unknown option: {}", extra);
        process::exit(1);
    }
    match serde_json::to_string_pretty(&SimulationConfig::default()) {
        Ok(json) => println!("{}", json),
        Err(e) => {
            eprintln!("Error serializing configuration: {}", e);
            process::exit(1);
        }
    }
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let args: Vec<String> = std::env::args().collect();
    let (command, rest) = match args.get(1).map(String::as_str) {
        Some("--help") => ("help", &args[2..]),
        Some(cmd) if !cmd.starts_with("--") => (cmd, &args[2..]),
        _ => ("render", &args[1.min(args.len())..]),
    };

    match command {
        "render" => cmd_render(rest),
        "summary" => cmd_summary(rest),
        "config" => cmd_config(rest),
        "help" | "-h" => print_usage(),
        _ => {
            eprintln!("Unknown command: {}", command);
            print_usage();
            process::exit(1);
        }
    }
}
