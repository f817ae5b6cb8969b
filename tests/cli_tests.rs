use fx_hedge_sim::core::config::SimulationConfig;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};

fn scratch_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("fx-hedge-sim-cli-{}-{}", name, std::process::id()));
    let _ = fs::remove_dir_all(&dir);
    fs::create_dir_all(&dir).unwrap();
    dir
}

fn fx_hedge_sim(cwd: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_fx-hedge-sim"))
        .args(args)
        .current_dir(cwd)
        .env_remove("RUST_LOG")
        .output()
        .unwrap()
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

/// `render` prints the progress lines in order, then the output directory and file list.
#[test]
fn render_prints_progress_and_file_list() {
    let dir = scratch_dir("render");
    let out = dir.join("charts");
    let output = fx_hedge_sim(&dir, &["render", "--output-dir", out.to_str().unwrap()]);

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    let lines: Vec<String> = stdout(&output).lines().map(str::to_string).collect();
    assert_eq!(
        lines,
        vec![
            "Generating synthetic data and charts...".to_string(),
            "Creating Chart 1: FX Rates Evolution...".to_string(),
            "Creating Chart 2: Portfolio Performance...".to_string(),
            "Creating Chart 3: Risk-Return Analysis...".to_string(),
            "All charts generated successfully!".to_string(),
            format!("Charts saved in '{}/' directory:", out.display()),
            "- fx_rates_evolution.png".to_string(),
            "- portfolio_performance.png".to_string(),
            "- risk_return_profile.png".to_string(),
        ]
    );
    for name in [
        "fx_rates_evolution.png",
        "portfolio_performance.png",
        "risk_return_profile.png",
    ] {
        assert!(fs::metadata(out.join(name)).unwrap().len() > 0, "{} is empty", name);
    }
    fs::remove_dir_all(&dir).unwrap();
}

/// With no arguments the charts go to `images/` under the working directory.
#[test]
fn no_arguments_renders_into_images() {
    let dir = scratch_dir("default");
    let output = fx_hedge_sim(&dir, &[]);

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert!(stdout(&output).contains("Charts saved in 'images/' directory:"));
    assert_eq!(fs::read_dir(dir.join("images")).unwrap().count(), 3);
    fs::remove_dir_all(&dir).unwrap();
}

/// Any error exits with status 1, reports on stderr and never claims success.
#[test]
fn errors_exit_with_status_one() {
    let dir = scratch_dir("errors");
    let missing = dir.join("missing.json");

    let cases: Vec<Vec<&str>> = vec![
        vec!["render", "--config", missing.to_str().unwrap()],
        vec!["render", "--noise", "global"],
        vec!["render", "--seed", "-3"],
        vec!["summary", "--output-dir", "elsewhere"],
        vec!["render", "--bogus"],
        vec!["config", "--bogus"],
        vec!["launch"],
    ];
    for args in cases {
        let output = fx_hedge_sim(&dir, &args);
        assert_eq!(output.status.code(), Some(1), "{:?}", args);
        assert!(!stderr(&output).is_empty(), "{:?} printed no error", args);
        assert!(
            !stdout(&output).contains("All charts generated successfully!"),
            "{:?}",
            args
        );
    }
    assert!(!dir.join("images").exists());
    fs::remove_dir_all(&dir).unwrap();
}

/// An unwritable output directory fails after the first progress line.
#[test]
fn render_failure_reports_error() {
    let dir = scratch_dir("blocked");
    let blocker = dir.join("blocker");
    fs::write(&blocker, b"not a directory").unwrap();
    let target = blocker.join("images");

    let output = fx_hedge_sim(&dir, &["--output-dir", target.to_str().unwrap()]);
    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).starts_with("Error:"));
    assert_eq!(
        stdout(&output).lines().collect::<Vec<_>>(),
        vec!["Generating synthetic data and charts..."]
    );
    fs::remove_dir_all(&dir).unwrap();
}

#[test]
fn summary_json_lists_every_strategy() {
    let dir = scratch_dir("summary");
    let output = fx_hedge_sim(&dir, &["summary", "--noise", "independent", "--format", "json"]);

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    let parsed: serde_json::Value = serde_json::from_str(&stdout(&output)).unwrap();
    let names: Vec<&str> = parsed
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["strategy"].as_str().unwrap())
        .collect();
    assert_eq!(
        names,
        vec!["Unhedged (0%)", "Partial Hedge (50%)", "Full Hedge (100%)"]
    );
    fs::remove_dir_all(&dir).unwrap();
}

#[test]
fn config_prints_loadable_defaults() {
    let dir = scratch_dir("config");
    let output = fx_hedge_sim(&dir, &["config"]);

    assert!(output.status.success());
    let path = dir.join("params.json");
    fs::write(&path, output.stdout).unwrap();
    let loaded = SimulationConfig::from_file(&path).unwrap();
    assert_eq!(loaded, SimulationConfig::default());
    fs::remove_dir_all(&dir).unwrap();
}
