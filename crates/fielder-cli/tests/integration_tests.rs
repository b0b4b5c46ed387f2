//! Integration tests for fielder-cli

use clap::Parser;
use fielder_cli::commands;
use fielder_cli::config::OutputFormat;
use fielder_cli::{Cli, CliError, Command, Config, Formatter, Orchestrator};
use std::fs;

fn orchestrator_from(config: &Config) -> Orchestrator {
    commands::orchestrator(config).unwrap()
}

#[test]
fn test_config_file_with_reference_overlay() {
    let dir = tempfile::tempdir().unwrap();
    let overlay = dir.path().join("reference.toml");
    fs::write(
        &overlay,
        r#"
[[cultivars]]
id = "honey_crisp_peach"
name = "Honey Crisp Peach"
crop = "peach"
base_brix = 14.0
"#,
    )
    .unwrap();
    let config_path = dir.path().join("config.toml");
    fs::write(
        &config_path,
        format!(
            "[settings]\nformat = \"json\"\ncolor = false\nreference_file = {:?}\n\n[uncertainty]\nseed = 3\n",
            overlay.display().to_string()
        ),
    )
    .unwrap();

    let config = Config::load(Some(&config_path)).unwrap();
    assert_eq!(config.settings.format, OutputFormat::Json);
    assert_eq!(config.engine.uncertainty.seed, Some(3));

    let orchestrator = orchestrator_from(&config);
    let cli = Cli::parse_from([
        "fielder",
        "brix",
        "--cultivar",
        "honey_crisp_peach",
        "--age",
        "8",
        "--gdd",
        "2000",
    ]);
    let args = match cli.command {
        Command::Brix(args) => args,
        _ => panic!("Expected Brix command"),
    };
    let prediction = commands::brix::predict(&args, &orchestrator).unwrap();
    assert_eq!(prediction.cultivar_base, 14.0);
    assert!(prediction.notes.is_empty());
}

#[test]
fn test_classify_json_output() {
    let config = Config::default();
    let orchestrator = orchestrator_from(&config);
    let formatter = Formatter::new(OutputFormat::Json, false);

    let cli = Cli::parse_from(["fielder", "classify", "beef", "100% grass-fed", "grass-finished"]);
    let args = match cli.command {
        Command::Classify(args) => args,
        _ => panic!("Expected Classify command"),
    };
    let out = commands::execute_classify(args, &orchestrator, &formatter).unwrap();
    let value: serde_json::Value = serde_json::from_str(&out).unwrap();
    assert_eq!(value["profile_id"], "A");
    assert_eq!(value["is_cafo"], false);
}

#[tokio::test]
async fn test_predict_produce_request_json() {
    let dir = tempfile::tempdir().unwrap();
    let request = dir.path().join("request.json");
    fs::write(
        &request,
        r#"{
  "category": "produce",
  "claims": ["organic"],
  "produce": {
    "cultivar_id": "washington_navel",
    "rootstock_id": "carrizo",
    "tree_age_years": 12,
    "current_gdd": 6100
  },
  "n_samples": 2000
}"#,
    )
    .unwrap();

    let mut config = Config::default();
    config.engine.uncertainty.seed = Some(17);
    let orchestrator = orchestrator_from(&config);
    let formatter = Formatter::new(OutputFormat::Json, false);

    let cli = Cli::parse_from(["fielder", "predict", "-i", request.to_str().unwrap()]);
    let args = match cli.command {
        Command::Predict(args) => args,
        _ => panic!("Expected Predict command"),
    };
    let out = commands::execute_predict(args, &orchestrator, &formatter)
        .await
        .unwrap();
    let value: serde_json::Value = serde_json::from_str(&out).unwrap();
    assert_eq!(value["primary_metric"]["type"], "brix");
    assert!((value["primary_metric"]["value"].as_f64().unwrap() - 13.1).abs() < 1e-9);
    assert_eq!(value["distribution"]["n_samples"], 2000);
}

#[test]
fn test_validate_out_of_range_json() {
    let orchestrator = orchestrator_from(&Config::default());
    let formatter = Formatter::new(OutputFormat::Json, false);
    let cli = Cli::parse_from(["fielder", "validate", "produce", "--brix", "42", "--source", "lab"]);
    let args = match cli.command {
        Command::Validate(args) => args,
        _ => panic!("Expected Validate command"),
    };
    let out = commands::execute_validate(args, &orchestrator, &formatter).unwrap();
    let value: serde_json::Value = serde_json::from_str(&out).unwrap();
    assert_eq!(value["validation"]["is_valid"], false);
}

#[test]
fn test_uncertainty_parametric_table() {
    let orchestrator = orchestrator_from(&Config::default());
    let formatter = Formatter::new(OutputFormat::Table, false);
    let cli = Cli::parse_from(["fielder", "uncertainty", "12.5", "--parametric"]);
    let args = match cli.command {
        Command::Uncertainty(args) => args,
        _ => panic!("Expected Uncertainty command"),
    };
    let out = commands::execute_uncertainty(args, &orchestrator, &formatter).unwrap();
    assert!(out.contains("parametric"));
}

#[tokio::test]
async fn test_config_command_needs_no_reference_data() {
    let dir = tempfile::tempdir().unwrap();
    let mut config = Config::default();
    config.settings.reference_file = Some(dir.path().join("missing.toml"));
    let formatter = Formatter::new(OutputFormat::Table, false);

    let cli = Cli::parse_from(["fielder", "config"]);
    let output = commands::execute(cli.command, &config, &formatter).await.unwrap();
    assert!(output.contains("missing.toml"));

    let cli = Cli::parse_from(["fielder", "classify", "beef", "grass-fed"]);
    let result = commands::execute(cli.command, &config, &formatter).await;
    assert!(matches!(result, Err(CliError::Store(_))));
}
