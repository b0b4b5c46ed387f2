//! Predict command implementation.

use crate::cli::PredictArgs;
use crate::error::{CliError, Result};
use crate::output::Formatter;
use crate::Orchestrator;
use fielder_engine::PredictionRequest;
use std::fs;
use std::io::{self, Read};

/// Execute the predict command.
pub async fn execute_predict(
    args: PredictArgs,
    orchestrator: &Orchestrator,
    formatter: &Formatter,
) -> Result<String> {
    // Read request from file or stdin
    let json = if args.stdin {
        let mut buffer = String::new();
        io::stdin().read_to_string(&mut buffer)?;
        buffer
    } else if let Some(path) = args.input {
        fs::read_to_string(path)?
    } else {
        return Err(CliError::InvalidInput(
            "Must specify either --input or --stdin".to_string(),
        ));
    };

    let request = PredictionRequest::from_json(&json).map_err(CliError::InvalidInput)?;
    let result = orchestrator.predict_offloaded(&request).await?;
    formatter.format_prediction(&result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::OutputFormat;
    use fielder_engine::EngineConfig;
    use std::io::Write;

    fn orchestrator() -> Orchestrator {
        let mut config = EngineConfig::default();
        config.uncertainty.seed = Some(9);
        config.uncertainty.n_samples = 1000;
        Orchestrator::with_builtin(config).unwrap()
    }

    #[tokio::test]
    async fn test_predict_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"{{"category": "beef", "claims": ["grass-fed"], "measurement": {{"value": 9.0, "source": "lab"}}}}"#
        )
        .unwrap();

        let formatter = Formatter::new(OutputFormat::Json, false);
        let args = PredictArgs {
            input: Some(file.path().to_path_buf()),
            stdin: false,
        };
        let out = execute_predict(args, &orchestrator(), &formatter).await.unwrap();
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(value["classification"]["profile_id"], "C");
        assert_eq!(value["primary_metric"]["type"], "omega_ratio");
        assert!(value["prediction_id"].is_string());
    }

    #[tokio::test]
    async fn test_requires_input() {
        let formatter = Formatter::new(OutputFormat::Table, false);
        let args = PredictArgs {
            input: None,
            stdin: false,
        };
        let err = execute_predict(args, &orchestrator(), &formatter).await.unwrap_err();
        assert!(matches!(err, CliError::InvalidInput(_)));
    }

    #[tokio::test]
    async fn test_bad_request_json() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "{{\"claims\": []}}").unwrap();
        let formatter = Formatter::new(OutputFormat::Table, false);
        let args = PredictArgs {
            input: Some(file.path().to_path_buf()),
            stdin: false,
        };
        let err = execute_predict(args, &orchestrator(), &formatter).await.unwrap_err();
        assert!(matches!(err, CliError::InvalidInput(_)));
    }
}
