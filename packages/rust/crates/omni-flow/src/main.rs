//! main.rs - `omni-flow` binary entry point.
//!
//! Usage:
//!   omni-flow --flow unit_test_flow.yaml
//!   omni-flow --flow ../configs/my_flow.yaml --base-path ./workspace
//!   omni-flow                      # catalog the current directory
//!
//! Exit code 1 on a configuration load failure or any unhandled error.
//! A failed save of the combined artifact is reported but does not fail the run.

mod cli;
mod report;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use log::{error, info};
use serde::Serialize;

use cli::{Cli, OutputFormat};
use omni_flow::{FlowConfig, FlowEngine, FlowResult};
use report::{ConsoleReporter, FlowReport};

fn main() -> Result<()> {
    let cli = Cli::parse();
    omni_flow::init_logger(cli.verbose);
    run(&cli)
}

fn run(cli: &Cli) -> Result<()> {
    let mut reporter = ConsoleReporter::new(cli.output.is_text(), cli.verbose);
    reporter.banner();

    let config = match &cli.flow {
        Some(path) => {
            let path = std::path::absolute(path).unwrap_or_else(|_| path.clone());
            reporter.loading_config(&path);
            let config = FlowConfig::load(&path).context("Error loading configuration")?;
            reporter.config_loaded(&config);
            Some(config)
        }
        None => None,
    };

    let base_path = match &cli.base_path {
        Some(path) => path.clone(),
        None => std::env::current_dir().context("failed to resolve current directory")?,
    };

    if cli.dry_run {
        reporter.dry_run(config.as_ref(), &base_path);
        return Ok(());
    }

    let config = config.unwrap_or_else(FlowConfig::builtin);
    let engine = FlowEngine::for_config(&base_path, &config)?;
    info!("Base path: {}", engine.catalog().base_path().display());

    if !cli.files.is_empty() {
        let records = engine.read_in_order(&cli.files, &mut reporter);
        reporter.ordered_files(&records);
    }

    let result = engine.execute(&config, &mut reporter)?;
    let saved_to = save_if_configured(cli, &config, &engine, &result, &reporter);

    if !cli.output.is_text() {
        emit(&FlowReport::new(&result, saved_to.as_deref()), cli.output)?;
    }
    Ok(())
}

/// Write the combined artifact when the flow asks for it.
///
/// Failures are logged and reported; they never fail the run.
fn save_if_configured(
    cli: &Cli,
    config: &FlowConfig,
    engine: &FlowEngine,
    result: &FlowResult,
    reporter: &ConsoleReporter,
) -> Option<PathBuf> {
    if cli.no_save || !config.saves_combined() || result.combined.is_empty() {
        return None;
    }

    match engine.save_combined(&result.combined) {
        Ok(path) => {
            reporter.saved(&path);
            Some(path)
        }
        Err(e) => {
            error!("{e}");
            reporter.save_failed(&e);
            None
        }
    }
}

fn emit<T: Serialize>(value: &T, output: OutputFormat) -> Result<()> {
    let rendered = match output {
        OutputFormat::Pretty => serde_json::to_string_pretty(value),
        OutputFormat::Json | OutputFormat::Text => serde_json::to_string(value),
    }
    .context("failed to serialize report as JSON")?;
    println!("{rendered}");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn cli(args: &[&str]) -> Cli {
        Cli::parse_from(std::iter::once("omni-flow").chain(args.iter().copied()))
    }

    #[test]
    fn test_missing_config_fails() {
        let temp = TempDir::new().unwrap();
        let missing = temp.path().join("nope.yaml");
        let args = cli(&["--flow", missing.to_str().unwrap(), "--output", "json"]);
        assert!(run(&args).is_err());
    }

    #[test]
    fn test_malformed_config_fails() {
        let temp = TempDir::new().unwrap();
        let flow = temp.path().join("bad.yaml");
        fs::write(&flow, "flow: [unclosed").unwrap();
        let args = cli(&["--flow", flow.to_str().unwrap(), "--output", "json"]);
        assert!(run(&args).is_err());
    }

    #[test]
    fn test_default_mode_saves_combined() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("a.prompt.md"), "---\nmode: ask\n---\nAsk it").unwrap();
        let base = temp.path().to_str().unwrap();

        run(&cli(&["--base-path", base, "--output", "json"])).unwrap();

        let saved = fs::read_to_string(temp.path().join(omni_flow::COMBINED_OUTPUT_FILE)).unwrap();
        assert!(saved.contains("# Prompt 1: a.prompt.md"));
        assert!(saved.contains("Ask it"));
    }

    #[test]
    fn test_no_save_flag() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("a.prompt.md"), "Body").unwrap();
        let base = temp.path().to_str().unwrap();

        run(&cli(&["--base-path", base, "--output", "json", "--no-save"])).unwrap();
        assert!(!temp.path().join(omni_flow::COMBINED_OUTPUT_FILE).exists());
    }

    #[test]
    fn test_flow_without_combined_format_does_not_save() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("a.prompt.md"), "Body").unwrap();
        let flow = temp.path().join("flow.yaml");
        fs::write(&flow, "name: f\nflow:\n  - step: one\n    file: a.prompt.md\n").unwrap();

        let base = temp.path().to_str().unwrap();
        run(&cli(&[
            "--flow",
            flow.to_str().unwrap(),
            "--base-path",
            base,
            "--output",
            "json",
        ]))
        .unwrap();
        assert!(!temp.path().join(omni_flow::COMBINED_OUTPUT_FILE).exists());
    }

    #[test]
    fn test_dry_run_reads_nothing() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("a.prompt.md"), "Body").unwrap();
        let flow = temp.path().join("flow.yaml");
        fs::write(
            &flow,
            "name: f\noutput:\n  format: combined\nflow:\n  - step: one\n    file: a.prompt.md\n",
        )
        .unwrap();

        let base = temp.path().to_str().unwrap();
        run(&cli(&[
            "--flow",
            flow.to_str().unwrap(),
            "--base-path",
            base,
            "--dry-run",
            "--output",
            "json",
        ]))
        .unwrap();
        assert!(!temp.path().join(omni_flow::COMBINED_OUTPUT_FILE).exists());
    }
}
