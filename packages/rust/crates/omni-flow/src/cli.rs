use std::path::PathBuf;

use clap::{Parser, ValueEnum};

#[derive(Parser, Debug)]
#[command(name = "omni-flow")]
#[command(author, version, about = "Prompt flow reader - read prompt and instruction files in order")]
#[command(after_help = "Examples:
  omni-flow --flow unit_test_flow.yaml
  omni-flow --flow ../configs/my_flow.yaml --base-path ./workspace
  omni-flow                      # catalog the current directory")]
pub(crate) struct Cli {
    /// Path to YAML flow configuration file (e.g. `unit_test_flow.yaml`).
    #[arg(long, value_name = "FILE")]
    pub(crate) flow: Option<PathBuf>,

    /// Base directory for file operations (default: current directory).
    #[arg(long = "base-path", value_name = "DIR")]
    pub(crate) base_path: Option<PathBuf>,

    /// Enable verbose output and debug logging.
    #[arg(short, long, default_value_t = false)]
    pub(crate) verbose: bool,

    /// Show what would be executed without reading any file.
    #[arg(long, default_value_t = false)]
    pub(crate) dry_run: bool,

    /// Read these files in order (relative to the base path) and summarize them.
    #[arg(long, value_name = "PATH", num_args = 1..)]
    pub(crate) files: Vec<String>,

    /// Report format.
    #[arg(long, short = 'o', value_enum, default_value_t = OutputFormat::Text)]
    pub(crate) output: OutputFormat,

    /// Never write the combined prompt context file.
    #[arg(long, default_value_t = false)]
    pub(crate) no_save: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum OutputFormat {
    /// Narrated console transcript.
    Text,
    /// Compact JSON summary.
    Json,
    /// Indented JSON summary.
    Pretty,
}

impl OutputFormat {
    pub(crate) fn is_text(self) -> bool {
        self == Self::Text
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cli = Cli::parse_from(["omni-flow"]);
        assert!(cli.flow.is_none());
        assert!(cli.base_path.is_none());
        assert!(!cli.verbose);
        assert!(!cli.dry_run);
        assert!(cli.files.is_empty());
        assert_eq!(cli.output, OutputFormat::Text);
    }

    #[test]
    fn test_flow_and_base_path() {
        let cli = Cli::parse_from([
            "omni-flow",
            "--flow",
            "flows/unit_test_flow.yaml",
            "--base-path",
            "/work",
            "-v",
            "--dry-run",
        ]);
        assert_eq!(cli.flow, Some(PathBuf::from("flows/unit_test_flow.yaml")));
        assert_eq!(cli.base_path, Some(PathBuf::from("/work")));
        assert!(cli.verbose);
        assert!(cli.dry_run);
    }

    #[test]
    fn test_files_and_json() {
        let cli = Cli::parse_from([
            "omni-flow",
            "--files",
            "a.prompt.md",
            "b.instructions.md",
            "--output",
            "json",
        ]);
        assert_eq!(cli.files, vec!["a.prompt.md", "b.instructions.md"]);
        assert_eq!(cli.output, OutputFormat::Json);
        assert!(!cli.output.is_text());
    }
}
