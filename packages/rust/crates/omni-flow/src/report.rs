//! Console narration and JSON summaries for the `omni-flow` binary.

use std::path::Path;

use omni_flow::{
    CatalogBuckets, FileCategory, FileRecord, FlowConfig, FlowError, FlowObserver, FlowResult,
    FlowStep, StepOutcome, StepStatus,
};
use serde::Serialize;

const RULE_WIDTH: usize = 70;
const PREVIEW_CHARS: usize = 80;

/// Prints a transcript of the run to stdout.
///
/// Disabled reporters swallow everything so JSON output stays clean.
#[derive(Debug)]
pub(crate) struct ConsoleReporter {
    enabled: bool,
    verbose: bool,
}

impl ConsoleReporter {
    pub(crate) fn new(enabled: bool, verbose: bool) -> Self {
        Self { enabled, verbose }
    }

    fn line(&self, text: impl AsRef<str>) {
        if self.enabled {
            println!("{}", text.as_ref());
        }
    }

    fn rule(&self, ch: char, width: usize) {
        self.line(ch.to_string().repeat(width));
    }

    pub(crate) fn banner(&self) {
        self.line("Prompt Flow Reader");
        self.rule('=', 60);
    }

    pub(crate) fn loading_config(&self, path: &Path) {
        self.line(format!("Loading configuration from: {}", path.display()));
    }

    pub(crate) fn config_loaded(&self, config: &FlowConfig) {
        self.line(format!(
            "Configuration loaded: {} v{}",
            config.name, config.version
        ));
        if self.verbose {
            self.line(format!("   Description: {}", config.description));
            self.line(format!("   Flow steps: {}", config.steps.len()));
        }
    }

    pub(crate) fn dry_run(&self, config: Option<&FlowConfig>, base_path: &Path) {
        self.line("\nDRY RUN MODE - no files will be processed");
        match config {
            Some(config) if !config.steps.is_empty() => {
                self.line("\nFlow steps that would be executed:");
                for (index, step) in config.steps.iter().enumerate() {
                    let ordinal = index + 1;
                    let file = if step.file.is_empty() {
                        "N/A"
                    } else {
                        step.file.as_str()
                    };
                    self.line(format!("  {ordinal}. {}: {file}", step.display_name(ordinal)));
                }
            }
            _ => self.line(format!(
                "\nNo flow steps configured; would catalog {}",
                base_path.display()
            )),
        }
    }

    pub(crate) fn ordered_files(&self, records: &[FileRecord]) {
        self.line("\nReading specific files in order:");
        self.rule('-', 40);
        for (index, record) in records.iter().enumerate() {
            self.line(format!("\n{}. {}", index + 1, record.file_name()));
            self.line(format!("   Type: {}", record.category()));
            if let Some(description) = &record.metadata.description {
                self.line(format!("   Description: {description}"));
            }
        }
    }

    pub(crate) fn saved(&self, path: &Path) {
        self.line(format!("\nCombined prompt context saved to: {}", path.display()));
    }

    pub(crate) fn save_failed(&self, error: &FlowError) {
        self.line(format!("\nFailed to save combined context: {error}"));
    }

    fn catalog_summary(&self, buckets: &CatalogBuckets) {
        for (label, records) in buckets.labeled() {
            self.line(format!("\n{} ({} files)", label.to_uppercase(), records.len()));
            self.rule('-', 30);
            for record in records {
                if self.verbose {
                    self.file_summary(record);
                } else {
                    self.line(format!("   {}", record.file_name()));
                }
            }
        }
        self.line(format!("\nTotal files processed: {}", buckets.total()));
    }

    fn file_summary(&self, record: &FileRecord) {
        let meta = &record.metadata;
        self.line(format!("\n{}", record.file_name()));
        self.line(format!("   Path: {}", record.path.display()));
        self.line(format!("   Type: {}", meta.category));
        for (label, value) in [
            ("Applies to", &meta.apply_to),
            ("Mode", &meta.mode),
            ("Model", &meta.model),
            ("Description", &meta.description),
        ] {
            if let Some(value) = value {
                self.line(format!("   {label}: {value}"));
            }
        }
        self.line(format!(
            "   Content length: {} characters",
            record.content_length()
        ));
        if let Some(preview) = preview(&record.body) {
            self.line(format!("   Preview: {preview}"));
        }
    }
}

/// First non-blank line of the body, cut to [`PREVIEW_CHARS`].
fn preview(body: &str) -> Option<String> {
    let first = body.trim().lines().next()?;
    if first.is_empty() {
        return None;
    }
    let mut text: String = first.chars().take(PREVIEW_CHARS).collect();
    if first.chars().count() > PREVIEW_CHARS {
        text.push_str("...");
    }
    Some(text)
}

impl FlowObserver for ConsoleReporter {
    fn flow_started(&mut self, config: &FlowConfig) {
        self.line(format!("\nExecuting flow: {}", config.name));
        self.line(format!("Description: {}", config.description));
        self.line(format!("Version: {}", config.version));
        self.rule('=', 50);
    }

    fn catalog_fallback(&mut self, config: &FlowConfig) {
        self.line(format!(
            "\nNo flow steps in '{}'. Running in catalog mode.",
            config.name
        ));
    }

    fn step_started(&mut self, ordinal: usize, step: &FlowStep) {
        self.line(format!("\nStep {ordinal}: {}", step.display_name(ordinal)));
        self.line(format!("   Type: {}", step.type_name()));
        self.line(format!("   File: {}", step.file));
        self.line(format!("   Description: {}", step.description_text()));
        self.line(format!("   Required: {}", step.required));
    }

    fn step_finished(&mut self, outcome: &StepOutcome) {
        let text = match outcome.status {
            StepStatus::Success => format!(
                "   OK: processed successfully ({} chars)",
                outcome.content_length.unwrap_or_default()
            ),
            StepStatus::Error => format!(
                "   ERROR: {} ({})",
                outcome.message.as_deref().unwrap_or("failed"),
                outcome.file
            ),
            StepStatus::Skipped => format!(
                "   SKIPPED: {} ({})",
                outcome.message.as_deref().unwrap_or("skipped"),
                outcome.file
            ),
        };
        self.line(text);
    }

    fn read_warning(&mut self, path: &Path, message: &str) {
        self.line(format!("Warning: Could not read {}: {message}", path.display()));
    }

    fn combine_started(&mut self, _count: usize) {
        self.line("");
        self.rule('=', RULE_WIDTH);
        self.line("COMBINED PROMPT CONTEXT");
        self.rule('=', RULE_WIDTH);
    }

    fn prompt_combined(&mut self, ordinal: usize, record: &FileRecord) {
        self.line(format!("\nPrompt {ordinal}: {}", record.file_name()));
        self.rule('-', 50);
        if self.verbose {
            self.line(format!(
                "Content ({} characters):",
                record.content_length()
            ));
            self.line(&record.body);
            self.rule('─', 50);
        }
    }

    fn combine_finished(&mut self, count: usize, combined: &str) {
        self.line(format!("\nCombined {count} prompt files"));
        self.line(format!(
            "Total combined length: {} characters",
            combined.chars().count()
        ));
        self.line("");
        self.rule('=', RULE_WIDTH);
        self.line("FINAL COMBINED PROMPT CONTEXT");
        self.rule('=', RULE_WIDTH);
        self.line(combined);
    }

    fn flow_finished(&mut self, result: &FlowResult) {
        if let Some(buckets) = &result.catalog {
            self.catalog_summary(buckets);
        } else {
            self.line(format!(
                "\nFlow execution completed: {} steps processed",
                result.steps.len()
            ));
        }
        if result.combined.is_empty() {
            self.line("\nNo prompt files found to combine.");
        }
    }
}

/// Machine-readable run summary.
#[derive(Debug, Serialize)]
pub(crate) struct FlowReport<'a> {
    flow_name: &'a str,
    steps: &'a [StepOutcome],
    files: Vec<FileEntry<'a>>,
    prompt_count: usize,
    combined_length: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    saved_to: Option<String>,
}

#[derive(Debug, Serialize)]
struct FileEntry<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    step: Option<&'a str>,
    path: String,
    category: FileCategory,
    content_length: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    description: Option<&'a str>,
}

impl<'a> FileEntry<'a> {
    fn new(step: Option<&'a str>, record: &'a FileRecord) -> Self {
        Self {
            step,
            path: record.path.display().to_string(),
            category: record.category(),
            content_length: record.content_length(),
            description: record.metadata.description.as_deref(),
        }
    }
}

impl<'a> FlowReport<'a> {
    pub(crate) fn new(result: &'a FlowResult, saved_to: Option<&Path>) -> Self {
        let files = match &result.catalog {
            Some(buckets) => buckets
                .labeled()
                .into_iter()
                .flat_map(|(_, records)| records.iter())
                .map(|record| FileEntry::new(None, record))
                .collect(),
            None => result
                .files
                .iter()
                .map(|(step, record)| FileEntry::new(Some(step.as_str()), record))
                .collect(),
        };
        Self {
            flow_name: &result.flow_name,
            steps: &result.steps,
            files,
            prompt_count: result.prompt_files().len(),
            combined_length: result.combined.chars().count(),
            saved_to: saved_to.map(|path| path.display().to_string()),
        }
    }
}
