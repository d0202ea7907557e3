//! Flow engine - runs a [`FlowConfig`] against a [`Catalog`].
//!
//! A config with steps reads each referenced file in order and records a
//! per-step outcome. A config without steps catalogs the whole base
//! directory instead. Either way the prompt files are combined into one
//! text artifact.

use std::fs;
use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use omni_frontmatter::FileCategory;
use serde::Serialize;

use crate::catalog::{Catalog, CatalogBuckets};
use crate::combine::combine_observed;
use crate::config::{FlowConfig, FlowStep};
use crate::discover::DiscoveryPatterns;
use crate::error::{FlowError, Result};
use crate::observer::FlowObserver;
use crate::record::FileRecord;

/// File name of the saved combined artifact, relative to the base directory.
pub const COMBINED_OUTPUT_FILE: &str = "combined_prompt_context.md";

/// Outcome of a single step.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum StepStatus {
    /// File read and recorded.
    Success,
    /// Required file missing, or the file could not be read.
    Error,
    /// Optional file missing.
    Skipped,
}

impl StepStatus {
    /// Lowercase name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Error => "error",
            Self::Skipped => "skipped",
        }
    }
}

impl std::fmt::Display for StepStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Record of one executed step.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct StepOutcome {
    /// Step name.
    pub step: String,
    /// Step type.
    #[serde(rename = "type")]
    pub step_type: String,
    /// File reference as written in the config.
    pub file: String,
    /// Result.
    pub status: StepStatus,
    /// Body length in characters, on success.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content_length: Option<usize>,
    /// Error or skip reason.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// Aggregate result of [`FlowEngine::execute`].
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct FlowResult {
    /// Name of the executed flow.
    pub flow_name: String,
    /// Per-step outcomes, in execution order. Empty for a catalog run.
    pub steps: Vec<StepOutcome>,
    /// Successfully read files keyed by step name, in first-seen order.
    pub files: IndexMap<String, FileRecord>,
    /// Bucketed catalog, present when the flow had no steps.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub catalog: Option<CatalogBuckets>,
    /// Combined prompt text; empty when there were no prompt files.
    pub combined: String,
}

impl FlowResult {
    /// Number of steps with the given status.
    #[must_use]
    pub fn count(&self, status: StepStatus) -> usize {
        self.steps.iter().filter(|s| s.status == status).count()
    }

    /// Prompt files that went into the combined text, in order.
    #[must_use]
    pub fn prompt_files(&self) -> Vec<&FileRecord> {
        match &self.catalog {
            Some(buckets) => buckets.prompts.iter().collect(),
            None => self
                .files
                .values()
                .filter(|record| record.category() == FileCategory::Prompt)
                .collect(),
        }
    }
}

/// Executes flows and ordered reads against one catalog.
#[derive(Debug, Clone)]
pub struct FlowEngine {
    catalog: Catalog,
}

impl FlowEngine {
    /// Engine over an existing catalog.
    #[must_use]
    pub fn new(catalog: Catalog) -> Self {
        Self { catalog }
    }

    /// Engine whose catalog is scoped by the config's `file_patterns`.
    ///
    /// # Errors
    ///
    /// Returns [`FlowError::Pattern`] if an include/exclude pattern is invalid.
    pub fn for_config(base_path: impl Into<PathBuf>, config: &FlowConfig) -> Result<Self> {
        let patterns = DiscoveryPatterns::default()
            .with_scope(&config.file_patterns.include, &config.file_patterns.exclude);
        Ok(Self::new(Catalog::with_patterns(base_path, patterns)?))
    }

    /// Underlying catalog.
    #[must_use]
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Run a flow.
    ///
    /// Step failures never abort the run; they show up as `error` or
    /// `skipped` outcomes.
    ///
    /// # Errors
    ///
    /// Only a catalog run (no steps) can fail, on an invalid pattern.
    pub fn execute(
        &self,
        config: &FlowConfig,
        observer: &mut dyn FlowObserver,
    ) -> Result<FlowResult> {
        if config.steps.is_empty() {
            return self.execute_catalog(config, observer);
        }

        observer.flow_started(config);
        log::info!("Executing flow '{}' ({} steps)", config.name, config.steps.len());

        let mut steps = Vec::with_capacity(config.steps.len());
        let mut files: IndexMap<String, FileRecord> = IndexMap::new();

        for (index, step) in config.steps.iter().enumerate() {
            let ordinal = index + 1;
            observer.step_started(ordinal, step);

            let name = step.display_name(ordinal);
            let (outcome, record) = self.run_step(&name, step);
            observer.step_finished(&outcome);
            steps.push(outcome);

            if let Some(record) = record {
                files.insert(name, record);
            }
        }

        let prompts: Vec<FileRecord> = files
            .values()
            .filter(|record| record.category() == FileCategory::Prompt)
            .cloned()
            .collect();
        let combined = combine_observed(&prompts, observer);

        let result = FlowResult {
            flow_name: config.name.clone(),
            steps,
            files,
            catalog: None,
            combined,
        };
        log::info!(
            "Flow '{}' finished: {} success, {} error, {} skipped",
            result.flow_name,
            result.count(StepStatus::Success),
            result.count(StepStatus::Error),
            result.count(StepStatus::Skipped)
        );
        observer.flow_finished(&result);
        Ok(result)
    }

    fn execute_catalog(
        &self,
        config: &FlowConfig,
        observer: &mut dyn FlowObserver,
    ) -> Result<FlowResult> {
        observer.catalog_fallback(config);
        log::info!("Flow '{}' has no steps, cataloguing base directory", config.name);

        let buckets = self.catalog.read_all()?;
        let combined = combine_observed(&buckets.prompts, observer);

        let result = FlowResult {
            flow_name: config.name.clone(),
            steps: Vec::new(),
            files: IndexMap::new(),
            catalog: Some(buckets),
            combined,
        };
        observer.flow_finished(&result);
        Ok(result)
    }

    fn run_step(&self, name: &str, step: &FlowStep) -> (StepOutcome, Option<FileRecord>) {
        let outcome = |status, content_length, message: Option<&str>| StepOutcome {
            step: name.to_string(),
            step_type: step.type_name().to_string(),
            file: step.file.clone(),
            status,
            content_length,
            message: message.map(ToString::to_string),
        };

        let path = self.catalog.resolve(&step.file);
        if !path.exists() {
            return if step.required {
                log::warn!("Required file not found for step '{name}': {}", step.file);
                (outcome(StepStatus::Error, None, Some("File not found")), None)
            } else {
                log::debug!("Optional file not found for step '{name}': {}", step.file);
                (
                    outcome(StepStatus::Skipped, None, Some("Optional file not found")),
                    None,
                )
            };
        }

        match self.catalog.read_file(&path) {
            Ok(record) => {
                let length = record.content_length();
                (outcome(StepStatus::Success, Some(length), None), Some(record))
            }
            Err(e) => {
                log::warn!("Step '{name}' failed: {e}");
                let message = e.to_string();
                (outcome(StepStatus::Error, None, Some(&message)), None)
            }
        }
    }

    /// Read files in the given order, relative to the base directory.
    ///
    /// Unreadable entries are reported to `observer`, logged, and left out.
    pub fn read_in_order<P: AsRef<Path>>(
        &self,
        paths: &[P],
        observer: &mut dyn FlowObserver,
    ) -> Vec<FileRecord> {
        let mut records = Vec::with_capacity(paths.len());
        for reference in paths {
            let path = self.catalog.resolve(reference);
            match self.catalog.read_file(&path) {
                Ok(record) => records.push(record),
                Err(e) => {
                    log::warn!("Could not read {}: {e}", path.display());
                    observer.read_warning(&path, &e.to_string());
                }
            }
        }
        records
    }

    /// Write the combined text to [`COMBINED_OUTPUT_FILE`] in the base directory.
    ///
    /// # Errors
    ///
    /// Returns [`FlowError::Write`] if the file cannot be written.
    pub fn save_combined(&self, combined: &str) -> Result<PathBuf> {
        let path = self.catalog.resolve(COMBINED_OUTPUT_FILE);
        fs::write(&path, combined).map_err(|source| FlowError::Write {
            path: path.clone(),
            source,
        })?;
        log::info!("Saved combined prompt context to {}", path.display());
        Ok(path)
    }
}
