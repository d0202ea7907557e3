//! Flow configuration loaded from YAML.
//!
//! ```yaml
//! name: unit_test_flow
//! version: "1.0.0"
//! description: Generate unit tests for the selected code
//! flow:
//!   - step: load_rules
//!     type: instruction
//!     file: .github/instructions/generate_unit_test.instructions.md
//!     required: true
//!   - step: summarize
//!     type: prompt
//!     file: .github/prompts/summarize_logic.prompt.md
//! file_patterns:
//!   include: ["**/*.md"]
//!   exclude: ["node_modules/**"]
//! output:
//!   format: combined
//! ```

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Deserializer, Serialize};
use serde_yaml::{Mapping, Value};

use crate::error::{FlowError, Result};

/// Output format value that enables saving the combined artifact.
pub const COMBINED_FORMAT: &str = "combined";

/// Ordered execution plan for one run.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FlowConfig {
    /// Flow name.
    #[serde(default = "default_name")]
    pub name: String,
    /// Flow version; numbers in YAML are kept as text.
    #[serde(default = "default_version", deserialize_with = "scalar_text")]
    pub version: String,
    /// Free-form description.
    #[serde(default)]
    pub description: String,
    /// Free-form settings, informational only.
    #[serde(default)]
    pub config: Mapping,
    /// Steps, executed in listed order.
    #[serde(default, rename = "flow")]
    pub steps: Vec<FlowStep>,
    /// Include/exclude discovery scoping.
    #[serde(default)]
    pub file_patterns: FilePatterns,
    /// Output options.
    #[serde(default)]
    pub output: OutputOptions,
    /// Execution hints (model, mode), informational only.
    #[serde(default)]
    pub execution: Mapping,
}

impl Default for FlowConfig {
    fn default() -> Self {
        Self {
            name: default_name(),
            version: default_version(),
            description: String::new(),
            config: Mapping::new(),
            steps: Vec::new(),
            file_patterns: FilePatterns::default(),
            output: OutputOptions::default(),
            execution: Mapping::new(),
        }
    }
}

impl FlowConfig {
    /// Configuration used when no flow file is given.
    ///
    /// No steps, so execution catalogs the whole base directory, and the
    /// combined prompt artifact is saved.
    #[must_use]
    pub fn builtin() -> Self {
        Self {
            name: "default".to_string(),
            output: OutputOptions {
                format: Some(COMBINED_FORMAT.to_string()),
                extra: BTreeMap::new(),
            },
            ..Self::default()
        }
    }

    /// Parse a configuration from YAML text.
    ///
    /// # Errors
    ///
    /// Returns the parser error for malformed YAML or a document that is not
    /// a flow mapping.
    pub fn from_yaml(yaml: &str) -> std::result::Result<Self, serde_yaml::Error> {
        serde_yaml::from_str(yaml)
    }

    /// Load a configuration file.
    ///
    /// # Errors
    ///
    /// - [`FlowError::ConfigNotFound`] if the file does not exist
    /// - [`FlowError::ConfigRead`] if it cannot be read
    /// - [`FlowError::ConfigParse`] if it is not a valid flow document
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(FlowError::ConfigNotFound(path.to_path_buf()));
        }
        let text = fs::read_to_string(path).map_err(|source| FlowError::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_yaml(&text).map_err(|source| FlowError::ConfigParse {
            path: path.to_path_buf(),
            source,
        })?;
        log::info!(
            "Loaded flow '{}' v{} with {} steps from {}",
            config.name,
            config.version,
            config.steps.len(),
            path.display()
        );
        Ok(config)
    }

    /// Whether the combined artifact should be written.
    #[must_use]
    pub fn saves_combined(&self) -> bool {
        self.output.format.as_deref() == Some(COMBINED_FORMAT)
    }
}

/// One step of a flow; each references a single file.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct FlowStep {
    /// Step name; defaults to `step_<n>`.
    #[serde(default, rename = "step", skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Free-form step type (e.g. `instruction`, `prompt`).
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub step_type: Option<String>,
    /// File reference relative to the base directory.
    #[serde(default)]
    pub file: String,
    /// Human-readable description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Missing required files are errors; missing optional files are skipped.
    #[serde(default = "default_required")]
    pub required: bool,
}

impl FlowStep {
    /// Step name, or `step_<ordinal>` (1-based) when unnamed.
    #[must_use]
    pub fn display_name(&self, ordinal: usize) -> String {
        self.name
            .clone()
            .unwrap_or_else(|| format!("step_{ordinal}"))
    }

    /// Step type, or `unknown`.
    #[must_use]
    pub fn type_name(&self) -> &str {
        self.step_type.as_deref().unwrap_or("unknown")
    }

    /// Description, or `No description`.
    #[must_use]
    pub fn description_text(&self) -> &str {
        self.description.as_deref().unwrap_or("No description")
    }
}

/// Include/exclude glob lists for discovery.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct FilePatterns {
    /// Allow-list; empty means everything.
    #[serde(default)]
    pub include: Vec<String>,
    /// Deny-list.
    #[serde(default)]
    pub exclude: Vec<String>,
}

/// Output options.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct OutputOptions {
    /// `combined` saves the combined prompt artifact.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,
    /// Other keys, kept as-is.
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

fn default_name() -> String {
    "unnamed_flow".to_string()
}

fn default_version() -> String {
    "1.0.0".to_string()
}

const fn default_required() -> bool {
    true
}

/// Accept a YAML string, number or bool as text.
fn scalar_text<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::String(s) => Ok(s),
        Value::Number(n) => Ok(n.to_string()),
        Value::Bool(b) => Ok(b.to_string()),
        Value::Null => Ok(default_version()),
        other => Err(serde::de::Error::custom(format!(
            "expected a scalar, found {other:?}"
        ))),
    }
}
