//! File categories and the rules that assign them.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::Header;

/// Filename marker for instruction files.
const INSTRUCTION_SUFFIX: &str = ".instructions.md";
/// Filename marker for prompt files.
const PROMPT_SUFFIX: &str = ".prompt.md";

/// Header keys that mark an instruction file.
const APPLY_TO_KEYS: [&str; 2] = ["applyTo", "applyto"];
/// Header keys that mark a prompt file.
const PROMPT_KEYS: [&str; 2] = ["mode", "model"];

/// Category of a processed markdown file.
///
/// Assigned once when the file is read.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "snake_case")]
pub enum FileCategory {
    /// Rules applied to matching source files (`*.instructions.md`).
    Instruction,
    /// Reusable prompt (`*.prompt.md`).
    Prompt,
    /// Any other markdown document.
    #[default]
    Document,
}

impl FileCategory {
    /// Stable lowercase name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Instruction => "instruction",
            Self::Prompt => "prompt",
            Self::Document => "document",
        }
    }
}

impl std::str::FromStr for FileCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "instruction" | "instructions" => Ok(Self::Instruction),
            "prompt" | "prompts" => Ok(Self::Prompt),
            "document" | "documents" | "doc" | "docs" => Ok(Self::Document),
            other => Err(format!("unknown file category: {other}")),
        }
    }
}

impl std::fmt::Display for FileCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Classify a file from its name and optional header.
///
/// Rules, first match wins:
/// 1. filename contains `.instructions.md` => `Instruction`
/// 2. filename contains `.prompt.md` => `Prompt`
/// 3. header has `applyTo` / `applyto` => `Instruction`
/// 4. header has `mode` / `model` => `Prompt`
/// 5. otherwise `Document`
///
/// The filename check is case-insensitive.
#[must_use]
pub fn classify(path: &Path, header: Option<&Header>) -> FileCategory {
    let file_name = path
        .file_name()
        .map(|name| name.to_string_lossy().to_lowercase())
        .unwrap_or_default();

    if file_name.contains(INSTRUCTION_SUFFIX) {
        return FileCategory::Instruction;
    }
    if file_name.contains(PROMPT_SUFFIX) {
        return FileCategory::Prompt;
    }

    if let Some(header) = header {
        if has_any_key(header, &APPLY_TO_KEYS) {
            return FileCategory::Instruction;
        }
        if has_any_key(header, &PROMPT_KEYS) {
            return FileCategory::Prompt;
        }
    }

    FileCategory::Document
}

fn has_any_key(header: &Header, keys: &[&str]) -> bool {
    keys.iter().any(|key| header.contains_key(*key))
}
