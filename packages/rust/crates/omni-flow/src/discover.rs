//! Glob-based file discovery under a base directory.
//!
//! Patterns are compiled into one `GlobSet` and matched against each file's
//! path relative to the base directory. `*` never crosses a `/`; a leading
//! `**/` matches zero or more directories.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use globset::{GlobBuilder, GlobSet, GlobSetBuilder};
use walkdir::WalkDir;

use crate::error::{FlowError, Result};

/// Patterns used to discover each category, plus optional scoping.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiscoveryPatterns {
    /// Patterns for instruction files.
    pub instructions: Vec<String>,
    /// Patterns for prompt files.
    pub prompts: Vec<String>,
    /// Patterns for the document catch-all.
    pub documents: Vec<String>,
    /// When non-empty, only files matching one of these are discovered.
    pub include: Vec<String>,
    /// Files matching any of these are never discovered.
    pub exclude: Vec<String>,
}

impl Default for DiscoveryPatterns {
    fn default() -> Self {
        Self {
            instructions: to_owned(&[
                ".github/instructions/**/*.instructions.md",
                "instructions/**/*.instructions.md",
                "**/*.instructions.md",
            ]),
            prompts: to_owned(&[
                ".github/prompts/**/*.prompt.md",
                "prompts/**/*.prompt.md",
                "**/*.prompt.md",
            ]),
            documents: to_owned(&["docs/**/*.md", "*.md"]),
            include: Vec::new(),
            exclude: Vec::new(),
        }
    }
}

impl DiscoveryPatterns {
    /// Restrict discovery with include/exclude lists.
    #[must_use]
    pub fn with_scope(mut self, include: &[String], exclude: &[String]) -> Self {
        self.include = include.to_vec();
        self.exclude = exclude.to_vec();
        self
    }
}

fn to_owned(patterns: &[&str]) -> Vec<String> {
    patterns.iter().map(ToString::to_string).collect()
}

/// Compiled include/exclude filter applied after pattern matching.
#[derive(Debug, Clone, Default)]
pub struct ScopeFilter {
    include: Option<GlobSet>,
    exclude: Option<GlobSet>,
}

impl ScopeFilter {
    /// Compile a filter; empty lists disable that side.
    ///
    /// # Errors
    ///
    /// Returns [`FlowError::Pattern`] for an invalid glob.
    pub fn new(include: &[String], exclude: &[String]) -> Result<Self> {
        Ok(Self {
            include: compile_optional(include)?,
            exclude: compile_optional(exclude)?,
        })
    }

    /// Whether a base-relative path survives the filter.
    #[must_use]
    pub fn allows(&self, relative: &Path) -> bool {
        if let Some(include) = &self.include
            && !include.is_match(relative)
        {
            return false;
        }
        !self
            .exclude
            .as_ref()
            .is_some_and(|exclude| exclude.is_match(relative))
    }
}

fn compile_optional(patterns: &[String]) -> Result<Option<GlobSet>> {
    if patterns.is_empty() {
        Ok(None)
    } else {
        compile(patterns).map(Some)
    }
}

/// Compile glob patterns into a single set.
///
/// # Errors
///
/// Returns [`FlowError::Pattern`] naming the first pattern that fails.
pub fn compile(patterns: &[String]) -> Result<GlobSet> {
    let mut builder = GlobSetBuilder::new();
    for pattern in patterns {
        let glob = GlobBuilder::new(pattern)
            .literal_separator(true)
            .build()
            .map_err(|source| FlowError::Pattern {
                pattern: pattern.clone(),
                source,
            })?;
        builder.add(glob);
    }
    builder.build().map_err(|source| FlowError::Pattern {
        pattern: patterns.join(", "),
        source,
    })
}

/// Find regular files under `base` matching any of `patterns`.
///
/// Results are unique, sorted, and returned as `base` joined with the
/// relative path. A missing base directory yields an empty list.
///
/// # Errors
///
/// Returns [`FlowError::Pattern`] if a pattern does not compile.
pub fn find_files(base: &Path, patterns: &[String], scope: &ScopeFilter) -> Result<Vec<PathBuf>> {
    if patterns.is_empty() {
        return Ok(Vec::new());
    }
    let glob_set = compile(patterns)?;

    if !base.is_dir() {
        log::warn!("Base directory not found: {}", base.display());
        return Ok(Vec::new());
    }

    let mut found = BTreeSet::new();
    for entry in WalkDir::new(base).follow_links(false) {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                log::debug!("Skipping unreadable entry: {e}");
                continue;
            }
        };

        let path = entry.path();
        if !path.is_file() {
            continue;
        }
        let Ok(relative) = path.strip_prefix(base) else {
            continue;
        };
        if glob_set.is_match(relative) && scope.allows(relative) {
            found.insert(path.to_path_buf());
        }
    }

    log::debug!(
        "Discovered {} files for {} patterns under {}",
        found.len(),
        patterns.len(),
        base.display()
    );
    Ok(found.into_iter().collect())
}
