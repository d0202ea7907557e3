//! File catalog - discovery and category-bucketed reads.
//!
//! ```text
//! Catalog (base_path, DiscoveryPatterns)
//!      ↓
//! find_by_patterns()  → sorted unique paths
//!      ↓
//! read_file()         → FileRecord (header stripped, category assigned)
//!      ↓
//! read_all()          → CatalogBuckets { instructions, prompts, documents }
//! ```

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::discover::{DiscoveryPatterns, ScopeFilter, find_files};
use crate::error::{FlowError, Result};
use crate::read::{DEFAULT_MAX_BYTES, read_text};
use crate::record::FileRecord;

/// Files read by [`Catalog::read_all`], bucketed by discovery pattern.
///
/// A path appears in at most one bucket.
#[derive(Debug, Clone, Default, Serialize, PartialEq)]
pub struct CatalogBuckets {
    /// Files found by the instruction patterns.
    pub instructions: Vec<FileRecord>,
    /// Files found by the prompt patterns.
    pub prompts: Vec<FileRecord>,
    /// Remaining files found by the document patterns.
    pub documents: Vec<FileRecord>,
}

impl CatalogBuckets {
    /// Total number of files across buckets.
    #[must_use]
    pub fn total(&self) -> usize {
        self.instructions.len() + self.prompts.len() + self.documents.len()
    }

    /// Buckets with their display labels, in report order.
    #[must_use]
    pub fn labeled(&self) -> [(&'static str, &[FileRecord]); 3] {
        [
            ("instructions", self.instructions.as_slice()),
            ("prompts", self.prompts.as_slice()),
            ("documents", self.documents.as_slice()),
        ]
    }
}

/// Markdown catalog rooted at a base directory.
#[derive(Debug, Clone)]
pub struct Catalog {
    base_path: PathBuf,
    patterns: DiscoveryPatterns,
    scope: ScopeFilter,
    max_file_bytes: u64,
}

impl Catalog {
    /// Catalog with the default discovery patterns.
    #[must_use]
    pub fn new(base_path: impl Into<PathBuf>) -> Self {
        Self {
            base_path: base_path.into(),
            patterns: DiscoveryPatterns::default(),
            scope: ScopeFilter::default(),
            max_file_bytes: DEFAULT_MAX_BYTES,
        }
    }

    /// Catalog with custom patterns.
    ///
    /// # Errors
    ///
    /// Returns [`FlowError::Pattern`] if an include/exclude pattern is invalid.
    pub fn with_patterns(
        base_path: impl Into<PathBuf>,
        patterns: DiscoveryPatterns,
    ) -> Result<Self> {
        let scope = ScopeFilter::new(&patterns.include, &patterns.exclude)?;
        Ok(Self {
            base_path: base_path.into(),
            patterns,
            scope,
            max_file_bytes: DEFAULT_MAX_BYTES,
        })
    }

    /// Override the per-file size limit.
    #[must_use]
    pub fn max_file_bytes(mut self, max_bytes: u64) -> Self {
        self.max_file_bytes = max_bytes;
        self
    }

    /// Base directory all patterns and references resolve against.
    #[must_use]
    pub fn base_path(&self) -> &Path {
        &self.base_path
    }

    /// Active discovery patterns.
    #[must_use]
    pub fn patterns(&self) -> &DiscoveryPatterns {
        &self.patterns
    }

    /// Resolve a reference against the base directory.
    #[must_use]
    pub fn resolve(&self, reference: impl AsRef<Path>) -> PathBuf {
        self.base_path.join(reference)
    }

    /// Unique sorted files matching any pattern; directories excluded.
    ///
    /// # Errors
    ///
    /// Returns [`FlowError::Pattern`] for an invalid pattern.
    pub fn find_by_patterns(&self, patterns: &[String]) -> Result<Vec<PathBuf>> {
        find_files(&self.base_path, patterns, &self.scope)
    }

    /// Read and process a single file.
    ///
    /// # Errors
    ///
    /// Returns [`FlowError::Read`] if the file is missing, too large, binary
    /// or otherwise unreadable.
    pub fn read_file(&self, path: &Path) -> Result<FileRecord> {
        let raw = read_text(path, self.max_file_bytes).map_err(|source| FlowError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let record = FileRecord::from_text(path, &raw);
        log::debug!(
            "Read {} as {} ({} chars)",
            path.display(),
            record.category(),
            record.content_length()
        );
        Ok(record)
    }

    /// Read instruction, prompt and document files.
    ///
    /// Each discovered path lands in the first bucket that claims it:
    /// instructions, then prompts, then documents. Files that fail to read are
    /// logged and left out.
    ///
    /// # Errors
    ///
    /// Returns [`FlowError::Pattern`] for an invalid pattern.
    pub fn read_all(&self) -> Result<CatalogBuckets> {
        let mut claimed: HashSet<PathBuf> = HashSet::new();

        let instruction_paths = claim(
            self.find_by_patterns(&self.patterns.instructions)?,
            &mut claimed,
        );
        let prompt_paths = claim(self.find_by_patterns(&self.patterns.prompts)?, &mut claimed);
        let document_paths = claim(
            self.find_by_patterns(&self.patterns.documents)?,
            &mut claimed,
        );

        let buckets = CatalogBuckets {
            instructions: self.read_paths(&instruction_paths),
            prompts: self.read_paths(&prompt_paths),
            documents: self.read_paths(&document_paths),
        };
        log::info!(
            "Catalogued {} files under {}",
            buckets.total(),
            self.base_path.display()
        );
        Ok(buckets)
    }

    fn read_paths(&self, paths: &[PathBuf]) -> Vec<FileRecord> {
        paths
            .iter()
            .filter_map(|path| match self.read_file(path) {
                Ok(record) => Some(record),
                Err(e) => {
                    log::warn!("{e}");
                    None
                }
            })
            .collect()
    }
}

/// Keep paths not yet claimed by an earlier bucket, claiming them.
fn claim(paths: Vec<PathBuf>, claimed: &mut HashSet<PathBuf>) -> Vec<PathBuf> {
    paths
        .into_iter()
        .filter(|path| claimed.insert(path.clone()))
        .collect()
}
