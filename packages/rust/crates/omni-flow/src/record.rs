//! Processed file record.

use std::path::PathBuf;

use omni_frontmatter::{FileCategory, FileMetadata, Header, build_metadata, extract_header};
use serde::Serialize;

/// One processed markdown file.
///
/// Built once from raw text; never mutated afterwards.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct FileRecord {
    /// Location of the file (base directory joined with its relative path).
    pub path: PathBuf,
    /// Category and recognized header fields.
    pub metadata: FileMetadata,
    /// Content with the header block removed.
    pub body: String,
}

impl FileRecord {
    /// Build a record from raw file text.
    #[must_use]
    pub fn from_text(path: impl Into<PathBuf>, raw: &str) -> Self {
        let path = path.into();
        let (header, body) = extract_header(raw);
        let metadata = build_metadata(&path, header.as_ref());
        Self {
            path,
            metadata,
            body,
        }
    }

    /// Assigned category.
    #[must_use]
    pub fn category(&self) -> FileCategory {
        self.metadata.category
    }

    /// Parsed header, if the file had one.
    #[must_use]
    pub fn header(&self) -> Option<&Header> {
        self.metadata.raw.as_ref()
    }

    /// Final path component, lossily decoded.
    #[must_use]
    pub fn file_name(&self) -> String {
        self.path
            .file_name()
            .map_or_else(|| self.path.display().to_string(), |name| {
                name.to_string_lossy().into_owned()
            })
    }

    /// Body length in characters.
    #[must_use]
    pub fn content_length(&self) -> usize {
        self.body.chars().count()
    }
}
