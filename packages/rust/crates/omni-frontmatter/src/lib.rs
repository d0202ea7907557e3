//! Omni-Frontmatter - YAML header extraction and file classification.
//!
//! Markdown prompt and instruction files may start with a YAML block:
//!
//! ```yaml
//! ---
//! description: Summarize the selected logic
//! mode: agent
//! model: Claude Sonnet 4
//! ---
//! # Body starts here
//! ```
//!
//! # Architecture
//!
//! ```text
//! omni-frontmatter/src/
//! ├── lib.rs        # Module declarations and re-exports
//! ├── header.rs     # Delimited header extraction
//! ├── category.rs   # FileCategory + classify()
//! └── metadata.rs   # FileMetadata projection
//! ```
//!
//! Everything here is pure: callers hand in text and paths, nothing touches
//! the file system.

// ============================================================================
// Module Declarations
// ============================================================================

mod category;
mod header;
mod metadata;

// ============================================================================
// Public Re-exports
// ============================================================================

pub use category::{FileCategory, classify};
pub use header::{HEADER_DELIMITER, extract_header};
pub use metadata::{FileMetadata, build_metadata};

/// Parsed header block, keys in document order.
pub type Header = serde_yaml::Mapping;
