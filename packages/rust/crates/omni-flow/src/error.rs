//! Error types for catalog and flow operations.
//!
//! Follows ODF-REP: Library crates use `thiserror` for explicit error enums.

use std::path::PathBuf;

use thiserror::Error;

/// Failure reading a single text file.
#[derive(Error, Debug)]
pub enum ReadError {
    /// File does not exist.
    #[error("File not found: {0}")]
    NotFound(PathBuf),

    /// File exceeds size limit.
    #[error("File too large: {0} bytes (limit: {1})")]
    TooLarge(u64, u64),

    /// File contains binary content (NULL bytes detected).
    #[error("Binary file detected")]
    BinaryFile,

    /// Path exists but is not a regular file.
    #[error("Not a file: {0}")]
    NotAFile(PathBuf),

    /// Low-level I/O error from std::io.
    #[error("IO error: {0}")]
    System(#[from] std::io::Error),
}

/// Errors for catalog discovery, configuration loading and flow execution.
#[derive(Error, Debug)]
pub enum FlowError {
    /// A catalog file could not be read.
    #[error("Failed to read {path}: {source}")]
    Read {
        /// File that failed.
        path: PathBuf,
        /// Underlying read failure.
        #[source]
        source: ReadError,
    },

    /// Flow configuration file does not exist.
    #[error("Configuration file not found: {0}")]
    ConfigNotFound(PathBuf),

    /// Flow configuration file exists but could not be read.
    #[error("Failed to read configuration file {path}: {source}")]
    ConfigRead {
        /// Configuration path.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Flow configuration is not valid YAML for a flow.
    #[error("Invalid YAML in config file {path}: {source}")]
    ConfigParse {
        /// Configuration path.
        path: PathBuf,
        /// Parser error.
        #[source]
        source: serde_yaml::Error,
    },

    /// A discovery pattern failed to compile.
    #[error("Invalid file pattern '{pattern}': {source}")]
    Pattern {
        /// Offending pattern.
        pattern: String,
        /// Compiler error.
        #[source]
        source: globset::Error,
    },

    /// Writing the combined artifact failed.
    #[error("Failed to write {path}: {source}")]
    Write {
        /// Output path.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
}

/// Result alias for flow operations.
pub type Result<T> = std::result::Result<T, FlowError>;
