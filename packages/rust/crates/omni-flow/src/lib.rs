//! Omni-Flow - prompt flow reader.
//!
//! Discovers prompt, instruction and document markdown files under a base
//! directory, strips and parses their YAML headers, and combines prompt
//! files into a single context artifact, optionally following an ordered
//! list of steps from a YAML flow file.
//!
//! # Architecture
//!
//! ```text
//! omni-flow/src/
//! ├── lib.rs        # Re-exports, logger setup
//! ├── error.rs      # ReadError, FlowError
//! ├── read.rs       # Size-limited, binary-safe text reads
//! ├── discover.rs   # GlobSet discovery + include/exclude scope
//! ├── record.rs     # FileRecord
//! ├── catalog.rs    # Catalog, CatalogBuckets
//! ├── config.rs     # FlowConfig (YAML)
//! ├── combine.rs    # Combined prompt artifact
//! ├── observer.rs   # FlowObserver hooks
//! ├── engine.rs     # FlowEngine, FlowResult
//! ├── cli.rs        # (bin) clap arguments
//! ├── report.rs     # (bin) console/JSON reporting
//! └── main.rs       # (bin) entry point
//! ```
//!
//! # Example
//!
//! ```rust,ignore
//! use omni_flow::{FlowConfig, FlowEngine, NoopObserver};
//!
//! let config = FlowConfig::load(Path::new("unit_test_flow.yaml"))?;
//! let engine = FlowEngine::for_config(".", &config)?;
//! let result = engine.execute(&config, &mut NoopObserver)?;
//! println!("{}", result.combined);
//! ```

// ============================================================================
// Module Declarations
// ============================================================================

mod catalog;
mod combine;
mod config;
mod discover;
mod engine;
mod error;
mod observer;
mod read;
mod record;

// ============================================================================
// Public Re-exports
// ============================================================================

pub use catalog::{Catalog, CatalogBuckets};
pub use combine::{combine, combine_observed};
pub use config::{COMBINED_FORMAT, FilePatterns, FlowConfig, FlowStep, OutputOptions};
pub use discover::{DiscoveryPatterns, ScopeFilter};
pub use engine::{COMBINED_OUTPUT_FILE, FlowEngine, FlowResult, StepOutcome, StepStatus};
pub use error::{FlowError, ReadError, Result};
pub use observer::{FlowObserver, NoopObserver};
pub use read::{DEFAULT_MAX_BYTES, read_text};
pub use record::FileRecord;

pub use omni_frontmatter::{FileCategory, FileMetadata};

/// Initialize `env_logger`.
///
/// `RUST_LOG` wins; otherwise `warn`, or `debug` when `verbose` is set.
pub fn init_logger(verbose: bool) {
    let default_filter = if verbose { "debug" } else { "warn" };
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .format_timestamp(None)
        .try_init();
}
