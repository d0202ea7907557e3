//! Observer hooks for narrating a flow run.
//!
//! The library never prints. Front ends that want a transcript implement
//! [`FlowObserver`] and hand it to the engine; every method defaults to a
//! no-op so implementors only override what they render.

use std::path::Path;

use crate::config::{FlowConfig, FlowStep};
use crate::engine::{FlowResult, StepOutcome};
use crate::record::FileRecord;

/// Receives progress events from [`crate::FlowEngine`] and [`crate::combine_observed`].
pub trait FlowObserver {
    /// A flow with at least one step is about to run.
    fn flow_started(&mut self, _config: &FlowConfig) {}

    /// A flow without steps fell back to cataloguing the base directory.
    fn catalog_fallback(&mut self, _config: &FlowConfig) {}

    /// Step `ordinal` (1-based) is about to run.
    fn step_started(&mut self, _ordinal: usize, _step: &FlowStep) {}

    /// A step finished with the given outcome.
    fn step_finished(&mut self, _outcome: &StepOutcome) {}

    /// A file in an ordered read could not be read and was left out.
    fn read_warning(&mut self, _path: &Path, _message: &str) {}

    /// Combining is about to start for `count` prompt files.
    fn combine_started(&mut self, _count: usize) {}

    /// Prompt `ordinal` (1-based) was appended to the combined text.
    fn prompt_combined(&mut self, _ordinal: usize, _record: &FileRecord) {}

    /// Combining finished.
    fn combine_finished(&mut self, _count: usize, _combined: &str) {}

    /// The whole flow finished.
    fn flow_finished(&mut self, _result: &FlowResult) {}
}

/// Observer that ignores every event.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopObserver;

impl FlowObserver for NoopObserver {}
