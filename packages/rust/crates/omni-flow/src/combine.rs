//! Combined prompt artifact.

use crate::observer::{FlowObserver, NoopObserver};
use crate::record::FileRecord;

/// Width of the separator line after each prompt.
const SEPARATOR_WIDTH: usize = 50;

/// Concatenate prompt files into one text.
///
/// Each file contributes a `# Prompt {n}: {name}` header block (with path and
/// any description, mode and model), its body, and a separator line. Parts
/// are joined with newlines. Empty input yields an empty string.
#[must_use]
pub fn combine(prompts: &[FileRecord]) -> String {
    combine_observed(prompts, &mut NoopObserver)
}

/// [`combine`], reporting each appended file to `observer`.
pub fn combine_observed(prompts: &[FileRecord], observer: &mut dyn FlowObserver) -> String {
    if prompts.is_empty() {
        return String::new();
    }

    observer.combine_started(prompts.len());

    let separator = format!("\n{}\n", "─".repeat(SEPARATOR_WIDTH));
    let mut parts: Vec<String> = Vec::with_capacity(prompts.len() * 3);

    for (index, record) in prompts.iter().enumerate() {
        let ordinal = index + 1;
        parts.push(header_block(ordinal, record));
        parts.push(record.body.clone());
        parts.push(separator.clone());
        observer.prompt_combined(ordinal, record);
    }

    let combined = parts.join("\n");
    observer.combine_finished(prompts.len(), &combined);
    combined
}

fn header_block(ordinal: usize, record: &FileRecord) -> String {
    let meta = &record.metadata;
    let mut header = format!(
        "# Prompt {ordinal}: {}\n# Path: {}\n",
        record.file_name(),
        record.path.display()
    );
    for (label, value) in [
        ("Description", &meta.description),
        ("Mode", &meta.mode),
        ("Model", &meta.model),
    ] {
        if let Some(value) = value {
            header.push_str(&format!("# {label}: {value}\n"));
        }
    }
    header.push('\n');
    header
}
