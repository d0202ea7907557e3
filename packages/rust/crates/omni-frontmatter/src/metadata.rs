//! Metadata projection from a parsed header.

use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_yaml::Value;

use crate::Header;
use crate::category::{FileCategory, classify};

/// Metadata of a processed file.
///
/// Recognized header fields are exposed individually; the full header,
/// including keys not listed here, is kept in `raw`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "snake_case")]
pub struct FileMetadata {
    /// Category assigned by [`classify`].
    pub category: FileCategory,
    /// Glob of files an instruction applies to (`applyTo` / `applyto`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub apply_to: Option<String>,
    /// Chat mode for a prompt (e.g. `agent`, `ask`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mode: Option<String>,
    /// Model requested by a prompt.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    /// Human-readable description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Full parsed header.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub raw: Option<Header>,
}

impl FileMetadata {
    /// Metadata for a file without a header.
    #[must_use]
    pub fn with_category(category: FileCategory) -> Self {
        Self {
            category,
            ..Self::default()
        }
    }
}

/// Build [`FileMetadata`] for a file.
///
/// The category is always set. Field values that are strings, numbers or
/// booleans are rendered as text; mappings, sequences and nulls count as unset.
#[must_use]
pub fn build_metadata(path: &Path, header: Option<&Header>) -> FileMetadata {
    let category = classify(path, header);

    let Some(header) = header else {
        return FileMetadata::with_category(category);
    };

    FileMetadata {
        category,
        apply_to: text_field(header, "applyTo").or_else(|| text_field(header, "applyto")),
        mode: text_field(header, "mode"),
        model: text_field(header, "model"),
        description: text_field(header, "description"),
        raw: Some(header.clone()),
    }
}

/// Scalar header value as text; empty strings count as unset.
fn text_field(header: &Header, key: &str) -> Option<String> {
    let text = match header.get(key)? {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Tagged(tagged) => match &tagged.value {
            Value::String(s) => s.clone(),
            _ => return None,
        },
        Value::Null | Value::Sequence(_) | Value::Mapping(_) => return None,
    };
    (!text.is_empty()).then_some(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn header(yaml: &str) -> Header {
        serde_yaml::from_str(yaml).unwrap()
    }

    #[test]
    fn test_numeric_and_bool_values_render_as_text() {
        let h = header("model: 4\nmode: true");
        let meta = build_metadata(Path::new("x.md"), Some(&h));
        assert_eq!(meta.model.as_deref(), Some("4"));
        assert_eq!(meta.mode.as_deref(), Some("true"));
    }

    #[test]
    fn test_empty_apply_to_falls_back_to_lowercase_alias() {
        let h = header("applyTo: ''\napplyto: '**/*.rs'");
        let meta = build_metadata(Path::new("rules.md"), Some(&h));
        assert_eq!(meta.apply_to.as_deref(), Some("**/*.rs"));
    }

    #[test]
    fn test_sequence_value_is_unset() {
        let h = header("description: [a, b]");
        let meta = build_metadata(Path::new("x.md"), Some(&h));
        assert!(meta.description.is_none());
        assert!(meta.raw.is_some());
    }
}
