//! Delimited YAML header extraction.
//!
//! A header only counts when the very first line is the delimiter and a
//! second delimiter line closes it. Anything else leaves the text untouched.

use serde_yaml::Value;

use crate::Header;

/// Line that opens and closes a header block.
pub const HEADER_DELIMITER: &str = "---";

/// Split a leading YAML header from the rest of the text.
///
/// Returns `(Some(header), body)` when the text starts with a delimited block
/// whose content parses as a YAML mapping. In every other case (no opening
/// delimiter, no closing delimiter, malformed YAML, a YAML scalar or sequence)
/// the result is `(None, raw)` with `raw` unchanged.
///
/// An empty block, or one holding only comments, yields an empty mapping.
///
/// # Examples
///
/// ```
/// use omni_frontmatter::extract_header;
///
/// let (header, body) = extract_header("---\nmode: agent\n---\n# Title");
/// let header = header.unwrap_or_default();
/// assert_eq!(header.get("mode").and_then(|v| v.as_str()), Some("agent"));
/// assert_eq!(body, "# Title");
/// ```
#[must_use]
pub fn extract_header(raw: &str) -> (Option<Header>, String) {
    let lines: Vec<&str> = raw.split('\n').collect();

    if !is_delimiter(lines[0]) {
        return (None, raw.to_string());
    }

    let Some(end) = lines
        .iter()
        .skip(1)
        .position(|line| is_delimiter(line))
        .map(|offset| offset + 1)
    else {
        log::debug!("Unterminated header block, keeping raw text");
        return (None, raw.to_string());
    };

    let yaml = lines[1..end].join("\n");
    match parse_block(&yaml) {
        Some(header) => (Some(header), lines[end + 1..].join("\n")),
        None => (None, raw.to_string()),
    }
}

fn is_delimiter(line: &str) -> bool {
    line.trim() == HEADER_DELIMITER
}

/// Parse the text between the delimiters into a mapping.
fn parse_block(yaml: &str) -> Option<Header> {
    if yaml.trim().is_empty() {
        return Some(Header::new());
    }

    match serde_yaml::from_str::<Value>(yaml) {
        Ok(Value::Mapping(mapping)) => Some(mapping),
        Ok(Value::Null) => Some(Header::new()),
        Ok(other) => {
            log::debug!("Header block is not a mapping: {other:?}");
            None
        }
        Err(e) => {
            log::debug!("Malformed header block: {e}");
            None
        }
    }
}
