//! Tests for header extraction.

use omni_frontmatter::extract_header;

#[test]
fn test_text_without_delimiter_is_unchanged() {
    let raw = "# Title\n\n---\nmode: agent\n---\n";
    let (header, body) = extract_header(raw);
    assert!(header.is_none());
    assert_eq!(body, raw);
}

#[test]
fn test_leading_blank_line_is_not_a_header() {
    let raw = "\n---\ndescription: x\n---\nbody";
    let (header, body) = extract_header(raw);
    assert!(header.is_none());
    assert_eq!(body, raw);
}

#[test]
fn test_well_formed_header() {
    let raw = "---\ndescription: \"x\"\nmode: agent\n---\n# Prompt\n\nDo the thing.\n";
    let (header, body) = extract_header(raw);

    let header = header.unwrap();
    assert_eq!(
        header.get("description").and_then(|v| v.as_str()),
        Some("x")
    );
    assert_eq!(header.get("mode").and_then(|v| v.as_str()), Some("agent"));
    assert_eq!(body, "# Prompt\n\nDo the thing.\n");
}

#[test]
fn test_unknown_keys_are_preserved() {
    let (header, _) = extract_header("---\ntools: [search, edit]\nowner: team\n---\n");
    let header = header.unwrap();
    assert!(header.contains_key("tools"));
    assert_eq!(header.get("owner").and_then(|v| v.as_str()), Some("team"));
}

#[test]
fn test_unterminated_header_passes_through() {
    let raw = "---\ndescription: x\n# no closing line\n";
    let (header, body) = extract_header(raw);
    assert!(header.is_none());
    assert_eq!(body, raw);
}

#[test]
fn test_empty_header_is_empty_mapping() {
    let (header, body) = extract_header("---\n---\nbody");
    let header = header.unwrap();
    assert!(header.is_empty());
    assert_eq!(body, "body");
}

#[test]
fn test_malformed_yaml_degrades_to_no_header() {
    let raw = "---\ndescription: [unclosed\n---\nbody";
    let (header, body) = extract_header(raw);
    assert!(header.is_none());
    assert_eq!(body, raw);
}

#[test]
fn test_scalar_yaml_degrades_to_no_header() {
    let raw = "---\njust a sentence\n---\nbody";
    let (header, body) = extract_header(raw);
    assert!(header.is_none());
    assert_eq!(body, raw);
}

#[test]
fn test_body_after_header_keeps_later_delimiters() {
    let raw = "---\nmode: ask\n---\nintro\n---\noutro";
    let (_, body) = extract_header(raw);
    assert_eq!(body, "intro\n---\noutro");
}

#[test]
fn test_extraction_is_idempotent() {
    let (_, body) = extract_header("---\nmode: ask\n---\n# Body\ntext");
    let (header, again) = extract_header(&body);
    assert!(header.is_none());
    assert_eq!(again, body);
}

#[test]
fn test_crlf_delimiters() {
    let raw = "---\r\nmode: agent\r\n---\r\nbody\r\n";
    let (header, body) = extract_header(raw);
    let header = header.unwrap();
    assert_eq!(header.get("mode").and_then(|v| v.as_str()), Some("agent"));
    assert_eq!(body, "body\r\n");
}
