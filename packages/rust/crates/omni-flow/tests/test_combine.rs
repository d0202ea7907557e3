//! Tests for the combined prompt artifact.

use omni_flow::{FileRecord, combine};

#[test]
fn test_empty_input() {
    assert_eq!(combine(&[]), "");
}

#[test]
fn test_prompts_numbered_in_order() {
    let prompts = vec![
        FileRecord::from_text(
            "/w/b.prompt.md",
            "---\nmode: agent\ndescription: Second letter\n---\nBody B",
        ),
        FileRecord::from_text("/w/a.prompt.md", "Body A"),
    ];

    let combined = combine(&prompts);

    let first = combined.find("# Prompt 1: b.prompt.md").unwrap();
    let second = combined.find("# Prompt 2: a.prompt.md").unwrap();
    assert!(first < second);
    assert!(combined.find("Body B").unwrap() < second);
    assert!(combined.find("Body A").unwrap() > second);
    assert!(combined.contains("# Description: Second letter\n# Mode: agent\n"));
    assert!(!combined.contains("---\nmode"));
}

#[test]
fn test_each_prompt_ends_with_separator() {
    let prompts = vec![
        FileRecord::from_text("/w/a.prompt.md", "A"),
        FileRecord::from_text("/w/b.prompt.md", "B"),
    ];

    let combined = combine(&prompts);
    let separator = "─".repeat(50);

    assert_eq!(combined.matches(&separator).count(), 2);
    assert!(combined.ends_with(&format!("{separator}\n")));
}
