//! Tests for catalog discovery and bucketed reads.

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use omni_flow::{Catalog, DiscoveryPatterns, FileCategory, FlowError};
use tempfile::TempDir;

fn write(root: &Path, rel: &str, content: &str) {
    let path = root.join(rel);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, content).unwrap();
}

fn relative(base: &Path, paths: &[PathBuf]) -> Vec<String> {
    paths
        .iter()
        .map(|p| p.strip_prefix(base).unwrap().to_string_lossy().into_owned())
        .collect()
}

fn playbook() -> TempDir {
    let temp = TempDir::new().unwrap();
    let root = temp.path();
    write(
        root,
        ".github/instructions/generate_unit_test.instructions.md",
        "---\napplyTo: '**/*.py'\n---\nWrite tests.",
    );
    write(
        root,
        ".github/prompts/summarize_logic.prompt.md",
        "---\nmode: agent\ndescription: Summarize logic\n---\nSummarize.",
    );
    write(root, "prompts/review.prompt.md", "Review this.");
    write(root, "README.md", "# Playbook");
    write(root, "docs/guide.md", "---\nmode: ask\n---\nGuide body");
    write(root, "docs/notes.instructions.md", "Doc-located instruction");
    write(root, "nested/deep/ignored.md", "not matched by document patterns");
    temp
}

#[test]
fn test_find_by_patterns_union_dedup_sorted() {
    let temp = playbook();
    let catalog = Catalog::new(temp.path());

    let patterns = vec![
        "**/*.prompt.md".to_string(),
        "prompts/**/*.prompt.md".to_string(),
        ".github/prompts/**/*.prompt.md".to_string(),
    ];
    let found = catalog.find_by_patterns(&patterns).unwrap();

    assert_eq!(
        relative(temp.path(), &found),
        vec![
            ".github/prompts/summarize_logic.prompt.md",
            "prompts/review.prompt.md",
        ]
    );
}

#[test]
fn test_find_by_patterns_excludes_directories() {
    let temp = TempDir::new().unwrap();
    fs::create_dir_all(temp.path().join("folder.md")).unwrap();
    write(temp.path(), "real.md", "x");

    let catalog = Catalog::new(temp.path());
    let found = catalog.find_by_patterns(&["*.md".to_string()]).unwrap();
    assert_eq!(relative(temp.path(), &found), vec!["real.md"]);
}

#[test]
fn test_read_all_buckets() {
    let temp = playbook();
    let catalog = Catalog::new(temp.path());
    let buckets = catalog.read_all().unwrap();

    assert_eq!(buckets.instructions.len(), 2);
    assert_eq!(buckets.prompts.len(), 2);

    let docs: Vec<String> = buckets
        .documents
        .iter()
        .map(|r| r.file_name())
        .collect();
    assert_eq!(docs, vec!["README.md", "guide.md"]);

    // Category comes from the file itself, not from the bucket.
    let guide = &buckets.documents[1];
    assert_eq!(guide.category(), FileCategory::Prompt);
    assert_eq!(guide.body, "Guide body");
}

#[test]
fn test_read_all_buckets_are_disjoint() {
    let temp = playbook();
    let buckets = Catalog::new(temp.path()).read_all().unwrap();

    let mut seen = HashSet::new();
    for (_, records) in buckets.labeled() {
        for record in records {
            assert!(
                seen.insert(record.path.clone()),
                "{} appears in more than one bucket",
                record.path.display()
            );
        }
    }
    assert_eq!(seen.len(), buckets.total());
}

#[test]
fn test_read_all_skips_unreadable_files() {
    let temp = TempDir::new().unwrap();
    write(temp.path(), "good.prompt.md", "ok");
    fs::write(temp.path().join("bad.prompt.md"), b"\x00\x01binary").unwrap();

    let buckets = Catalog::new(temp.path()).read_all().unwrap();
    assert_eq!(buckets.prompts.len(), 1);
    assert_eq!(buckets.prompts[0].file_name(), "good.prompt.md");
    assert!(buckets.documents.is_empty());
}

#[test]
fn test_missing_base_path_is_empty() {
    let catalog = Catalog::new("/nonexistent/omni-flow-base");
    let buckets = catalog.read_all().unwrap();
    assert_eq!(buckets.total(), 0);
}

#[test]
fn test_scope_include_and_exclude() {
    let temp = playbook();
    let patterns = DiscoveryPatterns::default().with_scope(
        &[".github/**".to_string(), "*.md".to_string()],
        &["**/generate_*".to_string()],
    );
    let catalog = Catalog::with_patterns(temp.path(), patterns).unwrap();
    let buckets = catalog.read_all().unwrap();

    assert!(buckets.instructions.is_empty());
    assert_eq!(buckets.prompts.len(), 1);
    assert_eq!(buckets.prompts[0].file_name(), "summarize_logic.prompt.md");
    assert_eq!(buckets.documents.len(), 1);
    assert_eq!(buckets.documents[0].file_name(), "README.md");
}

#[test]
fn test_invalid_scope_pattern() {
    let patterns = DiscoveryPatterns::default().with_scope(&["[".to_string()], &[]);
    let result = Catalog::with_patterns(".", patterns);
    assert!(matches!(result, Err(FlowError::Pattern { .. })));
}

#[test]
fn test_read_file_strips_header() {
    let temp = playbook();
    let catalog = Catalog::new(temp.path());
    let path = catalog.resolve(".github/prompts/summarize_logic.prompt.md");
    let record = catalog.read_file(&path).unwrap();

    assert_eq!(record.path, path);
    assert_eq!(record.body, "Summarize.");
    assert_eq!(record.metadata.mode.as_deref(), Some("agent"));
    assert_eq!(
        record.metadata.description.as_deref(),
        Some("Summarize logic")
    );
    assert!(record.header().is_some());
}

#[test]
fn test_read_file_size_limit() {
    let temp = TempDir::new().unwrap();
    write(temp.path(), "big.md", &"x".repeat(64));
    let catalog = Catalog::new(temp.path()).max_file_bytes(16);

    let result = catalog.read_file(&temp.path().join("big.md"));
    assert!(matches!(result, Err(FlowError::Read { .. })));
}
