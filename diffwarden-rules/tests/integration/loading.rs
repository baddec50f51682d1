use diffwarden_rules::{RuleStore, Severity};
use std::fs;
use tempfile::TempDir;
use tracing_test::traced_test;

const WELL_FORMED: &str = r#"---
title: No TODO markers
severity: warning
rules:
  - id: no-todo
    pattern: "\\bTODO\\b"
    message: Avoid TODO comments.
---
Track follow-up work in the issue tracker.
"#;

const UNCLOSED: &str = r#"---
title: Broken
severity: error
rules:
  - id: broken
    pattern: anything
"#;

#[test]
#[traced_test]
fn test_malformed_document_is_skipped_with_warning() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("good.md"), WELL_FORMED).unwrap();
    fs::write(dir.path().join("unclosed.md"), UNCLOSED).unwrap();

    let store = RuleStore::load(dir.path());

    assert_eq!(store.len(), 1);
    assert_eq!(store.documents()[0].id, "good");
    assert!(logs_contain("skipping rule document"));
    assert!(logs_contain("unclosed.md"));
}

#[test]
#[traced_test]
fn test_missing_directory_warns_and_loads_nothing() {
    let dir = TempDir::new().unwrap();
    let store = RuleStore::load(dir.path().join("does-not-exist"));

    assert!(store.is_empty());
    assert!(logs_contain("rules directory not found"));
}

#[test]
fn test_document_loaded_from_disk() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("no-todo.md"), WELL_FORMED).unwrap();

    let store = RuleStore::load(dir.path());
    let document = store.get("no-todo").unwrap();

    assert_eq!(document.title, "No TODO markers");
    assert_eq!(document.severity, Severity::Warning);
    assert_eq!(document.body, "Track follow-up work in the issue tracker.");
    assert_eq!(document.rules[0].pattern, "\\bTODO\\b");
    assert_eq!(
        document.source.as_deref(),
        Some(dir.path().join("no-todo.md").as_path())
    );
}

#[test]
fn test_builtin_and_directory_documents_combine() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("no-todo.md"), WELL_FORMED).unwrap();

    let store = RuleStore::load_with_builtin(dir.path());
    assert_eq!(store.len(), 4);
    assert_eq!(store.clause_count(), 4);

    let ids: Vec<&str> = store
        .rules_for_file("src/App.tsx")
        .iter()
        .map(|c| c.id.as_str())
        .collect();
    assert_eq!(
        ids,
        vec![
            "avoid-todo-comments",
            "react-performance",
            "typescript-safety",
            "no-todo"
        ]
    );
}
