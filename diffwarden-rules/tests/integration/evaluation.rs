use diffwarden_rules::{RuleChecker, RuleStore};
use std::fs;
use tempfile::TempDir;

#[test]
fn test_store_and_checker_end_to_end() {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join("no-todo.md"),
        "---\ntitle: No TODO\nrules:\n  - id: no-todo\n    pattern: \"\\\\bTODO\\\\b\"\n    message: Avoid TODO comments.\n---\n",
    )
    .unwrap();
    let store = RuleStore::load(dir.path());

    let added = ["line with TODO marker", "safe line"];
    let clauses = store.rules_for_file("src/lib.rs");
    let findings = RuleChecker::new().evaluate("src/lib.rs", &added, &clauses);

    assert_eq!(findings.len(), 1);
    assert_eq!(findings[0].line, 1);
    assert_eq!(findings[0].message, "Avoid TODO comments.");
}

#[test]
fn test_builtin_react_rule_suppressed_by_memo_anywhere_in_file() {
    let store = RuleStore::builtin();
    let clauses = store.rules_for_file("src/List.tsx");
    let checker = RuleChecker::new();

    let unguarded = ["const filteredVariables = variables.filter(v => v.visible);"];
    let findings = checker.evaluate("src/List.tsx", &unguarded, &clauses);
    assert_eq!(findings.len(), 1);
    assert_eq!(findings[0].rule_id, "react-performance");

    let guarded = [
        "const filteredVariables = variables.filter(v => v.visible);",
        "const sorted = useMemo(() => sort(items), [items]);",
    ];
    let findings = checker.evaluate("src/List.tsx", &guarded, &clauses);
    assert!(findings.is_empty());
}

#[test]
fn test_builtin_todo_rule_is_case_insensitive() {
    let store = RuleStore::builtin();
    let clauses = store.rules_for_file("notes/plan.txt");
    let findings = RuleChecker::new().evaluate("notes/plan.txt", &["todo: write docs"], &clauses);

    assert_eq!(findings.len(), 1);
    assert_eq!(findings[0].rule_id, "avoid-todo-comments");
}

#[test]
fn test_builtin_rules_ignore_non_matching_files() {
    let store = RuleStore::builtin();
    let clauses = store.rules_for_file("src/main.py");
    let findings = RuleChecker::new().evaluate(
        "src/main.py",
        &["const filteredVariables = variables.filter(x)", "label.toLowerCase()"],
        &clauses,
    );
    assert!(findings.is_empty());
}

#[test]
fn test_builtin_label_rule_skips_lines_with_optional_chaining() {
    let store = RuleStore::builtin();
    let clauses = store.rules_for_file("src/Search.ts");
    let added = [
        "const q = label.toLowerCase();",
        "const q = item?.name ?? label.toLowerCase();",
        "const q = label?.toLowerCase() ?? '';",
        "const q = flag ?? label.toLowerCase();",
        "const q = label.toLowerCase(); // item?.name",
        "return ok ? label.toLowerCase() : '';",
    ];
    let findings = RuleChecker::new().evaluate("src/Search.ts", &added, &clauses);

    let lines: Vec<usize> = findings
        .iter()
        .filter(|f| f.rule_id == "typescript-safety")
        .map(|f| f.line)
        .collect();
    assert_eq!(lines, vec![1, 4, 6]);
}
