//! diffwarden rules - list the loaded rule documents.
//!
//! Shows each document's id, title, severity, category, file patterns,
//! clause ids and source.

use comfy_table::{presets::UTF8_FULL, Table};
use diffwarden_config::ReviewConfig;
use diffwarden_rules::{RuleDocument, RuleStore};

/// Load rules the way `config` asks: built-ins first, then the rules directory.
pub fn load_rules(config: &ReviewConfig) -> RuleStore {
    if config.builtin_rules {
        RuleStore::load_with_builtin(&config.rules_dir)
    } else {
        RuleStore::load(&config.rules_dir)
    }
}

/// Run the rules command.
///
/// Prints the documents as a table, or as a JSON array with `json`.
pub fn run_rules(config: &ReviewConfig, json: bool) -> anyhow::Result<()> {
    let store = load_rules(config);

    if json {
        println!("{}", serde_json::to_string_pretty(store.documents())?);
        return Ok(());
    }

    if store.is_empty() {
        println!("No rules found.");
        return Ok(());
    }

    println!("{}", rules_table(&store));
    println!();
    println!(
        "{} rule document(s), {} rule(s)",
        store.len(),
        store.clause_count()
    );
    Ok(())
}

/// Build the table shown by the rules command.
pub fn rules_table(store: &RuleStore) -> Table {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_header(vec![
        "Id", "Title", "Severity", "Category", "Files", "Rules", "Source",
    ]);

    for document in store.documents() {
        let clause_ids: Vec<&str> = document.rules.iter().map(|c| c.id.as_str()).collect();
        table.add_row(vec![
            document.id.clone(),
            document.title.clone(),
            document.severity.as_str().to_string(),
            document.category.clone(),
            document.file_patterns.join("\n"),
            clause_ids.join("\n"),
            source_label(document),
        ]);
    }

    table
}

/// Where a document came from, for display.
fn source_label(document: &RuleDocument) -> String {
    match &document.source {
        Some(path) => path.display().to_string(),
        None => "Built-in".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn config_with(dir: &TempDir, builtin_rules: bool) -> ReviewConfig {
        ReviewConfig {
            rules_dir: dir.path().to_path_buf(),
            builtin_rules,
            ..ReviewConfig::default()
        }
    }

    #[test]
    fn test_load_rules_respects_builtin_flag() {
        let dir = TempDir::new().unwrap();
        fs::write(
            dir.path().join("no-console.md"),
            "---\nrules:\n  - pattern: console\\.log\n---\n",
        )
        .unwrap();

        assert_eq!(load_rules(&config_with(&dir, true)).len(), 4);

        let store = load_rules(&config_with(&dir, false));
        assert_eq!(store.len(), 1);
        assert_eq!(store.documents()[0].id, "no-console");
    }

    #[test]
    fn test_table_lists_builtin_documents() {
        let rendered = rules_table(&RuleStore::builtin()).to_string();
        assert!(rendered.contains("avoid-todo-comments"));
        assert!(rendered.contains("React Performance"));
        assert!(rendered.contains("Built-in"));
        assert!(rendered.contains("**/*.tsx"));
    }

    #[test]
    fn test_table_shows_file_source() {
        let dir = TempDir::new().unwrap();
        fs::write(
            dir.path().join("no-console.md"),
            "---\nrules:\n  - pattern: console\\.log\n---\n",
        )
        .unwrap();

        let rendered = rules_table(&load_rules(&config_with(&dir, false))).to_string();
        assert!(rendered.contains("no-console.md"));
        assert!(rendered.contains("no-console-1"));
    }

    #[test]
    fn test_source_label() {
        let document = RuleDocument::new("a", "A", diffwarden_rules::Severity::Info);
        assert_eq!(source_label(&document), "Built-in");
    }
}
