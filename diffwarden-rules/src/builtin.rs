//! Rule documents compiled into the binary

use crate::{RuleDocument, RuleLoader};
use include_dir::{include_dir, Dir};

static BUILTIN_RULES: Dir<'static> = include_dir!("$CARGO_MANIFEST_DIR/builtin");

/// Embedded `(id, content)` pairs, sorted by id
pub fn get_builtin_rules() -> Vec<(&'static str, &'static str)> {
    let mut rules: Vec<(&'static str, &'static str)> = BUILTIN_RULES
        .files()
        .filter(|file| file.path().extension().is_some_and(|ext| ext == "md"))
        .filter_map(|file| {
            let id = file.path().file_stem()?.to_str()?;
            let content = file.contents_utf8()?;
            Some((id, content))
        })
        .collect();
    rules.sort_by(|a, b| a.0.cmp(b.0));
    rules
}

/// Parse the embedded documents; broken ones are skipped with a warning
pub fn load_builtin_documents() -> Vec<RuleDocument> {
    let loader = RuleLoader::new();
    get_builtin_rules()
        .into_iter()
        .filter_map(|(id, content)| match loader.load_from_string(id, content) {
            Ok(document) => Some(document),
            Err(e) => {
                tracing::warn!(id, error = %e, "skipping builtin rule document");
                None
            }
        })
        .collect()
}
