//! File pattern matching for rule applicability
//!
//! Patterns are compiled by fixed substitution into anchored regular
//! expressions:
//!
//! - `**/` matches zero or more leading directories
//! - `**` matches any run of characters, separators included
//! - `*` matches any run of characters except `/`
//! - every other character, `.` included, matches itself
//!
//! Character classes, negation and brace expansion are not supported.

use regex::Regex;

/// Pattern that matches every path without compiling anything
pub const DEFAULT_PATTERN: &str = "**/*";

/// Returns true for patterns that match every path
fn is_match_all(pattern: &str) -> bool {
    matches!(pattern, "**/*" | "**")
}

/// Translate a glob pattern into an anchored regular expression source
pub fn glob_to_regex(pattern: &str) -> String {
    let mut source = String::with_capacity(pattern.len() * 2 + 2);
    source.push('^');

    let mut rest = pattern;
    while !rest.is_empty() {
        if let Some(after) = rest.strip_prefix("**/") {
            source.push_str("(?:.*/)?");
            rest = after;
        } else if let Some(after) = rest.strip_prefix("**") {
            source.push_str(".*");
            rest = after;
        } else if let Some(after) = rest.strip_prefix('*') {
            source.push_str("[^/]*");
            rest = after;
        } else {
            let literal_len = rest.find('*').unwrap_or(rest.len());
            source.push_str(&regex::escape(&rest[..literal_len]));
            rest = &rest[literal_len..];
        }
    }

    source.push('$');
    source
}

/// A compiled, ordered set of file patterns
///
/// Built once per rule document so `rules_for_file` does not recompile on
/// every lookup.
#[derive(Debug, Clone)]
pub struct FilePatternSet {
    match_all: bool,
    compiled: Vec<Regex>,
}

impl FilePatternSet {
    /// Compile `patterns`; an empty slice behaves like [`DEFAULT_PATTERN`]
    pub fn new<S: AsRef<str>>(patterns: &[S]) -> Self {
        let match_all = patterns.is_empty() || patterns.iter().any(|p| is_match_all(p.as_ref()));
        let compiled = if match_all {
            Vec::new()
        } else {
            patterns
                .iter()
                .filter_map(|p| {
                    // Every literal is escaped, so compilation only fails on
                    // size limits for absurdly long patterns
                    Regex::new(&glob_to_regex(p.as_ref()))
                        .map_err(|e| {
                            tracing::warn!(
                                pattern = p.as_ref(),
                                error = %e,
                                "skipping file pattern"
                            );
                        })
                        .ok()
                })
                .collect()
        };

        Self {
            match_all,
            compiled,
        }
    }

    /// True if any pattern matches the whole of `path`
    pub fn is_match(&self, path: &str) -> bool {
        self.match_all || self.compiled.iter().any(|re| re.is_match(path))
    }
}

/// True if `path` matches any of `patterns`
///
/// # Examples
///
/// ```
/// use diffwarden_rules::matches;
///
/// assert!(matches("src/a/b.ts", &["**/*.ts"]));
/// assert!(!matches("src/a/b.tsx", &["**/*.ts"]));
/// assert!(matches("readme.md", &["*.md"]));
/// assert!(!matches("docs/readme.md", &["*.md"]));
/// ```
pub fn matches<S: AsRef<str>>(path: &str, patterns: &[S]) -> bool {
    patterns.iter().any(|pattern| {
        let pattern = pattern.as_ref();
        is_match_all(pattern) || FilePatternSet::new(&[pattern]).is_match(path)
    })
}
