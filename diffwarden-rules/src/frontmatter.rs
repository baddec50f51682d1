//! Metadata block parsing for rule documents
//!
//! A rule document starts with a `---` line, carries a metadata block in a
//! small key-value markup, closes it with a second `---` line and continues
//! with a free-text body:
//!
//! ```markdown
//! ---
//! title: No TODO markers
//! severity: warning
//! filePatterns: ["**/*.ts", "**/*.tsx"]
//! rules:
//!   - id: no-todo
//!     pattern: "\\bTODO\\b"
//!     message: Track work in an issue instead.
//! ---
//! Body text explaining the rule.
//! ```
//!
//! The markup is a deliberately small subset: scalar strings, booleans,
//! integers, inline `[a, b]` arrays, block arrays of scalars (`- value`) and
//! block arrays of objects (`- key: value` followed by indented `key: value`
//! lines). Nested maps, multi-line strings and anchors are not supported.

use crate::RuleError;
use serde_json::{Map, Value};

/// Keys whose values hold regular expressions and get an extra unescaping pass
const PATTERN_KEYS: [&str; 2] = ["pattern", "negativePattern"];

/// Represents a parsed metadata block and the body that follows it
#[derive(Debug, Clone, PartialEq)]
pub struct FrontmatterResult {
    /// Parsed key-value metadata; unknown keys are kept as-is
    pub metadata: Map<String, Value>,
    /// Body text after the closing delimiter, trimmed
    pub content: String,
}

/// Split a rule document into its metadata block and body
///
/// # Errors
///
/// - [`RuleError::MissingFrontmatter`] if the first line is not `---`
/// - [`RuleError::UnclosedFrontmatter`] if no closing `---` line follows
pub fn parse_frontmatter(content: &str) -> Result<FrontmatterResult, RuleError> {
    let content = content.trim_start_matches('\u{feff}');
    let mut segments = content.split_inclusive('\n');

    let first = segments.next().ok_or(RuleError::MissingFrontmatter)?;
    if !is_delimiter(first) {
        return Err(RuleError::MissingFrontmatter);
    }

    let block_start = first.len();
    let mut offset = block_start;
    for segment in segments {
        if is_delimiter(segment) {
            let block = &content[block_start..offset];
            let body = &content[offset + segment.len()..];
            return Ok(FrontmatterResult {
                metadata: parse_metadata(block),
                content: body.trim().to_string(),
            });
        }
        offset += segment.len();
    }

    Err(RuleError::UnclosedFrontmatter)
}

fn is_delimiter(line: &str) -> bool {
    line.trim_end() == "---"
}

/// Parser state while walking the metadata block line by line
#[derive(Debug)]
enum ParseState {
    /// Top level: expecting `key: value` lines
    Scanning,
    /// Inside a block array whose last element is a scalar
    InArrayOfScalars { key: String, items: Vec<Value> },
    /// Inside a block array whose current element is an object still
    /// accepting indented properties
    InArrayOfObjects {
        key: String,
        items: Vec<Value>,
        current: Map<String, Value>,
    },
}

/// One significant metadata line, classified
#[derive(Debug, Clone, Copy, PartialEq)]
enum LineKind<'a> {
    /// `- something` (text after the dash)
    Item(&'a str),
    /// `key: value`
    Property {
        indented: bool,
        key: &'a str,
        value: &'a str,
    },
    /// Anything else; ignored
    Other,
}

fn classify(line: &str) -> LineKind<'_> {
    let trimmed = line.trim();
    if let Some(item) = trimmed.strip_prefix("- ") {
        return LineKind::Item(item.trim());
    }
    if trimmed == "-" {
        return LineKind::Item("");
    }
    match trimmed.split_once(':') {
        Some((key, value)) if !key.trim().is_empty() => LineKind::Property {
            indented: line.starts_with([' ', '\t']),
            key: key.trim(),
            value: value.trim(),
        },
        _ => LineKind::Other,
    }
}

/// Parse the metadata block between the delimiters
///
/// Blank lines and lines starting with `#` are ignored. Block arrays are
/// accumulated until a line that does not belong to them, or the end of the
/// input, flushes them into the result under their key.
pub fn parse_metadata(block: &str) -> Map<String, Value> {
    let lines: Vec<&str> = block
        .lines()
        .filter(|line| {
            let trimmed = line.trim();
            !trimmed.is_empty() && !trimmed.starts_with('#')
        })
        .collect();

    let mut result = Map::new();
    let mut state = ParseState::Scanning;
    let mut iter = lines.iter().copied().peekable();

    while let Some(line) = iter.next() {
        let next = iter.peek().map(|l| classify(*l));
        state = match (state, classify(line)) {
            (ParseState::InArrayOfScalars { key, items }, LineKind::Item(item)) => {
                push_item(key, items, item)
            }
            (
                ParseState::InArrayOfObjects {
                    key,
                    mut items,
                    current,
                },
                LineKind::Item(item),
            ) => {
                items.push(Value::Object(current));
                push_item(key, items, item)
            }
            (
                ParseState::InArrayOfObjects {
                    key,
                    items,
                    mut current,
                },
                LineKind::Property {
                    indented: true,
                    key: prop,
                    value,
                },
            ) => {
                current.insert(prop.to_string(), parse_scalar(prop, value));
                ParseState::InArrayOfObjects {
                    key,
                    items,
                    current,
                }
            }
            (state, kind) => {
                flush(state, &mut result);
                scan(&mut result, kind, next)
            }
        };
    }
    flush(state, &mut result);

    result
}

/// Handle a line at top level
fn scan(
    result: &mut Map<String, Value>,
    kind: LineKind<'_>,
    next: Option<LineKind<'_>>,
) -> ParseState {
    match kind {
        LineKind::Property { key, value, .. } if value.is_empty() => {
            // `key:` opens a block array only when the next line is an item
            if matches!(next, Some(LineKind::Item(_))) {
                ParseState::InArrayOfScalars {
                    key: key.to_string(),
                    items: Vec::new(),
                }
            } else {
                result.insert(key.to_string(), Value::Null);
                ParseState::Scanning
            }
        }
        LineKind::Property { key, value, .. } => {
            result.insert(key.to_string(), parse_scalar(key, value));
            ParseState::Scanning
        }
        LineKind::Item(item) => {
            tracing::debug!(item, "ignoring array item without an owning key");
            ParseState::Scanning
        }
        LineKind::Other => ParseState::Scanning,
    }
}

/// Append an array element, opening a new object when the item is `key: value`
fn push_item(key: String, mut items: Vec<Value>, item: &str) -> ParseState {
    if let Some((prop, value)) = split_object_item(item) {
        let mut current = Map::new();
        current.insert(prop.to_string(), parse_scalar(prop, value));
        return ParseState::InArrayOfObjects {
            key,
            items,
            current,
        };
    }
    if !item.is_empty() {
        items.push(Value::String(unquote(item).to_string()));
    }
    ParseState::InArrayOfScalars { key, items }
}

/// Recognize `key: value` inside an array item; quoted items stay scalars
fn split_object_item(item: &str) -> Option<(&str, &str)> {
    if item.starts_with(['"', '\'']) {
        return None;
    }
    let (key, value) = item.split_once(':')?;
    let key = key.trim();
    let is_identifier = !key.is_empty()
        && key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
    is_identifier.then(|| (key, value.trim()))
}

/// Store an accumulated array under its key
fn flush(state: ParseState, result: &mut Map<String, Value>) {
    match state {
        ParseState::Scanning => {}
        ParseState::InArrayOfScalars { key, items } => {
            result.insert(key, Value::Array(items));
        }
        ParseState::InArrayOfObjects {
            key,
            mut items,
            current,
        } => {
            items.push(Value::Object(current));
            result.insert(key, Value::Array(items));
        }
    }
}

/// Convert a raw scalar into a typed value
fn parse_scalar(key: &str, raw: &str) -> Value {
    let raw = raw.trim();
    let value = if raw.is_empty() {
        Value::Null
    } else if raw == "[]" {
        Value::Array(Vec::new())
    } else if raw.starts_with('[') && raw.ends_with(']') {
        Value::Array(
            raw[1..raw.len() - 1]
                .split(',')
                .map(|s| unquote(s.trim()))
                .filter(|s| !s.is_empty())
                .map(|s| Value::String(s.to_string()))
                .collect(),
        )
    } else if raw == "true" || raw == "false" {
        Value::Bool(raw == "true")
    } else if let Ok(number) = raw.parse::<i64>() {
        Value::from(number)
    } else {
        Value::String(unquote(raw).to_string())
    };

    match value {
        Value::String(s) if PATTERN_KEYS.contains(&key) => Value::String(unescape_pattern(&s)),
        other => other,
    }
}

/// Strip one pair of matching surrounding quotes
fn unquote(s: &str) -> &str {
    for quote in ['"', '\''] {
        if s.len() >= 2 && s.starts_with(quote) && s.ends_with(quote) {
            return &s[1..s.len() - 1];
        }
    }
    s
}

/// Collapse doubled backslashes so regex escapes survive the markup
pub fn unescape_pattern(s: &str) -> String {
    s.replace("\\\\", "\\")
}
