//! Finding signatures and the comment trailer that carries them
//!
//! Every posted comment ends with `<!-- mcp:sig=<hex> -->`. The remote
//! comment thread is the only record of what has been posted, so the trailer
//! is what makes a repeated run idempotent.

use diffwarden_rules::Finding;
use regex::Regex;
use sha2::{Digest, Sha256};
use std::sync::OnceLock;

/// Number of hex characters kept from the digest
pub const SIGNATURE_LEN: usize = 16;

/// Deterministic short hash of a finding's content
///
/// Computed over `path|position|rule_id|message`, with an empty rule id when
/// the finding has none.
///
/// # Examples
///
/// ```
/// use diffwarden_review::signature;
/// use diffwarden_rules::Finding;
///
/// let finding = Finding::new("src/a.ts", 2, "Avoid TODO comments.");
/// let sig = signature(&finding);
/// assert_eq!(sig.len(), 16);
/// assert_eq!(sig, signature(&finding.clone()));
/// ```
pub fn signature(finding: &Finding) -> String {
    let base = format!(
        "{}|{}|{}|{}",
        finding.path,
        finding.position,
        finding.rule_id.as_deref().unwrap_or_default(),
        finding.message
    );
    let digest = format!("{:x}", Sha256::digest(base.as_bytes()));
    digest[..SIGNATURE_LEN].to_string()
}

/// The trailer appended to a posted comment
pub fn signature_trailer(signature: &str) -> String {
    format!("<!-- mcp:sig={signature} -->")
}

/// Comment body: message, optional `(rule: <id>)`, then the trailer
pub fn comment_body(finding: &Finding) -> String {
    let mut parts = vec![finding.message.clone()];
    if let Some(rule_id) = &finding.rule_id {
        parts.push(format!("(rule: {rule_id})"));
    }
    parts.push(signature_trailer(&signature(finding)));
    parts.join(" ")
}

/// Signature trailer pattern
static TRAILER_REGEX: OnceLock<Regex> = OnceLock::new();

/// Get the compiled regex for signature trailers
fn trailer_regex() -> &'static Regex {
    TRAILER_REGEX.get_or_init(|| {
        Regex::new(r"(?i)<!--\s*mcp:sig=([a-f0-9]{8,})\s*-->")
            .expect("Invalid signature trailer regex")
    })
}

/// Pull the signature out of an existing comment body
///
/// Accepts any hex string of at least 8 characters, in either case, so
/// comments posted with a different signature length are still recognized.
/// The result is lowercased to compare against [`signature`].
pub fn extract_signature(body: &str) -> Option<String> {
    trailer_regex()
        .captures(body)
        .and_then(|captures| captures.get(1))
        .map(|m| m.as_str().to_ascii_lowercase())
}
