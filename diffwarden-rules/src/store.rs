//! Loaded rule documents and applicability queries
//!
//! A [`RuleStore`] is built fresh for every review and owned by it. There is
//! no process-wide cache, so two reviews never observe each other's rules.

use crate::builtin::load_builtin_documents;
use crate::{RuleClause, RuleDocument, RuleLoader, Severity};
use std::path::Path;

/// An ordered collection of rule documents
///
/// # Examples
///
/// ```
/// use diffwarden_rules::RuleStore;
///
/// let store = RuleStore::builtin();
/// let clauses = store.rules_for_file("src/App.tsx");
/// assert!(clauses.iter().any(|c| c.id == "react-performance"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct RuleStore {
    documents: Vec<RuleDocument>,
}

impl RuleStore {
    /// Create a store from already loaded documents, keeping their order
    pub fn new(documents: Vec<RuleDocument>) -> Self {
        Self { documents }
    }

    /// Load every rule document in `dir`
    ///
    /// A missing directory yields an empty store; see
    /// [`RuleLoader::load_directory`].
    pub fn load(dir: impl AsRef<Path>) -> Self {
        Self::new(RuleLoader::new().load_directory(dir))
    }

    /// Store holding only the built-in documents
    pub fn builtin() -> Self {
        Self::new(load_builtin_documents())
    }

    /// Built-in documents first, then the documents in `dir`
    pub fn load_with_builtin(dir: impl AsRef<Path>) -> Self {
        let mut documents = load_builtin_documents();
        documents.extend(RuleLoader::new().load_directory(dir));
        Self::new(documents)
    }

    /// Clauses that apply to `path`, in document load order
    pub fn rules_for_file(&self, path: &str) -> Vec<&RuleClause> {
        self.documents
            .iter()
            .filter(|document| document.applies_to(path))
            .flat_map(|document| document.rules.iter())
            .collect()
    }

    /// All documents, in load order
    pub fn documents(&self) -> &[RuleDocument] {
        &self.documents
    }

    /// Look up a document by id
    pub fn get(&self, id: &str) -> Option<&RuleDocument> {
        self.documents.iter().find(|document| document.id == id)
    }

    /// Documents in `category`
    pub fn by_category(&self, category: &str) -> Vec<&RuleDocument> {
        self.documents
            .iter()
            .filter(|document| document.category == category)
            .collect()
    }

    /// Documents whose default severity is `severity`
    pub fn by_severity(&self, severity: Severity) -> Vec<&RuleDocument> {
        self.documents
            .iter()
            .filter(|document| document.severity == severity)
            .collect()
    }

    /// Total number of clauses across all documents
    pub fn clause_count(&self) -> usize {
        self.documents.iter().map(|document| document.rules.len()).sum()
    }

    /// Number of documents
    pub fn len(&self) -> usize {
        self.documents.len()
    }

    /// True if no documents are loaded
    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }
}
