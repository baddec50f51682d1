use async_trait::async_trait;
use diffwarden_review::{
    review_pull_request, AnnotationPoster, ChangedFile, DraftComment, GitHubError, PullRequest,
    PullRequestRef, PullRequestSource, ReviewApi, ReviewComment, ReviewError,
};
use diffwarden_rules::{RuleClause, RuleDocument, RuleStore, Severity};
use std::sync::Mutex;

/// A pull request and its review thread, held in memory
struct InMemoryPullRequest {
    files: Vec<ChangedFile>,
    token: bool,
    thread: Mutex<Vec<ReviewComment>>,
    reviews: Mutex<usize>,
}

impl InMemoryPullRequest {
    fn new(files: Vec<(&str, Option<&str>)>, token: bool) -> Self {
        Self {
            files: files
                .into_iter()
                .map(|(name, patch)| ChangedFile {
                    filename: name.to_string(),
                    status: "modified".to_string(),
                    patch: patch.map(str::to_string),
                    additions: 0,
                    deletions: 0,
                })
                .collect(),
            token,
            thread: Mutex::new(Vec::new()),
            reviews: Mutex::new(0),
        }
    }
}

#[async_trait]
impl PullRequestSource for InMemoryPullRequest {
    async fn fetch_pull_request(&self, pr: &PullRequestRef) -> Result<PullRequest, GitHubError> {
        Ok(PullRequest {
            number: pr.number,
            title: "Test change".to_string(),
            body: String::new(),
            state: "open".to_string(),
            files: self.files.clone(),
        })
    }
}

#[async_trait]
impl<'a> ReviewApi for &'a InMemoryPullRequest {
    fn is_authenticated(&self) -> bool {
        self.token
    }

    async fn list_review_comments(
        &self,
        _pr: &PullRequestRef,
        page: u32,
        per_page: u32,
    ) -> Result<Vec<ReviewComment>, GitHubError> {
        let thread = self.thread.lock().unwrap();
        Ok(thread
            .iter()
            .skip(((page - 1) * per_page) as usize)
            .take(per_page as usize)
            .cloned()
            .collect())
    }

    async fn create_review(
        &self,
        _pr: &PullRequestRef,
        comments: &[DraftComment],
    ) -> Result<(), GitHubError> {
        *self.reviews.lock().unwrap() += 1;
        let mut thread = self.thread.lock().unwrap();
        for comment in comments {
            let id = thread.len() as u64 + 1;
            thread.push(ReviewComment {
                id,
                body: Some(comment.body.clone()),
                path: Some(comment.path.clone()),
                position: Some(comment.position),
            });
        }
        Ok(())
    }
}

fn todo_store() -> RuleStore {
    RuleStore::new(vec![RuleDocument::new("no-todo", "No TODO", Severity::Warning)
        .with_clause(RuleClause::new(
            "no-todo",
            "\\bTODO\\b",
            "Avoid TODO comments.",
            Severity::Warning,
        ))])
}

fn pr() -> PullRequestRef {
    PullRequestRef::new("acme", "widgets", 11)
}

#[tokio::test]
async fn test_todo_finding_lands_on_diff_position() {
    let host = InMemoryPullRequest::new(
        vec![(
            "src/lib.rs",
            Some("@@ -1,2 +1,3 @@\n context\n+line with TODO marker\n+safe line\n"),
        )],
        false,
    );
    let poster = AnnotationPoster::new(&host);

    let report = review_pull_request(&host, &poster, &todo_store(), &pr(), true)
        .await
        .unwrap();

    assert_eq!(report.findings.len(), 1);
    let finding = &report.findings[0];
    assert_eq!(finding.path, "src/lib.rs");
    assert_eq!(finding.position, 2);
    assert_eq!(finding.message, "Avoid TODO comments.");
    assert_eq!(finding.rule_id.as_deref(), Some("no-todo"));
    assert!(report.outcome.dry_run);
    assert_eq!(*host.reviews.lock().unwrap(), 0);
}

#[tokio::test]
async fn test_positions_are_remapped_not_added_line_indices() {
    let host = InMemoryPullRequest::new(
        vec![(
            "a.ts",
            Some("@@ -1,4 +1,3 @@\n one\n-two\n-three\n+TODO first\n four\n+TODO second\n"),
        )],
        false,
    );
    let poster = AnnotationPoster::new(&host);

    let report = review_pull_request(&host, &poster, &todo_store(), &pr(), true)
        .await
        .unwrap();

    let positions: Vec<u32> = report.findings.iter().map(|f| f.position).collect();
    assert_eq!(positions, vec![4, 6]);
}

#[tokio::test]
async fn test_live_review_twice_posts_once() {
    let host = InMemoryPullRequest::new(
        vec![
            ("a.rs", Some("@@ -0,0 +1,2 @@\n+// TODO one\n+// TODO two\n")),
            ("b.rs", Some("@@ -1 +1,2 @@\n x\n+// TODO three\n")),
        ],
        true,
    );
    let poster = AnnotationPoster::new(&host);
    let store = todo_store();

    let first = review_pull_request(&host, &poster, &store, &pr(), false)
        .await
        .unwrap();
    assert_eq!(first.outcome.submitted, 3);

    let second = review_pull_request(&host, &poster, &store, &pr(), false)
        .await
        .unwrap();
    assert_eq!(second.findings.len(), 3);
    assert_eq!(second.outcome.submitted, 0);
    assert_eq!(second.outcome.skipped_duplicates, 3);
    assert_eq!(host.thread.lock().unwrap().len(), 3);
    assert_eq!(*host.reviews.lock().unwrap(), 1);
}

#[tokio::test]
async fn test_live_review_without_token_fails_before_posting() {
    let host = InMemoryPullRequest::new(
        vec![("a.rs", Some("@@ -0,0 +1 @@\n+TODO\n"))],
        false,
    );
    let poster = AnnotationPoster::new(&host);

    let result = review_pull_request(&host, &poster, &todo_store(), &pr(), false).await;
    assert!(matches!(result, Err(ReviewError::MissingCredentials { .. })));
    assert_eq!(*host.reviews.lock().unwrap(), 0);
}

#[tokio::test]
async fn test_files_without_patch_or_additions_are_skipped() {
    let host = InMemoryPullRequest::new(
        vec![
            ("logo.png", None),
            ("removed.rs", Some("@@ -1,2 +0,0 @@\n-TODO a\n-TODO b\n")),
            ("empty.rs", Some("")),
            ("kept.rs", Some("@@ -0,0 +1 @@\n+fine\n")),
        ],
        false,
    );
    let poster = AnnotationPoster::new(&host);

    let report = review_pull_request(&host, &poster, &todo_store(), &pr(), true)
        .await
        .unwrap();

    assert_eq!(report.files_changed, 4);
    assert_eq!(report.files_reviewed, 1);
    assert!(report.findings.is_empty());
    assert!(report.to_string().ends_with("Nothing to post"));
}

#[tokio::test]
async fn test_builtin_rules_scoped_by_file_pattern() {
    let patch = "@@ -0,0 +1,2 @@\n+const filteredVariables = variables.filter(v => v.on);\n+const n = label.toLowerCase();\n";
    let host = InMemoryPullRequest::new(
        vec![("src/View.tsx", Some(patch)), ("src/view.py", Some(patch))],
        false,
    );
    let poster = AnnotationPoster::new(&host);

    let report = review_pull_request(&host, &poster, &RuleStore::builtin(), &pr(), true)
        .await
        .unwrap();

    let rules: Vec<(&str, u32)> = report
        .findings
        .iter()
        .map(|f| (f.rule_id.as_deref().unwrap_or_default(), f.position))
        .collect();
    assert_eq!(rules, vec![("react-performance", 1), ("typescript-safety", 2)]);
    assert!(report.findings.iter().all(|f| f.path == "src/View.tsx"));
}
