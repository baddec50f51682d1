use diffwarden_review::{
    comment_body, review_pull_request, signature, AnnotationPoster, GitHubClient, PullRequestRef,
    ReviewError,
};
use diffwarden_rules::{Finding, RuleStore, Severity};
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const PATCH: &str = "@@ -1,2 +1,3 @@\n context\n+// TODO: remove\n+safe line\n";

async fn mount_pull_request(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/repos/acme/widgets/pulls/5"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "number": 5,
            "title": "Tidy up",
            "body": "Cleanup",
            "state": "open"
        })))
        .mount(server)
        .await;
    Mock::given(method("GET"))
        .and(path("/repos/acme/widgets/pulls/5/files"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
            {"filename": "src/lib.rs", "status": "modified", "patch": PATCH, "additions": 2, "deletions": 0}
        ])))
        .mount(server)
        .await;
}

const TODO_MESSAGE: &str =
    "Avoid TODO comments. Create a ticket and reference it explicitly or remove the comment.";

fn expected_finding() -> Finding {
    Finding::new("src/lib.rs", 2, TODO_MESSAGE)
        .with_rule("avoid-todo-comments", Severity::Warning)
}

#[tokio::test]
async fn test_live_review_posts_one_review() {
    let server = MockServer::start().await;
    mount_pull_request(&server).await;

    Mock::given(method("GET"))
        .and(path("/repos/acme/widgets/pulls/5/comments"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([])))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/repos/acme/widgets/pulls/5/reviews"))
        .and(header("Authorization", "Bearer token-123"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"id": 99})))
        .expect(1)
        .mount(&server)
        .await;

    let client = GitHubClient::new(server.uri(), Some("token-123".to_string()));
    let poster = AnnotationPoster::new(client.clone());
    let pr = PullRequestRef::new("acme", "widgets", 5);

    let report = review_pull_request(&client, &poster, &RuleStore::builtin(), &pr, false)
        .await
        .unwrap();

    assert_eq!(report.title, "Tidy up");
    assert_eq!(report.findings, vec![expected_finding()]);
    assert_eq!(report.outcome.submitted, 1);
    assert_eq!(report.outcome.batches, 1);

    let requests = server.received_requests().await.unwrap();
    let review = requests
        .iter()
        .find(|r| r.method.as_str() == "POST")
        .unwrap();
    let body: serde_json::Value = serde_json::from_slice(&review.body).unwrap();
    assert_eq!(body["event"], "COMMENT");
    assert_eq!(body["comments"][0]["position"], 2);
    assert_eq!(body["comments"][0]["body"], comment_body(&expected_finding()));
}

#[tokio::test]
async fn test_already_posted_findings_are_not_resubmitted() {
    let server = MockServer::start().await;
    mount_pull_request(&server).await;

    let existing_body = format!(
        "{TODO_MESSAGE} (rule: avoid-todo-comments) <!-- mcp:sig={} -->",
        signature(&expected_finding())
    );
    Mock::given(method("GET"))
        .and(path("/repos/acme/widgets/pulls/5/comments"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
            {"id": 1, "body": existing_body, "path": "src/lib.rs", "position": 2}
        ])))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/repos/acme/widgets/pulls/5/reviews"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let client = GitHubClient::new(server.uri(), Some("token-123".to_string()));
    let poster = AnnotationPoster::new(client.clone());
    let pr = PullRequestRef::new("acme", "widgets", 5);

    let report = review_pull_request(&client, &poster, &RuleStore::builtin(), &pr, false)
        .await
        .unwrap();

    assert_eq!(report.outcome.existing, 1);
    assert_eq!(report.outcome.skipped_duplicates, 1);
    assert_eq!(report.outcome.submitted, 0);
}

#[tokio::test]
async fn test_fetch_failure_names_the_pull_request() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/repos/acme/widgets/pulls/5"))
        .respond_with(
            ResponseTemplate::new(404).set_body_json(serde_json::json!({"message": "Not Found"})),
        )
        .mount(&server)
        .await;

    let client = GitHubClient::new(server.uri(), None);
    let poster = AnnotationPoster::new(client.clone());
    let pr = PullRequestRef::new("acme", "widgets", 5);

    let err = review_pull_request(&client, &poster, &RuleStore::builtin(), &pr, true)
        .await
        .unwrap_err();
    let message = err.to_string();
    assert!(message.contains("acme/widgets#5"));
    assert!(message.contains("Not Found"));
}

#[tokio::test]
async fn test_live_review_without_token_fails_before_any_request() {
    let server = MockServer::start().await;
    mount_pull_request(&server).await;

    let client = GitHubClient::new(server.uri(), None);
    let poster = AnnotationPoster::new(client.clone());
    let pr = PullRequestRef::new("acme", "widgets", 5);

    let err = review_pull_request(&client, &poster, &RuleStore::builtin(), &pr, false)
        .await
        .unwrap_err();

    assert!(matches!(err, ReviewError::MissingCredentials { .. }));
    assert!(server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_live_review_without_token_fails_even_without_findings() {
    let server = MockServer::start().await;

    let client = GitHubClient::new(server.uri(), None);
    let poster = AnnotationPoster::new(client.clone());
    let pr = PullRequestRef::new("acme", "widgets", 5);

    let result = review_pull_request(&client, &poster, &RuleStore::default(), &pr, false).await;

    assert!(matches!(result, Err(ReviewError::MissingCredentials { .. })));
    assert!(server.received_requests().await.unwrap().is_empty());
}
