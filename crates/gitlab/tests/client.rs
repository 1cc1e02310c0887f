use gitlab::{GitLabClient, GitLabError, ProjectLocator, Relation, Thread};
use serde_json::json;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn issue_json(iid: u64, title: &str) -> serde_json::Value {
    json!({
        "iid": iid,
        "id": iid + 1000,
        "title": title,
        "state": "opened",
        "created_at": "2024-03-01T09:30:00.000Z",
        "updated_at": "2024-03-02T10:00:00.000Z",
        "author": { "username": "alice", "name": "Alice" },
        "assignee": { "username": "bob", "name": "Bob" },
        "description": "a description",
        "web_url": format!("https://gitlab.com/group/project/-/issues/{iid}")
    })
}

async fn client_for(server: &MockServer) -> GitLabClient {
    GitLabClient::with_base_url(server.uri(), Some("test-token".to_string())).unwrap()
}

#[tokio::test]
async fn follows_pagination_exhaustively() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v4/projects/42/issues"))
        .and(query_param("assignee_username", "alice"))
        .and(query_param("state", "all"))
        .and(query_param("page", "1"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("x-next-page", "2")
                .set_body_json(json!([issue_json(1, "first"), issue_json(2, "second")])),
        )
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/v4/projects/42/issues"))
        .and(query_param("page", "2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([issue_json(3, "third")])))
        .mount(&server)
        .await;

    let client = client_for(&server).await;
    let locator = ProjectLocator::Id(42);
    let issues = client
        .list_issues(&locator, Relation::Assignee, "alice")
        .await
        .unwrap();

    assert_eq!(issues.len(), 3);
    assert_eq!(
        issues.iter().map(|i| i.iid).collect::<Vec<_>>(),
        vec![1, 2, 3]
    );
}

#[tokio::test]
async fn author_relation_uses_author_param() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v4/projects/42/issues"))
        .and(query_param("author_username", "alice"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([issue_json(9, "authored")])))
        .mount(&server)
        .await;

    let client = client_for(&server).await;
    let issues = client
        .list_issues_by_author(&ProjectLocator::Id(42), "alice")
        .await
        .unwrap();
    assert_eq!(issues.len(), 1);
    assert_eq!(issues[0].iid, 9);
}

#[tokio::test]
async fn auth_failure_is_an_error_not_an_empty_list() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v4/projects/42/issues"))
        .respond_with(
            ResponseTemplate::new(401).set_body_json(json!({"message": "401 Unauthorized"})),
        )
        .mount(&server)
        .await;

    let client = client_for(&server).await;
    let err = client
        .list_issues_by_assignee(&ProjectLocator::Id(42), "alice")
        .await
        .unwrap_err();
    assert!(matches!(err, GitLabError::Auth { status: 401, .. }));
}

#[tokio::test]
async fn missing_project_is_not_found() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v4/projects/42/issues"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({"message": "404 Not Found"})))
        .mount(&server)
        .await;

    let client = client_for(&server).await;
    let err = client
        .list_issues_by_assignee(&ProjectLocator::Id(42), "alice")
        .await
        .unwrap_err();
    assert!(matches!(err, GitLabError::NotFound(_)));
}

#[tokio::test]
async fn thread_comes_back_sorted_ascending() {
    let server = MockServer::start().await;

    // Out-of-order notes; the client re-sorts by creation time.
    Mock::given(method("GET"))
        .and(path("/api/v4/projects/42/issues/7/notes"))
        .and(query_param("sort", "asc"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {
                "id": 12,
                "author": { "username": "carol", "name": "Carol" },
                "body": "second comment",
                "created_at": "2024-03-02T09:00:00.000Z"
            },
            {
                "id": 11,
                "author": { "username": "bob", "name": "Bob" },
                "body": "first comment",
                "created_at": "2024-03-01T09:00:00.000Z"
            }
        ])))
        .mount(&server)
        .await;

    let client = client_for(&server).await;
    let thread = client
        .list_comments(&ProjectLocator::Id(42), 7)
        .await
        .unwrap();

    let Thread::Loaded { comments } = thread else {
        panic!("expected loaded thread");
    };
    assert_eq!(comments.len(), 2);
    assert_eq!(comments[0].author, "bob");
    assert_eq!(comments[1].author, "carol");
    assert!(comments[0].llm_summary.is_none());
}

#[tokio::test]
async fn rate_limit_maps_to_typed_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v4/projects/42/issues/7/notes"))
        .respond_with(ResponseTemplate::new(429))
        .mount(&server)
        .await;

    let client = client_for(&server).await;
    let err = client
        .list_comments(&ProjectLocator::Id(42), 7)
        .await
        .unwrap_err();
    assert!(matches!(err, GitLabError::RateLimited));
}
