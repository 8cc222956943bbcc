//! End-to-end tests driving the router against a mock GitHub.

use std::collections::HashMap;

use axum::Router;
use axum::body::{Body, to_bytes};
use axum::http::{Request, StatusCode};
use pulse_functions::config::Config;
use serde_json::json;
use tower::ServiceExt;
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn config(pairs: &[(&str, String)]) -> Config {
    let vars: HashMap<String, String> = pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.clone()))
        .collect();
    Config::from_lookup(|key| vars.get(key).cloned())
}

fn app_for(server: &MockServer, repo: &str) -> Router {
    let config = config(&[
        ("GITHUB_REPO", repo.to_string()),
        ("GITHUB_TOKEN", "test-token".to_string()),
        ("GITHUB_GRAPHQL_URL", format!("{}/graphql", server.uri())),
    ]);
    pulse_functions::build_app(&config).unwrap()
}

async fn send(app: Router, method: &str, uri: &str, body: Body) -> (StatusCode, String) {
    let response = app
        .oneshot(
            Request::builder()
                .method(method)
                .uri(uri)
                .body(body)
                .unwrap(),
        )
        .await
        .unwrap();

    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, String::from_utf8(bytes.to_vec()).unwrap())
}

async fn trigger(server: &MockServer, repo: &str) -> (StatusCode, String) {
    send(app_for(server, repo), "POST", "/empty-commit", Body::empty()).await
}

async fn mount_state(server: &MockServer, id: &str, oid: &str) {
    Mock::given(method("POST"))
        .and(path("/graphql"))
        .and(header("authorization", "Bearer test-token"))
        .and(body_partial_json(json!({
            "variables": { "owner": "octo", "repo": "demo" }
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": {
                "repository": {
                    "id": id,
                    "defaultBranchRef": { "target": { "oid": oid } }
                }
            }
        })))
        .mount(server)
        .await;
}

// =============================================================================
// Empty commit function
// =============================================================================

#[tokio::test]
async fn creates_commit_on_observed_head() {
    let server = MockServer::start().await;
    mount_state(&server, "R_1", "abc123").await;
    Mock::given(method("POST"))
        .and(path("/graphql"))
        .and(body_partial_json(json!({
            "variables": {
                "input": {
                    "branch": {
                        "repositoryNameWithOwner": "octo/demo",
                        "branchName": "main"
                    },
                    "expectedHeadOid": "abc123",
                    "fileChanges": {}
                }
            }
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": { "createCommitOnBranch": { "commit": { "oid": "def456" } } }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let (status, body) = trigger(&server, "octo/demo").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "Created verified empty commit: def456\n");
}

#[tokio::test]
async fn accepts_any_method_and_ignores_body() {
    let server = MockServer::start().await;
    mount_state(&server, "R_1", "abc123").await;
    Mock::given(method("POST"))
        .and(body_partial_json(json!({
            "variables": { "input": { "expectedHeadOid": "abc123" } }
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": { "createCommitOnBranch": { "commit": { "oid": "def456" } } }
        })))
        .mount(&server)
        .await;

    let (status, body) = send(
        app_for(&server, "octo/demo"),
        "GET",
        "/",
        Body::from("not json at all"),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("def456"));
}

#[tokio::test]
async fn empty_repository_address_fails_without_remote_calls() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let (status, body) = trigger(&server, "").await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, "GITHUB_REPO not set\n");
    assert!(server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn malformed_repository_address_fails_without_remote_calls() {
    let server = MockServer::start().await;

    let (status, body) = trigger(&server, "a/b/c").await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body.contains("a/b/c"));
    assert!(server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn empty_default_branch_is_server_error_without_commit() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(body_partial_json(json!({ "variables": { "owner": "octo" } })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": { "repository": { "id": "R_1", "defaultBranchRef": null } }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let (status, body) = trigger(&server, "octo/demo").await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body.contains("empty head sha in response"));
    assert_eq!(server.received_requests().await.unwrap().len(), 1);
}

#[tokio::test]
async fn stale_head_is_server_error() {
    let server = MockServer::start().await;
    mount_state(&server, "R_1", "abc123").await;
    Mock::given(method("POST"))
        .and(body_partial_json(json!({
            "variables": { "input": { "expectedHeadOid": "abc123" } }
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": { "createCommitOnBranch": null },
            "errors": [{
                "type": "STALE_DATA",
                "message": "Expected branch to point to \"abc123\" but it did not. Pull and try again."
            }]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let (status, body) = trigger(&server, "octo/demo").await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body.starts_with("failed to create verified commit"));
    assert!(!body.contains("def456"));
}

// =============================================================================
// Greeting function
// =============================================================================

#[tokio::test]
async fn hello_greets_by_name() {
    let server = MockServer::start().await;
    let (status, body) = send(
        app_for(&server, "octo/demo"),
        "POST",
        "/hello",
        Body::from(r#"{"name":"<Ada>"}"#),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert!(body.starts_with("Hello there, &lt;Ada&gt;!\n"));
    assert!(server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn hello_without_name_greets_world() {
    let server = MockServer::start().await;
    let app = app_for(&server, "octo/demo");
    let (status, body) = send(app, "POST", "/hello", Body::from("{}")).await;

    assert_eq!(status, StatusCode::OK);
    assert!(body.starts_with("Hello, World!\n"));
}

#[tokio::test]
async fn hello_with_null_body_greets_world() {
    let server = MockServer::start().await;
    let app = app_for(&server, "octo/demo");
    let (status, body) = send(app, "POST", "/hello", Body::from("null")).await;

    assert_eq!(status, StatusCode::OK);
    assert!(body.starts_with("Hello, World!\n"));
}

#[tokio::test]
async fn hello_rejects_invalid_json() {
    let server = MockServer::start().await;
    let app = app_for(&server, "octo/demo");
    let (status, body) = send(app, "POST", "/hello", Body::from("{")).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, "Invalid JSON request.\n");
}

#[tokio::test]
async fn health_check_responds_ok() {
    let server = MockServer::start().await;
    let app = app_for(&server, "octo/demo");
    let (status, body) = send(app, "GET", "/health", Body::empty()).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "OK");
}
