//! Integration tests for entrypoint registration over HTTP

use mockito::Matcher;
use raistrix_sdk::{
    ClientConfig, ConfigError, EntrypointDraft, HttpMethod, RegistryError, SyncClient,
    SyncFailure, SyncResult,
};
use serde_json::json;

fn create_client(server: &mockito::Server) -> SyncClient {
    SyncClient::new(ClientConfig::new("k", "p").with_endpoint(server.url())).unwrap()
}

fn create_valid_entrypoint() -> EntrypointDraft {
    EntrypointDraft::new("t", "d", HttpMethod::Get, "/x").with_schema(json!({}), json!({}))
}

#[tokio::test]
async fn test_successful_registration() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/api/v1/entrypoints/")
        .match_header("authorization", "Bearer k")
        .match_header("content-type", "application/json")
        .match_body(Matcher::Json(json!({
            "projectId": "p",
            "entrypoints": [{
                "name": "t",
                "description": "d",
                "method": "GET",
                "path": "/x",
                "schema": { "request": {}, "response": {} }
            }]
        })))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"success":true,"createdAt":"2025-01-01T00:00:00Z"}"#)
        .create_async()
        .await;

    let mut client = create_client(&server);
    let result = client
        .register_entrypoint(create_valid_entrypoint())
        .await
        .unwrap();

    mock.assert_async().await;
    assert_eq!(
        result,
        SyncResult {
            success: true,
            created_at: "2025-01-01T00:00:00Z".to_string(),
        }
    );
}

#[tokio::test]
async fn test_unauthorized_response() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("POST", "/api/v1/entrypoints/")
        .with_status(401)
        .with_body("{}")
        .create_async()
        .await;

    let mut client = create_client(&server);
    let err = client
        .register_entrypoint(create_valid_entrypoint())
        .await
        .unwrap_err();

    assert!(matches!(err, RegistryError::Auth { status: 401 }));
}

#[tokio::test]
async fn test_server_error_response() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("POST", "/api/v1/entrypoints/")
        .with_status(500)
        .with_header("content-type", "application/json")
        .with_body(r#"{"message":"boom"}"#)
        .create_async()
        .await;

    let mut client = create_client(&server);
    let err = client
        .register_entrypoint(create_valid_entrypoint())
        .await
        .unwrap_err();

    match &err {
        RegistryError::Sync(SyncFailure::Status {
            status,
            status_text,
            message,
        }) => {
            assert_eq!(*status, 500);
            assert_eq!(status_text, "Internal Server Error");
            assert_eq!(message.as_deref(), Some("boom"));
        }
        other => panic!("expected status failure, got {:?}", other),
    }
    assert!(err.to_string().contains("500"));
    assert!(err.to_string().contains("boom"));
}

fn payload_with(count: usize) -> serde_json::Value {
    let entrypoint = json!({
        "name": "t",
        "description": "d",
        "method": "GET",
        "path": "/x",
        "schema": { "request": {}, "response": {} }
    });
    json!({ "projectId": "p", "entrypoints": vec![entrypoint; count] })
}

#[tokio::test]
async fn test_each_registration_posts_full_buffer() {
    let mut server = mockito::Server::new_async().await;
    let first = server
        .mock("POST", "/api/v1/entrypoints/")
        .match_body(Matcher::Json(payload_with(1)))
        .with_status(200)
        .with_body(r#"{"success":true,"createdAt":"2025-01-01T00:00:00Z"}"#)
        .expect(1)
        .create_async()
        .await;
    let second = server
        .mock("POST", "/api/v1/entrypoints/")
        .match_body(Matcher::Json(payload_with(2)))
        .with_status(200)
        .with_body(r#"{"success":true,"createdAt":"2025-01-02T00:00:00Z"}"#)
        .expect(1)
        .create_async()
        .await;

    let mut client = create_client(&server);
    let first_result = client
        .register_entrypoint(create_valid_entrypoint())
        .await
        .unwrap();
    let second_result = client
        .register_entrypoint(create_valid_entrypoint())
        .await
        .unwrap();

    first.assert_async().await;
    second.assert_async().await;
    assert_eq!(first_result.created_at, "2025-01-01T00:00:00Z");
    assert_eq!(second_result.created_at, "2025-01-02T00:00:00Z");
    assert_eq!(client.entrypoints().len(), 2);
}

#[tokio::test]
async fn test_validation_failure_makes_no_request() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/api/v1/entrypoints/")
        .expect(0)
        .create_async()
        .await;

    let mut client = create_client(&server);
    let mut draft = create_valid_entrypoint();
    draft.method = Some("FETCH".to_string());

    let err = client.register_entrypoint(draft).await.unwrap_err();

    assert!(matches!(err, RegistryError::Validation(_)));
    assert!(client.entrypoints().is_empty());
    mock.assert_async().await;
}

#[tokio::test]
async fn test_connection_refused_is_sync_error() {
    // Bind then drop a listener so its port is closed
    let url = {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        format!("http://{}", listener.local_addr().unwrap())
    };

    let mut client = SyncClient::new(ClientConfig::new("k", "p").with_endpoint(url)).unwrap();
    let err = client
        .register_entrypoint(create_valid_entrypoint())
        .await
        .unwrap_err();

    assert!(matches!(err, RegistryError::Sync(SyncFailure::Transport(_))));
    assert!(err.to_string().starts_with("entrypoints sync failed: "));
}

#[test]
fn test_construction_fails_without_credentials() {
    let err = SyncClient::new(ClientConfig::new("", "p")).unwrap_err();
    assert_eq!(err.to_string(), "API key is required");

    let err = SyncClient::new(ClientConfig::new("k", "")).unwrap_err();
    assert_eq!(err, ConfigError::MissingProjectId);
}
