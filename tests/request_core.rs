//! Core request-layer behavior against a mock backend: auth gating, body
//! handling, host/path fallback, error normalization, and cancellation.

use mockito::Matcher;
use nutrisnap_client::{
    ApiClientBuilder, ApiRequest, Error, FilePart, NoSession, StaticTokenProvider,
};
use serde_json::json;
use std::net::TcpListener;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

/// An origin where nothing is listening (bound then dropped), so connections
/// are refused quickly.
fn dead_origin() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
    let addr = listener.local_addr().expect("local addr");
    drop(listener);
    format!("http://{addr}")
}

fn client_for(base: &str) -> ApiClientBuilder {
    ApiClientBuilder::new()
        .base_url(base)
        .fallback_bases(Vec::new())
        .path_shapes(vec!["api".to_string()])
}

/// Route client debug events to the test writer; `RUST_LOG=debug` shows the
/// failover decisions when a test here misbehaves.
fn trace_init() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

#[test]
fn invalid_base_url_is_rejected_at_build() {
    let err = ApiClientBuilder::new()
        .base_url("not a url")
        .build()
        .unwrap_err();
    assert!(matches!(err, Error::Configuration(_)));

    let err = ApiClientBuilder::new()
        .base_url("http://localhost:8000")
        .extra_base("ftp://files.example.com")
        .build()
        .unwrap_err();
    assert!(matches!(err, Error::Configuration(_)));
}

#[tokio::test]
async fn auth_required_fails_before_any_network_call() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", "/api/profile")
        .expect(0)
        .create_async()
        .await;

    let client = client_for(&server.url())
        .token_provider(Arc::new(NoSession))
        .build()
        .unwrap();

    let err = client
        .execute(ApiRequest::get("profile").requires_auth(true))
        .await
        .unwrap_err();

    assert!(err.is_auth_required());
    mock.assert_async().await;
}

#[tokio::test]
async fn json_body_sets_content_type_and_serialized_payload() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/api/feedback")
        .match_header("content-type", "application/json")
        .match_body(Matcher::Json(json!({
            "recipe_name": "Salad",
            "feedback_type": "like"
        })))
        .with_status(200)
        .with_body(r#"{"message": "Feedback submitted"}"#)
        .create_async()
        .await;

    let client = client_for(&server.url())
        .token_provider(Arc::new(StaticTokenProvider::new("tok")))
        .build()
        .unwrap();

    let request = ApiRequest::post("feedback")
        .requires_auth(true)
        .json_body(&json!({"recipe_name": "Salad", "feedback_type": "like"}))
        .unwrap();
    client.execute(request).await.unwrap();

    mock.assert_async().await;
}

#[tokio::test]
async fn multipart_body_gets_transport_owned_content_type() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/api/analyze-food")
        .match_header(
            "content-type",
            Matcher::Regex("^multipart/form-data; boundary=.+".to_string()),
        )
        .with_status(200)
        .with_body(r#"{"detected_ingredients": [], "recipes": [], "ranking": []}"#)
        .create_async()
        .await;

    let client = client_for(&server.url()).build().unwrap();
    let request = ApiRequest::post("analyze-food").multipart(FilePart::image(
        "plate.jpg",
        "image/jpeg",
        vec![0xFF, 0xD8, 0xFF],
    ));
    client.execute(request).await.unwrap();

    mock.assert_async().await;
}

#[tokio::test]
async fn unreachable_base_falls_back_and_is_remembered() {
    trace_init();
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", "/api/test")
        .with_status(200)
        .with_body(r#"{"status": "ok", "message": "hello"}"#)
        .expect(2)
        .create_async()
        .await;

    let dead = dead_origin();
    let client = ApiClientBuilder::new()
        .base_url(&dead)
        .fallback_bases(vec![server.url()])
        .path_shapes(vec!["api".to_string()])
        .build()
        .unwrap();

    assert!(client.preferred_base().is_none());
    let body = client.execute(ApiRequest::get("test")).await.unwrap();
    assert_eq!(body["status"], "ok");
    assert_eq!(client.preferred_base(), Some(server.url()));

    // Second call goes straight to the remembered base.
    client.execute(ApiRequest::get("test")).await.unwrap();
    mock.assert_async().await;
}

#[tokio::test]
async fn all_bases_unreachable_reports_unreachable() {
    let client = ApiClientBuilder::new()
        .base_url(dead_origin())
        .fallback_bases(vec![dead_origin()])
        .path_shapes(vec!["api".to_string()])
        .build()
        .unwrap();

    let err = client.execute(ApiRequest::get("test")).await.unwrap_err();
    assert!(matches!(err, Error::Unreachable { .. }));
    assert!(err.status().is_none());
}

#[tokio::test]
async fn not_found_advances_to_next_path_shape() {
    let mut server = mockito::Server::new_async().await;
    let miss = server
        .mock("GET", "/api/profile")
        .with_status(404)
        .with_body(r#"{"detail": "Not Found"}"#)
        .create_async()
        .await;
    let hit = server
        .mock("GET", "/api/index.py/profile")
        .with_status(200)
        .with_body(r#"{"uid": "u1"}"#)
        .create_async()
        .await;

    let client = ApiClientBuilder::new()
        .base_url(server.url())
        .fallback_bases(Vec::new())
        .path_shapes(vec!["api".to_string(), "api/index.py".to_string()])
        .token_provider(Arc::new(StaticTokenProvider::new("tok")))
        .build()
        .unwrap();

    let body = client
        .execute(ApiRequest::get("profile").requires_auth(true))
        .await
        .unwrap();
    assert_eq!(body["uid"], "u1");

    miss.assert_async().await;
    hit.assert_async().await;
}

#[tokio::test]
async fn exhausted_path_shapes_name_every_attempted_url() {
    let mut server = mockito::Server::new_async().await;
    let mut misses = Vec::new();
    for path in ["/api/profile", "/api/index.py/profile"] {
        misses.push(
            server
                .mock("GET", path)
                .with_status(404)
                .create_async()
                .await,
        );
    }

    let client = ApiClientBuilder::new()
        .base_url(server.url())
        .fallback_bases(Vec::new())
        .path_shapes(vec!["api".to_string(), "api/index.py".to_string()])
        .build()
        .unwrap();

    let err = client.execute(ApiRequest::get("profile")).await.unwrap_err();
    assert_eq!(err.status(), Some(404));
    let message = err.to_string();
    assert!(message.contains(&format!("{}/api/profile", server.url())));
    assert!(message.contains(&format!("{}/api/index.py/profile", server.url())));
}

#[tokio::test]
async fn non_404_failure_short_circuits_the_shape_search() {
    let mut server = mockito::Server::new_async().await;
    let first = server
        .mock("GET", "/api/profile")
        .with_status(500)
        .with_body(r#"{"detail": "boom"}"#)
        .create_async()
        .await;
    let second = server
        .mock("GET", "/api/index.py/profile")
        .expect(0)
        .create_async()
        .await;

    let client = ApiClientBuilder::new()
        .base_url(server.url())
        .fallback_bases(Vec::new())
        .path_shapes(vec!["api".to_string(), "api/index.py".to_string()])
        .build()
        .unwrap();

    let err = client.execute(ApiRequest::get("profile")).await.unwrap_err();
    assert_eq!(err.status(), Some(500));
    assert_eq!(err.to_string(), "boom");

    first.assert_async().await;
    second.assert_async().await;
}

#[tokio::test]
async fn unparsable_error_body_falls_back_to_status_message() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("GET", "/api/test")
        .with_status(500)
        .with_body("<html>Internal Server Error</html>")
        .create_async()
        .await;

    let client = client_for(&server.url()).build().unwrap();
    let err = client.execute(ApiRequest::get("test")).await.unwrap_err();
    assert_eq!(err.to_string(), "Request failed (500)");
}

#[tokio::test]
async fn unparsable_success_body_degrades_to_empty_object() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("DELETE", "/api/saved-recipes/r1")
        .with_status(200)
        .with_body("")
        .create_async()
        .await;

    let client = client_for(&server.url())
        .token_provider(Arc::new(StaticTokenProvider::new("tok")))
        .build()
        .unwrap();

    let body = client
        .execute(ApiRequest::delete("saved-recipes/r1").requires_auth(true))
        .await
        .unwrap();
    assert_eq!(body, json!({}));
}

#[tokio::test]
async fn bearer_token_is_attached_when_session_exists() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/api/analyze-food")
        .match_header("authorization", "Bearer session-token")
        .with_status(200)
        .with_body("{}")
        .create_async()
        .await;

    // analyze-food does not require auth, but an active session still
    // attaches its token.
    let client = client_for(&server.url())
        .token_provider(Arc::new(StaticTokenProvider::new("session-token")))
        .build()
        .unwrap();
    let request = ApiRequest::post("analyze-food").multipart(FilePart::image(
        "plate.jpg",
        "image/jpeg",
        vec![1, 2, 3],
    ));
    client.execute(request).await.unwrap();

    mock.assert_async().await;
}

#[tokio::test]
async fn token_override_wins_over_the_provider() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", "/api/profile")
        .match_header("authorization", "Bearer override")
        .with_status(200)
        .with_body(r#"{"uid": "u1"}"#)
        .create_async()
        .await;

    let client = client_for(&server.url())
        .token_provider(Arc::new(StaticTokenProvider::new("provider-token")))
        .build()
        .unwrap();

    client
        .execute(
            ApiRequest::get("profile")
                .requires_auth(true)
                .token_override("override"),
        )
        .await
        .unwrap();

    mock.assert_async().await;
}

#[tokio::test]
async fn cancellation_is_distinct_from_unreachable() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", "/api/test")
        .expect(0)
        .create_async()
        .await;

    let cancel = CancellationToken::new();
    cancel.cancel();

    let client = client_for(&server.url()).build().unwrap();
    let err = client
        .execute(ApiRequest::get("test").cancel_token(cancel))
        .await
        .unwrap_err();

    assert!(err.is_cancelled());
    mock.assert_async().await;
}
