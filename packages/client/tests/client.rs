//! Client requests against a mock API server

use std::error::Error as _;
use std::time::Duration;

use mixture_client::{ClientBuilder, ClientConfig, ClientError, RequestOptions};
use mixture_common::LoggingTransformer;
use mixture_jwt::{CheckStatus, Payload, check_token, make_token};
use reqwest::header::{HeaderName, HeaderValue};
use serde_json::json;
use wiremock::matchers::{body_json, body_string, header, method, path, query_param};
use wiremock::{Mock, MockServer, Request, ResponseTemplate};

const SIMPLE_QUERY: &str = "query { viewer { id } }";

const VARIABLES_QUERY: &str = r"query GetServiceGroup($target_id: ID) {
  serviceGroup(id: $target_id) { id name }
}";

fn payload() -> Payload {
    let mut payload = Payload::new();
    payload.insert(
        "secret_key".to_string(),
        json!("72091beec1e958a6c5dd31336242607c0887754b1d43ebf071fb2890533d611a"),
    );
    payload
}

#[tokio::test]
async fn test_query_posts_to_graphql_endpoint() {
    LoggingTransformer::init_test();
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/graphql"))
        .and(body_json(json!({"query": SIMPLE_QUERY})))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"data": {"viewer": {"id": "1"}}})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let client = ClientBuilder::build_default(server.uri()).unwrap();
    let response = client
        .query(SIMPLE_QUERY, None, RequestOptions::new())
        .await
        .unwrap();

    assert_eq!(response.data()["viewer"], json!({"id": "1"}));
    assert!(!response.has_errors());
}

#[tokio::test]
async fn test_query_sends_variables_and_bearer_token() {
    let server = MockServer::start().await;
    let token = make_token("secret", &payload(), None).unwrap();

    Mock::given(method("POST"))
        .and(path("/graphql"))
        .and(header("authorization", token.as_str()))
        .and(body_json(json!({
            "query": VARIABLES_QUERY,
            "variables": {"target_id": "2"},
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": {"serviceGroup": {"id": "2", "name": "ops"}}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = ClientBuilder::build_default(server.uri()).unwrap();
    let options = RequestOptions::new().with_authorization(&token).unwrap();
    let response = client
        .query(VARIABLES_QUERY, Some(json!({"target_id": "2"})), options)
        .await
        .unwrap();

    assert_eq!(response.data()["serviceGroup"]["name"], json!("ops"));
}

#[tokio::test]
async fn test_server_side_token_check_round_trip() {
    let server = MockServer::start().await;
    let token = make_token("secret", &payload(), None).unwrap();

    // the mock plays the API: it verifies the bearer and echoes the check status
    Mock::given(method("POST"))
        .and(path("/graphql"))
        .respond_with(|request: &Request| {
            let bearer = request
                .headers
                .get("authorization")
                .and_then(|value| value.to_str().ok())
                .unwrap_or_default();
            match check_token("secret", bearer) {
                Ok(checked) => ResponseTemplate::new(200).set_body_json(json!({
                    "data": {"status": checked.status, "token": checked.token}
                })),
                Err(err) => ResponseTemplate::new(200).set_body_json(json!({
                    "errors": [{"message": err.to_string()}]
                })),
            }
        })
        .mount(&server)
        .await;

    let client = ClientBuilder::new(server.uri())
        .with_authorization(&token)
        .unwrap()
        .build()
        .unwrap();
    let response = client
        .query(SIMPLE_QUERY, None, RequestOptions::new())
        .await
        .unwrap();

    assert_eq!(response.data()["status"], json!(CheckStatus::Ok));
    let slid = response.data()["token"].as_str().unwrap();
    assert_eq!(check_token("secret", slid).unwrap().status, CheckStatus::Ok);
}

#[tokio::test]
async fn test_query_honours_end_point_override() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/admin/graphql"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": {}})))
        .expect(1)
        .mount(&server)
        .await;

    let client = ClientBuilder::build_default(server.uri()).unwrap();
    let options = RequestOptions::new().with_end_point("/admin/graphql");
    let response = client.query(SIMPLE_QUERY, None, options).await.unwrap();

    assert!(response.data().is_empty());
}

#[tokio::test]
async fn test_configured_graphql_endpoint_and_default_headers() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v2/graphql"))
        .and(header("x-api-client", "mixture"))
        .and(header("x-request-id", "abc"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": {"ok": true}})))
        .expect(1)
        .mount(&server)
        .await;

    let mut config = ClientConfig::new(server.uri());
    config.graphql_endpoint = "/v2/graphql".to_string();
    config
        .default_headers
        .insert("x-api-client".to_string(), "mixture".to_string());

    let client = ClientBuilder::from_config(config)
        .with_header(
            HeaderName::from_static("x-request-id"),
            HeaderValue::from_static("abc"),
        )
        .build()
        .unwrap();
    assert_eq!(client.graphql_endpoint(), "/v2/graphql");

    let response = client
        .query(SIMPLE_QUERY, None, RequestOptions::new())
        .await
        .unwrap();
    assert_eq!(response.data()["ok"], json!(true));
}

#[tokio::test]
async fn test_rest_verbs() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/programs"))
        .and(query_param("page", "2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": {"verb": "get"}})))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/programs"))
        .and(body_json(json!({"name": "new"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": {"verb": "post"}})))
        .mount(&server)
        .await;
    Mock::given(method("PUT"))
        .and(path("/programs/1"))
        .and(body_string("raw=1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": {"verb": "put"}})))
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/programs/1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": {"verb": "delete"}})))
        .mount(&server)
        .await;

    let client = ClientBuilder::build_default(server.uri()).unwrap();

    let get = client
        .get("/programs", RequestOptions::new().with_query("page", "2"))
        .await
        .unwrap();
    let post = client
        .post("/programs", RequestOptions::new().with_json(json!({"name": "new"})))
        .await
        .unwrap();
    let put = client
        .put("/programs/1", RequestOptions::new().with_body("raw=1"))
        .await
        .unwrap();
    let delete = client
        .delete("/programs/1", RequestOptions::new())
        .await
        .unwrap();

    assert_eq!(get.data()["verb"], json!("get"));
    assert_eq!(post.data()["verb"], json!("post"));
    assert_eq!(put.data()["verb"], json!("put"));
    assert_eq!(delete.data()["verb"], json!("delete"));
}

#[tokio::test]
async fn test_errors_only_response_is_returned() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "errors": [{"message": "Cannot query field \"nope\""}]
        })))
        .mount(&server)
        .await;

    let client = ClientBuilder::build_default(server.uri()).unwrap();
    let response = client
        .query("{ nope }", None, RequestOptions::new())
        .await
        .unwrap();

    assert!(response.data().is_empty());
    assert!(response.has_errors());
    assert_eq!(response.errors()[0]["message"], json!("Cannot query field \"nope\""));
}

#[tokio::test]
async fn test_unexpected_body_is_invalid_format() {
    let server = MockServer::start().await;
    Mock::given(path("/shape"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"status": "ok"})))
        .mount(&server)
        .await;
    Mock::given(path("/html"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
        .mount(&server)
        .await;

    let client = ClientBuilder::build_default(server.uri()).unwrap();

    let err = client.get("/shape", RequestOptions::new()).await.unwrap_err();
    assert!(matches!(err, ClientError::InvalidResponseFormat { .. }));
    assert!(err.to_string().starts_with("Invalid JSON response."));

    let err = client.get("/html", RequestOptions::new()).await.unwrap_err();
    let ClientError::InvalidResponseFormat { body } = err else {
        panic!("expected format error");
    };
    assert_eq!(body, "<html>oops</html>");
}

#[tokio::test]
async fn test_error_status_is_network_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(500).set_body_string("Server side error"))
        .mount(&server)
        .await;

    let client = ClientBuilder::build_default(server.uri()).unwrap();
    let err = client
        .query(SIMPLE_QUERY, None, RequestOptions::new())
        .await
        .unwrap_err();

    assert!(err.is_network());
    assert_eq!(err.status(), Some(500));
    assert!(err.to_string().starts_with("Network Error."));
    assert!(err.source().is_some());
}

#[tokio::test]
async fn test_connection_failure_is_network_error() {
    let port = {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap().port()
    };

    let client = ClientBuilder::new(format!("http://127.0.0.1:{port}"))
        .with_timeout(Duration::from_secs(5))
        .build()
        .unwrap();
    let err = client
        .query(SIMPLE_QUERY, None, RequestOptions::new())
        .await
        .unwrap_err();

    let ClientError::Network { status, source, .. } = &err else {
        panic!("expected network error, got {err:?}");
    };
    assert_eq!(*status, None);
    assert!(source.is_connect());
}

#[tokio::test]
async fn test_request_timeout_is_network_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"data": {}}))
                .set_delay(Duration::from_secs(2)),
        )
        .mount(&server)
        .await;

    let client = ClientBuilder::build_default(server.uri()).unwrap();
    let err = client
        .get(
            "/slow",
            RequestOptions::new().with_timeout(Duration::from_millis(100)),
        )
        .await
        .unwrap_err();

    let ClientError::Network { source, .. } = &err else {
        panic!("expected network error, got {err:?}");
    };
    assert!(source.is_timeout());
}

#[test]
fn test_builder_resolves_relative_base() {
    let client = ClientBuilder::build_default("http://foo.bar/qux").unwrap();
    assert_eq!(client.base_uri().as_str(), "http://foo.bar/qux");
    assert_eq!(client.graphql_endpoint(), "/graphql");
}

#[test]
fn test_builder_rejects_bad_settings() {
    let err = ClientBuilder::build_default("not a uri").unwrap_err();
    assert!(matches!(err, ClientError::InvalidEndpoint { .. }));

    let mut config = ClientConfig::new("http://foo.bar");
    config
        .default_headers
        .insert("bad header".to_string(), "v".to_string());
    let err = ClientBuilder::from_config(config).build().unwrap_err();
    assert!(matches!(err, ClientError::InvalidHeader(_)));
}
