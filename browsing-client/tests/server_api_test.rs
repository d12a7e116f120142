use browsing_client::api::ServerApi;
use browsing_client::config::ClientConfig;
use common::errors::AppError;
use common::http_client::HttpClient;
use serde::Deserialize;
use serde_json::json;
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{method, path, query_param},
};

#[derive(Debug, Deserialize)]
struct Account {
    id: u32,
    display_name: String,
}

fn api_for(server_path: String) -> ServerApi {
    let config = ClientConfig::from_lookup(move |_| Some(server_path.clone()));
    let http_client = HttpClient::new(2, 0).expect("Failed to build client");
    ServerApi::with_client(&config, http_client).expect("Failed to build server API")
}

/// Requests are rooted at the configured endpoint
#[tokio::test]
async fn test_requests_go_to_configured_endpoint() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/accounts/12"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": 12,
            "display_name": "curator"
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let api = api_for(format!("{}/", mock_server.uri()));
    let account: Account = api.get_json("accounts/12").await.expect("Request failed");

    assert_eq!(account.id, 12);
    assert_eq!(account.display_name, "curator");
}

/// A path prefix on the endpoint is kept for every route
#[tokio::test]
async fn test_endpoint_path_prefix_is_preserved() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/platform/search"))
        .and(query_param("q", "archive"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(1)
        .mount(&mock_server)
        .await;

    let api = api_for(format!("{}/platform", mock_server.uri()));
    let results: Vec<serde_json::Value> = api
        .get_json("/search?q=archive")
        .await
        .expect("Request failed");

    assert!(results.is_empty());
}

/// Server-side failures propagate with their status
#[tokio::test]
async fn test_http_error_propagates() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/forbidden"))
        .respond_with(ResponseTemplate::new(403))
        .mount(&mock_server)
        .await;

    let api = api_for(mock_server.uri());
    let result: Result<serde_json::Value, AppError> = api.get_json("forbidden").await;

    assert!(matches!(
        result,
        Err(AppError::HttpError { status: 403, .. })
    ));
}
