//! Integration tests for the OAuth token lifecycle against a mock bank.
//!
//! These tests drive the real `ReqwestTransport` and `FileTokenStore`
//! against a wiremock server standing in for the authorization server and
//! the resource API.

use serde_json::json;
use wiremock::matchers::{body_string, body_string_contains, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use tatrabanka_api::auth::oauth::OAuthError;
use tatrabanka_api::services::{Accounts, AccountsQuery, Payments};
use tatrabanka_api::{
    ApiClient, ApiUrl, BankConfig, ClientCategory, ClientId, ClientSecret, FileTokenStore,
    RedirectUri, RequestError, Token, TokenStore,
};

const REDIRECT: &str = "https://myapp.example.com/callback";

fn create_config(server: &MockServer, token_dir: &std::path::Path) -> BankConfig {
    BankConfig::builder()
        .client_id(ClientId::new("test-client").unwrap())
        .client_secret(ClientSecret::new("test-secret").unwrap())
        .redirect_uri(RedirectUri::new(REDIRECT).unwrap())
        .api_url(ApiUrl::new(server.uri()).unwrap())
        .token_dir(token_dir)
        .build()
        .unwrap()
}

fn store_for(config: &BankConfig, category: ClientCategory) -> FileTokenStore {
    FileTokenStore::for_client(config.token_dir(), category, config.credentials())
}

// base64("test-client:test-secret")
const BASIC_AUTH: &str = "Basic dGVzdC1jbGllbnQ6dGVzdC1zZWNyZXQ=";

#[tokio::test]
async fn test_authorization_code_grant_then_list_accounts() {
    let server = MockServer::start().await;
    let dir = tempfile::tempdir().unwrap();

    Mock::given(method("POST"))
        .and(path("/auth/oauth/v2/token"))
        .and(header("Authorization", BASIC_AUTH))
        .and(header(
            "Content-Type",
            "application/x-www-form-urlencoded; charset=utf-8",
        ))
        .and(body_string(
            "grant_type=authorization_code&code=abc&redirect_uri=https%3A%2F%2Fmyapp.example.com%2Fcallback",
        ))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "access_token": "X",
            "refresh_token": "R",
            "expires_in": 3600,
            "token_type": "Bearer",
            "scope": "AISP"
        })))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/v1/accounts"))
        .and(header("Authorization", "Bearer X"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"accounts": []})))
        .expect(1)
        .mount(&server)
        .await;

    let config = create_config(&server, dir.path());
    let store = store_for(&config, ClientCategory::Accounts);
    let mut accounts = Accounts::new(config).unwrap();

    let token = accounts
        .client_mut()
        .request_access_token("abc")
        .await
        .unwrap();
    assert_eq!(token.access_token, "X");

    let persisted = store.load().unwrap().unwrap();
    assert_eq!(persisted.access_token, "X");
    assert_eq!(persisted.refresh_token.as_deref(), Some("R"));
    assert_eq!(persisted.scope.as_deref(), Some("AISP"));

    let body = accounts
        .get_accounts(&AccountsQuery::default())
        .await
        .unwrap();
    assert_eq!(body, json!({"accounts": []}));

    let requests = server.received_requests().await.unwrap();
    let accounts_request = requests
        .iter()
        .find(|r| r.url.path() == "/api/v1/accounts")
        .unwrap();
    assert_eq!(
        accounts_request.url.query(),
        Some("page=1&pageSize=50&order=desc")
    );
}

#[tokio::test]
async fn test_persisted_token_is_reused_by_a_new_client() {
    let server = MockServer::start().await;
    let dir = tempfile::tempdir().unwrap();

    Mock::given(method("GET"))
        .and(path("/api/v1/accounts"))
        .and(header("Authorization", "Bearer STORED"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"accounts": [1]})))
        .expect(1)
        .mount(&server)
        .await;

    let config = create_config(&server, dir.path());
    store_for(&config, ClientCategory::Accounts)
        .save(&Token::new("STORED"))
        .unwrap();

    let mut accounts = Accounts::new(config).unwrap();
    let body = accounts
        .get_accounts(&AccountsQuery::default())
        .await
        .unwrap();

    assert_eq!(body, json!({"accounts": [1]}));
    assert_eq!(accounts.client().last_response_code(), Some(200));
}

#[tokio::test]
async fn test_unauthorized_response_then_refresh_and_retry() {
    let server = MockServer::start().await;
    let dir = tempfile::tempdir().unwrap();

    Mock::given(method("GET"))
        .and(path("/api/v1/accounts"))
        .and(header("Authorization", "Bearer OLD"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "error": "invalid_token",
            "error_description": "The access token expired"
        })))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/auth/oauth/v2/token"))
        .and(body_string("grant_type=refresh_token&refresh_token=R1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "access_token": "NEW",
            "refresh_token": "R2",
            "expires_in": 3600,
            "token_type": "Bearer"
        })))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/v1/accounts"))
        .and(header("Authorization", "Bearer NEW"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"accounts": ["ok"]})))
        .expect(1)
        .mount(&server)
        .await;

    let config = create_config(&server, dir.path());
    let store = store_for(&config, ClientCategory::Accounts);
    store
        .save(&Token::new("OLD").with_refresh_token("R1"))
        .unwrap();

    let mut accounts = Accounts::new(config).unwrap();
    let query = AccountsQuery::default();

    let error = accounts.get_accounts(&query).await.unwrap_err();
    assert!(error.is_unauthorized());
    assert_eq!(accounts.client().last_response_code(), Some(401));
    match &error {
        RequestError::Api(e) => {
            assert_eq!(e.code, "invalid_token");
            assert_eq!(e.status, 401);
        }
        other => panic!("Expected Api error, got: {other:?}"),
    }

    let refreshed = accounts.client_mut().refresh_access_token().await.unwrap();
    assert_eq!(refreshed.access_token, "NEW");

    let body = accounts.get_accounts(&query).await.unwrap();
    assert_eq!(body, json!({"accounts": ["ok"]}));

    let persisted = store.load().unwrap().unwrap();
    assert_eq!(persisted.access_token, "NEW");
    assert_eq!(persisted.refresh_token.as_deref(), Some("R2"));
}

#[tokio::test]
async fn test_client_credentials_grant_for_payments() {
    let server = MockServer::start().await;
    let dir = tempfile::tempdir().unwrap();

    Mock::given(method("POST"))
        .and(path("/auth/oauth/v2/token"))
        .and(header("Authorization", BASIC_AUTH))
        .and(body_string("grant_type=client_credentials&scope=payments"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "access_token": "P",
            "expires_in": 300,
            "scope": "payments"
        })))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/v1/payments/ORDER-42/status"))
        .and(header("Authorization", "Bearer P"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"status": "DONE"})))
        .expect(1)
        .mount(&server)
        .await;

    let config = create_config(&server, dir.path());
    let mut payments = Payments::new(config).unwrap();

    let token = payments
        .client_mut()
        .request_client_credentials_token()
        .await
        .unwrap();
    assert!(token.refresh_token.is_none());
    assert_eq!(token.token_type, "Bearer");
    assert_eq!(token.expires_in, 300);

    let status = payments.payment_status("ORDER-42").await.unwrap();
    assert_eq!(status, json!({"status": "DONE"}));

    let result = payments.client_mut().refresh_access_token().await;
    assert!(matches!(result, Err(OAuthError::MissingRefreshToken)));
}

#[tokio::test]
async fn test_rejected_grant_leaves_store_untouched() {
    let server = MockServer::start().await;
    let dir = tempfile::tempdir().unwrap();

    Mock::given(method("POST"))
        .and(path("/auth/oauth/v2/token"))
        .and(body_string_contains("grant_type=authorization_code"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "error": "invalid_grant",
            "error_description": "Authorization code expired"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let config = create_config(&server, dir.path());
    let store = store_for(&config, ClientCategory::Accounts);
    let mut client = ApiClient::new(config, ClientCategory::Accounts).unwrap();

    let result = client.request_access_token("stale").await;

    match result {
        Err(OAuthError::Rejected {
            code,
            description,
            status,
        }) => {
            assert_eq!(code, "invalid_grant");
            assert_eq!(description.as_deref(), Some("Authorization code expired"));
            assert_eq!(status, 400);
        }
        other => panic!("Expected Rejected, got: {other:?}"),
    }
    assert!(store.load().unwrap().is_none());
    assert!(!client.is_authorized().unwrap());
}

#[tokio::test]
async fn test_sandbox_prefix_applies_to_token_and_resource_urls() {
    let server = MockServer::start().await;
    let dir = tempfile::tempdir().unwrap();

    Mock::given(method("POST"))
        .and(path("/sandbox/auth/oauth/v2/token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"access_token": "S"})))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/sandbox/api/v1/payments/submission"))
        .and(header("Authorization", "Bearer S"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"submitted": true})))
        .expect(1)
        .mount(&server)
        .await;

    let config = BankConfig::builder()
        .client_id(ClientId::new("test-client").unwrap())
        .client_secret(ClientSecret::new("test-secret").unwrap())
        .api_url(ApiUrl::new(server.uri()).unwrap())
        .sandbox(true)
        .token_dir(dir.path())
        .build()
        .unwrap();
    let mut payments = Payments::new(config).unwrap();

    payments
        .client_mut()
        .request_client_credentials_token()
        .await
        .unwrap();
    let body = payments.payment_submission().await.unwrap();

    assert_eq!(body, json!({"submitted": true}));
}

#[tokio::test]
async fn test_malformed_api_response_is_protocol_error() {
    let server = MockServer::start().await;
    let dir = tempfile::tempdir().unwrap();

    Mock::given(method("GET"))
        .and(path("/api/v1/accounts"))
        .respond_with(ResponseTemplate::new(502).set_body_string("<html>Bad Gateway</html>"))
        .mount(&server)
        .await;

    let config = create_config(&server, dir.path());
    store_for(&config, ClientCategory::Accounts)
        .save(&Token::new("X"))
        .unwrap();
    let mut accounts = Accounts::new(config).unwrap();

    let error = accounts
        .get_accounts(&AccountsQuery::default())
        .await
        .unwrap_err();

    assert!(matches!(error, RequestError::Protocol(_)));
    assert_eq!(error.status(), Some(502));
    assert_eq!(accounts.client().last_response_code(), Some(502));
}
