use super::*;
use crate::config::TransportTimeouts;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn api_for(server: &MockServer) -> HttpAuthApi {
    HttpAuthApi::new(Transport::new(server.uri(), TransportTimeouts::default()).unwrap())
}

fn creds() -> Credentials {
    Credentials { email: "a@x.com".into(), password: "longenough1".into() }
}

// =============================================================================
// parse_authenticate_response
// =============================================================================

#[test]
fn parse_valid_response() {
    let token = parse_authenticate_response(r#"{"jwtToken":"T1"}"#).unwrap();
    assert_eq!(token.as_str(), "T1");
}

#[test]
fn parse_ignores_extra_fields() {
    let token = parse_authenticate_response(r#"{"jwtToken":"T1","expiresIn":3600}"#).unwrap();
    assert_eq!(token.as_str(), "T1");
}

#[test]
fn parse_missing_field() {
    assert!(matches!(parse_authenticate_response(r#"{"token":"T1"}"#), Err(AuthError::ApiParse(_))));
}

#[test]
fn parse_invalid_json() {
    assert!(matches!(parse_authenticate_response("not json"), Err(AuthError::ApiParse(_))));
}

#[test]
fn parse_empty_token_is_malformed() {
    assert!(matches!(parse_authenticate_response(r#"{"jwtToken":""}"#), Err(AuthError::MalformedToken(_))));
}

#[test]
fn parse_non_string_token() {
    assert!(matches!(parse_authenticate_response(r#"{"jwtToken":42}"#), Err(AuthError::ApiParse(_))));
}

// =============================================================================
// HttpAuthApi
// =============================================================================

#[tokio::test]
async fn authenticate_posts_credentials() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/authenticate"))
        .and(body_json(serde_json::json!({ "email": "a@x.com", "password": "longenough1" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({ "jwtToken": "T1" })))
        .expect(1)
        .mount(&server)
        .await;

    let token = api_for(&server).authenticate(&creds()).await.unwrap();
    assert_eq!(token.as_str(), "T1");
}

#[tokio::test]
async fn authenticate_never_sends_authorization() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/authenticate"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({ "jwtToken": "T1" })))
        .mount(&server)
        .await;

    api_for(&server).authenticate(&creds()).await.unwrap();
    let requests = server.received_requests().await.unwrap();
    assert!(requests[0].headers.get("authorization").is_none());
}

#[tokio::test]
async fn authenticate_rejected() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/authenticate"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    let err = api_for(&server).authenticate(&creds()).await.unwrap_err();
    assert!(err.is_rejection());
}

#[tokio::test]
async fn register_posts_camel_case_body() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/sign-up/"))
        .and(body_json(serde_json::json!({
            "fullName": "Ada Lovelace",
            "email": "ada@x.com",
            "password": "longenough1"
        })))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let request = RegistrationRequest {
        full_name: "Ada Lovelace".into(),
        email: "ada@x.com".into(),
        password: "longenough1".into(),
    };
    api_for(&server).register(&request).await.unwrap();
}

#[tokio::test]
async fn register_failure_is_propagated() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/sign-up/"))
        .respond_with(ResponseTemplate::new(409).set_body_string("email taken"))
        .mount(&server)
        .await;

    let request = RegistrationRequest {
        full_name: "Ada Lovelace".into(),
        email: "ada@x.com".into(),
        password: "longenough1".into(),
    };
    let err = api_for(&server).register(&request).await.unwrap_err();
    assert!(matches!(err, AuthError::ApiResponse { status: 409, ref body } if body == "email taken"));
}
