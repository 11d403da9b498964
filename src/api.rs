//! Auth API — registration and authentication calls.
//!
//! Both operations are single passthrough calls to the [`Transport`]: no
//! retries, no per-call timeout override. Pure parsing lives in
//! `parse_authenticate_response` for testability.

use crate::transport::Transport;
use crate::types::{AuthError, AuthToken, AuthenticateResponse, Credentials, RegistrationRequest};

pub const SIGN_UP_PATH: &str = "/sign-up/";
pub const AUTHENTICATE_PATH: &str = "/authenticate";

/// Remote auth operations. Enables stubbing the server in session tests.
#[async_trait::async_trait]
pub trait AuthApi: Send + Sync {
    /// Create an account.
    ///
    /// # Errors
    ///
    /// Returns an [`AuthError`] for any transport failure or non-2xx response.
    async fn register(&self, request: &RegistrationRequest) -> Result<(), AuthError>;

    /// Exchange credentials for a bearer token.
    ///
    /// # Errors
    ///
    /// Returns an [`AuthError`] for any transport failure, non-2xx response,
    /// unparsable body, or malformed token.
    async fn authenticate(&self, credentials: &Credentials) -> Result<AuthToken, AuthError>;
}

// =============================================================================
// HTTP IMPLEMENTATION
// =============================================================================

#[derive(Clone)]
pub struct HttpAuthApi {
    transport: Transport,
}

impl HttpAuthApi {
    #[must_use]
    pub fn new(transport: Transport) -> Self {
        Self { transport }
    }
}

#[async_trait::async_trait]
impl AuthApi for HttpAuthApi {
    async fn register(&self, request: &RegistrationRequest) -> Result<(), AuthError> {
        self.transport.post_json(SIGN_UP_PATH, request, None).await?;
        Ok(())
    }

    async fn authenticate(&self, credentials: &Credentials) -> Result<AuthToken, AuthError> {
        let text = self.transport.post_json(AUTHENTICATE_PATH, credentials, None).await?;
        parse_authenticate_response(&text)
    }
}

// =============================================================================
// PARSING
// =============================================================================

fn parse_authenticate_response(json: &str) -> Result<AuthToken, AuthError> {
    let body: AuthenticateResponse = serde_json::from_str(json).map_err(|e| AuthError::ApiParse(e.to_string()))?;
    AuthToken::parse(body.jwt_token)
}

#[cfg(test)]
#[path = "api_test.rs"]
mod tests;
