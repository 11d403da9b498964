//! Auth types — wire bodies, bearer token, login outcome and errors.
//!
//! DESIGN
//! ======
//! Wire structs mirror the JSON the auth server speaks (`fullName`,
//! `jwtToken`). Secrets (`password`, token value) are redacted from `Debug`
//! output so they never reach logs through `{:?}`.

use std::fmt;

use serde::{Deserialize, Serialize};

// =============================================================================
// ERROR
// =============================================================================

/// Errors produced by transport, auth API and config operations.
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    /// A configuration value could not be parsed.
    #[error("config parse failed: {0}")]
    ConfigParse(String),

    /// The underlying HTTP client could not be constructed.
    #[error("HTTP client build failed: {0}")]
    HttpClientBuild(String),

    /// The HTTP request could not be sent or its body could not be read.
    #[error("API request failed: {0}")]
    ApiRequest(String),

    /// The server returned a non-success HTTP status.
    #[error("API response error: status {status}")]
    ApiResponse { status: u16, body: String },

    /// The response body could not be deserialized.
    #[error("API response parse failed: {0}")]
    ApiParse(String),

    /// The server handed back a token that cannot be used as a bearer credential.
    #[error("malformed token: {0}")]
    MalformedToken(&'static str),

    /// A protected call was attempted without an active session.
    #[error("not authenticated")]
    NotAuthenticated,
}

impl AuthError {
    /// Stable machine-readable code for CLI output and logs.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::ConfigParse(_) => "E_CONFIG_PARSE",
            Self::HttpClientBuild(_) => "E_HTTP_CLIENT_BUILD",
            Self::ApiRequest(_) => "E_API_REQUEST",
            Self::ApiResponse { .. } => "E_API_RESPONSE",
            Self::ApiParse(_) => "E_API_PARSE",
            Self::MalformedToken(_) => "E_MALFORMED_TOKEN",
            Self::NotAuthenticated => "E_NOT_AUTHENTICATED",
        }
    }

    /// True when the server explicitly refused the submitted credentials.
    #[must_use]
    pub fn is_rejection(&self) -> bool {
        matches!(self, Self::ApiResponse { status: 400 | 401 | 403, .. })
    }

    /// True when the server says the bearer token is no longer accepted.
    #[must_use]
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, Self::ApiResponse { status: 401, .. })
    }
}

// =============================================================================
// REQUEST BODIES
// =============================================================================

/// Login credentials. Not retained beyond the login call.
#[derive(Clone, Serialize, PartialEq, Eq)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials").field("email", &self.email).field("password", &"<redacted>").finish()
    }
}

/// Body of `POST /sign-up/`.
#[derive(Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct RegistrationRequest {
    pub full_name: String,
    pub email: String,
    pub password: String,
}

impl fmt::Debug for RegistrationRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RegistrationRequest")
            .field("full_name", &self.full_name)
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

// =============================================================================
// TOKEN
// =============================================================================

/// Opaque bearer credential returned by `POST /authenticate`.
#[derive(Clone, PartialEq, Eq)]
pub struct AuthToken(String);

impl AuthToken {
    /// Validate a raw token string.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::MalformedToken`] if the value is empty or contains
    /// anything other than visible ASCII (whitespace, control bytes, non-ASCII).
    pub fn parse(raw: impl Into<String>) -> Result<Self, AuthError> {
        let raw = raw.into();
        if raw.is_empty() {
            return Err(AuthError::MalformedToken("empty token"));
        }
        if !raw.chars().all(|c| c.is_ascii_graphic()) {
            return Err(AuthError::MalformedToken("token must be visible ASCII without whitespace"));
        }
        Ok(Self(raw))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Value for the `Authorization` header.
    #[must_use]
    pub fn header_value(&self) -> String {
        format!("Bearer {}", self.0)
    }
}

impl fmt::Debug for AuthToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AuthToken(<redacted>)")
    }
}

/// Body of a successful `POST /authenticate`.
#[derive(Debug, Deserialize)]
pub(crate) struct AuthenticateResponse {
    #[serde(rename = "jwtToken")]
    pub jwt_token: String,
}

// =============================================================================
// LOGIN OUTCOME
// =============================================================================

/// Result of [`crate::session::SessionStore::login`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoginOutcome {
    /// Credentials accepted; the session now holds this token.
    Success(AuthToken),
    /// The server rejected the credentials.
    InvalidCredentials,
    /// Network error, unexpected status, or unusable response.
    TransportFailure { reason: String },
    /// A logout happened while the request was in flight; the token was dropped.
    Superseded,
}

impl LoginOutcome {
    pub(crate) fn from_error(err: &AuthError) -> Self {
        if err.is_rejection() { Self::InvalidCredentials } else { Self::TransportFailure { reason: err.to_string() } }
    }

    /// Boolean view: did the login authenticate the session.
    #[must_use]
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }
}

#[cfg(test)]
#[path = "types_test.rs"]
mod tests;
