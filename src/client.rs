//! Session client — outbound calls decorated from the current session.
//!
//! DESIGN
//! ======
//! For every protected call the client reads the session's bearer at send
//! time and passes it to the transport. Nothing is installed on the shared
//! HTTP client, so logout or re-login takes effect on the very next call.
//!
//! ERROR HANDLING
//! ==============
//! A `401` on a protected call means the server no longer accepts the token:
//! the session is expired (same reset as logout) and the error is returned.

use crate::session::SessionHandle;
use crate::transport::Transport;
use crate::types::AuthError;

#[derive(Clone)]
pub struct SessionClient {
    transport: Transport,
    session: SessionHandle,
}

impl SessionClient {
    #[must_use]
    pub fn new(transport: Transport, session: SessionHandle) -> Self {
        Self { transport, session }
    }

    /// `GET` a protected JSON resource with the current bearer and cache it under `path`.
    ///
    /// # Errors
    ///
    /// - [`AuthError::NotAuthenticated`] when there is no session (no request is sent).
    /// - Transport errors; a `401` additionally expires the session.
    /// - [`AuthError::ApiParse`] when the body is not JSON.
    pub async fn get_json(&self, path: &str) -> Result<serde_json::Value, AuthError> {
        let token = self.session.bearer().ok_or(AuthError::NotAuthenticated)?;

        let text = match self.transport.get(path, Some(&token)).await {
            Ok(text) => text,
            Err(e) => {
                if e.is_unauthorized() && !self.session.expire_if_current(&token) {
                    tracing::debug!(%path, "401 for a token the session already replaced");
                }
                return Err(e);
            }
        };

        let payload = parse_json_body(&text)?;
        if !self.session.cache_view(path, &token, payload.clone()) {
            tracing::debug!(%path, "session changed during fetch; payload not cached");
        }
        Ok(payload)
    }

    /// `GET` a public JSON resource. Never carries a bearer; never cached.
    ///
    /// # Errors
    ///
    /// Transport errors, or [`AuthError::ApiParse`] when the body is not JSON.
    pub async fn get_public(&self, path: &str) -> Result<serde_json::Value, AuthError> {
        let text = self.transport.get(path, None).await?;
        parse_json_body(&text)
    }
}

fn parse_json_body(text: &str) -> Result<serde_json::Value, AuthError> {
    if text.trim().is_empty() {
        return Ok(serde_json::Value::Null);
    }
    serde_json::from_str(text).map_err(|e| AuthError::ApiParse(e.to_string()))
}

#[cfg(test)]
#[path = "client_test.rs"]
mod tests;
