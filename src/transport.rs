//! HTTP transport bound to one base endpoint.
//!
//! DESIGN
//! ======
//! Thin `reqwest` wrapper. Every outbound call goes through [`Transport::send`],
//! which is the only place an `Authorization` header is ever attached. The
//! transport holds no credential itself: callers pass the bearer they want
//! per request, so there is no installed state that can go stale or stack.

use std::time::Duration;

use reqwest::Method;
use reqwest::header::AUTHORIZATION;
use serde::Serialize;

use crate::config::TransportTimeouts;
use crate::types::{AuthError, AuthToken};

// =============================================================================
// CLIENT
// =============================================================================

/// Cheap to clone; the inner `reqwest::Client` is reference-counted.
#[derive(Clone)]
pub struct Transport {
    http: reqwest::Client,
    base_url: String,
}

impl Transport {
    /// Build a transport for `base_url` (already normalized by config).
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::HttpClientBuild`] if the HTTP client cannot be built.
    pub fn new(base_url: impl Into<String>, timeouts: TransportTimeouts) -> Result<Self, AuthError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeouts.request_secs))
            .connect_timeout(Duration::from_secs(timeouts.connect_secs))
            .build()
            .map_err(|e| AuthError::HttpClientBuild(e.to_string()))?;
        Ok(Self { http, base_url: base_url.into().trim_end_matches('/').to_string() })
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Absolute URL for an endpoint path.
    #[must_use]
    pub fn url(&self, path: &str) -> String {
        endpoint_url(&self.base_url, path)
    }

    /// `POST` a JSON body and return the raw response text.
    ///
    /// # Errors
    ///
    /// See [`Transport::send`].
    pub async fn post_json<B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
        bearer: Option<&AuthToken>,
    ) -> Result<String, AuthError> {
        self.send(Method::POST, path, Some(body), bearer).await
    }

    /// `GET` a path and return the raw response text.
    ///
    /// # Errors
    ///
    /// See [`Transport::send`].
    pub async fn get(&self, path: &str, bearer: Option<&AuthToken>) -> Result<String, AuthError> {
        self.send::<()>(Method::GET, path, None, bearer).await
    }

    /// Send one request, attaching `Authorization: Bearer <token>` iff `bearer` is set.
    ///
    /// # Errors
    ///
    /// - [`AuthError::ApiRequest`] when the request cannot be sent or a 2xx body cannot be read.
    /// - [`AuthError::ApiResponse`] for any non-2xx status.
    pub async fn send<B: Serialize + ?Sized>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
        bearer: Option<&AuthToken>,
    ) -> Result<String, AuthError> {
        let url = self.url(path);
        let mut request = self.http.request(method.clone(), &url);
        if let Some(token) = bearer {
            request = request.header(AUTHORIZATION, token.header_value());
        }
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send().await.map_err(|e| AuthError::ApiRequest(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            // The status is the signal; an unreadable error body must not hide it.
            let body = response.text().await.unwrap_or_default();
            tracing::debug!(%method, %path, status = status.as_u16(), "request failed");
            return Err(AuthError::ApiResponse { status: status.as_u16(), body });
        }

        let text = response.text().await.map_err(|e| AuthError::ApiRequest(e.to_string()))?;

        tracing::debug!(%method, %path, status = status.as_u16(), authenticated = bearer.is_some(), "request ok");
        Ok(text)
    }
}

fn endpoint_url(base_url: &str, path: &str) -> String {
    if path.starts_with('/') { format!("{base_url}{path}") } else { format!("{base_url}/{path}") }
}

#[cfg(test)]
#[path = "transport_test.rs"]
mod tests;
