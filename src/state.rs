//! Shared application state.
//!
//! DESIGN
//! ======
//! `AppState` is built once at startup from [`ClientConfig`] and handed to
//! whatever drives the flows (the CLI shell, tests). It owns the one
//! transport, the one session store and the route guard; there is no ambient
//! singleton. Dropping it tears the session down.

use std::sync::Arc;

use crate::api::HttpAuthApi;
use crate::client::SessionClient;
use crate::config::ClientConfig;
use crate::guard::RouteGuard;
use crate::session::{SessionHandle, SessionStore};
use crate::transport::Transport;
use crate::types::AuthError;

#[derive(Clone)]
pub struct AppState {
    pub session: SessionHandle,
    pub client: SessionClient,
    pub guard: RouteGuard,
}

impl AppState {
    /// Wire transport, auth API, session store, session client and guard.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::HttpClientBuild`] if the HTTP client cannot be built.
    pub fn new(config: &ClientConfig) -> Result<Self, AuthError> {
        let transport = Transport::new(config.base_url.clone(), config.timeouts)?;
        let session: SessionHandle = Arc::new(SessionStore::new(Arc::new(HttpAuthApi::new(transport.clone()))));
        let client = SessionClient::new(transport, Arc::clone(&session));
        let guard = RouteGuard::new(config.login_path.clone(), config.protected_paths.clone());
        Ok(Self { session, client, guard })
    }
}
