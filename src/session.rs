//! Session store — single owner of "who is logged in, with what token".
//!
//! ARCHITECTURE
//! ============
//! One `SessionStore` is created at startup and shared by `Arc` handle with
//! the session client, the CLI and anything else that needs it. State lives
//! behind a `std::sync::RwLock` that is never held across an `.await`.
//!
//! The outbound "decorator" is not installed anywhere: it is the token slot
//! itself. Callers read [`SessionStore::bearer`] per request, so a new login
//! replaces the decorator by replacing the token, and logout removes it by
//! clearing the slot. There is never more than one.
//!
//! TRADE-OFFS
//! ==========
//! Concurrent logins are last-write-wins. A logout bumps `epoch`; a login
//! whose remote call started in an earlier epoch drops its token and reports
//! [`LoginOutcome::Superseded`] rather than resurrecting a session the user
//! just ended.

use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::api::AuthApi;
use crate::types::{AuthError, AuthToken, Credentials, LoginOutcome, RegistrationRequest};

pub type SessionHandle = Arc<SessionStore>;

/// Read-only view of the session returned by [`SessionStore::current_state`].
#[derive(Clone, Default, PartialEq, Eq)]
pub struct SessionSnapshot {
    pub authenticated: bool,
    pub token: Option<String>,
}

impl SessionSnapshot {
    #[must_use]
    pub fn logged_out() -> Self {
        Self::default()
    }
}

impl fmt::Debug for SessionSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionSnapshot")
            .field("authenticated", &self.authenticated)
            .field("token", &self.token.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

#[derive(Default)]
struct SessionInner {
    token: Option<AuthToken>,
    /// Bumped on every logout/expiry.
    epoch: u64,
    /// Protected-view payloads fetched under the current token, keyed by path.
    views: HashMap<String, serde_json::Value>,
}

impl SessionInner {
    /// Enumerated reset of everything derived from the session.
    fn reset(&mut self) {
        self.token = None;
        self.views.clear();
        self.epoch = self.epoch.wrapping_add(1);
    }
}

pub struct SessionStore {
    api: Arc<dyn AuthApi>,
    inner: RwLock<SessionInner>,
}

impl SessionStore {
    /// New store in the LoggedOut state.
    #[must_use]
    pub fn new(api: Arc<dyn AuthApi>) -> Self {
        Self { api, inner: RwLock::new(SessionInner::default()) }
    }

    fn read(&self) -> RwLockReadGuard<'_, SessionInner> {
        self.inner.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, SessionInner> {
        self.inner.write().unwrap_or_else(PoisonError::into_inner)
    }

    // =========================================================================
    // LOGIN / LOGOUT
    // =========================================================================

    /// Authenticate and, on success, make `token` the session's only bearer.
    ///
    /// Never fails across this boundary: every error becomes a
    /// [`LoginOutcome`] and leaves the session exactly as it was.
    pub async fn login(&self, credentials: &Credentials) -> LoginOutcome {
        let started_epoch = self.read().epoch;

        let token = match self.api.authenticate(credentials).await {
            Ok(token) => token,
            Err(e) => {
                let outcome = LoginOutcome::from_error(&e);
                tracing::warn!(email = %credentials.email, error = %e, code = e.error_code(), "login failed");
                return outcome;
            }
        };

        let mut inner = self.write();
        if inner.epoch != started_epoch {
            tracing::info!(email = %credentials.email, "login superseded by logout; token dropped");
            return LoginOutcome::Superseded;
        }
        let replaced = inner.token.replace(token.clone()).is_some();
        inner.views.clear();
        drop(inner);

        tracing::info!(email = %credentials.email, replaced, "login succeeded");
        LoginOutcome::Success(token)
    }

    /// End the session. Idempotent; always succeeds.
    pub fn logout(&self) {
        let was_authenticated = {
            let mut inner = self.write();
            let was = inner.token.is_some();
            inner.reset();
            was
        };
        tracing::info!(was_authenticated, "logout");
    }

    /// Same reset as [`SessionStore::logout`], for a token the server stopped accepting.
    pub fn expire(&self) {
        self.write().reset();
        tracing::warn!("session expired; token rejected by server");
    }

    /// Expire the session only if `token` is still its bearer, checked and
    /// reset under one write lock.
    ///
    /// Returns `false` when a logout or re-login already replaced `token`.
    pub fn expire_if_current(&self, token: &AuthToken) -> bool {
        {
            let mut inner = self.write();
            if inner.token.as_ref() != Some(token) {
                return false;
            }
            inner.reset();
        }
        tracing::warn!("session expired; token rejected by server");
        true
    }

    /// Forward a registration. Does not authenticate; the caller logs in separately.
    ///
    /// # Errors
    ///
    /// Returns the [`AuthError`] from the auth API unchanged.
    pub async fn register(&self, request: &RegistrationRequest) -> Result<(), AuthError> {
        match self.api.register(request).await {
            Ok(()) => {
                tracing::info!(email = %request.email, "registration succeeded");
                Ok(())
            }
            Err(e) => {
                tracing::warn!(email = %request.email, error = %e, code = e.error_code(), "registration failed");
                Err(e)
            }
        }
    }

    // =========================================================================
    // READS
    // =========================================================================

    #[must_use]
    pub fn current_state(&self) -> SessionSnapshot {
        let inner = self.read();
        SessionSnapshot {
            authenticated: inner.token.is_some(),
            token: inner.token.as_ref().map(|t| t.as_str().to_owned()),
        }
    }

    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.read().token.is_some()
    }

    /// Bearer to attach to the next outbound request, if any.
    #[must_use]
    pub fn bearer(&self) -> Option<AuthToken> {
        self.read().token.clone()
    }

    /// Number of outbound request decorators in effect: 0 or 1.
    #[must_use]
    pub fn active_decorators(&self) -> usize {
        usize::from(self.read().token.is_some())
    }

    // =========================================================================
    // VIEW CACHE
    // =========================================================================

    /// Cache a protected payload, but only if `token` is still the session's bearer.
    ///
    /// Returns `false` when the session moved on (logout or re-login) while
    /// the payload was in flight.
    pub fn cache_view(&self, path: &str, token: &AuthToken, payload: serde_json::Value) -> bool {
        let mut inner = self.write();
        if inner.token.as_ref() != Some(token) {
            return false;
        }
        inner.views.insert(path.to_owned(), payload);
        true
    }

    #[must_use]
    pub fn cached_view(&self, path: &str) -> Option<serde_json::Value> {
        self.read().views.get(path).cloned()
    }

    #[must_use]
    pub fn cached_view_count(&self) -> usize {
        self.read().views.len()
    }
}

#[cfg(test)]
#[path = "session_test.rs"]
mod tests;
