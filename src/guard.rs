//! Route guard — navigation decisions for protected destinations.
//!
//! SYSTEM CONTEXT
//! ==============
//! Every navigation consults [`RouteGuard::check`]; protected destinations
//! apply identical unauthenticated redirect behavior via [`RouteGuard::decide`].
//! Pure functions over a [`SessionSnapshot`]: no I/O, no side effects, never fail.

use crate::session::SessionSnapshot;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decision {
    Allow,
    Redirect { to: String },
}

impl Decision {
    #[must_use]
    pub fn is_allowed(&self) -> bool {
        matches!(self, Self::Allow)
    }
}

#[derive(Debug, Clone)]
pub struct RouteGuard {
    login_path: String,
    protected: Vec<String>,
}

impl RouteGuard {
    #[must_use]
    pub fn new(login_path: impl Into<String>, protected: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self {
            login_path: login_path.into(),
            protected: protected
                .into_iter()
                .map(|p| {
                    let p: String = p.into();
                    normalize(&p).to_owned()
                })
                .collect(),
        }
    }

    #[must_use]
    pub fn login_path(&self) -> &str {
        &self.login_path
    }

    /// Allow iff authenticated; otherwise redirect to the login path.
    #[must_use]
    pub fn decide(&self, session: &SessionSnapshot) -> Decision {
        if session.authenticated { Decision::Allow } else { Decision::Redirect { to: self.login_path.clone() } }
    }

    /// Whether `path` (or one of its parents) is a protected destination.
    #[must_use]
    pub fn is_protected(&self, path: &str) -> bool {
        let path = normalize(path);
        self.protected.iter().any(|p| {
            path == p || (path.starts_with(p.as_str()) && (p == "/" || path[p.len()..].starts_with('/')))
        })
    }

    /// Navigation decision for `path`: unprotected paths are always allowed.
    #[must_use]
    pub fn check(&self, path: &str, session: &SessionSnapshot) -> Decision {
        if self.is_protected(path) { self.decide(session) } else { Decision::Allow }
    }
}

/// Strip query/fragment and a trailing `/` (except for the root).
fn normalize(path: &str) -> &str {
    let path = path.split(['?', '#']).next().unwrap_or(path);
    let trimmed = path.trim_end_matches('/');
    if trimmed.is_empty() { "/" } else { trimmed }
}

#[cfg(test)]
#[path = "guard_test.rs"]
mod tests;
