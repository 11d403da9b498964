//! Client configuration parsed from environment variables.

use crate::types::AuthError;

pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8080";
pub const DEFAULT_LOGIN_PATH: &str = "/login";
pub const DEFAULT_PROTECTED_PATHS: &str = "/dashboard";
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransportTimeouts {
    pub request_secs: u64,
    pub connect_secs: u64,
}

impl Default for TransportTimeouts {
    fn default() -> Self {
        Self { request_secs: DEFAULT_REQUEST_TIMEOUT_SECS, connect_secs: DEFAULT_CONNECT_TIMEOUT_SECS }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub base_url: String,
    pub login_path: String,
    pub protected_paths: Vec<String>,
    pub timeouts: TransportTimeouts,
}

impl ClientConfig {
    /// Build typed client config from environment variables.
    ///
    /// Optional:
    /// - `AUTH_BASE_URL`: default `http://127.0.0.1:8080`
    /// - `AUTH_LOGIN_PATH`: default `/login`
    /// - `AUTH_PROTECTED_PATHS`: comma-separated, default `/dashboard`
    /// - `AUTH_REQUEST_TIMEOUT_SECS`: default 30
    /// - `AUTH_CONNECT_TIMEOUT_SECS`: default 10
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::ConfigParse`] if the base URL or a path is invalid.
    pub fn from_env() -> Result<Self, AuthError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`ClientConfig::from_env`] with an injectable key lookup.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::ConfigParse`] if the base URL or a path is invalid.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, AuthError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let base_url = normalize_base_url(&lookup("AUTH_BASE_URL").unwrap_or_else(|| DEFAULT_BASE_URL.to_string()))?;
        let login_path = parse_path(&lookup("AUTH_LOGIN_PATH").unwrap_or_else(|| DEFAULT_LOGIN_PATH.to_string()))?;
        let protected_paths =
            parse_path_list(&lookup("AUTH_PROTECTED_PATHS").unwrap_or_else(|| DEFAULT_PROTECTED_PATHS.to_string()))?;
        let timeouts = TransportTimeouts {
            request_secs: parse_u64(lookup("AUTH_REQUEST_TIMEOUT_SECS"), DEFAULT_REQUEST_TIMEOUT_SECS),
            connect_secs: parse_u64(lookup("AUTH_CONNECT_TIMEOUT_SECS"), DEFAULT_CONNECT_TIMEOUT_SECS),
        };

        Ok(Self { base_url, login_path, protected_paths, timeouts })
    }

    /// Replace the base URL, applying the same validation as `AUTH_BASE_URL`.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::ConfigParse`] if the URL is not http(s).
    pub fn with_base_url(mut self, raw: &str) -> Result<Self, AuthError> {
        self.base_url = normalize_base_url(raw)?;
        Ok(self)
    }
}

fn parse_u64(raw: Option<String>, default: u64) -> u64 {
    raw.and_then(|v| v.trim().parse::<u64>().ok()).unwrap_or(default)
}

pub(crate) fn normalize_base_url(raw: &str) -> Result<String, AuthError> {
    let trimmed = raw.trim();
    let scheme = if trimmed.starts_with("https://") {
        "https://"
    } else if trimmed.starts_with("http://") {
        "http://"
    } else {
        return Err(AuthError::ConfigParse(format!("AUTH_BASE_URL must start with http:// or https://: {raw}")));
    };
    let rest = trimmed[scheme.len()..].trim_end_matches('/');
    if rest.is_empty() {
        return Err(AuthError::ConfigParse(format!("AUTH_BASE_URL has no host: {raw}")));
    }
    Ok(format!("{scheme}{rest}"))
}

fn parse_path(raw: &str) -> Result<String, AuthError> {
    let trimmed = raw.trim();
    if !trimmed.starts_with('/') {
        return Err(AuthError::ConfigParse(format!("path must start with '/': {trimmed}")));
    }
    Ok(trimmed.to_string())
}

fn parse_path_list(raw: &str) -> Result<Vec<String>, AuthError> {
    raw.split(',')
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .map(parse_path)
        .collect()
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
