//! Signup and login form flows: input validation and user-facing notices.
//!
//! Validation errors are user-facing messages and never reach the session
//! store. Everything here is synchronous and pure apart from the clock read
//! in [`Notice::new`].

use std::time::{Duration, Instant};

use crate::types::{Credentials, RegistrationRequest};

pub const MIN_FULL_NAME_CHARS: usize = 3;
pub const MIN_PASSWORD_CHARS: usize = 8;

pub const LOGIN_FAILED_NOTICE: &str = "Invalid credentials";
pub const LOGIN_UNAVAILABLE_NOTICE: &str = "Could not reach the server. Try again.";
pub const SIGNUP_FAILED_NOTICE: &str = "Registration failed. Try again.";
pub const SIGNUP_OK_NOTICE: &str = "Account created. You can now log in.";
pub const NOTICE_DISMISS_AFTER: Duration = Duration::from_secs(3);

fn validate_email(raw: &str) -> Result<String, &'static str> {
    let email = raw.trim();
    if email.is_empty() {
        return Err("Enter an email first.");
    }
    match email.split_once('@') {
        Some((local, domain)) if !local.is_empty() && !domain.is_empty() && !domain.contains('@') => {
            Ok(email.to_owned())
        }
        _ => Err("Enter a valid email address."),
    }
}

/// Validate signup input and build the registration body.
///
/// The name and email are trimmed; passwords are taken verbatim.
///
/// # Errors
///
/// Returns the first failing field's message.
pub fn validate_signup(
    full_name: &str,
    email: &str,
    password: &str,
    confirmation: &str,
) -> Result<RegistrationRequest, &'static str> {
    let full_name = full_name.trim();
    if full_name.chars().count() < MIN_FULL_NAME_CHARS {
        return Err("Full name must be at least 3 characters.");
    }
    let email = validate_email(email)?;
    if password.chars().count() < MIN_PASSWORD_CHARS {
        return Err("Password must be at least 8 characters.");
    }
    if password != confirmation {
        return Err("Passwords do not match.");
    }
    Ok(RegistrationRequest { full_name: full_name.to_owned(), email, password: password.to_owned() })
}

/// Validate login input.
///
/// # Errors
///
/// Returns a message when the email is missing/invalid or the password is empty.
pub fn validate_login(email: &str, password: &str) -> Result<Credentials, &'static str> {
    let email = validate_email(email)?;
    if password.is_empty() {
        return Err("Enter your password.");
    }
    Ok(Credentials { email, password: password.to_owned() })
}

// =============================================================================
// NOTICE
// =============================================================================

/// A transient message that auto-dismisses after a fixed delay.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub message: String,
    shown_at: Instant,
    dismiss_after: Duration,
}

impl Notice {
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self::shown_at(message, Instant::now())
    }

    #[must_use]
    pub fn shown_at(message: impl Into<String>, shown_at: Instant) -> Self {
        Self { message: message.into(), shown_at, dismiss_after: NOTICE_DISMISS_AFTER }
    }

    #[must_use]
    pub fn is_visible_at(&self, now: Instant) -> bool {
        now.saturating_duration_since(self.shown_at) < self.dismiss_after
    }

    #[must_use]
    pub fn dismiss_after(&self) -> Duration {
        self.dismiss_after
    }
}

#[cfg(test)]
#[path = "forms_test.rs"]
mod tests;
