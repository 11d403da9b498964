//! authgate — client-side authentication session lifecycle.
//!
//! ARCHITECTURE
//! ============
//! Leaves first: [`transport`] (one HTTP client, one base endpoint) →
//! [`api`] (register/authenticate) → [`session`] (who is logged in) →
//! [`client`] (outbound calls decorated from the session) and [`guard`]
//! (navigation decisions). [`forms`] and [`shell`] are the user-facing flows
//! layered on top; [`state`] wires everything from [`config`].

pub mod api;
pub mod client;
pub mod config;
pub mod forms;
pub mod guard;
pub mod session;
pub mod shell;
pub mod state;
pub mod transport;
pub mod types;

pub use guard::{Decision, RouteGuard};
pub use session::{SessionHandle, SessionSnapshot, SessionStore};
pub use state::AppState;
pub use types::{AuthError, AuthToken, Credentials, LoginOutcome, RegistrationRequest};
