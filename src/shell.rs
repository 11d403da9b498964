//! Line-oriented shell driving the signup/login/navigation flows.
//!
//! Each input line is one user event, handled to completion before the next
//! line is read, so session mutations are serialized the way a UI event loop
//! serializes them.

use std::io::{self, Write};
use std::time::Instant;

use tokio::io::{AsyncBufRead, AsyncBufReadExt};

use crate::forms::{self, Notice};
use crate::guard::Decision;
use crate::state::AppState;
use crate::types::LoginOutcome;

pub const HELP: &str = "\
commands:
  signup <full name> <email> <password> <confirm>
  login <email> <password>
  logout
  visit <path>      navigate; protected paths need a session
  get <path>        fetch a protected JSON resource
  state             show session state
  help
  quit";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShellCommand {
    Signup { full_name: String, email: String, password: String, confirmation: String },
    Login { email: String, password: String },
    Logout,
    Visit { path: String },
    Get { path: String },
    State,
    Help,
    Quit,
}

impl ShellCommand {
    /// Parse one input line. `Ok(None)` for blank lines.
    ///
    /// # Errors
    ///
    /// Returns a usage message for unknown commands or wrong arity.
    pub fn parse(line: &str) -> Result<Option<Self>, String> {
        let words: Vec<&str> = line.split_whitespace().collect();
        let Some((&head, args)) = words.split_first() else {
            return Ok(None);
        };

        let cmd = match (head, args) {
            ("signup", [name @ .., email, password, confirmation]) if !name.is_empty() => Self::Signup {
                full_name: name.join(" "),
                email: (*email).to_owned(),
                password: (*password).to_owned(),
                confirmation: (*confirmation).to_owned(),
            },
            ("signup", _) => return Err("usage: signup <full name> <email> <password> <confirm>".to_owned()),
            ("login", [email, password]) => {
                Self::Login { email: (*email).to_owned(), password: (*password).to_owned() }
            }
            ("login", _) => return Err("usage: login <email> <password>".to_owned()),
            ("logout", []) => Self::Logout,
            ("logout", _) => return Err("usage: logout".to_owned()),
            ("visit", [path]) => Self::Visit { path: (*path).to_owned() },
            ("visit", _) => return Err("usage: visit <path>".to_owned()),
            ("get", [path]) => Self::Get { path: (*path).to_owned() },
            ("get", _) => return Err("usage: get <path>".to_owned()),
            ("state", []) => Self::State,
            ("state", _) => return Err("usage: state".to_owned()),
            ("help", _) => Self::Help,
            ("quit" | "exit", _) => Self::Quit,
            (other, _) => return Err(format!("unknown command: {other} (try `help`)")),
        };
        Ok(Some(cmd))
    }
}

pub struct Shell {
    state: AppState,
    notice: Option<Notice>,
}

impl Shell {
    #[must_use]
    pub fn new(state: AppState) -> Self {
        Self { state, notice: None }
    }

    #[must_use]
    pub fn state(&self) -> &AppState {
        &self.state
    }

    /// The last notice, if it has not auto-dismissed yet.
    #[must_use]
    pub fn visible_notice(&self, now: Instant) -> Option<&Notice> {
        self.notice.as_ref().filter(|n| n.is_visible_at(now))
    }

    fn show(&mut self, out: &mut impl Write, message: &str) -> io::Result<()> {
        self.notice = Some(Notice::new(message));
        writeln!(out, "! {message}")
    }

    /// Read commands until EOF or `quit`.
    ///
    /// # Errors
    ///
    /// Returns I/O errors from reading input or writing output.
    pub async fn run<R, W>(&mut self, input: R, out: &mut W) -> io::Result<()>
    where
        R: AsyncBufRead + Unpin,
        W: Write,
    {
        let mut lines = input.lines();
        while let Some(line) = lines.next_line().await? {
            match ShellCommand::parse(&line) {
                Ok(None) => {}
                Ok(Some(cmd)) => {
                    if !self.execute(cmd, out).await? {
                        break;
                    }
                }
                Err(usage) => writeln!(out, "{usage}")?,
            }
            out.flush()?;
        }
        Ok(())
    }

    /// Handle one command. Returns `false` when the shell should exit.
    ///
    /// # Errors
    ///
    /// Returns I/O errors from writing output.
    pub async fn execute<W: Write>(&mut self, cmd: ShellCommand, out: &mut W) -> io::Result<bool> {
        match cmd {
            ShellCommand::Signup { full_name, email, password, confirmation } => {
                let request = match forms::validate_signup(&full_name, &email, &password, &confirmation) {
                    Ok(request) => request,
                    Err(message) => {
                        self.show(out, message)?;
                        return Ok(true);
                    }
                };
                match self.state.session.register(&request).await {
                    Ok(()) => self.show(out, forms::SIGNUP_OK_NOTICE)?,
                    Err(e) => self.show(out, &format!("{}: {e}", forms::SIGNUP_FAILED_NOTICE))?,
                }
            }
            ShellCommand::Login { email, password } => {
                let credentials = match forms::validate_login(&email, &password) {
                    Ok(credentials) => credentials,
                    Err(message) => {
                        self.show(out, message)?;
                        return Ok(true);
                    }
                };
                match self.state.session.login(&credentials).await {
                    LoginOutcome::Success(_) => writeln!(out, "logged in as {}", credentials.email)?,
                    LoginOutcome::InvalidCredentials => self.show(out, forms::LOGIN_FAILED_NOTICE)?,
                    LoginOutcome::TransportFailure { .. } => self.show(out, forms::LOGIN_UNAVAILABLE_NOTICE)?,
                    LoginOutcome::Superseded => writeln!(out, "login cancelled")?,
                }
            }
            ShellCommand::Logout => {
                self.state.session.logout();
                self.notice = None;
                writeln!(out, "logged out")?;
            }
            ShellCommand::Visit { path } => self.visit(&path, out).await?,
            ShellCommand::Get { path } => self.get(&path, out).await?,
            ShellCommand::State => {
                let snapshot = self.state.session.current_state();
                writeln!(
                    out,
                    "authenticated={} decorators={} cached_views={}",
                    snapshot.authenticated,
                    self.state.session.active_decorators(),
                    self.state.session.cached_view_count()
                )?;
                if let Some(notice) = self.visible_notice(Instant::now()) {
                    writeln!(out, "notice: {}", notice.message)?;
                }
            }
            ShellCommand::Help => writeln!(out, "{HELP}")?,
            ShellCommand::Quit => return Ok(false),
        }
        Ok(true)
    }

    async fn visit<W: Write>(&self, path: &str, out: &mut W) -> io::Result<()> {
        let snapshot = self.state.session.current_state();
        match self.state.guard.check(path, &snapshot) {
            Decision::Redirect { to } => writeln!(out, "redirect {path} -> {to}"),
            Decision::Allow if self.state.guard.is_protected(path) => {
                writeln!(out, "allow {path}")?;
                self.get(path, out).await
            }
            Decision::Allow => writeln!(out, "allow {path}"),
        }
    }

    async fn get<W: Write>(&self, path: &str, out: &mut W) -> io::Result<()> {
        match self.state.client.get_json(path).await {
            Ok(payload) => writeln!(out, "{payload}"),
            Err(e) => {
                tracing::warn!(%path, error = %e, code = e.error_code(), "protected fetch failed");
                writeln!(out, "error {}: {e}", e.error_code())
            }
        }
    }
}

#[cfg(test)]
#[path = "shell_test.rs"]
mod tests;
