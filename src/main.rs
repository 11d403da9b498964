use std::io::{self, Write};

use authgate::config::ClientConfig;
use authgate::forms;
use authgate::shell::{Shell, ShellCommand};
use authgate::{AppState, AuthError};
use clap::{Parser, Subcommand};

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error(transparent)]
    Auth(#[from] AuthError),
    #[error("{0}")]
    Invalid(&'static str),
    #[error("login failed")]
    LoginFailed,
    #[error("io error: {0}")]
    Io(#[from] io::Error),
}

#[derive(Parser, Debug)]
#[command(name = "authgate", about = "Signup, login and guarded navigation against an auth server")]
struct Cli {
    /// Auth server base URL; wins over the config defaults.
    #[arg(long, env = "AUTH_BASE_URL")]
    base_url: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Register a new account (does not log in).
    Signup {
        #[arg(long)]
        full_name: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
        #[arg(long)]
        confirm_password: String,
    },
    /// Log in, then navigate to each `--visit` path.
    Login {
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
        #[arg(long)]
        visit: Vec<String>,
    },
    /// Interactive shell reading commands from stdin.
    Shell,
}

#[tokio::main]
async fn main() -> Result<(), CliError> {
    tracing_subscriber::fmt().with_writer(io::stderr).init();
    if let Err(e) = dotenvy::dotenv() {
        tracing::debug!(error = %e, "no .env file loaded");
    }

    let cli = Cli::parse();
    let mut config = ClientConfig::from_env()?;
    if let Some(base_url) = cli.base_url.as_deref() {
        config = config.with_base_url(base_url)?;
    }
    tracing::info!(base_url = %config.base_url, "authgate starting");

    let mut shell = Shell::new(AppState::new(&config)?);
    let mut out = io::stdout().lock();

    match cli.command {
        Command::Signup { full_name, email, password, confirm_password } => {
            let request =
                forms::validate_signup(&full_name, &email, &password, &confirm_password).map_err(CliError::Invalid)?;
            shell.state().session.register(&request).await?;
            writeln!(out, "{}", forms::SIGNUP_OK_NOTICE)?;
        }
        Command::Login { email, password, visit } => {
            shell.execute(ShellCommand::Login { email, password }, &mut out).await?;
            if !shell.state().session.is_authenticated() {
                return Err(CliError::LoginFailed);
            }
            for path in visit {
                shell.execute(ShellCommand::Visit { path }, &mut out).await?;
            }
        }
        Command::Shell => {
            writeln!(out, "{}", authgate::shell::HELP)?;
            out.flush()?;
            let stdin = tokio::io::BufReader::new(tokio::io::stdin());
            shell.run(stdin, &mut out).await?;
        }
    }

    Ok(())
}
