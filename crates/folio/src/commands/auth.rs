//! `folio login`, `folio logout` and `folio whoami` command implementations.

use clap::Args;
use folio_api::{ContentApi, Credentials, Session, SessionStore};
use folio_config::LoginRole;

use crate::commands::serve::ensure_project_dir;
use crate::context::ApiArgs;
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the login command.
#[derive(Args)]
pub(crate) struct LoginArgs {
    /// Account name.
    #[arg(short, long, env = "FOLIO_USERNAME")]
    username: String,

    /// Account password.
    #[arg(long, env = "FOLIO_PASSWORD", hide_env_values = true)]
    password: String,

    /// Login endpoint: admin or reader (default: from config).
    #[arg(long)]
    role: Option<LoginRole>,

    #[command(flatten)]
    api: ApiArgs,
}

impl LoginArgs {
    /// Execute the login command.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();
        let context = self.api.context()?;
        let role = self.role.unwrap_or(context.config.api.login_role);

        ensure_project_dir(&context.config.project_dir)?;
        let credentials = Credentials {
            username: self.username,
            password: self.password,
        };
        let session = login(&context.client(), &context.store, role, &credentials)?;

        output.success(&format!("Logged in as {}", describe(&session)));
        output.info(&format!(
            "Session saved to {}",
            context.store.path().display()
        ));
        Ok(())
    }
}

/// Authenticate and persist the session.
fn login(
    api: &dyn ContentApi,
    store: &SessionStore,
    role: LoginRole,
    credentials: &Credentials,
) -> Result<Session, CliError> {
    let session = api.login(role, credentials)?;
    store.save(&session)?;
    Ok(session)
}

fn describe(session: &Session) -> String {
    let name = session.user.username.as_deref().unwrap_or("unknown user");
    match session.role() {
        Some(role) => format!("{name} ({role})"),
        None => name.to_owned(),
    }
}

/// Arguments for the logout command.
#[derive(Args)]
pub(crate) struct LogoutArgs {
    #[command(flatten)]
    api: ApiArgs,
}

impl LogoutArgs {
    /// Execute the logout command.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();
        let context = self.api.context()?;
        if context.store.load().is_none() {
            output.warning("Not logged in.");
        }
        context.store.clear()?;
        output.success("Logged out.");
        Ok(())
    }
}

/// Arguments for the whoami command.
#[derive(Args)]
pub(crate) struct WhoamiArgs {
    #[command(flatten)]
    api: ApiArgs,
}

impl WhoamiArgs {
    /// Execute the whoami command.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();
        let context = self.api.context()?;
        match context.store.load() {
            Some(session) => output.data(&describe(&session)),
            None => output.warning("Not logged in."),
        }
        Ok(())
    }
}
