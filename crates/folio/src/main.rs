//! Folio CLI.
//!
//! Provides commands for:
//! - `serve`: Start the reader server
//! - `login`, `logout`, `whoami`: Manage the stored session
//! - `subjects`, `main-titles`, `sub-titles`, `outline`, `render`: Browse content
//! - `subject`, `main-title`, `sub-title`, `component`: Administer content

mod commands;
mod context;
mod error;
mod output;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use commands::{
    ComponentCommand, LoginArgs, LogoutArgs, MainTitleCommand, MainTitlesArgs, OutlineArgs,
    RenderArgs, ServeArgs, SubTitleCommand, SubTitlesArgs, SubjectCommand, SubjectsArgs,
    WhoamiArgs,
};
use output::Output;

/// Folio - subject content browser and administration tool.
#[derive(Parser)]
#[command(name = "folio", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the reader server.
    Serve(ServeArgs),
    /// Log in and store the session.
    Login(LoginArgs),
    /// Forget the stored session.
    Logout(LogoutArgs),
    /// Show the logged-in user.
    Whoami(WhoamiArgs),
    /// List subjects.
    Subjects(SubjectsArgs),
    /// List the main titles of a subject.
    MainTitles(MainTitlesArgs),
    /// List the sub titles of a main title.
    SubTitles(SubTitlesArgs),
    /// Show a subject's reader outline.
    Outline(OutlineArgs),
    /// Render a sub title's components as HTML.
    Render(RenderArgs),
    /// Subject administration.
    #[command(subcommand)]
    Subject(SubjectCommand),
    /// Main title administration.
    #[command(subcommand)]
    MainTitle(MainTitleCommand),
    /// Sub title administration.
    #[command(subcommand)]
    SubTitle(SubTitleCommand),
    /// Page component administration.
    #[command(subcommand)]
    Component(ComponentCommand),
}

fn main() {
    let cli = Cli::parse();
    let output = Output::new();

    // Check if verbose flag is set for serve command
    let verbose = matches!(&cli.command, Commands::Serve(args) if args.verbose);

    // --verbose enables INFO level, otherwise use RUST_LOG or default to WARN
    let filter = if verbose {
        EnvFilter::new("info")
    } else {
        EnvFilter::from_default_env()
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let result = match cli.command {
        Commands::Serve(args) => match tokio::runtime::Runtime::new() {
            Ok(rt) => rt.block_on(args.execute()),
            Err(e) => Err(e.into()),
        },
        Commands::Login(args) => args.execute(),
        Commands::Logout(args) => args.execute(),
        Commands::Whoami(args) => args.execute(),
        Commands::Subjects(args) => args.execute(),
        Commands::MainTitles(args) => args.execute(),
        Commands::SubTitles(args) => args.execute(),
        Commands::Outline(args) => args.execute(),
        Commands::Render(args) => args.execute(),
        Commands::Subject(cmd) => cmd.execute(),
        Commands::MainTitle(cmd) => cmd.execute(),
        Commands::SubTitle(cmd) => cmd.execute(),
        Commands::Component(cmd) => cmd.execute(),
    };

    if let Err(err) = result {
        output.error(&format!("Error: {err}"));
        if let Some(hint) = err.hint() {
            output.info(hint);
        }
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_nested_admin_command() {
        let cli = Cli::try_parse_from([
            "folio",
            "component",
            "create",
            "--sub-title-id",
            "100",
            "--type",
            "code",
            "--language",
            "rust",
            "--description",
            "fn main() {}",
        ])
        .unwrap();
        assert!(matches!(
            cli.command,
            Commands::Component(ComponentCommand::Create(_))
        ));
    }

    #[test]
    fn test_parse_sub_titles_requires_subject() {
        assert!(Cli::try_parse_from(["folio", "sub-titles", "10"]).is_err());
        assert!(Cli::try_parse_from(["folio", "sub-titles", "1", "10"]).is_ok());
    }
}
