//! Command-line interface
//!
//! - `initsu [NAME]` - Create and configure a new project
//! - `initsu templates list` - Show registered starter templates

pub mod commands;
pub mod prompts;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use crate::config::{InitsuConfig, TemplateSettings};
use crate::project::PackageManager;
use crate::template::{ContentFetcher, HttpTransport, TemplateApplier};
use commands::{InitCommand, TemplatesCommand};

/// Top-level arguments
#[derive(Parser, Debug)]
#[command(name = "initsu")]
#[command(version)]
#[command(about = "A CLI tool to initialize and configure projects", long_about = None)]
pub struct Cli {
    /// Subcommand; omitted to create a project
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Project creation arguments
    #[command(flatten)]
    pub init: InitArgs,

    /// Increase log verbosity (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Configuration file (defaults to ./initsu.toml and the user config)
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,
}

/// Subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Manage starter templates
    Templates {
        /// Templates subcommand to execute
        #[command(subcommand)]
        command: TemplatesCommand,
    },
}

/// Arguments for creating a project
#[derive(Args, Debug, Clone, Default)]
pub struct InitArgs {
    /// Name of the project directory
    ///
    /// `templates` is taken by the subcommand and cannot be used as a name.
    #[arg(value_name = "PROJECT_NAME")]
    pub project_name: Option<String>,

    /// Template to apply after scaffolding
    #[arg(short, long)]
    pub template: Option<String>,

    /// Skip package installation
    #[arg(long)]
    pub skip_install: bool,

    /// Skip git initialization
    #[arg(long)]
    pub no_git: bool,

    /// Package manager (skips the prompt)
    #[arg(short, long, value_enum)]
    pub package_manager: Option<PackageManager>,

    /// Create a Next.js project with the usual setup, without prompting
    #[arg(short, long)]
    pub yes: bool,

    /// Start from an empty Next.js app
    #[arg(long)]
    pub empty: bool,

    /// Create an API-only Next.js app
    #[arg(long)]
    pub api: bool,
}

/// Load configuration from `--config` or the standard locations
///
/// # Errors
///
/// Returns an error if a configuration source cannot be parsed.
pub fn load_config(cli: &Cli) -> Result<InitsuConfig> {
    match cli.config {
        Some(ref path) => InitsuConfig::load_from(path),
        None => InitsuConfig::load(),
    }
}

/// Template applier fetching over HTTP per `settings`
///
/// # Errors
///
/// Returns an error if the HTTP client cannot be built.
pub fn template_applier(settings: &TemplateSettings) -> Result<TemplateApplier<HttpTransport>> {
    let transport = HttpTransport::new(settings.request_timeout())
        .context("Failed to build HTTP client")?;

    Ok(TemplateApplier::new(
        settings.registry(),
        ContentFetcher::new(transport, settings.base_url.clone()),
    ))
}

/// Run the parsed command line
///
/// # Errors
///
/// Returns an error if configuration cannot be loaded or the command fails.
pub async fn run(cli: Cli) -> Result<()> {
    let config = load_config(&cli)?;

    match cli.command {
        Some(Commands::Templates { command }) => command.execute(&config),
        None => InitCommand::new(cli.init, config)?.execute().await,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_definition() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_init_args() {
        let cli = Cli::parse_from([
            "initsu",
            "my-app",
            "-t",
            "landing",
            "--skip-install",
            "--no-git",
            "-p",
            "pnpm",
            "-y",
        ]);

        assert!(cli.command.is_none());
        assert_eq!(cli.init.project_name.as_deref(), Some("my-app"));
        assert_eq!(cli.init.template.as_deref(), Some("landing"));
        assert!(cli.init.skip_install);
        assert!(cli.init.no_git);
        assert_eq!(cli.init.package_manager, Some(PackageManager::Pnpm));
        assert!(cli.init.yes);
    }

    #[test]
    fn test_parse_templates_list() {
        let cli = Cli::parse_from(["initsu", "-v", "templates", "list", "--json"]);
        assert_eq!(cli.verbose, 1);
        assert!(matches!(
            cli.command,
            Some(Commands::Templates {
                command: TemplatesCommand::List { json: true }
            })
        ));
    }

    #[test]
    fn test_applier_lists_builtin() {
        let applier = template_applier(&TemplateSettings::default()).unwrap();
        let names: Vec<_> = applier.list_available().into_iter().map(|t| t.name).collect();
        assert_eq!(names, ["default"]);
    }

    #[test]
    fn test_templates_is_not_a_project_name() {
        let err = Cli::try_parse_from(["initsu", "templates"]).unwrap_err();
        assert!(matches!(
            err.kind(),
            clap::error::ErrorKind::MissingSubcommand
                | clap::error::ErrorKind::DisplayHelpOnMissingArgumentOrSubcommand
        ));
    }
}
