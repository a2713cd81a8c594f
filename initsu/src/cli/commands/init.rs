//! Project creation command

use anyhow::{Context, Result};
use console::{style, Emoji};
use indicatif::{ProgressBar, ProgressStyle};
use std::future::Future;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::cli::{prompts, template_applier, InitArgs};
use crate::config::InitsuConfig;
use crate::process::{CommandRunner, Invocation, SystemRunner};
use crate::project::{
    create_next_app_args, is_valid_project_name, ConfigurationManager, ConfigurationOptions,
    NextjsOptions, PackageManager, ProjectKind, ScaffoldFlags, TypescriptProject,
};

static ROCKET: Emoji<'_, '_> = Emoji("🚀 ", "");
static CHECK: Emoji<'_, '_> = Emoji("✅ ", "");

/// Create a new Next.js or TypeScript project
pub struct InitCommand {
    args: InitArgs,
    config: InitsuConfig,
}

impl InitCommand {
    /// Create a new command instance
    ///
    /// # Errors
    ///
    /// Returns an error if a project name was given and is not a valid
    /// directory name.
    pub fn new(args: InitArgs, config: InitsuConfig) -> Result<Self> {
        if let Some(ref name) = args.project_name {
            if !is_valid_project_name(name) {
                anyhow::bail!(
                    "Invalid project name: {name}. Project name can only contain letters, numbers, hyphens, and underscores"
                );
            }
        }

        Ok(Self { args, config })
    }

    /// Execute the command
    ///
    /// # Errors
    ///
    /// Returns an error if a prompt is aborted, the target directory exists,
    /// or any scaffolding step fails.
    pub async fn execute(self) -> Result<()> {
        print_banner();

        let name = match self.args.project_name.clone() {
            Some(name) => name,
            None => prompts::project_name()?,
        };

        let project_dir = PathBuf::from(&name);
        if project_dir.exists() {
            anyhow::bail!(
                "Directory '{name}' already exists. Please choose a different name or remove the existing directory."
            );
        }

        let kind = if self.args.yes {
            ProjectKind::Nextjs
        } else {
            prompts::project_kind()?
        };

        match kind {
            ProjectKind::Nextjs => self.create_nextjs(&name, &project_dir).await,
            ProjectKind::Typescript => self.create_typescript(&name, &project_dir).await,
        }
    }

    async fn create_nextjs(&self, name: &str, project_dir: &Path) -> Result<()> {
        let template = self
            .args
            .template
            .clone()
            .unwrap_or_else(|| self.config.project.default_template.clone());
        let applier = template_applier(&self.config.templates)?;

        // Unknown templates fail before anything is created
        if applier.registry().get(&template).is_none() {
            anyhow::bail!(
                "Template \"{template}\" not found. Run `initsu templates list` to see available templates."
            );
        }

        let use_preset = self.args.yes || prompts::use_preset()?;
        let (options, configuration) = if use_preset {
            let package_manager = match self.args.package_manager {
                Some(pm) => pm,
                None if self.args.yes => PackageManager::Yarn,
                None => prompts::package_manager(PackageManager::Yarn)?,
            };
            (
                NextjsOptions::preset(package_manager),
                ConfigurationOptions::nextjs_preset(),
            )
        } else {
            let options = prompts::nextjs_options(self.args.package_manager)?;
            (options, prompts::nextjs_configuration()?)
        };
        println!();

        tracing::debug!(?options, ?configuration, "Next.js project options");

        let flags = ScaffoldFlags {
            skip_install: self.args.skip_install,
            git: !self.args.no_git,
            empty: self.args.empty,
            api: self.args.api,
        };
        let invocation = Invocation::new("npx", create_next_app_args(name, &options, flags))
            .inherit_stdio()
            .with_timeout(self.config.project.create_timeout());

        println!(
            "{} {} {}",
            style("Creating").green().bold(),
            style("Next.js application:").bold(),
            style(name).cyan().bold()
        );
        SystemRunner
            .run(&invocation)
            .await
            .context("Failed to create Next.js application")?;
        println!("{CHECK}{}", style("Next.js application created").green());

        configure(project_dir, options.package_manager, &configuration).await?;

        with_spinner(
            format!("Applying {template} template..."),
            applier.apply(&template, project_dir, options.src_dir),
        )
        .await
        .with_context(|| format!("Failed to apply {template} template"))?;
        println!("{CHECK}{}", style(format!("{template} template applied")).green());

        print_next_steps(name, &options.package_manager.dev_command());
        Ok(())
    }

    async fn create_typescript(&self, name: &str, project_dir: &Path) -> Result<()> {
        let package_manager = match self.args.package_manager {
            Some(pm) => pm,
            None => prompts::package_manager(PackageManager::Bun)?,
        };
        let configuration = prompts::typescript_configuration()?;
        println!();

        let project = TypescriptProject::new(project_dir, package_manager);
        with_spinner(
            "Creating TypeScript project...".to_string(),
            project.create(&SystemRunner),
        )
        .await
        .context("Failed to create TypeScript project")?;
        println!("{CHECK}{}", style("TypeScript project created").green());

        configure(project_dir, package_manager, &configuration).await?;

        print_next_steps(name, &package_manager.start_command());
        Ok(())
    }
}

/// Set up the selected tools, if any
async fn configure(
    project_dir: &Path,
    package_manager: PackageManager,
    options: &ConfigurationOptions,
) -> Result<()> {
    if *options == ConfigurationOptions::default() {
        return Ok(());
    }

    let manager = ConfigurationManager::new(project_dir, package_manager, SystemRunner);
    let configured = with_spinner(
        "Applying configurations...".to_string(),
        manager.apply(options),
    )
    .await?;

    for tool in configured {
        println!("{CHECK}{}", style(format!("{tool} configured")).green());
    }
    Ok(())
}

/// Run `task` behind a spinner showing `message`
async fn with_spinner<F, T, E>(message: String, task: F) -> Result<T, E>
where
    F: Future<Output = Result<T, E>> + Send,
    T: Send,
    E: Send,
{
    let spinner = ProgressBar::new_spinner();
    if let Ok(spinner_style) = ProgressStyle::default_spinner().template("{spinner:.green} {msg}") {
        spinner.set_style(spinner_style);
    }
    spinner.enable_steady_tick(Duration::from_millis(100));
    spinner.set_message(message);

    let result = task.await;
    spinner.finish_and_clear();
    result
}

fn print_banner() {
    println!();
    println!("{}", style("initsu").cyan().bold());
    println!("{}", style("Setup. Code. Ship.").white().bold());
    println!();
}

fn print_next_steps(name: &str, run_command: &str) {
    println!();
    println!(
        "{}{}",
        ROCKET,
        style(format!(
            "Project {name} has been successfully created and configured!"
        ))
        .green()
        .bold()
    );
    println!();
    println!("{}", style("Next steps:").bold());
    println!();
    println!("  {} {}", style("$").dim(), style(format!("cd {name}")).cyan());
    println!("  {} {}", style("$").dim(), style(run_command).cyan());
    println!();
}
