//! Interactive questions
//!
//! Each function asks one group of questions and returns the answers as the
//! option types the project module consumes.

use anyhow::Result;
use dialoguer::{theme::ColorfulTheme, Confirm, Input, Select};

use crate::project::nextjs::{is_valid_version, DEFAULT_IMPORT_ALIAS};
use crate::project::{
    is_valid_project_name, ConfigurationOptions, Linter, NextjsOptions, PackageManager, ProjectKind,
};

/// Project name, validated
///
/// # Errors
///
/// Returns an error if the terminal is not interactive or input is aborted.
pub fn project_name() -> Result<String> {
    let name: String = Input::with_theme(&ColorfulTheme::default())
        .with_prompt("What is your project name?")
        .validate_with(|input: &String| -> Result<(), &str> {
            let input = input.trim();
            if input.is_empty() {
                Err("Project name is required")
            } else if !is_valid_project_name(input) {
                Err("Project name can only contain letters, numbers, hyphens, and underscores")
            } else {
                Ok(())
            }
        })
        .interact_text()?;

    Ok(name.trim().to_string())
}

/// Next.js or plain TypeScript
///
/// # Errors
///
/// Returns an error if the terminal is not interactive or input is aborted.
pub fn project_kind() -> Result<ProjectKind> {
    let choice = Select::with_theme(&ColorfulTheme::default())
        .with_prompt("What type of project would you like to create?")
        .items(&["Next.js Project", "TypeScript Project"])
        .default(0)
        .interact()?;

    Ok(if choice == 0 {
        ProjectKind::Nextjs
    } else {
        ProjectKind::Typescript
    })
}

/// Whether to go with the usual Next.js setup
///
/// # Errors
///
/// Returns an error if the terminal is not interactive or input is aborted.
pub fn use_preset() -> Result<bool> {
    confirm("Should I cook up the usual?", true)
}

/// Package manager, with `default` preselected
///
/// # Errors
///
/// Returns an error if the terminal is not interactive or input is aborted.
pub fn package_manager(default: PackageManager) -> Result<PackageManager> {
    let labels: Vec<String> = PackageManager::ALL
        .iter()
        .map(|pm| {
            if *pm == default && default == PackageManager::Bun {
                format!("{pm} (recommended)")
            } else {
                pm.to_string()
            }
        })
        .collect();
    let default_index = PackageManager::ALL
        .iter()
        .position(|pm| *pm == default)
        .unwrap_or(0);

    let choice = Select::with_theme(&ColorfulTheme::default())
        .with_prompt("Which package manager would you like to use?")
        .items(&labels)
        .default(default_index)
        .interact()?;

    Ok(PackageManager::ALL[choice])
}

/// Every Next.js option, asked one by one
///
/// A package manager given on the command line is not asked again.
///
/// # Errors
///
/// Returns an error if the terminal is not interactive or input is aborted.
pub fn nextjs_options(package_manager: Option<PackageManager>) -> Result<NextjsOptions> {
    let version = nextjs_version()?;
    let package_manager = match package_manager {
        Some(pm) => pm,
        None => self::package_manager(PackageManager::Npm)?,
    };
    let typescript = confirm("Would you like to use TypeScript?", true)?;
    let linter = linter()?;
    let tailwind = confirm("Would you like to use Tailwind CSS?", true)?;
    let src_dir = confirm("Would you like to use `src/` directory?", true)?;
    let app_router = confirm("Would you like to use App Router? (recommended)", true)?;
    let turbopack = confirm("Would you like to enable Turbopack for development?", false)?;
    let react_compiler = confirm("Would you like to enable the React Compiler?", false)?;

    let import_alias = if confirm(
        "Would you like to customize the default import alias (@/*)?",
        false,
    )? {
        Input::with_theme(&ColorfulTheme::default())
            .with_prompt("What import alias would you like configured?")
            .default(DEFAULT_IMPORT_ALIAS.to_string())
            .interact_text()?
    } else {
        DEFAULT_IMPORT_ALIAS.to_string()
    };

    Ok(NextjsOptions {
        version,
        typescript,
        linter,
        tailwind,
        src_dir,
        app_router,
        turbopack,
        react_compiler,
        package_manager,
        import_alias,
    })
}

/// Tooling for a Next.js project
///
/// # Errors
///
/// Returns an error if the terminal is not interactive or input is aborted.
pub fn nextjs_configuration() -> Result<ConfigurationOptions> {
    Ok(ConfigurationOptions {
        prettier: confirm("Would you like to configure Prettier?", true)?,
        eslint: false,
        husky: confirm("Would you like to set up Husky for git hooks?", true)?,
        shadcn: confirm("Would you like to install shadcn/ui?", true)?,
    })
}

/// Tooling for a plain TypeScript project
///
/// # Errors
///
/// Returns an error if the terminal is not interactive or input is aborted.
pub fn typescript_configuration() -> Result<ConfigurationOptions> {
    Ok(ConfigurationOptions {
        prettier: confirm("Would you like to configure Prettier?", true)?,
        eslint: confirm("Would you like to configure ESLint?", true)?,
        husky: confirm("Would you like to set up Husky for git hooks?", true)?,
        shadcn: false,
    })
}

fn nextjs_version() -> Result<String> {
    const VERSIONS: &[(&str, &str)] = &[
        ("Latest (recommended)", "latest"),
        ("Next.js 15", "15"),
        ("Next.js 14", "14"),
        ("Next.js 13", "13"),
        ("Custom version", "custom"),
    ];

    let labels: Vec<&str> = VERSIONS.iter().map(|(label, _)| *label).collect();
    let choice = Select::with_theme(&ColorfulTheme::default())
        .with_prompt("Which Next.js version would you like to use?")
        .items(&labels)
        .default(0)
        .interact()?;

    let (_, version) = VERSIONS[choice];
    if version != "custom" {
        return Ok(version.to_string());
    }

    let custom: String = Input::with_theme(&ColorfulTheme::default())
        .with_prompt("Enter the Next.js version (e.g., 14.2.3)")
        .validate_with(|input: &String| -> Result<(), &str> {
            if input.trim().is_empty() {
                Err("Version is required")
            } else if !is_valid_version(input) {
                Err("Please enter a valid version format (e.g., 14.2.3 or 14.2 or 14)")
            } else {
                Ok(())
            }
        })
        .interact_text()?;

    Ok(custom.trim().to_string())
}

fn linter() -> Result<Linter> {
    const LINTERS: [(&str, Linter); 3] = [
        ("ESLint", Linter::Eslint),
        ("Biome", Linter::Biome),
        ("None", Linter::None),
    ];

    let labels: Vec<&str> = LINTERS.iter().map(|(label, _)| *label).collect();
    let choice = Select::with_theme(&ColorfulTheme::default())
        .with_prompt("Which linter would you like to use?")
        .items(&labels)
        .default(0)
        .interact()?;

    Ok(LINTERS[choice].1)
}

fn confirm(prompt: &str, default: bool) -> Result<bool> {
    Ok(Confirm::with_theme(&ColorfulTheme::default())
        .with_prompt(prompt)
        .default(default)
        .interact()?)
}
