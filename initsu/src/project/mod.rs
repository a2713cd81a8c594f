//! Project creation: generators, package managers and tooling setup
//!
//! Everything here sequences third-party CLIs through a
//! [`CommandRunner`](crate::process::CommandRunner) and edits a few
//! configuration files. File contents are treated as opaque text, except
//! `package.json`, which is merged key by key.

pub mod configure;
pub mod nextjs;
pub mod package_json;
pub mod typescript;

use serde::{Deserialize, Serialize};
use std::fmt;

pub use configure::{ConfigurationManager, ConfigurationOptions};
pub use nextjs::{create_next_app_args, NextjsOptions, ScaffoldFlags};
pub use package_json::PackageJson;
pub use typescript::TypescriptProject;

/// JavaScript package manager used for the generated project
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum PackageManager {
    /// npm
    #[default]
    Npm,
    /// pnpm
    Pnpm,
    /// Yarn
    Yarn,
    /// Bun
    Bun,
}

impl PackageManager {
    /// Every supported manager, in prompt order
    pub const ALL: [Self; 4] = [Self::Npm, Self::Pnpm, Self::Yarn, Self::Bun];

    /// Executable name
    #[must_use]
    pub const fn program(self) -> &'static str {
        match self {
            Self::Npm => "npm",
            Self::Pnpm => "pnpm",
            Self::Yarn => "yarn",
            Self::Bun => "bun",
        }
    }

    /// Arguments adding `packages`, as dev dependencies when `dev` is set
    #[must_use]
    pub fn add_args(self, packages: &[&str], dev: bool) -> Vec<String> {
        let (verb, dev_flag) = match self {
            Self::Npm => ("install", "--save-dev"),
            Self::Pnpm => ("add", "--save-dev"),
            Self::Yarn | Self::Bun => ("add", "--dev"),
        };

        let mut args = vec![verb.to_string()];
        if dev {
            args.push(dev_flag.to_string());
        }
        args.extend(packages.iter().map(ToString::to_string));
        args
    }

    /// Arguments installing the lockfile's dependencies
    #[must_use]
    pub fn install_args(self) -> Vec<String> {
        vec!["install".to_string()]
    }

    /// `create-next-app` flag selecting this manager
    #[must_use]
    pub const fn create_next_app_flag(self) -> &'static str {
        match self {
            Self::Npm => "--use-npm",
            Self::Pnpm => "--use-pnpm",
            Self::Yarn => "--use-yarn",
            Self::Bun => "--use-bun",
        }
    }

    /// Command starting the Next.js dev server
    #[must_use]
    pub fn dev_command(self) -> String {
        match self {
            Self::Npm => "npm run dev".to_string(),
            other => format!("{} dev", other.program()),
        }
    }

    /// Command running a plain TypeScript project
    #[must_use]
    pub fn start_command(self) -> String {
        match self {
            Self::Npm => "npm run start".to_string(),
            Self::Bun => "bun run index.ts".to_string(),
            other => format!("{} start", other.program()),
        }
    }
}

impl fmt::Display for PackageManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.program())
    }
}

/// Linter wired up by `create-next-app`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Linter {
    /// ESLint
    #[default]
    Eslint,
    /// Biome
    Biome,
    /// No linter
    None,
}

impl Linter {
    /// `create-next-app` flag selecting this linter
    #[must_use]
    pub const fn create_next_app_flag(self) -> &'static str {
        match self {
            Self::Eslint => "--eslint",
            Self::Biome => "--biome",
            Self::None => "--no-linter",
        }
    }
}

/// Kind of project to create
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProjectKind {
    /// Next.js application via `create-next-app`
    Nextjs,
    /// Plain TypeScript package via `bun init`
    Typescript,
}

/// Whether `name` is usable as a project directory name
///
/// Letters, digits, hyphens and underscores only.
#[must_use]
pub fn is_valid_project_name(name: &str) -> bool {
    !name.is_empty()
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}
