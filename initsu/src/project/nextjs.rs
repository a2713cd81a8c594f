//! `create-next-app` invocation

use super::{Linter, PackageManager};

/// Import alias used when none is customized
pub const DEFAULT_IMPORT_ALIAS: &str = "@/*";

/// Answers shaping the generated Next.js app
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NextjsOptions {
    /// `latest` or a version such as `14.2.3`
    pub version: String,
    /// TypeScript instead of JavaScript
    pub typescript: bool,
    /// Linter to configure
    pub linter: Linter,
    /// Tailwind CSS
    pub tailwind: bool,
    /// Nest application code under `src/`
    pub src_dir: bool,
    /// App Router instead of Pages Router
    pub app_router: bool,
    /// Turbopack for `next dev`
    pub turbopack: bool,
    /// React Compiler
    pub react_compiler: bool,
    /// Package manager for install and scripts
    pub package_manager: PackageManager,
    /// Import alias, e.g. `@/*`
    pub import_alias: String,
}

impl NextjsOptions {
    /// The usual setup: latest Next.js, TypeScript, ESLint, Tailwind, App
    /// Router, no `src/` directory
    #[must_use]
    pub fn preset(package_manager: PackageManager) -> Self {
        Self {
            version: "latest".to_string(),
            typescript: true,
            linter: Linter::Eslint,
            tailwind: true,
            src_dir: false,
            app_router: true,
            turbopack: false,
            react_compiler: false,
            package_manager,
            import_alias: DEFAULT_IMPORT_ALIAS.to_string(),
        }
    }
}

/// Command-line switches passed through to `create-next-app`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScaffoldFlags {
    /// Skip dependency installation
    pub skip_install: bool,
    /// Initialize a git repository
    pub git: bool,
    /// Start from an empty app
    pub empty: bool,
    /// API-only app
    pub api: bool,
}

impl Default for ScaffoldFlags {
    fn default() -> Self {
        Self {
            skip_install: false,
            git: true,
            empty: false,
            api: false,
        }
    }
}

/// Arguments for `npx` creating `project_name` non-interactively
#[must_use]
pub fn create_next_app_args(
    project_name: &str,
    options: &NextjsOptions,
    flags: ScaffoldFlags,
) -> Vec<String> {
    let toggle = |on: bool, yes: &'static str, no: &'static str| if on { yes } else { no };

    let mut args: Vec<String> = vec![
        "-y".into(),
        format!("create-next-app@{}", options.version),
        project_name.into(),
        toggle(options.typescript, "--ts", "--js").into(),
        options.linter.create_next_app_flag().into(),
        toggle(options.tailwind, "--tailwind", "--no-tailwind").into(),
        toggle(options.src_dir, "--src-dir", "--no-src-dir").into(),
        toggle(options.app_router, "--app", "--no-app").into(),
        // Always passed, otherwise create-next-app prompts for it
        "--import-alias".into(),
        options.import_alias.clone(),
        options.package_manager.create_next_app_flag().into(),
    ];

    if flags.skip_install {
        args.push("--skip-install".into());
    }
    if !flags.git {
        args.push("--disable-git".into());
    }

    args.push(toggle(options.turbopack, "--turbopack", "--no-turbopack").into());
    args.push(toggle(options.react_compiler, "--react-compiler", "--no-react-compiler").into());

    if flags.empty {
        args.push("--empty".into());
    }
    if flags.api {
        args.push("--api".into());
    }

    args.push("--yes".into());
    args
}

/// Whether `text` looks like `14`, `14.2` or `14.2.3`
#[must_use]
pub fn is_valid_version(text: &str) -> bool {
    let parts: Vec<&str> = text.trim().split('.').collect();
    (1..=3).contains(&parts.len())
        && parts
            .iter()
            .all(|p| !p.is_empty() && p.chars().all(|c| c.is_ascii_digit()))
}
