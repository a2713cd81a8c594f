//! Formatter, linter and git-hook setup for a generated project

use anyhow::{Context, Result};
use serde_json::{json, Value};
use std::fs;
use std::path::{Path, PathBuf};

use super::package_json::PackageJson;
use super::PackageManager;
use crate::process::{CommandRunner, Invocation};

const PRETTIER_IGNORE: &str = "node_modules
.next
out
dist
build
*.log
.env*
.vercel
.DS_Store";

const ESLINT_FLAT_CONFIG: &str = r"import js from '@eslint/js';
import tseslint from 'typescript-eslint';

export default [
  js.configs.recommended,
  ...tseslint.configs.recommended,
  {
    languageOptions: {
      parser: tseslint.parser,
      parserOptions: {
        project: './tsconfig.json',
        ecmaVersion: 2022,
        sourceType: 'module',
      },
    },
    plugins: {
      '@typescript-eslint': tseslint.plugin,
    },
    rules: {
      '@typescript-eslint/no-unused-vars': 'error',
      '@typescript-eslint/explicit-function-return-type': 'warn',
      '@typescript-eslint/no-explicit-any': 'warn',
    },
  },
  {
    ignores: [
      'node_modules/**',
      'dist/**',
      'build/**',
      '*.js',
      '*.d.ts',
    ],
  },
];
";

const PRE_COMMIT_HOOK: &str = r#"#!/usr/bin/env sh
. "$(dirname -- "$0")/_/husky.sh"

npx lint-staged
"#;

/// Tooling to set up
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ConfigurationOptions {
    /// Prettier with config, ignore file and format scripts
    pub prettier: bool,
    /// ESLint flat config for TypeScript
    pub eslint: bool,
    /// Husky pre-commit hook running lint-staged
    pub husky: bool,
    /// shadcn/ui initialization
    pub shadcn: bool,
}

impl ConfigurationOptions {
    /// The usual Next.js tooling: Prettier, Husky, shadcn/ui
    #[must_use]
    pub const fn nextjs_preset() -> Self {
        Self {
            prettier: true,
            eslint: false,
            husky: true,
            shadcn: true,
        }
    }
}

/// Applies tooling configuration inside an existing project
pub struct ConfigurationManager<R> {
    project_path: PathBuf,
    package_manager: PackageManager,
    runner: R,
}

impl<R: CommandRunner> ConfigurationManager<R> {
    /// Manager for the project at `project_path`
    #[must_use]
    pub fn new(project_path: &Path, package_manager: PackageManager, runner: R) -> Self {
        Self {
            project_path: project_path.to_path_buf(),
            package_manager,
            runner,
        }
    }

    /// Set up the selected tools, in order: Prettier, ESLint, Husky, shadcn/ui
    ///
    /// Returns the names of the tools configured.
    ///
    /// # Errors
    ///
    /// Stops at the first tool whose install command or file write fails.
    pub async fn apply(&self, options: &ConfigurationOptions) -> Result<Vec<&'static str>> {
        let mut configured = Vec::new();

        if options.prettier {
            self.setup_prettier().await.context("Failed to set up Prettier")?;
            configured.push("Prettier");
        }
        if options.eslint {
            self.setup_eslint().await.context("Failed to set up ESLint")?;
            configured.push("ESLint");
        }
        if options.husky {
            self.setup_husky().await.context("Failed to set up Husky")?;
            configured.push("Husky");
        }
        if options.shadcn {
            self.setup_shadcn().await.context("Failed to set up shadcn/ui")?;
            configured.push("shadcn/ui");
        }

        Ok(configured)
    }

    async fn setup_prettier(&self) -> Result<()> {
        self.add_dev_packages(&["prettier", "eslint-config-prettier", "eslint-plugin-prettier"])
            .await?;

        let config = json!({
            "semi": true,
            "trailingComma": "es5",
            "singleQuote": true,
            "printWidth": 80,
            "tabWidth": 2,
            "useTabs": false,
        });
        self.write_json(".prettierrc", &config)?;
        self.write(".prettierignore", PRETTIER_IGNORE)?;

        let mut pkg = PackageJson::load(&self.project_path)?;
        pkg.merge_scripts([
            ("format", "prettier --write ."),
            ("format:check", "prettier --check ."),
        ]);
        pkg.save()?;

        self.extend_legacy_eslint_config()
    }

    async fn setup_eslint(&self) -> Result<()> {
        self.add_dev_packages(&[
            "eslint",
            "@typescript-eslint/parser",
            "@typescript-eslint/eslint-plugin",
            "@eslint/js",
            "typescript-eslint",
        ])
        .await?;

        self.write("eslint.config.js", ESLINT_FLAT_CONFIG)?;

        let mut pkg = PackageJson::load(&self.project_path)?;
        pkg.merge_scripts([
            ("lint", "eslint . && prettier --check ."),
            ("lint:fix", "eslint . --fix && prettier --write ."),
        ]);
        pkg.save()
    }

    async fn setup_husky(&self) -> Result<()> {
        self.add_dev_packages(&["husky", "lint-staged"]).await?;
        self.npx(&["husky", "init"]).await?;

        fs::create_dir_all(self.project_path.join(".husky"))
            .context("Failed to create .husky directory")?;
        self.write(".husky/pre-commit", PRE_COMMIT_HOOK)?;

        let mut pkg = PackageJson::load(&self.project_path)?;
        pkg.set(
            "lint-staged",
            json!({
                "*.{js,jsx,ts,tsx}": ["eslint --cache --fix", "prettier --write"],
                "*.{json,css,md}": ["prettier --write"],
            }),
        );
        pkg.save()
    }

    async fn setup_shadcn(&self) -> Result<()> {
        self.npx(&["shadcn@latest", "init", "--yes"]).await
    }

    /// Add `"prettier"` to `.eslintrc.json` extends, if that file exists
    fn extend_legacy_eslint_config(&self) -> Result<()> {
        let path = self.project_path.join(".eslintrc.json");
        if !path.exists() {
            return Ok(());
        }

        let text = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let mut config: Value = serde_json::from_str(&text)
            .with_context(|| format!("Failed to parse {}", path.display()))?;

        let Some(object) = config.as_object_mut() else {
            anyhow::bail!("{} is not a JSON object", path.display());
        };

        // `extends` may be a single string or a list
        let mut extends = match object.remove("extends") {
            Some(Value::Array(items)) => items,
            Some(Value::String(single)) => vec![Value::String(single)],
            _ => Vec::new(),
        };
        if !extends.iter().any(|v| v == "prettier") {
            extends.push(Value::String("prettier".to_string()));
        }
        object.insert("extends".to_string(), Value::Array(extends));

        self.write_json(".eslintrc.json", &config)
    }

    async fn add_dev_packages(&self, packages: &[&str]) -> Result<()> {
        let invocation = Invocation::new(
            self.package_manager.program(),
            self.package_manager.add_args(packages, true),
        )
        .in_dir(&self.project_path);

        self.runner.run(&invocation).await
    }

    async fn npx(&self, args: &[&str]) -> Result<()> {
        let invocation = Invocation::new("npx", args.iter().copied()).in_dir(&self.project_path);
        self.runner.run(&invocation).await
    }

    fn write(&self, relative: &str, content: &str) -> Result<()> {
        let path = self.project_path.join(relative);
        fs::write(&path, content).with_context(|| format!("Failed to write {}", path.display()))
    }

    fn write_json(&self, relative: &str, value: &Value) -> Result<()> {
        let mut text = serde_json::to_string_pretty(value)?;
        text.push('\n');
        self.write(relative, &text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::process::MockCommandRunner;
    use tempfile::TempDir;

    fn project() -> TempDir {
        let dir = TempDir::new().unwrap();
        fs::write(
            dir.path().join("package.json"),
            r#"{"name":"app","scripts":{"dev":"next dev"}}"#,
        )
        .unwrap();
        dir
    }

    fn read_json(path: &Path) -> Value {
        serde_json::from_str(&fs::read_to_string(path).unwrap()).unwrap()
    }

    #[tokio::test]
    async fn test_prettier_setup() {
        let dir = project();
        fs::write(
            dir.path().join(".eslintrc.json"),
            r#"{"extends":"next/core-web-vitals"}"#,
        )
        .unwrap();

        let mut runner = MockCommandRunner::new();
        runner
            .expect_run()
            .withf(|inv| {
                inv.program == "pnpm"
                    && inv.args
                        == ["add", "--save-dev", "prettier", "eslint-config-prettier", "eslint-plugin-prettier"]
            })
            .times(1)
            .returning(|_| Ok(()));

        let manager = ConfigurationManager::new(dir.path(), PackageManager::Pnpm, runner);
        let options = ConfigurationOptions {
            prettier: true,
            ..ConfigurationOptions::default()
        };
        let configured = manager.apply(&options).await.unwrap();
        assert_eq!(configured, ["Prettier"]);

        let rc = read_json(&dir.path().join(".prettierrc"));
        assert_eq!(rc["singleQuote"], json!(true));
        assert_eq!(rc["trailingComma"], json!("es5"));
        assert!(fs::read_to_string(dir.path().join(".prettierignore"))
            .unwrap()
            .starts_with("node_modules\n.next"));

        let pkg = read_json(&dir.path().join("package.json"));
        assert_eq!(pkg["name"], json!("app"));
        assert_eq!(pkg["scripts"]["dev"], json!("next dev"));
        assert_eq!(pkg["scripts"]["format"], json!("prettier --write ."));
        assert_eq!(pkg["scripts"]["format:check"], json!("prettier --check ."));

        let eslintrc = read_json(&dir.path().join(".eslintrc.json"));
        assert_eq!(eslintrc["extends"], json!(["next/core-web-vitals", "prettier"]));
    }

    #[tokio::test]
    async fn test_husky_setup() {
        let dir = project();

        let mut runner = MockCommandRunner::new();
        runner
            .expect_run()
            .withf(|inv| inv.program == "npm" && inv.args == ["install", "--save-dev", "husky", "lint-staged"])
            .times(1)
            .returning(|_| Ok(()));
        runner
            .expect_run()
            .withf(|inv| inv.program == "npx" && inv.args == ["husky", "init"])
            .times(1)
            .returning(|_| Ok(()));

        let manager = ConfigurationManager::new(dir.path(), PackageManager::Npm, runner);
        let options = ConfigurationOptions {
            husky: true,
            ..ConfigurationOptions::default()
        };
        manager.apply(&options).await.unwrap();

        let hook = fs::read_to_string(dir.path().join(".husky/pre-commit")).unwrap();
        assert!(hook.contains("npx lint-staged"));

        let pkg = read_json(&dir.path().join("package.json"));
        assert_eq!(
            pkg["lint-staged"]["*.{json,css,md}"],
            json!(["prettier --write"])
        );
    }

    #[tokio::test]
    async fn test_failed_install_stops_setup() {
        let dir = project();

        let mut runner = MockCommandRunner::new();
        runner
            .expect_run()
            .times(1)
            .returning(|_| Err(anyhow::anyhow!("npm exited with code 1")));

        let manager = ConfigurationManager::new(dir.path(), PackageManager::Npm, runner);
        let err = manager
            .apply(&ConfigurationOptions::nextjs_preset())
            .await
            .unwrap_err();

        assert_eq!(err.to_string(), "Failed to set up Prettier");
        assert!(!dir.path().join(".prettierrc").exists());
    }

    #[tokio::test]
    async fn test_nothing_selected_runs_nothing() {
        let dir = project();
        let manager =
            ConfigurationManager::new(dir.path(), PackageManager::Bun, MockCommandRunner::new());
        let configured = manager.apply(&ConfigurationOptions::default()).await.unwrap();
        assert!(configured.is_empty());
    }
}
