//! Plain TypeScript project bootstrap via `bun init`

use anyhow::{Context, Result};
use serde_json::json;
use std::fs;
use std::path::{Path, PathBuf};

use super::package_json::PackageJson;
use super::PackageManager;
use crate::process::{CommandRunner, Invocation};

const INDEX_TS: &str = "console.log('Hello, TypeScript!');

export {};
";

/// A TypeScript package to create at `path`
#[derive(Debug, Clone)]
pub struct TypescriptProject {
    path: PathBuf,
    package_manager: PackageManager,
}

impl TypescriptProject {
    /// Project at `path`, installing with `package_manager`
    #[must_use]
    pub fn new(path: &Path, package_manager: PackageManager) -> Self {
        Self {
            path: path.to_path_buf(),
            package_manager,
        }
    }

    /// Create the directory, run `bun init`, and lay down TypeScript config
    ///
    /// Dependencies are installed with the chosen manager unless it is bun,
    /// which already installed them during `bun init`.
    ///
    /// # Errors
    ///
    /// Returns an error if any command fails or a file cannot be written.
    pub async fn create<R: CommandRunner>(&self, runner: &R) -> Result<()> {
        fs::create_dir_all(&self.path)
            .with_context(|| format!("Failed to create {}", self.path.display()))?;

        runner
            .run(&Invocation::new("bun", ["init", "-y"]).in_dir(&self.path))
            .await
            .context("bun init failed")?;

        let mut pkg = PackageJson::load(&self.path)?;
        pkg.merge_dev_dependencies([("typescript", "^5.0.0"), ("@types/node", "^20.0.0")]);
        pkg.merge_scripts([
            ("build", "tsc"),
            ("dev", "tsc --watch"),
            ("start", "node dist/index.js"),
        ]);
        pkg.save()?;

        self.write_tsconfig()?;

        let src = self.path.join("src");
        fs::create_dir_all(&src).with_context(|| format!("Failed to create {}", src.display()))?;
        fs::write(src.join("index.ts"), INDEX_TS).context("Failed to write src/index.ts")?;

        if self.package_manager != PackageManager::Bun {
            runner
                .run(
                    &Invocation::new(
                        self.package_manager.program(),
                        self.package_manager.install_args(),
                    )
                    .in_dir(&self.path),
                )
                .await
                .context("Package installation failed")?;
        }

        Ok(())
    }

    fn write_tsconfig(&self) -> Result<()> {
        let tsconfig = json!({
            "compilerOptions": {
                "target": "ES2022",
                "module": "commonjs",
                "lib": ["ES2022"],
                "outDir": "./dist",
                "rootDir": "./src",
                "strict": true,
                "esModuleInterop": true,
                "skipLibCheck": true,
                "forceConsistentCasingInFileNames": true,
                "declaration": true,
                "declarationMap": true,
                "sourceMap": true,
            },
            "include": ["src/**/*"],
            "exclude": ["node_modules", "dist", "**/*.test.ts", "**/*.spec.ts"],
        });

        let mut text = serde_json::to_string_pretty(&tsconfig)?;
        text.push('\n');
        fs::write(self.path.join("tsconfig.json"), text).context("Failed to write tsconfig.json")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::process::MockCommandRunner;
    use serde_json::Value;
    use tempfile::TempDir;

    /// Runner that emulates `bun init` by writing a minimal package.json
    fn runner_expecting(install: Option<&'static str>) -> MockCommandRunner {
        let mut runner = MockCommandRunner::new();
        runner
            .expect_run()
            .withf(|inv| inv.program == "bun" && inv.args == ["init", "-y"])
            .times(1)
            .returning(|inv| {
                let dir = inv.cwd.clone().unwrap();
                fs::write(dir.join("package.json"), r#"{"name":"lib","module":"index.ts"}"#)?;
                Ok(())
            });

        if let Some(program) = install {
            runner
                .expect_run()
                .withf(move |inv| inv.program == program && inv.args == ["install"])
                .times(1)
                .returning(|_| Ok(()));
        }

        runner
    }

    #[tokio::test]
    async fn test_create_with_bun() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("lib");

        TypescriptProject::new(&path, PackageManager::Bun)
            .create(&runner_expecting(None))
            .await
            .unwrap();

        let pkg: Value =
            serde_json::from_str(&fs::read_to_string(path.join("package.json")).unwrap()).unwrap();
        assert_eq!(pkg["name"], "lib");
        assert_eq!(pkg["devDependencies"]["typescript"], "^5.0.0");
        assert_eq!(pkg["scripts"]["start"], "node dist/index.js");

        let tsconfig: Value =
            serde_json::from_str(&fs::read_to_string(path.join("tsconfig.json")).unwrap()).unwrap();
        assert_eq!(tsconfig["compilerOptions"]["rootDir"], "./src");

        let index = fs::read_to_string(path.join("src/index.ts")).unwrap();
        assert!(index.starts_with("console.log('Hello, TypeScript!');"));
    }

    #[tokio::test]
    async fn test_create_installs_with_other_manager() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("lib");

        TypescriptProject::new(&path, PackageManager::Pnpm)
            .create(&runner_expecting(Some("pnpm")))
            .await
            .unwrap();

        assert!(path.join("tsconfig.json").exists());
    }
}
