//! External command execution

use anyhow::{Context, Result};
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::time::Duration;
use tokio::process::Command;

/// One external program run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    /// Program name, resolved through `PATH`
    pub program: String,
    /// Arguments, passed without a shell
    pub args: Vec<String>,
    /// Working directory; the current one if `None`
    pub cwd: Option<PathBuf>,
    /// Let the child write to the terminal instead of capturing output
    pub inherit_stdio: bool,
    /// Kill the child if it runs longer than this
    pub timeout: Option<Duration>,
}

impl Invocation {
    /// Invocation of `program` with `args` and captured output
    #[must_use]
    pub fn new<I, S>(program: &str, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            program: program.to_string(),
            args: args.into_iter().map(Into::into).collect(),
            cwd: None,
            inherit_stdio: false,
            timeout: None,
        }
    }

    /// Run inside `dir`
    #[must_use]
    pub fn in_dir(mut self, dir: &Path) -> Self {
        self.cwd = Some(dir.to_path_buf());
        self
    }

    /// Stream the child's output to the terminal
    #[must_use]
    pub const fn inherit_stdio(mut self) -> Self {
        self.inherit_stdio = true;
        self
    }

    /// Bound the run time
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// `program arg1 arg2 ...`, for messages
    #[must_use]
    pub fn display(&self) -> String {
        std::iter::once(self.program.as_str())
            .chain(self.args.iter().map(String::as_str))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// Runs external programs and checks their exit status
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CommandRunner: Send + Sync {
    /// Run to completion
    ///
    /// # Errors
    ///
    /// Returns an error if the program cannot be started, times out, or exits
    /// with a non-zero status.
    async fn run(&self, invocation: &Invocation) -> Result<()>;
}

/// [`CommandRunner`] that spawns real processes
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemRunner;

#[async_trait]
impl CommandRunner for SystemRunner {
    async fn run(&self, invocation: &Invocation) -> Result<()> {
        let mut command = Command::new(&invocation.program);
        command.args(&invocation.args).kill_on_drop(true);

        if let Some(ref dir) = invocation.cwd {
            command.current_dir(dir);
        }

        if invocation.inherit_stdio {
            command
                .stdin(Stdio::inherit())
                .stdout(Stdio::inherit())
                .stderr(Stdio::inherit());
        } else {
            command
                .stdin(Stdio::null())
                .stdout(Stdio::piped())
                .stderr(Stdio::piped());
        }

        tracing::info!(command = %invocation.display(), "Running");

        let child = command
            .spawn()
            .with_context(|| format!("Failed to start {}", invocation.program))?;

        let wait = child.wait_with_output();
        let output = match invocation.timeout {
            Some(limit) => tokio::time::timeout(limit, wait).await.with_context(|| {
                format!("{} timed out after {}s", invocation.program, limit.as_secs())
            })?,
            None => wait.await,
        }
        .with_context(|| format!("Failed to wait for {}", invocation.program))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            if !stderr.trim().is_empty() {
                tracing::debug!(command = %invocation.display(), stderr = %stderr.trim(), "Command failed");
            }

            match output.status.code() {
                Some(code) => anyhow::bail!("{} exited with code {code}", invocation.display()),
                None => anyhow::bail!("{} was terminated by a signal", invocation.display()),
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invocation_builder() {
        let inv = Invocation::new("npm", ["install", "--save-dev", "prettier"])
            .in_dir(Path::new("/tmp/app"))
            .with_timeout(Duration::from_secs(5));

        assert_eq!(inv.display(), "npm install --save-dev prettier");
        assert_eq!(inv.cwd, Some(PathBuf::from("/tmp/app")));
        assert_eq!(inv.timeout, Some(Duration::from_secs(5)));
        assert!(!inv.inherit_stdio);
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_system_runner_success_and_failure() {
        SystemRunner.run(&Invocation::new("true", Vec::<String>::new())).await.unwrap();

        let err = SystemRunner
            .run(&Invocation::new("sh", ["-c", "exit 3"]))
            .await
            .unwrap_err();
        assert!(err.to_string().contains("exited with code 3"));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_system_runner_timeout() {
        let err = SystemRunner
            .run(&Invocation::new("sleep", ["5"]).with_timeout(Duration::from_millis(100)))
            .await
            .unwrap_err();
        assert!(err.to_string().contains("timed out"));
    }

    #[tokio::test]
    async fn test_system_runner_missing_program() {
        let err = SystemRunner
            .run(&Invocation::new("initsu-definitely-not-installed", Vec::<String>::new()))
            .await
            .unwrap_err();
        assert!(err.to_string().contains("Failed to start"));
    }
}
