//! Configuration for initsu
//!
//! Configuration is loaded from multiple sources with clear precedence:
//!
//! 1. Environment variables (highest priority, `INITSU_` prefix, `__` for nesting)
//! 2. `./initsu.toml`
//! 3. `~/.config/initsu/config.toml` (user config)
//! 4. Hardcoded defaults (fallback)
//!
//! Example: `INITSU_TEMPLATES__BASE_URL=http://localhost:8080`
//!
//! # Example Configuration
//!
//! ```toml
//! [templates]
//! base_url = "https://raw.githubusercontent.com"
//! request_timeout_secs = 30
//!
//! [[templates.custom]]
//! name = "landing"
//! description = "Marketing landing page"
//! owner = "acme"
//! repo = "landing-template"
//! branch = "main"
//! files = ["src/app/page.tsx", "src/app/globals.css"]
//!
//! [project]
//! default_template = "default"
//! create_timeout_secs = 300
//! ```

use anyhow::Context;
use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::template::{RegisteredTemplate, TemplateRegistry, DEFAULT_BASE_URL};

/// Remote template settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TemplateSettings {
    /// Raw-content host templates are fetched from
    pub base_url: String,

    /// Per-request timeout in seconds
    pub request_timeout_secs: u64,

    /// Extra templates registered on top of the built-in ones
    pub custom: Vec<RegisteredTemplate>,
}

impl Default for TemplateSettings {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            request_timeout_secs: 30,
            custom: Vec::new(),
        }
    }
}

impl TemplateSettings {
    /// Per-request timeout
    #[must_use]
    pub const fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Built-in registry extended with the configured custom templates
    #[must_use]
    pub fn registry(&self) -> TemplateRegistry {
        self.custom
            .iter()
            .cloned()
            .fold(TemplateRegistry::builtin(), TemplateRegistry::with)
    }
}

/// Project creation settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectSettings {
    /// Template applied when `--template` is not given
    pub default_template: String,

    /// Upper bound for `create-next-app`, in seconds
    pub create_timeout_secs: u64,
}

impl Default for ProjectSettings {
    fn default() -> Self {
        Self {
            default_template: "default".to_string(),
            create_timeout_secs: 300,
        }
    }
}

impl ProjectSettings {
    /// Upper bound for `create-next-app`
    #[must_use]
    pub const fn create_timeout(&self) -> Duration {
        Duration::from_secs(self.create_timeout_secs)
    }
}

/// Complete initsu configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct InitsuConfig {
    /// Remote template settings
    #[serde(default)]
    pub templates: TemplateSettings,

    /// Project creation settings
    #[serde(default)]
    pub project: ProjectSettings,
}

impl InitsuConfig {
    /// Load configuration from the standard locations
    ///
    /// # Errors
    ///
    /// Returns an error if a configuration file exists but cannot be parsed,
    /// or a value has the wrong type.
    pub fn load() -> anyhow::Result<Self> {
        let mut figment = Figment::new().merge(Serialized::defaults(Self::default()));

        if let Some(user_config) = Self::user_config_path() {
            if user_config.exists() {
                figment = figment.merge(Toml::file(&user_config));
            }
        }

        let local_config = PathBuf::from("./initsu.toml");
        if local_config.exists() {
            figment = figment.merge(Toml::file(&local_config));
        }

        figment
            .merge(Env::prefixed("INITSU_").split("__").lowercase(true))
            .extract()
            .context("Failed to load configuration")
    }

    /// Load configuration from a specific file
    ///
    /// Environment variables still override file values.
    ///
    /// # Errors
    ///
    /// Returns an error if the file contains invalid TOML or values of the
    /// wrong type.
    pub fn load_from(path: &Path) -> anyhow::Result<Self> {
        Figment::new()
            .merge(Serialized::defaults(Self::default()))
            .merge(Toml::file(path))
            .merge(Env::prefixed("INITSU_").split("__").lowercase(true))
            .extract()
            .with_context(|| format!("Failed to load configuration from {}", path.display()))
    }

    /// `~/.config/initsu/config.toml`, if a config directory exists
    #[must_use]
    pub fn user_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("initsu").join("config.toml"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = InitsuConfig::default();
        assert_eq!(config.templates.base_url, "https://raw.githubusercontent.com");
        assert_eq!(config.templates.request_timeout(), Duration::from_secs(30));
        assert_eq!(config.project.default_template, "default");
        assert_eq!(config.project.create_timeout(), Duration::from_secs(300));
    }

    #[test]
    fn test_default_registry_is_builtin() {
        let registry = InitsuConfig::default().templates.registry();
        assert_eq!(registry.len(), 1);
        assert!(registry.get("default").is_some());
    }

    #[test]
    fn test_load_from_nonexistent_file_uses_defaults() {
        let dir = TempDir::new().unwrap();
        let config = InitsuConfig::load_from(&dir.path().join("missing.toml")).unwrap();
        assert_eq!(config.project.create_timeout_secs, 300);
    }

    #[test]
    fn test_load_from_toml_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("initsu.toml");
        std::fs::write(
            &path,
            r#"
[templates]
request_timeout_secs = 5

[[templates.custom]]
name = "landing"
description = "Marketing landing page"
owner = "acme"
repo = "landing-template"
branch = "main"
files = ["src/app/page.tsx"]

[project]
default_template = "landing"
"#,
        )
        .unwrap();

        let config = InitsuConfig::load_from(&path).unwrap();
        assert_eq!(config.templates.request_timeout_secs, 5);
        assert_eq!(config.templates.base_url, "https://raw.githubusercontent.com");
        assert_eq!(config.project.default_template, "landing");
        assert_eq!(config.project.create_timeout_secs, 300);

        let registry = config.templates.registry();
        assert_eq!(registry.len(), 2);
        let landing = registry.get("landing").unwrap();
        assert_eq!(landing.source.owner, "acme");
        assert_eq!(landing.source.files, vec!["src/app/page.tsx".to_string()]);
    }

    #[test]
    fn test_load_from_rejects_bad_types() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("initsu.toml");
        std::fs::write(&path, "[templates]\nrequest_timeout_secs = \"soon\"\n").unwrap();

        assert!(InitsuConfig::load_from(&path).is_err());
    }
}
