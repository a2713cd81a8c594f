//! Key-level edits to `package.json`

use anyhow::{Context, Result};
use serde_json::{Map, Value};
use std::path::{Path, PathBuf};

/// A loaded `package.json`, edited in memory and saved back
///
/// Key order is preserved; values are never interpreted beyond the object
/// keys being merged.
#[derive(Debug, Clone)]
pub struct PackageJson {
    path: PathBuf,
    root: Map<String, Value>,
}

impl PackageJson {
    /// Read `<project_dir>/package.json`
    ///
    /// # Errors
    ///
    /// Returns an error if the file is missing, is not JSON, or is not a JSON
    /// object.
    pub fn load(project_dir: &Path) -> Result<Self> {
        let path = project_dir.join("package.json");
        let text = std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read {}", path.display()))?;

        let root = match serde_json::from_str::<Value>(&text)
            .with_context(|| format!("Failed to parse {}", path.display()))?
        {
            Value::Object(map) => map,
            _ => anyhow::bail!("{} is not a JSON object", path.display()),
        };

        Ok(Self { path, root })
    }

    /// Merge entries into the `scripts` object, overriding same-named scripts
    pub fn merge_scripts<'a>(&mut self, scripts: impl IntoIterator<Item = (&'a str, &'a str)>) {
        self.merge_into("scripts", scripts);
    }

    /// Merge entries into the `devDependencies` object
    pub fn merge_dev_dependencies<'a>(
        &mut self,
        deps: impl IntoIterator<Item = (&'a str, &'a str)>,
    ) {
        self.merge_into("devDependencies", deps);
    }

    /// Set a top-level key
    pub fn set(&mut self, key: &str, value: Value) {
        self.root.insert(key.to_string(), value);
    }

    /// Top-level value for `key`
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.root.get(key)
    }

    /// Write back with 2-space indentation
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written.
    pub fn save(&self) -> Result<()> {
        let mut text = serde_json::to_string_pretty(&self.root)?;
        text.push('\n');
        std::fs::write(&self.path, text)
            .with_context(|| format!("Failed to write {}", self.path.display()))
    }

    fn merge_into<'a>(&mut self, key: &str, entries: impl IntoIterator<Item = (&'a str, &'a str)>) {
        let slot = self
            .root
            .entry(key.to_string())
            .or_insert_with(|| Value::Object(Map::new()));

        if !slot.is_object() {
            *slot = Value::Object(Map::new());
        }

        if let Value::Object(map) = slot {
            for (name, value) in entries {
                map.insert(name.to_string(), Value::String(value.to_string()));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::TempDir;

    fn project(contents: &str) -> TempDir {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("package.json"), contents).unwrap();
        dir
    }

    #[test]
    fn test_merge_scripts_keeps_existing_keys() {
        let dir = project(r#"{"name":"app","scripts":{"dev":"next dev","lint":"next lint"}}"#);

        let mut pkg = PackageJson::load(dir.path()).unwrap();
        pkg.merge_scripts([("format", "prettier --write ."), ("lint", "eslint .")]);
        pkg.save().unwrap();

        let saved: Value =
            serde_json::from_str(&std::fs::read_to_string(dir.path().join("package.json")).unwrap())
                .unwrap();
        assert_eq!(
            saved,
            json!({
                "name": "app",
                "scripts": {"dev": "next dev", "lint": "eslint .", "format": "prettier --write ."}
            })
        );
    }

    #[test]
    fn test_key_order_preserved() {
        let dir = project(r#"{"name":"app","version":"0.1.0","private":true}"#);

        let mut pkg = PackageJson::load(dir.path()).unwrap();
        pkg.merge_dev_dependencies([("typescript", "^5.0.0")]);
        pkg.save().unwrap();

        let text = std::fs::read_to_string(dir.path().join("package.json")).unwrap();
        let name = text.find("\"name\"").unwrap();
        let version = text.find("\"version\"").unwrap();
        let dev = text.find("\"devDependencies\"").unwrap();
        assert!(name < version && version < dev);
        assert!(text.contains("\n  \"name\": \"app\""));
    }

    #[test]
    fn test_non_object_section_is_replaced() {
        let dir = project(r#"{"scripts":null}"#);
        let mut pkg = PackageJson::load(dir.path()).unwrap();
        pkg.merge_scripts([("build", "tsc")]);
        assert_eq!(pkg.get("scripts"), Some(&json!({"build": "tsc"})));
    }

    #[test]
    fn test_load_errors() {
        let dir = TempDir::new().unwrap();
        assert!(PackageJson::load(dir.path()).is_err());

        let dir = project("[1, 2]");
        assert!(PackageJson::load(dir.path()).is_err());
    }
}
