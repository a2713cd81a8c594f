//! Template resolution and materialization onto a project directory

use serde::Serialize;
use std::path::{Component, Path, PathBuf};

use super::error::{TemplateError, TemplateResult};
use super::fetcher::ContentFetcher;
use super::source::TemplateRegistry;
use super::transport::Transport;

/// Prefix that templates are authored under
const SOURCE_DIR_PREFIX: &str = "src/";

/// A single file of a resolved template
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateFile {
    /// Repository-root-relative destination path
    pub path: String,
    /// Full text content, fetched or fallback
    pub content: String,
}

/// A template resolved to concrete file contents
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateDescriptor {
    /// Template name
    pub name: String,
    /// Human-readable description
    pub description: String,
    /// Files in declared order
    pub files: Vec<TemplateFile>,
}

/// Listing entry for a registered template
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TemplateSummary {
    /// Template name
    pub name: String,
    /// Human-readable description
    pub description: String,
}

/// Resolves templates by name and writes them into project directories
pub struct TemplateApplier<T> {
    registry: TemplateRegistry,
    fetcher: ContentFetcher<T>,
}

impl<T: Transport> TemplateApplier<T> {
    /// Create an applier over `registry`, fetching through `fetcher`
    #[must_use]
    pub const fn new(registry: TemplateRegistry, fetcher: ContentFetcher<T>) -> Self {
        Self { registry, fetcher }
    }

    /// The registry templates are resolved from
    #[must_use]
    pub const fn registry(&self) -> &TemplateRegistry {
        &self.registry
    }

    /// Name and description of every registered template
    ///
    /// Reads static metadata only; never touches the network.
    #[must_use]
    pub fn list_available(&self) -> Vec<TemplateSummary> {
        self.registry
            .iter()
            .map(|t| TemplateSummary {
                name: t.name.clone(),
                description: t.description.clone(),
            })
            .collect()
    }

    /// Resolve `name` to file contents
    ///
    /// # Errors
    ///
    /// Returns [`TemplateError::NotFound`] if no template is registered under
    /// `name`. Individual fetch failures are not errors.
    pub async fn resolve(&self, name: &str) -> TemplateResult<TemplateDescriptor> {
        let template = self
            .registry
            .get(name)
            .ok_or_else(|| TemplateError::NotFound(name.to_string()))?;

        let fetched = self.fetcher.fetch_many(&template.source).await;

        let files = template
            .source
            .files
            .iter()
            .map(|path| TemplateFile {
                path: path.clone(),
                content: fetched.get(path).cloned().unwrap_or_default(),
            })
            .collect();

        Ok(TemplateDescriptor {
            name: template.name.clone(),
            description: template.description.clone(),
            files,
        })
    }

    /// Resolve `name` and write its files under `destination_root`
    ///
    /// With `use_src_dir == false`, a leading `src/` segment is dropped from
    /// every path. Existing files are overwritten. Writes are not
    /// transactional: files written before a failure stay in place.
    ///
    /// # Errors
    ///
    /// Returns [`TemplateError::NotFound`] for unknown templates,
    /// [`TemplateError::UnsafePath`] if any path would leave the root (checked
    /// before anything is written) and [`TemplateError::Write`] on I/O failure.
    pub async fn apply(
        &self,
        name: &str,
        destination_root: &Path,
        use_src_dir: bool,
    ) -> TemplateResult<()> {
        let descriptor = self.resolve(name).await?;

        let planned = descriptor
            .files
            .iter()
            .map(|file| {
                let relative = layout_path(&file.path, use_src_dir);
                destination_for(destination_root, relative).map(|dest| (dest, &file.content))
            })
            .collect::<TemplateResult<Vec<_>>>()?;

        for (dest, content) in planned {
            if let Some(parent) = dest.parent() {
                tokio::fs::create_dir_all(parent)
                    .await
                    .map_err(|source| TemplateError::Write {
                        path: parent.to_path_buf(),
                        source,
                    })?;
            }

            tokio::fs::write(&dest, content)
                .await
                .map_err(|source| TemplateError::Write {
                    path: dest.clone(),
                    source,
                })?;

            tracing::debug!(path = %dest.display(), bytes = content.len(), "Wrote template file");
        }

        tracing::info!(
            template = %descriptor.name,
            files = descriptor.files.len(),
            root = %destination_root.display(),
            "Applied template"
        );

        Ok(())
    }
}

/// Adjust a template path to the project layout
///
/// Templates assume a nested `src/` directory; projects without one get the
/// same file one level up.
#[must_use]
pub fn layout_path(path: &str, use_src_dir: bool) -> &str {
    if use_src_dir {
        path
    } else {
        path.strip_prefix(SOURCE_DIR_PREFIX).unwrap_or(path)
    }
}

/// Join `relative` onto `root`, refusing anything that could escape it
///
/// # Errors
///
/// Returns [`TemplateError::UnsafePath`] for empty or absolute paths and
/// paths with `..` or prefix components.
pub fn destination_for(root: &Path, relative: &str) -> TemplateResult<PathBuf> {
    let path = Path::new(relative);
    let mut normal = 0_usize;

    for component in path.components() {
        match component {
            Component::Normal(_) => normal += 1,
            Component::CurDir => {}
            Component::ParentDir | Component::RootDir | Component::Prefix(_) => {
                return Err(TemplateError::UnsafePath(relative.to_string()));
            }
        }
    }

    if normal == 0 {
        return Err(TemplateError::UnsafePath(relative.to_string()));
    }

    Ok(root.join(path))
}
