//! Remote template sources and the name-keyed registry

use serde::{Deserialize, Serialize};

/// Remote origin of a template's files
///
/// Files are served from `<base>/<owner>/<repo>/<branch>/<path>`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TemplateSource {
    /// Repository owner or namespace
    pub owner: String,
    /// Repository name
    pub repo: String,
    /// Branch or ref
    pub branch: String,
    /// Repository-root-relative file paths, in application order
    #[serde(default)]
    pub files: Vec<String>,
}

impl TemplateSource {
    /// Create a source from its parts
    #[must_use]
    pub fn new<I, S>(owner: &str, repo: &str, branch: &str, files: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            owner: owner.to_string(),
            repo: repo.to_string(),
            branch: branch.to_string(),
            files: files.into_iter().map(Into::into).collect(),
        }
    }
}

/// A named template and where its files live
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegisteredTemplate {
    /// Lookup key, e.g. `default`
    pub name: String,
    /// One-line human description
    pub description: String,
    /// Remote origin
    #[serde(flatten)]
    pub source: TemplateSource,
}

/// Name-keyed collection of templates
///
/// Adding a template means registering another record; resolution never
/// branches on template names.
#[derive(Debug, Clone, Default)]
pub struct TemplateRegistry {
    entries: Vec<RegisteredTemplate>,
}

impl TemplateRegistry {
    /// Registry with no templates
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Registry holding the built-in `default` Next.js template
    #[must_use]
    pub fn builtin() -> Self {
        let mut registry = Self::empty();
        registry.register(RegisteredTemplate {
            name: "default".to_string(),
            description: "Default Next.js template with custom page content and styling from GitHub"
                .to_string(),
            source: TemplateSource::new(
                "dharminnagar",
                "nextjs-template",
                "main",
                ["src/app/page.tsx", "src/app/globals.css"],
            ),
        });
        registry
    }

    /// Add a template, replacing any existing entry with the same name
    pub fn register(&mut self, template: RegisteredTemplate) {
        if let Some(existing) = self.entries.iter_mut().find(|t| t.name == template.name) {
            *existing = template;
        } else {
            self.entries.push(template);
        }
    }

    /// Builder form of [`register`](Self::register)
    #[must_use]
    pub fn with(mut self, template: RegisteredTemplate) -> Self {
        self.register(template);
        self
    }

    /// Look up a template by name
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&RegisteredTemplate> {
        self.entries.iter().find(|t| t.name == name)
    }

    /// All templates in registration order
    #[must_use]
    pub fn iter(&self) -> impl Iterator<Item = &RegisteredTemplate> {
        self.entries.iter()
    }

    /// Number of registered templates
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether nothing is registered
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
