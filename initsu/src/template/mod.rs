//! Starter templates: remote fetch with fallback, and application onto a project
//!
//! A template is a named list of repository-relative files served from a
//! raw-content host. [`ContentFetcher`] retrieves them best-effort, falling back
//! to built-in content per file; [`TemplateApplier`] resolves a template by
//! name through the [`TemplateRegistry`] and writes its files into a freshly
//! scaffolded project, optionally dropping the `src/` prefix.
//!
//! # Example
//!
//! ```rust,no_run
//! use initsu::template::{ContentFetcher, HttpTransport, TemplateApplier, TemplateRegistry};
//! use std::path::Path;
//! use std::time::Duration;
//!
//! # async fn example() -> anyhow::Result<()> {
//! let transport = HttpTransport::new(Duration::from_secs(30))?;
//! let applier = TemplateApplier::new(
//!     TemplateRegistry::builtin(),
//!     ContentFetcher::with_default_host(transport),
//! );
//! applier.apply("default", Path::new("my-app"), false).await?;
//! # Ok(())
//! # }
//! ```

pub mod applier;
pub mod error;
pub mod fallback;
pub mod fetcher;
pub mod source;
pub mod transport;

pub use applier::{TemplateApplier, TemplateDescriptor, TemplateFile, TemplateSummary};
pub use error::{FetchError, FetchResult, TemplateError, TemplateResult};
pub use fallback::{fallback_content, FileKind};
pub use fetcher::{ContentFetcher, DEFAULT_BASE_URL};
pub use source::{RegisteredTemplate, TemplateRegistry, TemplateSource};
pub use transport::{HttpTransport, RawResponse, Transport};
