//! initsu: interactive project scaffolder
//!
//! Creates Next.js applications (through `create-next-app`) and plain
//! TypeScript packages, sets up formatter, linter and git-hook tooling, and
//! overlays a starter template fetched from a raw-content host.
//!
//! The [`template`] module is the self-contained core: it fetches template
//! files with built-in fallbacks and writes them into a project. Everything
//! else sequences external tools.

#![forbid(unsafe_code)]
#![deny(clippy::all, clippy::pedantic, clippy::nursery)]
#![warn(clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

pub mod cli;
pub mod config;
pub mod observability;
pub mod process;
pub mod project;
pub mod template;

pub use config::InitsuConfig;
pub use template::{ContentFetcher, TemplateApplier, TemplateError, TemplateRegistry};
