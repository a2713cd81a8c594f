//! CLI command implementations

pub mod init;
pub mod templates;

pub use init::InitCommand;
pub use templates::TemplatesCommand;
