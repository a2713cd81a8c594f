//! Starter template commands

use anyhow::{Context, Result};
use clap::Subcommand;
use console::style;

use crate::cli::template_applier;
use crate::config::InitsuConfig;
use crate::template::TemplateSummary;

/// Template subcommands
#[derive(Subcommand, Debug)]
pub enum TemplatesCommand {
    /// List registered templates
    List {
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
}

impl TemplatesCommand {
    /// Execute the templates command
    ///
    /// # Errors
    ///
    /// Returns an error if output cannot be serialized.
    pub fn execute(self, config: &InitsuConfig) -> Result<()> {
        match self {
            Self::List { json } => {
                let templates = template_applier(&config.templates)?.list_available();
                if json {
                    let out = serde_json::to_string_pretty(&templates)
                        .context("Failed to serialize template list")?;
                    println!("{out}");
                } else {
                    print_table(&templates);
                }
                Ok(())
            }
        }
    }
}

fn print_table(templates: &[TemplateSummary]) {
    let width = templates.iter().map(|t| t.name.len()).max().unwrap_or(0);

    println!("{}", style("Available templates:").bold());
    println!();
    for template in templates {
        println!(
            "  {}  {}",
            style(format!("{:width$}", template.name)).cyan().bold(),
            template.description
        );
    }
    println!();
    println!(
        "Use one with: {} {}",
        style("initsu <project-name> --template").cyan(),
        style("<name>").yellow()
    );
}
