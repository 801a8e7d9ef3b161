mod attribute;
mod hint;
mod render;

use std::{fs, path::Path};

use attribute::AttributeCommand;
use clap::{Parser, Subcommand};
use eyre::{Context, Result};
use hint::HintCommand;
use render::RenderCommand;
use weft_codegen::SourceOptions;
use weft_core::DeclarationSite;

/// Extension trait for exiting on builder errors with pretty formatting
pub(crate) trait UnwrapOrExit<T> {
    fn unwrap_or_exit(self) -> T;
}

impl<T> UnwrapOrExit<T> for weft_codegen::Result<T> {
    fn unwrap_or_exit(self) -> T {
        match self {
            Ok(v) => v,
            Err(e) => {
                eprintln!("{:?}", miette::Report::new(e));
                std::process::exit(1);
            }
        }
    }
}

#[derive(Parser)]
#[command(name = "weft")]
#[command(version)]
#[command(about = "Render sample source generators for a declaration site")]
pub(crate) struct Cli {
    #[command(subcommand)]
    command: Commands,
}

impl Cli {
    pub fn run(&self) -> Result<()> {
        match &self.command {
            Commands::Render(cmd) => cmd.run(),
            Commands::Hint(cmd) => cmd.run(),
            Commands::Attribute(cmd) => cmd.run(),
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Run a sample generator and print the generated source
    Render(RenderCommand),

    /// Print the preferred hint name for a declaration site
    Hint(HintCommand),

    /// Print the marker attribute a sample generator registers
    Attribute(AttributeCommand),
}

/// Read a declaration site from a JSON file.
fn load_site(path: &Path) -> Result<DeclarationSite> {
    let content = fs::read_to_string(path)
        .wrap_err_with(|| format!("Failed to read {}", path.display()))?;
    serde_json::from_str(&content)
        .wrap_err_with(|| format!("Invalid declaration site in {}", path.display()))
}

/// Read builder options, falling back to defaults when no file is given.
fn load_options(path: Option<&Path>) -> Result<SourceOptions> {
    let Some(path) = path else {
        return Ok(SourceOptions::default());
    };
    let content = fs::read_to_string(path)
        .wrap_err_with(|| format!("Failed to read {}", path.display()))?;
    let filename = path.display().to_string();
    Ok(SourceOptions::from_str_with_filename(&content, &filename).unwrap_or_exit())
}
