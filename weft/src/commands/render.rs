use std::path::PathBuf;

use clap::Args;
use eyre::Result;
use tracing::info;
use weft::Sample;
use weft_codegen::{Diagnostic, Severity};

use super::{UnwrapOrExit, load_options, load_site};

#[derive(Args)]
pub struct RenderCommand {
    /// Path to a JSON declaration site
    #[arg(short, long)]
    pub site: PathBuf,

    /// Sample generator to run
    #[arg(short, long, value_enum)]
    pub generator: Sample,

    /// Path to a TOML file with builder options
    #[arg(short, long)]
    pub options: Option<PathBuf>,

    /// Print the hint name above the generated text
    #[arg(long)]
    pub show_hint: bool,
}

impl RenderCommand {
    pub fn run(&self) -> Result<()> {
        let site = load_site(&self.site)?;
        let options = load_options(self.options.as_deref())?;

        let mut diagnostics: Vec<Diagnostic> = Vec::new();
        let generated = self
            .generator
            .emit(site, options, &mut diagnostics)
            .unwrap_or_exit();

        for diag in &diagnostics {
            eprintln!("{}", diag);
        }
        if diagnostics.iter().any(|d| d.severity == Severity::Error) {
            std::process::exit(1);
        }

        let Some(generated) = generated else {
            return Ok(());
        };
        info!(hint = generated.hint_name(), generator = self.generator.name(), "rendered");
        if self.show_hint {
            println!("// {}", generated.hint_name());
        }
        print!("{}", generated);

        Ok(())
    }
}
