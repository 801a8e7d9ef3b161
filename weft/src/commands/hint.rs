use std::path::PathBuf;

use clap::Args;
use eyre::Result;

use super::{load_options, load_site};

#[derive(Args)]
pub struct HintCommand {
    /// Path to a JSON declaration site
    #[arg(short, long)]
    pub site: PathBuf,

    /// Text placed before the site's name
    #[arg(long, default_value = "")]
    pub prefix: String,

    /// Text placed before the extension
    #[arg(long, default_value = "")]
    pub suffix: String,

    /// Path to a TOML file with builder options
    #[arg(short, long)]
    pub options: Option<PathBuf>,
}

impl HintCommand {
    pub fn run(&self) -> Result<()> {
        let site = load_site(&self.site)?;
        let options = load_options(self.options.as_deref())?;

        println!(
            "{}",
            site.preferred_hint_name(&self.prefix, &self.suffix, &options.hint_extension)
        );

        Ok(())
    }
}
