use clap::Args;
use eyre::Result;
use weft::Sample;

#[derive(Args)]
pub struct AttributeCommand {
    /// Sample generator whose attribute to print
    #[arg(value_enum)]
    pub generator: Sample,
}

impl AttributeCommand {
    pub fn run(&self) -> Result<()> {
        let source = self.generator.attribute_source();
        println!("// {}", source.hint_name());
        print!("{}", source);
        Ok(())
    }
}
