//! Sample generator dispatch.

mod do_something;
mod wrap_logger;

use clap::ValueEnum;
use weft_codegen::{DiagnosticSink, Result, SourceOptions};
use weft_core::{DeclarationSite, GeneratedSource};

/// A sample generator selectable from the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Sample {
    /// Adds a `HelloWorld` member to partial types.
    DoSomething,
    /// Adds a logger field and a `SayHello` member to the target type.
    WrapLogger,
}

impl Sample {
    /// Generator name as it appears in logs.
    pub fn name(self) -> &'static str {
        match self {
            Sample::DoSomething => "DoSomething",
            Sample::WrapLogger => "WrapLogger",
        }
    }

    /// Marker attribute source the generator registers once per compilation.
    pub fn attribute_source(self) -> GeneratedSource {
        match self {
            Sample::DoSomething => do_something::attribute_source(),
            Sample::WrapLogger => wrap_logger::attribute_source(),
        }
    }

    /// Run the generator for one site.
    ///
    /// Returns `Ok(None)` when the site is rejected; the reason goes to `sink`.
    pub fn emit(
        self,
        site: DeclarationSite,
        options: SourceOptions,
        sink: &mut impl DiagnosticSink,
    ) -> Result<Option<GeneratedSource>> {
        match self {
            Sample::DoSomething => do_something::emit(site, options, sink),
            Sample::WrapLogger => wrap_logger::emit(site, options, sink),
        }
    }
}

/// Attribute declaration shared by the samples, in the generated namespace.
fn attribute_declaration(name: &str, targets: &str) -> String {
    format!(
        "using System;\n\
         namespace WeftGenerated;\n\
         \n\
         [AttributeUsage({targets}, AllowMultiple = false, Inherited = false)]\n\
         internal sealed class {name}Attribute : Attribute\n\
         {{\n\
         }}\n"
    )
}
