use weft_codegen::{DiagnosticSink, Result, SiteRequirement, SourceBuilder, SourceOptions};
use weft_core::{DeclarationSite, GeneratedSource, Symbol, TypeKind};

pub(super) fn attribute_source() -> GeneratedSource {
    GeneratedSource::new(
        "WrapLoggerAttribute.cs",
        super::attribute_declaration(
            "WrapLogger",
            "AttributeTargets.Class | AttributeTargets.Struct | AttributeTargets.Interface",
        ),
    )
}

fn logger() -> Symbol {
    Symbol::new("ILogger", TypeKind::Interface).in_namespace("Microsoft.Extensions.Logging")
}

pub(super) fn emit(
    site: DeclarationSite,
    options: SourceOptions,
    sink: &mut impl DiagnosticSink,
) -> Result<Option<GeneratedSource>> {
    let Some(mut builder) = SourceBuilder::create(site, options, SiteRequirement::None, sink)
    else {
        return Ok(None);
    };

    builder.append_literal("/*\nhello, world!\n*/\n");

    let mut scope = builder.begin_target_type()?;
    scope
        .append_literal("private readonly ")
        .append_symbol(&logger())
        .append_line_with(" _logger;")
        .append_line()
        .append_line_with("public string SayHello()")
        .append_line_with("    => \"Hello, world!\";");
    scope.close()?;

    builder.generate("WrapLogger-", "").map(Some)
}
