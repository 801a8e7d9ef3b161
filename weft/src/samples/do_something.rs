use weft_codegen::{
    DeclarationEmitter, DiagnosticSink, Result, SiteRequirement, SourceBuilder, SourceOptions,
};
use weft_core::{DeclarationSite, GeneratedSource};

pub(super) fn attribute_source() -> GeneratedSource {
    GeneratedSource::new(
        "DoSomethingAttribute.cs",
        super::attribute_declaration("DoSomething", "AttributeTargets.Class"),
    )
}

pub(super) fn emit(
    site: DeclarationSite,
    options: SourceOptions,
    sink: &mut impl DiagnosticSink,
) -> Result<Option<GeneratedSource>> {
    let Some(mut builder) = SourceBuilder::create(site, options, SiteRequirement::Partial, sink)
    else {
        return Ok(None);
    };

    let emitter = builder
        .site()
        .map(DeclarationEmitter::for_site)
        .unwrap_or_default()
        .member("public string HelloWorld() => \"Hello, World!\";");
    builder.declare(emitter)?;

    builder.generate("DoSomething-", ".g").map(Some)
}
