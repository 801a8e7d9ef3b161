use miette::{Diagnostic, NamedSource, SourceSpan};
use thiserror::Error;
use weft_core::TypeKind;

/// Result type for source-building operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Fatal conditions that abort a build before any artifact is produced.
#[derive(Debug, Error, Diagnostic)]
pub enum Error {
    #[error("cannot declare a {} {kind}", record_label(.record))]
    #[diagnostic(
        code(weft::unsupported_kind),
        help("only classes, structs, interfaces and their record forms can be re-declared")
    )]
    UnsupportedKind { kind: TypeKind, record: bool },

    #[error("unbalanced indent scope: {reason}")]
    #[diagnostic(
        code(weft::unbalanced_scope),
        help("every push_indent needs a matching pop_indent, and scopes close innermost first")
    )]
    UnbalancedIndentScope { reason: &'static str },

    #[error("symbol '{symbol}' has no resolved name")]
    #[diagnostic(code(weft::unresolved_symbol))]
    UnresolvedSymbolReference { symbol: String },

    #[error("builder has no declaration site")]
    #[diagnostic(
        code(weft::no_site),
        help("create the builder with SourceBuilder::for_site to declare the target type")
    )]
    NoDeclarationSite,

    #[error("failed to parse source options")]
    #[diagnostic(code(weft::options))]
    Options {
        #[source_code]
        src: NamedSource<String>,
        #[label("parse error here")]
        span: Option<SourceSpan>,
        #[source]
        source: toml::de::Error,
    },
}

fn record_label(record: &bool) -> &'static str {
    if *record { "record" } else { "non-record" }
}

impl Error {
    pub(crate) fn unbalanced(reason: &'static str) -> Self {
        Self::UnbalancedIndentScope { reason }
    }

    pub(crate) fn options(source: toml::de::Error, content: &str, filename: &str) -> Self {
        let span = source.span().map(SourceSpan::from);
        Self::Options {
            src: NamedSource::new(filename, content.to_string()),
            span,
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unsupported_kind_message() {
        let err = Error::UnsupportedKind {
            kind: TypeKind::Delegate,
            record: true,
        };
        assert_eq!(err.to_string(), "cannot declare a record delegate");
        let err = Error::UnsupportedKind {
            kind: TypeKind::Enum,
            record: false,
        };
        assert_eq!(err.to_string(), "cannot declare a non-record enum");
    }

    #[test]
    fn test_diagnostic_code() {
        let err = Error::unbalanced("pop with empty indent stack");
        let code = err.code().map(|c| c.to_string());
        assert_eq!(code.as_deref(), Some("weft::unbalanced_scope"));
    }
}
