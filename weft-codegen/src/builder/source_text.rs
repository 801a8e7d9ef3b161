//! Client-side text fragments.

use weft_core::Symbol;

use super::{CodePart, SymbolArena, Value};

/// An ordered run of code parts with the symbols they reference.
///
/// Built fluently and appended to a [`SourceBuilder`](super::SourceBuilder),
/// which re-interns the symbols into its own arena.
///
/// ```
/// use weft_codegen::SourceText;
/// use weft_core::Symbol;
///
/// let logger = Symbol::class("Microsoft.Extensions.Logging", "ILogger");
/// let text = SourceText::new()
///     .lit("private readonly ")
///     .sym(&logger)
///     .lit(" _logger;")
///     .line();
/// assert_eq!(text.parts().len(), 4);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SourceText {
    parts: Vec<CodePart>,
    symbols: SymbolArena,
}

impl SourceText {
    /// Empty text.
    pub fn new() -> Self {
        Self::default()
    }

    /// Literal text; embedded line breaks are honoured at render time.
    pub fn lit(mut self, text: impl Into<String>) -> Self {
        let text = text.into();
        if !text.is_empty() {
            self.parts.push(CodePart::Literal(text));
        }
        self
    }

    /// End the current line.
    pub fn line(mut self) -> Self {
        self.parts.push(CodePart::LineBreak);
        self
    }

    /// Reference a symbol.
    pub fn sym(self, symbol: &Symbol) -> Self {
        self.sym_with(symbol, None)
    }

    /// Symbol reference padded to `alignment` characters.
    pub fn sym_aligned(self, symbol: &Symbol, alignment: i32) -> Self {
        self.sym_with(symbol, Some(alignment))
    }

    /// Append a value with its default spelling.
    pub fn fmt(self, value: impl Into<Value>) -> Self {
        self.fmt_with(value, None, None)
    }

    /// Formatted value with optional alignment and format string.
    pub fn fmt_with(
        mut self,
        value: impl Into<Value>,
        alignment: Option<i32>,
        format: Option<&str>,
    ) -> Self {
        self.parts.push(CodePart::Formatted {
            value: value.into(),
            alignment,
            format: format.map(str::to_string),
        });
        self
    }

    /// Append another fragment.
    pub fn text(mut self, other: impl Into<SourceText>) -> Self {
        self.extend(other.into());
        self
    }

    /// Wrap this fragment in a fixed indent.
    pub fn indented(self, indent: impl Into<String>) -> Self {
        Self {
            parts: vec![CodePart::Indent {
                indent: indent.into(),
                parts: self.parts,
            }],
            symbols: self.symbols,
        }
    }

    /// Wrap this fragment so it is indented by whatever precedes it on its
    /// line.
    pub fn captured(self) -> Self {
        Self {
            parts: vec![CodePart::CaptureIndent(self.parts)],
            symbols: self.symbols,
        }
    }

    /// Join `blocks` with line breaks, aligning every line with the column
    /// the first one starts at.
    pub fn preserve_indent<I, T>(blocks: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<SourceText>,
    {
        let mut joined = SourceText::new();
        for (i, block) in blocks.into_iter().enumerate() {
            if i > 0 {
                joined.parts.push(CodePart::LineBreak);
            }
            joined.extend(block.into());
        }
        joined.captured()
    }

    /// The parts, with symbol handles into [`symbols`](Self::symbols).
    pub fn parts(&self) -> &[CodePart] {
        &self.parts
    }

    pub fn symbols(&self) -> &SymbolArena {
        &self.symbols
    }

    /// Whether no parts were added.
    pub fn is_empty(&self) -> bool {
        self.parts.is_empty()
    }

    pub(crate) fn into_parts(self) -> (Vec<CodePart>, SymbolArena) {
        (self.parts, self.symbols)
    }

    fn sym_with(mut self, symbol: &Symbol, alignment: Option<i32>) -> Self {
        let id = self.symbols.intern(symbol);
        self.parts.push(CodePart::Symbol { id, alignment });
        self
    }

    fn extend(&mut self, other: SourceText) {
        let (parts, symbols) = other.into_parts();
        let map = self.symbols.absorb(&symbols);
        self.parts.extend(parts.iter().map(|part| part.remap(&map)));
    }
}

impl From<&str> for SourceText {
    fn from(text: &str) -> Self {
        SourceText::new().lit(text)
    }
}

impl From<String> for SourceText {
    fn from(text: String) -> Self {
        SourceText::new().lit(text)
    }
}

impl From<&Symbol> for SourceText {
    fn from(symbol: &Symbol) -> Self {
        SourceText::new().sym(symbol)
    }
}
