//! The accumulating builder.

use tracing::debug;
use weft_core::{DeclarationSite, GeneratedSource, Symbol, TypeKind};

use super::{
    CodePart, ScopeGuard, SourceText, SymbolArena, Value, leaves_line_open,
    scope::ScopeId,
};
use crate::{
    DeclarationEmitter, Error, Result,
    diagnostic::{DiagnosticSink, SiteRequirement},
    frozen::{FrozenSource, RenderSettings},
    options::SourceOptions,
    resolve::{self, NameTable, ResolveContext},
};

/// Collects code parts for one generated unit.
///
/// Symbol references stay placeholders until [`freeze`](Self::freeze), which
/// picks a spelling for every referenced symbol at once.
///
/// A builder is owned by one thread for its whole life; distinct builders
/// share nothing and can run in parallel.
///
/// # Example
///
/// ```
/// use weft_codegen::{SourceBuilder, SourceOptions};
/// use weft_core::Symbol;
///
/// let mut builder = SourceBuilder::new(SourceOptions::bare());
/// builder
///     .append_literal("var x = new ")
///     .append_symbol(&Symbol::class("N1", "Foo"))
///     .append_line_with("();");
/// assert_eq!(builder.build().unwrap(), "var x = new Foo();\n");
/// ```
#[derive(Debug)]
pub struct SourceBuilder {
    options: SourceOptions,
    site: Option<DeclarationSite>,
    symbols: SymbolArena,
    frames: Vec<Frame>,
    scopes: Vec<OpenScope>,
    next_scope: u64,
}

/// One level of the indent stack and the parts appended inside it.
#[derive(Debug)]
struct Frame {
    indent: String,
    parts: Vec<CodePart>,
    line_open: bool,
}

#[derive(Debug)]
struct OpenScope {
    id: ScopeId,
    /// Frame count right after the scope pushed its indent.
    depth: usize,
    trailing: SourceText,
}

impl SourceBuilder {
    /// A builder with no declaration site.
    pub fn new(options: SourceOptions) -> Self {
        Self {
            options,
            site: None,
            symbols: SymbolArena::new(),
            frames: vec![Frame {
                indent: String::new(),
                parts: Vec::new(),
                line_open: false,
            }],
            scopes: Vec::new(),
            next_scope: 0,
        }
    }

    /// A builder for `site`. The configured file header is prepended when
    /// the builder is frozen, once the referenced namespaces are known.
    pub fn for_site(site: DeclarationSite, options: SourceOptions) -> Self {
        let mut builder = Self::new(options);
        builder.site = Some(site);
        builder
    }

    /// Check `requirement` against `site` and create a builder only when it
    /// holds. A rejected site is reported once to `sink` and yields `None`.
    pub fn create(
        site: DeclarationSite,
        options: SourceOptions,
        requirement: SiteRequirement,
        sink: &mut impl DiagnosticSink,
    ) -> Option<Self> {
        if let Some(diagnostic) = requirement.check(&site) {
            debug!(site = %site.display_name(), code = %diagnostic.code, "declaration site rejected");
            sink.report(diagnostic);
            return None;
        }
        Some(Self::for_site(site, options))
    }

    /// Options the builder was created with.
    pub fn options(&self) -> &SourceOptions {
        &self.options
    }

    /// The declaration site, when created for one.
    pub fn site(&self) -> Option<&DeclarationSite> {
        self.site.as_ref()
    }

    /// Append a fragment, re-interning its symbols.
    pub fn append(&mut self, text: impl Into<SourceText>) -> &mut Self {
        let (parts, symbols) = text.into().into_parts();
        let map = self.symbols.absorb(&symbols);
        for part in &parts {
            self.push_part(part.remap(&map));
        }
        self
    }

    /// Append verbatim text; embedded newlines end lines and are re-indented.
    pub fn append_literal(&mut self, text: &str) -> &mut Self {
        if !text.is_empty() {
            self.push_part(CodePart::Literal(text.to_string()));
        }
        self
    }

    /// Append a reference to `symbol`. Its spelling is decided at freeze.
    pub fn append_symbol(&mut self, symbol: &Symbol) -> &mut Self {
        let id = self.symbols.intern(symbol);
        self.push_part(CodePart::Symbol {
            id,
            alignment: None,
        })
    }

    /// Like [`append_symbol`](Self::append_symbol), padded to `|alignment|`
    /// characters: right-justified when positive, left-justified when negative.
    pub fn append_symbol_aligned(&mut self, symbol: &Symbol, alignment: i32) -> &mut Self {
        let id = self.symbols.intern(symbol);
        self.push_part(CodePart::Symbol {
            id,
            alignment: Some(alignment),
        })
    }

    /// Append a value rendered with an optional format string and alignment.
    /// An empty value without alignment leaves the line state untouched.
    pub fn append_formatted(
        &mut self,
        value: impl Into<Value>,
        alignment: Option<i32>,
        format: Option<&str>,
    ) -> &mut Self {
        self.push_part(CodePart::Formatted {
            value: value.into(),
            alignment,
            format: format.map(str::to_string),
        })
    }

    /// End the current line.
    pub fn append_line(&mut self) -> &mut Self {
        self.push_part(CodePart::LineBreak)
    }

    /// Append `text`, then end the line.
    pub fn append_line_with(&mut self, text: impl Into<SourceText>) -> &mut Self {
        self.append(text).append_line()
    }

    /// Whether the current line holds text not yet ended by a line break.
    pub fn has_pending_line(&self) -> bool {
        self.top().line_open
    }

    /// Open a fixed indent level; pair with [`pop_indent`](Self::pop_indent).
    pub fn push_indent(&mut self, indent: impl Into<String>) -> &mut Self {
        let line_open = self.top().line_open;
        self.frames.push(Frame {
            indent: indent.into(),
            parts: Vec::new(),
            line_open,
        });
        self
    }

    /// Close the innermost indent opened by [`push_indent`](Self::push_indent).
    ///
    /// Fails when no indent is open, or when the innermost level belongs to
    /// an open scope.
    pub fn pop_indent(&mut self) -> Result<&mut Self> {
        if self.frames.len() == 1 {
            return Err(Error::unbalanced("pop with empty indent stack"));
        }
        if self
            .scopes
            .last()
            .is_some_and(|scope| scope.depth == self.frames.len())
        {
            return Err(Error::unbalanced("pop_indent would close a scope's indent"));
        }
        self.pop_frame();
        Ok(self)
    }

    /// Open a scope: `leading` on its own line, then one indent level until
    /// the guard closes and writes `trailing`.
    pub fn begin_scope(
        &mut self,
        leading: impl Into<SourceText>,
        trailing: impl Into<SourceText>,
    ) -> ScopeGuard<'_> {
        if self.has_pending_line() {
            self.append_line();
        }
        self.append(leading).append_line();
        let unit = self.options.indent.unit();
        self.push_indent(unit);

        let id = ScopeId(self.next_scope);
        self.next_scope += 1;
        self.scopes.push(OpenScope {
            id,
            depth: self.frames.len(),
            trailing: trailing.into(),
        });
        ScopeGuard::new(self, id)
    }

    /// Run `f` inside a scope, closing it whether `f` succeeds or not.
    pub fn with_scope<T>(
        &mut self,
        leading: impl Into<SourceText>,
        trailing: impl Into<SourceText>,
        f: impl FnOnce(&mut SourceBuilder) -> Result<T>,
    ) -> Result<T> {
        let mut scope = self.begin_scope(leading, trailing);
        let value = f(&mut scope);
        scope.close()?;
        value
    }

    /// Open the declaration of the site's target type, nested in its
    /// containing types.
    pub fn begin_target_type(&mut self) -> Result<ScopeGuard<'_>> {
        let site = self.site.as_ref().ok_or(Error::NoDeclarationSite)?;
        let emitter = DeclarationEmitter::for_site(site);
        self.begin_declaration(&emitter)
    }

    /// Open the declaration of a new file-local type.
    pub fn begin_file_only_type(
        &mut self,
        name: impl Into<String>,
        kind: TypeKind,
    ) -> Result<ScopeGuard<'_>> {
        self.begin_declaration(&DeclarationEmitter::file_only(name, kind))
    }

    /// Open the declaration described by `emitter`; its members are ignored.
    pub fn begin_declaration(&mut self, emitter: &DeclarationEmitter) -> Result<ScopeGuard<'_>> {
        let opening = emitter.opening()?;
        Ok(self.begin_scope(opening, emitter.closing()))
    }

    /// Append the full declaration described by `emitter`, members included.
    pub fn declare(&mut self, emitter: DeclarationEmitter) -> Result<&mut Self> {
        if self.has_pending_line() {
            self.append_line();
        }
        let text = emitter.into_text(self.options.indent)?;
        Ok(self.append(text))
    }

    /// Suggested hint name for the generated unit.
    pub fn preferred_hint_name(&self, prefix: &str, suffix: &str) -> Result<String> {
        let site = self.site.as_ref().ok_or(Error::NoDeclarationSite)?;
        Ok(site.preferred_hint_name(prefix, suffix, &self.options.hint_extension))
    }

    /// Resolve every referenced symbol and seal the parts.
    pub fn freeze(mut self) -> Result<FrozenSource> {
        if !self.scopes.is_empty() {
            return Err(Error::unbalanced("freeze with an open scope"));
        }
        if self.frames.len() > 1 {
            return Err(Error::unbalanced("freeze with an unpopped indent"));
        }
        let body = self.frames.pop().map(|frame| frame.parts).unwrap_or_default();
        let ambient_names = self
            .site
            .as_ref()
            .map(|site| site.ambient_names.as_slice())
            .unwrap_or_default();
        let names = resolve::resolve(
            &body,
            &self.symbols,
            ResolveContext {
                ambient_names,
                qualify_with_global: self.options.qualify_with_global,
            },
        )?;
        let mut root = self
            .site
            .as_ref()
            .map(|site| self.header(site, &names))
            .unwrap_or_default();
        root.extend(body);
        debug!(
            parts = root.len(),
            symbols = self.symbols.len(),
            named = names.len(),
            "froze source"
        );
        Ok(FrozenSource::from_parts(
            root,
            names,
            RenderSettings::from(&self.options),
        ))
    }

    /// Freeze and render in one step.
    pub fn build(self) -> Result<String> {
        self.freeze()?.render()
    }

    /// Freeze, render and pair the text with the preferred hint name.
    pub fn generate(self, prefix: &str, suffix: &str) -> Result<GeneratedSource> {
        let hint_name = self.preferred_hint_name(prefix, suffix)?;
        Ok(GeneratedSource::new(hint_name, self.build()?))
    }

    pub(super) fn close_scope(&mut self, id: ScopeId) -> Result<()> {
        match self.scopes.last() {
            Some(scope) if scope.id == id => {}
            Some(_) => return Err(Error::unbalanced("scope closed out of order")),
            None => return Err(Error::unbalanced("scope already closed")),
        }
        let depth = self.scopes.last().map_or(0, |scope| scope.depth);
        if self.frames.len() != depth {
            return Err(Error::unbalanced("indent pushed inside a scope was not popped"));
        }
        if self.has_pending_line() {
            self.append_line();
        }
        self.pop_frame();
        if let Some(scope) = self.scopes.pop() {
            self.append(scope.trailing).append_line();
        }
        Ok(())
    }

    /// Header parts: the auto-generated marker, the site's imports followed
    /// by the namespaces of minimally spelled symbols, and the file-scoped
    /// namespace.
    fn header(&self, site: &DeclarationSite, names: &NameTable) -> Vec<CodePart> {
        let header = self.options.header;
        let mut lines = Vec::new();
        if header.auto_generated {
            lines.push("// <auto-generated/>".to_string());
        }
        if header.imports {
            let own = site.namespace.to_string();
            let mut imports: Vec<&str> = Vec::new();
            for import in site.imports.iter().map(String::as_str).chain(names.namespaces()) {
                if import != own && !imports.contains(&import) {
                    imports.push(import);
                }
            }
            lines.extend(imports.into_iter().map(|import| format!("using {import};")));
        }
        if header.namespace && !site.namespace.is_global() {
            lines.push(format!("namespace {};", site.namespace));
        }
        if lines.is_empty() {
            return Vec::new();
        }
        let mut parts = Vec::with_capacity(lines.len() * 2 + 1);
        for line in lines {
            parts.push(CodePart::Literal(line));
            parts.push(CodePart::LineBreak);
        }
        parts.push(CodePart::LineBreak);
        parts
    }

    fn top(&self) -> &Frame {
        // The root frame is never popped before freeze consumes the builder.
        &self.frames[self.frames.len() - 1]
    }

    fn push_part(&mut self, part: CodePart) -> &mut Self {
        let last = self.frames.len() - 1;
        let frame = &mut self.frames[last];
        frame.line_open = leaves_line_open(std::slice::from_ref(&part), frame.line_open);
        frame.parts.push(part);
        self
    }

    /// Fold the top frame into its parent as an indent part.
    fn pop_frame(&mut self) {
        if self.frames.len() < 2 {
            return;
        }
        if let Some(frame) = self.frames.pop() {
            self.push_part(CodePart::Indent {
                indent: frame.indent,
                parts: frame.parts,
            });
        }
    }
}
