//! Declaration wrappers around generated members.
//!
//! For a target nested in `Outer<T>` the emitted shape is:
//!
//! ```text
//! partial class Outer<T> {
//! [Attribute]
//! partial struct Inner where T : new() {
//!     <body>
//! } }
//! ```

use weft_core::{DeclarationSite, TypeKind, TypeSegment};

use crate::{
    Error, Result,
    builder::{Indent, SourceText, leaves_line_open},
};

/// Re-declares a target type and its containing types around a body.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeclarationEmitter {
    ancestors: Vec<TypeSegment>,
    target: Option<TypeSegment>,
    attributes: Vec<SourceText>,
    constraints: Vec<SourceText>,
    members: Vec<SourceText>,
}

impl DeclarationEmitter {
    /// Emitter for `target` nested in `ancestors` (outermost first).
    pub fn new(ancestors: impl IntoIterator<Item = TypeSegment>, target: TypeSegment) -> Self {
        Self {
            ancestors: ancestors.into_iter().collect(),
            target: Some(target),
            ..Self::default()
        }
    }

    /// Emitter for the site's own target type.
    pub fn for_site(site: &DeclarationSite) -> Self {
        Self::new(site.ancestors.iter().cloned(), site.target.clone())
    }

    /// Emitter for a new type visible only in the generated file.
    pub fn file_only(name: impl Into<String>, kind: TypeKind) -> Self {
        Self::new([], TypeSegment::new(name, kind).file_scoped())
    }

    /// Attribute placed on the target, without the surrounding brackets.
    pub fn attribute(mut self, attribute: impl Into<SourceText>) -> Self {
        self.attributes.push(attribute.into());
        self
    }

    /// Generic constraint clause, e.g. `where T : new()`.
    pub fn constraint(mut self, constraint: impl Into<SourceText>) -> Self {
        self.constraints.push(constraint.into());
        self
    }

    /// Raw member text placed in the body.
    pub fn member(mut self, member: impl Into<SourceText>) -> Self {
        self.members.push(member.into());
        self
    }

    pub fn target(&self) -> Option<&TypeSegment> {
        self.target.as_ref()
    }

    /// Ancestor openers, attributes and the target opener, without a final
    /// line break.
    pub fn opening(&self) -> Result<SourceText> {
        let target = self.target.as_ref().ok_or(Error::NoDeclarationSite)?;
        let mut text = SourceText::new();
        if !self.ancestors.is_empty() {
            let openers = self
                .ancestors
                .iter()
                .map(|ancestor| Ok(format!("partial {} {{", header(ancestor)?)))
                .collect::<Result<Vec<_>>>()?;
            text = text.lit(openers.join(" ")).line();
        }
        for attribute in &self.attributes {
            text = text.lit("[").text(attribute.clone()).lit("]").line();
        }
        let modifier = if target.is_file_scoped { "file" } else { "partial" };
        text = text.lit(format!("{modifier} {}", header(target)?));
        for constraint in &self.constraints {
            text = text.lit(" ").text(constraint.clone());
        }
        Ok(text.lit(" {"))
    }

    /// One brace per declared type, all on one line.
    pub fn closing(&self) -> SourceText {
        let mut closing = String::from("}");
        for _ in &self.ancestors {
            closing.push_str(" }");
        }
        SourceText::from(closing)
    }

    /// The full declaration around `body`, ending with a line break.
    pub fn wrap(&self, body: SourceText, indent: Indent) -> Result<SourceText> {
        let mut text = self.opening()?.line();
        if !body.is_empty() {
            let open = leaves_line_open(body.parts(), false);
            text = text.text(body.indented(indent.unit()));
            if open {
                text = text.line();
            }
        }
        Ok(text.text(self.closing()).line())
    }

    /// The declaration around the collected members.
    pub fn into_text(self, indent: Indent) -> Result<SourceText> {
        let mut body = SourceText::new();
        for member in &self.members {
            let open = leaves_line_open(member.parts(), false);
            body = body.text(member.clone());
            if open {
                body = body.line();
            }
        }
        self.wrap(body, indent)
    }
}

/// Declaration keyword for a kind, e.g. `record struct`.
///
/// Interfaces have no record form, so the record flag is ignored for them.
pub fn keyword(kind: TypeKind, record: bool) -> Result<&'static str> {
    match (kind, record) {
        (TypeKind::Class, false) => Ok("class"),
        (TypeKind::Struct, false) => Ok("struct"),
        (TypeKind::Interface, _) => Ok("interface"),
        (TypeKind::Class, true) => Ok("record class"),
        (TypeKind::Struct, true) => Ok("record struct"),
        (kind, record) => Err(Error::UnsupportedKind { kind, record }),
    }
}

fn header(segment: &TypeSegment) -> Result<String> {
    Ok(format!(
        "{} {}",
        keyword(segment.kind, segment.is_record)?,
        segment.display_name()
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{SourceOptions, builder::SourceBuilder};

    fn render(text: SourceText) -> String {
        let mut builder = SourceBuilder::new(SourceOptions::bare());
        builder.append(text);
        builder.build().unwrap()
    }

    #[test]
    fn test_keywords() {
        assert_eq!(keyword(TypeKind::Class, false).unwrap(), "class");
        assert_eq!(keyword(TypeKind::Struct, true).unwrap(), "record struct");
        assert_eq!(keyword(TypeKind::Interface, true).unwrap(), "interface");
        assert!(matches!(
            keyword(TypeKind::Enum, true),
            Err(Error::UnsupportedKind {
                kind: TypeKind::Enum,
                record: true
            })
        ));
        assert!(keyword(TypeKind::Enum, false).is_err());
        assert!(keyword(TypeKind::Delegate, false).is_err());
    }

    #[test]
    fn test_nested_wrap() {
        let emitter = DeclarationEmitter::new(
            [TypeSegment::new("Outer", TypeKind::Class)],
            TypeSegment::new("Inner", TypeKind::Struct),
        );
        let text = emitter.wrap("X;".into(), Indent::default()).unwrap();
        assert_eq!(
            render(text),
            "partial class Outer {\npartial struct Inner {\n    X;\n} }\n"
        );
    }

    #[test]
    fn test_attributes_constraints_and_generics() {
        let emitter = DeclarationEmitter::new(
            [
                TypeSegment::with_arity("A", TypeKind::Class, 1),
                TypeSegment::new("B", TypeKind::Struct).record(),
            ],
            TypeSegment::new("C", TypeKind::Class).type_parameters(["U"]),
        )
        .attribute("Obsolete")
        .constraint("where U : new()")
        .member("void M() { }");
        let text = emitter.into_text(Indent::Spaces(2)).unwrap();
        assert_eq!(
            render(text),
            "partial class A<T> { partial record struct B {\n\
             [Obsolete]\n\
             partial class C<U> where U : new() {\n  void M() { }\n} } }\n"
        );
    }

    #[test]
    fn test_file_only_type() {
        let text = DeclarationEmitter::file_only("Helpers", TypeKind::Class)
            .into_text(Indent::Tab)
            .unwrap();
        assert_eq!(render(text), "file class Helpers {\n}\n");
    }

    #[test]
    fn test_record_interface_is_a_plain_interface() {
        let emitter = DeclarationEmitter::new([], TypeSegment::new("IFoo", TypeKind::Interface).record());
        let text = emitter.wrap(SourceText::new(), Indent::default()).unwrap();
        assert_eq!(render(text), "partial interface IFoo {\n}\n");
    }

    #[test]
    fn test_unsupported_ancestor_fails() {
        let emitter = DeclarationEmitter::new(
            [TypeSegment::new("E", TypeKind::Enum)],
            TypeSegment::new("Inner", TypeKind::Class),
        );
        assert!(matches!(
            emitter.opening(),
            Err(Error::UnsupportedKind { .. })
        ));
    }

    #[test]
    fn test_body_ending_with_break_gets_no_extra_line() {
        let emitter = DeclarationEmitter::new([], TypeSegment::new("Foo", TypeKind::Class));
        let text = emitter.wrap("a;\nb;\n".into(), Indent::default()).unwrap();
        assert_eq!(render(text), "partial class Foo {\n    a;\n    b;\n}\n");
    }
}
