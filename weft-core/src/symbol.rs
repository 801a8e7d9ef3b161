//! Type identities referenced by generated text.

use std::{
    cmp::Ordering,
    fmt,
    hash::{Hash, Hasher},
};

use serde::{Deserialize, Serialize};

use crate::{Namespace, TypeKind};

/// One link of a containment chain: a named type with its generic parameters.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TypeSegment {
    /// Unqualified identifier, without generic arguments.
    pub name: String,
    pub kind: TypeKind,
    /// Generic parameter names; the arity is their count.
    #[serde(default)]
    pub type_parameters: Vec<String>,
    /// Record-like declaration (`record class`, `record struct`).
    #[serde(default)]
    pub is_record: bool,
    /// Type visible only inside its own file.
    #[serde(default)]
    pub is_file_scoped: bool,
}

impl TypeSegment {
    /// Create a non-generic segment.
    pub fn new(name: impl Into<String>, kind: TypeKind) -> Self {
        Self {
            name: name.into(),
            kind,
            type_parameters: Vec::new(),
            is_record: false,
            is_file_scoped: false,
        }
    }

    /// Create a segment when the frontend only knows the generic arity.
    ///
    /// Parameters are named `T` for arity one and `T1..Tn` otherwise.
    pub fn with_arity(name: impl Into<String>, kind: TypeKind, arity: usize) -> Self {
        let params = match arity {
            0 => Vec::new(),
            1 => vec!["T".to_string()],
            n => (1..=n).map(|i| format!("T{i}")).collect(),
        };
        Self::new(name, kind).type_parameters(params)
    }

    /// Set the generic parameter names.
    pub fn type_parameters(mut self, params: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.type_parameters = params.into_iter().map(Into::into).collect();
        self
    }

    /// Mark as record-like.
    pub fn record(mut self) -> Self {
        self.is_record = true;
        self
    }

    /// Mark as file-scoped.
    pub fn file_scoped(mut self) -> Self {
        self.is_file_scoped = true;
        self
    }

    /// Number of generic parameters.
    pub fn arity(&self) -> usize {
        self.type_parameters.len()
    }

    /// Source spelling: `Name` or `Name<T1, T2>`.
    pub fn display_name(&self) -> String {
        if self.type_parameters.is_empty() {
            self.name.clone()
        } else {
            format!("{}<{}>", self.name, self.type_parameters.join(", "))
        }
    }

    /// Metadata spelling: `Name` or ``Name`2``.
    pub fn metadata_name(&self) -> String {
        match self.arity() {
            0 => self.name.clone(),
            n => format!("{}`{n}", self.name),
        }
    }
}

/// Identity of a declared type.
///
/// Two symbols are the same reference when their fully-qualified identity
/// keys match; equality, ordering and hashing all go through
/// [`Symbol::identity`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Symbol {
    #[serde(default)]
    namespace: Namespace,
    /// Containing types, outermost first.
    #[serde(default)]
    containing: Vec<TypeSegment>,
    #[serde(flatten)]
    segment: TypeSegment,
}

impl Symbol {
    /// Create a non-generic symbol in the global namespace.
    pub fn new(name: impl Into<String>, kind: TypeKind) -> Self {
        Self::from_segment(Namespace::global(), Vec::new(), TypeSegment::new(name, kind))
    }

    /// Assemble a symbol from its parts; `containing` lists outermost first.
    pub fn from_segment(
        namespace: Namespace,
        containing: Vec<TypeSegment>,
        segment: TypeSegment,
    ) -> Self {
        Self {
            namespace,
            containing,
            segment,
        }
    }

    /// Shorthand for a class in a dotted namespace, e.g. `Symbol::class("N1", "Foo")`.
    pub fn class(namespace: &str, name: impl Into<String>) -> Self {
        Self::new(name, TypeKind::Class).in_namespace(namespace)
    }

    /// Place the symbol in a dotted namespace path.
    pub fn in_namespace(mut self, namespace: impl Into<Namespace>) -> Self {
        self.namespace = namespace.into();
        self
    }

    /// Nest the symbol inside the given containing types (outermost first).
    pub fn nested_in(mut self, containing: impl IntoIterator<Item = TypeSegment>) -> Self {
        self.containing = containing.into_iter().collect();
        self
    }

    /// Set the generic parameter names.
    pub fn type_parameters(mut self, params: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.segment = self.segment.type_parameters(params);
        self
    }

    /// Mark the symbol as a record form.
    pub fn record(mut self) -> Self {
        self.segment.is_record = true;
        self
    }

    /// Mark the symbol as visible only in its own file.
    pub fn file_scoped(mut self) -> Self {
        self.segment.is_file_scoped = true;
        self
    }

    /// Enclosing namespace; global when empty.
    pub fn namespace(&self) -> &Namespace {
        &self.namespace
    }

    /// Containing types, outermost first.
    pub fn containing(&self) -> &[TypeSegment] {
        &self.containing
    }

    /// The innermost type segment, i.e. the symbol itself.
    pub fn segment(&self) -> &TypeSegment {
        &self.segment
    }

    /// Simple name without type parameters.
    pub fn name(&self) -> &str {
        &self.segment.name
    }

    pub fn kind(&self) -> TypeKind {
        self.segment.kind
    }

    /// Number of generic parameters on the innermost segment.
    pub fn arity(&self) -> usize {
        self.segment.arity()
    }

    pub fn is_record(&self) -> bool {
        self.segment.is_record
    }

    pub fn is_file_scoped(&self) -> bool {
        self.segment.is_file_scoped
    }

    /// Unqualified identifier used to detect collisions.
    pub fn short_name(&self) -> &str {
        &self.segment.name
    }

    /// Leading identifier of the minimal spelling: the outermost containing
    /// type, or the symbol itself when it is not nested.
    pub fn head_name(&self) -> &str {
        self.containing
            .first()
            .map_or(self.segment.name.as_str(), |outer| outer.name.as_str())
    }

    /// Identity key of the type named by [`head_name`](Self::head_name).
    pub fn head_identity(&self) -> String {
        match self.containing.first() {
            Some(outer) => format!("{}{}", self.namespace_prefix(), outer.metadata_name()),
            None => self.identity(),
        }
    }

    /// Path of the type named by [`head_name`](Self::head_name), without
    /// generic arguments.
    pub fn head_path(&self) -> String {
        format!("{}{}", self.namespace_prefix(), self.head_name())
    }

    /// Identity key: ``N1.N2.Outer`1+Inner`2``.
    pub fn identity(&self) -> String {
        let mut key = self.namespace_prefix();
        for outer in &self.containing {
            key.push_str(&outer.metadata_name());
            key.push('+');
        }
        key.push_str(&self.segment.metadata_name());
        key
    }

    /// Containing-type qualified spelling: `Outer<T>.Inner`.
    pub fn minimal_name(&self) -> String {
        let mut name = String::new();
        for outer in &self.containing {
            name.push_str(&outer.display_name());
            name.push('.');
        }
        name.push_str(&self.segment.display_name());
        name
    }

    /// Fully qualified spelling: `N1.Outer<T>.Inner`.
    pub fn qualified_name(&self) -> String {
        let mut name = self.namespace_prefix();
        name.push_str(&self.minimal_name());
        name
    }

    /// Fully qualified path without generic arguments: `N1.Outer.Inner`.
    pub fn qualified_path(&self) -> String {
        let mut path = self.namespace_prefix();
        for outer in &self.containing {
            path.push_str(&outer.name);
            path.push('.');
        }
        path.push_str(&self.segment.name);
        path
    }

    fn namespace_prefix(&self) -> String {
        if self.namespace.is_global() {
            String::new()
        } else {
            format!("{}.", self.namespace)
        }
    }
}

impl PartialEq for Symbol {
    fn eq(&self, other: &Self) -> bool {
        self.identity() == other.identity()
    }
}

impl Eq for Symbol {}

impl Hash for Symbol {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.identity().hash(state);
    }
}

impl PartialOrd for Symbol {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Symbol {
    fn cmp(&self, other: &Self) -> Ordering {
        self.identity().cmp(&other.identity())
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.qualified_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn nested() -> Symbol {
        Symbol::new("Inner", TypeKind::Struct)
            .in_namespace("N1.N2")
            .nested_in([TypeSegment::with_arity("Outer", TypeKind::Class, 1)])
            .type_parameters(["U", "V"])
    }

    #[test]
    fn test_identity_includes_arity() {
        assert_eq!(nested().identity(), "N1.N2.Outer`1+Inner`2");
        assert_ne!(
            Symbol::class("N1", "Foo"),
            Symbol::class("N1", "Foo").type_parameters(["T"])
        );
    }

    #[test]
    fn test_spellings() {
        let symbol = nested();
        assert_eq!(symbol.short_name(), "Inner");
        assert_eq!(symbol.minimal_name(), "Outer<T>.Inner<U, V>");
        assert_eq!(symbol.qualified_name(), "N1.N2.Outer<T>.Inner<U, V>");
        assert_eq!(symbol.qualified_path(), "N1.N2.Outer.Inner");
    }

    #[test]
    fn test_head_of_nested_symbol() {
        let symbol = nested();
        assert_eq!(symbol.head_name(), "Outer");
        assert_eq!(symbol.head_identity(), "N1.N2.Outer`1");
        assert_eq!(symbol.head_path(), "N1.N2.Outer");

        let top = Symbol::class("N1", "Foo");
        assert_eq!(top.head_name(), "Foo");
        assert_eq!(top.head_identity(), top.identity());
    }

    #[test]
    fn test_global_namespace_spelling() {
        let symbol = Symbol::new("Foo", TypeKind::Interface);
        assert_eq!(symbol.identity(), "Foo");
        assert_eq!(symbol.qualified_name(), "Foo");
    }

    #[test]
    fn test_equality_ignores_non_identity_fields() {
        let a = Symbol::class("N1", "Foo");
        let b = Symbol::class("N1", "Foo").record();
        assert_eq!(a, b);
    }

    #[test]
    fn test_with_arity_names() {
        let one = TypeSegment::with_arity("Box", TypeKind::Class, 1);
        let three = TypeSegment::with_arity("Tuple", TypeKind::Struct, 3);
        assert_eq!(one.display_name(), "Box<T>");
        assert_eq!(three.display_name(), "Tuple<T1, T2, T3>");
        assert_eq!(three.metadata_name(), "Tuple`3");
    }

    #[test]
    fn test_deserialize_flattened() {
        let symbol: Symbol = serde_json::from_str(
            r#"{ "namespace": "N1", "name": "Foo", "kind": "class", "type_parameters": ["T"] }"#,
        )
        .unwrap();
        assert_eq!(symbol.identity(), "N1.Foo`1");
    }
}
