//! Freeze-time symbol naming.
//!
//! Every symbol referenced from the part tree gets one display name: its
//! minimal spelling when nothing else in the build (or in the ambient scope)
//! shares its short name or the leading identifier of that spelling, and its
//! fully-qualified spelling otherwise.

use std::collections::{BTreeMap, BTreeSet};

use tracing::{debug, trace};
use weft_core::Symbol;

use crate::{
    Error, Result,
    builder::{CodePart, SymbolArena, SymbolId},
};

/// Resolved spelling of one referenced symbol.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NameEntry {
    /// Identity key of the symbol, e.g. ``N1.Outer`1+Foo``.
    pub identity: String,
    /// Text substituted for the symbol at render time.
    pub display: String,
}

/// Immutable mapping from symbol handle to display name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct NameTable {
    entries: BTreeMap<SymbolId, NameEntry>,
    namespaces: BTreeSet<String>,
}

impl NameTable {
    /// Display name for a handle.
    pub fn get(&self, id: SymbolId) -> Option<&str> {
        self.entries.get(&id).map(|entry| entry.display.as_str())
    }

    /// Display name for a symbol identity, if it was referenced.
    pub fn display_name(&self, symbol: &Symbol) -> Option<&str> {
        let identity = symbol.identity();
        self.entries
            .values()
            .find(|entry| entry.identity == identity)
            .map(|entry| entry.display.as_str())
    }

    /// Namespaces of the symbols spelled without their namespace; the
    /// generated file has to import these.
    pub fn namespaces(&self) -> impl Iterator<Item = &str> {
        self.namespaces.iter().map(String::as_str)
    }

    /// Number of resolved symbols.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in handle order.
    pub fn iter(&self) -> impl Iterator<Item = (SymbolId, &NameEntry)> {
        self.entries.iter().map(|(id, entry)| (*id, entry))
    }
}

/// Naming inputs that come from the build rather than the part tree.
#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct ResolveContext<'a> {
    /// Fully-qualified spellings visible by short name at the output position.
    pub ambient_names: &'a [String],
    pub qualify_with_global: bool,
}

pub(crate) fn resolve(
    parts: &[CodePart],
    arena: &SymbolArena,
    ctx: ResolveContext<'_>,
) -> Result<NameTable> {
    // Keyed by identity so naming never depends on append order.
    let mut referenced: BTreeMap<String, (SymbolId, &Symbol)> = BTreeMap::new();
    let mut missing = None;
    collect(parts, &mut |id| match arena.get(id) {
        Some(symbol) => {
            referenced.entry(symbol.identity()).or_insert((id, symbol));
        }
        None => {
            missing.get_or_insert(id);
        }
    });
    if let Some(id) = missing {
        return Err(Error::UnresolvedSymbolReference {
            symbol: format!("#{}", id.index()),
        });
    }

    // Identifier -> identities of the referenced types it would bind to.
    let mut bindings: BTreeMap<&str, BTreeSet<String>> = BTreeMap::new();
    for (_, symbol) in referenced.values() {
        bindings
            .entry(symbol.short_name())
            .or_default()
            .insert(symbol.identity());
        bindings
            .entry(symbol.head_name())
            .or_default()
            .insert(symbol.head_identity());
    }
    let ambiguous = |name: &str| bindings.get(name).is_some_and(|types| types.len() > 1);

    let mut entries = BTreeMap::new();
    let mut namespaces = BTreeSet::new();
    let mut qualified = 0usize;
    for (id, symbol) in referenced.values() {
        let collides = ambiguous(symbol.short_name())
            || ambiguous(symbol.head_name())
            || collides_with_ambient(
                symbol.short_name(),
                &symbol.qualified_path(),
                ctx.ambient_names,
            )
            || collides_with_ambient(symbol.head_name(), &symbol.head_path(), ctx.ambient_names);
        let spelling = if collides {
            qualified += 1;
            full_name(symbol, ctx.qualify_with_global)
        } else {
            if !symbol.namespace().is_global() {
                namespaces.insert(symbol.namespace().to_string());
            }
            symbol.minimal_name()
        };
        trace!(identity = %symbol.identity(), spelling = %spelling, "resolved symbol name");
        entries.insert(
            *id,
            NameEntry {
                identity: symbol.identity(),
                display: spelling,
            },
        );
    }

    debug!(
        symbols = entries.len(),
        identifiers = bindings.len(),
        qualified,
        "resolved symbol names"
    );
    Ok(NameTable {
        entries,
        namespaces,
    })
}

/// Visit every symbol handle in tree order.
fn collect(parts: &[CodePart], visit: &mut impl FnMut(SymbolId)) {
    for part in parts {
        match part {
            CodePart::Symbol { id, .. } => visit(*id),
            CodePart::Indent { parts, .. } | CodePart::CaptureIndent(parts) => collect(parts, visit),
            CodePart::Literal(_) | CodePart::LineBreak | CodePart::Formatted { .. } => {}
        }
    }
}

fn full_name(symbol: &Symbol, qualify_with_global: bool) -> String {
    if qualify_with_global {
        format!("global::{}", symbol.qualified_name())
    } else {
        symbol.qualified_name()
    }
}

/// An ambient entry collides when it ends in `name` but names a type other
/// than the one at `own_path`.
fn collides_with_ambient(name: &str, own_path: &str, ambient: &[String]) -> bool {
    ambient.iter().any(|entry| {
        let path = ambient_path(entry);
        let last = path.rsplit('.').next().unwrap_or(path.as_str());
        last == name && path != own_path
    })
}

/// Dotted path of an ambient entry without generic arguments:
/// `global::N1.Foo<T>` and ``N1.Outer`1+Foo`` become `N1.Foo` and
/// `N1.Outer.Foo`.
fn ambient_path(entry: &str) -> String {
    let entry = entry.trim();
    let entry = entry.strip_prefix("global::").unwrap_or(entry);
    let mut path = String::with_capacity(entry.len());
    let mut depth = 0usize;
    let mut arity = false;
    for c in entry.chars() {
        match c {
            '<' => depth += 1,
            '>' => depth = depth.saturating_sub(1),
            _ if depth > 0 => {}
            '`' => arity = true,
            c if arity && c.is_ascii_digit() => {}
            '+' => {
                arity = false;
                path.push('.');
            }
            c => {
                arity = false;
                path.push(c);
            }
        }
    }
    path
}

#[cfg(test)]
mod tests {
    use weft_core::{TypeKind, TypeSegment};

    use super::*;

    fn table(symbols: &[Symbol], ambient: &[&str], global: bool) -> (NameTable, Vec<SymbolId>) {
        let mut arena = SymbolArena::new();
        let ids: Vec<_> = symbols.iter().map(|s| arena.intern(s)).collect();
        let parts: Vec<_> = ids
            .iter()
            .map(|id| CodePart::Symbol {
                id: *id,
                alignment: None,
            })
            .collect();
        let ambient: Vec<String> = ambient.iter().map(|s| s.to_string()).collect();
        let ctx = ResolveContext {
            ambient_names: &ambient,
            qualify_with_global: global,
        };
        (resolve(&parts, &arena, ctx).unwrap(), ids)
    }

    #[test]
    fn test_unique_short_name_is_minimal() {
        let (names, ids) = table(&[Symbol::class("N1", "Foo")], &[], false);
        assert_eq!(names.get(ids[0]), Some("Foo"));
    }

    #[test]
    fn test_shared_short_name_is_qualified() {
        let (names, ids) = table(
            &[Symbol::class("N1", "Foo"), Symbol::class("N2", "Foo")],
            &[],
            false,
        );
        assert_eq!(names.get(ids[0]), Some("N1.Foo"));
        assert_eq!(names.get(ids[1]), Some("N2.Foo"));
    }

    #[test]
    fn test_generic_arity_shares_short_name() {
        let generic = Symbol::class("N1", "Foo").type_parameters(["T"]);
        let (names, ids) = table(&[Symbol::class("N1", "Foo"), generic], &[], false);
        assert_eq!(names.get(ids[0]), Some("N1.Foo"));
        assert_eq!(names.get(ids[1]), Some("N1.Foo<T>"));
    }

    #[test]
    fn test_ambient_collision_qualifies() {
        let (names, ids) = table(&[Symbol::class("N1", "Foo")], &["N2.Foo"], false);
        assert_eq!(names.get(ids[0]), Some("N1.Foo"));
    }

    #[test]
    fn test_ambient_entry_for_same_type_is_harmless() {
        let (names, ids) = table(
            &[Symbol::class("N1", "Foo").type_parameters(["T"])],
            &["global::N1.Foo<T>", "System.String"],
            false,
        );
        assert_eq!(names.get(ids[0]), Some("Foo<T>"));
    }

    #[test]
    fn test_global_prefix_option() {
        let (names, ids) = table(
            &[Symbol::class("N1", "Foo"), Symbol::new("Foo", TypeKind::Struct)],
            &[],
            true,
        );
        assert_eq!(names.get(ids[0]), Some("global::N1.Foo"));
        assert_eq!(names.get(ids[1]), Some("global::Foo"));
    }

    #[test]
    fn test_nested_minimal_name_keeps_containing_types() {
        let nested = Symbol::new("Inner", TypeKind::Struct)
            .in_namespace("N1")
            .nested_in([TypeSegment::new("Outer", TypeKind::Class)]);
        let (names, ids) = table(&[nested.clone()], &[], false);
        assert_eq!(names.get(ids[0]), Some("Outer.Inner"));
        assert_eq!(names.display_name(&nested), Some("Outer.Inner"));
    }

    #[test]
    fn test_nested_head_shadowed_by_other_type_qualifies() {
        let outer = Symbol::class("N1", "Outer");
        let inner = Symbol::new("Inner", TypeKind::Class)
            .in_namespace("N2")
            .nested_in([TypeSegment::new("Outer", TypeKind::Class)]);
        let (names, ids) = table(&[outer, inner], &[], false);
        assert_eq!(names.get(ids[0]), Some("N1.Outer"));
        assert_eq!(names.get(ids[1]), Some("N2.Outer.Inner"));
    }

    #[test]
    fn test_nested_head_shared_with_its_own_container_stays_minimal() {
        let outer = Symbol::class("N1", "Outer");
        let inner = Symbol::new("Inner", TypeKind::Class)
            .in_namespace("N1")
            .nested_in([TypeSegment::new("Outer", TypeKind::Class)]);
        let (names, ids) = table(&[outer, inner], &[], false);
        assert_eq!(names.get(ids[0]), Some("Outer"));
        assert_eq!(names.get(ids[1]), Some("Outer.Inner"));
    }

    #[test]
    fn test_ambient_head_collision_qualifies() {
        let inner = Symbol::new("Inner", TypeKind::Class)
            .in_namespace("N1")
            .nested_in([TypeSegment::new("Outer", TypeKind::Class)]);
        let (names, ids) = table(&[inner], &["N9.Outer"], false);
        assert_eq!(names.get(ids[0]), Some("N1.Outer.Inner"));
    }

    #[test]
    fn test_ambient_metadata_spelling() {
        let (names, ids) = table(&[Symbol::class("N1", "Foo")], &["N2.Outer`1+Foo"], false);
        assert_eq!(names.get(ids[0]), Some("N1.Foo"));

        let nested = Symbol::new("Foo", TypeKind::Class)
            .in_namespace("N2")
            .nested_in([TypeSegment::with_arity("Outer", TypeKind::Class, 1)]);
        let (names, ids) = table(&[nested], &["N2.Outer`1+Foo"], false);
        assert_eq!(names.get(ids[0]), Some("Outer<T>.Foo"));
    }

    #[test]
    fn test_ambient_path_normalization() {
        assert_eq!(ambient_path("global::N1.Foo<T>"), "N1.Foo");
        assert_eq!(ambient_path("N1.Outer`1+Foo`2"), "N1.Outer.Foo");
        assert_eq!(ambient_path("N1.Map<K, List<V>>.Entry"), "N1.Map.Entry");
        assert_eq!(ambient_path("N1.Vec3"), "N1.Vec3");
    }

    #[test]
    fn test_minimal_names_record_their_namespaces() {
        let (names, _) = table(
            &[
                Symbol::class("N1", "Foo"),
                Symbol::class("N2", "Bar"),
                Symbol::class("N3", "Bar"),
                Symbol::new("Baz", TypeKind::Class),
            ],
            &[],
            false,
        );
        assert_eq!(names.namespaces().collect::<Vec<_>>(), ["N1"]);
    }

    #[test]
    fn test_unknown_handle_is_unresolved() {
        let parts = [CodePart::Symbol {
            id: SymbolId(7),
            alignment: None,
        }];
        let err = resolve(&parts, &SymbolArena::new(), ResolveContext::default()).unwrap_err();
        assert!(matches!(err, Error::UnresolvedSymbolReference { .. }));
    }

    #[test]
    fn test_unreferenced_symbols_are_not_named() {
        let mut arena = SymbolArena::new();
        arena.intern(&Symbol::class("N1", "Foo"));
        let names = resolve(&[], &arena, ResolveContext::default()).unwrap();
        assert!(names.is_empty());
    }
}
