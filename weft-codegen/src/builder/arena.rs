use indexmap::IndexSet;
use weft_core::Symbol;

use super::SymbolId;

/// Insertion-ordered interning set of referenced symbols.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SymbolArena {
    symbols: IndexSet<Symbol>,
}

impl SymbolArena {
    /// An empty arena.
    pub fn new() -> Self {
        Self::default()
    }

    /// Intern a symbol, returning the existing handle for a known identity.
    pub fn intern(&mut self, symbol: &Symbol) -> SymbolId {
        let index = match self.symbols.get_index_of(symbol) {
            Some(index) => index,
            None => self.symbols.insert_full(symbol.clone()).0,
        };
        SymbolId(index as u32)
    }

    /// The symbol behind `id`, if it was issued by this arena.
    pub fn get(&self, id: SymbolId) -> Option<&Symbol> {
        self.symbols.get_index(id.index())
    }

    /// Number of distinct identities interned.
    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    /// Symbols with their handles, in first-reference order.
    pub fn iter(&self) -> impl Iterator<Item = (SymbolId, &Symbol)> {
        self.symbols
            .iter()
            .enumerate()
            .map(|(index, symbol)| (SymbolId(index as u32), symbol))
    }

    /// Intern every symbol of `other`, returning the handle translation
    /// indexed by `other`'s handles.
    pub(crate) fn absorb(&mut self, other: &SymbolArena) -> Vec<SymbolId> {
        other.symbols.iter().map(|symbol| self.intern(symbol)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_intern_deduplicates_by_identity() {
        let mut arena = SymbolArena::new();
        let a = arena.intern(&Symbol::class("N1", "Foo"));
        let b = arena.intern(&Symbol::class("N2", "Foo"));
        let again = arena.intern(&Symbol::class("N1", "Foo"));
        assert_eq!(a, again);
        assert_ne!(a, b);
        assert_eq!(arena.len(), 2);
        assert_eq!(arena.get(b).map(Symbol::identity).as_deref(), Some("N2.Foo"));
    }

    #[test]
    fn test_absorb_translates_handles() {
        let mut target = SymbolArena::new();
        target.intern(&Symbol::class("N2", "Bar"));

        let mut source = SymbolArena::new();
        source.intern(&Symbol::class("N1", "Foo"));
        source.intern(&Symbol::class("N2", "Bar"));

        let map = target.absorb(&source);
        assert_eq!(map, [SymbolId(1), SymbolId(0)]);
    }
}
