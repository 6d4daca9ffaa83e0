//! Fixed, ordered symbol sets for enumerated columns.

use std::hash::Hash;
use std::sync::Arc;

use indexmap::IndexSet;

/// An immutable, ordered set of symbols.
///
/// A symbol's ordinal is its position in the set and never changes, so
/// ordinals written to a region stay meaningful for the universe's lifetime.
/// Columns hold a [`SharedUniverse`]; they reference the universe, they do
/// not own it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Universe<T: Hash + Eq> {
    symbols: IndexSet<T>,
}

/// Shared handle to a [`Universe`].
pub type SharedUniverse<T> = Arc<Universe<T>>;

impl<T: Hash + Eq> Universe<T> {
    /// Build a universe from symbols in ordinal order.
    ///
    /// Repeated symbols keep their first position.
    pub fn new(symbols: impl IntoIterator<Item = T>) -> Self {
        Self {
            symbols: symbols.into_iter().collect(),
        }
    }

    /// Ordinal of `symbol`, if it is a member.
    pub fn ordinal_of(&self, symbol: &T) -> Option<usize> {
        self.symbols.get_index_of(symbol)
    }

    /// Symbol at `ordinal`.
    pub fn get(&self, ordinal: usize) -> Option<&T> {
        self.symbols.get_index(ordinal)
    }

    /// Number of symbols.
    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    /// Whether the universe has no symbols.
    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    /// Symbols in ordinal order.
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.symbols.iter()
    }

    /// Wrap in an `Arc` for sharing across columns.
    pub fn into_shared(self) -> SharedUniverse<T> {
        Arc::new(self)
    }
}

impl<T: Hash + Eq> FromIterator<T> for Universe<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self::new(iter)
    }
}
