//! Enumerated symbol encoding.
//!
//! Each element is one little-endian `i32` ordinal into a fixed
//! [`Universe`](mzcol_core::Universe). Negative ordinals are null; the
//! universe itself is never stored in the region.

use std::fmt;
use std::hash::Hash;

use mzcol_arena::SharedStorage;
use mzcol_core::{FieldKind, LayoutDescriptor, Primitive, SharedUniverse};

use crate::column::{Column, Encoding};
use crate::error::ColumnError;

/// Ordinal written for null.
pub const NULL_ORDINAL: i32 = -1;

/// Encoding of one symbol ordinal per element.
pub struct SymbolEncoding<S: Hash + Eq> {
    universe: SharedUniverse<S>,
    layout: LayoutDescriptor,
}

impl<S: Hash + Eq> SymbolEncoding<S> {
    /// Encoding over `universe`.
    pub fn new(universe: SharedUniverse<S>) -> Self {
        Self {
            universe,
            layout: LayoutDescriptor::scalar(FieldKind::I32),
        }
    }

    /// The universe ordinals resolve against.
    pub fn universe(&self) -> &SharedUniverse<S> {
        &self.universe
    }
}

impl<S: Hash + Eq> Clone for SymbolEncoding<S> {
    fn clone(&self) -> Self {
        Self {
            universe: std::sync::Arc::clone(&self.universe),
            layout: self.layout.clone(),
        }
    }
}

impl<S: Hash + Eq> fmt::Debug for SymbolEncoding<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SymbolEncoding")
            .field("universe_len", &self.universe.len())
            .finish()
    }
}

impl<S: Hash + Eq + Clone + fmt::Debug> Encoding for SymbolEncoding<S> {
    type Value = S;

    fn layout(&self) -> &LayoutDescriptor {
        &self.layout
    }

    fn write_null(&self, slot: &mut [u8]) {
        NULL_ORDINAL.write_le(slot);
    }

    fn is_null(&self, slot: &[u8]) -> bool {
        i32::read_le(slot) < 0
    }

    fn decode(&self, index: usize, slot: &[u8]) -> Result<Option<S>, ColumnError> {
        let ordinal = i32::read_le(slot);
        if ordinal < 0 {
            return Ok(None);
        }
        self.universe
            .get(ordinal as usize)
            .cloned()
            .map(Some)
            .ok_or(ColumnError::Corruption {
                index,
                ordinal,
                universe_len: self.universe.len(),
            })
    }

    fn encode(&self, slot: &mut [u8], value: Option<&S>) -> Result<(), ColumnError> {
        let ordinal = match value {
            None => NULL_ORDINAL,
            Some(symbol) => self
                .universe
                .ordinal_of(symbol)
                .and_then(|ordinal| i32::try_from(ordinal).ok())
                .ok_or_else(|| ColumnError::UnknownSymbol {
                    symbol: format!("{symbol:?}"),
                })?,
        };
        ordinal.write_le(slot);
        Ok(())
    }
}

/// Column of symbols drawn from a shared universe.
pub type SymbolColumn<S> = Column<SymbolEncoding<S>>;

impl<S: Hash + Eq + Clone + fmt::Debug> Column<SymbolEncoding<S>> {
    /// Create a symbol column over `universe` with `initial_capacity` null slots.
    pub fn new(
        storage: SharedStorage,
        universe: SharedUniverse<S>,
        initial_capacity: usize,
    ) -> Result<Self, ColumnError> {
        Self::with_capacity(storage, SymbolEncoding::new(universe), initial_capacity)
    }

    /// The column's universe.
    pub fn universe(&self) -> &SharedUniverse<S> {
        self.encoding().universe()
    }

    /// Stored ordinal at `index`, negative for null.
    pub fn get_ordinal(&self, index: usize) -> Result<i32, ColumnError> {
        Ok(i32::read_le(self.slot(index)?))
    }

    /// Write a raw ordinal without checking it against the universe.
    ///
    /// Used when importing ordinals from an external source; an ordinal
    /// outside the universe makes later `get` calls fail with
    /// [`ColumnError::Corruption`].
    pub fn set_ordinal(&mut self, index: usize, ordinal: i32) -> Result<(), ColumnError> {
        ordinal.write_le(self.slot_mut(index)?);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use mzcol_arena::{HeapStorage, StorageConfig};
    use mzcol_core::Universe;

    use super::*;

    fn storage() -> SharedStorage {
        Arc::new(HeapStorage::new(StorageConfig::new("symbol-tests")).unwrap())
    }

    fn abc() -> SharedUniverse<&'static str> {
        Universe::new(["A", "B", "C"]).into_shared()
    }

    #[test]
    fn symbol_round_trip() {
        let mut column = SymbolColumn::new(storage(), abc(), 3).unwrap();
        column.set(1, Some("B")).unwrap();
        assert_eq!(column.get(1).unwrap(), Some("B"));
        assert_eq!(column.get_ordinal(1).unwrap(), 1);
    }

    #[test]
    fn null_is_negative_ordinal() {
        let mut column = SymbolColumn::new(storage(), abc(), 2).unwrap();
        assert_eq!(column.get_ordinal(0).unwrap(), NULL_ORDINAL);
        column.set(0, Some("A")).unwrap();
        column.set(0, None).unwrap();
        assert_eq!(column.get(0).unwrap(), None);
        assert!(column.is_null(0).unwrap());
    }

    #[test]
    fn any_negative_ordinal_is_null() {
        let mut column = SymbolColumn::new(storage(), abc(), 1).unwrap();
        column.set_ordinal(0, -42).unwrap();
        assert_eq!(column.get(0).unwrap(), None);
    }

    #[test]
    fn unknown_symbol_is_rejected_without_writing() {
        let mut column = SymbolColumn::new(storage(), abc(), 1).unwrap();
        column.set(0, Some("C")).unwrap();
        let err = column.set(0, Some("Z")).unwrap_err();
        assert_eq!(
            err,
            ColumnError::UnknownSymbol {
                symbol: "\"Z\"".to_string()
            }
        );
        assert_eq!(column.get(0).unwrap(), Some("C"));
    }

    #[test]
    fn out_of_universe_ordinal_is_corruption() {
        let mut column = SymbolColumn::new(storage(), abc(), 8).unwrap();
        column.set_ordinal(6, 5).unwrap();
        assert_eq!(
            column.get(6),
            Err(ColumnError::Corruption {
                index: 6,
                ordinal: 5,
                universe_len: 3,
            })
        );
        // `set` refuses to decode the corrupt previous value; `put` repairs it.
        assert!(column.set(6, Some("A")).is_err());
        column.put(6, Some("A")).unwrap();
        assert_eq!(column.get(6).unwrap(), Some("A"));
    }

    #[test]
    fn universe_is_shared_not_copied() {
        let universe = abc();
        let column = SymbolColumn::new(storage(), Arc::clone(&universe), 1).unwrap();
        assert!(Arc::ptr_eq(column.universe(), &universe));
        assert_eq!(column.layout().element_width(), 4);
    }
}
