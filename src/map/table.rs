//! # Join Key Map Storage
//!
//! Hash table from encoded composite keys to fixed-layout value slots,
//! with the reusable key buffer the builder writes into.

use hashbrown::HashMap;
use smallvec::{smallvec, SmallVec};

use crate::config::{MAP_INITIAL_CAPACITY, VAR_KEY_RESERVE};
use crate::map::KeyBuilder;
use crate::types::ColumnType;

/// Fixed layout of 8-byte cells attached to one map key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValueSlot {
    cells: SmallVec<[i64; 2]>,
}

impl ValueSlot {
    pub(crate) fn zeroed(cells: usize) -> Self {
        Self {
            cells: smallvec![0; cells],
        }
    }

    /// Writes one cell. Cell indices are fixed at map construction;
    /// indexing past the layout is a programming error.
    pub fn put_long(&mut self, cell: usize, value: i64) {
        self.cells[cell] = value;
    }

    /// Reads one cell.
    pub fn get_long(&self, cell: usize) -> i64 {
        self.cells[cell]
    }
}

/// Execution-scoped map from composite join keys to value slots.
///
/// Created once per join factory, cleared on every cursor open and
/// restart. Entry values are updated in place: inserting an existing key
/// returns its current slot, so a later write for the same key overwrites
/// the earlier one.
#[derive(Debug)]
pub struct JoinKeyMap {
    entries: HashMap<Vec<u8>, ValueSlot>,
    key_buf: Vec<u8>,
    value_cells: usize,
}

impl JoinKeyMap {
    /// Creates a map for keys of the given column categories and values of
    /// `value_cells` 8-byte cells. Key categories pre-size the reusable
    /// key buffer; they do not constrain what the builder writes.
    pub fn new(key_types: &[ColumnType], value_cells: usize) -> Self {
        let key_capacity: usize = key_types
            .iter()
            .map(|t| t.key_width().unwrap_or(VAR_KEY_RESERVE))
            .sum();
        Self {
            entries: HashMap::with_capacity(MAP_INITIAL_CAPACITY),
            key_buf: Vec::with_capacity(key_capacity),
            value_cells,
        }
    }

    /// Begins writing a lookup/insert key into the reusable buffer.
    pub fn with_key(&mut self) -> KeyBuilder<'_> {
        self.key_buf.clear();
        KeyBuilder::new(self)
    }

    /// Number of distinct keys currently stored.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Drops all entries, retaining backing storage.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Releases backing storage. The map stays usable but empty.
    pub fn close(&mut self) {
        self.entries = HashMap::new();
        self.key_buf = Vec::new();
    }

    pub(crate) fn key_buf_mut(&mut self) -> &mut Vec<u8> {
        &mut self.key_buf
    }

    pub(crate) fn find_slot(&mut self) -> Option<&mut ValueSlot> {
        let Self {
            entries, key_buf, ..
        } = self;
        entries.get_mut(key_buf.as_slice())
    }

    pub(crate) fn create_slot(&mut self) -> &mut ValueSlot {
        let Self {
            entries,
            key_buf,
            value_cells,
        } = self;
        entries
            .entry_ref(key_buf.as_slice())
            .or_insert_with(|| ValueSlot::zeroed(*value_cells))
    }
}
