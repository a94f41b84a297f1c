//! # Key Builder
//!
//! Typed writes into the map's reusable key buffer. The builder holds the
//! map's exclusive borrow for the duration of one key, and finalization
//! consumes it: a key is looked up or inserted exactly once, then the
//! buffer is free for the next row.

use crate::map::{JoinKeyMap, ValueSlot};

/// Length tag marking an absent variable-size value.
const ABSENT_LEN: u32 = u32::MAX;

/// Writes one composite key into a [`JoinKeyMap`]'s reusable buffer.
///
/// Values must be written in the same fixed order for every row of a
/// traversal; the encoding carries no column tags. `find_value` and
/// `create_value` consume the builder, making double finalization
/// unrepresentable.
#[derive(Debug)]
pub struct KeyBuilder<'m> {
    map: &'m mut JoinKeyMap,
}

impl<'m> KeyBuilder<'m> {
    pub(crate) fn new(map: &'m mut JoinKeyMap) -> Self {
        Self { map }
    }

    pub fn put_bool(&mut self, value: bool) {
        self.map.key_buf_mut().push(value as u8);
    }

    pub fn put_int(&mut self, value: i32) {
        self.map.key_buf_mut().extend_from_slice(&value.to_le_bytes());
    }

    pub fn put_long(&mut self, value: i64) {
        self.map.key_buf_mut().extend_from_slice(&value.to_le_bytes());
    }

    /// Doubles are keyed on their bit pattern, so the NaN null sentinel
    /// groups with itself.
    pub fn put_double(&mut self, value: f64) {
        self.map
            .key_buf_mut()
            .extend_from_slice(&value.to_bits().to_le_bytes());
    }

    pub fn put_timestamp(&mut self, value: i64) {
        self.put_long(value);
    }

    pub fn put_symbol(&mut self, key: i32) {
        self.put_int(key);
    }

    /// Length-prefixed string bytes; `None` writes the absent tag, which
    /// no present value can collide with.
    pub fn put_str(&mut self, value: Option<&str>) {
        self.put_var_bytes(value.map(str::as_bytes));
    }

    /// Length-prefixed binary bytes; `None` writes the absent tag.
    pub fn put_bin(&mut self, value: Option<&[u8]>) {
        self.put_var_bytes(value);
    }

    fn put_var_bytes(&mut self, value: Option<&[u8]>) {
        let buf = self.map.key_buf_mut();
        match value {
            None => buf.extend_from_slice(&ABSENT_LEN.to_le_bytes()),
            Some(bytes) => {
                buf.extend_from_slice(&(bytes.len() as u32).to_le_bytes());
                buf.extend_from_slice(bytes);
            }
        }
    }

    /// Finalizes as a lookup: the slot for an equal key, or `None`. Never
    /// mutates the map.
    pub fn find_value(self) -> Option<&'m mut ValueSlot> {
        self.map.find_slot()
    }

    /// Finalizes as an insert-or-fetch: the existing slot for an equal
    /// key, or a freshly zeroed one.
    pub fn create_value(self) -> &'m mut ValueSlot {
        self.map.create_slot()
    }
}
