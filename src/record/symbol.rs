//! # Symbol Tables
//!
//! Dictionary for symbol columns: rows store a compact `i32` key, the table
//! maps keys back to their string value. Resolution is a metadata
//! operation and stays valid for a column regardless of the current row,
//! which is what lets an outer join resolve slave-side symbol columns even
//! for unmatched rows.

use hashbrown::HashMap;

use crate::types::NULL_INT;

/// Dictionary mapping symbol keys to string values.
#[derive(Debug, Default)]
pub struct SymbolTable {
    values: Vec<String>,
    keys: HashMap<String, i32>,
}

impl SymbolTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the key for `value`, adding it to the dictionary if absent.
    pub fn intern(&mut self, value: &str) -> i32 {
        if let Some(&key) = self.keys.get(value) {
            return key;
        }
        let key = self.values.len() as i32;
        self.values.push(value.to_string());
        self.keys.insert(value.to_string(), key);
        key
    }

    /// Key of an already-interned value.
    pub fn key_of(&self, value: &str) -> Option<i32> {
        self.keys.get(value).copied()
    }

    /// String value for a key; `None` for the null sentinel and unknown
    /// keys.
    pub fn value_of(&self, key: i32) -> Option<&str> {
        if key == NULL_INT || key < 0 {
            return None;
        }
        self.values.get(key as usize).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}
