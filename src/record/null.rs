//! # Null Record
//!
//! A record whose every accessor returns its category's designated null
//! sentinel. The outer-join record reads through a `NullRecord` for the
//! slave side of an unmatched master row, so absence never touches a stale
//! slave row.

use eyre::Result;

use crate::record::Record;
use crate::types::{NULL_INT, NULL_LONG, NULL_TIMESTAMP};

/// Record of all-null column values.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullRecord;

impl Record for NullRecord {
    fn get_bool(&self, _column: usize) -> Result<bool> {
        Ok(false)
    }

    fn get_int(&self, _column: usize) -> Result<i32> {
        Ok(NULL_INT)
    }

    fn get_long(&self, _column: usize) -> Result<i64> {
        Ok(NULL_LONG)
    }

    fn get_double(&self, _column: usize) -> Result<f64> {
        Ok(f64::NAN)
    }

    fn get_timestamp(&self, _column: usize) -> Result<i64> {
        Ok(NULL_TIMESTAMP)
    }

    fn get_str(&self, _column: usize) -> Result<Option<&str>> {
        Ok(None)
    }

    fn get_symbol(&self, _column: usize) -> Result<i32> {
        Ok(NULL_INT)
    }

    fn get_bin(&self, _column: usize) -> Result<Option<&[u8]>> {
        Ok(None)
    }
}
