//! # Typed Row Access
//!
//! This module provides the `Record` trait, the typed accessor surface over
//! one row of a cursor, together with the metadata describing a row shape,
//! the null-record used for outer-join absence, and symbol tables for
//! dictionary-encoded columns.
//!
//! ## Accessor Contract
//!
//! `Record` carries one accessor per column category. A record implements
//! only the accessors its columns support; every other accessor falls
//! through to a default body that reports an unsupported-access error.
//! Reading the wrong category is therefore a programming error surfaced as
//! an `eyre` report, never a silent coercion.
//!
//! Absence is not an error: `get_str`/`get_bin` return `Ok(None)` for SQL
//! NULL, and the fixed-width accessors return their category's designated
//! sentinel (see [`crate::types`]).
//!
//! ## Usage
//!
//! ```ignore
//! use tidedb::record::Record;
//!
//! let ts = record.get_timestamp(1)?;
//! let sym = record.get_symbol(0)?; // dictionary key, resolve via SymbolTable
//! ```

mod metadata;
mod null;
mod symbol;

pub use metadata::{ColumnMeta, RecordMetadata};
pub use null::NullRecord;
pub use symbol::SymbolTable;

use eyre::Result;

use crate::types::RowId;

/// Builds the error every non-applicable accessor reports.
pub(crate) fn unsupported(category: &'static str, column: usize) -> eyre::Report {
    eyre::eyre!("record does not support {category} access for column {column}")
}

/// Typed accessor surface over one row.
///
/// A record is a view, not a copy: it reads through to the row its cursor
/// is currently positioned on, and stays valid only until that cursor is
/// advanced or repositioned.
pub trait Record {
    /// Identifier of the current row, for sources that support
    /// repositioning. Cursors without stable row addressing keep the
    /// default.
    fn row_id(&self) -> Result<RowId> {
        Err(eyre::eyre!("record does not expose a row id"))
    }

    fn get_bool(&self, column: usize) -> Result<bool> {
        Err(unsupported("boolean", column))
    }

    fn get_int(&self, column: usize) -> Result<i32> {
        Err(unsupported("int", column))
    }

    fn get_long(&self, column: usize) -> Result<i64> {
        Err(unsupported("long", column))
    }

    fn get_double(&self, column: usize) -> Result<f64> {
        Err(unsupported("double", column))
    }

    fn get_timestamp(&self, column: usize) -> Result<i64> {
        Err(unsupported("timestamp", column))
    }

    /// UTF-8 string value, `None` for SQL NULL.
    fn get_str(&self, column: usize) -> Result<Option<&str>> {
        Err(unsupported("string", column))
    }

    /// Dictionary key of a symbol column. Resolution to the string value
    /// goes through the owning cursor's symbol table.
    fn get_symbol(&self, column: usize) -> Result<i32> {
        Err(unsupported("symbol", column))
    }

    /// Binary value, `None` for SQL NULL.
    fn get_bin(&self, column: usize) -> Result<Option<&[u8]>> {
        Err(unsupported("binary", column))
    }
}
