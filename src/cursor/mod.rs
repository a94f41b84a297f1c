//! # Row Cursor Contracts
//!
//! This module defines the pull-based execution contracts the join core
//! consumes and re-exposes: a forward-only, resettable cursor over one row
//! stream, and the factory that opens cursors per query execution.
//!
//! ## Execution Model
//!
//! Cursors follow the iterator (Volcano) model: each `next` call advances
//! to the next row, and the cursor's `Record` surface reads the current
//! row. No operator buffers rows; a record view stays valid only until the
//! cursor moves again.
//!
//! ```text
//! AsOfJoinCursor
//!     ├── RowCursor (master stream)
//!     └── RowCursor (slave stream)
//!             └── [storage-backed source]
//! ```
//!
//! ## Repositioning
//!
//! A cursor hands out a `RowId` for each row it visits and can jump back to
//! any previously visited row in O(1) via `record_at`. This is what lets
//! the AS-OF join keep only row identifiers in its map instead of copies of
//! slave rows. Cursors without stable addressing (the join cursor itself)
//! keep the default `record_at`, which reports the missing capability.
//!
//! ## Usage
//!
//! ```ignore
//! let mut cursor = factory.cursor()?;
//! while cursor.next()? {
//!     process(cursor.record())?;
//! }
//! cursor.close()?;
//! ```

use eyre::Result;

use crate::record::{Record, RecordMetadata, SymbolTable};
use crate::types::RowId;

/// Forward-only, single-pass, resettable cursor over one row stream.
///
/// The cursor is itself the `Record` view of its current row; `record`
/// exposes that view as a trait object for consumers that combine rows
/// from several cursors.
pub trait RowCursor: Record {
    /// The current row as a record view.
    fn record(&self) -> &dyn Record;

    /// Advances to the next row. Returns `false` once the stream is
    /// exhausted; further calls keep returning `false` until `to_top`.
    fn next(&mut self) -> Result<bool>;

    /// Repositions directly onto a previously visited row.
    fn record_at(&mut self, row_id: RowId) -> Result<()> {
        let _ = row_id;
        Err(eyre::eyre!("cursor does not support repositioning by row id"))
    }

    /// Rewinds for a fresh pass over the identical row sequence.
    fn to_top(&mut self) -> Result<()>;

    /// Dictionary for a symbol column; `None` for other columns.
    fn symbol_table(&self, column: usize) -> Option<&SymbolTable> {
        let _ = column;
        None
    }

    /// Releases the cursor's resources. Safe to call more than once.
    fn close(&mut self) -> Result<()> {
        Ok(())
    }
}

/// Opens cursors over one row source, one traversal at a time.
///
/// The exclusive borrow taken by `cursor` is the concurrency contract:
/// a factory's map and progress state are only ever driven by one open
/// cursor.
pub trait RecordCursorFactory {
    /// Shape of the rows this source produces.
    fn metadata(&self) -> &RecordMetadata;

    /// Opens a cursor for one execution.
    fn cursor(&mut self) -> Result<Box<dyn RowCursor + '_>>;

    /// Whether cursors from this factory support `record_at`.
    fn supports_random_access(&self) -> bool {
        false
    }

    /// Releases the factory's resources. Safe to call more than once.
    fn close(&mut self) -> Result<()> {
        Ok(())
    }
}
