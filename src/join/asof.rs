//! # AS-OF Join Cursor
//!
//! The dual-cursor state machine at the heart of the temporal join. The
//! cursor owns its two bound source cursors for one execution, borrows the
//! factory's map exclusively, and carries exactly two pieces of progress
//! state: the timestamp of the last examined slave row, and that row's
//! identifier.
//!
//! ## Invariant
//!
//! After any `next`, every examined slave row with timestamp at or before
//! the high-water mark has been folded into the map, except possibly the
//! dangling row: the one row peeked past the current master timestamp,
//! which is folded at the start of the following catch-up, before any new
//! slave rows are pulled.

use eyre::Result;

use crate::cursor::RowCursor;
use crate::join::record::{ColumnSource, OuterJoinRecord};
use crate::join::sink::KeySink;
use crate::map::JoinKeyMap;
use crate::record::{NullRecord, Record, SymbolTable};
use crate::types::{RowId, NULL_TIMESTAMP};

/// Cell of the map value slot holding the matched slave row id.
pub(crate) const ROW_ID_CELL: usize = 0;

/// Streaming cursor producing the AS-OF join of two timestamp-ordered row
/// streams.
///
/// Implements [`RowCursor`], so a join output can feed the master side of
/// another join. Random access is not supported; the combined record is
/// valid only until the next advance.
pub struct AsOfJoinCursor<'a> {
    master: Box<dyn RowCursor + 'a>,
    slave: Box<dyn RowCursor + 'a>,
    map: &'a mut JoinKeyMap,
    master_sink: &'a KeySink,
    slave_sink: &'a KeySink,
    record: OuterJoinRecord,
    master_timestamp_index: usize,
    slave_timestamp_index: usize,
    slave_timestamp: i64,
    dangling: Option<RowId>,
    closed: bool,
}

impl<'a> AsOfJoinCursor<'a> {
    /// Binds freshly opened source cursors over the factory's map. The map
    /// is cleared here: each execution starts from "nothing seen".
    #[allow(clippy::too_many_arguments)]
    pub(crate) fn new(
        master: Box<dyn RowCursor + 'a>,
        slave: Box<dyn RowCursor + 'a>,
        map: &'a mut JoinKeyMap,
        master_sink: &'a KeySink,
        slave_sink: &'a KeySink,
        column_split: usize,
        master_timestamp_index: usize,
        slave_timestamp_index: usize,
    ) -> Self {
        map.clear();
        Self {
            master,
            slave,
            map,
            master_sink,
            slave_sink,
            record: OuterJoinRecord::new(column_split),
            master_timestamp_index,
            slave_timestamp_index,
            slave_timestamp: NULL_TIMESTAMP,
            dangling: None,
            closed: false,
        }
    }

    /// Folds qualifying slave rows into the map, up to but not past
    /// `master_timestamp`.
    ///
    /// The last examined row is remembered together with its timestamp.
    /// Repositioning onto it at entry both restores the scan position
    /// (lookups move the slave cursor between catch-ups) and folds in the
    /// dangling row a previous catch-up peeked past its master timestamp;
    /// re-folding an already-folded row is a no-op overwrite.
    fn catch_up(&mut self, master_timestamp: i64) -> Result<()> {
        if let Some(row_id) = self.dangling {
            self.slave.record_at(row_id)?;
            let mut key = self.map.with_key();
            self.slave_sink.write(self.slave.record(), &mut key)?;
            key.create_value().put_long(ROW_ID_CELL, row_id.raw());
        }
        while self.slave.next()? {
            let slave_timestamp = self.slave.get_timestamp(self.slave_timestamp_index)?;
            let row_id = self.slave.row_id()?;
            self.slave_timestamp = slave_timestamp;
            self.dangling = Some(row_id);
            if slave_timestamp <= master_timestamp {
                let mut key = self.map.with_key();
                self.slave_sink.write(self.slave.record(), &mut key)?;
                key.create_value().put_long(ROW_ID_CELL, row_id.raw());
            } else {
                break;
            }
        }
        Ok(())
    }

    fn source(&self, column: usize) -> (&dyn Record, usize) {
        match self.record.resolve(column) {
            ColumnSource::Master(local) => (self.master.record(), local),
            ColumnSource::Slave(local) => (self.slave.record(), local),
            ColumnSource::Absent(local) => (&NullRecord, local),
        }
    }
}

impl Record for AsOfJoinCursor<'_> {
    fn get_bool(&self, column: usize) -> Result<bool> {
        let (record, local) = self.source(column);
        record.get_bool(local)
    }

    fn get_int(&self, column: usize) -> Result<i32> {
        let (record, local) = self.source(column);
        record.get_int(local)
    }

    fn get_long(&self, column: usize) -> Result<i64> {
        let (record, local) = self.source(column);
        record.get_long(local)
    }

    fn get_double(&self, column: usize) -> Result<f64> {
        let (record, local) = self.source(column);
        record.get_double(local)
    }

    fn get_timestamp(&self, column: usize) -> Result<i64> {
        let (record, local) = self.source(column);
        record.get_timestamp(local)
    }

    fn get_str(&self, column: usize) -> Result<Option<&str>> {
        let (record, local) = self.source(column);
        record.get_str(local)
    }

    fn get_symbol(&self, column: usize) -> Result<i32> {
        let (record, local) = self.source(column);
        record.get_symbol(local)
    }

    fn get_bin(&self, column: usize) -> Result<Option<&[u8]>> {
        let (record, local) = self.source(column);
        record.get_bin(local)
    }
}

impl RowCursor for AsOfJoinCursor<'_> {
    fn record(&self) -> &dyn Record {
        self
    }

    fn next(&mut self) -> Result<bool> {
        if !self.master.next()? {
            return Ok(false);
        }
        let master_timestamp = self.master.get_timestamp(self.master_timestamp_index)?;
        if self.slave_timestamp <= master_timestamp {
            self.catch_up(master_timestamp)?;
        }
        let mut key = self.map.with_key();
        self.master_sink.write(self.master.record(), &mut key)?;
        match key.find_value() {
            Some(slot) => {
                let row_id = RowId::from_raw(slot.get_long(ROW_ID_CELL));
                self.slave.record_at(row_id)?;
                self.record.set_has_slave(true);
            }
            None => self.record.set_has_slave(false),
        }
        Ok(true)
    }

    fn to_top(&mut self) -> Result<()> {
        self.map.clear();
        self.slave_timestamp = NULL_TIMESTAMP;
        self.dangling = None;
        self.record.set_has_slave(false);
        self.master.to_top()?;
        self.slave.to_top()
    }

    fn symbol_table(&self, column: usize) -> Option<&SymbolTable> {
        match self.record.resolve_metadata(column) {
            ColumnSource::Master(local) => self.master.symbol_table(local),
            ColumnSource::Slave(local) | ColumnSource::Absent(local) => {
                self.slave.symbol_table(local)
            }
        }
    }

    fn close(&mut self) -> Result<()> {
        if self.closed {
            return Ok(());
        }
        self.closed = true;
        let master = self.master.close();
        let slave = self.slave.close();
        master.and(slave)
    }
}
