//! # AS-OF Join Cursor Factory
//!
//! Owns everything with query lifetime: both side factories, the combined
//! metadata, the key sinks, and the keyed map. Cursors opened from the
//! factory borrow the map for exactly one traversal; the borrow checker is
//! what forbids two concurrent traversals over one map.

use eyre::{ensure, eyre, Result};
use tracing::debug;

use crate::cursor::{RecordCursorFactory, RowCursor};
use crate::join::asof::AsOfJoinCursor;
use crate::join::sink::KeySink;
use crate::map::JoinKeyMap;
use crate::record::RecordMetadata;
use crate::types::ColumnType;

/// The map value layout: a single 8-byte cell holding a slave row id.
const ROW_ID_VALUE_CELLS: usize = 1;

/// Builds AS-OF join cursors over a master and a slave row source.
pub struct AsOfJoinCursorFactory {
    master: Box<dyn RecordCursorFactory>,
    slave: Box<dyn RecordCursorFactory>,
    master_sink: KeySink,
    slave_sink: KeySink,
    metadata: RecordMetadata,
    column_split: usize,
    master_timestamp_index: usize,
    slave_timestamp_index: usize,
    map: Option<JoinKeyMap>,
}

impl AsOfJoinCursorFactory {
    /// Validates the join shape and builds the execution map.
    ///
    /// Both sources must carry a designated timestamp column, the two
    /// sinks must project identical key layouts, and every projected
    /// column must exist with the projected category. Ownership of the
    /// side factories transfers first, so any validation failure releases
    /// them on the way out.
    pub fn new(
        master: Box<dyn RecordCursorFactory>,
        slave: Box<dyn RecordCursorFactory>,
        master_sink: KeySink,
        slave_sink: KeySink,
    ) -> Result<Self> {
        let master_timestamp_index = master
            .metadata()
            .timestamp_index()
            .ok_or_else(|| eyre!("master source has no designated timestamp column"))?;
        let slave_timestamp_index = slave
            .metadata()
            .timestamp_index()
            .ok_or_else(|| eyre!("slave source has no designated timestamp column"))?;

        let master_key: Vec<ColumnType> = master_sink.column_types().collect();
        let slave_key: Vec<ColumnType> = slave_sink.column_types().collect();
        ensure!(
            master_key == slave_key,
            "join key layouts differ: master {:?} vs slave {:?}",
            master_key,
            slave_key
        );
        Self::check_sink(&master_sink, master.metadata(), "master")?;
        Self::check_sink(&slave_sink, slave.metadata(), "slave")?;

        let metadata = RecordMetadata::joined(master.metadata(), slave.metadata());
        let column_split = master.metadata().column_count();
        let map = JoinKeyMap::new(&master_key, ROW_ID_VALUE_CELLS);
        debug!(
            columns = metadata.column_count(),
            split = column_split,
            key_columns = master_key.len(),
            "as-of join factory created"
        );
        Ok(Self {
            master,
            slave,
            master_sink,
            slave_sink,
            metadata,
            column_split,
            master_timestamp_index,
            slave_timestamp_index,
            map: Some(map),
        })
    }

    fn check_sink(sink: &KeySink, metadata: &RecordMetadata, side: &str) -> Result<()> {
        for &(column, column_type) in sink.columns() {
            let meta = metadata
                .column(column)
                .ok_or_else(|| eyre!("{side} join key column {column} out of range"))?;
            ensure!(
                meta.column_type() == column_type,
                "{side} join key column '{}' is {}, projected as {}",
                meta.name(),
                meta.column_type(),
                column_type
            );
        }
        Ok(())
    }

    /// Index of the first slave-side column in the combined record.
    pub fn column_split(&self) -> usize {
        self.column_split
    }
}

impl RecordCursorFactory for AsOfJoinCursorFactory {
    fn metadata(&self) -> &RecordMetadata {
        &self.metadata
    }

    /// Opens both source cursors and binds a join cursor over the shared
    /// map. The map is cleared on bind; its capacity carries over between
    /// executions.
    fn cursor(&mut self) -> Result<Box<dyn RowCursor + '_>> {
        let map = self
            .map
            .as_mut()
            .ok_or_else(|| eyre!("as-of join factory is closed"))?;
        let master = self.master.cursor()?;
        let slave = self.slave.cursor()?;
        debug!("as-of join cursor opened");
        Ok(Box::new(AsOfJoinCursor::new(
            master,
            slave,
            map,
            &self.master_sink,
            &self.slave_sink,
            self.column_split,
            self.master_timestamp_index,
            self.slave_timestamp_index,
        )))
    }

    /// Releases the map, then both side factories, attempting every stage
    /// before reporting the first failure. Safe to call more than once.
    fn close(&mut self) -> Result<()> {
        if let Some(mut map) = self.map.take() {
            map.close();
            debug!("as-of join factory closed");
        }
        let master = self.master.close();
        let slave = self.slave.close();
        master.and(slave)
    }
}
