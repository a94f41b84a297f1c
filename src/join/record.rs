//! # Outer Join Record Resolution
//!
//! The combined record of an AS-OF join spans master columns followed by
//! slave columns. `OuterJoinRecord` owns the split arithmetic and the
//! match state: a slave-side column of an unmatched row resolves to the
//! null record instead of reading through to whatever row the slave cursor
//! last touched.

/// Which record a combined column index reads from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnSource {
    /// Master-side column, with its local index.
    Master(usize),
    /// Matched slave-side column, with its local index.
    Slave(usize),
    /// Slave-side column of an unmatched row, with its local index.
    Absent(usize),
}

/// Split/absence resolution state for the combined join record.
#[derive(Debug)]
pub struct OuterJoinRecord {
    column_split: usize,
    has_slave: bool,
}

impl OuterJoinRecord {
    /// Creates resolution state for a record whose first `column_split`
    /// columns belong to the master side.
    pub fn new(column_split: usize) -> Self {
        Self {
            column_split,
            has_slave: false,
        }
    }

    pub fn column_split(&self) -> usize {
        self.column_split
    }

    /// Whether the current master row has a matched slave row.
    pub fn has_slave(&self) -> bool {
        self.has_slave
    }

    pub(crate) fn set_has_slave(&mut self, has_slave: bool) {
        self.has_slave = has_slave;
    }

    /// Resolves a combined column index for row data access. Slave-side
    /// columns of unmatched rows resolve to [`ColumnSource::Absent`].
    pub fn resolve(&self, column: usize) -> ColumnSource {
        if column < self.column_split {
            ColumnSource::Master(column)
        } else if self.has_slave {
            ColumnSource::Slave(column - self.column_split)
        } else {
            ColumnSource::Absent(column - self.column_split)
        }
    }

    /// Resolves a combined column index for metadata access (symbol
    /// tables). Metadata is independent of the current row, so match state
    /// plays no part here.
    pub fn resolve_metadata(&self, column: usize) -> ColumnSource {
        if column < self.column_split {
            ColumnSource::Master(column)
        } else {
            ColumnSource::Slave(column - self.column_split)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn columns_split_between_master_and_slave() {
        let mut record = OuterJoinRecord::new(3);
        record.set_has_slave(true);
        assert_eq!(record.resolve(0), ColumnSource::Master(0));
        assert_eq!(record.resolve(2), ColumnSource::Master(2));
        assert_eq!(record.resolve(3), ColumnSource::Slave(0));
        assert_eq!(record.resolve(5), ColumnSource::Slave(2));
    }

    #[test]
    fn unmatched_rows_resolve_slave_columns_as_absent() {
        let record = OuterJoinRecord::new(2);
        assert_eq!(record.resolve(1), ColumnSource::Master(1));
        assert_eq!(record.resolve(2), ColumnSource::Absent(0));
        assert_eq!(record.resolve(4), ColumnSource::Absent(2));
    }

    #[test]
    fn metadata_resolution_ignores_match_state() {
        let record = OuterJoinRecord::new(2);
        assert!(!record.has_slave());
        assert_eq!(record.resolve_metadata(3), ColumnSource::Slave(1));
    }
}
