//! # Join Key Projection
//!
//! `KeySink` extracts the join-key columns from a record and writes them
//! into a key builder in a fixed, type-stable order. Master and slave sides
//! each get their own sink; the factory checks that both project the same
//! key layout.

use eyre::Result;
use smallvec::SmallVec;

use crate::map::KeyBuilder;
use crate::record::Record;
use crate::types::ColumnType;

/// Writes a record's join-key columns into a [`KeyBuilder`].
#[derive(Debug, Clone)]
pub struct KeySink {
    columns: SmallVec<[(usize, ColumnType); 4]>,
}

impl KeySink {
    /// Creates a sink projecting the given `(column, category)` pairs, in
    /// order.
    pub fn new(columns: impl IntoIterator<Item = (usize, ColumnType)>) -> Self {
        Self {
            columns: columns.into_iter().collect(),
        }
    }

    /// Projected columns, in projection order.
    pub fn columns(&self) -> &[(usize, ColumnType)] {
        &self.columns
    }

    /// Key layout this sink produces, used to size the map and to check
    /// master/slave compatibility.
    pub fn column_types(&self) -> impl Iterator<Item = ColumnType> + '_ {
        self.columns.iter().map(|&(_, t)| t)
    }

    /// Copies the key columns of `record` into `key`.
    pub fn write(&self, record: &dyn Record, key: &mut KeyBuilder<'_>) -> Result<()> {
        for &(column, column_type) in &self.columns {
            match column_type {
                ColumnType::Boolean => key.put_bool(record.get_bool(column)?),
                ColumnType::Int => key.put_int(record.get_int(column)?),
                ColumnType::Long => key.put_long(record.get_long(column)?),
                ColumnType::Double => key.put_double(record.get_double(column)?),
                ColumnType::Timestamp => key.put_timestamp(record.get_timestamp(column)?),
                ColumnType::Str => key.put_str(record.get_str(column)?),
                ColumnType::Symbol => key.put_symbol(record.get_symbol(column)?),
                ColumnType::Binary => key.put_bin(record.get_bin(column)?),
            }
        }
        Ok(())
    }
}
