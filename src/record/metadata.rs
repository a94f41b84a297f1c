//! # Record Metadata
//!
//! Column descriptors for a row shape: ordered column list plus the index
//! of the designated timestamp column, when the source is time-ordered.
//! Join metadata is the ordered union of both sides, master columns first.

use eyre::{ensure, Result};

use crate::types::ColumnType;

/// Name and category of one column.
#[derive(Debug, Clone)]
pub struct ColumnMeta {
    name: String,
    column_type: ColumnType,
}

impl ColumnMeta {
    /// Creates a column descriptor.
    pub fn new(name: impl Into<String>, column_type: ColumnType) -> Self {
        Self {
            name: name.into(),
            column_type,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn column_type(&self) -> ColumnType {
        self.column_type
    }
}

/// Ordered column descriptors for one row shape.
#[derive(Debug, Clone)]
pub struct RecordMetadata {
    columns: Vec<ColumnMeta>,
    timestamp_index: Option<usize>,
}

impl RecordMetadata {
    /// Creates metadata over the given columns. The designated timestamp
    /// column, when present, must exist and be of timestamp category.
    pub fn new(columns: Vec<ColumnMeta>, timestamp_index: Option<usize>) -> Result<Self> {
        if let Some(index) = timestamp_index {
            ensure!(
                index < columns.len(),
                "timestamp index {} out of range for {} columns",
                index,
                columns.len()
            );
            ensure!(
                columns[index].column_type() == ColumnType::Timestamp,
                "designated timestamp column '{}' is {}, not timestamp",
                columns[index].name(),
                columns[index].column_type()
            );
        }
        Ok(Self {
            columns,
            timestamp_index,
        })
    }

    /// Ordered union of two row shapes, master columns first. The combined
    /// shape keeps the master's designated timestamp: an AS-OF join yields
    /// rows in master order.
    pub fn joined(master: &RecordMetadata, slave: &RecordMetadata) -> RecordMetadata {
        let mut columns = Vec::with_capacity(master.column_count() + slave.column_count());
        columns.extend(master.columns.iter().cloned());
        columns.extend(slave.columns.iter().cloned());
        RecordMetadata {
            columns,
            timestamp_index: master.timestamp_index,
        }
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    pub fn columns(&self) -> &[ColumnMeta] {
        &self.columns
    }

    /// Descriptor of one column; `None` when the index is out of range.
    pub fn column(&self, index: usize) -> Option<&ColumnMeta> {
        self.columns.get(index)
    }

    pub fn timestamp_index(&self) -> Option<usize> {
        self.timestamp_index
    }
}
