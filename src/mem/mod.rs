//! # In-Memory Row Source
//!
//! Reference implementation of the row-cursor contracts over rows held in
//! memory. Integration tests, benches and embedders use it to drive the
//! join core without a storage engine; it is also the executable
//! specification of how a storage-backed source is expected to behave
//! (ordinal row ids, O(1) repositioning, strict accessor categories).
//!
//! ## Usage
//!
//! ```ignore
//! use tidedb::mem::{MemoryCursorFactory, MemoryTable, Value};
//!
//! let mut table = MemoryTable::new(metadata);
//! let aapl = table.intern_symbol(0, "AAPL")?;
//! table.push_row(vec![Value::Symbol(aapl), Value::Timestamp(10)])?;
//! let factory = MemoryCursorFactory::new(table);
//! ```

use eyre::{ensure, eyre, Result};

use crate::cursor::{RecordCursorFactory, RowCursor};
use crate::record::{unsupported, Record, RecordMetadata, SymbolTable};
use crate::types::{ColumnType, RowId, NULL_INT, NULL_LONG, NULL_TIMESTAMP};

/// Owned runtime value for one column of an in-memory row.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Null,
    Bool(bool),
    Int(i32),
    Long(i64),
    Double(f64),
    Timestamp(i64),
    Str(String),
    Symbol(i32),
    Bin(Vec<u8>),
}

impl Value {
    /// Category of this value; `None` for SQL NULL, which fits any column.
    pub fn category(&self) -> Option<ColumnType> {
        match self {
            Value::Null => None,
            Value::Bool(_) => Some(ColumnType::Boolean),
            Value::Int(_) => Some(ColumnType::Int),
            Value::Long(_) => Some(ColumnType::Long),
            Value::Double(_) => Some(ColumnType::Double),
            Value::Timestamp(_) => Some(ColumnType::Timestamp),
            Value::Str(_) => Some(ColumnType::Str),
            Value::Symbol(_) => Some(ColumnType::Symbol),
            Value::Bin(_) => Some(ColumnType::Binary),
        }
    }
}

/// Rows plus per-column symbol dictionaries behind one metadata shape.
#[derive(Debug)]
pub struct MemoryTable {
    metadata: RecordMetadata,
    rows: Vec<Vec<Value>>,
    symbols: Vec<Option<SymbolTable>>,
}

impl MemoryTable {
    pub fn new(metadata: RecordMetadata) -> Self {
        let symbols = (0..metadata.column_count()).map(|_| None).collect();
        Self {
            metadata,
            rows: Vec::new(),
            symbols,
        }
    }

    pub fn metadata(&self) -> &RecordMetadata {
        &self.metadata
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Interns a symbol value in `column`'s dictionary, creating the
    /// dictionary on first use. The returned key is what rows store.
    pub fn intern_symbol(&mut self, column: usize, value: &str) -> Result<i32> {
        let meta = self
            .metadata
            .column(column)
            .ok_or_else(|| eyre!("column {column} out of range"))?;
        ensure!(
            meta.column_type() == ColumnType::Symbol,
            "column '{}' is {}, not symbol",
            meta.name(),
            meta.column_type()
        );
        let table = self.symbols[column].get_or_insert_with(SymbolTable::new);
        Ok(table.intern(value))
    }

    /// Appends a row. Arity and per-column categories must match the
    /// table's metadata; `Value::Null` fits any column.
    pub fn push_row(&mut self, values: Vec<Value>) -> Result<()> {
        ensure!(
            values.len() == self.metadata.column_count(),
            "row has {} values, table has {} columns",
            values.len(),
            self.metadata.column_count()
        );
        for (column, value) in values.iter().enumerate() {
            if let Some(category) = value.category() {
                let expected = self.metadata.columns()[column].column_type();
                ensure!(
                    category == expected,
                    "column {} expects {}, row carries {}",
                    column,
                    expected,
                    category
                );
            }
        }
        self.rows.push(values);
        Ok(())
    }

    fn value(&self, row: usize, column: usize) -> Result<&Value> {
        self.rows
            .get(row)
            .and_then(|r| r.get(column))
            .ok_or_else(|| eyre!("no value at row {row}, column {column}"))
    }
}

/// Cursor over a [`MemoryTable`]. Row ids are row ordinals.
pub struct MemoryCursor<'a> {
    table: &'a MemoryTable,
    row: Option<usize>,
}

impl<'a> MemoryCursor<'a> {
    pub fn new(table: &'a MemoryTable) -> Self {
        Self { table, row: None }
    }

    fn current(&self) -> Result<usize> {
        self.row
            .ok_or_else(|| eyre!("cursor is not positioned on a row"))
    }

    fn value(&self, column: usize) -> Result<&Value> {
        self.table.value(self.current()?, column)
    }
}

impl Record for MemoryCursor<'_> {
    fn row_id(&self) -> Result<RowId> {
        Ok(RowId::from_raw(self.current()? as i64))
    }

    fn get_bool(&self, column: usize) -> Result<bool> {
        match self.value(column)? {
            Value::Bool(v) => Ok(*v),
            Value::Null => Ok(false),
            _ => Err(unsupported("boolean", column)),
        }
    }

    fn get_int(&self, column: usize) -> Result<i32> {
        match self.value(column)? {
            Value::Int(v) => Ok(*v),
            Value::Null => Ok(NULL_INT),
            _ => Err(unsupported("int", column)),
        }
    }

    fn get_long(&self, column: usize) -> Result<i64> {
        match self.value(column)? {
            Value::Long(v) => Ok(*v),
            Value::Null => Ok(NULL_LONG),
            _ => Err(unsupported("long", column)),
        }
    }

    fn get_double(&self, column: usize) -> Result<f64> {
        match self.value(column)? {
            Value::Double(v) => Ok(*v),
            Value::Null => Ok(f64::NAN),
            _ => Err(unsupported("double", column)),
        }
    }

    fn get_timestamp(&self, column: usize) -> Result<i64> {
        match self.value(column)? {
            Value::Timestamp(v) => Ok(*v),
            Value::Null => Ok(NULL_TIMESTAMP),
            _ => Err(unsupported("timestamp", column)),
        }
    }

    fn get_str(&self, column: usize) -> Result<Option<&str>> {
        match self.value(column)? {
            Value::Str(v) => Ok(Some(v)),
            Value::Null => Ok(None),
            _ => Err(unsupported("string", column)),
        }
    }

    fn get_symbol(&self, column: usize) -> Result<i32> {
        match self.value(column)? {
            Value::Symbol(v) => Ok(*v),
            Value::Null => Ok(NULL_INT),
            _ => Err(unsupported("symbol", column)),
        }
    }

    fn get_bin(&self, column: usize) -> Result<Option<&[u8]>> {
        match self.value(column)? {
            Value::Bin(v) => Ok(Some(v)),
            Value::Null => Ok(None),
            _ => Err(unsupported("binary", column)),
        }
    }
}

impl RowCursor for MemoryCursor<'_> {
    fn record(&self) -> &dyn Record {
        self
    }

    fn next(&mut self) -> Result<bool> {
        let next = self.row.map_or(0, |row| row + 1);
        if next < self.table.row_count() {
            self.row = Some(next);
            Ok(true)
        } else {
            Ok(false)
        }
    }

    fn record_at(&mut self, row_id: RowId) -> Result<()> {
        let raw = row_id.raw();
        ensure!(
            raw >= 0 && (raw as usize) < self.table.row_count(),
            "row id {} out of range for {} rows",
            raw,
            self.table.row_count()
        );
        self.row = Some(raw as usize);
        Ok(())
    }

    fn to_top(&mut self) -> Result<()> {
        self.row = None;
        Ok(())
    }

    fn symbol_table(&self, column: usize) -> Option<&SymbolTable> {
        self.table.symbols.get(column)?.as_ref()
    }
}

/// Hands out cursors over one owned [`MemoryTable`].
pub struct MemoryCursorFactory {
    table: MemoryTable,
}

impl MemoryCursorFactory {
    pub fn new(table: MemoryTable) -> Self {
        Self { table }
    }
}

impl RecordCursorFactory for MemoryCursorFactory {
    fn metadata(&self) -> &RecordMetadata {
        self.table.metadata()
    }

    fn cursor(&mut self) -> Result<Box<dyn RowCursor + '_>> {
        Ok(Box::new(MemoryCursor::new(&self.table)))
    }

    fn supports_random_access(&self) -> bool {
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::ColumnMeta;

    fn table() -> MemoryTable {
        let metadata = RecordMetadata::new(
            vec![
                ColumnMeta::new("sym", ColumnType::Symbol),
                ColumnMeta::new("ts", ColumnType::Timestamp),
                ColumnMeta::new("qty", ColumnType::Long),
            ],
            Some(1),
        )
        .expect("valid metadata");
        MemoryTable::new(metadata)
    }

    #[test]
    fn push_row_rejects_wrong_arity_and_category() {
        let mut table = table();
        assert!(table.push_row(vec![Value::Symbol(0)]).is_err());
        assert!(table
            .push_row(vec![Value::Symbol(0), Value::Long(5), Value::Long(1)])
            .is_err());
        assert!(table
            .push_row(vec![Value::Null, Value::Timestamp(5), Value::Long(1)])
            .is_ok());
    }

    #[test]
    fn cursor_walks_rows_and_repositions() {
        let mut table = table();
        let aapl = table.intern_symbol(0, "AAPL").unwrap();
        for (ts, qty) in [(10, 100), (20, 200), (30, 300)] {
            table
                .push_row(vec![
                    Value::Symbol(aapl),
                    Value::Timestamp(ts),
                    Value::Long(qty),
                ])
                .unwrap();
        }
        let mut cursor = MemoryCursor::new(&table);
        assert!(cursor.next().unwrap());
        assert!(cursor.next().unwrap());
        let second = cursor.row_id().unwrap();
        assert_eq!(cursor.get_long(2).unwrap(), 200);
        assert!(cursor.next().unwrap());
        assert!(!cursor.next().unwrap());

        cursor.record_at(second).unwrap();
        assert_eq!(cursor.get_timestamp(1).unwrap(), 20);

        cursor.to_top().unwrap();
        assert!(cursor.next().unwrap());
        assert_eq!(cursor.get_long(2).unwrap(), 100);
    }

    #[test]
    fn wrong_category_access_is_rejected() {
        let mut table = table();
        let aapl = table.intern_symbol(0, "AAPL").unwrap();
        table
            .push_row(vec![
                Value::Symbol(aapl),
                Value::Timestamp(1),
                Value::Long(1),
            ])
            .unwrap();
        let mut cursor = MemoryCursor::new(&table);
        assert!(cursor.next().unwrap());
        assert!(cursor.get_bin(2).is_err());
        assert!(cursor.get_str(0).is_err());
    }

    #[test]
    fn symbol_dictionary_resolves_both_directions() {
        let mut table = table();
        let aapl = table.intern_symbol(0, "AAPL").unwrap();
        table
            .push_row(vec![
                Value::Symbol(aapl),
                Value::Timestamp(1),
                Value::Long(1),
            ])
            .unwrap();
        let mut cursor = MemoryCursor::new(&table);
        assert!(cursor.next().unwrap());
        let key = cursor.get_symbol(0).unwrap();
        let dict = cursor.symbol_table(0).expect("symbol column");
        assert_eq!(dict.value_of(key), Some("AAPL"));
        assert!(cursor.symbol_table(1).is_none());
    }
}
