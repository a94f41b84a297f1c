//! # AS-OF Join Integration Tests
//!
//! End-to-end tests of the temporal join over in-memory row sources.
//! Masters are trade-like streams, slaves are quote-like streams; both are
//! timestamp-ordered, as the planner guarantees for real sources.
//!
//! ## Test Strategy
//!
//! 1. Build master/slave tables with known key/timestamp layouts
//! 2. Run the join through the public factory API
//! 3. Assert the matched slave row (or absence) per master row
//!
//! ## Usage
//!
//! ```sh
//! cargo test --test asof_join
//! ```

use tidedb::join::{AsOfJoinCursorFactory, KeySink};
use tidedb::mem::{MemoryCursorFactory, MemoryTable, Value};
use tidedb::record::{ColumnMeta, RecordMetadata};
use tidedb::types::{ColumnType, NULL_INT, NULL_LONG, NULL_TIMESTAMP};
use tidedb::{Record, RecordCursorFactory, RowCursor};

/// Master shape: key string, timestamp, sequence number.
fn master_table(rows: &[(&str, i64, i64)]) -> MemoryTable {
    let metadata = RecordMetadata::new(
        vec![
            ColumnMeta::new("k", ColumnType::Str),
            ColumnMeta::new("ts", ColumnType::Timestamp),
            ColumnMeta::new("seq", ColumnType::Long),
        ],
        Some(1),
    )
    .expect("valid metadata");
    let mut table = MemoryTable::new(metadata);
    for &(k, ts, seq) in rows {
        table
            .push_row(vec![
                Value::Str(k.to_string()),
                Value::Timestamp(ts),
                Value::Long(seq),
            ])
            .expect("valid row");
    }
    table
}

/// Slave shape: key string, timestamp, payload id.
fn slave_table(rows: &[(&str, i64, i64)]) -> MemoryTable {
    let metadata = RecordMetadata::new(
        vec![
            ColumnMeta::new("k", ColumnType::Str),
            ColumnMeta::new("ts", ColumnType::Timestamp),
            ColumnMeta::new("id", ColumnType::Long),
        ],
        Some(1),
    )
    .expect("valid metadata");
    let mut table = MemoryTable::new(metadata);
    for &(k, ts, id) in rows {
        table
            .push_row(vec![
                Value::Str(k.to_string()),
                Value::Timestamp(ts),
                Value::Long(id),
            ])
            .expect("valid row");
    }
    table
}

fn str_key_factory(
    master: MemoryTable,
    slave: MemoryTable,
) -> AsOfJoinCursorFactory {
    AsOfJoinCursorFactory::new(
        Box::new(MemoryCursorFactory::new(master)),
        Box::new(MemoryCursorFactory::new(slave)),
        KeySink::new([(0, ColumnType::Str)]),
        KeySink::new([(0, ColumnType::Str)]),
    )
    .expect("valid join shape")
}

/// Collects `(master seq, matched slave id or NULL_LONG)` pairs. Column 5
/// is the slave payload in the combined record.
fn run(cursor: &mut dyn RowCursor) -> Vec<(i64, i64)> {
    let mut out = Vec::new();
    while cursor.next().expect("advance") {
        let seq = cursor.get_long(2).expect("master seq");
        let id = cursor.get_long(5).expect("slave id");
        out.push((seq, id));
    }
    out
}

#[test]
fn matches_latest_slave_row_at_or_before_master() {
    let master = master_table(&[("A", 10, 0), ("A", 30, 1), ("B", 5, 2)]);
    let slave = slave_table(&[("A", 1, 101), ("A", 20, 102), ("A", 25, 103)]);
    let mut factory = str_key_factory(master, slave);
    let mut cursor = factory.cursor().expect("open");
    assert_eq!(
        run(&mut *cursor),
        vec![(0, 101), (1, 103), (2, NULL_LONG)]
    );
}

#[test]
fn last_slave_row_wins_on_equal_timestamps() {
    let master = master_table(&[("A", 10, 0)]);
    let slave = slave_table(&[("A", 10, 1), ("A", 10, 2)]);
    let mut factory = str_key_factory(master, slave);
    let mut cursor = factory.cursor().expect("open");
    assert_eq!(run(&mut *cursor), vec![(0, 2)]);
}

#[test]
fn slave_rows_after_master_timestamp_stay_invisible() {
    let master = master_table(&[("A", 10, 0)]);
    let slave = slave_table(&[("A", 15, 1)]);
    let mut factory = str_key_factory(master, slave);
    let mut cursor = factory.cursor().expect("open");
    assert_eq!(run(&mut *cursor), vec![(0, NULL_LONG)]);
}

#[test]
fn dangling_slave_row_qualifies_on_next_advance() {
    let master = master_table(&[("A", 10, 0), ("A", 20, 1)]);
    let slave = slave_table(&[("A", 5, 1), ("A", 15, 2)]);
    let mut factory = str_key_factory(master, slave);
    let mut cursor = factory.cursor().expect("open");
    assert_eq!(run(&mut *cursor), vec![(0, 1), (1, 2)]);
}

#[test]
fn slave_exhaustion_mid_catch_up_keeps_prior_matches() {
    let master = master_table(&[("A", 10, 0), ("B", 20, 1), ("A", 30, 2)]);
    let slave = slave_table(&[("A", 5, 1)]);
    let mut factory = str_key_factory(master, slave);
    let mut cursor = factory.cursor().expect("open");
    assert_eq!(run(&mut *cursor), vec![(0, 1), (1, NULL_LONG), (2, 1)]);
}

#[test]
fn interleaved_keys_track_independent_chains() {
    let master = master_table(&[("A", 10, 0), ("B", 10, 1), ("A", 40, 2), ("B", 40, 3)]);
    let slave = slave_table(&[
        ("B", 1, 10),
        ("A", 2, 20),
        ("A", 20, 21),
        ("B", 30, 11),
        ("A", 35, 22),
    ]);
    let mut factory = str_key_factory(master, slave);
    let mut cursor = factory.cursor().expect("open");
    assert_eq!(
        run(&mut *cursor),
        vec![(0, 20), (1, 10), (2, 22), (3, 11)]
    );
}

#[test]
fn empty_master_yields_nothing() {
    let master = master_table(&[]);
    let slave = slave_table(&[("A", 1, 1)]);
    let mut factory = str_key_factory(master, slave);
    let mut cursor = factory.cursor().expect("open");
    assert!(run(&mut *cursor).is_empty());
}

#[test]
fn empty_slave_never_matches() {
    let master = master_table(&[("A", 10, 0), ("B", 20, 1)]);
    let slave = slave_table(&[]);
    let mut factory = str_key_factory(master, slave);
    let mut cursor = factory.cursor().expect("open");
    assert_eq!(run(&mut *cursor), vec![(0, NULL_LONG), (1, NULL_LONG)]);
}

#[test]
fn unmatched_rows_read_null_sentinels_in_every_category() {
    let master_metadata = RecordMetadata::new(
        vec![
            ColumnMeta::new("k", ColumnType::Str),
            ColumnMeta::new("ts", ColumnType::Timestamp),
        ],
        Some(1),
    )
    .expect("valid metadata");
    let mut master = MemoryTable::new(master_metadata);
    master
        .push_row(vec![Value::Str("A".to_string()), Value::Timestamp(10)])
        .expect("valid row");

    let slave_metadata = RecordMetadata::new(
        vec![
            ColumnMeta::new("k", ColumnType::Str),
            ColumnMeta::new("ts", ColumnType::Timestamp),
            ColumnMeta::new("flag", ColumnType::Boolean),
            ColumnMeta::new("count", ColumnType::Int),
            ColumnMeta::new("qty", ColumnType::Long),
            ColumnMeta::new("px", ColumnType::Double),
            ColumnMeta::new("name", ColumnType::Str),
            ColumnMeta::new("venue", ColumnType::Symbol),
            ColumnMeta::new("payload", ColumnType::Binary),
        ],
        Some(1),
    )
    .expect("valid metadata");
    let mut slave = MemoryTable::new(slave_metadata);
    let venue = slave.intern_symbol(7, "XNAS").expect("symbol column");
    // A non-qualifying row: same key but a later timestamp. The join must
    // yield sentinels, not this row's values.
    slave
        .push_row(vec![
            Value::Str("A".to_string()),
            Value::Timestamp(99),
            Value::Bool(true),
            Value::Int(7),
            Value::Long(7),
            Value::Double(7.5),
            Value::Str("seven".to_string()),
            Value::Symbol(venue),
            Value::Bin(vec![7, 7]),
        ])
        .expect("valid row");

    let mut factory = AsOfJoinCursorFactory::new(
        Box::new(MemoryCursorFactory::new(master)),
        Box::new(MemoryCursorFactory::new(slave)),
        KeySink::new([(0, ColumnType::Str)]),
        KeySink::new([(0, ColumnType::Str)]),
    )
    .expect("valid join shape");
    let mut cursor = factory.cursor().expect("open");
    assert!(cursor.next().expect("advance"));

    assert_eq!(cursor.get_str(2).expect("slave k"), None);
    assert_eq!(cursor.get_timestamp(3).expect("slave ts"), NULL_TIMESTAMP);
    assert!(!cursor.get_bool(4).expect("slave flag"));
    assert_eq!(cursor.get_int(5).expect("slave count"), NULL_INT);
    assert_eq!(cursor.get_long(6).expect("slave qty"), NULL_LONG);
    assert!(cursor.get_double(7).expect("slave px").is_nan());
    assert_eq!(cursor.get_str(8).expect("slave name"), None);
    assert_eq!(cursor.get_symbol(9).expect("slave venue"), NULL_INT);
    assert_eq!(cursor.get_bin(10).expect("slave payload"), None);

    assert!(!cursor.next().expect("advance"));
}

#[test]
fn to_top_replays_the_identical_sequence() {
    let master = master_table(&[("A", 10, 0), ("B", 12, 1), ("A", 30, 2)]);
    let slave = slave_table(&[("A", 1, 1), ("B", 11, 2), ("A", 20, 3), ("A", 40, 4)]);
    let mut factory = str_key_factory(master, slave);
    let mut cursor = factory.cursor().expect("open");
    let first = run(&mut *cursor);
    assert_eq!(first, vec![(0, 1), (1, 2), (2, 3)]);
    for _ in 0..3 {
        cursor.to_top().expect("rewind");
        assert_eq!(run(&mut *cursor), first);
    }
}

#[test]
fn reopening_a_cursor_starts_a_fresh_pass() {
    let master = master_table(&[("A", 10, 0)]);
    let slave = slave_table(&[("A", 5, 1)]);
    let mut factory = str_key_factory(master, slave);
    for _ in 0..2 {
        let mut cursor = factory.cursor().expect("open");
        assert_eq!(run(&mut *cursor), vec![(0, 1)]);
        cursor.close().expect("close");
    }
}

#[test]
fn symbol_keys_join_and_resolve_through_the_split() {
    let master_metadata = RecordMetadata::new(
        vec![
            ColumnMeta::new("sym", ColumnType::Symbol),
            ColumnMeta::new("ts", ColumnType::Timestamp),
        ],
        Some(1),
    )
    .expect("valid metadata");
    let mut master = MemoryTable::new(master_metadata);
    let m_aapl = master.intern_symbol(0, "AAPL").expect("symbol column");
    let m_msft = master.intern_symbol(0, "MSFT").expect("symbol column");
    master
        .push_row(vec![Value::Symbol(m_aapl), Value::Timestamp(10)])
        .expect("valid row");
    master
        .push_row(vec![Value::Symbol(m_msft), Value::Timestamp(20)])
        .expect("valid row");

    let slave_metadata = RecordMetadata::new(
        vec![
            ColumnMeta::new("venue", ColumnType::Symbol),
            ColumnMeta::new("ts", ColumnType::Timestamp),
            ColumnMeta::new("px", ColumnType::Double),
        ],
        Some(1),
    )
    .expect("valid metadata");
    let mut slave = MemoryTable::new(slave_metadata);
    let s_aapl = slave.intern_symbol(0, "AAPL").expect("symbol column");
    slave
        .push_row(vec![
            Value::Symbol(s_aapl),
            Value::Timestamp(5),
            Value::Double(187.25),
        ])
        .expect("valid row");

    // Symbol keys join on the dictionary key, so both sides must share an
    // interning order; here AAPL is key 0 on both sides.
    let mut factory = AsOfJoinCursorFactory::new(
        Box::new(MemoryCursorFactory::new(master)),
        Box::new(MemoryCursorFactory::new(slave)),
        KeySink::new([(0, ColumnType::Symbol)]),
        KeySink::new([(0, ColumnType::Symbol)]),
    )
    .expect("valid join shape");
    let mut cursor = factory.cursor().expect("open");

    assert!(cursor.next().expect("advance"));
    let key = cursor.get_symbol(0).expect("master sym");
    let master_dict = cursor.symbol_table(0).expect("master dictionary");
    assert_eq!(master_dict.value_of(key), Some("AAPL"));
    let slave_dict = cursor.symbol_table(2).expect("slave dictionary");
    assert_eq!(
        slave_dict.value_of(cursor.get_symbol(2).expect("slave venue")),
        Some("AAPL")
    );
    assert_eq!(cursor.get_double(4).expect("slave px"), 187.25);

    // Second master row has no match; row data reads null but the
    // slave-side dictionary still resolves.
    assert!(cursor.next().expect("advance"));
    assert_eq!(cursor.get_symbol(2).expect("slave venue"), NULL_INT);
    assert!(cursor.symbol_table(2).is_some());
}

#[test]
fn join_output_nests_as_the_master_of_another_join() {
    // trades AS-OF quotes, then that output AS-OF fees, all keyed on k.
    let trades = master_table(&[("A", 10, 0), ("A", 30, 1)]);
    let quotes = slave_table(&[("A", 5, 100), ("A", 25, 101)]);
    let fees = slave_table(&[("A", 1, 7), ("A", 29, 9)]);

    let inner = AsOfJoinCursorFactory::new(
        Box::new(MemoryCursorFactory::new(trades)),
        Box::new(MemoryCursorFactory::new(quotes)),
        KeySink::new([(0, ColumnType::Str)]),
        KeySink::new([(0, ColumnType::Str)]),
    )
    .expect("valid inner join");

    let mut outer = AsOfJoinCursorFactory::new(
        Box::new(inner),
        Box::new(MemoryCursorFactory::new(fees)),
        KeySink::new([(0, ColumnType::Str)]),
        KeySink::new([(0, ColumnType::Str)]),
    )
    .expect("valid outer join");

    assert_eq!(outer.metadata().column_count(), 9);
    assert_eq!(outer.column_split(), 6);

    let mut cursor = outer.cursor().expect("open");
    let mut rows = Vec::new();
    while cursor.next().expect("advance") {
        rows.push((
            cursor.get_long(2).expect("trade seq"),
            cursor.get_long(5).expect("quote id"),
            cursor.get_long(8).expect("fee id"),
        ));
    }
    assert_eq!(rows, vec![(0, 100, 7), (1, 101, 9)]);
}

#[test]
fn combined_metadata_spans_both_sides() {
    let master = master_table(&[]);
    let slave = slave_table(&[]);
    let factory = str_key_factory(master, slave);
    let metadata = factory.metadata();
    assert_eq!(metadata.column_count(), 6);
    assert_eq!(metadata.column(0).unwrap().name(), "k");
    assert_eq!(metadata.column(3).unwrap().name(), "k");
    assert_eq!(metadata.column(5).unwrap().name(), "id");
    assert_eq!(metadata.timestamp_index(), Some(1));
    assert_eq!(factory.column_split(), 3);
    assert!(!factory.supports_random_access());
}

#[test]
fn close_is_idempotent_and_blocks_reopening() {
    let master = master_table(&[("A", 10, 0)]);
    let slave = slave_table(&[("A", 5, 1)]);
    let mut factory = str_key_factory(master, slave);
    {
        let mut cursor = factory.cursor().expect("open");
        cursor.close().expect("close");
        cursor.close().expect("double close");
    }
    factory.close().expect("close");
    factory.close().expect("double close");
    assert!(factory.cursor().is_err());
}

#[test]
fn wrong_category_access_through_the_join_is_an_error() {
    let master = master_table(&[("A", 10, 0)]);
    let slave = slave_table(&[("A", 5, 1)]);
    let mut factory = str_key_factory(master, slave);
    let mut cursor = factory.cursor().expect("open");
    assert!(cursor.next().expect("advance"));
    // Column 2 is a Long on the master side; column 5 a matched Long on
    // the slave side.
    assert!(cursor.get_bin(2).is_err());
    assert!(cursor.get_str(5).is_err());
}

#[test]
fn sources_without_timestamps_are_rejected() {
    let metadata = RecordMetadata::new(
        vec![
            ColumnMeta::new("k", ColumnType::Str),
            ColumnMeta::new("v", ColumnType::Long),
        ],
        None,
    )
    .expect("valid metadata");
    let untimed = MemoryTable::new(metadata);
    let slave = slave_table(&[]);
    let result = AsOfJoinCursorFactory::new(
        Box::new(MemoryCursorFactory::new(untimed)),
        Box::new(MemoryCursorFactory::new(slave)),
        KeySink::new([(0, ColumnType::Str)]),
        KeySink::new([(0, ColumnType::Str)]),
    );
    assert!(result.is_err());
}

#[test]
fn mismatched_key_layouts_are_rejected() {
    let master = master_table(&[]);
    let slave = slave_table(&[]);
    let result = AsOfJoinCursorFactory::new(
        Box::new(MemoryCursorFactory::new(master)),
        Box::new(MemoryCursorFactory::new(slave)),
        KeySink::new([(0, ColumnType::Str)]),
        KeySink::new([(2, ColumnType::Long)]),
    );
    assert!(result.is_err());

    let master = master_table(&[]);
    let slave = slave_table(&[]);
    let result = AsOfJoinCursorFactory::new(
        Box::new(MemoryCursorFactory::new(master)),
        Box::new(MemoryCursorFactory::new(slave)),
        KeySink::new([(1, ColumnType::Str)]),
        KeySink::new([(0, ColumnType::Str)]),
    );
    assert!(result.is_err(), "projected category must match metadata");
}
