//! # TideDB - Time-Series Join Execution Core
//!
//! TideDB is the execution core of a columnar time-series query engine. This
//! crate implements the AS-OF temporal join: pairing each row of an ordered
//! "master" stream with the most recent row of an ordered "slave" stream at
//! or before the master's timestamp, grouped by join key. The design
//! prioritizes:
//!
//! - **Zero-copy row access**: records are views over cursor-owned rows,
//!   never materialized copies
//! - **Zero allocation per row**: the join-key buffer and the map's backing
//!   storage are reused across every advance
//! - **Single-pass streams**: both inputs are consumed strictly forward,
//!   with one-row look-ahead on the slave side
//!
//! ## Quick Start
//!
//! ```ignore
//! use tidedb::join::{AsOfJoinCursorFactory, KeySink};
//! use tidedb::types::ColumnType;
//!
//! let master_sink = KeySink::new([(0, ColumnType::Symbol)]);
//! let slave_sink = KeySink::new([(0, ColumnType::Symbol)]);
//! let mut factory =
//!     AsOfJoinCursorFactory::new(trades, quotes, master_sink, slave_sink)?;
//!
//! let mut cursor = factory.cursor()?;
//! while cursor.next()? {
//!     let bid = cursor.get_double(4)?; // NaN when no quote qualifies
//! }
//! ```
//!
//! ## Architecture
//!
//! Execution is pull-based: the consumer drives the join one row at a time,
//! and the join lazily folds slave rows into a keyed map as the master
//! timestamp advances.
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │         AsOfJoinCursorFactory           │
//! │   (owns map, metadata, side factories)  │
//! ├─────────────────────────────────────────┤
//! │            AsOfJoinCursor               │
//! │    master ──> catch-up ──> lookup       │
//! │                  │            │         │
//! │                  v            v         │
//! │            JoinKeyMap   OuterJoinRecord │
//! ├─────────────────────────────────────────┤
//! │     RowCursor / Record contracts        │
//! │ (storage-backed sources plug in here)   │
//! └─────────────────────────────────────────┘
//! ```
//!
//! ## Module Overview
//!
//! - [`types`]: column categories, row identifiers, null sentinels
//! - [`record`]: typed row access, metadata, symbol tables
//! - [`cursor`]: row cursor and cursor factory contracts
//! - [`map`]: keyed execution map with reusable key buffer
//! - [`join`]: AS-OF join cursor, key projection, outer-join record
//! - [`mem`]: reference in-memory row source for tests and embedding
//! - [`config`]: centralized sizing constants

pub mod config;
pub mod cursor;
pub mod join;
pub mod map;
pub mod mem;
pub mod record;
pub mod types;

pub use cursor::{RecordCursorFactory, RowCursor};
pub use join::{AsOfJoinCursor, AsOfJoinCursorFactory, KeySink, OuterJoinRecord};
pub use map::{JoinKeyMap, KeyBuilder, ValueSlot};
pub use record::{ColumnMeta, NullRecord, Record, RecordMetadata, SymbolTable};
pub use types::{ColumnType, RowId, NULL_INT, NULL_LONG, NULL_TIMESTAMP};
