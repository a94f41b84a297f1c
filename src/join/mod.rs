//! # AS-OF Temporal Join
//!
//! This module implements the AS-OF join: each master row pairs with the
//! most recent slave row at or before the master's timestamp, per join-key
//! group, with outer semantics (an unmatched master row still yields, its
//! slave columns reading as nulls).
//!
//! ## Algorithm
//!
//! Both inputs are timestamp-ordered and consumed strictly forward. For
//! every master advance, the cursor folds newly qualifying slave rows into
//! the keyed map (key: join columns, value: row identifier, later rows
//! overwriting earlier ones) up to but not past the master timestamp, then
//! looks the master's key up and repositions the slave cursor onto the
//! stored row. Because the slave stream cannot be pushed back, the first
//! row past the master timestamp is remembered as a *dangling* row and
//! folded in at the start of the next catch-up.
//!
//! ```text
//! master ts:   10        30
//!               │         │
//! slave  ts:  1,5,9 │ 11..28 │ 31  ──> 31 kept dangling
//!             folded  folded
//! ```
//!
//! The map therefore always holds, per key, the most recent examined slave
//! row at or before the current master timestamp: exactly the AS-OF match.
//!
//! ## Components
//!
//! - [`KeySink`]: writes a record's join-key columns into a key builder in
//!   fixed order
//! - [`OuterJoinRecord`]: resolves combined column indices to the master
//!   side, the slave side, or the null record
//! - [`AsOfJoinCursor`]: the dual-cursor state machine
//! - [`AsOfJoinCursorFactory`]: owns map, metadata and both side factories

mod asof;
mod factory;
mod record;
mod sink;

pub use asof::AsOfJoinCursor;
pub use factory::AsOfJoinCursorFactory;
pub use record::{ColumnSource, OuterJoinRecord};
pub use sink::KeySink;
