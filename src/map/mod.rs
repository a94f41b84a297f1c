//! # Keyed Execution Map
//!
//! This module provides `JoinKeyMap`, the execution-scoped associative
//! structure that makes the AS-OF join sub-linear: composite join keys map
//! to a fixed layout of 8-byte value cells. The map lives for one query
//! factory, is cleared (never reallocated) between executions, and is only
//! ever driven by one traversal at a time.
//!
//! ## Key Building
//!
//! Keys are written through a reusable buffer, never allocated per row:
//!
//! ```ignore
//! let mut key = map.with_key();
//! key.put_symbol(sym);
//! key.put_long(venue_id);
//! key.create_value().put_long(0, row_id.raw());
//! ```
//!
//! `with_key` clears the buffer and hands out a [`KeyBuilder`] that borrows
//! the map exclusively. The builder is consumed by `find_value` (lookup
//! only) or `create_value` (insert-or-fetch), so a key can neither be
//! finalized twice nor read half-built.
//!
//! ## Encoding
//!
//! Key bytes are an injective, equality-only encoding: fixed-width values
//! in little-endian, variable-size values length-prefixed, absence encoded
//! by a reserved length tag. Unlike the byte-comparable index encodings of
//! storage engines, no ordering or escape machinery is needed; map keys
//! are only ever hashed and compared for equality.
//!
//! ## Performance Characteristics
//!
//! - Insert/lookup: amortized O(1) (hashbrown open addressing)
//! - `clear`: drops entries, retains capacity
//! - Key building: zero allocation once the buffer has grown to the widest
//!   key seen

mod builder;
mod table;


pub use builder::KeyBuilder;
pub use table::{JoinKeyMap, ValueSlot};
