//! # TideDB Configuration Constants
//!
//! Sizing constants for the keyed execution map. The map is created once per
//! join factory and cleared (not reallocated) between executions, so these
//! values bound the steady-state allocation behavior of a query, not a
//! per-row cost.
//!
//! ## Dependency Notes
//!
//! ```text
//! MAP_INITIAL_CAPACITY (64)
//!       │
//!       └─> Pre-sized entry count of JoinKeyMap. Grows on demand; clear()
//!           retains whatever capacity the largest execution reached.
//!
//! VAR_KEY_RESERVE (16 bytes)
//!       │
//!       └─> Key-buffer reserve per variable-size key column (Str, Binary).
//!           Fixed-size columns reserve their exact encoded width instead
//!           (ColumnType::key_width). The buffer grows past the reserve for
//!           longer values and keeps that capacity for the rest of the
//!           traversal.
//! ```
//!
//! ## Usage
//!
//! Import constants from this module rather than defining them locally:
//!
//! ```ignore
//! use crate::config::{MAP_INITIAL_CAPACITY, VAR_KEY_RESERVE};
//! ```

/// Initial entry capacity of the keyed execution map.
pub const MAP_INITIAL_CAPACITY: usize = 64;

/// Key-buffer bytes reserved per variable-size join-key column.
pub const VAR_KEY_RESERVE: usize = 16;
