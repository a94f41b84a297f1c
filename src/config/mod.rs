//! # TideDB Configuration Module
//!
//! This module centralizes the sizing constants used by the join execution
//! core. Constants that depend on each other are co-located and their
//! relationships documented, so that tuning one of them does not silently
//! invalidate another.
//!
//! ## Module Organization
//!
//! - [`constants`]: All numeric configuration values with dependency notes

pub mod constants;
pub use constants::*;
