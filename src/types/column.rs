//! # Column Categories
//!
//! This module provides `ColumnType`, the closed discriminant over the
//! column categories the execution core can read and key on. The enum is
//! metadata-free; column names live in `ColumnMeta`.
//!
//! ## Design
//!
//! Every category maps to exactly one typed accessor on the `Record` trait.
//! Reading a column through the wrong category's accessor is a contract
//! violation, not a coercion. Categories also know their encoded key width,
//! which sizes the reusable key buffer of the execution map.

/// Closed set of column categories supported by the execution core.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ColumnType {
    Boolean,
    Int,
    Long,
    Double,
    Timestamp,
    Str,
    Symbol,
    Binary,
}

impl ColumnType {
    /// Human-readable category name for error messages.
    pub fn name(self) -> &'static str {
        match self {
            ColumnType::Boolean => "boolean",
            ColumnType::Int => "int",
            ColumnType::Long => "long",
            ColumnType::Double => "double",
            ColumnType::Timestamp => "timestamp",
            ColumnType::Str => "string",
            ColumnType::Symbol => "symbol",
            ColumnType::Binary => "binary",
        }
    }

    /// Encoded width of this category in a map key, or `None` when the
    /// width depends on the value.
    pub fn key_width(self) -> Option<usize> {
        match self {
            ColumnType::Boolean => Some(1),
            ColumnType::Int | ColumnType::Symbol => Some(4),
            ColumnType::Long | ColumnType::Double | ColumnType::Timestamp => Some(8),
            ColumnType::Str | ColumnType::Binary => None,
        }
    }

    /// Returns true for categories with value-dependent encoded size.
    pub fn is_var_size(self) -> bool {
        self.key_width().is_none()
    }
}

impl std::fmt::Display for ColumnType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
