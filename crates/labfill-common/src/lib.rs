//! Shared utilities for labfill crates.
//!
//! This crate provides common helpers used across the labfill workspace:
//! Polars `AnyValue` conversions and decimal parsing for analyzer values.

pub mod decimal;
pub mod polars;

pub use decimal::{is_zero_decimal, parse_decimal};
pub use polars::{any_to_f64, any_to_string, format_numeric};
