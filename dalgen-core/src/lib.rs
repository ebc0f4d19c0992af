//! Core text utilities for the dalgen data-access generator.
//!
//! This crate provides the fundamental, dependency-free building blocks
//! shared by the descriptor and codegen crates: identifier case conversion
//! and the callable-name grammar used for SQL function sources.

mod case;
mod sql;

pub use case::to_snake_case;
pub use sql::{CALL_MARKER, is_valid_callable_name, strip_call_marker};
