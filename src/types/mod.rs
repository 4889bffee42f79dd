//! DSL types
//!
//! This module holds the target-independent type expressions found in
//! parameter, field and loop-variable positions, and the per-backend
//! tables translating DSL type keywords to target type names.

pub mod core;
pub mod table;

pub use self::core::*;
pub use table::TypeTable;
