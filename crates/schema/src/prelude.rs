//! Common imports for building and running schemas.
//!
//! ```rust
//! use conform_schema::prelude::*;
//!
//! let color = string_union(["red", "green", "blue"]);
//! assert!(color.guard(&Value::from("green")));
//! ```

pub use crate::builder::{
    array, bigint, boolean, bytes, literal, number, number_union, object, record,
    string, string_union, tuple, union,
};
pub use crate::error::{ErrorCode, Invalid, Violations};
pub use crate::parse::parse;
pub use crate::path::{Path, Segment};
pub use crate::schema::{Brand, Schema, SchemaKind};
pub use crate::validate::{guard, validate};
pub use conform_value::{Value, ValueKind};
