//! # conform-schema
//!
//! A schema-driven structural validation engine. A [`Schema`] declares
//! the shape a value must have; the engine decides whether an untyped
//! subject conforms and reports *every* violation in one pass, each
//! with the exact path where it occurred.
//!
//! ## Quick Start
//!
//! ```rust
//! use conform_schema::prelude::*;
//!
//! let settings = object([
//!     ("host", Schema::from(string().min_length(1))),
//!     ("port", Schema::from(number().min(1.0).max(65535.0))),
//!     ("tag", Schema::from(string().optional().default_value("default"))),
//! ]);
//!
//! let subject = Value::object([
//!     ("host", Value::from("localhost")),
//!     ("port", Value::from(8080.0)),
//! ]);
//!
//! let output = settings.parse(&subject).unwrap().unwrap();
//! assert_eq!(output.as_object().unwrap()["tag"], Value::from("default"));
//! ```
//!
//! ## The two operations
//!
//! - [`parse`](parse::parse) — coercing traversal: applies declared
//!   defaults and treats null as absence for optional schemas.
//! - [`validate`](validate::validate) — pure structural check: no
//!   defaults, and null only passes where `nullable` allows it.
//!   [`guard`](validate::guard) is its predicate form.
//!
//! Both return either a freshly owned output value or a non-empty,
//! traversal-ordered list of [`Invalid`] records — failure is data,
//! never a panic, no matter how malformed the subject is.

// Violations carries the full failure detail (schema + subject clones per
// record) — boxing it would add indirection to every traversal call for
// no practical benefit.
#![allow(clippy::result_large_err)]

pub mod builder;
pub mod error;
pub mod parse;
pub mod path;
pub mod prelude;
pub mod schema;
pub mod validate;

mod verify;

pub use conform_value::{Value, ValueKind};
pub use error::{ErrorCode, Invalid, Violations};
pub use parse::parse;
pub use path::{Path, Segment};
pub use schema::{Brand, Fields, Schema, SchemaKind};
pub use validate::{guard, validate};
