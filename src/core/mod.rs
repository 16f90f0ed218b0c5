//! Core types, errors, and schema validation.
//!
//! This module provides the provider-independent internal record, the
//! error taxonomy shared by every converter, and the schema toolkit that
//! turns untyped payloads into typed values.

mod dates;
mod error;
mod internal_format;
pub mod schema;
mod types;

pub use dates::{is_date, parse_timestamp};
pub use error::*;
pub use internal_format::validate_internal_format;
pub use schema::{Obj, Rule, SchemaCheck};
pub use types::*;
