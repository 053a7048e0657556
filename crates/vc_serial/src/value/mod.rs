//! Provide the untyped value carrier of the protocol.
//!
//! - [`Value`]: the value handed to `write_value` and returned by `read_value`,
//!   the fallback every typed primitive funnels into.
//! - [`ValueKind`]: the kind of a [`Value`], used to report mismatches.
//! - [`SerialEnum`]: implemented by enums that can be written as enum values.
//! - [`EnumValue`]: the type-erased form of a [`SerialEnum`] value.

// -----------------------------------------------------------------------------
// Modules

mod enum_value;
mod kind;
mod value;

// -----------------------------------------------------------------------------
// Exports

pub use enum_value::{EnumValue, SerialEnum};
pub use kind::ValueKind;
pub use value::Value;
