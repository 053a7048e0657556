//! Provide serializers for common types.
//!
//! These are hand-written in the shape a generated serializer takes, and
//! work with any [`Output`](crate::output::Output) and [`Input`](crate::input::Input).
//!
//! | Type | Serializer |
//! |---|---|
//! | `()` | [`UnitSerializer`] |
//! | `bool`, `i8`, `i16`, `i32`, `i64` | [`BoolSerializer`], [`ByteSerializer`], [`ShortSerializer`], [`IntSerializer`], [`LongSerializer`] |
//! | `f32`, `f64`, `char` | [`FloatSerializer`], [`DoubleSerializer`], [`CharSerializer`] |
//! | `str`, `String` | [`StringSerializer`] |
//! | [`SerialEnum`](crate::value::SerialEnum) | [`EnumSerializer`] |
//! | `Option<T>` | [`NullableSerializer`] |
//! | `Vec<T>` | [`ListSerializer`] |
//! | [`SerialMap`] | [`MapSerializer`] |

// -----------------------------------------------------------------------------
// Modules

mod enums;
mod list;
mod map;
mod nullable;
mod primitive;

// -----------------------------------------------------------------------------
// Exports

pub use enums::EnumSerializer;
pub use list::ListSerializer;
pub use map::{MapSerializer, SerialMap};
pub use nullable::NullableSerializer;
pub use primitive::{
    BoolSerializer, ByteSerializer, CharSerializer, DoubleSerializer, FloatSerializer, IntSerializer,
    LongSerializer, ShortSerializer, StringSerializer, UnitSerializer,
};
