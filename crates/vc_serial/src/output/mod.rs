//! Provide the write side of the protocol.
//!
//! # Overview
//!
//! - [`Output`]: the writer capability. Savers drive it, end users only
//!   call [`write`](Output::write) and [`write_nullable`](Output::write_nullable).
//! - [`ElementOutput`]: the positional strategy, decorating an [`ElementEncoder`].
//!     - Element identity is ignored; every typed primitive funnels into
//!       [`ElementEncoder::write_value`] unless the backend overrides it.
//!     - Suited to formats that are self-describing by value order.
//! - [`NamedOutput`]: the name-path strategy, decorating a [`NamedEncoder`].
//!     - Each value is emitted under the dotted path of the elements leading
//!       to it, e.g. `line.from.x`.
//!     - Suited to flat key-value formats.
//!
//! # Call shape
//!
//! ```text
//! write(saver, value)
//!   └─ saver.save(output, value)
//!        ├─ write_begin(desc)
//!        ├─ write_int_element_value(desc, 0, x)            // write_element + write_int_value
//!        ├─ write_serializable_element_value(desc, 1, ..)  // write_element + nested save
//!        └─ write_end(desc)
//! ```

// -----------------------------------------------------------------------------
// Modules

mod element;
mod named;

// -----------------------------------------------------------------------------
// Exports

pub use element::{ElementEncoder, ElementOutput};
pub use named::{NamedEncoder, NamedOutput};

// -----------------------------------------------------------------------------
// Output

use core::any::Any;

use crate::desc::ClassDesc;
use crate::value::{SerialEnum, Value};
use crate::{Result, Saver};

/// The writer capability of the protocol.
///
/// It has three layers:
///
/// - **Top-level API**: [`write`](Output::write) and [`write_nullable`](Output::write_nullable),
///   the only entry points a caller needs.
/// - **Primitive layer**: element announcement, null signalling, the untyped
///   [`write_value`](Output::write_value) fallback, eleven typed primitives and
///   the composite brackets [`write_begin`](Output::write_begin)/[`write_end`](Output::write_end).
/// - **Element-indexed layer**: `write_*_element_value(desc, index, value)`,
///   which announce the element and then perform the bare write. This is the
///   call shape serializers use when walking a structured type.
///
/// Backends rarely implement this trait directly; they implement
/// [`ElementEncoder`] or [`NamedEncoder`] and pick the matching session.
///
/// A null value is written as [`write_null_value`](Output::write_null_value)
/// alone; a present nullable value is [`write_not_null_mark`](Output::write_not_null_mark)
/// followed by the value.
pub trait Output: Sized {
    // ---------------------------------------------------------------
    // Top-level API

    /// Writes `value` with `saver`.
    #[inline]
    fn write<T: ?Sized, S: Saver<T>>(&mut self, saver: &S, value: &T) -> Result<()> {
        saver.save(self, value)
    }

    /// Writes a nullable `value` with `saver`.
    fn write_nullable<T: ?Sized, S: Saver<T>>(&mut self, saver: &S, value: Option<&T>) -> Result<()> {
        match value {
            None => self.write_null_value(),
            Some(value) => {
                self.write_not_null_mark()?;
                saver.save(self, value)
            }
        }
    }

    // ---------------------------------------------------------------
    // Primitive layer

    /// Announces the element at `index` of `desc`; always followed by its value.
    fn write_element(&mut self, desc: &dyn ClassDesc, index: usize) -> Result<()>;

    /// Signals that a present nullable value follows.
    fn write_not_null_mark(&mut self) -> Result<()>;

    /// Writes an absent nullable value. Consumes no further value.
    fn write_null_value(&mut self) -> Result<()>;

    /// Writes an untyped value.
    fn write_value(&mut self, value: Value<'_>) -> Result<()>;

    fn write_nullable_value(&mut self, value: Option<Value<'_>>) -> Result<()> {
        match value {
            None => self.write_null_value(),
            Some(value) => {
                self.write_not_null_mark()?;
                self.write_value(value)
            }
        }
    }

    fn write_unit_value(&mut self) -> Result<()>;
    fn write_bool_value(&mut self, value: bool) -> Result<()>;
    fn write_byte_value(&mut self, value: i8) -> Result<()>;
    fn write_short_value(&mut self, value: i16) -> Result<()>;
    fn write_int_value(&mut self, value: i32) -> Result<()>;
    fn write_long_value(&mut self, value: i64) -> Result<()>;
    fn write_float_value(&mut self, value: f32) -> Result<()>;
    fn write_double_value(&mut self, value: f64) -> Result<()>;
    fn write_char_value(&mut self, value: char) -> Result<()>;
    fn write_string_value(&mut self, value: &str) -> Result<()>;
    fn write_enum_value<E: SerialEnum>(&mut self, value: E) -> Result<()>;

    /// Writes a nested serializable value.
    #[inline]
    fn write_serializable_value<T: Any, S: Saver<T>>(&mut self, saver: &S, value: &T) -> Result<()> {
        saver.save(self, value)
    }

    fn write_nullable_serializable_value<T: Any, S: Saver<T>>(
        &mut self,
        saver: &S,
        value: Option<&T>,
    ) -> Result<()> {
        match value {
            None => self.write_null_value(),
            Some(value) => {
                self.write_not_null_mark()?;
                self.write_serializable_value(saver, value)
            }
        }
    }

    /// Opens a composite value (object, list, map or map entry).
    fn write_begin(&mut self, desc: &dyn ClassDesc) -> Result<()>;

    /// Closes the composite opened by the matching [`write_begin`](Output::write_begin).
    fn write_end(&mut self, desc: &dyn ClassDesc) -> Result<()>;

    // ---------------------------------------------------------------
    // Element-indexed layer

    fn write_element_value(&mut self, desc: &dyn ClassDesc, index: usize, value: Value<'_>) -> Result<()> {
        self.write_element(desc, index)?;
        self.write_value(value)
    }

    fn write_nullable_element_value(
        &mut self,
        desc: &dyn ClassDesc,
        index: usize,
        value: Option<Value<'_>>,
    ) -> Result<()> {
        self.write_element(desc, index)?;
        self.write_nullable_value(value)
    }

    fn write_unit_element_value(&mut self, desc: &dyn ClassDesc, index: usize) -> Result<()> {
        self.write_element(desc, index)?;
        self.write_unit_value()
    }

    fn write_bool_element_value(&mut self, desc: &dyn ClassDesc, index: usize, value: bool) -> Result<()> {
        self.write_element(desc, index)?;
        self.write_bool_value(value)
    }

    fn write_byte_element_value(&mut self, desc: &dyn ClassDesc, index: usize, value: i8) -> Result<()> {
        self.write_element(desc, index)?;
        self.write_byte_value(value)
    }

    fn write_short_element_value(&mut self, desc: &dyn ClassDesc, index: usize, value: i16) -> Result<()> {
        self.write_element(desc, index)?;
        self.write_short_value(value)
    }

    fn write_int_element_value(&mut self, desc: &dyn ClassDesc, index: usize, value: i32) -> Result<()> {
        self.write_element(desc, index)?;
        self.write_int_value(value)
    }

    fn write_long_element_value(&mut self, desc: &dyn ClassDesc, index: usize, value: i64) -> Result<()> {
        self.write_element(desc, index)?;
        self.write_long_value(value)
    }

    fn write_float_element_value(&mut self, desc: &dyn ClassDesc, index: usize, value: f32) -> Result<()> {
        self.write_element(desc, index)?;
        self.write_float_value(value)
    }

    fn write_double_element_value(&mut self, desc: &dyn ClassDesc, index: usize, value: f64) -> Result<()> {
        self.write_element(desc, index)?;
        self.write_double_value(value)
    }

    fn write_char_element_value(&mut self, desc: &dyn ClassDesc, index: usize, value: char) -> Result<()> {
        self.write_element(desc, index)?;
        self.write_char_value(value)
    }

    fn write_string_element_value(&mut self, desc: &dyn ClassDesc, index: usize, value: &str) -> Result<()> {
        self.write_element(desc, index)?;
        self.write_string_value(value)
    }

    fn write_enum_element_value<E: SerialEnum>(
        &mut self,
        desc: &dyn ClassDesc,
        index: usize,
        value: E,
    ) -> Result<()> {
        self.write_element(desc, index)?;
        self.write_enum_value(value)
    }

    /// Announces the element, then writes `value` with `saver`.
    fn write_serializable_element_value<T: Any, S: Saver<T>>(
        &mut self,
        desc: &dyn ClassDesc,
        index: usize,
        saver: &S,
        value: &T,
    ) -> Result<()> {
        self.write_element(desc, index)?;
        self.write_serializable_value(saver, value)
    }

    fn write_nullable_serializable_element_value<T: Any, S: Saver<T>>(
        &mut self,
        desc: &dyn ClassDesc,
        index: usize,
        saver: &S,
        value: Option<&T>,
    ) -> Result<()> {
        self.write_element(desc, index)?;
        self.write_nullable_serializable_value(saver, value)
    }
}
