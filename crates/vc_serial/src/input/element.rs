use alloc::string::String;

use super::{Input, NextElement, cast_enum};

use crate::desc::{ClassDesc, UNIT_DESC};
use crate::value::{SerialEnum, Value};
use crate::{Result, SerializationError};

// -----------------------------------------------------------------------------
// ElementDecoder

/// The backend hooks of the positional strategy, read side.
///
/// Defaults:
///
/// - [`read_element`](Self::read_element) answers [`NextElement::ReadAll`].
/// - [`read_not_null_mark`](Self::read_not_null_mark) answers `true`, and
///   [`read_null_value`](Self::read_null_value) consumes nothing.
/// - [`read_value`](Self::read_value) fails with [`SerializationError::Unsupported`].
/// - Every typed read is a strict cast of [`read_value`](Self::read_value).
/// - [`read_unit_value`](Self::read_unit_value) reads an empty [`UNIT_DESC`]
///   composite.
pub trait ElementDecoder {
    fn read_element(&mut self, _desc: &dyn ClassDesc) -> Result<NextElement> {
        Ok(NextElement::ReadAll)
    }

    fn read_not_null_mark(&mut self) -> Result<bool> {
        Ok(true)
    }

    fn read_null_value(&mut self) -> Result<()> {
        Ok(())
    }

    fn read_value(&mut self) -> Result<Value<'static>> {
        Err(SerializationError::unsupported("value"))
    }

    fn read_unit_value(&mut self) -> Result<()> {
        self.read_begin(&UNIT_DESC)?;
        self.read_end(&UNIT_DESC)
    }

    #[inline]
    fn read_bool_value(&mut self) -> Result<bool> {
        self.read_value()?.into_bool()
    }

    #[inline]
    fn read_byte_value(&mut self) -> Result<i8> {
        self.read_value()?.into_byte()
    }

    #[inline]
    fn read_short_value(&mut self) -> Result<i16> {
        self.read_value()?.into_short()
    }

    #[inline]
    fn read_int_value(&mut self) -> Result<i32> {
        self.read_value()?.into_int()
    }

    #[inline]
    fn read_long_value(&mut self) -> Result<i64> {
        self.read_value()?.into_long()
    }

    #[inline]
    fn read_float_value(&mut self) -> Result<f32> {
        self.read_value()?.into_float()
    }

    #[inline]
    fn read_double_value(&mut self) -> Result<f64> {
        self.read_value()?.into_double()
    }

    #[inline]
    fn read_char_value(&mut self) -> Result<char> {
        self.read_value()?.into_char()
    }

    #[inline]
    fn read_string_value(&mut self) -> Result<String> {
        self.read_value()?.into_string()
    }

    fn read_enum_value<E: SerialEnum>(&mut self) -> Result<E> {
        cast_enum(self.read_value()?)
    }

    fn read_begin(&mut self, _desc: &dyn ClassDesc) -> Result<()> {
        Ok(())
    }

    fn read_end(&mut self, _desc: &dyn ClassDesc) -> Result<()> {
        Ok(())
    }
}

// -----------------------------------------------------------------------------
// ElementInput

/// A positional read session over an [`ElementDecoder`].
///
/// # Examples
///
/// ```
/// use vc_serial::impls::IntSerializer;
/// use vc_serial::input::{ElementDecoder, ElementInput, Input};
/// use vc_serial::value::Value;
/// use vc_serial::Result;
///
/// struct Constant(i32);
///
/// impl ElementDecoder for Constant {
///     fn read_value(&mut self) -> Result<Value<'static>> {
///         Ok(Value::Int(self.0))
///     }
/// }
///
/// let mut input = ElementInput::new(Constant(7));
/// assert_eq!(input.read(&IntSerializer), Ok(7));
/// assert!(input.read_long_value().is_err());
/// ```
pub struct ElementInput<D> {
    decoder: D,
    #[cfg(all(debug_assertions, feature = "debug"))]
    stack: crate::desc_stack::DescStack,
}

impl<D: ElementDecoder> ElementInput<D> {
    pub const fn new(decoder: D) -> Self {
        Self {
            decoder,
            #[cfg(all(debug_assertions, feature = "debug"))]
            stack: crate::desc_stack::DescStack::new(),
        }
    }

    #[inline]
    pub fn decoder(&self) -> &D {
        &self.decoder
    }

    #[inline]
    pub fn decoder_mut(&mut self) -> &mut D {
        &mut self.decoder
    }

    #[inline]
    pub fn into_inner(self) -> D {
        self.decoder
    }

    /// Attaches the open composites to an error raised by the decoder.
    #[inline]
    fn trace(&self, error: SerializationError) -> SerializationError {
        crate::cfg::debug! {
            if {
                error.traced(&self.stack)
            } else {
                error
            }
        }
    }
}

impl<D: ElementDecoder> Input for ElementInput<D> {
    fn read_element(&mut self, desc: &dyn ClassDesc) -> Result<NextElement> {
        self.decoder.read_element(desc).map_err(|e| self.trace(e))
    }

    fn read_not_null_mark(&mut self) -> Result<bool> {
        self.decoder.read_not_null_mark().map_err(|e| self.trace(e))
    }

    fn read_null_value(&mut self) -> Result<()> {
        self.decoder.read_null_value().map_err(|e| self.trace(e))
    }

    fn read_value(&mut self) -> Result<Value<'static>> {
        self.decoder.read_value().map_err(|e| self.trace(e))
    }

    fn read_unit_value(&mut self) -> Result<()> {
        self.decoder.read_unit_value().map_err(|e| self.trace(e))
    }

    fn read_bool_value(&mut self) -> Result<bool> {
        self.decoder.read_bool_value().map_err(|e| self.trace(e))
    }

    fn read_byte_value(&mut self) -> Result<i8> {
        self.decoder.read_byte_value().map_err(|e| self.trace(e))
    }

    fn read_short_value(&mut self) -> Result<i16> {
        self.decoder.read_short_value().map_err(|e| self.trace(e))
    }

    fn read_int_value(&mut self) -> Result<i32> {
        self.decoder.read_int_value().map_err(|e| self.trace(e))
    }

    fn read_long_value(&mut self) -> Result<i64> {
        self.decoder.read_long_value().map_err(|e| self.trace(e))
    }

    fn read_float_value(&mut self) -> Result<f32> {
        self.decoder.read_float_value().map_err(|e| self.trace(e))
    }

    fn read_double_value(&mut self) -> Result<f64> {
        self.decoder.read_double_value().map_err(|e| self.trace(e))
    }

    fn read_char_value(&mut self) -> Result<char> {
        self.decoder.read_char_value().map_err(|e| self.trace(e))
    }

    fn read_string_value(&mut self) -> Result<String> {
        self.decoder.read_string_value().map_err(|e| self.trace(e))
    }

    fn read_enum_value<E: SerialEnum>(&mut self) -> Result<E> {
        self.decoder.read_enum_value().map_err(|e| self.trace(e))
    }

    fn read_begin(&mut self, desc: &dyn ClassDesc) -> Result<()> {
        self.decoder.read_begin(desc).map_err(|e| self.trace(e))?;
        crate::cfg::debug! {
            if { self.stack.push(desc) } else {}
        }
        Ok(())
    }

    fn read_end(&mut self, desc: &dyn ClassDesc) -> Result<()> {
        self.decoder.read_end(desc).map_err(|e| self.trace(e))?;
        crate::cfg::debug! {
            if { self.stack.pop(desc) } else {}
        }
        Ok(())
    }
}
