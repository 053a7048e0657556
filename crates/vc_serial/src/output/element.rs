use super::Output;

use crate::desc::{ClassDesc, UNIT_DESC};
use crate::value::{EnumValue, SerialEnum, Value};
use crate::{Result, SerializationError};

// -----------------------------------------------------------------------------
// ElementEncoder

/// The backend hooks of the positional strategy.
///
/// Every hook has a default, so a backend overrides only what its format
/// needs:
///
/// - [`write_element`](Self::write_element), [`write_not_null_mark`](Self::write_not_null_mark),
///   [`write_begin`](Self::write_begin) and [`write_end`](Self::write_end) do nothing.
/// - [`write_value`](Self::write_value) and [`write_null_value`](Self::write_null_value)
///   fail with [`SerializationError::Unsupported`], so a forgotten override
///   fails loudly at the call site instead of corrupting the output.
/// - Every typed primitive funnels into [`write_value`](Self::write_value);
///   override them for performance or format fidelity.
/// - [`write_unit_value`](Self::write_unit_value) writes an empty
///   [`UNIT_DESC`] composite.
///
/// The encoder becomes a writer through [`ElementOutput`].
pub trait ElementEncoder {
    fn write_element(&mut self, _desc: &dyn ClassDesc, _index: usize) -> Result<()> {
        Ok(())
    }

    /// Writes the presence marker; empty by default.
    fn write_not_null_mark(&mut self) -> Result<()> {
        Ok(())
    }

    fn write_null_value(&mut self) -> Result<()> {
        Err(SerializationError::unsupported("null"))
    }

    fn write_value(&mut self, _value: Value<'_>) -> Result<()> {
        Err(SerializationError::unsupported("value"))
    }

    fn write_unit_value(&mut self) -> Result<()> {
        self.write_begin(&UNIT_DESC)?;
        self.write_end(&UNIT_DESC)
    }

    #[inline]
    fn write_bool_value(&mut self, value: bool) -> Result<()> {
        self.write_value(Value::Bool(value))
    }

    #[inline]
    fn write_byte_value(&mut self, value: i8) -> Result<()> {
        self.write_value(Value::Byte(value))
    }

    #[inline]
    fn write_short_value(&mut self, value: i16) -> Result<()> {
        self.write_value(Value::Short(value))
    }

    #[inline]
    fn write_int_value(&mut self, value: i32) -> Result<()> {
        self.write_value(Value::Int(value))
    }

    #[inline]
    fn write_long_value(&mut self, value: i64) -> Result<()> {
        self.write_value(Value::Long(value))
    }

    #[inline]
    fn write_float_value(&mut self, value: f32) -> Result<()> {
        self.write_value(Value::Float(value))
    }

    #[inline]
    fn write_double_value(&mut self, value: f64) -> Result<()> {
        self.write_value(Value::Double(value))
    }

    #[inline]
    fn write_char_value(&mut self, value: char) -> Result<()> {
        self.write_value(Value::Char(value))
    }

    #[inline]
    fn write_string_value(&mut self, value: &str) -> Result<()> {
        self.write_value(Value::str(value))
    }

    #[inline]
    fn write_enum_value<E: SerialEnum>(&mut self, value: E) -> Result<()> {
        self.write_value(Value::Enum(EnumValue::of(value)))
    }

    fn write_begin(&mut self, _desc: &dyn ClassDesc) -> Result<()> {
        Ok(())
    }

    fn write_end(&mut self, _desc: &dyn ClassDesc) -> Result<()> {
        Ok(())
    }
}

// -----------------------------------------------------------------------------
// ElementOutput

/// A positional write session over an [`ElementEncoder`].
///
/// Values are emitted in the order the saver produces them; element
/// identity reaches the encoder only through [`ElementEncoder::write_element`].
///
/// # Examples
///
/// ```
/// use vc_serial::impls::IntSerializer;
/// use vc_serial::output::{ElementEncoder, ElementOutput, Output};
/// use vc_serial::value::Value;
/// use vc_serial::Result;
///
/// #[derive(Default)]
/// struct Tape(Vec<String>);
///
/// impl ElementEncoder for Tape {
///     fn write_value(&mut self, value: Value<'_>) -> Result<()> {
///         self.0.push(format!("{value:?}"));
///         Ok(())
///     }
/// }
///
/// let mut output = ElementOutput::new(Tape::default());
/// output.write(&IntSerializer, &42).unwrap();
/// assert_eq!(output.into_inner().0, ["Int(42)"]);
/// ```
pub struct ElementOutput<E> {
    encoder: E,
    #[cfg(all(debug_assertions, feature = "debug"))]
    stack: crate::desc_stack::DescStack,
}

impl<E: ElementEncoder> ElementOutput<E> {
    pub const fn new(encoder: E) -> Self {
        Self {
            encoder,
            #[cfg(all(debug_assertions, feature = "debug"))]
            stack: crate::desc_stack::DescStack::new(),
        }
    }

    #[inline]
    pub fn encoder(&self) -> &E {
        &self.encoder
    }

    #[inline]
    pub fn encoder_mut(&mut self) -> &mut E {
        &mut self.encoder
    }

    #[inline]
    pub fn into_inner(self) -> E {
        self.encoder
    }

    /// Attaches the open composites to an error raised by the encoder.
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

impl<E: ElementEncoder> Output for ElementOutput<E> {
    fn write_element(&mut self, desc: &dyn ClassDesc, index: usize) -> Result<()> {
        self.encoder
            .write_element(desc, index)
            .map_err(|e| self.trace(e))
    }

    fn write_not_null_mark(&mut self) -> Result<()> {
        self.encoder.write_not_null_mark().map_err(|e| self.trace(e))
    }

    fn write_null_value(&mut self) -> Result<()> {
        self.encoder.write_null_value().map_err(|e| self.trace(e))
    }

    fn write_value(&mut self, value: Value<'_>) -> Result<()> {
        self.encoder.write_value(value).map_err(|e| self.trace(e))
    }

    fn write_unit_value(&mut self) -> Result<()> {
        self.encoder.write_unit_value().map_err(|e| self.trace(e))
    }

    fn write_bool_value(&mut self, value: bool) -> Result<()> {
        self.encoder.write_bool_value(value).map_err(|e| self.trace(e))
    }

    fn write_byte_value(&mut self, value: i8) -> Result<()> {
        self.encoder.write_byte_value(value).map_err(|e| self.trace(e))
    }

    fn write_short_value(&mut self, value: i16) -> Result<()> {
        self.encoder.write_short_value(value).map_err(|e| self.trace(e))
    }

    fn write_int_value(&mut self, value: i32) -> Result<()> {
        self.encoder.write_int_value(value).map_err(|e| self.trace(e))
    }

    fn write_long_value(&mut self, value: i64) -> Result<()> {
        self.encoder.write_long_value(value).map_err(|e| self.trace(e))
    }

    fn write_float_value(&mut self, value: f32) -> Result<()> {
        self.encoder.write_float_value(value).map_err(|e| self.trace(e))
    }

    fn write_double_value(&mut self, value: f64) -> Result<()> {
        self.encoder.write_double_value(value).map_err(|e| self.trace(e))
    }

    fn write_char_value(&mut self, value: char) -> Result<()> {
        self.encoder.write_char_value(value).map_err(|e| self.trace(e))
    }

    fn write_string_value(&mut self, value: &str) -> Result<()> {
        self.encoder.write_string_value(value).map_err(|e| self.trace(e))
    }

    fn write_enum_value<T: SerialEnum>(&mut self, value: T) -> Result<()> {
        self.encoder.write_enum_value(value).map_err(|e| self.trace(e))
    }

    fn write_begin(&mut self, desc: &dyn ClassDesc) -> Result<()> {
        self.encoder.write_begin(desc).map_err(|e| self.trace(e))?;
        crate::cfg::debug! {
            if { self.stack.push(desc) } else {}
        }
        Ok(())
    }

    fn write_end(&mut self, desc: &dyn ClassDesc) -> Result<()> {
        self.encoder.write_end(desc).map_err(|e| self.trace(e))?;
        crate::cfg::debug! {
            if { self.stack.pop(desc) } else {}
        }
        Ok(())
    }
}
