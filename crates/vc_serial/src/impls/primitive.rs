use alloc::string::String;

use crate::input::Input;
use crate::output::Output;
use crate::{Loader, Result, Saver};

macro_rules! impl_primitive_serializer {
    ($($(#[$meta:meta])* $name:ident => $ty:ty, $write:ident, $read:ident;)*) => {
        $(
            $(#[$meta])*
            #[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
            pub struct $name;

            impl Saver<$ty> for $name {
                #[inline]
                fn save<O: Output>(&self, output: &mut O, value: &$ty) -> Result<()> {
                    output.$write(*value)
                }
            }

            impl Loader<$ty> for $name {
                #[inline]
                fn load<I: Input>(&self, input: &mut I) -> Result<$ty> {
                    input.$read()
                }
            }
        )*
    };
}

impl_primitive_serializer! {
    /// Serializes `bool` through the bool primitives.
    BoolSerializer => bool, write_bool_value, read_bool_value;
    /// Serializes `i8` through the byte primitives.
    ByteSerializer => i8, write_byte_value, read_byte_value;
    /// Serializes `i16` through the short primitives.
    ShortSerializer => i16, write_short_value, read_short_value;
    /// Serializes `i32` through the int primitives.
    IntSerializer => i32, write_int_value, read_int_value;
    /// Serializes `i64` through the long primitives.
    LongSerializer => i64, write_long_value, read_long_value;
    /// Serializes `f32` through the float primitives.
    FloatSerializer => f32, write_float_value, read_float_value;
    /// Serializes `f64` through the double primitives.
    DoubleSerializer => f64, write_double_value, read_double_value;
    /// Serializes `char` through the char primitives.
    CharSerializer => char, write_char_value, read_char_value;
}

/// Serializes `()` through the unit primitives.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct UnitSerializer;

impl Saver<()> for UnitSerializer {
    #[inline]
    fn save<O: Output>(&self, output: &mut O, _value: &()) -> Result<()> {
        output.write_unit_value()
    }
}

impl Loader<()> for UnitSerializer {
    #[inline]
    fn load<I: Input>(&self, input: &mut I) -> Result<()> {
        input.read_unit_value()
    }
}

/// Serializes strings; saves both `str` and `String`, loads `String`.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct StringSerializer;

impl Saver<str> for StringSerializer {
    #[inline]
    fn save<O: Output>(&self, output: &mut O, value: &str) -> Result<()> {
        output.write_string_value(value)
    }
}

impl Saver<String> for StringSerializer {
    #[inline]
    fn save<O: Output>(&self, output: &mut O, value: &String) -> Result<()> {
        output.write_string_value(value)
    }
}

impl Loader<String> for StringSerializer {
    #[inline]
    fn load<I: Input>(&self, input: &mut I) -> Result<String> {
        input.read_string_value()
    }
}

#[cfg(test)]
mod tests {
    use alloc::string::ToString;

    use super::*;
    use crate::input::ElementInput;
    use crate::output::ElementOutput;
    use crate::testing::{Recorder, Tape};
    use crate::value::Value;

    #[test]
    fn each_serializer_uses_its_primitive() {
        let mut output = ElementOutput::new(Tape::default());
        output.write(&UnitSerializer, &()).unwrap();
        output.write(&BoolSerializer, &false).unwrap();
        output.write(&ByteSerializer, &1).unwrap();
        output.write(&ShortSerializer, &2).unwrap();
        output.write(&IntSerializer, &3).unwrap();
        output.write(&LongSerializer, &4).unwrap();
        output.write(&FloatSerializer, &5.0).unwrap();
        output.write(&DoubleSerializer, &6.0).unwrap();
        output.write(&CharSerializer, &'7').unwrap();
        output.write(&StringSerializer, "8").unwrap();

        let tape = output.into_inner();
        assert_eq!(
            tape.values,
            [
                Value::Bool(false),
                Value::Byte(1),
                Value::Short(2),
                Value::Int(3),
                Value::Long(4),
                Value::Float(5.0),
                Value::Double(6.0),
                Value::Char('7'),
                Value::str("8"),
            ]
        );

        let mut input = ElementInput::new(tape);
        assert_eq!(input.read(&UnitSerializer), Ok(()));
        assert_eq!(input.read(&BoolSerializer), Ok(false));
        assert_eq!(input.read(&ByteSerializer), Ok(1));
        assert_eq!(input.read(&ShortSerializer), Ok(2));
        assert_eq!(input.read(&IntSerializer), Ok(3));
        assert_eq!(input.read(&LongSerializer), Ok(4));
        assert_eq!(input.read(&FloatSerializer), Ok(5.0));
        assert_eq!(input.read(&DoubleSerializer), Ok(6.0));
        assert_eq!(input.read(&CharSerializer), Ok('7'));
        assert_eq!(input.read(&StringSerializer), Ok("8".to_string()));
    }

    #[test]
    fn unit_is_an_empty_composite() {
        let mut output = ElementOutput::new(Recorder::default());
        output.write(&UnitSerializer, &()).unwrap();
        let recorder = output.into_inner();
        assert_eq!(recorder.count_begin("Unit"), 1);
        assert_eq!(recorder.count_end("Unit"), 1);
        assert_eq!(recorder.events.len(), 2);
    }
}
