use alloc::borrow::Cow;
use alloc::string::String;
use core::any::Any;
use core::fmt;

use serde_core::ser::Error as _;
use serde_core::{Serialize, Serializer};

use super::{EnumValue, ValueKind};
use crate::{Result, SerializationError};

/// An untyped value, the fallback of every typed primitive.
///
/// A backend that only implements `write_value`/`read_value` receives
/// and produces values of this type; the typed reads then convert them
/// back with the strict `into_*` casts, which fail with
/// [`SerializationError::Mismatch`] instead of coercing.
///
/// [`Value::Opaque`] is only produced on the write side, when a name-path
/// backend declines to traverse a nested serializable value.
#[derive(Clone)]
pub enum Value<'a> {
    Unit,
    Bool(bool),
    Byte(i8),
    Short(i16),
    Int(i32),
    Long(i64),
    Float(f32),
    Double(f64),
    Char(char),
    Str(Cow<'a, str>),
    Enum(EnumValue),
    Opaque(&'a dyn Any),
}

impl<'a> Value<'a> {
    /// Returns the [`ValueKind`] of this value.
    pub const fn kind(&self) -> ValueKind {
        match self {
            Self::Unit => ValueKind::Unit,
            Self::Bool(_) => ValueKind::Bool,
            Self::Byte(_) => ValueKind::Byte,
            Self::Short(_) => ValueKind::Short,
            Self::Int(_) => ValueKind::Int,
            Self::Long(_) => ValueKind::Long,
            Self::Float(_) => ValueKind::Float,
            Self::Double(_) => ValueKind::Double,
            Self::Char(_) => ValueKind::Char,
            Self::Str(_) => ValueKind::String,
            Self::Enum(_) => ValueKind::Enum,
            Self::Opaque(_) => ValueKind::Opaque,
        }
    }

    /// Creates a string value borrowing `value`.
    #[inline]
    pub const fn str(value: &'a str) -> Self {
        Self::Str(Cow::Borrowed(value))
    }

    /// Detaches the value from borrowed data.
    ///
    /// Fails for [`Value::Opaque`], which only exists as a borrow.
    pub fn into_owned(self) -> Result<Value<'static>> {
        Ok(match self {
            Self::Unit => Value::Unit,
            Self::Bool(v) => Value::Bool(v),
            Self::Byte(v) => Value::Byte(v),
            Self::Short(v) => Value::Short(v),
            Self::Int(v) => Value::Int(v),
            Self::Long(v) => Value::Long(v),
            Self::Float(v) => Value::Float(v),
            Self::Double(v) => Value::Double(v),
            Self::Char(v) => Value::Char(v),
            Self::Str(v) => Value::Str(Cow::Owned(v.into_owned())),
            Self::Enum(v) => Value::Enum(v),
            Self::Opaque(_) => return Err(SerializationError::unsupported("owning an opaque value")),
        })
    }

    /// Returns the borrowed opaque value, if this is one.
    pub fn as_opaque(&self) -> Option<&'a dyn Any> {
        match self {
            Self::Opaque(v) => Some(*v),
            _ => None,
        }
    }

    pub fn into_unit(self) -> Result<()> {
        match self {
            Self::Unit => Ok(()),
            other => Err(SerializationError::mismatch(ValueKind::Unit, other.kind())),
        }
    }

    pub fn into_string(self) -> Result<String> {
        match self {
            Self::Str(v) => Ok(v.into_owned()),
            other => Err(SerializationError::mismatch(ValueKind::String, other.kind())),
        }
    }

    pub fn into_enum(self) -> Result<EnumValue> {
        match self {
            Self::Enum(v) => Ok(v),
            other => Err(SerializationError::mismatch(ValueKind::Enum, other.kind())),
        }
    }
}

macro_rules! impl_into_primitive {
    ($($fn_name:ident => $variant:ident($ty:ty);)*) => {
        impl Value<'_> {
            $(
                #[doc = concat!("Casts to `", stringify!($ty), "`, failing for any other kind.")]
                pub fn $fn_name(self) -> Result<$ty> {
                    match self {
                        Self::$variant(v) => Ok(v),
                        other => Err(SerializationError::mismatch(ValueKind::$variant, other.kind())),
                    }
                }
            )*
        }

        $(
            impl From<$ty> for Value<'_> {
                #[inline]
                fn from(value: $ty) -> Self {
                    Self::$variant(value)
                }
            }
        )*
    };
}

impl_into_primitive! {
    into_bool => Bool(bool);
    into_byte => Byte(i8);
    into_short => Short(i16);
    into_int => Int(i32);
    into_long => Long(i64);
    into_float => Float(f32);
    into_double => Double(f64);
    into_char => Char(char);
}

impl<'a> From<&'a str> for Value<'a> {
    #[inline]
    fn from(value: &'a str) -> Self {
        Self::str(value)
    }
}

impl From<String> for Value<'_> {
    #[inline]
    fn from(value: String) -> Self {
        Self::Str(Cow::Owned(value))
    }
}

impl From<EnumValue> for Value<'_> {
    #[inline]
    fn from(value: EnumValue) -> Self {
        Self::Enum(value)
    }
}

impl From<()> for Value<'_> {
    #[inline]
    fn from(_: ()) -> Self {
        Self::Unit
    }
}

// -----------------------------------------------------------------------------
// Traits

impl PartialEq for Value<'_> {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Unit, Self::Unit) => true,
            (Self::Bool(a), Self::Bool(b)) => a == b,
            (Self::Byte(a), Self::Byte(b)) => a == b,
            (Self::Short(a), Self::Short(b)) => a == b,
            (Self::Int(a), Self::Int(b)) => a == b,
            (Self::Long(a), Self::Long(b)) => a == b,
            (Self::Float(a), Self::Float(b)) => a == b,
            (Self::Double(a), Self::Double(b)) => a == b,
            (Self::Char(a), Self::Char(b)) => a == b,
            (Self::Str(a), Self::Str(b)) => a == b,
            (Self::Enum(a), Self::Enum(b)) => a == b,
            // Opaque values are equal only to themselves.
            (Self::Opaque(a), Self::Opaque(b)) => core::ptr::addr_eq(*a, *b),
            _ => false,
        }
    }
}

impl fmt::Debug for Value<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unit => f.write_str("Unit"),
            Self::Bool(v) => f.debug_tuple("Bool").field(v).finish(),
            Self::Byte(v) => f.debug_tuple("Byte").field(v).finish(),
            Self::Short(v) => f.debug_tuple("Short").field(v).finish(),
            Self::Int(v) => f.debug_tuple("Int").field(v).finish(),
            Self::Long(v) => f.debug_tuple("Long").field(v).finish(),
            Self::Float(v) => f.debug_tuple("Float").field(v).finish(),
            Self::Double(v) => f.debug_tuple("Double").field(v).finish(),
            Self::Char(v) => f.debug_tuple("Char").field(v).finish(),
            Self::Str(v) => f.debug_tuple("Str").field(v).finish(),
            Self::Enum(v) => f.debug_tuple("Enum").field(v).finish(),
            Self::Opaque(_) => f.write_str("Opaque(..)"),
        }
    }
}

impl Serialize for Value<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Unit => serializer.serialize_unit(),
            Self::Bool(v) => serializer.serialize_bool(*v),
            Self::Byte(v) => serializer.serialize_i8(*v),
            Self::Short(v) => serializer.serialize_i16(*v),
            Self::Int(v) => serializer.serialize_i32(*v),
            Self::Long(v) => serializer.serialize_i64(*v),
            Self::Float(v) => serializer.serialize_f32(*v),
            Self::Double(v) => serializer.serialize_f64(*v),
            Self::Char(v) => serializer.serialize_char(*v),
            Self::Str(v) => serializer.serialize_str(v),
            Self::Enum(v) => {
                let Ok(index) = u32::try_from(v.ordinal()) else {
                    return Err(S::Error::custom("enum ordinal does not fit in u32"));
                };
                serializer.serialize_unit_variant(v.enum_name(), index, v.variant())
            }
            Self::Opaque(_) => Err(S::Error::custom("opaque values cannot be serialized")),
        }
    }
}
