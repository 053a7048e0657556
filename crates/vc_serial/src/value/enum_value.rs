use core::fmt;

// -----------------------------------------------------------------------------
// SerialEnum

/// A fieldless enum that can be written through the enum primitives.
///
/// Variants are identified by their ordinal, the position of the variant
/// name in [`VARIANTS`](SerialEnum::VARIANTS).
///
/// # Examples
///
/// ```
/// use vc_serial::value::SerialEnum;
///
/// #[derive(Clone, Copy, Debug, PartialEq)]
/// enum Color {
///     Red,
///     Green,
/// }
///
/// impl SerialEnum for Color {
///     const NAME: &'static str = "Color";
///     const VARIANTS: &'static [&'static str] = &["Red", "Green"];
///
///     fn ordinal(self) -> usize {
///         self as usize
///     }
///
///     fn from_ordinal(ordinal: usize) -> Option<Self> {
///         match ordinal {
///             0 => Some(Color::Red),
///             1 => Some(Color::Green),
///             _ => None,
///         }
///     }
/// }
///
/// assert_eq!(Color::Green.variant_name(), "Green");
/// assert_eq!(Color::from_variant_name("Red"), Some(Color::Red));
/// ```
pub trait SerialEnum: Copy + 'static {
    /// The enum name, used to reject values of another enum.
    const NAME: &'static str;

    /// Variant names in ordinal order.
    const VARIANTS: &'static [&'static str];

    fn ordinal(self) -> usize;

    fn from_ordinal(ordinal: usize) -> Option<Self>;

    /// Returns the name of this variant, or `""` for an ordinal out of
    /// [`VARIANTS`](SerialEnum::VARIANTS).
    fn variant_name(self) -> &'static str {
        Self::VARIANTS.get(self.ordinal()).copied().unwrap_or("")
    }

    fn from_variant_name(name: &str) -> Option<Self> {
        let ordinal = Self::VARIANTS.iter().position(|v| *v == name)?;
        Self::from_ordinal(ordinal)
    }
}

// -----------------------------------------------------------------------------
// EnumValue

/// A type-erased [`SerialEnum`] value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EnumValue {
    enum_name: &'static str,
    variant: &'static str,
    ordinal: usize,
}

impl EnumValue {
    /// Erases a [`SerialEnum`] value.
    pub fn of<E: SerialEnum>(value: E) -> Self {
        Self {
            enum_name: E::NAME,
            variant: value.variant_name(),
            ordinal: value.ordinal(),
        }
    }

    #[inline]
    pub const fn enum_name(&self) -> &'static str {
        self.enum_name
    }

    #[inline]
    pub const fn variant(&self) -> &'static str {
        self.variant
    }

    #[inline]
    pub const fn ordinal(&self) -> usize {
        self.ordinal
    }

    /// Recovers the concrete enum value.
    ///
    /// Returns `None` if this value belongs to another enum or its ordinal
    /// is not a variant of `E`.
    pub fn to<E: SerialEnum>(self) -> Option<E> {
        if self.enum_name != E::NAME {
            return None;
        }
        E::from_ordinal(self.ordinal)
    }
}

impl fmt::Display for EnumValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}::{}", self.enum_name, self.variant)
    }
}

#[cfg(test)]
mod tests {
    use alloc::string::ToString;

    use super::{EnumValue, SerialEnum};
    use crate::testing::{Color, Shape};

    #[test]
    fn erase_and_recover() {
        let value = EnumValue::of(Color::Blue);
        assert_eq!(value.enum_name(), "Color");
        assert_eq!(value.variant(), "Blue");
        assert_eq!(value.ordinal(), 2);
        assert_eq!(value.to::<Color>(), Some(Color::Blue));
        assert_eq!(value.to_string(), "Color::Blue");
    }

    #[test]
    fn reject_other_enum() {
        // Same ordinal, different enum.
        let value = EnumValue::of(Shape::Circle);
        assert_eq!(value.ordinal(), Color::Red.ordinal());
        assert_eq!(value.to::<Color>(), None);
    }

    #[test]
    fn variant_names() {
        assert_eq!(Color::from_variant_name("Green"), Some(Color::Green));
        assert_eq!(Color::from_variant_name("Purple"), None);
        assert_eq!(Shape::Square.variant_name(), "Square");
    }
}
