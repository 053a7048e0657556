use core::fmt;

/// The kind of a [`Value`](crate::value::Value).
///
/// There is one kind per typed primitive of the protocol, plus
/// [`ValueKind::Opaque`] for nested values a name-path backend chose
/// not to traverse.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueKind {
    Unit,
    Bool,
    Byte,
    Short,
    Int,
    Long,
    Float,
    Double,
    Char,
    String,
    Enum,
    Opaque,
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unit => f.pad("Unit"),
            Self::Bool => f.pad("Bool"),
            Self::Byte => f.pad("Byte"),
            Self::Short => f.pad("Short"),
            Self::Int => f.pad("Int"),
            Self::Long => f.pad("Long"),
            Self::Float => f.pad("Float"),
            Self::Double => f.pad("Double"),
            Self::Char => f.pad("Char"),
            Self::String => f.pad("String"),
            Self::Enum => f.pad("Enum"),
            Self::Opaque => f.pad("Opaque"),
        }
    }
}
