use core::fmt;

/// The structural kind of a [`ClassDesc`](crate::desc::ClassDesc).
///
/// `Class`, `Object`, `Unit`, `Sealed` and `Entry` have a fixed number of
/// elements; `List` and `Map` count them from the value instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SerialKind {
    Class,
    Object,
    Unit,
    Sealed,
    List,
    Map,
    Entry,
}

impl SerialKind {
    /// Returns `true` if the element count depends on the value instance.
    #[inline]
    pub const fn is_variable_arity(self) -> bool {
        matches!(self, Self::List | Self::Map)
    }
}

impl fmt::Display for SerialKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Class => f.pad("Class"),
            Self::Object => f.pad("Object"),
            Self::Unit => f.pad("Unit"),
            Self::Sealed => f.pad("Sealed"),
            Self::List => f.pad("List"),
            Self::Map => f.pad("Map"),
            Self::Entry => f.pad("Entry"),
        }
    }
}
