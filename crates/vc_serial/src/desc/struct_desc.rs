use alloc::borrow::Cow;
use core::any::Any;

use super::{ClassDesc, SerialKind};

// -----------------------------------------------------------------------------
// Shared descriptors

/// Descriptor of the unit value, bracketed by positional unit writes.
pub static UNIT_DESC: StructDesc = StructDesc::unit("Unit");

/// Descriptor of one map entry, with the elements `key` and `value`.
pub static ENTRY_DESC: StructDesc = StructDesc::entry("Entry", &["key", "value"]);

// -----------------------------------------------------------------------------
// StructDesc

/// A fixed-arity descriptor.
///
/// Covers every kind whose element count does not depend on the value:
/// `Class`, `Object`, `Unit`, `Sealed` and `Entry`. The element order is
/// the order of the input names.
///
/// # Examples
///
/// ```
/// use vc_serial::desc::{ClassDesc, SerialKind, StructDesc};
///
/// static POINT: StructDesc = StructDesc::class("Point", &["x", "y"]);
///
/// assert_eq!(POINT.kind(), SerialKind::Class);
/// assert_eq!(POINT.element_count(&()), 2);
/// assert_eq!(POINT.element_name(1).as_deref(), Some("y"));
/// assert_eq!(POINT.element_index("x"), Some(0));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StructDesc {
    name: &'static str,
    kind: SerialKind,
    element_names: &'static [&'static str],
}

impl StructDesc {
    /// Creates a descriptor of the given kind.
    ///
    /// `List` and `Map` are variable-arity kinds and should be described
    /// by a [`CollectionDesc`](crate::desc::CollectionDesc) instead.
    pub const fn new(
        name: &'static str,
        kind: SerialKind,
        element_names: &'static [&'static str],
    ) -> Self {
        Self {
            name,
            kind,
            element_names,
        }
    }

    #[inline]
    pub const fn class(name: &'static str, element_names: &'static [&'static str]) -> Self {
        Self::new(name, SerialKind::Class, element_names)
    }

    /// A singleton object, without elements.
    #[inline]
    pub const fn object(name: &'static str) -> Self {
        Self::new(name, SerialKind::Object, &[])
    }

    #[inline]
    pub const fn unit(name: &'static str) -> Self {
        Self::new(name, SerialKind::Unit, &[])
    }

    /// A sealed hierarchy root; elements usually are a discriminator and the payload.
    #[inline]
    pub const fn sealed(name: &'static str, element_names: &'static [&'static str]) -> Self {
        Self::new(name, SerialKind::Sealed, element_names)
    }

    #[inline]
    pub const fn entry(name: &'static str, element_names: &'static [&'static str]) -> Self {
        Self::new(name, SerialKind::Entry, element_names)
    }

    /// Returns the element names in declaration order.
    #[inline]
    pub const fn element_names(&self) -> &'static [&'static str] {
        self.element_names
    }

    /// Returns the number of elements.
    #[inline]
    pub const fn element_len(&self) -> usize {
        self.element_names.len()
    }
}

impl ClassDesc for StructDesc {
    #[inline]
    fn name(&self) -> &str {
        self.name
    }

    #[inline]
    fn kind(&self) -> SerialKind {
        self.kind
    }

    #[inline]
    fn element_count(&self, _value: &dyn Any) -> usize {
        self.element_names.len()
    }

    #[inline]
    fn element_name(&self, index: usize) -> Option<Cow<'_, str>> {
        self.element_names.get(index).map(|name| Cow::Borrowed(*name))
    }

    /// This is O(N) complexity.
    fn element_index(&self, name: &str) -> Option<usize> {
        self.element_names.iter().position(|s| *s == name)
    }
}
