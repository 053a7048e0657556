use alloc::borrow::Cow;
use core::any::Any;

use super::SerialKind;

/// Structural metadata of one serializable type.
///
/// A descriptor is created once per type, never changes, and is shared by
/// every traversal of that type. All lookups are side-effect free and must
/// return the same answer on every call.
///
/// Element indices are contiguous, `0..element_count(value)`, and names
/// and indices must agree:
///
/// ```text
/// element_index(element_name(i)) == Some(i)
/// ```
///
/// Serializers walk the elements in ascending index order, and bracket
/// them with `write_begin`/`write_end` (or `read_begin`/`read_end`)
/// using the same descriptor.
pub trait ClassDesc {
    /// The type name, used in error messages and by backends that emit it.
    fn name(&self) -> &str;

    fn kind(&self) -> SerialKind;

    /// Returns the number of elements of `value`.
    ///
    /// Fixed-arity kinds ignore `value`; `List` and `Map` measure the
    /// collection it refers to.
    fn element_count(&self, value: &dyn Any) -> usize;

    /// Returns the name of the element at `index`, or `None` if the index
    /// is out of range.
    fn element_name(&self, index: usize) -> Option<Cow<'_, str>>;

    /// Returns the index of the element called `name`, if present.
    fn element_index(&self, name: &str) -> Option<usize>;
}
