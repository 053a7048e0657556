//! Provide structural metadata of serializable types.
//!
//! ## Menu
//!
//! - [`ClassDesc`]: the descriptor capability, a pure lookup of name, kind,
//!   element count, element names and element indices.
//! - [`SerialKind`]: the structural kind of a descriptor, one of `Class`,
//!   `Object`, `Unit`, `Sealed`, `List`, `Map` and `Entry`.
//! - [`StructDesc`]: fixed-arity descriptor, usable from a `static`.
//! - [`CollectionDesc`]: variable-arity descriptor of lists and maps,
//!   counting elements from the collection itself.
//!     - [`SerialCollection`]: collections a [`CollectionDesc`] can measure.
//! - [`UNIT_DESC`] and [`ENTRY_DESC`]: shared descriptors of the unit value
//!   and of a map entry.

// -----------------------------------------------------------------------------
// Modules

mod class_desc;
mod collection_desc;
mod kind;
mod struct_desc;

// -----------------------------------------------------------------------------
// Exports

pub use class_desc::ClassDesc;
pub use collection_desc::{CollectionDesc, SIZE_ELEMENT, SerialCollection};
pub use kind::SerialKind;
pub use struct_desc::{ENTRY_DESC, StructDesc, UNIT_DESC};
