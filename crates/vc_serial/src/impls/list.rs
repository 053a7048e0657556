use alloc::collections::BTreeMap;
use alloc::format;
use alloc::vec::Vec;
use core::any::Any;
use core::marker::PhantomData;

use crate::desc::{ClassDesc, CollectionDesc, SIZE_ELEMENT};
use crate::input::{Input, NextElement};
use crate::output::Output;
use crate::{Loader, Result, Saver, SerializationError};

// -----------------------------------------------------------------------------
// Size element

/// Upper bound on the capacity reserved up front from a `size` element.
///
/// The `size` comes off the stream, so larger collections grow as their
/// items arrive.
pub(super) const MAX_PREALLOC: usize = 1024;

/// Converts a collection length to the `size` element value.
pub(super) fn size_to_int(len: usize) -> Result<i32> {
    i32::try_from(len).map_err(|_| SerializationError::custom(format!("collection of {len} elements is too large")))
}

/// Converts the `size` element value back to a length.
pub(super) fn int_to_size(size: i32) -> Result<usize> {
    usize::try_from(size).map_err(|_| SerializationError::custom(format!("invalid collection size {size}")))
}

/// Collects items that may arrive in any order into a sequence.
///
/// Positions must be contiguous from zero, and match the `size` element
/// when one was read.
pub(super) fn into_sequence<T>(
    desc: &dyn ClassDesc,
    size: Option<usize>,
    items: BTreeMap<usize, T>,
) -> Result<Vec<T>> {
    let len = size.unwrap_or(items.len());
    if let Some(position) = (0..len).find(|position| !items.contains_key(position)) {
        return Err(SerializationError::missing_element(desc, &format!("{position}")));
    }
    if items.len() > len {
        return Err(SerializationError::unknown_element(desc, CollectionDesc::item_index(len)));
    }
    Ok(items.into_values().collect())
}

// -----------------------------------------------------------------------------
// ListSerializer

/// Serializes `Vec<T>` with the serializer of `T`.
///
/// The list is a [`CollectionDesc`] composite: the `size` element, then
/// one nested serializable element per item.
pub struct ListSerializer<T, S> {
    item: S,
    desc: CollectionDesc,
    _marker: PhantomData<fn() -> T>,
}

impl<T: 'static, S> ListSerializer<T, S> {
    /// Creates a list serializer whose descriptor is named `List`.
    #[inline]
    pub const fn new(item: S) -> Self {
        Self::with_name("List", item)
    }

    #[inline]
    pub const fn with_name(name: &'static str, item: S) -> Self {
        Self {
            item,
            desc: CollectionDesc::list::<Vec<T>>(name),
            _marker: PhantomData,
        }
    }

    #[inline]
    pub const fn desc(&self) -> &CollectionDesc {
        &self.desc
    }
}

impl<T, S: Clone> Clone for ListSerializer<T, S> {
    fn clone(&self) -> Self {
        Self {
            item: self.item.clone(),
            desc: self.desc,
            _marker: PhantomData,
        }
    }
}

impl<T, S: core::fmt::Debug> core::fmt::Debug for ListSerializer<T, S> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ListSerializer")
            .field("item", &self.item)
            .field("desc", &self.desc)
            .finish()
    }
}

impl<T: Any, S: Saver<T>> Saver<Vec<T>> for ListSerializer<T, S> {
    fn save<O: Output>(&self, output: &mut O, value: &Vec<T>) -> Result<()> {
        let desc = &self.desc;
        output.write_begin(desc)?;
        output.write_int_element_value(desc, 0, size_to_int(value.len())?)?;
        for index in 1..desc.element_count(value) {
            output.write_serializable_element_value(desc, index, &self.item, &value[index - 1])?;
        }
        output.write_end(desc)
    }
}

impl<T: 'static, S: Loader<T>> Loader<Vec<T>> for ListSerializer<T, S> {
    fn load<I: Input>(&self, input: &mut I) -> Result<Vec<T>> {
        let desc = &self.desc;
        input.read_begin(desc)?;

        let mut size = None;
        let mut items = BTreeMap::new();
        loop {
            match input.read_element(desc)? {
                NextElement::ReadAll => {
                    let len = int_to_size(input.read_int_element_value(desc, 0)?)?;
                    let mut list = Vec::with_capacity(len.min(MAX_PREALLOC));
                    for position in 0..len {
                        let index = CollectionDesc::item_index(position);
                        list.push(input.read_serializable_element_value(desc, index, &self.item)?);
                    }
                    input.read_end(desc)?;
                    return Ok(list);
                }
                NextElement::Index(0) => {
                    size = Some(int_to_size(input.read_int_element_value(desc, 0)?)?);
                }
                NextElement::Index(index) => {
                    let item = input.read_serializable_element_value(desc, index, &self.item)?;
                    if items.insert(index - 1, item).is_some() {
                        log::warn!("`{}` element {index} was read twice", desc.name());
                    }
                }
                NextElement::Done => break,
            }
        }

        input.read_end(desc)?;
        if size.is_none() {
            log::debug!("`{}` read without its `{SIZE_ELEMENT}` element", desc.name());
        }
        into_sequence(desc, size, items)
    }
}
