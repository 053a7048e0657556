use alloc::borrow::Cow;
use alloc::collections::{BTreeMap, BTreeSet, VecDeque};
use alloc::string::ToString;
use alloc::vec::Vec;
use core::any::Any;

use super::{ClassDesc, SerialKind};

// -----------------------------------------------------------------------------
// SerialCollection

/// A collection whose length a [`CollectionDesc`] can measure.
pub trait SerialCollection: Any {
    fn element_len(&self) -> usize;
}

impl<T: 'static> SerialCollection for Vec<T> {
    #[inline]
    fn element_len(&self) -> usize {
        self.len()
    }
}

impl<T: 'static> SerialCollection for VecDeque<T> {
    #[inline]
    fn element_len(&self) -> usize {
        self.len()
    }
}

impl<T: 'static> SerialCollection for BTreeSet<T> {
    #[inline]
    fn element_len(&self) -> usize {
        self.len()
    }
}

impl<K: 'static, V: 'static> SerialCollection for BTreeMap<K, V> {
    #[inline]
    fn element_len(&self) -> usize {
        self.len()
    }
}

impl<K: 'static, V: 'static, S: 'static> SerialCollection for hashbrown::HashMap<K, V, S> {
    #[inline]
    fn element_len(&self) -> usize {
        self.len()
    }
}

crate::cfg::std! {
    impl<K: 'static, V: 'static, S: 'static> SerialCollection for std::collections::HashMap<K, V, S> {
        #[inline]
        fn element_len(&self) -> usize {
            self.len()
        }
    }
}

fn len_of<C: SerialCollection>(value: &dyn Any) -> Option<usize> {
    value.downcast_ref::<C>().map(C::element_len)
}

// -----------------------------------------------------------------------------
// CollectionDesc

/// The name of the element carrying the collection length.
pub const SIZE_ELEMENT: &str = "size";

/// A variable-arity descriptor for `List` and `Map` kinds.
///
/// Element `0` is called `size` and carries the collection length, so a
/// reader can size the collection before the items arrive. Element `i`
/// for `i >= 1` is the item (or entry) at position `i - 1` and is named
/// after that position:
///
/// | index | name   |
/// |-------|--------|
/// | 0     | `size` |
/// | 1     | `0`    |
/// | 2     | `1`    |
///
/// The element count of a value is therefore its length plus one.
///
/// The collection type is fixed at construction. Measuring a value of
/// another type logs a warning and counts it as empty.
#[derive(Clone, Copy)]
pub struct CollectionDesc {
    name: &'static str,
    kind: SerialKind,
    len: fn(&dyn Any) -> Option<usize>,
}

impl CollectionDesc {
    /// Creates a `List` descriptor measuring values of type `C`.
    #[inline]
    pub const fn list<C: SerialCollection>(name: &'static str) -> Self {
        Self {
            name,
            kind: SerialKind::List,
            len: len_of::<C>,
        }
    }

    /// Creates a `Map` descriptor measuring values of type `C`.
    #[inline]
    pub const fn map<C: SerialCollection>(name: &'static str) -> Self {
        Self {
            name,
            kind: SerialKind::Map,
            len: len_of::<C>,
        }
    }

    /// Returns the element index of the item at `position`.
    #[inline]
    pub const fn item_index(position: usize) -> usize {
        position + 1
    }
}

impl ClassDesc for CollectionDesc {
    #[inline]
    fn name(&self) -> &str {
        self.name
    }

    #[inline]
    fn kind(&self) -> SerialKind {
        self.kind
    }

    fn element_count(&self, value: &dyn Any) -> usize {
        match (self.len)(value) {
            Some(len) => len + 1,
            None => {
                log::warn!("`{}` descriptor applied to a value of another type", self.name);
                1
            }
        }
    }

    fn element_name(&self, index: usize) -> Option<Cow<'_, str>> {
        match index {
            0 => Some(Cow::Borrowed(SIZE_ELEMENT)),
            _ => Some(Cow::Owned((index - 1).to_string())),
        }
    }

    fn element_index(&self, name: &str) -> Option<usize> {
        if name == SIZE_ELEMENT {
            return Some(0);
        }
        // Reject forms like "+1" or "01" that would not round-trip.
        let position: usize = name.parse().ok()?;
        if position.to_string() != name {
            return None;
        }
        position.checked_add(1)
    }
}

impl core::fmt::Debug for CollectionDesc {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("CollectionDesc")
            .field("name", &self.name)
            .field("kind", &self.kind)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use alloc::collections::BTreeMap;
    use alloc::string::ToString;
    use alloc::vec;
    use alloc::vec::Vec;

    use super::CollectionDesc;
    use crate::desc::{ClassDesc, SerialKind};
    use crate::hash::HashMap;

    static INTS: CollectionDesc = CollectionDesc::list::<Vec<i32>>("List");

    #[test]
    fn count_from_value() {
        assert_eq!(INTS.kind(), SerialKind::List);
        assert_eq!(INTS.element_count(&vec![1, 2, 3]), 4);
        assert_eq!(INTS.element_count(&Vec::<i32>::new()), 1);

        let mut map = BTreeMap::new();
        map.insert(1, "one");
        let desc = CollectionDesc::map::<BTreeMap<i32, &'static str>>("Map");
        assert_eq!(desc.kind(), SerialKind::Map);
        assert_eq!(desc.element_count(&map), 2);

        let mut hashed: HashMap<u8, u8> = HashMap::default();
        hashed.insert(1, 2);
        hashed.insert(3, 4);
        let desc = CollectionDesc::map::<HashMap<u8, u8>>("HashMap");
        assert_eq!(desc.element_count(&hashed), 3);
    }

    #[test]
    fn wrong_collection_counts_empty() {
        assert_eq!(INTS.element_count(&vec![1_u64, 2]), 1);
    }

    #[test]
    fn names_and_indices_agree() {
        let values = vec![7; 12];
        let count = INTS.element_count(&values);
        for index in 0..count {
            let name = INTS.element_name(index).unwrap();
            assert_eq!(INTS.element_index(&name), Some(index));
        }
        assert_eq!(INTS.element_name(0).as_deref(), Some("size"));
        assert_eq!(INTS.element_name(3).as_deref(), Some("2"));
        assert_eq!(CollectionDesc::item_index(2), 3);
    }

    #[test]
    fn reject_non_canonical_names() {
        assert_eq!(INTS.element_index("01"), None);
        assert_eq!(INTS.element_index("+1"), None);
        assert_eq!(INTS.element_index("x"), None);
        assert_eq!(INTS.element_index("0"), Some(1));
    }

    #[test]
    fn reject_positions_past_the_index_range() {
        let last = usize::MAX.to_string();
        assert_eq!(INTS.element_index(&last), None);
        assert_eq!(INTS.element_index("18446744073709551616"), None);

        let before_last = (usize::MAX - 1).to_string();
        assert_eq!(INTS.element_index(&before_last), Some(usize::MAX));
        assert_eq!(INTS.element_name(usize::MAX).as_deref(), Some(before_last.as_str()));
    }
}
