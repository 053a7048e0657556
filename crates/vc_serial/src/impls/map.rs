use alloc::collections::BTreeMap;
use core::any::Any;
use core::hash::{BuildHasher, Hash};
use core::marker::PhantomData;

use super::list::{MAX_PREALLOC, int_to_size, into_sequence, size_to_int};

use crate::desc::{ClassDesc, CollectionDesc, ENTRY_DESC, SerialCollection};
use crate::input::{Input, NextElement};
use crate::output::Output;
use crate::{Loader, Result, Saver, SerializationError};

// -----------------------------------------------------------------------------
// SerialMap

/// A map type the [`MapSerializer`] can walk and rebuild.
pub trait SerialMap: SerialCollection + Sized {
    type Key;
    type Value;

    /// Creates an empty map sized for `capacity` entries.
    fn with_capacity(capacity: usize) -> Self;

    /// Inserts an entry, returning `true` if the key was already present.
    fn insert_entry(&mut self, key: Self::Key, value: Self::Value) -> bool;

    /// Iterates the entries in the map's own order.
    fn entries(&self) -> impl Iterator<Item = (&Self::Key, &Self::Value)>;
}

impl<K: Ord + 'static, V: 'static> SerialMap for BTreeMap<K, V> {
    type Key = K;
    type Value = V;

    #[inline]
    fn with_capacity(_capacity: usize) -> Self {
        BTreeMap::new()
    }

    #[inline]
    fn insert_entry(&mut self, key: K, value: V) -> bool {
        self.insert(key, value).is_some()
    }

    #[inline]
    fn entries(&self) -> impl Iterator<Item = (&K, &V)> {
        self.iter()
    }
}

impl<K, V, S> SerialMap for hashbrown::HashMap<K, V, S>
where
    K: Eq + Hash + 'static,
    V: 'static,
    S: BuildHasher + Default + 'static,
{
    type Key = K;
    type Value = V;

    #[inline]
    fn with_capacity(capacity: usize) -> Self {
        hashbrown::HashMap::with_capacity_and_hasher(capacity, S::default())
    }

    #[inline]
    fn insert_entry(&mut self, key: K, value: V) -> bool {
        self.insert(key, value).is_some()
    }

    #[inline]
    fn entries(&self) -> impl Iterator<Item = (&K, &V)> {
        self.iter()
    }
}

crate::cfg::std! {
    impl<K, V, S> SerialMap for std::collections::HashMap<K, V, S>
    where
        K: Eq + Hash + 'static,
        V: 'static,
        S: BuildHasher + Default + 'static,
    {
        type Key = K;
        type Value = V;

        #[inline]
        fn with_capacity(capacity: usize) -> Self {
            std::collections::HashMap::with_capacity_and_hasher(capacity, S::default())
        }

        #[inline]
        fn insert_entry(&mut self, key: K, value: V) -> bool {
            self.insert(key, value).is_some()
        }

        #[inline]
        fn entries(&self) -> impl Iterator<Item = (&K, &V)> {
            self.iter()
        }
    }
}

// -----------------------------------------------------------------------------
// MapSerializer

/// Serializes a [`SerialMap`] with a key and a value serializer.
///
/// The map is a [`CollectionDesc`] composite: the `size` element, then one
/// element per entry, each an [`ENTRY_DESC`] composite with the `key` and
/// `value` elements.
///
/// # Examples
///
/// ```
/// use std::collections::BTreeMap;
///
/// use vc_serial::impls::{IntSerializer, MapSerializer, StringSerializer};
/// use vc_serial::output::{NamedEncoder, NamedOutput, Output};
/// use vc_serial::value::Value;
/// use vc_serial::Result;
///
/// #[derive(Default)]
/// struct Keys(Vec<String>);
///
/// impl NamedEncoder for Keys {
///     fn write_named(&mut self, name: &str, _value: Value<'_>) -> Result<()> {
///         self.0.push(name.to_owned());
///         Ok(())
///     }
/// }
///
/// let map = BTreeMap::from([("a".to_string(), 1)]);
/// let serializer = MapSerializer::new(StringSerializer, IntSerializer);
///
/// let mut output = NamedOutput::with_root(Keys::default(), "m");
/// output.write(&serializer, &map).unwrap();
/// assert_eq!(output.into_inner().0, ["m.size", "m.0.key", "m.0.value"]);
/// ```
pub struct MapSerializer<M, KS, VS> {
    key: KS,
    value: VS,
    desc: CollectionDesc,
    _marker: PhantomData<fn() -> M>,
}

impl<M: SerialMap, KS, VS> MapSerializer<M, KS, VS> {
    /// Creates a map serializer whose descriptor is named `Map`.
    #[inline]
    pub const fn new(key: KS, value: VS) -> Self {
        Self::with_name("Map", key, value)
    }

    #[inline]
    pub const fn with_name(name: &'static str, key: KS, value: VS) -> Self {
        Self {
            key,
            value,
            desc: CollectionDesc::map::<M>(name),
            _marker: PhantomData,
        }
    }

    #[inline]
    pub const fn desc(&self) -> &CollectionDesc {
        &self.desc
    }
}

impl<M, KS: Clone, VS: Clone> Clone for MapSerializer<M, KS, VS> {
    fn clone(&self) -> Self {
        Self {
            key: self.key.clone(),
            value: self.value.clone(),
            desc: self.desc,
            _marker: PhantomData,
        }
    }
}

impl<M, KS: core::fmt::Debug, VS: core::fmt::Debug> core::fmt::Debug for MapSerializer<M, KS, VS> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("MapSerializer")
            .field("key", &self.key)
            .field("value", &self.value)
            .field("desc", &self.desc)
            .finish()
    }
}

impl<M, KS, VS> Saver<M> for MapSerializer<M, KS, VS>
where
    M: SerialMap,
    M::Key: Any,
    M::Value: Any,
    KS: Saver<M::Key>,
    VS: Saver<M::Value>,
{
    fn save<O: Output>(&self, output: &mut O, value: &M) -> Result<()> {
        let desc = &self.desc;
        output.write_begin(desc)?;
        output.write_int_element_value(desc, 0, size_to_int(value.element_len())?)?;
        for (position, (key, item)) in value.entries().enumerate() {
            output.write_element(desc, CollectionDesc::item_index(position))?;
            output.write_begin(&ENTRY_DESC)?;
            output.write_serializable_element_value(&ENTRY_DESC, 0, &self.key, key)?;
            output.write_serializable_element_value(&ENTRY_DESC, 1, &self.value, item)?;
            output.write_end(&ENTRY_DESC)?;
        }
        output.write_end(desc)
    }
}

impl<M, KS, VS> Loader<M> for MapSerializer<M, KS, VS>
where
    M: SerialMap,
    KS: Loader<M::Key>,
    VS: Loader<M::Value>,
{
    fn load<I: Input>(&self, input: &mut I) -> Result<M> {
        let desc = &self.desc;
        let entry = EntryLoader {
            key: &self.key,
            value: &self.value,
        };
        input.read_begin(desc)?;

        let mut size = None;
        let mut entries = BTreeMap::new();
        loop {
            match input.read_element(desc)? {
                NextElement::ReadAll => {
                    let len = int_to_size(input.read_int_element_value(desc, 0)?)?;
                    let mut map = M::with_capacity(len.min(MAX_PREALLOC));
                    for position in 0..len {
                        let index = CollectionDesc::item_index(position);
                        let (key, value) = input.read_serializable_element_value(desc, index, &entry)?;
                        insert(desc, &mut map, key, value);
                    }
                    input.read_end(desc)?;
                    return Ok(map);
                }
                NextElement::Index(0) => {
                    size = Some(int_to_size(input.read_int_element_value(desc, 0)?)?);
                }
                NextElement::Index(index) => {
                    let pair = input.read_serializable_element_value(desc, index, &entry)?;
                    entries.insert(index - 1, pair);
                }
                NextElement::Done => break,
            }
        }

        input.read_end(desc)?;
        let entries = into_sequence(desc, size, entries)?;
        let mut map = M::with_capacity(entries.len());
        for (key, value) in entries {
            insert(desc, &mut map, key, value);
        }
        Ok(map)
    }
}

fn insert<M: SerialMap>(desc: &dyn ClassDesc, map: &mut M, key: M::Key, value: M::Value) {
    if map.insert_entry(key, value) {
        log::warn!("`{}` holds a duplicate key, the last entry wins", desc.name());
    }
}

/// Reads one [`ENTRY_DESC`] composite.
struct EntryLoader<'a, KS, VS> {
    key: &'a KS,
    value: &'a VS,
}

impl<K, V, KS: Loader<K>, VS: Loader<V>> Loader<(K, V)> for EntryLoader<'_, KS, VS> {
    fn load<I: Input>(&self, input: &mut I) -> Result<(K, V)> {
        input.read_begin(&ENTRY_DESC)?;
        let mut key = None;
        let mut value = None;
        input.read_elements(&ENTRY_DESC, 2, |input, index| {
            match index {
                0 => key = Some(input.read_serializable_element_value(&ENTRY_DESC, 0, self.key)?),
                _ => value = Some(input.read_serializable_element_value(&ENTRY_DESC, 1, self.value)?),
            }
            Ok(())
        })?;
        input.read_end(&ENTRY_DESC)?;

        let key = key.ok_or_else(|| SerializationError::missing_element(&ENTRY_DESC, "key"))?;
        let value = value.ok_or_else(|| SerializationError::missing_element(&ENTRY_DESC, "value"))?;
        Ok((key, value))
    }
}
