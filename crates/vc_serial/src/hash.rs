//! Provide a hash map with stable hashing, based on *hashbrown* and *foldhash*.
//!
//! [`MapSerializer`](crate::impls::MapSerializer) accepts a hashbrown map
//! with any hasher. [`HashMap`] is the convenience choice: its seed is fixed,
//! so equal maps built the same way write their entries in the same order.
//!
//! # Examples
//!
//! ```
//! use vc_serial::hash::HashMap;
//! use vc_serial::impls::{IntSerializer, MapSerializer, StringSerializer};
//! use vc_serial::output::{NamedEncoder, NamedOutput, Output};
//! use vc_serial::value::Value;
//! use vc_serial::Result;
//!
//! #[derive(Default)]
//! struct Lines(Vec<String>);
//!
//! impl NamedEncoder for Lines {
//!     fn write_named(&mut self, name: &str, value: Value<'_>) -> Result<()> {
//!         self.0.push(format!("{name}={value:?}"));
//!         Ok(())
//!     }
//! }
//!
//! fn write(map: &HashMap<String, i32>) -> Vec<String> {
//!     let serializer = MapSerializer::new(StringSerializer, IntSerializer);
//!     let mut output = NamedOutput::new(Lines::default());
//!     output.write(&serializer, map).unwrap();
//!     output.into_inner().0
//! }
//!
//! let build = || {
//!     let mut map = HashMap::default();
//!     for (index, key) in ["a", "b", "c", "d"].into_iter().enumerate() {
//!         map.insert(key.to_string(), index as i32);
//!     }
//!     map
//! };
//! assert_eq!(write(&build()), write(&build()));
//! ```

use core::hash::BuildHasher;

use foldhash::fast::{FixedState, FoldHasher};

// -----------------------------------------------------------------------------
// FixedHashState

/// A fixed hash seed.
const FIXED_HASH_STATE: FixedState = FixedState::with_seed(0x95EE04C4F326B271);

/// Fixed Hash State based upon a random but fixed seed.
///
/// # Examples
///
/// ```
/// use core::hash::BuildHasher;
/// use vc_serial::hash::FixedHashState;
///
/// assert_eq!(FixedHashState.hash_one("size"), FixedHashState.hash_one("size"));
/// ```
#[derive(Copy, Clone, Default, Debug)]
pub struct FixedHashState;

impl BuildHasher for FixedHashState {
    type Hasher = FoldHasher<'static>;

    #[inline(always)]
    fn build_hasher(&self) -> Self::Hasher {
        FIXED_HASH_STATE.build_hasher()
    }
}

// -----------------------------------------------------------------------------
// HashMap

/// A [`hashbrown::HashMap`] using [`FixedHashState`].
///
/// Create it with [`HashMap::default`], or `with_capacity_and_hasher`.
pub type HashMap<K, V> = hashbrown::HashMap<K, V, FixedHashState>;

// -----------------------------------------------------------------------------
// Re-export crates

pub use foldhash;
pub use hashbrown;
