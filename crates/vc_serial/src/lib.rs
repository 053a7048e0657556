#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![no_std]

// -----------------------------------------------------------------------------
// Compilation config

/// Some macros used for compilation control.
pub mod cfg {
    /// Expands the input only when the `debug` feature is active in a debug build.
    ///
    /// Accepts either a list of items, or `if { .. } else { .. }` to pick
    /// an expression.
    #[macro_export]
    #[doc(hidden)]
    macro_rules! __cfg_debug {
        (if { $($yes:tt)* } else { $($no:tt)* }) => {{
            #[cfg(all(debug_assertions, feature = "debug"))]
            let value = { $($yes)* };
            #[cfg(not(all(debug_assertions, feature = "debug")))]
            let value = { $($no)* };
            value
        }};
        ($($item:item)*) => {
            $(
                #[cfg(all(debug_assertions, feature = "debug"))]
                $item
            )*
        };
    }

    /// Expands the input only when the `std` feature is active.
    #[macro_export]
    #[doc(hidden)]
    macro_rules! __cfg_std {
        ($($item:item)*) => {
            $(
                #[cfg(feature = "std")]
                $item
            )*
        };
    }

    pub use crate::__cfg_debug as debug;
    pub use crate::__cfg_std as std;
}

// -----------------------------------------------------------------------------
// no_std support

#[cfg(any(test, feature = "std"))]
extern crate std;

extern crate alloc;

// -----------------------------------------------------------------------------
// Modules

crate::cfg::debug! {
    mod desc_stack;
}

#[cfg(test)]
mod testing;

mod error;
mod naming;
mod serializer;

pub mod desc;
pub mod hash;
pub mod impls;
pub mod input;
pub mod output;
pub mod value;

// -----------------------------------------------------------------------------
// Top-Level exports

pub use error::{Result, SerializationError};
pub use naming::compose_name;
pub use serializer::{Loader, Saver, Serializer};

/// The commonly used items of this crate.
pub mod prelude {
    pub use crate::desc::{ClassDesc, SerialKind};
    pub use crate::input::{Input, NextElement};
    pub use crate::output::Output;
    pub use crate::value::{SerialEnum, Value};
    pub use crate::{Loader, Result, Saver, SerializationError, Serializer};
}
