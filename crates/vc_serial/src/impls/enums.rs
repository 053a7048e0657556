use core::fmt;
use core::marker::PhantomData;

use crate::input::Input;
use crate::output::Output;
use crate::value::SerialEnum;
use crate::{Loader, Result, Saver};

/// Serializes a [`SerialEnum`] through the enum primitives.
pub struct EnumSerializer<E> {
    _marker: PhantomData<fn() -> E>,
}

impl<E: SerialEnum> EnumSerializer<E> {
    #[inline]
    pub const fn new() -> Self {
        Self {
            _marker: PhantomData,
        }
    }
}

impl<E: SerialEnum> Default for EnumSerializer<E> {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl<E> Clone for EnumSerializer<E> {
    #[inline]
    fn clone(&self) -> Self {
        *self
    }
}

impl<E> Copy for EnumSerializer<E> {}

impl<E: SerialEnum> fmt::Debug for EnumSerializer<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "EnumSerializer<{}>", E::NAME)
    }
}

impl<E: SerialEnum> Saver<E> for EnumSerializer<E> {
    #[inline]
    fn save<O: Output>(&self, output: &mut O, value: &E) -> Result<()> {
        output.write_enum_value(*value)
    }
}

impl<E: SerialEnum> Loader<E> for EnumSerializer<E> {
    #[inline]
    fn load<I: Input>(&self, input: &mut I) -> Result<E> {
        input.read_enum_value()
    }
}
