use crate::Result;
use crate::input::Input;
use crate::output::Output;

/// The write half of a type's serialization behaviour.
///
/// A saver walks `value` by calling back into the writer: either a single
/// primitive, or `write_begin`, one element-indexed write per element in
/// ascending index order, and `write_end`.
pub trait Saver<T: ?Sized> {
    fn save<O: Output>(&self, output: &mut O, value: &T) -> Result<()>;
}

/// The read half of a type's serialization behaviour.
pub trait Loader<T> {
    fn load<I: Input>(&self, input: &mut I) -> Result<T>;
}

/// A [`Saver`] and [`Loader`] pair bound to one type.
///
/// Implemented for every type implementing both halves.
pub trait Serializer<T>: Saver<T> + Loader<T> {}

impl<T, S: Saver<T> + Loader<T>> Serializer<T> for S {}

impl<T: ?Sized, S: Saver<T> + ?Sized> Saver<T> for &S {
    #[inline]
    fn save<O: Output>(&self, output: &mut O, value: &T) -> Result<()> {
        (**self).save(output, value)
    }
}

impl<T, L: Loader<T> + ?Sized> Loader<T> for &L {
    #[inline]
    fn load<I: Input>(&self, input: &mut I) -> Result<T> {
        (**self).load(input)
    }
}
