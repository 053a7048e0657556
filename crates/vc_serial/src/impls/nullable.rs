use crate::input::Input;
use crate::output::Output;
use crate::{Loader, Result, Saver};

/// Serializes `Option<T>` with the serializer of `T`.
///
/// `None` is written as a bare null, `Some` as a not-null mark followed
/// by the value.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullableSerializer<S> {
    inner: S,
}

impl<S> NullableSerializer<S> {
    #[inline]
    pub const fn new(inner: S) -> Self {
        Self { inner }
    }

    #[inline]
    pub const fn inner(&self) -> &S {
        &self.inner
    }
}

impl<T, S: Saver<T>> Saver<Option<T>> for NullableSerializer<S> {
    #[inline]
    fn save<O: Output>(&self, output: &mut O, value: &Option<T>) -> Result<()> {
        output.write_nullable(&self.inner, value.as_ref())
    }
}

impl<T, S: Loader<T>> Loader<Option<T>> for NullableSerializer<S> {
    #[inline]
    fn load<I: Input>(&self, input: &mut I) -> Result<Option<T>> {
        input.read_nullable(&self.inner)
    }
}
