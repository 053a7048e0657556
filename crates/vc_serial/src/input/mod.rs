//! Provide the read side of the protocol.
//!
//! # Overview
//!
//! - [`Input`]: the reader capability, the mirror of [`Output`](crate::output::Output).
//!   End users only call [`read`](Input::read) and [`read_nullable`](Input::read_nullable).
//! - [`ElementInput`]: the positional strategy, decorating an [`ElementDecoder`].
//!   Values are consumed in the order they were written; typed reads are
//!   strict casts of [`ElementDecoder::read_value`].
//! - [`NamedInput`]: the name-path strategy, decorating a [`NamedDecoder`].
//!   Each value is looked up under the dotted path of its element.
//!
//! # Element order
//!
//! A loader asks the reader which element comes next with
//! [`read_element`](Input::read_element):
//!
//! - [`NextElement::ReadAll`]: the backend stores elements in descriptor
//!   order, read every one of them sequentially.
//! - [`NextElement::Index`]: the backend decides the order, read the given
//!   element and ask again.
//! - [`NextElement::Done`]: no element is left.
//!
//! [`read_elements`](Input::read_elements) runs that loop for fixed-arity
//! composites.

// -----------------------------------------------------------------------------
// Modules

mod element;
mod named;

// -----------------------------------------------------------------------------
// Exports

pub use element::{ElementDecoder, ElementInput};
pub use named::{NamedDecoder, NamedInput};

// -----------------------------------------------------------------------------
// NextElement

use alloc::format;
use alloc::string::String;

use crate::desc::ClassDesc;
use crate::value::{SerialEnum, Value};
use crate::{Loader, Result, SerializationError};

/// The answer of [`Input::read_element`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NextElement {
    /// Read the element at this index next.
    Index(usize),
    /// Read all elements sequentially, in descriptor order.
    ReadAll,
    /// The composite has no more elements.
    Done,
}

/// Recovers a concrete enum from an untyped value.
pub(crate) fn cast_enum<E: SerialEnum>(value: Value<'_>) -> Result<E> {
    let value = value.into_enum()?;
    value.to::<E>().ok_or_else(|| {
        SerializationError::custom(format!("`{value}` is not a variant of `{}`", E::NAME))
    })
}

// -----------------------------------------------------------------------------
// Input

/// The reader capability of the protocol.
///
/// The layers mirror [`Output`](crate::output::Output): the top-level API,
/// the primitive layer, and the element-indexed layer. By default the
/// element-indexed reads ignore the index and perform the bare read, which
/// is the positional behaviour; name-path readers resolve the index into a
/// path instead.
///
/// A nullable value is read as [`read_not_null_mark`](Input::read_not_null_mark)
/// followed either by the value, or by [`read_null_value`](Input::read_null_value).
pub trait Input: Sized {
    // ---------------------------------------------------------------
    // Top-level API

    /// Reads a value with `loader`.
    #[inline]
    fn read<T, L: Loader<T>>(&mut self, loader: &L) -> Result<T> {
        loader.load(self)
    }

    /// Reads a nullable value with `loader`.
    fn read_nullable<T, L: Loader<T>>(&mut self, loader: &L) -> Result<Option<T>> {
        if self.read_not_null_mark()? {
            loader.load(self).map(Some)
        } else {
            self.read_null_value()?;
            Ok(None)
        }
    }

    // ---------------------------------------------------------------
    // Element order

    /// Asks which element of `desc` to read next.
    fn read_element(&mut self, desc: &dyn ClassDesc) -> Result<NextElement>;

    /// Visits the elements of a composite of `count` elements, in the order
    /// the reader dictates.
    ///
    /// `visit` receives the reader and the element index, and must read
    /// exactly that element.
    fn read_elements<F>(&mut self, desc: &dyn ClassDesc, count: usize, mut visit: F) -> Result<()>
    where
        F: FnMut(&mut Self, usize) -> Result<()>,
    {
        loop {
            match self.read_element(desc)? {
                NextElement::ReadAll => {
                    for index in 0..count {
                        visit(self, index)?;
                    }
                    return Ok(());
                }
                NextElement::Index(index) if index < count => visit(self, index)?,
                NextElement::Index(index) => {
                    return Err(SerializationError::unknown_element(desc, index));
                }
                NextElement::Done => return Ok(()),
            }
        }
    }

    // ---------------------------------------------------------------
    // Primitive layer

    /// Returns `true` if a present nullable value follows.
    fn read_not_null_mark(&mut self) -> Result<bool>;

    /// Consumes an absent nullable value, after a `false` mark.
    fn read_null_value(&mut self) -> Result<()>;

    /// Reads an untyped value.
    fn read_value(&mut self) -> Result<Value<'static>>;

    fn read_nullable_value(&mut self) -> Result<Option<Value<'static>>> {
        if self.read_not_null_mark()? {
            self.read_value().map(Some)
        } else {
            self.read_null_value()?;
            Ok(None)
        }
    }

    fn read_unit_value(&mut self) -> Result<()>;
    fn read_bool_value(&mut self) -> Result<bool>;
    fn read_byte_value(&mut self) -> Result<i8>;
    fn read_short_value(&mut self) -> Result<i16>;
    fn read_int_value(&mut self) -> Result<i32>;
    fn read_long_value(&mut self) -> Result<i64>;
    fn read_float_value(&mut self) -> Result<f32>;
    fn read_double_value(&mut self) -> Result<f64>;
    fn read_char_value(&mut self) -> Result<char>;
    fn read_string_value(&mut self) -> Result<String>;
    fn read_enum_value<E: SerialEnum>(&mut self) -> Result<E>;

    /// Reads a nested serializable value.
    #[inline]
    fn read_serializable_value<T, L: Loader<T>>(&mut self, loader: &L) -> Result<T> {
        loader.load(self)
    }

    fn read_nullable_serializable_value<T, L: Loader<T>>(&mut self, loader: &L) -> Result<Option<T>> {
        if self.read_not_null_mark()? {
            self.read_serializable_value(loader).map(Some)
        } else {
            self.read_null_value()?;
            Ok(None)
        }
    }

    /// Opens a composite value.
    fn read_begin(&mut self, desc: &dyn ClassDesc) -> Result<()>;

    /// Closes the composite opened by the matching [`read_begin`](Input::read_begin).
    fn read_end(&mut self, desc: &dyn ClassDesc) -> Result<()>;

    // ---------------------------------------------------------------
    // Element-indexed layer

    fn read_element_value(&mut self, _desc: &dyn ClassDesc, _index: usize) -> Result<Value<'static>> {
        self.read_value()
    }

    fn read_nullable_element_value(
        &mut self,
        _desc: &dyn ClassDesc,
        _index: usize,
    ) -> Result<Option<Value<'static>>> {
        self.read_nullable_value()
    }

    fn read_unit_element_value(&mut self, _desc: &dyn ClassDesc, _index: usize) -> Result<()> {
        self.read_unit_value()
    }

    fn read_bool_element_value(&mut self, _desc: &dyn ClassDesc, _index: usize) -> Result<bool> {
        self.read_bool_value()
    }

    fn read_byte_element_value(&mut self, _desc: &dyn ClassDesc, _index: usize) -> Result<i8> {
        self.read_byte_value()
    }

    fn read_short_element_value(&mut self, _desc: &dyn ClassDesc, _index: usize) -> Result<i16> {
        self.read_short_value()
    }

    fn read_int_element_value(&mut self, _desc: &dyn ClassDesc, _index: usize) -> Result<i32> {
        self.read_int_value()
    }

    fn read_long_element_value(&mut self, _desc: &dyn ClassDesc, _index: usize) -> Result<i64> {
        self.read_long_value()
    }

    fn read_float_element_value(&mut self, _desc: &dyn ClassDesc, _index: usize) -> Result<f32> {
        self.read_float_value()
    }

    fn read_double_element_value(&mut self, _desc: &dyn ClassDesc, _index: usize) -> Result<f64> {
        self.read_double_value()
    }

    fn read_char_element_value(&mut self, _desc: &dyn ClassDesc, _index: usize) -> Result<char> {
        self.read_char_value()
    }

    fn read_string_element_value(&mut self, _desc: &dyn ClassDesc, _index: usize) -> Result<String> {
        self.read_string_value()
    }

    fn read_enum_element_value<E: SerialEnum>(&mut self, _desc: &dyn ClassDesc, _index: usize) -> Result<E> {
        self.read_enum_value()
    }

    /// Reads the nested serializable element at `index` with `loader`.
    fn read_serializable_element_value<T, L: Loader<T>>(
        &mut self,
        _desc: &dyn ClassDesc,
        _index: usize,
        loader: &L,
    ) -> Result<T> {
        self.read_serializable_value(loader)
    }

    fn read_nullable_serializable_element_value<T, L: Loader<T>>(
        &mut self,
        _desc: &dyn ClassDesc,
        _index: usize,
        loader: &L,
    ) -> Result<Option<T>> {
        self.read_nullable_serializable_value(loader)
    }
}
