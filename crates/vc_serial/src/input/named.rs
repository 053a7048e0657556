use alloc::borrow::Cow;
use alloc::string::String;

use super::{Input, NextElement, cast_enum};

use crate::desc::ClassDesc;
use crate::naming::{NameStack, compose_name};
use crate::value::{SerialEnum, Value};
use crate::{Loader, Result, SerializationError};

// -----------------------------------------------------------------------------
// NamedDecoder

/// The backend hooks of the name-path strategy, read side.
///
/// Defaults:
///
/// - [`read_named`](Self::read_named) fails with [`SerializationError::Unsupported`].
/// - [`read_named_not_null_mark`](Self::read_named_not_null_mark) answers `true`.
/// - Every typed hook is a strict cast of [`read_named`](Self::read_named),
///   and a failed cast names the path.
/// - [`element_name`](Self::element_name) and [`compose_name`](Self::compose_name)
///   match the defaults of [`NamedEncoder`](crate::output::NamedEncoder).
pub trait NamedDecoder {
    fn read_named(&mut self, name: &str) -> Result<Value<'static>> {
        Err(SerializationError::unsupported_at("value", name))
    }

    /// Returns `true` if a value is present at `name`.
    fn read_named_not_null_mark(&mut self, _name: &str) -> Result<bool> {
        Ok(true)
    }

    fn read_named_unit(&mut self, name: &str) -> Result<()> {
        self.read_named(name)?.into_unit().map_err(|e| e.at(name))
    }

    fn read_named_bool(&mut self, name: &str) -> Result<bool> {
        self.read_named(name)?.into_bool().map_err(|e| e.at(name))
    }

    fn read_named_byte(&mut self, name: &str) -> Result<i8> {
        self.read_named(name)?.into_byte().map_err(|e| e.at(name))
    }

    fn read_named_short(&mut self, name: &str) -> Result<i16> {
        self.read_named(name)?.into_short().map_err(|e| e.at(name))
    }

    fn read_named_int(&mut self, name: &str) -> Result<i32> {
        self.read_named(name)?.into_int().map_err(|e| e.at(name))
    }

    fn read_named_long(&mut self, name: &str) -> Result<i64> {
        self.read_named(name)?.into_long().map_err(|e| e.at(name))
    }

    fn read_named_float(&mut self, name: &str) -> Result<f32> {
        self.read_named(name)?.into_float().map_err(|e| e.at(name))
    }

    fn read_named_double(&mut self, name: &str) -> Result<f64> {
        self.read_named(name)?.into_double().map_err(|e| e.at(name))
    }

    fn read_named_char(&mut self, name: &str) -> Result<char> {
        self.read_named(name)?.into_char().map_err(|e| e.at(name))
    }

    fn read_named_string(&mut self, name: &str) -> Result<String> {
        self.read_named(name)?.into_string().map_err(|e| e.at(name))
    }

    fn read_named_enum<E: SerialEnum>(&mut self, name: &str) -> Result<E> {
        cast_enum(self.read_named(name)?).map_err(|e| e.at(name))
    }

    fn element_name<'d>(&self, desc: &'d dyn ClassDesc, index: usize) -> Option<Cow<'d, str>> {
        desc.element_name(index)
    }

    fn compose_name(&self, parent: &str, child: &str) -> String {
        compose_name(parent, child)
    }
}

// -----------------------------------------------------------------------------
// NamedInput

/// A name-path read session over a [`NamedDecoder`].
///
/// The mirror of [`NamedOutput`](crate::output::NamedOutput): nested
/// serializable element reads push the element path, bare reads,
/// `read_null_value` and `read_end` pop it, and element-indexed primitive
/// reads address the value directly. Elements are always read in
/// descriptor order.
pub struct NamedInput<D> {
    decoder: D,
    names: NameStack,
}

impl<D: NamedDecoder> NamedInput<D> {
    /// Creates a session with an empty root name.
    pub fn new(decoder: D) -> Self {
        Self::with_root(decoder, String::new())
    }

    /// Creates a session whose paths all start with `root`.
    pub fn with_root(decoder: D, root: impl Into<String>) -> Self {
        Self {
            decoder,
            names: NameStack::new(root.into()),
        }
    }

    #[inline]
    pub fn decoder(&self) -> &D {
        &self.decoder
    }

    #[inline]
    pub fn decoder_mut(&mut self) -> &mut D {
        &mut self.decoder
    }

    #[inline]
    pub fn into_inner(self) -> D {
        self.decoder
    }

    #[inline]
    pub fn current_name(&self) -> &str {
        self.names.current()
    }

    /// Returns the depth of the name stack, the root included.
    #[inline]
    pub fn depth(&self) -> usize {
        self.names.depth()
    }

    fn name(&self, desc: &dyn ClassDesc, index: usize) -> Result<String> {
        let child = self
            .decoder
            .element_name(desc, index)
            .ok_or_else(|| SerializationError::unknown_element(desc, index))?;
        Ok(self.decoder.compose_name(self.names.current(), &child))
    }
}

impl<D: NamedDecoder> Input for NamedInput<D> {
    #[inline]
    fn read_element(&mut self, _desc: &dyn ClassDesc) -> Result<NextElement> {
        Ok(NextElement::ReadAll)
    }

    fn read_not_null_mark(&mut self) -> Result<bool> {
        self.decoder.read_named_not_null_mark(self.names.current())
    }

    fn read_null_value(&mut self) -> Result<()> {
        self.names.pop();
        Ok(())
    }

    fn read_value(&mut self) -> Result<Value<'static>> {
        let name = self.names.pop();
        self.decoder.read_named(&name)
    }

    fn read_unit_value(&mut self) -> Result<()> {
        let name = self.names.pop();
        self.decoder.read_named_unit(&name)
    }

    fn read_bool_value(&mut self) -> Result<bool> {
        let name = self.names.pop();
        self.decoder.read_named_bool(&name)
    }

    fn read_byte_value(&mut self) -> Result<i8> {
        let name = self.names.pop();
        self.decoder.read_named_byte(&name)
    }

    fn read_short_value(&mut self) -> Result<i16> {
        let name = self.names.pop();
        self.decoder.read_named_short(&name)
    }

    fn read_int_value(&mut self) -> Result<i32> {
        let name = self.names.pop();
        self.decoder.read_named_int(&name)
    }

    fn read_long_value(&mut self) -> Result<i64> {
        let name = self.names.pop();
        self.decoder.read_named_long(&name)
    }

    fn read_float_value(&mut self) -> Result<f32> {
        let name = self.names.pop();
        self.decoder.read_named_float(&name)
    }

    fn read_double_value(&mut self) -> Result<f64> {
        let name = self.names.pop();
        self.decoder.read_named_double(&name)
    }

    fn read_char_value(&mut self) -> Result<char> {
        let name = self.names.pop();
        self.decoder.read_named_char(&name)
    }

    fn read_string_value(&mut self) -> Result<String> {
        let name = self.names.pop();
        self.decoder.read_named_string(&name)
    }

    fn read_enum_value<E: SerialEnum>(&mut self) -> Result<E> {
        let name = self.names.pop();
        self.decoder.read_named_enum(&name)
    }

    fn read_begin(&mut self, desc: &dyn ClassDesc) -> Result<()> {
        log::trace!("begin `{}` at `{}`", desc.name(), self.names.current());
        Ok(())
    }

    fn read_end(&mut self, desc: &dyn ClassDesc) -> Result<()> {
        let name = self.names.pop();
        log::trace!("end `{}` at `{name}`", desc.name());
        Ok(())
    }

    // ---------------------------------------------------------------
    // Element-indexed layer

    fn read_element_value(&mut self, desc: &dyn ClassDesc, index: usize) -> Result<Value<'static>> {
        let name = self.name(desc, index)?;
        self.decoder.read_named(&name)
    }

    fn read_nullable_element_value(
        &mut self,
        desc: &dyn ClassDesc,
        index: usize,
    ) -> Result<Option<Value<'static>>> {
        let name = self.name(desc, index)?;
        if self.decoder.read_named_not_null_mark(&name)? {
            self.decoder.read_named(&name).map(Some)
        } else {
            Ok(None)
        }
    }

    fn read_unit_element_value(&mut self, desc: &dyn ClassDesc, index: usize) -> Result<()> {
        let name = self.name(desc, index)?;
        self.decoder.read_named_unit(&name)
    }

    fn read_bool_element_value(&mut self, desc: &dyn ClassDesc, index: usize) -> Result<bool> {
        let name = self.name(desc, index)?;
        self.decoder.read_named_bool(&name)
    }

    fn read_byte_element_value(&mut self, desc: &dyn ClassDesc, index: usize) -> Result<i8> {
        let name = self.name(desc, index)?;
        self.decoder.read_named_byte(&name)
    }

    fn read_short_element_value(&mut self, desc: &dyn ClassDesc, index: usize) -> Result<i16> {
        let name = self.name(desc, index)?;
        self.decoder.read_named_short(&name)
    }

    fn read_int_element_value(&mut self, desc: &dyn ClassDesc, index: usize) -> Result<i32> {
        let name = self.name(desc, index)?;
        self.decoder.read_named_int(&name)
    }

    fn read_long_element_value(&mut self, desc: &dyn ClassDesc, index: usize) -> Result<i64> {
        let name = self.name(desc, index)?;
        self.decoder.read_named_long(&name)
    }

    fn read_float_element_value(&mut self, desc: &dyn ClassDesc, index: usize) -> Result<f32> {
        let name = self.name(desc, index)?;
        self.decoder.read_named_float(&name)
    }

    fn read_double_element_value(&mut self, desc: &dyn ClassDesc, index: usize) -> Result<f64> {
        let name = self.name(desc, index)?;
        self.decoder.read_named_double(&name)
    }

    fn read_char_element_value(&mut self, desc: &dyn ClassDesc, index: usize) -> Result<char> {
        let name = self.name(desc, index)?;
        self.decoder.read_named_char(&name)
    }

    fn read_string_element_value(&mut self, desc: &dyn ClassDesc, index: usize) -> Result<String> {
        let name = self.name(desc, index)?;
        self.decoder.read_named_string(&name)
    }

    fn read_enum_element_value<E: SerialEnum>(&mut self, desc: &dyn ClassDesc, index: usize) -> Result<E> {
        let name = self.name(desc, index)?;
        self.decoder.read_named_enum(&name)
    }

    fn read_serializable_element_value<T, L: Loader<T>>(
        &mut self,
        desc: &dyn ClassDesc,
        index: usize,
        loader: &L,
    ) -> Result<T> {
        let name = self.name(desc, index)?;
        self.names.push(name);
        self.read_serializable_value(loader)
    }

    fn read_nullable_serializable_element_value<T, L: Loader<T>>(
        &mut self,
        desc: &dyn ClassDesc,
        index: usize,
        loader: &L,
    ) -> Result<Option<T>> {
        let name = self.name(desc, index)?;
        self.names.push(name);
        self.read_nullable_serializable_value(loader)
    }
}
