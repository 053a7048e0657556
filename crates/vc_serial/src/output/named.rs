use alloc::borrow::Cow;
use alloc::string::String;
use core::any::Any;

use super::Output;

use crate::desc::ClassDesc;
use crate::naming::{NameStack, compose_name};
use crate::value::{EnumValue, SerialEnum, Value};
use crate::{Result, Saver, SerializationError};

// -----------------------------------------------------------------------------
// NamedEncoder

/// The backend hooks of the name-path strategy.
///
/// Every value arrives with its full dotted path, e.g. `line.from.x`, so a
/// backend only maps paths to storage. Defaults:
///
/// - [`write_named`](Self::write_named) and [`write_named_null`](Self::write_named_null)
///   fail with [`SerializationError::Unsupported`].
/// - Every typed hook funnels into [`write_named`](Self::write_named).
/// - [`is_named_serializable_recursive`](Self::is_named_serializable_recursive)
///   always recurses.
/// - [`element_name`](Self::element_name) asks the descriptor, and
///   [`compose_name`](Self::compose_name) joins with a dot.
///
/// The encoder becomes a writer through [`NamedOutput`].
pub trait NamedEncoder {
    fn write_named(&mut self, name: &str, _value: Value<'_>) -> Result<()> {
        Err(SerializationError::unsupported_at("value", name))
    }

    fn write_named_null(&mut self, name: &str) -> Result<()> {
        Err(SerializationError::unsupported_at("null", name))
    }

    #[inline]
    fn write_named_unit(&mut self, name: &str) -> Result<()> {
        self.write_named(name, Value::Unit)
    }

    #[inline]
    fn write_named_bool(&mut self, name: &str, value: bool) -> Result<()> {
        self.write_named(name, Value::Bool(value))
    }

    #[inline]
    fn write_named_byte(&mut self, name: &str, value: i8) -> Result<()> {
        self.write_named(name, Value::Byte(value))
    }

    #[inline]
    fn write_named_short(&mut self, name: &str, value: i16) -> Result<()> {
        self.write_named(name, Value::Short(value))
    }

    #[inline]
    fn write_named_int(&mut self, name: &str, value: i32) -> Result<()> {
        self.write_named(name, Value::Int(value))
    }

    #[inline]
    fn write_named_long(&mut self, name: &str, value: i64) -> Result<()> {
        self.write_named(name, Value::Long(value))
    }

    #[inline]
    fn write_named_float(&mut self, name: &str, value: f32) -> Result<()> {
        self.write_named(name, Value::Float(value))
    }

    #[inline]
    fn write_named_double(&mut self, name: &str, value: f64) -> Result<()> {
        self.write_named(name, Value::Double(value))
    }

    #[inline]
    fn write_named_char(&mut self, name: &str, value: char) -> Result<()> {
        self.write_named(name, Value::Char(value))
    }

    #[inline]
    fn write_named_string(&mut self, name: &str, value: &str) -> Result<()> {
        self.write_named(name, Value::str(value))
    }

    #[inline]
    fn write_named_enum<E: SerialEnum>(&mut self, name: &str, value: E) -> Result<()> {
        self.write_named(name, Value::Enum(EnumValue::of(value)))
    }

    /// Decides whether the nested serializable `value` at `name` is
    /// traversed element by element (`true`), or written as a single
    /// [`Value::Opaque`] leaf through [`write_named`](Self::write_named).
    fn is_named_serializable_recursive(&mut self, _name: &str, _value: &dyn Any) -> bool {
        true
    }

    /// Returns the path segment of the element at `index` of `desc`.
    fn element_name<'d>(&self, desc: &'d dyn ClassDesc, index: usize) -> Option<Cow<'d, str>> {
        desc.element_name(index)
    }

    /// Composes a child path from its parent path, see [`compose_name`].
    fn compose_name(&self, parent: &str, child: &str) -> String {
        compose_name(parent, child)
    }
}

// -----------------------------------------------------------------------------
// NamedOutput

/// A name-path write session over a [`NamedEncoder`].
///
/// The session keeps a stack of paths, starting with the root name:
///
/// - `write_element` pushes the path of the announced element;
/// - every bare value write pops it and hands value and path to the encoder;
/// - element-indexed primitive writes compute the path without touching
///   the stack;
/// - `write_begin` does nothing and `write_end` pops the path of the
///   composite, so a complete value leaves the stack at its previous depth.
///
/// # Examples
///
/// ```
/// use std::collections::BTreeMap;
///
/// use vc_serial::desc::StructDesc;
/// use vc_serial::output::{NamedEncoder, NamedOutput, Output};
/// use vc_serial::value::Value;
/// use vc_serial::{Result, Saver};
///
/// static POINT: StructDesc = StructDesc::class("Point", &["x", "y"]);
///
/// struct PointSaver;
///
/// impl Saver<(i32, i32)> for PointSaver {
///     fn save<O: Output>(&self, output: &mut O, value: &(i32, i32)) -> Result<()> {
///         output.write_begin(&POINT)?;
///         output.write_int_element_value(&POINT, 0, value.0)?;
///         output.write_int_element_value(&POINT, 1, value.1)?;
///         output.write_end(&POINT)
///     }
/// }
///
/// #[derive(Default)]
/// struct Flat(BTreeMap<String, i32>);
///
/// impl NamedEncoder for Flat {
///     fn write_named_int(&mut self, name: &str, value: i32) -> Result<()> {
///         self.0.insert(name.to_owned(), value);
///         Ok(())
///     }
/// }
///
/// let mut output = NamedOutput::with_root(Flat::default(), "origin");
/// output.write(&PointSaver, &(3, 4)).unwrap();
///
/// let flat = output.into_inner().0;
/// assert_eq!(flat["origin.x"], 3);
/// assert_eq!(flat["origin.y"], 4);
/// ```
pub struct NamedOutput<E> {
    encoder: E,
    names: NameStack,
}

impl<E: NamedEncoder> NamedOutput<E> {
    /// Creates a session with an empty root name.
    pub fn new(encoder: E) -> Self {
        Self::with_root(encoder, String::new())
    }

    /// Creates a session whose paths all start with `root`.
    pub fn with_root(encoder: E, root: impl Into<String>) -> Self {
        Self {
            encoder,
            names: NameStack::new(root.into()),
        }
    }

    #[inline]
    pub fn encoder(&self) -> &E {
        &self.encoder
    }

    #[inline]
    pub fn encoder_mut(&mut self) -> &mut E {
        &mut self.encoder
    }

    #[inline]
    pub fn into_inner(self) -> E {
        self.encoder
    }

    /// Returns the innermost path.
    #[inline]
    pub fn current_name(&self) -> &str {
        self.names.current()
    }

    /// Returns the depth of the name stack, the root included.
    #[inline]
    pub fn depth(&self) -> usize {
        self.names.depth()
    }

    /// Returns the full path of the element at `index` of `desc`.
    fn name(&self, desc: &dyn ClassDesc, index: usize) -> Result<String> {
        let child = self
            .encoder
            .element_name(desc, index)
            .ok_or_else(|| SerializationError::unknown_element(desc, index))?;
        Ok(self.encoder.compose_name(self.names.current(), &child))
    }

    fn write_named_nullable(&mut self, name: &str, value: Option<Value<'_>>) -> Result<()> {
        match value {
            None => self.encoder.write_named_null(name),
            Some(value) => self.encoder.write_named(name, value),
        }
    }
}

impl<E: NamedEncoder> Output for NamedOutput<E> {
    fn write_element(&mut self, desc: &dyn ClassDesc, index: usize) -> Result<()> {
        let name = self.name(desc, index)?;
        self.names.push(name);
        Ok(())
    }

    #[inline]
    fn write_not_null_mark(&mut self) -> Result<()> {
        Ok(())
    }

    fn write_null_value(&mut self) -> Result<()> {
        let name = self.names.pop();
        self.encoder.write_named_null(&name)
    }

    fn write_value(&mut self, value: Value<'_>) -> Result<()> {
        let name = self.names.pop();
        self.encoder.write_named(&name, value)
    }

    fn write_nullable_value(&mut self, value: Option<Value<'_>>) -> Result<()> {
        let name = self.names.pop();
        self.write_named_nullable(&name, value)
    }

    fn write_unit_value(&mut self) -> Result<()> {
        let name = self.names.pop();
        self.encoder.write_named_unit(&name)
    }

    fn write_bool_value(&mut self, value: bool) -> Result<()> {
        let name = self.names.pop();
        self.encoder.write_named_bool(&name, value)
    }

    fn write_byte_value(&mut self, value: i8) -> Result<()> {
        let name = self.names.pop();
        self.encoder.write_named_byte(&name, value)
    }

    fn write_short_value(&mut self, value: i16) -> Result<()> {
        let name = self.names.pop();
        self.encoder.write_named_short(&name, value)
    }

    fn write_int_value(&mut self, value: i32) -> Result<()> {
        let name = self.names.pop();
        self.encoder.write_named_int(&name, value)
    }

    fn write_long_value(&mut self, value: i64) -> Result<()> {
        let name = self.names.pop();
        self.encoder.write_named_long(&name, value)
    }

    fn write_float_value(&mut self, value: f32) -> Result<()> {
        let name = self.names.pop();
        self.encoder.write_named_float(&name, value)
    }

    fn write_double_value(&mut self, value: f64) -> Result<()> {
        let name = self.names.pop();
        self.encoder.write_named_double(&name, value)
    }

    fn write_char_value(&mut self, value: char) -> Result<()> {
        let name = self.names.pop();
        self.encoder.write_named_char(&name, value)
    }

    fn write_string_value(&mut self, value: &str) -> Result<()> {
        let name = self.names.pop();
        self.encoder.write_named_string(&name, value)
    }

    fn write_enum_value<T: SerialEnum>(&mut self, value: T) -> Result<()> {
        let name = self.names.pop();
        self.encoder.write_named_enum(&name, value)
    }

    fn write_serializable_value<T: Any, S: Saver<T>>(&mut self, saver: &S, value: &T) -> Result<()> {
        let current = self.names.current();
        if self.encoder.is_named_serializable_recursive(current, value) {
            saver.save(self, value)
        } else {
            self.write_nullable_value(Some(Value::Opaque(value)))
        }
    }

    fn write_begin(&mut self, desc: &dyn ClassDesc) -> Result<()> {
        log::trace!("begin `{}` at `{}`", desc.name(), self.names.current());
        Ok(())
    }

    fn write_end(&mut self, desc: &dyn ClassDesc) -> Result<()> {
        let name = self.names.pop();
        log::trace!("end `{}` at `{name}`", desc.name());
        Ok(())
    }

    // ---------------------------------------------------------------
    // Element-indexed primitives address the value directly.

    fn write_element_value(&mut self, desc: &dyn ClassDesc, index: usize, value: Value<'_>) -> Result<()> {
        let name = self.name(desc, index)?;
        self.encoder.write_named(&name, value)
    }

    fn write_nullable_element_value(
        &mut self,
        desc: &dyn ClassDesc,
        index: usize,
        value: Option<Value<'_>>,
    ) -> Result<()> {
        let name = self.name(desc, index)?;
        self.write_named_nullable(&name, value)
    }

    fn write_unit_element_value(&mut self, desc: &dyn ClassDesc, index: usize) -> Result<()> {
        let name = self.name(desc, index)?;
        self.encoder.write_named_unit(&name)
    }

    fn write_bool_element_value(&mut self, desc: &dyn ClassDesc, index: usize, value: bool) -> Result<()> {
        let name = self.name(desc, index)?;
        self.encoder.write_named_bool(&name, value)
    }

    fn write_byte_element_value(&mut self, desc: &dyn ClassDesc, index: usize, value: i8) -> Result<()> {
        let name = self.name(desc, index)?;
        self.encoder.write_named_byte(&name, value)
    }

    fn write_short_element_value(&mut self, desc: &dyn ClassDesc, index: usize, value: i16) -> Result<()> {
        let name = self.name(desc, index)?;
        self.encoder.write_named_short(&name, value)
    }

    fn write_int_element_value(&mut self, desc: &dyn ClassDesc, index: usize, value: i32) -> Result<()> {
        let name = self.name(desc, index)?;
        self.encoder.write_named_int(&name, value)
    }

    fn write_long_element_value(&mut self, desc: &dyn ClassDesc, index: usize, value: i64) -> Result<()> {
        let name = self.name(desc, index)?;
        self.encoder.write_named_long(&name, value)
    }

    fn write_float_element_value(&mut self, desc: &dyn ClassDesc, index: usize, value: f32) -> Result<()> {
        let name = self.name(desc, index)?;
        self.encoder.write_named_float(&name, value)
    }

    fn write_double_element_value(&mut self, desc: &dyn ClassDesc, index: usize, value: f64) -> Result<()> {
        let name = self.name(desc, index)?;
        self.encoder.write_named_double(&name, value)
    }

    fn write_char_element_value(&mut self, desc: &dyn ClassDesc, index: usize, value: char) -> Result<()> {
        let name = self.name(desc, index)?;
        self.encoder.write_named_char(&name, value)
    }

    fn write_string_element_value(&mut self, desc: &dyn ClassDesc, index: usize, value: &str) -> Result<()> {
        let name = self.name(desc, index)?;
        self.encoder.write_named_string(&name, value)
    }

    fn write_enum_element_value<T: SerialEnum>(
        &mut self,
        desc: &dyn ClassDesc,
        index: usize,
        value: T,
    ) -> Result<()> {
        let name = self.name(desc, index)?;
        self.encoder.write_named_enum(&name, value)
    }
}

#[cfg(test)]
mod tests {
    use alloc::string::{String, ToString};
    use alloc::vec;
    use core::any::Any;

    use super::{NamedEncoder, NamedOutput};
    use crate::desc::StructDesc;
    use crate::impls::{IntSerializer, ListSerializer, StringSerializer};
    use crate::output::Output;
    use crate::testing::{Color, FlatMap, LINE, Line, LineSerializer, POINT, Point, PointSerializer};
    use crate::value::{EnumValue, Value};
    use crate::{Result, SerializationError};

    fn line() -> Line {
        Line {
            from: Point { x: 1, y: 2 },
            to: Point { x: -3, y: 4 },
            label: Some("edge".to_string()),
        }
    }

    #[test]
    fn point_into_flat_map() {
        let mut output = NamedOutput::new(FlatMap::default());
        output.write(&PointSerializer, &Point { x: 10, y: 20 }).unwrap();

        let flat = output.into_inner();
        assert_eq!(flat.len(), 2);
        assert_eq!(flat.get("x"), Some(&Value::Int(10)));
        assert_eq!(flat.get("y"), Some(&Value::Int(20)));
    }

    #[test]
    fn nested_paths() {
        let mut output = NamedOutput::with_root(FlatMap::default(), "shape");
        output.write(&LineSerializer, &line()).unwrap();
        assert_eq!(output.depth(), 1);
        assert_eq!(output.current_name(), "shape");

        let flat = output.into_inner();
        assert_eq!(flat.len(), 5);
        assert_eq!(flat.get("shape.from.x"), Some(&Value::Int(1)));
        assert_eq!(flat.get("shape.from.y"), Some(&Value::Int(2)));
        assert_eq!(flat.get("shape.to.x"), Some(&Value::Int(-3)));
        assert_eq!(flat.get("shape.to.y"), Some(&Value::Int(4)));
        assert_eq!(flat.get("shape.label"), Some(&Value::str("edge")));
    }

    #[test]
    fn null_is_written_under_its_path() {
        let mut value = line();
        value.label = None;

        let mut output = NamedOutput::new(FlatMap::default());
        output.write(&LineSerializer, &value).unwrap();
        let flat = output.into_inner();
        assert!(flat.is_null("label"));
        assert_eq!(flat.len(), 5);
    }

    #[test]
    fn session_is_reusable() {
        let mut output = NamedOutput::new(FlatMap::default());
        output.write(&PointSerializer, &Point { x: 1, y: 1 }).unwrap();
        output.write(&IntSerializer, &5).unwrap();
        output.write(&PointSerializer, &Point { x: 2, y: 2 }).unwrap();
        assert_eq!(output.depth(), 1);

        let flat = output.into_inner();
        assert_eq!(flat.get(""), Some(&Value::Int(5)));
        assert_eq!(flat.get("x"), Some(&Value::Int(2)));
    }

    #[test]
    fn element_primitives_leave_stack_untouched() {
        let mut output = NamedOutput::with_root(FlatMap::default(), "p");
        output.write_begin(&POINT).unwrap();
        output.write_int_element_value(&POINT, 0, 1).unwrap();
        assert_eq!(output.depth(), 1);
        output.write_element(&POINT, 1).unwrap();
        assert_eq!(output.depth(), 2);
        assert_eq!(output.current_name(), "p.y");
        output.write_int_value(2).unwrap();
        assert_eq!(output.depth(), 1);
        output.write_end(&POINT).unwrap();

        let flat = output.into_inner();
        assert_eq!(flat.get("p.x"), Some(&Value::Int(1)));
        assert_eq!(flat.get("p.y"), Some(&Value::Int(2)));
    }

    #[test]
    fn typed_hooks_funnel_into_write_named() {
        static ALL: StructDesc = StructDesc::class(
            "All",
            &["u", "z", "b", "s", "i", "l", "f", "d", "c", "t", "e", "n", "v"],
        );

        let mut output = NamedOutput::new(FlatMap::default());
        output.write_begin(&ALL).unwrap();
        output.write_unit_element_value(&ALL, 0).unwrap();
        output.write_bool_element_value(&ALL, 1, false).unwrap();
        output.write_byte_element_value(&ALL, 2, 8).unwrap();
        output.write_short_element_value(&ALL, 3, 16).unwrap();
        output.write_int_element_value(&ALL, 4, 32).unwrap();
        output.write_long_element_value(&ALL, 5, 64).unwrap();
        output.write_float_element_value(&ALL, 6, 1.5).unwrap();
        output.write_double_element_value(&ALL, 7, 2.5).unwrap();
        output.write_char_element_value(&ALL, 8, 'q').unwrap();
        output.write_string_element_value(&ALL, 9, "text").unwrap();
        output.write_enum_element_value(&ALL, 10, Color::Red).unwrap();
        output.write_nullable_element_value(&ALL, 11, None).unwrap();
        output.write_element_value(&ALL, 12, Value::Long(-1)).unwrap();
        output.write_end(&ALL).unwrap();

        let flat = output.into_inner();
        assert_eq!(flat.get("u"), Some(&Value::Unit));
        assert_eq!(flat.get("z"), Some(&Value::Bool(false)));
        assert_eq!(flat.get("b"), Some(&Value::Byte(8)));
        assert_eq!(flat.get("s"), Some(&Value::Short(16)));
        assert_eq!(flat.get("i"), Some(&Value::Int(32)));
        assert_eq!(flat.get("l"), Some(&Value::Long(64)));
        assert_eq!(flat.get("f"), Some(&Value::Float(1.5)));
        assert_eq!(flat.get("d"), Some(&Value::Double(2.5)));
        assert_eq!(flat.get("c"), Some(&Value::Char('q')));
        assert_eq!(flat.get("t"), Some(&Value::str("text")));
        assert_eq!(flat.get("e"), Some(&Value::Enum(EnumValue::of(Color::Red))));
        assert!(flat.is_null("n"));
        assert_eq!(flat.get("v"), Some(&Value::Long(-1)));
    }

    #[test]
    fn list_elements_are_indexed() {
        let mut output = NamedOutput::with_root(FlatMap::default(), "tags");
        let list = ListSerializer::new(StringSerializer);
        output
            .write(&list, &vec!["a".to_string(), "b".to_string()])
            .unwrap();
        assert_eq!(output.depth(), 1);

        let flat = output.into_inner();
        assert_eq!(flat.get("tags.size"), Some(&Value::Int(2)));
        assert_eq!(flat.get("tags.0"), Some(&Value::str("a")));
        assert_eq!(flat.get("tags.1"), Some(&Value::str("b")));
    }

    #[test]
    fn unsupported_defaults_name_the_path() {
        struct Nothing;
        impl NamedEncoder for Nothing {}

        let mut output = NamedOutput::new(Nothing);
        assert_eq!(
            output.write(&PointSerializer, &Point { x: 0, y: 0 }),
            Err(SerializationError::unsupported_at("value", "x"))
        );

        let mut output = NamedOutput::with_root(Nothing, "root");
        assert_eq!(
            output.write_nullable(&IntSerializer, None::<&i32>),
            Err(SerializationError::unsupported_at("null", "root"))
        );
    }

    #[test]
    fn unknown_element_index() {
        let mut output = NamedOutput::new(FlatMap::default());
        assert_eq!(
            output.write_int_element_value(&POINT, 2, 0),
            Err(SerializationError::unknown_element(&POINT, 2))
        );
        assert_eq!(output.write_element(&POINT, 5), Err(SerializationError::unknown_element(&POINT, 5)));
        assert_eq!(output.depth(), 1);
    }

    /// Stores nested points as one opaque `"x:y"` string.
    #[derive(Default)]
    struct Inline(FlatMap);

    impl NamedEncoder for Inline {
        fn write_named(&mut self, name: &str, value: Value<'_>) -> Result<()> {
            match value.as_opaque().and_then(|v| v.downcast_ref::<Point>()) {
                Some(point) => {
                    let text = alloc::format!("{}:{}", point.x, point.y);
                    self.0.write_named(name, Value::from(text))
                }
                None => self.0.write_named(name, value),
            }
        }

        fn write_named_null(&mut self, name: &str) -> Result<()> {
            self.0.write_named_null(name)
        }

        fn is_named_serializable_recursive(&mut self, _name: &str, value: &dyn Any) -> bool {
            !value.is::<Point>()
        }
    }

    #[test]
    fn non_recursive_values_become_leaves() {
        let mut output = NamedOutput::new(Inline::default());
        output.write(&LineSerializer, &line()).unwrap();
        assert_eq!(output.depth(), 1);

        let flat = output.into_inner().0;
        assert_eq!(flat.len(), 3);
        assert_eq!(flat.get("from"), Some(&Value::from(String::from("1:2"))));
        assert_eq!(flat.get("to"), Some(&Value::from(String::from("-3:4"))));
        assert_eq!(flat.get("label"), Some(&Value::str("edge")));
    }

    /// Joins paths with `/` and upper-cases element names.
    #[derive(Default)]
    struct Slashed(FlatMap);

    impl NamedEncoder for Slashed {
        fn write_named(&mut self, name: &str, value: Value<'_>) -> Result<()> {
            self.0.write_named(name, value)
        }

        fn element_name<'d>(
            &self,
            desc: &'d dyn crate::desc::ClassDesc,
            index: usize,
        ) -> Option<alloc::borrow::Cow<'d, str>> {
            desc.element_name(index)
                .map(|name| alloc::borrow::Cow::Owned(name.to_uppercase()))
        }

        fn compose_name(&self, parent: &str, child: &str) -> String {
            alloc::format!("{parent}/{child}")
        }
    }

    #[test]
    fn custom_naming_hooks() {
        let mut output = NamedOutput::new(Slashed::default());
        output.write(&LineSerializer, &line()).unwrap();

        let flat = output.into_inner().0;
        assert_eq!(flat.get("/FROM/X"), Some(&Value::Int(1)));
        assert_eq!(flat.get("/LABEL"), Some(&Value::str("edge")));
        assert!(LINE.element_names().contains(&"label"));
    }
}
