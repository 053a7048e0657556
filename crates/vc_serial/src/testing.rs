//! Shared test fixtures: sample types with their serializers, and small
//! in-memory backends for both strategies.

use alloc::collections::{BTreeMap, VecDeque};
use alloc::format;
use alloc::string::{String, ToString};
use alloc::vec::Vec;

use crate::desc::{ClassDesc, StructDesc};
use crate::impls::StringSerializer;
use crate::input::{ElementDecoder, Input, NamedDecoder, NextElement};
use crate::output::{ElementEncoder, NamedEncoder, Output};
use crate::value::{SerialEnum, Value};
use crate::{Loader, Result, Saver, SerializationError};

// -----------------------------------------------------------------------------
// Enums

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Color {
    Red,
    Green,
    Blue,
}

impl SerialEnum for Color {
    const NAME: &'static str = "Color";
    const VARIANTS: &'static [&'static str] = &["Red", "Green", "Blue"];

    fn ordinal(self) -> usize {
        self as usize
    }

    fn from_ordinal(ordinal: usize) -> Option<Self> {
        [Self::Red, Self::Green, Self::Blue].get(ordinal).copied()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shape {
    Circle,
    Square,
}

impl SerialEnum for Shape {
    const NAME: &'static str = "Shape";
    const VARIANTS: &'static [&'static str] = &["Circle", "Square"];

    fn ordinal(self) -> usize {
        self as usize
    }

    fn from_ordinal(ordinal: usize) -> Option<Self> {
        [Self::Circle, Self::Square].get(ordinal).copied()
    }
}

// -----------------------------------------------------------------------------
// Point

pub static POINT: StructDesc = StructDesc::class("Point", &["x", "y"]);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

pub struct PointSerializer;

impl Saver<Point> for PointSerializer {
    fn save<O: Output>(&self, output: &mut O, value: &Point) -> Result<()> {
        output.write_begin(&POINT)?;
        output.write_int_element_value(&POINT, 0, value.x)?;
        output.write_int_element_value(&POINT, 1, value.y)?;
        output.write_end(&POINT)
    }
}

impl Loader<Point> for PointSerializer {
    fn load<I: Input>(&self, input: &mut I) -> Result<Point> {
        input.read_begin(&POINT)?;
        let mut x = None;
        let mut y = None;
        input.read_elements(&POINT, 2, |input, index| {
            match index {
                0 => x = Some(input.read_int_element_value(&POINT, 0)?),
                _ => y = Some(input.read_int_element_value(&POINT, 1)?),
            }
            Ok(())
        })?;
        input.read_end(&POINT)?;

        Ok(Point {
            x: x.ok_or_else(|| SerializationError::missing_element(&POINT, "x"))?,
            y: y.ok_or_else(|| SerializationError::missing_element(&POINT, "y"))?,
        })
    }
}

// -----------------------------------------------------------------------------
// Line

pub static LINE: StructDesc = StructDesc::class("Line", &["from", "to", "label"]);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Line {
    pub from: Point,
    pub to: Point,
    pub label: Option<String>,
}

pub struct LineSerializer;

impl Saver<Line> for LineSerializer {
    fn save<O: Output>(&self, output: &mut O, value: &Line) -> Result<()> {
        output.write_begin(&LINE)?;
        output.write_serializable_element_value(&LINE, 0, &PointSerializer, &value.from)?;
        output.write_serializable_element_value(&LINE, 1, &PointSerializer, &value.to)?;
        output.write_nullable_serializable_element_value(&LINE, 2, &StringSerializer, value.label.as_ref())?;
        output.write_end(&LINE)
    }
}

impl Loader<Line> for LineSerializer {
    fn load<I: Input>(&self, input: &mut I) -> Result<Line> {
        input.read_begin(&LINE)?;
        let mut from = None;
        let mut to = None;
        let mut label = None;
        input.read_elements(&LINE, 3, |input, index| {
            match index {
                0 => from = Some(input.read_serializable_element_value(&LINE, 0, &PointSerializer)?),
                1 => to = Some(input.read_serializable_element_value(&LINE, 1, &PointSerializer)?),
                _ => {
                    label = Some(input.read_nullable_serializable_element_value(&LINE, 2, &StringSerializer)?);
                }
            }
            Ok(())
        })?;
        input.read_end(&LINE)?;

        Ok(Line {
            from: from.ok_or_else(|| SerializationError::missing_element(&LINE, "from"))?,
            to: to.ok_or_else(|| SerializationError::missing_element(&LINE, "to"))?,
            label: label.ok_or_else(|| SerializationError::missing_element(&LINE, "label"))?,
        })
    }
}

// -----------------------------------------------------------------------------
// Tape

/// A positional backend storing values in order.
///
/// Presence marks are stored as `Bool(true)`, nulls as `Bool(false)`.
#[derive(Debug, Default)]
pub struct Tape {
    pub values: Vec<Value<'static>>,
    cursor: usize,
}

impl Tape {
    pub fn from_values(values: Vec<Value<'static>>) -> Self {
        Self { values, cursor: 0 }
    }

    pub fn is_exhausted(&self) -> bool {
        self.cursor == self.values.len()
    }

    fn next(&mut self) -> Result<Value<'static>> {
        let value = self
            .values
            .get(self.cursor)
            .cloned()
            .ok_or_else(|| SerializationError::custom("end of tape"))?;
        self.cursor += 1;
        Ok(value)
    }
}

impl ElementEncoder for Tape {
    fn write_not_null_mark(&mut self) -> Result<()> {
        self.values.push(Value::Bool(true));
        Ok(())
    }

    fn write_null_value(&mut self) -> Result<()> {
        self.values.push(Value::Bool(false));
        Ok(())
    }

    fn write_value(&mut self, value: Value<'_>) -> Result<()> {
        self.values.push(value.into_owned()?);
        Ok(())
    }
}

impl ElementDecoder for Tape {
    fn read_not_null_mark(&mut self) -> Result<bool> {
        self.next()?.into_bool()
    }

    fn read_value(&mut self) -> Result<Value<'static>> {
        self.next()
    }
}

// -----------------------------------------------------------------------------
// Recorder

#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    Begin(String),
    End(String),
    Element(String, usize),
    NotNull,
    Null,
    Value(Value<'static>),
}

/// A positional backend recording every call.
#[derive(Debug, Default)]
pub struct Recorder {
    pub events: Vec<Event>,
    pub depth: usize,
    pub max_depth: usize,
}

impl Recorder {
    pub fn count_begin(&self, name: &str) -> usize {
        self.events
            .iter()
            .filter(|e| matches!(e, Event::Begin(n) if n == name))
            .count()
    }

    pub fn count_end(&self, name: &str) -> usize {
        self.events
            .iter()
            .filter(|e| matches!(e, Event::End(n) if n == name))
            .count()
    }

    /// Returns `true` if every end closes the innermost open begin.
    pub fn well_nested(&self) -> bool {
        let mut open = Vec::new();
        for event in &self.events {
            match event {
                Event::Begin(name) => open.push(name),
                Event::End(name) => {
                    if open.pop() != Some(name) {
                        return false;
                    }
                }
                _ => {}
            }
        }
        open.is_empty()
    }
}

impl ElementEncoder for Recorder {
    fn write_element(&mut self, desc: &dyn ClassDesc, index: usize) -> Result<()> {
        self.events.push(Event::Element(desc.name().to_string(), index));
        Ok(())
    }

    fn write_not_null_mark(&mut self) -> Result<()> {
        self.events.push(Event::NotNull);
        Ok(())
    }

    fn write_null_value(&mut self) -> Result<()> {
        self.events.push(Event::Null);
        Ok(())
    }

    fn write_value(&mut self, value: Value<'_>) -> Result<()> {
        self.events.push(Event::Value(value.into_owned()?));
        Ok(())
    }

    fn write_begin(&mut self, desc: &dyn ClassDesc) -> Result<()> {
        self.events.push(Event::Begin(desc.name().to_string()));
        self.depth += 1;
        self.max_depth = self.max_depth.max(self.depth);
        Ok(())
    }

    fn write_end(&mut self, desc: &dyn ClassDesc) -> Result<()> {
        self.events.push(Event::End(desc.name().to_string()));
        self.depth -= 1;
        Ok(())
    }
}

// -----------------------------------------------------------------------------
// FlatMap

/// A name-path backend over a flat `path -> value` map; `None` is a null.
#[derive(Debug, Default)]
pub struct FlatMap(BTreeMap<String, Option<Value<'static>>>);

impl FlatMap {
    pub fn insert(&mut self, name: &str, value: Value<'static>) {
        self.0.insert(name.to_string(), Some(value));
    }

    pub fn insert_null(&mut self, name: &str) {
        self.0.insert(name.to_string(), None);
    }

    pub fn get(&self, name: &str) -> Option<&Value<'static>> {
        self.0.get(name).and_then(Option::as_ref)
    }

    pub fn is_null(&self, name: &str) -> bool {
        matches!(self.0.get(name), Some(None))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }
}

impl NamedEncoder for FlatMap {
    fn write_named(&mut self, name: &str, value: Value<'_>) -> Result<()> {
        self.insert(name, value.into_owned()?);
        Ok(())
    }

    fn write_named_null(&mut self, name: &str) -> Result<()> {
        self.insert_null(name);
        Ok(())
    }
}

impl NamedDecoder for FlatMap {
    fn read_named(&mut self, name: &str) -> Result<Value<'static>> {
        match self.0.get(name) {
            Some(Some(value)) => Ok(value.clone()),
            Some(None) => Err(SerializationError::custom(format!("`{name}` is null"))),
            None => Err(SerializationError::custom(format!("no value at `{name}`"))),
        }
    }

    fn read_named_not_null_mark(&mut self, name: &str) -> Result<bool> {
        Ok(!self.is_null(name))
    }
}

// -----------------------------------------------------------------------------
// Shuffled

#[derive(Debug, Clone)]
pub enum Step {
    Index(usize),
    Value(Value<'static>),
    Done,
}

/// A positional backend that dictates the element order with a script.
///
/// `read_element` consumes an `Index` or `Done` step, an exhausted script
/// answers `Done`; `read_value` consumes a `Value` step.
#[derive(Debug)]
pub struct Shuffled(VecDeque<Step>);

impl Shuffled {
    /// One element per pair, each followed by its value.
    pub fn new<const N: usize>(pairs: [(usize, Value<'static>); N]) -> Self {
        Self(
            pairs
                .into_iter()
                .flat_map(|(index, value)| [Step::Index(index), Step::Value(value)])
                .collect(),
        )
    }

    pub fn script<const N: usize>(steps: [Step; N]) -> Self {
        Self(steps.into())
    }

    pub fn is_exhausted(&self) -> bool {
        self.0.is_empty()
    }
}

impl ElementDecoder for Shuffled {
    fn read_element(&mut self, desc: &dyn ClassDesc) -> Result<NextElement> {
        match self.0.pop_front() {
            Some(Step::Index(index)) => Ok(NextElement::Index(index)),
            Some(Step::Done) | None => Ok(NextElement::Done),
            Some(Step::Value(value)) => Err(SerializationError::custom(format!(
                "expected an element of `{}`, found {value:?}",
                desc.name()
            ))),
        }
    }

    fn read_value(&mut self) -> Result<Value<'static>> {
        match self.0.pop_front() {
            Some(Step::Value(value)) => Ok(value),
            other => Err(SerializationError::custom(format!("expected a value, found {other:?}"))),
        }
    }
}
