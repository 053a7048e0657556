use alloc::string::{String, ToString};
use core::fmt;

use thiserror::Error;

use crate::desc::ClassDesc;
use crate::value::ValueKind;

// -----------------------------------------------------------------------------
// Result

/// A specialized [`Result`](core::result::Result) for serialization sessions.
pub type Result<T, E = SerializationError> = core::result::Result<T, E>;

// -----------------------------------------------------------------------------
// Error

/// The failure signal of a write or read session.
///
/// Errors are never recovered inside the protocol: any primitive returning
/// an error unwinds the whole `write`/`read` call, and whatever the backend
/// produced so far must be discarded.
#[derive(Debug, Error, Clone, PartialEq)]
#[non_exhaustive]
pub enum SerializationError {
    /// The backend has no real behaviour for this operation.
    #[error("{what} is not supported{}", At(.name))]
    Unsupported {
        what: &'static str,
        name: Option<String>,
    },

    /// A typed read received a value of another kind.
    #[error("expected {expected} value but found {found}{}", At(.name))]
    Mismatch {
        expected: ValueKind,
        found: ValueKind,
        name: Option<String>,
    },

    #[error("`{desc}` has no element at index {index}")]
    UnknownElement { desc: String, index: usize },

    #[error("`{desc}` has no element named `{name}`")]
    UnknownName { desc: String, name: String },

    #[error("element `{element}` of `{desc}` was never read")]
    MissingElement { desc: String, element: String },

    #[error("{0}")]
    Custom(String),

    /// An error raised while composites were open, with the descriptor stack.
    #[cfg(all(debug_assertions, feature = "debug"))]
    #[error("{source} (stack:\n{stack})")]
    Traced {
        source: alloc::boxed::Box<SerializationError>,
        stack: String,
    },
}

impl SerializationError {
    #[inline]
    pub const fn unsupported(what: &'static str) -> Self {
        Self::Unsupported { what, name: None }
    }

    #[inline]
    pub fn unsupported_at(what: &'static str, name: &str) -> Self {
        Self::Unsupported {
            what,
            name: Some(name.to_string()),
        }
    }

    #[inline]
    pub const fn mismatch(expected: ValueKind, found: ValueKind) -> Self {
        Self::Mismatch {
            expected,
            found,
            name: None,
        }
    }

    pub fn unknown_element(desc: &dyn ClassDesc, index: usize) -> Self {
        Self::UnknownElement {
            desc: desc.name().to_string(),
            index,
        }
    }

    pub fn unknown_name(desc: &dyn ClassDesc, name: &str) -> Self {
        Self::UnknownName {
            desc: desc.name().to_string(),
            name: name.to_string(),
        }
    }

    pub fn missing_element(desc: &dyn ClassDesc, element: &str) -> Self {
        Self::MissingElement {
            desc: desc.name().to_string(),
            element: element.to_string(),
        }
    }

    pub fn custom(msg: impl fmt::Display) -> Self {
        Self::Custom(msg.to_string())
    }

    /// Attaches the path of the value being processed, if none is set yet.
    pub fn at(mut self, path: &str) -> Self {
        match &mut self {
            Self::Unsupported { name, .. } | Self::Mismatch { name, .. } if name.is_none() => {
                *name = Some(path.to_string());
            }
            _ => {}
        }
        self
    }

    /// Returns the innermost error, skipping debug trace wrappers.
    pub fn root_cause(&self) -> &Self {
        crate::cfg::debug! {
            if {
                match self {
                    Self::Traced { source, .. } => source.root_cause(),
                    _ => self,
                }
            } else {
                self
            }
        }
    }

    #[cfg(all(debug_assertions, feature = "debug"))]
    pub(crate) fn traced(self, stack: &crate::desc_stack::DescStack) -> Self {
        if stack.is_empty() || matches!(self, Self::Traced { .. }) {
            return self;
        }
        Self::Traced {
            source: alloc::boxed::Box::new(self),
            stack: alloc::format!("{stack:?}"),
        }
    }
}

/// Formats the optional path suffix of an error message.
struct At<'a>(&'a Option<String>);

impl fmt::Display for At<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Some(name) => write!(f, " for `{name}`"),
            None => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use alloc::string::ToString;

    use super::SerializationError;
    use crate::desc::StructDesc;
    use crate::value::ValueKind;

    static POINT: StructDesc = StructDesc::class("Point", &["x", "y"]);

    #[test]
    fn messages() {
        assert_eq!(
            SerializationError::unsupported("value").to_string(),
            "value is not supported"
        );
        assert_eq!(
            SerializationError::unsupported_at("null", "a.b").to_string(),
            "null is not supported for `a.b`"
        );
        assert_eq!(
            SerializationError::mismatch(ValueKind::Int, ValueKind::String).to_string(),
            "expected Int value but found String"
        );
        assert_eq!(
            SerializationError::unknown_element(&POINT, 7).to_string(),
            "`Point` has no element at index 7"
        );
        assert_eq!(
            SerializationError::missing_element(&POINT, "y").to_string(),
            "element `y` of `Point` was never read"
        );
    }

    #[test]
    fn at_keeps_first_path() {
        let err = SerializationError::mismatch(ValueKind::Bool, ValueKind::Int)
            .at("inner")
            .at("outer");
        assert_eq!(
            err,
            SerializationError::Mismatch {
                expected: ValueKind::Bool,
                found: ValueKind::Int,
                name: Some("inner".to_string()),
            }
        );

        let err = SerializationError::custom("broken pipe").at("x");
        assert_eq!(err.to_string(), "broken pipe");
    }
}
