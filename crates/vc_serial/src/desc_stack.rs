use alloc::string::{String, ToString};
use alloc::vec::Vec;
use core::fmt::{Debug, Formatter};

use crate::desc::ClassDesc;

/// Helper struct for managing a stack of open composite descriptors.
///
/// Positional sessions push on `begin` and pop on `end`, and attach the
/// stack to errors raised by primitives, so that a failure deep inside a
/// nested value names the path of types leading to it.
#[derive(Default, Clone)]
pub(crate) struct DescStack {
    stack: Vec<String>,
}

impl DescStack {
    /// Create a new empty [`DescStack`].
    pub const fn new() -> Self {
        Self { stack: Vec::new() }
    }

    pub fn push(&mut self, desc: &dyn ClassDesc) {
        self.stack.push(desc.name().to_string());
    }

    /// Pop the innermost descriptor, warning if it is not `desc`.
    pub fn pop(&mut self, desc: &dyn ClassDesc) {
        match self.stack.pop() {
            Some(open) if open == desc.name() => {}
            Some(open) => {
                log::warn!("unbalanced composite: `{}` ended while `{open}` is open", desc.name());
            }
            None => {
                log::warn!("unbalanced composite: `{}` ended without a begin", desc.name());
            }
        }
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.stack.is_empty()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.stack.len()
    }
}

impl Debug for DescStack {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        let mut iter = self.stack.iter();

        if let Some(first) = iter.next() {
            writeln!(f, "`{first}`")?;
        }

        for name in iter {
            writeln!(f, " -> `{name}`")?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use alloc::format;

    use super::DescStack;
    use crate::desc::{ENTRY_DESC, StructDesc, UNIT_DESC};

    static POINT: StructDesc = StructDesc::class("Point", &["x", "y"]);

    #[test]
    fn format_and_balance() {
        let mut stack = DescStack::new();
        stack.push(&POINT);
        stack.push(&ENTRY_DESC);
        assert_eq!(format!("{stack:?}"), "`Point`\n -> `Entry`\n");

        stack.pop(&ENTRY_DESC);
        stack.pop(&POINT);
        assert!(stack.is_empty());

        // Unbalanced pops only warn.
        stack.pop(&UNIT_DESC);
        assert_eq!(stack.len(), 0);
    }
}
