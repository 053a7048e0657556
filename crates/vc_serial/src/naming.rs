use alloc::string::String;
use alloc::vec::Vec;

// -----------------------------------------------------------------------------
// compose_name

/// Composes the path of a child element from its parent's path.
///
/// An empty parent yields the child name itself, otherwise the two are
/// joined with a dot.
///
/// # Examples
///
/// ```
/// use vc_serial::compose_name;
///
/// assert_eq!(compose_name("", "x"), "x");
/// assert_eq!(compose_name("a", "b"), "a.b");
/// assert_eq!(compose_name("a.b", "c"), "a.b.c");
/// ```
pub fn compose_name(parent: &str, child: &str) -> String {
    if parent.is_empty() {
        return String::from(child);
    }
    let mut name = String::with_capacity(parent.len() + 1 + child.len());
    name.push_str(parent);
    name.push('.');
    name.push_str(child);
    name
}

// -----------------------------------------------------------------------------
// NameStack

/// The name scratch stack of one name-path session.
///
/// The bottom entry is the root name and acts as a floor: popping at depth
/// one returns the root without removing it. A top-level composite ends by
/// popping the root, which leaves the session ready for the next write.
#[derive(Debug, Clone)]
pub(crate) struct NameStack {
    stack: Vec<String>,
}

impl NameStack {
    pub fn new(root: String) -> Self {
        Self {
            stack: alloc::vec![root],
        }
    }

    /// Returns the innermost name.
    #[inline]
    pub fn current(&self) -> &str {
        self.stack.last().map(String::as_str).unwrap_or_default()
    }

    pub fn push(&mut self, name: String) {
        self.stack.push(name);
    }

    pub fn pop(&mut self) -> String {
        if self.stack.len() > 1 {
            if let Some(name) = self.stack.pop() {
                return name;
            }
        }
        String::from(self.current())
    }

    /// Returns the number of names, the root included.
    #[inline]
    pub fn depth(&self) -> usize {
        self.stack.len()
    }
}
