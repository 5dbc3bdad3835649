//! LIFO stack over a `Vec`

use std::fmt;

/// Last in, first out stack
pub struct Stack<T> {
    items: Vec<T>,
}

impl<T> Stack<T> {
    /// Create an empty stack
    pub fn new() -> Self {
        Self { items: Vec::new() }
    }

    /// Number of items on the stack
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Check if the stack is empty
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Push an item on top
    pub fn push(&mut self, item: T) {
        self.items.push(item);
    }

    /// Remove and return the top item
    pub fn pop(&mut self) -> Option<T> {
        self.items.pop()
    }

    /// Top item without removing it
    pub fn peek(&self) -> Option<&T> {
        self.items.last()
    }

    /// Remove every item
    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Copy the items into a `Vec`, top first
    pub fn to_vec(&self) -> Vec<T>
    where
        T: Clone,
    {
        self.items.iter().rev().cloned().collect()
    }
}

impl<T> Default for Stack<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: fmt::Debug> fmt::Debug for Stack<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.items.iter().rev()).finish()
    }
}

/// Renders top first: pushing 1, 2, 3 gives `[3, 2, 1]`.
impl<T: fmt::Display> fmt::Display for Stack<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[")?;
        for (i, item) in self.items.iter().rev().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{}", item)?;
        }
        f.write_str("]")
    }
}
