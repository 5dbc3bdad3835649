//! FIFO queue on top of [`LinkedList`]

use std::fmt;

use crate::list::{Iter, LinkedList};

/// First in, first out queue
pub struct Queue<T> {
    list: LinkedList<T>,
}

impl<T> Queue<T> {
    /// Create an empty queue
    pub fn new() -> Self {
        Self {
            list: LinkedList::new(),
        }
    }

    /// Number of queued items
    pub fn len(&self) -> usize {
        self.list.len()
    }

    /// Check if the queue is empty
    pub fn is_empty(&self) -> bool {
        self.list.is_empty()
    }

    /// Add an item at the back
    pub fn enqueue(&mut self, item: T) {
        self.list.add(item);
    }

    /// Remove and return the front item
    pub fn dequeue(&mut self) -> Option<T> {
        self.list.remove_first()
    }

    /// Front item without removing it
    pub fn peek(&self) -> Option<&T> {
        self.list.first()
    }

    /// Remove every item
    pub fn clear(&mut self) {
        self.list.clear();
    }

    /// Copy the items into a `Vec`, front first
    pub fn to_vec(&self) -> Vec<T>
    where
        T: Clone,
    {
        self.list.to_vec()
    }

    /// Iterate from front to back
    pub fn iter(&self) -> Iter<'_, T> {
        self.list.iter()
    }
}

impl<T> Default for Queue<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: fmt::Debug> fmt::Debug for Queue<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

/// Renders as `[1, 2, 3]`, front first.
impl<T: fmt::Display> fmt::Display for Queue<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[")?;
        for (i, item) in self.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{}", item)?;
        }
        f.write_str("]")
    }
}

impl<T> Extend<T> for Queue<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        self.list.extend(iter);
    }
}

impl<T> FromIterator<T> for Queue<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self {
            list: LinkedList::from_values(iter),
        }
    }
}
