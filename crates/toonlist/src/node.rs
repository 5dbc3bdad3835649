//! List nodes and read-only node cursors
//!
//! Nodes live in the owning list's arena and link to their neighbours by
//! slot index, so the chain never holds owning pointers in both directions.

use std::fmt;

use crate::list::LinkedList;

/// Node in the doubly-linked chain
pub(crate) struct Node<T> {
    pub(crate) value: T,
    pub(crate) prev: Option<usize>,
    pub(crate) next: Option<usize>,
}

impl<T> Node<T> {
    pub(crate) fn new(value: T, prev: Option<usize>, next: Option<usize>) -> Self {
        Self { value, prev, next }
    }
}

/// Borrowed view of a node that is currently linked into a list
///
/// A `NodeRef` borrows the list immutably, so it can never observe a node
/// after it has been unlinked.
pub struct NodeRef<'a, T> {
    list: &'a LinkedList<T>,
    idx: usize,
}

impl<'a, T> NodeRef<'a, T> {
    pub(crate) fn new(list: &'a LinkedList<T>, idx: usize) -> Self {
        Self { list, idx }
    }

    fn node(&self) -> &'a Node<T> {
        // Cursors are only built from live links.
        match self.list.node(self.idx) {
            Some(node) => node,
            None => unreachable!("node cursor points at a free slot"),
        }
    }

    /// Value held by this node
    pub fn value(&self) -> &'a T {
        &self.node().value
    }

    /// Node before this one, `None` at the head
    pub fn previous(&self) -> Option<NodeRef<'a, T>> {
        self.node().prev.map(|idx| NodeRef::new(self.list, idx))
    }

    /// Node after this one, `None` at the tip
    pub fn next(&self) -> Option<NodeRef<'a, T>> {
        self.node().next.map(|idx| NodeRef::new(self.list, idx))
    }

    /// Whether this node is the list head
    pub fn is_head(&self) -> bool {
        self.node().prev.is_none()
    }

    /// Whether this node is the list tip
    pub fn is_tip(&self) -> bool {
        self.node().next.is_none()
    }
}

impl<T> Clone for NodeRef<'_, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for NodeRef<'_, T> {}

/// Identity comparison: same slot of the same list.
impl<T> PartialEq for NodeRef<'_, T> {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.list, other.list) && self.idx == other.idx
    }
}

impl<T> Eq for NodeRef<'_, T> {}

impl<T: fmt::Debug> fmt::Debug for NodeRef<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let node = self.node();
        f.debug_struct("NodeRef")
            .field("value", &node.value)
            .field("prev", &node.prev)
            .field("next", &node.next)
            .finish()
    }
}
