//! Doubly-linked list backed by a slot arena
//!
//! Nodes are stored in `nodes` and link to each other by index. Removed
//! slots go on a free list and are reused by later inserts.

use std::fmt;
use std::iter::FusedIterator;

use crate::node::{Node, NodeRef};

/// Doubly-linked list with O(1) insertion and removal at both ends
pub struct LinkedList<T> {
    nodes: Vec<Option<Node<T>>>,
    free_list: Vec<usize>,
    head: Option<usize>,
    tip: Option<usize>,
    len: usize,
}

impl<T> LinkedList<T> {
    /// Create an empty list
    pub fn new() -> Self {
        Self {
            nodes: Vec::new(),
            free_list: Vec::new(),
            head: None,
            tip: None,
            len: 0,
        }
    }

    /// Create an empty list with room for `capacity` nodes
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            nodes: Vec::with_capacity(capacity),
            ..Self::new()
        }
    }

    /// Create a list holding `values` in iteration order
    pub fn from_values<I: IntoIterator<Item = T>>(values: I) -> Self {
        let mut list = Self::new();
        list.extend(values);
        list
    }

    /// Number of values in the list
    pub fn len(&self) -> usize {
        self.len
    }

    /// Check if the list is empty
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// First value, if any
    pub fn first(&self) -> Option<&T> {
        self.head.and_then(|idx| self.node(idx)).map(|node| &node.value)
    }

    /// Last value, if any
    pub fn last(&self) -> Option<&T> {
        self.tip.and_then(|idx| self.node(idx)).map(|node| &node.value)
    }

    /// Cursor at the first node
    pub fn head(&self) -> Option<NodeRef<'_, T>> {
        self.head.map(|idx| NodeRef::new(self, idx))
    }

    /// Cursor at the last node
    pub fn tip(&self) -> Option<NodeRef<'_, T>> {
        self.tip.map(|idx| NodeRef::new(self, idx))
    }

    /// Append a value after the tip
    pub fn add(&mut self, value: T) {
        let idx = self.alloc_node(Node::new(value, self.tip, None));

        match self.tip {
            Some(tip_idx) => {
                if let Some(tip) = &mut self.nodes[tip_idx] {
                    tip.next = Some(idx);
                }
            }
            None => self.head = Some(idx),
        }

        self.tip = Some(idx);
        self.len += 1;
    }

    /// Insert a value before the head
    pub fn prepend(&mut self, value: T) {
        let idx = self.alloc_node(Node::new(value, None, self.head));

        match self.head {
            Some(head_idx) => {
                if let Some(head) = &mut self.nodes[head_idx] {
                    head.prev = Some(idx);
                }
            }
            None => self.tip = Some(idx),
        }

        self.head = Some(idx);
        self.len += 1;
    }

    /// Remove the first value equal to `value`, scanning from the head
    pub fn remove(&mut self, value: &T) -> Option<T>
    where
        T: PartialEq,
    {
        self.remove_by(|candidate| candidate == value)
    }

    /// Remove the first value matching `predicate`, scanning from the head
    ///
    /// The predicate is not called again after the first match.
    pub fn remove_by<F>(&mut self, predicate: F) -> Option<T>
    where
        F: FnMut(&T) -> bool,
    {
        let idx = self.position(predicate)?;
        self.unlink(idx)
    }

    /// Remove and return the head value
    pub fn remove_first(&mut self) -> Option<T> {
        let idx = self.head?;
        self.unlink(idx)
    }

    /// Remove and return the tip value
    pub fn remove_last(&mut self) -> Option<T> {
        let idx = self.tip?;
        self.unlink(idx)
    }

    /// New list with the values matching `predicate`, in order
    pub fn filter<F>(&self, mut predicate: F) -> LinkedList<T>
    where
        T: Clone,
        F: FnMut(&T) -> bool,
    {
        self.iter().filter(|value| predicate(value)).cloned().collect()
    }

    /// New list with `iteratee` applied to every value, in order
    pub fn map<U, F>(&self, iteratee: F) -> LinkedList<U>
    where
        F: FnMut(&T) -> U,
    {
        self.iter().map(iteratee).collect()
    }

    /// Visit every value from head to tip
    pub fn for_each<F>(&self, iteratee: F)
    where
        F: FnMut(&T),
    {
        self.iter().for_each(iteratee);
    }

    /// Check whether any value equals `value`
    pub fn includes(&self, value: &T) -> bool
    where
        T: PartialEq,
    {
        self.iter().any(|candidate| candidate == value)
    }

    /// Check whether any value matches `predicate`, stopping at the first match
    pub fn some<F>(&self, predicate: F) -> bool
    where
        F: FnMut(&T) -> bool,
    {
        self.iter().any(predicate)
    }

    /// First value matching `predicate`
    pub fn find<F>(&self, mut predicate: F) -> Option<&T>
    where
        F: FnMut(&T) -> bool,
    {
        self.iter().find(|value| predicate(value))
    }

    /// Drop every node
    pub fn clear(&mut self) {
        self.nodes.clear();
        self.free_list.clear();
        self.head = None;
        self.tip = None;
        self.len = 0;
    }

    /// New list holding every value but the first
    ///
    /// This copies each remaining value into a fresh list, so it is O(n)
    /// and the result shares nothing with `self`.
    pub fn tail(&self) -> LinkedList<T>
    where
        T: Clone,
    {
        self.iter().skip(1).cloned().collect()
    }

    /// Copy the values into a `Vec`, head first
    pub fn to_vec(&self) -> Vec<T>
    where
        T: Clone,
    {
        self.iter().cloned().collect()
    }

    /// Iterate over the values from head to tip
    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            list: self,
            front: self.head,
            back: self.tip,
            remaining: self.len,
        }
    }

    pub(crate) fn node(&self, idx: usize) -> Option<&Node<T>> {
        self.nodes.get(idx).and_then(Option::as_ref)
    }

    fn position<F>(&self, mut predicate: F) -> Option<usize>
    where
        F: FnMut(&T) -> bool,
    {
        let mut cursor = self.head;
        while let Some(idx) = cursor {
            let node = self.node(idx)?;
            if predicate(&node.value) {
                return Some(idx);
            }
            cursor = node.next;
        }
        None
    }

    /// Splice a node out of the chain and return its value
    ///
    /// A free or out-of-range slot is left alone.
    fn unlink(&mut self, idx: usize) -> Option<T> {
        let node = self.nodes.get_mut(idx)?.take()?;

        match node.prev {
            Some(prev_idx) => {
                if let Some(prev) = &mut self.nodes[prev_idx] {
                    prev.next = node.next;
                }
            }
            None => self.head = node.next,
        }

        match node.next {
            Some(next_idx) => {
                if let Some(next) = &mut self.nodes[next_idx] {
                    next.prev = node.prev;
                }
            }
            None => self.tip = node.prev,
        }

        self.free_node(idx);
        self.len -= 1;

        Some(node.value)
    }

    fn alloc_node(&mut self, node: Node<T>) -> usize {
        if let Some(idx) = self.free_list.pop() {
            self.nodes[idx] = Some(node);
            idx
        } else {
            let idx = self.nodes.len();
            self.nodes.push(Some(node));
            idx
        }
    }

    fn free_node(&mut self, idx: usize) {
        self.free_list.push(idx);
    }
}

impl<T> Default for LinkedList<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone> Clone for LinkedList<T> {
    fn clone(&self) -> Self {
        self.iter().cloned().collect()
    }
}

impl<T: PartialEq> PartialEq for LinkedList<T> {
    fn eq(&self, other: &Self) -> bool {
        self.len == other.len && self.iter().eq(other.iter())
    }
}

impl<T: Eq> Eq for LinkedList<T> {}

impl<T: fmt::Debug> fmt::Debug for LinkedList<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

/// Renders as `(1 <-> 2 <-> 3)`; an empty list renders as `()`.
impl<T: fmt::Display> fmt::Display for LinkedList<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("(")?;
        for (i, value) in self.iter().enumerate() {
            if i > 0 {
                f.write_str(" <-> ")?;
            }
            write!(f, "{}", value)?;
        }
        f.write_str(")")
    }
}

impl<T> Extend<T> for LinkedList<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for value in iter {
            self.add(value);
        }
    }
}

impl<T> FromIterator<T> for LinkedList<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self::from_values(iter)
    }
}

impl<T> From<Vec<T>> for LinkedList<T> {
    fn from(values: Vec<T>) -> Self {
        Self::from_values(values)
    }
}

impl<'a, T> IntoIterator for &'a LinkedList<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<T> IntoIterator for LinkedList<T> {
    type Item = T;
    type IntoIter = IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        IntoIter { list: self }
    }
}

/// Borrowing iterator over a [`LinkedList`]
pub struct Iter<'a, T> {
    list: &'a LinkedList<T>,
    front: Option<usize>,
    back: Option<usize>,
    remaining: usize,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let node = self.list.node(self.front?)?;
        self.front = node.next;
        self.remaining -= 1;
        Some(&node.value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T> DoubleEndedIterator for Iter<'_, T> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let node = self.list.node(self.back?)?;
        self.back = node.prev;
        self.remaining -= 1;
        Some(&node.value)
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {}

impl<T> FusedIterator for Iter<'_, T> {}

/// Owning iterator that drains a [`LinkedList`] from the head
pub struct IntoIter<T> {
    list: LinkedList<T>,
}

impl<T> Iterator for IntoIter<T> {
    type Item = T;

    fn next(&mut self) -> Option<Self::Item> {
        self.list.remove_first()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.list.len, Some(self.list.len))
    }
}

impl<T> DoubleEndedIterator for IntoIter<T> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.list.remove_last()
    }
}

impl<T> ExactSizeIterator for IntoIter<T> {}

impl<T> FusedIterator for IntoIter<T> {}

#[cfg(test)]
impl<T> LinkedList<T> {
    /// Walk the chain and check every structural invariant
    pub(crate) fn assert_links(&self) {
        assert_eq!(self.len == 0, self.head.is_none(), "head presence vs len");
        assert_eq!(self.len == 0, self.tip.is_none(), "tip presence vs len");

        let mut prev = None;
        let mut cursor = self.head;
        let mut count = 0;
        while let Some(idx) = cursor {
            let node = self.node(idx).expect("linked slot is free");
            assert_eq!(node.prev, prev, "back link of slot {}", idx);
            prev = Some(idx);
            cursor = node.next;
            count += 1;
            assert!(count <= self.len, "chain is longer than len");
        }

        assert_eq!(prev, self.tip, "forward walk must end at the tip");
        assert_eq!(count, self.len, "len vs reachable nodes");

        let live = self.nodes.iter().filter(|slot| slot.is_some()).count();
        assert_eq!(live, self.len, "live slots vs len");
        assert_eq!(self.free_list.len() + live, self.nodes.len());
    }

    pub(crate) fn slot_count(&self) -> usize {
        self.nodes.len()
    }
}
