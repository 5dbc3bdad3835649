//! # toonlist
//!
//! Linked collections for ToonKit.
//!
//! ## Architecture
//! - **LinkedList**: doubly-linked list over a slot arena, nodes linked by index
//! - **NodeRef**: borrowed cursor for walking `previous`/`next` links
//! - **Queue**: FIFO adapter delegating to `LinkedList`
//! - **Stack**: LIFO adapter over a `Vec`

#![warn(missing_docs)]

mod list;
mod node;
mod queue;
mod stack;

pub use list::{IntoIter, Iter, LinkedList};
pub use node::NodeRef;
pub use queue::Queue;
pub use stack::Stack;
