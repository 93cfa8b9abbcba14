//! # Safe List
//!
//! An owned singly linked list of integers, together with two small utilities
//! that handle outside input and raw heap memory without overflowing or leaking.
//!
//! ## Overview
//!
//! - [`LinkedList`] keeps its nodes in `Box`es chained through `next` links.
//!   Insertion at either end, traversal and teardown never leave a dangling or
//!   doubly freed node, and running out of memory is reported as an error rather
//!   than aborting.
//! - [`input`] reads one line into a fixed-capacity buffer, never writing past
//!   its end.
//! - [`block`] acquires a heap block, fills it and releases it through a guard,
//!   so the release happens on every exit path.
//!
//! ## Linked List
//!
//! ```
//! use safe_list::LinkedList;
//!
//! # fn main() -> safe_list::Result<()> {
//! let mut list = LinkedList::new();
//! list.insert_at_beginning(1)?;
//! list.insert_at_beginning(2)?;
//! list.insert_at_end(3)?;
//!
//! let values: Vec<i32> = list.iter().collect();
//! assert_eq!(values, [2, 1, 3]);
//! println!("{}", list); // 2 -> 1 -> 3 -> NULL
//!
//! assert_eq!(list.delete_list(), 3);
//! assert!(list.is_empty());
//! # Ok(())
//! # }
//! ```
//!
//! ## Bounded Input
//!
//! ```
//! use safe_list::input::LineBuffer;
//! use std::io::Cursor;
//!
//! # fn main() -> safe_list::Result<()> {
//! let mut stdin = Cursor::new(b"a line far longer than ten bytes\n".to_vec());
//! let mut line = LineBuffer::new(10)?;
//!
//! assert!(line.read_from(&mut stdin)?);
//! assert_eq!(line.as_bytes(), b"a line fa");
//! # Ok(())
//! # }
//! ```
//!
//! ## Scoped Blocks
//!
//! ```
//! use safe_list::block::{fill_scoped_block, CountingAllocator, LibcAllocator};
//!
//! # fn main() -> safe_list::Result<()> {
//! let mut heap = CountingAllocator::new(LibcAllocator);
//! fill_scoped_block(&mut heap, 100, "payload")?;
//! assert_eq!(heap.outstanding(), 0);
//! # Ok(())
//! # }
//! ```
//!
//! ## Logging
//!
//! The library reports through the [`log`] facade: allocation failures at
//! `error`, truncated reads at `warn`, teardown and block details at `debug`.
//! Nothing is printed unless the application installs a logger; the `cli`
//! feature ships one in the `logging` module.

#![deny(rustdoc::broken_intra_doc_links)]

pub mod block;
pub mod demo;
pub mod error;
pub mod input;
pub mod list;
#[cfg(feature = "cli")]
pub mod logging;
#[cfg(test)]
mod test_support;

pub use demo::{DemoConfig, DemoReport};
pub use error::{Error, Result};
pub use input::{read_bounded, ExcessPolicy, LineBuffer};
pub use list::{Global, LinkedList, Node, NodeAllocator};
