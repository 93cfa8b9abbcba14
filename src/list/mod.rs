//! Owned singly linked list of integers
//!
//! Each node is reachable from exactly one owner: the list head or the `next`
//! link of its predecessor. Ownership is expressed with `Box`, so a node can
//! never be freed twice or outlive the list that holds it.
//!
//! Node allocation is fallible. Instead of aborting the process when the heap is
//! exhausted, [`NodeAllocator::allocate`] returns [`Error::AllocationFailed`] and
//! the inserting operation leaves the list untouched.
//!
//! ```
//! use safe_list::LinkedList;
//!
//! # fn main() -> safe_list::Result<()> {
//! let mut list = LinkedList::new();
//! list.insert_at_beginning(1)?;
//! list.insert_at_beginning(2)?;
//! list.insert_at_end(3)?;
//! assert_eq!(list.to_string(), "2 -> 1 -> 3 -> NULL");
//!
//! list.delete_list();
//! assert_eq!(list.to_string(), "NULL");
//! # Ok(())
//! # }
//! ```

mod iterators;

pub use iterators::{IntoIter, Iter};

use crate::error::{Error, Result};
use std::alloc::{self, Layout};
use std::fmt;
use std::io::{self, Write};
use std::ptr::NonNull;

/// A single list element
pub struct Node {
    data: i32,
    next: Option<Box<Node>>,
}

impl Node {
    /// The stored value
    pub fn data(&self) -> i32 {
        self.data
    }

    /// The following node, or `None` for the terminal node
    pub fn next(&self) -> Option<&Node> {
        self.next.as_deref()
    }
}

impl fmt::Debug for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Node")
            .field("data", &self.data)
            .field("has_next", &self.next.is_some())
            .finish()
    }
}

/// Source of heap memory for list nodes
///
/// Implementations must return nodes whose box was obtained from the global
/// allocator, because the list releases them by dropping the box.
pub trait NodeAllocator {
    /// Allocate one node holding `value` with no successor
    fn allocate(&mut self, value: i32) -> Result<Box<Node>>;
}

/// The process-wide heap, allocated fallibly
#[derive(Debug, Default, Clone, Copy)]
pub struct Global;

impl NodeAllocator for Global {
    fn allocate(&mut self, value: i32) -> Result<Box<Node>> {
        let layout = Layout::new::<Node>();
        // SAFETY: Node is not zero-sized, so the layout is valid for alloc.
        let raw = unsafe { alloc::alloc(layout) } as *mut Node;
        let ptr = NonNull::new(raw).ok_or(Error::AllocationFailed {
            size: layout.size(),
        })?;

        // SAFETY: ptr is non-null, aligned for Node and freshly allocated with
        // Layout::new::<Node>() from the global allocator, which is exactly what
        // Box::from_raw requires. It is initialised before the box is formed.
        unsafe {
            ptr.as_ptr().write(Node {
                data: value,
                next: None,
            });
            Ok(Box::from_raw(ptr.as_ptr()))
        }
    }
}

/// Singly linked list owning its nodes
///
/// The allocator parameter defaults to [`Global`]; supply another
/// [`NodeAllocator`] with [`LinkedList::with_allocator`] to control where nodes
/// come from.
pub struct LinkedList<A: NodeAllocator = Global> {
    head: Option<Box<Node>>,
    len: usize,
    alloc: A,
}

impl LinkedList<Global> {
    /// Create an empty list backed by the global heap
    pub fn new() -> Self {
        Self::with_allocator(Global)
    }
}

impl Default for LinkedList<Global> {
    fn default() -> Self {
        Self::new()
    }
}

impl<A: NodeAllocator> LinkedList<A> {
    /// Create an empty list that takes its nodes from `alloc`
    pub fn with_allocator(alloc: A) -> Self {
        LinkedList {
            head: None,
            len: 0,
            alloc,
        }
    }

    /// The allocator backing this list
    pub fn allocator(&self) -> &A {
        &self.alloc
    }

    /// Number of nodes currently in the list
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.head.is_none()
    }

    /// Allocate a detached node, logging the failure if the heap refuses
    fn create_node(&mut self, value: i32) -> Result<Box<Node>> {
        self.alloc.allocate(value).map_err(|err| {
            log::error!("Memory allocation failed: {}", err);
            err
        })
    }

    /// Make `value` the new head; O(1)
    ///
    /// # Errors
    ///
    /// Returns [`Error::AllocationFailed`] when no node could be obtained. The
    /// list is unchanged in that case.
    pub fn insert_at_beginning(&mut self, value: i32) -> Result<()> {
        let mut node = self.create_node(value)?;
        node.next = self.head.take();
        self.head = Some(node);
        self.len += 1;
        Ok(())
    }

    /// Append `value` after the last node; O(n) in the current length
    ///
    /// # Errors
    ///
    /// Returns [`Error::AllocationFailed`] when no node could be obtained. The
    /// list is unchanged in that case.
    pub fn insert_at_end(&mut self, value: i32) -> Result<()> {
        let node = self.create_node(value)?;

        let mut cursor = &mut self.head;
        while let Some(current) = cursor {
            cursor = &mut current.next;
        }
        *cursor = Some(node);
        self.len += 1;
        Ok(())
    }

    /// Detach the head and return its value
    pub fn pop_front(&mut self) -> Option<i32> {
        self.head.take().map(|mut node| {
            self.head = node.next.take();
            self.len -= 1;
            node.data
        })
    }

    /// The first node, if any
    pub fn head_node(&self) -> Option<&Node> {
        self.head.as_deref()
    }

    /// The last node, if any; O(n)
    pub fn tail_node(&self) -> Option<&Node> {
        let mut current = self.head.as_deref()?;
        while let Some(next) = current.next.as_deref() {
            current = next;
        }
        Some(current)
    }

    /// Value stored at the head
    pub fn front(&self) -> Option<i32> {
        self.head_node().map(Node::data)
    }

    /// Value stored at the tail; O(n)
    pub fn back(&self) -> Option<i32> {
        self.tail_node().map(Node::data)
    }

    /// Iterate over the stored values from head to tail
    ///
    /// The iterator borrows the list, so the sequence cannot change while it is
    /// being walked and a fresh call always starts again from the head.
    pub fn iter(&self) -> Iter<'_> {
        Iter::new(self.head.as_deref(), self.len)
    }

    /// Write the list as `v1 -> v2 -> NULL` followed by a newline
    pub fn print_to<W: Write + ?Sized>(&self, out: &mut W) -> io::Result<()> {
        writeln!(out, "{}", self)
    }

    /// Release every node, head to tail, and leave the list empty
    ///
    /// Each successor is detached before its predecessor is freed, so teardown
    /// runs in constant stack space whatever the length. Calling this on an empty
    /// list does nothing. Returns the number of nodes released.
    pub fn delete_list(&mut self) -> usize {
        let mut released = 0;
        let mut current = self.head.take();
        while let Some(mut node) = current {
            current = node.next.take();
            released += 1;
        }
        self.len = 0;
        if released > 0 {
            log::debug!("released {} list nodes", released);
        }
        released
    }

    /// Alias for [`LinkedList::delete_list`]
    pub fn clear(&mut self) -> usize {
        self.delete_list()
    }
}

impl<A: NodeAllocator> Drop for LinkedList<A> {
    fn drop(&mut self) {
        self.delete_list();
    }
}

impl<A: NodeAllocator> fmt::Display for LinkedList<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for value in self.iter() {
            write!(f, "{} -> ", value)?;
        }
        write!(f, "NULL")
    }
}

impl<A: NodeAllocator> fmt::Debug for LinkedList<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<'a, A: NodeAllocator> IntoIterator for &'a LinkedList<A> {
    type Item = i32;
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<A: NodeAllocator> IntoIterator for LinkedList<A> {
    type Item = i32;
    type IntoIter = IntoIter<A>;

    fn into_iter(self) -> Self::IntoIter {
        IntoIter { list: self }
    }
}
