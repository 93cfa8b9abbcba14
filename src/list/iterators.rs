//! Iterator types for linked lists

use super::{LinkedList, Node, NodeAllocator};
use std::iter::FusedIterator;

/// Borrowing iterator over list values, head to tail
///
/// Created by [`LinkedList::iter`]. Walking the list never mutates it.
#[derive(Clone)]
pub struct Iter<'a> {
    next: Option<&'a Node>,
    remaining: usize,
}

impl<'a> Iter<'a> {
    pub(super) fn new(head: Option<&'a Node>, len: usize) -> Self {
        Iter {
            next: head,
            remaining: len,
        }
    }
}

impl<'a> Iterator for Iter<'a> {
    type Item = i32;

    fn next(&mut self) -> Option<Self::Item> {
        self.next.map(|node| {
            self.next = node.next.as_deref();
            self.remaining -= 1;
            node.data
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl ExactSizeIterator for Iter<'_> {}

impl FusedIterator for Iter<'_> {}

/// Consuming iterator; each node is released as its value is yielded
pub struct IntoIter<A: NodeAllocator> {
    pub(super) list: LinkedList<A>,
}

impl<A: NodeAllocator> Iterator for IntoIter<A> {
    type Item = i32;

    fn next(&mut self) -> Option<Self::Item> {
        self.list.pop_front()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.list.len(), Some(self.list.len()))
    }
}

impl<A: NodeAllocator> ExactSizeIterator for IntoIter<A> {}

impl<A: NodeAllocator> FusedIterator for IntoIter<A> {}
