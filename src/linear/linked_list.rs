// License and Copyright Notice:
//
// Some of the code and doc comments in this module were copied from
// `std::collections::LinkedList` in the Rust standard library.
// https://github.com/rust-lang/rust/blob/master/src/liballoc/collections/linked_list.rs
//
// The original code/comments from LinkedList are dual-licensed under
// the Apache License, Version 2.0 <https://github.com/rust-lang/rust/blob/master/LICENSE-APACHE>
// or the MIT license <https://github.com/rust-lang/rust/blob/master/LICENSE-MIT>
//
// Copyrights of the original code/comments are retained by their contributors.
// For full authorship information, see the version control history of
// https://github.com/rust-lang/rust/ or https://thanks.rust-lang.org

use crate::error::{Error, Result};

use std::{fmt, marker::PhantomData, ptr::NonNull};

struct ListNode<T> {
    next: Option<NonNull<ListNode<T>>>,
    prev: Option<NonNull<ListNode<T>>>,
    element: T,
}

impl<T> ListNode<T> {
    fn new(element: T) -> Self {
        Self {
            next: None,
            prev: None,
            element,
        }
    }
}

/// A doubly linked list owning its nodes.
///
/// Positions are zero-based and counted from the front. Every positional
/// operation walks the list, so they are `O(n)`; pushes and pops at either
/// end are `O(1)`.
pub struct LinkedList<T> {
    len: usize,
    head: Option<NonNull<ListNode<T>>>,
    tail: Option<NonNull<ListNode<T>>>,
    marker: PhantomData<Box<ListNode<T>>>,
}

impl<T> Drop for LinkedList<T> {
    fn drop(&mut self) {
        struct DropGuard<'a, T>(&'a mut LinkedList<T>);

        impl<'a, T> Drop for DropGuard<'a, T> {
            fn drop(&mut self) {
                // Continue the same loop we do below. This only runs when a destructor has
                // panicked. If another one panics this will abort.
                while self.0.pop_front_node().is_some() {}
            }
        }

        while let Some(node) = self.pop_front_node() {
            let guard = DropGuard(self);
            drop(node);
            std::mem::forget(guard);
        }
    }
}

impl<T> LinkedList<T> {
    pub fn new() -> Self {
        Self {
            len: 0,
            head: None,
            tail: None,
            marker: PhantomData,
        }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn front(&self) -> Result<&T> {
        self.head
            .map(|node| unsafe { &(*node.as_ptr()).element })
            .ok_or(Error::Underflow)
    }

    pub fn front_mut(&mut self) -> Result<&mut T> {
        self.head
            .map(|node| unsafe { &mut (*node.as_ptr()).element })
            .ok_or(Error::Underflow)
    }

    pub fn back(&self) -> Result<&T> {
        self.tail
            .map(|node| unsafe { &(*node.as_ptr()).element })
            .ok_or(Error::Underflow)
    }

    pub fn back_mut(&mut self) -> Result<&mut T> {
        self.tail
            .map(|node| unsafe { &mut (*node.as_ptr()).element })
            .ok_or(Error::Underflow)
    }

    /// Adds an element to the front of the list.
    pub fn push_front(&mut self, element: T) {
        let mut node = Box::new(ListNode::new(element));
        // This method takes care not to create mutable references to whole nodes,
        // to maintain validity of aliasing pointers into `element`.
        unsafe {
            node.prev = None;
            node.next = self.head;
            let node = NonNull::from(Box::leak(node));

            match self.head {
                None => self.tail = Some(node),
                // Not creating new mutable (unique!) references overlapping `element`.
                Some(head) => (*head.as_ptr()).prev = Some(node),
            }

            self.head = Some(node);
            self.len += 1;
        }
    }

    /// Adds an element to the back of the list.
    pub fn push_back(&mut self, element: T) {
        let mut node = Box::new(ListNode::new(element));
        // This method takes care not to create mutable references to whole nodes,
        // to maintain validity of aliasing pointers into `element`.
        unsafe {
            node.next = None;
            node.prev = self.tail;
            let node = NonNull::from(Box::leak(node));

            match self.tail {
                None => self.head = Some(node),
                // Not creating new mutable (unique!) references overlapping `element`.
                Some(tail) => (*tail.as_ptr()).next = Some(node),
            }

            self.tail = Some(node);
            self.len += 1;
        }
    }

    /// Removes and returns the element at the front of the list.
    pub fn pop_front(&mut self) -> Result<T> {
        self.pop_front_node()
            .map(|node| node.element)
            .ok_or(Error::Underflow)
    }

    /// Removes and returns the element at the back of the list.
    pub fn pop_back(&mut self) -> Result<T> {
        let tail = self.tail.ok_or(Error::Underflow)?;
        unsafe {
            self.unlink(tail);
            Ok(Box::from_raw(tail.as_ptr()).element)
        }
    }

    /// Inserts an element so that it ends up at position `index`. Inserting
    /// before position zero pushes to the front.
    pub fn insert_before(&mut self, index: usize, element: T) -> Result<()> {
        if index == 0 {
            self.push_front(element);
            return Ok(());
        }
        let at = self.node_at(index)?;
        unsafe { self.link_before(at, element) };
        Ok(())
    }

    /// Inserts an element right after the element at position `index`.
    pub fn insert_after(&mut self, index: usize, element: T) -> Result<()> {
        let at = self.node_at(index)?;
        match unsafe { at.as_ref() }.next {
            Some(next) => unsafe { self.link_before(next, element) },
            None => self.push_back(element),
        }
        Ok(())
    }

    /// Removes and returns the element just before position `index`.
    pub fn remove_before(&mut self, index: usize) -> Result<T> {
        let at = self.node_at(index)?;
        let prev = unsafe { at.as_ref() }.prev.ok_or(Error::OutOfRange {
            index,
            len: self.len,
        })?;
        unsafe {
            self.unlink(prev);
            Ok(Box::from_raw(prev.as_ptr()).element)
        }
    }

    /// Removes and returns the element just after position `index`.
    pub fn remove_after(&mut self, index: usize) -> Result<T> {
        let at = self.node_at(index)?;
        let next = unsafe { at.as_ref() }.next.ok_or(Error::OutOfRange {
            index: index + 1,
            len: self.len,
        })?;
        unsafe {
            self.unlink(next);
            Ok(Box::from_raw(next.as_ptr()).element)
        }
    }

    /// Removes the first element equal to `value`. Returns `true` if an
    /// element was removed.
    pub fn remove(&mut self, value: &T) -> bool
    where
        T: PartialEq,
    {
        let mut cursor = self.head;
        while let Some(node) = cursor {
            unsafe {
                if (*node.as_ptr()).element == *value {
                    self.unlink(node);
                    drop(Box::from_raw(node.as_ptr()));
                    return true;
                }
                cursor = (*node.as_ptr()).next;
            }
        }
        false
    }

    /// Returns the position of the first element equal to `value`.
    pub fn find(&self, value: &T) -> Option<usize>
    where
        T: PartialEq,
    {
        self.iter().position(|v| v == value)
    }

    pub fn contains(&self, value: &T) -> bool
    where
        T: PartialEq,
    {
        self.find(value).is_some()
    }

    pub fn at(&self, index: usize) -> Result<&T> {
        let node = self.node_at(index)?;
        Ok(unsafe { &(*node.as_ptr()).element })
    }

    pub fn at_mut(&mut self, index: usize) -> Result<&mut T> {
        let node = self.node_at(index)?;
        Ok(unsafe { &mut (*node.as_ptr()).element })
    }

    pub fn clear(&mut self) {
        while self.pop_front_node().is_some() {}
    }

    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            head: self.head,
            len: self.len,
            marker: PhantomData,
        }
    }
}

// Private methods
impl<T> LinkedList<T> {
    /// Removes and returns the node at the front of the list.
    fn pop_front_node(&mut self) -> Option<Box<ListNode<T>>> {
        // This method takes care not to create mutable references to whole nodes,
        // to maintain validity of aliasing pointers into `element`.
        self.head.map(|node| unsafe {
            let mut node = Box::from_raw(node.as_ptr());
            self.head = node.next;

            match self.head {
                None => self.tail = None,
                // Not creating new mutable (unique!) references overlapping `element`.
                Some(head) => (*head.as_ptr()).prev = None,
            }

            self.len -= 1;

            node.prev = None;
            node.next = None;
            node
        })
    }

    fn node_at(&self, index: usize) -> Result<NonNull<ListNode<T>>> {
        if index >= self.len {
            return Err(Error::OutOfRange {
                index,
                len: self.len,
            });
        }

        // Walk from whichever end is closer.
        let node = if index <= self.len / 2 {
            let mut node = self.head;
            for _ in 0..index {
                node = node.and_then(|n| unsafe { n.as_ref() }.next);
            }
            node
        } else {
            let mut node = self.tail;
            for _ in 0..(self.len - 1 - index) {
                node = node.and_then(|n| unsafe { n.as_ref() }.prev);
            }
            node
        };

        // The length bookkeeping guarantees the walk ends on a node.
        node.ok_or(Error::OutOfRange {
            index,
            len: self.len,
        })
    }

    /// Links a new node holding `element` right before `at`.
    unsafe fn link_before(&mut self, at: NonNull<ListNode<T>>, element: T) {
        let mut node = Box::new(ListNode::new(element));
        node.next = Some(at);
        node.prev = (*at.as_ptr()).prev;
        let node = NonNull::from(Box::leak(node));

        match (*node.as_ptr()).prev {
            Some(prev) => (*prev.as_ptr()).next = Some(node),
            // `at` was the head node.
            None => self.head = Some(node),
        }
        (*at.as_ptr()).prev = Some(node);

        self.len += 1;
    }

    /// Unlinks the specified node from the current list.
    ///
    /// This method takes care not to create mutable references to `element`, to
    /// maintain validity of aliasing pointers.
    ///
    /// IMPORTANT: This method does not drop the node. The caller must take the
    /// node back with `Box::from_raw`, otherwise the node will leak.
    unsafe fn unlink(&mut self, mut node: NonNull<ListNode<T>>) {
        let node = node.as_mut(); // this one is ours now, we can create an &mut.

        // Not creating new mutable (unique!) references overlapping `element`.
        match node.prev {
            Some(prev) => (*prev.as_ptr()).next = node.next,
            // this node is the head node
            None => self.head = node.next,
        };

        match node.next {
            Some(next) => (*next.as_ptr()).prev = node.prev,
            // this node is the tail node
            None => self.tail = node.prev,
        };

        node.prev = None;
        node.next = None;

        self.len -= 1;
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

impl<T: fmt::Debug> fmt::Debug for LinkedList<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<T> FromIterator<T> for LinkedList<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut list = LinkedList::new();
        for element in iter {
            list.push_back(element);
        }
        list
    }
}

impl<'a, T> IntoIterator for &'a LinkedList<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// A front-to-back iterator over the elements of a `LinkedList`.
pub struct Iter<'a, T> {
    head: Option<NonNull<ListNode<T>>>,
    len: usize,
    marker: PhantomData<&'a ListNode<T>>,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        if self.len == 0 {
            return None;
        }
        self.head.map(|node| unsafe {
            // Need an unbound lifetime to get 'a
            let node = &*node.as_ptr();
            self.len -= 1;
            self.head = node.next;
            &node.element
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.len, Some(self.len))
    }
}

impl<'a, T> ExactSizeIterator for Iter<'a, T> {}
