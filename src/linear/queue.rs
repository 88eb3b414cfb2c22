use super::LinkedList;
use crate::error::Result;

use std::fmt;

/// A first-in first-out queue backed by a [`LinkedList`][list].
///
/// [list]: ./struct.LinkedList.html
pub struct Queue<T> {
    list: LinkedList<T>,
}

impl<T> Queue<T> {
    pub fn new() -> Self {
        Self {
            list: LinkedList::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.list.len()
    }

    pub fn is_empty(&self) -> bool {
        self.list.is_empty()
    }

    /// Adds an element at the back of the queue.
    pub fn enqueue(&mut self, value: T) {
        self.list.push_back(value);
    }

    /// Removes and returns the element at the front of the queue.
    ///
    /// Fails with `Underflow` when the queue is empty.
    pub fn dequeue(&mut self) -> Result<T> {
        self.list.pop_front()
    }

    pub fn front(&self) -> Result<&T> {
        self.list.front()
    }

    pub fn back(&self) -> Result<&T> {
        self.list.back()
    }

    /// Returns the position of the first element equal to `value`, counted
    /// from the front.
    pub fn find(&self, value: &T) -> Option<usize>
    where
        T: PartialEq,
    {
        self.list.find(value)
    }

    pub fn contains(&self, value: &T) -> bool
    where
        T: PartialEq,
    {
        self.list.contains(value)
    }

    pub fn clear(&mut self) {
        self.list.clear();
    }

    pub fn iter(&self) -> super::linked_list::Iter<'_, T> {
        self.list.iter()
    }
}

impl<T> Default for Queue<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone> Clone for Queue<T> {
    fn clone(&self) -> Self {
        Self {
            list: self.list.clone(),
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for Queue<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.list.iter()).finish()
    }
}

impl<T> FromIterator<T> for Queue<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self {
            list: iter.into_iter().collect(),
        }
    }
}
