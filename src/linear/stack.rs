use super::Array;
use crate::error::{Error, Result};

use std::fmt;

/// A last-in first-out stack backed by an [`Array`][array].
///
/// Positions reported by [`find`](#method.find) and accepted by
/// [`at`](#method.at) are counted from the top, so position zero is the most
/// recently pushed element.
///
/// [array]: ./struct.Array.html
pub struct Stack<T> {
    items: Array<T>,
}

impl<T> Stack<T> {
    pub fn new() -> Self {
        Self {
            items: Array::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn push(&mut self, value: T) {
        self.items.push_back(value);
    }

    /// Removes and returns the top element.
    ///
    /// Fails with `Underflow` when the stack is empty.
    pub fn pop(&mut self) -> Result<T> {
        self.items.pop_back()
    }

    pub fn top(&self) -> Result<&T> {
        self.items.back()
    }

    /// Returns the element `index` positions below the top.
    pub fn at(&self, index: usize) -> Result<&T> {
        let len = self.items.len();
        if index >= len {
            return Err(Error::OutOfRange { index, len });
        }
        self.items.at(len - 1 - index)
    }

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
        self.items.find(value).is_some()
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Iterates from the top of the stack to the bottom.
    pub fn iter(&self) -> std::iter::Rev<std::slice::Iter<'_, T>> {
        self.items.iter().rev()
    }
}

impl<T> Default for Stack<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone> Clone for Stack<T> {
    fn clone(&self) -> Self {
        Self {
            items: self.items.clone(),
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for Stack<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::Stack;
    use crate::error::Error;

    #[test]
    fn lifo_order() {
        let mut stack = Stack::new();
        stack.push('a');
        stack.push('b');
        stack.push('c');
        assert_eq!(stack.top().unwrap(), &'c');
        assert_eq!(stack.pop().unwrap(), 'c');
        assert_eq!(stack.pop().unwrap(), 'b');
        assert_eq!(stack.len(), 1);
        assert_eq!(stack.pop().unwrap(), 'a');
        assert!(matches!(stack.pop(), Err(Error::Underflow)));
        assert!(matches!(stack.top(), Err(Error::Underflow)));
    }

    #[test]
    fn positions_count_from_top() {
        let mut stack = Stack::new();
        for i in 0..4 {
            stack.push(i);
        }
        assert_eq!(stack.at(0).unwrap(), &3);
        assert_eq!(stack.at(3).unwrap(), &0);
        assert!(matches!(
            stack.at(4),
            Err(Error::OutOfRange { index: 4, len: 4 })
        ));
        assert_eq!(stack.find(&3), Some(0));
        assert_eq!(stack.find(&0), Some(3));
        assert!(stack.contains(&2));
        assert_eq!(stack.iter().copied().collect::<Vec<_>>(), [3, 2, 1, 0]);
    }
}
