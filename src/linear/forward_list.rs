use crate::error::{Error, Result};

use std::fmt;

type Link<T> = Option<Box<Node<T>>>;

struct Node<T> {
    element: T,
    next: Link<T>,
}

/// A singly linked list.
///
/// Only the head is reachable directly, so operations at the back of the
/// list (`push_back`, `pop_back`, `back`) walk the whole list.
///
/// # Examples
///
/// ```rust
/// use dsbench::linear::ForwardList;
///
/// let mut list: ForwardList<i32> = [1, 3].into_iter().collect();
/// list.insert_before(1, 2).unwrap();
/// list.push_front(0);
///
/// assert_eq!(list.to_string(), "[0, 1, 2, 3]");
/// assert_eq!(list.reversed().to_string(), "[3, 2, 1, 0]");
/// assert_eq!(list.remove_after(2).unwrap(), 3);
/// assert_eq!(list.back().ok(), Some(&2));
/// ```
pub struct ForwardList<T> {
    head: Link<T>,
    len: usize,
}

impl<T> ForwardList<T> {
    pub fn new() -> Self {
        Self { head: None, len: 0 }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.head.is_none()
    }

    pub fn front(&self) -> Result<&T> {
        self.head
            .as_ref()
            .map(|node| &node.element)
            .ok_or(Error::Underflow)
    }

    pub fn front_mut(&mut self) -> Result<&mut T> {
        self.head
            .as_mut()
            .map(|node| &mut node.element)
            .ok_or(Error::Underflow)
    }

    pub fn back(&self) -> Result<&T> {
        self.iter().last().ok_or(Error::Underflow)
    }

    pub fn back_mut(&mut self) -> Result<&mut T> {
        match self.len.checked_sub(1) {
            Some(last) => self.at_mut(last),
            None => Err(Error::Underflow),
        }
    }

    pub fn push_front(&mut self, element: T) {
        let next = self.head.take();
        self.head = Some(Box::new(Node { element, next }));
        self.len += 1;
    }

    /// Appends an element after walking to the end of the list.
    pub fn push_back(&mut self, element: T) {
        // `len` is always a valid insertion point.
        let _ = self.insert_at(self.len, element);
    }

    pub fn pop_front(&mut self) -> Result<T> {
        if self.is_empty() {
            return Err(Error::Underflow);
        }
        self.remove_at(0)
    }

    pub fn pop_back(&mut self) -> Result<T> {
        match self.len.checked_sub(1) {
            Some(last) => self.remove_at(last),
            None => Err(Error::Underflow),
        }
    }

    /// Inserts an element so that it ends up at position `index`. `index`
    /// may equal the length (append).
    pub fn insert_before(&mut self, index: usize, element: T) -> Result<()> {
        self.insert_at(index, element)
    }

    /// Inserts an element right after the element at position `index`.
    pub fn insert_after(&mut self, index: usize, element: T) -> Result<()> {
        if index >= self.len {
            return Err(Error::OutOfRange {
                index,
                len: self.len,
            });
        }
        self.insert_at(index + 1, element)
    }

    /// Removes and returns the element just before position `index`.
    pub fn remove_before(&mut self, index: usize) -> Result<T> {
        if index == 0 || index > self.len {
            return Err(Error::OutOfRange {
                index,
                len: self.len,
            });
        }
        self.remove_at(index - 1)
    }

    /// Removes and returns the element just after position `index`.
    pub fn remove_after(&mut self, index: usize) -> Result<T> {
        self.remove_at(index.saturating_add(1))
    }

    /// Removes the first element equal to `value`. Returns `true` if an
    /// element was removed.
    pub fn remove(&mut self, value: &T) -> bool
    where
        T: PartialEq,
    {
        match self.find(value) {
            Some(index) => self.remove_at(index).is_ok(),
            None => false,
        }
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
        let len = self.len;
        self.iter().nth(index).ok_or(Error::OutOfRange { index, len })
    }

    pub fn at_mut(&mut self, index: usize) -> Result<&mut T> {
        let len = self.len;
        self.link_mut(index)?
            .as_mut()
            .map(|node| &mut node.element)
            .ok_or(Error::OutOfRange { index, len })
    }

    pub fn clear(&mut self) {
        let mut link = self.head.take();
        while let Some(mut node) = link {
            link = node.next.take();
        }
        self.len = 0;
    }

    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            node: self.head.as_deref(),
            len: self.len,
        }
    }

    /// Returns a view that displays the list from back to front.
    pub fn reversed(&self) -> Reversed<'_, T> {
        Reversed(self)
    }
}

// Private methods
impl<T> ForwardList<T> {
    /// Returns the link that holds position `index`, which may be the
    /// trailing `None` when `index` equals the length.
    fn link_mut(&mut self, index: usize) -> Result<&mut Link<T>> {
        let len = self.len;
        if index > len {
            return Err(Error::OutOfRange { index, len });
        }

        let mut link = &mut self.head;
        for _ in 0..index {
            link = match link {
                Some(node) => &mut node.next,
                None => return Err(Error::OutOfRange { index, len }),
            };
        }
        Ok(link)
    }

    fn insert_at(&mut self, index: usize, element: T) -> Result<()> {
        let link = self.link_mut(index)?;
        let next = link.take();
        *link = Some(Box::new(Node { element, next }));
        self.len += 1;
        Ok(())
    }

    fn remove_at(&mut self, index: usize) -> Result<T> {
        let len = self.len;
        let link = self.link_mut(index)?;
        let node = link.take().ok_or(Error::OutOfRange { index, len })?;
        let Node { element, next } = *node;
        *link = next;
        self.len -= 1;
        Ok(element)
    }
}

impl<T> Drop for ForwardList<T> {
    fn drop(&mut self) {
        self.clear();
    }
}

impl<T> Default for ForwardList<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone> Clone for ForwardList<T> {
    fn clone(&self) -> Self {
        self.iter().cloned().collect()
    }
}

impl<T: fmt::Debug> fmt::Debug for ForwardList<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

/// Lists the elements front to back as `[a, b, c]`.
impl<T: fmt::Display> fmt::Display for ForwardList<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_list(f, self.iter())
    }
}

/// Builds the list in iteration order without walking it for every element.
impl<T> FromIterator<T> for ForwardList<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut list = ForwardList::new();
        let mut len = 0;
        let mut link = &mut list.head;
        for element in iter {
            let node = link.insert(Box::new(Node {
                element,
                next: None,
            }));
            link = &mut node.next;
            len += 1;
        }
        list.len = len;
        list
    }
}

impl<'a, T> IntoIterator for &'a ForwardList<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// A front-to-back iterator over the elements of a `ForwardList`.
pub struct Iter<'a, T> {
    node: Option<&'a Node<T>>,
    len: usize,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        self.node.map(|node| {
            self.node = node.next.as_deref();
            self.len -= 1;
            &node.element
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.len, Some(self.len))
    }
}

impl<'a, T> ExactSizeIterator for Iter<'a, T> {}

/// Displays a `ForwardList` from back to front. See
/// [`ForwardList::reversed`].
pub struct Reversed<'a, T>(&'a ForwardList<T>);

impl<'a, T: fmt::Display> fmt::Display for Reversed<'a, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let elements: Vec<&T> = self.0.iter().collect();
        write_list(f, elements.into_iter().rev())
    }
}

fn write_list<'a, T, I>(f: &mut fmt::Formatter<'_>, elements: I) -> fmt::Result
where
    T: fmt::Display + 'a,
    I: Iterator<Item = &'a T>,
{
    write!(f, "[")?;
    for (i, element) in elements.enumerate() {
        if i > 0 {
            write!(f, ", ")?;
        }
        write!(f, "{element}")?;
    }
    write!(f, "]")
}
