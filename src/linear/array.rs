use crate::error::{Error, Result};

use std::{
    fmt,
    ops::{Index, IndexMut},
};

pub(crate) const DEFAULT_CAPACITY: usize = 10;

// Shrinking never goes below this many slots.
const MIN_SHRUNK_CAPACITY: usize = 10;

/// A contiguous growable array with an explicit capacity policy.
///
/// Unlike `Vec`, the capacity of an `Array` follows a fixed, observable
/// schedule so that benchmark runs are comparable:
///
/// - When a push or insert finds the array full, the capacity doubles (an
///   empty zero-capacity array grows to one slot).
/// - When a removal leaves the array at most a quarter full, the capacity
///   halves, but never below the current length nor below ten slots.
///
/// # Examples
///
/// ```rust
/// use dsbench::linear::Array;
///
/// let mut array = Array::new();
/// for i in 0..11 {
///     array.push_back(i);
/// }
/// assert_eq!(array.len(), 11);
/// assert_eq!(array.capacity(), 20);
/// assert_eq!(array.at(3).ok(), Some(&3));
/// ```
pub struct Array<T> {
    data: Vec<T>,
    capacity: usize,
}

impl<T> Array<T> {
    /// Constructs an empty array with room for ten elements.
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    /// Constructs an empty array with room for `capacity` elements.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            data: Vec::with_capacity(capacity),
            capacity,
        }
    }

    /// Constructs an array of `len` elements, each produced by calling `f`
    /// with its index. The capacity equals `len`.
    pub fn from_fn<F>(len: usize, mut f: F) -> Self
    where
        F: FnMut(usize) -> T,
    {
        let mut data = Vec::with_capacity(len);
        data.extend((0..len).map(&mut f));
        Self {
            data,
            capacity: len,
        }
    }

    /// Constructs an array holding `len` clones of `value`. The capacity equals
    /// `len`.
    pub fn filled(len: usize, value: T) -> Self
    where
        T: Clone,
    {
        Self {
            data: vec![value; len],
            capacity: len,
        }
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Returns the number of elements the array can hold before it grows.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn front(&self) -> Result<&T> {
        self.data.first().ok_or(Error::Underflow)
    }

    pub fn back(&self) -> Result<&T> {
        self.data.last().ok_or(Error::Underflow)
    }

    /// Appends an element, doubling the capacity first if the array is full.
    pub fn push_back(&mut self, value: T) {
        if self.data.len() == self.capacity {
            self.grow();
        }
        self.data.push(value);
    }

    /// Removes and returns the last element.
    ///
    /// Fails with `Underflow` when the array is empty.
    pub fn pop_back(&mut self) -> Result<T> {
        let value = self.data.pop().ok_or(Error::Underflow)?;
        self.shrink_if_sparse();
        Ok(value)
    }

    /// Inserts an element at `index`, shifting every later element one
    /// position to the right. `index` may equal the length (append).
    pub fn insert(&mut self, index: usize, value: T) -> Result<()> {
        if index > self.data.len() {
            return Err(Error::OutOfRange {
                index,
                len: self.data.len(),
            });
        }
        if self.data.len() == self.capacity {
            self.grow();
        }
        self.data.insert(index, value);
        Ok(())
    }

    /// Removes and returns the element at `index`, shifting every later
    /// element one position to the left.
    pub fn erase(&mut self, index: usize) -> Result<T> {
        if index >= self.data.len() {
            return Err(Error::OutOfRange {
                index,
                len: self.data.len(),
            });
        }
        let value = self.data.remove(index);
        self.shrink_if_sparse();
        Ok(value)
    }

    /// Drops every element and resets the capacity to ten.
    pub fn clear(&mut self) {
        self.data = Vec::with_capacity(DEFAULT_CAPACITY);
        self.capacity = DEFAULT_CAPACITY;
    }

    pub fn at(&self, index: usize) -> Result<&T> {
        let len = self.data.len();
        self.data.get(index).ok_or(Error::OutOfRange { index, len })
    }

    pub fn at_mut(&mut self, index: usize) -> Result<&mut T> {
        let len = self.data.len();
        self.data
            .get_mut(index)
            .ok_or(Error::OutOfRange { index, len })
    }

    /// Returns the index of the first element equal to `value`.
    pub fn find(&self, value: &T) -> Option<usize>
    where
        T: PartialEq,
    {
        self.data.iter().position(|v| v == value)
    }

    /// Removes the first element equal to `value`. Returns `true` if an
    /// element was removed.
    pub fn remove(&mut self, value: &T) -> bool
    where
        T: PartialEq,
    {
        match self.find(value) {
            Some(index) => self.erase(index).is_ok(),
            None => false,
        }
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.data.iter()
    }

    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, T> {
        self.data.iter_mut()
    }

    pub fn as_slice(&self) -> &[T] {
        &self.data
    }
}

// Private methods
impl<T> Array<T> {
    fn grow(&mut self) {
        let new_capacity = if self.capacity == 0 {
            1
        } else {
            self.capacity * 2
        };
        self.data.reserve_exact(new_capacity - self.data.len());
        self.capacity = new_capacity;
    }

    fn shrink_if_sparse(&mut self) {
        let len = self.data.len();
        if len == 0 || len > self.capacity / 4 {
            return;
        }

        let new_capacity = (self.capacity / 2).max(len).max(MIN_SHRUNK_CAPACITY);
        if new_capacity == self.capacity {
            return;
        }
        self.data.shrink_to(new_capacity);
        self.capacity = new_capacity;
    }
}

impl<T> Default for Array<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone> Clone for Array<T> {
    fn clone(&self) -> Self {
        let mut data = Vec::with_capacity(self.capacity);
        data.extend_from_slice(&self.data);
        Self {
            data,
            capacity: self.capacity,
        }
    }
}

impl<T: PartialEq> PartialEq for Array<T> {
    fn eq(&self, other: &Self) -> bool {
        self.data == other.data
    }
}

impl<T: Eq> Eq for Array<T> {}

impl<T: fmt::Debug> fmt::Debug for Array<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.data.iter()).finish()
    }
}

impl<T: fmt::Display> fmt::Display for Array<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for (i, value) in self.data.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{value}")?;
        }
        write!(f, "]")
    }
}

/// Unchecked indexing. Panics when `index` is out of bounds; use
/// [`Array::at`] for a checked access.
impl<T> Index<usize> for Array<T> {
    type Output = T;

    fn index(&self, index: usize) -> &T {
        &self.data[index]
    }
}

impl<T> IndexMut<usize> for Array<T> {
    fn index_mut(&mut self, index: usize) -> &mut T {
        &mut self.data[index]
    }
}

impl<T> FromIterator<T> for Array<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut array = Array::new();
        for value in iter {
            array.push_back(value);
        }
        array
    }
}

impl<T> IntoIterator for Array<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.data.into_iter()
    }
}

impl<'a, T> IntoIterator for &'a Array<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.data.iter()
    }
}
