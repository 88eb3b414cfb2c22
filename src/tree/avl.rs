use crate::linear::{Array, Queue, Stack};

use std::{cmp::Ordering, fmt};

type Link<T> = Option<Box<Node<T>>>;

#[derive(Clone)]
struct Node<T> {
    key: T,
    left: Link<T>,
    right: Link<T>,
    height: u32,
}

impl<T> Node<T> {
    fn leaf(key: T) -> Box<Self> {
        Box::new(Self {
            key,
            left: None,
            right: None,
            height: 1,
        })
    }

    #[inline]
    fn update_height(&mut self) {
        self.height = 1 + height(&self.left).max(height(&self.right));
    }

    #[inline]
    fn balance(&self) -> i64 {
        height(&self.left) as i64 - height(&self.right) as i64
    }
}

#[inline]
fn height<T>(link: &Link<T>) -> u32 {
    link.as_ref().map_or(0, |node| node.height)
}

/// A self-balancing binary search tree.
///
/// After every insertion and removal, the heights of the two subtrees of any
/// node differ by at most one, so lookups take `O(log n)` steps. Keys are
/// unique; inserting a key that is already present does nothing.
///
/// # Examples
///
/// ```rust
/// use dsbench::tree::AvlTree;
///
/// let mut tree = AvlTree::new();
/// for key in [30, 20, 40, 10, 5] {
///     tree.insert(key);
/// }
///
/// assert_eq!(tree.size(), 5);
/// assert_eq!(tree.height(), 3);
/// assert_eq!(tree.in_order().as_slice(), &[5, 10, 20, 30, 40]);
///
/// assert!(tree.remove(&30));
/// assert!(!tree.contains(&30));
/// ```
pub struct AvlTree<T> {
    root: Link<T>,
}

impl<T> AvlTree<T> {
    pub fn new() -> Self {
        Self { root: None }
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Counts the keys by walking the whole tree.
    pub fn size(&self) -> usize {
        self.iter().count()
    }

    /// Returns the number of nodes on the longest root-to-leaf path (zero for
    /// an empty tree).
    pub fn height(&self) -> usize {
        height(&self.root) as usize
    }

    pub fn clear(&mut self) {
        self.root = None;
    }

    /// Iterates over the keys in ascending order.
    pub fn iter(&self) -> Iter<'_, T> {
        Iter::new(self.root.as_deref())
    }

    /// Returns the keys in ascending order.
    pub fn in_order(&self) -> Array<T>
    where
        T: Clone,
    {
        self.iter().cloned().collect()
    }

    /// Returns the keys level by level, each level from left to right.
    pub fn breadth_first(&self) -> Array<&T> {
        let mut keys = Array::new();
        let mut queue = Queue::new();
        if let Some(root) = self.root.as_deref() {
            queue.enqueue(root);
        }
        while let Ok(node) = queue.dequeue() {
            keys.push_back(&node.key);
            if let Some(left) = node.left.as_deref() {
                queue.enqueue(left);
            }
            if let Some(right) = node.right.as_deref() {
                queue.enqueue(right);
            }
        }
        keys
    }

    /// Recomputes every subtree height and returns `true` if the cached
    /// heights are accurate and no node is out of balance.
    pub fn is_balanced(&self) -> bool {
        fn checked_height<T>(link: &Link<T>) -> Option<u32> {
            match link {
                None => Some(0),
                Some(node) => {
                    let left = checked_height(&node.left)?;
                    let right = checked_height(&node.right)?;
                    let height = 1 + left.max(right);
                    (left.abs_diff(right) <= 1 && node.height == height).then_some(height)
                }
            }
        }
        checked_height(&self.root).is_some()
    }
}

impl<T: Ord> AvlTree<T> {
    /// Inserts `key`. Returns `false`, leaving the tree untouched, if an
    /// equal key is already present.
    pub fn insert(&mut self, key: T) -> bool {
        let (root, inserted) = insert(self.root.take(), key);
        self.root = Some(root);
        inserted
    }

    /// Removes `key`. Returns `false` if it was not present.
    pub fn remove(&mut self, key: &T) -> bool {
        let (root, removed) = remove(self.root.take(), key);
        self.root = root;
        removed
    }

    pub fn contains(&self, key: &T) -> bool {
        let mut link = self.root.as_deref();
        while let Some(node) = link {
            link = match key.cmp(&node.key) {
                Ordering::Less => node.left.as_deref(),
                Ordering::Greater => node.right.as_deref(),
                Ordering::Equal => return true,
            };
        }
        false
    }
}

fn insert<T: Ord>(link: Link<T>, key: T) -> (Box<Node<T>>, bool) {
    let mut node = match link {
        Some(node) => node,
        None => return (Node::leaf(key), true),
    };

    let inserted = match key.cmp(&node.key) {
        Ordering::Less => {
            let (child, inserted) = insert(node.left.take(), key);
            node.left = Some(child);
            inserted
        }
        Ordering::Greater => {
            let (child, inserted) = insert(node.right.take(), key);
            node.right = Some(child);
            inserted
        }
        Ordering::Equal => return (node, false),
    };

    (rebalance(node), inserted)
}

fn remove<T: Ord>(link: Link<T>, key: &T) -> (Link<T>, bool) {
    let mut node = match link {
        Some(node) => node,
        None => return (None, false),
    };

    let removed = match key.cmp(&node.key) {
        Ordering::Less => {
            let (child, removed) = remove(node.left.take(), key);
            node.left = child;
            removed
        }
        Ordering::Greater => {
            let (child, removed) = remove(node.right.take(), key);
            node.right = child;
            removed
        }
        Ordering::Equal => {
            let replacement = match (node.left.take(), node.right.take()) {
                (None, None) => None,
                (Some(child), None) | (None, Some(child)) => Some(child),
                (Some(left), Some(right)) => {
                    // The in-order successor takes the place of the node.
                    let (rest, mut successor) = take_min(right);
                    successor.left = Some(left);
                    successor.right = rest;
                    Some(rebalance(successor))
                }
            };
            return (replacement, true);
        }
    };

    (Some(rebalance(node)), removed)
}

/// Detaches the leftmost node of the subtree. Returns the rebalanced rest of
/// the subtree and the detached node.
fn take_min<T>(mut node: Box<Node<T>>) -> (Link<T>, Box<Node<T>>) {
    match node.left.take() {
        None => (node.right.take(), node),
        Some(left) => {
            let (rest, min) = take_min(left);
            node.left = rest;
            (Some(rebalance(node)), min)
        }
    }
}

fn rebalance<T>(mut node: Box<Node<T>>) -> Box<Node<T>> {
    node.update_height();
    let balance = node.balance();

    if balance > 1 {
        if node.left.as_ref().map_or(0, |left| left.balance()) < 0 {
            node.left = node.left.take().map(rotate_left);
        }
        return rotate_right(node);
    }

    if balance < -1 {
        if node.right.as_ref().map_or(0, |right| right.balance()) > 0 {
            node.right = node.right.take().map(rotate_right);
        }
        return rotate_left(node);
    }

    node
}

fn rotate_right<T>(mut node: Box<Node<T>>) -> Box<Node<T>> {
    match node.left.take() {
        Some(mut pivot) => {
            node.left = pivot.right.take();
            node.update_height();
            pivot.right = Some(node);
            pivot.update_height();
            pivot
        }
        None => node,
    }
}

fn rotate_left<T>(mut node: Box<Node<T>>) -> Box<Node<T>> {
    match node.right.take() {
        Some(mut pivot) => {
            node.right = pivot.left.take();
            node.update_height();
            pivot.left = Some(node);
            pivot.update_height();
            pivot
        }
        None => node,
    }
}

impl<T> Default for AvlTree<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone> Clone for AvlTree<T> {
    fn clone(&self) -> Self {
        Self {
            root: self.root.clone(),
        }
    }
}

impl<T: Ord> FromIterator<T> for AvlTree<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut tree = AvlTree::new();
        for key in iter {
            tree.insert(key);
        }
        tree
    }
}

impl<T: fmt::Debug> fmt::Debug for AvlTree<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

/// Prints the keys in ascending order, separated by spaces.
impl<T: fmt::Display> fmt::Display for AvlTree<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, key) in self.iter().enumerate() {
            if i > 0 {
                write!(f, " ")?;
            }
            write!(f, "{key}")?;
        }
        Ok(())
    }
}

/// An in-order iterator over the keys of an `AvlTree`.
pub struct Iter<'a, T> {
    pending: Stack<&'a Node<T>>,
}

impl<'a, T> Iter<'a, T> {
    fn new(root: Option<&'a Node<T>>) -> Self {
        let mut iter = Self {
            pending: Stack::new(),
        };
        iter.push_left_spine(root);
        iter
    }

    fn push_left_spine(&mut self, mut link: Option<&'a Node<T>>) {
        while let Some(node) = link {
            self.pending.push(node);
            link = node.left.as_deref();
        }
    }
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.pending.pop().ok()?;
        self.push_left_spine(node.right.as_deref());
        Some(&node.key)
    }
}

impl<'a, T> IntoIterator for &'a AvlTree<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::AvlTree;

    fn level_order(tree: &AvlTree<i32>) -> Vec<i32> {
        tree.breadth_first().into_iter().copied().collect()
    }

    #[test]
    fn insert_without_rotation() {
        let mut tree = AvlTree::new();
        for key in [30, 20, 40, 10] {
            assert!(tree.insert(key));
        }
        assert_eq!(tree.size(), 4);
        assert_eq!(tree.height(), 3);
        assert!(tree.is_balanced());
        assert_eq!(tree.in_order().as_slice(), &[10, 20, 30, 40]);
        assert_eq!(level_order(&tree), vec![30, 20, 40, 10]);
        for key in [10, 20, 30, 40] {
            assert!(tree.contains(&key));
        }
    }

    #[test]
    fn duplicate_is_ignored() {
        let mut tree = AvlTree::new();
        assert!(tree.insert(1));
        assert!(!tree.insert(1));
        assert_eq!(tree.size(), 1);
    }

    #[test]
    fn single_rotations() {
        // Left-left
        let tree: AvlTree<i32> = [30, 20, 10].into_iter().collect();
        assert_eq!(level_order(&tree), vec![20, 10, 30]);

        // Right-right
        let tree: AvlTree<i32> = [10, 20, 30].into_iter().collect();
        assert_eq!(level_order(&tree), vec![20, 10, 30]);
    }

    #[test]
    fn double_rotations() {
        // Left-right
        let tree: AvlTree<i32> = [30, 10, 20].into_iter().collect();
        assert_eq!(level_order(&tree), vec![20, 10, 30]);

        // Right-left
        let tree: AvlTree<i32> = [10, 30, 20].into_iter().collect();
        assert_eq!(level_order(&tree), vec![20, 10, 30]);
    }

    #[test]
    fn remove_cases() {
        let mut tree: AvlTree<i32> = [50, 30, 70, 20, 40, 60, 80, 10].into_iter().collect();
        assert_eq!(level_order(&tree), vec![50, 30, 70, 20, 40, 60, 80, 10]);

        // Leaf
        assert!(tree.remove(&10));
        // One child
        assert!(tree.insert(65));
        assert!(tree.remove(&60));
        assert_eq!(level_order(&tree), vec![50, 30, 70, 20, 40, 65, 80]);

        // Two children: 50 is replaced by its successor 65.
        assert!(tree.remove(&50));
        assert_eq!(level_order(&tree), vec![65, 30, 70, 20, 40, 80]);

        assert!(!tree.remove(&50));
        assert!(tree.is_balanced());
        assert_eq!(tree.in_order().as_slice(), &[20, 30, 40, 65, 70, 80]);
    }

    #[test]
    fn remove_rebalances() {
        let mut tree: AvlTree<i32> = [20, 10, 30, 40].into_iter().collect();
        assert!(tree.remove(&10));
        // 20 became right-heavy by two; a left rotation lifts 30.
        assert_eq!(level_order(&tree), vec![30, 20, 40]);
        assert!(tree.is_balanced());

        let mut tree: AvlTree<i32> = [20, 10, 30, 25].into_iter().collect();
        assert!(tree.remove(&10));
        // Right-left case.
        assert_eq!(level_order(&tree), vec![25, 20, 30]);
    }

    #[test]
    fn ascending_inserts_stay_balanced() {
        let mut tree = AvlTree::new();
        for key in 0..1024 {
            tree.insert(key);
        }
        assert!(tree.is_balanced());
        assert_eq!(tree.height(), 11);
        assert_eq!(tree.size(), 1024);

        for key in (0..1024).step_by(2) {
            assert!(tree.remove(&key));
        }
        assert!(tree.is_balanced());
        assert_eq!(tree.size(), 512);
        assert!(tree.iter().copied().eq((1..1024).step_by(2)));
    }

    #[test]
    fn display_and_clone() {
        let tree: AvlTree<String> = ["b", "a", "c"].into_iter().map(String::from).collect();
        let mut copy = tree.clone();
        copy.insert("d".to_string());

        assert_eq!(tree.to_string(), "a b c");
        assert_eq!(copy.to_string(), "a b c d");

        copy.clear();
        assert!(copy.is_empty());
        assert_eq!(copy.height(), 0);
    }
}
