use crate::{
    error::Result,
    hash::{DoubleHashingSet, LinearProbingHashMap, SeparateChainingHashMap},
    linear::{Array, ForwardList, LinkedList, Queue, Stack},
    tree::AvlTree,
};

/// The operations the benchmark runner drives a structure through.
///
/// Maps store `value + 1` alongside every key. Queues and stacks can only
/// remove at one end, so `remove` takes the front of a queue or the top of a
/// stack whatever `value` is.
pub trait BenchTarget {
    /// Adds `value` to the structure.
    fn push_back(&mut self, value: i32) -> Result<()>;

    fn find(&self, value: &i32) -> bool;

    fn remove(&mut self, value: &i32) -> Result<()>;

    /// Returns the element at `index` in the structure's iteration order.
    fn at(&self, index: usize) -> Option<i32>;
}

impl BenchTarget for Array<i32> {
    fn push_back(&mut self, value: i32) -> Result<()> {
        Array::push_back(self, value);
        Ok(())
    }

    fn find(&self, value: &i32) -> bool {
        Array::find(self, value).is_some()
    }

    fn remove(&mut self, value: &i32) -> Result<()> {
        Array::remove(self, value);
        Ok(())
    }

    fn at(&self, index: usize) -> Option<i32> {
        Array::at(self, index).ok().copied()
    }
}

impl BenchTarget for ForwardList<i32> {
    fn push_back(&mut self, value: i32) -> Result<()> {
        ForwardList::push_back(self, value);
        Ok(())
    }

    fn find(&self, value: &i32) -> bool {
        self.contains(value)
    }

    fn remove(&mut self, value: &i32) -> Result<()> {
        ForwardList::remove(self, value);
        Ok(())
    }

    fn at(&self, index: usize) -> Option<i32> {
        ForwardList::at(self, index).ok().copied()
    }
}

impl BenchTarget for LinkedList<i32> {
    fn push_back(&mut self, value: i32) -> Result<()> {
        LinkedList::push_back(self, value);
        Ok(())
    }

    fn find(&self, value: &i32) -> bool {
        self.contains(value)
    }

    fn remove(&mut self, value: &i32) -> Result<()> {
        LinkedList::remove(self, value);
        Ok(())
    }

    fn at(&self, index: usize) -> Option<i32> {
        LinkedList::at(self, index).ok().copied()
    }
}

impl BenchTarget for Queue<i32> {
    fn push_back(&mut self, value: i32) -> Result<()> {
        self.enqueue(value);
        Ok(())
    }

    fn find(&self, value: &i32) -> bool {
        self.contains(value)
    }

    fn remove(&mut self, _value: &i32) -> Result<()> {
        self.dequeue().map(drop)
    }

    fn at(&self, index: usize) -> Option<i32> {
        self.iter().nth(index).copied()
    }
}

impl BenchTarget for Stack<i32> {
    fn push_back(&mut self, value: i32) -> Result<()> {
        self.push(value);
        Ok(())
    }

    fn find(&self, value: &i32) -> bool {
        self.contains(value)
    }

    fn remove(&mut self, _value: &i32) -> Result<()> {
        self.pop().map(drop)
    }

    fn at(&self, index: usize) -> Option<i32> {
        Stack::at(self, index).ok().copied()
    }
}

impl BenchTarget for AvlTree<i32> {
    fn push_back(&mut self, value: i32) -> Result<()> {
        self.insert(value);
        Ok(())
    }

    fn find(&self, value: &i32) -> bool {
        self.contains(value)
    }

    fn remove(&mut self, value: &i32) -> Result<()> {
        AvlTree::remove(self, value);
        Ok(())
    }

    fn at(&self, index: usize) -> Option<i32> {
        self.iter().nth(index).copied()
    }
}

impl BenchTarget for DoubleHashingSet<i32> {
    fn push_back(&mut self, value: i32) -> Result<()> {
        self.insert(value).map(drop)
    }

    fn find(&self, value: &i32) -> bool {
        self.contains(value)
    }

    fn remove(&mut self, value: &i32) -> Result<()> {
        DoubleHashingSet::remove(self, value);
        Ok(())
    }

    fn at(&self, index: usize) -> Option<i32> {
        self.iter().nth(index).copied()
    }
}

impl BenchTarget for LinearProbingHashMap<i32, i32> {
    fn push_back(&mut self, value: i32) -> Result<()> {
        self.insert(value, value.wrapping_add(1)).map(drop)
    }

    fn find(&self, value: &i32) -> bool {
        self.contains(value)
    }

    fn remove(&mut self, value: &i32) -> Result<()> {
        LinearProbingHashMap::remove(self, value);
        Ok(())
    }

    fn at(&self, index: usize) -> Option<i32> {
        self.iter().nth(index).map(|(k, _)| *k)
    }
}

impl BenchTarget for SeparateChainingHashMap<i32, i32> {
    fn push_back(&mut self, value: i32) -> Result<()> {
        self.put(value, value.wrapping_add(1)).map(drop)
    }

    fn find(&self, value: &i32) -> bool {
        self.contains(value)
    }

    fn remove(&mut self, value: &i32) -> Result<()> {
        SeparateChainingHashMap::remove(self, value);
        Ok(())
    }

    fn at(&self, index: usize) -> Option<i32> {
        self.iter().nth(index).map(|(k, _)| *k)
    }
}
