//! Sequential containers: a growable array, singly and doubly linked lists,
//! and the queue and stack built on top of them.

pub mod array;
pub mod forward_list;
pub mod linked_list;
pub mod queue;
pub mod stack;

pub use array::Array;
pub use forward_list::ForwardList;
pub use linked_list::LinkedList;
pub use queue::Queue;
pub use stack::Stack;
