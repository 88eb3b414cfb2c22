//! Ordered containers.

pub mod avl;

pub use avl::AvlTree;
