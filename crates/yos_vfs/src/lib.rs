//! Virtual filesystem for the terminal session.
//!
//! A fixed tree of directories and files, built once and immutable for the
//! process lifetime. Only the traversal algorithm is interesting: paths are
//! resolved segment-wise against a base directory, with `..` clamped at the
//! root.

pub mod node;
pub mod resolve;
pub mod tree;

pub use node::{Node, NodeKind};
pub use resolve::{join_path, list, read, resolve, VfsError};
pub use tree::portfolio_tree;
