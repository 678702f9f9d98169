//! Playground Trees
//!
//! Tree engines behind the BST and recursion pages.
//!
//! - [`Bst`]: insert / search-with-path / delete / clear over unique `i64`
//!   keys, arena-backed so snapshots never alias
//! - [`RecursionTree`]: the complete, un-memoised call tree of Fibonacci or
//!   factorial for inputs up to [`MAX_INPUT`]
//! - [`layout`]: positions for drawing either tree, computed on the side

mod bst;
mod error;
mod layout;
mod recursion;

pub use bst::{Bst, NodeIndex, SearchTrace};
pub use error::{Error, Result};
pub use layout::{layout, Children, LayoutConfig, PlacedNode, TreeShape};
pub use recursion::{CallNode, RecursionKind, RecursionTree, MAX_INPUT};
