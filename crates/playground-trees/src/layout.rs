//! Layout pass for rendering trees.
//!
//! Positions are computed into a separate list and never stored in the tree
//! itself. Each level sits `level_gap` below its parent; binary children are
//! placed `offset` to the left and right, and the offset is multiplied by
//! `offset_decay` at every level. A chain child (single-child recursion)
//! sits directly below its parent.

/// How a node's children are arranged.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Children {
    /// Left and right slots, either of which may be empty.
    Binary(Option<usize>, Option<usize>),
    /// A single child drawn straight below.
    Chain(usize),
    /// No children.
    Leaf,
}

/// A tree that can be laid out.
pub trait TreeShape {
    /// Root node, if any.
    fn root(&self) -> Option<usize>;
    /// Value printed inside the node.
    fn label(&self, node: usize) -> i64;
    /// Children of a node.
    fn children(&self, node: usize) -> Children;
}

/// Layout geometry.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LayoutConfig {
    pub root_x: f64,
    pub root_y: f64,
    pub level_gap: f64,
    pub initial_offset: f64,
    pub offset_decay: f64,
}

impl LayoutConfig {
    /// Geometry used for the BST page.
    pub const BST: Self = Self {
        root_x: 400.0,
        root_y: 50.0,
        level_gap: 80.0,
        initial_offset: 150.0,
        offset_decay: 0.5,
    };

    /// Geometry for two-child recursion trees (Fibonacci).
    pub const BRANCHING: Self = Self {
        root_x: 400.0,
        root_y: 50.0,
        level_gap: 100.0,
        initial_offset: 150.0,
        offset_decay: 0.7,
    };

    /// Geometry for single-child recursion chains (factorial).
    pub const CHAIN: Self = Self {
        root_x: 400.0,
        root_y: 50.0,
        level_gap: 100.0,
        initial_offset: 100.0,
        offset_decay: 0.7,
    };
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self::BST
    }
}

/// A node with its computed position.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PlacedNode {
    pub node: usize,
    pub label: i64,
    pub x: f64,
    pub y: f64,
    pub depth: usize,
    /// Arena index of the parent (for drawing the connecting edge).
    pub parent: Option<usize>,
}

/// Compute positions for every node, in pre-order.
pub fn layout<T: TreeShape + ?Sized>(tree: &T, config: &LayoutConfig) -> Vec<PlacedNode> {
    let mut placed = Vec::new();
    let Some(root) = tree.root() else {
        return placed;
    };

    // (node, parent, x, y, offset, depth)
    let mut stack = vec![(root, None, config.root_x, config.root_y, config.initial_offset, 0)];
    while let Some((node, parent, x, y, offset, depth)) = stack.pop() {
        placed.push(PlacedNode {
            node,
            label: tree.label(node),
            x,
            y,
            depth,
            parent,
        });

        let child_y = y + config.level_gap;
        let child_offset = offset * config.offset_decay;
        match tree.children(node) {
            Children::Binary(left, right) => {
                // Right pushed first so the left subtree is emitted first.
                if let Some(r) = right {
                    stack.push((r, Some(node), x + offset, child_y, child_offset, depth + 1));
                }
                if let Some(l) = left {
                    stack.push((l, Some(node), x - offset, child_y, child_offset, depth + 1));
                }
            }
            Children::Chain(child) => {
                stack.push((child, Some(node), x, child_y, child_offset, depth + 1));
            }
            Children::Leaf => {}
        }
    }

    placed
}
