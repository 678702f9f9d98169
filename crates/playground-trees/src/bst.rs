//! Binary search tree engine.
//!
//! Nodes live in an arena and refer to their children by index, so snapshots
//! can be cloned freely without aliasing. Deleted slots go on a free list and
//! are reused by later inserts.
//!
//! Keys are unique: inserting a value that is already present is a no-op,
//! and deleting a value that is absent is a no-op.

use crate::layout::{Children, TreeShape};

/// Index of a node in the arena.
pub type NodeIndex = usize;

#[derive(Debug, Clone, PartialEq, Eq)]
struct BstNode {
    value: i64,
    left: Option<NodeIndex>,
    right: Option<NodeIndex>,
}

/// Outcome of a search: whether the key was found and every value compared
/// against on the way down.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SearchTrace {
    pub target: i64,
    pub found: bool,
    /// Visited node values, root first.
    pub path: Vec<i64>,
}

/// Arena-backed binary search tree over `i64` keys.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Bst {
    nodes: Vec<BstNode>,
    free: Vec<NodeIndex>,
    root: Option<NodeIndex>,
    len: usize,
}

impl Bst {
    /// Create an empty tree.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a tree by inserting values in order.
    pub fn from_values<I: IntoIterator<Item = i64>>(values: I) -> Self {
        let mut tree = Self::new();
        for v in values {
            tree.insert(v);
        }
        tree
    }

    /// Number of keys in the tree.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Value at the root.
    pub fn root_value(&self) -> Option<i64> {
        self.root.map(|i| self.nodes[i].value)
    }

    /// Insert a key. Returns false (and changes nothing) if it was present.
    pub fn insert(&mut self, value: i64) -> bool {
        let Some(mut current) = self.root else {
            self.root = Some(self.alloc(value));
            self.len += 1;
            return true;
        };

        loop {
            let node = &self.nodes[current];
            let next = if value < node.value {
                node.left
            } else if value > node.value {
                node.right
            } else {
                tracing::trace!(value, "duplicate key ignored");
                return false;
            };

            match next {
                Some(child) => current = child,
                None => {
                    let leaf = self.alloc(value);
                    let parent = &mut self.nodes[current];
                    if value < parent.value {
                        parent.left = Some(leaf);
                    } else {
                        parent.right = Some(leaf);
                    }
                    self.len += 1;
                    return true;
                }
            }
        }
    }

    /// Look up a key, recording the values compared on the way.
    pub fn search(&self, value: i64) -> SearchTrace {
        let mut path = Vec::new();
        let mut current = self.root;

        while let Some(i) = current {
            let node = &self.nodes[i];
            path.push(node.value);
            if value == node.value {
                return SearchTrace { target: value, found: true, path };
            }
            current = if value < node.value { node.left } else { node.right };
        }

        SearchTrace { target: value, found: false, path }
    }

    pub fn contains(&self, value: i64) -> bool {
        self.search(value).found
    }

    /// Remove a key. Returns false if it was not present.
    ///
    /// A node with two children takes the value of its in-order successor
    /// (the minimum of its right subtree), and the successor is then removed
    /// from that subtree.
    pub fn delete(&mut self, value: i64) -> bool {
        let mut link = Link::Root;
        let mut current = self.root;
        let target = loop {
            let Some(i) = current else {
                return false;
            };
            let node = &self.nodes[i];
            if value < node.value {
                link = Link::Left(i);
                current = node.left;
            } else if value > node.value {
                link = Link::Right(i);
                current = node.right;
            } else {
                break i;
            }
        };

        match (self.nodes[target].left, self.nodes[target].right) {
            (None, child) | (child, None) => {
                self.relink(link, child);
                self.release(target);
            }
            (Some(_), Some(right)) => {
                // The successor has no left child, so its right child takes
                // its place.
                let mut successor_link = Link::Right(target);
                let mut successor = right;
                while let Some(left) = self.nodes[successor].left {
                    successor_link = Link::Left(successor);
                    successor = left;
                }
                self.nodes[target].value = self.nodes[successor].value;
                let child = self.nodes[successor].right;
                self.relink(successor_link, child);
                self.release(successor);
            }
        }
        self.len -= 1;
        true
    }

    /// Drop every node.
    pub fn clear(&mut self) {
        self.nodes.clear();
        self.free.clear();
        self.root = None;
        self.len = 0;
    }

    /// Smallest key.
    pub fn min(&self) -> Option<i64> {
        self.root.map(|i| self.nodes[self.min_index(i)].value)
    }

    /// Largest key.
    pub fn max(&self) -> Option<i64> {
        let mut current = self.root?;
        while let Some(right) = self.nodes[current].right {
            current = right;
        }
        Some(self.nodes[current].value)
    }

    /// Number of levels (0 for an empty tree).
    pub fn height(&self) -> usize {
        let mut height = 0;
        let mut stack: Vec<(NodeIndex, usize)> = self.root.map(|r| (r, 1)).into_iter().collect();
        while let Some((i, depth)) = stack.pop() {
            height = height.max(depth);
            let node = &self.nodes[i];
            stack.extend(node.left.map(|l| (l, depth + 1)));
            stack.extend(node.right.map(|r| (r, depth + 1)));
        }
        height
    }

    /// Keys in ascending order.
    pub fn in_order(&self) -> Vec<i64> {
        let mut out = Vec::with_capacity(self.len);
        let mut stack = Vec::new();
        let mut current = self.root;

        while current.is_some() || !stack.is_empty() {
            while let Some(i) = current {
                stack.push(i);
                current = self.nodes[i].left;
            }
            if let Some(i) = stack.pop() {
                out.push(self.nodes[i].value);
                current = self.nodes[i].right;
            }
        }
        out
    }

    /// Keys in root-first order (re-inserting them rebuilds the same shape).
    pub fn pre_order(&self) -> Vec<i64> {
        let mut out = Vec::with_capacity(self.len);
        let mut stack: Vec<NodeIndex> = self.root.into_iter().collect();
        while let Some(i) = stack.pop() {
            let node = &self.nodes[i];
            out.push(node.value);
            stack.extend(node.right);
            stack.extend(node.left);
        }
        out
    }

    fn alloc(&mut self, value: i64) -> NodeIndex {
        let node = BstNode { value, left: None, right: None };
        match self.free.pop() {
            Some(i) => {
                self.nodes[i] = node;
                i
            }
            None => {
                self.nodes.push(node);
                self.nodes.len() - 1
            }
        }
    }

    fn release(&mut self, index: NodeIndex) {
        self.free.push(index);
    }

    fn min_index(&self, mut index: NodeIndex) -> NodeIndex {
        while let Some(left) = self.nodes[index].left {
            index = left;
        }
        index
    }

    fn relink(&mut self, link: Link, child: Option<NodeIndex>) {
        match link {
            Link::Root => self.root = child,
            Link::Left(parent) => self.nodes[parent].left = child,
            Link::Right(parent) => self.nodes[parent].right = child,
        }
    }
}

/// The slot that points at a node: the root, or one side of its parent.
#[derive(Debug, Clone, Copy)]
enum Link {
    Root,
    Left(NodeIndex),
    Right(NodeIndex),
}

impl TreeShape for Bst {
    fn root(&self) -> Option<usize> {
        self.root
    }

    fn label(&self, node: usize) -> i64 {
        self.nodes[node].value
    }

    fn children(&self, node: usize) -> Children {
        let n = &self.nodes[node];
        Children::Binary(n.left, n.right)
    }
}
