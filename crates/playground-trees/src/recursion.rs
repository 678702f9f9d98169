//! Recursion-tree builder.
//!
//! Materialises the full call tree of a naive recursive function so it can be
//! drawn. There is no memoisation: `fib(10)` produces all 177
//! calls. Inputs above [`MAX_INPUT`] are clamped to keep the tree small.
//!
//! Nodes are stored in an arena in call order (pre-order), so the root is
//! always index 0 and the tree is immutable once built.

use std::fmt;
use std::str::FromStr;

use crate::error::Error;
use crate::layout::{Children, LayoutConfig, TreeShape};

/// Largest accepted input; larger values are clamped.
pub const MAX_INPUT: u32 = 10;

/// Which recursive function to expand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum RecursionKind {
    /// fib(n) = fib(n-1) + fib(n-2), fib(n ≤ 1) = n
    Fibonacci,
    /// n! = n × (n-1)!, n ≤ 1 → 1
    Factorial,
}

impl RecursionKind {
    /// Layout geometry suited to this tree's shape.
    pub fn layout_config(&self) -> LayoutConfig {
        match self {
            RecursionKind::Fibonacci => LayoutConfig::BRANCHING,
            RecursionKind::Factorial => LayoutConfig::CHAIN,
        }
    }
}

impl fmt::Display for RecursionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecursionKind::Fibonacci => f.write_str("fibonacci"),
            RecursionKind::Factorial => f.write_str("factorial"),
        }
    }
}

impl FromStr for RecursionKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "fibonacci" | "fib" => Ok(RecursionKind::Fibonacci),
            "factorial" | "fact" => Ok(RecursionKind::Factorial),
            _ => Err(Error::UnknownAlgorithm(s.to_string())),
        }
    }
}

/// One call in the tree.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CallNode {
    /// Argument of this call
    pub input: u32,
    /// Value this call returned
    pub result: u64,
    /// Arena indices of the calls it made, in call order
    pub children: Vec<usize>,
}

impl CallNode {
    pub fn is_base_case(&self) -> bool {
        self.children.is_empty()
    }
}

/// Fully materialised call tree.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RecursionTree {
    kind: RecursionKind,
    input: u32,
    nodes: Vec<CallNode>,
}

impl RecursionTree {
    /// Expand the call tree for `kind(n)`, clamping `n` to [`MAX_INPUT`].
    pub fn build(kind: RecursionKind, n: u32) -> Self {
        let input = n.min(MAX_INPUT);
        if input != n {
            tracing::debug!(requested = n, clamped = input, "recursion input clamped");
        }

        let mut nodes = Vec::new();
        match kind {
            RecursionKind::Fibonacci => expand_fibonacci(&mut nodes, input),
            RecursionKind::Factorial => expand_factorial(&mut nodes, input),
        };

        Self { kind, input, nodes }
    }

    pub fn kind(&self) -> RecursionKind {
        self.kind
    }

    /// Input after clamping.
    pub fn input(&self) -> u32 {
        self.input
    }

    /// The root call (always index 0).
    pub fn root_node(&self) -> &CallNode {
        &self.nodes[0]
    }

    /// Value returned by the root call.
    pub fn result(&self) -> u64 {
        self.root_node().result
    }

    pub fn node(&self, index: usize) -> Option<&CallNode> {
        self.nodes.get(index)
    }

    /// All calls in call order.
    pub fn nodes(&self) -> &[CallNode] {
        &self.nodes
    }

    /// Total number of calls.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Number of base-case calls.
    pub fn leaf_count(&self) -> usize {
        self.nodes.iter().filter(|n| n.is_base_case()).count()
    }

    /// Number of levels.
    pub fn depth(&self) -> usize {
        let mut deepest = 0;
        let mut stack = vec![(0usize, 1usize)];
        while let Some((i, d)) = stack.pop() {
            deepest = deepest.max(d);
            stack.extend(self.nodes[i].children.iter().map(|&c| (c, d + 1)));
        }
        deepest
    }
}

/// Push a call, expand its children, then fill in its result.
fn expand_fibonacci(nodes: &mut Vec<CallNode>, n: u32) -> usize {
    let index = push_call(nodes, n);
    if n <= 1 {
        nodes[index].result = n as u64;
        return index;
    }

    let left = expand_fibonacci(nodes, n - 1);
    let right = expand_fibonacci(nodes, n - 2);
    nodes[index].result = nodes[left].result + nodes[right].result;
    nodes[index].children = vec![left, right];
    index
}

fn expand_factorial(nodes: &mut Vec<CallNode>, n: u32) -> usize {
    let index = push_call(nodes, n);
    if n <= 1 {
        nodes[index].result = 1;
        return index;
    }

    let child = expand_factorial(nodes, n - 1);
    nodes[index].result = n as u64 * nodes[child].result;
    nodes[index].children = vec![child];
    index
}

fn push_call(nodes: &mut Vec<CallNode>, input: u32) -> usize {
    nodes.push(CallNode {
        input,
        result: 0,
        children: Vec::new(),
    });
    nodes.len() - 1
}

impl TreeShape for RecursionTree {
    fn root(&self) -> Option<usize> {
        Some(0)
    }

    fn label(&self, node: usize) -> i64 {
        self.nodes[node].input as i64
    }

    fn children(&self, node: usize) -> Children {
        match self.nodes[node].children.as_slice() {
            [] => Children::Leaf,
            [only] => Children::Chain(*only),
            [left, right, ..] => Children::Binary(Some(*left), Some(*right)),
        }
    }
}
