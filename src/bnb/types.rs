//! Search nodes, decision paths, incumbent and warm start.

use std::cmp::Ordering;
use std::rc::Rc;

/// Frontier traversal policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Traversal {
    /// Explicit stack; lowest memory, no global ordering.
    DepthFirst,

    /// Priority queue on the bound (highest first, FIFO among ties).
    BestFirst,

    /// Best-first until the frontier exceeds
    /// [`BnbConfig::hybrid_frontier_limit`](super::BnbConfig::hybrid_frontier_limit),
    /// then the next popped node is exhausted depth-first.
    #[default]
    Hybrid,
}

/// A known solution handed to branch-and-bound before it starts.
///
/// Indices are original item indices.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WarmStart {
    /// Claimed total value.
    pub value: u64,
    /// Chosen items.
    pub items: Vec<usize>,
}

impl WarmStart {
    /// Creates a warm start.
    pub fn new(value: u64, items: Vec<usize>) -> Self {
        Self { value, items }
    }
}

/// Persistent list of original item indices chosen from the root.
///
/// Children share their parent's tail, so branching costs one allocation
/// and no copying. Only the incumbent's path is ever turned into a `Vec`.
#[derive(Debug, Clone, Default)]
pub(crate) struct DecisionPath(Option<Rc<PathLink>>);

#[derive(Debug)]
pub(crate) struct PathLink {
    item: usize,
    parent: DecisionPath,
}

impl DecisionPath {
    /// Builds a path from a list of items.
    pub(crate) fn from_items(items: &[usize]) -> Self {
        items
            .iter()
            .fold(DecisionPath::default(), |path, &item| path.push(item))
    }

    /// Returns a new path with `item` appended.
    pub(crate) fn push(&self, item: usize) -> Self {
        DecisionPath(Some(Rc::new(PathLink {
            item,
            parent: self.clone(),
        })))
    }

    /// Collects the items, ascending.
    pub(crate) fn items(&self) -> Vec<usize> {
        let mut items = Vec::new();
        let mut current = &self.0;
        while let Some(link) = current {
            items.push(link.item);
            current = &link.parent.0;
        }
        items.sort_unstable();
        items
    }
}

// Unlink iteratively so dropping a deep chain cannot overflow the stack.
impl Drop for DecisionPath {
    fn drop(&mut self) {
        let mut next = self.0.take();
        while let Some(link) = next {
            match Rc::try_unwrap(link) {
                Ok(mut link) => next = link.parent.0.take(),
                Err(_) => break,
            }
        }
    }
}

/// A partial assignment: sorted items `0..depth` decided.
#[derive(Debug, Clone)]
pub(crate) struct SearchNode {
    pub(crate) value: u64,
    pub(crate) weight: u64,
    pub(crate) depth: usize,
    pub(crate) bound: u64,
    pub(crate) path: DecisionPath,
}

/// Best-first heap entry: highest bound first, then lowest sequence number.
#[derive(Debug)]
pub(crate) struct FrontierEntry {
    pub(crate) seq: u64,
    pub(crate) node: SearchNode,
}

impl PartialEq for FrontierEntry {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for FrontierEntry {}

impl PartialOrd for FrontierEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for FrontierEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        self.node
            .bound
            .cmp(&other.node.bound)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

/// Best solution found so far. Its value never decreases.
#[derive(Debug, Clone, Default)]
pub(crate) struct Incumbent {
    pub(crate) value: u64,
    pub(crate) path: DecisionPath,
}

impl Incumbent {
    /// Installs the solution if strictly better.
    pub(crate) fn try_improve(&mut self, value: u64, path: &DecisionPath) -> bool {
        if value > self.value {
            self.value = value;
            self.path = path.clone();
            true
        } else {
            false
        }
    }
}
