//! The persistent node graph: [`Node`], the shared-ownership [`NodeLink`]
//! that points at one, and the handful of structural helpers (`lhand`,
//! `rhand`, `lbody`, `rbody`, `find_branch`) the algorithm modules build on.
//!
//! Nodes are never mutated once another `NodeLink` can observe them — every
//! operation that changes a tree builds new `Node` values along the
//! modified path and reuses (clones the handle to) everything else. This
//! mirrors the teacher rope's `internals.rs`: a `Node` variant enum behind a
//! cheaply-cloned reference-counted `NodeLink`, switched between `Rc` and
//! `Arc` by the `atomic` feature.

use crate::config::B;

#[cfg(not(feature = "atomic"))]
use std::rc::Rc as Handle;
#[cfg(feature = "atomic")]
use std::sync::Arc as Handle;

/// A node in the tree: either a leaf holding up to `B` elements, or a branch
/// holding up to `B` children together with their cumulative size table.
#[derive(Debug)]
pub(crate) enum Node<T> {
    Leaf(Vec<T>),
    Branch {
        children: Vec<NodeLink<T>>,
        /// `ranges[k] = size(children[0]) + .. + size(children[k])`.
        ranges: Vec<usize>,
    },
}

/// A shared, immutable handle to a [`Node`].
///
/// Cloning a `NodeLink` is O(1) and shares the underlying node; it never
/// requires `T: Clone`, since cloning the handle does not copy the elements
/// it points at.
pub(crate) struct NodeLink<T>(Handle<Node<T>>);

impl<T> Clone for NodeLink<T> {
    fn clone(&self) -> Self {
        NodeLink(Handle::clone(&self.0))
    }
}

impl<T: std::fmt::Debug> std::fmt::Debug for NodeLink<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

impl<T> std::ops::Deref for NodeLink<T> {
    type Target = Node<T>;
    fn deref(&self) -> &Node<T> {
        &self.0
    }
}

impl<T> NodeLink<T> {
    pub(crate) fn leaf(elements: Vec<T>) -> Self {
        debug_assert!(!elements.is_empty(), "a leaf may not be empty");
        debug_assert!(elements.len() <= B, "a leaf may hold at most B elements");
        NodeLink(Handle::new(Node::Leaf(elements)))
    }

    pub(crate) fn branch(children: Vec<NodeLink<T>>, ranges: Vec<usize>) -> Self {
        debug_assert!(!children.is_empty(), "a branch may not be empty");
        debug_assert!(children.len() <= B, "a branch may hold at most B children");
        debug_assert_eq!(children.len(), ranges.len(), "ranges must match children");
        debug_assert!(
            ranges.windows(2).all(|w| w[0] < w[1]),
            "ranges must be strictly increasing: {ranges:?}"
        );
        NodeLink(Handle::new(Node::Branch { children, ranges }))
    }

    /// Builds a branch node from a slice of children, recomputing `ranges`
    /// as the running cumulative of each child's size.
    ///
    /// The caller is responsible for ensuring `children.len() <= B`; this is
    /// always true of the callers in this crate, which only ever group
    /// slices of an already-bounded child list.
    pub(crate) fn parent(children: &[NodeLink<T>]) -> Self {
        let mut ranges = Vec::with_capacity(children.len());
        let mut total = 0;
        for child in children {
            total += child.size();
            ranges.push(total);
        }
        NodeLink::branch(children.to_vec(), ranges)
    }

    /// Like [`leaf`](NodeLink::leaf), but permits an empty result.
    ///
    /// `balance`'s inner redistribution step can transiently drain a node
    /// down to zero elements before the caller notices and drops it; such a
    /// value is never reachable from a live tree, so it does not owe the
    /// ordinary non-empty invariant.
    pub(crate) fn leaf_raw(elements: Vec<T>) -> Self {
        debug_assert!(elements.len() <= B, "a leaf may hold at most B elements");
        NodeLink(Handle::new(Node::Leaf(elements)))
    }

    /// Like [`parent`](NodeLink::parent), but permits an empty result; see
    /// [`leaf_raw`](NodeLink::leaf_raw).
    pub(crate) fn parent_raw(children: &[NodeLink<T>]) -> Self {
        debug_assert!(children.len() <= B, "a branch may hold at most B children");
        let mut ranges = Vec::with_capacity(children.len());
        let mut total = 0;
        for child in children {
            total += child.size();
            ranges.push(total);
        }
        NodeLink(Handle::new(Node::Branch {
            children: children.to_vec(),
            ranges,
        }))
    }
}

impl<T> Node<T> {
    /// Total number of user elements reachable from this node.
    pub(crate) fn size(&self) -> usize {
        match self {
            Node::Leaf(elements) => elements.len(),
            Node::Branch { ranges, .. } => ranges.last().copied().unwrap_or(0),
        }
    }

    /// Number of direct slots: element count for a leaf, child count for a
    /// branch.
    pub(crate) fn slot_count(&self) -> usize {
        match self {
            Node::Leaf(elements) => elements.len(),
            Node::Branch { children, .. } => children.len(),
        }
    }

    pub(crate) fn is_full(&self) -> bool {
        self.slot_count() == B
    }

    fn children(&self) -> &[NodeLink<T>] {
        match self {
            Node::Branch { children, .. } => children,
            Node::Leaf(_) => unreachable!("children() called on a leaf"),
        }
    }
}

impl<T> NodeLink<T> {
    pub(crate) fn size(&self) -> usize {
        self.0.size()
    }

    pub(crate) fn is_empty_node(&self) -> bool {
        self.0.size() == 0
    }

    /// This node's children, cloned into an owned vector (each clone is an
    /// O(1) handle clone).
    pub(crate) fn children_vec(&self) -> Vec<NodeLink<T>> {
        self.0.children().to_vec()
    }

    /// Rightmost child, and the remaining children (`lbody`: everything but
    /// the rightmost).
    pub(crate) fn rhand_and_lbody(&self) -> (NodeLink<T>, Vec<NodeLink<T>>) {
        let mut body = self.children_vec();
        let hand = body.pop().expect("branch has at least one child");
        (hand, body)
    }

    /// Leftmost child, and the remaining children (`rbody`: everything but
    /// the leftmost).
    pub(crate) fn lhand_and_rbody(&self) -> (NodeLink<T>, Vec<NodeLink<T>>) {
        let mut body = self.children_vec();
        let hand = body.remove(0);
        (hand, body)
    }
}

/// Finds the branch index `k >= start` such that `ranges[k] > i`.
///
/// Under relaxation the true branch for index `i` is never to the left of
/// the "as if every sibling were full" radix estimate, only ever to the
/// right of it (non-full siblings make early `ranges` entries *smaller*
/// than the full case, never larger) — so a forward-only linear scan from
/// `start` always finds it.
pub(crate) fn find_branch(ranges: &[usize], start: usize, i: usize) -> usize {
    let mut k = start;
    while ranges[k] <= i {
        k += 1;
    }
    k
}

/// Computes the radix-estimated branch index for element index `i` at
/// height `h`, clamped to a valid position in a node with `slot_count`
/// children.
///
/// The raw radix (`i >> (M * (h - 1))`) assumes every branch beneath this
/// level is completely full. Relaxed siblings can make the true branch
/// index larger than that estimate, so the estimate is clamped to the last
/// valid slot before [`find_branch`] scans forward from it.
pub(crate) fn radix(i: usize, h: usize, slot_count: usize) -> usize {
    let shift = crate::config::M * (h - 1);
    let estimate = i.checked_shr(shift as u32).unwrap_or(0);
    estimate.min(slot_count - 1)
}

/// Splits `ranges`/`i` into `(branch index, new element index within that
/// branch)`, given this node's `children` and `ranges` tables and height
/// `h`.
pub(crate) fn branch_for(ranges: &[usize], h: usize, i: usize) -> (usize, usize) {
    let start = radix(i, h, ranges.len());
    let k = find_branch(ranges, start, i);
    let new_i = if k == 0 { i } else { i - ranges[k - 1] };
    (k, new_i)
}
