//! [`Tree`]: the `(height, root)` handle, and the two operations simple
//! enough not to need their own module, `get` and `update`.

use crate::error::RrbError;
use crate::node::{branch_for, Node, NodeLink};

/// A tree handle: either empty, or a height paired with a root node.
///
/// Height `2` is the smallest non-empty tree: a root whose slots are
/// leaves. A single-element tree is still height `2` — one leaf wrapped in
/// a one-slot branch — never a bare height-`1` leaf; only the empty tree
/// uses `Tree::Empty` to stand in for "no root at all".
pub(crate) enum Tree<T> {
    Empty,
    Rooted { height: usize, root: NodeLink<T> },
}

impl<T> Clone for Tree<T> {
    fn clone(&self) -> Self {
        match self {
            Tree::Empty => Tree::Empty,
            Tree::Rooted { height, root } => Tree::Rooted {
                height: *height,
                root: root.clone(),
            },
        }
    }
}

impl<T> Tree<T> {
    pub(crate) fn empty() -> Self {
        Tree::Empty
    }

    pub(crate) fn singleton(x: T) -> Self {
        Tree::Rooted {
            height: 2,
            root: NodeLink::parent(&[NodeLink::leaf(vec![x])]),
        }
    }

    pub(crate) fn size(&self) -> usize {
        match self {
            Tree::Empty => 0,
            Tree::Rooted { root, .. } => root.size(),
        }
    }

    pub(crate) fn height(&self) -> usize {
        match self {
            Tree::Empty => 1,
            Tree::Rooted { height, .. } => *height,
        }
    }

    pub(crate) fn get(&self, i: usize) -> Result<&T, RrbError> {
        let len = self.size();
        if i >= len {
            return Err(RrbError::IndexOutOfBounds {
                operation: "get",
                index: i,
                len,
            });
        }
        let Tree::Rooted { height, root } = self else {
            unreachable!("size() == 0 for Tree::Empty, caught above");
        };
        Ok(get_node(root, *height, i))
    }

    pub(crate) fn update(&self, i: usize, x: T) -> Result<Self, RrbError>
    where
        T: Clone,
    {
        let len = self.size();
        if i >= len {
            return Err(RrbError::IndexOutOfBounds {
                operation: "update",
                index: i,
                len,
            });
        }
        let Tree::Rooted { height, root } = self else {
            unreachable!("size() == 0 for Tree::Empty, caught above");
        };
        Ok(Tree::Rooted {
            height: *height,
            root: update_node(root, *height, i, x),
        })
    }
}

/// Descends by radix, with linear correction, to the element at index `i`
/// under `node` at height `h`.
fn get_node<T>(node: &NodeLink<T>, h: usize, i: usize) -> &T {
    match &**node {
        Node::Leaf(elements) => &elements[i],
        Node::Branch { children, ranges } => {
            let (k, new_i) = branch_for(ranges, h, i);
            get_node(&children[k], h - 1, new_i)
        }
    }
}

/// Descends as [`get_node`], then rebuilds the path with slot `i` replaced
/// by `x`; every sibling slot is shared with the original node, not cloned.
fn update_node<T: Clone>(node: &NodeLink<T>, h: usize, i: usize, x: T) -> NodeLink<T>
where
    T: Clone,
{
    match &**node {
        Node::Leaf(elements) => {
            let mut elements = elements.clone();
            elements[i] = x;
            NodeLink::leaf(elements)
        }
        Node::Branch { children, ranges } => {
            let (k, new_i) = branch_for(ranges, h, i);
            let mut children = children.clone();
            children[k] = update_node(&children[k], h - 1, new_i, x);
            NodeLink::branch(children, ranges.clone())
        }
    }
}
