//! `delete(tree, i)`: removes the element at index `i`, rebuilding the
//! ancestor chain and collapsing any node (or the whole spine) that the
//! removal leaves empty.

use crate::concat::balance;
use crate::error::RrbError;
use crate::node::{branch_for, Node, NodeLink};
use crate::split::normalize;
use crate::tree::Tree;

pub(crate) fn delete<T: Clone>(tree: &Tree<T>, i: usize) -> Result<Tree<T>, RrbError> {
    let len = tree.size();
    if i >= len {
        return Err(RrbError::IndexOutOfBounds {
            operation: "delete",
            index: i,
            len,
        });
    }
    let Tree::Rooted { height, root } = tree else {
        unreachable!("size() == 0 for Tree::Empty, caught above");
    };
    Ok(match delete_node(root, *height, i) {
        Some(n) => normalize(n, *height),
        None => Tree::Empty,
    })
}

/// Deletes local index `i` from the subtree rooted at `node` (height `h`),
/// returning `None` if doing so leaves this node with no slots at all.
///
/// `ranges` on every rebuilt ancestor is recomputed from scratch (via
/// [`NodeLink::parent`]) rather than decremented in place; this is
/// equivalent to decrementing every `ranges[k]` at or after the affected
/// branch, since the surviving children's sizes are exactly what the
/// decremented values would have summed to.
///
/// The rebuilt child list is also run through [`balance`] before being
/// wrapped in a parent. A single-element removal shrinks a child's size
/// without touching its sibling count, which can walk a node's `extra_steps`
/// past `E` with no concat anywhere nearby to catch it (e.g. four full
/// leaves, each trimmed down by enough deletes, with none ever fully
/// drained); `balance` is a no-op extra check when the bound already holds,
/// so this only costs anything on the sequences that actually need it.
fn delete_node<T: Clone>(node: &NodeLink<T>, h: usize, i: usize) -> Option<NodeLink<T>> {
    match &**node {
        Node::Leaf(elements) => {
            let mut elements = elements.clone();
            elements.remove(i);
            (!elements.is_empty()).then(|| NodeLink::leaf(elements))
        }
        Node::Branch { children, ranges } => {
            let (k, new_i) = branch_for(ranges, h, i);
            let new_child = delete_node(&children[k], h - 1, new_i);
            let mut new_children = children.clone();
            match new_child {
                Some(c) => new_children[k] = c,
                None => {
                    new_children.remove(k);
                }
            }
            (!new_children.is_empty()).then(|| NodeLink::parent(&balance(new_children)))
        }
    }
}
