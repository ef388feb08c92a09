//! `split(tree, i)`: partitions a tree into an independent left tree holding
//! indices `0..i` and right tree holding `i..size`, sharing every untouched
//! sub-tree with the original.

use crate::error::RrbError;
use crate::node::{branch_for, Node, NodeLink};
use crate::tree::Tree;

pub(crate) fn split<T: Clone>(tree: &Tree<T>, i: usize) -> Result<(Tree<T>, Tree<T>), RrbError> {
    let len = tree.size();
    if i > len {
        return Err(RrbError::IndexOutOfBounds {
            operation: "split",
            index: i,
            len,
        });
    }
    if i == 0 {
        return Ok((Tree::empty(), tree.clone()));
    }
    if i == len {
        return Ok((tree.clone(), Tree::empty()));
    }
    let Tree::Rooted { height, root } = tree else {
        unreachable!("size() == len > 0 for Tree::Empty is impossible");
    };
    let (left, right) = split_node(root, *height, i);
    let left_tree = left.map_or(Tree::Empty, |n| normalize(n, *height));
    let right_tree = right.map_or(Tree::Empty, |n| normalize(n, *height));
    Ok((left_tree, right_tree))
}

/// Splits the subtree rooted at `node` (height `h`) at local index `i`,
/// returning `(left, right)` with `None` standing for "this side is empty".
fn split_node<T: Clone>(node: &NodeLink<T>, h: usize, i: usize) -> (Option<NodeLink<T>>, Option<NodeLink<T>>) {
    match &**node {
        Node::Leaf(elements) => {
            let (left, right) = elements.split_at(i);
            let left = (!left.is_empty()).then(|| NodeLink::leaf(left.to_vec()));
            let right = (!right.is_empty()).then(|| NodeLink::leaf(right.to_vec()));
            (left, right)
        }
        Node::Branch { children, ranges } => {
            let (k, new_i) = branch_for(ranges, h, i);
            let (child_left, child_right) = split_node(&children[k], h - 1, new_i);

            let mut left_children = children[..k].to_vec();
            left_children.extend(child_left);
            let left = (!left_children.is_empty()).then(|| NodeLink::parent(&left_children));

            let mut right_children: Vec<NodeLink<T>> = child_right.into_iter().collect();
            right_children.extend(children[k + 1..].iter().cloned());
            let right = (!right_children.is_empty()).then(|| NodeLink::parent(&right_children));

            (left, right)
        }
    }
}

/// Collapses a chain of single-child branches down to height `2`, the
/// minimum a non-empty tree can have, so that a split result never carries
/// dead height that would cost every later operation an extra useless
/// descent.
pub(crate) fn normalize<T>(mut node: NodeLink<T>, mut h: usize) -> Tree<T> {
    while h > 2 {
        let only_child = match &*node {
            Node::Branch { children, .. } if children.len() == 1 => Some(children[0].clone()),
            _ => None,
        };
        match only_child {
            Some(child) => {
                node = child;
                h -= 1;
            }
            None => break,
        }
    }
    Tree::Rooted { height: h, root: node }
}
