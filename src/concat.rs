//! Concatenation, and the rebalancing machinery it leans on: `balance`,
//! `join_nodes`, `root`, and `make_tree` (their composition).
//!
//! This is the busiest corner of the tree: `concat` is the only operation
//! that can change height in either direction and the only one that must
//! reconcile two independently-shaped spines, so most of the relaxation
//! machinery exists to serve it (`append`, in `lib.rs`, is just `concat`
//! against a singleton).

use std::collections::VecDeque;

use crate::config::{B, E, M};
use crate::node::{Node, NodeLink};
use crate::tree::Tree;

/// `concat(a, b)`: a tree containing `a`'s elements followed by `b`'s.
///
/// An empty operand is returned verbatim, sharing structure with the
/// non-empty side, per the empty-tree identity.
pub(crate) fn concat<T: Clone>(a: &Tree<T>, b: &Tree<T>) -> Tree<T> {
    match (a, b) {
        (Tree::Empty, _) => b.clone(),
        (_, Tree::Empty) => a.clone(),
        (
            Tree::Rooted {
                height: hl,
                root: nl,
            },
            Tree::Rooted {
                height: hr,
                root: nr,
            },
        ) => {
            let (root, height) = do_concat(nl.clone(), nr.clone(), *hl, *hr);
            Tree::Rooted { height, root }
        }
    }
}

/// Merges two non-empty node spines at heights `hl`/`hr`, returning the
/// resulting root together with its height (which may exceed both `hl` and
/// `hr` by one, if rebalancing at the bottom produced enough material to
/// need a new parent level).
fn do_concat<T: Clone>(
    nl: NodeLink<T>,
    nr: NodeLink<T>,
    hl: usize,
    hr: usize,
) -> (NodeLink<T>, usize) {
    if hl == hr && hl == 2 {
        let mut xs = nl.children_vec();
        xs.extend(nr.children_vec());
        return make_tree(xs, 2);
    }
    if hl == hr {
        let h = hl;
        let (rhand, lbody) = nl.rhand_and_lbody();
        let (lhand, rbody) = nr.lhand_and_rbody();
        let (middle, middle_h) = do_concat(rhand, lhand, h - 1, h - 1);
        let mut xs = lbody;
        if middle_h == h {
            xs.extend(middle.children_vec());
        } else {
            xs.push(middle);
        }
        xs.extend(rbody);
        return make_tree(xs, h);
    }
    if hl > hr {
        let (rhand, lbody) = nl.rhand_and_lbody();
        let (middle, middle_h) = do_concat(rhand, nr, hl - 1, hr);
        let mut xs = lbody;
        if middle_h == hl {
            xs.extend(middle.children_vec());
        } else {
            xs.push(middle);
        }
        return make_tree(xs, hl);
    }
    // hl < hr
    let (lhand, rbody) = nr.lhand_and_rbody();
    let (middle, middle_h) = do_concat(nl, lhand, hl, hr - 1);
    let mut xs = Vec::new();
    if middle_h == hr {
        xs.extend(middle.children_vec());
    } else {
        xs.push(middle);
    }
    xs.extend(rbody);
    make_tree(xs, hr)
}

/// Rebalances `xs` under the relaxation bound, then groups the result under
/// one or more new parents at height `h`.
pub(crate) fn make_tree<T: Clone>(xs: Vec<NodeLink<T>>, h: usize) -> (NodeLink<T>, usize) {
    root(balance(xs), h)
}

/// Groups a flat child list under parent nodes of fan-out at most `B`, left
/// to right; if more than one parent results, recurses to group those
/// parents at `h + 1`, possibly raising height. The empty list has no
/// caller in this crate (every path that could produce it is short-circuited
/// by `concat`'s empty-tree cases beforehand).
fn root<T: Clone>(xs: Vec<NodeLink<T>>, h: usize) -> (NodeLink<T>, usize) {
    debug_assert!(!xs.is_empty(), "root() needs at least one child");
    let parents: Vec<NodeLink<T>> = xs.chunks(B).map(NodeLink::parent).collect();
    if parents.len() == 1 {
        let root = parents.into_iter().next().unwrap();
        (root, h)
    } else {
        root(parents, h + 1)
    }
}

/// Redistributes `xs` so that the count of children above the ideal packed
/// count (`extra_steps`) is at most `E`.
///
/// Scans left to right. A full node is emitted untouched. An empty node
/// (the transient result of a prior redistribution fully draining its
/// right-hand side) is simply dropped. Otherwise children are pulled from
/// the front of the right node into the left node via [`join_nodes`] until
/// the left node is full or the right node is empty; the pair is then
/// re-examined against the bound before moving on.
///
/// `pub(crate)` rather than private: [`crate::delete`] also calls this, on
/// the sibling list left behind after a child shrinks or is dropped, so that
/// a produced tree's relaxation bound (spec.md §8 property 7) holds after
/// `delete` as well as after `concat`, not only immediately below a freshly
/// rebalanced span. When `xs` is already within bound this is a single
/// `extra_steps` check and an unchanged return, so the common case (most
/// deletes) costs nothing extra.
pub(crate) fn balance<T: Clone>(xs: Vec<NodeLink<T>>) -> Vec<NodeLink<T>> {
    let p: usize = xs.iter().map(NodeLink::size).sum();
    let ideal = if p == 0 { 0 } else { ((p - 1) >> M) + 1 };
    let mut extra_steps = xs.len() as isize - ideal as isize;
    if extra_steps <= E as isize {
        return xs;
    }

    let mut queue: VecDeque<NodeLink<T>> = xs.into();
    let mut result = Vec::new();
    while extra_steps > E as isize {
        let Some(x1) = queue.pop_front() else {
            break;
        };
        let Some(x2) = queue.pop_front() else {
            result.push(x1);
            break;
        };
        if x1.is_full() {
            result.push(x1);
            queue.push_front(x2);
            continue;
        }
        if x2.is_empty_node() {
            extra_steps -= 1;
            queue.push_front(x1);
            continue;
        }
        let (new_x1, new_x2) = join_nodes(&x1, &x2);
        if new_x2.is_empty_node() {
            extra_steps -= 1;
            queue.push_front(new_x1);
        } else {
            queue.push_front(new_x2);
            queue.push_front(new_x1);
        }
    }
    result.extend(queue);
    result
}

/// Pulls slots (elements for leaves, children for branches) from the front
/// of `x2` into the back of `x1` until `x1` is full or `x2` runs dry.
///
/// Moving a slot keeps both `ranges` tables consistent: `x1`'s grows by one
/// cumulative entry; `x2`'s loses its leading entry and every remaining
/// entry is rebased (see `delete_first_range` in the design notes) by
/// rebuilding from the remaining children's sizes, which reconstructing via
/// [`NodeLink::parent_raw`]/[`NodeLink::leaf_raw`] does automatically.
fn join_nodes<T: Clone>(x1: &NodeLink<T>, x2: &NodeLink<T>) -> (NodeLink<T>, NodeLink<T>) {
    match (&**x1, &**x2) {
        (Node::Leaf(e1), Node::Leaf(e2)) => {
            let mut e1 = e1.clone();
            let mut e2: VecDeque<T> = e2.clone().into();
            while e1.len() < B && !e2.is_empty() {
                e1.push(e2.pop_front().expect("checked non-empty"));
            }
            (NodeLink::leaf_raw(e1), NodeLink::leaf_raw(e2.into()))
        }
        (Node::Branch { .. }, Node::Branch { .. }) => {
            let mut c1 = x1.children_vec();
            let mut c2: VecDeque<NodeLink<T>> = x2.children_vec().into();
            while c1.len() < B && !c2.is_empty() {
                c1.push(c2.pop_front().expect("checked non-empty"));
            }
            let remaining: Vec<NodeLink<T>> = c2.into();
            (NodeLink::parent_raw(&c1), NodeLink::parent_raw(&remaining))
        }
        _ => unreachable!("join_nodes: siblings at the same level must be the same kind"),
    }
}
