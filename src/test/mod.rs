//! Crate-level property tests: replay a random sequence of operations
//! against both an [`RrbVector`] and a flat `Vec` used as a reference
//! model, and check that they never disagree. The node/concat/split/delete
//! modules carry their own focused unit tests and the concrete worked
//! examples from the specification; this module is for the properties that
//! only show up across *sequences* of operations.

use quickcheck::{Arbitrary, Gen, TestResult};
use quickcheck_macros::quickcheck;

use crate::node::{Node, NodeLink};
use crate::tree::Tree;
use crate::RrbVector;

#[derive(Clone, Debug)]
enum Op {
    Append(i32),
    Update(usize, i32),
    Delete(usize),
}

impl Arbitrary for Op {
    fn arbitrary(g: &mut Gen) -> Op {
        match u32::arbitrary(g) % 3 {
            0 => Op::Append(i32::arbitrary(g)),
            1 => Op::Update(usize::arbitrary(g), i32::arbitrary(g)),
            _ => Op::Delete(usize::arbitrary(g)),
        }
    }
}

/// Applies `op` to both `tree` and `model`. An update/delete whose index
/// falls outside the model's current bounds is reduced modulo the current
/// length rather than skipped, so most ops land inside the body of the
/// tree instead of mostly hitting the empty-vector edge case.
fn apply(tree: &mut RrbVector<i32>, model: &mut Vec<i32>, op: &Op) {
    match *op {
        Op::Append(x) => {
            *tree = tree.append(x);
            model.push(x);
        }
        Op::Update(i, x) => {
            if model.is_empty() {
                return;
            }
            let i = i % model.len();
            *tree = tree.update(i, x).unwrap();
            model[i] = x;
        }
        Op::Delete(i) => {
            if model.is_empty() {
                return;
            }
            let i = i % model.len();
            *tree = tree.delete(i).unwrap();
            model.remove(i);
        }
    }
}

fn build(ops: &[Op]) -> (RrbVector<i32>, Vec<i32>) {
    let mut tree = RrbVector::new();
    let mut model = Vec::new();
    for op in ops {
        apply(&mut tree, &mut model, op);
    }
    (tree, model)
}

fn flatten(tree: &RrbVector<i32>) -> Vec<i32> {
    (0..tree.len()).map(|i| *tree.get(i).unwrap()).collect()
}

fn ranges_of(t: &Tree<i32>) -> Vec<usize> {
    let Tree::Rooted { root, .. } = t else {
        return vec![];
    };
    match &**root {
        Node::Branch { ranges, .. } => ranges.clone(),
        Node::Leaf(_) => vec![],
    }
}

fn flatten_tree(t: &Tree<i32>) -> Vec<i32> {
    (0..t.size()).map(|i| *t.get(i).unwrap()).collect()
}

/// Recursively checks spec.md §8 property 7's relaxation-bound clause: at
/// every internal node, the number of children is within `E` of the ideal
/// packed count (`ceil(size / B)`) for that node's total size.
fn relaxation_bound_holds<T>(node: &NodeLink<T>) -> bool {
    match &**node {
        Node::Leaf(_) => true,
        Node::Branch { children, .. } => {
            let p = node.size();
            let ideal = if p == 0 { 0 } else { ((p - 1) >> crate::config::M) + 1 };
            let extra_steps = children.len() as isize - ideal as isize;
            extra_steps <= crate::config::E as isize && children.iter().all(relaxation_bound_holds)
        }
    }
}

quickcheck::quickcheck! {
    fn indexing_matches_a_flat_vec_after_any_op_sequence(ops: Vec<Op>) -> bool {
        let (tree, model) = build(&ops);
        tree.len() == model.len() && flatten(&tree) == model
    }

    fn every_internal_node_respects_the_relaxation_bound(ops: Vec<Op>) -> bool {
        let (tree, _model) = build(&ops);
        match tree.inner() {
            Tree::Empty => true,
            Tree::Rooted { root, .. } => relaxation_bound_holds(root),
        }
    }

    fn update_changes_only_the_targeted_slot(ops: Vec<Op>, index: usize, value: i32) -> TestResult {
        let (tree, model) = build(&ops);
        if model.is_empty() {
            return TestResult::discard();
        }
        let index = index % model.len();
        let updated = tree.update(index, value).unwrap();

        if *updated.get(index).unwrap() != value {
            return TestResult::failed();
        }
        for j in 0..model.len() {
            if j != index && updated.get(j).unwrap() != tree.get(j).unwrap() {
                return TestResult::failed();
            }
        }
        TestResult::from_bool(updated.len() == tree.len())
    }

    fn delete_shrinks_by_one_and_matches_the_model(ops: Vec<Op>, index: usize) -> TestResult {
        let (tree, mut model) = build(&ops);
        if model.is_empty() {
            return TestResult::discard();
        }
        let index = index % model.len();
        let deleted = tree.delete(index).unwrap();
        model.remove(index);
        TestResult::from_bool(deleted.len() == model.len() && flatten(&deleted) == model)
    }

    fn prior_tree_is_unaffected_by_operations_on_a_clone(ops: Vec<Op>, index: usize, value: i32) -> TestResult {
        let (tree, model) = build(&ops);
        if model.is_empty() {
            return TestResult::discard();
        }
        let index = index % model.len();
        let before = flatten(&tree);
        let _ = tree.update(index, value).unwrap();
        let _ = tree.delete(index).unwrap();
        let _ = tree.append(value);
        TestResult::from_bool(flatten(&tree) == before)
    }

}

/// The concat law from the specification's testable properties: size is
/// additive and the element order is `a` followed by `b`. Written with the
/// `#[quickcheck]` attribute form rather than the `quickcheck!` macro used
/// above, since its arguments are plain `Arbitrary` types with no shared
/// reference-model bookkeeping to thread through.
#[quickcheck]
fn concat_size_is_additive_and_preserves_order(a: Vec<i32>, b: Vec<i32>) -> bool {
    let mut left = RrbVector::new();
    for &x in &a {
        left = left.append(x);
    }
    let mut right = RrbVector::new();
    for &x in &b {
        right = right.append(x);
    }
    let joined = RrbVector::concat(&left, &right);
    let mut expected = a.clone();
    expected.extend(b.clone());
    joined.len() == expected.len() && flatten(&joined) == expected
}

#[test]
fn get_out_of_range_never_panics() {
    let mut v = RrbVector::new();
    for x in 0..10 {
        v = v.append(x);
    }
    assert!(v.get(10).is_err());
    assert!(v.get(1000).is_err());
}

/// *Radix hit*, from the specification's concrete scenarios: a 16-element
/// vector built by straight append, read back in order.
#[test]
fn radix_hit_test() {
    let mut v = RrbVector::new();
    for x in 1..=16 {
        v = v.append(x);
    }
    assert_eq!(*v.get(5).unwrap(), 6);
    assert_eq!(*v.get(0).unwrap(), 1);
    assert_eq!(*v.get(4).unwrap(), 5);
}

/// *Radix miss*: a height-3 tree whose first subtree's last leaf is one
/// short of full (ranges `(4,8,12,15)`), so the outer radix estimate at
/// index 15 undershoots and the linear scan has to step forward once.
#[test]
fn radix_miss_test() {
    let first = NodeLink::parent(&[
        NodeLink::leaf(vec![1, 2, 3, 4]),
        NodeLink::leaf(vec![5, 6, 7, 8]),
        NodeLink::leaf(vec![9, 10, 11, 12]),
        NodeLink::leaf(vec![13, 14, 15]),
    ]);
    let second = NodeLink::parent(&[
        NodeLink::leaf(vec![16, 17, 18, 19]),
        NodeLink::leaf(vec![20, 21, 22, 23]),
        NodeLink::leaf(vec![24, 25, 26, 27]),
        NodeLink::leaf(vec![28, 29, 30, 31]),
    ]);
    let tree: Tree<i32> = Tree::Rooted {
        height: 3,
        root: NodeLink::parent(&[first, second]),
    };
    assert_eq!(tree.size(), 31);
    assert_eq!(*tree.get(15).unwrap(), 16);
    for i in 0..31 {
        assert_eq!(*tree.get(i).unwrap(), (i + 1) as i32);
    }
}

#[test]
fn append_builds_the_expected_two_element_vector() {
    let v = RrbVector::new().append(1).append(2);
    assert_eq!(v.len(), 2);
    assert_eq!(*v.get(0).unwrap(), 1);
    assert_eq!(*v.get(1).unwrap(), 2);
}

/// *Paper figure 7*: concatenating two height-3 trees — the left built from
/// leaf-size runs `(3,4,3,4)` and `(4,2)`, the right from `(3,2,2,3)` and
/// `(3,4)` — produces a height-3 result with outer ranges `(14,27,30,37)`,
/// whose 37 elements reproduce the original concatenation left to right.
#[test]
fn concat_reproduces_the_papers_figure_7() {
    fn leaf_run(start: i32, sizes: &[usize]) -> Vec<NodeLink<i32>> {
        let mut next = start;
        sizes
            .iter()
            .map(|&size| {
                let elements: Vec<i32> = (next..next + size as i32).collect();
                next += size as i32;
                NodeLink::leaf(elements)
            })
            .collect()
    }

    let left_a = NodeLink::parent(&leaf_run(1, &[3, 4, 3, 4]));
    let left_b = NodeLink::parent(&leaf_run(15, &[4, 2]));
    let left: Tree<i32> = Tree::Rooted {
        height: 3,
        root: NodeLink::parent(&[left_a, left_b]),
    };

    let right_c = NodeLink::parent(&leaf_run(21, &[3, 2, 2, 3]));
    let right_d = NodeLink::parent(&leaf_run(31, &[3, 4]));
    let right: Tree<i32> = Tree::Rooted {
        height: 3,
        root: NodeLink::parent(&[right_c, right_d]),
    };

    assert_eq!(left.size(), 20);
    assert_eq!(right.size(), 17);

    let joined = crate::concat::concat(&left, &right);
    assert_eq!(joined.size(), 37);
    assert_eq!(joined.height(), 3);
    assert_eq!(ranges_of(&joined), vec![14, 27, 30, 37]);
    assert_eq!(flatten_tree(&joined), (1..=37).collect::<Vec<_>>());
}
