//! Ordered tree edit distance
//!
//! Cost model:
//! - relabel: 1 when kind or value differ, 0 otherwise;
//! - delete/insert a subtree: its size;
//! - children are aligned in order with an edit-distance table, substituting
//!   child `i` for child `j` at the cost of their own distance.
//!
//! Children are never reordered, so this is cheaper and coarser than general
//! tree edit distance.
//!
//! Each tree is flattened into a pre-order arena, so a node is identified by
//! its pre-order index and results are memoized on index pairs.

use crate::parser::ast::TreeNode;
use rustc_hash::FxHashMap;

/// Pre-order flattening of one tree
struct Arena<'a> {
    nodes: Vec<&'a TreeNode>,
    children: Vec<Vec<usize>>,
    sizes: Vec<usize>,
}

impl<'a> Arena<'a> {
    fn build(root: &'a TreeNode) -> Self {
        let mut arena = Arena {
            nodes: Vec::new(),
            children: Vec::new(),
            sizes: Vec::new(),
        };
        arena.push(root);
        arena
    }

    fn push(&mut self, node: &'a TreeNode) -> usize {
        let index = self.nodes.len();
        self.nodes.push(node);
        self.children.push(Vec::new());
        self.sizes.push(1);

        let kids: Vec<usize> = node.children.iter().map(|child| self.push(child)).collect();
        self.sizes[index] = 1 + kids.iter().map(|&kid| self.sizes[kid]).sum::<usize>();
        self.children[index] = kids;
        index
    }
}

/// Distance computation over one pair of trees
struct TreeDistance<'l, 'r> {
    left: &'l Arena<'l>,
    right: &'r Arena<'r>,
    memo: FxHashMap<(usize, usize), usize>,
}

impl<'l, 'r> TreeDistance<'l, 'r> {
    fn distance(&mut self, i: usize, j: usize) -> usize {
        if let Some(&cached) = self.memo.get(&(i, j)) {
            return cached;
        }

        let (left, right) = (self.left, self.right);
        let (a, b) = (left.nodes[i], right.nodes[j]);
        let relabel = usize::from(a.kind != b.kind || a.value != b.value);
        let result = relabel + self.align(&left.children[i], &right.children[j]);

        self.memo.insert((i, j), result);
        result
    }

    /// Order-preserving alignment of two child lists
    fn align(&mut self, first: &[usize], second: &[usize]) -> usize {
        let (left, right) = (self.left, self.right);
        let width = second.len() + 1;

        // Row i holds the cost of aligning first[..i] with second[..j].
        let mut previous: Vec<usize> = Vec::with_capacity(width);
        previous.push(0);
        for &kid in second {
            let last = previous[previous.len() - 1];
            previous.push(last + right.sizes[kid]);
        }

        for &a in first {
            let delete = left.sizes[a];
            let mut current = Vec::with_capacity(width);
            current.push(previous[0] + delete);

            for (j, &b) in second.iter().enumerate() {
                let substitute = previous[j] + self.distance(a, b);
                let remove = previous[j + 1] + delete;
                let insert = current[j] + right.sizes[b];
                current.push(substitute.min(remove).min(insert));
            }

            previous = current;
        }

        previous[width - 1]
    }
}

/// Number of nodes in the tree; an absent tree has size 0.
pub fn subtree_size(node: Option<&TreeNode>) -> usize {
    node.map_or(0, |node| {
        1 + node
            .children
            .iter()
            .map(|child| subtree_size(Some(child)))
            .sum::<usize>()
    })
}

/// Edit distance between two trees. An absent tree costs the full size of
/// the other one.
pub fn tree_distance(a: Option<&TreeNode>, b: Option<&TreeNode>) -> usize {
    match (a, b) {
        (None, None) => 0,
        (None, Some(other)) | (Some(other), None) => subtree_size(Some(other)),
        (Some(a), Some(b)) => {
            let left = Arena::build(a);
            let right = Arena::build(b);
            TreeDistance {
                left: &left,
                right: &right,
                memo: FxHashMap::default(),
            }
            .distance(0, 0)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::ast::{NodeKind, NodeValue};

    fn leaf(kind: NodeKind, value: NodeValue) -> TreeNode {
        TreeNode::leaf(kind, value)
    }

    fn name(n: &str) -> TreeNode {
        leaf(NodeKind::Identifier, NodeValue::Name(n.to_string()))
    }

    fn binary(op: &'static str, left: TreeNode, right: TreeNode) -> TreeNode {
        TreeNode::branch(NodeKind::Binary, Some(NodeValue::Op(op)), vec![left, right])
    }

    fn list(children: Vec<TreeNode>) -> TreeNode {
        TreeNode::branch(NodeKind::StatementList, None, children)
    }

    #[test]
    fn test_size_counts_every_node() {
        let tree = binary("+", name("a"), binary("*", name("b"), name("c")));
        assert_eq!(subtree_size(Some(&tree)), 5);
        assert_eq!(subtree_size(None), 0);
    }

    #[test]
    fn test_identical_trees_have_zero_distance() {
        let tree = binary("+", name("a"), name("b"));
        assert_eq!(tree_distance(Some(&tree), Some(&tree.clone())), 0);
    }

    #[test]
    fn test_absent_side_costs_full_size() {
        let tree = binary("+", name("a"), name("b"));
        assert_eq!(tree_distance(None, None), 0);
        assert_eq!(tree_distance(Some(&tree), None), 3);
        assert_eq!(tree_distance(None, Some(&tree)), 3);
    }

    #[test]
    fn test_relabel_costs_one() {
        let a = binary("+", name("a"), name("b"));
        let b = binary("-", name("a"), name("b"));
        assert_eq!(tree_distance(Some(&a), Some(&b)), 1);

        let c = binary("+", name("a"), leaf(NodeKind::Number, NodeValue::Int(0)));
        assert_eq!(tree_distance(Some(&a), Some(&c)), 1);
    }

    #[test]
    fn test_extra_child_costs_its_size() {
        let short = list(vec![name("a")]);
        let long = list(vec![name("a"), binary("+", name("b"), name("c"))]);
        assert_eq!(tree_distance(Some(&short), Some(&long)), 3);
        assert_eq!(tree_distance(Some(&long), Some(&short)), 3);
    }

    #[test]
    fn test_alignment_preserves_order() {
        // Inserting in front is cheaper than relabelling every position.
        let original = list(vec![name("a"), name("b"), name("c")]);
        let shifted = list(vec![name("x"), name("a"), name("b"), name("c")]);
        assert_eq!(tree_distance(Some(&original), Some(&shifted)), 1);

        // Swapping two different subtrees cannot be done by reordering.
        let ab = list(vec![name("a"), binary("+", name("b"), name("c"))]);
        let ba = list(vec![binary("+", name("b"), name("c")), name("a")]);
        assert_eq!(tree_distance(Some(&ab), Some(&ba)), 2);
    }

    #[test]
    fn test_distance_is_symmetric() {
        let a = list(vec![
            binary("+", name("a"), name("b")),
            name("c"),
            binary("*", name("d"), binary("-", name("e"), name("f"))),
        ]);
        let b = list(vec![
            name("c"),
            binary("*", name("d"), name("e")),
            binary("+", name("a"), name("x")),
        ]);
        assert_eq!(
            tree_distance(Some(&a), Some(&b)),
            tree_distance(Some(&b), Some(&a))
        );
    }
}
