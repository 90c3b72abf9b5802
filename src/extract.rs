use crate::node::Node;
use slotmap::{DefaultKey, SlotMap};

/// Extracts the suffix array from a finished tree.
///
/// Walks the tree depth first with an explicit stack, visiting children in
/// ascending byte order at every node so that leaves appear in
/// lexicographic suffix order. Consumers rely on that ordering, so the
/// child bytes are sorted explicitly rather than left to map layout.
///
/// A leaf whose path from the root carries `path_len` characters stands for
/// the suffix starting at `n - path_len`. The result is a fresh vector per
/// call; no state survives between invocations.
pub(crate) fn suffix_array(
    nodes: &SlotMap<DefaultKey, Node>,
    root: DefaultKey,
    n: usize,
) -> Vec<usize> {
    let mut positions = Vec::with_capacity(n);
    // (node, label length of the path above it)
    let mut stack = vec![(root, 0usize)];

    while let Some((key, above)) = stack.pop() {
        let node = &nodes[key];
        let path_len = above + node.edge_len();

        if node.is_leaf() {
            positions.push(n - path_len);
            continue;
        }

        let mut children: Vec<(u8, DefaultKey)> =
            node.children.iter().map(|(&byte, &child)| (byte, child)).collect();
        // Descending on the stack so the pops come out ascending.
        children.sort_unstable_by(|a, b| b.0.cmp(&a.0));
        for (_, child) in children {
            stack.push((child, path_len));
        }
    }

    positions
}
