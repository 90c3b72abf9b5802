use crate::error::BuildError;
use crate::leaf_end::LeafEnd;
use crate::node::Node;
use crate::pending::PendingLinks;
use crate::remainder::Remainder;
use crate::tree::BuildStats;
use slotmap::{DefaultKey, SlotMap};
use tracing::trace;

/// Outcome of a single suffix extension.
#[derive(Debug, Clone, Copy)]
pub(crate) enum Extension {
    /// The suffix was absent and a new leaf was attached. `split` holds the
    /// new internal node when the leaf had to branch off mid-edge.
    Added {
        active: DefaultKey,
        split: Option<DefaultKey>,
    },
    /// The suffix is already present: `matched` characters of it sit below
    /// `active`. Nothing was created and the phase stops here.
    Present { active: DefaultKey, matched: usize },
}

impl Extension {
    fn active(&self) -> DefaultKey {
        match self {
            Extension::Added { active, .. } | Extension::Present { active, .. } => *active,
        }
    }

    fn created(&self) -> Option<DefaultKey> {
        match self {
            Extension::Added { split, .. } => *split,
            Extension::Present { .. } => None,
        }
    }
}

/// Online suffix-tree construction over one input string.
///
/// Runs one phase per input byte. Each phase first advances the shared leaf
/// end (every existing leaf grows for free), then extends the tree with the
/// pending suffixes until one of them turns out to be already present.
pub(crate) struct TreeBuilder<'a> {
    text: &'a [u8],
    nodes: SlotMap<DefaultKey, Node>,
    root: DefaultKey,

    /// Deepest fully matched node, the resumption point between extensions.
    active_node: DefaultKey,
    /// Suffix characters matched but not yet walked past (skip/count state).
    remainder: Remainder,
    /// Split nodes awaiting their suffix link.
    pending: PendingLinks,
    /// Shared end of every open leaf edge.
    leaf_end: LeafEnd,
    /// First suffix not yet explicitly inserted.
    next_suffix: usize,

    stats: BuildStats,
}

impl<'a> TreeBuilder<'a> {
    pub(crate) fn new(text: &'a [u8]) -> Self {
        let mut nodes = SlotMap::new();
        let root = nodes.insert(Node::internal(0, 0, None));
        nodes[root].suffix_link = Some(root);

        Self {
            text,
            nodes,
            root,
            active_node: root,
            remainder: Remainder::new(),
            pending: PendingLinks::new(),
            leaf_end: LeafEnd::new(),
            next_suffix: 0,
            stats: BuildStats::default(),
        }
    }

    /// Runs every phase and hands the finished arena back.
    pub(crate) fn build(
        mut self,
    ) -> Result<(SlotMap<DefaultKey, Node>, DefaultKey, BuildStats), BuildError> {
        for i in 0..self.text.len() {
            self.phase(i)?;
        }
        Ok((self.nodes, self.root, self.stats))
    }

    // ========================================================================
    // Phase loop
    // ========================================================================

    /// Processes phase `i`, folding the byte at position `i` into the tree.
    fn phase(&mut self, i: usize) -> Result<(), BuildError> {
        // Every existing leaf must see the new character before any
        // extension of this phase runs.
        self.leaf_end.increment();

        let mut j = self.next_suffix;
        while j <= i {
            let ext = self.extend(i)?;
            self.active_node = ext.active();
            self.resolve_pending_link(&ext);

            match ext {
                Extension::Added { .. } => {
                    // The root has no suffix link that shortens the suffix
                    // for us, so drop one remainder character instead.
                    if self.active_node == self.root {
                        self.remainder.decrease(1);
                    }
                    self.active_node = self.nodes[self.active_node]
                        .suffix_link
                        .ok_or(BuildError::Invariant("active node has no suffix link"))?;
                    j += 1;
                    self.next_suffix = j;
                }
                Extension::Present { matched, .. } => {
                    // Every remaining suffix of this phase is already in the
                    // tree; remember how far this one reached and stop.
                    self.remainder.increase(i + 1 - matched, i);
                    break;
                }
            }
        }
        Ok(())
    }

    /// Gives the node left pending by the previous extension its suffix
    /// link: the node created by this extension when there is one, otherwise
    /// the active node this extension ended on. Both are the canonical node
    /// for the pending node's label minus its first character.
    fn resolve_pending_link(&mut self, ext: &Extension) {
        self.pending.push(ext.created());
        if let Some(prev) = self.pending.pull() {
            let target = ext.created().unwrap_or_else(|| ext.active());
            self.nodes[prev].suffix_link = Some(target);
            trace!(?prev, ?target, "assigned suffix link");
        }
    }

    // ========================================================================
    // Extension engine
    // ========================================================================

    /// Runs one extension against the phase character at `i`.
    ///
    /// Descends from the active node matching the unresolved suffix tail.
    /// Fully covered edges are crossed by comparing lengths alone; only the
    /// newest character `text[i]` is ever compared against edge content,
    /// since everything before it matched in earlier phases.
    fn extend(&mut self, i: usize) -> Result<Extension, BuildError> {
        // Resume where the remainder left off; with nothing pending, only
        // the newest one-character suffix needs insertion.
        let mut j = if self.remainder.is_empty() {
            i
        } else {
            self.remainder.start()
        };
        let mut active = self.active_node;
        let mut branch = self.active_node;

        // Select or create the first branch below the starting node.
        match self.child(branch, self.text[j]) {
            Some(child) => {
                active = branch;
                branch = child;
            }
            None => {
                self.add_leaf(branch, j);
                return Ok(Extension::Added {
                    active: branch,
                    split: None,
                });
            }
        }

        loop {
            let len = self.nodes[branch].edge_len();
            if i + 1 - j > len {
                // The suffix outruns this edge: cross it whole, then pick
                // the next branch one character past its end.
                self.remainder.decrease(len);
                j += len;
                match self.child(branch, self.text[j]) {
                    Some(child) => {
                        active = branch;
                        branch = child;
                    }
                    None => {
                        self.add_leaf(branch, j);
                        return Ok(Extension::Added {
                            active: branch,
                            split: None,
                        });
                    }
                }
            } else {
                // The suffix ends on this edge.
                let edge_pos = self.nodes[branch].start + (i - j);
                self.stats.char_comparisons += 1;
                if self.text[i] != self.text[edge_pos] {
                    let split = self.split_edge(branch, j, i - j)?;
                    return Ok(Extension::Added {
                        active,
                        split: Some(split),
                    });
                }
                return Ok(Extension::Present {
                    active,
                    matched: i + 1 - j,
                });
            }
        }
    }

    /// Child of `node` whose edge starts with `byte`, if any.
    #[inline]
    fn child(&mut self, node: DefaultKey, byte: u8) -> Option<DefaultKey> {
        self.stats.char_comparisons += 1;
        self.nodes[node].children.get(&byte).copied()
    }

    /// Attaches a fresh open leaf for the suffix tail starting at `start`.
    fn add_leaf(&mut self, father: DefaultKey, start: usize) -> DefaultKey {
        let leaf = self
            .nodes
            .insert(Node::leaf(start, self.leaf_end.clone(), father));
        self.nodes[father].children.insert(self.text[start], leaf);
        self.stats.leaves += 1;
        trace!(start, "attached leaf");
        leaf
    }

    // ========================================================================
    // Edge split
    // ========================================================================

    /// Cuts the edge above `branch` after `matched` characters and hangs a
    /// new open leaf for the suffix starting at `k` off the cut point.
    ///
    /// The freed prefix becomes a new internal node that takes `branch`'s
    /// slot under its father; `branch` keeps its whole subtree and shrinks
    /// to the rest of the edge. Pure in-memory surgery with no partial
    /// state. Returns the prefix node, which still awaits its suffix link.
    fn split_edge(
        &mut self,
        branch: DefaultKey,
        k: usize,
        matched: usize,
    ) -> Result<DefaultKey, BuildError> {
        let branch_start = self.nodes[branch].start;
        let father = self.nodes[branch]
            .father
            .ok_or(BuildError::Invariant("split target has no father"))?;

        let prefix = self
            .nodes
            .insert(Node::internal(branch_start, branch_start + matched, Some(father)));

        // The old branch now begins where the cut ends.
        self.nodes[branch].start = branch_start + matched;
        self.nodes[branch].father = Some(prefix);

        let leaf = self
            .nodes
            .insert(Node::leaf(k + matched, self.leaf_end.clone(), prefix));

        self.nodes[prefix]
            .children
            .insert(self.text[branch_start + matched], branch);
        self.nodes[prefix].children.insert(self.text[k + matched], leaf);

        // The father's slot that used to reach `branch` now reaches the
        // prefix instead.
        self.nodes[father].children.insert(self.text[branch_start], prefix);

        self.stats.internal_nodes += 1;
        self.stats.leaves += 1;
        trace!(start = branch_start, matched, "split edge");
        Ok(prefix)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn built(text: &[u8]) -> (SlotMap<DefaultKey, Node>, DefaultKey, BuildStats) {
        TreeBuilder::new(text).build().expect("construction succeeds")
    }

    #[test]
    fn test_single_terminator() {
        let (nodes, root, stats) = built(&[0x00]);
        assert_eq!(nodes[root].children.len(), 1);
        assert_eq!(stats.leaves, 1);
        assert_eq!(stats.internal_nodes, 0);
    }

    #[test]
    fn test_distinct_bytes_hang_off_the_root() {
        let (nodes, root, stats) = built(b"abc\x00");
        assert_eq!(nodes[root].children.len(), 4);
        assert_eq!(stats.leaves, 4);
        assert_eq!(stats.internal_nodes, 0);
    }

    #[test]
    fn test_one_leaf_per_suffix() {
        let text = b"mississippi\x00";
        let (nodes, _, stats) = built(text);
        assert_eq!(stats.leaves, text.len());
        let leaves = nodes.values().filter(|node| node.is_leaf()).count();
        assert_eq!(leaves, text.len());
    }

    #[test]
    fn test_split_creates_internal_nodes() {
        // "banana" needs exactly the internal nodes for "a", "na" and "ana".
        let (_, _, stats) = built(b"banana\x00");
        assert_eq!(stats.internal_nodes, 3);
        assert_eq!(stats.leaves, 7);
    }

    #[test]
    fn test_internal_nodes_carry_suffix_links() {
        let (nodes, root, _) = built(b"banana\x00");
        for (key, node) in &nodes {
            if !node.is_leaf() && key != root {
                assert!(
                    node.suffix_link.is_some(),
                    "internal node {key:?} is missing its suffix link"
                );
            }
        }
    }

    #[test]
    fn test_labels_partition_each_level() {
        // Children of one node must start with distinct bytes, and every
        // node's label must be a valid slice of the input.
        let text = b"abracadabra\x00";
        let (nodes, _, _) = built(text);
        for node in nodes.values() {
            assert!(node.end_pos() <= text.len());
            assert!(node.start <= node.end_pos());
            for (&byte, &child) in &node.children {
                assert_eq!(text[nodes[child].start], byte);
            }
        }
    }
}
