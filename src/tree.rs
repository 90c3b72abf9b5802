use crate::builder::TreeBuilder;
use crate::error::BuildError;
use crate::extract;
use crate::node::Node;
use slotmap::{DefaultKey, SlotMap};
use std::fmt;
use tracing::debug;

/// Byte every input must end with.
///
/// It is replaced internally by the minimal byte `0x00`, so ordinary text,
/// newlines included, sorts above the terminator. The sentinel must not
/// occur anywhere else in the input; that precondition is the caller's and
/// is not checked. Violating it yields an incorrect array, not a panic.
pub const SENTINEL: u8 = b'$';

/// Terminator actually stored in place of the sentinel.
const TERMINATOR: u8 = 0x00;

/// A suffix tree over a sentinel-terminated byte string.
///
/// Built online in a single left-to-right pass and immutable afterwards.
/// The arena owns every node; father, child and suffix-link references are
/// plain indices into it, so the inherent cycles of the structure never
/// become ownership cycles.
#[derive(Debug)]
pub struct SuffixTree {
    nodes: SlotMap<DefaultKey, Node>,
    root: DefaultKey,
    text: Vec<u8>,
    stats: BuildStats,
}

impl SuffixTree {
    /// Builds the suffix tree of `input` in linear time.
    ///
    /// `input` must end with [`SENTINEL`]; otherwise
    /// [`BuildError::MissingSentinel`] is returned and nothing is built.
    pub fn build(input: &[u8]) -> Result<Self, BuildError> {
        match input.last() {
            Some(&byte) if byte == SENTINEL => {}
            found => {
                return Err(BuildError::MissingSentinel {
                    expected: SENTINEL,
                    found: found.copied(),
                })
            }
        }

        let mut text = input.to_vec();
        text[input.len() - 1] = TERMINATOR;

        let (nodes, root, stats) = TreeBuilder::new(&text).build()?;
        debug!(
            len = text.len(),
            internal = stats.internal_nodes,
            "built suffix tree"
        );

        Ok(Self {
            nodes,
            root,
            text,
            stats,
        })
    }

    /// Length of the sentinel-terminated input.
    pub fn len(&self) -> usize {
        self.text.len()
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Counters collected during construction, useful for checking the
    /// linear-work bound.
    pub fn stats(&self) -> BuildStats {
        self.stats
    }

    /// Extracts the suffix array: the starting positions of all suffixes in
    /// lexicographic order.
    ///
    /// Returns a fresh vector on every call.
    pub fn suffix_array(&self) -> Vec<usize> {
        extract::suffix_array(&self.nodes, self.root, self.text.len())
    }

}

impl fmt::Display for SuffixTree {
    /// Renders one indented, ascii-escaped edge label per line, children in
    /// ascending byte order. Meant for debugging small inputs.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut stack = vec![(self.root, 0usize)];
        while let Some((key, depth)) = stack.pop() {
            let node = &self.nodes[key];
            if node.father.is_some() {
                let label = &self.text[node.start..node.end_pos()];
                writeln!(f, "{:indent$}{}", "", label.escape_ascii(), indent = depth * 2)?;
            }

            let child_depth = if node.father.is_some() { depth + 1 } else { depth };
            let mut children: Vec<(u8, DefaultKey)> =
                node.children.iter().map(|(&byte, &child)| (byte, child)).collect();
            // Reverse order on the stack pops ascending.
            children.sort_unstable_by(|a, b| b.0.cmp(&a.0));
            for (_, child) in children {
                stack.push((child, child_depth));
            }
        }
        Ok(())
    }
}

/// Counters collected while a tree is built.
///
/// Construction does a constant amortized amount of work per input byte, so
/// each of these grows linearly with the input.
#[derive(Debug, Default, Clone, Copy)]
pub struct BuildStats {
    /// Internal nodes created by edge splits (the root is not counted).
    pub internal_nodes: usize,
    /// Leaves created; exactly one per suffix on a finished tree.
    pub leaves: usize,
    /// Characters examined while descending: child lookups plus edge
    /// comparisons.
    pub char_comparisons: usize,
}

/// Builds the suffix tree of `input` and extracts its suffix array in one
/// call.
pub fn suffix_array(input: &[u8]) -> Result<Vec<usize>, BuildError> {
    Ok(SuffixTree::build(input)?.suffix_array())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_rejects_missing_sentinel() {
        let err = SuffixTree::build(b"banana").unwrap_err();
        assert_eq!(
            err,
            BuildError::MissingSentinel {
                expected: SENTINEL,
                found: Some(b'a'),
            }
        );
    }

    #[test]
    fn test_build_rejects_empty_input() {
        let err = SuffixTree::build(b"").unwrap_err();
        assert_eq!(
            err,
            BuildError::MissingSentinel {
                expected: SENTINEL,
                found: None,
            }
        );
    }

    #[test]
    fn test_len_counts_the_sentinel() {
        let tree = SuffixTree::build(b"abc$").expect("sentinel present");
        assert_eq!(tree.len(), 4);
        assert!(!tree.is_empty());
    }

    #[test]
    fn test_display_lists_every_edge() {
        let tree = SuffixTree::build(b"banana$").expect("sentinel present");
        let rendered = tree.to_string();
        // The terminator leaf under the root and the escaped "na" edges.
        assert!(rendered.contains("\\x00"));
        assert!(rendered.contains("na"));
    }

    #[test]
    fn test_convenience_matches_methods() {
        let via_tree = SuffixTree::build(b"abracadabra$")
            .expect("sentinel present")
            .suffix_array();
        let direct = suffix_array(b"abracadabra$").expect("sentinel present");
        assert_eq!(via_tree, direct);
    }
}
