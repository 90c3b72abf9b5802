use crate::leaf_end::LeafEnd;
use ahash::AHashMap as HashMap;
use slotmap::DefaultKey;

/// Where the edge label above a node ends.
///
/// Internal edges are closed over a fixed range; leaf edges track the shared
/// end counter, so their labels grow as phases advance without being touched.
#[derive(Debug, Clone)]
pub(crate) enum EdgeEnd {
    /// Closed edge: the label ends at a fixed position (exclusive).
    Fixed(usize),
    /// Open leaf edge: the label ends wherever the shared counter stands.
    Open(LeafEnd),
}

/// A tree vertex together with the label of the edge above it.
///
/// The label itself is never stored; it is the `text[start..end_pos()]`
/// slice of the input, recomputed at read time so open edges stay current.
/// All references between nodes are arena keys, never owning handles.
#[derive(Debug)]
pub(crate) struct Node {
    /// First position of the edge label in the input.
    pub start: usize,
    /// End of the edge label.
    pub end: EdgeEnd,
    /// Node whose child map this node appears in; `None` for the root.
    pub father: Option<DefaultKey>,
    /// Child per first byte of the edge below it. No two children of one
    /// node ever start with the same byte.
    pub children: HashMap<u8, DefaultKey>,
    /// Node whose label equals this node's label minus its first character.
    /// Internal nodes only, assigned at most one phase after creation; the
    /// root links to itself.
    pub suffix_link: Option<DefaultKey>,
}

impl Node {
    /// Creates a closed node covering `text[start..end)`.
    pub(crate) fn internal(start: usize, end: usize, father: Option<DefaultKey>) -> Self {
        Self {
            start,
            end: EdgeEnd::Fixed(end),
            father,
            children: HashMap::new(),
            suffix_link: None,
        }
    }

    /// Creates an open leaf starting at `start` and ending at the shared
    /// counter.
    pub(crate) fn leaf(start: usize, end: LeafEnd, father: DefaultKey) -> Self {
        Self {
            start,
            end: EdgeEnd::Open(end),
            father: Some(father),
            children: HashMap::new(),
            suffix_link: None,
        }
    }

    /// Resolved end position of the edge label (exclusive).
    pub(crate) fn end_pos(&self) -> usize {
        match &self.end {
            EdgeEnd::Fixed(end) => *end,
            EdgeEnd::Open(end) => end.get(),
        }
    }

    /// Length of the edge label above this node.
    pub(crate) fn edge_len(&self) -> usize {
        self.end_pos() - self.start
    }

    pub(crate) fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }
}
