use slotmap::DefaultKey;

/// One-slot-deep delay queue for suffix-link assignment.
///
/// An internal node's link target only becomes known one extension after the
/// node is created, so freshly split nodes wait here for exactly one
/// push/pull cycle. Within an extension the queue is pushed first and pulled
/// second, so `pull` always yields the node created by the previous
/// extension.
#[derive(Debug, Default)]
pub(crate) struct PendingLinks {
    old: Option<DefaultKey>,
    new: Option<DefaultKey>,
}

impl PendingLinks {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Stores this extension's freshly created internal node, if any.
    pub(crate) fn push(&mut self, node: Option<DefaultKey>) {
        self.new = node;
    }

    /// Returns the node pending from the previous extension and promotes the
    /// newest one into its place.
    pub(crate) fn pull(&mut self) -> Option<DefaultKey> {
        let old = self.old;
        self.old = self.new.take();
        old
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use slotmap::SlotMap;

    fn keys(n: usize) -> Vec<DefaultKey> {
        let mut arena: SlotMap<DefaultKey, ()> = SlotMap::new();
        (0..n).map(|_| arena.insert(())).collect()
    }

    #[test]
    fn test_empty_pull() {
        let mut pending = PendingLinks::new();
        assert_eq!(pending.pull(), None);
    }

    #[test]
    fn test_one_cycle_delay() {
        let nodes = keys(2);
        let mut pending = PendingLinks::new();

        pending.push(Some(nodes[0]));
        assert_eq!(pending.pull(), None);

        pending.push(Some(nodes[1]));
        assert_eq!(pending.pull(), Some(nodes[0]));

        pending.push(None);
        assert_eq!(pending.pull(), Some(nodes[1]));

        pending.push(None);
        assert_eq!(pending.pull(), None);
    }
}
