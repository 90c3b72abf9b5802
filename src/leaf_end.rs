use std::cell::Cell;
use std::rc::Rc;

/// Shared end position of every open leaf edge.
///
/// All leaves created during one construction run end at the same position,
/// so a single counter stands in for all of them. Advancing it once per
/// phase lengthens every existing leaf edge at no cost; no leaf is ever
/// revisited to grow its label.
#[derive(Debug, Clone)]
pub(crate) struct LeafEnd(Rc<Cell<usize>>);

impl LeafEnd {
    /// Creates a fresh counter at position zero.
    ///
    /// Each construction run gets its own counter, so leaves from one run
    /// can never observe another run's position.
    pub(crate) fn new() -> Self {
        LeafEnd(Rc::new(Cell::new(0)))
    }

    /// Moves the shared end one character forward.
    ///
    /// Called exactly once per phase, before any extension of that phase, so
    /// every existing leaf sees the new character before new leaves appear.
    pub(crate) fn increment(&self) {
        self.0.set(self.0.get() + 1);
    }

    /// Current end position (exclusive).
    pub(crate) fn get(&self) -> usize {
        self.0.get()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starts_at_zero() {
        let end = LeafEnd::new();
        assert_eq!(end.get(), 0);
    }

    #[test]
    fn test_increment() {
        let end = LeafEnd::new();
        end.increment();
        end.increment();
        assert_eq!(end.get(), 2);
    }

    #[test]
    fn test_handles_share_position() {
        let end = LeafEnd::new();
        let handle = end.clone();
        end.increment();
        assert_eq!(handle.get(), 1);
    }

    #[test]
    fn test_fresh_counters_are_independent() {
        let first = LeafEnd::new();
        first.increment();
        let second = LeafEnd::new();
        assert_eq!(second.get(), 0);
    }
}
