/// Errors surfaced by suffix-tree construction.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum BuildError {
    /// The input did not end with the declared sentinel byte. Nothing is
    /// built; the caller receives no partial tree.
    #[error("input must end with the sentinel byte {expected:?}, found {found:?}")]
    MissingSentinel {
        expected: u8,
        found: Option<u8>,
    },

    /// A structural invariant of the construction did not hold. Indicates a
    /// defect in the builder, never expected in correct operation.
    #[error("construction invariant violated: {0}")]
    Invariant(&'static str),
}
