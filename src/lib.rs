//! # Ukkonen - Linear-Time Suffix Arrays
//!
//! A Rust implementation of Ukkonen's online suffix-tree construction, used
//! to derive the suffix array of a sentinel-terminated byte string.
//!
//! The tree is grown one character per phase. All open leaf edges share a
//! single end counter, so every existing leaf lengthens for free when a
//! phase starts, and an active-point/remainder pair carried between phases
//! keeps the total work linear in the input length. A final depth-first
//! pass over the finished tree, visiting children in ascending byte order,
//! reads the suffix array straight off the leaves.
//!
//! ## Example
//!
//! ```
//! use ukkonen_rs::SuffixTree;
//!
//! let tree = SuffixTree::build(b"banana$").unwrap();
//! assert_eq!(tree.suffix_array(), vec![6, 5, 3, 1, 0, 4, 2]);
//! ```
//!
//! ## Performance
//!
//! - O(1) amortized work per input character during construction
//! - O(n) extraction in a single depth-first pass
//! - Memory-efficient using generational indices (SlotMap)

mod builder;
mod error;
mod extract;
mod leaf_end;
mod node;
mod pending;
mod remainder;
mod tree;

#[cfg(test)]
mod tests;

pub use error::BuildError;
pub use tree::{suffix_array, BuildStats, SuffixTree, SENTINEL};
