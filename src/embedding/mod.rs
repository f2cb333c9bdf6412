pub mod word_vectors;

pub use word_vectors::*;

/// Read-only mapping from vocabulary word to a fixed-dimension vector
///
/// Lookups are exact and case-sensitive. A miss is `None`, never a zero vector.
pub trait EmbeddingLookup {
    fn lookup(&self, word: &str) -> Option<&[f32]>;

    /// Length of every vector in the table
    fn dimension(&self) -> usize;
}
