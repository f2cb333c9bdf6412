use std::path::PathBuf;

use serde::Serialize;

/// Best similarity scores for one adjacent turn pair
#[derive(Debug, Clone, Serialize)]
pub struct PairScore {
    /// Index of the first turn of the pair; the second is `turn_index + 1`
    pub turn_index: usize,
    pub speaker_a: String,
    pub speaker_b: String,
    /// Tokens of each turn that produced a vector
    pub embedded_a: usize,
    pub embedded_b: usize,
    /// Largest cosine similarities, descending
    pub top: Vec<f32>,
}

impl PairScore {
    /// Sum of this pair's kept scores
    pub fn sum(&self) -> f64 {
        self.top.iter().fold(0.0, |acc, &s| acc + f64::from(s))
    }
}

/// Coherence result for a single transcript file
#[derive(Debug, Clone, Serialize)]
pub struct FileScore {
    pub path: PathBuf,
    /// Records scored (after any debug truncation)
    pub records: usize,
    pub turns: usize,
    /// Distinct speakers, sorted
    pub speakers: Vec<String>,
    /// Pairs contributing at least one score
    pub pairs: Vec<PairScore>,
    /// Pairs where either side had nothing to embed
    pub dropped_pairs: usize,
    /// Sum of every kept score across all pairs
    pub total: f64,
}

impl FileScore {
    pub fn scored_pairs(&self) -> usize {
        self.pairs.len()
    }
}
