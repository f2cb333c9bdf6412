use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::io::{BufRead, BufReader};
use std::path::Path;

use tracing::{debug, info};

use super::EmbeddingLookup;
use crate::error::{CoherenceError, Result};

/// In-memory word vector table loaded from a GloVe/word2vec text file
#[derive(Debug, Clone, Default)]
pub struct WordVectors {
    vectors: HashMap<String, Vec<f32>>,
    dimension: usize,
}

impl WordVectors {
    /// Load a table from the text format: `word v1 v2 ... vd`, one word per line
    ///
    /// A leading word2vec header (`<count> <dim>`) is skipped.
    pub fn load(path: &Path) -> Result<Self> {
        info!("Loading word vectors from {:?}", path);
        let file = std::fs::File::open(path).map_err(|e| CoherenceError::io(path, e))?;
        let table = Self::from_reader(BufReader::new(file))?;
        info!(
            "Loaded {} word vectors of dimension {}",
            table.len(),
            table.dimension
        );
        Ok(table)
    }

    /// Parse the text format from any buffered reader
    pub fn from_reader<R: BufRead>(reader: R) -> Result<Self> {
        let mut table = Self::default();

        for (index, line) in reader.lines().enumerate() {
            let line_no = index + 1;
            let line = line.map_err(|e| {
                CoherenceError::Embedding(format!("failed to read line {}: {}", line_no, e))
            })?;

            let mut fields = line.split_whitespace();
            let Some(word) = fields.next() else {
                continue;
            };
            let rest: Vec<&str> = fields.collect();

            if index == 0 && is_word2vec_header(word, &rest) {
                debug!("Skipping word2vec header: {}", line);
                continue;
            }

            let vector = rest
                .iter()
                .map(|v| v.parse::<f32>())
                .collect::<std::result::Result<Vec<f32>, _>>()
                .map_err(|e| {
                    CoherenceError::Embedding(format!(
                        "invalid value for {:?} on line {}: {}",
                        word, line_no, e
                    ))
                })?;

            if vector.iter().any(|v| !v.is_finite()) {
                return Err(CoherenceError::Embedding(format!(
                    "non-finite value for {:?} on line {}",
                    word, line_no
                )));
            }

            table.insert_row(word, vector, line_no)?;
        }

        if table.is_empty() {
            return Err(CoherenceError::Embedding(
                "no word vectors found".to_string(),
            ));
        }

        Ok(table)
    }

    /// Build a table from in-memory pairs; every vector must share one dimension
    pub fn from_pairs<W, I>(pairs: I) -> Result<Self>
    where
        W: Into<String>,
        I: IntoIterator<Item = (W, Vec<f32>)>,
    {
        let mut table = Self::default();
        for (index, (word, vector)) in pairs.into_iter().enumerate() {
            let word: String = word.into();
            table.insert_row(&word, vector, index + 1)?;
        }
        Ok(table)
    }

    fn insert_row(&mut self, word: &str, vector: Vec<f32>, line_no: usize) -> Result<()> {
        if vector.is_empty() {
            return Err(CoherenceError::Embedding(format!(
                "{:?} on line {} has no vector components",
                word, line_no
            )));
        }

        if self.dimension == 0 {
            self.dimension = vector.len();
        } else if vector.len() != self.dimension {
            return Err(CoherenceError::Embedding(format!(
                "{:?} on line {} has dimension {}, expected {}",
                word,
                line_no,
                vector.len(),
                self.dimension
            )));
        }

        // First occurrence wins
        if let Entry::Vacant(slot) = self.vectors.entry(word.to_string()) {
            slot.insert(vector);
        }
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.vectors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vectors.is_empty()
    }
}

impl EmbeddingLookup for WordVectors {
    fn lookup(&self, word: &str) -> Option<&[f32]> {
        self.vectors.get(word).map(Vec::as_slice)
    }

    fn dimension(&self) -> usize {
        self.dimension
    }
}

fn is_word2vec_header(first: &str, rest: &[&str]) -> bool {
    rest.len() == 1 && first.parse::<usize>().is_ok() && rest[0].parse::<usize>().is_ok()
}
