use serde::{Deserialize, Serialize};

/// One line of a transcript: who spoke and what they said
///
/// On disk a record is a two-element array, `["A", ["so", "anyway"]]`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "(String, Vec<String>)", into = "(String, Vec<String>)")]
pub struct TranscriptRecord {
    /// Speaker label as it appears in the source transcript
    pub speaker: String,
    /// Tokens of the line, already cleaned and split
    pub tokens: Vec<String>,
}

impl TranscriptRecord {
    pub fn new(speaker: impl Into<String>, tokens: Vec<String>) -> Self {
        Self {
            speaker: speaker.into(),
            tokens,
        }
    }
}

impl From<(String, Vec<String>)> for TranscriptRecord {
    fn from((speaker, tokens): (String, Vec<String>)) -> Self {
        Self { speaker, tokens }
    }
}

impl From<TranscriptRecord> for (String, Vec<String>) {
    fn from(record: TranscriptRecord) -> Self {
        (record.speaker, record.tokens)
    }
}

/// A turn is a maximal run of consecutive records from the same speaker
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Turn {
    /// Speaker for every record merged into this turn
    pub speaker: String,
    /// Tokens of all merged records, in original order
    pub tokens: Vec<String>,
}

impl From<TranscriptRecord> for Turn {
    fn from(record: TranscriptRecord) -> Self {
        Self {
            speaker: record.speaker,
            tokens: record.tokens,
        }
    }
}
