pub mod config;
pub mod embedding;
pub mod error;
pub mod io;
pub mod models;
pub mod stages;

pub use config::PipelineConfig;
pub use embedding::{EmbeddingLookup, WordVectors};
pub use error::CoherenceError;
pub use io::{
    discover_transcripts, load_stopwords, load_transcript, parse_transcript_json, ScoreBreakdown,
    ScoreReport,
};
pub use models::{FileScore, PairScore, StopwordSet, TranscriptRecord, Turn};
pub use stages::{
    aggregate, cosine_similarity, merge_turns, score_corpus, score_file, score_pair,
    score_records, score_turns, top_k, ScoringContext,
};
