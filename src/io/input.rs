use std::path::{Path, PathBuf};

use tracing::debug;
use walkdir::WalkDir;

use crate::error::{CoherenceError, Result};
use crate::models::{StopwordSet, TranscriptRecord};

/// Load a transcript file into its ordered records
///
/// The whole file is rejected if it is missing, unreadable or malformed.
pub fn load_transcript(path: &Path) -> Result<Vec<TranscriptRecord>> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| CoherenceError::deserialization(path, e))?;
    parse_transcript_json(&content).map_err(|e| match e {
        CoherenceError::Deserialization { message, .. } => {
            CoherenceError::deserialization(path, message)
        }
        other => other,
    })
}

/// Parse a JSON list of `[speaker, [tokens...]]` records
pub fn parse_transcript_json(json: &str) -> Result<Vec<TranscriptRecord>> {
    serde_json::from_str(json).map_err(|e| CoherenceError::deserialization("<inline>", e))
}

/// Read a stopword list: one word per line, line terminator stripped
pub fn load_stopwords(path: &Path) -> Result<StopwordSet> {
    let content = std::fs::read_to_string(path).map_err(|e| CoherenceError::io(path, e))?;
    let stopwords = parse_stopwords(&content);
    debug!("Loaded {} stopwords from {:?}", stopwords.len(), path);
    Ok(stopwords)
}

/// Parse stopwords from text
///
/// Only the line terminator is removed; surrounding spaces are kept so that
/// matching stays exact.
pub fn parse_stopwords(content: &str) -> StopwordSet {
    content
        .split_terminator('\n')
        .map(|line| line.strip_suffix('\r').unwrap_or(line))
        .collect()
}

/// List transcript files directly inside `dir` with the given extension, sorted by path
pub fn discover_transcripts(dir: &Path, extension: &str) -> Result<Vec<PathBuf>> {
    let mut paths = Vec::new();

    for entry in WalkDir::new(dir).min_depth(1).max_depth(1) {
        let entry = entry.map_err(|e| {
            let source = e
                .into_io_error()
                .unwrap_or_else(|| std::io::Error::other("directory walk failed"));
            CoherenceError::io(dir, source)
        })?;

        if !entry.file_type().is_file() {
            continue;
        }

        let matches = entry
            .path()
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case(extension));
        if matches {
            paths.push(entry.into_path());
        }
    }

    paths.sort();
    Ok(paths)
}
