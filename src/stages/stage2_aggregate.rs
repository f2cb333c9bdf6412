use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use crate::config::PipelineConfig;
use crate::embedding::EmbeddingLookup;
use crate::error::Result;
use crate::io::load_transcript;
use crate::models::{FileScore, PairScore, StopwordSet, TranscriptRecord};

use super::{merge_turns, score_turns};

/// Shared, read-only resources for a scoring run
#[derive(Clone, Copy)]
pub struct ScoringContext<'a> {
    pub embeddings: &'a dyn EmbeddingLookup,
    pub stopwords: &'a StopwordSet,
}

impl<'a> ScoringContext<'a> {
    pub fn new(embeddings: &'a dyn EmbeddingLookup, stopwords: &'a StopwordSet) -> Self {
        Self {
            embeddings,
            stopwords,
        }
    }
}

/// Sum of every kept score over all pairs
pub fn aggregate(pairs: &[PairScore]) -> f64 {
    pairs.iter().fold(0.0, |acc, pair| acc + pair.sum())
}

/// Score already-loaded records: merge, score pairs, aggregate
///
/// Fails on an empty record list or an invalid config.
pub fn score_records(
    path: &Path,
    mut records: Vec<TranscriptRecord>,
    ctx: ScoringContext<'_>,
    config: &PipelineConfig,
) -> Result<FileScore> {
    config.validate()?;
    config.limit_records(&mut records);

    let turns = merge_turns(&records)?;
    let pairs = score_turns(&turns, ctx.embeddings, ctx.stopwords, config.top_k);
    let dropped_pairs = turns.len().saturating_sub(1) - pairs.len();
    let total = aggregate(&pairs);
    let speakers: Vec<String> = turns
        .iter()
        .map(|t| t.speaker.clone())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect();

    debug!(
        "{:?}: {} records, {} turns, {} pairs scored, {} dropped",
        path,
        records.len(),
        turns.len(),
        pairs.len(),
        dropped_pairs
    );

    Ok(FileScore {
        path: path.to_path_buf(),
        records: records.len(),
        turns: turns.len(),
        speakers,
        pairs,
        dropped_pairs,
        total,
    })
}

/// Load and score one transcript file
///
/// Returns `None` for a transcript with no records.
pub fn score_file(
    path: &Path,
    ctx: ScoringContext<'_>,
    config: &PipelineConfig,
) -> Result<Option<FileScore>> {
    let records = load_transcript(path)?;
    if records.is_empty() {
        warn!("Skipping empty transcript {:?}", path);
        return Ok(None);
    }

    score_records(path, records, ctx, config).map(Some)
}

/// Score every file in order, stopping at the first failure
///
/// `on_file` is called as soon as each file's score is ready.
pub fn score_corpus<F>(
    paths: &[PathBuf],
    ctx: ScoringContext<'_>,
    config: &PipelineConfig,
    mut on_file: F,
) -> Result<Vec<FileScore>>
where
    F: FnMut(&FileScore),
{
    let mut paths = paths.to_vec();
    let discovered = paths.len();
    config.limit_files(&mut paths);
    if paths.len() < discovered {
        info!(
            "Debug mode: processing {} of {} transcripts",
            paths.len(),
            discovered
        );
    }

    let mut scores = Vec::with_capacity(paths.len());
    for path in &paths {
        if let Some(score) = score_file(path, ctx, config)? {
            on_file(&score);
            scores.push(score);
        }
    }

    Ok(scores)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::embedding::WordVectors;
    use crate::error::CoherenceError;

    fn table() -> WordVectors {
        WordVectors::from_pairs([
            ("hello", vec![1.0, 0.0]),
            ("hi", vec![1.0, 0.0]),
            ("there", vec![0.0, 1.0]),
            ("world", vec![1.0, 1.0]),
        ])
        .unwrap()
    }

    fn write(dir: &Path, name: &str, json: &str) -> PathBuf {
        let path = dir.join(name);
        std::fs::write(&path, json).unwrap();
        path
    }

    #[test]
    fn test_aggregate_sums_all_pairs() {
        let pair = |top: Vec<f32>| PairScore {
            turn_index: 0,
            speaker_a: "A".to_string(),
            speaker_b: "B".to_string(),
            embedded_a: 1,
            embedded_b: 1,
            top,
        };
        let pairs = vec![pair(vec![1.0, 0.5, 0.25]), pair(vec![0.25])];

        assert!((aggregate(&pairs) - 2.0).abs() < 1e-9);
        assert_eq!(aggregate(&[]), 0.0);
    }

    #[test]
    fn test_unscored_file_totals_positive_zero() {
        let table = table();
        let stopwords = StopwordSet::new();
        let ctx = ScoringContext::new(&table, &stopwords);
        let records =
            crate::io::parse_transcript_json(r#"[["A", ["hello"]], ["A", ["hello"]]]"#).unwrap();

        let score =
            score_records(Path::new("t.json"), records, ctx, &PipelineConfig::default()).unwrap();

        assert_eq!(score.turns, 1);
        assert!(!score.total.is_sign_negative());
        assert_eq!(format!("{}", score.total), "0");
        assert!(!aggregate(&[]).is_sign_negative());
    }

    #[test]
    fn test_zero_top_k_rejected() {
        let table = table();
        let stopwords = StopwordSet::new();
        let ctx = ScoringContext::new(&table, &stopwords);
        let records =
            crate::io::parse_transcript_json(r#"[["A", ["hello"]], ["B", ["hi"]]]"#).unwrap();
        let config = PipelineConfig {
            top_k: 0,
            ..Default::default()
        };

        let err = score_records(Path::new("t.json"), records, ctx, &config).unwrap_err();
        assert!(matches!(err, CoherenceError::InvalidConfig(_)));
    }

    #[test]
    fn test_score_records_end_to_end() {
        let table = table();
        let stopwords: StopwordSet = ["the"].into_iter().collect();
        let ctx = ScoringContext::new(&table, &stopwords);
        let records = crate::io::parse_transcript_json(
            r#"[
                ["A", ["hello"]],
                ["A", ["there"]],
                ["B", ["the"]],
                ["A", ["hi"]],
                ["B", ["hello", "world"]]
            ]"#,
        )
        .unwrap();

        let score =
            score_records(Path::new("t.json"), records, ctx, &PipelineConfig::default()).unwrap();

        // Turns: A[hello there], B[the], A[hi], B[hello world]
        assert_eq!(score.records, 5);
        assert_eq!(score.turns, 4);
        assert_eq!(score.dropped_pairs, 2);
        assert_eq!(score.scored_pairs(), 1);
        assert_eq!(score.speakers, vec!["A", "B"]);
        // hi x {hello, world} -> [1.0, 1/sqrt(2)]
        let expected = 1.0 + std::f64::consts::FRAC_1_SQRT_2;
        assert!((score.total - expected).abs() < 1e-5);
    }

    #[test]
    fn test_debug_truncates_records() {
        let table = table();
        let stopwords = StopwordSet::new();
        let ctx = ScoringContext::new(&table, &stopwords);
        let records = crate::io::parse_transcript_json(
            r#"[["A", ["hello"]], ["B", ["hi"]], ["A", ["there"]]]"#,
        )
        .unwrap();
        let config = PipelineConfig {
            debug: true,
            max_records: 2,
            ..Default::default()
        };

        let score = score_records(Path::new("t.json"), records, ctx, &config).unwrap();

        assert_eq!(score.records, 2);
        assert_eq!(score.turns, 2);
        assert!((score.total - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_empty_records_rejected_by_merger() {
        let table = table();
        let stopwords = StopwordSet::new();
        let ctx = ScoringContext::new(&table, &stopwords);

        let err = score_records(Path::new("t.json"), vec![], ctx, &PipelineConfig::default())
            .unwrap_err();
        assert!(matches!(err, CoherenceError::EmptyInput));
    }

    #[test]
    fn test_score_file_skips_empty_transcript() {
        let dir = tempfile::tempdir().unwrap();
        let path = write(dir.path(), "empty.json", "[]");
        let table = table();
        let stopwords = StopwordSet::new();

        let score = score_file(
            &path,
            ScoringContext::new(&table, &stopwords),
            &PipelineConfig::default(),
        )
        .unwrap();
        assert!(score.is_none());
    }

    #[test]
    fn test_corpus_reports_each_file_in_order() {
        let dir = tempfile::tempdir().unwrap();
        let a = write(dir.path(), "a.json", r#"[["A", ["hello"]], ["B", ["hi"]]]"#);
        let b = write(dir.path(), "b.json", "[]");
        let c = write(dir.path(), "c.json", r#"[["A", ["there"]], ["B", ["hi"]]]"#);
        let table = table();
        let stopwords = StopwordSet::new();

        let mut seen = Vec::new();
        let scores = score_corpus(
            &[a.clone(), b, c.clone()],
            ScoringContext::new(&table, &stopwords),
            &PipelineConfig::default(),
            |score| seen.push(score.total),
        )
        .unwrap();

        assert_eq!(scores.len(), 2);
        assert_eq!(scores[0].path, a);
        assert_eq!(scores[1].path, c);
        assert!((seen[0] - 1.0).abs() < 1e-6);
        assert!(seen[1].abs() < 1e-6);
    }

    #[test]
    fn test_corpus_debug_limits_files() {
        let dir = tempfile::tempdir().unwrap();
        let paths: Vec<PathBuf> = (0..3)
            .map(|i| {
                write(
                    dir.path(),
                    &format!("{i}.json"),
                    r#"[["A", ["hello"]], ["B", ["hi"]]]"#,
                )
            })
            .collect();
        let table = table();
        let stopwords = StopwordSet::new();
        let config = PipelineConfig {
            debug: true,
            max_files: 2,
            ..Default::default()
        };

        let scores = score_corpus(
            &paths,
            ScoringContext::new(&table, &stopwords),
            &config,
            |_| {},
        )
        .unwrap();
        assert_eq!(scores.len(), 2);
    }

    #[test]
    fn test_corpus_stops_on_load_failure() {
        let dir = tempfile::tempdir().unwrap();
        let good = write(dir.path(), "a.json", r#"[["A", ["hello"]], ["B", ["hi"]]]"#);
        let bad = write(dir.path(), "b.json", "{ not a transcript");
        let after = write(dir.path(), "c.json", r#"[["A", ["hello"]], ["B", ["hi"]]]"#);
        let table = table();
        let stopwords = StopwordSet::new();

        let mut reported = 0;
        let result = score_corpus(
            &[good, bad, after],
            ScoringContext::new(&table, &stopwords),
            &PipelineConfig::default(),
            |_| reported += 1,
        );

        assert!(matches!(
            result,
            Err(CoherenceError::Deserialization { .. })
        ));
        assert_eq!(reported, 1);
    }
}
