use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Serialize;

use crate::config::PipelineConfig;
use crate::models::FileScore;

/// Machine-readable summary of a scoring run
#[derive(Debug, Clone, Serialize)]
pub struct ScoreReport {
    /// RFC 3339 timestamp of when the report was produced
    pub generated_at: String,
    /// Embedding table the scores were computed with
    pub embeddings: PathBuf,
    pub config: PipelineConfig,
    pub files: Vec<FileScore>,
    /// Sum of every file total
    pub grand_total: f64,
}

impl ScoreReport {
    pub fn new(embeddings: &Path, config: &PipelineConfig, files: Vec<FileScore>) -> Self {
        let grand_total = files.iter().fold(0.0, |acc, f| acc + f.total);
        Self {
            generated_at: chrono::Utc::now().to_rfc3339(),
            embeddings: embeddings.to_path_buf(),
            config: config.clone(),
            files,
            grand_total,
        }
    }

    /// Write to a JSON file
    pub fn write_json(&self, path: &Path) -> Result<()> {
        let file = std::fs::File::create(path)
            .with_context(|| format!("Failed to create file: {:?}", path))?;
        serde_json::to_writer_pretty(file, self).context("Failed to write JSON")?;
        Ok(())
    }
}

/// Human-readable breakdown of a single file's score
pub struct ScoreBreakdown<'a> {
    score: &'a FileScore,
}

impl<'a> ScoreBreakdown<'a> {
    pub fn new(score: &'a FileScore) -> Self {
        Self { score }
    }

    pub fn format(&self) -> String {
        let score = self.score;
        let mut output = String::new();

        output.push_str(&format!("Transcript: {}\n", score.path.display()));
        output.push_str(&format!("Records: {}\n", score.records));
        output.push_str(&format!("Turns: {}\n", score.turns));
        output.push_str(&format!("Speakers: {}\n", score.speakers.join(", ")));
        output.push_str(&format!(
            "Pairs: {} scored, {} dropped\n\n",
            score.scored_pairs(),
            score.dropped_pairs
        ));

        for pair in &score.pairs {
            output.push_str(&format!(
                "[{:>4}] {} -> {} ({}x{} vectors): {}\n",
                pair.turn_index,
                pair.speaker_a,
                pair.speaker_b,
                pair.embedded_a,
                pair.embedded_b,
                format_scores(&pair.top)
            ));
        }

        output.push_str(&format!("\nTotal: {}\n", score.total));
        output
    }
}

fn format_scores(scores: &[f32]) -> String {
    let parts: Vec<String> = scores.iter().map(|s| format!("{:.4}", s)).collect();
    format!("[{}]", parts.join(", "))
}
