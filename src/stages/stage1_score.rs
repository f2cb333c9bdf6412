use tracing::debug;

use crate::embedding::EmbeddingLookup;
use crate::models::{PairScore, StopwordSet, Turn};

/// Cosine similarity of two vectors, `dot(a, b) / (|a| * |b|)`
///
/// Returns `0.0` for empty, zero-magnitude or length-mismatched input.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    if a.len() != b.len() || a.is_empty() {
        return 0.0;
    }

    let dot: f32 = a.iter().zip(b).map(|(x, y)| x * y).sum();
    let denom = norm(a) * norm(b);
    if denom == 0.0 {
        return 0.0;
    }

    dot / denom
}

fn norm(v: &[f32]) -> f32 {
    v.iter().map(|x| x * x).sum::<f32>().sqrt()
}

/// The `k` largest scores, descending
pub fn top_k(mut scores: Vec<f32>, k: usize) -> Vec<f32> {
    scores.sort_by(|a, b| b.total_cmp(a));
    scores.truncate(k);
    scores
}

/// Vectors for every token that is not a stopword and is in the vocabulary
///
/// Misses are skipped silently. Zero-norm vectors count as misses.
pub fn embed_tokens<'a>(
    tokens: &[String],
    lookup: &'a dyn EmbeddingLookup,
    stopwords: &StopwordSet,
) -> Vec<&'a [f32]> {
    tokens
        .iter()
        .filter(|token| !stopwords.contains(token))
        .filter_map(|token| lookup.lookup(token))
        .filter(|vector| norm(vector) > 0.0)
        .collect()
}

/// Score one turn pair: all-pairs cosine similarity, keeping the top `k`
///
/// Returns `None` when either turn has nothing to embed.
pub fn score_pair(
    a: &Turn,
    b: &Turn,
    lookup: &dyn EmbeddingLookup,
    stopwords: &StopwordSet,
    k: usize,
) -> Option<Vec<f32>> {
    embed_and_score(a, b, lookup, stopwords, k).top
}

/// Outcome of scoring one pair, with the embedded token counts of each side
struct PairOutcome {
    embedded_a: usize,
    embedded_b: usize,
    top: Option<Vec<f32>>,
}

fn embed_and_score(
    a: &Turn,
    b: &Turn,
    lookup: &dyn EmbeddingLookup,
    stopwords: &StopwordSet,
    k: usize,
) -> PairOutcome {
    let vectors_a = embed_tokens(&a.tokens, lookup, stopwords);
    let vectors_b = embed_tokens(&b.tokens, lookup, stopwords);

    let mut scores = Vec::with_capacity(vectors_a.len() * vectors_b.len());
    for u in &vectors_a {
        for v in &vectors_b {
            scores.push(cosine_similarity(u, v));
        }
    }

    let top = top_k(scores, k);
    PairOutcome {
        embedded_a: vectors_a.len(),
        embedded_b: vectors_b.len(),
        top: if top.is_empty() { None } else { Some(top) },
    }
}

/// Perform Stage 1: score every adjacent turn pair
///
/// Pairs with no scores are left out of the result.
pub fn score_turns(
    turns: &[Turn],
    lookup: &dyn EmbeddingLookup,
    stopwords: &StopwordSet,
    k: usize,
) -> Vec<PairScore> {
    let mut pairs = Vec::new();

    for (turn_index, window) in turns.windows(2).enumerate() {
        let (a, b) = (&window[0], &window[1]);
        let outcome = embed_and_score(a, b, lookup, stopwords, k);

        match outcome.top {
            Some(top) => pairs.push(PairScore {
                turn_index,
                speaker_a: a.speaker.clone(),
                speaker_b: b.speaker.clone(),
                embedded_a: outcome.embedded_a,
                embedded_b: outcome.embedded_b,
                top,
            }),
            None => debug!(
                "Dropping pair {} ({} -> {}): {}x{} vectors",
                turn_index,
                a.speaker,
                b.speaker,
                outcome.embedded_a,
                outcome.embedded_b
            ),
        }
    }

    pairs
}
