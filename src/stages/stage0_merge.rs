use crate::error::{CoherenceError, Result};
use crate::models::{TranscriptRecord, Turn};

/// Perform Stage 0: merge consecutive same-speaker records into turns
///
/// The first record opens the first turn. Each following record either
/// extends the last turn (same speaker) or opens a new one.
pub fn merge_turns(records: &[TranscriptRecord]) -> Result<Vec<Turn>> {
    let (first, rest) = records.split_first().ok_or(CoherenceError::EmptyInput)?;

    let mut turns = vec![Turn::from(first.clone())];
    let mut current_speaker = first.speaker.as_str();

    for record in rest {
        if record.speaker == current_speaker {
            if let Some(last) = turns.last_mut() {
                last.tokens.extend(record.tokens.iter().cloned());
            }
        } else {
            turns.push(Turn::from(record.clone()));
            current_speaker = record.speaker.as_str();
        }
    }

    Ok(turns)
}
