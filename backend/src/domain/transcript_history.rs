//! Transcripts a visitor chose to keep, held in their own session.
//!
//! The history travels inside the encrypted session cookie, so it is bounded
//! both by entry count and by the bytes its file names and texts occupy.
//! Saving past either bound evicts the oldest entries first.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Most entries kept at once.
pub const MAX_SAVED_TRANSCRIPTS: usize = 5;
/// Budget for file names plus texts across the whole history.
pub const MAX_HISTORY_BYTES: usize = 2048;

/// Reasons a transcript cannot be saved.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TranscriptHistoryError {
    #[error("a file name is required")]
    MissingFileName,
    #[error("there is no transcript to save")]
    EmptyText,
    #[error("transcript is too long to keep in history (limit {MAX_HISTORY_BYTES} bytes)")]
    TooLong,
}

/// One saved `(file name, text)` pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SavedTranscript {
    #[schema(example = "visit.mp3")]
    file_name: String,
    #[schema(example = "the patient reports mild headaches")]
    text: String,
}

impl SavedTranscript {
    /// Validate a transcript for saving. The text is kept verbatim.
    ///
    /// # Examples
    /// ```
    /// use portal::domain::SavedTranscript;
    ///
    /// let saved = SavedTranscript::new(" visit.mp3 ", "rest and fluids").unwrap();
    /// assert_eq!(saved.file_name(), "visit.mp3");
    /// assert!(SavedTranscript::new("visit.mp3", "  ").is_err());
    /// ```
    pub fn new(
        file_name: impl Into<String>,
        text: impl Into<String>,
    ) -> Result<Self, TranscriptHistoryError> {
        let file_name = file_name.into().trim().to_owned();
        if file_name.is_empty() {
            return Err(TranscriptHistoryError::MissingFileName);
        }
        let text = text.into();
        if text.trim().is_empty() {
            return Err(TranscriptHistoryError::EmptyText);
        }
        let saved = Self { file_name, text };
        if saved.footprint() > MAX_HISTORY_BYTES {
            return Err(TranscriptHistoryError::TooLong);
        }
        Ok(saved)
    }

    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    fn footprint(&self) -> usize {
        self.file_name.len() + self.text.len()
    }
}

/// Saved transcripts in the order they were saved.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TranscriptHistory {
    entries: Vec<SavedTranscript>,
}

impl TranscriptHistory {
    /// Append `entry`, evicting the oldest entries until both bounds hold.
    pub fn save(&mut self, entry: SavedTranscript) {
        self.entries.push(entry);
        while self.entries.len() > MAX_SAVED_TRANSCRIPTS || self.footprint() > MAX_HISTORY_BYTES {
            self.entries.remove(0);
        }
    }

    /// Entries for display, most recently saved first.
    pub fn newest_first(&self) -> Vec<SavedTranscript> {
        self.entries.iter().rev().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn footprint(&self) -> usize {
        self.entries.iter().map(SavedTranscript::footprint).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn saved(name: &str, text: &str) -> SavedTranscript {
        SavedTranscript::new(name, text).expect("valid transcript")
    }

    fn names(history: &TranscriptHistory) -> Vec<String> {
        history
            .newest_first()
            .iter()
            .map(|entry| entry.file_name().to_owned())
            .collect()
    }

    #[rstest]
    #[case("", "text", TranscriptHistoryError::MissingFileName)]
    #[case("  ", "text", TranscriptHistoryError::MissingFileName)]
    #[case("a.wav", "", TranscriptHistoryError::EmptyText)]
    #[case("a.wav", " \n", TranscriptHistoryError::EmptyText)]
    fn blank_inputs_are_rejected(
        #[case] name: &str,
        #[case] text: &str,
        #[case] expected: TranscriptHistoryError,
    ) {
        assert_eq!(SavedTranscript::new(name, text), Err(expected));
    }

    #[rstest]
    fn oversized_transcript_is_rejected() {
        let text = "x".repeat(MAX_HISTORY_BYTES);
        assert_eq!(
            SavedTranscript::new("a.wav", text),
            Err(TranscriptHistoryError::TooLong)
        );
    }

    #[rstest]
    fn lists_newest_first() {
        let mut history = TranscriptHistory::default();
        history.save(saved("first.wav", "one"));
        history.save(saved("second.mp3", "two"));
        assert_eq!(names(&history), ["second.mp3", "first.wav"]);
    }

    #[rstest]
    fn evicts_oldest_beyond_entry_limit() {
        let mut history = TranscriptHistory::default();
        for n in 0..=MAX_SAVED_TRANSCRIPTS {
            history.save(saved(&format!("{n}.wav"), "note"));
        }
        assert_eq!(history.len(), MAX_SAVED_TRANSCRIPTS);
        assert_eq!(names(&history).last().map(String::as_str), Some("1.wav"));
    }

    #[rstest]
    fn evicts_oldest_beyond_byte_budget() {
        let half = "y".repeat(MAX_HISTORY_BYTES / 2);
        let mut history = TranscriptHistory::default();
        history.save(saved("a.wav", &half));
        history.save(saved("b.wav", &half));
        assert_eq!(names(&history), ["b.wav"]);
    }

    #[rstest]
    fn serialises_as_a_plain_list() {
        let mut history = TranscriptHistory::default();
        history.save(saved("a.wav", "hi"));
        let value = serde_json::to_value(&history).expect("history serialises");
        assert_eq!(
            value,
            serde_json::json!([{ "fileName": "a.wav", "text": "hi" }])
        );
    }
}
