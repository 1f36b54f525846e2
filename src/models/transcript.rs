use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// One timestamped fragment of speech-to-text output.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TranscriptSegment {
    /// Offset from media start, in seconds. Non-decreasing in practice, but
    /// the aligner treats the sequence as an unordered flat collection.
    pub start: f64,
    pub text: String,
    /// Engine-specific fields (end, tokens, confidences) carried through to
    /// the transcript artifact untouched.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl TranscriptSegment {
    pub fn new(start: f64, text: impl Into<String>) -> Self {
        Self {
            start,
            text: text.into(),
            extra: Map::new(),
        }
    }
}

/// Transcription output as persisted in the `{id}_transcript.json` artifact.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TranscriptionResult {
    pub segments: Vec<TranscriptSegment>,
    /// Top-level engine fields (language, full text) passed through untouched.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}
