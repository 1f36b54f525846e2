use std::path::PathBuf;

use thiserror::Error;

/// Errors surfaced by pipeline stages and their collaborators.
///
/// Anything listed here aborts the current meeting; in batch mode the
/// controller catches it at the per-URL boundary and moves on.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// The meeting page carries no recognizable media download link.
    #[error("no download link found on {url}")]
    NoDownloadLink { url: String },

    /// Network failure while talking to the meeting platform.
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// A stage artifact exists on disk but cannot be decoded. The artifact
    /// must be removed (or the meeting re-run with force) before retrying.
    #[error("corrupt artifact {path:?}: {source}")]
    CorruptArtifact {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// The transcription command exited unsuccessfully or produced no output.
    #[error("transcription engine {engine} failed: {detail}")]
    EngineFailure { engine: &'static str, detail: String },

    /// The meeting URL has no usable final path segment to derive an id from.
    #[error("cannot derive a meeting id from {url}")]
    BadMeetingUrl { url: String },

    #[error("failed to encode artifact: {0}")]
    Encode(#[from] serde_json::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// A declared duration string that is not three colon-separated integers.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("malformed duration {0:?}, expected H:MM:SS")]
pub struct MalformedDuration(pub String);
