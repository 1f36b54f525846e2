pub mod download;
pub mod error;
pub mod io;
pub mod models;
pub mod pipeline;
pub mod scrape;
pub mod stages;
pub mod transcribe;

pub use download::{HttpDownloader, MediaDownloader};
pub use error::{MalformedDuration, PipelineError};
pub use io::{ArtifactKind, ArtifactStore, FsArtifactStore};
pub use models::{
    AgendaAlignment, AgendaItem, RawAgendaEntry, TranscriptSegment, TranscriptionResult,
    parse_duration,
};
pub use pipeline::{BatchSummary, MeetingOutcome, Pipeline, PipelineConfig, meeting_id};
pub use scrape::{HttpMeetingScraper, MeetingPage, MeetingScraper, parse_meeting_page};
pub use stages::{AgendaFilter, AlignConfig, BoundaryPolicy, align, normalize_agenda};
pub use transcribe::{EngineKind, Transcriber, WhisperCliTranscriber};
