use tracing::{info, warn};

use crate::download::MediaDownloader;
use crate::error::PipelineError;
use crate::io::{ArtifactKind, ArtifactStore};
use crate::models::TranscriptionResult;
use crate::scrape::MeetingScraper;
use crate::stages::{AgendaFilter, AlignConfig, align, normalize_agenda};
use crate::transcribe::Transcriber;

/// Controller-level toggles; everything else is fixed by the stage contracts.
#[derive(Debug, Clone, Default)]
pub struct PipelineConfig {
    pub filter: AgendaFilter,
    pub align: AlignConfig,
    /// Delete the downloaded media artifact once transcription has succeeded.
    pub cleanup_media: bool,
    /// Discard a meeting's existing artifacts before processing it, redoing
    /// all stages. The recovery path for corrupt artifacts.
    pub force: bool,
}

/// How a single meeting run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MeetingOutcome {
    Aligned,
    /// The page yielded no agenda items; expected for some meetings.
    SkippedNoAgenda,
}

/// Tally of one batch run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BatchSummary {
    pub aligned: usize,
    pub skipped: usize,
    pub failed: usize,
}

/// Derive the meeting identifier from the final path segment of its URL.
///
/// The id keys every artifact name, so URLs that reduce to a scheme fragment
/// are rejected rather than producing names like `https:`.
pub fn meeting_id(url: &str) -> Result<&str, PipelineError> {
    url.trim_end_matches('/')
        .rsplit('/')
        .next()
        .filter(|segment| !segment.is_empty() && !segment.contains(':'))
        .ok_or_else(|| PipelineError::BadMeetingUrl {
            url: url.to_string(),
        })
}

/// Orchestrates the per-meeting stages: fetch agenda, download media,
/// transcribe, align.
///
/// Every stage with a persisted output checks for its artifact first and
/// skips itself when it exists, so `process` is safely re-entrant: a re-run
/// after a crash resumes from the first incomplete stage instead of redoing
/// the expensive download and transcription work.
pub struct Pipeline {
    scraper: Box<dyn MeetingScraper>,
    downloader: Box<dyn MediaDownloader>,
    transcriber: Box<dyn Transcriber>,
    store: Box<dyn ArtifactStore>,
    config: PipelineConfig,
}

impl Pipeline {
    pub fn new(
        scraper: Box<dyn MeetingScraper>,
        downloader: Box<dyn MediaDownloader>,
        transcriber: Box<dyn Transcriber>,
        store: Box<dyn ArtifactStore>,
        config: PipelineConfig,
    ) -> Self {
        Self {
            scraper,
            downloader,
            transcriber,
            store,
            config,
        }
    }

    /// Run all stages for one meeting.
    pub async fn process(&self, url: &str) -> Result<MeetingOutcome, PipelineError> {
        let id = meeting_id(url)?.to_string();
        info!("Processing {} (meeting {})", url, id);

        let media_name = ArtifactKind::Media.file_name(&id);
        let transcript_name = ArtifactKind::Transcript.file_name(&id);
        let alignment_name = ArtifactKind::Alignment.file_name(&id);

        if self.config.force {
            info!("Force mode: discarding existing artifacts for {}", id);
            for name in [&media_name, &transcript_name, &alignment_name] {
                self.store.remove(name)?;
            }
        }

        // Fetch agenda. No persisted artifact for this stage; the page is
        // re-fetched on every run since the align stage needs it in memory.
        let page = self.scraper.fetch_meeting(url).await?;
        let agenda = normalize_agenda(&page.entries, self.config.filter);
        if agenda.is_empty() {
            info!("No agenda items found for {}, skipping meeting", url);
            return Ok(MeetingOutcome::SkippedNoAgenda);
        }

        // Download media.
        if self.store.exists(&media_name) {
            info!("Media already downloaded for {}", id);
        } else if self.store.exists(&transcript_name) {
            // With media cleanup enabled the media artifact is gone on
            // resume; an existing transcript makes the download pointless.
            info!("Transcript already exists for {}, skipping download", id);
        } else {
            let media_url =
                page.media_url
                    .as_deref()
                    .ok_or_else(|| PipelineError::NoDownloadLink {
                        url: url.to_string(),
                    })?;
            self.downloader
                .download(media_url, &self.store.path_of(&media_name))
                .await?;
        }

        // Transcribe.
        if self.store.exists(&transcript_name) {
            info!("Transcript already exists for {}", id);
        } else {
            let result = self
                .transcriber
                .transcribe(&self.store.path_of(&media_name))
                .await?;
            self.store
                .write(&transcript_name, &serde_json::to_vec_pretty(&result)?)?;
            if self.config.cleanup_media {
                info!("Removing media for {} after transcription", id);
                self.store.remove(&media_name)?;
            }
        }

        // Align.
        if self.store.exists(&alignment_name) {
            info!("Alignment already exists for {}", id);
            return Ok(MeetingOutcome::Aligned);
        }
        let raw = self.store.read(&transcript_name)?;
        let transcript: TranscriptionResult =
            serde_json::from_slice(&raw).map_err(|source| PipelineError::CorruptArtifact {
                path: self.store.path_of(&transcript_name),
                source,
            })?;
        let alignments = align(&agenda, &transcript.segments, &self.config.align);
        self.store
            .write(&alignment_name, &serde_json::to_vec_pretty(&alignments)?)?;

        info!("Aligned {} agenda items for {}", alignments.len(), id);
        Ok(MeetingOutcome::Aligned)
    }

    /// Run `process` for each URL in order, continuing past failures. A whole
    /// batch must not abort because one meeting's page is malformed.
    pub async fn process_all(&self, urls: &[String]) -> BatchSummary {
        let mut summary = BatchSummary::default();
        for url in urls {
            match self.process(url).await {
                Ok(MeetingOutcome::Aligned) => summary.aligned += 1,
                Ok(MeetingOutcome::SkippedNoAgenda) => summary.skipped += 1,
                Err(err) => {
                    warn!("Failed to process {}: {}", url, err);
                    summary.failed += 1;
                }
            }
        }
        info!(
            "Batch complete: {} aligned, {} skipped, {} failed",
            summary.aligned, summary.skipped, summary.failed
        );
        summary
    }
}
