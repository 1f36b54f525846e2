use std::path::Path;

use async_trait::async_trait;
use tokio::process::Command;
use tracing::info;

use crate::error::PipelineError;
use crate::models::TranscriptionResult;

/// Source-language hint passed to every engine; the platform publishes
/// Dutch-language meetings only.
const LANGUAGE: &str = "nl";

/// Which local speech-to-text engine to invoke.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EngineKind {
    /// Apple-silicon accelerated engine (`mlx_whisper`, large-v3 model).
    Accelerated,
    /// General engine (`whisper`, medium model).
    #[default]
    General,
}

impl EngineKind {
    pub fn program(self) -> &'static str {
        match self {
            Self::Accelerated => "mlx_whisper",
            Self::General => "whisper",
        }
    }

    /// Build the engine invocation. Both engines write `<stem>.json` into the
    /// output directory; only the flag spelling differs between them.
    fn command(self, media: &Path, out_dir: &Path) -> Command {
        let mut cmd = Command::new(self.program());
        match self {
            Self::Accelerated => {
                cmd.args(["--model", "mlx-community/whisper-large-v3-mlx"])
                    .arg("--output-dir")
                    .arg(out_dir)
                    .args(["--output-format", "json"])
                    .args(["--language", LANGUAGE, "--task", "transcribe"]);
            }
            Self::General => {
                cmd.args(["--model", "medium"])
                    .arg("--output_dir")
                    .arg(out_dir)
                    .args(["--output_format", "json"])
                    .args(["--language", LANGUAGE, "--task", "transcribe"]);
            }
        }
        cmd.arg(media);
        cmd
    }
}

/// Produces timestamped transcript segments for a local media file.
#[async_trait]
pub trait Transcriber: Send + Sync {
    async fn transcribe(&self, media: &Path) -> Result<TranscriptionResult, PipelineError>;
}

/// Shells out to a locally installed whisper CLI and reads back the JSON it
/// writes next to the media file.
pub struct WhisperCliTranscriber {
    engine: EngineKind,
}

impl WhisperCliTranscriber {
    pub fn new(engine: EngineKind) -> Self {
        Self { engine }
    }
}

#[async_trait]
impl Transcriber for WhisperCliTranscriber {
    async fn transcribe(&self, media: &Path) -> Result<TranscriptionResult, PipelineError> {
        let engine = self.engine.program();
        let out_dir = media.parent().unwrap_or(Path::new(".")).to_path_buf();

        info!("Transcribing {:?} with {}", media, engine);
        let output = self
            .engine
            .command(media, &out_dir)
            .output()
            .await
            .map_err(|err| PipelineError::EngineFailure {
                engine,
                detail: err.to_string(),
            })?;

        if !output.status.success() {
            return Err(PipelineError::EngineFailure {
                engine,
                detail: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        let stem = media
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();
        let json_path = out_dir.join(format!("{stem}.json"));

        let raw = tokio::fs::read(&json_path)
            .await
            .map_err(|err| PipelineError::EngineFailure {
                engine,
                detail: format!("no output at {:?}: {}", json_path, err),
            })?;
        let result =
            serde_json::from_slice(&raw).map_err(|err| PipelineError::EngineFailure {
                engine,
                detail: format!("unreadable output at {:?}: {}", json_path, err),
            })?;

        // The canonical transcript is persisted through the artifact store;
        // the engine's own output file is an intermediate.
        tokio::fs::remove_file(&json_path).await?;

        info!("Transcribed {:?}", media);
        Ok(result)
    }
}
