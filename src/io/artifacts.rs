use std::path::{Path, PathBuf};

use crate::error::PipelineError;

/// Kinds of per-meeting stage artifacts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArtifactKind {
    /// Downloaded meeting media.
    Media,
    /// Transcript segments produced by the transcription engine.
    Transcript,
    /// Final per-agenda-item alignment.
    Alignment,
}

impl ArtifactKind {
    /// File name for this artifact under a given meeting id. Ids are unique
    /// per meeting, so two meetings never collide.
    pub fn file_name(self, meeting_id: &str) -> String {
        match self {
            Self::Media => format!("{meeting_id}.media"),
            Self::Transcript => format!("{meeting_id}_transcript.json"),
            Self::Alignment => format!("{meeting_id}_final.json"),
        }
    }
}

/// Persistence for stage artifacts.
///
/// Existence of an artifact is the sole completion marker for its stage, so a
/// write must never be observable half-done: implementations write to a
/// temporary path and rename on success.
pub trait ArtifactStore: Send + Sync {
    fn exists(&self, name: &str) -> bool;
    fn read(&self, name: &str) -> Result<Vec<u8>, PipelineError>;
    fn write(&self, name: &str, data: &[u8]) -> Result<(), PipelineError>;
    /// Removing a missing artifact is not an error.
    fn remove(&self, name: &str) -> Result<(), PipelineError>;
    /// Absolute path for collaborators that stream directly to disk.
    fn path_of(&self, name: &str) -> PathBuf;
}

/// Directory-backed store; every artifact is a file under `root`.
pub struct FsArtifactStore {
    root: PathBuf,
}

impl FsArtifactStore {
    pub fn new(root: impl Into<PathBuf>) -> Result<Self, PipelineError> {
        let root = root.into();
        std::fs::create_dir_all(&root)?;
        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl ArtifactStore for FsArtifactStore {
    fn exists(&self, name: &str) -> bool {
        self.path_of(name).is_file()
    }

    fn read(&self, name: &str) -> Result<Vec<u8>, PipelineError> {
        Ok(std::fs::read(self.path_of(name))?)
    }

    fn write(&self, name: &str, data: &[u8]) -> Result<(), PipelineError> {
        let path = self.path_of(name);
        let tmp = self.root.join(format!("{name}.tmp"));
        std::fs::write(&tmp, data)?;
        std::fs::rename(&tmp, &path)?;
        Ok(())
    }

    fn remove(&self, name: &str) -> Result<(), PipelineError> {
        match std::fs::remove_file(self.path_of(name)) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(err.into()),
        }
    }

    fn path_of(&self, name: &str) -> PathBuf {
        self.root.join(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_artifact_names() {
        assert_eq!(ArtifactKind::Media.file_name("ab12"), "ab12.media");
        assert_eq!(
            ArtifactKind::Transcript.file_name("ab12"),
            "ab12_transcript.json"
        );
        assert_eq!(ArtifactKind::Alignment.file_name("ab12"), "ab12_final.json");
    }

    #[test]
    fn test_write_read_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let store = FsArtifactStore::new(dir.path()).unwrap();

        assert!(!store.exists("m_final.json"));
        store.write("m_final.json", b"[]").unwrap();
        assert!(store.exists("m_final.json"));
        assert_eq!(store.read("m_final.json").unwrap(), b"[]");
    }

    #[test]
    fn test_write_leaves_no_temp_file() {
        let dir = tempfile::tempdir().unwrap();
        let store = FsArtifactStore::new(dir.path()).unwrap();

        store.write("m.media", b"bytes").unwrap();

        let names: Vec<String> = std::fs::read_dir(dir.path())
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["m.media".to_string()]);
    }

    #[test]
    fn test_remove_missing_is_ok() {
        let dir = tempfile::tempdir().unwrap();
        let store = FsArtifactStore::new(dir.path()).unwrap();

        store.remove("never_written.json").unwrap();
        store.write("x.media", b"1").unwrap();
        store.remove("x.media").unwrap();
        assert!(!store.exists("x.media"));
    }
}
