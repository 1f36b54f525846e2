use std::path::Path;

use async_trait::async_trait;
use futures_util::StreamExt;
use reqwest::Client;
use tokio::io::AsyncWriteExt;
use tracing::info;

use crate::error::PipelineError;

/// Streams a media file from the platform to a local path.
#[async_trait]
pub trait MediaDownloader: Send + Sync {
    async fn download(&self, url: &str, dest: &Path) -> Result<(), PipelineError>;
}

/// Chunked HTTP download. Media files run to hours of video, so the body is
/// never buffered in memory.
pub struct HttpDownloader {
    client: Client,
}

impl HttpDownloader {
    pub fn new() -> Self {
        Self {
            client: Client::new(),
        }
    }
}

impl Default for HttpDownloader {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl MediaDownloader for HttpDownloader {
    async fn download(&self, url: &str, dest: &Path) -> Result<(), PipelineError> {
        info!("Downloading {}", url);
        let response = self.client.get(url).send().await?.error_for_status()?;

        // Stream into a sibling temp file and rename only after the last
        // chunk, so a crash mid-download never leaves a file that the
        // controller would mistake for a completed stage.
        let tmp = dest.with_extension("part");
        let mut file = tokio::fs::File::create(&tmp).await?;
        let mut stream = response.bytes_stream();
        while let Some(chunk) = stream.next().await {
            file.write_all(&chunk?).await?;
        }
        file.flush().await?;
        tokio::fs::rename(&tmp, dest).await?;

        info!("Downloaded {} to {:?}", url, dest);
        Ok(())
    }
}
