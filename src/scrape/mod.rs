pub mod parser;

pub use parser::{MeetingPage, parse_meeting_page};

use async_trait::async_trait;
use reqwest::Client;
use tracing::debug;

use crate::error::PipelineError;

/// Fetches a meeting page and extracts its agenda and media link.
///
/// A page without agenda entries is a valid result, not an error; the
/// controller short-circuits such meetings.
#[async_trait]
pub trait MeetingScraper: Send + Sync {
    async fn fetch_meeting(&self, url: &str) -> Result<MeetingPage, PipelineError>;
}

/// Scraper backed by a live HTTP fetch of the meeting platform.
pub struct HttpMeetingScraper {
    client: Client,
}

impl HttpMeetingScraper {
    pub fn new() -> Self {
        Self {
            client: Client::new(),
        }
    }
}

impl Default for HttpMeetingScraper {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl MeetingScraper for HttpMeetingScraper {
    async fn fetch_meeting(&self, url: &str) -> Result<MeetingPage, PipelineError> {
        debug!("Fetching meeting page {}", url);
        let body = self
            .client
            .get(url)
            .send()
            .await?
            .error_for_status()?
            .text()
            .await?;
        Ok(parse_meeting_page(&body))
    }
}
