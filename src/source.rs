use crate::config::SourceConfig;
use crate::error::FetchError;
use crate::model::SourceReading;
use reqwest::Client as HttpClient;

/// HTTP client for the configured source endpoints.
///
/// Fetches exactly one payload per call and applies no retry of its own;
/// the collector owns the retry policy.
pub struct Client {
    http_client: HttpClient,
    config: SourceConfig,
}

impl Client {
    pub fn new(config: SourceConfig) -> Self {
        let http_client = HttpClient::new();
        Self {
            http_client,
            config,
        }
    }

    /// Fetches the current payload from `{base_url}{source_id}`.
    ///
    /// The body is returned verbatim; whether it parses is the processor's
    /// concern. Sources are addressed from 1, so id 0 is rejected up front.
    pub async fn fetch(&self, source_id: u32) -> Result<SourceReading, FetchError> {
        if source_id == 0 {
            return Err(FetchError::InvalidSource(source_id));
        }

        let url = format!("{}{}", self.config.base_url, source_id);
        let response = self.http_client.get(&url).send().await?;

        if response.status().is_success() {
            let payload = response.text().await?;
            Ok(SourceReading { source_id, payload })
        } else {
            let status = response.status();
            let body = response.text().await?;
            Err(FetchError::status(source_id, status, body))
        }
    }
}
