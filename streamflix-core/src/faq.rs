//! Client for the external FAQ backend.

use std::time::Duration;

use reqwest::Client;
use streamflix_model::{FaqEntry, FaqResponse};
use tracing::{debug, instrument};
use url::Url;

use crate::providers::ProviderError;

pub const DEFAULT_FAQ_BASE_URL: &str =
    "https://ks-backend.digitalindiacorporation.in";
pub const DEFAULT_FAQ_SOURCE: &str = "Farmer";
pub const DEFAULT_FAQ_LANGUAGE: &str = "en";

#[derive(Debug, Clone, PartialEq)]
pub struct FaqSettings {
    pub base_url: String,
    pub source: String,
    /// Sent as the `preferredLanguageCode` header.
    pub language: String,
    pub request_timeout: Duration,
}

impl Default for FaqSettings {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_FAQ_BASE_URL.to_string(),
            source: DEFAULT_FAQ_SOURCE.to_string(),
            language: DEFAULT_FAQ_LANGUAGE.to_string(),
            request_timeout: Duration::from_secs(15),
        }
    }
}

#[derive(Debug, Clone)]
pub struct FaqClient {
    client: Client,
    settings: FaqSettings,
}

impl FaqClient {
    pub fn new(settings: FaqSettings) -> Result<Self, ProviderError> {
        Url::parse(&settings.base_url)?;
        let client = Client::builder()
            .timeout(settings.request_timeout)
            .build()?;
        Ok(Self { client, settings })
    }

    pub fn settings(&self) -> &FaqSettings {
        &self.settings
    }

    /// FAQ entries for the configured source.
    pub async fn fetch_default(&self) -> Result<Vec<FaqEntry>, ProviderError> {
        self.fetch(&self.settings.source).await
    }

    /// Entries for `source`. A body without `data` yields an empty list.
    #[instrument(skip(self))]
    pub async fn fetch(&self, source: &str) -> Result<Vec<FaqEntry>, ProviderError> {
        let base = self.settings.base_url.trim_end_matches('/');
        let url = Url::parse(&format!("{base}/v1/common/faq"))?;

        let response = self
            .client
            .get(url)
            .query(&[("source", source)])
            .header(reqwest::header::ACCEPT, "*/*")
            .header("preferredLanguageCode", &self.settings.language)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ProviderError::Api {
                status: status.as_u16(),
                message: status.canonical_reason().unwrap_or("unknown").to_string(),
            });
        }

        let body: FaqResponse = response
            .json()
            .await
            .map_err(|e| ProviderError::Parse(e.to_string()))?;
        let entries = body.into_entries();
        debug!(count = entries.len(), "fetched FAQ");
        Ok(entries)
    }
}
