use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use streamflix_core::carousel::config::{
    DEFAULT_AUTOPLAY_INTERVAL, DEFAULT_LOOKUP_TIMEOUT, DEFAULT_MAX_ITEMS,
    DEFAULT_PREVIEW_DELAY, DEFAULT_VISIBILITY_THRESHOLD,
};
use streamflix_core::faq::{
    DEFAULT_FAQ_BASE_URL, DEFAULT_FAQ_LANGUAGE, DEFAULT_FAQ_SOURCE,
};
use streamflix_core::image::TMDB_IMAGE_BASE;
use streamflix_core::providers::tmdb::{DEFAULT_LANGUAGE, TMDB_BASE_URL};
use streamflix_core::{
    CarouselConfig, FaqSettings, FileStore, ImageUrlBuilder, TmdbSettings,
};

use crate::loader::ConfigLoadError;
use crate::util::duration;

const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(15);
const DATA_DIR_NAME: &str = "streamflix";

/// Complete application configuration. Every section falls back to its
/// defaults when omitted from the file.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    pub tmdb: TmdbSection,
    pub carousel: CarouselSection,
    pub faq: FaqSection,
    pub storage: StorageSection,
}

/// Catalog API access.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct TmdbSection {
    /// v3 key. Usually supplied through `TMDB_API_KEY` rather than the file.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    /// v4 read access token. Either this or `api_key` must be present.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub access_token: Option<String>,
    pub base_url: String,
    pub image_base_url: String,
    pub language: String,
    #[serde(with = "duration")]
    pub request_timeout: Duration,
}

impl Default for TmdbSection {
    fn default() -> Self {
        Self {
            api_key: None,
            access_token: None,
            base_url: TMDB_BASE_URL.to_string(),
            image_base_url: TMDB_IMAGE_BASE.to_string(),
            language: DEFAULT_LANGUAGE.to_string(),
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
        }
    }
}

/// Hero carousel timing. Durations are humantime strings such as `"8s"`.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct CarouselSection {
    #[serde(with = "duration")]
    pub autoplay_interval: Duration,
    #[serde(with = "duration")]
    pub preview_delay: Duration,
    #[serde(with = "duration")]
    pub lookup_timeout: Duration,
    pub max_items: usize,
    /// Share of the carousel in view before it counts as visible, in `(0, 1]`.
    pub visibility_threshold: f64,
    pub start_muted: bool,
}

impl Default for CarouselSection {
    fn default() -> Self {
        Self {
            autoplay_interval: DEFAULT_AUTOPLAY_INTERVAL,
            preview_delay: DEFAULT_PREVIEW_DELAY,
            lookup_timeout: DEFAULT_LOOKUP_TIMEOUT,
            max_items: DEFAULT_MAX_ITEMS,
            visibility_threshold: DEFAULT_VISIBILITY_THRESHOLD,
            start_muted: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct FaqSection {
    pub base_url: String,
    pub source: String,
    pub language: String,
    #[serde(with = "duration")]
    pub request_timeout: Duration,
}

impl Default for FaqSection {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_FAQ_BASE_URL.to_string(),
            source: DEFAULT_FAQ_SOURCE.to_string(),
            language: DEFAULT_FAQ_LANGUAGE.to_string(),
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
        }
    }
}

/// Where the watchlist lives on disk.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct StorageSection {
    /// Overrides the platform data directory.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data_dir: Option<PathBuf>,
}

impl StorageSection {
    /// Configured directory, else `<platform data dir>/streamflix`, else
    /// `./.streamflix`.
    pub fn resolved_data_dir(&self) -> PathBuf {
        if let Some(dir) = &self.data_dir {
            return dir.clone();
        }
        dirs::data_dir()
            .map(|base| base.join(DATA_DIR_NAME))
            .unwrap_or_else(|| PathBuf::from(format!(".{DATA_DIR_NAME}")))
    }
}

impl Config {
    /// Settings for the catalog client. Fails when no credential is set.
    pub fn tmdb_settings(&self) -> Result<TmdbSettings, ConfigLoadError> {
        let present =
            |v: &Option<String>| v.as_deref().is_some_and(|s| !s.trim().is_empty());
        if !present(&self.tmdb.api_key) && !present(&self.tmdb.access_token) {
            return Err(ConfigLoadError::MissingCredentials);
        }

        Ok(TmdbSettings {
            api_key: self.tmdb.api_key.clone(),
            access_token: self.tmdb.access_token.clone(),
            base_url: self.tmdb.base_url.clone(),
            language: self.tmdb.language.clone(),
            request_timeout: self.tmdb.request_timeout,
        })
    }

    pub fn image_urls(&self) -> ImageUrlBuilder {
        ImageUrlBuilder::new(self.tmdb.image_base_url.clone())
    }

    pub fn carousel_config(&self) -> CarouselConfig {
        let c = &self.carousel;
        CarouselConfig {
            autoplay_interval: c.autoplay_interval,
            preview_delay: c.preview_delay,
            lookup_timeout: c.lookup_timeout,
            max_items: c.max_items,
            visibility_threshold: c.visibility_threshold,
            start_muted: c.start_muted,
        }
    }

    pub fn faq_settings(&self) -> FaqSettings {
        FaqSettings {
            base_url: self.faq.base_url.clone(),
            source: self.faq.source.clone(),
            language: self.faq.language.clone(),
            request_timeout: self.faq.request_timeout,
        }
    }

    pub fn data_dir(&self) -> PathBuf {
        self.storage.resolved_data_dir()
    }

    /// File-backed store rooted at [`Config::data_dir`].
    pub fn watchlist_store(&self) -> FileStore {
        FileStore::new(self.data_dir())
    }
}
