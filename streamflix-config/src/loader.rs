use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, anyhow};
use tracing::{debug, warn};
use url::Url;

use crate::models::Config;
use crate::util::{non_blank, parse_bool};

pub const CONFIG_PATH_VAR: &str = "STREAMFLIX_CONFIG_PATH";
pub const API_KEY_VAR: &str = "TMDB_API_KEY";
pub const ACCESS_TOKEN_VAR: &str = "TMDB_ACCESS_TOKEN";
pub const LANGUAGE_VAR: &str = "STREAMFLIX_LANGUAGE";
pub const DATA_DIR_VAR: &str = "STREAMFLIX_DATA_DIR";
pub const FAQ_URL_VAR: &str = "STREAMFLIX_FAQ_URL";
pub const START_MUTED_VAR: &str = "STREAMFLIX_START_MUTED";

/// Source that produced the configuration file layer.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ConfigSource {
    #[default]
    Default,
    EnvPath(PathBuf),
    File(PathBuf),
}

/// A configuration that parsed but cannot be used.
#[derive(Debug, thiserror::Error)]
pub enum ConfigLoadError {
    #[error("no TMDB credential: set {API_KEY_VAR} or {ACCESS_TOKEN_VAR}")]
    MissingCredentials,
    #[error("{field} must be greater than zero")]
    ZeroDuration { field: &'static str },
    #[error("carousel.max_items must be at least 1")]
    NoCarouselItems,
    #[error("carousel.visibility_threshold must be in (0, 1], got {0}")]
    ThresholdOutOfRange(f64),
    #[error("{field} is not a valid URL: {source}")]
    InvalidUrl {
        field: &'static str,
        #[source]
        source: url::ParseError,
    },
}

impl Config {
    /// Load configuration from the process environment.
    /// Evaluation order:
    /// 1) `.env` in the working directory is loaded into the environment,
    /// 2) `$STREAMFLIX_CONFIG_PATH` (TOML or JSON file),
    /// 3) `./streamflix.toml`, `./streamflix.json`, then
    ///    `<config dir>/streamflix/config.toml`,
    /// 4) defaults if no file is found.
    ///
    /// Environment overrides are applied on top of the file, then the result
    /// is validated.
    pub fn load_from_env() -> anyhow::Result<(Self, ConfigSource)> {
        match dotenvy::dotenv() {
            Ok(path) => debug!(path = %path.display(), "loaded .env"),
            Err(err) if err.not_found() => {}
            Err(err) => warn!(error = %err, "failed to read .env"),
        }
        Self::load_with(|name| env::var(name).ok())
    }

    /// Same as [`Config::load_from_env`] minus `.env`, reading variables
    /// through `lookup`.
    pub fn load_with<F>(lookup: F) -> anyhow::Result<(Self, ConfigSource)>
    where
        F: Fn(&str) -> Option<String>,
    {
        let (mut config, source) =
            if let Some(path) = non_blank(&lookup, CONFIG_PATH_VAR) {
                let path = PathBuf::from(path);
                let config = Self::load_from_file(&path)?;
                (config, ConfigSource::EnvPath(path))
            } else if let Some(path) = Self::find_default_file() {
                let config = Self::load_from_file(&path)?;
                (config, ConfigSource::File(path))
            } else {
                (Self::default(), ConfigSource::Default)
            };

        config.apply_env_overrides(&lookup);
        config.validate()?;
        debug!(?source, "configuration loaded");
        Ok((config, source))
    }

    pub fn load_from_file(path: &Path) -> anyhow::Result<Self> {
        let contents = fs::read_to_string(path).with_context(|| {
            format!("failed to read config from {}", path.display())
        })?;

        match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => serde_json::from_str(&contents)
                .with_context(|| format!("invalid config {}", path.display())),
            Some("toml") => toml::from_str(&contents).map_err(|err| {
                anyhow!("invalid config {}: {}", path.display(), err)
            }),
            _ => Self::parse_from_str(&contents, &path.display().to_string()),
        }
    }

    pub fn parse_from_str(contents: &str, origin: &str) -> anyhow::Result<Self> {
        // Try TOML first, then JSON for convenience.
        toml::from_str(contents).or_else(|toml_err| {
            serde_json::from_str(contents).map_err(|json_err| {
                anyhow!(
                    "failed to parse config {}: toml error: {}; json error: {}",
                    origin,
                    toml_err,
                    json_err
                )
            })
        })
    }

    /// Overlay environment variables on the loaded values.
    pub fn apply_env_overrides<F>(&mut self, lookup: &F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(key) = non_blank(lookup, API_KEY_VAR) {
            self.tmdb.api_key = Some(key);
        }
        if let Some(token) = non_blank(lookup, ACCESS_TOKEN_VAR) {
            self.tmdb.access_token = Some(token);
        }
        if let Some(language) = non_blank(lookup, LANGUAGE_VAR) {
            self.tmdb.language = language;
        }
        if let Some(dir) = non_blank(lookup, DATA_DIR_VAR) {
            self.storage.data_dir = Some(PathBuf::from(dir));
        }
        if let Some(url) = non_blank(lookup, FAQ_URL_VAR) {
            self.faq.base_url = url;
        }
        if let Some(raw) = non_blank(lookup, START_MUTED_VAR) {
            match parse_bool(&raw) {
                Some(muted) => self.carousel.start_muted = muted,
                None => warn!(value = %raw, "ignoring {START_MUTED_VAR}"),
            }
        }
    }

    /// Reject values the runtime cannot work with. Credentials are checked
    /// separately by [`Config::tmdb_settings`] so offline commands still load.
    pub fn validate(&self) -> Result<(), ConfigLoadError> {
        let durations: [(&'static str, Duration); 5] = [
            ("tmdb.request_timeout", self.tmdb.request_timeout),
            ("carousel.autoplay_interval", self.carousel.autoplay_interval),
            ("carousel.preview_delay", self.carousel.preview_delay),
            ("carousel.lookup_timeout", self.carousel.lookup_timeout),
            ("faq.request_timeout", self.faq.request_timeout),
        ];
        if let Some(&(field, _)) = durations.iter().find(|(_, d)| d.is_zero()) {
            return Err(ConfigLoadError::ZeroDuration { field });
        }

        if self.carousel.max_items == 0 {
            return Err(ConfigLoadError::NoCarouselItems);
        }

        let threshold = self.carousel.visibility_threshold;
        if !(threshold > 0.0 && threshold <= 1.0) {
            return Err(ConfigLoadError::ThresholdOutOfRange(threshold));
        }

        for (field, raw) in [
            ("tmdb.base_url", &self.tmdb.base_url),
            ("tmdb.image_base_url", &self.tmdb.image_base_url),
            ("faq.base_url", &self.faq.base_url),
        ] {
            Url::parse(raw)
                .map_err(|source| ConfigLoadError::InvalidUrl { field, source })?;
        }

        Ok(())
    }

    fn find_default_file() -> Option<PathBuf> {
        const CANDIDATES: &[&str] = &["streamflix.toml", "streamflix.json"];

        CANDIDATES
            .iter()
            .map(PathBuf::from)
            .chain(
                dirs::config_dir()
                    .map(|dir| dir.join("streamflix").join("config.toml")),
            )
            .find(|path| path.exists())
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn vars(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn toml_with_humantime_durations() {
        let raw = r#"
            [carousel]
            autoplay_interval = "10s"
            preview_delay = "1500ms"
            max_items = 5

            [tmdb]
            language = "de-DE"
        "#;
        let config = Config::parse_from_str(raw, "inline").unwrap();
        assert_eq!(config.carousel.autoplay_interval, Duration::from_secs(10));
        assert_eq!(config.carousel.preview_delay, Duration::from_millis(1500));
        assert_eq!(config.carousel.max_items, 5);
        assert_eq!(config.carousel.lookup_timeout, Duration::from_secs(5));
        assert_eq!(config.tmdb.language, "de-DE");
        assert!(config.carousel.start_muted);
    }

    #[test]
    fn json_fallback_when_toml_fails() {
        let raw = r#"{"faq": {"source": "Student"}}"#;
        let config = Config::parse_from_str(raw, "inline").unwrap();
        assert_eq!(config.faq.source, "Student");
    }

    #[test]
    fn unparseable_input_names_both_errors() {
        let err = Config::parse_from_str("[[[", "broken").unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("broken"));
        assert!(msg.contains("toml error"));
        assert!(msg.contains("json error"));
    }

    #[test]
    fn bad_duration_is_rejected() {
        let raw = "[carousel]\npreview_delay = \"soon\"\n";
        assert!(Config::parse_from_str(raw, "inline").is_err());
    }

    #[test]
    fn env_overrides_replace_file_values() {
        let mut config = Config::default();
        config.apply_env_overrides(&vars(&[
            (API_KEY_VAR, " key "),
            (LANGUAGE_VAR, "fr-FR"),
            (DATA_DIR_VAR, "/var/lib/sf"),
            (FAQ_URL_VAR, "http://127.0.0.1:9000"),
            (START_MUTED_VAR, "off"),
            (ACCESS_TOKEN_VAR, "   "),
        ]));
        assert_eq!(config.tmdb.api_key.as_deref(), Some("key"));
        assert_eq!(config.tmdb.access_token, None);
        assert_eq!(config.tmdb.language, "fr-FR");
        assert_eq!(config.data_dir(), PathBuf::from("/var/lib/sf"));
        assert_eq!(config.faq.base_url, "http://127.0.0.1:9000");
        assert!(!config.carousel.start_muted);
    }

    #[test]
    fn validation_rules() {
        assert!(Config::default().validate().is_ok());

        let mut config = Config::default();
        config.carousel.preview_delay = Duration::ZERO;
        assert!(matches!(
            config.validate(),
            Err(ConfigLoadError::ZeroDuration { field: "carousel.preview_delay" })
        ));

        let mut config = Config::default();
        config.carousel.max_items = 0;
        assert!(matches!(
            config.validate(),
            Err(ConfigLoadError::NoCarouselItems)
        ));

        for bad in [0.0, -0.5, 1.5, f64::NAN] {
            let mut config = Config::default();
            config.carousel.visibility_threshold = bad;
            assert!(matches!(
                config.validate(),
                Err(ConfigLoadError::ThresholdOutOfRange(_))
            ));
        }

        let mut config = Config::default();
        config.carousel.visibility_threshold = 1.0;
        assert!(config.validate().is_ok());

        let mut config = Config::default();
        config.faq.base_url = "nope".into();
        assert!(matches!(
            config.validate(),
            Err(ConfigLoadError::InvalidUrl { field: "faq.base_url", .. })
        ));
    }
}
