use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;
use std::time::Duration;

use streamflix_config::loader::{API_KEY_VAR, CONFIG_PATH_VAR, DATA_DIR_VAR};
use streamflix_config::{Config, ConfigSource};
use streamflix_core::KeyValueStore;

fn vars(pairs: Vec<(&str, String)>) -> impl Fn(&str) -> Option<String> {
    let map: HashMap<String, String> =
        pairs.into_iter().map(|(k, v)| (k.to_string(), v)).collect();
    move |name| map.get(name).cloned()
}

#[test]
fn env_path_toml_file_is_loaded_and_overridden() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("custom.toml");
    fs::write(
        &path,
        r#"
[tmdb]
api_key = "from-file"

[carousel]
autoplay_interval = "12s"
visibility_threshold = 0.5
"#,
    )
    .unwrap();

    let data_dir = dir.path().join("data");
    let (config, source) = Config::load_with(vars(vec![
        (CONFIG_PATH_VAR, path.display().to_string()),
        (API_KEY_VAR, "from-env".to_string()),
        (DATA_DIR_VAR, data_dir.display().to_string()),
    ]))
    .unwrap();

    assert_eq!(source, ConfigSource::EnvPath(path));
    assert_eq!(config.tmdb.api_key.as_deref(), Some("from-env"));
    assert_eq!(config.carousel.autoplay_interval, Duration::from_secs(12));

    let carousel = config.carousel_config();
    assert!(carousel.is_visible_ratio(0.5));
    assert!(!carousel.is_visible_ratio(0.4));

    let store = config.watchlist_store();
    assert_eq!(store.dir(), data_dir.as_path());
    store.set("streamflix_watchlist", "[]").unwrap();
    assert!(data_dir.join("streamflix_watchlist.json").exists());
}

#[test]
fn json_file_by_extension() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("streamflix.json");
    fs::write(&path, r#"{"faq": {"source": "Buyer", "request_timeout": "3s"}}"#)
        .unwrap();

    let config = Config::load_from_file(&path).unwrap();
    assert_eq!(config.faq.source, "Buyer");
    assert_eq!(config.faq_settings().request_timeout, Duration::from_secs(3));
}

#[test]
fn invalid_file_values_fail_validation() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("bad.toml");
    fs::write(&path, "[carousel]\nmax_items = 0\n").unwrap();

    let err = Config::load_with(vars(vec![(
        CONFIG_PATH_VAR,
        path.display().to_string(),
    )]))
    .unwrap_err();
    assert!(err.to_string().contains("max_items"));
}

#[test]
fn missing_file_reports_path() {
    let missing = PathBuf::from("/definitely/not/here/streamflix.toml");
    let err = Config::load_from_file(&missing).unwrap_err();
    assert!(format!("{err:#}").contains("/definitely/not/here"));
}

#[test]
fn serialized_defaults_round_trip_through_toml() {
    let rendered = toml::to_string(&Config::default()).unwrap();
    assert!(rendered.contains("autoplay_interval = \"8s\""));
    let parsed = Config::parse_from_str(&rendered, "rendered").unwrap();
    assert_eq!(parsed, Config::default());
}
