//! TMDB v3 REST client.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use streamflix_model::{
    CatalogItem, Credits, Genre, GenreList, MediaKind, MovieDetails, Page,
    PersonCredits, PersonDetails, SeasonDetails, TimeWindow, TrendingScope,
    TvDetails, VideoList,
};
use tracing::{debug, warn};
use url::Url;

use super::traits::{
    DiscoverFilters, MetadataProvider, MovieList, ProviderError, SearchScope,
    TvList,
};

pub const TMDB_BASE_URL: &str = "https://api.themoviedb.org/3";
pub const DEFAULT_LANGUAGE: &str = "en-US";
const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(15);

const TITLE_APPENDS: &str = "credits,videos,similar,recommendations,images";
const PERSON_APPENDS: &str = "movie_credits,tv_credits,images";

/// Connection settings for [`TmdbProvider`].
#[derive(Debug, Clone, PartialEq)]
pub struct TmdbSettings {
    /// v3 key sent as the `api_key` query parameter.
    pub api_key: Option<String>,
    /// v4 read access token sent as a bearer header.
    pub access_token: Option<String>,
    pub base_url: String,
    pub language: String,
    pub request_timeout: Duration,
}

impl Default for TmdbSettings {
    fn default() -> Self {
        Self {
            api_key: None,
            access_token: None,
            base_url: TMDB_BASE_URL.to_string(),
            language: DEFAULT_LANGUAGE.to_string(),
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
        }
    }
}

impl TmdbSettings {
    pub fn with_api_key(api_key: impl Into<String>) -> Self {
        Self {
            api_key: Some(api_key.into()),
            ..Self::default()
        }
    }

    fn has_credentials(&self) -> bool {
        let present = |v: &Option<String>| {
            v.as_deref().is_some_and(|s| !s.trim().is_empty())
        };
        present(&self.api_key) || present(&self.access_token)
    }
}

#[derive(Deserialize)]
struct ErrorBody {
    status_message: Option<String>,
}

#[derive(Debug, Clone)]
pub struct TmdbProvider {
    client: Client,
    settings: TmdbSettings,
}

impl TmdbProvider {
    pub fn new(settings: TmdbSettings) -> Result<Self, ProviderError> {
        if !settings.has_credentials() {
            return Err(ProviderError::MissingCredentials);
        }
        // Reject a malformed base early instead of on the first request.
        Url::parse(&settings.base_url)?;

        let client = Client::builder()
            .timeout(settings.request_timeout)
            .user_agent(concat!("streamflix/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self { client, settings })
    }

    pub fn settings(&self) -> &TmdbSettings {
        &self.settings
    }

    fn endpoint(&self, path: &str) -> Result<Url, ProviderError> {
        let base = self.settings.base_url.trim_end_matches('/');
        Ok(Url::parse(&format!("{base}{path}"))?)
    }

    async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        params: &[(&str, String)],
    ) -> Result<T, ProviderError> {
        let url = self.endpoint(path)?;
        debug!(path, ?params, "TMDB request");

        let mut query: Vec<(&str, String)> = Vec::with_capacity(params.len() + 2);
        if let Some(key) = self.settings.api_key.as_deref()
            && !key.is_empty()
        {
            query.push(("api_key", key.to_string()));
        }
        query.push(("language", self.settings.language.clone()));
        query.extend(params.iter().cloned());

        let mut request = self.client.get(url).query(&query);
        if let Some(token) = self.settings.access_token.as_deref()
            && !token.is_empty()
        {
            request = request.bearer_auth(token);
        }

        let response = request.send().await?;
        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(map_status(status, path, &body));
        }

        let body = response.text().await?;
        serde_json::from_str(&body).map_err(|e| {
            warn!(path, error = %e, "Failed to parse TMDB response");
            ProviderError::Parse(format!("{path}: {e}"))
        })
    }

    async fn get_page(
        &self,
        path: &str,
        page: u32,
        extra: &[(&str, String)],
    ) -> Result<Page<CatalogItem>, ProviderError> {
        let mut params = vec![("page", page.max(1).to_string())];
        params.extend(extra.iter().cloned());
        self.get(path, &params).await
    }
}

fn map_status(status: StatusCode, path: &str, body: &str) -> ProviderError {
    match status {
        StatusCode::UNAUTHORIZED => ProviderError::InvalidApiKey,
        StatusCode::NOT_FOUND => ProviderError::NotFound(path.to_string()),
        StatusCode::TOO_MANY_REQUESTS => ProviderError::RateLimited,
        _ => {
            let message = serde_json::from_str::<ErrorBody>(body)
                .ok()
                .and_then(|b| b.status_message)
                .unwrap_or_else(|| {
                    status.canonical_reason().unwrap_or("unknown").to_string()
                });
            ProviderError::Api {
                status: status.as_u16(),
                message,
            }
        }
    }
}

fn title_segment(kind: MediaKind) -> &'static str {
    match kind {
        MediaKind::Tv => "tv",
        _ => "movie",
    }
}

#[async_trait]
impl MetadataProvider for TmdbProvider {
    async fn trending(
        &self,
        scope: TrendingScope,
        window: TimeWindow,
        page: u32,
    ) -> Result<Page<CatalogItem>, ProviderError> {
        let path = format!("/trending/{}/{}", scope.as_str(), window.as_str());
        self.get_page(&path, page, &[]).await
    }

    async fn movie_list(
        &self,
        list: MovieList,
        page: u32,
    ) -> Result<Page<CatalogItem>, ProviderError> {
        let path = format!("/movie/{}", list.path_segment());
        self.get_page(&path, page, &[]).await
    }

    async fn tv_list(
        &self,
        list: TvList,
        page: u32,
    ) -> Result<Page<CatalogItem>, ProviderError> {
        let path = format!("/tv/{}", list.path_segment());
        self.get_page(&path, page, &[]).await
    }

    async fn movie_details(
        &self,
        id: u64,
    ) -> Result<MovieDetails, ProviderError> {
        self.get(
            &format!("/movie/{id}"),
            &[("append_to_response", TITLE_APPENDS.to_string())],
        )
        .await
    }

    async fn tv_details(&self, id: u64) -> Result<TvDetails, ProviderError> {
        self.get(
            &format!("/tv/{id}"),
            &[("append_to_response", TITLE_APPENDS.to_string())],
        )
        .await
    }

    async fn season_details(
        &self,
        tv_id: u64,
        season_number: u32,
    ) -> Result<SeasonDetails, ProviderError> {
        self.get(&format!("/tv/{tv_id}/season/{season_number}"), &[])
            .await
    }

    async fn person_details(
        &self,
        id: u64,
    ) -> Result<PersonDetails, ProviderError> {
        self.get(
            &format!("/person/{id}"),
            &[("append_to_response", PERSON_APPENDS.to_string())],
        )
        .await
    }

    async fn credits(
        &self,
        kind: MediaKind,
        id: u64,
    ) -> Result<Credits, ProviderError> {
        self.get(&format!("/{}/{id}/credits", title_segment(kind)), &[])
            .await
    }

    async fn videos(
        &self,
        kind: MediaKind,
        id: u64,
    ) -> Result<VideoList, ProviderError> {
        self.get(&format!("/{}/{id}/videos", title_segment(kind)), &[])
            .await
    }

    async fn similar(
        &self,
        kind: MediaKind,
        id: u64,
        page: u32,
    ) -> Result<Page<CatalogItem>, ProviderError> {
        let path = format!("/{}/{id}/similar", title_segment(kind));
        self.get_page(&path, page, &[]).await
    }

    async fn recommendations(
        &self,
        kind: MediaKind,
        id: u64,
        page: u32,
    ) -> Result<Page<CatalogItem>, ProviderError> {
        let path = format!("/{}/{id}/recommendations", title_segment(kind));
        self.get_page(&path, page, &[]).await
    }

    async fn person_credits(
        &self,
        id: u64,
        kind: MediaKind,
    ) -> Result<PersonCredits, ProviderError> {
        let path = format!("/person/{id}/{}_credits", title_segment(kind));
        self.get(&path, &[]).await
    }

    async fn popular_people(
        &self,
        page: u32,
    ) -> Result<Page<CatalogItem>, ProviderError> {
        self.get_page("/person/popular", page, &[]).await
    }

    async fn search(
        &self,
        scope: SearchScope,
        query: &str,
        page: u32,
    ) -> Result<Page<CatalogItem>, ProviderError> {
        let path = format!("/search/{}", scope.path_segment());
        self.get_page(&path, page, &[("query", query.to_string())])
            .await
    }

    async fn discover(
        &self,
        filters: &DiscoverFilters,
    ) -> Result<Page<CatalogItem>, ProviderError> {
        let path = format!("/discover/{}", title_segment(filters.kind));
        self.get(&path, &filters.to_query()).await
    }

    async fn genres(&self, kind: MediaKind) -> Result<Vec<Genre>, ProviderError> {
        let list: GenreList = self
            .get(&format!("/genre/{}/list", title_segment(kind)), &[])
            .await?;
        Ok(list.genres)
    }

    fn name(&self) -> &'static str {
        "tmdb"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_requires_a_credential() {
        let err = TmdbProvider::new(TmdbSettings::default()).unwrap_err();
        assert!(matches!(err, ProviderError::MissingCredentials));

        let blank = TmdbSettings::with_api_key("   ");
        assert!(TmdbProvider::new(blank).is_err());

        let token = TmdbSettings {
            access_token: Some("token".into()),
            ..TmdbSettings::default()
        };
        assert!(TmdbProvider::new(token).is_ok());
    }

    #[test]
    fn new_rejects_malformed_base_url() {
        let settings = TmdbSettings {
            base_url: "not a url".into(),
            ..TmdbSettings::with_api_key("k")
        };
        assert!(matches!(
            TmdbProvider::new(settings),
            Err(ProviderError::InvalidUrl(_))
        ));
    }

    #[test]
    fn endpoint_joins_without_double_slash() {
        let provider = TmdbProvider::new(TmdbSettings {
            base_url: "https://api.themoviedb.org/3/".into(),
            ..TmdbSettings::with_api_key("k")
        })
        .unwrap();
        let url = provider.endpoint("/movie/550").unwrap();
        assert_eq!(url.as_str(), "https://api.themoviedb.org/3/movie/550");
    }

    #[test]
    fn status_mapping() {
        assert!(matches!(
            map_status(StatusCode::UNAUTHORIZED, "/x", ""),
            ProviderError::InvalidApiKey
        ));
        assert!(matches!(
            map_status(StatusCode::NOT_FOUND, "/movie/1", ""),
            ProviderError::NotFound(p) if p == "/movie/1"
        ));
        assert!(matches!(
            map_status(StatusCode::TOO_MANY_REQUESTS, "/x", ""),
            ProviderError::RateLimited
        ));
        let body = r#"{"status_code":7,"status_message":"Bad things"}"#;
        match map_status(StatusCode::BAD_GATEWAY, "/x", body) {
            ProviderError::Api { status, message } => {
                assert_eq!(status, 502);
                assert_eq!(message, "Bad things");
            }
            other => panic!("unexpected {other:?}"),
        }
        match map_status(StatusCode::INTERNAL_SERVER_ERROR, "/x", "oops") {
            ProviderError::Api { message, .. } => {
                assert_eq!(message, "Internal Server Error")
            }
            other => panic!("unexpected {other:?}"),
        }
    }
}
