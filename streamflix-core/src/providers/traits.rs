use async_trait::async_trait;
use streamflix_model::{
    CatalogItem, Credits, Genre, MediaKind, MovieDetails, Page, PersonCredits,
    PersonDetails, SeasonDetails, TimeWindow, TrendingScope, TvDetails,
    VideoList,
};

#[derive(Debug, thiserror::Error)]
pub enum ProviderError {
    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Rate limited")]
    RateLimited,

    #[error("Invalid API key")]
    InvalidApiKey,

    #[error("No API key or access token configured")]
    MissingCredentials,

    #[error("Network error: {0}")]
    Network(#[source] reqwest::Error),

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
}

// Request URLs carry the `api_key` query parameter; keep them out of
// messages and logs.
impl From<reqwest::Error> for ProviderError {
    fn from(err: reqwest::Error) -> Self {
        ProviderError::Network(err.without_url())
    }
}

impl ProviderError {
    /// Errors worth retrying after a pause.
    pub fn is_transient(&self) -> bool {
        match self {
            ProviderError::RateLimited => true,
            ProviderError::Network(e) => e.is_timeout() || e.is_connect(),
            ProviderError::Api { status, .. } => *status >= 500,
            _ => false,
        }
    }
}

/// Curated movie lists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MovieList {
    Popular,
    TopRated,
    NowPlaying,
    Upcoming,
}

impl MovieList {
    pub fn path_segment(&self) -> &'static str {
        match self {
            MovieList::Popular => "popular",
            MovieList::TopRated => "top_rated",
            MovieList::NowPlaying => "now_playing",
            MovieList::Upcoming => "upcoming",
        }
    }
}

/// Curated TV lists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TvList {
    Popular,
    TopRated,
    AiringToday,
    OnTheAir,
}

impl TvList {
    pub fn path_segment(&self) -> &'static str {
        match self {
            TvList::Popular => "popular",
            TvList::TopRated => "top_rated",
            TvList::AiringToday => "airing_today",
            TvList::OnTheAir => "on_the_air",
        }
    }
}

/// Which search endpoint to hit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SearchScope {
    #[default]
    Multi,
    Movie,
    Tv,
    Person,
}

impl SearchScope {
    pub fn path_segment(&self) -> &'static str {
        match self {
            SearchScope::Multi => "multi",
            SearchScope::Movie => "movie",
            SearchScope::Tv => "tv",
            SearchScope::Person => "person",
        }
    }
}

/// Filters for `/discover/{movie,tv}`. Unset fields are omitted from the
/// request.
#[derive(Debug, Clone, PartialEq)]
pub struct DiscoverFilters {
    pub kind: MediaKind,
    pub page: u32,
    pub sort_by: String,
    pub with_genres: Vec<u32>,
    pub year: Option<i32>,
    pub min_rating: Option<f64>,
    pub max_rating: Option<f64>,
    pub min_runtime: Option<u32>,
    pub max_runtime: Option<u32>,
}

impl Default for DiscoverFilters {
    fn default() -> Self {
        Self {
            kind: MediaKind::Movie,
            page: 1,
            sort_by: "popularity.desc".to_string(),
            with_genres: Vec::new(),
            year: None,
            min_rating: None,
            max_rating: None,
            min_runtime: None,
            max_runtime: None,
        }
    }
}

impl DiscoverFilters {
    pub fn movies() -> Self {
        Self::default()
    }

    pub fn shows() -> Self {
        Self {
            kind: MediaKind::Tv,
            ..Self::default()
        }
    }

    /// Query pairs for the discover endpoint of `self.kind`.
    pub fn to_query(&self) -> Vec<(&'static str, String)> {
        let mut params = vec![
            ("page", self.page.max(1).to_string()),
            ("sort_by", self.sort_by.clone()),
        ];
        if !self.with_genres.is_empty() {
            let ids: Vec<String> =
                self.with_genres.iter().map(u32::to_string).collect();
            params.push(("with_genres", ids.join(",")));
        }
        if let Some(year) = self.year {
            let key = match self.kind {
                MediaKind::Tv => "first_air_date_year",
                _ => "year",
            };
            params.push((key, year.to_string()));
        }
        if let Some(v) = self.min_rating {
            params.push(("vote_average.gte", v.to_string()));
        }
        if let Some(v) = self.max_rating {
            params.push(("vote_average.lte", v.to_string()));
        }
        // Runtime filters only exist for movies.
        if self.kind == MediaKind::Movie {
            if let Some(v) = self.min_runtime {
                params.push(("with_runtime.gte", v.to_string()));
            }
            if let Some(v) = self.max_runtime {
                params.push(("with_runtime.lte", v.to_string()));
            }
        }
        params
    }
}

/// Read-only access to an external movie/TV catalog.
#[async_trait]
pub trait MetadataProvider: Send + Sync {
    async fn trending(
        &self,
        scope: TrendingScope,
        window: TimeWindow,
        page: u32,
    ) -> Result<Page<CatalogItem>, ProviderError>;

    async fn movie_list(
        &self,
        list: MovieList,
        page: u32,
    ) -> Result<Page<CatalogItem>, ProviderError>;

    async fn tv_list(
        &self,
        list: TvList,
        page: u32,
    ) -> Result<Page<CatalogItem>, ProviderError>;

    async fn movie_details(
        &self,
        id: u64,
    ) -> Result<MovieDetails, ProviderError>;

    async fn tv_details(&self, id: u64) -> Result<TvDetails, ProviderError>;

    async fn season_details(
        &self,
        tv_id: u64,
        season_number: u32,
    ) -> Result<SeasonDetails, ProviderError>;

    async fn person_details(
        &self,
        id: u64,
    ) -> Result<PersonDetails, ProviderError>;

    async fn credits(
        &self,
        kind: MediaKind,
        id: u64,
    ) -> Result<Credits, ProviderError>;

    async fn videos(
        &self,
        kind: MediaKind,
        id: u64,
    ) -> Result<VideoList, ProviderError>;

    async fn similar(
        &self,
        kind: MediaKind,
        id: u64,
        page: u32,
    ) -> Result<Page<CatalogItem>, ProviderError>;

    async fn recommendations(
        &self,
        kind: MediaKind,
        id: u64,
        page: u32,
    ) -> Result<Page<CatalogItem>, ProviderError>;

    /// Movie or TV filmography of a person.
    async fn person_credits(
        &self,
        id: u64,
        kind: MediaKind,
    ) -> Result<PersonCredits, ProviderError>;

    async fn popular_people(
        &self,
        page: u32,
    ) -> Result<Page<CatalogItem>, ProviderError>;

    async fn search(
        &self,
        scope: SearchScope,
        query: &str,
        page: u32,
    ) -> Result<Page<CatalogItem>, ProviderError>;

    async fn discover(
        &self,
        filters: &DiscoverFilters,
    ) -> Result<Page<CatalogItem>, ProviderError>;

    async fn genres(&self, kind: MediaKind) -> Result<Vec<Genre>, ProviderError>;

    fn name(&self) -> &'static str;
}
