use crate::catalog::{CatalogItem, CreditedWork, Page, parse_year};
use crate::media_kind::MediaKind;
use crate::video::{VideoDescriptor, VideoList};

#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Genre {
    pub id: u32,
    pub name: String,
}

/// `/genre/{kind}/list` envelope.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GenreList {
    #[cfg_attr(feature = "serde", serde(default))]
    pub genres: Vec<Genre>,
}

#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CastMember {
    pub id: u64,
    pub name: String,
    pub character: Option<String>,
    pub profile_path: Option<String>,
    pub order: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CrewMember {
    pub id: u64,
    pub name: String,
    pub job: Option<String>,
    pub department: Option<String>,
    pub profile_path: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Credits {
    #[cfg_attr(feature = "serde", serde(default))]
    pub cast: Vec<CastMember>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub crew: Vec<CrewMember>,
}

impl Credits {
    /// Billing-ordered leading cast.
    pub fn top_cast(&self, n: usize) -> Vec<&CastMember> {
        let mut cast: Vec<&CastMember> = self.cast.iter().collect();
        cast.sort_by_key(|c| c.order.unwrap_or(u32::MAX));
        cast.truncate(n);
        cast
    }

    pub fn directors(&self) -> impl Iterator<Item = &CrewMember> {
        self.crew
            .iter()
            .filter(|c| c.job.as_deref() == Some("Director"))
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ImageFile {
    pub file_path: String,
    pub width: Option<u32>,
    pub height: Option<u32>,
    pub aspect_ratio: Option<f64>,
    pub iso_639_1: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Images {
    #[cfg_attr(feature = "serde", serde(default))]
    pub backdrops: Vec<ImageFile>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub posters: Vec<ImageFile>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub logos: Vec<ImageFile>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub profiles: Vec<ImageFile>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ProductionCompany {
    pub id: u64,
    pub name: String,
    pub logo_path: Option<String>,
    pub origin_country: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Network {
    pub id: u64,
    pub name: String,
    pub logo_path: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Creator {
    pub id: u64,
    pub name: String,
    pub profile_path: Option<String>,
}

/// `/movie/{id}` with `credits,videos,similar,recommendations,images`
/// appended.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MovieDetails {
    pub id: u64,
    pub title: String,
    pub original_title: Option<String>,
    pub tagline: Option<String>,
    pub overview: Option<String>,
    pub release_date: Option<String>,
    pub runtime: Option<u32>,
    pub budget: Option<u64>,
    pub revenue: Option<u64>,
    pub status: Option<String>,
    pub homepage: Option<String>,
    pub imdb_id: Option<String>,
    pub original_language: Option<String>,
    pub vote_average: Option<f64>,
    pub vote_count: Option<u32>,
    pub popularity: Option<f64>,
    pub poster_path: Option<String>,
    pub backdrop_path: Option<String>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub genres: Vec<Genre>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub production_companies: Vec<ProductionCompany>,
    pub credits: Option<Credits>,
    pub videos: Option<VideoList>,
    pub similar: Option<Page<CatalogItem>>,
    pub recommendations: Option<Page<CatalogItem>>,
    pub images: Option<Images>,
}

impl MovieDetails {
    pub fn trailer(&self) -> Option<&VideoDescriptor> {
        self.videos.as_ref().and_then(VideoList::trailer)
    }

    pub fn year(&self) -> Option<i32> {
        self.release_date.as_deref().and_then(parse_year)
    }

    /// Trimmed record stored in the watchlist.
    pub fn to_catalog_item(&self) -> CatalogItem {
        CatalogItem {
            id: self.id,
            media_type: Some(MediaKind::Movie),
            title: Some(self.title.clone()),
            overview: self.overview.clone(),
            poster_path: self.poster_path.clone(),
            backdrop_path: self.backdrop_path.clone(),
            release_date: self.release_date.clone(),
            vote_average: self.vote_average,
            vote_count: self.vote_count,
            popularity: self.popularity,
            genre_ids: self.genres.iter().map(|g| g.id).collect(),
            ..Default::default()
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SeasonSummary {
    pub id: u64,
    pub name: String,
    pub season_number: u32,
    pub episode_count: Option<u32>,
    pub air_date: Option<String>,
    pub overview: Option<String>,
    pub poster_path: Option<String>,
}

/// `/tv/{id}` with the same appended sub-resources as movies.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TvDetails {
    pub id: u64,
    pub name: String,
    pub original_name: Option<String>,
    pub tagline: Option<String>,
    pub overview: Option<String>,
    pub first_air_date: Option<String>,
    pub last_air_date: Option<String>,
    pub number_of_seasons: Option<u32>,
    pub number_of_episodes: Option<u32>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub episode_run_time: Vec<u32>,
    pub status: Option<String>,
    pub homepage: Option<String>,
    pub vote_average: Option<f64>,
    pub vote_count: Option<u32>,
    pub popularity: Option<f64>,
    pub poster_path: Option<String>,
    pub backdrop_path: Option<String>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub genres: Vec<Genre>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub networks: Vec<Network>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub created_by: Vec<Creator>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub seasons: Vec<SeasonSummary>,
    pub credits: Option<Credits>,
    pub videos: Option<VideoList>,
    pub similar: Option<Page<CatalogItem>>,
    pub recommendations: Option<Page<CatalogItem>>,
    pub images: Option<Images>,
}

impl TvDetails {
    pub fn trailer(&self) -> Option<&VideoDescriptor> {
        self.videos.as_ref().and_then(VideoList::trailer)
    }

    pub fn year(&self) -> Option<i32> {
        self.first_air_date.as_deref().and_then(parse_year)
    }

    pub fn to_catalog_item(&self) -> CatalogItem {
        CatalogItem {
            id: self.id,
            media_type: Some(MediaKind::Tv),
            name: Some(self.name.clone()),
            overview: self.overview.clone(),
            poster_path: self.poster_path.clone(),
            backdrop_path: self.backdrop_path.clone(),
            first_air_date: self.first_air_date.clone(),
            vote_average: self.vote_average,
            vote_count: self.vote_count,
            popularity: self.popularity,
            genre_ids: self.genres.iter().map(|g| g.id).collect(),
            ..Default::default()
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Episode {
    pub id: u64,
    pub name: String,
    pub episode_number: u32,
    pub season_number: u32,
    pub air_date: Option<String>,
    pub overview: Option<String>,
    pub runtime: Option<u32>,
    pub still_path: Option<String>,
    pub vote_average: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SeasonDetails {
    pub id: u64,
    pub name: String,
    pub season_number: u32,
    pub air_date: Option<String>,
    pub overview: Option<String>,
    pub poster_path: Option<String>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub episodes: Vec<Episode>,
}

#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PersonCredits {
    #[cfg_attr(feature = "serde", serde(default))]
    pub cast: Vec<CreditedWork>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub crew: Vec<CreditedWork>,
}

/// `/person/{id}` with `movie_credits,tv_credits,images` appended.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PersonDetails {
    pub id: u64,
    pub name: String,
    pub biography: Option<String>,
    pub birthday: Option<String>,
    pub deathday: Option<String>,
    pub place_of_birth: Option<String>,
    pub known_for_department: Option<String>,
    pub profile_path: Option<String>,
    pub popularity: Option<f64>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub also_known_as: Vec<String>,
    pub movie_credits: Option<PersonCredits>,
    pub tv_credits: Option<PersonCredits>,
    pub images: Option<Images>,
}
