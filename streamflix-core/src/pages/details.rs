//! Detail screens for a movie, a show and a person.

use std::cmp::Ordering;

use streamflix_model::{
    CastMember, CatalogItem, CreditedWork, ImageSize, MediaKind, MovieDetails,
    PersonDetails, TvDetails, format_currency, format_date, format_runtime,
};
use tracing::instrument;

use crate::error::Result;
use crate::image::ImageUrlBuilder;
use crate::providers::MetadataProvider;

pub const CAST_LIMIT: usize = 12;
pub const SIMILAR_LIMIT: usize = 10;
pub const KNOWN_FOR_LIMIT: usize = 10;

fn trailer_embed(key: &str) -> String {
    format!("https://www.youtube.com/embed/{key}")
}

fn positive_rating(vote_average: Option<f64>) -> Option<String> {
    vote_average
        .filter(|v| *v > 0.0)
        .map(|v| format!("{v:.1}"))
}

fn positive_amount(amount: Option<u64>) -> Option<String> {
    amount.filter(|v| *v > 0).map(|v| format_currency(Some(v)))
}

fn leading<T: Clone>(items: &[T], n: usize) -> Vec<T> {
    items.iter().take(n).cloned().collect()
}

#[derive(Debug, Clone, PartialEq)]
pub struct MovieView {
    pub details: MovieDetails,
    pub rating: Option<String>,
    pub year: Option<i32>,
    pub runtime: String,
    pub budget: Option<String>,
    pub revenue: Option<String>,
    pub release_date: String,
    pub genres: Vec<String>,
    pub trailer_url: Option<String>,
    pub poster_url: Option<String>,
    pub backdrop_url: Option<String>,
    pub cast: Vec<CastMember>,
    pub similar: Vec<CatalogItem>,
}

impl MovieView {
    #[instrument(skip(provider, images))]
    pub async fn load<P: MetadataProvider + ?Sized>(
        provider: &P,
        images: &ImageUrlBuilder,
        id: u64,
    ) -> Result<Self> {
        let details = provider.movie_details(id).await?;
        Ok(Self::from_details(details, images))
    }

    pub fn from_details(details: MovieDetails, images: &ImageUrlBuilder) -> Self {
        let cast = details
            .credits
            .as_ref()
            .map(|c| leading(&c.cast, CAST_LIMIT))
            .unwrap_or_default();
        let similar = details
            .similar
            .as_ref()
            .map(|p| leading(&p.results, SIMILAR_LIMIT))
            .unwrap_or_default();

        Self {
            rating: positive_rating(details.vote_average),
            year: details.year(),
            runtime: format_runtime(details.runtime),
            budget: positive_amount(details.budget),
            revenue: positive_amount(details.revenue),
            release_date: format_date(details.release_date.as_deref()),
            genres: details.genres.iter().map(|g| g.name.clone()).collect(),
            trailer_url: details.trailer().map(|t| trailer_embed(&t.key)),
            poster_url: images
                .url(details.poster_path.as_deref(), ImageSize::poster_large()),
            backdrop_url: images
                .url(details.backdrop_path.as_deref(), ImageSize::backdrop()),
            cast,
            similar,
            details,
        }
    }

    pub fn title(&self) -> &str {
        &self.details.title
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TvView {
    pub details: TvDetails,
    pub rating: Option<String>,
    pub year: Option<i32>,
    /// "1 Season", "5 Seasons".
    pub seasons: Option<String>,
    pub episodes: Option<String>,
    pub first_air_date: String,
    pub network: Option<String>,
    pub creators: Vec<String>,
    pub genres: Vec<String>,
    pub trailer_url: Option<String>,
    pub poster_url: Option<String>,
    pub backdrop_url: Option<String>,
    pub cast: Vec<CastMember>,
    pub similar: Vec<CatalogItem>,
}

impl TvView {
    #[instrument(skip(provider, images))]
    pub async fn load<P: MetadataProvider + ?Sized>(
        provider: &P,
        images: &ImageUrlBuilder,
        id: u64,
    ) -> Result<Self> {
        let details = provider.tv_details(id).await?;
        Ok(Self::from_details(details, images))
    }

    pub fn from_details(details: TvDetails, images: &ImageUrlBuilder) -> Self {
        let cast = details
            .credits
            .as_ref()
            .map(|c| leading(&c.cast, CAST_LIMIT))
            .unwrap_or_default();
        let similar = details
            .similar
            .as_ref()
            .map(|p| leading(&p.results, SIMILAR_LIMIT))
            .unwrap_or_default();

        Self {
            rating: positive_rating(details.vote_average),
            year: details.year(),
            seasons: details.number_of_seasons.filter(|n| *n > 0).map(|n| {
                format!("{n} Season{}", if n > 1 { "s" } else { "" })
            }),
            episodes: details
                .number_of_episodes
                .filter(|n| *n > 0)
                .map(|n| format!("{n} Episodes")),
            first_air_date: format_date(details.first_air_date.as_deref()),
            network: details.networks.first().map(|n| n.name.clone()),
            creators: details.created_by.iter().map(|c| c.name.clone()).collect(),
            genres: details.genres.iter().map(|g| g.name.clone()).collect(),
            trailer_url: details.trailer().map(|t| trailer_embed(&t.key)),
            poster_url: images
                .url(details.poster_path.as_deref(), ImageSize::poster_large()),
            backdrop_url: images
                .url(details.backdrop_path.as_deref(), ImageSize::backdrop()),
            cast,
            similar,
            details,
        }
    }

    pub fn title(&self) -> &str {
        &self.details.name
    }
}

/// One title in a person's "known for" strip.
#[derive(Debug, Clone, PartialEq)]
pub struct CreditCard {
    pub item: CatalogItem,
    pub character: Option<String>,
}

impl CreditCard {
    fn from_work(work: &CreditedWork, kind: MediaKind) -> Self {
        let mut item = work.item.clone();
        item.media_type = Some(kind);
        Self {
            item,
            character: work.character.clone(),
        }
    }

    fn popularity(&self) -> f64 {
        self.item.popularity.unwrap_or(0.0)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PersonView {
    pub details: PersonDetails,
    pub birthday: String,
    pub profile_url: Option<String>,
    /// Header image borrowed from the most popular credit that has one.
    pub backdrop_url: Option<String>,
    pub known_for: Vec<CreditCard>,
    pub credit_count: usize,
}

impl PersonView {
    #[instrument(skip(provider, images))]
    pub async fn load<P: MetadataProvider + ?Sized>(
        provider: &P,
        images: &ImageUrlBuilder,
        id: u64,
    ) -> Result<Self> {
        let details = provider.person_details(id).await?;
        Ok(Self::from_details(details, images))
    }

    pub fn from_details(details: PersonDetails, images: &ImageUrlBuilder) -> Self {
        let credits = merged_cast_credits(&details);
        let backdrop = credits
            .iter()
            .find_map(|c| c.item.backdrop_path.as_deref());

        Self {
            birthday: format_date(details.birthday.as_deref()),
            profile_url: images
                .url(details.profile_path.as_deref(), ImageSize::profile()),
            backdrop_url: images.url(backdrop, ImageSize::backdrop()),
            credit_count: credits.len(),
            known_for: leading(&credits, KNOWN_FOR_LIMIT),
            details,
        }
    }

    pub fn name(&self) -> &str {
        &self.details.name
    }
}

/// Movie and TV acting credits, most popular first.
pub fn merged_cast_credits(details: &PersonDetails) -> Vec<CreditCard> {
    let movies = details
        .movie_credits
        .iter()
        .flat_map(|c| &c.cast)
        .map(|w| CreditCard::from_work(w, MediaKind::Movie));
    let shows = details
        .tv_credits
        .iter()
        .flat_map(|c| &c.cast)
        .map(|w| CreditCard::from_work(w, MediaKind::Tv));

    let mut credits: Vec<CreditCard> = movies.chain(shows).collect();
    credits.sort_by(|a, b| {
        b.popularity()
            .partial_cmp(&a.popularity())
            .unwrap_or(Ordering::Equal)
    });
    credits
}
