use std::str::FromStr;

use streamflix_model::{CatalogItem, TimeWindow, TrendingScope};
use tracing::instrument;

use super::rows;
use crate::error::{CatalogError, Result};
use crate::providers::{MetadataProvider, MovieList, TvList};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum MovieTab {
    #[default]
    Trending,
    Popular,
    TopRated,
}

impl MovieTab {
    pub const ALL: [MovieTab; 3] =
        [MovieTab::Trending, MovieTab::Popular, MovieTab::TopRated];

    pub fn label(&self) -> &'static str {
        match self {
            MovieTab::Trending => "Trending",
            MovieTab::Popular => "Popular",
            MovieTab::TopRated => "Top Rated",
        }
    }
}

impl FromStr for MovieTab {
    type Err = CatalogError;

    fn from_str(s: &str) -> Result<Self> {
        match normalize(s).as_str() {
            "trending" => Ok(MovieTab::Trending),
            "popular" => Ok(MovieTab::Popular),
            "top_rated" => Ok(MovieTab::TopRated),
            other => Err(CatalogError::InvalidQuery(format!(
                "unknown movie tab: {other}"
            ))),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TvTab {
    AiringToday,
    OnTheAir,
    #[default]
    Popular,
    TopRated,
}

impl TvTab {
    pub const ALL: [TvTab; 4] = [
        TvTab::AiringToday,
        TvTab::OnTheAir,
        TvTab::Popular,
        TvTab::TopRated,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            TvTab::AiringToday => "Airing Today",
            TvTab::OnTheAir => "On The Air",
            TvTab::Popular => "Popular",
            TvTab::TopRated => "Top Rated",
        }
    }

    fn list(&self) -> TvList {
        match self {
            TvTab::AiringToday => TvList::AiringToday,
            TvTab::OnTheAir => TvList::OnTheAir,
            TvTab::Popular => TvList::Popular,
            TvTab::TopRated => TvList::TopRated,
        }
    }
}

impl FromStr for TvTab {
    type Err = CatalogError;

    fn from_str(s: &str) -> Result<Self> {
        match normalize(s).as_str() {
            "airing_today" => Ok(TvTab::AiringToday),
            "on_the_air" => Ok(TvTab::OnTheAir),
            "popular" => Ok(TvTab::Popular),
            "top_rated" => Ok(TvTab::TopRated),
            other => Err(CatalogError::InvalidQuery(format!(
                "unknown tv tab: {other}"
            ))),
        }
    }
}

fn normalize(s: &str) -> String {
    s.trim().to_ascii_lowercase().replace(['-', ' '], "_")
}

/// Movies screen: weekly trending plus two curated lists.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MoviesPage {
    pub trending: Vec<CatalogItem>,
    pub popular: Vec<CatalogItem>,
    pub top_rated: Vec<CatalogItem>,
}

impl MoviesPage {
    #[instrument(skip_all)]
    pub async fn load<P: MetadataProvider + ?Sized>(provider: &P) -> Result<Self> {
        let (trending, popular, top_rated) = futures::try_join!(
            provider.trending(TrendingScope::Movie, TimeWindow::Week, 1),
            provider.movie_list(MovieList::Popular, 1),
            provider.movie_list(MovieList::TopRated, 1),
        )?;
        Ok(Self {
            trending: rows(trending),
            popular: rows(popular),
            top_rated: rows(top_rated),
        })
    }

    pub fn tab(&self, tab: MovieTab) -> &[CatalogItem] {
        match tab {
            MovieTab::Trending => &self.trending,
            MovieTab::Popular => &self.popular,
            MovieTab::TopRated => &self.top_rated,
        }
    }
}

/// TV screen: four curated lists, one per tab.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TvPage {
    pub airing_today: Vec<CatalogItem>,
    pub on_the_air: Vec<CatalogItem>,
    pub popular: Vec<CatalogItem>,
    pub top_rated: Vec<CatalogItem>,
}

impl TvPage {
    #[instrument(skip_all)]
    pub async fn load<P: MetadataProvider + ?Sized>(provider: &P) -> Result<Self> {
        let (airing_today, on_the_air, popular, top_rated) = futures::try_join!(
            provider.tv_list(TvTab::AiringToday.list(), 1),
            provider.tv_list(TvTab::OnTheAir.list(), 1),
            provider.tv_list(TvTab::Popular.list(), 1),
            provider.tv_list(TvTab::TopRated.list(), 1),
        )?;
        Ok(Self {
            airing_today: rows(airing_today),
            on_the_air: rows(on_the_air),
            popular: rows(popular),
            top_rated: rows(top_rated),
        })
    }

    pub fn tab(&self, tab: TvTab) -> &[CatalogItem] {
        match tab {
            TvTab::AiringToday => &self.airing_today,
            TvTab::OnTheAir => &self.on_the_air,
            TvTab::Popular => &self.popular,
            TvTab::TopRated => &self.top_rated,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tabs_parse_loosely() {
        assert_eq!("Top Rated".parse::<MovieTab>().unwrap(), MovieTab::TopRated);
        assert_eq!("top-rated".parse::<TvTab>().unwrap(), TvTab::TopRated);
        assert_eq!("on_the_air".parse::<TvTab>().unwrap(), TvTab::OnTheAir);
        assert!("upcoming".parse::<MovieTab>().is_err());
    }

    #[test]
    fn default_tabs() {
        assert_eq!(MovieTab::default(), MovieTab::Trending);
        assert_eq!(TvTab::default(), TvTab::Popular);
    }
}
