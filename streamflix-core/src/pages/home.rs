use streamflix_model::{
    CarouselItem, CatalogItem, MediaKind, TimeWindow, TrendingScope,
};
use tracing::{debug, instrument};

use super::rows;
use crate::error::Result;
use crate::providers::{MetadataProvider, MovieList, TvList};

/// Everything on the landing page.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HomeFeed {
    pub trending_today: Vec<CatalogItem>,
    pub trending_week: Vec<CatalogItem>,
    pub popular_movies: Vec<CatalogItem>,
    pub popular_tv: Vec<CatalogItem>,
}

impl HomeFeed {
    /// Fetches the four home lists concurrently. Any failure fails the load.
    #[instrument(skip_all, fields(provider = provider.name()))]
    pub async fn load<P: MetadataProvider + ?Sized>(provider: &P) -> Result<Self> {
        let (day, week, movies, tv) = futures::try_join!(
            provider.trending(TrendingScope::All, TimeWindow::Day, 1),
            provider.trending(TrendingScope::All, TimeWindow::Week, 1),
            provider.movie_list(MovieList::Popular, 1),
            provider.tv_list(TvList::Popular, 1),
        )?;

        let feed = Self {
            trending_today: rows(day),
            trending_week: rows(week),
            popular_movies: rows(movies),
            popular_tv: rows(tv),
        };
        debug!(
            today = feed.trending_today.len(),
            week = feed.trending_week.len(),
            "home feed loaded"
        );
        Ok(feed)
    }

    /// Headline item: the top weekly trending entry.
    pub fn hero(&self) -> Option<&CatalogItem> {
        self.trending_week.first()
    }

    pub fn hero_kind(&self) -> MediaKind {
        self.hero()
            .map(|item| item.kind_or(MediaKind::Movie))
            .unwrap_or(MediaKind::Movie)
    }

    pub fn trending(&self, window: TimeWindow) -> &[CatalogItem] {
        match window {
            TimeWindow::Day => &self.trending_today,
            TimeWindow::Week => &self.trending_week,
        }
    }

    /// Slides for the hero carousel, drawn from weekly trending titles.
    pub fn carousel_items(&self) -> Vec<CarouselItem> {
        self.trending_week
            .iter()
            .filter_map(CarouselItem::from_catalog)
            .collect()
    }
}

