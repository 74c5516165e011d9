use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

use crate::error::ModelError;

/// Kind of record the catalog API returns in list and search results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum MediaKind {
    Movie,
    Tv,
    Person,
}

impl MediaKind {
    /// Path segment used by the API and by detail links (`/movie/42`).
    pub const fn as_str(&self) -> &'static str {
        match self {
            MediaKind::Movie => "movie",
            MediaKind::Tv => "tv",
            MediaKind::Person => "person",
        }
    }

    pub const fn is_title(&self) -> bool {
        matches!(self, MediaKind::Movie | MediaKind::Tv)
    }
}

impl Display for MediaKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MediaKind {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "movie" => Ok(MediaKind::Movie),
            "tv" => Ok(MediaKind::Tv),
            "person" => Ok(MediaKind::Person),
            other => Err(ModelError::InvalidMediaKind(other.to_string())),
        }
    }
}

/// Which records a trending request covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TrendingScope {
    #[default]
    All,
    Movie,
    Tv,
    Person,
}

impl TrendingScope {
    pub const fn as_str(&self) -> &'static str {
        match self {
            TrendingScope::All => "all",
            TrendingScope::Movie => "movie",
            TrendingScope::Tv => "tv",
            TrendingScope::Person => "person",
        }
    }
}

impl From<MediaKind> for TrendingScope {
    fn from(kind: MediaKind) -> Self {
        match kind {
            MediaKind::Movie => TrendingScope::Movie,
            MediaKind::Tv => TrendingScope::Tv,
            MediaKind::Person => TrendingScope::Person,
        }
    }
}

/// Trending aggregation window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TimeWindow {
    Day,
    #[default]
    Week,
}

impl TimeWindow {
    pub const fn as_str(&self) -> &'static str {
        match self {
            TimeWindow::Day => "day",
            TimeWindow::Week => "week",
        }
    }
}

impl Display for TimeWindow {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TimeWindow {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "day" | "today" => Ok(TimeWindow::Day),
            "week" => Ok(TimeWindow::Week),
            other => Err(ModelError::InvalidTimeWindow(other.to_string())),
        }
    }
}
