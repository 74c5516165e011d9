use std::fmt::{Display, Formatter};

/// Image category plus the size tier requested from the image CDN.
#[derive(Debug, Clone, Copy, PartialEq, Hash, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ImageSize {
    Poster(PosterSize),
    Backdrop(BackdropSize),
    Profile(ProfileSize),
    Logo(LogoSize),
}

impl Display for ImageSize {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            ImageSize::Poster(s) => write!(f, "Poster ({})", s.as_str()),
            ImageSize::Backdrop(s) => write!(f, "Backdrop ({})", s.as_str()),
            ImageSize::Profile(s) => write!(f, "Profile ({})", s.as_str()),
            ImageSize::Logo(s) => write!(f, "Logo ({})", s.as_str()),
        }
    }
}

impl Default for ImageSize {
    fn default() -> Self {
        Self::poster()
    }
}

impl ImageSize {
    /// Default poster size (w342), used by cards
    pub const fn poster() -> Self {
        Self::Poster(PosterSize::Medium)
    }

    /// Poster on detail pages (w500)
    pub const fn poster_large() -> Self {
        Self::Poster(PosterSize::Large)
    }

    /// Full-bleed backdrop for hero and detail headers
    pub const fn backdrop() -> Self {
        Self::Backdrop(BackdropSize::Original)
    }

    /// Portrait on person pages (h632)
    pub const fn profile() -> Self {
        Self::Profile(ProfileSize::Large)
    }

    pub const fn logo() -> Self {
        Self::Logo(LogoSize::Medium)
    }

    /// Path segment the CDN expects, e.g. `w342` or `original`.
    pub const fn as_str(&self) -> &'static str {
        match self {
            ImageSize::Poster(s) => s.as_str(),
            ImageSize::Backdrop(s) => s.as_str(),
            ImageSize::Profile(s) => s.as_str(),
            ImageSize::Logo(s) => s.as_str(),
        }
    }
}

/// Poster sizes (2:3)
#[derive(Debug, Clone, Copy, PartialEq, Hash, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PosterSize {
    /// w185
    Small,
    /// w342
    #[default]
    Medium,
    /// w500
    Large,
    Original,
}

impl PosterSize {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Small => "w185",
            Self::Medium => "w342",
            Self::Large => "w500",
            Self::Original => "original",
        }
    }
}

/// Backdrop sizes (16:9)
#[derive(Debug, Clone, Copy, PartialEq, Hash, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BackdropSize {
    /// w300
    Small,
    /// w780
    Medium,
    /// w1280
    Large,
    #[default]
    Original,
}

impl BackdropSize {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Small => "w300",
            Self::Medium => "w780",
            Self::Large => "w1280",
            Self::Original => "original",
        }
    }
}

/// Person profile sizes
#[derive(Debug, Clone, Copy, PartialEq, Hash, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ProfileSize {
    /// w45
    Small,
    /// w185
    #[default]
    Medium,
    /// h632, height-bound
    Large,
    Original,
}

impl ProfileSize {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Small => "w45",
            Self::Medium => "w185",
            Self::Large => "h632",
            Self::Original => "original",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Hash, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum LogoSize {
    Small,
    #[default]
    Medium,
    Large,
    Original,
}

impl LogoSize {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Small => "w92",
            Self::Medium => "w154",
            Self::Large => "w300",
            Self::Original => "original",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn size_segments_match_cdn_tiers() {
        assert_eq!(ImageSize::poster().as_str(), "w342");
        assert_eq!(ImageSize::backdrop().as_str(), "original");
        assert_eq!(ImageSize::profile().as_str(), "h632");
        assert_eq!(ImageSize::Logo(LogoSize::Small).as_str(), "w92");
        assert_eq!(ImageSize::Backdrop(BackdropSize::Large).as_str(), "w1280");
    }
}
