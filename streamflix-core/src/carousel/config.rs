use std::time::Duration;

pub const DEFAULT_AUTOPLAY_INTERVAL: Duration = Duration::from_secs(8);
pub const DEFAULT_PREVIEW_DELAY: Duration = Duration::from_secs(2);
pub const DEFAULT_LOOKUP_TIMEOUT: Duration = Duration::from_secs(5);
pub const DEFAULT_MAX_ITEMS: usize = 10;
pub const DEFAULT_VISIBILITY_THRESHOLD: f64 = 0.3;

/// Timing and sizing knobs for the hero carousel.
#[derive(Debug, Clone, PartialEq)]
pub struct CarouselConfig {
    /// Period of automatic rotation while the carousel is active.
    pub autoplay_interval: Duration,
    /// Time a slide must stay current before its trailer is revealed.
    pub preview_delay: Duration,
    /// Upper bound on a single trailer lookup.
    pub lookup_timeout: Duration,
    /// Only the first `max_items` supplied items are shown.
    pub max_items: usize,
    /// Fraction of the carousel that must be in view to count as visible.
    pub visibility_threshold: f64,
    pub start_muted: bool,
}

impl Default for CarouselConfig {
    fn default() -> Self {
        Self {
            autoplay_interval: DEFAULT_AUTOPLAY_INTERVAL,
            preview_delay: DEFAULT_PREVIEW_DELAY,
            lookup_timeout: DEFAULT_LOOKUP_TIMEOUT,
            max_items: DEFAULT_MAX_ITEMS,
            visibility_threshold: DEFAULT_VISIBILITY_THRESHOLD,
            start_muted: true,
        }
    }
}

impl CarouselConfig {
    /// Whether an intersection ratio counts as visible.
    pub fn is_visible_ratio(&self, ratio: f64) -> bool {
        ratio >= self.visibility_threshold
    }
}
