//! Hero carousel scheduling as a pure state machine.
//!
//! [`CarouselState`] never touches a clock or the network. Every input is an
//! [`Event`] and every side effect it wants is returned as an [`Effect`]
//! carrying a fresh [`Token`]. Completions are fed back as events with that
//! token; a completion whose token is no longer pending is dropped, which is
//! what keeps a late trailer lookup from revealing a video on the wrong slide.

use std::sync::Arc;
use std::time::Duration;

use streamflix_model::{CarouselItem, MediaKind, VideoDescriptor, find_trailer};
use tracing::{debug, trace, warn};

use super::config::CarouselConfig;
use super::lookup::LookupFailure;

/// Identifies one timer or lookup issued by the state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Token(u64);

impl Token {
    pub fn get(self) -> u64 {
        self.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Next,
    Previous,
}

/// A trailer lookup the runtime should perform.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreviewRequest {
    pub token: Token,
    pub index: usize,
    pub item_id: u64,
    pub kind: MediaKind,
}

#[derive(Debug, Clone)]
pub enum Event {
    Advance(Direction),
    JumpTo(usize),
    VisibilityChanged(bool),
    /// Raw viewport intersection ratio; compared against the configured
    /// threshold.
    IntersectionChanged(f64),
    InteractionChanged(bool),
    ToggleMute,
    AutoplayElapsed(Token),
    LookupResolved {
        token: Token,
        outcome: Result<Vec<VideoDescriptor>, LookupFailure>,
    },
    PreviewDelayElapsed(Token),
    Unmount,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Start a repeating timer that fires `AutoplayElapsed(token)` every
    /// `period`, first after one full period.
    StartAutoplay { token: Token, period: Duration },
    StopAutoplay { token: Token },
    Lookup(PreviewRequest),
    CancelLookup { token: Token },
    /// One-shot timer firing `PreviewDelayElapsed(token)`.
    StartPreviewDelay { token: Token, delay: Duration },
    CancelPreviewDelay { token: Token },
}

/// Read-only copy of the observable state.
#[derive(Debug, Clone, PartialEq)]
pub struct CarouselSnapshot {
    pub items: Arc<[CarouselItem]>,
    pub current_index: usize,
    pub is_visible: bool,
    pub is_interacting: bool,
    pub preview_key: Option<String>,
    pub preview_revealed: bool,
    pub muted: bool,
    pub autoplay_active: bool,
    pub mounted: bool,
}

impl CarouselSnapshot {
    pub fn current(&self) -> Option<&CarouselItem> {
        self.items.get(self.current_index)
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Key of the trailer currently on screen.
    pub fn playing_key(&self) -> Option<&str> {
        if self.preview_revealed {
            self.preview_key.as_deref()
        } else {
            None
        }
    }
}

#[derive(Debug, Clone)]
pub struct CarouselState {
    config: CarouselConfig,
    items: Arc<[CarouselItem]>,
    current_index: usize,
    is_visible: bool,
    is_interacting: bool,
    preview_key: Option<String>,
    preview_revealed: bool,
    muted: bool,
    autoplay: Option<Token>,
    preview_delay: Option<Token>,
    lookup: Option<Token>,
    next_token: u64,
    mounted: bool,
}

impl CarouselState {
    /// Mounts the carousel over the first `config.max_items` items.
    ///
    /// The carousel starts visible, so the returned effects start rotation
    /// and the first trailer lookup.
    pub fn mount(
        mut items: Vec<CarouselItem>,
        config: CarouselConfig,
    ) -> (Self, Vec<Effect>) {
        items.truncate(config.max_items);
        let mut state = Self {
            muted: config.start_muted,
            config,
            items: items.into(),
            current_index: 0,
            is_visible: true,
            is_interacting: false,
            preview_key: None,
            preview_revealed: false,
            autoplay: None,
            preview_delay: None,
            lookup: None,
            next_token: 0,
            mounted: true,
        };

        let mut effects = Vec::new();
        state.sync_autoplay(&mut effects);
        state.restart_preview(&mut effects);
        debug!(items = state.items.len(), "carousel mounted");
        (state, effects)
    }

    pub fn config(&self) -> &CarouselConfig {
        &self.config
    }

    pub fn items(&self) -> &[CarouselItem] {
        &self.items
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    pub fn current(&self) -> Option<&CarouselItem> {
        self.items.get(self.current_index)
    }

    pub fn is_visible(&self) -> bool {
        self.is_visible
    }

    pub fn is_interacting(&self) -> bool {
        self.is_interacting
    }

    pub fn preview_key(&self) -> Option<&str> {
        self.preview_key.as_deref()
    }

    pub fn preview_revealed(&self) -> bool {
        self.preview_revealed
    }

    pub fn muted(&self) -> bool {
        self.muted
    }

    pub fn is_mounted(&self) -> bool {
        self.mounted
    }

    /// Whether an auto-advance timer is pending.
    pub fn autoplay_active(&self) -> bool {
        self.autoplay.is_some()
    }

    pub fn pending_lookup(&self) -> Option<Token> {
        self.lookup
    }

    pub fn pending_preview_delay(&self) -> Option<Token> {
        self.preview_delay
    }

    pub fn autoplay_token(&self) -> Option<Token> {
        self.autoplay
    }

    pub fn snapshot(&self) -> CarouselSnapshot {
        CarouselSnapshot {
            items: Arc::clone(&self.items),
            current_index: self.current_index,
            is_visible: self.is_visible,
            is_interacting: self.is_interacting,
            preview_key: self.preview_key.clone(),
            preview_revealed: self.preview_revealed,
            muted: self.muted,
            autoplay_active: self.autoplay.is_some(),
            mounted: self.mounted,
        }
    }

    pub fn advance(&mut self, direction: Direction) -> Vec<Effect> {
        self.handle(Event::Advance(direction))
    }

    pub fn jump_to(&mut self, index: usize) -> Vec<Effect> {
        self.handle(Event::JumpTo(index))
    }

    pub fn set_visible(&mut self, visible: bool) -> Vec<Effect> {
        self.handle(Event::VisibilityChanged(visible))
    }

    pub fn set_intersection_ratio(&mut self, ratio: f64) -> Vec<Effect> {
        self.handle(Event::IntersectionChanged(ratio))
    }

    pub fn set_interacting(&mut self, interacting: bool) -> Vec<Effect> {
        self.handle(Event::InteractionChanged(interacting))
    }

    pub fn toggle_mute(&mut self) -> Vec<Effect> {
        self.handle(Event::ToggleMute)
    }

    /// Tears everything down. Later events are ignored.
    pub fn unmount(&mut self) -> Vec<Effect> {
        self.handle(Event::Unmount)
    }

    pub fn handle(&mut self, event: Event) -> Vec<Effect> {
        let mut effects = Vec::new();
        if !self.mounted {
            trace!(?event, "carousel unmounted, event dropped");
            return effects;
        }

        match event {
            Event::Advance(direction) => self.on_advance(direction, &mut effects),
            Event::JumpTo(index) => self.on_jump(index, &mut effects),
            Event::VisibilityChanged(visible) => {
                self.on_visibility(visible, &mut effects)
            }
            Event::IntersectionChanged(ratio) => {
                let visible = self.config.is_visible_ratio(ratio);
                self.on_visibility(visible, &mut effects)
            }
            Event::InteractionChanged(interacting) => {
                if self.is_interacting != interacting {
                    self.is_interacting = interacting;
                    self.sync_autoplay(&mut effects);
                }
            }
            Event::ToggleMute => {
                if self.preview_revealed {
                    self.muted = !self.muted;
                }
            }
            Event::AutoplayElapsed(token) => {
                if self.autoplay == Some(token) {
                    self.on_advance(Direction::Next, &mut effects);
                } else {
                    trace!(token = token.get(), "stale autoplay tick");
                }
            }
            Event::LookupResolved { token, outcome } => {
                self.on_lookup(token, outcome, &mut effects)
            }
            Event::PreviewDelayElapsed(token) => {
                if self.preview_delay == Some(token) {
                    self.preview_delay = None;
                    self.preview_revealed = self.preview_key.is_some();
                    debug!(index = self.current_index, "trailer revealed");
                } else {
                    trace!(token = token.get(), "stale preview delay");
                }
            }
            Event::Unmount => {
                if let Some(token) = self.autoplay.take() {
                    effects.push(Effect::StopAutoplay { token });
                }
                self.clear_preview(&mut effects);
                self.mounted = false;
                debug!("carousel unmounted");
            }
        }
        effects
    }

    fn on_advance(&mut self, direction: Direction, effects: &mut Vec<Effect>) {
        let len = self.items.len();
        if len == 0 {
            return;
        }
        let next = match direction {
            Direction::Next => (self.current_index + 1) % len,
            Direction::Previous => (self.current_index + len - 1) % len,
        };
        self.set_index(next, effects);
    }

    fn on_jump(&mut self, index: usize, effects: &mut Vec<Effect>) {
        if index >= self.items.len() {
            debug!(index, len = self.items.len(), "jump out of range ignored");
            return;
        }
        if index == self.current_index {
            return;
        }
        self.set_index(index, effects);
    }

    fn on_visibility(&mut self, visible: bool, effects: &mut Vec<Effect>) {
        if self.is_visible == visible {
            return;
        }
        self.is_visible = visible;
        self.sync_autoplay(effects);
        self.restart_preview(effects);
    }

    fn on_lookup(
        &mut self,
        token: Token,
        outcome: Result<Vec<VideoDescriptor>, LookupFailure>,
        effects: &mut Vec<Effect>,
    ) {
        if self.lookup != Some(token) {
            trace!(token = token.get(), "stale lookup result dropped");
            return;
        }
        self.lookup = None;

        let videos = match outcome {
            Ok(videos) => videos,
            Err(error) => {
                warn!(index = self.current_index, %error, "trailer lookup failed");
                return;
            }
        };

        let Some(trailer) = find_trailer(&videos) else {
            debug!(index = self.current_index, "no YouTube trailer");
            return;
        };

        self.preview_key = Some(trailer.key.clone());
        let token = self.issue_token();
        self.preview_delay = Some(token);
        effects.push(Effect::StartPreviewDelay {
            token,
            delay: self.config.preview_delay,
        });
    }

    fn set_index(&mut self, index: usize, effects: &mut Vec<Effect>) {
        self.current_index = index;
        self.restart_preview(effects);
    }

    fn autoplay_should_run(&self) -> bool {
        self.mounted
            && !self.items.is_empty()
            && self.is_visible
            && !self.is_interacting
    }

    fn sync_autoplay(&mut self, effects: &mut Vec<Effect>) {
        match (self.autoplay_should_run(), self.autoplay) {
            (true, None) => {
                let token = self.issue_token();
                self.autoplay = Some(token);
                effects.push(Effect::StartAutoplay {
                    token,
                    period: self.config.autoplay_interval,
                });
            }
            (false, Some(token)) => {
                self.autoplay = None;
                effects.push(Effect::StopAutoplay { token });
            }
            _ => {}
        }
    }

    fn clear_preview(&mut self, effects: &mut Vec<Effect>) {
        if let Some(token) = self.preview_delay.take() {
            effects.push(Effect::CancelPreviewDelay { token });
        }
        if let Some(token) = self.lookup.take() {
            effects.push(Effect::CancelLookup { token });
        }
        self.preview_key = None;
        self.preview_revealed = false;
    }

    fn restart_preview(&mut self, effects: &mut Vec<Effect>) {
        self.clear_preview(effects);
        if !self.is_visible {
            return;
        }
        let Some(item) = self.items.get(self.current_index) else {
            return;
        };
        let request = PreviewRequest {
            token: Token(self.next_token),
            index: self.current_index,
            item_id: item.id,
            kind: item.kind,
        };
        self.next_token += 1;
        self.lookup = Some(request.token);
        effects.push(Effect::Lookup(request));
    }

    fn issue_token(&mut self) -> Token {
        let token = Token(self.next_token);
        self.next_token += 1;
        token
    }
}
