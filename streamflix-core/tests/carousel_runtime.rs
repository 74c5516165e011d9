use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use streamflix_core::carousel::{
    CarouselConfig, CarouselError, CarouselHandle, HeroSlide, LookupFailure,
    VideoLookup,
};
use streamflix_core::image::ImageUrlBuilder;
use streamflix_model::{CarouselItem, MediaKind, VideoDescriptor};

type Outcome = Result<Vec<VideoDescriptor>, LookupFailure>;

/// Lookup whose answer and latency are fixed per item id.
#[derive(Default)]
struct ScriptedLookup {
    scripts: HashMap<u64, (Duration, Outcome)>,
    calls: Mutex<Vec<u64>>,
}

impl ScriptedLookup {
    fn with(mut self, id: u64, after: Duration, outcome: Outcome) -> Self {
        self.scripts.insert(id, (after, outcome));
        self
    }

    fn calls(&self) -> Vec<u64> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl VideoLookup for ScriptedLookup {
    async fn videos(&self, id: u64, _kind: MediaKind) -> Outcome {
        self.calls.lock().unwrap().push(id);
        let (after, outcome) = self
            .scripts
            .get(&id)
            .cloned()
            .unwrap_or((Duration::ZERO, Ok(Vec::new())));
        tokio::time::sleep(after).await;
        outcome
    }
}

fn item(id: u64) -> CarouselItem {
    CarouselItem {
        id,
        title: format!("Title {id}"),
        release_date: Some("2023-05-01".into()),
        rating: Some(7.1),
        backdrop_path: Some(format!("/b{id}.jpg")),
        overview: "Synopsis".into(),
        kind: MediaKind::Movie,
    }
}

fn items(n: u64) -> Vec<CarouselItem> {
    (1..=n).map(item).collect()
}

fn trailer(key: &str) -> Outcome {
    Ok(vec![VideoDescriptor::new("Trailer", "YouTube", key)])
}

/// Config with rotation pushed out of the way of preview timing checks.
fn slow_rotation() -> CarouselConfig {
    CarouselConfig {
        autoplay_interval: Duration::from_secs(600),
        ..CarouselConfig::default()
    }
}

async fn wait_ms(ms: u64) {
    tokio::time::sleep(Duration::from_millis(ms)).await;
}

#[tokio::test(start_paused = true)]
async fn next_wraps_through_three_items() {
    let handle = CarouselHandle::spawn(
        items(3),
        slow_rotation(),
        Arc::new(ScriptedLookup::default()),
    );

    handle.next().unwrap();
    handle.next().unwrap();
    wait_ms(1).await;
    assert_eq!(handle.snapshot().current_index, 2);

    handle.next().unwrap();
    wait_ms(1).await;
    assert_eq!(handle.snapshot().current_index, 0);

    handle.previous().unwrap();
    wait_ms(1).await;
    assert_eq!(handle.snapshot().current_index, 2);
}

#[tokio::test(start_paused = true)]
async fn trailer_reveals_after_full_delay() {
    let lookup = ScriptedLookup::default().with(1, Duration::ZERO, trailer("y"));
    let handle =
        CarouselHandle::spawn(items(2), slow_rotation(), Arc::new(lookup));

    wait_ms(1999).await;
    let snap = handle.snapshot();
    assert_eq!(snap.preview_key.as_deref(), Some("y"));
    assert!(!snap.preview_revealed);

    wait_ms(2).await;
    let snap = handle.snapshot();
    assert!(snap.preview_revealed);
    assert_eq!(snap.playing_key(), Some("y"));

    let slide = HeroSlide::render(&snap, &ImageUrlBuilder::default()).unwrap();
    let preview = slide.preview.unwrap();
    assert!(preview.embed_url.contains("/embed/y?autoplay=1&mute=1"));
}

#[tokio::test(start_paused = true)]
async fn change_one_millisecond_before_reveal_prevents_it() {
    let lookup = ScriptedLookup::default()
        .with(1, Duration::ZERO, trailer("a"))
        .with(2, Duration::ZERO, Ok(Vec::new()));
    let handle =
        CarouselHandle::spawn(items(2), slow_rotation(), Arc::new(lookup));

    wait_ms(1999).await;
    handle.next().unwrap();
    wait_ms(5_000).await;

    let snap = handle.snapshot();
    assert_eq!(snap.current_index, 1);
    assert_eq!(snap.preview_key, None);
    assert!(!snap.preview_revealed);
}

#[tokio::test(start_paused = true)]
async fn late_lookup_for_previous_slide_never_reveals() {
    let lookup = Arc::new(
        ScriptedLookup::default()
            .with(1, Duration::from_secs(3), trailer("late"))
            .with(2, Duration::ZERO, Ok(Vec::new())),
    );
    let handle =
        CarouselHandle::spawn(items(3), slow_rotation(), lookup.clone());

    wait_ms(1_000).await;
    handle.next().unwrap();
    wait_ms(10_000).await;

    let snap = handle.snapshot();
    assert_eq!(snap.current_index, 1);
    assert_eq!(snap.preview_key, None);
    assert!(!snap.preview_revealed);
    assert_eq!(lookup.calls(), vec![1, 2]);
}

#[tokio::test(start_paused = true)]
async fn teaser_only_stays_on_static_image() {
    let lookup = ScriptedLookup::default().with(
        1,
        Duration::ZERO,
        Ok(vec![VideoDescriptor::new("Teaser", "YouTube", "t")]),
    );
    let handle =
        CarouselHandle::spawn(items(2), slow_rotation(), Arc::new(lookup));

    wait_ms(60_000).await;
    let snap = handle.snapshot();
    assert_eq!(snap.current_index, 0);
    assert_eq!(snap.preview_key, None);

    let slide = HeroSlide::render(&snap, &ImageUrlBuilder::default()).unwrap();
    assert!(slide.preview.is_none());
    assert!(slide.backdrop_url.ends_with("/original/b1.jpg"));
}

#[tokio::test(start_paused = true)]
async fn autoplay_runs_only_while_visible_and_idle() {
    let handle = CarouselHandle::spawn(
        items(4),
        CarouselConfig::default(),
        Arc::new(ScriptedLookup::default()),
    );

    wait_ms(8_001).await;
    assert_eq!(handle.snapshot().current_index, 1);

    handle.set_interacting(true).unwrap();
    wait_ms(30_000).await;
    assert_eq!(handle.snapshot().current_index, 1);
    assert!(!handle.snapshot().autoplay_active);

    // The period restarts when rotation resumes.
    handle.set_interacting(false).unwrap();
    wait_ms(7_999).await;
    assert_eq!(handle.snapshot().current_index, 1);
    wait_ms(2).await;
    assert_eq!(handle.snapshot().current_index, 2);

    handle.set_intersection_ratio(0.1).unwrap();
    wait_ms(30_000).await;
    let snap = handle.snapshot();
    assert_eq!(snap.current_index, 2);
    assert!(!snap.is_visible);

    handle.set_intersection_ratio(0.8).unwrap();
    wait_ms(8_001).await;
    assert_eq!(handle.snapshot().current_index, 3);
}

#[tokio::test(start_paused = true)]
async fn hiding_cancels_pending_reveal_and_showing_looks_up_again() {
    let lookup = Arc::new(
        ScriptedLookup::default().with(1, Duration::ZERO, trailer("a")),
    );
    let handle =
        CarouselHandle::spawn(items(2), slow_rotation(), lookup.clone());

    wait_ms(1_000).await;
    handle.set_visible(false).unwrap();
    wait_ms(5_000).await;
    let snap = handle.snapshot();
    assert_eq!(snap.preview_key, None);
    assert!(!snap.preview_revealed);

    handle.set_visible(true).unwrap();
    wait_ms(2_001).await;
    assert!(handle.snapshot().preview_revealed);
    assert_eq!(lookup.calls(), vec![1, 1]);
}

#[tokio::test(start_paused = true)]
async fn slow_lookup_times_out_quietly() {
    let lookup =
        ScriptedLookup::default().with(1, Duration::from_secs(30), trailer("x"));
    let config = CarouselConfig {
        lookup_timeout: Duration::from_secs(5),
        ..slow_rotation()
    };
    let handle = CarouselHandle::spawn(items(2), config, Arc::new(lookup));

    wait_ms(40_000).await;
    let snap = handle.snapshot();
    assert_eq!(snap.preview_key, None);
    assert_eq!(snap.current_index, 0);
}

#[tokio::test(start_paused = true)]
async fn mute_toggles_only_while_playing() {
    let lookup = ScriptedLookup::default().with(1, Duration::ZERO, trailer("y"));
    let handle =
        CarouselHandle::spawn(items(2), slow_rotation(), Arc::new(lookup));

    handle.toggle_mute().unwrap();
    wait_ms(1).await;
    assert!(handle.snapshot().muted);

    wait_ms(2_000).await;
    handle.toggle_mute().unwrap();
    wait_ms(1).await;
    let snap = handle.snapshot();
    assert!(!snap.muted);
    let slide = HeroSlide::render(&snap, &ImageUrlBuilder::default()).unwrap();
    assert!(slide.preview.unwrap().embed_url.contains("mute=0"));
}

#[tokio::test(start_paused = true)]
async fn out_of_range_jump_is_ignored() {
    let handle = CarouselHandle::spawn(
        items(3),
        slow_rotation(),
        Arc::new(ScriptedLookup::default()),
    );
    handle.jump_to(7).unwrap();
    wait_ms(1).await;
    assert_eq!(handle.snapshot().current_index, 0);
    handle.jump_to(2).unwrap();
    wait_ms(1).await;
    assert_eq!(handle.snapshot().current_index, 2);
}

#[tokio::test(start_paused = true)]
async fn empty_carousel_never_rotates() {
    let lookup = Arc::new(ScriptedLookup::default());
    let handle =
        CarouselHandle::spawn(Vec::new(), CarouselConfig::default(), lookup.clone());

    handle.next().unwrap();
    wait_ms(60_000).await;
    let snap = handle.snapshot();
    assert!(snap.is_empty());
    assert!(!snap.autoplay_active);
    assert!(lookup.calls().is_empty());
    assert!(HeroSlide::render(&snap, &ImageUrlBuilder::default()).is_none());
}

#[tokio::test(start_paused = true)]
async fn subscribers_see_index_changes() {
    let handle = CarouselHandle::spawn(
        items(3),
        slow_rotation(),
        Arc::new(ScriptedLookup::default()),
    );
    let mut updates = handle.subscribe();
    updates.borrow_and_update();

    handle.next().unwrap();
    updates.changed().await.unwrap();
    assert_eq!(updates.borrow_and_update().current_index, 1);
}

#[tokio::test(start_paused = true)]
async fn shutdown_unmounts_and_rejects_commands() {
    let lookup = ScriptedLookup::default().with(1, Duration::ZERO, trailer("y"));
    let handle =
        CarouselHandle::spawn(items(2), slow_rotation(), Arc::new(lookup));

    wait_ms(500).await;
    handle.shutdown();
    handle.closed().await;

    let snap = handle.snapshot();
    assert!(!snap.mounted);
    assert!(!snap.autoplay_active);
    assert_eq!(snap.preview_key, None);
    assert_eq!(handle.next(), Err(CarouselError::Closed));

    wait_ms(5_000).await;
    assert!(!handle.snapshot().preview_revealed);
}
