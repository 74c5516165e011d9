use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use streamflix_model::CarouselItem;
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior};
use tracing::{debug, trace};

use super::config::CarouselConfig;
use super::lookup::{LookupFailure, VideoLookup};
use super::state::{
    CarouselSnapshot, CarouselState, Direction, Effect, Event, PreviewRequest,
    Token,
};

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum CarouselError {
    #[error("carousel has been unmounted")]
    Closed,
}

#[derive(Debug)]
enum Command {
    Dispatch(Event),
    Shutdown,
}

/// Cloneable front door to a running carousel.
///
/// The carousel stops when [`CarouselHandle::shutdown`] is called or when
/// every handle has been dropped.
#[derive(Debug, Clone)]
pub struct CarouselHandle {
    commands: mpsc::UnboundedSender<Command>,
    snapshots: watch::Receiver<CarouselSnapshot>,
}

impl CarouselHandle {
    /// Mounts a carousel and spawns the task driving it on the current Tokio
    /// runtime.
    pub fn spawn(
        items: Vec<CarouselItem>,
        config: CarouselConfig,
        lookup: Arc<dyn VideoLookup>,
    ) -> Self {
        let lookup_timeout = config.lookup_timeout;
        let (state, effects) = CarouselState::mount(items, config);
        let (command_tx, command_rx) = mpsc::unbounded_channel();
        let (event_tx, event_rx) = mpsc::unbounded_channel();
        let (snapshot_tx, snapshot_rx) = watch::channel(state.snapshot());

        let mut actor = CarouselActor {
            state,
            lookup,
            lookup_timeout,
            tasks: HashMap::new(),
            events: event_tx,
            snapshots: snapshot_tx,
        };
        actor.apply(effects);
        tokio::spawn(actor.run(command_rx, event_rx));

        Self {
            commands: command_tx,
            snapshots: snapshot_rx,
        }
    }

    fn dispatch(&self, event: Event) -> Result<(), CarouselError> {
        self.commands
            .send(Command::Dispatch(event))
            .map_err(|_| CarouselError::Closed)
    }

    pub fn advance(&self, direction: Direction) -> Result<(), CarouselError> {
        self.dispatch(Event::Advance(direction))
    }

    pub fn next(&self) -> Result<(), CarouselError> {
        self.advance(Direction::Next)
    }

    pub fn previous(&self) -> Result<(), CarouselError> {
        self.advance(Direction::Previous)
    }

    pub fn jump_to(&self, index: usize) -> Result<(), CarouselError> {
        self.dispatch(Event::JumpTo(index))
    }

    pub fn set_visible(&self, visible: bool) -> Result<(), CarouselError> {
        self.dispatch(Event::VisibilityChanged(visible))
    }

    pub fn set_intersection_ratio(
        &self,
        ratio: f64,
    ) -> Result<(), CarouselError> {
        self.dispatch(Event::IntersectionChanged(ratio))
    }

    /// Pointer over the carousel pauses rotation.
    pub fn set_interacting(
        &self,
        interacting: bool,
    ) -> Result<(), CarouselError> {
        self.dispatch(Event::InteractionChanged(interacting))
    }

    pub fn toggle_mute(&self) -> Result<(), CarouselError> {
        self.dispatch(Event::ToggleMute)
    }

    /// Latest published state.
    pub fn snapshot(&self) -> CarouselSnapshot {
        self.snapshots.borrow().clone()
    }

    /// Receiver notified after every state change.
    pub fn subscribe(&self) -> watch::Receiver<CarouselSnapshot> {
        self.snapshots.clone()
    }

    /// Unmounts the carousel. Idempotent.
    pub fn shutdown(&self) {
        let _ = self.commands.send(Command::Shutdown);
    }

    /// Resolves once the driving task has exited.
    pub async fn closed(&self) {
        self.commands.closed().await
    }

    pub fn is_closed(&self) -> bool {
        self.commands.is_closed()
    }
}

struct CarouselActor {
    state: CarouselState,
    lookup: Arc<dyn VideoLookup>,
    lookup_timeout: Duration,
    tasks: HashMap<Token, JoinHandle<()>>,
    events: mpsc::UnboundedSender<Event>,
    snapshots: watch::Sender<CarouselSnapshot>,
}

impl CarouselActor {
    async fn run(
        mut self,
        mut commands: mpsc::UnboundedReceiver<Command>,
        mut events: mpsc::UnboundedReceiver<Event>,
    ) {
        loop {
            let event = tokio::select! {
                biased;
                command = commands.recv() => match command {
                    Some(Command::Dispatch(event)) => event,
                    Some(Command::Shutdown) | None => break,
                },
                Some(event) = events.recv() => {
                    self.forget_finished(&event);
                    event
                }
            };

            let effects = self.state.handle(event);
            self.apply(effects);
            self.publish();
        }

        let effects = self.state.handle(Event::Unmount);
        self.apply(effects);
        for (_, task) in self.tasks.drain() {
            task.abort();
        }
        self.publish();
        debug!("carousel task stopped");
    }

    fn apply(&mut self, effects: Vec<Effect>) {
        for effect in effects {
            trace!(?effect, "carousel effect");
            match effect {
                Effect::StartAutoplay { token, period } => {
                    let task = self.spawn_autoplay(token, period);
                    self.tasks.insert(token, task);
                }
                Effect::StartPreviewDelay { token, delay } => {
                    let task = self.spawn_preview_delay(token, delay);
                    self.tasks.insert(token, task);
                }
                Effect::Lookup(request) => {
                    let token = request.token;
                    let task = self.spawn_lookup(request);
                    self.tasks.insert(token, task);
                }
                Effect::StopAutoplay { token }
                | Effect::CancelLookup { token }
                | Effect::CancelPreviewDelay { token } => {
                    if let Some(task) = self.tasks.remove(&token) {
                        task.abort();
                    }
                }
            }
        }
    }

    /// One-shot tasks are done once their completion reaches the actor.
    fn forget_finished(&mut self, event: &Event) {
        match event {
            Event::LookupResolved { token, .. }
            | Event::PreviewDelayElapsed(token) => {
                self.tasks.remove(token);
            }
            _ => {}
        }
    }

    fn spawn_autoplay(&self, token: Token, period: Duration) -> JoinHandle<()> {
        let events = self.events.clone();
        // `interval_at` panics on a zero period.
        let period = period.max(Duration::from_millis(1));
        tokio::spawn(async move {
            let mut ticker =
                tokio::time::interval_at(Instant::now() + period, period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                ticker.tick().await;
                if events.send(Event::AutoplayElapsed(token)).is_err() {
                    break;
                }
            }
        })
    }

    fn spawn_preview_delay(&self, token: Token, delay: Duration) -> JoinHandle<()> {
        let events = self.events.clone();
        tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            let _ = events.send(Event::PreviewDelayElapsed(token));
        })
    }

    fn spawn_lookup(&self, request: PreviewRequest) -> JoinHandle<()> {
        let events = self.events.clone();
        let lookup = Arc::clone(&self.lookup);
        let limit = self.lookup_timeout;
        tokio::spawn(async move {
            let outcome = match tokio::time::timeout(
                limit,
                lookup.videos(request.item_id, request.kind),
            )
            .await
            {
                Ok(result) => result,
                Err(_) => Err(LookupFailure::TimedOut(limit)),
            };
            let _ = events.send(Event::LookupResolved {
                token: request.token,
                outcome,
            });
        })
    }

    fn publish(&self) {
        let next = self.state.snapshot();
        self.snapshots.send_if_modified(|current| {
            if *current == next {
                false
            } else {
                *current = next;
                true
            }
        });
    }
}
