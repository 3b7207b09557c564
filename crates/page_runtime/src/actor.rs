//! One owning tokio task per engine. Handles are cheap to clone; every
//! mutation is serialized through the task's command queue and state is
//! published on a `watch` channel.

use carousel::{CarouselEngine, TimerId};
use section_tracker::NavigationBar;
use shared::{
    config::{CarouselConfig, TrackerConfig},
    domain::{NavLink, SectionGeometry, SectionId, Slide},
    error::EngineError,
    protocol::{CarouselSnapshot, NavigationSnapshot, ScrollRequest},
};
use tokio::{
    sync::{mpsc, oneshot, watch},
    task::JoinHandle,
};
use tracing::{debug, info};

use crate::tokio_timer::TokioTimer;

const COMMAND_QUEUE_DEPTH: usize = 64;

pub enum CarouselCommand {
    Next,
    Prev,
    JumpTo {
        index: usize,
        reply: oneshot::Sender<Result<(), EngineError>>,
    },
    Pause,
    Resume,
    Start,
    Snapshot {
        reply: oneshot::Sender<CarouselSnapshot>,
    },
    Dispose,
}

#[derive(Clone)]
pub struct CarouselHandle {
    commands: mpsc::Sender<CarouselCommand>,
    state: watch::Receiver<CarouselSnapshot>,
}

impl CarouselHandle {
    pub async fn next(&self) {
        self.send(CarouselCommand::Next).await;
    }

    pub async fn prev(&self) {
        self.send(CarouselCommand::Prev).await;
    }

    /// Out-of-range targets are reported; once the actor has stopped the jump
    /// is silently dropped like every other command.
    pub async fn jump_to(&self, index: usize) -> Result<(), EngineError> {
        let (reply, response) = oneshot::channel();
        self.send(CarouselCommand::JumpTo { index, reply }).await;
        response.await.unwrap_or(Ok(()))
    }

    pub async fn pause(&self) {
        self.send(CarouselCommand::Pause).await;
    }

    pub async fn resume(&self) {
        self.send(CarouselCommand::Resume).await;
    }

    pub async fn start(&self) {
        self.send(CarouselCommand::Start).await;
    }

    pub async fn dispose(&self) {
        self.send(CarouselCommand::Dispose).await;
    }

    /// Last published state, without waiting for queued commands.
    pub fn snapshot(&self) -> CarouselSnapshot {
        *self.state.borrow()
    }

    /// State after every command queued before this call has been applied.
    pub async fn current(&self) -> CarouselSnapshot {
        let (reply, response) = oneshot::channel();
        self.send(CarouselCommand::Snapshot { reply }).await;
        match response.await {
            Ok(snapshot) => snapshot,
            Err(_) => self.snapshot(),
        }
    }

    pub fn subscribe(&self) -> watch::Receiver<CarouselSnapshot> {
        self.state.clone()
    }

    async fn send(&self, command: CarouselCommand) {
        if self.commands.send(command).await.is_err() {
            debug!("carousel actor already stopped; command dropped");
        }
    }
}

/// Moves a new carousel into its own task. Autoplay is not armed until
/// [`CarouselHandle::start`].
pub fn spawn_carousel<P>(
    slides: Vec<Slide<P>>,
    config: &CarouselConfig,
) -> Result<(CarouselHandle, JoinHandle<()>), EngineError>
where
    P: Send + 'static,
{
    let (timer, fired) = TokioTimer::new();
    let engine = CarouselEngine::new(slides, config, timer)?;
    let (commands, command_rx) = mpsc::channel(COMMAND_QUEUE_DEPTH);
    let (state_tx, state) = watch::channel(engine.snapshot());

    let task = tokio::spawn(run_carousel(engine, command_rx, fired, state_tx));
    Ok((CarouselHandle { commands, state }, task))
}

async fn run_carousel<P>(
    mut engine: CarouselEngine<P, TokioTimer>,
    mut commands: mpsc::Receiver<CarouselCommand>,
    mut fired: mpsc::UnboundedReceiver<TimerId>,
    state: watch::Sender<CarouselSnapshot>,
) {
    info!(slides = engine.slide_count(), "carousel actor started");

    loop {
        tokio::select! {
            command = commands.recv() => {
                let Some(command) = command else {
                    break;
                };
                let stop = matches!(command, CarouselCommand::Dispose);
                match command {
                    CarouselCommand::Next => engine.next(),
                    CarouselCommand::Prev => engine.prev(),
                    CarouselCommand::JumpTo { index, reply } => {
                        let _ = reply.send(engine.jump_to(index));
                    }
                    CarouselCommand::Pause => engine.pause(),
                    CarouselCommand::Resume => engine.resume(),
                    CarouselCommand::Start => engine.start(),
                    CarouselCommand::Snapshot { reply } => {
                        let _ = reply.send(engine.snapshot());
                    }
                    CarouselCommand::Dispose => engine.dispose(),
                }
                publish(&state, engine.snapshot());
                if stop {
                    break;
                }
            }
            Some(id) = fired.recv() => {
                if engine.on_timer_fired(id) {
                    publish(&state, engine.snapshot());
                }
            }
        }
    }

    engine.dispose();
    publish(&state, engine.snapshot());
    info!("carousel actor stopped");
}

pub enum NavigationCommand {
    Scroll {
        scroll_y: f64,
        sections: Vec<SectionGeometry>,
    },
    ToggleMenu,
    ScrollTo {
        section: SectionId,
        reply: oneshot::Sender<Option<ScrollRequest>>,
    },
    Snapshot {
        reply: oneshot::Sender<NavigationSnapshot>,
    },
    Shutdown,
}

#[derive(Clone)]
pub struct NavigationHandle {
    commands: mpsc::Sender<NavigationCommand>,
    state: watch::Receiver<NavigationSnapshot>,
}

impl NavigationHandle {
    pub async fn scroll(&self, scroll_y: f64, sections: Vec<SectionGeometry>) {
        self.send(NavigationCommand::Scroll { scroll_y, sections })
            .await;
    }

    pub async fn toggle_menu(&self) {
        self.send(NavigationCommand::ToggleMenu).await;
    }

    pub async fn scroll_to(&self, section: SectionId) -> Option<ScrollRequest> {
        let (reply, response) = oneshot::channel();
        self.send(NavigationCommand::ScrollTo { section, reply })
            .await;
        response.await.ok().flatten()
    }

    pub async fn shutdown(&self) {
        self.send(NavigationCommand::Shutdown).await;
    }

    pub fn snapshot(&self) -> NavigationSnapshot {
        self.state.borrow().clone()
    }

    pub async fn current(&self) -> NavigationSnapshot {
        let (reply, response) = oneshot::channel();
        self.send(NavigationCommand::Snapshot { reply }).await;
        match response.await {
            Ok(snapshot) => snapshot,
            Err(_) => self.snapshot(),
        }
    }

    pub fn subscribe(&self) -> watch::Receiver<NavigationSnapshot> {
        self.state.clone()
    }

    async fn send(&self, command: NavigationCommand) {
        if self.commands.send(command).await.is_err() {
            debug!("navigation actor already stopped; command dropped");
        }
    }
}

pub fn spawn_navigation(
    links: Vec<NavLink>,
    config: &TrackerConfig,
) -> Result<(NavigationHandle, JoinHandle<()>), EngineError> {
    let navigation = NavigationBar::new(links, config)?;
    let (commands, command_rx) = mpsc::channel(COMMAND_QUEUE_DEPTH);
    let (state_tx, state) = watch::channel(navigation.snapshot());

    let task = tokio::spawn(run_navigation(navigation, command_rx, state_tx));
    Ok((NavigationHandle { commands, state }, task))
}

async fn run_navigation(
    mut navigation: NavigationBar,
    mut commands: mpsc::Receiver<NavigationCommand>,
    state: watch::Sender<NavigationSnapshot>,
) {
    info!(links = navigation.links().len(), "navigation actor started");

    while let Some(command) = commands.recv().await {
        match command {
            NavigationCommand::Scroll { scroll_y, sections } => {
                navigation.on_scroll(scroll_y, &sections);
            }
            NavigationCommand::ToggleMenu => navigation.toggle_menu(),
            NavigationCommand::ScrollTo { section, reply } => {
                let _ = reply.send(navigation.scroll_to(&section));
            }
            NavigationCommand::Snapshot { reply } => {
                let _ = reply.send(navigation.snapshot());
            }
            NavigationCommand::Shutdown => break,
        }
        publish(&state, navigation.snapshot());
    }

    info!("navigation actor stopped");
}

fn publish<S: PartialEq>(state: &watch::Sender<S>, next: S) {
    state.send_if_modified(|current| {
        if *current == next {
            return false;
        }
        *current = next;
        true
    });
}

#[cfg(test)]
#[path = "tests/actor_tests.rs"]
mod tests;
