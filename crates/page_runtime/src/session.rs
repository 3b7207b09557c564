use std::time::Duration;

use carousel::{CarouselEngine, ManualTimer};
use section_tracker::NavigationBar;
use shared::{
    config::{CarouselConfig, TrackerConfig},
    domain::{default_nav_links, default_slides, NavLink, Slide, SlideContent},
    error::{EngineError, ErrorReport},
    observer::{ListenerId, ListenerRegistry},
    protocol::{HostEvent, RenderUpdate},
};
use tracing::debug;

/// One page worth of interactive state driven by [`HostEvent`]s on a virtual
/// clock.
///
/// Autoplay is armed on construction, the way the page starts its slider on
/// mount. `Elapsed` events advance the clock and deliver timer firings to the
/// carousel in order. Every update produced by an event is returned and also
/// passed to the registered render listeners.
pub struct PageSession {
    navigation: NavigationBar,
    carousel: CarouselEngine<SlideContent, ManualTimer>,
    clock: ManualTimer,
    listeners: ListenerRegistry<RenderUpdate>,
}

impl PageSession {
    pub fn new(
        links: Vec<NavLink>,
        slides: Vec<Slide<SlideContent>>,
        tracker_config: &TrackerConfig,
        carousel_config: &CarouselConfig,
    ) -> Result<Self, EngineError> {
        let navigation = NavigationBar::new(links, tracker_config)?;
        let clock = ManualTimer::new();
        let mut carousel = CarouselEngine::new(slides, carousel_config, clock.clone())?;
        carousel.start();

        Ok(Self {
            navigation,
            carousel,
            clock,
            listeners: ListenerRegistry::new(),
        })
    }

    /// Session over the stock portfolio links and slides.
    pub fn with_defaults(
        tracker_config: &TrackerConfig,
        carousel_config: &CarouselConfig,
    ) -> Result<Self, EngineError> {
        Self::new(
            default_nav_links(),
            default_slides(),
            tracker_config,
            carousel_config,
        )
    }

    pub fn navigation(&self) -> &NavigationBar {
        &self.navigation
    }

    pub fn carousel(&self) -> &CarouselEngine<SlideContent, ManualTimer> {
        &self.carousel
    }

    pub fn elapsed(&self) -> Duration {
        self.clock.now()
    }

    pub fn subscribe(&mut self, listener: impl FnMut(&RenderUpdate) + 'static) -> ListenerId {
        self.listeners.add_listener(listener)
    }

    pub fn unsubscribe(&mut self, id: ListenerId) -> bool {
        self.listeners.remove_listener(id)
    }

    pub fn handle(&mut self, event: &HostEvent) -> Vec<RenderUpdate> {
        let mut updates = Vec::new();

        match event {
            HostEvent::Scroll { scroll_y, sections } => {
                if self.navigation.on_scroll(*scroll_y, sections) {
                    updates.push(RenderUpdate::Navigation(self.navigation.snapshot()));
                }
            }
            HostEvent::MenuToggled => {
                self.navigation.toggle_menu();
                updates.push(RenderUpdate::Navigation(self.navigation.snapshot()));
            }
            HostEvent::NavClicked { section } => {
                let menu_was_open = self.navigation.is_menu_open();
                if let Some(request) = self.navigation.scroll_to(section) {
                    updates.push(RenderUpdate::ScrollRequested(request));
                    if menu_was_open {
                        updates.push(RenderUpdate::Navigation(self.navigation.snapshot()));
                    }
                }
            }
            HostEvent::PointerEnter => {
                self.with_carousel(&mut updates, |carousel| carousel.pointer_enter())
            }
            HostEvent::PointerLeave => {
                self.with_carousel(&mut updates, |carousel| carousel.pointer_leave())
            }
            HostEvent::NextClicked => self.with_carousel(&mut updates, |carousel| carousel.next()),
            HostEvent::PrevClicked => self.with_carousel(&mut updates, |carousel| carousel.prev()),
            HostEvent::DotClicked { index } => {
                let before = self.carousel.snapshot();
                match self.carousel.jump_to(*index) {
                    Ok(()) => {
                        let after = self.carousel.snapshot();
                        if after != before {
                            updates.push(RenderUpdate::Carousel(after));
                        }
                    }
                    Err(error) => updates.push(RenderUpdate::Rejected(ErrorReport::from(&error))),
                }
            }
            HostEvent::Elapsed { ms } => {
                let Self {
                    clock, carousel, ..
                } = self;
                let fired = clock.advance(Duration::from_millis(*ms), |id| {
                    if carousel.on_timer_fired(id) {
                        updates.push(RenderUpdate::Carousel(carousel.snapshot()));
                    }
                });
                debug!(ms, fired, "virtual clock advanced");
            }
            HostEvent::Teardown => {
                self.with_carousel(&mut updates, |carousel| carousel.dispose())
            }
        }

        for update in &updates {
            self.listeners.notify(update);
        }
        updates
    }

    fn with_carousel(
        &mut self,
        updates: &mut Vec<RenderUpdate>,
        apply: impl FnOnce(&mut CarouselEngine<SlideContent, ManualTimer>),
    ) {
        let before = self.carousel.snapshot();
        apply(&mut self.carousel);
        let after = self.carousel.snapshot();
        if after != before {
            updates.push(RenderUpdate::Carousel(after));
        }
    }
}
