use std::time::Duration;

use shared::{
    config::{CarouselConfig, PausePolicy},
    domain::{Direction, Slide},
    error::EngineError,
    protocol::CarouselSnapshot,
};
use tracing::{debug, warn};

use crate::timer::{Timer, TimerId};

const MIN_AUTOPLAY_PERIOD: Duration = Duration::from_millis(1);

/// Current slide, transition direction, hover pause and the autoplay timer
/// for one carousel.
///
/// The engine exclusively owns at most one armed timer. Ticks only reach the
/// engine through [`on_timer_fired`](Self::on_timer_fired) (or directly via
/// [`on_autoplay_tick`](Self::on_autoplay_tick)), so a firing from a replaced
/// or cancelled timer is dropped. After [`dispose`](Self::dispose) every
/// operation is a no-op.
pub struct CarouselEngine<P, T: Timer> {
    slides: Vec<Slide<P>>,
    current_index: usize,
    direction: Direction,
    is_paused: bool,
    period: Duration,
    pause_policy: PausePolicy,
    timer: T,
    armed: Option<TimerId>,
    disposed: bool,
}

impl<P, T: Timer> CarouselEngine<P, T> {
    pub fn new(slides: Vec<Slide<P>>, config: &CarouselConfig, timer: T) -> Result<Self, EngineError> {
        if slides.is_empty() {
            return Err(EngineError::NoSlides);
        }
        for (position, slide) in slides.iter().enumerate() {
            if slides[..position].iter().any(|earlier| earlier.id == slide.id) {
                return Err(EngineError::DuplicateSlide(slide.id));
            }
        }

        let mut period = config.autoplay_period();
        if period < MIN_AUTOPLAY_PERIOD {
            warn!(
                configured_ms = config.autoplay_period_ms,
                "autoplay period too short; using 1ms"
            );
            period = MIN_AUTOPLAY_PERIOD;
        }

        Ok(Self {
            slides,
            current_index: 0,
            direction: Direction::default(),
            is_paused: false,
            period,
            pause_policy: config.pause_policy,
            timer,
            armed: None,
            disposed: false,
        })
    }

    pub fn slide_count(&self) -> usize {
        self.slides.len()
    }

    pub fn slides(&self) -> &[Slide<P>] {
        &self.slides
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    pub fn current_slide(&self) -> &Slide<P> {
        &self.slides[self.current_index]
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn is_paused(&self) -> bool {
        self.is_paused
    }

    /// Whether an autoplay timer is currently armed.
    pub fn is_running(&self) -> bool {
        self.armed.is_some()
    }

    pub fn is_disposed(&self) -> bool {
        self.disposed
    }

    pub fn armed_timer(&self) -> Option<TimerId> {
        self.armed
    }

    pub fn autoplay_period(&self) -> Duration {
        self.period
    }

    pub fn snapshot(&self) -> CarouselSnapshot {
        CarouselSnapshot {
            current_index: self.current_index,
            slide_count: self.slides.len(),
            direction: self.direction,
            is_paused: self.is_paused,
            is_running: self.is_running(),
        }
    }

    pub fn next(&mut self) {
        if self.disposed {
            return;
        }
        let target = (self.current_index + 1) % self.slides.len();
        self.show(target, Direction::Forward);
    }

    pub fn prev(&mut self) {
        if self.disposed {
            return;
        }
        let len = self.slides.len();
        let target = (self.current_index + len - 1) % len;
        self.show(target, Direction::Backward);
    }

    /// Shows `target` directly. Out-of-range targets are rejected and leave
    /// the state untouched; they are never clamped or wrapped.
    ///
    /// Direction compares raw indices, so jumping from the last slide to the
    /// first reports [`Direction::Backward`].
    pub fn jump_to(&mut self, target: usize) -> Result<(), EngineError> {
        if self.disposed {
            return Ok(());
        }
        let len = self.slides.len();
        if target >= len {
            warn!(target, len, "rejected jump to missing slide");
            return Err(EngineError::OutOfRange { index: target, len });
        }
        let direction = Direction::for_jump(self.current_index, target);
        self.show(target, direction);
        Ok(())
    }

    pub fn pause(&mut self) {
        if self.disposed || self.is_paused {
            return;
        }
        self.is_paused = true;
        debug!(index = self.current_index, "carousel paused");
    }

    pub fn resume(&mut self) {
        if self.disposed || !self.is_paused {
            return;
        }
        self.is_paused = false;
        debug!(index = self.current_index, "carousel resumed");

        if self.pause_policy == PausePolicy::RestartOnResume && self.armed.is_some() {
            self.arm();
        }
    }

    pub fn pointer_enter(&mut self) {
        self.pause();
    }

    pub fn pointer_leave(&mut self) {
        self.resume();
    }

    /// Advances like [`next`](Self::next) unless paused. Returns whether the
    /// slide advanced.
    pub fn on_autoplay_tick(&mut self) -> bool {
        if self.disposed || self.is_paused {
            return false;
        }
        self.next();
        true
    }

    /// Routes a firing from the host timer. Firings from anything but the
    /// currently armed timer are ignored.
    pub fn on_timer_fired(&mut self, id: TimerId) -> bool {
        if self.armed != Some(id) {
            debug!(timer = id.raw(), "dropping firing from inactive timer");
            return false;
        }
        self.on_autoplay_tick()
    }

    /// Arms the autoplay timer, replacing any timer already armed.
    pub fn start(&mut self) {
        if self.disposed {
            return;
        }
        self.arm();
    }

    /// Cancels the autoplay timer and turns every later call into a no-op.
    pub fn dispose(&mut self) {
        if self.disposed {
            return;
        }
        self.disarm();
        self.disposed = true;
        debug!("carousel disposed");
    }

    fn arm(&mut self) {
        self.disarm();
        let id = self.timer.arm_repeating(self.period);
        self.armed = Some(id);
        debug!(timer = id.raw(), period_ms = self.period.as_millis() as u64, "autoplay armed");
    }

    fn disarm(&mut self) {
        if let Some(id) = self.armed.take() {
            self.timer.cancel(id);
        }
    }

    fn show(&mut self, target: usize, direction: Direction) {
        self.direction = direction;
        if target != self.current_index {
            debug!(from = self.current_index, to = target, ?direction, "slide changed");
        }
        self.current_index = target;
    }
}

impl<P, T: Timer> Drop for CarouselEngine<P, T> {
    fn drop(&mut self) {
        self.disarm();
    }
}

#[cfg(test)]
#[path = "tests/engine_tests.rs"]
mod tests;
