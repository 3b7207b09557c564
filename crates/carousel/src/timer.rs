use std::{cell::RefCell, rc::Rc, time::Duration};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerId(u64);

impl TimerId {
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    pub const fn raw(self) -> u64 {
        self.0
    }
}

/// Host-supplied source of recurring ticks.
///
/// Firings are delivered back to the owner out of band (see
/// [`CarouselEngine::on_timer_fired`](crate::CarouselEngine::on_timer_fired)),
/// tagged with the id returned by [`arm_repeating`](Self::arm_repeating).
/// After [`cancel`](Self::cancel) a timer must stop producing firings, though a
/// firing already in flight may still arrive.
pub trait Timer {
    fn arm_repeating(&mut self, period: Duration) -> TimerId;
    fn cancel(&mut self, id: TimerId);
}

#[derive(Debug)]
struct ArmedTimer {
    id: TimerId,
    period: Duration,
    next_due: Duration,
}

#[derive(Debug, Default)]
struct ClockState {
    now: Duration,
    next_id: u64,
    armed: Vec<ArmedTimer>,
}

/// Virtual-time [`Timer`] for deterministic hosts and tests.
///
/// Clones share one clock: hand one clone to the engine and keep another to
/// [`advance`](Self::advance) time.
#[derive(Debug, Clone, Default)]
pub struct ManualTimer {
    state: Rc<RefCell<ClockState>>,
}

impl ManualTimer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn now(&self) -> Duration {
        self.state.borrow().now
    }

    pub fn live_timers(&self) -> usize {
        self.state.borrow().armed.len()
    }

    /// Moves the clock forward by `by`, calling `on_fire` for every firing in
    /// chronological order (ties go to the earlier-armed timer).
    ///
    /// The clock is not borrowed while `on_fire` runs, so the callback may arm
    /// or cancel timers; those changes apply to the rest of the window.
    /// Returns the number of firings delivered.
    pub fn advance(&self, by: Duration, mut on_fire: impl FnMut(TimerId)) -> usize {
        let target = self.now() + by;
        let mut fired = 0;

        loop {
            let next = {
                let mut state = self.state.borrow_mut();
                let due = state
                    .armed
                    .iter()
                    .enumerate()
                    .filter(|(_, timer)| timer.next_due <= target)
                    .min_by_key(|(_, timer)| (timer.next_due, timer.id))
                    .map(|(position, _)| position);
                match due {
                    Some(position) => {
                        let timer = &mut state.armed[position];
                        let at = timer.next_due;
                        timer.next_due += timer.period;
                        let id = timer.id;
                        state.now = at;
                        Some(id)
                    }
                    None => {
                        state.now = target;
                        None
                    }
                }
            };

            let Some(id) = next else {
                return fired;
            };
            fired += 1;
            on_fire(id);
        }
    }
}

impl Timer for ManualTimer {
    fn arm_repeating(&mut self, period: Duration) -> TimerId {
        let mut state = self.state.borrow_mut();
        let id = TimerId(state.next_id);
        state.next_id += 1;
        let period = period.max(Duration::from_nanos(1));
        let next_due = state.now + period;
        state.armed.push(ArmedTimer {
            id,
            period,
            next_due,
        });
        id
    }

    fn cancel(&mut self, id: TimerId) {
        self.state.borrow_mut().armed.retain(|timer| timer.id != id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(value: u64) -> Duration {
        Duration::from_millis(value)
    }

    #[test]
    fn fires_once_per_period_after_arming() {
        let mut timer = ManualTimer::new();
        let id = timer.arm_repeating(ms(5));

        let mut seen = Vec::new();
        assert_eq!(timer.advance(ms(4), |fired| seen.push(fired)), 0);
        assert_eq!(timer.advance(ms(11), |fired| seen.push(fired)), 3);
        assert_eq!(seen, vec![id, id, id]);
        assert_eq!(timer.now(), ms(15));
    }

    #[test]
    fn interleaves_timers_chronologically() {
        let mut timer = ManualTimer::new();
        let slow = timer.arm_repeating(ms(4));
        let fast = timer.arm_repeating(ms(2));

        let mut seen = Vec::new();
        timer.advance(ms(8), |fired| seen.push(fired));
        assert_eq!(seen, vec![fast, slow, fast, fast, slow, fast]);
    }

    #[test]
    fn cancelled_timer_stops_firing() {
        let mut timer = ManualTimer::new();
        let id = timer.arm_repeating(ms(1));
        timer.cancel(id);
        assert_eq!(timer.live_timers(), 0);
        assert_eq!(timer.advance(ms(10), |_| {}), 0);
    }

    #[test]
    fn callback_may_rearm_mid_window() {
        let timer = ManualTimer::new();
        let mut owner = timer.clone();
        let first = owner.arm_repeating(ms(3));

        let mut seen = Vec::new();
        let mut replacement = None;
        timer.advance(ms(10), |fired| {
            seen.push((fired, timer.now()));
            if fired == first {
                owner.cancel(first);
                replacement = Some(owner.arm_repeating(ms(5)));
            }
        });

        let replacement = replacement.expect("rearmed");
        assert_eq!(seen, vec![(first, ms(3)), (replacement, ms(8))]);
        assert_eq!(timer.live_timers(), 1);
    }
}
