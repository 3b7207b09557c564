use std::{collections::HashMap, time::Duration};

use carousel::{Timer, TimerId};
use tokio::{
    sync::mpsc,
    task::JoinHandle,
    time::{interval_at, Instant, MissedTickBehavior},
};
use tracing::debug;

/// [`Timer`] backed by one tokio task per armed timer.
///
/// Each firing sends the timer's id on the channel returned by
/// [`TokioTimer::new`]; the owning actor routes it back to its engine. Must be
/// armed from inside a tokio runtime. Dropping the timer aborts every task.
pub struct TokioTimer {
    fired: mpsc::UnboundedSender<TimerId>,
    next_id: u64,
    tasks: HashMap<TimerId, JoinHandle<()>>,
}

impl TokioTimer {
    pub fn new() -> (Self, mpsc::UnboundedReceiver<TimerId>) {
        let (fired, fired_rx) = mpsc::unbounded_channel();
        let timer = Self {
            fired,
            next_id: 0,
            tasks: HashMap::new(),
        };
        (timer, fired_rx)
    }

    pub fn live_timers(&self) -> usize {
        self.tasks.len()
    }
}

impl Timer for TokioTimer {
    fn arm_repeating(&mut self, period: Duration) -> TimerId {
        let id = TimerId::new(self.next_id);
        self.next_id += 1;

        let period = period.max(Duration::from_millis(1));
        let fired = self.fired.clone();
        let task = tokio::spawn(async move {
            let mut ticks = interval_at(Instant::now() + period, period);
            ticks.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                ticks.tick().await;
                if fired.send(id).is_err() {
                    break;
                }
            }
        });
        self.tasks.insert(id, task);
        id
    }

    fn cancel(&mut self, id: TimerId) {
        if let Some(task) = self.tasks.remove(&id) {
            task.abort();
            debug!(timer = id.raw(), "timer task aborted");
        }
    }
}

impl Drop for TokioTimer {
    fn drop(&mut self) {
        for (_, task) in self.tasks.drain() {
            task.abort();
        }
    }
}
