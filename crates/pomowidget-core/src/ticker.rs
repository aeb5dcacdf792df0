//! Cancellable periodic tick task.
//!
//! The scheduler spawns one tokio task that sends a [`Tick`] every period and
//! is aborted as soon as the timer stops running. Each spawned task carries a
//! generation number so ticks already queued by an aborted task can be told
//! apart from live ones.

use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::{self, Instant, MissedTickBehavior};

/// One periodic callback firing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tick {
    pub generation: u64,
}

pub struct TickScheduler {
    period: Duration,
    generation: u64,
    handle: Option<JoinHandle<()>>,
}

impl TickScheduler {
    pub fn new(period: Duration) -> Self {
        Self {
            period,
            generation: 0,
            handle: None,
        }
    }

    pub fn is_active(&self) -> bool {
        self.handle.is_some()
    }

    /// Whether `tick` came from the task that is currently scheduled.
    pub fn is_current(&self, tick: &Tick) -> bool {
        self.is_active() && tick.generation == self.generation
    }

    /// Spawn the periodic task. The first tick fires one full period from now.
    ///
    /// Does nothing if a task is already active. Must be called from within a
    /// tokio runtime.
    pub fn start(&mut self, tx: mpsc::Sender<Tick>) {
        if self.is_active() {
            return;
        }
        self.generation = self.generation.wrapping_add(1);
        let tick = Tick {
            generation: self.generation,
        };
        let period = self.period;
        tracing::debug!(generation = tick.generation, ?period, "tick task started");
        self.handle = Some(tokio::spawn(async move {
            let mut interval = time::interval_at(Instant::now() + period, period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                interval.tick().await;
                if tx.send(tick).await.is_err() {
                    break;
                }
            }
        }));
    }

    pub fn stop(&mut self) {
        if let Some(handle) = self.handle.take() {
            handle.abort();
            tracing::debug!(generation = self.generation, "tick task cancelled");
        }
    }

    /// Start or stop so that a task exists exactly when `running` is true.
    pub fn sync(&mut self, running: bool, tx: &mpsc::Sender<Tick>) {
        match (running, self.is_active()) {
            (true, false) => self.start(tx.clone()),
            (false, true) => self.stop(),
            _ => {}
        }
    }
}

impl Drop for TickScheduler {
    fn drop(&mut self) {
        self.stop();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn first_tick_waits_one_period() {
        let (tx, mut rx) = mpsc::channel(4);
        let mut sched = TickScheduler::new(Duration::from_secs(1));
        let begin = Instant::now();
        sched.start(tx);

        let tick = rx.recv().await.unwrap();
        assert!(sched.is_current(&tick));
        let waited = begin.elapsed();
        assert!(waited >= Duration::from_secs(1));
        assert!(waited < Duration::from_secs(2));

        rx.recv().await.unwrap();
        assert!(begin.elapsed() >= Duration::from_secs(2));
    }

    #[tokio::test(start_paused = true)]
    async fn stop_cancels_the_task() {
        let (tx, mut rx) = mpsc::channel(4);
        let mut sched = TickScheduler::new(Duration::from_secs(1));
        sched.start(tx.clone());
        rx.recv().await.unwrap();

        sched.stop();
        assert!(!sched.is_active());
        time::sleep(Duration::from_secs(5)).await;
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn sync_follows_running_flag() {
        let (tx, mut rx) = mpsc::channel(4);
        let mut sched = TickScheduler::new(Duration::from_secs(1));

        sched.sync(true, &tx);
        assert!(sched.is_active());
        sched.sync(true, &tx);
        time::sleep(Duration::from_millis(1500)).await;
        // A second task would have queued a second tick by now.
        assert!(rx.try_recv().is_ok());
        assert!(rx.try_recv().is_err());

        sched.sync(false, &tx);
        assert!(!sched.is_active());
    }

    #[tokio::test(start_paused = true)]
    async fn restarted_task_gets_new_generation() {
        let (tx, mut rx) = mpsc::channel(4);
        let mut sched = TickScheduler::new(Duration::from_secs(1));
        sched.start(tx.clone());
        let old = rx.recv().await.unwrap();

        sched.stop();
        sched.start(tx.clone());
        assert!(!sched.is_current(&old));
        let fresh = rx.recv().await.unwrap();
        assert!(sched.is_current(&fresh));
    }

    #[tokio::test(start_paused = true)]
    async fn drop_aborts_task() {
        let (tx, mut rx) = mpsc::channel(4);
        {
            let mut sched = TickScheduler::new(Duration::from_secs(1));
            sched.start(tx.clone());
        }
        time::sleep(Duration::from_secs(3)).await;
        assert!(rx.try_recv().is_err());
    }
}
