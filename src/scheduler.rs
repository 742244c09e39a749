//! Tick cadence for the game loop.
//!
//! The loop only ever awaits [`Scheduler::tick`], so the production interval
//! timer can be swapped for [`Immediate`] in tests.

use std::time::Duration;
use tokio::time::{Interval, MissedTickBehavior, interval};

#[allow(async_fn_in_trait)]
pub trait Scheduler {
    /// Resolves when the next tick is due. Must be cancel-safe: the loop
    /// races it against input events.
    async fn tick(&mut self);

    /// Restart the cadence, e.g. when a new game begins
    fn reset(&mut self) {}
}

/// Fixed-period ticks backed by a tokio interval. The first tick fires
/// immediately.
pub struct IntervalScheduler {
    timer: Interval,
}

impl IntervalScheduler {
    /// Must be called from within a tokio runtime
    pub fn new(period: Duration) -> Self {
        let mut timer = interval(period);
        // A slow frame pushes the next tick back instead of bursting
        timer.set_missed_tick_behavior(MissedTickBehavior::Delay);
        Self { timer }
    }
}

impl Scheduler for IntervalScheduler {
    async fn tick(&mut self) {
        self.timer.tick().await;
    }

    fn reset(&mut self) {
        self.timer.reset_immediately();
    }
}

/// Ticks as fast as the runtime polls it
#[derive(Debug, Default)]
pub struct Immediate {
    pub ticks: u64,
    pub resets: u64,
}

impl Scheduler for Immediate {
    async fn tick(&mut self) {
        tokio::task::yield_now().await;
        self.ticks += 1;
    }

    fn reset(&mut self) {
        self.resets += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_immediate_counts_ticks() {
        let mut scheduler = Immediate::default();
        for _ in 0..3 {
            scheduler.tick().await;
        }
        assert_eq!(scheduler.ticks, 3);

        scheduler.reset();
        assert_eq!(scheduler.resets, 1);
    }

    #[tokio::test]
    async fn test_interval_first_tick_is_immediate() {
        let mut scheduler = IntervalScheduler::new(Duration::from_secs(3600));

        tokio::time::timeout(Duration::from_secs(1), scheduler.tick())
            .await
            .expect("first tick should not wait a full period");

        scheduler.reset();
        tokio::time::timeout(Duration::from_secs(1), scheduler.tick())
            .await
            .expect("tick after reset should fire immediately");
    }
}
