use std::{thread, time::Duration};

use chrono::{Local, NaiveDateTime, TimeDelta};

/// Wall-clock time and delays, injected so collection can run without real waits.
pub trait Clock {
    /// Current local time, used to stamp samples.
    fn now(&self) -> NaiveDateTime;

    /// Blocks for `duration`.
    fn sleep(&mut self, duration: Duration);
}

impl<C> Clock for &mut C
where
    C: Clock + ?Sized,
{
    fn now(&self) -> NaiveDateTime {
        (**self).now()
    }

    fn sleep(&mut self, duration: Duration) {
        (**self).sleep(duration);
    }
}

/// The local system clock.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> NaiveDateTime {
        Local::now().naive_local()
    }

    fn sleep(&mut self, duration: Duration) {
        thread::sleep(duration);
    }
}

/// A clock that only moves when slept on.
///
/// Every sleep advances [`now`](Clock::now) by the slept duration and is
/// recorded, so tests can check the delays a caller asked for.
#[derive(Debug, Clone)]
pub struct ManualClock {
    now: NaiveDateTime,
    sleeps: Vec<Duration>,
}

impl ManualClock {
    #[must_use]
    pub fn new(start: NaiveDateTime) -> Self {
        Self {
            now: start,
            sleeps: vec![],
        }
    }

    /// Durations of every sleep so far, in call order.
    #[must_use]
    pub fn sleeps(&self) -> &[Duration] {
        &self.sleeps
    }

    /// Sum of all sleeps so far.
    #[must_use]
    pub fn total_slept(&self) -> Duration {
        self.sleeps.iter().sum()
    }
}

impl Clock for ManualClock {
    fn now(&self) -> NaiveDateTime {
        self.now
    }

    fn sleep(&mut self, duration: Duration) {
        let delta = TimeDelta::from_std(duration).unwrap_or(TimeDelta::MAX);
        self.now = self.now.checked_add_signed(delta).unwrap_or(NaiveDateTime::MAX);
        self.sleeps.push(duration);
    }
}
