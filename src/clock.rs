//! Timers driving the countdown and the snake's movement
use crate::consts;
use crate::game::Phase;
use std::time::{Duration, Instant};

/// A one-shot timer.  Once it fires it stays disarmed until armed again, so
/// the period in effect for the next firing is whatever was current when it
/// was re-armed.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
struct Clock {
    deadline: Option<Instant>,
}

impl Clock {
    /// Arm the clock to fire `period` after `now`, unless it is already armed
    fn arm(&mut self, now: Instant, period: Duration) {
        if self.deadline.is_none() {
            self.deadline = Some(now + period);
        }
    }

    fn stop(&mut self) {
        self.deadline = None;
    }

    /// If the clock's deadline has passed, disarm it and return `true`
    fn fire(&mut self, now: Instant) -> bool {
        match self.deadline {
            Some(when) if when <= now => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }
}

/// Which clock went off
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum Alarm {
    Countdown,
    Tick,
}

/// The game's clocks.  Only the clock belonging to the current phase is ever
/// armed; [`Scheduler::sync()`] must be called after every change to the game
/// state.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub(crate) struct Scheduler {
    countdown: Clock,
    tick: Clock,
}

impl Scheduler {
    pub(crate) fn new() -> Scheduler {
        Scheduler::default()
    }

    /// Arm the clock for `phase` (using `tick_period` for the movement clock)
    /// and stop the other one
    pub(crate) fn sync(&mut self, phase: Phase, tick_period: Duration, now: Instant) {
        match phase {
            Phase::Countdown(_) => {
                self.tick.stop();
                self.countdown.arm(now, consts::COUNTDOWN_PERIOD);
            }
            Phase::Running => {
                self.countdown.stop();
                self.tick.arm(now, tick_period);
            }
            Phase::Title | Phase::Over(_) => {
                self.countdown.stop();
                self.tick.stop();
            }
        }
    }

    /// Fire and return the first clock whose deadline has passed, if any
    pub(crate) fn poll(&mut self, now: Instant) -> Option<Alarm> {
        if self.countdown.fire(now) {
            Some(Alarm::Countdown)
        } else if self.tick.fire(now) {
            Some(Alarm::Tick)
        } else {
            None
        }
    }

    /// How long until the next clock is due, or `None` if no clock is armed
    pub(crate) fn wait(&self, now: Instant) -> Option<Duration> {
        [self.countdown.deadline, self.tick.deadline]
            .into_iter()
            .flatten()
            .min()
            .map(|when| when.saturating_duration_since(now))
    }
}
