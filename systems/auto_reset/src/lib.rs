#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Resets the board after the player runs out of swaps.

use std::time::Duration;

use redistrict_core::{Command, Event};

/// Grace period granted after the swap limit is reached.
pub const DEFAULT_GRACE: Duration = Duration::from_millis(1_500);

/// Configuration parameters required to construct the auto reset system.
#[derive(Clone, Copy, Debug)]
pub struct Config {
    grace: Duration,
}

impl Config {
    /// Creates a configuration with the provided grace period.
    #[must_use]
    pub const fn new(grace: Duration) -> Self {
        Self { grace }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new(DEFAULT_GRACE)
    }
}

/// Pure system that counts down a grace timer once swaps are exhausted.
#[derive(Debug)]
pub struct AutoReset {
    grace: Duration,
    remaining: Option<Duration>,
}

impl Default for AutoReset {
    fn default() -> Self {
        Self::new(Config::default())
    }
}

impl AutoReset {
    /// Creates a new auto reset system using the supplied configuration.
    #[must_use]
    pub const fn new(config: Config) -> Self {
        Self {
            grace: config.grace,
            remaining: None,
        }
    }

    /// Time left before the reset fires, if the timer is armed.
    #[must_use]
    pub const fn remaining(&self) -> Option<Duration> {
        self.remaining
    }

    /// Consumes world events in order, emitting a reset when the grace period elapses.
    pub fn handle(&mut self, events: &[Event], out: &mut Vec<Command>) {
        for event in events {
            match event {
                Event::SwapsExhausted { .. } => {
                    if self.remaining.is_none() {
                        self.remaining = Some(self.grace);
                    }
                }
                Event::BoardReset { .. }
                | Event::MoveUndone { .. }
                | Event::LevelWon { .. }
                | Event::LevelLoaded { .. } => self.remaining = None,
                Event::TimeAdvanced { dt } => {
                    let Some(remaining) = self.remaining else {
                        continue;
                    };
                    let remaining = remaining.saturating_sub(*dt);
                    if remaining.is_zero() {
                        self.remaining = None;
                        out.push(Command::Reset);
                    } else {
                        self.remaining = Some(remaining);
                    }
                }
                _ => {}
            }
        }
    }
}
