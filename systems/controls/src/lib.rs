#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Player control system translating per-frame input into board commands.

use redistrict_core::{Command, Direction, Event};

/// Frame input captured from the player's device.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ControlInput {
    /// Arrow pressed this frame, if any.
    pub direction: Option<Direction>,
    /// Whether the undo action was requested this frame.
    pub undo: bool,
    /// Whether the reset action was requested this frame.
    pub reset: bool,
}

impl ControlInput {
    /// Creates an input frame that only presses the provided arrow.
    #[must_use]
    pub const fn arrow(direction: Direction) -> Self {
        Self {
            direction: Some(direction),
            undo: false,
            reset: false,
        }
    }

    /// Reports whether no action was requested this frame.
    #[must_use]
    pub const fn is_idle(&self) -> bool {
        self.direction.is_none() && !self.undo && !self.reset
    }
}

/// Pure system that gates player input on the board's playability.
#[derive(Debug)]
pub struct Controls {
    playable: bool,
    won: bool,
}

impl Default for Controls {
    fn default() -> Self {
        Self::new()
    }
}

impl Controls {
    /// Creates a controls system that waits for a level before accepting input.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            playable: false,
            won: false,
        }
    }

    /// Whether arrow and undo input is currently forwarded.
    #[must_use]
    pub const fn playable(&self) -> bool {
        self.playable
    }

    /// Consumes world events and the frame's input, emitting the resulting commands.
    ///
    /// Reset is always forwarded and becomes a forced reset once the level is won,
    /// so a finished board can be replayed. Arrows and undo require the board to
    /// be playable. At most one of reset, undo and arrow is emitted per frame, in
    /// that priority.
    pub fn handle(&mut self, events: &[Event], input: ControlInput, out: &mut Vec<Command>) {
        for event in events {
            match event {
                Event::LevelLoaded { .. } => {
                    self.playable = true;
                    self.won = false;
                }
                Event::WinStateChanged { won } => self.won = *won,
                Event::PlayableChanged { playable } => self.playable = *playable,
                _ => {}
            }
        }

        if input.reset {
            out.push(if self.won {
                Command::ForceReset
            } else {
                Command::Reset
            });
            return;
        }

        if !self.playable {
            return;
        }

        if input.undo {
            out.push(Command::Undo);
        } else if let Some(direction) = input.direction {
            out.push(Command::SwapAll { direction });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn idle_input_reports_idle() {
        assert!(ControlInput::default().is_idle());
        assert!(!ControlInput::arrow(Direction::Up).is_idle());
    }
}
