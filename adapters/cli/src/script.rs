//! Move scripts: one character per player action.

use redistrict_core::Direction;
use redistrict_system_controls::ControlInput;
use thiserror::Error;

/// Single player action parsed from a script.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Step {
    /// Arrow press.
    Swap(Direction),
    /// Undo the last move.
    Undo,
    /// Reset the level.
    Reset,
}

impl Step {
    /// Frame input that performs the step.
    pub(crate) fn input(self) -> ControlInput {
        match self {
            Self::Swap(direction) => ControlInput::arrow(direction),
            Self::Undo => ControlInput {
                undo: true,
                ..ControlInput::default()
            },
            Self::Reset => ControlInput {
                reset: true,
                ..ControlInput::default()
            },
        }
    }
}

/// Errors raised while parsing a move script.
#[derive(Debug, Error, PartialEq, Eq)]
pub(crate) enum ScriptError {
    /// The script contains a character with no meaning.
    #[error("unknown move `{symbol}` at position {index}; expected U, D, L, R, Z or X")]
    UnknownMove {
        /// Offending character.
        symbol: char,
        /// Zero-based character index.
        index: usize,
    },
}

/// Parses `U`/`D`/`L`/`R` arrows, `Z` undo and `X` reset.
///
/// Matching is case-insensitive; whitespace, commas and dashes separate
/// nothing and are skipped.
pub(crate) fn parse(script: &str) -> Result<Vec<Step>, ScriptError> {
    script
        .chars()
        .enumerate()
        .filter(|(_, symbol)| !symbol.is_whitespace() && !matches!(symbol, ',' | '-'))
        .map(|(index, symbol)| match symbol.to_ascii_uppercase() {
            'U' => Ok(Step::Swap(Direction::Up)),
            'D' => Ok(Step::Swap(Direction::Down)),
            'L' => Ok(Step::Swap(Direction::Left)),
            'R' => Ok(Step::Swap(Direction::Right)),
            'Z' => Ok(Step::Undo),
            'X' => Ok(Step::Reset),
            _ => Err(ScriptError::UnknownMove { symbol, index }),
        })
        .collect()
}
