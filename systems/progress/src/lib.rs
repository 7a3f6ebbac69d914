#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Player progress record and the system that advances it as levels are won.

use std::{fs, io, path::Path};

use redistrict_core::{Event, LevelSettings};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised while reading or writing the progress file.
#[derive(Debug, Error)]
pub enum ProgressError {
    /// The file could not be read or written.
    #[error("progress file i/o failed: {0}")]
    Io(#[from] io::Error),
    /// The file contents are not a valid progress record.
    #[error("progress file is malformed: {0}")]
    Format(#[from] serde_json::Error),
}

/// Persistent record of how far the player got.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerProgress {
    /// Name the player chose.
    pub player_name: String,
    /// Level the player is on; zero is the tutorial.
    pub current_level: u32,
    /// Faction the player currently plays for.
    pub current_faction: String,
    /// Most advanced level unlocked so far.
    pub highest_level: u32,
    /// Factions the player may pick from.
    pub unlocked_factions: Vec<String>,
    /// Whether swap limits are extended by half.
    pub extra_swaps: bool,
}

impl PlayerProgress {
    /// Moves on to the next level when the current one is the frontier.
    ///
    /// Replaying an earlier level leaves both counters untouched.
    pub fn increment_level(&mut self) -> bool {
        if self.current_level < self.highest_level {
            return false;
        }
        self.current_level += 1;
        self.highest_level = self.current_level;
        true
    }

    /// Unlocks a faction, returning whether it was new.
    pub fn unlock_faction(&mut self, faction: &str) -> bool {
        if self.unlocked_factions.iter().any(|known| known == faction) {
            return false;
        }
        self.unlocked_factions.push(faction.to_owned());
        true
    }
}

/// Pure system tracking player progress across level wins.
#[derive(Debug, Default)]
pub struct Progress {
    record: PlayerProgress,
    dirty: bool,
}

impl Progress {
    /// Wraps a previously loaded progress record.
    #[must_use]
    pub fn new(record: PlayerProgress) -> Self {
        Self {
            record,
            dirty: false,
        }
    }

    /// Current progress record.
    #[must_use]
    pub fn record(&self) -> &PlayerProgress {
        &self.record
    }

    /// Reports whether the record changed since it was last saved.
    #[must_use]
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Enables or disables the extra swaps bonus.
    pub fn set_extra_swaps(&mut self, enabled: bool) {
        if self.record.extra_swaps != enabled {
            self.record.extra_swaps = enabled;
            self.dirty = true;
        }
    }

    /// Level settings derived from the player's preferences.
    #[must_use]
    pub fn level_settings(&self) -> LevelSettings {
        LevelSettings {
            extra_swaps: self.record.extra_swaps,
            ..LevelSettings::default()
        }
    }

    /// Consumes world events, advancing the level on each win.
    pub fn handle(&mut self, events: &[Event]) {
        for event in events {
            if let Event::LevelWon { .. } = event {
                self.dirty |= self.record.increment_level();
            }
        }
    }

    /// Writes the record to `path` and clears the dirty flag.
    pub fn save(&mut self, path: &Path) -> Result<(), ProgressError> {
        save(&self.record, path)?;
        self.dirty = false;
        Ok(())
    }
}

/// Reads a progress record, yielding the default record when the file is absent.
pub fn load(path: &Path) -> Result<PlayerProgress, ProgressError> {
    match fs::read_to_string(path) {
        Ok(contents) => Ok(serde_json::from_str(&contents)?),
        Err(error) if error.kind() == io::ErrorKind::NotFound => Ok(PlayerProgress::default()),
        Err(error) => Err(error.into()),
    }
}

/// Writes a progress record as pretty-printed JSON.
pub fn save(record: &PlayerProgress, path: &Path) -> Result<(), ProgressError> {
    let json = serde_json::to_string_pretty(record)?;
    fs::write(path, json)?;
    Ok(())
}
