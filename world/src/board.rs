//! The board: tile arena, districts, history and the board-wide play state.

use std::{collections::BTreeMap, time::Duration};

use redistrict_core::{
    BanishCause, BoardStatus, DistrictId, Event, GridPos, LevelSettings, ObstacleSnapshot, Party,
    ResetRejection, TileId, TileKind, UndoRejection,
};
use tracing::{debug, info};

use crate::{
    district::District,
    history::History,
    swap::SwapResolver,
    tile::{ChainChange, Lockable, TileCapture, TileRecord},
};

/// Authoritative state of a loaded level.
#[derive(Debug)]
pub(crate) struct Board {
    pub(crate) name: String,
    pub(crate) columns: u32,
    pub(crate) rows: u32,
    pub(crate) cell_size: f32,
    pub(crate) settings: LevelSettings,
    pub(crate) swap_limit: Option<u32>,
    pub(crate) tiles: BTreeMap<TileId, TileRecord>,
    pub(crate) graveyard: BTreeMap<TileId, TileRecord>,
    pub(crate) originals: BTreeMap<TileId, TileCapture>,
    pub(crate) districts: Vec<District>,
    pub(crate) obstacles: Vec<ObstacleSnapshot>,
    pub(crate) history: History,
    pub(crate) resolver: SwapResolver,
    pub(crate) next_tile: u32,
    pub(crate) swap_count: u32,
    pub(crate) won: bool,
    pub(crate) playable: bool,
    pub(crate) shake: Duration,
    pub(crate) resetting: bool,
}

impl Board {
    /// Active tile occupying the provided position. Banished tiles are never returned.
    pub(crate) fn square_by_position(&self, position: GridPos) -> Option<&TileRecord> {
        self.tiles.values().find(|tile| tile.position == position)
    }

    /// Active tiles in the 8-neighbourhood of `position`, skipping empty cells.
    pub(crate) fn surrounding_tiles(&self, position: GridPos) -> Vec<&TileRecord> {
        position
            .surrounding()
            .into_iter()
            .filter_map(|neighbour| self.square_by_position(neighbour))
            .collect()
    }

    pub(crate) fn district(&self, id: DistrictId) -> Option<&District> {
        self.districts.get(id.get() as usize)
    }

    pub(crate) fn district_mut(&mut self, id: DistrictId) -> Option<&mut District> {
        self.districts.get_mut(id.get() as usize)
    }

    pub(crate) fn any_in_flight(&self) -> bool {
        self.tiles.values().any(TileRecord::in_flight)
    }

    pub(crate) fn is_shaking(&self) -> bool {
        !self.shake.is_zero()
    }

    pub(crate) fn too_many_swaps(&self) -> bool {
        self.swap_limit
            .is_some_and(|limit| self.swap_count >= limit)
    }

    pub(crate) fn remaining_swaps(&self) -> Option<u32> {
        self.swap_limit
            .map(|limit| limit.saturating_sub(self.swap_count))
    }

    pub(crate) fn status(&self) -> BoardStatus {
        BoardStatus {
            swaps_made: self.swap_count,
            swap_limit: self.swap_limit,
            remaining_swaps: self.remaining_swaps(),
            won: self.won,
            playable: self.playable,
            in_flight: self.any_in_flight(),
            shaking: self.is_shaking(),
            resetting: self.resetting,
            history_depth: self.history.depth(),
        }
    }

    fn allocate_tile_id(&mut self) -> TileId {
        let id = TileId::new(self.next_tile);
        self.next_tile = self.next_tile.saturating_add(1);
        id
    }

    pub(crate) fn refresh_membership(&mut self) {
        for district in &mut self.districts {
            district.update_membership(&self.tiles);
        }
    }

    pub(crate) fn set_playable(&mut self, playable: bool, out_events: &mut Vec<Event>) {
        if self.playable == playable {
            return;
        }
        self.playable = playable;
        out_events.push(Event::PlayableChanged { playable });
    }

    /// Moves a tile from the active set into the graveyard.
    pub(crate) fn banish(
        &mut self,
        id: TileId,
        cause: BanishCause,
        out_events: &mut Vec<Event>,
    ) -> bool {
        let Some(mut tile) = self.tiles.remove(&id) else {
            return false;
        };
        tile.cancel_transition();
        let position = tile.position;
        let _ = self.graveyard.insert(id, tile);
        out_events.push(Event::TileBanished {
            tile: id,
            position,
            cause,
        });
        true
    }

    /// Permanently removes an active tile.
    fn destroy(&mut self, id: TileId, out_events: &mut Vec<Event>) -> bool {
        if self.tiles.remove(&id).is_none() {
            return false;
        }
        out_events.push(Event::TileDestroyed { tile: id });
        true
    }

    /// Replaces an active tile with a fresh copy of the provided party.
    ///
    /// Explosive tiles are defused before the copy is made; a tile that already
    /// exploded cannot be converted.
    pub(crate) fn convert(
        &mut self,
        id: TileId,
        party: Party,
        out_events: &mut Vec<Event>,
    ) -> Option<TileId> {
        if matches!(
            self.tiles.get(&id)?.kind,
            TileKind::Explosive { exploded: true, .. }
        ) {
            return None;
        }

        let replacement_id = self.allocate_tile_id();
        let tile = self.tiles.get_mut(&id)?;
        let _ = tile.defuse();
        let replacement = tile.converted(replacement_id, party);
        let position = replacement.position;

        let _ = self.banish(id, BanishCause::Converted, out_events);
        let _ = self.tiles.insert(replacement_id, replacement);
        self.refresh_membership();

        debug!(from = id.get(), to = replacement_id.get(), ?party, "tile converted");
        out_events.push(Event::TileConverted {
            from: id,
            to: replacement_id,
            party,
            position,
        });
        Some(replacement_id)
    }

    /// Handles an externally requested conversion, ignoring requests that would change nothing.
    pub(crate) fn request_conversion(
        &mut self,
        id: TileId,
        party: Party,
        out_events: &mut Vec<Event>,
    ) {
        let Some(tile) = self.tiles.get(&id) else {
            debug!(tile = id.get(), "conversion of inactive tile ignored");
            return;
        };
        if tile.party == party && tile.kind != TileKind::Undecided {
            return;
        }
        let _ = self.convert(id, party, out_events);
    }

    /// Locks every member of a district holding a majority and unlocks all others.
    pub(crate) fn update_locks(&mut self, out_events: &mut Vec<Event>) {
        let verdicts: Vec<(bool, Vec<TileId>)> = self
            .districts
            .iter()
            .map(|district| {
                (
                    district.win_condition_met(&self.tiles),
                    district.members().to_vec(),
                )
            })
            .collect();

        for (majority, members) in verdicts {
            for id in members {
                let Some(tile) = self.tiles.get_mut(&id) else {
                    continue;
                };
                if majority {
                    if tile.lock() {
                        out_events.push(Event::TileLocked { tile: id });
                    }
                } else if tile.unlock() {
                    out_events.push(Event::TileUnlocked { tile: id });
                }
            }
        }
    }

    fn win_condition(&self) -> bool {
        let active: Vec<&District> = self
            .districts
            .iter()
            .filter(|district| district.is_active())
            .collect();
        if active.is_empty() {
            return false;
        }

        let winning = active
            .iter()
            .filter(|district| district.win_condition_met(&self.tiles))
            .count();
        let within_limit = self
            .swap_limit
            .map_or(true, |limit| self.swap_count <= limit);

        winning * 2 > active.len() && within_limit
    }

    /// Recomputes the cached win flag, ending the level on a rising edge.
    pub(crate) fn update_win_condition(&mut self, out_events: &mut Vec<Event>) {
        let won = self.win_condition();
        if won == self.won {
            return;
        }
        self.won = won;
        out_events.push(Event::WinStateChanged { won });

        if won {
            info!(level = %self.name, swaps_made = self.swap_count, "level won");
            out_events.push(Event::LevelWon {
                swaps_made: self.swap_count,
            });
            self.set_playable(false, out_events);
        }
    }

    /// Advances timers, runs settled reactions and performs the per-tick maintenance.
    pub(crate) fn tick(&mut self, dt: Duration, out_events: &mut Vec<Event>) {
        for tile in self.tiles.values_mut() {
            let _ = tile.advance(dt);
        }
        self.shake = self.shake.saturating_sub(dt);

        if !self.any_in_flight() {
            self.resetting = false;

            if self.resolver.take_pending() {
                out_events.push(Event::SwapsSettled);
                self.run_reactions(out_events);
            }
            if let Some(direction) = self.resolver.take_queued() {
                debug!(?direction, "replaying queued move");
                self.swap_all(direction, out_events);
            }
        }

        self.maintain(out_events);
    }

    fn maintain(&mut self, out_events: &mut Vec<Event>) {
        self.refresh_membership();
        self.update_frozen(out_events);
        self.update_locks(out_events);
        self.update_win_condition(out_events);
    }

    /// Applies the standing reactions to the freshly loaded board and brings it into
    /// a consistent lock and win state.
    pub(crate) fn settle_initial_state(&mut self, out_events: &mut Vec<Event>) {
        self.run_standing_reactions(out_events);
        self.maintain(out_events);
    }

    fn restore_tile(tile: &mut TileRecord, capture: &TileCapture, out_events: &mut Vec<Event>) {
        match tile.restore(capture) {
            Some(ChainChange::Chained) => out_events.push(Event::TileChained { tile: tile.id }),
            Some(ChainChange::Unchained(party)) => out_events.push(Event::TileUnchained {
                tile: tile.id,
                party,
            }),
            None => {}
        }
    }

    /// Reverts the most recent mass swap.
    pub(crate) fn undo(&mut self, out_events: &mut Vec<Event>) {
        let rejection = if self.history.is_empty() {
            Some(UndoRejection::EmptyHistory)
        } else if self.won {
            Some(UndoRejection::LevelWon)
        } else if self.resetting {
            Some(UndoRejection::Resetting)
        } else if self.is_shaking() {
            Some(UndoRejection::Shaking)
        } else if self.any_in_flight() {
            Some(UndoRejection::InTransition)
        } else {
            None
        };
        if let Some(reason) = rejection {
            out_events.push(Event::UndoRejected { reason });
            return;
        }
        let Some(entry) = self.history.pop() else {
            return;
        };

        let created: Vec<TileId> = self
            .tiles
            .keys()
            .filter(|id| !entry.contains(**id))
            .copied()
            .collect();
        let mut destroyed = 0;
        for id in created {
            if self.destroy(id, out_events) {
                destroyed += 1;
            }
        }

        let transition = self.settings.transition;
        let mut restored = 0;
        for tile in self.tiles.values_mut() {
            let Some(capture) = entry.get(tile.id) else {
                continue;
            };
            let moved = tile.position != capture.position;
            Self::restore_tile(tile, capture, out_events);
            if moved {
                tile.begin_transition(transition);
            }
            restored += 1;
        }

        self.swap_count = self.swap_count.saturating_sub(1);
        self.resolver.clear();
        self.refresh_membership();
        self.update_locks(out_events);
        self.update_win_condition(out_events);

        debug!(restored, destroyed, swaps_made = self.swap_count, "move undone");
        out_events.push(Event::MoveUndone {
            restored,
            destroyed,
        });
    }

    /// Returns every original tile to its starting state and purges everything created since.
    pub(crate) fn reset(&mut self, forced: bool, out_events: &mut Vec<Event>) {
        if !forced {
            let rejection = if self.won {
                Some(ResetRejection::LevelWon)
            } else if self.any_in_flight() {
                Some(ResetRejection::InTransition)
            } else {
                None
            };
            if let Some(reason) = rejection {
                out_events.push(Event::ResetRejected { reason });
                return;
            }
        }

        let created: Vec<TileId> = self
            .tiles
            .keys()
            .filter(|id| !self.originals.contains_key(id))
            .copied()
            .collect();
        for id in created {
            let _ = self.destroy(id, out_events);
        }

        let graveyard = std::mem::take(&mut self.graveyard);
        for (id, tile) in graveyard {
            if self.originals.contains_key(&id) {
                let _ = self.tiles.insert(id, tile);
            }
        }

        let transition = self.settings.transition;
        let mut any_moved = false;
        for (id, capture) in &self.originals {
            let Some(tile) = self.tiles.get_mut(id) else {
                continue;
            };
            let moved = tile.position != capture.position;
            Self::restore_tile(tile, capture, out_events);
            if moved {
                tile.begin_transition(transition);
                any_moved = true;
            }
        }

        for district in &mut self.districts {
            district.enable();
        }
        self.swap_count = 0;
        self.history.clear();
        self.resolver.clear();
        self.shake = Duration::ZERO;
        self.resetting = any_moved;
        if self.won {
            self.won = false;
            out_events.push(Event::WinStateChanged { won: false });
        }
        self.set_playable(true, out_events);

        self.run_standing_reactions(out_events);
        self.update_locks(out_events);
        self.update_win_condition(out_events);

        info!(level = %self.name, forced, "board reset");
        out_events.push(Event::BoardReset { forced });
    }
}
