//! Resolution of directional mass swaps.

use redistrict_core::{Direction, Event, MoveRejection, SwapQuota, TileId, TileKind};
use tracing::debug;

use crate::{
    board::Board,
    history::HistoryEntry,
    tile::{ChainChange, SwapReactive},
};

/// Bookkeeping for moves that span several ticks.
#[derive(Clone, Copy, Debug, Default)]
pub(crate) struct SwapResolver {
    queued: Option<Direction>,
    reactions_pending: bool,
}

impl SwapResolver {
    /// Remembers a move for later, overwriting any earlier queued move.
    pub(crate) fn queue(&mut self, direction: Direction) -> Option<Direction> {
        self.queued.replace(direction)
    }

    pub(crate) fn queued(&self) -> Option<Direction> {
        self.queued
    }

    pub(crate) fn take_queued(&mut self) -> Option<Direction> {
        self.queued.take()
    }

    pub(crate) fn mark_pending(&mut self) {
        self.reactions_pending = true;
    }

    pub(crate) fn is_pending(&self) -> bool {
        self.reactions_pending
    }

    pub(crate) fn take_pending(&mut self) -> bool {
        std::mem::take(&mut self.reactions_pending)
    }

    pub(crate) fn clear(&mut self) {
        *self = Self::default();
    }
}

impl Board {
    /// Attempts to move every eligible player-controlled tile one step in `direction`.
    pub(crate) fn swap_all(&mut self, direction: Direction, out_events: &mut Vec<Event>) {
        let rejection = if self.won {
            Some(MoveRejection::LevelWon)
        } else if !self.playable {
            Some(MoveRejection::NotPlayable)
        } else if self.resetting {
            Some(MoveRejection::Resetting)
        } else if self.is_shaking() {
            Some(MoveRejection::Shaking)
        } else {
            None
        };
        if let Some(reason) = rejection {
            out_events.push(Event::MoveRejected { direction, reason });
            return;
        }

        if self.any_in_flight() || self.resolver.is_pending() {
            if let Some(overwritten) = self.resolver.queue(direction) {
                debug!(?overwritten, ?direction, "queued move overwritten");
            }
            out_events.push(Event::MoveQueued { direction });
            return;
        }

        self.resolve_mass_swap(direction, out_events);
    }

    fn resolve_mass_swap(&mut self, direction: Direction, out_events: &mut Vec<Event>) {
        let candidates = self.eligible_movers(direction);
        if candidates.is_empty() {
            out_events.push(Event::MoveRejected {
                direction,
                reason: MoveRejection::NothingMoved,
            });
            return;
        }

        self.history.push(HistoryEntry::capture(self.tiles.values()));

        let mut pairs = 0;
        for mover in candidates {
            if self.try_swap(mover, direction, out_events) {
                pairs += 1;
            }
        }

        if pairs == 0 {
            self.history.discard_last();
            out_events.push(Event::MoveRejected {
                direction,
                reason: MoveRejection::NothingMoved,
            });
            return;
        }

        self.swap_count = self.swap_count.saturating_add(1);
        self.resolver.mark_pending();
        self.refresh_membership();

        debug!(?direction, pairs, swaps_made = self.swap_count, "mass swap resolved");
        out_events.push(Event::MassSwapResolved {
            direction,
            pairs,
            swaps_made: self.swap_count,
        });
    }

    /// Player-controlled tiles allowed to start a swap in `direction`.
    ///
    /// A tile is skipped when the tile that would take its slot is itself a
    /// player-controlled tile that can still move, so no tile is dragged twice.
    pub(crate) fn eligible_movers(&self, direction: Direction) -> Vec<TileId> {
        self.tiles
            .values()
            .filter(|tile| matches!(tile.kind, TileKind::Swappable { .. }))
            .filter(|tile| {
                let behind = tile.position.step(direction.opposite());
                match self.square_by_position(behind).and_then(|other| other.quota()) {
                    None => true,
                    Some(quota) => quota.is_exhausted(),
                }
            })
            .map(|tile| tile.id)
            .collect()
    }

    /// Swaps a single tile with its neighbour, re-validating every precondition.
    fn try_swap(&mut self, mover: TileId, direction: Direction, out_events: &mut Vec<Event>) -> bool {
        let Some(tile) = self.tiles.get(&mover) else {
            return false;
        };
        if tile.in_flight() || tile.quota().map_or(true, SwapQuota::is_exhausted) {
            return false;
        }
        if self.too_many_swaps() {
            return false;
        }

        let from = tile.position;
        let mover_district = tile.district;
        let to = from.step(direction);
        let Some(target) = self.square_by_position(to) else {
            return false;
        };
        if !target.can_swap_with() || target.in_flight() || target.quota_exhausted() {
            return false;
        }
        let displaced = target.id;
        let displaced_district = target.district;

        let transition = self.settings.transition;
        let mut chain_changes = Vec::with_capacity(2);
        for (id, position, district) in [
            (mover, to, displaced_district),
            (displaced, from, mover_district),
        ] {
            let Some(tile) = self.tiles.get_mut(&id) else {
                continue;
            };
            tile.position = position;
            tile.district = district;
            tile.begin_transition(transition);
            tile.consume_quota();
            if let Some(change) = tile.on_swap() {
                chain_changes.push((id, change));
            }
        }

        debug!(
            mover = mover.get(),
            displaced = displaced.get(),
            ?direction,
            "tiles swapped"
        );
        out_events.push(Event::TilesSwapped {
            mover,
            displaced,
            direction,
            mover_to: to,
            displaced_to: from,
        });
        for (tile, change) in chain_changes {
            if let ChainChange::Unchained(party) = change {
                out_events.push(Event::TileUnchained { tile, party });
            }
        }
        true
    }
}
