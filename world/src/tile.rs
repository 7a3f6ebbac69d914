//! Tile records stored in the board arena and their capability hooks.

use std::time::Duration;

use redistrict_core::{
    DistrictId, GridPos, Party, Population, SwapQuota, TileId, TileKind, TileSnapshot,
};

/// Authoritative state of a single tile.
#[derive(Clone, Debug)]
pub(crate) struct TileRecord {
    pub(crate) id: TileId,
    pub(crate) position: GridPos,
    pub(crate) party: Party,
    pub(crate) population: Population,
    pub(crate) district: DistrictId,
    pub(crate) kind: TileKind,
    locked: bool,
    transition: Duration,
}

/// Everything about a tile that undo and reset need to put back.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct TileCapture {
    pub(crate) position: GridPos,
    pub(crate) district: DistrictId,
    pub(crate) party: Party,
    pub(crate) kind: TileKind,
}

/// Change in chain state caused by a swap or a restore.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum ChainChange {
    Chained,
    Unchained(Party),
}

/// Tiles whose look and interactivity follow their district's majority.
pub(crate) trait Lockable {
    /// Locks the tile, returning whether its state changed.
    fn lock(&mut self) -> bool;
    /// Unlocks the tile, returning whether its state changed.
    fn unlock(&mut self) -> bool;
    fn is_locked(&self) -> bool;
}

/// Tiles that take part in swaps.
pub(crate) trait SwapReactive {
    /// Whether another tile may swap into this tile's slot.
    fn can_swap_with(&self) -> bool;
    /// Hook invoked on both participants of a successful swap.
    fn on_swap(&mut self) -> Option<ChainChange>;
}

impl TileRecord {
    pub(crate) fn new(
        id: TileId,
        position: GridPos,
        party: Party,
        population: Population,
        district: DistrictId,
        kind: TileKind,
    ) -> Self {
        Self {
            id,
            position,
            party,
            population,
            district,
            kind,
            locked: false,
            transition: Duration::ZERO,
        }
    }

    /// Party the tile reports to its district. Chained tiles stay neutral.
    pub(crate) fn political_party(&self) -> Party {
        if self.kind.is_chained() {
            Party::Neutral
        } else {
            self.party
        }
    }

    pub(crate) fn quota(&self) -> Option<SwapQuota> {
        self.kind.quota()
    }

    pub(crate) fn quota_exhausted(&self) -> bool {
        self.quota().is_some_and(SwapQuota::is_exhausted)
    }

    pub(crate) fn consume_quota(&mut self) {
        if let TileKind::Swappable { quota } = &mut self.kind {
            *quota = quota.consume();
        }
    }

    pub(crate) fn in_flight(&self) -> bool {
        !self.transition.is_zero()
    }

    pub(crate) fn begin_transition(&mut self, duration: Duration) {
        self.transition = duration;
    }

    pub(crate) fn cancel_transition(&mut self) {
        self.transition = Duration::ZERO;
    }

    /// Advances the tile's transition, returning whether it finished on this tick.
    pub(crate) fn advance(&mut self, dt: Duration) -> bool {
        if self.transition.is_zero() {
            return false;
        }
        self.transition = self.transition.saturating_sub(dt);
        self.transition.is_zero()
    }

    /// Captures the state pushed onto the history stack before a move.
    pub(crate) fn capture(&self) -> TileCapture {
        TileCapture {
            position: self.position,
            district: self.district,
            party: self.party,
            kind: self.kind,
        }
    }

    /// Puts back a captured state, reporting a chain change when the chain reappears
    /// or disappears as a result.
    pub(crate) fn restore(&mut self, capture: &TileCapture) -> Option<ChainChange> {
        let was_chained = self.kind.is_chained();
        self.position = capture.position;
        self.district = capture.district;
        self.party = capture.party;
        self.kind = capture.kind;
        self.transition = Duration::ZERO;

        match (was_chained, self.kind.is_chained()) {
            (false, true) => Some(ChainChange::Chained),
            (true, false) => Some(ChainChange::Unchained(self.party)),
            _ => None,
        }
    }

    /// Builds the replacement tile used when this tile is converted.
    ///
    /// Position, population, district and variant sub-state carry over; explosive
    /// and undecided tiles become plain tiles.
    pub(crate) fn converted(&self, id: TileId, party: Party) -> Self {
        let kind = match self.kind {
            TileKind::Explosive { .. } | TileKind::Undecided => TileKind::Plain,
            other => other,
        };
        Self::new(
            id,
            self.position,
            party,
            self.population,
            self.district,
            kind,
        )
    }

    /// Marks an explosive tile as defused. Returns `false` when it already exploded.
    pub(crate) fn defuse(&mut self) -> bool {
        match &mut self.kind {
            TileKind::Explosive { exploded: true, .. } => false,
            TileKind::Explosive { defused, .. } => {
                *defused = true;
                true
            }
            _ => true,
        }
    }

    /// Thaws a frozen tile, returning whether it was frozen.
    pub(crate) fn unfreeze(&mut self) -> bool {
        match &mut self.kind {
            TileKind::Frozen { frozen } if *frozen => {
                *frozen = false;
                true
            }
            _ => false,
        }
    }

    pub(crate) fn snapshot(&self) -> TileSnapshot {
        TileSnapshot {
            id: self.id,
            position: self.position,
            party: self.political_party(),
            underlying_party: self.party,
            population: self.population,
            district: self.district,
            locked: self.is_locked(),
            kind: self.kind,
            in_flight: self.in_flight(),
        }
    }
}

impl Lockable for TileRecord {
    fn lock(&mut self) -> bool {
        if self.locked {
            return false;
        }
        self.locked = true;
        true
    }

    fn unlock(&mut self) -> bool {
        if !self.locked {
            return false;
        }
        self.locked = false;
        true
    }

    fn is_locked(&self) -> bool {
        self.locked
    }
}

impl SwapReactive for TileRecord {
    fn can_swap_with(&self) -> bool {
        !self.kind.is_frozen()
    }

    fn on_swap(&mut self) -> Option<ChainChange> {
        let TileKind::Chained { remaining } = &mut self.kind else {
            return None;
        };
        if *remaining == 0 {
            return None;
        }
        *remaining -= 1;
        if *remaining == 0 {
            Some(ChainChange::Unchained(self.party))
        } else {
            None
        }
    }
}
