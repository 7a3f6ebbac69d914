use std::collections::BTreeMap;

use redistrict_core::{DistrictId, DistrictSnapshot, Party, TileId};

use crate::tile::TileRecord;

/// Group of tiles evaluated together for majority purposes.
#[derive(Clone, Debug)]
pub(crate) struct District {
    pub(crate) id: DistrictId,
    pub(crate) name: String,
    active: bool,
    members: Vec<TileId>,
}

/// Population tallies over a district's current members.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub(crate) struct DistrictStats {
    pub(crate) death_population: u32,
    pub(crate) total_population: u32,
    pub(crate) death_members: usize,
    pub(crate) members: usize,
}

impl DistrictStats {
    /// Population-weighted Death share strictly above one half.
    pub(crate) fn majority(&self) -> bool {
        self.total_population > 0
            && u64::from(self.death_population) * 2 > u64::from(self.total_population)
    }

    /// Every member reports the Death party.
    pub(crate) fn absolute_majority(&self) -> bool {
        self.members > 0 && self.death_members == self.members
    }
}

impl District {
    pub(crate) fn new(id: DistrictId, name: String) -> Self {
        Self {
            id,
            name,
            active: true,
            members: Vec::new(),
        }
    }

    pub(crate) fn is_active(&self) -> bool {
        self.active
    }

    pub(crate) fn disable(&mut self) {
        self.active = false;
    }

    pub(crate) fn enable(&mut self) {
        self.active = true;
    }

    pub(crate) fn members(&self) -> &[TileId] {
        &self.members
    }

    /// Rebuilds the member list from the tile arena, which is the source of truth.
    pub(crate) fn update_membership(&mut self, tiles: &BTreeMap<TileId, TileRecord>) {
        self.members.clear();
        self.members.extend(
            tiles
                .values()
                .filter(|tile| tile.district == self.id)
                .map(|tile| tile.id),
        );
    }

    pub(crate) fn stats(&self, tiles: &BTreeMap<TileId, TileRecord>) -> DistrictStats {
        let mut stats = DistrictStats::default();
        for tile in self.members.iter().filter_map(|id| tiles.get(id)) {
            let population = tile.population.get();
            stats.members += 1;
            stats.total_population = stats.total_population.saturating_add(population);
            if tile.political_party() == Party::Death {
                stats.death_members += 1;
                stats.death_population = stats.death_population.saturating_add(population);
            }
        }
        stats
    }

    pub(crate) fn win_condition_met(&self, tiles: &BTreeMap<TileId, TileRecord>) -> bool {
        self.stats(tiles).majority()
    }

    pub(crate) fn snapshot(&self, tiles: &BTreeMap<TileId, TileRecord>) -> DistrictSnapshot {
        let stats = self.stats(tiles);
        DistrictSnapshot {
            id: self.id,
            name: self.name.clone(),
            active: self.active,
            members: self.members.clone(),
            death_population: stats.death_population,
            total_population: stats.total_population,
            majority: stats.majority(),
            absolute_majority: stats.absolute_majority(),
        }
    }
}
