//! Reactions that run once every tile moved by a mass swap has settled.

use redistrict_core::{BanishCause, DistrictId, Event, ObstacleKind, Party, TileId, TileKind};
use tracing::{debug, info};

use crate::board::Board;

impl Board {
    /// Runs the post-swap reactions. Later steps read state written by earlier ones.
    pub(crate) fn run_reactions(&mut self, out_events: &mut Vec<Event>) {
        self.run_standing_reactions(out_events);
        self.update_frozen(out_events);
        self.update_locks(out_events);
        self.update_win_condition(out_events);
        self.check_swap_limit(out_events);
    }

    /// Reactions that also hold for a board nobody has moved yet, run on load and
    /// after a reset as well as after every settled swap.
    pub(crate) fn run_standing_reactions(&mut self, out_events: &mut Vec<Event>) {
        self.refresh_membership();
        self.apply_obstacle_effects(out_events);
        self.check_explosives(out_events);
    }

    /// Every obstacle converts its neighbours to its own party.
    ///
    /// The comparison uses the party a tile belongs to underneath any chain, so a
    /// chained neighbour of the obstacle's party is left alone while one of another
    /// party is converted even though it currently reports as neutral.
    fn apply_obstacle_effects(&mut self, out_events: &mut Vec<Event>) {
        let obstacles = self.obstacles.clone();
        for obstacle in obstacles {
            let party = match obstacle.kind {
                ObstacleKind::Television { party } => party,
            };
            for position in obstacle.position.surrounding() {
                let Some(tile) = self.square_by_position(position) else {
                    continue;
                };
                if tile.party == party {
                    continue;
                }
                let tile = tile.id;
                out_events.push(Event::TileBrainwashed {
                    obstacle: obstacle.position,
                    tile,
                });
                let _ = self.convert(tile, party, out_events);
            }
        }
    }

    fn check_explosives(&mut self, out_events: &mut Vec<Event>) {
        let armed: Vec<TileId> = self
            .tiles
            .values()
            .filter(|tile| {
                matches!(
                    tile.kind,
                    TileKind::Explosive {
                        defused: false,
                        exploded: false
                    }
                )
            })
            .map(|tile| tile.id)
            .collect();

        for id in armed {
            // an earlier explosion may already have taken this tile with it
            let Some(tile) = self.tiles.get(&id) else {
                continue;
            };
            if tile.party == Party::Life {
                continue;
            }
            let district_id = tile.district;
            let Some(district) = self.district(district_id) else {
                continue;
            };
            if !district.is_active() || district.win_condition_met(&self.tiles) {
                continue;
            }
            self.explode(id, district_id, out_events);
        }
    }

    fn explode(&mut self, source: TileId, district_id: DistrictId, out_events: &mut Vec<Event>) {
        if let Some(tile) = self.tiles.get_mut(&source) {
            tile.kind = TileKind::Explosive {
                defused: false,
                exploded: true,
            };
        }

        let members = self
            .district(district_id)
            .map(|district| district.members().to_vec())
            .unwrap_or_default();
        let mut banished = 0;
        for member in members {
            if self.banish(member, BanishCause::Exploded, out_events) {
                banished += 1;
            }
        }
        if let Some(district) = self.district_mut(district_id) {
            district.disable();
        }
        self.refresh_membership();
        self.shake = self.settings.shake;

        info!(
            district = district_id.get(),
            source = source.get(),
            tiles = banished,
            "district exploded"
        );
        out_events.push(Event::DistrictExploded {
            district: district_id,
            source,
            tiles: banished,
        });
        out_events.push(Event::BoardShaking {
            duration: self.settings.shake,
        });
    }

    /// Thaws frozen tiles whose district is entirely Death. Thawing is one-way until reset.
    pub(crate) fn update_frozen(&mut self, out_events: &mut Vec<Event>) {
        let thawing: Vec<TileId> = self
            .districts
            .iter()
            .filter(|district| district.stats(&self.tiles).absolute_majority())
            .flat_map(|district| district.members().iter().copied())
            .filter(|id| {
                self.tiles
                    .get(id)
                    .is_some_and(|tile| tile.kind.is_frozen())
            })
            .collect();

        for id in thawing {
            let Some(tile) = self.tiles.get_mut(&id) else {
                continue;
            };
            if tile.unfreeze() {
                debug!(tile = id.get(), "tile unfrozen");
                out_events.push(Event::TileUnfrozen { tile: id });
            }
        }
    }

    fn check_swap_limit(&mut self, out_events: &mut Vec<Event>) {
        let Some(limit) = self.swap_limit else {
            return;
        };
        if self.won || self.swap_count < limit {
            return;
        }
        info!(swaps_made = self.swap_count, limit, "out of swaps");
        out_events.push(Event::SwapsExhausted {
            swaps_made: self.swap_count,
            limit,
        });
    }
}
