#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Authoritative board state management for Redistrict.
//!
//! The board is only ever mutated through [`apply`]; everything else reads it
//! through the [`query`] module.

mod board;
mod district;
mod history;
mod layout;
mod reactions;
mod swap;
mod tile;

use redistrict_core::{Command, Event, MoveRejection, ResetRejection, UndoRejection};
use tracing::{info, warn};

use crate::board::Board;

/// Static facts about the loaded level.
#[derive(Clone, Debug, PartialEq)]
pub struct LevelInfo {
    /// Display name of the level.
    pub name: String,
    /// Declared number of columns.
    pub columns: u32,
    /// Declared number of rows.
    pub rows: u32,
    /// Side length of a cell in world units.
    pub cell_size: f32,
}

/// Represents the authoritative Redistrict world state.
#[derive(Debug)]
pub struct World {
    board: Option<Board>,
    tick_index: u64,
}

impl World {
    /// Creates an empty world. Nothing is playable until a level is loaded.
    #[must_use]
    pub fn new() -> Self {
        Self {
            board: None,
            tick_index: 0,
        }
    }
}

impl Default for World {
    fn default() -> Self {
        Self::new()
    }
}

/// Applies the provided command to the world, mutating state deterministically.
pub fn apply(world: &mut World, command: Command, out_events: &mut Vec<Event>) {
    match command {
        Command::LoadLevel { layout, settings } => {
            match Board::from_layout(&layout, settings) {
                Ok(mut board) => {
                    info!(
                        level = %layout.name,
                        tiles = board.tiles.len(),
                        districts = board.districts.len(),
                        swap_limit = ?board.swap_limit,
                        "level loaded"
                    );
                    out_events.push(Event::LevelLoaded {
                        name: layout.name.clone(),
                        tiles: u32::try_from(board.tiles.len()).unwrap_or(u32::MAX),
                        districts: u32::try_from(board.districts.len()).unwrap_or(u32::MAX),
                        swap_limit: board.swap_limit,
                    });
                    board.settle_initial_state(out_events);
                    world.board = Some(board);
                }
                Err(reason) => {
                    warn!(level = %layout.name, %reason, "level rejected");
                    out_events.push(Event::LevelRejected { reason });
                }
            }
        }
        Command::Tick { dt } => {
            world.tick_index = world.tick_index.saturating_add(1);
            out_events.push(Event::TimeAdvanced { dt });
            if let Some(board) = world.board.as_mut() {
                board.tick(dt, out_events);
            }
        }
        Command::SwapAll { direction } => match world.board.as_mut() {
            Some(board) => board.swap_all(direction, out_events),
            None => out_events.push(Event::MoveRejected {
                direction,
                reason: MoveRejection::NoLevel,
            }),
        },
        Command::Undo => match world.board.as_mut() {
            Some(board) => board.undo(out_events),
            None => out_events.push(Event::UndoRejected {
                reason: UndoRejection::EmptyHistory,
            }),
        },
        Command::Reset | Command::ForceReset => {
            let forced = matches!(command, Command::ForceReset);
            match world.board.as_mut() {
                Some(board) => board.reset(forced, out_events),
                None => out_events.push(Event::ResetRejected {
                    reason: ResetRejection::NoLevel,
                }),
            }
        }
        Command::ConvertTile { tile, party } => {
            if let Some(board) = world.board.as_mut() {
                board.request_conversion(tile, party, out_events);
            }
        }
        Command::SetPlayable { playable } => {
            if let Some(board) = world.board.as_mut() {
                board.set_playable(playable, out_events);
            }
        }
    }
}

/// Query functions that provide read-only access to the world state.
pub mod query {
    use redistrict_core::{
        BoardStatus, Direction, DistrictSnapshot, GridPos, ObstacleSnapshot, TileId,
        TileSnapshot, TileView,
    };

    use super::{LevelInfo, World};

    /// Number of ticks processed since the world was created.
    #[must_use]
    pub fn tick_index(world: &World) -> u64 {
        world.tick_index
    }

    /// Describes the loaded level, if any.
    #[must_use]
    pub fn level(world: &World) -> Option<LevelInfo> {
        world.board.as_ref().map(|board| LevelInfo {
            name: board.name.clone(),
            columns: board.columns,
            rows: board.rows,
            cell_size: board.cell_size,
        })
    }

    /// Captures a read-only view of every active tile.
    #[must_use]
    pub fn tile_view(world: &World) -> TileView {
        let snapshots = world
            .board
            .iter()
            .flat_map(|board| board.tiles.values())
            .map(|tile| tile.snapshot())
            .collect();
        TileView::from_snapshots(snapshots)
    }

    /// Active tile occupying the provided position.
    #[must_use]
    pub fn square_by_position(world: &World, position: GridPos) -> Option<TileSnapshot> {
        world
            .board
            .as_ref()?
            .square_by_position(position)
            .map(|tile| tile.snapshot())
    }

    /// Active tiles in the 8-neighbourhood of `position`.
    #[must_use]
    pub fn surrounding_tiles(world: &World, position: GridPos) -> Vec<TileSnapshot> {
        world
            .board
            .as_ref()
            .map(|board| {
                board
                    .surrounding_tiles(position)
                    .into_iter()
                    .map(|tile| tile.snapshot())
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Reports whether the tile is on the board rather than banished or destroyed.
    #[must_use]
    pub fn is_active(world: &World, tile: TileId) -> bool {
        world
            .board
            .as_ref()
            .is_some_and(|board| board.tiles.contains_key(&tile))
    }

    /// Banished tiles. Those from the original layout return on reset.
    #[must_use]
    pub fn graveyard(world: &World) -> Vec<TileSnapshot> {
        world
            .board
            .iter()
            .flat_map(|board| board.graveyard.values())
            .map(|tile| tile.snapshot())
            .collect()
    }

    /// Statistics for every district in identifier order.
    #[must_use]
    pub fn district_views(world: &World) -> Vec<DistrictSnapshot> {
        world
            .board
            .iter()
            .flat_map(|board| {
                board
                    .districts
                    .iter()
                    .map(move |district| district.snapshot(&board.tiles))
            })
            .collect()
    }

    /// Obstacles placed on the board.
    #[must_use]
    pub fn obstacles(world: &World) -> &[ObstacleSnapshot] {
        match world.board.as_ref() {
            Some(board) => &board.obstacles,
            None => &[],
        }
    }

    /// Board-wide play state. Defaults when no level is loaded.
    #[must_use]
    pub fn board_status(world: &World) -> BoardStatus {
        world
            .board
            .as_ref()
            .map(|board| board.status())
            .unwrap_or_default()
    }

    /// Mass swaps left before the limit, if a limit is in effect.
    #[must_use]
    pub fn remaining_swaps(world: &World) -> Option<u32> {
        world.board.as_ref()?.remaining_swaps()
    }

    /// Reports whether the swap limit has been reached.
    #[must_use]
    pub fn too_many_swaps(world: &World) -> bool {
        world
            .board
            .as_ref()
            .is_some_and(|board| board.too_many_swaps())
    }

    /// Move waiting for the current transitions to settle.
    #[must_use]
    pub fn queued_direction(world: &World) -> Option<Direction> {
        world.board.as_ref()?.resolver.queued()
    }

    /// Player-controlled tiles that would try to move in `direction` right now.
    #[must_use]
    pub fn eligible_movers(world: &World, direction: Direction) -> Vec<TileId> {
        world
            .board
            .as_ref()
            .map(|board| board.eligible_movers(direction))
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use redistrict_core::{
        Direction, DistrictLayout, GridPos, LayoutError, LevelLayout, LevelSettings, Party,
        TileLayout, TileVariant,
    };

    use super::*;

    fn tile(x: i32, party: Party, variant: TileVariant) -> TileLayout {
        TileLayout {
            x,
            y: 0,
            party,
            population: None,
            variant,
            swaps: None,
            chain: None,
        }
    }

    fn strip() -> LevelLayout {
        LevelLayout {
            name: "Strip".to_owned(),
            columns: 3,
            rows: 1,
            cell_size: 1.0,
            swap_limit: None,
            districts: vec![
                DistrictLayout {
                    name: "West".to_owned(),
                    tiles: vec![tile(0, Party::Death, TileVariant::Swappable)],
                },
                DistrictLayout {
                    name: "East".to_owned(),
                    tiles: vec![
                        tile(1, Party::Life, TileVariant::Plain),
                        tile(2, Party::Life, TileVariant::Plain),
                    ],
                },
            ],
            obstacles: Vec::new(),
        }
    }

    fn loaded(layout: LevelLayout) -> World {
        let mut world = World::new();
        let mut events = Vec::new();
        apply(
            &mut world,
            Command::LoadLevel {
                layout,
                settings: LevelSettings::default(),
            },
            &mut events,
        );
        world
    }

    #[test]
    fn new_world_has_no_level() {
        let world = World::new();
        assert!(query::level(&world).is_none());
        assert!(query::tile_view(&world).is_empty());
        assert_eq!(query::board_status(&world), Default::default());
    }

    #[test]
    fn commands_without_a_level_are_rejected() {
        let mut world = World::new();
        let mut events = Vec::new();
        apply(
            &mut world,
            Command::SwapAll {
                direction: Direction::Up,
            },
            &mut events,
        );
        apply(&mut world, Command::Reset, &mut events);
        assert_eq!(
            events,
            vec![
                Event::MoveRejected {
                    direction: Direction::Up,
                    reason: MoveRejection::NoLevel,
                },
                Event::ResetRejected {
                    reason: ResetRejection::NoLevel,
                },
            ]
        );
    }

    #[test]
    fn loading_reports_tiles_and_districts() {
        let mut world = World::new();
        let mut events = Vec::new();
        apply(
            &mut world,
            Command::LoadLevel {
                layout: strip(),
                settings: LevelSettings::default(),
            },
            &mut events,
        );

        assert_eq!(
            events.first(),
            Some(&Event::LevelLoaded {
                name: "Strip".to_owned(),
                tiles: 3,
                districts: 2,
                swap_limit: None,
            })
        );
        let info = query::level(&world).expect("level loaded");
        assert_eq!(info.columns, 3);
        assert_eq!(query::tile_view(&world).len(), 3);
        assert!(query::board_status(&world).playable);
    }

    #[test]
    fn invalid_level_keeps_previous_board() {
        let mut world = loaded(strip());
        let mut events = Vec::new();
        let mut broken = strip();
        broken.rows = 0;
        apply(
            &mut world,
            Command::LoadLevel {
                layout: broken,
                settings: LevelSettings::default(),
            },
            &mut events,
        );

        assert_eq!(
            events,
            vec![Event::LevelRejected {
                reason: LayoutError::EmptyGrid {
                    columns: 3,
                    rows: 0
                }
            }]
        );
        assert_eq!(query::tile_view(&world).len(), 3);
    }

    #[test]
    fn swap_moves_both_tiles_and_settles_on_a_later_tick() {
        let mut world = loaded(strip());
        let mut events = Vec::new();
        apply(
            &mut world,
            Command::SwapAll {
                direction: Direction::Right,
            },
            &mut events,
        );

        let mover = query::square_by_position(&world, GridPos::new(1, 0)).expect("mover moved");
        assert_eq!(mover.kind.variant(), TileVariant::Swappable);
        assert!(mover.in_flight);
        assert_eq!(query::board_status(&world).swaps_made, 1);
        assert_eq!(query::board_status(&world).history_depth, 1);

        events.clear();
        apply(
            &mut world,
            Command::Tick {
                dt: Duration::from_millis(100),
            },
            &mut events,
        );
        assert!(!events.contains(&Event::SwapsSettled));

        apply(
            &mut world,
            Command::Tick {
                dt: Duration::from_millis(200),
            },
            &mut events,
        );
        assert!(events.contains(&Event::SwapsSettled));
        assert!(!query::board_status(&world).in_flight);
        assert_eq!(query::tick_index(&world), 2);
    }

    #[test]
    fn surrounding_tiles_skip_empty_cells() {
        let world = loaded(strip());
        let around = query::surrounding_tiles(&world, GridPos::new(1, 0));
        assert_eq!(around.len(), 2);
        assert!(query::surrounding_tiles(&world, GridPos::new(5, 5)).is_empty());
    }
}
