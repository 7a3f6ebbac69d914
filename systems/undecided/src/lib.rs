#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Resolves undecided tiles once their whole neighbourhood agrees on a party.

use redistrict_core::{Command, ConvertibleOnSurround, Event, Party, TileSnapshot, TileView};

/// Pure system that converts undecided tiles surrounded by a single party.
#[derive(Debug, Default)]
pub struct Undecided;

impl Undecided {
    /// Creates a new undecided resolution system.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Inspects every undecided tile once per frame in which time advanced.
    ///
    /// Neighbours report the party they currently vote for, so a chained
    /// neighbour counts as neutral and blocks conversion.
    pub fn handle(&mut self, events: &[Event], tiles: &TileView, out: &mut Vec<Command>) {
        if !events
            .iter()
            .any(|event| matches!(event, Event::TimeAdvanced { .. }))
        {
            return;
        }

        for tile in tiles.iter() {
            if let Some(party) = resolve(tile, tiles) {
                out.push(Command::ConvertTile {
                    tile: tile.id,
                    party,
                });
            }
        }
    }
}

fn resolve(tile: &TileSnapshot, tiles: &TileView) -> Option<Party> {
    let neighbours = tile
        .position
        .surrounding()
        .map(|position| tiles.at(position).map(|neighbour| neighbour.party));
    tile.kind.surround_resolution(&neighbours)
}
