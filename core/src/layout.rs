//! Static level descriptions consumed when a board is loaded.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{GridPos, ObstacleKind, Party, Population, SwapQuota, TileKind, TileVariant};

/// Complete description of a level's starting board.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LevelLayout {
    /// Display name of the level.
    pub name: String,
    /// Width of the board measured in tiles.
    pub columns: u32,
    /// Height of the board measured in tiles.
    pub rows: u32,
    /// Side length of a tile expressed in world units.
    #[serde(default = "default_cell_size")]
    pub cell_size: f32,
    /// Maximum number of mass swaps, or `None` to disable the limit. Level files
    /// may also write `-1` or leave the field out to disable it.
    #[serde(default, with = "unlimited")]
    pub swap_limit: Option<u32>,
    /// Districts and their starting members.
    pub districts: Vec<DistrictLayout>,
    /// Fixtures placed between tiles.
    #[serde(default)]
    pub obstacles: Vec<ObstacleLayout>,
}

fn default_cell_size() -> f32 {
    1.0
}

/// Optional limits where `-1` is the authored spelling of "no limit".
mod unlimited {
    use serde::{de, Deserialize, Deserializer, Serialize, Serializer};

    const UNLIMITED: i64 = -1;

    pub(super) fn serialize<S: Serializer>(
        limit: &Option<u32>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        limit.map(i64::from).serialize(serializer)
    }

    pub(super) fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<u32>, D::Error> {
        match Option::<i64>::deserialize(deserializer)? {
            None | Some(UNLIMITED) => Ok(None),
            Some(value) => u32::try_from(value).map(Some).map_err(|_| {
                de::Error::invalid_value(
                    de::Unexpected::Signed(value),
                    &"-1 or a non-negative 32-bit limit",
                )
            }),
        }
    }
}

/// Starting description of a single district.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DistrictLayout {
    /// Display name of the district.
    pub name: String,
    /// Tiles that start inside the district.
    #[serde(default)]
    pub tiles: Vec<TileLayout>,
}

/// Starting description of a single tile.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TileLayout {
    /// Starting column.
    pub x: i32,
    /// Starting row.
    pub y: i32,
    /// Party the tile represents; ignored for undecided tiles.
    pub party: Party,
    /// Voters represented by the tile; zero is clamped to one.
    #[serde(default)]
    pub population: Option<u32>,
    /// Behaviour variant.
    #[serde(default)]
    pub variant: TileVariant,
    /// Individual swap quota for swappable tiles; `None` means unlimited. Level
    /// files may also write `-1` or leave the field out.
    #[serde(default, with = "unlimited")]
    pub swaps: Option<u32>,
    /// Swaps required before a chained tile breaks free.
    #[serde(default)]
    pub chain: Option<u32>,
}

impl TileLayout {
    /// Starting grid position.
    #[must_use]
    pub const fn position(&self) -> GridPos {
        GridPos::new(self.x, self.y)
    }

    /// Starting population after clamping.
    #[must_use]
    pub fn population(&self) -> Population {
        Population::new(self.population.unwrap_or(1))
    }

    /// Starting party; undecided tiles always start neutral.
    #[must_use]
    pub fn party(&self) -> Party {
        match self.variant {
            TileVariant::Undecided => Party::Neutral,
            _ => self.party,
        }
    }

    /// Variant together with its starting sub-state.
    #[must_use]
    pub fn kind(&self) -> TileKind {
        match self.variant {
            TileVariant::Plain => TileKind::Plain,
            TileVariant::Swappable => TileKind::Swappable {
                quota: SwapQuota::from_limit(self.swaps),
            },
            TileVariant::Chained => TileKind::Chained {
                remaining: self.chain.unwrap_or(0),
            },
            TileVariant::Frozen => TileKind::Frozen { frozen: true },
            TileVariant::Explosive => TileKind::Explosive {
                defused: false,
                exploded: false,
            },
            TileVariant::Undecided => TileKind::Undecided,
        }
    }
}

/// Obstacle variants as authored in level files.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ObstacleVariant {
    /// See [`ObstacleKind::Television`].
    Television,
}

/// Starting description of an obstacle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObstacleLayout {
    /// Column of the obstacle.
    pub x: i32,
    /// Row of the obstacle.
    pub y: i32,
    /// Behaviour of the obstacle.
    pub kind: ObstacleVariant,
    /// Party the obstacle works for.
    pub party: Party,
}

impl ObstacleLayout {
    /// Grid position of the obstacle.
    #[must_use]
    pub const fn position(&self) -> GridPos {
        GridPos::new(self.x, self.y)
    }

    /// Behaviour of the obstacle with its configuration.
    #[must_use]
    pub const fn obstacle_kind(&self) -> ObstacleKind {
        match self.kind {
            ObstacleVariant::Television => ObstacleKind::Television { party: self.party },
        }
    }
}

/// Reasons a level description may be rejected.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum LayoutError {
    /// The grid has no area.
    #[error("level grid must have positive dimensions (received {columns}x{rows})")]
    EmptyGrid {
        /// Authored column count.
        columns: u32,
        /// Authored row count.
        rows: u32,
    },
    /// The level declares no districts.
    #[error("level declares no districts")]
    NoDistricts,
    /// A district has an empty name.
    #[error("district #{index} has no name")]
    UnnamedDistrict {
        /// Zero-based index of the district in the layout.
        index: usize,
    },
    /// Two tiles share a starting position.
    #[error("more than one tile starts at ({}, {})", .position.x(), .position.y())]
    DuplicateTile {
        /// Contested position.
        position: GridPos,
    },
    /// An obstacle sits on top of a tile.
    #[error("obstacle at ({}, {}) overlaps a tile", .position.x(), .position.y())]
    ObstacleOverlapsTile {
        /// Contested position.
        position: GridPos,
    },
    /// The authored tiles span more cells than the declared grid.
    #[error("tiles span {span_columns}x{span_rows} cells but the grid is {columns}x{rows}")]
    OutOfBounds {
        /// Columns spanned by the authored tiles.
        span_columns: u32,
        /// Rows spanned by the authored tiles.
        span_rows: u32,
        /// Declared column count.
        columns: u32,
        /// Declared row count.
        rows: u32,
    },
}

impl LevelLayout {
    /// Checks the structural rules every playable level must satisfy.
    pub fn validate(&self) -> Result<(), LayoutError> {
        if self.columns == 0 || self.rows == 0 {
            return Err(LayoutError::EmptyGrid {
                columns: self.columns,
                rows: self.rows,
            });
        }
        if self.districts.is_empty() {
            return Err(LayoutError::NoDistricts);
        }

        let mut occupied = BTreeSet::new();
        for (index, district) in self.districts.iter().enumerate() {
            if district.name.trim().is_empty() {
                return Err(LayoutError::UnnamedDistrict { index });
            }
            for tile in &district.tiles {
                if !occupied.insert(tile.position()) {
                    return Err(LayoutError::DuplicateTile {
                        position: tile.position(),
                    });
                }
            }
        }

        for obstacle in &self.obstacles {
            if occupied.contains(&obstacle.position()) {
                return Err(LayoutError::ObstacleOverlapsTile {
                    position: obstacle.position(),
                });
            }
        }

        let (span_columns, span_rows) = span(occupied.iter().copied());
        if span_columns > self.columns || span_rows > self.rows {
            return Err(LayoutError::OutOfBounds {
                span_columns,
                span_rows,
                columns: self.columns,
                rows: self.rows,
            });
        }

        Ok(())
    }

    /// Total number of tiles authored across all districts.
    #[must_use]
    pub fn tile_count(&self) -> usize {
        self.districts
            .iter()
            .map(|district| district.tiles.len())
            .sum()
    }
}

fn span(positions: impl Iterator<Item = GridPos>) -> (u32, u32) {
    let mut bounds: Option<(i32, i32, i32, i32)> = None;
    for position in positions {
        let (x, y) = (position.x(), position.y());
        bounds = Some(match bounds {
            None => (x, x, y, y),
            Some((min_x, max_x, min_y, max_y)) => {
                (min_x.min(x), max_x.max(x), min_y.min(y), max_y.max(y))
            }
        });
    }

    match bounds {
        None => (0, 0),
        Some((min_x, max_x, min_y, max_y)) => (
            max_x.abs_diff(min_x).saturating_add(1),
            max_y.abs_diff(min_y).saturating_add(1),
        ),
    }
}
