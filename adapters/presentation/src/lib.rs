#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Shared presentation contracts for Redistrict adapters.

use anyhow::{Context, Result as AnyResult};
use glam::Vec2;
use redistrict_core::{
    BanishCause, BoardStatus, DistrictId, DistrictSnapshot, Event, GridPos, Heading,
    ObstacleKind, ObstacleSnapshot, Party, SwapQuota, TileId, TileKind, TileSnapshot, TileView,
};

/// RGBA color used when presenting frames.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color {
    /// Red channel intensity in the range 0.0..=1.0.
    pub red: f32,
    /// Green channel intensity in the range 0.0..=1.0.
    pub green: f32,
    /// Blue channel intensity in the range 0.0..=1.0.
    pub blue: f32,
    /// Alpha channel intensity in the range 0.0..=1.0.
    pub alpha: f32,
}

impl Color {
    /// Creates an opaque color from byte RGB values.
    #[must_use]
    pub const fn from_rgb_u8(red: u8, green: u8, blue: u8) -> Self {
        Self {
            red: red as f32 / 255.0,
            green: green as f32 / 255.0,
            blue: blue as f32 / 255.0,
            alpha: 1.0,
        }
    }

    /// Returns a new color lightened towards white by the provided amount.
    #[must_use]
    pub fn lighten(self, amount: f32) -> Self {
        let amount = amount.clamp(0.0, 1.0);

        Self {
            red: lighten_channel(self.red, amount),
            green: lighten_channel(self.green, amount),
            blue: lighten_channel(self.blue, amount),
            alpha: self.alpha,
        }
    }

    /// Fill color used for tiles voting for `party`.
    #[must_use]
    pub const fn for_party(party: Party) -> Self {
        match party {
            Party::Life => Self::from_rgb_u8(0x4c, 0xaf, 0x50),
            Party::Death => Self::from_rgb_u8(0x6a, 0x1b, 0x9a),
            Party::Neutral => Self::from_rgb_u8(0x9e, 0x9e, 0x9e),
        }
    }
}

fn lighten_channel(channel: f32, amount: f32) -> f32 {
    channel + (1.0 - channel) * amount
}

/// Which of a tile's eight neighbours belong to the same district.
///
/// Flags are stored in [`Heading::ALL`] order.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Connectors([bool; 8]);

impl Connectors {
    /// Computes the connectors of `tile` against the active tiles in `view`.
    #[must_use]
    pub fn for_tile(tile: &TileSnapshot, view: &TileView) -> Self {
        Self(tile.position.surrounding().map(|position| {
            view.at(position)
                .is_some_and(|neighbour| neighbour.district == tile.district)
        }))
    }

    /// Whether the neighbour toward `heading` shares the district.
    #[must_use]
    pub fn connected(&self, heading: Heading) -> bool {
        Heading::ALL
            .iter()
            .position(|candidate| *candidate == heading)
            .is_some_and(|index| self.0[index])
    }

    /// Number of connected neighbours.
    #[must_use]
    pub fn count(&self) -> usize {
        self.0.iter().filter(|flag| **flag).count()
    }
}

/// Small marker drawn on top of a tile to show its variant.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Badge {
    /// Ordinary tile without decoration.
    None,
    /// Player tile with the swaps it has left, `None` when unlimited.
    Player {
        /// Remaining per-tile swaps.
        swaps_left: Option<u32>,
    },
    /// Chained tile with the swaps needed to break free.
    Chain {
        /// Remaining swaps before unchaining.
        remaining: u32,
    },
    /// Frozen tile that has not thawed yet.
    Ice,
    /// Explosive tile that is still armed.
    Fuse,
    /// Undecided tile waiting on its neighbours.
    Question,
}

impl Badge {
    /// Badge describing the provided tile kind.
    #[must_use]
    pub const fn for_kind(kind: TileKind) -> Self {
        match kind {
            TileKind::Plain => Self::None,
            TileKind::Swappable { quota } => Self::Player {
                swaps_left: match quota {
                    SwapQuota::Unlimited => None,
                    SwapQuota::Limited(left) => Some(left),
                },
            },
            TileKind::Chained { remaining } if remaining > 0 => Self::Chain { remaining },
            TileKind::Frozen { frozen: true } => Self::Ice,
            TileKind::Explosive {
                defused: false,
                exploded: false,
            } => Self::Fuse,
            TileKind::Undecided => Self::Question,
            _ => Self::None,
        }
    }
}

/// Tile as it should appear on screen.
#[derive(Clone, Debug, PartialEq)]
pub struct SceneTile {
    /// Identifier of the tile.
    pub id: TileId,
    /// Grid position of the tile.
    pub cell: GridPos,
    /// Centre of the tile in world units.
    pub world_position: Vec2,
    /// Party the tile currently votes for.
    pub party: Party,
    /// District the tile belongs to.
    pub district: DistrictId,
    /// Whether the tile is locked by a district majority.
    pub locked: bool,
    /// Variant badge drawn over the tile.
    pub badge: Badge,
    /// Whether the tile is sliding toward its position.
    pub in_flight: bool,
    /// District borders to suppress.
    pub connectors: Connectors,
}

/// District summary shown next to the board.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SceneDistrict {
    /// Display name of the district.
    pub name: String,
    /// Whether the district still counts toward the win.
    pub active: bool,
    /// Whether Death holds the population majority.
    pub majority: bool,
}

/// Obstacle drawn on the board.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SceneObstacle {
    /// Grid position of the obstacle.
    pub cell: GridPos,
    /// Centre of the obstacle in world units.
    pub world_position: Vec2,
    /// Party the obstacle broadcasts for.
    pub party: Party,
}

/// Heads-up display values.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Hud {
    /// Mass swaps made since the last reset.
    pub swaps_made: u32,
    /// Mass swaps left before the limit, if any.
    pub remaining_swaps: Option<u32>,
    /// Whether the level is won.
    pub won: bool,
}

/// Scene description built from world queries each frame.
#[derive(Clone, Debug, PartialEq)]
pub struct Scene {
    /// Side length of a cell in world units.
    pub cell_size: f32,
    /// Active tiles in identifier order.
    pub tiles: Vec<SceneTile>,
    /// Districts in identifier order.
    pub districts: Vec<SceneDistrict>,
    /// Obstacles on the board.
    pub obstacles: Vec<SceneObstacle>,
    /// Heads-up display values.
    pub hud: Hud,
}

impl Scene {
    /// Builds a scene from the world's read-only views.
    #[must_use]
    pub fn from_views(
        cell_size: f32,
        tiles: &TileView,
        districts: &[DistrictSnapshot],
        obstacles: &[ObstacleSnapshot],
        status: BoardStatus,
    ) -> Self {
        let tiles = tiles
            .iter()
            .map(|tile| SceneTile {
                id: tile.id,
                cell: tile.position,
                world_position: world_position(tile.position, cell_size),
                party: tile.party,
                district: tile.district,
                locked: tile.locked,
                badge: Badge::for_kind(tile.kind),
                in_flight: tile.in_flight,
                connectors: Connectors::for_tile(tile, tiles),
            })
            .collect();

        let districts = districts
            .iter()
            .map(|district| SceneDistrict {
                name: district.name.clone(),
                active: district.active,
                majority: district.majority,
            })
            .collect();

        let obstacles = obstacles
            .iter()
            .map(|obstacle| {
                let ObstacleKind::Television { party } = obstacle.kind;
                SceneObstacle {
                    cell: obstacle.position,
                    world_position: world_position(obstacle.position, cell_size),
                    party,
                }
            })
            .collect();

        Self {
            cell_size,
            tiles,
            districts,
            obstacles,
            hud: Hud {
                swaps_made: status.swaps_made,
                remaining_swaps: status.remaining_swaps,
                won: status.won,
            },
        }
    }

    /// Tile drawn at the provided cell, if any.
    #[must_use]
    pub fn tile_at(&self, cell: GridPos) -> Option<&SceneTile> {
        self.tiles.iter().find(|tile| tile.cell == cell)
    }
}

/// Converts a grid position into world units.
#[must_use]
pub fn world_position(cell: GridPos, cell_size: f32) -> Vec2 {
    Vec2::new(cell.x() as f32, cell.y() as f32) * cell_size
}

/// Named sound effects triggered by board events.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SoundCue {
    /// Tiles swapped.
    Swap,
    /// A district exploded.
    Explode,
    /// A tile changed party.
    Convert,
    /// A move was undone.
    Undo,
    /// The swap limit was reached.
    OutSwaps,
    /// A chain broke or was restored.
    Chain,
    /// The board was reset.
    Reset,
    /// The level was won.
    Win,
}

impl SoundCue {
    /// Asset name used by audio backends.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Swap => "Swap",
            Self::Explode => "Explode",
            Self::Convert => "Convert",
            Self::Undo => "Undo",
            Self::OutSwaps => "OutSwaps",
            Self::Chain => "Chain",
            Self::Reset => "Reset",
            Self::Win => "Win",
        }
    }
}

/// Positioned one-shot animations triggered by board events.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AnimationCue {
    /// Explosion played over a banished tile.
    Explode {
        /// Cell the tile occupied.
        at: GridPos,
    },
    /// Broadcast played over a television converting its neighbours.
    Brainwash {
        /// Cell of the obstacle.
        at: GridPos,
    },
}

/// Sound effect associated with an event, if any.
#[must_use]
pub fn sound_cue(event: &Event) -> Option<SoundCue> {
    match event {
        Event::MassSwapResolved { .. } => Some(SoundCue::Swap),
        Event::DistrictExploded { .. } => Some(SoundCue::Explode),
        Event::TileConverted { .. } => Some(SoundCue::Convert),
        Event::MoveUndone { .. } => Some(SoundCue::Undo),
        Event::SwapsExhausted { .. } => Some(SoundCue::OutSwaps),
        Event::TileUnchained { .. } | Event::TileChained { .. } => Some(SoundCue::Chain),
        Event::BoardReset { .. } => Some(SoundCue::Reset),
        Event::LevelWon { .. } => Some(SoundCue::Win),
        _ => None,
    }
}

/// Animation associated with an event, if any.
#[must_use]
pub fn animation_cue(event: &Event) -> Option<AnimationCue> {
    match event {
        Event::TileBanished {
            position,
            cause: BanishCause::Exploded,
            ..
        } => Some(AnimationCue::Explode { at: *position }),
        Event::TileBrainwashed { obstacle, .. } => Some(AnimationCue::Brainwash { at: *obstacle }),
        _ => None,
    }
}

/// Backend that draws scenes and plays animations.
pub trait Presenter {
    /// Draws the provided scene.
    fn present(&mut self, scene: &Scene) -> AnyResult<()>;

    /// Starts a one-shot animation.
    fn animate(&mut self, cue: AnimationCue) -> AnyResult<()>;
}

/// Backend that plays sound effects.
pub trait AudioSink {
    /// Plays the provided sound effect.
    fn play(&mut self, cue: SoundCue) -> AnyResult<()>;
}

/// Forwards the cues produced by a frame's events to the backends.
///
/// Sounds play once per frame each; a television converting several
/// neighbours animates once.
pub fn dispatch<P, A>(events: &[Event], presenter: &mut P, audio: &mut A) -> AnyResult<()>
where
    P: Presenter + ?Sized,
    A: AudioSink + ?Sized,
{
    let mut sounds: Vec<SoundCue> = Vec::new();
    for cue in events.iter().filter_map(sound_cue) {
        if !sounds.contains(&cue) {
            sounds.push(cue);
        }
    }
    for cue in sounds {
        audio
            .play(cue)
            .with_context(|| format!("failed to play sound {}", cue.name()))?;
    }

    let mut animations: Vec<AnimationCue> = events.iter().filter_map(animation_cue).collect();
    animations.dedup();
    for cue in animations {
        presenter
            .animate(cue)
            .with_context(|| format!("failed to start animation {cue:?}"))?;
    }
    Ok(())
}
