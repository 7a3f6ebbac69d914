#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the Redistrict board simulation.
//!
//! This crate defines the message surface that connects adapters, the
//! authoritative board, and pure systems. Adapters submit [`Command`] values
//! describing desired mutations, the world executes those commands via its
//! `apply` entry point, and then broadcasts [`Event`] values for systems and
//! presentation collaborators to react to. Systems consume event streams,
//! query immutable views, and respond exclusively with new command batches.

mod layout;

use std::time::Duration;

use serde::{Deserialize, Serialize};

pub use layout::{
    DistrictLayout, LayoutError, LevelLayout, ObstacleLayout, ObstacleVariant, TileLayout,
};

/// Default duration of a single tile transition started by a swap.
pub const DEFAULT_TRANSITION: Duration = Duration::from_millis(250);

/// Default duration of the board shake started by an explosion.
pub const DEFAULT_SHAKE: Duration = Duration::from_millis(500);

/// Political faction represented by a tile.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Party {
    /// The party the player campaigns against.
    Life,
    /// The party the player needs a majority for.
    Death,
    /// Tiles that currently side with nobody.
    Neutral,
}

impl Party {
    /// Returns the rival party; neutral tiles have no rival.
    #[must_use]
    pub const fn opposite(self) -> Self {
        match self {
            Self::Life => Self::Death,
            Self::Death => Self::Life,
            Self::Neutral => Self::Neutral,
        }
    }
}

/// Cardinal directions a mass swap can be issued in.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    /// Movement toward increasing row indices.
    Up,
    /// Movement toward decreasing row indices.
    Down,
    /// Movement toward decreasing column indices.
    Left,
    /// Movement toward increasing column indices.
    Right,
}

impl Direction {
    /// All directions in a stable order.
    pub const ALL: [Direction; 4] = [Self::Up, Self::Down, Self::Left, Self::Right];

    /// Direction pointing the other way.
    #[must_use]
    pub const fn opposite(self) -> Self {
        match self {
            Self::Up => Self::Down,
            Self::Down => Self::Up,
            Self::Left => Self::Right,
            Self::Right => Self::Left,
        }
    }

    /// Column and row delta applied when stepping in this direction.
    #[must_use]
    pub const fn offset(self) -> (i32, i32) {
        match self {
            Self::Up => (0, 1),
            Self::Down => (0, -1),
            Self::Left => (-1, 0),
            Self::Right => (1, 0),
        }
    }
}

/// One of the eight directions surrounding a grid position.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Heading {
    /// Directly above.
    Up,
    /// Above and to the right.
    UpRight,
    /// Directly to the right.
    Right,
    /// Below and to the right.
    DownRight,
    /// Directly below.
    Down,
    /// Below and to the left.
    DownLeft,
    /// Directly to the left.
    Left,
    /// Above and to the left.
    UpLeft,
}

impl Heading {
    /// All headings, clockwise from [`Heading::Up`].
    pub const ALL: [Heading; 8] = [
        Self::Up,
        Self::UpRight,
        Self::Right,
        Self::DownRight,
        Self::Down,
        Self::DownLeft,
        Self::Left,
        Self::UpLeft,
    ];

    /// Column and row delta toward the neighbour in this heading.
    #[must_use]
    pub const fn offset(self) -> (i32, i32) {
        match self {
            Self::Up => (0, 1),
            Self::UpRight => (1, 1),
            Self::Right => (1, 0),
            Self::DownRight => (1, -1),
            Self::Down => (0, -1),
            Self::DownLeft => (-1, -1),
            Self::Left => (-1, 0),
            Self::UpLeft => (-1, 1),
        }
    }
}

/// Location of a tile on the board. Levels are usually authored around the origin.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct GridPos {
    x: i32,
    y: i32,
}

impl GridPos {
    /// Creates a new grid position.
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Column of the position.
    #[must_use]
    pub const fn x(&self) -> i32 {
        self.x
    }

    /// Row of the position.
    #[must_use]
    pub const fn y(&self) -> i32 {
        self.y
    }

    /// Position one step away in the provided direction.
    #[must_use]
    pub const fn step(self, direction: Direction) -> Self {
        let (dx, dy) = direction.offset();
        Self::new(self.x.saturating_add(dx), self.y.saturating_add(dy))
    }

    /// Position of the neighbour in the provided heading.
    #[must_use]
    pub const fn toward(self, heading: Heading) -> Self {
        let (dx, dy) = heading.offset();
        Self::new(self.x.saturating_add(dx), self.y.saturating_add(dy))
    }

    /// The eight surrounding positions in [`Heading::ALL`] order.
    #[must_use]
    pub fn surrounding(self) -> [GridPos; 8] {
        Heading::ALL.map(|heading| self.toward(heading))
    }
}

/// Unique identifier assigned to a tile by the world.
///
/// Identifiers are never reused: a converted tile always receives a new one.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TileId(u32);

impl TileId {
    /// Creates a new tile identifier with the provided numeric value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the identifier.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

/// Unique identifier assigned to a district by the world.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct DistrictId(u32);

impl DistrictId {
    /// Creates a new district identifier with the provided numeric value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the identifier.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

/// Number of voters represented by a tile. Always at least one.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Population(u32);

impl Population {
    /// Creates a population, clamping non-positive values to one.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        if value == 0 {
            Self(1)
        } else {
            Self(value)
        }
    }

    /// Retrieves the underlying head count.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

impl Default for Population {
    fn default() -> Self {
        Self(1)
    }
}

/// Remaining individual swaps a player-controlled tile may take part in.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SwapQuota {
    /// The tile may swap indefinitely.
    Unlimited,
    /// The tile may swap the contained number of additional times.
    Limited(u32),
}

impl SwapQuota {
    /// Builds a quota from an optional authored limit; `None` means unlimited.
    #[must_use]
    pub const fn from_limit(limit: Option<u32>) -> Self {
        match limit {
            Some(remaining) => Self::Limited(remaining),
            None => Self::Unlimited,
        }
    }

    /// Reports whether the quota blocks any further movement.
    #[must_use]
    pub const fn is_exhausted(self) -> bool {
        matches!(self, Self::Limited(0))
    }

    /// Quota left after one more swap.
    #[must_use]
    pub const fn consume(self) -> Self {
        match self {
            Self::Unlimited => Self::Unlimited,
            Self::Limited(remaining) => Self::Limited(remaining.saturating_sub(1)),
        }
    }
}

/// Behaviour variant of a tile together with its variant-specific sub-state.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TileKind {
    /// Static tile that only moves when a player-controlled tile swaps into it.
    Plain,
    /// Player-controlled tile moved by mass swaps.
    Swappable {
        /// Individual swaps left before the tile stops moving.
        quota: SwapQuota,
    },
    /// Tile that reports a neutral party until it has taken part in enough swaps.
    Chained {
        /// Swaps left until the chain breaks; zero means unchained.
        remaining: u32,
    },
    /// Tile that cannot be swapped into while frozen.
    Frozen {
        /// Whether the tile is currently frozen.
        frozen: bool,
    },
    /// Tile that destroys its district when the district loses its majority.
    Explosive {
        /// Set once the tile has been neutralised by a conversion.
        defused: bool,
        /// Set once the tile has detonated.
        exploded: bool,
    },
    /// Tile that adopts the party of a unanimous neighbourhood.
    Undecided,
}

impl TileKind {
    /// Discriminant of the variant without its sub-state.
    #[must_use]
    pub const fn variant(&self) -> TileVariant {
        match self {
            Self::Plain => TileVariant::Plain,
            Self::Swappable { .. } => TileVariant::Swappable,
            Self::Chained { .. } => TileVariant::Chained,
            Self::Frozen { .. } => TileVariant::Frozen,
            Self::Explosive { .. } => TileVariant::Explosive,
            Self::Undecided => TileVariant::Undecided,
        }
    }

    /// Reports whether a chained tile is still chained.
    #[must_use]
    pub const fn is_chained(&self) -> bool {
        matches!(self, Self::Chained { remaining } if *remaining > 0)
    }

    /// Reports whether a frozen tile is still frozen.
    #[must_use]
    pub const fn is_frozen(&self) -> bool {
        matches!(self, Self::Frozen { frozen: true })
    }

    /// Individual swap quota, present only for player-controlled tiles.
    #[must_use]
    pub const fn quota(&self) -> Option<SwapQuota> {
        match self {
            Self::Swappable { quota } => Some(*quota),
            _ => None,
        }
    }
}

/// Tile variants without sub-state, as authored in level files.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TileVariant {
    /// See [`TileKind::Plain`].
    #[default]
    Plain,
    /// See [`TileKind::Swappable`].
    Swappable,
    /// See [`TileKind::Chained`].
    Chained,
    /// See [`TileKind::Frozen`].
    Frozen,
    /// See [`TileKind::Explosive`].
    Explosive,
    /// See [`TileKind::Undecided`].
    Undecided,
}

/// Capability of tiles that change party based on their full neighbourhood.
pub trait ConvertibleOnSurround {
    /// Party the tile should convert to given its eight neighbours in
    /// [`Heading::ALL`] order, or `None` when it should stay as it is.
    ///
    /// A missing neighbour always prevents conversion.
    fn surround_resolution(&self, neighbours: &[Option<Party>; 8]) -> Option<Party>;
}

impl ConvertibleOnSurround for TileKind {
    fn surround_resolution(&self, neighbours: &[Option<Party>; 8]) -> Option<Party> {
        if !matches!(self, Self::Undecided) {
            return None;
        }

        let mut all_death = true;
        let mut all_life = true;
        for neighbour in neighbours {
            let party = (*neighbour)?;
            all_life &= party == Party::Life;
            all_death &= party == Party::Death;
        }

        if all_death {
            Some(Party::Death)
        } else if all_life {
            Some(Party::Life)
        } else {
            None
        }
    }
}

/// Fixture kinds that sit on the board without occupying a tile slot.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ObstacleKind {
    /// Converts every surrounding tile to its party after each settled swap.
    Television {
        /// Party the television broadcasts for.
        party: Party,
    },
}

/// Immutable description of an obstacle placed on the board.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ObstacleSnapshot {
    /// Fixed grid position of the obstacle.
    pub position: GridPos,
    /// Behaviour of the obstacle.
    pub kind: ObstacleKind,
}

/// Tuning knobs supplied alongside a level when it is loaded.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LevelSettings {
    /// Whether the persistence collaborator granted the extra swaps bonus.
    pub extra_swaps: bool,
    /// Duration of the visual transition started by every individual swap.
    pub transition: Duration,
    /// Duration of the board shake started by an explosion.
    pub shake: Duration,
}

impl LevelSettings {
    /// Swap limit in effect once the bonus has been applied.
    ///
    /// The bonus grants half of the authored limit again, rounded up.
    #[must_use]
    pub const fn effective_swap_limit(&self, authored: Option<u32>) -> Option<u32> {
        match authored {
            Some(limit) if self.extra_swaps => Some(limit.saturating_add(limit.div_ceil(2))),
            other => other,
        }
    }
}

impl Default for LevelSettings {
    fn default() -> Self {
        Self {
            extra_swaps: false,
            transition: DEFAULT_TRANSITION,
            shake: DEFAULT_SHAKE,
        }
    }
}

/// Commands that express all permissible board mutations.
#[derive(Clone, Debug, PartialEq)]
pub enum Command {
    /// Replaces the current board with the provided level.
    LoadLevel {
        /// Static description of districts, tiles and obstacles.
        layout: LevelLayout,
        /// Timing and bonus configuration for the session.
        settings: LevelSettings,
    },
    /// Advances the simulation clock by the provided delta time.
    Tick {
        /// Duration of simulated time that elapsed since the previous tick.
        dt: Duration,
    },
    /// Requests a mass swap of every eligible player-controlled tile.
    SwapAll {
        /// Direction every eligible tile attempts to move in.
        direction: Direction,
    },
    /// Requests that the most recent mass swap be reverted.
    Undo,
    /// Requests that the board return to its original layout.
    Reset,
    /// Resets the board even while tiles are moving or the level is won.
    ForceReset,
    /// Replaces a tile with a freshly created tile of the provided party.
    ConvertTile {
        /// Tile to convert.
        tile: TileId,
        /// Party of the replacement tile.
        party: Party,
    },
    /// Enables or disables player input, e.g. while dialogue is showing.
    SetPlayable {
        /// Whether player-issued moves should be accepted.
        playable: bool,
    },
}

/// Reasons a mass swap may be rejected by the world.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MoveRejection {
    /// No level has been loaded.
    NoLevel,
    /// Player input is disabled.
    NotPlayable,
    /// The level has already been won.
    LevelWon,
    /// A reset is still animating.
    Resetting,
    /// An explosion is still shaking the board.
    Shaking,
    /// No tile could move in the requested direction.
    NothingMoved,
}

/// Reasons an undo request may be rejected by the world.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum UndoRejection {
    /// There is no move to undo.
    EmptyHistory,
    /// The level has already been won.
    LevelWon,
    /// A reset is still animating.
    Resetting,
    /// An explosion is still shaking the board.
    Shaking,
    /// At least one tile is still moving.
    InTransition,
}

/// Reasons a reset request may be rejected by the world.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ResetRejection {
    /// No level has been loaded.
    NoLevel,
    /// The level has already been won.
    LevelWon,
    /// At least one tile is still moving.
    InTransition,
}

/// Why a tile left the active set.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BanishCause {
    /// The tile was replaced by a converted copy.
    Converted,
    /// The tile was caught in an explosion.
    Exploded,
}

/// Events broadcast by the world after processing commands.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Event {
    /// Confirms that a level replaced the previous board.
    LevelLoaded {
        /// Display name of the level.
        name: String,
        /// Number of tiles created.
        tiles: u32,
        /// Number of districts created.
        districts: u32,
        /// Swap limit in effect, if any.
        swap_limit: Option<u32>,
    },
    /// Reports that a level description failed validation.
    LevelRejected {
        /// Specific reason the layout was refused.
        reason: LayoutError,
    },
    /// Indicates that the simulation clock advanced.
    TimeAdvanced {
        /// Duration of simulated time that elapsed in the tick.
        dt: Duration,
    },
    /// Announces that player input was enabled or disabled.
    PlayableChanged {
        /// Whether player-issued moves are now accepted.
        playable: bool,
    },
    /// Confirms that a mass swap was deferred until moving tiles settle.
    MoveQueued {
        /// Direction that will be replayed.
        direction: Direction,
    },
    /// Reports that a mass swap was rejected.
    MoveRejected {
        /// Direction of the rejected request.
        direction: Direction,
        /// Specific reason the request failed.
        reason: MoveRejection,
    },
    /// Confirms that two tiles exchanged positions and districts.
    TilesSwapped {
        /// Player-controlled tile that initiated the swap.
        mover: TileId,
        /// Tile that was displaced into the mover's old slot.
        displaced: TileId,
        /// Direction the mover travelled in.
        direction: Direction,
        /// Position the mover occupies after the swap.
        mover_to: GridPos,
        /// Position the displaced tile occupies after the swap.
        displaced_to: GridPos,
    },
    /// Summarises a mass swap that moved at least one tile.
    MassSwapResolved {
        /// Direction of the mass swap.
        direction: Direction,
        /// Number of tile pairs that exchanged positions.
        pairs: u32,
        /// Number of mass swaps made since the last reset.
        swaps_made: u32,
    },
    /// Indicates that every transition finished and post-swap reactions are running.
    SwapsSettled,
    /// Reports that a tile was locked because its district holds a majority.
    TileLocked {
        /// Tile that became locked.
        tile: TileId,
    },
    /// Reports that a tile was unlocked because its district lost its majority.
    TileUnlocked {
        /// Tile that became unlocked.
        tile: TileId,
    },
    /// Reports that an obstacle is about to convert a neighbouring tile.
    TileBrainwashed {
        /// Position of the obstacle responsible.
        obstacle: GridPos,
        /// Tile about to be converted.
        tile: TileId,
    },
    /// Confirms that a tile was replaced by a converted copy.
    TileConverted {
        /// Tile that was banished.
        from: TileId,
        /// Freshly created replacement.
        to: TileId,
        /// Party of the replacement.
        party: Party,
        /// Position shared by both tiles.
        position: GridPos,
    },
    /// Reports that a tile left the active set for the graveyard.
    TileBanished {
        /// Tile that was banished.
        tile: TileId,
        /// Position the tile occupied.
        position: GridPos,
        /// Reason the tile was banished.
        cause: BanishCause,
    },
    /// Reports that a tile was permanently removed from the board.
    TileDestroyed {
        /// Tile that was destroyed.
        tile: TileId,
    },
    /// Reports that a chained tile became chained again after undo or reset.
    TileChained {
        /// Tile that was re-chained.
        tile: TileId,
    },
    /// Reports that a chained tile broke its chain.
    TileUnchained {
        /// Tile that was released.
        tile: TileId,
        /// Party the tile represents from now on.
        party: Party,
    },
    /// Reports that a frozen tile thawed.
    TileUnfrozen {
        /// Tile that thawed.
        tile: TileId,
    },
    /// Reports that an explosive tile destroyed its district.
    DistrictExploded {
        /// District that was disabled.
        district: DistrictId,
        /// Explosive tile that detonated.
        source: TileId,
        /// Number of tiles banished by the explosion.
        tiles: u32,
    },
    /// Reports that the board started shaking.
    BoardShaking {
        /// How long the board rejects moves for.
        duration: Duration,
    },
    /// Reports that the cached win flag changed.
    WinStateChanged {
        /// Whether the level is currently won.
        won: bool,
    },
    /// Announces that the player won the level.
    LevelWon {
        /// Mass swaps the player needed.
        swaps_made: u32,
    },
    /// Reports that the swap limit was reached without winning.
    SwapsExhausted {
        /// Mass swaps made since the last reset.
        swaps_made: u32,
        /// Swap limit in effect.
        limit: u32,
    },
    /// Confirms that the most recent mass swap was reverted.
    MoveUndone {
        /// Tiles whose recorded state was restored.
        restored: u32,
        /// Tiles created after the snapshot that were destroyed.
        destroyed: u32,
    },
    /// Reports that an undo request was rejected.
    UndoRejected {
        /// Specific reason the request failed.
        reason: UndoRejection,
    },
    /// Confirms that the board returned to its original layout.
    BoardReset {
        /// Whether the reset bypassed the usual guards.
        forced: bool,
    },
    /// Reports that a reset request was rejected.
    ResetRejected {
        /// Specific reason the request failed.
        reason: ResetRejection,
    },
}

/// Immutable representation of a single tile's state used for queries.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TileSnapshot {
    /// Unique identifier assigned to the tile.
    pub id: TileId,
    /// Grid position currently occupied by the tile.
    pub position: GridPos,
    /// Party the tile reports, e.g. neutral while chained.
    pub party: Party,
    /// Party stored on the tile regardless of its variant.
    pub underlying_party: Party,
    /// Voters represented by the tile.
    pub population: Population,
    /// District the tile belongs to.
    pub district: DistrictId,
    /// Whether the tile is locked by its district's majority.
    pub locked: bool,
    /// Variant and variant sub-state.
    pub kind: TileKind,
    /// Whether the tile is mid-transition.
    pub in_flight: bool,
}

/// Read-only snapshot describing all active tiles on the board.
#[derive(Clone, Debug, Default)]
pub struct TileView {
    snapshots: Vec<TileSnapshot>,
}

impl TileView {
    /// Creates a new tile view from the provided snapshots.
    #[must_use]
    pub fn from_snapshots(mut snapshots: Vec<TileSnapshot>) -> Self {
        snapshots.sort_by_key(|snapshot| snapshot.id);
        Self { snapshots }
    }

    /// Iterator over the captured tile snapshots in deterministic order.
    pub fn iter(&self) -> impl Iterator<Item = &TileSnapshot> {
        self.snapshots.iter()
    }

    /// Returns the tile occupying the provided position, if any.
    #[must_use]
    pub fn at(&self, position: GridPos) -> Option<&TileSnapshot> {
        self.snapshots
            .iter()
            .find(|snapshot| snapshot.position == position)
    }

    /// Returns the tile with the provided identifier, if active.
    #[must_use]
    pub fn get(&self, id: TileId) -> Option<&TileSnapshot> {
        self.snapshots
            .binary_search_by_key(&id, |snapshot| snapshot.id)
            .ok()
            .and_then(|index| self.snapshots.get(index))
    }

    /// Number of active tiles captured by the view.
    #[must_use]
    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    /// Reports whether the view contains no tiles.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    /// Consumes the view, yielding the underlying snapshots.
    #[must_use]
    pub fn into_vec(self) -> Vec<TileSnapshot> {
        self.snapshots
    }
}

/// Immutable representation of a district's statistics.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DistrictSnapshot {
    /// Identifier allocated to the district by the world.
    pub id: DistrictId,
    /// Display name of the district.
    pub name: String,
    /// Whether the district counts toward the level's win ratio.
    pub active: bool,
    /// Member tiles in deterministic order.
    pub members: Vec<TileId>,
    /// Population represented by Death-party members.
    pub death_population: u32,
    /// Population represented by all members.
    pub total_population: u32,
    /// Whether the population-weighted Death share exceeds one half.
    pub majority: bool,
    /// Whether every member is a Death-party tile.
    pub absolute_majority: bool,
}

/// Summary of the board-wide play state.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct BoardStatus {
    /// Mass swaps made since the last reset.
    pub swaps_made: u32,
    /// Swap limit in effect, if any.
    pub swap_limit: Option<u32>,
    /// Mass swaps left before the limit, if any.
    pub remaining_swaps: Option<u32>,
    /// Whether the level is currently won.
    pub won: bool,
    /// Whether player-issued moves are accepted.
    pub playable: bool,
    /// Whether any tile is mid-transition.
    pub in_flight: bool,
    /// Whether an explosion is still shaking the board.
    pub shaking: bool,
    /// Whether a reset is still animating.
    pub resetting: bool,
    /// Number of mass swaps that can be undone.
    pub history_depth: usize,
}
