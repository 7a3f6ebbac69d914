use std::time::Duration;

use redistrict_core::{
    BanishCause, Command, Direction, DistrictId, DistrictLayout, Event, GridPos, LevelLayout,
    LevelSettings, MoveRejection, ObstacleLayout, ObstacleVariant, Party, TileId, TileKind,
    TileLayout, TileVariant, UndoRejection,
};
use redistrict_world::{self as world, query, World};

const STEP: Duration = Duration::from_millis(50);

fn tile(x: i32, y: i32, party: Party, variant: TileVariant) -> TileLayout {
    TileLayout {
        x,
        y,
        party,
        population: None,
        variant,
        swaps: None,
        chain: None,
    }
}

fn level(
    columns: u32,
    rows: u32,
    districts: Vec<(&str, Vec<TileLayout>)>,
    obstacles: Vec<ObstacleLayout>,
) -> LevelLayout {
    LevelLayout {
        name: "Reactions".to_owned(),
        columns,
        rows,
        cell_size: 1.0,
        swap_limit: None,
        districts: districts
            .into_iter()
            .map(|(name, tiles)| DistrictLayout {
                name: name.to_owned(),
                tiles,
            })
            .collect(),
        obstacles,
    }
}

fn load_with_events(layout: LevelLayout) -> (World, Vec<Event>) {
    let mut world = World::new();
    let mut events = Vec::new();
    world::apply(
        &mut world,
        Command::LoadLevel {
            layout,
            settings: LevelSettings::default(),
        },
        &mut events,
    );
    (world, events)
}

fn load(layout: LevelLayout) -> World {
    load_with_events(layout).0
}

fn life_television(x: i32, y: i32) -> ObstacleLayout {
    ObstacleLayout {
        x,
        y,
        kind: ObstacleVariant::Television,
        party: Party::Life,
    }
}

fn chained(x: i32, y: i32, party: Party) -> TileLayout {
    TileLayout {
        chain: Some(2),
        ..tile(x, y, party, TileVariant::Chained)
    }
}

fn issue(world: &mut World, command: Command) -> Vec<Event> {
    let mut events = Vec::new();
    world::apply(world, command, &mut events);
    events
}

fn run_for(world: &mut World, duration: Duration) -> Vec<Event> {
    let mut events = Vec::new();
    let mut elapsed = Duration::ZERO;
    while elapsed < duration {
        world::apply(world, Command::Tick { dt: STEP }, &mut events);
        elapsed += STEP;
    }
    events
}

/// District "Fuse" holds an explosive Death tile that loses its majority once the
/// player tile from "Town" moves in.
fn fuse_level(extra: Option<(&'static str, Vec<TileLayout>)>) -> LevelLayout {
    let mut districts = vec![
        (
            "Fuse",
            vec![
                tile(0, 0, Party::Death, TileVariant::Explosive),
                tile(1, 0, Party::Life, TileVariant::Plain),
                tile(2, 0, Party::Death, TileVariant::Plain),
            ],
        ),
        (
            "Town",
            vec![
                tile(3, 0, Party::Life, TileVariant::Swappable),
                tile(4, 0, Party::Death, TileVariant::Plain),
            ],
        ),
    ];
    districts.extend(extra);
    level(6, 1, districts, Vec::new())
}

#[test]
fn explosive_tile_detonates_when_its_district_loses_the_majority() {
    let mut world = load(fuse_level(None));
    let fuse = DistrictId::new(0);
    let explosive = query::square_by_position(&world, GridPos::new(0, 0))
        .map(|tile| tile.id)
        .expect("explosive tile");

    let _ = issue(
        &mut world,
        Command::SwapAll {
            direction: Direction::Left,
        },
    );
    let events = run_for(&mut world, Duration::from_millis(300));

    assert!(events.contains(&Event::DistrictExploded {
        district: fuse,
        source: explosive,
        tiles: 3,
    }));
    assert!(events.contains(&Event::BoardShaking {
        duration: LevelSettings::default().shake,
    }));
    let banished = events
        .iter()
        .filter(|event| {
            matches!(
                event,
                Event::TileBanished {
                    cause: BanishCause::Exploded,
                    ..
                }
            )
        })
        .count();
    assert_eq!(banished, 3);
    assert_eq!(query::graveyard(&world).len(), 3);
    assert_eq!(query::tile_view(&world).len(), 2);

    let districts = query::district_views(&world);
    assert!(!districts[0].active);
    assert!(districts[0].members.is_empty());

    assert!(
        events.contains(&Event::LevelWon { swaps_made: 1 }),
        "the remaining district holds a majority"
    );
    assert!(query::board_status(&world).won);
    assert!(!query::board_status(&world).playable);
}

#[test]
fn moves_are_rejected_while_the_board_shakes() {
    let mut world = load(fuse_level(Some((
        "Farm",
        vec![tile(5, 0, Party::Life, TileVariant::Plain)],
    ))));
    let _ = issue(
        &mut world,
        Command::SwapAll {
            direction: Direction::Left,
        },
    );
    let _ = run_for(&mut world, Duration::from_millis(250));
    assert!(query::board_status(&world).shaking);

    let events = issue(
        &mut world,
        Command::SwapAll {
            direction: Direction::Right,
        },
    );
    assert_eq!(
        events,
        vec![Event::MoveRejected {
            direction: Direction::Right,
            reason: MoveRejection::Shaking,
        }]
    );
    assert_eq!(
        issue(&mut world, Command::Undo),
        vec![Event::UndoRejected {
            reason: UndoRejection::Shaking
        }]
    );
}

#[test]
fn undo_after_an_explosion_keeps_banished_tiles_away() {
    let mut world = load(fuse_level(Some((
        "Farm",
        vec![tile(5, 0, Party::Life, TileVariant::Plain)],
    ))));
    let _ = issue(
        &mut world,
        Command::SwapAll {
            direction: Direction::Left,
        },
    );
    let _ = run_for(&mut world, Duration::from_millis(1000));
    assert!(!query::board_status(&world).won);

    let events = issue(&mut world, Command::Undo);
    assert!(events.contains(&Event::MoveUndone {
        restored: 3,
        destroyed: 0
    }));
    assert_eq!(query::tile_view(&world).len(), 3);
    assert_eq!(query::graveyard(&world).len(), 3);
    assert!(!query::district_views(&world)[0].active);
    assert_eq!(query::board_status(&world).swaps_made, 0);
}

#[test]
fn defused_explosives_never_detonate() {
    let mut world = load(fuse_level(None));
    let explosive = query::square_by_position(&world, GridPos::new(0, 0))
        .map(|tile| tile.id)
        .expect("explosive tile");

    let events = issue(
        &mut world,
        Command::ConvertTile {
            tile: explosive,
            party: Party::Life,
        },
    );
    let converted = events
        .iter()
        .find_map(|event| match event {
            Event::TileConverted { to, .. } => Some(*to),
            _ => None,
        })
        .expect("explosive converted");
    let view = query::tile_view(&world);
    assert_eq!(view.get(converted).map(|tile| tile.kind), Some(TileKind::Plain));

    let _ = issue(
        &mut world,
        Command::SwapAll {
            direction: Direction::Left,
        },
    );
    let events = run_for(&mut world, Duration::from_millis(1000));
    assert!(!events
        .iter()
        .any(|event| matches!(event, Event::DistrictExploded { .. })));
}

#[test]
fn television_brainwashes_a_tile_that_moves_next_to_it() {
    let mut world = load(level(
        3,
        2,
        vec![(
            "Town",
            vec![
                tile(0, 0, Party::Death, TileVariant::Swappable),
                tile(1, 0, Party::Life, TileVariant::Plain),
                tile(2, 0, Party::Life, TileVariant::Plain),
                tile(0, 1, Party::Death, TileVariant::Plain),
                tile(1, 1, Party::Life, TileVariant::Plain),
            ],
        )],
        vec![life_television(2, 1)],
    ));
    assert_eq!(query::obstacles(&world).len(), 1);
    assert_eq!(query::graveyard(&world).len(), 0, "every neighbour starts loyal");

    let _ = issue(
        &mut world,
        Command::SwapAll {
            direction: Direction::Right,
        },
    );
    let events = run_for(&mut world, Duration::from_millis(300));

    let brainwashed = events
        .iter()
        .filter(|event| matches!(event, Event::TileBrainwashed { .. }))
        .count();
    assert_eq!(brainwashed, 1);

    let player = query::square_by_position(&world, GridPos::new(1, 0)).expect("player tile");
    assert_eq!(player.party, Party::Life);
    assert_eq!(player.kind.variant(), TileVariant::Swappable);
    let far = query::square_by_position(&world, GridPos::new(0, 1)).expect("far tile");
    assert_eq!(far.party, Party::Death, "only neighbours are brainwashed");

    let events = issue(&mut world, Command::Undo);
    assert!(
        events.contains(&Event::MoveUndone {
            restored: 4,
            destroyed: 1
        }),
        "the converted copy is destroyed and its original stays banished"
    );
}

#[test]
fn television_brainwashes_its_neighbours_when_the_level_loads() {
    let (mut world, events) = load_with_events(level(
        3,
        1,
        vec![(
            "Town",
            vec![
                tile(0, 0, Party::Death, TileVariant::Plain),
                tile(2, 0, Party::Life, TileVariant::Plain),
            ],
        )],
        vec![life_television(1, 0)],
    ));
    assert!(events.contains(&Event::TileBrainwashed {
        obstacle: GridPos::new(1, 0),
        tile: TileId::new(0),
    }));

    let _ = run_for(&mut world, Duration::from_millis(500));
    let neighbour = query::square_by_position(&world, GridPos::new(0, 0)).expect("neighbour");
    assert_eq!(neighbour.party, Party::Life);
    assert_eq!(query::graveyard(&world).len(), 1);
    assert_eq!(query::board_status(&world).swaps_made, 0);

    let events = issue(&mut world, Command::Reset);
    assert!(
        events
            .iter()
            .any(|event| matches!(event, Event::TileBrainwashed { .. })),
        "a reset board is brainwashed again"
    );
    let neighbour = query::square_by_position(&world, GridPos::new(0, 0)).expect("neighbour");
    assert_eq!(neighbour.party, Party::Life);
}

#[test]
fn television_leaves_chained_tiles_of_its_own_party_alone() {
    let (world, events) = load_with_events(level(
        3,
        1,
        vec![(
            "Chain",
            vec![chained(0, 0, Party::Life), chained(2, 0, Party::Death)],
        )],
        vec![life_television(1, 0)],
    ));

    let brainwashed: Vec<TileId> = events
        .iter()
        .filter_map(|event| match event {
            Event::TileBrainwashed { tile, .. } => Some(*tile),
            _ => None,
        })
        .collect();
    assert_eq!(brainwashed, vec![TileId::new(1)]);

    let loyal = query::square_by_position(&world, GridPos::new(0, 0)).expect("loyal tile");
    assert_eq!(loyal.id, TileId::new(0));
    assert_eq!(loyal.party, Party::Neutral);
    assert_eq!(loyal.underlying_party, Party::Life);

    let converted = query::square_by_position(&world, GridPos::new(2, 0)).expect("converted");
    assert_eq!(converted.party, Party::Neutral, "the chain still hides the party");
    assert_eq!(converted.underlying_party, Party::Life);
    assert_eq!(converted.kind, TileKind::Chained { remaining: 2 });
}

#[test]
fn explosive_without_a_majority_detonates_when_the_level_loads() {
    let (mut world, events) = load_with_events(level(
        3,
        1,
        vec![(
            "Fuse",
            vec![
                tile(0, 0, Party::Death, TileVariant::Explosive),
                tile(1, 0, Party::Life, TileVariant::Plain),
                tile(2, 0, Party::Life, TileVariant::Plain),
            ],
        )],
        Vec::new(),
    ));
    assert!(events.contains(&Event::DistrictExploded {
        district: DistrictId::new(0),
        source: TileId::new(0),
        tiles: 3,
    }));

    let _ = run_for(&mut world, Duration::from_millis(500));
    assert!(query::tile_view(&world).is_empty());
    assert!(!query::district_views(&world)[0].active);
    assert!(!query::board_status(&world).won);
}

#[test]
fn frozen_tile_thaws_at_absolute_majority_and_stays_thawed() {
    let mut world = load(level(
        5,
        1,
        vec![
            (
                "Ice",
                vec![
                    tile(0, 0, Party::Death, TileVariant::Frozen),
                    tile(1, 0, Party::Death, TileVariant::Plain),
                    tile(2, 0, Party::Life, TileVariant::Plain),
                ],
            ),
            (
                "Shore",
                vec![
                    tile(3, 0, Party::Death, TileVariant::Swappable),
                    tile(4, 0, Party::Life, TileVariant::Plain),
                ],
            ),
        ],
        Vec::new(),
    ));
    let frozen = query::square_by_position(&world, GridPos::new(0, 0))
        .map(|tile| tile.id)
        .expect("frozen tile");

    let _ = issue(
        &mut world,
        Command::SwapAll {
            direction: Direction::Left,
        },
    );
    let events = run_for(&mut world, Duration::from_millis(300));
    assert!(events.contains(&Event::TileUnfrozen { tile: frozen }));
    let districts = query::district_views(&world);
    assert!(districts[0].absolute_majority);

    let _ = issue(
        &mut world,
        Command::SwapAll {
            direction: Direction::Right,
        },
    );
    let events = run_for(&mut world, Duration::from_millis(300));
    assert!(!query::district_views(&world)[0].absolute_majority);
    assert!(!events
        .iter()
        .any(|event| matches!(event, Event::TileUnfrozen { .. })));
    assert_eq!(
        query::tile_view(&world).get(frozen).map(|tile| tile.kind),
        Some(TileKind::Frozen { frozen: false })
    );
}

#[test]
fn exactly_half_never_locks_a_district() {
    let mut world = load(level(
        3,
        1,
        vec![
            (
                "West",
                vec![
                    tile(0, 0, Party::Life, TileVariant::Swappable),
                    tile(1, 0, Party::Death, TileVariant::Plain),
                ],
            ),
            ("East", vec![tile(2, 0, Party::Life, TileVariant::Plain)]),
        ],
        Vec::new(),
    ));
    assert!(query::tile_view(&world).iter().all(|tile| !tile.locked));

    let _ = issue(
        &mut world,
        Command::SwapAll {
            direction: Direction::Right,
        },
    );
    let events = run_for(&mut world, Duration::from_millis(300));
    assert!(!events
        .iter()
        .any(|event| matches!(event, Event::TileLocked { .. })));

    let west = query::district_views(&world).remove(0);
    assert!(!west.majority, "exactly half is not a majority");
}

#[test]
fn winning_ends_the_level_and_blocks_further_moves() {
    let mut world = load(level(
        6,
        1,
        vec![
            (
                "West",
                vec![
                    tile(0, 0, Party::Death, TileVariant::Plain),
                    tile(1, 0, Party::Life, TileVariant::Plain),
                ],
            ),
            (
                "Centre",
                vec![
                    tile(2, 0, Party::Death, TileVariant::Swappable),
                    tile(3, 0, Party::Death, TileVariant::Plain),
                    tile(4, 0, Party::Death, TileVariant::Plain),
                ],
            ),
            ("East", vec![tile(5, 0, Party::Life, TileVariant::Plain)]),
        ],
        Vec::new(),
    ));
    assert!(!query::board_status(&world).won);
    let anchor = query::square_by_position(&world, GridPos::new(0, 0))
        .map(|tile| tile.id)
        .expect("anchor tile");

    let _ = issue(
        &mut world,
        Command::SwapAll {
            direction: Direction::Left,
        },
    );
    let events = run_for(&mut world, Duration::from_millis(300));
    assert!(events.contains(&Event::TileLocked { tile: anchor }));
    assert!(events.contains(&Event::WinStateChanged { won: true }));
    assert!(events.contains(&Event::LevelWon { swaps_made: 1 }));
    assert!(events.contains(&Event::PlayableChanged { playable: false }));

    let majorities: Vec<bool> = query::district_views(&world)
        .iter()
        .map(|district| district.majority)
        .collect();
    assert_eq!(majorities, vec![true, true, false]);

    assert_eq!(
        issue(
            &mut world,
            Command::SwapAll {
                direction: Direction::Left
            }
        ),
        vec![Event::MoveRejected {
            direction: Direction::Left,
            reason: MoveRejection::LevelWon,
        }]
    );
    assert_eq!(
        issue(&mut world, Command::Undo),
        vec![Event::UndoRejected {
            reason: UndoRejection::LevelWon
        }]
    );
}
