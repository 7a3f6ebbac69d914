use std::time::Duration;

use redistrict_core::{
    Command, DistrictLayout, Event, GridPos, LevelLayout, LevelSettings, Party, TileKind,
    TileLayout, TileVariant,
};
use redistrict_system_undecided::Undecided;
use redistrict_world::{self as world, query, World};

fn tile(x: i32, y: i32, party: Party, variant: TileVariant, population: u32) -> TileLayout {
    TileLayout {
        x,
        y,
        party,
        population: Some(population),
        variant,
        swaps: None,
        chain: None,
    }
}

/// A 3x3 board centred on the origin with an undecided tile in the middle.
fn ring(parties: [Party; 8], variants: [TileVariant; 8]) -> LevelLayout {
    let mut tiles = vec![tile(0, 0, Party::Neutral, TileVariant::Undecided, 7)];
    for (index, position) in GridPos::new(0, 0).surrounding().into_iter().enumerate() {
        tiles.push(tile(
            position.x(),
            position.y(),
            parties[index],
            variants[index],
            1,
        ));
    }

    LevelLayout {
        name: "Ring".to_owned(),
        columns: 3,
        rows: 3,
        cell_size: 1.0,
        swap_limit: None,
        districts: vec![DistrictLayout {
            name: "Only".to_owned(),
            tiles,
        }],
        obstacles: Vec::new(),
    }
}

fn load(layout: LevelLayout) -> World {
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
    world
}

/// Runs one frame: tick the world, let the system react, apply its commands.
fn frame(world: &mut World, undecided: &mut Undecided) -> Vec<Event> {
    let mut events = Vec::new();
    world::apply(
        world,
        Command::Tick {
            dt: Duration::from_millis(16),
        },
        &mut events,
    );

    let mut commands = Vec::new();
    undecided.handle(&events, &query::tile_view(world), &mut commands);
    for command in commands {
        world::apply(world, command, &mut events);
    }
    events
}

#[test]
fn surrounded_by_death_converts_to_death() {
    let mut world = load(ring([Party::Death; 8], [TileVariant::Plain; 8]));
    let mut undecided = Undecided::new();

    let events = frame(&mut world, &mut undecided);
    assert!(events
        .iter()
        .any(|event| matches!(event, Event::TileConverted { party: Party::Death, .. })));

    let center = query::square_by_position(&world, GridPos::new(0, 0)).expect("center tile");
    assert_eq!(center.party, Party::Death);
    assert_eq!(center.kind, TileKind::Plain);
    assert_eq!(center.population.get(), 7);
    assert_eq!(center.position, GridPos::new(0, 0));
}

#[test]
fn surrounded_by_life_converts_to_life() {
    let mut world = load(ring([Party::Life; 8], [TileVariant::Plain; 8]));
    let mut undecided = Undecided::new();

    let _ = frame(&mut world, &mut undecided);

    let center = query::square_by_position(&world, GridPos::new(0, 0)).expect("center tile");
    assert_eq!(center.party, Party::Life);
}

#[test]
fn mixed_neighbours_keep_the_tile_undecided() {
    let mut parties = [Party::Death; 8];
    parties[3] = Party::Life;
    let mut world = load(ring(parties, [TileVariant::Plain; 8]));
    let mut undecided = Undecided::new();

    for _ in 0..5 {
        let events = frame(&mut world, &mut undecided);
        assert!(!events
            .iter()
            .any(|event| matches!(event, Event::TileConverted { .. })));
    }
    let center = query::square_by_position(&world, GridPos::new(0, 0)).expect("center tile");
    assert_eq!(center.kind, TileKind::Undecided);
}

#[test]
fn chained_neighbour_counts_as_neutral() {
    let mut variants = [TileVariant::Plain; 8];
    variants[0] = TileVariant::Chained;
    let mut layout = ring([Party::Death; 8], variants);
    layout.districts[0].tiles[1].chain = Some(2);
    let mut world = load(layout);
    let mut undecided = Undecided::new();

    let events = frame(&mut world, &mut undecided);
    assert!(!events
        .iter()
        .any(|event| matches!(event, Event::TileConverted { .. })));
}

#[test]
fn edge_tiles_never_resolve() {
    let mut layout = ring([Party::Death; 8], [TileVariant::Plain; 8]);
    layout.districts[0].tiles[1].variant = TileVariant::Undecided;
    let mut world = load(layout);
    let mut undecided = Undecided::new();

    let _ = frame(&mut world, &mut undecided);
    let edge = kind_at(&world, GridPos::new(0, 1));
    assert_eq!(edge, TileKind::Undecided, "missing neighbours block conversion");
}

fn kind_at(world: &World, position: GridPos) -> TileKind {
    query::square_by_position(world, position)
        .map(|tile| tile.kind)
        .expect("tile exists")
}

#[test]
fn nothing_happens_without_time_advancing() {
    let world = load(ring([Party::Death; 8], [TileVariant::Plain; 8]));
    let mut undecided = Undecided::new();
    let mut commands = Vec::new();

    undecided.handle(&[], &query::tile_view(&world), &mut commands);

    assert!(commands.is_empty());
}
