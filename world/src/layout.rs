use std::{collections::BTreeMap, time::Duration};

use redistrict_core::{
    DistrictId, LayoutError, LevelLayout, LevelSettings, ObstacleSnapshot, TileId,
};

use crate::{
    board::Board, district::District, history::History, swap::SwapResolver, tile::TileRecord,
};

impl Board {
    /// Builds a fresh board from a validated level description.
    pub(crate) fn from_layout(
        layout: &LevelLayout,
        settings: LevelSettings,
    ) -> Result<Self, LayoutError> {
        layout.validate()?;

        let mut tiles = BTreeMap::new();
        let mut districts = Vec::with_capacity(layout.districts.len());
        let mut next_tile = 0_u32;

        for (index, district_layout) in (0_u32..).zip(&layout.districts) {
            let district_id = DistrictId::new(index);
            districts.push(District::new(district_id, district_layout.name.clone()));

            for tile_layout in &district_layout.tiles {
                let id = TileId::new(next_tile);
                next_tile += 1;
                let record = TileRecord::new(
                    id,
                    tile_layout.position(),
                    tile_layout.party(),
                    tile_layout.population(),
                    district_id,
                    tile_layout.kind(),
                );
                let _ = tiles.insert(id, record);
            }
        }

        let originals = tiles
            .values()
            .map(|tile: &TileRecord| (tile.id, tile.capture()))
            .collect();
        let obstacles = layout
            .obstacles
            .iter()
            .map(|obstacle| ObstacleSnapshot {
                position: obstacle.position(),
                kind: obstacle.obstacle_kind(),
            })
            .collect();

        let mut board = Self {
            name: layout.name.clone(),
            columns: layout.columns,
            rows: layout.rows,
            cell_size: layout.cell_size,
            settings,
            swap_limit: settings.effective_swap_limit(layout.swap_limit),
            tiles,
            graveyard: BTreeMap::new(),
            originals,
            districts,
            obstacles,
            history: History::default(),
            resolver: SwapResolver::default(),
            next_tile,
            swap_count: 0,
            won: false,
            playable: true,
            shake: Duration::ZERO,
            resetting: false,
        };
        board.refresh_membership();
        Ok(board)
    }
}
