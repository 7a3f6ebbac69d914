use std::collections::BTreeMap;

use redistrict_core::TileId;

use crate::tile::{TileCapture, TileRecord};

/// State of every active tile immediately before a mass swap resolved.
#[derive(Clone, Debug, Default)]
pub(crate) struct HistoryEntry {
    captures: BTreeMap<TileId, TileCapture>,
}

impl HistoryEntry {
    pub(crate) fn capture<'a>(tiles: impl IntoIterator<Item = &'a TileRecord>) -> Self {
        Self {
            captures: tiles
                .into_iter()
                .map(|tile| (tile.id, tile.capture()))
                .collect(),
        }
    }

    pub(crate) fn get(&self, id: TileId) -> Option<&TileCapture> {
        self.captures.get(&id)
    }

    pub(crate) fn contains(&self, id: TileId) -> bool {
        self.captures.contains_key(&id)
    }
}

/// Undo stack with one entry per mass swap that moved something.
#[derive(Clone, Debug, Default)]
pub(crate) struct History {
    entries: Vec<HistoryEntry>,
}

impl History {
    pub(crate) fn push(&mut self, entry: HistoryEntry) {
        self.entries.push(entry);
    }

    pub(crate) fn pop(&mut self) -> Option<HistoryEntry> {
        self.entries.pop()
    }

    /// Drops the newest entry when the move it was captured for did nothing.
    pub(crate) fn discard_last(&mut self) {
        let _ = self.entries.pop();
    }

    pub(crate) fn clear(&mut self) {
        self.entries.clear();
    }

    pub(crate) fn depth(&self) -> usize {
        self.entries.len()
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use redistrict_core::{DistrictId, GridPos, Party, Population, TileKind};

    use super::*;

    fn tile(id: u32, x: i32) -> TileRecord {
        TileRecord::new(
            TileId::new(id),
            GridPos::new(x, 0),
            Party::Life,
            Population::default(),
            DistrictId::new(0),
            TileKind::Plain,
        )
    }

    #[test]
    fn entry_captures_every_tile_provided() {
        let tiles = [tile(1, 0), tile(4, 1)];
        let entry = HistoryEntry::capture(&tiles);
        assert!(entry.contains(TileId::new(1)));
        assert!(entry.contains(TileId::new(4)));
        assert!(!entry.contains(TileId::new(2)));
        assert_eq!(
            entry.get(TileId::new(4)).map(|capture| capture.position),
            Some(GridPos::new(1, 0))
        );
    }

    #[test]
    fn discarding_removes_only_the_newest_entry() {
        let mut history = History::default();
        history.push(HistoryEntry::capture(&[tile(1, 0)]));
        history.push(HistoryEntry::capture(&[tile(2, 0)]));
        history.discard_last();
        assert_eq!(history.depth(), 1);
        let remaining = history.pop();
        assert!(remaining.is_some_and(|entry| entry.contains(TileId::new(1))));
        assert!(history.is_empty());
    }
}
