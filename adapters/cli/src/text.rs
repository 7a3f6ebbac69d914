//! Plain-text rendering of scenes for terminals.

use std::io::Write;

use anyhow::{Context, Result as AnyResult};
use redistrict_core::{GridPos, Party};
use redistrict_presentation::{AnimationCue, AudioSink, Badge, Presenter, Scene, SoundCue};
use tracing::{debug, info};

const EMPTY_CELL: &str = " . ";

fn party_symbol(party: Party) -> char {
    match party {
        Party::Life => 'L',
        Party::Death => 'D',
        Party::Neutral => 'N',
    }
}

fn badge_symbol(badge: Badge) -> char {
    match badge {
        Badge::None => ' ',
        Badge::Player { .. } => '*',
        Badge::Chain { .. } => '#',
        Badge::Ice => '~',
        Badge::Fuse => '!',
        Badge::Question => '?',
    }
}

/// Renders the board top row first, followed by the district and HUD lines.
///
/// Each cell is three characters wide: the party letter (lowercase when
/// locked), the variant badge and a space. Televisions show as `TV`.
pub(crate) fn render(scene: &Scene) -> String {
    let cells = scene
        .tiles
        .iter()
        .map(|tile| tile.cell)
        .chain(scene.obstacles.iter().map(|obstacle| obstacle.cell));
    let Some((min, max)) = bounds(cells) else {
        return "(empty board)\n".to_owned();
    };

    let mut output = String::new();
    for y in (min.y()..=max.y()).rev() {
        for x in min.x()..=max.x() {
            let cell = GridPos::new(x, y);
            if let Some(tile) = scene.tile_at(cell) {
                let letter = party_symbol(tile.party);
                output.push(if tile.locked {
                    letter.to_ascii_lowercase()
                } else {
                    letter
                });
                output.push(badge_symbol(tile.badge));
                output.push(' ');
            } else if scene.obstacles.iter().any(|obstacle| obstacle.cell == cell) {
                output.push_str("TV ");
            } else {
                output.push_str(EMPTY_CELL);
            }
        }
        output.truncate(output.trim_end_matches(' ').len());
        output.push('\n');
    }

    for district in &scene.districts {
        let state = match (district.active, district.majority) {
            (false, _) => "gone",
            (true, true) => "death majority",
            (true, false) => "contested",
        };
        output.push_str(&format!("{}: {state}\n", district.name));
    }

    let remaining = scene
        .hud
        .remaining_swaps
        .map_or_else(|| "unlimited".to_owned(), |left| left.to_string());
    output.push_str(&format!(
        "swaps: {} (remaining: {remaining}){}\n",
        scene.hud.swaps_made,
        if scene.hud.won { ", won" } else { "" }
    ));
    output
}

fn bounds(cells: impl Iterator<Item = GridPos>) -> Option<(GridPos, GridPos)> {
    cells.fold(None, |acc, cell| {
        Some(match acc {
            None => (cell, cell),
            Some((min, max)) => (
                GridPos::new(min.x().min(cell.x()), min.y().min(cell.y())),
                GridPos::new(max.x().max(cell.x()), max.y().max(cell.y())),
            ),
        })
    })
}

/// Presenter writing rendered scenes to a writer and logging cues.
#[derive(Debug)]
pub(crate) struct TextPresenter<W> {
    out: W,
}

impl<W: Write> TextPresenter<W> {
    /// Creates a presenter that writes to `out`.
    pub(crate) fn new(out: W) -> Self {
        Self { out }
    }
}

impl<W: Write> Presenter for TextPresenter<W> {
    fn present(&mut self, scene: &Scene) -> AnyResult<()> {
        self.out
            .write_all(render(scene).as_bytes())
            .context("failed to write board")?;
        self.out.flush().context("failed to flush board")
    }

    fn animate(&mut self, cue: AnimationCue) -> AnyResult<()> {
        debug!(?cue, "animation");
        Ok(())
    }
}

/// Audio sink that reports cues through the log.
#[derive(Debug, Default)]
pub(crate) struct LogAudio;

impl AudioSink for LogAudio {
    fn play(&mut self, cue: SoundCue) -> AnyResult<()> {
        info!(sound = cue.name(), "sound");
        Ok(())
    }
}
