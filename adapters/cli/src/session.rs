//! Frame loop wiring the world to the systems.

use std::{mem, time::Duration};

use anyhow::{bail, Result};
use redistrict_core::{Command, Event, LevelLayout, LevelSettings};
use redistrict_presentation::{dispatch, AudioSink, Presenter, Scene};
use redistrict_system_auto_reset::AutoReset;
use redistrict_system_controls::{ControlInput, Controls};
use redistrict_system_progress::Progress;
use redistrict_system_undecided::Undecided;
use redistrict_world::{self as world, query, World};
use tracing::{debug, warn};

/// Simulated time that passes each frame.
pub(crate) const FRAME: Duration = Duration::from_millis(50);

/// Frames allowed for the board to come to rest before giving up.
const MAX_SETTLE_FRAMES: usize = 400;

/// A loaded level driven frame by frame.
pub(crate) struct Session {
    world: World,
    controls: Controls,
    undecided: Undecided,
    auto_reset: AutoReset,
    progress: Progress,
    pending: Vec<Command>,
    last_events: Vec<Event>,
}

impl Session {
    /// Loads `layout` into a fresh world using the player's settings.
    pub(crate) fn start(layout: LevelLayout, progress: Progress) -> Result<Self> {
        let settings: LevelSettings = progress.level_settings();
        let mut world = World::new();
        let mut events = Vec::new();
        world::apply(&mut world, Command::LoadLevel { layout, settings }, &mut events);

        if let Some(Event::LevelRejected { reason }) = events
            .iter()
            .find(|event| matches!(event, Event::LevelRejected { .. }))
        {
            bail!("level rejected: {reason}");
        }

        Ok(Self {
            world,
            controls: Controls::new(),
            undecided: Undecided::new(),
            auto_reset: AutoReset::default(),
            progress,
            pending: Vec::new(),
            last_events: events,
        })
    }

    /// Read access to the simulated world.
    pub(crate) fn world(&self) -> &World {
        &self.world
    }

    /// Player progress as updated by this session.
    pub(crate) fn progress(&self) -> &Progress {
        &self.progress
    }

    /// Mutable player progress, used to persist it.
    pub(crate) fn progress_mut(&mut self) -> &mut Progress {
        &mut self.progress
    }

    /// Scene describing the current board.
    pub(crate) fn scene(&self) -> Scene {
        let cell_size = query::level(&self.world).map_or(1.0, |level| level.cell_size);
        Scene::from_views(
            cell_size,
            &query::tile_view(&self.world),
            &query::district_views(&self.world),
            query::obstacles(&self.world),
            query::board_status(&self.world),
        )
    }

    /// Runs a single frame with the provided input and returns its events.
    pub(crate) fn frame(&mut self, input: ControlInput) -> Vec<Event> {
        let mut commands = mem::take(&mut self.pending);
        self.controls
            .handle(&self.last_events, input, &mut commands);
        commands.push(Command::Tick { dt: FRAME });

        let mut events = Vec::new();
        for command in commands {
            world::apply(&mut self.world, command, &mut events);
        }

        self.undecided.handle(
            &events,
            &query::tile_view(&self.world),
            &mut self.pending,
        );
        self.auto_reset.handle(&events, &mut self.pending);
        self.progress.handle(&events);

        for event in &events {
            match event {
                Event::MoveRejected { direction, reason } => {
                    debug!(?direction, ?reason, "move_rejected");
                }
                Event::UndoRejected { reason } => debug!(?reason, "undo_rejected"),
                Event::ResetRejected { reason } => debug!(?reason, "reset_rejected"),
                _ => {}
            }
        }

        self.last_events.clone_from(&events);
        events
    }

    /// Whether the board is at rest with no follow-up commands queued.
    pub(crate) fn is_idle(&self) -> bool {
        let status = query::board_status(&self.world);
        !status.in_flight
            && !status.shaking
            && !status.resetting
            && query::queued_direction(&self.world).is_none()
            && self.pending.is_empty()
    }

    /// Plays one step of input, then idles until the board comes to rest.
    pub(crate) fn play<P, A>(
        &mut self,
        input: ControlInput,
        presenter: &mut P,
        audio: &mut A,
    ) -> Result<()>
    where
        P: Presenter + ?Sized,
        A: AudioSink + ?Sized,
    {
        let events = self.frame(input);
        dispatch(&events, presenter, audio)?;
        self.settle(presenter, audio, false)
    }

    /// Idles until the board is at rest; with `drain` also waits out an auto reset.
    pub(crate) fn settle<P, A>(&mut self, presenter: &mut P, audio: &mut A, drain: bool) -> Result<()>
    where
        P: Presenter + ?Sized,
        A: AudioSink + ?Sized,
    {
        for _ in 0..MAX_SETTLE_FRAMES {
            if self.is_idle() && !(drain && self.auto_reset.remaining().is_some()) {
                return Ok(());
            }
            let events = self.frame(ControlInput::default());
            dispatch(&events, presenter, audio)?;
        }
        warn!(frames = MAX_SETTLE_FRAMES, "board_never_settled");
        Ok(())
    }
}
