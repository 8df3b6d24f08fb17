//! Event loop hosting a `PlaylistPlayer`
//!
//! One task owns the player and serializes everything that touches it: user
//! commands, media surface notifications and the error-recovery timer. This
//! is the Rust counterpart of a browser's single-threaded event loop; no
//! player state is shared or locked.

use crate::command::PlayerCommand;
use crate::playback::player::{PlaylistPlayer, ScheduledAdvance};
use crate::playback::state::PlayerSnapshot;
use crate::playback::surface::{MediaEvent, MediaSurface, PlayerView};
use std::pin::Pin;
use tokio::sync::{mpsc, watch};
use tokio::time::Sleep;
use tracing::{debug, info};

/// Armed auto-advance timer
struct PendingAdvance {
    token: u64,
    sleep: Pin<Box<Sleep>>,
}

pub struct PlayerDriver<M, V> {
    player: PlaylistPlayer<M, V>,
    commands: mpsc::Receiver<PlayerCommand>,
    media_events: mpsc::UnboundedReceiver<MediaEvent>,
    snapshot_tx: watch::Sender<PlayerSnapshot>,
    pending: Option<PendingAdvance>,
}

impl<M: MediaSurface, V: PlayerView> PlayerDriver<M, V> {
    /// Wrap a player; the returned receiver always holds the latest snapshot
    pub fn new(
        player: PlaylistPlayer<M, V>,
        commands: mpsc::Receiver<PlayerCommand>,
        media_events: mpsc::UnboundedReceiver<MediaEvent>,
    ) -> (Self, watch::Receiver<PlayerSnapshot>) {
        let (snapshot_tx, snapshot_rx) = watch::channel(player.snapshot());
        let driver = Self {
            player,
            commands,
            media_events,
            snapshot_tx,
            pending: None,
        };
        (driver, snapshot_rx)
    }

    /// Run until `Quit` arrives or every command sender is dropped.
    ///
    /// Returns the player so callers can inspect its final state.
    pub async fn run(mut self) -> PlaylistPlayer<M, V> {
        info!("Player driver started");

        loop {
            tokio::select! {
                command = self.commands.recv() => {
                    match command {
                        Some(PlayerCommand::Quit) | None => break,
                        Some(command) => self.apply(command),
                    }
                }
                Some(event) = self.media_events.recv() => {
                    debug!("Media event: {:?}", event);
                    self.player.handle_media_event(event);
                }
                token = wait_for_advance(&mut self.pending) => {
                    self.pending = None;
                    self.player.fire_scheduled_advance(token);
                }
            }

            self.arm_scheduled_advance();
            self.publish_snapshot();
        }

        info!("Player driver stopped");
        self.player
    }

    fn apply(&mut self, command: PlayerCommand) {
        debug!("Command: {:?}", command);
        let player = &mut self.player;
        match command {
            PlayerCommand::Play => player.play(),
            PlayerCommand::Pause => player.pause(),
            PlayerCommand::Toggle => player.toggle_play_pause(),
            PlayerCommand::Next => player.next(),
            PlayerCommand::Previous => player.previous(),
            PlayerCommand::Select(index) => player.select_track(index),
            PlayerCommand::ToggleRow(index) => player.toggle_track(index),
            PlayerCommand::Seek(fraction) => player.seek_to(fraction),
            PlayerCommand::Click(x) => player.seek_at_pointer(x),
            PlayerCommand::PointerDown(x) => player.begin_seek_drag(x),
            PlayerCommand::PointerMove(x) => player.continue_seek_drag(x),
            PlayerCommand::PointerUp => player.end_seek_drag(),
            PlayerCommand::Volume(level) => player.set_volume(level),
            PlayerCommand::Status => info!("{}", player.snapshot()),
            PlayerCommand::Quit => {}
        }
    }

    fn arm_scheduled_advance(&mut self) {
        if let Some(ScheduledAdvance { token, delay }) = self.player.take_scheduled_advance() {
            debug!("Auto-advance armed for {:?}", delay);
            self.pending = Some(PendingAdvance {
                token,
                sleep: Box::pin(tokio::time::sleep(delay)),
            });
        }
    }

    fn publish_snapshot(&self) {
        let snapshot = self.player.snapshot();
        self.snapshot_tx.send_if_modified(|current| {
            if *current == snapshot {
                false
            } else {
                *current = snapshot;
                true
            }
        });
    }
}

/// Resolves with the token once the armed timer elapses; never resolves
/// while nothing is armed.
async fn wait_for_advance(pending: &mut Option<PendingAdvance>) -> u64 {
    match pending {
        Some(advance) => {
            advance.sleep.as_mut().await;
            advance.token
        }
        None => std::future::pending().await,
    }
}
