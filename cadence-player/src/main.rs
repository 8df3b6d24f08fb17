//! Cadence Player - headless entry point
//!
//! Runs the playlist player against the simulated media surface and a
//! log-backed view, taking commands from stdin (one per line, `help` lists
//! them).

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use cadence_common::config::{resolve_config_path, CONFIG_ENV_VAR};
use cadence_common::events::EventBus;
use cadence_player::command::{PlayerCommand, HELP};
use cadence_player::config::PlayerConfig;
use cadence_player::driver::PlayerDriver;
use cadence_player::host::{ConsoleView, SimulatedMedia};
use cadence_player::playback::{PlayerSnapshot, PlaylistPlayer};
use clap::Parser;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::signal;
use tokio::sync::{mpsc, watch};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Command-line arguments for cadence-player
#[derive(Parser, Debug)]
#[command(name = "cadence-player")]
#[command(about = "Headless playlist player")]
#[command(version)]
struct Args {
    /// Configuration file (TOML)
    #[arg(short, long, env = "CADENCE_CONFIG")]
    config: Option<PathBuf>,

    /// Log level override (trace, debug, info, warn, error)
    #[arg(short, long)]
    log_level: Option<String>,

    /// Initial volume override (0-100)
    #[arg(long, value_parser = clap::value_parser!(u8).range(0..=100))]
    volume: Option<u8>,

    /// Error recovery delay override in milliseconds
    #[arg(long)]
    error_advance_delay_ms: Option<u64>,

    /// Simulated clock tick in milliseconds
    #[arg(long, default_value = "250")]
    tick_ms: u64,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let config_path = resolve_config_path(args.config.as_deref(), CONFIG_ENV_VAR);
    let mut config = PlayerConfig::from_path(config_path.as_deref())
        .context("Failed to load configuration")?;
    if let Some(level) = args.log_level {
        config.logging.level = level;
    }
    if let Some(volume) = args.volume {
        config.initial_volume = volume;
    }
    if let Some(delay) = args.error_advance_delay_ms {
        config.error_advance_delay_ms = delay;
    }

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                format!(
                    "cadence_player={level},cadence_common={level}",
                    level = config.logging.level
                )
                .into()
            }),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    match &config_path {
        Some(path) => info!("Loaded configuration from {}", path.display()),
        None => info!("No configuration file found, using built-in defaults"),
    }

    let playlist = config.playlist().context("Invalid playlist")?;
    info!("Starting Cadence player with {} tracks", playlist.len());

    let (media_tx, media_rx) = mpsc::unbounded_channel();
    let media = SimulatedMedia::new(config.media_catalog(), media_tx);
    let clock = media.spawn_clock(Duration::from_millis(args.tick_ms.max(1)));

    let view = ConsoleView::new(playlist.len());
    let player = PlaylistPlayer::new(playlist, media, view, config.settings(), EventBus::default());

    let (command_tx, command_rx) = mpsc::channel(32);
    let (driver, snapshots) = PlayerDriver::new(player, command_rx, media_rx);

    let input = tokio::spawn(read_commands(command_tx, snapshots));
    println!("{HELP}");

    tokio::select! {
        player = driver.run() => {
            info!("Stopped on track {}", player.current_index() + 1);
        }
        _ = shutdown_signal() => {}
    }

    clock.abort();
    input.abort();
    info!("Shutdown complete");
    Ok(())
}

/// Forward stdin lines to the driver until EOF or `quit`
async fn read_commands(
    commands: mpsc::Sender<PlayerCommand>,
    snapshots: watch::Receiver<PlayerSnapshot>,
) {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        let line = match lines.next_line().await {
            Ok(Some(line)) => line,
            Ok(None) => break,
            Err(e) => {
                warn!("Failed to read stdin: {}", e);
                break;
            }
        };
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        if line.eq_ignore_ascii_case("help") {
            println!("{HELP}");
            continue;
        }

        match line.parse::<PlayerCommand>() {
            Ok(PlayerCommand::Status) => print_status(&snapshots.borrow()),
            Ok(command) => {
                let quit = command == PlayerCommand::Quit;
                if commands.send(command).await.is_err() || quit {
                    return;
                }
            }
            Err(e) => println!("{e}"),
        }
    }

    // EOF: stop the player
    let _ = commands.send(PlayerCommand::Quit).await;
}

fn print_status(snapshot: &PlayerSnapshot) {
    println!("{snapshot}");
    match serde_json::to_string(snapshot) {
        Ok(json) => println!("{json}"),
        Err(e) => warn!("Failed to serialize status: {}", e),
    }
}

/// Graceful shutdown signal handler
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            warn!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                warn!("Failed to install signal handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, shutting down");
        },
        _ = terminate => {
            info!("Received terminate signal, shutting down");
        },
    }
}
