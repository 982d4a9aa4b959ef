//! Dōkutsu main entry point.
//!
//! A top-down 2D action game written in Rust using:
//! - **bevy_ecs** for the entity arena and the per-frame schedule
//! - **raylib** for windowing and drawing (feature `window`)
//!
//! # Main Loop
//!
//! 1. Load `config.ini` (defaults on failure) and the game data tables
//! 2. Read the CSV map layers and build the [`Level`]
//! 3. Either open the window and play, or run a fixed number of headless
//!    ticks with an empty input snapshot and report the outcome
//!
//! # Running
//!
//! ```sh
//! cargo run --release --features window
//! cargo run --release -- --headless --ticks 600
//! cargo run -- --dump-data data.json
//! ```

// Do not create console on Windows
#![cfg_attr(target_os = "windows", windows_subsystem = "windows")]

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use log::{error, info, warn};

use dokutsu::components::health::Health;
use dokutsu::components::player::Player;
use dokutsu::game::Level;
use dokutsu::resources::assets::DiskImageLoader;
use dokutsu::resources::gameconfig::GameConfig;
use dokutsu::resources::gamedata::GameData;
use dokutsu::resources::input::InputState;
use dokutsu::resources::tilemap::MapLayers;

/// Dōkutsu, a top-down action game.
#[derive(Parser)]
#[command(version, about)]
struct Cli {
    /// INI configuration file.
    #[arg(long, value_name = "PATH", default_value = "./config.ini")]
    config: PathBuf,

    /// JSON game data (player, monsters, weapons, magic). Built-in tables
    /// are used when absent.
    #[arg(long, value_name = "PATH")]
    data: Option<PathBuf>,

    /// Run without a window.
    #[arg(long)]
    headless: bool,

    /// Frames to simulate in headless mode.
    #[arg(long, default_value_t = 600)]
    ticks: u32,

    /// Write the built-in game data as JSON and exit.
    /// Optionally provide a path (default: prints to stdout).
    #[arg(long, value_name = "PATH")]
    dump_data: Option<Option<PathBuf>>,
}

fn run_headless(mut level: Level, ticks: u32, dt: f32) {
    for frame in 0..ticks {
        level.tick(InputState::default(), dt);
        if level.is_game_over() {
            info!("Player died at frame {}", frame);
            break;
        }
    }
    let world = level.world();
    let player = level.player();
    let health = world.get::<Health>(player).map(|h| h.current).unwrap_or(0);
    let exp = world.get::<Player>(player).map(|p| p.exp).unwrap_or(0);
    info!(
        "Headless run finished: health {}, exp {}, {} enemies left",
        health,
        exp,
        level.enemy_count()
    );
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    // Early-exit: dump the built-in tables (no map/assets needed)
    if let Some(maybe_path) = cli.dump_data {
        let data = GameData::default();
        match maybe_path {
            Some(path) => {
                if let Err(e) = data.save_to_file(&path) {
                    error!("{}", e);
                    return ExitCode::FAILURE;
                }
                println!("Game data written to {}", path.display());
            }
            None => match data.to_json() {
                Ok(json) => println!("{json}"),
                Err(e) => {
                    error!("{}", e);
                    return ExitCode::FAILURE;
                }
            },
        }
        return ExitCode::SUCCESS;
    }

    let mut config = GameConfig::with_path(&cli.config);
    if let Err(e) = config.load_from_file() {
        warn!("{}; using defaults", e);
    }

    let data = match &cli.data {
        Some(path) => match GameData::load_from_file(path) {
            Ok(data) => data,
            Err(e) => {
                error!("{}", e);
                return ExitCode::FAILURE;
            }
        },
        None => GameData::default(),
    };

    let layers = MapLayers::load(&config.map_path());
    let level = match Level::build(&config, data, &layers, &DiskImageLoader) {
        Ok(level) => level,
        Err(e) => {
            error!("Cannot build level: {}", e);
            return ExitCode::FAILURE;
        }
    };

    #[cfg(feature = "window")]
    {
        if !cli.headless {
            dokutsu::frontend::run(&config, level);
            return ExitCode::SUCCESS;
        }
    }
    #[cfg(not(feature = "window"))]
    {
        if !cli.headless {
            info!("Built without the `window` feature; running headless");
        }
    }

    run_headless(level, cli.ticks, config.frame_delta());
    ExitCode::SUCCESS
}
