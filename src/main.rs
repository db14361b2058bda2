//! Snake with sprites: bevy frontend for the `arcade_snake` core.

mod controls;
mod driver;
mod rendering;
mod ui;

use std::path::PathBuf;
use std::str::FromStr;

use anyhow::{Context, Result};
use arcade_snake::game::{Board, Difficulty, GameConfig, GameState};
use arcade_snake::sprite::{FsAssetLoader, load_sprites};
use bevy::{prelude::*, window::WindowResolution};
use bevy_vector_shapes::prelude::*;
use clap::{Parser, ValueEnum};

use controls::ControlsPlugin;
use driver::{DriverPlugin, GameSession};
use rendering::{BACKGROUND_COLOR, BoardLayout, RenderingPlugin};
use ui::UiPlugin;

const WINDOW_MARGIN: f32 = 20.0;

/// Command-line arguments for launching a game.
#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
struct CliArgs {
    /// Board dimensions in cells, as WIDTHxHEIGHT (for example 24x16).
    #[arg(short = 's', long = "size", value_name = "WIDTHxHEIGHT", conflicts_with_all = ["width", "height"])]
    board_size: Option<BoardSizeArg>,
    /// Number of columns when giving explicit dimensions.
    #[arg(long, value_name = "COLUMNS", requires = "height")]
    width: Option<u32>,
    /// Number of rows when giving explicit dimensions.
    #[arg(long, value_name = "ROWS", requires = "width")]
    height: Option<u32>,
    /// How fast the snake starts and how quickly it speeds up.
    #[arg(short, long, value_enum, default_value_t = DifficultyArg::Easy)]
    difficulty: DifficultyArg,
    /// Edge length of one cell in pixels.
    #[arg(long, value_name = "PIXELS", default_value_t = arcade_snake::game::DEFAULT_CELL_SIZE,
          value_parser = clap::value_parser!(u32).range(4..=256))]
    cell_size: u32,
    /// Seed for food placement, for reproducible games.
    #[arg(long)]
    seed: Option<u64>,
    /// Start with cheat mode on (toggle in game with Ctrl+R).
    #[arg(long)]
    cheat: bool,
    /// Directory holding the sprite images. Defaults to the bundled assets.
    #[arg(long, value_name = "DIR")]
    assets: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum DifficultyArg {
    Easy,
    Average,
    Difficult,
}

impl From<DifficultyArg> for Difficulty {
    fn from(arg: DifficultyArg) -> Self {
        match arg {
            DifficultyArg::Easy => Difficulty::Easy,
            DifficultyArg::Average => Difficulty::Average,
            DifficultyArg::Difficult => Difficulty::Difficult,
        }
    }
}

/// Board dimensions parsed from a WIDTHxHEIGHT command-line argument.
#[derive(Clone, Copy, Debug)]
struct BoardSizeArg {
    columns: u32,
    rows: u32,
}

impl FromStr for BoardSizeArg {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let (columns, rows) = value
            .split_once(['x', 'X'])
            .ok_or_else(|| "expected format WIDTHxHEIGHT".to_string())?;

        let columns = columns
            .trim()
            .parse::<u32>()
            .map_err(|error| format!("invalid width: {error}"))?;
        let rows = rows
            .trim()
            .parse::<u32>()
            .map_err(|error| format!("invalid height: {error}"))?;

        if columns == 0 || rows == 0 {
            return Err("board dimensions must be positive".to_string());
        }

        Ok(Self { columns, rows })
    }
}

impl CliArgs {
    fn config(&self) -> GameConfig {
        let defaults = GameConfig::default();
        let board = if let Some(size) = self.board_size {
            Board::new(size.columns, size.rows)
        } else if let (Some(width), Some(height)) = (self.width, self.height) {
            Board::new(width, height)
        } else {
            defaults.board
        };

        GameConfig {
            board,
            cell_size: self.cell_size,
            seed: self.seed,
            cheat: self.cheat,
            ..defaults
        }
        .with_difficulty(self.difficulty.into())
    }
}

fn main() -> Result<()> {
    let args = CliArgs::parse();
    let config = args.config();
    config.validate().context("invalid game configuration")?;

    let loader = match &args.assets {
        Some(dir) => FsAssetLoader::new(dir),
        None => FsAssetLoader::locate(),
    };
    let sprites = load_sprites(&loader, config.cell_size)
        .with_context(|| format!("cannot load sprites from {}", loader.root().display()))?;

    let layout = BoardLayout {
        board: config.board,
        cell_size: config.cell_size as f32,
    };
    let state = GameState::new(config, sprites).context("cannot start the game")?;
    let window = layout.pixel_size() + Vec2::splat(WINDOW_MARGIN);

    App::new()
        .add_plugins((
            DefaultPlugins.set(WindowPlugin {
                primary_window: Some(Window {
                    resolution: WindowResolution::new(window.x as u32, window.y as u32),
                    title: "Snake - Game".to_string(),
                    ..default()
                }),
                ..default()
            }),
            Shape2dPlugin::default(),
        ))
        .insert_resource(ClearColor(BACKGROUND_COLOR))
        .insert_resource(layout)
        .insert_resource(GameSession::new(state))
        .add_plugins((DriverPlugin, ControlsPlugin, RenderingPlugin, UiPlugin))
        .run();

    Ok(())
}
