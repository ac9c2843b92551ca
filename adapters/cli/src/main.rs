#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter that boots a game of Snake.

use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use clap::Parser;
use snake_core::{GameConfig, WINDOW_TITLE};
use snake_rendering::{Presentation, RenderingBackend, Scene};
use snake_rendering_macroquad::MacroquadBackend;
use snake_system_game_loop::{GameLoop, SessionStats};
use snake_system_pacing::{Config as PacingConfig, Pacing};
use snake_world::{query, World};
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Command-line arguments accepted by the `snake` binary.
#[derive(Debug, Parser)]
#[command(name = "snake", version, about = "Wrap-around Snake on a fixed grid")]
struct Cli {
    /// Simulation ticks per second, overriding the configuration file.
    #[arg(long, value_name = "N")]
    tick_rate: Option<u32>,

    /// Seed for food placement. A random seed is drawn when omitted.
    #[arg(long)]
    seed: Option<u64>,

    /// TOML file with screen, cell, tick rate and palette settings.
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Runs the simulation without opening a window.
    #[arg(long)]
    headless: bool,

    /// Number of ticks to simulate in headless mode.
    #[arg(long, value_name = "N", default_value_t = 1_000, requires = "headless")]
    ticks: u64,

    /// Logs the frame rate once per second.
    #[arg(long)]
    show_fps: bool,
}

/// Entry point for the Snake command-line interface.
fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let cli = Cli::parse();
    let config = load_config(&cli)?;
    let seed = cli.seed.unwrap_or_else(rand::random);
    let game = build_game(&config, seed)?;
    info!(
        seed,
        tick_rate = config.tick_rate,
        columns = query::geometry(game.world()).columns(),
        rows = query::geometry(game.world()).rows(),
        "starting snake"
    );

    if cli.headless {
        let stats = run_headless(game, cli.ticks);
        log_summary(stats);
        return Ok(());
    }

    run_windowed(game, &config, cli.show_fps)
}

fn load_config(cli: &Cli) -> Result<GameConfig> {
    let mut config = match &cli.config {
        Some(path) => read_config(path)?,
        None => GameConfig::default(),
    };
    if let Some(tick_rate) = cli.tick_rate {
        config.tick_rate = tick_rate;
    }

    config.validate().context("invalid game configuration")?;
    Ok(config)
}

fn read_config(path: &Path) -> Result<GameConfig> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("failed to read configuration from {}", path.display()))?;
    toml::from_str(&contents)
        .with_context(|| format!("failed to parse configuration in {}", path.display()))
}

fn build_game(config: &GameConfig, seed: u64) -> Result<GameLoop> {
    let geometry = config.geometry().context("invalid board geometry")?;
    let world = World::new(geometry, seed);
    let pacing = Pacing::new(PacingConfig::new(config.tick_rate));
    Ok(GameLoop::new(world, pacing))
}

fn run_headless(mut game: GameLoop, ticks: u64) -> SessionStats {
    for _ in 0..ticks {
        if game.tick(&[]).is_stop() {
            break;
        }
    }
    game.stats()
}

fn run_windowed(mut game: GameLoop, config: &GameConfig, show_fps: bool) -> Result<()> {
    let geometry = *query::geometry(game.world());
    let mut scene = Scene::new(&config.palette, geometry.cell_size() as f32);
    populate_scene(&mut scene, &game);
    let presentation = Presentation::new(
        WINDOW_TITLE,
        geometry.screen_width(),
        geometry.screen_height(),
        scene,
    );

    MacroquadBackend::new()
        .with_show_fps(show_fps)
        .run(presentation, move |dt, input, scene| {
            let control = game.frame(dt, &input.events);
            if control.is_stop() {
                log_summary(game.stats());
            } else {
                populate_scene(scene, &game);
            }
            control
        })
        .context("rendering backend failed")
}

fn populate_scene(scene: &mut Scene, game: &GameLoop) {
    let world = game.world();
    scene.set_food(query::food_position(world));
    scene.set_snake(query::snake_segments(world));
}

fn log_summary(stats: SessionStats) {
    info!(
        ticks = stats.ticks,
        food_consumed = stats.food_consumed,
        resets = stats.resets,
        best_length = stats.best_length,
        "session finished"
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use snake_core::{Palette, Position};

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("snake").chain(args.iter().copied()))
            .expect("arguments should parse")
    }

    #[test]
    fn defaults_match_the_classic_game() {
        let cli = parse(&[]);
        let config = load_config(&cli).expect("default configuration is valid");

        assert_eq!(config, GameConfig::default());
        assert!(!cli.headless);
        assert_eq!(cli.ticks, 1_000);
    }

    #[test]
    fn tick_rate_flag_overrides_configuration() {
        let cli = parse(&["--tick-rate", "8"]);
        let config = load_config(&cli).expect("valid configuration");
        assert_eq!(config.tick_rate, 8);
    }

    #[test]
    fn zero_tick_rate_is_rejected() {
        let cli = parse(&["--tick-rate", "0"]);
        assert!(load_config(&cli).is_err());
    }

    #[test]
    fn tick_rate_beyond_nanosecond_resolution_is_rejected() {
        let cli = parse(&["--tick-rate", "2000000000"]);
        let error = load_config(&cli).expect_err("rate is too high");
        assert_eq!(
            error.root_cause().to_string(),
            snake_core::ConfigError::TickRateTooHigh {
                tick_rate: 2_000_000_000,
            }
            .to_string()
        );
    }

    #[test]
    fn ticks_require_headless_mode() {
        let result = Cli::try_parse_from(["snake", "--ticks", "5"]);
        assert!(result.is_err());
    }

    #[test]
    fn configuration_file_is_read_and_overridden() {
        let path = std::env::temp_dir().join(format!("snake-cli-test-{}.toml", std::process::id()));
        fs::write(
            &path,
            "screen_width = 200\nscreen_height = 100\ntick_rate = 5\n\n[palette]\nfood = { red = 1, green = 2, blue = 3 }\n",
        )
        .expect("temporary file should be writable");
        let path_arg = path.to_string_lossy().into_owned();

        let cli = parse(&["--config", &path_arg, "--tick-rate", "12"]);
        let config = load_config(&cli);
        let _ = fs::remove_file(&path);
        let config = config.expect("file configuration is valid");

        assert_eq!(config.screen_width, 200);
        assert_eq!(config.screen_height, 100);
        assert_eq!(config.cell_size, 20);
        assert_eq!(config.tick_rate, 12);
        assert_eq!(config.palette.food, snake_core::CellColor::from_rgb(1, 2, 3));
        assert_eq!(config.palette.snake, Palette::default().snake);
    }

    #[test]
    fn missing_configuration_file_is_an_error() {
        let cli = parse(&["--config", "/nonexistent/snake.toml"]);
        assert!(load_config(&cli).is_err());
    }

    #[test]
    fn headless_run_counts_ticks() {
        let game = build_game(&GameConfig::default(), 11).expect("valid game");
        let stats = run_headless(game, 40);
        assert_eq!(stats.ticks, 40);
        assert!(stats.best_length >= 1);
    }

    #[test]
    fn scene_mirrors_world_state() {
        let config = GameConfig::default();
        let game = build_game(&config, 5).expect("valid game");
        let mut scene = Scene::new(&config.palette, 20.0);

        populate_scene(&mut scene, &game);

        let food = query::food_position(game.world());
        assert_eq!(scene.food.origin, snake_rendering::cell_origin(food));
        assert_eq!(
            scene.snake.segments,
            vec![snake_rendering::cell_origin(Position::new(320, 240))]
        );
    }
}
