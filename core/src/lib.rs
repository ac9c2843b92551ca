#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the Snake engine.
//!
//! This crate defines the message surface that connects adapters, the
//! authoritative world, and pure systems. Adapters translate raw device input
//! into [`InputEvent`] values, systems turn those into [`Command`] values, the
//! world executes commands via its `apply` entry point and then reports what
//! happened through [`Event`] values. Board geometry and the palette live here
//! as well so every crate agrees on the shape of the playing field.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Title shown by windowed adapters.
pub const WINDOW_TITLE: &str = "Snake";

/// Default screen width measured in pixels.
pub const SCREEN_WIDTH: u32 = 640;
/// Default screen height measured in pixels.
pub const SCREEN_HEIGHT: u32 = 480;
/// Default side length of a single grid cell measured in pixels.
pub const CELL_SIZE: u32 = 20;
/// Number of cell columns produced by the default geometry.
pub const GRID_WIDTH: u32 = SCREEN_WIDTH / CELL_SIZE;
/// Number of cell rows produced by the default geometry.
pub const GRID_HEIGHT: u32 = SCREEN_HEIGHT / CELL_SIZE;
/// Default simulation rate measured in ticks per second.
pub const DEFAULT_TICK_RATE: u32 = 20;
/// Fastest tick rate whose interval is still at least one nanosecond.
pub const MAX_TICK_RATE: u32 = 1_000_000_000;

/// Commands that express all permissible world mutations.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Command {
    /// Stores a direction in the snake's pending slot, replacing any earlier
    /// unconsumed request.
    RequestDirection {
        /// Direction the snake should adopt at the next commit.
        direction: Direction,
    },
    /// Promotes the pending direction to the committed direction unless it
    /// would reverse the snake into itself.
    CommitDirection,
    /// Moves the snake one cell and resolves collisions and food consumption.
    Advance,
    /// Commits the pending direction and then advances, in that order.
    Tick,
    /// Moves the food to the provided cell when it is on the board and free.
    PlaceFood {
        /// Top-left pixel coordinate of the requested cell.
        position: Position,
    },
}

/// Events broadcast by the world after processing commands.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Event {
    /// Confirms that the committed direction changed.
    DirectionChanged {
        /// Direction that was committed before the change.
        from: Direction,
        /// Direction committed after the change.
        to: Direction,
    },
    /// Confirms that the snake moved one cell.
    SnakeAdvanced {
        /// Position of the new head.
        head: Position,
        /// Target length of the snake after the move.
        length: usize,
    },
    /// Reports that the snake bit itself and returned to its initial state.
    SnakeReset {
        /// Target length the snake had reached before the reset.
        length_before: usize,
    },
    /// Reports that the snake's head reached the food.
    FoodConsumed {
        /// Cell that held the food.
        at: Position,
        /// Target length of the snake after growing.
        length: usize,
    },
    /// Reports that the food moved to another cell.
    FoodRelocated {
        /// Cell the food occupied before moving.
        from: Position,
        /// Cell the food occupies now.
        to: Position,
    },
    /// Reports that a food placement request could not be honoured.
    FoodPlacementRejected {
        /// Cell provided in the placement request.
        position: Position,
    },
}

/// Discrete input produced by an adapter while polling its device.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum InputEvent {
    /// The player asked to close the game.
    Quit,
    /// A directional key was pressed.
    KeyPressed(DirectionKey),
}

/// Directional keys understood by the input resolver.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum DirectionKey {
    /// Key that steers the snake upward.
    Up,
    /// Key that steers the snake downward.
    Down,
    /// Key that steers the snake to the left.
    Left,
    /// Key that steers the snake to the right.
    Right,
}

impl DirectionKey {
    /// Direction requested by the key.
    #[must_use]
    pub const fn direction(self) -> Direction {
        match self {
            Self::Up => Direction::Up,
            Self::Down => Direction::Down,
            Self::Left => Direction::Left,
            Self::Right => Direction::Right,
        }
    }
}

/// Tells the frame loop whether it should keep running.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum LoopControl {
    /// Keep processing frames.
    #[default]
    Continue,
    /// Tear down and return.
    Stop,
}

impl LoopControl {
    /// Returns `true` when the loop was asked to stop.
    #[must_use]
    pub const fn is_stop(self) -> bool {
        matches!(self, Self::Stop)
    }
}

/// Cardinal movement directions available to the snake.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    /// Movement toward decreasing `y`.
    Up,
    /// Movement toward increasing `y`.
    Down,
    /// Movement toward decreasing `x`.
    Left,
    /// Movement toward increasing `x`.
    Right,
}

impl Direction {
    /// Unit vector of the direction expressed as `(dx, dy)` in cell units.
    #[must_use]
    pub const fn delta(self) -> (i32, i32) {
        match self {
            Self::Up => (0, -1),
            Self::Down => (0, 1),
            Self::Left => (-1, 0),
            Self::Right => (1, 0),
        }
    }

    /// The additive inverse of the direction.
    #[must_use]
    pub const fn opposite(self) -> Self {
        match self {
            Self::Up => Self::Down,
            Self::Down => Self::Up,
            Self::Left => Self::Right,
            Self::Right => Self::Left,
        }
    }

    /// Returns `true` when turning from `self` to `other` is a 180-degree turn.
    #[must_use]
    pub fn is_opposite(self, other: Direction) -> bool {
        self.opposite() == other
    }
}

/// Top-left pixel coordinate of a grid cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Position {
    x: i32,
    y: i32,
}

impl Position {
    /// Creates a new position from pixel coordinates.
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Horizontal pixel coordinate.
    #[must_use]
    pub const fn x(&self) -> i32 {
        self.x
    }

    /// Vertical pixel coordinate.
    #[must_use]
    pub const fn y(&self) -> i32 {
        self.y
    }
}

/// Appearance applied to a drawn cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CellColor {
    red: u8,
    green: u8,
    blue: u8,
}

impl CellColor {
    /// Creates a new color from byte RGB components.
    #[must_use]
    pub const fn from_rgb(red: u8, green: u8, blue: u8) -> Self {
        Self { red, green, blue }
    }

    /// Red component of the color.
    #[must_use]
    pub const fn red(&self) -> u8 {
        self.red
    }

    /// Green component of the color.
    #[must_use]
    pub const fn green(&self) -> u8 {
        self.green
    }

    /// Blue component of the color.
    #[must_use]
    pub const fn blue(&self) -> u8 {
        self.blue
    }
}

/// Colors used to present the board.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Palette {
    /// Color the frame is cleared to.
    pub background: CellColor,
    /// Outline drawn around every cell.
    pub border: CellColor,
    /// Fill of the food cell.
    pub food: CellColor,
    /// Fill of every snake segment.
    pub snake: CellColor,
}

impl Palette {
    /// Fill used by drawables that were not given a color of their own.
    pub const DEFAULT_FILL: CellColor = CellColor::from_rgb(255, 255, 255);
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            background: CellColor::from_rgb(0, 0, 0),
            border: CellColor::from_rgb(93, 216, 228),
            food: CellColor::from_rgb(255, 0, 0),
            snake: CellColor::from_rgb(0, 255, 0),
        }
    }
}

/// Maps the pixel screen onto a toroidal grid of square cells.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct BoardGeometry {
    screen_width: u32,
    screen_height: u32,
    cell_size: u32,
}

impl BoardGeometry {
    /// Geometry of the standard 640x480 board with 20 pixel cells.
    pub const DEFAULT: Self = Self {
        screen_width: SCREEN_WIDTH,
        screen_height: SCREEN_HEIGHT,
        cell_size: CELL_SIZE,
    };

    /// Creates a geometry after checking that the screen splits into whole cells.
    pub fn new(screen_width: u32, screen_height: u32, cell_size: u32) -> Result<Self, ConfigError> {
        if cell_size == 0 {
            return Err(ConfigError::ZeroCellSize);
        }
        if i32::try_from(screen_width).is_err() || i32::try_from(screen_height).is_err() {
            return Err(ConfigError::ScreenTooLarge {
                screen_width,
                screen_height,
            });
        }
        if screen_width % cell_size != 0 || screen_height % cell_size != 0 {
            return Err(ConfigError::MisalignedScreen {
                screen_width,
                screen_height,
                cell_size,
            });
        }
        if u64::from(screen_width / cell_size) * u64::from(screen_height / cell_size) < 2 {
            return Err(ConfigError::EmptyBoard {
                screen_width,
                screen_height,
            });
        }

        Ok(Self {
            screen_width,
            screen_height,
            cell_size,
        })
    }

    /// Screen width in pixels.
    #[must_use]
    pub const fn screen_width(&self) -> u32 {
        self.screen_width
    }

    /// Screen height in pixels.
    #[must_use]
    pub const fn screen_height(&self) -> u32 {
        self.screen_height
    }

    /// Side length of a cell in pixels.
    #[must_use]
    pub const fn cell_size(&self) -> u32 {
        self.cell_size
    }

    /// Number of cell columns.
    #[must_use]
    pub const fn columns(&self) -> u32 {
        self.screen_width / self.cell_size
    }

    /// Number of cell rows.
    #[must_use]
    pub const fn rows(&self) -> u32 {
        self.screen_height / self.cell_size
    }

    /// Total number of cells on the board.
    #[must_use]
    pub fn cell_count(&self) -> usize {
        let cells = u64::from(self.columns()) * u64::from(self.rows());
        usize::try_from(cells).unwrap_or(usize::MAX)
    }

    /// Pixel position of the cell at the provided column and row.
    #[must_use]
    pub fn cell_position(&self, column: u32, row: u32) -> Position {
        Position::new(
            pixel(column.saturating_mul(self.cell_size)),
            pixel(row.saturating_mul(self.cell_size)),
        )
    }

    /// Cell that contains the middle of the screen.
    #[must_use]
    pub fn center(&self) -> Position {
        self.cell_position(self.columns() / 2, self.rows() / 2)
    }

    /// Folds a pixel position back onto the screen along both axes.
    #[must_use]
    pub fn wrap(&self, position: Position) -> Position {
        Position::new(
            position.x().rem_euclid(pixel(self.screen_width)),
            position.y().rem_euclid(pixel(self.screen_height)),
        )
    }

    /// Position one cell away from `position` in `direction`, wrapping at the edges.
    #[must_use]
    pub fn step(&self, position: Position, direction: Direction) -> Position {
        let (dx, dy) = direction.delta();
        let cell = pixel(self.cell_size);
        self.wrap(Position::new(
            position.x() + dx * cell,
            position.y() + dy * cell,
        ))
    }

    /// Returns `true` when the position is the top-left corner of a cell on the board.
    #[must_use]
    pub fn contains(&self, position: Position) -> bool {
        let cell = pixel(self.cell_size);
        (0..pixel(self.screen_width)).contains(&position.x())
            && (0..pixel(self.screen_height)).contains(&position.y())
            && position.x() % cell == 0
            && position.y() % cell == 0
    }
}

impl Default for BoardGeometry {
    fn default() -> Self {
        Self::DEFAULT
    }
}

// Screen dimensions are checked against `i32::MAX` when the geometry is built.
fn pixel(value: u32) -> i32 {
    i32::try_from(value).unwrap_or(i32::MAX)
}

/// Start-up configuration for a game session.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Screen width in pixels.
    pub screen_width: u32,
    /// Screen height in pixels.
    pub screen_height: u32,
    /// Side length of a cell in pixels.
    pub cell_size: u32,
    /// Simulation ticks per second.
    pub tick_rate: u32,
    /// Colors used to present the board.
    pub palette: Palette,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            screen_width: SCREEN_WIDTH,
            screen_height: SCREEN_HEIGHT,
            cell_size: CELL_SIZE,
            tick_rate: DEFAULT_TICK_RATE,
            palette: Palette::default(),
        }
    }
}

impl GameConfig {
    /// Board geometry described by the configuration.
    pub fn geometry(&self) -> Result<BoardGeometry, ConfigError> {
        BoardGeometry::new(self.screen_width, self.screen_height, self.cell_size)
    }

    /// Checks every field, returning the first problem found.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let _ = self.geometry()?;
        if self.tick_rate == 0 {
            return Err(ConfigError::ZeroTickRate);
        }
        if self.tick_rate > MAX_TICK_RATE {
            return Err(ConfigError::TickRateTooHigh {
                tick_rate: self.tick_rate,
            });
        }
        Ok(())
    }
}

/// Reasons a configuration can be rejected.
#[derive(Clone, Copy, Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// Cells must have a positive side length.
    #[error("cell size must be positive")]
    ZeroCellSize,
    /// The screen must divide evenly into cells.
    #[error("screen {screen_width}x{screen_height} does not divide into {cell_size} pixel cells")]
    MisalignedScreen {
        /// Requested screen width.
        screen_width: u32,
        /// Requested screen height.
        screen_height: u32,
        /// Requested cell size.
        cell_size: u32,
    },
    /// The board must leave room for the food next to the snake.
    #[error("screen {screen_width}x{screen_height} holds fewer than two cells")]
    EmptyBoard {
        /// Requested screen width.
        screen_width: u32,
        /// Requested screen height.
        screen_height: u32,
    },
    /// Pixel coordinates are stored as `i32`.
    #[error("screen {screen_width}x{screen_height} exceeds the supported pixel range")]
    ScreenTooLarge {
        /// Requested screen width.
        screen_width: u32,
        /// Requested screen height.
        screen_height: u32,
    },
    /// The tick timer needs a positive rate.
    #[error("tick rate must be positive")]
    ZeroTickRate,
    /// Tick intervals are measured in whole nanoseconds.
    #[error("tick rate {tick_rate} exceeds {} ticks per second", MAX_TICK_RATE)]
    TickRateTooHigh {
        /// Requested tick rate.
        tick_rate: u32,
    },
}
