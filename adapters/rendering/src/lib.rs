#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Shared rendering contracts for Snake adapters.

use anyhow::Result as AnyResult;
use glam::Vec2;
use snake_core::{CellColor, InputEvent, LoopControl, Palette, Position};
use std::time::Duration;

/// RGBA color used when presenting frames.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color {
    /// Red channel intensity in the range 0.0..=1.0.
    pub red: f32,
    /// Green channel intensity in the range 0.0..=1.0.
    pub green: f32,
    /// Blue channel intensity in the range 0.0..=1.0.
    pub blue: f32,
    /// Alpha channel intensity in the range 0.0..=1.0.
    pub alpha: f32,
}

impl Color {
    /// Creates a new color from floating point channels.
    #[must_use]
    pub const fn new(red: f32, green: f32, blue: f32, alpha: f32) -> Self {
        Self {
            red,
            green,
            blue,
            alpha,
        }
    }

    /// Creates an opaque color from byte RGB values.
    #[must_use]
    pub const fn from_rgb_u8(red: u8, green: u8, blue: u8) -> Self {
        Self {
            red: red as f32 / 255.0,
            green: green as f32 / 255.0,
            blue: blue as f32 / 255.0,
            alpha: 1.0,
        }
    }
}

impl From<CellColor> for Color {
    fn from(color: CellColor) -> Self {
        Self::from_rgb_u8(color.red(), color.green(), color.blue())
    }
}

/// Input snapshot gathered by adapters before updating the scene.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct FrameInput {
    /// Discrete events observed since the previous frame, in arrival order.
    pub events: Vec<InputEvent>,
}

/// Drawing surface able to present square cells.
pub trait CellCanvas {
    /// Fills the whole surface with `color`.
    fn clear(&mut self, color: Color);

    /// Draws a filled square with its top-left corner at `origin` and a one
    /// pixel `border` outline.
    fn draw_cell(&mut self, origin: Vec2, size: f32, fill: Color, border: Color);

    /// Finishes the frame.
    fn present(&mut self);
}

/// Anything that knows how to put itself on a [`CellCanvas`].
pub trait Drawable {
    /// Draws a single cell at `origin`, or the entity's own cells when no
    /// origin is given.
    fn draw_at(&self, canvas: &mut dyn CellCanvas, origin: Option<Vec2>);

    /// Draws the entity where it currently is.
    fn draw(&self, canvas: &mut dyn CellCanvas) {
        self.draw_at(canvas, None);
    }
}

/// Size and colors shared by every cell an entity draws.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CellStyle {
    /// Side length of the cell in pixels.
    pub size: f32,
    /// Fill color.
    pub fill: Color,
    /// Outline color.
    pub border: Color,
}

impl CellStyle {
    /// Creates a new cell style.
    #[must_use]
    pub const fn new(size: f32, fill: Color, border: Color) -> Self {
        Self { size, fill, border }
    }

    /// Draws one cell with this style at `origin`.
    pub fn draw_cell(&self, canvas: &mut dyn CellCanvas, origin: Vec2) {
        canvas.draw_cell(origin, self.size, self.fill, self.border);
    }
}

impl Default for CellStyle {
    fn default() -> Self {
        let palette = Palette::default();
        Self::new(
            snake_core::CELL_SIZE as f32,
            Palette::DEFAULT_FILL.into(),
            palette.border.into(),
        )
    }
}

/// Converts a grid cell's pixel coordinate into screen space.
#[must_use]
pub fn cell_origin(position: Position) -> Vec2 {
    Vec2::new(position.x() as f32, position.y() as f32)
}

/// Food as seen by the renderer.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FoodPresentation {
    /// Top-left corner of the food cell.
    pub origin: Vec2,
    /// Appearance of the food cell.
    pub style: CellStyle,
}

impl Drawable for FoodPresentation {
    fn draw_at(&self, canvas: &mut dyn CellCanvas, origin: Option<Vec2>) {
        self.style.draw_cell(canvas, origin.unwrap_or(self.origin));
    }
}

/// Snake body as seen by the renderer, ordered from head to tail.
#[derive(Clone, Debug, PartialEq)]
pub struct SnakePresentation {
    /// Top-left corners of every segment.
    pub segments: Vec<Vec2>,
    /// Appearance shared by all segments.
    pub style: CellStyle,
}

impl Drawable for SnakePresentation {
    fn draw_at(&self, canvas: &mut dyn CellCanvas, origin: Option<Vec2>) {
        match origin {
            Some(origin) => self.style.draw_cell(canvas, origin),
            None => {
                for segment in &self.segments {
                    self.style.draw_cell(canvas, *segment);
                }
            }
        }
    }
}

/// Everything drawn in a single frame.
#[derive(Clone, Debug, PartialEq)]
pub struct Scene {
    /// Color the frame is cleared to before drawing.
    pub background: Color,
    /// Food cell.
    pub food: FoodPresentation,
    /// Snake body.
    pub snake: SnakePresentation,
}

impl Scene {
    /// Creates an empty scene styled with `palette`.
    #[must_use]
    pub fn new(palette: &Palette, cell_size: f32) -> Self {
        let border = Color::from(palette.border);
        Self {
            background: palette.background.into(),
            food: FoodPresentation {
                origin: Vec2::ZERO,
                style: CellStyle::new(cell_size, palette.food.into(), border),
            },
            snake: SnakePresentation {
                segments: Vec::new(),
                style: CellStyle::new(cell_size, palette.snake.into(), border),
            },
        }
    }

    /// Moves the food to the cell at `position`.
    pub fn set_food(&mut self, position: Position) {
        self.food.origin = cell_origin(position);
    }

    /// Replaces the snake body with `segments`, head first.
    pub fn set_snake<I>(&mut self, segments: I)
    where
        I: IntoIterator<Item = Position>,
    {
        self.snake.segments.clear();
        self.snake
            .segments
            .extend(segments.into_iter().map(cell_origin));
    }

    /// Clears the canvas, draws the food and then the snake, and presents.
    pub fn draw(&self, canvas: &mut dyn CellCanvas) {
        canvas.clear(self.background);
        self.food.draw(canvas);
        self.snake.draw(canvas);
        canvas.present();
    }
}

/// Presentation descriptor consumed by rendering backends.
#[derive(Clone, Debug, PartialEq)]
pub struct Presentation {
    /// Title used by the created window.
    pub window_title: String,
    /// Window width in pixels.
    pub width: u32,
    /// Window height in pixels.
    pub height: u32,
    /// Scene content that should be displayed.
    pub scene: Scene,
}

impl Presentation {
    /// Constructs a new presentation descriptor.
    #[must_use]
    pub fn new<T>(window_title: T, width: u32, height: u32, scene: Scene) -> Self
    where
        T: Into<String>,
    {
        Self {
            window_title: window_title.into(),
            width,
            height,
            scene,
        }
    }
}

/// Rendering backend capable of presenting Snake scenes.
pub trait RenderingBackend {
    /// Runs the rendering backend until `update_scene` asks it to stop.
    ///
    /// The provided `update_scene` closure receives the frame delta and the
    /// input captured by the adapter, and may mutate the scene before it is
    /// rendered. Returning [`LoopControl::Stop`] ends the frame loop without
    /// drawing that frame.
    fn run<F>(self, presentation: Presentation, update_scene: F) -> AnyResult<()>
    where
        F: FnMut(Duration, FrameInput, &mut Scene) -> LoopControl + 'static;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, PartialEq)]
    enum Call {
        Clear(Color),
        Cell { origin: Vec2, fill: Color },
        Present,
    }

    #[derive(Default)]
    struct RecordingCanvas {
        calls: Vec<Call>,
    }

    impl CellCanvas for RecordingCanvas {
        fn clear(&mut self, color: Color) {
            self.calls.push(Call::Clear(color));
        }

        fn draw_cell(&mut self, origin: Vec2, size: f32, fill: Color, border: Color) {
            assert_eq!(size, 20.0);
            assert_eq!(border, Color::from_rgb_u8(93, 216, 228));
            self.calls.push(Call::Cell { origin, fill });
        }

        fn present(&mut self) {
            self.calls.push(Call::Present);
        }
    }

    #[test]
    fn from_rgb_u8_normalises_channels() {
        let color = Color::from_rgb_u8(255, 0, 51);
        assert_eq!(color, Color::new(1.0, 0.0, 0.2, 1.0));
    }

    #[test]
    fn scene_draws_background_food_then_snake() {
        let palette = Palette::default();
        let mut scene = Scene::new(&palette, 20.0);
        scene.set_food(Position::new(100, 40));
        scene.set_snake([Position::new(320, 240), Position::new(300, 240)]);
        let mut canvas = RecordingCanvas::default();

        scene.draw(&mut canvas);

        let food = Color::from(palette.food);
        let snake = Color::from(palette.snake);
        assert_eq!(
            canvas.calls,
            vec![
                Call::Clear(Color::from(palette.background)),
                Call::Cell {
                    origin: Vec2::new(100.0, 40.0),
                    fill: food,
                },
                Call::Cell {
                    origin: Vec2::new(320.0, 240.0),
                    fill: snake,
                },
                Call::Cell {
                    origin: Vec2::new(300.0, 240.0),
                    fill: snake,
                },
                Call::Present,
            ]
        );
    }

    #[test]
    fn explicit_origin_overrides_entity_position() {
        let mut scene = Scene::new(&Palette::default(), 20.0);
        scene.set_food(Position::new(0, 0));
        scene.set_snake([Position::new(20, 20), Position::new(40, 20)]);
        let mut canvas = RecordingCanvas::default();

        scene.food.draw_at(&mut canvas, Some(Vec2::new(60.0, 60.0)));
        scene.snake.draw_at(&mut canvas, Some(Vec2::new(80.0, 60.0)));

        let origins: Vec<Vec2> = canvas
            .calls
            .iter()
            .filter_map(|call| match call {
                Call::Cell { origin, .. } => Some(*origin),
                _ => None,
            })
            .collect();
        assert_eq!(origins, vec![Vec2::new(60.0, 60.0), Vec2::new(80.0, 60.0)]);
    }

    #[test]
    fn default_style_uses_white_fill() {
        let style = CellStyle::default();
        assert_eq!(style.fill, Color::from_rgb_u8(255, 255, 255));
        assert_eq!(style.size, 20.0);
    }

    #[test]
    fn set_snake_replaces_previous_body() {
        let mut scene = Scene::new(&Palette::default(), 20.0);
        scene.set_snake([Position::new(0, 0), Position::new(20, 0)]);
        scene.set_snake([Position::new(40, 0)]);
        assert_eq!(scene.snake.segments, vec![Vec2::new(40.0, 0.0)]);
    }
}
