#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Macroquad-backed rendering adapter for Snake.
//!
//! Macroquad's optional audio stack depends on native ALSA development
//! libraries, which are unavailable in the containerised CI environment.
//! To keep `cargo test` usable everywhere we depend on macroquad without its
//! default `audio` feature.
//!
//! The adapter owns the window, polls the keyboard once per frame and draws
//! the scene through a [`CellCanvas`] backed by macroquad's shape primitives.

use anyhow::{Context, Result};
use glam::Vec2;
use macroquad::input::{is_key_pressed, is_quit_requested, prevent_quit, KeyCode};
use snake_core::{DirectionKey, InputEvent};
use snake_rendering::{CellCanvas, Color, FrameInput, Presentation, RenderingBackend, Scene};
use std::{collections::VecDeque, time::Duration};
use tracing::{debug, info};

/// Edge-triggered keys observed during a single frame.
#[doc(hidden)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct KeyObservations {
    /// `Escape` or the window close button.
    pub quit: bool,
    /// `Up` arrow or `W`.
    pub up: bool,
    /// `Down` arrow or `S`.
    pub down: bool,
    /// `Left` arrow or `A`.
    pub left: bool,
    /// `Right` arrow or `D`.
    pub right: bool,
}

impl KeyObservations {
    fn poll() -> Self {
        Self {
            quit: is_key_pressed(KeyCode::Escape) || is_quit_requested(),
            up: is_key_pressed(KeyCode::Up) || is_key_pressed(KeyCode::W),
            down: is_key_pressed(KeyCode::Down) || is_key_pressed(KeyCode::S),
            left: is_key_pressed(KeyCode::Left) || is_key_pressed(KeyCode::A),
            right: is_key_pressed(KeyCode::Right) || is_key_pressed(KeyCode::D),
        }
    }

    /// Converts the observations into the event batch handed to the game.
    ///
    /// Quit is reported first so it wins over steering in the same frame.
    #[must_use]
    pub fn into_events(self) -> Vec<InputEvent> {
        let mut events = Vec::new();
        if self.quit {
            events.push(InputEvent::Quit);
        }

        let keys = [
            (self.up, DirectionKey::Up),
            (self.down, DirectionKey::Down),
            (self.left, DirectionKey::Left),
            (self.right, DirectionKey::Right),
        ];
        events.extend(
            keys.into_iter()
                .filter(|(pressed, _)| *pressed)
                .map(|(_, key)| InputEvent::KeyPressed(key)),
        );
        events
    }
}

/// Rendering backend implemented on top of macroquad.
#[derive(Debug, Default)]
pub struct MacroquadBackend {
    show_fps: bool,
}

impl MacroquadBackend {
    /// Returns a backend with frame timing metrics disabled.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Configures whether the backend logs frame timing metrics once per second.
    #[must_use]
    pub fn with_show_fps(mut self, show: bool) -> Self {
        self.show_fps = show;
        self
    }
}

/// Tracks the average frames-per-second produced by the render loop.
#[derive(Debug, Default)]
struct FpsCounter {
    elapsed: Duration,
    frames: u32,
    frame_times: VecDeque<Duration>,
    window_duration: Duration,
}

#[derive(Clone, Copy, Debug, PartialEq)]
struct FpsMetrics {
    per_second: f32,
    trailing_ten_seconds: f32,
}

impl FpsCounter {
    /// Records a rendered frame and returns the per-second and trailing ten-second averages once
    /// one second has elapsed.
    fn record_frame(&mut self, frame: Duration) -> Option<FpsMetrics> {
        self.elapsed += frame;
        self.frames = self.frames.saturating_add(1);

        self.frame_times.push_back(frame);
        self.window_duration += frame;

        let trailing_window = Duration::from_secs(10);
        while self.window_duration > trailing_window {
            if let Some(removed) = self.frame_times.pop_front() {
                self.window_duration = self.window_duration.saturating_sub(removed);
            } else {
                break;
            }
        }

        if self.elapsed < Duration::from_secs(1) {
            return None;
        }

        let seconds = self.elapsed.as_secs_f32();
        let per_second = self.frames as f32 / seconds;
        let window_seconds = self.window_duration.as_secs_f32();
        let trailing_ten_seconds = if window_seconds <= f32::EPSILON {
            per_second
        } else {
            self.frame_times.len() as f32 / window_seconds
        };
        self.elapsed = Duration::ZERO;
        self.frames = 0;
        Some(FpsMetrics {
            per_second,
            trailing_ten_seconds,
        })
    }
}

/// Draws cells straight into macroquad's current frame.
#[derive(Debug, Default)]
struct MacroquadCanvas;

impl CellCanvas for MacroquadCanvas {
    fn clear(&mut self, color: Color) {
        macroquad::window::clear_background(to_macroquad_color(color));
    }

    fn draw_cell(&mut self, origin: Vec2, size: f32, fill: Color, border: Color) {
        macroquad::shapes::draw_rectangle(origin.x, origin.y, size, size, to_macroquad_color(fill));
        macroquad::shapes::draw_rectangle_lines(
            origin.x,
            origin.y,
            size,
            size,
            1.0,
            to_macroquad_color(border),
        );
    }

    // The frame itself is flipped by `next_frame`.
    fn present(&mut self) {}
}

impl RenderingBackend for MacroquadBackend {
    fn run<F>(self, presentation: Presentation, mut update_scene: F) -> Result<()>
    where
        F: FnMut(Duration, FrameInput, &mut Scene) -> snake_core::LoopControl + 'static,
    {
        let Self { show_fps } = self;

        let Presentation {
            window_title,
            width,
            height,
            scene,
        } = presentation;

        let config = macroquad::window::Conf {
            window_title,
            window_width: i32::try_from(width).context("window width does not fit the platform")?,
            window_height: i32::try_from(height)
                .context("window height does not fit the platform")?,
            window_resizable: false,
            ..macroquad::window::Conf::default()
        };

        macroquad::Window::from_config(config, async move {
            prevent_quit();
            let mut scene = scene;
            let mut canvas = MacroquadCanvas;
            let mut fps_counter = FpsCounter::default();

            loop {
                let frame_input = FrameInput {
                    events: KeyObservations::poll().into_events(),
                };
                let dt_seconds = macroquad::time::get_frame_time();
                let frame_dt = Duration::from_secs_f32(dt_seconds.max(0.0));

                if update_scene(frame_dt, frame_input, &mut scene).is_stop() {
                    debug!("closing window");
                    break;
                }

                scene.draw(&mut canvas);

                let fps_metrics = fps_counter.record_frame(frame_dt);
                if show_fps {
                    if let Some(FpsMetrics {
                        per_second,
                        trailing_ten_seconds,
                    }) = fps_metrics
                    {
                        info!(
                            fps = per_second,
                            trailing_ten_seconds,
                            "frame rate"
                        );
                    }
                }

                macroquad::window::next_frame().await;
            }
        });

        Ok(())
    }
}

fn to_macroquad_color(color: Color) -> macroquad::color::Color {
    macroquad::color::Color::new(color.red, color.green, color.blue, color.alpha)
}
