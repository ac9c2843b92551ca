#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Orchestrates one Snake session: pacing, input resolution and world ticks.
//!
//! Each admitted tick runs the same fixed sequence. Pending input is resolved
//! into direction requests, the pending direction is committed, and the snake
//! advances one cell, which includes the collision and consumption check.
//! Rendering reads the world afterwards through [`snake_world::query`].

use std::time::Duration;

use snake_core::{Command, Event, InputEvent, LoopControl};
use snake_system_input::InputResolver;
use snake_system_pacing::Pacing;
use snake_world::{self as world, query, World};
use tracing::{debug, trace};

/// Counters describing the session so far.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SessionStats {
    /// Ticks executed.
    pub ticks: u64,
    /// Times the snake bit itself and started over.
    pub resets: u64,
    /// Food cells eaten.
    pub food_consumed: u64,
    /// Longest target length reached.
    pub best_length: usize,
}

/// Owns the world together with the systems that drive it.
#[derive(Debug)]
pub struct GameLoop {
    world: World,
    input: InputResolver,
    pacing: Pacing,
    commands: Vec<Command>,
    events: Vec<Event>,
    stats: SessionStats,
}

impl GameLoop {
    /// Creates a loop driving `world` at the rate configured in `pacing`.
    #[must_use]
    pub fn new(world: World, pacing: Pacing) -> Self {
        let best_length = query::snake(&world).length();
        Self {
            world,
            input: InputResolver::new(),
            pacing,
            commands: Vec::new(),
            events: Vec::new(),
            stats: SessionStats {
                best_length,
                ..SessionStats::default()
            },
        }
    }

    /// Read-only access to the world for rendering and inspection.
    #[must_use]
    pub fn world(&self) -> &World {
        &self.world
    }

    /// Session counters accumulated so far.
    #[must_use]
    pub const fn stats(&self) -> SessionStats {
        self.stats
    }

    /// Events produced by the most recent call to [`Self::frame`] or [`Self::tick`].
    #[must_use]
    pub fn events(&self) -> &[Event] {
        &self.events
    }

    /// Advances the session by one rendered frame that lasted `dt`.
    ///
    /// Input is resolved on the first tick admitted this frame. When no tick
    /// is due the input is still resolved, so quit is honoured immediately and
    /// direction requests wait in the snake's pending slot.
    pub fn frame(&mut self, dt: Duration, input: &[InputEvent]) -> LoopControl {
        self.events.clear();
        let due = self.pacing.admit(dt);
        if due == 0 {
            return self.resolve_input(input);
        }

        let mut input = input;
        for _ in 0..due {
            if self.step(input).is_stop() {
                return LoopControl::Stop;
            }
            input = &[];
        }
        LoopControl::Continue
    }

    /// Runs exactly one tick regardless of elapsed time.
    pub fn tick(&mut self, input: &[InputEvent]) -> LoopControl {
        self.events.clear();
        self.step(input)
    }

    fn step(&mut self, input: &[InputEvent]) -> LoopControl {
        if self.resolve_input(input).is_stop() {
            return LoopControl::Stop;
        }

        let first = self.events.len();
        world::apply(&mut self.world, Command::CommitDirection, &mut self.events);
        world::apply(&mut self.world, Command::Advance, &mut self.events);
        self.record(first);
        LoopControl::Continue
    }

    fn resolve_input(&mut self, input: &[InputEvent]) -> LoopControl {
        self.commands.clear();
        let control = self.input.handle(
            input,
            query::committed_direction(&self.world),
            &mut self.commands,
        );
        for command in self.commands.drain(..) {
            world::apply(&mut self.world, command, &mut self.events);
        }

        if control.is_stop() {
            debug!(ticks = self.stats.ticks, "game loop stopping");
        }
        control
    }

    fn record(&mut self, first: usize) {
        self.stats.ticks = self.stats.ticks.saturating_add(1);
        for event in &self.events[first..] {
            match *event {
                Event::SnakeReset { .. } => self.stats.resets += 1,
                Event::FoodConsumed { length, .. } => {
                    self.stats.food_consumed += 1;
                    self.stats.best_length = self.stats.best_length.max(length);
                }
                _ => {}
            }
        }
        trace!(tick = self.stats.ticks, "tick complete");
    }
}
