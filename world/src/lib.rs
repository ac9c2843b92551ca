#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Authoritative world state management for Snake.
//!
//! The world owns the snake, the food and the random source used to place
//! food. Every mutation arrives as a [`Command`] through [`apply`]; the outcome
//! is reported back as [`Event`] values so systems and adapters never touch the
//! entities directly.

mod food;
mod snake;

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use snake_core::{BoardGeometry, Command, Event};
use tracing::{debug, info, warn};

pub use food::Food;
pub use snake::Snake;

/// Seed used by [`World::default`].
pub const DEFAULT_SEED: u64 = 0x5eed_c0de_0bad_cafe;

/// Represents the authoritative Snake world state.
#[derive(Debug)]
pub struct World {
    geometry: BoardGeometry,
    snake: Snake,
    food: Food,
    rng: ChaCha8Rng,
    tick_index: u64,
}

impl World {
    /// Creates a world with the snake at the board center and food on a free cell.
    #[must_use]
    pub fn new(geometry: BoardGeometry, seed: u64) -> Self {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let snake = Snake::new(geometry.center());
        // Boards hold at least two cells, so a free cell always exists here.
        let food_position = Food::relocate(&geometry, snake.segments(), &mut rng)
            .unwrap_or_else(|| geometry.cell_position(0, 0));

        Self {
            geometry,
            snake,
            food: Food::at(food_position),
            rng,
            tick_index: 0,
        }
    }

    fn commit_direction(&mut self, out_events: &mut Vec<Event>) {
        let from = self.snake.direction();
        self.snake.commit_direction();
        let to = self.snake.direction();
        if from != to {
            debug!(?from, ?to, "direction committed");
            out_events.push(Event::DirectionChanged { from, to });
        }
    }

    fn advance(&mut self, out_events: &mut Vec<Event>) {
        self.tick_index = self.tick_index.saturating_add(1);
        let head = self.snake.advance(&self.geometry);
        out_events.push(Event::SnakeAdvanced {
            head,
            length: self.snake.length(),
        });

        if self.snake.is_self_collision() {
            let length_before = self.snake.length();
            self.snake.reset();
            info!(length_before, tick = self.tick_index, "snake bit itself");
            out_events.push(Event::SnakeReset { length_before });
            self.relocate_food(out_events);
        } else if head == self.food.position() {
            self.snake.grow();
            let length = self.snake.length();
            debug!(length, "food consumed");
            out_events.push(Event::FoodConsumed { at: head, length });
            self.relocate_food(out_events);
        }
    }

    fn relocate_food(&mut self, out_events: &mut Vec<Event>) {
        let Some(to) = Food::relocate(&self.geometry, self.snake.segments(), &mut self.rng) else {
            warn!(
                length = self.snake.length(),
                "no free cell left for food; leaving it in place"
            );
            return;
        };

        let from = self.food.position();
        self.food.move_to(to);
        out_events.push(Event::FoodRelocated { from, to });
    }
}

impl Default for World {
    fn default() -> Self {
        Self::new(BoardGeometry::DEFAULT, DEFAULT_SEED)
    }
}

/// Applies the provided command to the world, mutating state deterministically.
pub fn apply(world: &mut World, command: Command, out_events: &mut Vec<Event>) {
    match command {
        Command::RequestDirection { direction } => {
            world.snake.request_direction(Some(direction));
        }
        Command::CommitDirection => world.commit_direction(out_events),
        Command::Advance => world.advance(out_events),
        Command::Tick => {
            world.commit_direction(out_events);
            world.advance(out_events);
        }
        Command::PlaceFood { position } => {
            if !world.geometry.contains(position) || world.snake.occupies(position) {
                out_events.push(Event::FoodPlacementRejected { position });
                return;
            }

            let from = world.food.position();
            world.food.move_to(position);
            out_events.push(Event::FoodRelocated { from, to: position });
        }
    }
}

/// Query functions that provide read-only access to the world state.
pub mod query {
    use snake_core::{BoardGeometry, Direction, Position};

    use super::{Snake, World};

    /// Provides read-only access to the board geometry.
    #[must_use]
    pub fn geometry(world: &World) -> &BoardGeometry {
        &world.geometry
    }

    /// Provides read-only access to the snake.
    #[must_use]
    pub fn snake(world: &World) -> &Snake {
        &world.snake
    }

    /// Segments of the snake ordered from head to tail.
    pub fn snake_segments(world: &World) -> impl Iterator<Item = Position> + '_ {
        world.snake.segments().iter().copied()
    }

    /// Direction the snake is currently committed to.
    #[must_use]
    pub fn committed_direction(world: &World) -> Direction {
        world.snake.direction()
    }

    /// Cell currently holding the food.
    #[must_use]
    pub fn food_position(world: &World) -> Position {
        world.food.position()
    }

    /// Number of advances processed since the world was created.
    #[must_use]
    pub fn tick_index(world: &World) -> u64 {
        world.tick_index
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use snake_core::{Direction, Position};

    #[test]
    fn new_world_places_food_off_the_snake() {
        for seed in 0..64 {
            let world = World::new(BoardGeometry::DEFAULT, seed);
            assert!(!world.snake.occupies(world.food.position()));
            assert!(world.geometry.contains(world.food.position()));
        }
    }

    #[test]
    fn tick_commits_before_advancing() {
        let mut world = World::default();
        let mut events = Vec::new();
        apply(
            &mut world,
            Command::RequestDirection {
                direction: Direction::Up,
            },
            &mut events,
        );
        apply(&mut world, Command::Tick, &mut events);

        assert_eq!(world.snake.head(), Position::new(320, 220));
        assert_eq!(
            events[0],
            Event::DirectionChanged {
                from: Direction::Right,
                to: Direction::Up,
            }
        );
        assert_eq!(query::tick_index(&world), 1);
    }

    #[test]
    fn place_food_rejects_snake_cells_and_offgrid_cells() {
        let mut world = World::default();
        let mut events = Vec::new();
        let center = world.geometry.center();
        let before = world.food.position();

        apply(&mut world, Command::PlaceFood { position: center }, &mut events);
        apply(
            &mut world,
            Command::PlaceFood {
                position: Position::new(5, 5),
            },
            &mut events,
        );

        assert_eq!(world.food.position(), before);
        assert_eq!(
            events,
            vec![
                Event::FoodPlacementRejected { position: center },
                Event::FoodPlacementRejected {
                    position: Position::new(5, 5),
                },
            ]
        );
    }

    #[test]
    fn full_board_leaves_food_in_place() {
        let geometry = BoardGeometry::new(40, 20, 20).expect("two cell board");
        let mut world = World::new(geometry, 3);
        assert_eq!(world.snake.head(), Position::new(20, 0));
        assert_eq!(world.food.position(), Position::new(0, 0));

        let mut events = Vec::new();
        apply(&mut world, Command::Advance, &mut events);
        assert_eq!(world.snake.length(), 2);
        assert_eq!(world.food.position(), Position::new(20, 0));

        events.clear();
        apply(&mut world, Command::Advance, &mut events);

        assert_eq!(world.snake.length(), 3);
        assert_eq!(world.food.position(), Position::new(20, 0));
        assert!(events
            .iter()
            .any(|event| matches!(event, Event::FoodConsumed { .. })));
        assert!(!events
            .iter()
            .any(|event| matches!(event, Event::FoodRelocated { .. })));
    }
}
