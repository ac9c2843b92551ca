//! The food the snake chases.

use std::collections::HashSet;

use rand::Rng;
use snake_core::{BoardGeometry, Position};

/// Single grid-aligned food cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Food {
    position: Position,
}

impl Food {
    /// Creates food at a fixed cell.
    #[must_use]
    pub const fn at(position: Position) -> Self {
        Self { position }
    }

    /// Cell currently holding the food.
    #[must_use]
    pub const fn position(&self) -> Position {
        self.position
    }

    /// Moves the food to `position`.
    pub fn move_to(&mut self, position: Position) {
        self.position = position;
    }

    /// Draws uniformly random cells until one falls outside `occupied`.
    ///
    /// Returns `None` only when `occupied` covers every cell of the board.
    pub fn relocate<'a, I, R>(
        geometry: &BoardGeometry,
        occupied: I,
        rng: &mut R,
    ) -> Option<Position>
    where
        I: IntoIterator<Item = &'a Position>,
        R: Rng + ?Sized,
    {
        let occupied: HashSet<Position> = occupied
            .into_iter()
            .copied()
            .filter(|position| geometry.contains(*position))
            .collect();
        if occupied.len() >= geometry.cell_count() {
            return None;
        }

        loop {
            let candidate = geometry.cell_position(
                rng.gen_range(0..geometry.columns()),
                rng.gen_range(0..geometry.rows()),
            );
            if !occupied.contains(&candidate) {
                return Some(candidate);
            }
        }
    }
}
