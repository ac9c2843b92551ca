//! The player-controlled snake.

use std::collections::VecDeque;

use snake_core::{BoardGeometry, Direction, Position};

const INITIAL_LENGTH: usize = 1;
const INITIAL_DIRECTION: Direction = Direction::Right;

/// Ordered body segments together with the steering state of the snake.
///
/// The head lives at index 0. The body never becomes empty: every mutation
/// either inserts a head before trimming the tail or restores the single
/// starting segment.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Snake {
    segments: VecDeque<Position>,
    length: usize,
    direction: Direction,
    next_direction: Option<Direction>,
    home: Position,
}

impl Snake {
    /// Creates a snake of length one at `home`, heading right.
    #[must_use]
    pub fn new(home: Position) -> Self {
        let mut snake = Self {
            segments: VecDeque::new(),
            length: INITIAL_LENGTH,
            direction: INITIAL_DIRECTION,
            next_direction: None,
            home,
        };
        snake.reset();
        snake
    }

    /// Position of the head segment.
    #[must_use]
    pub fn head(&self) -> Position {
        debug_assert!(!self.segments.is_empty(), "snake lost its head");
        self.segments[0]
    }

    /// Body segments ordered from head to tail.
    #[must_use]
    pub fn segments(&self) -> &VecDeque<Position> {
        &self.segments
    }

    /// Number of segments the snake grows or shrinks towards.
    #[must_use]
    pub const fn length(&self) -> usize {
        self.length
    }

    /// Direction applied on the next advance.
    #[must_use]
    pub const fn direction(&self) -> Direction {
        self.direction
    }

    /// Direction waiting to be committed, if any.
    #[must_use]
    pub const fn next_direction(&self) -> Option<Direction> {
        self.next_direction
    }

    /// Reports whether any segment sits on `position`.
    #[must_use]
    pub fn occupies(&self, position: Position) -> bool {
        self.segments.contains(&position)
    }

    /// Stores `direction` in the pending slot, overwriting an unconsumed request.
    ///
    /// `None` leaves the slot untouched. Reversals are filtered later by
    /// [`Snake::commit_direction`].
    pub fn request_direction(&mut self, direction: Option<Direction>) {
        if let Some(direction) = direction {
            self.next_direction = Some(direction);
        }
    }

    /// Promotes the pending direction unless it reverses the committed one.
    ///
    /// A rejected reversal stays in the pending slot until a later request
    /// replaces it.
    pub fn commit_direction(&mut self) {
        if let Some(next) = self.next_direction {
            if !self.direction.is_opposite(next) {
                self.direction = next;
                self.next_direction = None;
            }
        }
    }

    /// Moves the head one cell in the committed direction and trims the tail
    /// back to the target length. Returns the new head.
    pub fn advance(&mut self, geometry: &BoardGeometry) -> Position {
        let head = geometry.step(self.head(), self.direction);
        self.segments.push_front(head);
        if self.segments.len() > self.length {
            let _ = self.segments.pop_back();
        }
        head
    }

    /// Raises the target length by one; the tail stops shrinking on the next advance.
    pub fn grow(&mut self) {
        self.length = self.length.saturating_add(1);
    }

    /// Returns `true` when the head overlaps a segment behind its neighbour.
    #[must_use]
    pub fn is_self_collision(&self) -> bool {
        let head = self.head();
        self.segments.iter().skip(2).any(|segment| *segment == head)
    }

    /// Restores the starting state: one segment at home, heading right.
    pub fn reset(&mut self) {
        self.segments.clear();
        self.segments.push_back(self.home);
        self.length = INITIAL_LENGTH;
        self.direction = INITIAL_DIRECTION;
        self.next_direction = None;
    }
}
