#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Input resolver that turns polled device input into steering commands.

use snake_core::{Command, Direction, InputEvent, LoopControl};
use tracing::{debug, trace};

/// Pure system translating [`InputEvent`] batches into direction requests.
///
/// The resolver keeps no state of its own. Keys that would reverse the
/// committed direction are dropped here, and the world filters the pending
/// direction again when it is committed.
#[derive(Clone, Copy, Debug, Default)]
pub struct InputResolver;

impl InputResolver {
    /// Creates a new resolver.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Consumes one frame's worth of input and emits direction requests.
    ///
    /// Returns [`LoopControl::Stop`] as soon as a quit event is seen; events
    /// after it are ignored.
    pub fn handle(
        &self,
        events: &[InputEvent],
        committed: Direction,
        out: &mut Vec<Command>,
    ) -> LoopControl {
        for event in events {
            match *event {
                InputEvent::Quit => {
                    debug!("quit requested");
                    return LoopControl::Stop;
                }
                InputEvent::KeyPressed(key) => {
                    let direction = key.direction();
                    if committed.is_opposite(direction) {
                        trace!(?direction, ?committed, "ignoring reversal");
                        continue;
                    }
                    out.push(Command::RequestDirection { direction });
                }
            }
        }

        LoopControl::Continue
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use snake_core::DirectionKey;

    fn resolve(events: &[InputEvent], committed: Direction) -> (LoopControl, Vec<Command>) {
        let mut commands = Vec::new();
        let control = InputResolver::new().handle(events, committed, &mut commands);
        (control, commands)
    }

    #[test]
    fn directional_keys_request_matching_directions() {
        let (control, commands) = resolve(
            &[
                InputEvent::KeyPressed(DirectionKey::Up),
                InputEvent::KeyPressed(DirectionKey::Right),
            ],
            Direction::Right,
        );

        assert_eq!(control, LoopControl::Continue);
        assert_eq!(
            commands,
            vec![
                Command::RequestDirection {
                    direction: Direction::Up,
                },
                Command::RequestDirection {
                    direction: Direction::Right,
                },
            ]
        );
    }

    #[test]
    fn reversal_is_filtered_against_committed_direction() {
        let (_, commands) = resolve(&[InputEvent::KeyPressed(DirectionKey::Left)], Direction::Right);
        assert!(commands.is_empty());

        let (_, commands) = resolve(&[InputEvent::KeyPressed(DirectionKey::Down)], Direction::Up);
        assert!(commands.is_empty());
    }

    #[test]
    fn second_key_is_checked_against_committed_not_pending_direction() {
        // Left still reverses the committed direction while Up is only pending.
        let (_, commands) = resolve(
            &[
                InputEvent::KeyPressed(DirectionKey::Up),
                InputEvent::KeyPressed(DirectionKey::Left),
            ],
            Direction::Right,
        );

        assert_eq!(
            commands,
            vec![Command::RequestDirection {
                direction: Direction::Up,
            }]
        );
    }

    #[test]
    fn quit_stops_and_ignores_later_events() {
        let (control, commands) = resolve(
            &[
                InputEvent::Quit,
                InputEvent::KeyPressed(DirectionKey::Up),
            ],
            Direction::Right,
        );

        assert_eq!(control, LoopControl::Stop);
        assert!(commands.is_empty());
    }

    #[test]
    fn empty_batch_continues() {
        let (control, commands) = resolve(&[], Direction::Left);
        assert_eq!(control, LoopControl::Continue);
        assert!(commands.is_empty());
    }
}
