#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Fixed-rate tick timer driven by frame deltas.
//!
//! Windowed adapters present frames at the display rate, so the simulation
//! cannot block between ticks. Instead every frame reports its elapsed time
//! and [`Pacing::admit`] answers how many simulation ticks are due.

use std::time::Duration;

use snake_core::DEFAULT_TICK_RATE;

/// Upper bound on ticks admitted by a single frame.
pub const MAX_TICKS_PER_FRAME: u32 = 4;

/// Configuration parameters required to construct the pacing system.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Config {
    tick_rate: u32,
    max_ticks_per_frame: u32,
}

impl Config {
    /// Creates a configuration admitting `tick_rate` ticks per second.
    #[must_use]
    pub const fn new(tick_rate: u32) -> Self {
        Self {
            tick_rate,
            max_ticks_per_frame: MAX_TICKS_PER_FRAME,
        }
    }

    /// Overrides how many ticks a single long frame may catch up on.
    #[must_use]
    pub const fn with_max_ticks_per_frame(mut self, max_ticks_per_frame: u32) -> Self {
        self.max_ticks_per_frame = max_ticks_per_frame;
        self
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new(DEFAULT_TICK_RATE)
    }
}

/// Accumulates frame time and releases ticks at a fixed rate.
#[derive(Debug)]
pub struct Pacing {
    tick_interval: Duration,
    accumulator: Duration,
    max_ticks_per_frame: u32,
}

impl Pacing {
    /// Creates a new pacing system using the supplied configuration.
    #[must_use]
    pub fn new(config: Config) -> Self {
        let tick_interval = if config.tick_rate == 0 {
            Duration::ZERO
        } else {
            (Duration::from_secs(1) / config.tick_rate).max(Duration::from_nanos(1))
        };

        Self {
            tick_interval,
            accumulator: Duration::ZERO,
            max_ticks_per_frame: config.max_ticks_per_frame,
        }
    }

    /// Simulated time between two consecutive ticks.
    #[must_use]
    pub const fn tick_interval(&self) -> Duration {
        self.tick_interval
    }

    /// Adds `dt` to the accumulator and returns the number of ticks now due.
    ///
    /// When more ticks are due than a frame may run, the surplus time is
    /// dropped instead of being replayed on later frames.
    pub fn admit(&mut self, dt: Duration) -> u32 {
        if self.tick_interval.is_zero() {
            return 0;
        }

        self.accumulator = self.accumulator.saturating_add(dt);
        let mut ticks = 0;
        while self.accumulator >= self.tick_interval {
            if ticks == self.max_ticks_per_frame {
                self.accumulator = Duration::ZERO;
                break;
            }
            self.accumulator -= self.tick_interval;
            ticks += 1;
        }
        ticks
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_rate_admits_one_tick_every_fifty_milliseconds() {
        let pacing = Pacing::new(Config::default());
        assert_eq!(pacing.tick_interval(), Duration::from_millis(50));
    }

    #[test]
    fn short_frames_accumulate_until_a_tick_is_due() {
        let mut pacing = Pacing::new(Config::new(20));
        assert_eq!(pacing.admit(Duration::from_millis(20)), 0);
        assert_eq!(pacing.admit(Duration::from_millis(20)), 0);
        assert_eq!(pacing.admit(Duration::from_millis(20)), 1);
        assert_eq!(pacing.admit(Duration::from_millis(40)), 1);
    }

    #[test]
    fn long_frame_catches_up_within_cap() {
        let mut pacing = Pacing::new(Config::new(20));
        assert_eq!(pacing.admit(Duration::from_millis(160)), 3);
        assert_eq!(pacing.admit(Duration::from_millis(40)), 1);
    }

    #[test]
    fn stalled_frame_drops_surplus_time() {
        let mut pacing = Pacing::new(Config::new(20).with_max_ticks_per_frame(2));
        assert_eq!(pacing.admit(Duration::from_secs(1)), 2);
        assert_eq!(pacing.admit(Duration::from_millis(49)), 0);
    }

    #[test]
    fn zero_rate_never_ticks() {
        let mut pacing = Pacing::new(Config::new(0));
        assert_eq!(pacing.admit(Duration::from_secs(10)), 0);
    }

    #[test]
    fn extreme_rate_still_ticks() {
        let mut pacing = Pacing::new(Config::new(u32::MAX));
        assert_eq!(pacing.tick_interval(), Duration::from_nanos(1));
        assert_eq!(pacing.admit(Duration::from_secs(5)), MAX_TICKS_PER_FRAME);
    }
}
