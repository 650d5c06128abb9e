//! Timestamps and the shared explosion clock.
//!
//! The core never reads a system clock. Callers hand in [`Timestamp`]s (from
//! a frame scheduler, or synthetic ones in tests) and the clock derives the
//! per-tick delta from consecutive values.
//!
//! # Example
//!
//! ```
//! use shatter::time::{ExplosionClock, Timestamp};
//!
//! let mut clock = ExplosionClock::start(Timestamp::from_millis(1000.0));
//! let delta = clock.advance(Timestamp::from_millis(1100.0));
//!
//! assert!((delta - 0.1).abs() < 1e-6);
//! assert!((clock.elapsed() - 0.1).abs() < 1e-6);
//! ```

use std::time::Instant;

/// A point in time, in seconds since an arbitrary epoch.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default)]
pub struct Timestamp(f64);

impl Timestamp {
    #[inline]
    pub fn from_secs(secs: f64) -> Self {
        Self(secs)
    }

    /// From milliseconds, the unit browser frame callbacks use.
    #[inline]
    pub fn from_millis(millis: f64) -> Self {
        Self(millis / 1000.0)
    }

    /// Seconds elapsed between `origin` and `now`.
    pub fn since(origin: Instant, now: Instant) -> Self {
        Self(now.saturating_duration_since(origin).as_secs_f64())
    }

    #[inline]
    pub fn as_secs(self) -> f64 {
        self.0
    }

    /// Seconds from `earlier` to `self`, floored at zero.
    ///
    /// A timestamp source that steps backwards yields no advancement instead
    /// of running the simulation in reverse.
    pub fn delta_since(self, earlier: Timestamp) -> f32 {
        let delta = self.0 - earlier.0;
        if delta.is_finite() && delta > 0.0 {
            delta as f32
        } else {
            0.0
        }
    }
}

/// Time since the explosion was triggered.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExplosionClock {
    elapsed: f32,
    last_tick: Timestamp,
    frame: u64,
}

impl ExplosionClock {
    /// Start a clock at `now` with zero elapsed time.
    pub fn start(now: Timestamp) -> Self {
        Self {
            elapsed: 0.0,
            last_tick: now,
            frame: 0,
        }
    }

    /// Advance to `now`. Returns the (non-negative) delta in seconds.
    pub fn advance(&mut self, now: Timestamp) -> f32 {
        let delta = now.delta_since(self.last_tick);
        // Only move forward so a stale timestamp cannot rewind later deltas
        if now > self.last_tick {
            self.last_tick = now;
        }
        self.elapsed += delta;
        self.frame += 1;
        delta
    }

    /// Seconds since trigger.
    #[inline]
    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    #[inline]
    pub fn last_tick(&self) -> Timestamp {
        self.last_tick
    }

    /// Number of ticks since trigger.
    #[inline]
    pub fn frame(&self) -> u64 {
        self.frame
    }
}
